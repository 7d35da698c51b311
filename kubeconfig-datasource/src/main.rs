//! External data source that hands a provisioning tool a cluster's kubeconfig.
//!
//! Reads `{"host": ..., "user": ...}` on stdin and prints one line of JSON on
//! stdout: `{"kubeconfig": ...}` or `{"error": ...}`. The exit status is 0
//! whenever a response was written, so callers must look at the body.

use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use kubefetch::{
    config::{
        DEFAULT_API_PORT, DEFAULT_CLUSTER_INDEX, DEFAULT_KUBECONFIG_PATH, DEFAULT_SCHEME,
        DEFAULT_SSH_PROGRAM,
    },
    logging, FetchConfig, Fetcher, Request, Response, SshConfig,
};

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Path of the kubeconfig on the remote host
    #[clap(long, default_value = DEFAULT_KUBECONFIG_PATH)]
    kubeconfig_path: String,

    /// Which entry of `clusters` to point at the host
    #[clap(long, default_value_t = DEFAULT_CLUSTER_INDEX)]
    cluster_index: usize,

    /// Port of the Kubernetes API server
    #[clap(long, default_value_t = DEFAULT_API_PORT)]
    api_port: u16,

    #[clap(long, default_value = DEFAULT_SCHEME)]
    scheme: String,

    /// ssh client to run
    #[clap(long, default_value = DEFAULT_SSH_PROGRAM, parse(from_os_str))]
    ssh_program: PathBuf,

    #[clap(long)]
    ssh_port: Option<u16>,

    #[clap(short = 'i', long, parse(from_os_str))]
    identity_file: Option<PathBuf>,

    /// Seconds to wait for the ssh connection to come up
    #[clap(long)]
    connect_timeout: Option<u64>,

    /// Allow ssh to prompt for passwords and passphrases
    #[clap(long)]
    no_batch_mode: bool,

    /// Extra ssh option, as for `ssh -o`
    #[clap(short = 'o', long = "ssh-option", multiple_occurrences = true)]
    ssh_options: Vec<String>,

    /// Log filter for diagnostics on stderr
    #[clap(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl Args {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            kubeconfig_path: self.kubeconfig_path.clone(),
            cluster_index: self.cluster_index,
            api_port: self.api_port,
            scheme: self.scheme.clone(),
            ssh: SshConfig {
                program: self.ssh_program.clone(),
                port: self.ssh_port,
                identity_file: self.identity_file.clone(),
                connect_timeout: self.connect_timeout,
                batch_mode: !self.no_batch_mode,
                options: self.ssh_options.clone(),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init(&args.log_level).context("Parsing --log-level")?;

    let fetcher = Fetcher::over_ssh(args.fetch_config());
    let response = match Request::from_reader(io::stdin().lock()) {
        Ok(request) => {
            tracing::debug!(host = %request.host, user = %request.user, "read request");
            fetcher.fetch(&request)
        }
        Err(e) => {
            tracing::warn!("{e}");
            Response::Error(e.to_string())
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response.to_line()).context("Writing response")?;
    stdout.flush().context("Writing response")?;

    Ok(())
}
