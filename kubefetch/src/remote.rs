use std::{
    ffi::OsString,
    process::{Command, Output, Stdio},
};

use tracing::debug;

use crate::{FetchError, SshConfig};

/// Runs a shell command on another host and returns what it printed.
pub trait RemoteShell {
    fn run(&self, host: &str, user: &str, command: &str) -> Result<String, FetchError>;
}

/// `RemoteShell` backed by the OpenSSH client binary.
#[derive(Debug, Clone, Default)]
pub struct Ssh {
    config: SshConfig,
}

impl Ssh {
    pub fn new(config: SshConfig) -> Ssh {
        Ssh { config }
    }

    pub fn args(&self, host: &str, user: &str, command: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if self.config.batch_mode {
            args.push("-o".into());
            args.push("BatchMode=yes".into());
        }
        if let Some(timeout) = self.config.connect_timeout {
            args.push("-o".into());
            args.push(format!("ConnectTimeout={timeout}").into());
        }
        if let Some(port) = self.config.port {
            args.push("-p".into());
            args.push(port.to_string().into());
        }
        if let Some(identity) = &self.config.identity_file {
            args.push("-i".into());
            args.push(identity.into());
        }
        for option in &self.config.options {
            args.push("-o".into());
            args.push(option.into());
        }
        args.push(format!("{user}@{host}").into());
        args.push(command.into());
        args
    }
}

impl RemoteShell for Ssh {
    fn run(&self, host: &str, user: &str, command: &str) -> Result<String, FetchError> {
        let program = &self.config.program;
        let args = self.args(host, user, command);
        debug!(program = %program.display(), ?args, "running remote command");

        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| FetchError::Spawn {
                program: program.clone(),
                source,
            })?;

        interpret(program.display().to_string(), output)
    }
}

fn interpret(program: String, output: Output) -> Result<String, FetchError> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if output.status.success() {
        // ssh prints host key warnings here; they must not end up in the document
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim_end(), "remote command wrote to stderr");
        }
        return Ok(stdout.into_owned());
    }

    let mut combined = stdout.into_owned();
    combined.push_str(&stderr);
    let combined = combined.trim_end();
    if combined.is_empty() {
        return Err(FetchError::RemoteExecution(format!(
            "{program} failed with {}",
            output.status
        )));
    }
    Err(FetchError::RemoteExecution(combined.to_owned()))
}

/// Single-quotes `word` for a POSIX shell.
pub fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// The remote command that prints the file at `path`.
pub fn cat_command(path: &str) -> String {
    format!("cat {}", shell_quote(path))
}
