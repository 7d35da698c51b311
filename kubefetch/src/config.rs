use std::path::PathBuf;

/// Where k3s writes the admin kubeconfig on a server node.
pub const DEFAULT_KUBECONFIG_PATH: &str = "/etc/rancher/k3s/k3s.yaml";
/// The entry in `clusters` whose server gets rewritten.
pub const DEFAULT_CLUSTER_INDEX: usize = 0;
pub const DEFAULT_API_PORT: u16 = 6443;
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_SSH_PROGRAM: &str = "ssh";
pub const DEFAULT_USER: &str = "root";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub kubeconfig_path: String,
    pub cluster_index: usize,
    pub api_port: u16,
    pub scheme: String,
    pub ssh: SshConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            kubeconfig_path: DEFAULT_KUBECONFIG_PATH.to_owned(),
            cluster_index: DEFAULT_CLUSTER_INDEX,
            api_port: DEFAULT_API_PORT,
            scheme: DEFAULT_SCHEME.to_owned(),
            ssh: SshConfig::default(),
        }
    }
}

impl FetchConfig {
    /// The server URL written into the kubeconfig for `host`.
    ///
    /// The host is always bracketed so IPv6 literals produce a valid URL.
    pub fn endpoint(&self, host: &str) -> String {
        format!("{}://[{}]:{}", self.scheme, host, self.api_port)
    }
}

/// Settings for the OpenSSH client.
///
/// Anything left unset falls through to the user's ssh configuration.
#[derive(Debug, Clone)]
pub struct SshConfig {
    pub program: PathBuf,
    pub port: Option<u16>,
    pub identity_file: Option<PathBuf>,
    pub connect_timeout: Option<u64>,
    pub batch_mode: bool,
    pub options: Vec<String>,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_SSH_PROGRAM),
            port: None,
            identity_file: None,
            connect_timeout: None,
            batch_mode: true,
            options: Vec::new(),
        }
    }
}
