use tracing::{info, warn};

use crate::{
    document,
    remote::{cat_command, RemoteShell, Ssh},
    FetchConfig, FetchError, Request, Response,
};

/// Pulls a kubeconfig off a cluster host and points it at that host.
pub struct Fetcher<R = Ssh> {
    config: FetchConfig,
    remote: R,
}

impl Fetcher<Ssh> {
    pub fn over_ssh(config: FetchConfig) -> Fetcher<Ssh> {
        let remote = Ssh::new(config.ssh.clone());
        Fetcher { config, remote }
    }
}

impl<R: RemoteShell> Fetcher<R> {
    pub fn new(config: FetchConfig, remote: R) -> Fetcher<R> {
        Fetcher { config, remote }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn try_fetch(&self, request: &Request) -> Result<String, FetchError> {
        let command = cat_command(&self.config.kubeconfig_path);
        let text = self.remote.run(&request.host, &request.user, &command)?;

        let server = self.config.endpoint(&request.host);
        let kubeconfig = document::rewrite_server(&text, self.config.cluster_index, &server)?;
        info!(host = %request.host, %server, "fetched kubeconfig");
        Ok(kubeconfig)
    }

    /// Never fails: any error is reported in the returned `Response`.
    pub fn fetch(&self, request: &Request) -> Response {
        let result = self.try_fetch(request);
        if let Err(e) = &result {
            warn!(host = %request.host, user = %request.user, remote = e.is_remote(), "fetch failed: {e}");
        }
        Response::from(result)
    }
}
