pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod remote;
pub mod request;

pub use config::{FetchConfig, SshConfig};
pub use error::FetchError;
pub use fetch::Fetcher;
pub use remote::{RemoteShell, Ssh};
pub use request::{Request, Response};
