use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{config::DEFAULT_USER, FetchError};

/// One data-source request, as read from stdin.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "RawRequest")]
pub struct Request {
    pub host: String,
    pub user: String,
}

#[derive(Deserialize)]
struct RawRequest {
    host: String,
    #[serde(default)]
    user: Option<String>,
}

impl TryFrom<RawRequest> for Request {
    type Error = String;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        // ssh would take either of these as an option
        if raw.host.is_empty() {
            return Err("host must not be empty".to_owned());
        }
        if raw.host.starts_with('-') {
            return Err(format!("host must not start with '-': {}", raw.host));
        }
        let user = raw.user.unwrap_or_else(|| DEFAULT_USER.to_owned());
        if user.starts_with('-') {
            return Err(format!("user must not start with '-': {user}"));
        }
        Ok(Request {
            host: raw.host,
            user,
        })
    }
}

impl Request {
    pub fn new(host: impl Into<String>, user: Option<&str>) -> Request {
        Request {
            host: host.into(),
            user: user.unwrap_or(DEFAULT_USER).to_owned(),
        }
    }

    pub fn from_json(text: &str) -> Result<Request, FetchError> {
        serde_json::from_str(text).map_err(|e| FetchError::InvalidRequest(e.to_string()))
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Request, FetchError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| FetchError::InvalidRequest(format!("reading input: {e}")))?;
        Request::from_json(&text)
    }
}

/// Exactly one of `{"kubeconfig": ...}` or `{"error": ...}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Kubeconfig(String),
    Error(String),
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// The single-line JSON form written to stdout.
    pub fn to_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(line) => line,
            // Only a broken Serialize impl gets here; keep the output well formed.
            Err(e) => format!("{{\"error\":{:?}}}", e.to_string()),
        }
    }
}

impl From<Result<String, FetchError>> for Response {
    fn from(result: Result<String, FetchError>) -> Self {
        match result {
            Ok(kubeconfig) => Response::Kubeconfig(kubeconfig),
            Err(e) => Response::Error(e.to_string()),
        }
    }
}
