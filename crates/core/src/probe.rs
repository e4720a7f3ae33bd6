use std::time::Duration;

use log::{debug, warn};
use reqwest::StatusCode;

use crate::config::PROGRAM_NAME;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// What a probe learned about a remote repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Exists,
    Missing,
    /// The probe could not tell, e.g. because the network is down.
    Unknown,
}

/// Checks whether a remote repository exists before it is cloned.
///
/// Probing only sharpens the error for a missing remote. The clone itself
/// stays the source of truth, so anything short of a definite `Missing`
/// lets the install carry on.
pub trait RemoteProbe {
    fn probe(&self, url: &str) -> ProbeOutcome;
}

/// [`RemoteProbe`] that issues an HTTP GET against the repository page.
pub struct HttpProbe {
    client: Option<reqwest::blocking::Client>,
}

impl HttpProbe {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("{PROGRAM_NAME}/{}", env!("CARGO_PKG_VERSION")))
            .timeout(PROBE_TIMEOUT)
            .build();

        match client {
            Ok(client) => Self {
                client: Some(client),
            },
            Err(e) => {
                warn!("Could not build HTTP client, remote probing disabled: {e}");
                Self { client: None }
            }
        }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteProbe for HttpProbe {
    fn probe(&self, url: &str) -> ProbeOutcome {
        let Some(client) = &self.client else {
            return ProbeOutcome::Unknown;
        };

        match client.get(url).send() {
            Ok(response) => {
                debug!("Probe of {url} returned {}", response.status());
                classify_status(response.status())
            }
            Err(e) => {
                debug!("Probe of {url} failed: {e}");
                ProbeOutcome::Unknown
            }
        }
    }
}

/// Maps an HTTP status to a probe outcome. Only a 404 is treated as proof
/// that the repository is missing.
pub fn classify_status(status: StatusCode) -> ProbeOutcome {
    if status == StatusCode::NOT_FOUND {
        ProbeOutcome::Missing
    } else if status.is_success() || status.is_redirection() {
        ProbeOutcome::Exists
    } else {
        ProbeOutcome::Unknown
    }
}
