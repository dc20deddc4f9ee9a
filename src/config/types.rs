use serde::Deserialize;

/// Client identifier sent with every request unless overridden
pub const DEFAULT_CLIENT_IDENTIFIER: &str = "Mozilla/5.0 TIOJ Stats Card";

/// Request timeout used when the config does not set one
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for TIOJ Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the judge, e.g. `https://tioj.ck.tp.edu.tw`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Value of the `user-agent` header sent with each request
    #[serde(rename = "client-identifier", default = "default_client_identifier")]
    pub client_identifier: String,

    /// Per-request timeout in seconds; 0 disables the timeout
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,
}

/// Batch run tunables
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Last listing page to walk (pages are walked `1..=max_page`)
    #[serde(rename = "max-page")]
    pub max_page: u32,

    /// Concurrency window shared by both phases
    pub window: u32,

    /// Window override for the listing phase
    #[serde(rename = "list-window", default)]
    pub list_window: Option<u32>,

    /// Window override for the detail phase
    #[serde(rename = "detail-window", default)]
    pub detail_window: Option<u32>,
}

impl RunConfig {
    /// Effective window width for the listing phase
    pub fn list_window(&self) -> usize {
        self.list_window.unwrap_or(self.window) as usize
    }

    /// Effective window width for the detail phase
    pub fn detail_window(&self) -> usize {
        self.detail_window.unwrap_or(self.window) as usize
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `_ranks.json` and one `{handle}.json` per user
    pub directory: String,
}

fn default_client_identifier() -> String {
    DEFAULT_CLIENT_IDENTIFIER.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
