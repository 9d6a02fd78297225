use serde::Deserialize;

use toptui::logic::retry::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Backend base URL; may instead come from --base-url
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub vim_mode: bool,
    #[serde(default)]
    pub open_command: Option<String>,
    #[serde(default)]
    pub clipboard_command: Option<String>,
    #[serde(default = "default_stat_max_attempts")]
    pub stat_max_attempts: u32,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_stat_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            vim_mode: false,
            open_command: None,
            clipboard_command: None,
            stat_max_attempts: default_stat_max_attempts(),
            request_timeout_secs: None,
        }
    }
}
