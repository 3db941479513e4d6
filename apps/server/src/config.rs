// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Optional JSON intensity table. The built-in profile is used when unset.
    pub table_path: Option<String>,
    /// Maximum request body size in KB.
    pub max_body_kb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Allowed CORS origins (comma-separated, or "*" for all).
    pub cors_origins: Vec<String>,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .unwrap_or(8080),
            table_path: std::env::var("TABLE_PATH")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            max_body_kb: std::env::var("MAX_BODY_KB")
                .unwrap_or_else(|_| "64".into())
                .parse()
                .unwrap_or(64),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
            cors_origins: parse_origins(&std::env::var("CORS_ORIGINS").unwrap_or_else(|_| {
                // Default: allow common development origins
                "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173".into()
            })),
            log_json: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Whether any origin is allowed.
    pub fn cors_permissive(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_origins() {
        assert_eq!(
            parse_origins(" http://a.test ,,http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn wildcard_is_permissive() {
        let mut config = Config {
            port: 8080,
            table_path: None,
            max_body_kb: 64,
            request_timeout_secs: 30,
            cors_origins: parse_origins("http://a.test"),
            log_json: false,
        };
        assert!(!config.cors_permissive());
        config.cors_origins = parse_origins("*");
        assert!(config.cors_permissive());
    }
}
