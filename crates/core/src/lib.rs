pub mod api;
pub mod domain;
pub mod format;
pub mod render;
pub mod storage;
pub mod view;

pub mod config {
    use anyhow::Context;
    use std::path::{Path, PathBuf};

    pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5001";
    pub const DEFAULT_PREFS_PATH: &str = ".winnerdash/prefs.json";

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub api_base_url: Option<String>,
        pub http_timeout_secs: Option<u64>,
        pub opportunities_top_n: Option<u32>,
        pub prefs_path: Option<PathBuf>,
        pub animate_counters: bool,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

            let http_timeout_secs = var("WINNERDASH_HTTP_TIMEOUT_SECS")
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .context("WINNERDASH_HTTP_TIMEOUT_SECS must be a whole number of seconds")?;

            let opportunities_top_n = var("WINNERDASH_TOP_N")
                .map(|v| v.trim().parse::<u32>())
                .transpose()
                .context("WINNERDASH_TOP_N must be a positive integer")?;

            let animate_counters = match var("WINNERDASH_ANIMATE_COUNTERS") {
                None => false,
                Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => true,
                    "0" | "false" | "no" | "off" => false,
                    other => anyhow::bail!("WINNERDASH_ANIMATE_COUNTERS must be a boolean, got {other:?}"),
                },
            };

            Ok(Self {
                api_base_url: var("WINNERDASH_API_BASE_URL"),
                http_timeout_secs,
                opportunities_top_n,
                prefs_path: var("WINNERDASH_PREFS_PATH").map(PathBuf::from),
                animate_counters,
                sentry_dsn: var("SENTRY_DSN"),
            })
        }

        pub fn api_base_url(&self) -> &str {
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
        }

        pub fn prefs_path(&self) -> &Path {
            self.prefs_path
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_PREFS_PATH))
        }
    }

}
