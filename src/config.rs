//! Configuration types for corpus-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Archiving run configuration
///
/// All fields except [`author`](Config::author) have sensible defaults, so a
/// minimal configuration is just the author slug:
///
/// ```
/// use corpus_dl::Config;
///
/// let config = Config {
///     author: "adam-mickiewicz".to_string(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the library REST API (default: "https://wolnelektury.pl/api")
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Author slug whose works are archived (required, no default)
    pub author: String,

    /// Language code a work must carry to be accepted (default: "pol")
    #[serde(default = "default_language")]
    pub language: String,

    /// Output directory for downloaded texts (default: "./texts")
    ///
    /// If this directory already exists the whole run is treated as already
    /// done and performs no requests and no writes.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum number of requests in flight at once (default: 5)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout for metadata lookups, in seconds (default: 10)
    ///
    /// Metadata payloads are small, so the ceiling is kept short.
    #[serde(default = "default_metadata_timeout", with = "duration_serde")]
    pub metadata_timeout: Duration,

    /// Per-request timeout for body downloads, in seconds (default: 60)
    ///
    /// Full texts can run to hundreds of kilobytes, so downloads get a
    /// longer ceiling than metadata lookups.
    #[serde(default = "default_download_timeout", with = "duration_serde")]
    pub download_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            author: String::new(),
            language: default_language(),
            output_dir: default_output_dir(),
            concurrency: default_concurrency(),
            metadata_timeout: default_metadata_timeout(),
            download_timeout: default_download_timeout(),
        }
    }
}

impl Config {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.author.trim().is_empty() {
            return Err(Error::Config {
                message: "author slug must not be empty".to_string(),
                key: Some("author".to_string()),
            });
        }

        if self.language.trim().is_empty() {
            return Err(Error::Config {
                message: "language code must not be empty".to_string(),
                key: Some("language".to_string()),
            });
        }

        if self.concurrency == 0 {
            return Err(Error::Config {
                message: "concurrency must be greater than zero".to_string(),
                key: Some("concurrency".to_string()),
            });
        }

        if let Err(e) = url::Url::parse(&self.api_base) {
            return Err(Error::Config {
                message: format!("api_base is not a valid URL: {e}"),
                key: Some("api_base".to_string()),
            });
        }

        Ok(())
    }

    /// URL of the endpoint listing the configured author's works
    pub fn works_list_url(&self) -> String {
        format!(
            "{}/authors/{}/books/",
            self.api_base.trim_end_matches('/'),
            self.author
        )
    }

    /// URL of the detail endpoint for a single work identified by `slug`
    pub fn work_detail_url(&self, slug: &str) -> String {
        format!("{}/books/{}/", self.api_base.trim_end_matches('/'), slug)
    }
}

fn default_api_base() -> String {
    "https://wolnelektury.pl/api".to_string()
}

fn default_language() -> String {
    "pol".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./texts")
}

fn default_concurrency() -> usize {
    5
}

fn default_metadata_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_download_timeout() -> Duration {
    Duration::from_secs(60)
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
