use serde::Deserialize;

/// Default number of simultaneous fetches
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Upper bound on simultaneous fetches
pub const MAX_CONCURRENCY_CAP: usize = 100;

/// Default page budget
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Identifying header sent with every request
pub const DEFAULT_USER_AGENT: &str = "BootCrawler/1.0";

/// Report file written in the working directory
pub const DEFAULT_REPORT_PATH: &str = "report.csv";

/// Main configuration structure for Site-Ripple
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrency", default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Maximum number of distinct pages to record
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Size of the worker pool consuming the frontier (defaults to twice the concurrency)
    #[serde(default)]
    pub workers: Option<usize>,
}

impl CrawlerConfig {
    /// Number of frontier workers to spawn
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| self.max_concurrency.saturating_mul(2))
            .max(1)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_pages: DEFAULT_MAX_PAGES,
            workers: None,
        }
    }
}

/// Request identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAgentConfig {
    /// Value of the User-Agent header
    #[serde(default = "default_user_agent")]
    pub name: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the CSV report
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
        }
    }
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_report_path() -> String {
    DEFAULT_REPORT_PATH.to_string()
}
