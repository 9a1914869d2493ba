use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the merged ratings table (`.csv` or `.json`)
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum review count used when a popularity query omits it
    #[serde(default = "default_min_reviews")]
    pub default_min_reviews: usize,

    /// Result length used when a query omits `top_n`
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Neighbour count used when a collaborative query omits `k`
    #[serde(default = "default_k")]
    pub default_k: usize,
}

fn default_dataset_path() -> String {
    "data/ratings.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_min_reviews() -> usize {
    50
}

fn default_top_n() -> usize {
    10
}

fn default_k() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            host: default_host(),
            port: default_port(),
            default_min_reviews: default_min_reviews(),
            default_top_n: default_top_n(),
            default_k: default_k(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
