use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the media API, prefix for every `/api/media` endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Number of records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Rows the terminal shell shows at once
    #[serde(default = "default_viewport_rows")]
    pub viewport_rows: usize,

    /// Stub server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Stub server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_viewport_rows() -> usize {
    8
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.page_size == 0 {
            anyhow::bail!("Failed to load config: PAGE_SIZE must be at least 1");
        }

        Ok(config)
    }

    /// Address the stub server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
