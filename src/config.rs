use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// Fallback name for the OMDb API key
    #[serde(default)]
    pub omdb_key: Option<String>,

    /// Second fallback name for the OMDb API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Number of search candidates fetched in detail per query
    #[serde(default = "default_search_fan_out")]
    pub search_fan_out: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_search_fan_out() -> usize {
    5
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
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_pairs<I>(pairs: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(pairs)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.search_fan_out == 0 {
            anyhow::bail!("SEARCH_FAN_OUT must be at least 1");
        }
        Ok(self)
    }

    /// The OMDb credential, taken from the first non-empty of
    /// `OMDB_API_KEY`, `OMDB_KEY` and `API_KEY`.
    pub fn omdb_credential(&self) -> Option<String> {
        [&self.omdb_api_key, &self.omdb_key, &self.api_key]
            .into_iter()
            .flatten()
            .find_map(|raw| normalize_api_key(raw))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accepts either a bare key or a pasted OMDb URL such as
/// `https://www.omdbapi.com/?i=tt123&apikey=abc123`.
pub fn normalize_api_key(raw: &str) -> Option<String> {
    let raw = raw.trim();

    let key = match raw.find("apikey=") {
        Some(pos) => {
            let rest = &raw[pos + "apikey=".len()..];
            let end = rest
                .find(|c: char| !c.is_ascii_alphanumeric())
                .unwrap_or(rest.len());
            &rest[..end]
        }
        None => raw,
    };

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
