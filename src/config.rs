use serde::Deserialize;

/// Which backend holds saved style preferences
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    Memory,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Product dataset (comma-delimited, with header row)
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Root of the per-gender image folders
    #[serde(default = "default_images_dir")]
    pub images_dir: String,

    /// Directory holding the HTML pages
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    #[serde(default = "default_preference_store")]
    pub preference_store: StoreBackend,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_dataset_path() -> String {
    "labels_front.csv".to_string()
}

fn default_images_dir() -> String {
    "static/images".to_string()
}

fn default_pages_dir() -> String {
    "templates".to_string()
}

fn default_preference_store() -> StoreBackend {
    StoreBackend::Redis
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config: Config = envy::from_iter(vars(&[])).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.dataset_path, "labels_front.csv");
        assert_eq!(config.images_dir, "static/images");
        assert_eq!(config.pages_dir, "templates");
        assert_eq!(config.preference_store, StoreBackend::Redis);
        assert_eq!(config.redis_url, "redis://localhost:6379");
    }

    #[test]
    fn test_overrides() {
        let config: Config = envy::from_iter(vars(&[
            ("PORT", "8080"),
            ("DATASET_PATH", "/data/labels.csv"),
            ("PREFERENCE_STORE", "memory"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.dataset_path, "/data/labels.csv");
        assert_eq!(config.preference_store, StoreBackend::Memory);
    }

    #[test]
    fn test_unknown_store_backend_rejected() {
        let result = envy::from_iter::<_, Config>(vars(&[("PREFERENCE_STORE", "mongo")]));
        assert!(result.is_err());
    }
}
