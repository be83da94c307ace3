/// Configuration system for the planner service
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level service configuration, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ratings: RatingsSettings,
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Where the published schedule JSON files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Individual schedule files, loaded in order
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Alternatively, a directory of .json schedule files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            files: vec![
                PathBuf::from("data/cs_schedule_spring_2026.json"),
                PathBuf::from("data/engineering_schedule_spring_2026.json"),
            ],
            data_dir: None,
        }
    }
}

/// Settings for the professor ratings provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingsSettings {
    pub school_name: String,
    /// Cache TTL in seconds for ratings lookups
    pub cache_ttl_secs: u64,
}

impl Default for RatingsSettings {
    fn default() -> Self {
        Self {
            school_name: "Hofstra University".to_string(),
            cache_ttl_secs: 5 * 60,
        }
    }
}

impl PlannerConfig {
    /// Loads configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads configuration from a file if it exists, falling back to
    /// defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            catalog: CatalogConfig::default(),
            ratings: RatingsSettings::default(),
        }
    }
}
