use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub path: String,
}

/// Defaults applied to report requests that do not specify paging
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ReportsConfig {
    pub commission_per_page: u64,
    pub top_distributors_limit: u64,
    pub top_distributors_per_page: u64,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            commission_per_page: contracts::dashboards::d410_commission_report::DEFAULT_PER_PAGE,
            top_distributors_limit: contracts::dashboards::d411_top_distributors::DEFAULT_LIMIT,
            top_distributors_per_page: contracts::dashboards::d411_top_distributors::DEFAULT_PER_PAGE,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[dataset]
path = "crates/backend/data/sample_dataset.json"

[reports]
commission_per_page = 15
top_distributors_limit = 200
top_distributors_per_page = 20
"#;

/// Load configuration from a TOML file
///
/// Search order:
/// 1. Explicit path (first command line argument)
/// 2. config.toml next to the executable
/// 3. Embedded default config
pub fn load_config(explicit_path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit_path {
        tracing::info!("Loading config from: {}", path.display());
        return parse_file(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return parse_file(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn parse_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Get the dataset file path from configuration
///
/// Relative paths are tried next to the executable first, then against the
/// current directory.
pub fn get_dataset_path(config: &Config) -> PathBuf {
    let dataset_path = Path::new(&config.dataset.path);

    if dataset_path.is_absolute() {
        return dataset_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(dataset_path);
            if resolved_path.exists() {
                return resolved_path;
            }
        }
    }

    PathBuf::from(&config.dataset.path)
}
