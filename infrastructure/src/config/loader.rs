//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "consumer-interview";
const PROJECT_FILES: [&str; 2] = ["interview.toml", ".interview.toml"];
const API_KEY_VAR: &str = "GEMINI_API_KEY";
const ENV_PREFIX: &str = "INTERVIEW_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment (`GEMINI_API_KEY`, `INTERVIEW_<SECTION>__<KEY>`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./interview.toml` or `./.interview.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/consumer-interview/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        let figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        Self::with_env(figment).extract().map_err(Box::new)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[API_KEY_VAR])
                    .map(|_| "generation.api_key".into()),
            )
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Default location of the session field file
    pub fn default_state_file() -> PathBuf {
        Self::data_dir().join("session.json")
    }

    /// Default location of the diagnostic log
    pub fn default_log_file() -> PathBuf {
        Self::data_dir().join("interview_bot.log")
    }

    fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if std::env::var_os(API_KEY_VAR).is_some() {
            println!("  [FOUND] Env:     {}", API_KEY_VAR);
        } else {
            println!("  [     ] Env:     {}", API_KEY_VAR);
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./interview.toml or ./.interview.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
