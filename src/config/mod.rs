#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

use crate::domain::model::Disease;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::{DEFAULT_BIND, DEFAULT_MODEL_DIR};

/// 合併 TOML 檔與命令列覆蓋後的最終設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub model_dir: String,
    pub diabetes_file: String,
    pub heart_disease_file: String,
    pub parkinsons_file: String,
    pub bind: String,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_dir: DEFAULT_MODEL_DIR.to_string(),
            diabetes_file: Disease::Diabetes.default_model_file().to_string(),
            heart_disease_file: Disease::HeartDisease.default_model_file().to_string(),
            parkinsons_file: Disease::Parkinsons.default_model_file().to_string(),
            bind: DEFAULT_BIND.to_string(),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            model_dir: config.model_dir().to_string(),
            diabetes_file: config.model_file(Disease::Diabetes).to_string(),
            heart_disease_file: config.model_file(Disease::HeartDisease).to_string(),
            parkinsons_file: config.model_file(Disease::Parkinsons).to_string(),
            bind: config.bind_address().to_string(),
            log_level: config.log_level().to_string(),
            log_json: config.log_json(),
        }
    }

    pub fn with_model_dir(mut self, model_dir: Option<&str>) -> Self {
        if let Some(dir) = model_dir {
            self.model_dir = dir.to_string();
        }
        self
    }

    pub fn with_bind(mut self, bind: Option<&str>) -> Self {
        if let Some(bind) = bind {
            self.bind = bind.to_string();
        }
        self
    }

    /// --verbose 一律提升為 debug，不論設定檔的 level
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.log_level = "debug".to_string();
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn model_dir(&self) -> &str {
        &self.model_dir
    }

    fn model_file(&self, disease: Disease) -> &str {
        match disease {
            Disease::Diabetes => &self.diabetes_file,
            Disease::HeartDisease => &self.heart_disease_file,
            Disease::Parkinsons => &self.parkinsons_file,
        }
    }

    fn bind_address(&self) -> &str {
        &self.bind
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("model_dir", &self.model_dir)?;
        validation::validate_file_name("models.diabetes", &self.diabetes_file, "json")?;
        validation::validate_file_name("models.heart_disease", &self.heart_disease_file, "json")?;
        validation::validate_file_name("models.parkinsons", &self.parkinsons_file, "json")?;
        validation::validate_socket_addr("server.bind", &self.bind)?;
        validation::validate_log_level("logging.level", &self.log_level)?;
        Ok(())
    }
}
