use crate::domain::model::Disease;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MODEL_DIR: &str = "./models";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub models: ModelsConfig,
    pub server: Option<ServerConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub base_path: String,
    pub diabetes: Option<String>,
    pub heart_disease: Option<String>,
    pub parkinsons: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictError::ConfigError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("models.base_path", &self.models.base_path)?;

        for disease in Disease::ALL {
            let field = format!("models.{}", Self::file_key(disease));
            validation::validate_file_name(&field, self.model_file(disease), "json")?;
        }

        validation::validate_socket_addr("server.bind", self.bind_address())?;

        validation::validate_log_level("logging.level", self.log_level())?;

        Ok(())
    }

    fn file_key(disease: Disease) -> &'static str {
        match disease {
            Disease::Diabetes => "diabetes",
            Disease::HeartDisease => "heart_disease",
            Disease::Parkinsons => "parkinsons",
        }
    }

    /// 取得日誌等級
    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn model_dir(&self) -> &str {
        &self.models.base_path
    }

    fn model_file(&self, disease: Disease) -> &str {
        let configured = match disease {
            Disease::Diabetes => self.models.diabetes.as_deref(),
            Disease::HeartDisease => self.models.heart_disease.as_deref(),
            Disease::Parkinsons => self.models.parkinsons.as_deref(),
        };
        configured.unwrap_or_else(|| disease.default_model_file())
    }

    fn bind_address(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
