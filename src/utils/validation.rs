use crate::utils::error::{PredictError, Result};
use std::net::SocketAddr;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PredictError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PredictError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    // 未替換的 ${VAR} 代表環境變數沒有設定
    if path.contains("${") {
        return Err(PredictError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains an unresolved environment variable".to_string(),
        });
    }

    Ok(())
}

/// 模型檔名必須是單一檔名，不可包含目錄
pub fn validate_file_name(field_name: &str, file_name: &str, allowed_extension: &str) -> Result<()> {
    validate_non_empty_string(field_name, file_name)?;

    let path = Path::new(file_name);
    if path.components().count() != 1 {
        return Err(PredictError::InvalidConfigValue {
            field: field_name.to_string(),
            value: file_name.to_string(),
            reason: "Must be a file name relative to the model directory".to_string(),
        });
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext == allowed_extension => Ok(()),
        _ => Err(PredictError::InvalidConfigValue {
            field: field_name.to_string(),
            value: file_name.to_string(),
            reason: format!("Model files must have the .{} extension", allowed_extension),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PredictError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_socket_addr(field_name: &str, value: &str) -> Result<SocketAddr> {
    value
        .parse::<SocketAddr>()
        .map_err(|e| PredictError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    if !LOG_LEVELS.contains(&level) {
        return Err(PredictError::InvalidConfigValue {
            field: field_name.to_string(),
            value: level.to_string(),
            reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
        });
    }
    Ok(())
}
