// ==========================================
// 多区域门店排班系统 - 配置管理 API
// ==========================================
// 职责: 配置查询、更新（带取值校验）、快照
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_keys;
use crate::config::palette::is_valid_hex_color;
use crate::config::ConfigManager;
use crate::domain::CellTone;

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    /// 创建新的ConfigApi实例
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 查询单个配置（global）
    pub fn get_config(&self, key: &str) -> ApiResult<Option<String>> {
        if key.trim().is_empty() {
            return Err(ApiError::InvalidInput("配置键不能为空".to_string()));
        }
        self.config_manager
            .get_global_config_value(key.trim())
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }

    /// 更新配置
    ///
    /// 已知键会校验取值格式，未知键原样保存
    pub fn update_config(&self, key: &str, value: &str) -> ApiResult<()> {
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(ApiError::InvalidInput("配置键不能为空".to_string()));
        }
        validate_value(key, value)?;

        self.config_manager
            .set_global_config_value(key, value)
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        info!(config_key = key, config_value = value, "配置已更新");
        Ok(())
    }

    /// 配置快照（JSON）
    pub fn get_config_snapshot(&self) -> ApiResult<String> {
        self.config_manager
            .get_config_snapshot()
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }
}

fn validate_value(key: &str, value: &str) -> ApiResult<()> {
    match key {
        config_keys::CONFLICT_DISPLAY_LIMIT => match value.parse::<usize>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err(ApiError::InvalidInput(format!("{} 应为正整数: {}", key, value))),
        },
        config_keys::STORE_VIEW_RESPECTS_LIFECYCLE | config_keys::SUMMARY_VIEW_RESPECTS_LIFECYCLE => {
            match value.to_ascii_lowercase().as_str() {
                "true" | "false" | "1" | "0" | "yes" | "no" => Ok(()),
                _ => Err(ApiError::InvalidInput(format!("{} 应为 true/false: {}", key, value))),
            }
        }
        _ if key.starts_with(config_keys::PALETTE_PREFIX) => {
            let tone = &key[config_keys::PALETTE_PREFIX.len()..];
            if !CellTone::ALL.iter().any(|t| t.as_str() == tone) {
                return Err(ApiError::InvalidInput(format!("未知色调: {}", tone)));
            }
            if !is_valid_hex_color(value) {
                return Err(ApiError::InvalidInput(format!("颜色格式错误（应为#rrggbb）: {}", value)));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_known_keys() {
        assert!(validate_value(config_keys::CONFLICT_DISPLAY_LIMIT, "5").is_ok());
        assert!(validate_value(config_keys::CONFLICT_DISPLAY_LIMIT, "0").is_err());
        assert!(validate_value(config_keys::STORE_VIEW_RESPECTS_LIFECYCLE, "TRUE").is_ok());
        assert!(validate_value(config_keys::SUMMARY_VIEW_RESPECTS_LIFECYCLE, "sometimes").is_err());
        assert!(validate_value("palette.conflict", "#ff0000").is_ok());
        assert!(validate_value("palette.conflict", "red").is_err());
        assert!(validate_value("palette.purple", "#ff0000").is_err());
        assert!(validate_value("ui.locale", "uk").is_ok());
    }
}
