// ==========================================
// 多区域门店排班系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为用户友好的错误消息
// 说明: 所有错误都在本地恢复（展示给当前视图或弹窗），不终止进程
// ==========================================

use crate::engine::edit_session::EditSessionError;
use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 排班网格错误
    // ==========================================
    /// 范围加载中任一查询失败，或区域不存在
    #[error("数据加载失败: {0}")]
    ScopeLoadFailed(String),

    /// 写入目标日期在门店生命周期之外
    #[error("该日期不可编辑: store_id={store_id}, date={date}")]
    DayNotEditable { store_id: String, date: NaiveDate },

    /// 所选班次代码在目录中不存在
    #[error("未知班次类型: {0}")]
    UnknownShiftType(String),

    /// 后端拒绝删除/插入/upsert（含约束违反）
    #[error("保存失败: {0}")]
    WriteFailed(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 配置与导出错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("导出失败: {0}")]
    ExportFailed(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 稳定的错误代码（供外层界面使用）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ScopeLoadFailed(_) => "SCOPE_LOAD_FAILED",
            ApiError::DayNotEditable { .. } => "DAY_NOT_EDITABLE",
            ApiError::UnknownShiftType(_) => "UNKNOWN_SHIFT_TYPE",
            ApiError::WriteFailed(_) => "WRITE_FAILED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::ExportFailed(_) => "EXPORT_FAILED",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 说明: 范围加载与写入路径各自显式映射为 ScopeLoadFailed / WriteFailed，
//       这里只覆盖管理类操作的通用映射
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::InvalidInput(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::InvalidInput(format!("外键约束违反: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::LockError(msg) => {
                ApiError::InternalError(format!("数据库锁获取失败: {}", msg))
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<EditSessionError> for ApiError {
    fn from(err: EditSessionError) -> Self {
        match err {
            EditSessionError::DayNotEditable { store_id, date } => {
                ApiError::DayNotEditable { store_id, date }
            }
            other => ApiError::InvalidInput(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// ErrorResponse - 错误响应（外层界面）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// 将ApiError转换为JSON字符串
pub fn map_api_error(err: &ApiError) -> String {
    serde_json::to_string(&ErrorResponse::from(err)).unwrap_or_else(|_| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "Store".to_string(),
            id: "S404".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Store"));
                assert!(msg.contains("S404"));
            }
            _ => panic!("Expected NotFound"),
        }

        let api_err: ApiError = RepositoryError::ForeignKeyViolation("FOREIGN KEY".into()).into();
        assert_eq!(api_err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_edit_session_error_conversion() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
        let api_err: ApiError = EditSessionError::DayNotEditable {
            store_id: "S1".to_string(),
            date,
        }
        .into();
        assert_eq!(api_err.code(), "DAY_NOT_EDITABLE");

        let api_err: ApiError = EditSessionError::Busy.into();
        assert_eq!(api_err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_error_response_json() {
        let err = ApiError::UnknownShiftType("X".to_string());
        let json: serde_json::Value = serde_json::from_str(&map_api_error(&err)).unwrap();
        assert_eq!(json["code"], "UNKNOWN_SHIFT_TYPE");
        assert!(json["message"].as_str().unwrap().contains("X"));
    }
}
