// ==========================================
// 多区域门店排班系统 - 配置层
// ==========================================
// 职责: 系统配置管理（冲突摘要、冲突检测口径、调色板）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod palette;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, DEFAULT_CONFLICT_DISPLAY_LIMIT};
pub use palette::CellPalette;
