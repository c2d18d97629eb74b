// ==========================================
// 多区域门店排班系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::palette::{is_valid_hex_color, CellPalette};
use crate::db::open_sqlite_connection;
use crate::domain::CellTone;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 冲突摘要默认展示条数
pub const DEFAULT_CONFLICT_DISPLAY_LIMIT: usize = 10;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let key = key.trim();
        if key.is_empty() {
            return Err("配置键不能为空".into());
        }

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 返回
    /// - Ok(String): 形如 {"key": "value", ...} 的 JSON 字符串（按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    fn get_bool_or_default(&self, key: &str, default: bool) -> Result<bool, Box<dyn Error>> {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => {
                tracing::warn!(config_key = key, raw_value = %raw, "布尔配置格式错误，使用默认值");
                Ok(default)
            }
        }
    }

    // ===== 冲突检测配置 =====

    /// 冲突摘要展示条数（默认 10，非正整数回退默认值）
    pub fn get_conflict_display_limit(&self) -> Result<usize, Box<dyn Error>> {
        let raw = match self.get_config_value(config_keys::CONFLICT_DISPLAY_LIMIT)? {
            Some(v) => v,
            None => return Ok(DEFAULT_CONFLICT_DISPLAY_LIMIT),
        };
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => {
                tracing::warn!(
                    config_key = config_keys::CONFLICT_DISPLAY_LIMIT,
                    raw_value = %raw,
                    "冲突展示条数配置无效，使用默认值"
                );
                Ok(DEFAULT_CONFLICT_DISPLAY_LIMIT)
            }
        }
    }

    /// 门店网格视图的冲突检测是否过滤生命周期（默认 false）
    pub fn get_store_view_respects_lifecycle(&self) -> Result<bool, Box<dyn Error>> {
        self.get_bool_or_default(config_keys::STORE_VIEW_RESPECTS_LIFECYCLE, false)
    }

    /// 员工汇总视图的冲突检测是否过滤生命周期（默认 true）
    pub fn get_summary_view_respects_lifecycle(&self) -> Result<bool, Box<dyn Error>> {
        self.get_bool_or_default(config_keys::SUMMARY_VIEW_RESPECTS_LIFECYCLE, true)
    }

    // ===== 调色板配置 =====

    /// 读取调色板（逐个色调覆写，格式错误的值回退默认颜色）
    pub fn get_palette(&self) -> Result<CellPalette, Box<dyn Error>> {
        let mut palette = CellPalette::default();
        for tone in CellTone::ALL {
            let key = config_keys::palette_key(tone);
            if let Some(raw) = self.get_config_value(&key)? {
                let value = raw.trim();
                if is_valid_hex_color(value) {
                    palette.set(tone, value);
                } else {
                    tracing::warn!(config_key = %key, raw_value = %raw, "颜色配置格式错误，使用默认颜色");
                }
            }
        }
        Ok(palette)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    use crate::domain::CellTone;

    // 冲突摘要
    pub const CONFLICT_DISPLAY_LIMIT: &str = "conflict.display_limit";

    // 冲突检测的生命周期过滤（按视图）
    pub const STORE_VIEW_RESPECTS_LIFECYCLE: &str = "conflict.store_view_respects_lifecycle";
    pub const SUMMARY_VIEW_RESPECTS_LIFECYCLE: &str = "conflict.summary_view_respects_lifecycle";

    // 调色板前缀: palette.<tone>
    pub const PALETTE_PREFIX: &str = "palette.";

    pub fn palette_key(tone: CellTone) -> String {
        format!("{}{}", PALETTE_PREFIX, tone.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_without_rows() {
        let cm = manager();
        assert_eq!(cm.get_conflict_display_limit().unwrap(), 10);
        assert!(!cm.get_store_view_respects_lifecycle().unwrap());
        assert!(cm.get_summary_view_respects_lifecycle().unwrap());
        assert_eq!(cm.get_palette().unwrap().hex(CellTone::Conflict), "#fecaca");
        assert_eq!(cm.get_config_snapshot().unwrap(), "{}");
    }

    #[test]
    fn test_overrides_and_malformed_values() {
        let cm = manager();
        cm.set_global_config_value(config_keys::CONFLICT_DISPLAY_LIMIT, "3").unwrap();
        cm.set_global_config_value(config_keys::STORE_VIEW_RESPECTS_LIFECYCLE, "TRUE").unwrap();
        cm.set_global_config_value(config_keys::SUMMARY_VIEW_RESPECTS_LIFECYCLE, "maybe").unwrap();
        cm.set_global_config_value("palette.substitution", "#abcdef").unwrap();
        cm.set_global_config_value("palette.green", "green").unwrap();

        assert_eq!(cm.get_conflict_display_limit().unwrap(), 3);
        assert!(cm.get_store_view_respects_lifecycle().unwrap());
        assert!(cm.get_summary_view_respects_lifecycle().unwrap());

        let palette = cm.get_palette().unwrap();
        assert_eq!(palette.hex(CellTone::Substitution), "#abcdef");
        assert_eq!(palette.hex(CellTone::Green), "#d9f7be");

        cm.set_global_config_value(config_keys::CONFLICT_DISPLAY_LIMIT, "0").unwrap();
        assert_eq!(cm.get_conflict_display_limit().unwrap(), 10);
    }

    #[test]
    fn test_snapshot_lists_keys_in_order() {
        let cm = manager();
        cm.set_global_config_value("b", "2").unwrap();
        cm.set_global_config_value("a", "1").unwrap();
        cm.set_global_config_value("a", "3").unwrap();

        let snapshot: serde_json::Value = serde_json::from_str(&cm.get_config_snapshot().unwrap()).unwrap();
        assert_eq!(snapshot, json!({"a": "3", "b": "2"}));
        assert!(cm.set_global_config_value("  ", "x").is_err());
    }
}
