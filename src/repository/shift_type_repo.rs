// ==========================================
// 多区域门店排班系统 - 班次类型仓储
// ==========================================

use crate::domain::{ColorKey, ShiftType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ShiftTypeRepository - 班次类型仓储
// ==========================================
pub struct ShiftTypeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShiftTypeRepository {
    /// 创建新的 ShiftTypeRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> rusqlite::Result<ShiftType> {
        let color: Option<String> = row.get(2)?;
        Ok(ShiftType {
            id: row.get(0)?,
            code: row.get(1)?,
            color_key: ColorKey::from_db(color.as_deref()),
            company_id: row.get(3)?,
        })
    }

    /// 新增班次类型
    pub fn insert(&self, shift_type: &ShiftType) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO shift_type (id, code, color_key, company_id) VALUES (?1, ?2, ?3, ?4)",
            params![
                shift_type.id,
                shift_type.code,
                shift_type.color_key.to_db(),
                shift_type.company_id,
            ],
        )?;
        Ok(())
    }

    /// 列出公司内班次类型（按代码排序）
    pub fn list_by_company(&self, company_id: &str) -> RepositoryResult<Vec<ShiftType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, code, color_key, company_id FROM shift_type WHERE company_id = ?1 ORDER BY code",
        )?;
        let rows = stmt
            .query_map(params![company_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 按代码查询（公司内唯一）
    pub fn find_by_code(&self, company_id: &str, code: &str) -> RepositoryResult<Option<ShiftType>> {
        let conn = self.get_conn()?;
        let shift_type = conn
            .query_row(
                "SELECT id, code, color_key, company_id FROM shift_type WHERE company_id = ?1 AND code = ?2",
                params![company_id, code],
                Self::map_row,
            )
            .optional()?;
        Ok(shift_type)
    }
}
