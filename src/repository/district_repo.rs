// ==========================================
// 多区域门店排班系统 - 区域仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::District;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// DistrictRepository - 区域仓储
// ==========================================
pub struct DistrictRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DistrictRepository {
    /// 创建新的 DistrictRepository 实例
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

    fn map_row(row: &Row) -> rusqlite::Result<District> {
        Ok(District {
            id: row.get(0)?,
            name: row.get(1)?,
            company_id: row.get(2)?,
        })
    }

    /// 新增区域
    pub fn insert(&self, district: &District) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO district (id, name, company_id) VALUES (?1, ?2, ?3)",
            params![district.id, district.name, district.company_id],
        )?;
        Ok(())
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<District>> {
        let conn = self.get_conn()?;
        let district = conn
            .query_row(
                "SELECT id, name, company_id FROM district WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(district)
    }

    /// 列出全部区域（按名称排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<District>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name, company_id FROM district ORDER BY name, id")?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
