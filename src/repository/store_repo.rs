// ==========================================
// 多区域门店排班系统 - 门店仓储
// ==========================================
// 红线: Repository 不含业务逻辑（生命周期判定在 engine::lifecycle）
// ==========================================

use crate::domain::Store;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "id, name, district_id, company_id, is_active, opened_at, closed_at";

// ==========================================
// StoreRepository - 门店仓储
// ==========================================
pub struct StoreRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StoreRepository {
    /// 创建新的 StoreRepository 实例
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

    // opened_at / closed_at 以 YYYY-MM-DD 文本存储，由 rusqlite chrono 特性直接转换
    fn map_row(row: &Row) -> rusqlite::Result<Store> {
        Ok(Store {
            id: row.get(0)?,
            name: row.get(1)?,
            district_id: row.get(2)?,
            company_id: row.get(3)?,
            is_active: row.get::<_, i64>(4)? != 0,
            opened_at: row.get(5)?,
            closed_at: row.get(6)?,
        })
    }

    fn query_list(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> RepositoryResult<Vec<Store>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(args, Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 新增门店
    pub fn insert(&self, store: &Store) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO store (id, name, district_id, company_id, is_active, opened_at, closed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                store.id,
                store.name,
                store.district_id,
                store.company_id,
                store.is_active as i64,
                store.opened_at,
                store.closed_at,
            ],
        )?;
        Ok(())
    }

    /// 更新门店
    ///
    /// # 返回
    /// - Err(NotFound): 门店不存在
    pub fn update(&self, store: &Store) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE store
            SET name = ?2, district_id = ?3, is_active = ?4, opened_at = ?5, closed_at = ?6
            WHERE id = ?1
            "#,
            params![
                store.id,
                store.name,
                store.district_id,
                store.is_active as i64,
                store.opened_at,
                store.closed_at,
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Store".to_string(),
                id: store.id.clone(),
            });
        }
        Ok(())
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Store>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM store WHERE id = ?1", SELECT_COLUMNS);
        let store = conn.query_row(&sql, params![id], Self::map_row).optional()?;
        Ok(store)
    }

    /// 列出区域内门店（按名称排序，不做生命周期过滤）
    pub fn list_by_district(&self, district_id: &str) -> RepositoryResult<Vec<Store>> {
        let sql = format!(
            "SELECT {} FROM store WHERE district_id = ?1 ORDER BY name, id",
            SELECT_COLUMNS
        );
        self.query_list(&sql, &[&district_id])
    }

    /// 列出公司内全部门店（按名称排序）
    pub fn list_by_company(&self, company_id: &str) -> RepositoryResult<Vec<Store>> {
        let sql = format!(
            "SELECT {} FROM store WHERE company_id = ?1 ORDER BY name, id",
            SELECT_COLUMNS
        );
        self.query_list(&sql, &[&company_id])
    }

    /// 列出全部门店（按名称排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Store>> {
        let sql = format!("SELECT {} FROM store ORDER BY name, id", SELECT_COLUMNS);
        self.query_list(&sql, &[])
    }
}
