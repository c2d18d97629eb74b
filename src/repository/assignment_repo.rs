// ==========================================
// 多区域门店排班系统 - 排班记录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: (employee_id, date) 唯一；(store_id, date) 的唯一性由 replace_cell 保证
// ==========================================

use crate::domain::Assignment;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str =
    "id, employee_id, date, store_id, shift_type_id, is_substitution, company_id";

// ==========================================
// AssignmentRepository - 排班记录仓储
// ==========================================
pub struct AssignmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AssignmentRepository {
    /// 创建新的 AssignmentRepository 实例
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

    fn map_row(row: &Row) -> rusqlite::Result<Assignment> {
        Ok(Assignment {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            date: row.get(2)?,
            store_id: row.get(3)?,
            shift_type_id: row.get(4)?,
            is_substitution: row.get::<_, i64>(5)? != 0,
            company_id: row.get(6)?,
        })
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 查询一组门店在日期区间内的排班（闭区间）
    ///
    /// # 参数
    /// - `store_ids`: 门店ID列表（为空时直接返回空结果）
    /// - `from` / `to`: 日期区间
    pub fn list_by_stores_in_range(
        &self,
        store_ids: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Assignment>> {
        self.list_by_column_in_range("store_id", store_ids, from, to)
    }

    /// 查询一组员工在日期区间内的排班（闭区间，不限门店）
    pub fn list_by_employees_in_range(
        &self,
        employee_ids: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Assignment>> {
        self.list_by_column_in_range("employee_id", employee_ids, from, to)
    }

    // column 仅由本模块传入常量，不接受外部输入
    fn list_by_column_in_range(
        &self,
        column: &'static str,
        ids: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Assignment>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = std::iter::repeat("?")
            .take(ids.len())
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM assignment WHERE {} IN ({}) AND date >= ? AND date <= ? ORDER BY date, store_id, employee_id",
            SELECT_COLUMNS, column, placeholders
        );

        let mut values: Vec<Value> = ids.iter().map(|id| Value::Text(id.clone())).collect();
        values.push(Value::Text(crate::engine::calendar::format_date(from)));
        values.push(Value::Text(crate::engine::calendar::format_date(to)));

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 查询某门店某日的排班（正常情况下至多一条）
    pub fn list_by_store_and_date(
        &self,
        store_id: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Assignment>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM assignment WHERE store_id = ?1 AND date = ?2 ORDER BY employee_id",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![store_id, date], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 查询某员工某日的排班
    pub fn find_by_employee_and_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Option<Assignment>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM assignment WHERE employee_id = ?1 AND date = ?2",
            SELECT_COLUMNS
        );
        let row = conn
            .query_row(&sql, params![employee_id, date], Self::map_row)
            .optional()?;
        Ok(row)
    }

    // ==========================================
    // 写入
    // ==========================================

    /// 直接插入一条排班（(employee_id, date) 重复时报唯一约束错误）
    pub fn insert(&self, assignment: &Assignment) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO assignment (id, employee_id, date, store_id, shift_type_id, is_substitution, company_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                assignment.id,
                assignment.employee_id,
                assignment.date,
                assignment.store_id,
                assignment.shift_type_id,
                assignment.is_substitution as i64,
                assignment.company_id,
            ],
        )?;
        Ok(())
    }

    /// 删除某门店某日的全部排班
    ///
    /// # 返回
    /// - 删除的行数（0 也视为成功）
    pub fn delete_by_store_and_date(&self, store_id: &str, date: NaiveDate) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM assignment WHERE store_id = ?1 AND date = ?2",
            params![store_id, date],
        )?;
        Ok(affected)
    }

    /// 原子替换一个门店格子
    ///
    /// # 步骤（同一事务）
    /// 1. 删除 (store_id, date) 的全部排班
    /// 2. 若 replacement 非空：按 (employee_id, date) upsert
    ///    该员工当日在其他门店的排班被移到本门店（id 保持不变）
    ///
    /// 任一步失败则整体回滚
    pub fn replace_cell(
        &self,
        store_id: &str,
        date: NaiveDate,
        replacement: Option<&Assignment>,
    ) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            "DELETE FROM assignment WHERE store_id = ?1 AND date = ?2",
            params![store_id, date],
        )?;

        if let Some(a) = replacement {
            tx.execute(
                r#"
                INSERT INTO assignment (id, employee_id, date, store_id, shift_type_id, is_substitution, company_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(employee_id, date) DO UPDATE SET
                    store_id = excluded.store_id,
                    shift_type_id = excluded.shift_type_id,
                    is_substitution = excluded.is_substitution,
                    company_id = excluded.company_id
                "#,
                params![
                    a.id,
                    a.employee_id,
                    a.date,
                    a.store_id,
                    a.shift_type_id,
                    a.is_substitution as i64,
                    a.company_id,
                ],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }
}
