// ==========================================
// 多区域门店排班系统 - 员工仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::Employee;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "id, full_name, main_district_id, is_active, company_id";

// ==========================================
// EmployeeRepository - 员工仓储
// ==========================================
pub struct EmployeeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepository {
    /// 创建新的 EmployeeRepository 实例
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

    fn map_row(row: &Row) -> rusqlite::Result<Employee> {
        Ok(Employee {
            id: row.get(0)?,
            full_name: row.get(1)?,
            main_district_id: row.get(2)?,
            is_active: row.get::<_, i64>(3)? != 0,
            company_id: row.get(4)?,
        })
    }

    /// 新增员工
    pub fn insert(&self, employee: &Employee) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO employee (id, full_name, main_district_id, is_active, company_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                employee.id,
                employee.full_name,
                employee.main_district_id,
                employee.is_active as i64,
                employee.company_id,
            ],
        )?;
        Ok(())
    }

    /// 更新员工（姓名、主区域、在职状态）
    ///
    /// # 返回
    /// - Err(NotFound): 员工不存在
    pub fn update(&self, employee: &Employee) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE employee
            SET full_name = ?2, main_district_id = ?3, is_active = ?4
            WHERE id = ?1
            "#,
            params![
                employee.id,
                employee.full_name,
                employee.main_district_id,
                employee.is_active as i64,
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Employee".to_string(),
                id: employee.id.clone(),
            });
        }
        Ok(())
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM employee WHERE id = ?1", SELECT_COLUMNS);
        let employee = conn.query_row(&sql, params![id], Self::map_row).optional()?;
        Ok(employee)
    }

    /// 列出公司内全部员工（按姓名排序，含离职）
    pub fn list_by_company(&self, company_id: &str) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM employee WHERE company_id = ?1 ORDER BY full_name, id",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![company_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 列出主区域为指定区域的员工（按姓名排序，含离职）
    pub fn list_by_home_district(&self, district_id: &str) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM employee WHERE main_district_id = ?1 ORDER BY full_name, id",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![district_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 列出全部员工（按姓名排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM employee ORDER BY full_name, id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
