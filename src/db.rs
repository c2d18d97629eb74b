// ==========================================
// 多区域门店排班系统 - SQLite 连接初始化与建表
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键、busy_timeout）
// - 幂等建表：五类记录 + config_kv + schema_version
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// # 约束
/// - assignment: UNIQUE(employee_id, date) —— 写入路径的 upsert 冲突键
/// - assignment: (store_id, date) 只建普通索引，“一店一日一人”由写入路径保证
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS district (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            company_id TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS employee (
            id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            main_district_id TEXT REFERENCES district(id),
            is_active INTEGER NOT NULL DEFAULT 1,
            company_id TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS store (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            district_id TEXT NOT NULL REFERENCES district(id),
            company_id TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            opened_at TEXT,
            closed_at TEXT
        );

        CREATE TABLE IF NOT EXISTS shift_type (
            id TEXT PRIMARY KEY,
            code TEXT NOT NULL,
            color_key TEXT,
            company_id TEXT NOT NULL,
            UNIQUE (company_id, code)
        );

        CREATE TABLE IF NOT EXISTS assignment (
            id TEXT PRIMARY KEY,
            employee_id TEXT NOT NULL REFERENCES employee(id),
            date TEXT NOT NULL,
            store_id TEXT NOT NULL REFERENCES store(id),
            shift_type_id TEXT REFERENCES shift_type(id) ON DELETE SET NULL,
            is_substitution INTEGER NOT NULL DEFAULT 0,
            company_id TEXT NOT NULL,
            UNIQUE (employee_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_assignment_store_date ON assignment (store_id, date);
        CREATE INDEX IF NOT EXISTS idx_employee_company ON employee (company_id, full_name);
        CREATE INDEX IF NOT EXISTS idx_store_company ON store (company_id, district_id, name);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
