// ==========================================
// 多区域门店排班系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 所有仓储共享同一个 SQLite 连接
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{AssignmentApi, ConfigApi, DistrictApi, RosterApi, StaffApi, StoreApi};
use crate::config::ConfigManager;
use crate::repository::{
    AssignmentRepository, DistrictRepository, EmployeeRepository, ShiftTypeRepository,
    StoreRepository,
};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "SHIFT_ROSTER_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 排班视图API
    pub roster_api: Arc<RosterApi>,

    /// 排班写入API
    pub assignment_api: Arc<AssignmentApi>,

    /// 人员管理API
    pub staff_api: Arc<StaffApi>,

    /// 门店管理API
    pub store_api: Arc<StoreApi>,

    /// 区域API
    pub district_api: Arc<DistrictApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,

    /// 班次目录仓储（目录数据没有独立的管理界面）
    pub shift_type_repo: Arc<ShiftTypeRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时自动创建并建表）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::db::init_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let district_repo = Arc::new(DistrictRepository::from_connection(conn.clone()));
        let employee_repo = Arc::new(EmployeeRepository::from_connection(conn.clone()));
        let store_repo = Arc::new(StoreRepository::from_connection(conn.clone()));
        let shift_type_repo = Arc::new(ShiftTypeRepository::from_connection(conn.clone()));
        let assignment_repo = Arc::new(AssignmentRepository::from_connection(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let roster_api = Arc::new(RosterApi::new(
            district_repo.clone(),
            employee_repo.clone(),
            store_repo.clone(),
            shift_type_repo.clone(),
            assignment_repo.clone(),
            config_manager.clone(),
        ));
        let assignment_api = Arc::new(AssignmentApi::new(
            store_repo.clone(),
            employee_repo.clone(),
            shift_type_repo.clone(),
            assignment_repo,
            roster_api.clone(),
        ));
        let staff_api = Arc::new(StaffApi::new(employee_repo, district_repo.clone()));
        let store_api = Arc::new(StoreApi::new(store_repo, district_repo.clone()));
        let district_api = Arc::new(DistrictApi::new(district_repo));
        let config_api = Arc::new(ConfigApi::new(config_manager));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            roster_api,
            assignment_api,
            staff_api,
            store_api,
            district_api,
            config_api,
            shift_type_repo,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 SHIFT_ROSTER_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./shift_roster.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("shift-roster");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("shift_roster.db");
        }
    }

    path.to_string_lossy().to_string()
}
