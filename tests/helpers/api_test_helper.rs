// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::Arc;
use tempfile::NamedTempFile;

use shift_roster::api::{
    AssignmentApi, ConfigApi, DistrictApi, RosterApi, StaffApi, StoreApi,
};
use shift_roster::app::AppState;
use shift_roster::domain::{Assignment, ColorKey, Employee, Store};
use shift_roster::repository::{
    AssignmentRepository, DistrictRepository, EmployeeRepository, ShiftTypeRepository,
    StoreRepository,
};

use super::test_data_builder::{district, shift_type};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和用于准备数据的Repository
pub struct ApiTestEnv {
    pub db_path: String,
    pub roster_api: Arc<RosterApi>,
    pub assignment_api: Arc<AssignmentApi>,
    pub staff_api: Arc<StaffApi>,
    pub store_api: Arc<StoreApi>,
    pub district_api: Arc<DistrictApi>,
    pub config_api: Arc<ConfigApi>,

    // Repository层（用于测试数据准备）
    pub district_repo: DistrictRepository,
    pub employee_repo: EmployeeRepository,
    pub store_repo: StoreRepository,
    pub shift_type_repo: ShiftTypeRepository,
    pub assignment_repo: AssignmentRepository,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境（空库）
    pub fn new() -> Result<Self, String> {
        shift_roster::logging::init_test();

        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let state = AppState::new(db_path.clone())?;

        let district_repo = DistrictRepository::new(&db_path).map_err(|e| e.to_string())?;
        let employee_repo = EmployeeRepository::new(&db_path).map_err(|e| e.to_string())?;
        let store_repo = StoreRepository::new(&db_path).map_err(|e| e.to_string())?;
        let shift_type_repo = ShiftTypeRepository::new(&db_path).map_err(|e| e.to_string())?;
        let assignment_repo = AssignmentRepository::new(&db_path).map_err(|e| e.to_string())?;

        Ok(Self {
            db_path,
            roster_api: state.roster_api,
            assignment_api: state.assignment_api,
            staff_api: state.staff_api,
            store_api: state.store_api,
            district_api: state.district_api,
            config_api: state.config_api,
            district_repo,
            employee_repo,
            store_repo,
            shift_type_repo,
            assignment_repo,
            _temp_file: temp_file,
        })
    }

    /// 创建带基础目录数据的测试环境
    ///
    /// - 区域: D1 北区, D2 南区
    /// - 班次: D (green), N (gray), X (未分类)
    pub fn with_catalog() -> Result<Self, String> {
        let env = Self::new()?;
        env.district_repo
            .insert(&district("D1", "北区"))
            .map_err(|e| e.to_string())?;
        env.district_repo
            .insert(&district("D2", "南区"))
            .map_err(|e| e.to_string())?;
        for st in [
            shift_type("ST-D", "D", ColorKey::Green),
            shift_type("ST-N", "N", ColorKey::Gray),
            shift_type("ST-X", "X", ColorKey::Unclassified),
        ] {
            env.shift_type_repo.insert(&st).map_err(|e| e.to_string())?;
        }
        Ok(env)
    }

    pub fn add_employee(&self, employee: Employee) {
        self.employee_repo.insert(&employee).expect("插入员工失败");
    }

    pub fn add_store(&self, store: Store) {
        self.store_repo.insert(&store).expect("插入门店失败");
    }

    /// 直接写入一条排班（绕过写入路径）
    pub fn add_assignment(&self, assignment: Assignment) {
        self.assignment_repo.insert(&assignment).expect("插入排班失败");
    }
}
