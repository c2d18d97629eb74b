// ==========================================
// 多区域门店排班系统 - 排班视图 API
// ==========================================
// 职责: 按范围（区域 + 年月）加载数据并生成门店网格 / 员工汇总视图
// 流程: 取数 → 快照 → 网格投影 + 冲突检测（两者独立运行于同一快照）
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{CellPalette, ConfigManager};
use crate::domain::{District, Employee, ShiftType, Store};
use crate::engine::{
    Conflict, ConflictDetector, ConflictDigest, GridProjector, LifecycleFilter, ScopeSnapshot,
    StoreCell, StoreRow, SummaryRow, YearMonth,
};
use crate::repository::{
    AssignmentRepository, DistrictRepository, EmployeeRepository, ShiftTypeRepository,
    StoreRepository,
};

// ==========================================
// MonthScope - 查询范围（显式、不可变）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthScope {
    pub district_id: String,
    pub year: i32,
    pub month: u32,
}

impl MonthScope {
    pub fn new(district_id: impl Into<String>, year: i32, month: u32) -> Self {
        Self {
            district_id: district_id.into(),
            year,
            month,
        }
    }

    /// 校验参数并得到年月
    pub fn year_month(&self) -> ApiResult<YearMonth> {
        if self.district_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("区域ID不能为空".to_string()));
        }
        YearMonth::new(self.year, self.month).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "无效的年月: year={}, month={}（月份应为1-12）",
                self.year, self.month
            ))
        })
    }
}

// ==========================================
// StoreMonthView - 门店月度网格
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMonthView {
    pub scope: MonthScope,
    pub district: District,
    pub days: Vec<u32>,
    pub stores: Vec<Store>,           // 月份范围内的门店（按名称）
    pub rows: Vec<StoreRow>,          // 与 stores 一一对应
    pub employees: Vec<Employee>,     // 编辑候选（公司内全部员工，按姓名）
    pub shift_types: Vec<ShiftType>,  // 班次目录（按代码）
    pub conflicts: Vec<Conflict>,     // 已按 日期 → 姓名 排序
    pub digest: ConflictDigest,
    pub palette: CellPalette,
}

impl StoreMonthView {
    pub fn store(&self, store_id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == store_id)
    }

    pub fn row(&self, store_id: &str) -> Option<&StoreRow> {
        self.rows.iter().find(|r| r.store_id == store_id)
    }

    pub fn cell(&self, store_id: &str, day: u32) -> Option<&StoreCell> {
        self.row(store_id).and_then(|r| r.cell(day))
    }
}

// ==========================================
// EmployeeSummaryView - 区域员工月度汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummaryView {
    pub scope: MonthScope,
    pub district: District,
    pub days: Vec<u32>,
    pub rows: Vec<SummaryRow>, // 主区域为本区域的员工（按姓名）
    pub conflicts: Vec<Conflict>,
    pub digest: ConflictDigest,
    pub palette: CellPalette,
}

impl EmployeeSummaryView {
    pub fn row(&self, employee_id: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.employee_id == employee_id)
    }
}

// ==========================================
// RosterApi - 排班视图 API
// ==========================================

/// 排班视图API
///
/// 职责：
/// 1. 门店月度网格（含冲突列表）
/// 2. 区域员工月度汇总（含冲突列表）
///
/// 每次调用都完整取数，不做增量修补
pub struct RosterApi {
    district_repo: Arc<DistrictRepository>,
    employee_repo: Arc<EmployeeRepository>,
    store_repo: Arc<StoreRepository>,
    shift_type_repo: Arc<ShiftTypeRepository>,
    assignment_repo: Arc<AssignmentRepository>,
    config_manager: Arc<ConfigManager>,
}

impl RosterApi {
    /// 创建新的RosterApi实例
    pub fn new(
        district_repo: Arc<DistrictRepository>,
        employee_repo: Arc<EmployeeRepository>,
        store_repo: Arc<StoreRepository>,
        shift_type_repo: Arc<ShiftTypeRepository>,
        assignment_repo: Arc<AssignmentRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            district_repo,
            employee_repo,
            store_repo,
            shift_type_repo,
            assignment_repo,
            config_manager,
        }
    }

    /// 加载门店月度网格
    ///
    /// # 返回
    /// - Err(InvalidInput): 年月参数无效
    /// - Err(ScopeLoadFailed): 区域不存在或任一查询失败
    pub fn load_store_month(&self, scope: &MonthScope) -> ApiResult<StoreMonthView> {
        let month = scope.year_month()?;
        let district = self.load_district(&scope.district_id)?;

        let employees = self
            .employee_repo
            .list_by_company(&district.company_id)
            .map_err(scope_load_failed)?;
        let district_stores = self
            .store_repo
            .list_by_district(&district.id)
            .map_err(scope_load_failed)?;
        let stores = LifecycleFilter::stores_in_month(&district_stores, month);
        let shift_types = self
            .shift_type_repo
            .list_by_company(&district.company_id)
            .map_err(scope_load_failed)?;

        let store_ids: Vec<String> = stores.iter().map(|s| s.id.clone()).collect();
        let assignments = self
            .assignment_repo
            .list_by_stores_in_range(&store_ids, month.first_day(), month.last_day())
            .map_err(scope_load_failed)?;

        let respect_bounds = self
            .config_manager
            .get_store_view_respects_lifecycle()
            .map_err(config_error)?;
        let (limit, palette) = self.display_settings()?;

        let snapshot = ScopeSnapshot::new(month, employees, stores, shift_types, assignments);
        let rows = GridProjector::project_store_rows(&snapshot);
        let mut conflicts = ConflictDetector::detect_in_scope(&snapshot, respect_bounds);
        ConflictDetector::sort_for_display(&mut conflicts, &snapshot);
        let digest = ConflictDigest::build(&conflicts, &snapshot, limit);

        info!(
            district_id = %district.id,
            year = month.year(),
            month = month.month(),
            stores = snapshot.stores().len(),
            assignments = snapshot.assignments().len(),
            conflicts = conflicts.len(),
            "门店月度网格加载完成"
        );

        let parts = snapshot.into_parts();
        Ok(StoreMonthView {
            scope: scope.clone(),
            district,
            days: month.days().collect(),
            stores: parts.stores,
            rows,
            employees: parts.employees,
            shift_types: parts.shift_types,
            conflicts,
            digest,
            palette,
        })
    }

    /// 加载区域员工月度汇总
    ///
    /// 行 = 主区域为本区域的员工；列 = 当月每天；
    /// 单元格保留该员工当天在公司任意门店的全部记录
    pub fn load_employee_summary(&self, scope: &MonthScope) -> ApiResult<EmployeeSummaryView> {
        let month = scope.year_month()?;
        let district = self.load_district(&scope.district_id)?;

        let employees = self
            .employee_repo
            .list_by_home_district(&district.id)
            .map_err(scope_load_failed)?;
        let stores = self
            .store_repo
            .list_by_company(&district.company_id)
            .map_err(scope_load_failed)?;
        let shift_types = self
            .shift_type_repo
            .list_by_company(&district.company_id)
            .map_err(scope_load_failed)?;

        let employee_ids: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();
        let assignments = self
            .assignment_repo
            .list_by_employees_in_range(&employee_ids, month.first_day(), month.last_day())
            .map_err(scope_load_failed)?;

        let respect_bounds = self
            .config_manager
            .get_summary_view_respects_lifecycle()
            .map_err(config_error)?;
        let (limit, palette) = self.display_settings()?;

        let snapshot = ScopeSnapshot::new(month, employees, stores, shift_types, assignments);
        let rows = GridProjector::project_summary_rows(&snapshot);
        let mut conflicts = ConflictDetector::detect_in_scope(&snapshot, respect_bounds);
        ConflictDetector::sort_for_display(&mut conflicts, &snapshot);
        let digest = ConflictDigest::build(&conflicts, &snapshot, limit);

        info!(
            district_id = %district.id,
            year = month.year(),
            month = month.month(),
            employees = rows.len(),
            assignments = snapshot.assignments().len(),
            conflicts = conflicts.len(),
            "员工月度汇总加载完成"
        );

        Ok(EmployeeSummaryView {
            scope: scope.clone(),
            district,
            days: month.days().collect(),
            rows,
            conflicts,
            digest,
            palette,
        })
    }

    fn load_district(&self, district_id: &str) -> ApiResult<District> {
        self.district_repo
            .find_by_id(district_id)
            .map_err(scope_load_failed)?
            .ok_or_else(|| ApiError::ScopeLoadFailed(format!("区域不存在: {}", district_id)))
    }

    fn display_settings(&self) -> ApiResult<(usize, CellPalette)> {
        let limit = self
            .config_manager
            .get_conflict_display_limit()
            .map_err(config_error)?;
        let palette = self.config_manager.get_palette().map_err(config_error)?;
        Ok((limit, palette))
    }
}

fn scope_load_failed(err: impl std::fmt::Display) -> ApiError {
    ApiError::ScopeLoadFailed(err.to_string())
}

fn config_error(err: Box<dyn std::error::Error>) -> ApiError {
    ApiError::ConfigError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_scope_validation() {
        assert!(MonthScope::new("D1", 2025, 2).year_month().is_ok());
        assert!(matches!(
            MonthScope::new("D1", 2025, 13).year_month(),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            MonthScope::new("D1", 2025, 0).year_month(),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            MonthScope::new("  ", 2025, 1).year_month(),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
