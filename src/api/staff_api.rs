// ==========================================
// 多区域门店排班系统 - 人员管理 API
// ==========================================
// 职责: 员工列表筛选、新增、编辑（不做物理删除）
// ==========================================

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::filter::ListFilter;
use crate::domain::{District, Employee};
use crate::repository::{DistrictRepository, EmployeeRepository};

// ==========================================
// StaffApi - 人员管理 API
// ==========================================
pub struct StaffApi {
    employee_repo: Arc<EmployeeRepository>,
    district_repo: Arc<DistrictRepository>,
}

impl StaffApi {
    /// 创建新的StaffApi实例
    pub fn new(employee_repo: Arc<EmployeeRepository>, district_repo: Arc<DistrictRepository>) -> Self {
        Self {
            employee_repo,
            district_repo,
        }
    }

    /// 员工列表（按姓名排序）
    pub fn list_employees(&self, filter: &ListFilter) -> ApiResult<Vec<Employee>> {
        let employees = self.employee_repo.list_all()?;
        Ok(employees
            .into_iter()
            .filter(|e| filter.matches(&e.full_name, e.main_district_id.as_deref(), e.is_active))
            .collect())
    }

    /// 新增员工
    ///
    /// # 参数
    /// - full_name: 姓名（去除首尾空白后不能为空）
    /// - district_id: 主区域（必填且必须存在）
    /// - is_active: 是否在职
    ///
    /// # 返回
    /// - Ok(Employee): 新员工（公司取自区域）
    pub fn create_employee(
        &self,
        full_name: &str,
        district_id: &str,
        is_active: bool,
    ) -> ApiResult<Employee> {
        let full_name = validate_name(full_name)?;
        let district = self.require_district(district_id)?;

        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            full_name,
            main_district_id: Some(district.id.clone()),
            is_active,
            company_id: district.company_id,
        };
        self.employee_repo.insert(&employee)?;

        info!(employee_id = %employee.id, district_id = %district.id, "员工已创建");
        Ok(employee)
    }

    /// 编辑员工
    ///
    /// # 返回
    /// - Err(NotFound): 员工不存在
    pub fn update_employee(
        &self,
        id: &str,
        full_name: &str,
        district_id: &str,
        is_active: bool,
    ) -> ApiResult<Employee> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("员工ID不能为空".to_string()));
        }
        let full_name = validate_name(full_name)?;
        let district = self.require_district(district_id)?;

        let mut employee = self
            .employee_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("员工(id={})不存在", id)))?;

        employee.full_name = full_name;
        employee.main_district_id = Some(district.id.clone());
        employee.is_active = is_active;
        self.employee_repo.update(&employee)?;

        info!(employee_id = %employee.id, is_active, "员工已更新");
        Ok(employee)
    }

    fn require_district(&self, district_id: &str) -> ApiResult<District> {
        if district_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("请选择区域".to_string()));
        }
        self.district_repo
            .find_by_id(district_id)?
            .ok_or_else(|| ApiError::InvalidInput(format!("区域不存在: {}", district_id)))
    }
}

fn validate_name(full_name: &str) -> ApiResult<String> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput("姓名不能为空".to_string()));
    }
    Ok(trimmed.to_string())
}
