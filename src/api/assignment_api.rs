// ==========================================
// 多区域门店排班系统 - 排班写入 API
// ==========================================
// 职责: 单个 (门店, 日期) 单元格的清空 / 设置
// 红线:
// 1. 生命周期之外的日期在任何写入前拒绝（DayNotEditable）
// 2. 设置 = 同一事务内 删除 (门店, 日期) + 按 (员工, 日期) upsert
//    员工当天在其他门店的排班被移到目标门店（后写者胜）
// 3. 写入成功后整体重新加载范围数据，不做增量修补
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::roster_api::{MonthScope, RosterApi, StoreMonthView};
use crate::domain::{Assignment, Store};
use crate::engine::{CellEdit, CellEditor, LifecycleFilter, SubstitutionClassifier};
use crate::repository::{
    AssignmentRepository, EmployeeRepository, ShiftTypeRepository, StoreRepository,
};

// ==========================================
// AssignmentApi - 排班写入 API
// ==========================================
pub struct AssignmentApi {
    store_repo: Arc<StoreRepository>,
    employee_repo: Arc<EmployeeRepository>,
    shift_type_repo: Arc<ShiftTypeRepository>,
    assignment_repo: Arc<AssignmentRepository>,
    roster_api: Arc<RosterApi>,
}

impl AssignmentApi {
    /// 创建新的AssignmentApi实例
    pub fn new(
        store_repo: Arc<StoreRepository>,
        employee_repo: Arc<EmployeeRepository>,
        shift_type_repo: Arc<ShiftTypeRepository>,
        assignment_repo: Arc<AssignmentRepository>,
        roster_api: Arc<RosterApi>,
    ) -> Self {
        Self {
            store_repo,
            employee_repo,
            shift_type_repo,
            assignment_repo,
            roster_api,
        }
    }

    /// 清空单元格：删除 (门店, 日期) 上的全部排班
    ///
    /// 单元格本来为空时同样成功（幂等）
    pub fn clear_cell(&self, store_id: &str, date: NaiveDate) -> ApiResult<()> {
        let store = self.load_editable_store(store_id, date)?;

        let removed = self
            .assignment_repo
            .delete_by_store_and_date(&store.id, date)
            .map_err(|e| ApiError::WriteFailed(e.to_string()))?;

        info!(store_id = %store.id, %date, removed, "单元格已清空");
        Ok(())
    }

    /// 设置单元格
    ///
    /// # 参数
    /// - store_id / date: 目标单元格
    /// - employee_id: 员工ID（必填）
    /// - shift_code: 班次短代码（必须在公司班次目录中存在）
    ///
    /// # 返回
    /// - Err(DayNotEditable): 日期在门店生命周期之外
    /// - Err(UnknownShiftType): 班次代码无匹配
    /// - Err(WriteFailed): 数据库拒绝写入
    pub fn set_cell(
        &self,
        store_id: &str,
        date: NaiveDate,
        employee_id: &str,
        shift_code: &str,
    ) -> ApiResult<()> {
        let store = self.load_editable_store(store_id, date)?;

        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            return Err(ApiError::InvalidInput("请选择员工".to_string()));
        }
        let shift_code = shift_code.trim();

        let shift_type = self
            .shift_type_repo
            .find_by_code(&store.company_id, shift_code)
            .map_err(|e| ApiError::WriteFailed(e.to_string()))?
            .ok_or_else(|| ApiError::UnknownShiftType(shift_code.to_string()))?;

        let employee = self
            .employee_repo
            .find_by_id(employee_id)
            .map_err(|e| ApiError::WriteFailed(e.to_string()))?
            .ok_or_else(|| ApiError::InvalidInput(format!("员工不存在: {}", employee_id)))?;
        if employee.company_id != store.company_id {
            return Err(ApiError::InvalidInput(format!(
                "员工不属于门店所在公司: employee={}, store={}",
                employee.id, store.id
            )));
        }

        let is_substitution = SubstitutionClassifier::for_new_assignment(Some(&employee), &store);
        let assignment = Assignment {
            id: Uuid::new_v4().to_string(),
            employee_id: employee.id.clone(),
            date,
            store_id: store.id.clone(),
            shift_type_id: Some(shift_type.id.clone()),
            is_substitution,
            company_id: store.company_id.clone(),
        };

        self.assignment_repo
            .replace_cell(&store.id, date, Some(&assignment))
            .map_err(|e| ApiError::WriteFailed(e.to_string()))?;

        info!(
            store_id = %store.id,
            %date,
            employee_id = %employee.id,
            shift_code = %shift_type.code,
            is_substitution,
            "单元格已设置"
        );
        Ok(())
    }

    /// 执行一次编辑意图（不重新加载）
    ///
    /// - 员工与班次都为空 → 清空
    /// - 只有班次没有员工 → InvalidInput
    /// - 只有员工没有班次 → UnknownShiftType
    pub fn write(&self, edit: &CellEdit) -> ApiResult<()> {
        if edit.is_clear() {
            return self.clear_cell(&edit.store_id, edit.date);
        }
        self.set_cell(
            &edit.store_id,
            edit.date,
            edit.employee_id.as_deref().unwrap_or(""),
            edit.shift_code.as_deref().unwrap_or(""),
        )
    }

    /// 执行编辑意图并重新加载门店网格
    pub fn apply(&self, scope: &MonthScope, edit: &CellEdit) -> ApiResult<StoreMonthView> {
        let month = scope.year_month()?;
        if !month.contains(edit.date) {
            return Err(ApiError::InvalidInput(format!(
                "日期{}不在 {}-{:02} 范围内",
                edit.date,
                month.year(),
                month.month()
            )));
        }

        self.write(edit)?;
        self.roster_api.load_store_month(scope)
    }

    /// 驱动编辑器完成一次保存
    ///
    /// Editing → Saving → Idle（成功，返回重新加载的网格）
    ///                  → Editing + 错误信息（失败，返回错误）
    pub fn save(&self, editor: &mut CellEditor, scope: &MonthScope) -> ApiResult<StoreMonthView> {
        let month = scope.year_month()?;
        if editor.month() != month {
            return Err(ApiError::InvalidInput("编辑器月份与查询范围不一致".to_string()));
        }

        let edit = editor
            .begin_save()
            .ok_or_else(|| ApiError::InvalidInput("没有正在编辑的单元格".to_string()))?;

        match self.write(&edit) {
            Ok(()) => {
                editor.finish_save(Ok(()));
                self.roster_api.load_store_month(scope)
            }
            Err(err) => {
                warn!(store_id = %edit.store_id, date = %edit.date, error = %err, "单元格保存失败");
                editor.finish_save(Err(err.to_string()));
                Err(err)
            }
        }
    }

    /// 读取门店并做生命周期守卫
    fn load_editable_store(&self, store_id: &str, date: NaiveDate) -> ApiResult<Store> {
        if store_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("门店ID不能为空".to_string()));
        }

        let store = self
            .store_repo
            .find_by_id(store_id)
            .map_err(|e| ApiError::WriteFailed(e.to_string()))?
            .ok_or_else(|| ApiError::NotFound(format!("门店(id={})不存在", store_id)))?;

        if !LifecycleFilter::date_editable(&store, date) {
            return Err(ApiError::DayNotEditable {
                store_id: store.id,
                date,
            });
        }
        Ok(store)
    }
}
