// ==========================================
// 多区域门店排班系统 - 单元格编辑状态机
// ==========================================
// 状态: Idle → Editing → Saving → Idle（成功）/ Editing + 错误信息（失败）
// 红线: Saving 期间不允许取消或切换单元格，避免同一单元格重叠写入
// ==========================================

use crate::domain::Store;
use crate::engine::calendar::YearMonth;
use crate::engine::grid::StoreCell;
use crate::engine::lifecycle::LifecycleFilter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// CellEdit - 一次单元格编辑意图
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdit {
    pub store_id: String,
    pub date: NaiveDate,
    pub employee_id: Option<String>,
    pub shift_code: Option<String>,
}

impl CellEdit {
    /// 员工与班次均未选择 → 清空单元格
    pub fn is_clear(&self) -> bool {
        is_blank(self.employee_id.as_deref()) && is_blank(self.shift_code.as_deref())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ==========================================
// EditForm - 编辑表单
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditForm {
    pub store_id: String,
    pub day: u32,
    pub date: NaiveDate,
    pub employee_id: String, // 空串表示未选择
    pub shift_code: String,  // 空串表示未选择
    pub error: Option<String>,
}

impl EditForm {
    fn to_edit(&self) -> CellEdit {
        CellEdit {
            store_id: self.store_id.clone(),
            date: self.date,
            employee_id: non_blank(&self.employee_id),
            shift_code: non_blank(&self.shift_code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditState {
    Idle,
    Editing(EditForm),
    Saving(EditForm),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditSessionError {
    #[error("门店 {store_id} 在 {date} 未营业（尚未开业或已关店）")]
    DayNotEditable { store_id: String, date: NaiveDate },

    #[error("日期超出当月范围: day={day}")]
    DayOutOfMonth { day: u32 },

    #[error("正在保存，请稍候")]
    Busy,
}

// ==========================================
// CellEditor - 门店网格的单元格编辑器
// ==========================================
#[derive(Debug, Clone)]
pub struct CellEditor {
    month: YearMonth,
    state: EditState,
}

impl CellEditor {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            state: EditState::Idle,
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, EditState::Saving(_))
    }

    /// 当前表单（Editing 或 Saving 时）
    pub fn form(&self) -> Option<&EditForm> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing(form) | EditState::Saving(form) => Some(form),
        }
    }

    /// 打开单元格
    ///
    /// # 参数
    /// - store: 目标门店
    /// - day: 当月日序号
    /// - current: 当前单元格（存在记录时预填员工与班次）
    ///
    /// # 返回
    /// - Err(DayNotEditable): 生命周期之外，保持原状态
    /// - Err(Busy): 正在保存
    pub fn open(
        &mut self,
        store: &Store,
        day: u32,
        current: Option<&StoreCell>,
    ) -> Result<(), EditSessionError> {
        if self.is_saving() {
            return Err(EditSessionError::Busy);
        }
        let date = self
            .month
            .date_of(day)
            .ok_or(EditSessionError::DayOutOfMonth { day })?;
        if !LifecycleFilter::date_editable(store, date) {
            return Err(EditSessionError::DayNotEditable {
                store_id: store.id.clone(),
                date,
            });
        }

        self.state = EditState::Editing(EditForm {
            store_id: store.id.clone(),
            day,
            date,
            employee_id: current
                .and_then(|c| c.employee_id.clone())
                .unwrap_or_default(),
            shift_code: current
                .and_then(|c| c.shift_code.clone())
                .unwrap_or_default(),
            error: None,
        });
        Ok(())
    }

    /// 选择员工（空串表示清空选择）
    pub fn select_employee(&mut self, employee_id: &str) {
        if let EditState::Editing(form) = &mut self.state {
            form.employee_id = employee_id.to_string();
        }
    }

    /// 选择班次短代码（空串表示清空选择）
    pub fn select_shift_code(&mut self, shift_code: &str) {
        if let EditState::Editing(form) = &mut self.state {
            form.shift_code = shift_code.to_string();
        }
    }

    /// 取消编辑；保存中返回 false 且不改变状态
    pub fn cancel(&mut self) -> bool {
        if self.is_saving() {
            return false;
        }
        self.state = EditState::Idle;
        true
    }

    /// 开始保存: Editing → Saving，返回编辑意图
    pub fn begin_save(&mut self) -> Option<CellEdit> {
        let EditState::Editing(form) = &self.state else {
            return None;
        };
        let mut form = form.clone();
        form.error = None;
        let edit = form.to_edit();
        self.state = EditState::Saving(form);
        Some(edit)
    }

    /// 结束保存
    ///
    /// - Ok: Saving → Idle
    /// - Err(message): Saving → Editing（保留选择并附带错误信息）
    pub fn finish_save(&mut self, result: Result<(), String>) {
        let EditState::Saving(form) = &self.state else {
            return;
        };
        match result {
            Ok(()) => self.state = EditState::Idle,
            Err(message) => {
                let mut form = form.clone();
                form.error = Some(message);
                self.state = EditState::Editing(form);
            }
        }
    }
}
