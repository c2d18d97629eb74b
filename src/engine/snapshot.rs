// ==========================================
// 多区域门店排班系统 - 范围数据快照
// ==========================================
// 职责: 承载一次范围加载（区域 + 年月）取回的原始行，并提供按 ID 查找
// 说明: 网格投影与冲突检测都只读取快照，便于用字面量数据单测
// ==========================================

use crate::domain::{Assignment, Employee, ShiftType, Store};
use crate::engine::calendar::YearMonth;
use std::collections::HashMap;

// ==========================================
// ScopeSnapshot - 范围快照（不可变）
// ==========================================
#[derive(Debug, Clone)]
pub struct ScopeSnapshot {
    pub month: YearMonth,
    employees: Vec<Employee>,
    stores: Vec<Store>,
    shift_types: Vec<ShiftType>,
    assignments: Vec<Assignment>,

    employee_index: HashMap<String, usize>,
    store_index: HashMap<String, usize>,
    shift_type_index: HashMap<String, usize>,
}

/// 快照拆出的原始行
#[derive(Debug, Clone, Default)]
pub struct ScopeParts {
    pub employees: Vec<Employee>,
    pub stores: Vec<Store>,
    pub shift_types: Vec<ShiftType>,
    pub assignments: Vec<Assignment>,
}

impl ScopeSnapshot {
    /// 由原始行构建快照（ID 重复时以后出现者为准）
    pub fn new(
        month: YearMonth,
        employees: Vec<Employee>,
        stores: Vec<Store>,
        shift_types: Vec<ShiftType>,
        assignments: Vec<Assignment>,
    ) -> Self {
        let employee_index = index_by(&employees, |e| e.id.as_str());
        let store_index = index_by(&stores, |s| s.id.as_str());
        let shift_type_index = index_by(&shift_types, |st| st.id.as_str());

        Self {
            month,
            employees,
            stores,
            shift_types,
            assignments,
            employee_index,
            store_index,
            shift_type_index,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn shift_types(&self) -> &[ShiftType] {
        &self.shift_types
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// 拆出原始行（快照被消费，索引随之失效）
    pub fn into_parts(self) -> ScopeParts {
        ScopeParts {
            employees: self.employees,
            stores: self.stores,
            shift_types: self.shift_types,
            assignments: self.assignments,
        }
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employee_index
            .get(id)
            .and_then(|&i| self.employees.get(i))
    }

    pub fn store(&self, id: &str) -> Option<&Store> {
        self.store_index.get(id).and_then(|&i| self.stores.get(i))
    }

    pub fn shift_type(&self, id: &str) -> Option<&ShiftType> {
        self.shift_type_index
            .get(id)
            .and_then(|&i| self.shift_types.get(i))
    }

    /// 解析排班记录上的班次类型（空引用或悬空引用返回 None）
    pub fn shift_type_of(&self, assignment: &Assignment) -> Option<&ShiftType> {
        assignment
            .shift_type_id
            .as_deref()
            .and_then(|id| self.shift_type(id))
    }

    /// 按短代码查找班次类型
    pub fn shift_type_by_code(&self, code: &str) -> Option<&ShiftType> {
        self.shift_types.iter().find(|st| st.code == code)
    }

    /// 员工姓名（未知员工返回 None）
    pub fn employee_name(&self, id: &str) -> Option<&str> {
        self.employee(id).map(|e| e.full_name.as_str())
    }
}

fn index_by<T>(rows: &[T], key: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| (key(row).to_string(), i))
        .collect()
}
