// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use shift_roster::domain::{ColorKey, District, Employee, ShiftType, Store};

/// 测试用公司
pub const COMPANY: &str = "C1";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("测试日期格式错误")
}

pub fn district(id: &str, name: &str) -> District {
    District {
        id: id.to_string(),
        name: name.to_string(),
        company_id: COMPANY.to_string(),
    }
}

pub fn shift_type(id: &str, code: &str, color_key: ColorKey) -> ShiftType {
    ShiftType {
        id: id.to_string(),
        code: code.to_string(),
        color_key,
        company_id: COMPANY.to_string(),
    }
}

// ==========================================
// Employee 构建器
// ==========================================

pub struct EmployeeBuilder {
    id: String,
    full_name: String,
    main_district_id: Option<String>,
    is_active: bool,
}

impl EmployeeBuilder {
    pub fn new(id: &str, full_name: &str) -> Self {
        Self {
            id: id.to_string(),
            full_name: full_name.to_string(),
            main_district_id: None,
            is_active: true,
        }
    }

    pub fn district(mut self, district_id: &str) -> Self {
        self.main_district_id = Some(district_id.to_string());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Employee {
        Employee {
            id: self.id,
            full_name: self.full_name,
            main_district_id: self.main_district_id,
            is_active: self.is_active,
            company_id: COMPANY.to_string(),
        }
    }
}

// ==========================================
// Store 构建器
// ==========================================

pub struct StoreBuilder {
    id: String,
    name: String,
    district_id: String,
    is_active: bool,
    opened_at: Option<NaiveDate>,
    closed_at: Option<NaiveDate>,
}

impl StoreBuilder {
    pub fn new(id: &str, name: &str, district_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            district_id: district_id.to_string(),
            is_active: true,
            opened_at: None,
            closed_at: None,
        }
    }

    pub fn opened(mut self, d: &str) -> Self {
        self.opened_at = Some(date(d));
        self
    }

    pub fn closed(mut self, d: &str) -> Self {
        self.closed_at = Some(date(d));
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Store {
        Store {
            id: self.id,
            name: self.name,
            district_id: self.district_id,
            company_id: COMPANY.to_string(),
            is_active: self.is_active,
            opened_at: self.opened_at,
            closed_at: self.closed_at,
        }
    }
}
