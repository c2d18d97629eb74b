// ==========================================
// 多区域门店排班系统 - 员工领域模型
// ==========================================
// 对齐: employee 表 (id, full_name, main_district_id, is_active, company_id)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Employee - 员工
// ==========================================
// 生命周期: 人员管理中创建/编辑，不做物理删除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,                       // 员工ID
    pub full_name: String,                // 姓名
    pub main_district_id: Option<String>, // 归属区域（可为空）
    pub is_active: bool,                  // 是否在职
    pub company_id: String,               // 所属公司
}

impl Employee {
    /// 是否归属于指定区域
    pub fn belongs_to(&self, district_id: &str) -> bool {
        self.main_district_id.as_deref() == Some(district_id)
    }
}
