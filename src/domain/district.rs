// ==========================================
// 多区域门店排班系统 - 区域领域模型
// ==========================================
// 对齐: district 表 (id, name, company_id)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// District - 区域
// ==========================================
// 仅作为门店/员工的分组与范围键，无独立生命周期
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: String,         // 区域ID
    pub name: String,       // 区域名称
    pub company_id: String, // 所属公司
}
