// ==========================================
// 多区域门店排班系统 - 门店领域模型
// ==========================================
// 对齐: store 表 (id, name, district_id, company_id, is_active, opened_at, closed_at)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Store - 门店
// ==========================================
// 生命周期: [opened_at, closed_at] 闭区间，缺失一侧视为无界
// 说明: opened_at <= closed_at 由门店管理写入时校验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,                     // 门店ID
    pub name: String,                   // 门店名称
    pub district_id: String,            // 所属区域
    pub company_id: String,             // 所属公司
    pub is_active: bool,                // 是否启用
    pub opened_at: Option<NaiveDate>,   // 开业日期
    pub closed_at: Option<NaiveDate>,   // 关店日期
}

impl Store {
    /// 是否没有任何生命周期边界
    pub fn is_unbounded(&self) -> bool {
        self.opened_at.is_none() && self.closed_at.is_none()
    }
}
