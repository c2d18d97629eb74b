// ==========================================
// 多区域门店排班系统 - 列表筛选参数
// ==========================================
// 员工列表与门店列表共用: 名称搜索 + 区域 + 状态
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::StatusFilter;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    pub search: String,              // 名称子串（不区分大小写，空串不过滤）
    pub district_id: Option<String>, // None = 全部区域
    pub status: StatusFilter,
}

impl ListFilter {
    pub fn matches(&self, name: &str, district_id: Option<&str>, is_active: bool) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !name.to_lowercase().contains(&needle) {
            return false;
        }
        if let Some(wanted) = self.district_id.as_deref() {
            if district_id != Some(wanted) {
                return false;
            }
        }
        self.status.matches(is_active)
    }
}
