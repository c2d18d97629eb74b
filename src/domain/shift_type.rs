// ==========================================
// 多区域门店排班系统 - 班次类型领域模型
// ==========================================
// 对齐: shift_type 表 (id, code, color_key, company_id)
// ==========================================

use crate::domain::types::ColorKey;
use serde::{Deserialize, Serialize};

// ==========================================
// ShiftType - 班次类型（目录数据）
// ==========================================
// 仅用于展示，不携带排班语义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftType {
    pub id: String,           // 班次类型ID
    pub code: String,         // 短代码（显示标签）
    pub color_key: ColorKey,  // 颜色分类
    pub company_id: String,   // 所属公司
}
