// ==========================================
// 多区域门店排班系统 - 排班记录领域模型
// ==========================================
// 对齐: assignment 表
//   (id, employee_id, date, store_id, shift_type_id, is_substitution, company_id)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Assignment - 排班记录（一名员工 / 一家门店 / 一天）
// ==========================================
// 不变量:
// 1. 每个 (store_id, date) 至多一条 —— 由写入路径保证
// 2. 每个 (employee_id, date) 至多一条 —— 由后端唯一键保证，
//    其他途径写入时可能被破坏，由冲突检测负责发现
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,                    // 记录ID
    pub employee_id: String,           // 员工
    pub date: NaiveDate,               // 日期
    pub store_id: String,              // 门店
    pub shift_type_id: Option<String>, // 班次类型（可为空/悬空）
    pub is_substitution: bool,         // 写入时标记的顶班标志（提示值）
    pub company_id: String,            // 所属公司
}
