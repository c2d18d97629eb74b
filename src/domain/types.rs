// ==========================================
// 多区域门店排班系统 - 领域类型定义
// ==========================================
// 职责: 颜色分类、状态筛选、单元格色调等值类型
// 红线: 纯值类型，不含 I/O
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班次颜色分类 (Color Key)
// ==========================================
// 存储格式: shift_type.color_key 文本 ('green' / 'gray' / NULL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorKey {
    Green,        // 绿色
    Gray,         // 灰色
    Unclassified, // 未分类 → 默认色
}

impl ColorKey {
    /// 从数据库字段解析（未知值一律视为未分类）
    pub fn from_db(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "green" => ColorKey::Green,
            Some(v) if v == "gray" => ColorKey::Gray,
            _ => ColorKey::Unclassified,
        }
    }

    /// 转换为数据库字段
    pub fn to_db(&self) -> Option<&'static str> {
        match self {
            ColorKey::Green => Some("green"),
            ColorKey::Gray => Some("gray"),
            ColorKey::Unclassified => None,
        }
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorKey::Green => write!(f, "green"),
            ColorKey::Gray => write!(f, "gray"),
            ColorKey::Unclassified => write!(f, "unclassified"),
        }
    }
}

// ==========================================
// 启用状态筛选 (Status Filter)
// ==========================================
// 用途: 员工/门店列表筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,      // 全部
    Active,   // 仅启用
    Inactive, // 仅停用
}

impl StatusFilter {
    /// 判断记录是否通过筛选
    pub fn matches(&self, is_active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => is_active,
            StatusFilter::Inactive => !is_active,
        }
    }
}

// ==========================================
// 单元格色调 (Cell Tone)
// ==========================================
// 展示层颜色由色调 + 调色板配置决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellTone {
    Disabled,     // 门店生命周期之外（不可编辑）
    Empty,        // 空单元格
    Substitution, // 跨区顶班
    Green,        // 班次类型: 绿色
    Gray,         // 班次类型: 灰色
    Default,      // 班次类型: 未分类
    Conflict,     // 同一员工同日多店（仅员工汇总视图）
}

impl CellTone {
    /// 全部色调（用于调色板遍历）
    pub const ALL: [CellTone; 7] = [
        CellTone::Disabled,
        CellTone::Empty,
        CellTone::Substitution,
        CellTone::Green,
        CellTone::Gray,
        CellTone::Default,
        CellTone::Conflict,
    ];

    /// 配置键后缀
    pub fn as_str(&self) -> &'static str {
        match self {
            CellTone::Disabled => "disabled",
            CellTone::Empty => "empty",
            CellTone::Substitution => "substitution",
            CellTone::Green => "green",
            CellTone::Gray => "gray",
            CellTone::Default => "default",
            CellTone::Conflict => "conflict",
        }
    }

    /// 默认颜色（十六进制）
    pub fn default_hex(&self) -> &'static str {
        match self {
            CellTone::Disabled => "#f5f5f5",
            CellTone::Empty => "#fff",
            CellTone::Substitution => "#ffe7ba",
            CellTone::Green => "#d9f7be",
            CellTone::Gray => "#f5f5f5",
            CellTone::Default => "#fff",
            CellTone::Conflict => "#fecaca",
        }
    }

    /// 由班次颜色分类得到色调
    pub fn from_color_key(key: ColorKey) -> Self {
        match key {
            ColorKey::Green => CellTone::Green,
            ColorKey::Gray => CellTone::Gray,
            ColorKey::Unclassified => CellTone::Default,
        }
    }
}

impl fmt::Display for CellTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
