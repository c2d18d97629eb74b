// ==========================================
// 多区域门店排班系统 - 日历/区间工具
// ==========================================
// 职责: 月份天数、日期边界比较（日粒度，无时区）
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// 日期交换格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// YearMonth - 年月（已校验）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

/// 反序列化中间形态（未校验）
#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = String;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
            .ok_or_else(|| format!("无效年月: {}-{}", raw.year, raw.month))
    }
}

impl YearMonth {
    /// 创建年月；month 不在 1..=12 时返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        // 借助 chrono 同时校验年份范围
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self { year, month })
    }

    /// 日期所在的年月
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 当月天数
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// 当月日序列 1..=N
    pub fn days(&self) -> RangeInclusive<u32> {
        1..=self.days_in_month()
    }

    /// 当月第一天
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// 当月最后一天
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// 当月第 day 天；越界返回 None
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// 日期是否落在当月
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

// ==========================================
// 日期边界比较
// ==========================================

/// 日期是否严格早于下界（下界缺失视为无界）
pub fn is_before_lower(date: NaiveDate, lower: Option<NaiveDate>) -> bool {
    matches!(lower, Some(bound) if date < bound)
}

/// 日期是否严格晚于上界（上界缺失视为无界）
pub fn is_after_upper(date: NaiveDate, upper: Option<NaiveDate>) -> bool {
    matches!(upper, Some(bound) if date > bound)
}

/// 日期是否落在 [lower, upper] 之外
pub fn is_outside_bounds(
    date: NaiveDate,
    lower: Option<NaiveDate>,
    upper: Option<NaiveDate>,
) -> bool {
    is_before_lower(date, lower) || is_after_upper(date, upper)
}

/// 解析仅日期字符串 (YYYY-MM-DD)
pub fn parse_date_str(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// 格式化为 YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 格式化为 DD.MM.YYYY（冲突摘要展示）
pub fn format_date_dotted(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
