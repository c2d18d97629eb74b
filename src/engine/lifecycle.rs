// ==========================================
// 多区域门店排班系统 - 门店生命周期过滤
// ==========================================
// 职责: 判定门店是否属于某月的网格范围、某一天是否可编辑
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::Store;
use crate::engine::calendar::{is_after_upper, is_before_lower, is_outside_bounds, YearMonth};
use chrono::NaiveDate;

// ==========================================
// LifecycleFilter - 纯函数工具类
// ==========================================
pub struct LifecycleFilter;

impl LifecycleFilter {
    /// 月份范围判定
    ///
    /// # 规则
    /// - opened_at 严格晚于当月最后一天 → false
    /// - closed_at 严格早于当月第一天 → false
    /// - 否则 → true（无边界门店恒为 true）
    ///
    /// 不通过的门店不出现在该月网格中（不显示、不可编辑）
    pub fn store_active_during_month(store: &Store, month: YearMonth) -> bool {
        // 月末仍早于开业日 ⇔ 开业日晚于月末
        if is_before_lower(month.last_day(), store.opened_at) {
            return false;
        }
        // 月初已晚于关店日 ⇔ 关店日早于月初
        !is_after_upper(month.first_day(), store.closed_at)
    }

    /// 单日可编辑判定（按日期）
    ///
    /// # 规则
    /// - date < opened_at 或 date > closed_at → false
    pub fn date_editable(store: &Store, date: NaiveDate) -> bool {
        !is_outside_bounds(date, store.opened_at, store.closed_at)
    }

    /// 单日可编辑判定（按年月 + 日序号）
    ///
    /// day 超出当月天数时视为不可编辑
    pub fn day_editable(store: &Store, month: YearMonth, day: u32) -> bool {
        month
            .date_of(day)
            .map(|date| Self::date_editable(store, date))
            .unwrap_or(false)
    }

    /// 从门店列表中挑出属于该月范围的门店（保持原有顺序）
    pub fn stores_in_month<'a, I>(stores: I, month: YearMonth) -> Vec<Store>
    where
        I: IntoIterator<Item = &'a Store>,
    {
        stores
            .into_iter()
            .filter(|store| Self::store_active_during_month(store, month))
            .cloned()
            .collect()
    }
}
