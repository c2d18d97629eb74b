// ==========================================
// 多区域门店排班系统 - 冲突检测
// ==========================================
// 职责: 找出同一员工同一天被排到多家门店的情况
// 算法: 按 (employee_id, date) 分组，成员数 > 1 即为冲突
// 红线: 仅提示，不自动消解
// ==========================================

use crate::domain::Assignment;
use crate::engine::calendar::format_date_dotted;
use crate::engine::lifecycle::LifecycleFilter;
use crate::engine::snapshot::ScopeSnapshot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Conflict - 冲突记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub employee_id: String,    // 员工
    pub date: NaiveDate,        // 日期
    pub store_ids: Vec<String>, // 涉及门店（按记录出现顺序）
}

// ==========================================
// ConflictDetector - 纯函数工具类
// ==========================================
pub struct ConflictDetector;

impl ConflictDetector {
    /// 对排班记录分组检测冲突
    ///
    /// # 说明
    /// - 不做分组键以外的去重
    /// - 输出顺序为分组首次出现的顺序，不是定义好的排序；
    ///   需要稳定顺序的调用方请使用 `sort_for_display`
    pub fn detect<'a, I>(assignments: I) -> Vec<Conflict>
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        let mut groups: Vec<Conflict> = Vec::new();
        let mut index: HashMap<(&'a str, NaiveDate), usize> = HashMap::new();

        for assignment in assignments {
            let key = (assignment.employee_id.as_str(), assignment.date);
            match index.get(&key) {
                Some(&i) => groups[i].store_ids.push(assignment.store_id.clone()),
                None => {
                    index.insert(key, groups.len());
                    groups.push(Conflict {
                        employee_id: assignment.employee_id.clone(),
                        date: assignment.date,
                        store_ids: vec![assignment.store_id.clone()],
                    });
                }
            }
        }

        groups.retain(|g| g.store_ids.len() > 1);
        groups
    }

    /// 在范围快照上检测冲突
    ///
    /// # 参数
    /// - respect_lifecycle_bounds:
    ///   - false: 全量记录参与（门店网格视图的行为）
    ///   - true: 丢弃门店未知或日期落在门店生命周期之外的记录（员工汇总视图的行为）
    pub fn detect_in_scope(snapshot: &ScopeSnapshot, respect_lifecycle_bounds: bool) -> Vec<Conflict> {
        if !respect_lifecycle_bounds {
            return Self::detect(snapshot.assignments());
        }

        Self::detect(snapshot.assignments().iter().filter(|a| {
            snapshot
                .store(&a.store_id)
                .map(|store| LifecycleFilter::date_editable(store, a.date))
                .unwrap_or(false)
        }))
    }

    /// 展示排序: 日期优先，其次员工姓名（未知员工排在最后）
    pub fn sort_for_display(conflicts: &mut [Conflict], snapshot: &ScopeSnapshot) {
        conflicts.sort_by(|a, b| {
            let name_a = snapshot.employee_name(&a.employee_id);
            let name_b = snapshot.employee_name(&b.employee_id);
            a.date
                .cmp(&b.date)
                .then_with(|| match (name_a, name_b) {
                    (Some(x), Some(y)) => x.cmp(y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => a.employee_id.cmp(&b.employee_id),
                })
        });
    }
}

// ==========================================
// ConflictDigest - 冲突摘要（展示用）
// ==========================================
/// 未知员工的占位名
pub const UNKNOWN_EMPLOYEE_LABEL: &str = "(未知员工)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDigest {
    pub lines: Vec<String>, // "姓名 — DD.MM.YYYY — 门店1, 门店2"
    pub remaining: usize,   // 未列出的冲突数
}

impl ConflictDigest {
    /// 由已排序的冲突列表生成摘要，只列出前 limit 条
    pub fn build(conflicts: &[Conflict], snapshot: &ScopeSnapshot, limit: usize) -> Self {
        let lines = conflicts
            .iter()
            .take(limit)
            .map(|c| {
                let name = snapshot
                    .employee_name(&c.employee_id)
                    .unwrap_or(UNKNOWN_EMPLOYEE_LABEL);
                let stores = c
                    .store_ids
                    .iter()
                    .map(|id| snapshot.store(id).map(|s| s.name.as_str()).unwrap_or("?"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} — {} — {}", name, format_date_dotted(c.date), stores)
            })
            .collect();

        Self {
            lines,
            remaining: conflicts.len().saturating_sub(limit),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, Store};
    use crate::engine::calendar::YearMonth;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn assignment(id: &str, employee: &str, day: u32, store: &str) -> Assignment {
        Assignment {
            id: id.to_string(),
            employee_id: employee.to_string(),
            date: d(day),
            store_id: store.to_string(),
            shift_type_id: None,
            is_substitution: false,
            company_id: "C1".to_string(),
        }
    }

    fn store(id: &str, opened_at: Option<NaiveDate>) -> Store {
        Store {
            id: id.to_string(),
            name: id.to_string(),
            district_id: "D1".to_string(),
            company_id: "C1".to_string(),
            is_active: true,
            opened_at,
            closed_at: None,
        }
    }

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            full_name: name.to_string(),
            main_district_id: Some("D1".to_string()),
            is_active: true,
            company_id: "C1".to_string(),
        }
    }

    #[test]
    fn test_same_employee_two_stores_is_one_conflict() {
        let rows = vec![assignment("1", "A", 1, "S1"), assignment("2", "A", 1, "S2")];
        let conflicts = ConflictDetector::detect(&rows);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].employee_id, "A");
        assert_eq!(conflicts[0].date, d(1));
        assert_eq!(conflicts[0].store_ids, vec!["S1".to_string(), "S2".to_string()]);
    }

    #[test]
    fn test_two_employees_same_store_is_not_a_conflict() {
        let rows = vec![assignment("1", "A", 1, "S1"), assignment("2", "B", 1, "S1")];
        assert!(ConflictDetector::detect(&rows).is_empty());
    }

    #[test]
    fn test_different_days_do_not_conflict() {
        let rows = vec![assignment("1", "A", 1, "S1"), assignment("2", "A", 2, "S2")];
        assert!(ConflictDetector::detect(&rows).is_empty());
    }

    #[test]
    fn test_emission_order_follows_first_occurrence() {
        let rows = vec![
            assignment("1", "B", 3, "S1"),
            assignment("2", "A", 1, "S1"),
            assignment("3", "B", 3, "S2"),
            assignment("4", "A", 1, "S3"),
            assignment("5", "A", 1, "S4"),
        ];
        let conflicts = ConflictDetector::detect(&rows);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].employee_id, "B");
        assert_eq!(conflicts[1].employee_id, "A");
        assert_eq!(conflicts[1].store_ids.len(), 3);
    }

    #[test]
    fn test_lifecycle_flag_changes_result() {
        // S2 在 1 月 10 日开业，1 月 5 日的记录只在不考虑生命周期时参与
        let snapshot = ScopeSnapshot::new(
            YearMonth::new(2025, 1).unwrap(),
            vec![employee("A", "安娜")],
            vec![store("S1", None), store("S2", Some(d(10)))],
            vec![],
            vec![assignment("1", "A", 5, "S1"), assignment("2", "A", 5, "S2")],
        );

        assert_eq!(ConflictDetector::detect_in_scope(&snapshot, false).len(), 1);
        assert!(ConflictDetector::detect_in_scope(&snapshot, true).is_empty());
    }

    #[test]
    fn test_unknown_store_dropped_when_respecting_bounds() {
        let snapshot = ScopeSnapshot::new(
            YearMonth::new(2025, 1).unwrap(),
            vec![employee("A", "安娜")],
            vec![store("S1", None)],
            vec![],
            vec![assignment("1", "A", 5, "S1"), assignment("2", "A", 5, "GONE")],
        );

        assert_eq!(ConflictDetector::detect_in_scope(&snapshot, false).len(), 1);
        assert!(ConflictDetector::detect_in_scope(&snapshot, true).is_empty());
    }

    #[test]
    fn test_sort_for_display() {
        let snapshot = ScopeSnapshot::new(
            YearMonth::new(2025, 1).unwrap(),
            vec![employee("A", "Zoe"), employee("B", "Adam")],
            vec![store("S1", None), store("S2", None)],
            vec![],
            vec![],
        );
        let mut conflicts = vec![
            Conflict { employee_id: "A".into(), date: d(2), store_ids: vec![] },
            Conflict { employee_id: "A".into(), date: d(1), store_ids: vec![] },
            Conflict { employee_id: "GHOST".into(), date: d(1), store_ids: vec![] },
            Conflict { employee_id: "B".into(), date: d(1), store_ids: vec![] },
        ];
        ConflictDetector::sort_for_display(&mut conflicts, &snapshot);
        let order: Vec<(&str, u32)> = conflicts
            .iter()
            .map(|c| (c.employee_id.as_str(), chrono::Datelike::day(&c.date)))
            .collect();
        assert_eq!(order, vec![("B", 1), ("A", 1), ("GHOST", 1), ("A", 2)]);
    }

    #[test]
    fn test_digest_limits_and_labels() {
        let snapshot = ScopeSnapshot::new(
            YearMonth::new(2025, 1).unwrap(),
            vec![employee("A", "安娜")],
            vec![store("S1", None), store("S2", None)],
            vec![],
            vec![],
        );
        let conflicts: Vec<Conflict> = (1..=12)
            .map(|day| Conflict {
                employee_id: if day == 12 { "GHOST".into() } else { "A".into() },
                date: d(day),
                store_ids: vec!["S1".into(), "GONE".into()],
            })
            .collect();

        let digest = ConflictDigest::build(&conflicts, &snapshot, 10);
        assert_eq!(digest.lines.len(), 10);
        assert_eq!(digest.remaining, 2);
        assert_eq!(digest.lines[0], "安娜 — 01.01.2025 — S1, ?");

        let all = ConflictDigest::build(&conflicts, &snapshot, 20);
        assert_eq!(all.remaining, 0);
        assert!(all.lines[11].starts_with("(未知员工) — 12.01.2025"));
        assert!(ConflictDigest::build(&[], &snapshot, 10).is_empty());
    }
}
