// ==========================================
// 多区域门店排班系统 - 网格投影
// ==========================================
// 职责: 将扁平排班记录投影为 (门店, 日) 或 (员工, 日) 矩阵
// 规则:
// 1. 先丢弃日期落在门店生命周期之外的记录
// 2. 解析班次短代码（空/悬空引用 → 无代码）与顶班标志
// 3. 门店网格每键至多保留一条；员工汇总每键保留全部（多条即冲突信号）
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::{Assignment, CellTone, ColorKey};
use crate::engine::lifecycle::LifecycleFilter;
use crate::engine::snapshot::ScopeSnapshot;
use crate::engine::substitution::SubstitutionClassifier;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ==========================================
// CellEntry - 单元格内的一条已解析排班
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEntry {
    pub assignment_id: String,
    pub employee_id: String,
    pub store_id: String,
    pub date: NaiveDate,
    pub shift_code: Option<String>, // 班次短代码（空/悬空引用为 None）
    pub color_key: ColorKey,        // 班次颜色分类
    pub is_substitution: bool,      // 顶班（单向 OR 推导后）
}

/// 门店网格稀疏矩阵: store_id → (day → entry)
pub type StoreEntries = HashMap<String, BTreeMap<u32, CellEntry>>;

/// 员工汇总稀疏矩阵: employee_id → (day → entries)
pub type EmployeeEntries = HashMap<String, BTreeMap<u32, Vec<CellEntry>>>;

// ==========================================
// 门店网格（展示行）
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCell {
    pub day: u32,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    pub shift_code: Option<String>,
    pub is_substitution: bool,
    pub editable: bool,
    pub tone: CellTone,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRow {
    pub store_id: String,
    pub store_name: String,
    pub cells: Vec<StoreCell>, // 下标 = day - 1
}

impl StoreRow {
    pub fn cell(&self, day: u32) -> Option<&StoreCell> {
        day.checked_sub(1).and_then(|i| self.cells.get(i as usize))
    }
}

// ==========================================
// 员工汇总（展示行）
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryCell {
    pub day: u32,
    pub entries: Vec<CellEntry>,
    pub tone: CellTone,
    pub label: String,
}

impl SummaryCell {
    pub fn is_conflict(&self) -> bool {
        self.entries.len() > 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub employee_id: String,
    pub employee_name: String,
    pub cells: Vec<SummaryCell>, // 下标 = day - 1
}

impl SummaryRow {
    pub fn cell(&self, day: u32) -> Option<&SummaryCell> {
        day.checked_sub(1).and_then(|i| self.cells.get(i as usize))
    }
}

// ==========================================
// 色调判定
// ==========================================

/// 门店网格单元格色调
///
/// # 优先级
/// 1. 生命周期之外 → Disabled
/// 2. 空单元格（无记录或无班次代码）→ Empty
/// 3. 顶班 → Substitution（覆盖班次颜色）
/// 4. 班次颜色分类（未分类 → Default）
pub fn cell_tone(
    editable: bool,
    occupied: bool,
    is_substitution: bool,
    color_key: ColorKey,
) -> CellTone {
    if !editable {
        return CellTone::Disabled;
    }
    if !occupied {
        return CellTone::Empty;
    }
    if is_substitution {
        return CellTone::Substitution;
    }
    CellTone::from_color_key(color_key)
}

/// 员工汇总单元格色调
///
/// # 优先级
/// 1. 无记录 → Empty
/// 2. 多条记录 → Conflict
/// 3. 顶班 → Substitution
/// 4. 班次颜色分类
pub fn summary_tone(entries: &[CellEntry]) -> CellTone {
    match entries {
        [] => CellTone::Empty,
        [single] if single.is_substitution => CellTone::Substitution,
        [single] => CellTone::from_color_key(single.color_key),
        _ => CellTone::Conflict,
    }
}

// ==========================================
// GridProjector - 纯函数工具类
// ==========================================
pub struct GridProjector;

impl GridProjector {
    /// 解析单条记录；门店未知或日期在生命周期之外时返回 None
    pub fn resolve_entry(snapshot: &ScopeSnapshot, assignment: &Assignment) -> Option<CellEntry> {
        let store = snapshot.store(&assignment.store_id)?;
        if !snapshot.month.contains(assignment.date) {
            return None;
        }
        if !LifecycleFilter::date_editable(store, assignment.date) {
            return None;
        }

        let shift_type = snapshot.shift_type_of(assignment);
        let is_substitution = SubstitutionClassifier::for_assignment(
            assignment,
            snapshot.employee(&assignment.employee_id),
            store,
        );

        Some(CellEntry {
            assignment_id: assignment.id.clone(),
            employee_id: assignment.employee_id.clone(),
            store_id: assignment.store_id.clone(),
            date: assignment.date,
            shift_code: shift_type.map(|st| st.code.clone()),
            color_key: shift_type.map(|st| st.color_key).unwrap_or(ColorKey::Unclassified),
            is_substitution,
        })
    }

    /// 门店网格稀疏矩阵
    ///
    /// 只保留月份范围内的门店；同一 (门店, 日) 出现多条时以最后一条为准
    /// （写入路径保证每键至多一条）
    pub fn store_entries(snapshot: &ScopeSnapshot) -> StoreEntries {
        let mut matrix: StoreEntries = snapshot
            .stores()
            .iter()
            .filter(|s| LifecycleFilter::store_active_during_month(s, snapshot.month))
            .map(|s| (s.id.clone(), BTreeMap::new()))
            .collect();

        for assignment in snapshot.assignments() {
            let Some(row) = matrix.get_mut(&assignment.store_id) else {
                continue;
            };
            if let Some(entry) = Self::resolve_entry(snapshot, assignment) {
                row.insert(entry.date.day(), entry);
            }
        }

        matrix
    }

    /// 员工汇总稀疏矩阵（每键保留全部记录）
    pub fn employee_entries(snapshot: &ScopeSnapshot) -> EmployeeEntries {
        let mut matrix: EmployeeEntries = snapshot
            .employees()
            .iter()
            .map(|e| (e.id.clone(), BTreeMap::new()))
            .collect();

        for assignment in snapshot.assignments() {
            let Some(row) = matrix.get_mut(&assignment.employee_id) else {
                continue;
            };
            if let Some(entry) = Self::resolve_entry(snapshot, assignment) {
                row.entry(entry.date.day()).or_default().push(entry);
            }
        }

        matrix
    }

    /// 门店网格展示行（门店顺序沿用快照顺序）
    pub fn project_store_rows(snapshot: &ScopeSnapshot) -> Vec<StoreRow> {
        let month = snapshot.month;
        let entries = Self::store_entries(snapshot);

        let rows: Vec<StoreRow> = snapshot
            .stores()
            .iter()
            .filter(|s| LifecycleFilter::store_active_during_month(s, month))
            .map(|store| {
                let by_day = entries.get(&store.id);
                let cells = month
                    .days()
                    .map(|day| {
                        let editable = LifecycleFilter::day_editable(store, month, day);
                        let entry = by_day.and_then(|m| m.get(&day));
                        Self::store_cell(snapshot, day, editable, entry)
                    })
                    .collect();

                StoreRow {
                    store_id: store.id.clone(),
                    store_name: store.name.clone(),
                    cells,
                }
            })
            .collect();

        tracing::debug!(
            rows = rows.len(),
            assignments = snapshot.assignments().len(),
            "门店网格投影完成"
        );
        rows
    }

    /// 员工汇总展示行（员工顺序沿用快照顺序）
    pub fn project_summary_rows(snapshot: &ScopeSnapshot) -> Vec<SummaryRow> {
        let month = snapshot.month;
        let mut entries = Self::employee_entries(snapshot);

        let rows: Vec<SummaryRow> = snapshot
            .employees()
            .iter()
            .map(|employee| {
                let mut by_day = entries.remove(&employee.id).unwrap_or_default();
                let cells = month
                    .days()
                    .map(|day| {
                        let list = by_day.remove(&day).unwrap_or_default();
                        SummaryCell {
                            day,
                            tone: summary_tone(&list),
                            label: summary_label(snapshot, &list),
                            entries: list,
                        }
                    })
                    .collect();

                SummaryRow {
                    employee_id: employee.id.clone(),
                    employee_name: employee.full_name.clone(),
                    cells,
                }
            })
            .collect();

        tracing::debug!(
            rows = rows.len(),
            assignments = snapshot.assignments().len(),
            "员工汇总投影完成"
        );
        rows
    }

    fn store_cell(
        snapshot: &ScopeSnapshot,
        day: u32,
        editable: bool,
        entry: Option<&CellEntry>,
    ) -> StoreCell {
        let Some(entry) = entry else {
            return StoreCell {
                day,
                employee_id: None,
                employee_name: None,
                shift_code: None,
                is_substitution: false,
                editable,
                tone: cell_tone(editable, false, false, ColorKey::Unclassified),
                label: String::new(),
            };
        };

        let employee_name = snapshot.employee_name(&entry.employee_id).map(str::to_string);
        let occupied = entry.shift_code.is_some();

        StoreCell {
            day,
            employee_id: Some(entry.employee_id.clone()),
            label: store_label(employee_name.as_deref(), entry.shift_code.as_deref()),
            employee_name,
            shift_code: entry.shift_code.clone(),
            is_substitution: entry.is_substitution,
            editable,
            tone: cell_tone(editable, occupied, entry.is_substitution, entry.color_key),
        }
    }
}

// ==========================================
// 标签
// ==========================================

/// 门店网格标签: "姓名 (代码)"，代码为空时只显示姓名
fn store_label(employee_name: Option<&str>, shift_code: Option<&str>) -> String {
    let name = employee_name.unwrap_or("");
    match shift_code {
        Some(code) if !code.is_empty() => format!("{} ({})", name, code).trim_start().to_string(),
        _ => name.to_string(),
    }
}

/// 员工汇总标签
///
/// - 一条: "门店名 (代码)" 或 "门店名"
/// - 多条: 门店名以 " / " 连接，未知门店显示 "?"
fn summary_label(snapshot: &ScopeSnapshot, entries: &[CellEntry]) -> String {
    match entries {
        [] => String::new(),
        [single] => {
            let store_name = snapshot
                .store(&single.store_id)
                .map(|s| s.name.as_str())
                .unwrap_or("");
            match single.shift_code.as_deref() {
                Some(code) if !code.is_empty() => format!("{} ({})", store_name, code),
                _ => store_name.to_string(),
            }
        }
        many => many
            .iter()
            .map(|e| {
                snapshot
                    .store(&e.store_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or("?")
            })
            .collect::<Vec<_>>()
            .join(" / "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, ShiftType, Store};
    use crate::engine::calendar::YearMonth;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn store(id: &str, name: &str, district: &str, opened_at: Option<NaiveDate>) -> Store {
        Store {
            id: id.to_string(),
            name: name.to_string(),
            district_id: district.to_string(),
            company_id: "C1".to_string(),
            is_active: true,
            opened_at,
            closed_at: None,
        }
    }

    fn employee(id: &str, name: &str, home: Option<&str>) -> Employee {
        Employee {
            id: id.to_string(),
            full_name: name.to_string(),
            main_district_id: home.map(str::to_string),
            is_active: true,
            company_id: "C1".to_string(),
        }
    }

    fn shift_type(id: &str, code: &str, color: ColorKey) -> ShiftType {
        ShiftType {
            id: id.to_string(),
            code: code.to_string(),
            color_key: color,
            company_id: "C1".to_string(),
        }
    }

    fn assignment(id: &str, emp: &str, date: NaiveDate, store: &str, st: Option<&str>) -> Assignment {
        Assignment {
            id: id.to_string(),
            employee_id: emp.to_string(),
            date,
            store_id: store.to_string(),
            shift_type_id: st.map(str::to_string),
            is_substitution: false,
            company_id: "C1".to_string(),
        }
    }

    fn feb_snapshot(assignments: Vec<Assignment>) -> ScopeSnapshot {
        ScopeSnapshot::new(
            YearMonth::new(2025, 2).unwrap(),
            vec![
                employee("E1", "安娜", Some("D1")),
                employee("E2", "鲍里斯", Some("D2")),
            ],
            vec![
                store("S1", "中心店", "D1", Some(d(2, 10))),
                store("S2", "北门店", "D1", None),
                store("S3", "未来店", "D1", Some(d(3, 1))),
            ],
            vec![
                shift_type("T1", "D", ColorKey::Green),
                shift_type("T2", "N", ColorKey::Gray),
            ],
            assignments,
        )
    }

    #[test]
    fn test_cell_tone_precedence() {
        assert_eq!(cell_tone(false, true, true, ColorKey::Green), CellTone::Disabled);
        assert_eq!(cell_tone(true, false, true, ColorKey::Green), CellTone::Empty);
        assert_eq!(cell_tone(true, true, true, ColorKey::Green), CellTone::Substitution);
        assert_eq!(cell_tone(true, true, false, ColorKey::Green), CellTone::Green);
        assert_eq!(cell_tone(true, true, false, ColorKey::Gray), CellTone::Gray);
        assert_eq!(cell_tone(true, true, false, ColorKey::Unclassified), CellTone::Default);
    }

    #[test]
    fn test_store_rows_exclude_out_of_month_store() {
        let rows = GridProjector::project_store_rows(&feb_snapshot(vec![]));
        let ids: Vec<&str> = rows.iter().map(|r| r.store_id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
        assert!(rows.iter().all(|r| r.cells.len() == 28));
    }

    #[test]
    fn test_days_before_opening_are_disabled() {
        let rows = GridProjector::project_store_rows(&feb_snapshot(vec![]));
        let s1 = &rows[0];
        for day in 1..=9 {
            let cell = s1.cell(day).unwrap();
            assert!(!cell.editable);
            assert_eq!(cell.tone, CellTone::Disabled);
        }
        for day in 10..=28 {
            let cell = s1.cell(day).unwrap();
            assert!(cell.editable);
            assert_eq!(cell.tone, CellTone::Empty);
        }
    }

    #[test]
    fn test_out_of_range_assignment_is_discarded() {
        let snapshot = feb_snapshot(vec![
            assignment("A1", "E1", d(2, 5), "S1", Some("T1")),
            assignment("A2", "E1", d(2, 12), "S1", Some("T1")),
        ]);
        let entries = GridProjector::store_entries(&snapshot);
        let s1 = &entries["S1"];
        assert!(!s1.contains_key(&5));
        assert_eq!(s1[&12].assignment_id, "A2");
    }

    #[test]
    fn test_label_and_substitution_tone() {
        let snapshot = feb_snapshot(vec![
            assignment("A1", "E1", d(2, 3), "S2", Some("T1")),
            assignment("A2", "E2", d(2, 4), "S2", Some("T1")),
            assignment("A3", "E1", d(2, 5), "S2", Some("GONE")),
            assignment("A4", "E1", d(2, 6), "S2", Some("T2")),
        ]);
        let rows = GridProjector::project_store_rows(&snapshot);
        let s2 = rows.iter().find(|r| r.store_id == "S2").unwrap();

        let home = s2.cell(3).unwrap();
        assert_eq!(home.label, "安娜 (D)");
        assert!(!home.is_substitution);
        assert_eq!(home.tone, CellTone::Green);

        let visitor = s2.cell(4).unwrap();
        assert!(visitor.is_substitution);
        assert_eq!(visitor.tone, CellTone::Substitution);

        // 悬空班次引用 → 无代码，视为空色调
        let dangling = s2.cell(5).unwrap();
        assert_eq!(dangling.label, "安娜");
        assert_eq!(dangling.shift_code, None);
        assert_eq!(dangling.tone, CellTone::Empty);

        assert_eq!(s2.cell(6).unwrap().tone, CellTone::Gray);
    }

    #[test]
    fn test_summary_keeps_all_entries_per_key() {
        let snapshot = feb_snapshot(vec![
            assignment("A1", "E1", d(2, 15), "S1", Some("T1")),
            assignment("A2", "E1", d(2, 15), "S2", Some("T1")),
            assignment("A3", "E1", d(2, 16), "S2", Some("T1")),
            assignment("A4", "E1", d(2, 17), "S2", None),
        ]);
        let rows = GridProjector::project_summary_rows(&snapshot);
        let anna = rows.iter().find(|r| r.employee_id == "E1").unwrap();

        let conflict = anna.cell(15).unwrap();
        assert!(conflict.is_conflict());
        assert_eq!(conflict.tone, CellTone::Conflict);
        assert_eq!(conflict.label, "中心店 / 北门店");

        let single = anna.cell(16).unwrap();
        assert_eq!(single.label, "北门店 (D)");
        assert_eq!(single.tone, CellTone::Green);

        assert_eq!(anna.cell(17).unwrap().label, "北门店");
        assert_eq!(anna.cell(18).unwrap().tone, CellTone::Empty);
    }

    #[test]
    fn test_summary_applies_lifecycle_filter() {
        let snapshot = feb_snapshot(vec![
            assignment("A1", "E1", d(2, 5), "S1", Some("T1")),
            assignment("A2", "E1", d(2, 5), "S2", Some("T1")),
        ]);
        let rows = GridProjector::project_summary_rows(&snapshot);
        let cell = rows[0].cell(5).unwrap();
        assert_eq!(cell.entries.len(), 1);
        assert_eq!(cell.entries[0].store_id, "S2");
    }

    #[test]
    fn test_summary_substitution_uses_shared_classifier() {
        // 鲍里斯归属 D2，在 D1 门店上班 → 推导为顶班（存储标志为 false）
        let snapshot = feb_snapshot(vec![assignment("A1", "E2", d(2, 20), "S2", Some("T1"))]);
        let rows = GridProjector::project_summary_rows(&snapshot);
        let boris = rows.iter().find(|r| r.employee_id == "E2").unwrap();
        assert_eq!(boris.cell(20).unwrap().tone, CellTone::Substitution);
    }
}
