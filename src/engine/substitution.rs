// ==========================================
// 多区域门店排班系统 - 顶班判定
// ==========================================
// 职责: 判定一条排班是否为跨区顶班
// 规则: is_substitution = explicit_flag OR (home_district 存在 AND home_district != store.district)
// 红线: 单向 OR —— 显式标记为 true 时不会被推导覆盖为 false
// ==========================================

use crate::domain::{Assignment, Employee, Store};

// ==========================================
// SubstitutionClassifier - 纯函数工具类
// ==========================================
// 网格投影、员工汇总、写入路径共用
pub struct SubstitutionClassifier;

impl SubstitutionClassifier {
    /// 基础判定
    ///
    /// # 参数
    /// - explicit_flag: 记录上存储的顶班标志
    /// - home_district_id: 员工归属区域（可为空）
    /// - store_district_id: 门店所属区域
    pub fn classify(
        explicit_flag: bool,
        home_district_id: Option<&str>,
        store_district_id: &str,
    ) -> bool {
        if explicit_flag {
            return true;
        }
        match home_district_id {
            Some(home) => home != store_district_id,
            None => false,
        }
    }

    /// 针对已存在的排班记录判定
    ///
    /// 员工不在本次加载范围内时，只能依赖存储的标志
    pub fn for_assignment(
        assignment: &Assignment,
        employee: Option<&Employee>,
        store: &Store,
    ) -> bool {
        Self::classify(
            assignment.is_substitution,
            employee.and_then(|e| e.main_district_id.as_deref()),
            &store.district_id,
        )
    }

    /// 写入前判定（新记录没有显式标志）
    pub fn for_new_assignment(employee: Option<&Employee>, target_store: &Store) -> bool {
        Self::classify(
            false,
            employee.and_then(|e| e.main_district_id.as_deref()),
            &target_store.district_id,
        )
    }
}
