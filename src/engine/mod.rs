// ==========================================
// 多区域门店排班系统 - 引擎层
// ==========================================
// 职责: 日历、生命周期、顶班、网格投影、冲突检测、编辑状态机
// 红线: Engine 不拼 SQL，不做 I/O
// ==========================================

pub mod calendar;
pub mod conflict;
pub mod edit_session;
pub mod grid;
pub mod lifecycle;
pub mod snapshot;
pub mod substitution;

// 重导出核心引擎
pub use calendar::YearMonth;
pub use conflict::{Conflict, ConflictDetector, ConflictDigest};
pub use edit_session::{CellEdit, CellEditor, EditForm, EditSessionError, EditState};
pub use grid::{
    cell_tone, summary_tone, CellEntry, GridProjector, StoreCell, StoreRow, SummaryCell,
    SummaryRow,
};
pub use lifecycle::LifecycleFilter;
pub use snapshot::{ScopeParts, ScopeSnapshot};
pub use substitution::SubstitutionClassifier;
