// ==========================================
// 多区域门店排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与值类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod district;
pub mod employee;
pub mod shift_type;
pub mod store;
pub mod types;

// 重导出核心类型
pub use assignment::Assignment;
pub use district::District;
pub use employee::Employee;
pub use shift_type::ShiftType;
pub use store::Store;
pub use types::{CellTone, ColorKey, StatusFilter};
