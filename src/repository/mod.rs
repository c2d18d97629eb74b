// ==========================================
// 多区域门店排班系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod assignment_repo;
pub mod district_repo;
pub mod employee_repo;
pub mod error;
pub mod shift_type_repo;
pub mod store_repo;

// 重导出核心仓储
pub use assignment_repo::AssignmentRepository;
pub use district_repo::DistrictRepository;
pub use employee_repo::EmployeeRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use shift_type_repo::ShiftTypeRepository;
pub use store_repo::StoreRepository;
