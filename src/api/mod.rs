// ==========================================
// 多区域门店排班系统 - API 层
// ==========================================
// 职责: 编排仓储与引擎，提供排班视图、单元格写入、人员/门店/区域管理、配置、导出
// ==========================================

pub mod assignment_api;
pub mod config_api;
pub mod district_api;
pub mod error;
pub mod export;
pub mod filter;
pub mod roster_api;
pub mod staff_api;
pub mod store_api;

// 重导出核心类型
pub use assignment_api::AssignmentApi;
pub use config_api::ConfigApi;
pub use district_api::DistrictApi;
pub use error::{map_api_error, ApiError, ApiResult, ErrorResponse};
pub use export::write_store_month_csv;
pub use filter::ListFilter;
pub use roster_api::{EmployeeSummaryView, MonthScope, RosterApi, StoreMonthView};
pub use staff_api::StaffApi;
pub use store_api::{StoreApi, StoreDraft};
