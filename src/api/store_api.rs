// ==========================================
// 多区域门店排班系统 - 门店管理 API
// ==========================================
// 职责: 门店列表筛选、新增、编辑
// 校验: 名称非空、区域存在、开业/关店日期格式、开业日不晚于关店日
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::filter::ListFilter;
use crate::domain::{District, Store};
use crate::engine::calendar::parse_date_str;
use crate::repository::{DistrictRepository, StoreRepository};

// ==========================================
// StoreDraft - 门店表单
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDraft {
    pub name: String,
    pub district_id: String,
    pub is_active: bool,
    pub opened_at: String, // YYYY-MM-DD，空串表示无边界
    pub closed_at: String, // YYYY-MM-DD，空串表示无边界
}

/// 已校验的表单
struct ValidDraft {
    name: String,
    district: District,
    is_active: bool,
    opened_at: Option<NaiveDate>,
    closed_at: Option<NaiveDate>,
}

// ==========================================
// StoreApi - 门店管理 API
// ==========================================
pub struct StoreApi {
    store_repo: Arc<StoreRepository>,
    district_repo: Arc<DistrictRepository>,
}

impl StoreApi {
    /// 创建新的StoreApi实例
    pub fn new(store_repo: Arc<StoreRepository>, district_repo: Arc<DistrictRepository>) -> Self {
        Self {
            store_repo,
            district_repo,
        }
    }

    /// 门店列表（按名称排序）
    pub fn list_stores(&self, filter: &ListFilter) -> ApiResult<Vec<Store>> {
        let stores = self.store_repo.list_all()?;
        Ok(stores
            .into_iter()
            .filter(|s| filter.matches(&s.name, Some(&s.district_id), s.is_active))
            .collect())
    }

    /// 新增门店
    pub fn create_store(&self, draft: &StoreDraft) -> ApiResult<Store> {
        let valid = self.validate(draft)?;
        let store = Store {
            id: Uuid::new_v4().to_string(),
            name: valid.name,
            district_id: valid.district.id,
            company_id: valid.district.company_id,
            is_active: valid.is_active,
            opened_at: valid.opened_at,
            closed_at: valid.closed_at,
        };
        self.store_repo.insert(&store)?;

        info!(store_id = %store.id, district_id = %store.district_id, "门店已创建");
        Ok(store)
    }

    /// 编辑门店
    ///
    /// # 返回
    /// - Err(NotFound): 门店不存在
    pub fn update_store(&self, id: &str, draft: &StoreDraft) -> ApiResult<Store> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("门店ID不能为空".to_string()));
        }
        let valid = self.validate(draft)?;

        let mut store = self
            .store_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("门店(id={})不存在", id)))?;

        store.name = valid.name;
        store.district_id = valid.district.id;
        store.company_id = valid.district.company_id;
        store.is_active = valid.is_active;
        store.opened_at = valid.opened_at;
        store.closed_at = valid.closed_at;
        self.store_repo.update(&store)?;

        info!(
            store_id = %store.id,
            opened_at = ?store.opened_at,
            closed_at = ?store.closed_at,
            "门店已更新"
        );
        Ok(store)
    }

    fn validate(&self, draft: &StoreDraft) -> ApiResult<ValidDraft> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("门店名称不能为空".to_string()));
        }
        if draft.district_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("请选择区域".to_string()));
        }
        let district = self
            .district_repo
            .find_by_id(&draft.district_id)?
            .ok_or_else(|| ApiError::InvalidInput(format!("区域不存在: {}", draft.district_id)))?;

        let opened_at = parse_optional_date("opened_at", &draft.opened_at)?;
        let closed_at = parse_optional_date("closed_at", &draft.closed_at)?;
        if let (Some(open), Some(close)) = (opened_at, closed_at) {
            if open > close {
                return Err(ApiError::InvalidInput(format!(
                    "开业日期({})不能晚于关店日期({})",
                    open, close
                )));
            }
        }

        Ok(ValidDraft {
            name: name.to_string(),
            district,
            is_active: draft.is_active,
            opened_at,
            closed_at,
        })
    }
}

fn parse_optional_date(field: &str, value: &str) -> ApiResult<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date_str(value).map(Some).ok_or_else(|| {
        ApiError::InvalidInput(format!("{}日期格式错误（应为YYYY-MM-DD）: {}", field, value))
    })
}
