// ==========================================
// 多区域门店排班系统 - 区域 API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::District;
use crate::repository::DistrictRepository;

pub struct DistrictApi {
    district_repo: Arc<DistrictRepository>,
}

impl DistrictApi {
    pub fn new(district_repo: Arc<DistrictRepository>) -> Self {
        Self { district_repo }
    }

    /// 区域列表（按名称排序）
    pub fn list_districts(&self) -> ApiResult<Vec<District>> {
        Ok(self.district_repo.list_all()?)
    }

    /// 查询单个区域
    pub fn get_district(&self, id: &str) -> ApiResult<District> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("区域ID不能为空".to_string()));
        }
        self.district_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("区域(id={})不存在", id)))
    }
}
