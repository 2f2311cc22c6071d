use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::pagination::PagedResponse;

pub const DEFAULT_LIMIT: u64 = 200;
pub const MAX_LIMIT: u64 = 500;
pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// Запрос рейтинга дистрибьюторов
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopDistributorsRequest {
    /// Overall cap on the ranked set
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Строка рейтинга дистрибьюторов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDistributorDto {
    pub rank: u32,
    pub distributor_id: i64,
    pub distributor_name: String,
    pub total_sales: Decimal,
}

pub type TopDistributorsResponse = PagedResponse<RankedDistributorDto>;
