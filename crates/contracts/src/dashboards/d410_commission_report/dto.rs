use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::pagination::PagedResponse;

pub const DEFAULT_PER_PAGE: u64 = 15;
pub const MAX_PER_PAGE: u64 = 100;

/// Запрос отчёта по комиссиям
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommissionReportRequest {
    /// Referrer id, or part of the referrer's first/last name
    pub distributor: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Part of the invoice number
    pub invoice: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Строка отчёта по комиссиям (одна на заказ)
///
/// Distributor fields are `None` and all commission figures are zero when the
/// order is not eligible for commission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionReportEntryDto {
    pub invoice: String,
    pub purchaser_id: i64,
    pub purchaser_name: String,
    pub distributor_id: Option<i64>,
    pub distributor_name: Option<String>,
    pub referred_distributors: u32,
    pub order_date: NaiveDate,
    pub percentage: u32,
    pub order_total: Decimal,
    pub commission: Decimal,
}

pub type CommissionReportResponse = PagedResponse<CommissionReportEntryDto>;

/// Позиция заказа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemDto {
    pub sku: String,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemsResponse {
    pub invoice: String,
    pub items: Vec<OrderItemDto>,
}
