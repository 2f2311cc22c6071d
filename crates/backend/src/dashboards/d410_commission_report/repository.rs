use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::dashboards::d410_commission_report::CommissionReportRequest;
use contracts::enums::UserCategory;
use rust_decimal::Decimal;

use crate::shared::data::dataset::{OrderRecord, UserRecord};
use crate::shared::data::Dataset;

/// Order joined with its purchaser, the purchaser's referrer and the referrer's
/// distributor count at the order date
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCommissionRow {
    pub invoice: String,
    pub order_date: NaiveDate,
    pub purchaser_id: i64,
    pub purchaser_name: String,
    pub purchaser_category: Option<UserCategory>,
    pub referrer_id: Option<i64>,
    pub referrer_name: Option<String>,
    /// `Some(Distributor)` only when the referrer is a distributor
    pub referrer_category: Option<UserCategory>,
    pub referred_distributors: u32,
    pub order_total: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRow {
    pub sku: String,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Фильтры отчёта по комиссиям
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommissionFilter {
    /// Referrer id, or part of the referrer's first/last name
    pub distributor: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Part of the invoice number
    pub invoice: Option<String>,
}

impl CommissionFilter {
    /// Blank search strings are dropped
    pub fn from_request(request: &CommissionReportRequest) -> Self {
        fn non_blank(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }

        Self {
            distributor: non_blank(&request.distributor),
            date_from: request.date_from,
            date_to: request.date_to,
            invoice: non_blank(&request.invoice),
        }
    }

    pub fn matches_order(&self, invoice: &str, order_date: NaiveDate) -> bool {
        if let Some(from) = self.date_from {
            if order_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if order_date > to {
                return false;
            }
        }
        match &self.invoice {
            Some(needle) => contains_ignore_case(invoice, needle),
            None => true,
        }
    }

    /// Without a distributor search every order matches; with one, orders without
    /// a referrer never match.
    pub fn matches_referrer(&self, referrer: Option<&UserRecord>) -> bool {
        let Some(search) = &self.distributor else {
            return true;
        };
        let Some(referrer) = referrer else {
            return false;
        };

        referrer.id.to_string() == *search
            || contains_ignore_case(&referrer.first_name, search)
            || contains_ignore_case(&referrer.last_name, search)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Источник строк для отчёта по комиссиям
#[async_trait]
pub trait CommissionReportSource: Send + Sync {
    /// One page of rows matching `filter`, ordered by order date descending then
    /// invoice ascending, plus the total number of matching rows.
    async fn commission_rows(
        &self,
        filter: &CommissionFilter,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<OrderCommissionRow>, u64)>;

    /// Items of the order with exactly this invoice number; empty when unknown.
    async fn order_items(&self, invoice: &str) -> Result<Vec<OrderItemRow>>;
}

impl Dataset {
    fn commission_row(&self, order: &OrderRecord, purchaser: &UserRecord) -> OrderCommissionRow {
        let referrer = purchaser.referred_by.and_then(|id| self.user(id));
        let referrer_category = referrer
            .and_then(UserRecord::category)
            .filter(UserCategory::is_distributor);
        let referred_distributors = referrer
            .map(|r| self.referred_distributors_as_of(r.id, order.order_date))
            .unwrap_or(0);

        OrderCommissionRow {
            invoice: order.invoice_number.clone(),
            order_date: order.order_date,
            purchaser_id: purchaser.id,
            purchaser_name: purchaser.full_name(),
            purchaser_category: purchaser.category(),
            referrer_id: referrer.map(|r| r.id),
            referrer_name: referrer.map(UserRecord::full_name),
            referrer_category,
            referred_distributors,
            order_total: self.order_total(order.id),
        }
    }
}

#[async_trait]
impl CommissionReportSource for Dataset {
    async fn commission_rows(
        &self,
        filter: &CommissionFilter,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<OrderCommissionRow>, u64)> {
        let mut rows: Vec<OrderCommissionRow> = self
            .orders()
            .iter()
            .filter(|o| filter.matches_order(&o.invoice_number, o.order_date))
            .filter_map(|o| {
                let purchaser = self.user(o.purchaser_id)?;
                let referrer = purchaser.referred_by.and_then(|id| self.user(id));
                if !filter.matches_referrer(referrer) {
                    return None;
                }
                Some(self.commission_row(o, purchaser))
            })
            .collect();

        rows.sort_by(|a, b| {
            b.order_date
                .cmp(&a.order_date)
                .then_with(|| a.invoice.cmp(&b.invoice))
        });

        let total_count = rows.len() as u64;
        let page = rows
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();

        Ok((page, total_count))
    }

    async fn order_items(&self, invoice: &str) -> Result<Vec<OrderItemRow>> {
        let Some(order) = self.find_order_by_invoice(invoice) else {
            return Ok(Vec::new());
        };

        let items = self
            .items_of_order(order.id)
            .iter()
            .filter_map(|item| {
                let product = self.product(item.product_id)?;
                Some(OrderItemRow {
                    sku: product.sku.clone(),
                    product_name: product.name.clone(),
                    price: product.price,
                    quantity: item.quantity,
                })
            })
            .collect();

        Ok(items)
    }
}
