use anyhow::Result;
use async_trait::async_trait;
use contracts::enums::UserCategory;
use rust_decimal::Decimal;

use crate::shared::data::Dataset;

/// Distributor with the total of all orders placed by users it referred directly
#[derive(Debug, Clone, PartialEq)]
pub struct DistributorSalesRow {
    pub distributor_id: i64,
    pub distributor_name: String,
    pub total_sales: Decimal,
}

/// Источник продаж дистрибьюторов
#[async_trait]
pub trait DistributorSalesSource: Send + Sync {
    /// Distributors with sales above zero, ordered by total sales descending then
    /// distributor id ascending, at most `limit` rows.
    async fn distributor_sales(&self, limit: u64) -> Result<Vec<DistributorSalesRow>>;
}

#[async_trait]
impl DistributorSalesSource for Dataset {
    async fn distributor_sales(&self, limit: u64) -> Result<Vec<DistributorSalesRow>> {
        let mut rows: Vec<DistributorSalesRow> = self
            .users()
            .filter(|u| u.category() == Some(UserCategory::Distributor))
            .map(|u| DistributorSalesRow {
                distributor_id: u.id,
                distributor_name: u.full_name(),
                total_sales: self.direct_downstream_sales(u.id),
            })
            .filter(|row| row.total_sales > Decimal::ZERO)
            .collect();

        rows.sort_by(|a, b| {
            b.total_sales
                .cmp(&a.total_sales)
                .then_with(|| a.distributor_id.cmp(&b.distributor_id))
        });
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(rows)
    }
}
