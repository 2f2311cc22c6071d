use contracts::dashboards::d411_top_distributors::RankedDistributorDto;
use rust_decimal::Decimal;

use super::repository::DistributorSalesRow;

/// Rank counter over sales values arriving in descending order.
///
/// Equal sales share a rank; the next distinct value skips past the tied rows,
/// so `[300, 200, 200, 100]` ranks as `[1, 2, 2, 4]`.
#[derive(Debug, Default)]
pub struct RankCounter {
    current_rank: u32,
    previous_sales: Option<Decimal>,
    tie_run_length: u32,
}

impl RankCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank of the next value in the ordered sequence
    pub fn next_rank(&mut self, sales: Decimal) -> u32 {
        if self.previous_sales != Some(sales) {
            self.current_rank += 1 + self.tie_run_length;
            self.tie_run_length = 0;
        } else {
            self.tie_run_length += 1;
        }
        self.previous_sales = Some(sales);
        self.current_rank
    }
}

/// Assign ranks to distributors already sorted by total sales descending
/// (ties by ascending distributor id).
///
/// Must run over the whole capped candidate set; pages are sliced from the result.
pub fn assign_ranks(rows: Vec<DistributorSalesRow>) -> Vec<RankedDistributorDto> {
    let mut counter = RankCounter::new();

    rows.into_iter()
        .map(|row| RankedDistributorDto {
            rank: counter.next_rank(row.total_sales),
            distributor_id: row.distributor_id,
            distributor_name: row.distributor_name,
            total_sales: row.total_sales,
        })
        .collect()
}
