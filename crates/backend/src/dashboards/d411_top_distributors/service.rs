use anyhow::Result;
use contracts::dashboards::d411_top_distributors::{
    TopDistributorsRequest, TopDistributorsResponse, DEFAULT_LIMIT, DEFAULT_PER_PAGE, MAX_LIMIT,
    MAX_PER_PAGE,
};
use contracts::shared::pagination::{PageRequest, PagedResponse, PaginationMeta};

use super::ranking;
use super::repository::DistributorSalesSource;

/// Get one page of the top distributors report
///
/// Ranks are assigned once over the whole capped set, then the page is sliced,
/// so a distributor has the same rank on every page size.
pub async fn get_top_distributors<S>(
    source: &S,
    request: TopDistributorsRequest,
) -> Result<TopDistributorsResponse>
where
    S: DistributorSalesSource + ?Sized,
{
    let limit = request.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let page = PageRequest::new(request.page, request.per_page, DEFAULT_PER_PAGE, MAX_PER_PAGE);

    let rows = source.distributor_sales(limit).await?;
    let ranked = ranking::assign_ranks(rows);

    let data = page.slice(&ranked);
    let pagination = PaginationMeta::new(&page, ranked.len() as u64, data.len() as u64);

    tracing::info!(
        "Top distributors: {} ranked (limit {}), page {} of {}",
        ranked.len(),
        limit,
        pagination.current_page,
        pagination.last_page
    );

    Ok(PagedResponse { data, pagination })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d411_top_distributors::repository::DistributorSalesRow;
    use crate::shared::data::dataset::fixtures::sample_dataset;
    use async_trait::async_trait;
    use contracts::dashboards::d411_top_distributors::RankedDistributorDto;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    /// Fixed, already ordered sales rows
    struct StaticSales(Vec<DistributorSalesRow>);

    #[async_trait]
    impl DistributorSalesSource for StaticSales {
        async fn distributor_sales(&self, limit: u64) -> Result<Vec<DistributorSalesRow>> {
            Ok(self.0.iter().take(limit as usize).cloned().collect())
        }
    }

    fn leaderboard() -> StaticSales {
        let sales = [
            (7, "Ava Brown", dec!(22026.75)),
            (3, "Leo Green", dec!(9645.00)),
            (2, "Eli White", dec!(7000.00)),
            (5, "Zoe Black", dec!(7000.00)),
            (9, "Max Gray", dec!(360.00)),
        ];
        StaticSales(
            sales
                .into_iter()
                .map(|(id, name, total)| DistributorSalesRow {
                    distributor_id: id,
                    distributor_name: name.to_string(),
                    total_sales: total,
                })
                .collect(),
        )
    }

    fn request(page: u64, per_page: u64) -> TopDistributorsRequest {
        TopDistributorsRequest {
            limit: None,
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    fn rank_map(entries: &[RankedDistributorDto]) -> HashMap<i64, u32> {
        entries.iter().map(|e| (e.distributor_id, e.rank)).collect()
    }

    #[tokio::test]
    async fn test_single_page_ranks() {
        let source = leaderboard();
        let report = get_top_distributors(&source, request(1, 20)).await.unwrap();

        let ranks: Vec<u32> = report.data.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 3, 5]);
        assert_eq!(report.pagination.total, 5);
        assert_eq!(report.pagination.last_page, 1);
    }

    #[tokio::test]
    async fn test_ranks_are_stable_across_pages() {
        let source = leaderboard();
        let full = get_top_distributors(&source, request(1, 20)).await.unwrap();
        let expected = rank_map(&full.data);

        let mut paged = Vec::new();
        for page in 1..=3 {
            let report = get_top_distributors(&source, request(page, 2)).await.unwrap();
            assert_eq!(report.pagination.last_page, 3);
            paged.extend(report.data);
        }

        assert_eq!(paged.len(), 5);
        assert_eq!(rank_map(&paged), expected);
    }

    #[tokio::test]
    async fn test_tie_split_across_page_boundary() {
        let source = leaderboard();
        let page2 = get_top_distributors(&source, request(2, 3)).await.unwrap();

        // Zoe Black ties Eli White on page 1 and keeps rank 3
        assert_eq!(page2.data[0].distributor_id, 5);
        assert_eq!(page2.data[0].rank, 3);
        assert_eq!(page2.data[1].rank, 5);
        assert_eq!(page2.pagination.from, Some(4));
        assert_eq!(page2.pagination.to, Some(5));
    }

    #[tokio::test]
    async fn test_limit_caps_ranked_set() {
        let source = leaderboard();
        let req = TopDistributorsRequest {
            limit: Some(3),
            page: None,
            per_page: None,
        };
        let report = get_top_distributors(&source, req).await.unwrap();
        assert_eq!(report.pagination.total, 3);
        assert_eq!(report.pagination.per_page, DEFAULT_PER_PAGE);
        assert_eq!(report.data.last().map(|e| e.rank), Some(3));
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let source = leaderboard();
        let report = get_top_distributors(&source, request(9, 2)).await.unwrap();
        assert!(report.data.is_empty());
        assert_eq!(report.pagination.total, 5);
        assert_eq!(report.pagination.from, None);
    }

    #[tokio::test]
    async fn test_no_sales() {
        let source = StaticSales(Vec::new());
        let report = get_top_distributors(&source, TopDistributorsRequest::default())
            .await
            .unwrap();
        assert!(report.data.is_empty());
        assert_eq!(report.pagination.total, 0);
    }

    #[tokio::test]
    async fn test_sample_dataset_leaderboard() {
        let dataset = sample_dataset();
        let report = get_top_distributors(&dataset, TopDistributorsRequest::default())
            .await
            .unwrap();

        let summary: Vec<(u32, i64, Decimal)> = report
            .data
            .iter()
            .map(|e| (e.rank, e.distributor_id, e.total_sales))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, 1, dec!(645.33)),
                (2, 10, dec!(552.00)),
                (2, 11, dec!(552.00)),
                (4, 12, dec!(45.50)),
            ]
        );
    }
}
