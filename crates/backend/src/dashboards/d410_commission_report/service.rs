use anyhow::Result;
use contracts::dashboards::d410_commission_report::{
    CommissionReportEntryDto, CommissionReportRequest, CommissionReportResponse, OrderItemDto,
    OrderItemsResponse, DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
use contracts::shared::pagination::{PageRequest, PagedResponse, PaginationMeta};
use rust_decimal::Decimal;

use super::calculator;
use super::repository::{CommissionFilter, CommissionReportSource, OrderItemRow};
use crate::dashboards::ReportError;

/// Get one page of the commission report
pub async fn get_commission_report<S>(
    source: &S,
    request: CommissionReportRequest,
) -> Result<CommissionReportResponse>
where
    S: CommissionReportSource + ?Sized,
{
    let filter = CommissionFilter::from_request(&request);
    let page = PageRequest::new(request.page, request.per_page, DEFAULT_PER_PAGE, MAX_PER_PAGE);
    tracing::debug!("Commission report filter: {:?}, page: {:?}", filter, page);

    let (rows, total) = source
        .commission_rows(&filter, page.limit(), page.offset())
        .await?;

    let data: Vec<CommissionReportEntryDto> = rows.iter().map(calculator::assemble_entry).collect();
    let pagination = PaginationMeta::new(&page, total, data.len() as u64);

    let eligible = data.iter().filter(|e| !e.commission.is_zero()).count();
    tracing::info!(
        "Commission report: page {} of {}, {} rows ({} with commission), {} total",
        pagination.current_page,
        pagination.last_page,
        data.len(),
        eligible,
        total
    );

    Ok(PagedResponse { data, pagination })
}

/// Get items of one order for the report drill-down
pub async fn get_order_items<S>(source: &S, invoice: &str) -> Result<OrderItemsResponse, ReportError>
where
    S: CommissionReportSource + ?Sized,
{
    let rows = source.order_items(invoice).await?;
    if rows.is_empty() {
        tracing::warn!("Order not found: {}", invoice);
        return Err(ReportError::OrderNotFound(invoice.to_string()));
    }

    Ok(OrderItemsResponse {
        invoice: invoice.to_string(),
        items: rows.into_iter().map(row_to_dto).collect(),
    })
}

fn row_to_dto(row: OrderItemRow) -> OrderItemDto {
    let total = row.price * Decimal::from(row.quantity);
    OrderItemDto {
        sku: row.sku,
        product_name: row.product_name,
        price: row.price,
        quantity: row.quantity,
        total,
    }
}
