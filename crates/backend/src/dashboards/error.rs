use thiserror::Error;

/// Ошибки построения отчётов
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error(transparent)]
    Source(#[from] anyhow::Error),
}
