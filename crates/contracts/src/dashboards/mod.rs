pub mod d410_commission_report;
pub mod d411_top_distributors;
