pub mod commission_tier;
pub mod user_category;

pub use commission_tier::CommissionTier;
pub use user_category::UserCategory;
