//! Commission rules: tier lookup, eligibility and the commission amount per order.
//!
//! Everything here is pure; rows come in already joined from a
//! [`CommissionReportSource`](super::repository::CommissionReportSource).

use contracts::dashboards::d410_commission_report::CommissionReportEntryDto;
use contracts::enums::{CommissionTier, UserCategory};
use rust_decimal::{Decimal, RoundingStrategy};

use super::repository::OrderCommissionRow;

/// Fractional digits of every monetary amount produced here
const MONEY_SCALE: u32 = 2;

/// Commission percentage for a distributor with `referred_distributors` direct
/// distributor referrals.
pub fn resolve_tier_percentage(referred_distributors: u32) -> u32 {
    CommissionTier::for_referred_distributors(referred_distributors).percentage()
}

/// Commission on `order_total`, rounded half away from zero to two decimals.
///
/// Ineligible orders and a zero percentage give exactly `0.00`.
pub fn calculate_commission(order_total: Decimal, percentage: u32, is_eligible: bool) -> Decimal {
    if !is_eligible || percentage == 0 {
        return zero_amount();
    }

    let mut commission = (order_total * Decimal::from(percentage) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    commission.rescale(MONEY_SCALE);
    commission
}

/// Only a customer's purchase earns commission, and only for a distributor referrer
pub fn is_eligible(
    purchaser_category: Option<UserCategory>,
    referrer_category: Option<UserCategory>,
) -> bool {
    purchaser_category == Some(UserCategory::Customer)
        && referrer_category == Some(UserCategory::Distributor)
}

/// Build the report line for one order.
///
/// For an ineligible order the distributor, referral count, percentage and
/// commission are all cleared, whatever the joined row carried.
pub fn assemble_entry(row: &OrderCommissionRow) -> CommissionReportEntryDto {
    let eligible = is_eligible(row.purchaser_category, row.referrer_category);

    let percentage = if eligible {
        resolve_tier_percentage(row.referred_distributors)
    } else {
        0
    };
    let commission = calculate_commission(row.order_total, percentage, eligible);

    CommissionReportEntryDto {
        invoice: row.invoice.clone(),
        purchaser_id: row.purchaser_id,
        purchaser_name: row.purchaser_name.clone(),
        distributor_id: if eligible { row.referrer_id } else { None },
        distributor_name: if eligible {
            row.referrer_name.clone()
        } else {
            None
        },
        referred_distributors: if eligible {
            row.referred_distributors
        } else {
            0
        },
        order_date: row.order_date,
        percentage,
        order_total: row.order_total,
        commission,
    }
}

fn zero_amount() -> Decimal {
    Decimal::new(0, MONEY_SCALE)
}
