use serde::{Deserialize, Serialize};

/// Уровни комиссии в зависимости от количества приглашённых дистрибьюторов
///
/// | referred distributors | percentage |
/// |---|---|
/// | 0-4   | 5  |
/// | 5-10  | 10 |
/// | 11-20 | 15 |
/// | 21-29 | 20 |
/// | 30+   | 30 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommissionTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
}

impl CommissionTier {
    /// Resolve the tier for a referred-distributor count. Thresholds are checked
    /// from the highest down, the first match wins.
    pub fn for_referred_distributors(referred_distributors: u32) -> Self {
        match referred_distributors {
            n if n >= 30 => CommissionTier::Tier5,
            n if n >= 21 => CommissionTier::Tier4,
            n if n >= 11 => CommissionTier::Tier3,
            n if n >= 5 => CommissionTier::Tier2,
            _ => CommissionTier::Tier1,
        }
    }

    /// Commission percentage (whole percent)
    pub fn percentage(&self) -> u32 {
        match self {
            CommissionTier::Tier1 => 5,
            CommissionTier::Tier2 => 10,
            CommissionTier::Tier3 => 15,
            CommissionTier::Tier4 => 20,
            CommissionTier::Tier5 => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommissionTier::Tier1 => "0-4 Distributors (5%)",
            CommissionTier::Tier2 => "5-10 Distributors (10%)",
            CommissionTier::Tier3 => "11-20 Distributors (15%)",
            CommissionTier::Tier4 => "21-29 Distributors (20%)",
            CommissionTier::Tier5 => "30+ Distributors (30%)",
        }
    }

    pub fn all() -> Vec<CommissionTier> {
        vec![
            CommissionTier::Tier1,
            CommissionTier::Tier2,
            CommissionTier::Tier3,
            CommissionTier::Tier4,
            CommissionTier::Tier5,
        ]
    }
}
