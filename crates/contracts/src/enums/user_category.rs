use serde::{Deserialize, Serialize};

/// Категория пользователя в реферальной программе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserCategory {
    Distributor,
    Customer,
}

impl UserCategory {
    /// Id of the category in the `user_category` table
    pub fn id(&self) -> i32 {
        match self {
            UserCategory::Distributor => 1,
            UserCategory::Customer => 2,
        }
    }

    /// Parse a category id. Unknown ids yield `None` and are treated as "no category".
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(UserCategory::Distributor),
            2 => Some(UserCategory::Customer),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserCategory::Distributor => "Distributor",
            UserCategory::Customer => "Customer",
        }
    }

    pub fn is_distributor(&self) -> bool {
        matches!(self, UserCategory::Distributor)
    }

    pub fn is_customer(&self) -> bool {
        matches!(self, UserCategory::Customer)
    }
}
