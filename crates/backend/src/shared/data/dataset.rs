use chrono::NaiveDate;
use contracts::enums::UserCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Ошибки загрузки набора данных
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: i64 },

    #[error("Order {invoice} references unknown purchaser {purchaser_id}")]
    UnknownPurchaser { invoice: String, purchaser_id: i64 },

    #[error("Order item references unknown order {0}")]
    UnknownOrder(i64),

    #[error("Order item of order {order_id} references unknown product {product_id}")]
    UnknownProduct { order_id: i64, product_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Row of the `user_category` table, `None` when the user has no category
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub referred_by: Option<i64>,
    pub enrolled_date: NaiveDate,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Unknown category ids are reported as no category
    pub fn category(&self) -> Option<UserCategory> {
        self.category_id.and_then(UserCategory::from_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: i64,
    pub invoice_number: String,
    pub purchaser_id: i64,
    pub order_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: u32,
}

/// Raw JSON shape of a dataset file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
    #[serde(default)]
    pub order_items: Vec<OrderItemRecord>,
}

/// Read-only in-memory snapshot of users, products and orders.
///
/// Order totals, per-purchaser sales and the referral index are computed once at
/// load time; every report query afterwards only reads.
#[derive(Debug, Clone)]
pub struct Dataset {
    users: BTreeMap<i64, UserRecord>,
    products: HashMap<i64, ProductRecord>,
    orders: Vec<OrderRecord>,
    items_by_order: HashMap<i64, Vec<OrderItemRecord>>,
    order_totals: HashMap<i64, Decimal>,
    sales_by_purchaser: HashMap<i64, Decimal>,
    referrals: HashMap<i64, Vec<i64>>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        tracing::info!("Loading dataset from: {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let snapshot: DatasetSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: DatasetSnapshot) -> Result<Self, DatasetError> {
        let mut users = BTreeMap::new();
        for user in snapshot.users {
            if user.category_id.is_some() && user.category().is_none() {
                tracing::warn!(
                    "User {} has unknown category id {:?}, treating as uncategorised",
                    user.id,
                    user.category_id
                );
            }
            let id = user.id;
            if users.insert(id, user).is_some() {
                return Err(DatasetError::DuplicateId { entity: "user", id });
            }
        }

        let mut products = HashMap::new();
        for product in snapshot.products {
            let id = product.id;
            if products.insert(id, product).is_some() {
                return Err(DatasetError::DuplicateId {
                    entity: "product",
                    id,
                });
            }
        }

        let mut order_ids = HashMap::new();
        for order in &snapshot.orders {
            if !users.contains_key(&order.purchaser_id) {
                return Err(DatasetError::UnknownPurchaser {
                    invoice: order.invoice_number.clone(),
                    purchaser_id: order.purchaser_id,
                });
            }
            if order_ids.insert(order.id, order.purchaser_id).is_some() {
                return Err(DatasetError::DuplicateId {
                    entity: "order",
                    id: order.id,
                });
            }
        }

        let mut items_by_order: HashMap<i64, Vec<OrderItemRecord>> = HashMap::new();
        let mut order_totals: HashMap<i64, Decimal> = HashMap::new();
        let mut sales_by_purchaser: HashMap<i64, Decimal> = HashMap::new();
        for item in snapshot.order_items {
            let purchaser_id = *order_ids
                .get(&item.order_id)
                .ok_or_else(|| DatasetError::UnknownOrder(item.order_id))?;
            let product = products
                .get(&item.product_id)
                .ok_or_else(|| DatasetError::UnknownProduct {
                    order_id: item.order_id,
                    product_id: item.product_id,
                })?;

            let line_total = product.price * Decimal::from(item.quantity);
            *order_totals.entry(item.order_id).or_insert(Decimal::ZERO) += line_total;
            *sales_by_purchaser.entry(purchaser_id).or_insert(Decimal::ZERO) += line_total;
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let mut referrals: HashMap<i64, Vec<i64>> = HashMap::new();
        for user in users.values() {
            if let Some(referrer_id) = user.referred_by {
                referrals.entry(referrer_id).or_default().push(user.id);
            }
        }

        tracing::info!(
            "Dataset loaded: {} users, {} products, {} orders",
            users.len(),
            products.len(),
            snapshot.orders.len()
        );

        Ok(Self {
            users,
            products,
            orders: snapshot.orders,
            items_by_order,
            order_totals,
            sales_by_purchaser,
            referrals,
        })
    }

    pub fn user(&self, id: i64) -> Option<&UserRecord> {
        self.users.get(&id)
    }

    /// Users in ascending id order
    pub fn users(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }

    pub fn product(&self, id: i64) -> Option<&ProductRecord> {
        self.products.get(&id)
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn find_order_by_invoice(&self, invoice: &str) -> Option<&OrderRecord> {
        self.orders.iter().find(|o| o.invoice_number == invoice)
    }

    pub fn items_of_order(&self, order_id: i64) -> &[OrderItemRecord] {
        self.items_by_order
            .get(&order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Σ price × quantity over the order's items; zero for an order without items
    pub fn order_total(&self, order_id: i64) -> Decimal {
        self.order_totals
            .get(&order_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Number of distributors directly referred by `referrer_id` whose enrollment
    /// date is on or before `as_of`.
    pub fn referred_distributors_as_of(&self, referrer_id: i64, as_of: NaiveDate) -> u32 {
        let count = self
            .referred_users(referrer_id)
            .filter(|u| u.category() == Some(UserCategory::Distributor))
            .filter(|u| u.enrolled_date <= as_of)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Total of all orders placed by users directly referred by `distributor_id`.
    /// Referrals of referrals are not included.
    pub fn direct_downstream_sales(&self, distributor_id: i64) -> Decimal {
        self.referred_users(distributor_id)
            .filter_map(|u| self.sales_by_purchaser.get(&u.id))
            .copied()
            .sum()
    }

    fn referred_users(&self, referrer_id: i64) -> impl Iterator<Item = &UserRecord> {
        self.referrals
            .get(&referrer_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.users.get(id))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_dataset;
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sample_dataset_loads() {
        let dataset = sample_dataset();
        assert_eq!(dataset.users().count(), 18);
        assert_eq!(dataset.orders().len(), 10);
        assert_eq!(dataset.user(1).unwrap().full_name(), "John Smith");
    }

    #[test]
    fn test_order_totals() {
        let dataset = sample_dataset();
        let total = |invoice: &str| {
            let order = dataset.find_order_by_invoice(invoice).unwrap();
            dataset.order_total(order.id)
        };
        assert_eq!(total("ABC4170"), dec!(60.00));
        assert_eq!(total("ABC6931"), dec!(372.00));
        assert_eq!(total("ABC23352"), dec!(552.00));
    }

    #[test]
    fn test_referred_distributors_is_a_point_in_time_count() {
        let dataset = sample_dataset();
        // Distributor 18 enrolled on 2021-05-01
        assert_eq!(dataset.referred_distributors_as_of(1, date(2020, 3, 1)), 8);
        assert_eq!(dataset.referred_distributors_as_of(1, date(2021, 4, 30)), 8);
        assert_eq!(dataset.referred_distributors_as_of(1, date(2021, 5, 1)), 9);
        assert_eq!(dataset.referred_distributors_as_of(1, date(2018, 12, 31)), 0);
        assert_eq!(dataset.referred_distributors_as_of(10, date(2022, 1, 1)), 0);
    }

    #[test]
    fn test_direct_downstream_sales_excludes_indirect_referrals() {
        let dataset = sample_dataset();
        // 60.00 + 372.00 + 120.00 + 60.00 + 33.33; Mark Taylor's order is credited
        // to distributor 10 only.
        assert_eq!(dataset.direct_downstream_sales(1), dec!(645.33));
        assert_eq!(dataset.direct_downstream_sales(10), dec!(552.00));
        assert_eq!(dataset.direct_downstream_sales(13), Decimal::ZERO);
    }

    #[test]
    fn test_unknown_category_is_uncategorised() {
        let dataset = sample_dataset();
        let olga = dataset.user(6).unwrap();
        assert_eq!(olga.category_id, Some(7));
        assert_eq!(olga.category(), None);
    }

    #[test]
    fn test_rejects_order_with_unknown_purchaser() {
        let json = r#"{
            "users": [],
            "orders": [{"id": 1, "invoice_number": "X1", "purchaser_id": 99, "order_date": "2020-01-01"}]
        }"#;
        let err = Dataset::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnknownPurchaser { purchaser_id: 99, .. }
        ));
    }

    #[test]
    fn test_rejects_item_with_unknown_product() {
        let json = r#"{
            "users": [{"id": 1, "first_name": "A", "last_name": "B", "enrolled_date": "2020-01-01"}],
            "orders": [{"id": 1, "invoice_number": "X1", "purchaser_id": 1, "order_date": "2020-01-01"}],
            "order_items": [{"order_id": 1, "product_id": 5, "quantity": 1}]
        }"#;
        let err = Dataset::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnknownProduct { order_id: 1, product_id: 5 }
        ));
    }

    #[test]
    fn test_rejects_duplicate_user() {
        let json = r#"{
            "users": [
                {"id": 1, "first_name": "A", "last_name": "B", "enrolled_date": "2020-01-01"},
                {"id": 1, "first_name": "C", "last_name": "D", "enrolled_date": "2020-01-01"}
            ]
        }"#;
        let err = Dataset::from_json(json).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateId { entity: "user", id: 1 }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Dataset::from_json("{ not json"),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load(Path::new("/nonexistent/dataset.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
