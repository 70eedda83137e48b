use crate::enums::PromotionFlag;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the retail sales dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub store_id: String,
    pub category: String,
    pub shelf_level: String,
    pub date: NaiveDate,
    pub units_sold: u64,
    /// Non-negative.
    pub revenue: Decimal,
    /// Strictly positive.
    pub price: Decimal,
    pub promotion: PromotionFlag,
    pub foot_traffic: u64,
}
