use crate::error::CoreError;
use crate::structs::SalesRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a sale happened under a promotional price.
///
/// The source encodes this as `0`/`1`. Variants are declared in the order
/// they are reported, so sorting by flag always yields "No Promotion" first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PromotionFlag {
    #[serde(rename = "No Promotion")]
    NoPromotion,
    #[serde(rename = "Promotion")]
    Promotion,
}

impl PromotionFlag {
    /// The display label used by every chart and table.
    pub fn label(&self) -> &'static str {
        match self {
            PromotionFlag::NoPromotion => "No Promotion",
            PromotionFlag::Promotion => "Promotion",
        }
    }

    pub fn is_promoted(&self) -> bool {
        matches!(self, PromotionFlag::Promotion)
    }
}

impl From<bool> for PromotionFlag {
    fn from(promoted: bool) -> Self {
        if promoted {
            PromotionFlag::Promotion
        } else {
            PromotionFlag::NoPromotion
        }
    }
}

impl FromStr for PromotionFlag {
    type Err = CoreError;

    /// Accepts the 0/1 encoding (also as `0.0`/`1.0`) and `true`/`false`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "0.0" | "false" => Ok(PromotionFlag::NoPromotion),
            "1" | "1.0" | "true" => Ok(PromotionFlag::Promotion),
            other => Err(CoreError::InvalidInput(
                "promotion".to_string(),
                format!("expected 0 or 1, got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for PromotionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The categorical columns a summary table can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    ShelfLevel,
    StoreId,
    Category,
}

impl GroupKey {
    /// The source column name for this key.
    pub fn column(&self) -> &'static str {
        match self {
            GroupKey::ShelfLevel => "shelf_level",
            GroupKey::StoreId => "store_id",
            GroupKey::Category => "category",
        }
    }

    /// Extracts this key's value from a record.
    pub fn value_of<'a>(&self, record: &'a SalesRecord) -> &'a str {
        match self {
            GroupKey::ShelfLevel => &record.shelf_level,
            GroupKey::StoreId => &record.store_id,
            GroupKey::Category => &record.category,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The numeric columns that can be averaged or plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    UnitsSold,
    Revenue,
    Price,
    FootTraffic,
}

impl NumericField {
    pub fn column(&self) -> &'static str {
        match self {
            NumericField::UnitsSold => "units_sold",
            NumericField::Revenue => "revenue",
            NumericField::Price => "price",
            NumericField::FootTraffic => "foot_traffic",
        }
    }

    /// Extracts this field's value from a record as a `Decimal`.
    pub fn value_of(&self, record: &SalesRecord) -> Decimal {
        match self {
            NumericField::UnitsSold => Decimal::from(record.units_sold),
            NumericField::Revenue => record.revenue,
            NumericField::Price => record.price,
            NumericField::FootTraffic => Decimal::from(record.foot_traffic),
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
