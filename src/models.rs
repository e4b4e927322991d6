//! Data models for the sales report.
//!
//! The `models` module defines the serialisable records the report
//! engine consumes (sellers, products and purchase records) and the
//! rows it produces.  These data types derive `Serialize` and
//! `Deserialize` so that they can be loaded from JSON files or
//! received over HTTP without any intermediate representation.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A seller taking part in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Unique seller identifier.  Numeric identifiers in the source
    /// data are accepted and stored in their decimal string form; a
    /// missing or null identifier is stored as `""`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
    /// Job title or similar.  Carried through but not used by the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Seller {
    /// First and last name joined by a space.  Missing parts are dropped
    /// rather than leaving a dangling separator.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A catalog product with its cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stock keeping unit; unique across the catalog.
    #[serde(default, deserialize_with = "lenient_string")]
    pub sku: String,
    /// Price the shop paid per unit.  NaN when the source value is
    /// missing or not a number.
    #[serde(default = "not_a_number", deserialize_with = "lenient_number")]
    pub purchase_price: f64,
    /// Catalog list price, if the source data carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A single line item of a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sku: String,
    /// Number of units sold; zero when absent.  Negative quantities are
    /// rejected at deserialisation time.
    #[serde(default)]
    pub quantity: u64,
    /// Discount in percent (`0..=100`).  Absent or null means no discount.
    #[serde(default, deserialize_with = "discount_percent")]
    pub discount: f64,
    /// Unit price the customer was charged before the discount.
    #[serde(default = "not_a_number", deserialize_with = "lenient_number")]
    pub sale_price: f64,
}

/// One transaction by a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Records whose seller id is missing, null or unknown are skipped.
    #[serde(default, deserialize_with = "lenient_string")]
    pub seller_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Amount the customer paid for the whole receipt.  This is what
    /// feeds a seller's revenue.
    #[serde(default = "not_a_number", deserialize_with = "lenient_number")]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<f64>,
    #[serde(default)]
    pub items: Vec<PurchaseItem>,
}

/// Input to the report engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesData {
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

/// A product together with the number of units a seller sold of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: u64,
}

/// The report line for a single seller.
///
/// Monetary fields are always finite and rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub seller_id: String,
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    pub sales_count: u64,
    pub top_products: Vec<TopProduct>,
    pub bonus: f64,
}

/// Strings are kept, integers become their decimal form, anything
/// else (null, booleans, objects) becomes `""`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Other(IgnoredAny),
    }

    Ok(match RawText::deserialize(deserializer)? {
        RawText::Text(s) => s,
        RawText::Signed(n) => n.to_string(),
        RawText::Unsigned(n) => n.to_string(),
        RawText::Other(_) => String::new(),
    })
}

fn not_a_number() -> f64 {
    f64::NAN
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    fn or(self, fallback: f64) -> f64 {
        match self {
            RawNumber::Number(n) => n,
            RawNumber::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            RawNumber::Other(_) => fallback,
        }
    }
}

/// Numbers and numeric strings are kept; anything else becomes NaN and
/// is neutralised when the report is formatted.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumber::deserialize(deserializer)?.or(f64::NAN))
}

fn discount_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumber::deserialize(deserializer)?.or(0.0))
}
