//! Sales report computation engine.
//!
//! The `engine` module turns a [`SalesData`] into one [`ReportRow`] per
//! seller.  The work happens in a fixed sequence of stages:
//!
//! 1. validate the input collections,
//! 2. resolve the revenue and bonus strategies from [`AnalysisOptions`],
//! 3. index sellers and products and fold every purchase record into
//!    the owning seller's [`SellerStat`],
//! 4. rank sellers by profit and compute bonuses and top products,
//! 5. normalise the numbers and project the output rows.
//!
//! Records naming an unknown seller and items naming an unknown SKU
//! are skipped without error.  An empty seller id or SKU never matches
//! anything.  The whole computation runs on the calling thread.

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{Product, ReportRow, SalesData};
use crate::rounding::round_money;
use crate::stats::{RankedSeller, SellerStat};
use crate::strategy::{AnalysisOptions, Strategies};
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

const COLLECTIONS: [&str; 3] = ["sellers", "products", "purchase_records"];

/// Builds the seller report for `data` using the strategies in `options`.
///
/// Fails with [`AnalysisError::InvalidInput`] when any input collection
/// is empty or two sellers share an id, and with
/// [`AnalysisError::MissingStrategy`] when a strategy is absent.  Both
/// checks happen before any aggregation.
pub fn analyze_sales_data(
    data: &SalesData,
    options: &AnalysisOptions,
) -> AnalysisResult<Vec<ReportRow>> {
    validate_input(data)?;
    let strategies = options.resolve()?;

    let stats = aggregate(data, strategies);
    let ranked = rank_sellers(stats, strategies);
    let report = format_report(&ranked);

    info!(
        sellers = report.len(),
        purchase_records = data.purchase_records.len(),
        "sales report computed"
    );
    Ok(report)
}

/// Like [`analyze_sales_data`] but accepts untyped JSON.
///
/// Null or non-object input, a missing or non-array collection, and
/// entries that are not objects are reported as
/// [`AnalysisError::InvalidInput`].  Missing or null fields inside an
/// entry are not: ids fall back to `""` and amounts to NaN, which the
/// formatter turns into `0`.
pub fn analyze_json(input: &Value, options: &AnalysisOptions) -> AnalysisResult<Vec<ReportRow>> {
    let object = match input {
        Value::Null => return Err(AnalysisError::InvalidInput("input is null".into())),
        Value::Object(object) => object,
        _ => {
            return Err(AnalysisError::InvalidInput(
                "input must be a JSON object".into(),
            ))
        }
    };
    for name in COLLECTIONS {
        match object.get(name) {
            None | Some(Value::Null) => {
                return Err(AnalysisError::InvalidInput(format!("`{name}` is missing")))
            }
            Some(Value::Array(items)) if items.is_empty() => {
                return Err(AnalysisError::InvalidInput(format!("`{name}` is empty")))
            }
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(AnalysisError::InvalidInput(format!(
                    "`{name}` must be an array"
                )))
            }
        }
    }
    let data = SalesData::deserialize(input)
        .map_err(|err| AnalysisError::InvalidInput(err.to_string()))?;
    analyze_sales_data(&data, options)
}

fn validate_input(data: &SalesData) -> AnalysisResult<()> {
    let lengths = [
        data.sellers.len(),
        data.products.len(),
        data.purchase_records.len(),
    ];
    for (name, len) in COLLECTIONS.iter().zip(lengths) {
        if len == 0 {
            return Err(AnalysisError::InvalidInput(format!("`{name}` is empty")));
        }
    }
    let mut seen = HashSet::with_capacity(data.sellers.len());
    if let Some(seller) = data.sellers.iter().find(|s| !seen.insert(s.id.as_str())) {
        return Err(AnalysisError::InvalidInput(format!(
            "duplicate seller id `{}`",
            seller.id
        )));
    }
    Ok(())
}

/// Folds every purchase record into its seller's running totals.
/// Returned stats are in input seller order.
fn aggregate(data: &SalesData, strategies: Strategies<'_>) -> Vec<SellerStat> {
    let mut stats: Vec<SellerStat> = data.sellers.iter().map(SellerStat::new).collect();
    let seller_index: HashMap<&str, usize> = data
        .sellers
        .iter()
        .enumerate()
        .filter(|(_, seller)| !seller.id.is_empty())
        .map(|(slot, seller)| (seller.id.as_str(), slot))
        .collect();
    let product_index: HashMap<&str, &Product> = data
        .products
        .iter()
        .filter(|product| !product.sku.is_empty())
        .map(|product| (product.sku.as_str(), product))
        .collect();

    for record in &data.purchase_records {
        let Some(&slot) = seller_index.get(record.seller_id.as_str()) else {
            debug!(
                seller_id = %record.seller_id,
                receipt_id = ?record.receipt_id,
                "skipping purchase record for unknown seller"
            );
            continue;
        };
        let stat = &mut stats[slot];
        stat.record_sale(record.total_amount);

        for item in &record.items {
            let Some(product) = product_index.get(item.sku.as_str()) else {
                debug!(
                    sku = %item.sku,
                    receipt_id = ?record.receipt_id,
                    "skipping line item for unknown product"
                );
                continue;
            };
            let cost = product.purchase_price * item.quantity as f64;
            let revenue = strategies.revenue.revenue(item, product);
            stat.record_item(&item.sku, item.quantity, revenue - cost);
        }
    }
    stats
}

/// NaN profits rank below every number.
fn profit_key(stat: &SellerStat) -> f64 {
    let profit = stat.profit();
    if profit.is_nan() {
        f64::NEG_INFINITY
    } else {
        profit
    }
}

fn by_profit_desc(a: &SellerStat, b: &SellerStat) -> Ordering {
    profit_key(b).total_cmp(&profit_key(a))
}

/// Sorts by profit (highest first, ties in input order) and attaches
/// bonuses and top products.
fn rank_sellers(mut stats: Vec<SellerStat>, strategies: Strategies<'_>) -> Vec<RankedSeller> {
    stats.sort_by(by_profit_desc);
    let total = stats.len();
    stats
        .into_iter()
        .enumerate()
        .map(|(rank, stat)| {
            let bonus = strategies.bonus.bonus(rank, total, &stat);
            RankedSeller::new(stat, bonus)
        })
        .collect()
}

fn format_report(ranked: &[RankedSeller]) -> Vec<ReportRow> {
    ranked
        .iter()
        .map(|seller| {
            let stat = seller.stat();
            ReportRow {
                seller_id: stat.id().to_string(),
                name: stat.name().to_string(),
                revenue: round_money(stat.revenue()),
                profit: round_money(stat.profit()),
                sales_count: stat.sales_count(),
                top_products: seller.top_products().to_vec(),
                bonus: round_money(seller.bonus()),
            }
        })
        .collect()
}
