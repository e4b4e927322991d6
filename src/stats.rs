//! Per-seller working state.
//!
//! A [`SellerStat`] is created for every seller before the purchase
//! records are folded in and can only be mutated from inside this
//! crate.  Once ranking is done it is moved into a [`RankedSeller`],
//! which exposes read-only accessors and nothing else.

use crate::models::{Seller, TopProduct};
use std::collections::HashMap;

/// Maximum number of entries in a seller's top products list.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Running totals for one seller.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStat {
    id: String,
    name: String,
    revenue: f64,
    profit: f64,
    sales_count: u64,
    /// Quantities in the order each SKU was first sold.
    products_sold: Vec<(String, u64)>,
    sku_slots: HashMap<String, usize>,
}

impl SellerStat {
    pub(crate) fn new(seller: &Seller) -> Self {
        Self {
            id: seller.id.clone(),
            name: seller.display_name(),
            revenue: 0.0,
            profit: 0.0,
            sales_count: 0,
            products_sold: Vec::new(),
            sku_slots: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn sales_count(&self) -> u64 {
        self.sales_count
    }

    /// Records one purchase record attributed to this seller.
    pub(crate) fn record_sale(&mut self, total_amount: f64) {
        self.sales_count += 1;
        self.revenue += total_amount;
    }

    /// Adds one line item's profit and quantity.
    pub(crate) fn record_item(&mut self, sku: &str, quantity: u64, profit: f64) {
        self.profit += profit;
        match self.sku_slots.get(sku) {
            Some(&slot) => self.products_sold[slot].1 += quantity,
            None => {
                self.sku_slots.insert(sku.to_string(), self.products_sold.len());
                self.products_sold.push((sku.to_string(), quantity));
            }
        }
    }

    /// Best sellers by quantity, highest first.  Equal quantities keep
    /// the order in which the SKUs were first sold.
    pub fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        let mut products: Vec<TopProduct> = self
            .products_sold
            .iter()
            .map(|(sku, quantity)| TopProduct {
                sku: sku.clone(),
                quantity: *quantity,
            })
            .collect();
        // sort_by is stable
        products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        products.truncate(limit);
        products
    }
}

/// A seller after ranking.  Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSeller {
    stat: SellerStat,
    bonus: f64,
    top_products: Vec<TopProduct>,
}

impl RankedSeller {
    pub(crate) fn new(stat: SellerStat, bonus: f64) -> Self {
        let top_products = stat.top_products(TOP_PRODUCTS_LIMIT);
        Self {
            stat,
            bonus,
            top_products,
        }
    }

    pub fn stat(&self) -> &SellerStat {
        &self.stat
    }

    pub fn bonus(&self) -> f64 {
        self.bonus
    }

    pub fn top_products(&self) -> &[TopProduct] {
        &self.top_products
    }
}
