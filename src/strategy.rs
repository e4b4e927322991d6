//! Calculation strategies.
//!
//! The report engine is generic over two pieces of arithmetic: how
//! much revenue a line item brought in and how large a seller's bonus
//! is given their rank.  Each is a trait so callers can plug in their
//! own policy; plain closures implement both traits, and
//! [`SimpleRevenue`] / [`ProfitRankBonus`] provide the reference
//! behaviour.

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{Product, PurchaseItem};
use crate::stats::SellerStat;
use std::sync::Arc;

/// Computes the revenue of a single line item.
///
/// Implementations should be pure; the engine calls them once per line
/// item, in input order, on the calling thread.
pub trait RevenueCalculator {
    fn revenue(&self, item: &PurchaseItem, product: &Product) -> f64;
}

/// Computes a seller's bonus from their position in the profit ranking.
///
/// `rank` is zero-based and `total` is the number of ranked sellers
/// (always at least one).  Called once per seller after ranking.
pub trait BonusCalculator {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStat) -> f64;
}

impl<F> RevenueCalculator for F
where
    F: Fn(&PurchaseItem, &Product) -> f64,
{
    fn revenue(&self, item: &PurchaseItem, product: &Product) -> f64 {
        self(item, product)
    }
}

impl<F> BonusCalculator for F
where
    F: Fn(usize, usize, &SellerStat) -> f64,
{
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStat) -> f64 {
        self(rank, total, seller)
    }
}

/// `sale_price × quantity × (1 − discount / 100)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenueCalculator for SimpleRevenue {
    fn revenue(&self, item: &PurchaseItem, _product: &Product) -> f64 {
        let discount = 1.0 - item.discount / 100.0;
        item.sale_price * item.quantity as f64 * discount
    }
}

/// Rank table bonus.
///
/// | rank          | share of profit |
/// |---------------|-----------------|
/// | last          | 0 %             |
/// | 0             | 15 %            |
/// | 1 and 2       | 10 %            |
/// | anything else | 5 %             |
///
/// The last-rank rule is checked first, so a sole seller (who is both
/// first and last) gets nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfitRankBonus;

impl BonusCalculator for ProfitRankBonus {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStat) -> f64 {
        let profit = seller.profit();
        if rank + 1 == total {
            0.0
        } else if rank == 0 {
            profit * 0.15
        } else if rank <= 2 {
            profit * 0.10
        } else {
            profit * 0.05
        }
    }
}

/// Strategies supplied by the caller.  Both are required; a missing
/// one is reported by [`AnalysisOptions::resolve`].
#[derive(Clone, Default)]
pub struct AnalysisOptions {
    pub calculate_revenue: Option<Arc<dyn RevenueCalculator>>,
    pub calculate_bonus: Option<Arc<dyn BonusCalculator>>,
}

impl AnalysisOptions {
    /// Options with no strategies set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options using [`SimpleRevenue`] and [`ProfitRankBonus`].
    pub fn reference() -> Self {
        Self::new()
            .with_revenue(SimpleRevenue)
            .with_bonus(ProfitRankBonus)
    }

    pub fn with_revenue(mut self, calculator: impl RevenueCalculator + 'static) -> Self {
        self.calculate_revenue = Some(Arc::new(calculator));
        self
    }

    pub fn with_bonus(mut self, calculator: impl BonusCalculator + 'static) -> Self {
        self.calculate_bonus = Some(Arc::new(calculator));
        self
    }

    /// Confirms both strategies are present.
    pub fn resolve(&self) -> AnalysisResult<Strategies<'_>> {
        let revenue = self
            .calculate_revenue
            .as_deref()
            .ok_or(AnalysisError::MissingStrategy("calculate_revenue"))?;
        let bonus = self
            .calculate_bonus
            .as_deref()
            .ok_or(AnalysisError::MissingStrategy("calculate_bonus"))?;
        Ok(Strategies { revenue, bonus })
    }
}

impl std::fmt::Debug for AnalysisOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("calculate_revenue", &self.calculate_revenue.is_some())
            .field("calculate_bonus", &self.calculate_bonus.is_some())
            .finish()
    }
}

/// Both strategies, borrowed from resolved [`AnalysisOptions`].
#[derive(Clone, Copy)]
pub struct Strategies<'a> {
    pub revenue: &'a dyn RevenueCalculator,
    pub bonus: &'a dyn BonusCalculator,
}
