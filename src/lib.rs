//! Sales report library crate.
//!
//! This crate exposes the seller performance report engine and API
//! components as reusable modules.  External applications may depend
//! on the `sales_report` crate and call `engine::analyze_sales_data`
//! directly, plugging in their own strategies through
//! `strategy::AnalysisOptions`, or embed the API via `api::build_router`.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod models;
pub mod rounding;
pub mod stats;
pub mod strategy;

pub use engine::{analyze_json, analyze_sales_data};
pub use error::{AnalysisError, AnalysisResult};
pub use strategy::{
    AnalysisOptions, BonusCalculator, ProfitRankBonus, RevenueCalculator, SimpleRevenue,
};
