//! End-to-end checks of the report on hand-built data sets.

use sales_report::models::{Product, PurchaseItem, PurchaseRecord, SalesData, Seller, TopProduct};
use sales_report::stats::SellerStat;
use sales_report::{analyze_sales_data, AnalysisError, AnalysisOptions, SimpleRevenue};
use std::collections::HashSet;

fn seller(id: &str) -> Seller {
    Seller {
        id: id.to_string(),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        position: None,
    }
}

fn product(sku: &str, purchase_price: f64) -> Product {
    Product {
        sku: sku.to_string(),
        purchase_price,
        sale_price: None,
        name: None,
        category: None,
    }
}

fn item(sku: &str, quantity: u64, discount: f64, sale_price: f64) -> PurchaseItem {
    PurchaseItem {
        sku: sku.to_string(),
        quantity,
        discount,
        sale_price,
    }
}

fn record(seller_id: &str, items: Vec<PurchaseItem>) -> PurchaseRecord {
    let total_amount = items
        .iter()
        .map(|i| i.sale_price * i.quantity as f64 * (1.0 - i.discount / 100.0))
        .sum();
    PurchaseRecord {
        receipt_id: None,
        date: None,
        seller_id: seller_id.to_string(),
        customer_id: None,
        total_amount,
        total_discount: None,
        items,
    }
}

/// Six sellers with distinct profits, twelve products, and a record
/// for a seller that does not exist.
fn shop() -> SalesData {
    let sellers = (1..=6).map(|n| seller(&format!("s{n}"))).collect();
    let products = (0..12).map(|n| product(&format!("P{n}"), 1.0)).collect();
    let mut purchase_records = Vec::new();
    for n in 1..=6u64 {
        let items = (0..12u64)
            .map(|p| item(&format!("P{p}"), n + p, 10.0, 2.0 + n as f64))
            .collect();
        purchase_records.push(record(&format!("s{n}"), items));
        purchase_records.push(record(&format!("s{n}"), vec![item("P0", 1, 0.0, 3.0)]));
    }
    purchase_records.push(record("ghost", vec![item("P0", 1000, 0.0, 1000.0)]));
    SalesData {
        sellers,
        products,
        purchase_records,
    }
}

#[test]
fn one_row_per_seller() {
    let data = shop();
    let report = analyze_sales_data(&data, &AnalysisOptions::reference()).unwrap();
    assert_eq!(report.len(), data.sellers.len());
    let ids: HashSet<_> = report.iter().map(|row| row.seller_id.clone()).collect();
    let expected: HashSet<_> = data.sellers.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn sorted_by_profit_descending() {
    let report = analyze_sales_data(&shop(), &AnalysisOptions::reference()).unwrap();
    assert!(report.windows(2).all(|w| w[0].profit >= w[1].profit));
    assert_eq!(report[0].seller_id, "s6");
    assert_eq!(report[5].seller_id, "s1");
}

#[test]
fn sales_count_ignores_unknown_sellers() {
    let data = shop();
    let report = analyze_sales_data(&data, &AnalysisOptions::reference()).unwrap();
    let counted: u64 = report.iter().map(|row| row.sales_count).sum();
    assert_eq!(counted, 12);
    assert_eq!(data.purchase_records.len(), 13);
    assert!(report.iter().all(|row| row.sales_count == 2));
}

#[test]
fn bonuses_follow_rank_table() {
    let report = analyze_sales_data(&shop(), &AnalysisOptions::reference()).unwrap();
    let expected_share = [0.15, 0.10, 0.10, 0.05, 0.05, 0.0];
    for (row, share) in report.iter().zip(expected_share) {
        let expected = (row.profit * share * 100.0).round() / 100.0;
        assert!(
            (row.bonus - expected).abs() <= 0.011,
            "{}: bonus {} vs {}",
            row.seller_id,
            row.bonus,
            expected
        );
    }
    assert_eq!(report[5].bonus, 0.0);
}

#[test]
fn top_products_capped_and_sorted() {
    let report = analyze_sales_data(&shop(), &AnalysisOptions::reference()).unwrap();
    for row in &report {
        assert_eq!(row.top_products.len(), 10);
        assert!(row
            .top_products
            .windows(2)
            .all(|w| w[0].quantity >= w[1].quantity));
    }
    let s1 = report.iter().find(|row| row.seller_id == "s1").unwrap();
    assert_eq!(
        s1.top_products[0],
        TopProduct {
            sku: "P11".into(),
            quantity: 12
        }
    );
}

#[test]
fn money_fields_have_two_decimals() {
    let report = analyze_sales_data(&shop(), &AnalysisOptions::reference()).unwrap();
    for row in &report {
        for value in [row.revenue, row.profit, row.bonus] {
            assert!(value.is_finite());
            assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-6);
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let data = shop();
    let options = AnalysisOptions::reference();
    let first = analyze_sales_data(&data, &options).unwrap();
    let second = analyze_sales_data(&data, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn single_seller_scenario() {
    let data = SalesData {
        sellers: vec![seller("only")],
        products: vec![product("SKU", 10.0)],
        purchase_records: vec![record("only", vec![item("SKU", 2, 0.0, 15.0)])],
    };
    let report = analyze_sales_data(&data, &AnalysisOptions::reference()).unwrap();
    assert_eq!(report.len(), 1);
    let row = &report[0];
    assert_eq!(row.seller_id, "only");
    assert_eq!(row.name, "Firstonly Lastonly");
    assert_eq!(row.revenue, 30.0);
    assert_eq!(row.profit, 10.0);
    assert_eq!(row.bonus, 0.0);
    assert_eq!(row.sales_count, 1);
    assert_eq!(
        row.top_products,
        vec![TopProduct {
            sku: "SKU".into(),
            quantity: 2
        }]
    );
}

#[test]
fn empty_sellers_is_invalid_input() {
    let mut data = shop();
    data.sellers.clear();
    let err = analyze_sales_data(&data, &AnalysisOptions::reference()).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidInput(_)));
}

#[test]
fn missing_bonus_strategy() {
    let options = AnalysisOptions::new().with_revenue(SimpleRevenue);
    let err = analyze_sales_data(&shop(), &options).unwrap_err();
    assert_eq!(err, AnalysisError::MissingStrategy("calculate_bonus"));
}

#[test]
fn unknown_seller_record_is_skipped() {
    let base = SalesData {
        sellers: vec![seller("a"), seller("b")],
        products: vec![product("SKU", 1.0)],
        purchase_records: vec![record("a", vec![item("SKU", 3, 0.0, 2.0)])],
    };
    let mut with_ghost = base.clone();
    with_ghost
        .purchase_records
        .push(record("nobody", vec![item("SKU", 50, 0.0, 100.0)]));

    let options = AnalysisOptions::reference();
    let expected = analyze_sales_data(&base, &options).unwrap();
    let actual = analyze_sales_data(&with_ghost, &options).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn custom_strategies_are_used() {
    let options = AnalysisOptions::new()
        .with_revenue(|item: &PurchaseItem, _: &Product| item.quantity as f64 * 100.0)
        .with_bonus(|_: usize, _: usize, stat: &SellerStat| stat.sales_count() as f64);
    let data = SalesData {
        sellers: vec![seller("a")],
        products: vec![product("SKU", 1.0)],
        purchase_records: vec![
            record("a", vec![item("SKU", 1, 0.0, 2.0)]),
            record("a", vec![item("SKU", 1, 0.0, 2.0)]),
        ],
    };
    let report = analyze_sales_data(&data, &options).unwrap();
    assert_eq!(report[0].profit, 198.0);
    assert_eq!(report[0].bonus, 2.0);
}
