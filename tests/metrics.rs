//! Key-metric derivation from provider-shaped company records.

use proptest::prelude::*;
use serde_json::json;
use tickerlens::prelude::*;

fn metrics(value: serde_json::Value) -> KeyMetrics {
    derive_key_metrics(&CompanyInfo::from_json(value))
}

#[test]
fn test_full_record() {
    let m = metrics(json!({
        "longName": "Apple Inc.",
        "marketCap": 2_500_000_000u64,
        "trailingPE": 28.456,
        "trailingEps": 6.13,
        "totalRevenue": 383_290_000_000u64,
        "fiftyTwoWeekHigh": 199.62,
        "fiftyTwoWeekLow": 164.08,
        "volume": 45_123_456,
        "dividendYield": 0.0275
    }));

    assert_eq!(m.get(MetricLabel::MarketCap), "$2.50B");
    assert_eq!(m.get(MetricLabel::PeRatio), "28.46");
    assert_eq!(m.get(MetricLabel::Eps), "$6.13");
    assert_eq!(m.get(MetricLabel::Revenue), "$383.29B");
    assert_eq!(m.get(MetricLabel::FiftyTwoWeekHigh), "$199.62");
    assert_eq!(m.get(MetricLabel::FiftyTwoWeekLow), "$164.08");
    assert_eq!(m.get(MetricLabel::Volume), "45,123,456");
    assert_eq!(m.get(MetricLabel::DividendYield), "2.75%");
}

#[test]
fn test_empty_record_is_all_missing() {
    let m = metrics(json!({}));
    assert_eq!(m.len(), 8);
    assert!(m.iter().all(|(_, value)| value == "N/A"));
}

#[test]
fn test_malformed_fields_only_blank_themselves() {
    let m = metrics(json!({
        "marketCap": "lots",
        "trailingPE": null,
        "trailingEps": {"value": 1},
        "totalRevenue": 12_340_000,
        "volume": "1500"
    }));

    assert_eq!(m.get(MetricLabel::MarketCap), "N/A");
    assert_eq!(m.get(MetricLabel::PeRatio), "N/A");
    assert_eq!(m.get(MetricLabel::Eps), "N/A");
    assert_eq!(m.get(MetricLabel::Revenue), "$12.34M");
    assert_eq!(m.get(MetricLabel::Volume), "1,500");
}

#[test]
fn test_zero_ratio_fields_show_missing() {
    let m = metrics(json!({ "trailingPE": 0, "trailingEps": 0.0, "dividendYield": 0 }));
    assert_eq!(m.get(MetricLabel::PeRatio), "N/A");
    assert_eq!(m.get(MetricLabel::Eps), "N/A");
    assert_eq!(m.get(MetricLabel::DividendYield), "0.00%");
}

#[test]
fn test_unknown_keys_are_ignored() {
    let m = metrics(json!({ "marketCap": 5_000_000, "currency": "USD", "beta": 1.2 }));
    assert_eq!(m.get(MetricLabel::MarketCap), "$5.00M");
}

#[test]
fn test_serializes_in_display_order() {
    let m = metrics(json!({ "marketCap": 1_000_000_000u64 }));
    let json = serde_json::to_string(&m).unwrap();
    assert!(json.starts_with(r#"{"Market Cap":"$1.00B","P/E Ratio":"N/A","EPS":"N/A","Revenue""#));
    assert!(json.ends_with(r#""Dividend Yield":"N/A"}"#));
}

#[test]
fn test_formatter_currency_flows_through() {
    let info = CompanyInfo::from_json(json!({ "fiftyTwoWeekHigh": 10, "trailingEps": 2 }));
    let m = MetricsFormatter::new("€").derive(&info);
    assert_eq!(m.get(MetricLabel::FiftyTwoWeekHigh), "€10.00");
    assert_eq!(m.get(MetricLabel::Eps), "€2.00");
}

fn arb_field() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        (-1e12f64..1e12).prop_map(serde_json::Value::from),
        "[a-z0-9.]{0,8}".prop_map(serde_json::Value::from),
    ]
}

proptest! {
    #[test]
    fn prop_derivation_is_total_and_stable(
        cap in arb_field(),
        pe in arb_field(),
        eps in arb_field(),
        volume in arb_field(),
    ) {
        let record = json!({
            "marketCap": cap,
            "trailingPE": pe,
            "trailingEps": eps,
            "volume": volume,
        });
        let first = metrics(record.clone());
        let second = metrics(record);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.iter().count(), 8);
        prop_assert!(first.iter().all(|(_, v)| !v.is_empty()));
    }
}
