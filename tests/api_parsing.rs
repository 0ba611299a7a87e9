use econ_mcp::models::{self, Entry, ValueField};
use econ_mcp::tools::{CountryYearArgs, decode_args};
use econ_mcp::tools::inflation::InflationArgs;

#[test]
fn parse_sample_json() {
    let sample = r#"
    [
      {"page":1,"pages":1,"per_page":"50","total":1,"sourceid":"2","lastupdated":"2024-06-28"},
      [
        {
          "indicator":{"id":"NY.GDP.MKTP.CD","value":"GDP (current US$)"},
          "country":{"id":"US","value":"United States"},
          "countryiso3code":"USA",
          "date":"2020",
          "value":21060473613000,
          "unit":"",
          "obs_status":"",
          "decimal":0
        }
      ]
    ]
    "#;

    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    let raw = models::first_record(&v).unwrap();
    let entry: Entry = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(entry.country_name(), Some("United States"));
    assert_eq!(entry.indicator_id(), Some("NY.GDP.MKTP.CD"));
    assert_eq!(entry.indicator_name(), Some("GDP (current US$)"));
    assert_eq!(entry.countryiso3code.as_deref(), Some("USA"));
    assert_eq!(entry.value_field(), ValueField::Number(21_060_473_613_000.0));
}

#[test]
fn error_payload_has_no_record() {
    // What the API answers for an unknown country code.
    let sample = r#"[{"message":[{"id":"120","key":"Invalid value","value":"The provided parameter value is not valid"}]}]"#;
    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    assert!(models::first_record(&v).is_none());
}

#[test]
fn entry_without_metadata_still_parses() {
    let e: Entry = serde_json::from_str(r#"{"value":"12.25"}"#).unwrap();
    assert_eq!(e.country_name(), None);
    assert_eq!(e.value_field(), ValueField::Number(12.25));
}

#[test]
fn fred_observations_ignore_malformed_entries() {
    let body = serde_json::json!({
        "observations": [
            {"date": "2019-01-01", "value": "1.81"},
            42,
            {"date": "2020-01-01", "value": "."}
        ]
    });
    let obs = models::observations(&body);
    assert_eq!(obs.len(), 2);
    assert!(obs[0].has_value());
    assert!(!obs[1].has_value());
    assert!(models::observations(&serde_json::json!({"error_code": 400})).is_empty());
}

#[test]
fn year_argument_accepts_number_or_string() {
    let a: CountryYearArgs = decode_args(serde_json::json!({"country": "US", "year": 2020})).unwrap();
    assert_eq!(a.year, 2020);
    let a: CountryYearArgs = decode_args(serde_json::json!({"country": "US", "year": " 2020 "})).unwrap();
    assert_eq!(a.year, 2020);
    assert!(decode_args::<CountryYearArgs>(serde_json::json!({"country": "US", "year": "twenty"})).is_err());

    let i: InflationArgs = decode_args(serde_json::json!({})).unwrap();
    assert_eq!(i.year, None);
    let i: InflationArgs = decode_args(serde_json::json!({"year": null})).unwrap();
    assert_eq!(i.year, None);
    let i: InflationArgs = decode_args(serde_json::Value::Null).unwrap();
    assert_eq!(i.year, None);
    let i: InflationArgs = decode_args(serde_json::json!({"year": "2021"})).unwrap();
    assert_eq!(i.year, Some(2021));
}
