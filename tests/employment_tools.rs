mod common;

use common::{args, wb_body, wb_empty, wb_path, world_bank};
use econ_mcp::ToolOutput;
use econ_mcp::error::ToolError;
use econ_mcp::tools::employment::{SECTOR_INDICATORS, get_employment};
use econ_mcp::tools::extended::{EXTENDED_INDICATORS, get_employment_extended, is_failure};
use econ_mcp::tools::snapshot::get_economic_snapshot;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_value(server: &MockServer, indicator: &str, value: f64) {
    Mock::given(method("GET"))
        .and(path(wb_path("US", indicator)))
        .respond_with(ResponseTemplate::new(200).set_body_json(wb_body(indicator, indicator, 2020, json!(value))))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, indicator: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(wb_path("US", indicator)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn employment_returns_raw_records_by_sector() {
    let server = MockServer::start().await;
    for (i, indicator) in SECTOR_INDICATORS.iter().enumerate() {
        mount_value(&server, indicator, 10.0 + i as f64).await;
    }

    let out = ToolOutput::from_result(get_employment(&world_bank(&server.uri()), &args("US", 2020)).await);
    assert!(!out.is_error);
    let v = out.value;
    assert_eq!(v["employment-to-population-ratio"]["indicator"]["id"], "SL.EMP.TOTL.SP.ZS");
    assert_eq!(v["employment-to-population-ratio"]["value"], 10.0);
    assert_eq!(v["employment"]["agriculture"]["value"], 11.0);
    assert_eq!(v["employment"]["industry"]["value"], 12.0);
    assert_eq!(v["employment"]["services"]["value"], 13.0);
    assert_eq!(v["employment"]["services"]["country"]["value"], "United States");
}

#[tokio::test]
async fn employment_stops_at_first_failure() {
    let server = MockServer::start().await;
    mount_value(&server, SECTOR_INDICATORS[0], 60.0).await;
    mount_status(&server, SECTOR_INDICATORS[1], 404).await;
    for indicator in &SECTOR_INDICATORS[2..] {
        Mock::given(path(wb_path("US", indicator)))
            .respond_with(ResponseTemplate::new(200).set_body_json(wb_empty()))
            .expect(0)
            .mount(&server)
            .await;
    }

    let err = get_employment(&world_bank(&server.uri()), &args("US", 2020)).await.unwrap_err();
    assert_eq!(
        err.to_value(),
        json!({
            "error": "World Bank request failed: HTTP 404",
            "api": format!("{}/country/US/indicator/SL.AGR.EMPL.ZS?date=2020:2020&format=json", server.uri())
        })
    );
}

#[tokio::test]
async fn employment_missing_value_names_the_indicator() {
    let server = MockServer::start().await;
    mount_value(&server, SECTOR_INDICATORS[0], 60.0).await;
    mount_value(&server, SECTOR_INDICATORS[1], 1.5).await;
    Mock::given(path(wb_path("US", SECTOR_INDICATORS[2])))
        .respond_with(ResponseTemplate::new(200).set_body_json(wb_empty()))
        .mount(&server)
        .await;

    let err = get_employment(&world_bank(&server.uri()), &args("US", 2020)).await.unwrap_err();
    let v = err.to_value();
    assert_eq!(v["message"], "No employment value found for US in 2020.");
    assert_eq!(v["indicator"], "SL.IND.EMPL.ZS");
    assert_eq!(v["countryCode"], "US");
    assert_eq!(v["year"], 2020);
}

#[tokio::test]
async fn employment_validates_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;
    let client = world_bank(&server.uri());

    assert!(matches!(
        get_employment(&client, &args("USAX", 2020)).await,
        Err(ToolError::Validation(_))
    ));
    assert!(matches!(
        get_employment_extended(&client, &args("US", 3000)).await,
        Err(ToolError::Validation(_))
    ));
    assert!(matches!(
        get_economic_snapshot(&client, &args("U", 2020)).await,
        Err(ToolError::Validation(_))
    ));
}

#[tokio::test]
async fn extended_tolerates_partial_failure() {
    let server = MockServer::start().await;
    let failing = ["SL.UEM.1524.ZS", "SL.TLF.TOTL.IN", "SL.FAM.WORK.ZS"];
    for (i, ind) in EXTENDED_INDICATORS.iter().enumerate() {
        if failing.contains(&ind.code) {
            mount_status(&server, ind.code, 500).await;
        } else {
            mount_value(&server, ind.code, i as f64 + 0.5).await;
        }
    }

    let result = get_employment_extended(&world_bank(&server.uri()), &args("US", 2020))
        .await
        .unwrap();

    assert_eq!(result.country, "United States");
    assert_eq!(result.country_code, "US");
    assert_eq!(result.raw.len(), 14);
    assert_eq!(result.reported(), 11);

    let failures: Vec<_> = result.raw.iter().filter(|r| is_failure(r)).collect();
    assert_eq!(failures.len(), 3);
    for f in &failures {
        assert!(failing.contains(&f["indicator"].as_str().unwrap()));
        assert_eq!(f["error"], "World Bank request failed: HTTP 500");
    }

    // Values land on their semantic keys (value = declared position + 0.5).
    assert_eq!(result.employment_to_population_ratio, Some(0.5));
    assert_eq!(result.employment_percent.agriculture, Some(1.5));
    assert_eq!(result.employment_percent.industry, Some(2.5));
    assert_eq!(result.employment_percent.services, Some(3.5));
    assert_eq!(result.unemployment_percent.total, Some(4.5));
    assert_eq!(result.unemployment_percent.youth, None);
    assert_eq!(result.labor_force.participation_rate, Some(6.5));
    assert_eq!(result.labor_force.participation_rate_female, Some(7.5));
    assert_eq!(result.labor_force.participation_rate_male, Some(8.5));
    assert_eq!(result.labor_force.total, None);
    assert_eq!(result.status_in_employment_percent.vulnerable, Some(10.5));
    assert_eq!(result.status_in_employment_percent.self_employed, Some(11.5));
    assert_eq!(result.status_in_employment_percent.wage_and_salaried, Some(12.5));
    assert_eq!(result.status_in_employment_percent.contributing_family, None);

    // Raw list follows declared indicator order regardless of completion order.
    for (raw, ind) in result.raw.iter().zip(EXTENDED_INDICATORS.iter()) {
        let code = if is_failure(raw) {
            raw["indicator"].as_str().unwrap().to_string()
        } else {
            raw["indicator"]["id"].as_str().unwrap().to_string()
        };
        assert_eq!(code, ind.code);
    }

    let v = ToolOutput::from_result(Ok::<_, ToolError>(result)).value;
    assert_eq!(v["employment_percent"]["agriculture"], 1.5);
    assert!(v["unemployment_percent"]["youth"].is_null());
}

#[tokio::test]
async fn extended_with_nothing_available_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(wb_empty()))
        .expect(14)
        .mount(&server)
        .await;

    let out = ToolOutput::from_result(get_employment_extended(&world_bank(&server.uri()), &args("us", 2020)).await);
    assert!(!out.is_error);
    assert_eq!(out.value["country"], "US");
    let raw = out.value["raw"].as_array().unwrap();
    assert_eq!(raw.len(), 14);
    assert!(raw.iter().all(|r| r.get("message").is_some()));
    assert!(out.value["employment_to_population_ratio"].is_null());
}

#[tokio::test]
async fn extended_output_is_deterministic() {
    let server = MockServer::start().await;
    for (i, ind) in EXTENDED_INDICATORS.iter().enumerate() {
        if i % 4 == 0 {
            mount_status(&server, ind.code, 404).await;
        } else {
            mount_value(&server, ind.code, i as f64).await;
        }
    }
    let client = world_bank(&server.uri());

    let once = serde_json::to_string(&ToolOutput::from_result(get_employment_extended(&client, &args("US", 2020)).await).value).unwrap();
    let twice = serde_json::to_string(&ToolOutput::from_result(get_employment_extended(&client, &args("US", 2020)).await).value).unwrap();
    assert_eq!(once, twice);
}

#[tokio::test]
async fn snapshot_keeps_gdp_when_employment_is_missing() {
    let server = MockServer::start().await;
    mount_value(&server, "NY.GDP.MKTP.CD", 2.1e13).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(wb_empty()))
        .mount(&server)
        .await;

    let out = ToolOutput::from_result(get_economic_snapshot(&world_bank(&server.uri()), &args("US", 2020)).await);
    assert!(!out.is_error);
    assert_eq!(out.value["countryCode"], "US");
    assert_eq!(out.value["gdp"]["valueUSD"], 2.1e13);
    assert_eq!(out.value["employment"]["message"], "No employment value found for US in 2020.");
    assert_eq!(out.value["employment"]["indicator"], "SL.EMP.TOTL.SP.ZS");
}

#[tokio::test]
async fn extended_maps_late_answers_to_their_own_slot() {
    let server = MockServer::start().await;
    for (i, ind) in EXTENDED_INDICATORS.iter().enumerate() {
        // Earlier indicators answer last.
        let delay = std::time::Duration::from_millis(10 * (EXTENDED_INDICATORS.len() - i) as u64);
        Mock::given(path(wb_path("US", ind.code)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(wb_body(ind.code, "x", 2020, json!(i as f64)))
                    .set_delay(delay),
            )
            .mount(&server)
            .await;
    }

    let result = get_employment_extended(&world_bank(&server.uri()), &args("US", 2020))
        .await
        .unwrap();
    assert_eq!(result.reported(), 14);
    assert_eq!(result.employment_to_population_ratio, Some(0.0));
    assert_eq!(result.status_in_employment_percent.contributing_family, Some(13.0));
    assert_eq!(result.raw[0]["indicator"]["id"], EXTENDED_INDICATORS[0].code);
}
