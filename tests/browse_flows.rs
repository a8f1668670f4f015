//! End-to-end pipeline checks: selection → request path → payload
//! classification → rendered report and selector options, over fixture
//! payloads shaped like the live API's.

use capitol::fetch::Dispatcher;
use capitol::http::ApiClient;
use capitol::normalize::{normalize, Normalized};
use capitol::profile::ApiConfig;
use capitol::render::render;
use capitol::request::RequestDescriptor;
use capitol::selection::{BillType, Congress, Selection};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;

fn config() -> ApiConfig {
    ApiConfig::resolve(None, Some("TESTKEY".to_string())).unwrap()
}

fn collection_payload() -> serde_json::Value {
    json!({"bills": [
        {
            "number": "1",
            "title": "T1",
            "congress": 118,
            "type": "HR",
            "originChamber": "House",
            "updateDate": "2024-06-01",
            "latestAction": {"actionDate": "2024-05-20", "text": "Referred to committee."},
            "url": "https://api.congress.gov/v3/bill/118/hr/1?format=json"
        },
        {
            "number": "2",
            "title": "T2",
            "congress": 118,
            "type": "HR",
            "originChamber": "Senate",
            "updateDate": "2024-06-02",
            "latestAction": {"actionDate": "2024-05-21", "text": "Passed House."},
            "url": "https://api.congress.gov/v3/bill/118/hr/2?format=json"
        }
    ]})
}

#[test]
fn congress_level_listing_renders_without_number_options() {
    let selection = Selection::default();
    let descriptor = RequestDescriptor::from_selection(&selection, &config());
    assert_eq!(
        descriptor.url_path().to_string(),
        "/v3/bill/118?format=json&api_key=TESTKEY"
    );

    let report = render(&normalize(&collection_payload()), &selection);
    assert!(report.text.contains("# 1 - T1"));
    assert!(report.text.contains("# 2 - T2"));
    assert!(report.text.contains("**Latest Action**: Referred to committee. (2024-05-20)"));
    assert!(report.options.is_empty());
}

#[test]
fn type_level_listing_populates_number_options() {
    let selection = Selection::default().with_bill_type(Some(BillType::Hr));
    let descriptor = RequestDescriptor::from_selection(&selection, &config());
    assert_eq!(
        descriptor.url_path().to_string(),
        "/v3/bill/118/hr?format=json&api_key=TESTKEY"
    );

    let report = render(&normalize(&collection_payload()), &selection);
    assert!(report.text.contains("# 1 - T1"));
    let labels: Vec<&str> = report.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2"]);
}

#[test]
fn number_level_report_includes_present_sections_only() {
    let selection = Selection::default()
        .with_bill_type(Some(BillType::Hr))
        .with_bill_number(Some("1".to_string()))
        .unwrap();
    let descriptor = RequestDescriptor::from_selection(&selection, &config());
    assert_eq!(
        descriptor.url_path().to_string(),
        "/v3/bill/118/hr/1?format=json&api_key=TESTKEY"
    );

    let payload = json!({"bill": {
        "congress": "118",
        "type": "HR",
        "number": "1",
        "title": "Lower Costs Act",
        "latestAction": {"actionDate": "2024-05-20", "text": "Referred to committee."}
    }});
    let report = render(&normalize(&payload), &selection);
    assert!(report
        .text
        .contains("*Latest Action*: 2024-05-20 - Referred to committee."));
    assert!(!report.text.contains("Cost Estimates"));
    assert!(report.options.is_empty());
}

#[test]
fn changing_congress_rebuilds_the_request_from_scratch() {
    let selection = Selection::default()
        .with_bill_type(Some(BillType::Sres))
        .with_bill_number(Some("7".to_string()))
        .unwrap();
    let descriptor = RequestDescriptor::from_selection(&selection, &config());
    assert_eq!(descriptor.segments(), &["v3", "bill", "118", "sres", "7"]);

    let reset = selection.with_congress(Congress::C115);
    let descriptor = RequestDescriptor::from_selection(&reset, &config());
    assert_eq!(descriptor.segments(), &["v3", "bill", "115"]);
}

#[test]
fn malformed_collection_degrades_to_an_empty_report() {
    let payload = json!({"bills": "not-a-list"});
    assert!(matches!(normalize(&payload), Normalized::Empty));

    let report = render(&normalize(&payload), &Selection::default());
    assert!(report.text.is_empty());
    assert!(report.options.is_empty());
}

#[test]
fn missing_policy_area_omits_exactly_that_line() {
    let payload = json!({"bill": {
        "number": "1",
        "title": "T1",
        "originChamber": "House",
        "introducedDate": "2023-01-09"
    }});
    let selection = Selection::default()
        .with_bill_type(Some(BillType::Hr))
        .with_bill_number(Some("1".to_string()))
        .unwrap();

    let report = render(&normalize(&payload), &selection);
    assert!(!report.text.contains("Policy Area"));
    assert!(report.text.contains("*Chamber*: House"));
    assert!(report.text.contains("*Introduced*: 2023-01-09"));
}

#[test]
fn results_arriving_out_of_order_keep_only_the_latest() {
    let client = Arc::new(ApiClient::new(&config()).unwrap());
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut dispatcher = Dispatcher::new(client, tx);

    // Same selection dispatched twice: two sequences, one winner.
    let slow = dispatcher.begin();
    let fast = dispatcher.begin();

    assert!(!dispatcher.accept(slow), "superseded result must be dropped");
    assert!(dispatcher.busy(), "stale results must not clear the indicator");
    assert!(dispatcher.accept(fast));
    assert!(!dispatcher.busy());
}
