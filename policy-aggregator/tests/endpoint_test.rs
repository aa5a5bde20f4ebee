use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use policy_aggregator::server::router;
use policy_aggregator::{
    sort_newest_first, AppConfig, Category, FeedSourceConfig, Institution, ItemType,
    NormalizedItem, PolicyAggregator, PolicySource, Result, Status,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use tracing::info;

mod common;
use common::{init_tracing, spawn_upstream, test_config, upstream_router, TEST_API_KEY};

const FIELDS: [&str; 13] = [
    "id",
    "officialTitle",
    "simpleTitle",
    "summary",
    "institution",
    "type",
    "category",
    "status",
    "datePublished",
    "lastUpdated",
    "progress",
    "isBookmarked",
    "voteResult",
];

async fn get_json(config: &AppConfig, path: &str) -> (StatusCode, Value) {
    let aggregator = Arc::new(PolicyAggregator::from_config(config).expect("aggregator"));
    get_json_from(aggregator, path).await
}

async fn get_json_from(aggregator: Arc<PolicyAggregator>, path: &str) -> (StatusCode, Value) {
    let response = router(aggregator)
        .oneshot(Request::builder().uri(path).body(Body::empty()).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("response is JSON");
    (status, body)
}

fn is_fixed_width_utc(value: &Value) -> bool {
    value
        .as_str()
        .map(|s| s.len() == 20 && s.ends_with('Z') && s.as_bytes()[10] == b'T')
        .unwrap_or(false)
}

#[tokio::test]
async fn test_policies_endpoint_returns_every_field() {
    init_tracing();
    let addr = spawn_upstream(upstream_router()).await;
    let config = test_config(addr, Some(TEST_API_KEY));

    let (status, body) = get_json(&config, "/api/policies").await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().expect("array body");
    info!("Endpoint returned {} items", items.len());
    assert_eq!(items.len(), 6, "3 DIP + 2 government + 1 court");

    for item in items {
        let object = item.as_object().expect("object item");
        for field in FIELDS {
            assert!(object.contains_key(field), "missing {field} in {item}");
        }
        for field in ["id", "officialTitle", "simpleTitle", "summary", "institution", "type", "category", "status"] {
            assert!(object[field].is_string(), "{field} should be a string in {item}");
        }
        assert!(is_fixed_width_utc(&object["datePublished"]), "{item}");
        assert!(is_fixed_width_utc(&object["lastUpdated"]), "{item}");
        let progress = object["progress"].as_f64().expect("progress is a number");
        assert!((0.0..=1.0).contains(&progress));
        assert_eq!(object["isBookmarked"], Value::Bool(false));
        assert!(object["voteResult"].is_null());
    }

    let enacted = items
        .iter()
        .find(|i| i["id"] == "dip-311234")
        .expect("DIP item present");
    assert_eq!(enacted["status"], "published");
    assert_eq!(enacted["type"], "bill");
    assert_eq!(enacted["category"], "economy");
    assert_eq!(enacted["institution"], "bundestag");
    assert_eq!(enacted["datePublished"], "2024-03-27T09:00:00Z");

    assert!(items.iter().any(|i| i["institution"] == "bundesregierung"));
    assert!(items.iter().any(|i| i["institution"] == "bundesverfassungsgericht" && i["type"] == "ruling"));
}

#[tokio::test]
async fn test_policies_are_sorted_newest_first() {
    init_tracing();
    let addr = spawn_upstream(upstream_router()).await;
    let config = test_config(addr, Some(TEST_API_KEY));

    let (_, body) = get_json(&config, "/api/policies").await;
    let dates: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|i| i["datePublished"].as_str().expect("date string"))
        .collect();

    for pair in dates.windows(2) {
        assert!(pair[0] >= pair[1], "{} before {}", pair[0], pair[1]);
    }
}

#[tokio::test]
async fn test_missing_key_still_returns_ok() {
    init_tracing();
    let addr = spawn_upstream(upstream_router()).await;
    let config = test_config(addr, None);

    let (status, body) = get_json(&config, "/api/policies").await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().expect("array body");
    let bundestag: Vec<&Value> = items.iter().filter(|i| i["institution"] == "bundestag").collect();
    assert_eq!(bundestag.len(), 1);
    assert_eq!(bundestag[0]["status"], "stopped");
    assert_eq!(bundestag[0]["progress"].as_f64(), Some(0.0));
    assert_eq!(bundestag[0]["id"], "dip-error");

    assert_eq!(items.iter().filter(|i| i["institution"] == "bundesregierung").count(), 2);
}

#[tokio::test]
async fn test_unavailable_feed_does_not_affect_other_sources() {
    init_tracing();
    let addr = spawn_upstream(upstream_router()).await;
    let mut config = test_config(addr, Some(TEST_API_KEY));
    config.court = FeedSourceConfig::new(format!("http://{}/unavailable.xml", addr));

    let (status, body) = get_json(&config, "/api/policies").await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().expect("array body");
    let court: Vec<&Value> = items
        .iter()
        .filter(|i| i["institution"] == "bundesverfassungsgericht")
        .collect();
    assert_eq!(court.len(), 1);
    assert_eq!(court[0]["status"], "stopped");
    assert_eq!(court[0]["progress"].as_f64(), Some(0.0));
    assert!(court[0]["summary"].as_str().unwrap_or_default().contains("503"));

    assert_eq!(items.iter().filter(|i| i["institution"] == "bundestag").count(), 3);
    assert_eq!(items.iter().filter(|i| i["institution"] == "bundesregierung").count(), 2);
}

#[tokio::test]
async fn test_healthz() {
    let config = test_config("127.0.0.1:9".parse().expect("addr"), None);
    let (status, body) = get_json(&config, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

struct BrokenSource;

#[async_trait]
impl PolicySource for BrokenSource {
    fn source_id(&self) -> &str {
        "broken"
    }

    fn source_name(&self) -> &str {
        "Broken"
    }

    fn institution(&self) -> Institution {
        Institution::Bundestag
    }

    fn item_type(&self) -> ItemType {
        ItemType::Bill
    }

    async fn pull(&self) -> Result<Vec<NormalizedItem>> {
        panic!("source blew up");
    }
}

#[tokio::test]
async fn test_aggregation_failure_returns_500() {
    init_tracing();
    let aggregator = Arc::new(PolicyAggregator::new(vec![Arc::new(BrokenSource)]));

    let (status, body) = get_json_from(aggregator, "/api/policies").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().expect("error message").contains("broken"));
}

fn item(id: &str, day: u32) -> NormalizedItem {
    let at = Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).single().expect("valid date");
    NormalizedItem {
        id: id.to_string(),
        official_title: id.to_string(),
        simple_title: id.to_string(),
        summary: String::new(),
        institution: Institution::Bundestag,
        item_type: ItemType::Bill,
        category: Category::Other,
        status: Status::Draft,
        date_published: at,
        last_updated: at,
        progress: 0.5,
        is_bookmarked: false,
        vote_result: None,
    }
}

#[test]
fn test_sort_is_stable_for_equal_dates() {
    let mut items = vec![item("a", 1), item("b", 3), item("c", 3), item("d", 2), item("e", 3)];
    sort_newest_first(&mut items);
    let order: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
    assert_eq!(order, vec!["b", "c", "e", "d", "a"]);

    sort_newest_first(&mut items);
    let again: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(order, again);
}
