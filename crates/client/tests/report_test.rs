//! Report execution tests against an in-memory transport

mod common;

use std::sync::Arc;

use rsuite_client::{Account, ClientError, Method};
use rsuite_query::{Metric, Query, QueryError};
use serde_json::json;

use common::MockTransport;

fn page_body(number: u32) -> serde_json::Value {
    let first_page = number == 0;
    let last_page = number == 1;
    json!({
        "totalPages": 2,
        "firstPage": first_page,
        "lastPage": last_page,
        "numberOfElements": 2,
        "number": number,
        "totalElements": 4,
        "columns": {
            "dimension": {"id": "variables/page", "type": "string"},
            "columnIds": ["0", "1"]
        },
        "rows": [
            {"itemId": "1001", "value": "home", "data": [120.0, 30.0]},
            {"itemId": "1002", "value": "search", "data": [80.0, 12.0]}
        ],
        "summaryData": {"totals": [400.0, 90.0]}
    })
}

fn query() -> Query {
    Query::new("rs1")
        .select(
            "variables/page",
            [Metric::new("metrics/pageviews"), Metric::new("metrics/visits")],
        )
        .unwrap()
        .limit(2)
        .unwrap()
}

#[tokio::test]
async fn test_run_posts_compiled_query() {
    let transport = Arc::new(MockTransport::new().respond("/reports", page_body(0)));
    let reports = Account::new(transport.clone()).reports();
    let query = query();

    let page = reports.run(&query).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(
        requests[0].payload,
        Some(serde_json::to_value(query.compile().unwrap()).unwrap())
    );

    assert_eq!(page.total_pages, 2);
    assert_eq!(page.total_elements, 4);
    assert_eq!(page.column_ids, ["0", "1"]);
    assert_eq!(page.rows[0].item_id, "1001");
    assert_eq!(page.rows[1].data, [80.0, 12.0]);
    assert_eq!(page.totals, [400.0, 90.0]);
    assert!(page.has_next());
}

#[tokio::test]
async fn test_next_page_is_sent() {
    let transport = Arc::new(MockTransport::new().respond("/reports", page_body(1)));
    let reports = Account::new(transport.clone()).reports();
    let mut query = query();
    query.next_page().unwrap();

    let page = reports.run(&query).await.unwrap();

    let payload = transport.requests()[0].payload.clone().unwrap();
    assert_eq!(payload["settings"]["page"], "1");
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_missing_fields_default() {
    let transport = Arc::new(MockTransport::new().respond("/reports", json!({})));
    let page = Account::new(transport).reports().run(&query()).await.unwrap();

    assert_eq!(page.total_pages, 0);
    assert!(page.rows.is_empty());
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_invalid_query_is_not_sent() {
    let transport = Arc::new(MockTransport::new());
    let reports = Account::new(transport.clone()).reports();

    let err = reports.run(&Query::new("rs1")).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Query(QueryError::MissingField("dimension"))
    ));
    assert!(transport.requests().is_empty());
}
