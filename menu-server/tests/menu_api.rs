// menu-server/tests/menu_api.rs
// Menu / Health 路由集成测试

mod common;

use common::{TestApp, request};
use http::StatusCode;
use serde_json::json;

fn dish(served_on: &str, meal: i64) -> serde_json::Value {
    json!({
        "title": format!("Dish {served_on} {meal}"),
        "caterer": 2,
        "served_on": served_on,
        "meal": meal,
        "restrictions": "1"
    })
}

#[tokio::test]
async fn test_menu_is_public_and_lists_lookups() {
    let app = TestApp::new().await;

    let res = app
        .send(request(
            "GET",
            "/api/menu?from=2024-01-01&to=2024-01-05",
            None,
            None,
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let meals: Vec<&str> = res.body["meals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(meals, vec!["Breakfast", "Lunch", "Happy Hour"]);
    assert_eq!(res.body["meals"][0]["starttime"], "08:00:00");
    assert_eq!(res.body["meals"][2]["required"], false);

    assert_eq!(res.body["caterers"][0]["title"], "Bento Bros");
    assert_eq!(res.body["caterers"][0]["website"], "https://bento.example");
    assert_eq!(res.body["restrictions"].as_array().unwrap().len(), 3);
    assert_eq!(res.body["dishes"], json!([]));
}

#[tokio::test]
async fn test_menu_with_dishes_filters_by_range() {
    let app = TestApp::new().await;
    let inside_late = app.create_dish(dish("2024-01-05", 1)).await;
    let inside_early = app.create_dish(dish("2024-01-01", 2)).await;
    app.create_dish(dish("2023-12-29", 1)).await;
    app.create_dish(dish("2024-01-08", 1)).await;

    for flag in ["1", "true"] {
        let res = app
            .send(request(
                "GET",
                &format!("/api/menu?from=2024-01-01&to=2024-01-05&withDishes={flag}"),
                None,
                None,
            ))
            .await;
        assert_eq!(res.status, StatusCode::OK);
        let ids: Vec<i64> = res.body["dishes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![inside_early, inside_late]);
        assert_eq!(res.body["dishes"][0]["restrictions"], json!([1]));
    }

    let res = app
        .send(request(
            "GET",
            "/api/menu?from=2024-01-01&to=2024-01-05&withDishes=0",
            None,
            None,
        ))
        .await;
    assert_eq!(res.body["dishes"], json!([]));
}

#[tokio::test]
async fn test_menu_query_errors() {
    let app = TestApp::new().await;

    let res = app
        .send(request("GET", "/api/menu?from=2024-01-01", None, None))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], 7);
    assert_eq!(res.body["details"]["fields"], json!(["to"]));

    let res = app.send(request("GET", "/api/menu", None, None)).await;
    assert_eq!(res.body["details"]["fields"], json!(["from", "to"]));

    let res = app
        .send(request(
            "GET",
            "/api/menu?from=2024-01-05&to=2024-01-01",
            None,
            None,
        ))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], 6004);

    let res = app
        .send(request(
            "GET",
            "/api/menu?from=01/01/2024&to=2024-01-05",
            None,
            None,
        ))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], 6);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let res = app.send(request("GET", "/health", None, None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_reports_unavailable_storage() {
    let app = TestApp::new().await;
    app.pool.close().await;

    let res = app.send(request("GET", "/health", None, None)).await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["code"], 9404);
}
