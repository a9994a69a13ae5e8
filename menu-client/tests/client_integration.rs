// menu-client/tests/client_integration.rs
// 集成测试: 真实 menu-server (内存数据库) + HttpClient

use std::sync::Arc;

use chrono::NaiveDate;
use menu_client::{ClientConfig, ClientError, DishPayload, HttpClient, LoadState, MenuView, MenuWeek};
use menu_server::{BearerTokenAuthorizer, Config, DbService, ServerState, build_app};
use shared::error::ErrorCode;
use shared::models::RestrictionIds;

const TOKEN: &str = "client-token";

async fn spawn_server() -> String {
    let pool = DbService::in_memory().await.unwrap().pool;
    for sql in [
        "INSERT INTO meal (id, title, starttime, endtime, required) VALUES (1, 'Lunch', '11:30:00', '13:00:00', 1)",
        "INSERT INTO caterer (id, title, website) VALUES (1, 'Tasty Co', 'https://tasty.example')",
        "INSERT INTO restriction (id, title) VALUES (1, 'Vegetarian')",
        "INSERT INTO restriction (id, title) VALUES (2, 'Gluten Free')",
    ] {
        sqlx::query(sql).execute(&pool).await.unwrap();
    }

    let state = ServerState::new(
        Config::for_tests(TOKEN),
        pool,
        Arc::new(BearerTokenAuthorizer::new(TOKEN)),
    );
    let app = build_app(&state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn payload(title: &str, served_on: &str, restrictions: &[i64]) -> DishPayload {
    DishPayload {
        title: Some(title.to_string()),
        description: Some("fresh".to_string()),
        caterer: Some(1),
        served_on: Some(served_on.to_string()),
        meal: Some(1),
        restrictions: RestrictionIds::new(restrictions.iter().copied()),
    }
}

#[tokio::test]
async fn test_dish_lifecycle() {
    let base_url = spawn_server().await;
    let client = ClientConfig::new(&base_url)
        .with_token(TOKEN)
        .build_http_client()
        .unwrap();

    let id = client
        .create_dish(&payload("Soup", "2024-01-02", &[2, 1]))
        .await
        .unwrap();

    let dishes = client.list_dishes(None, None).await.unwrap();
    assert_eq!(dishes.len(), 1);
    assert_eq!(dishes[0].id, id);
    assert_eq!(dishes[0].restrictions.as_slice(), &[1, 2]);

    let updated = client
        .update_dish(id, &payload("Stew", "2024-01-03", &[]))
        .await
        .unwrap();
    assert_eq!(updated, id);
    let dishes = client.list_dishes(Some(0), Some(10)).await.unwrap();
    assert_eq!(dishes[0].title, "Stew");
    assert!(dishes[0].restrictions.is_empty());

    let second = client
        .create_dish(&payload("Salad", "2024-01-04", &[1]))
        .await
        .unwrap();
    assert_eq!(client.delete_dishes(&[second]).await.unwrap(), vec![second]);
    assert_eq!(client.delete_dish(id).await.unwrap(), id);
    assert!(client.list_dishes(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_mapping() {
    let base_url = spawn_server().await;
    let anonymous = HttpClient::new(&ClientConfig::new(&base_url)).unwrap();

    let err = anonymous.list_dishes(None, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let client = anonymous.with_token(TOKEN);
    let err = client
        .create_dish(&DishPayload {
            title: Some("Soup".into()),
            ..DishPayload::default()
        })
        .await
        .unwrap_err();
    match err {
        ClientError::Validation { code, .. } => assert_eq!(code, ErrorCode::RequiredField),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client
        .update_dish(404, &payload("Soup", "2024-01-02", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_menu_view_refresh() {
    let base_url = spawn_server().await;
    let client = ClientConfig::new(&base_url)
        .with_token(TOKEN)
        .build_http_client()
        .unwrap();
    assert_eq!(client.health().await.unwrap().status, "ok");

    client
        .create_dish(&payload("Soup", "2024-01-03", &[1]))
        .await
        .unwrap();

    let mut view = MenuView::new(MenuWeek::current(date("2024-01-03")), true);
    assert!(view.refresh(&client).await);
    assert_eq!(view.load_state(), &LoadState::Loaded);

    let grid = view.grid();
    let wednesday = &grid.rows[0].cells[2];
    assert_eq!(wednesday.dishes[0].title, "Soup");
    assert_eq!(wednesday.dishes[0].initials, "V");
    assert_eq!(wednesday.caterer.as_ref().unwrap().title, "Tasty Co");
    // Legend follows the server's restriction order (title, case-insensitive)
    let titles: Vec<&str> = view
        .data()
        .restrictions
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(titles, ["Gluten Free", "Vegetarian"]);
    assert_eq!(grid.legend, "GF is for Gluten Free, and V is for Vegetarian");
}

#[tokio::test]
async fn test_unreachable_server_is_retryable() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ClientConfig::new(format!("http://{addr}"))
        .with_timeout(2)
        .build_http_client()
        .unwrap();
    let mut view = MenuView::new(MenuWeek::current(date("2024-01-03")), false);
    assert!(view.refresh(&client).await);
    assert!(matches!(
        view.load_state(),
        LoadState::Failed { retryable: true, .. }
    ));
}
