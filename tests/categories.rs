use crate::common::{seed_category, spawn_app};

mod common;

#[tokio::test]
async fn retrieve_categories_returns_all_ids() {
    let app = spawn_app().await;
    let science = seed_category(&app.db_pool, "Science").await;
    let art = seed_category(&app.db_pool, "Art").await;
    let geography = seed_category(&app.db_pool, "Geography").await;

    let response = app
        .api_client
        .get(&format!("{}/categories", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["success"], true);
    assert_eq!(
        json["categories"],
        serde_json::json!([science, art, geography])
    );
}

#[tokio::test]
async fn empty_catalog_returns_404() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(&format!("{}/categories", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(404, response.status().as_u16());
    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 404);
    assert_eq!(json["message"], "resource not found");
}
