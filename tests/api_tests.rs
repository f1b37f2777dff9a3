mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{make_request, positions, seed_board, seed_card, seed_list, setup_test_db, test_app, token_for};

const OWNER: &str = "user-owner";

#[tokio::test]
async fn test_health_check() {
    let pool = setup_test_db().await;
    let app = test_app(pool);

    let (status, body) = make_request(app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["dbConnected"], true);
}

#[tokio::test]
async fn test_api_requires_bearer_token() {
    let pool = setup_test_db().await;
    let app = test_app(pool);

    let (status, _) = make_request(app.clone(), "GET", "/api/boards", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        make_request(app, "GET", "/api/boards", None, Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_board_list_card_flow() {
    let pool = setup_test_db().await;
    let app = test_app(pool);
    let token = token_for(OWNER);

    let (status, body) = make_request(
        app.clone(),
        "POST",
        "/api/boards",
        Some(json!({ "title": "Home", "description": "Chores" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let board: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(board["ownerId"], OWNER);
    let board_id = board["id"].as_str().unwrap().to_string();

    let (status, body) = make_request(
        app.clone(),
        "POST",
        "/api/lists",
        Some(json!({ "boardId": board_id, "title": "Todo" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let list: Value = serde_json::from_str(&body).unwrap();
    let list_id = list["id"].as_str().unwrap().to_string();

    let mut card_ids = Vec::new();
    for (index, title) in ["Dishes", "Laundry", "Groceries"].iter().enumerate() {
        let (status, body) = make_request(
            app.clone(),
            "POST",
            "/api/cards",
            Some(json!({ "listId": list_id, "title": title }).to_string()),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let card: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(card["position"], index as i64);
        assert_eq!(card["listId"], list_id.as_str());
        card_ids.push(card["id"].as_str().unwrap().to_string());
    }

    let (status, body) = make_request(
        app.clone(),
        "GET",
        &format!("/api/boards/{}/lists", board_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let lists: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(lists[0]["title"], "Todo");
    assert_eq!(lists[0]["cards"].as_array().unwrap().len(), 3);
    assert_eq!(lists[0]["cards"][0]["title"], "Dishes");

    let (status, body) = make_request(
        app,
        "GET",
        &format!("/api/lists/{}/cards", list_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let cards: Value = serde_json::from_str(&body).unwrap();
    let titles: Vec<&str> = cards
        .as_array()
        .unwrap()
        .iter()
        .map(|card| card["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dishes", "Laundry", "Groceries"]);
}

#[tokio::test]
async fn test_reorder_endpoint() {
    let pool = setup_test_db().await;
    seed_board(&pool, "b1", OWNER).await;
    seed_list(&pool, "l1", "b1").await;
    seed_card(&pool, "a", "l1", 0).await;
    seed_card(&pool, "b", "l1", 1).await;
    seed_card(&pool, "c", "l1", 2).await;
    let app = test_app(pool.clone());
    let token = token_for(OWNER);

    let (status, body) = make_request(
        app.clone(),
        "PATCH",
        "/api/cards/reorder",
        Some(json!({ "listId": "l1", "cardIds": ["c", "a", "b"] }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let cards: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(cards[0]["id"], "c");
    assert_eq!(cards[0]["position"], 0);

    let (status, body) = make_request(
        app.clone(),
        "PATCH",
        "/api/cards/reorder",
        Some(json!({ "listId": "l1", "cardIds": ["a", "a"] }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["status"], 400);

    let (status, _) = make_request(
        app,
        "PATCH",
        "/api/cards/reorder",
        Some(json!({ "listId": "l1", "cardIds": ["b", "a", "c"] }).to_string()),
        Some(&token_for("someone-else")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(
        positions(&pool, "l1").await,
        common::pairs(&[("c", 0), ("a", 1), ("b", 2)])
    );
}

#[tokio::test]
async fn test_move_endpoint() {
    let pool = setup_test_db().await;
    seed_board(&pool, "b1", OWNER).await;
    seed_list(&pool, "l1", "b1").await;
    seed_list(&pool, "l2", "b1").await;
    seed_card(&pool, "x", "l1", 0).await;
    seed_card(&pool, "y", "l1", 1).await;
    seed_card(&pool, "z", "l1", 2).await;
    seed_card(&pool, "p", "l2", 0).await;
    seed_card(&pool, "q", "l2", 1).await;
    let app = test_app(pool.clone());
    let token = token_for(OWNER);

    let (status, body) = make_request(
        app.clone(),
        "PATCH",
        "/api/cards/move",
        Some(json!({ "cardId": "y", "targetListId": "l2" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let card: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(card["listId"], "l2");
    assert_eq!(card["position"], 2);

    let (status, _) = make_request(
        app,
        "PATCH",
        "/api/cards/move",
        Some(json!({ "cardId": "x", "targetListId": "nowhere", "targetPosition": 0 }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(
        positions(&pool, "l2").await,
        common::pairs(&[("p", 0), ("q", 1), ("y", 2)])
    );
    assert_eq!(
        positions(&pool, "l1").await,
        common::pairs(&[("x", 0), ("z", 2)])
    );
}

#[tokio::test]
async fn test_update_and_delete_card() {
    let pool = setup_test_db().await;
    seed_board(&pool, "b1", OWNER).await;
    seed_list(&pool, "l1", "b1").await;
    seed_card(&pool, "a", "l1", 0).await;
    seed_card(&pool, "b", "l1", 1).await;
    let app = test_app(pool.clone());
    let token = token_for(OWNER);

    let (status, body) = make_request(
        app.clone(),
        "PUT",
        "/api/cards/a",
        Some(json!({ "title": "Renamed" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let card: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(card["title"], "Renamed");
    assert_eq!(card["position"], 0);

    let (status, _) = make_request(
        app.clone(),
        "DELETE",
        "/api/cards/a",
        None,
        Some(&token_for("someone-else")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = make_request(app.clone(), "DELETE", "/api/cards/a", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = make_request(app, "DELETE", "/api/cards/a", None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(positions(&pool, "l1").await, common::pairs(&[("b", 1)]));
}

#[tokio::test]
async fn test_delete_board_cascades() {
    let pool = setup_test_db().await;
    seed_board(&pool, "b1", OWNER).await;
    seed_list(&pool, "l1", "b1").await;
    seed_card(&pool, "a", "l1", 0).await;
    let app = test_app(pool.clone());

    let (status, _) = make_request(
        app.clone(),
        "DELETE",
        "/api/boards/b1",
        None,
        Some(&token_for("someone-else")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        make_request(app, "DELETE", "/api/boards/b1", None, Some(&token_for(OWNER))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (lists,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lists")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (cards,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(lists, 0);
    assert_eq!(cards, 0);
}

#[tokio::test]
async fn test_list_endpoints_follow_ownership_chain() {
    let pool = setup_test_db().await;
    seed_board(&pool, "b1", OWNER).await;
    seed_list(&pool, "l1", "b1").await;
    seed_card(&pool, "a", "l1", 0).await;
    let app = test_app(pool.clone());
    let stranger = token_for("someone-else");

    let (status, _) = make_request(
        app.clone(),
        "POST",
        "/api/lists",
        Some(json!({ "boardId": "b1", "title": "Mine now" }).to_string()),
        Some(&stranger),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) =
        make_request(app.clone(), "GET", "/api/lists/l1/cards", None, Some(&stranger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = make_request(
        app.clone(),
        "PUT",
        "/api/lists/l1",
        Some(json!({ "title": "Doing" }).to_string()),
        Some(&token_for(OWNER)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(list["title"], "Doing");

    let (status, _) =
        make_request(app, "DELETE", "/api/lists/l1", None, Some(&token_for(OWNER))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (cards,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(cards, 0);
}

#[tokio::test]
async fn test_malformed_move_body_is_bad_request() {
    let pool = setup_test_db().await;
    seed_board(&pool, "b1", OWNER).await;
    seed_list(&pool, "l1", "b1").await;
    seed_list(&pool, "l2", "b1").await;
    seed_card(&pool, "x", "l1", 0).await;
    let app = test_app(pool.clone());
    let token = token_for(OWNER);

    for target_position in [json!(-1), json!("first")] {
        let (status, body) = make_request(
            app.clone(),
            "PATCH",
            "/api/cards/move",
            Some(
                json!({ "cardId": "x", "targetListId": "l2", "targetPosition": target_position })
                    .to_string(),
            ),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "targetPosition {}", target_position);
        let error: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["status"], 400);
    }

    let (status, _) = make_request(
        app,
        "POST",
        "/api/cards",
        Some(json!({ "title": "No list" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(positions(&pool, "l1").await, common::pairs(&[("x", 0)]));
}
