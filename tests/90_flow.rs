mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use bistro_api::auth::issue_token;
use bistro_api::config;
use bistro_api::database::models::Role;

// The spawned server shares this process's signing secret (see common),
// so tests can mint staff tokens without a staff login flow
fn staff_token() -> String {
    issue_token(
        &config::config().security,
        uuid::Uuid::new_v4(),
        Role::Staff,
    )
    .expect("staff token")
}

/// Validation runs before any data-store access, so this holds with or
/// without a database behind the server.
#[tokio::test]
async fn delivery_reservation_without_address_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/reservations", server.base_url))
        .json(&json!({
            "name": "Dupont",
            "email": "dupont@example.com",
            "phone": "0600000000",
            "date": "2026-09-15",
            "time": "19:30",
            "type": "livraison"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    let fields: Vec<&str> = body["field_errors"]
        .as_array()
        .expect("field_errors list")
        .iter()
        .filter_map(|v| v["field"].as_str())
        .collect();
    assert!(fields.contains(&"address"), "got {:?}", fields);
    Ok(())
}

#[tokio::test]
async fn staff_route_requires_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/reservations", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_login_me_round_trip() -> Result<()> {
    let server = common::ensure_server().await?;
    if !server.database_ready().await {
        eprintln!("skipping: no database behind test server");
        return Ok(());
    }
    let client = reqwest::Client::new();

    // Unique email per run
    let email = format!("client-{}@example.com", uuid::Uuid::new_v4());

    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "name": "Test Client",
            "email": email,
            "password": "s3cret-pass"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["role"], "client");

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "s3cret-pass" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let res = client
        .get(format!("{}/auth/me", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let profile = &body["data"];
    assert_eq!(profile["email"], email.as_str());
    // The hash must never appear in any response shape
    assert!(profile.get("password").is_none());
    assert!(profile.get("password_hash").is_none());

    // A client token gets 403 on admin surface regardless of payload
    let res = client
        .get(format!("{}/admin/stats", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn soft_deleted_item_leaves_listing_but_stays_resolvable() -> Result<()> {
    let server = common::ensure_server().await?;
    if !server.database_ready().await {
        eprintln!("skipping: no database behind test server");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let staff = staff_token();

    let name = format!("Plat du jour {}", uuid::Uuid::new_v4());
    let res = client
        .post(format!("{}/menu", server.base_url))
        .bearer_auth(&staff)
        .json(&json!({
            "name": name,
            "description": "daily special",
            "price": 12.50,
            "category": "plat",
            "image": "plat.png"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let id = body["data"]["id"].as_str().expect("item id").to_string();

    // An explicit null clears the image; an absent key would keep it
    let res = client
        .put(format!("{}/menu/{}", server.base_url, id))
        .bearer_auth(&staff)
        .json(&json!({ "image": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["data"]["image"].is_null());

    let res = client
        .delete(format!("{}/menu/{}", server.base_url, id))
        .bearer_auth(&staff)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Gone from the public listing
    let res = client.get(format!("{}/menu", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let listed = body["data"]
        .as_array()
        .expect("menu list")
        .iter()
        .any(|item| item["id"] == id.as_str());
    assert!(!listed, "soft-deleted item still listed");

    // But a direct lookup still resolves, flagged unavailable
    let res = client
        .get(format!("{}/menu/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["available"], false);

    Ok(())
}

#[tokio::test]
async fn client_cancel_is_limited_to_own_pending_orders() -> Result<()> {
    let server = common::ensure_server().await?;
    if !server.database_ready().await {
        eprintln!("skipping: no database behind test server");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let staff = staff_token();

    let name = format!("Dessert {}", uuid::Uuid::new_v4());
    let res = client
        .post(format!("{}/menu", server.base_url))
        .bearer_auth(&staff)
        .json(&json!({ "name": name, "price": 6.00, "category": "dessert" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let item_id = body["data"]["id"].as_str().expect("item id").to_string();

    let email = format!("client-{}@example.com", uuid::Uuid::new_v4());
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "name": "Test Client",
            "email": email,
            "password": "s3cret-pass"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let mut order_ids = Vec::new();
    for _ in 0..2 {
        let res = client
            .post(format!("{}/orders", server.base_url))
            .bearer_auth(&token)
            .json(&json!({ "items": [{ "menuItemId": item_id, "quantity": 1 }] }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = res.json::<serde_json::Value>().await?;
        order_ids.push(body["data"]["id"].as_str().expect("order id").to_string());
    }

    // Staff moves the first order out of pending
    let res = client
        .put(format!("{}/orders/{}/status", server.base_url, order_ids[0]))
        .bearer_auth(&staff)
        .json(&json!({ "status": "preparing" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // A non-pending order can no longer be cancelled by its owner
    let res = client
        .delete(format!("{}/orders/{}", server.base_url, order_ids[0]))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // The still-pending one can
    let res = client
        .delete(format!("{}/orders/{}", server.base_url, order_ids[1]))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["status"], "cancelled");

    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    if !server.database_ready().await {
        eprintln!("skipping: no database behind test server");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let email = format!("client-{}@example.com", uuid::Uuid::new_v4());
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "name": "Test Client",
            "email": email,
            "password": "s3cret-pass"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
