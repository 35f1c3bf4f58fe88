#![cfg(feature = "server")]

mod support;

// std
use std::{collections::HashMap, sync::Arc};
// crates.io
use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use httpmock::prelude::*;
use tower::ServiceExt;
// self
use meli_broker::{
	handlers::{INTERNAL_ERROR, MISSING_VERIFIER},
	server::{AppState, router},
	store::MemoryVerifierStore,
	url::Url,
};
use support::*;

fn app(server: &MockServer) -> Router {
	router(AppState::new(mock_client(server), Arc::new(MemoryVerifierStore::default())))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
	let response = app
		.clone()
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Request should build."))
		.await
		.expect("Router should answer.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Response body should be readable.");

	(status, serde_json::from_slice(&bytes).expect("Response body should be JSON."))
}

#[tokio::test]
async fn auth_then_callback_exchanges_the_stored_verifier_once() {
	let server = MockServer::start_async().await;
	let app = app(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").json_body(
				serde_json::json!({
					"access_token": "APP_USR-from-callback",
					"token_type": "bearer",
					"expires_in": 21600,
					"user_id": 123
				}),
			);
		})
		.await;
	let (status, body) = get_json(&app, "/mercadolibre/auth").await;

	assert_eq!(status, StatusCode::OK);

	let auth_url = Url::parse(body["authUrl"].as_str().expect("authUrl should be a string."))
		.expect("authUrl should parse.");
	let pairs: HashMap<_, _> = auth_url.query_pairs().into_owned().collect();
	let state = pairs.get("state").expect("Authorize URL should carry a state.");
	let callback = format!("/mercadolibre/callback?code=TG-abc&state={state}");
	let (status, body) = get_json(&app, &callback).await;

	token.assert_async().await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["success"], true);
	assert_eq!(body["accessToken"], "APP_USR-from-callback");
	assert_eq!(body["userId"], 123);
	assert_eq!(body["message"], "Authentication successful");

	let (status, body) = get_json(&app, &callback).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], MISSING_VERIFIER);
	token.assert_calls_async(1).await;
}

#[tokio::test]
async fn callback_surfaces_rejected_grants_as_internal_errors() {
	let server = MockServer::start_async().await;
	let app = app(&server);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(400).header("content-type", "application/json").json_body(
				serde_json::json!({ "error": "invalid_grant", "error_description": "expired" }),
			);
		})
		.await;

	let (_, body) = get_json(&app, "/mercadolibre/auth").await;
	let auth_url = Url::parse(body["authUrl"].as_str().expect("authUrl should be a string."))
		.expect("authUrl should parse.");
	let state = auth_url
		.query_pairs()
		.find(|(key, _)| key == "state")
		.map(|(_, value)| value.into_owned())
		.expect("Authorize URL should carry a state.");
	let (status, body) =
		get_json(&app, &format!("/mercadolibre/callback?code=TG-old&state={state}")).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["success"], false);
	assert_eq!(body["error"], INTERNAL_ERROR);
	assert!(body["message"].as_str().is_some_and(|m| m.contains("invalid_grant")));
}

#[tokio::test]
async fn user_with_token_echoes_upstream_status() {
	let server = MockServer::start_async().await;
	let app = app(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me");
			then.status(401).body("{\"message\":\"invalid access token\"}");
		})
		.await;

	let (status, body) =
		get_json(&app, &format!("/mercadolibre/user/with-token?accessToken={ACCESS_TOKEN}")).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["error"], INTERNAL_ERROR);
	assert_eq!(body["status"], 401);
	assert!(body["message"].as_str().is_some_and(|m| m.contains("invalid access token")));
}

#[tokio::test]
async fn products_with_token_returns_the_aggregate() {
	let server = MockServer::start_async().await;
	let app = app(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me");
			then.status(200).header("content-type", "application/json").json_body(profile_json(55));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/55/items/search");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(serde_json::json!({ "results": ["MLA5"] }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/items/MLA5");
			then.status(200).header("content-type", "application/json").json_body(item_json("MLA5"));
		})
		.await;

	let (status, body) =
		get_json(&app, &format!("/mercadolibre/products/with-token?accessToken={ACCESS_TOKEN}"))
			.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["userId"], "55");
	assert_eq!(body["totalProducts"], 1);
	assert_eq!(body["products"][0]["id"], "MLA5");
	assert_eq!(body["products"][0]["currency"], "ARS");
}

#[tokio::test]
async fn test_token_reports_probe_failures() {
	let server = MockServer::start_async().await;
	let app = app(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me");
			then.status(401).body("{\"message\":\"expired_token\"}");
		})
		.await;

	let (status, body) =
		get_json(&app, &format!("/mercadolibre/test-token?accessToken={ACCESS_TOKEN}")).await;

	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(
		body,
		serde_json::json!({
			"error": "Token check failed",
			"status": 401,
			"response": "{\"message\":\"expired_token\"}"
		})
	);
}

#[tokio::test]
async fn test_products_lists_bare_ids() {
	let server = MockServer::start_async().await;
	let app = app(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me");
			then.status(200).header("content-type", "application/json").json_body(profile_json(9));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/users/9/items/search");
			then.status(200).header("content-type", "application/json").json_body(
				serde_json::json!({ "seller_id": "9", "paging": { "total": 1 }, "results": ["MLA1"] }),
			);
		})
		.await;

	let (status, body) =
		get_json(&app, &format!("/mercadolibre/test-products?accessToken={ACCESS_TOKEN}")).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["success"], true);
	assert_eq!(body["userId"], 9);
	assert_eq!(body["status"], 200);
	assert_eq!(body["products"]["results"], serde_json::json!(["MLA1"]));
}
