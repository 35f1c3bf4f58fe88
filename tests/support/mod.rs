//! Helpers shared by the integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use meli_broker::{
	config::MarketplaceConfig,
	flows::ReqwestMarketplaceClient,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	reqwest,
	url::Url,
};

pub const CLIENT_ID: &str = "app-it";
pub const CLIENT_SECRET: &str = "secret-it";
pub const REDIRECT_URI: &str = "https://app.example.com/mercadolibre/callback";
pub const ACCESS_TOKEN: &str = "APP_USR-it-token";

/// Configuration whose API base, authorization, and token endpoints all live on `server`.
pub fn mock_config(server: &MockServer) -> MarketplaceConfig {
	MarketplaceConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.api_base(Url::parse(&server.base_url()).expect("Mock base URL should parse."))
		.authorization_endpoint(
			Url::parse(&server.url("/authorization")).expect("Mock authorization URL should parse."),
		)
		.token_endpoint(Url::parse(&server.url("/oauth/token")).expect("Mock token URL should parse."))
		.redirect_uri(Url::parse(REDIRECT_URI).expect("Redirect URI fixture should parse."))
		.build()
		.expect("Mock marketplace configuration should build.")
}

/// Reqwest transport that trusts the self-signed certificates `httpmock` serves.
pub fn mock_http_client() -> ReqwestHttpClient {
	let client = reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Reqwest-backed client pointed at `server`.
pub fn mock_client(server: &MockServer) -> ReqwestMarketplaceClient {
	ReqwestMarketplaceClient::with_http_client(
		mock_config(server),
		mock_http_client(),
		ReqwestTransportErrorMapper,
	)
}

/// Marketplace profile payload without an `email` key.
pub fn profile_json(user_id: u64) -> serde_json::Value {
	serde_json::json!({
		"id": user_id,
		"nickname": "TESTSELLER",
		"first_name": "Ana",
		"last_name": "Gómez",
		"country_id": "AR",
		"site_id": "MLA",
		"registration_date": "2020-01-01T00:00:00.000-04:00"
	})
}

/// Marketplace item payload for `item_id`.
pub fn item_json(item_id: &str) -> serde_json::Value {
	serde_json::json!({
		"id": item_id,
		"title": format!("Listing {item_id}"),
		"price": 1999.5,
		"currency_id": "ARS",
		"condition": "new",
		"category_id": "MLA1055",
		"permalink": format!("https://articulo.mercadolibre.com.ar/{item_id}"),
		"pictures": [{ "id": "1", "url": format!("http://http2.mlstatic.com/{item_id}.jpg") }]
	})
}
