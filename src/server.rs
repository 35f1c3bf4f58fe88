//! Axum surface exposing the handlers over HTTP.
//!
//! Routes:
//!
//! - `GET /health`
//! - `GET /mercadolibre/auth`, `GET /mercadolibre/callback?code=&state=`
//! - `GET /mercadolibre/user/with-token?accessToken=`, `GET /mercadolibre/user/{userId}`
//! - `GET /mercadolibre/products/with-token?accessToken=`, `GET /mercadolibre/user/{userId}/products`
//! - `GET /mercadolibre/items/{itemId}?accessToken=`
//! - `GET /mercadolibre/test-token?accessToken=`, `GET /mercadolibre/test-products?accessToken=`

// crates.io
use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use tower_http::trace::TraceLayer;
// self
use crate::{
	_prelude::*,
	flows::ReqwestMarketplaceClient,
	handlers::{self, HandlerResult, Rejection},
	model::{MarketplaceUser, ProductDetail, UserProductsResponse},
	store::VerifierStore,
};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
	/// Marketplace client shared by all requests.
	pub client: Arc<ReqwestMarketplaceClient>,
	/// Pending verifiers keyed by authorization `state`.
	pub verifiers: Arc<dyn VerifierStore>,
}
impl AppState {
	/// Bundles a client with the verifier store used between `/auth` and `/callback`.
	pub fn new(
		client: impl Into<Arc<ReqwestMarketplaceClient>>,
		verifiers: Arc<dyn VerifierStore>,
	) -> Self {
		Self { client: client.into(), verifiers }
	}
}
impl Debug for AppState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppState").field("client", &self.client).finish_non_exhaustive()
	}
}

impl IntoResponse for Rejection {
	fn into_response(self) -> Response {
		let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

		(status, Json(self.body)).into_response()
	}
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
	let marketplace = Router::new()
		.route("/auth", get(start_auth))
		.route("/callback", get(auth_callback))
		.route("/user/with-token", get(user_with_token))
		.route("/user/{user_id}", get(user_by_id))
		.route("/user/{user_id}/products", get(products_by_user_id))
		.route("/products/with-token", get(products_with_token))
		.route("/items/{item_id}", get(item_with_token))
		.route("/test-token", get(test_token))
		.route("/test-products", get(test_products));

	Router::new()
		.route("/health", get(health))
		.nest("/mercadolibre", marketplace)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenQuery {
	access_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CallbackQuery {
	code: Option<String>,
	state: Option<String>,
}

async fn health() -> Json<handlers::HealthResponse> {
	Json(handlers::health())
}

async fn start_auth(
	State(state): State<AppState>,
) -> HandlerResult<Json<handlers::AuthUrlResponse>> {
	let (response, start) = handlers::start_auth(&state.client);
	let (_, key, verifier) = start.into_parts();

	state
		.verifiers
		.put(key, verifier)
		.await
		.map_err(|e| Rejection::from_error("/mercadolibre/auth", &Error::from(e)))?;

	Ok(Json(response))
}

async fn auth_callback(
	State(state): State<AppState>,
	Query(query): Query<CallbackQuery>,
) -> HandlerResult<Json<handlers::AuthCallbackResponse>> {
	let has_code = query.code.as_deref().is_some_and(|code| !code.trim().is_empty());
	let verifier = match query.state.as_deref().map(str::trim) {
		Some(key) if has_code && !key.is_empty() => state
			.verifiers
			.take(key)
			.await
			.map_err(|e| Rejection::from_error("/mercadolibre/callback", &Error::from(e)))?,
		_ => None,
	};

	handlers::auth_callback(&state.client, query.code.as_deref(), verifier.as_ref())
		.await
		.map(Json)
}

async fn user_with_token(
	State(state): State<AppState>,
	Query(query): Query<TokenQuery>,
) -> HandlerResult<Json<MarketplaceUser>> {
	handlers::user_with_token(&state.client, query.access_token.as_deref()).await.map(Json)
}

async fn user_by_id(Path(user_id): Path<String>) -> HandlerResult<Json<MarketplaceUser>> {
	handlers::user_by_id(Some(&user_id)).map(Json)
}

async fn products_with_token(
	State(state): State<AppState>,
	Query(query): Query<TokenQuery>,
) -> HandlerResult<Json<UserProductsResponse>> {
	handlers::products_with_token(&state.client, query.access_token.as_deref()).await.map(Json)
}

async fn products_by_user_id(
	Path(user_id): Path<String>,
) -> HandlerResult<Json<UserProductsResponse>> {
	handlers::products_by_user_id(Some(&user_id)).map(Json)
}

async fn item_with_token(
	State(state): State<AppState>,
	Path(item_id): Path<String>,
	Query(query): Query<TokenQuery>,
) -> HandlerResult<Json<ProductDetail>> {
	handlers::item_with_token(&state.client, Some(&item_id), query.access_token.as_deref())
		.await
		.map(Json)
}

async fn test_token(
	State(state): State<AppState>,
	Query(query): Query<TokenQuery>,
) -> HandlerResult<Json<handlers::TokenCheckResponse>> {
	handlers::test_token(&state.client, query.access_token.as_deref()).await.map(Json)
}

async fn test_products(
	State(state): State<AppState>,
	Query(query): Query<TokenQuery>,
) -> HandlerResult<Json<handlers::ProductsCheckResponse>> {
	handlers::test_products(&state.client, query.access_token.as_deref()).await.map(Json)
}
