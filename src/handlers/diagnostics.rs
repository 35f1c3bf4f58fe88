//! Diagnostic handlers that report what the marketplace returns for a token.

// self
use crate::{
	_prelude::*,
	flows::{
		ITEM_SEARCH_ENDPOINT, MarketplaceClient, ProductsProbe, TokenProbe, USERS_ME_ENDPOINT,
	},
	handlers::{HandlerResult, MISSING_ACCESS_TOKEN, ProbeFailure, Rejection, RejectionBody, required},
	http::MarketplaceHttpClient,
	model::{ItemSearchResult, MarketplaceUser},
	oauth::TransportErrorMapper,
	obs,
};

/// Payload returned when a token passes the profile check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenCheckResponse {
	/// Always `true`.
	pub success: bool,
	/// Human-readable result.
	pub message: String,
	/// Status the marketplace answered with.
	pub status: u16,
	/// Cleaned profile projection.
	pub user: MarketplaceUser,
}

/// Payload returned when the token owner's items could be listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsCheckResponse {
	/// Always `true`.
	pub success: bool,
	/// Human-readable result.
	pub message: String,
	/// Marketplace user id of the token owner.
	pub user_id: u64,
	/// Status the item search answered with.
	pub status: u16,
	/// Seller id, total, and bare item ids.
	pub products: ItemSearchResult,
}

/// Checks `access_token` against the profile endpoint.
pub async fn test_token<C, M>(
	client: &MarketplaceClient<C, M>,
	access_token: Option<&str>,
) -> HandlerResult<TokenCheckResponse>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let access_token = required(access_token, MISSING_ACCESS_TOKEN)?;

	match client.probe_token(access_token).await {
		Ok(TokenProbe { status, user }) => Ok(TokenCheckResponse {
			success: true,
			message: "Token is valid".into(),
			status,
			user,
		}),
		Err(e) => Err(probe_rejection(
			"/mercadolibre/test-token",
			USERS_ME_ENDPOINT,
			"Token check failed",
			&e,
		)),
	}
}

/// Lists the token owner's item ids without fetching details.
pub async fn test_products<C, M>(
	client: &MarketplaceClient<C, M>,
	access_token: Option<&str>,
) -> HandlerResult<ProductsCheckResponse>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let access_token = required(access_token, MISSING_ACCESS_TOKEN)?;

	match client.probe_products(access_token).await {
		Ok(ProductsProbe { user_id, status, products }) => Ok(ProductsCheckResponse {
			success: true,
			message: "Products retrieved".into(),
			user_id,
			status,
			products,
		}),
		Err(e) => Err(probe_rejection(
			"/mercadolibre/test-products",
			ITEM_SEARCH_ENDPOINT,
			"Product listing failed",
			&e,
		)),
	}
}

/// Echoes the probed endpoint's non-success answer; other failures map like any handler error.
fn probe_rejection(
	route: &'static str,
	probed: &'static str,
	label: &str,
	err: &Error,
) -> Rejection {
	let (status, body) = match err {
		Error::Upstream { endpoint, status, body } if *endpoint == probed => (*status, body),
		_ => return Rejection::from_error(route, err),
	};

	obs::record_request_failure(route, 500, err);

	Rejection {
		status: 500,
		body: RejectionBody::Probe(ProbeFailure {
			error: label.into(),
			status,
			response: body.clone(),
		}),
	}
}
