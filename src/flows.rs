//! Marketplace client and the operations it exposes.
//!
//! [`MarketplaceClient`] owns the configuration, the HTTP transport, and the OAuth token facade.
//! Operations are grouped by concern: authorization start and code exchange live in
//! [`auth_code_pkce`], profile reads in `users`, item reads and aggregation in `items`, and the
//! diagnostic passthroughs in `probe`.

pub mod auth_code_pkce;
pub mod probe;

mod items;
mod users;

pub use auth_code_pkce::*;
pub use probe::*;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	config::MarketplaceConfig,
	error::ConfigError,
	http::{MarketplaceHttpClient, ResponseMetadataSlot},
	oauth::{TokenFacade, TransportErrorMapper},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

/// Upper bound on the items fetched by [`MarketplaceClient::fetch_user_products`].
pub const MAX_AGGREGATED_ITEMS: usize = 10;

/// Endpoint label for the authenticated user's profile.
pub const USERS_ME_ENDPOINT: &str = "users/me";
/// Endpoint label for a seller's item search.
pub const ITEM_SEARCH_ENDPOINT: &str = "users/{id}/items/search";
/// Endpoint label for a single item.
pub const ITEM_ENDPOINT: &str = "items/{id}";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestMarketplaceClient = MarketplaceClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Performs every outbound marketplace call: profile, item search, item detail, and the OAuth
/// token exchange.
///
/// The client is request-scoped in behavior: it holds no mutable state across calls, so one
/// instance can be shared behind an `Arc` by any number of concurrent handlers.
pub struct MarketplaceClient<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Marketplace configuration (credentials, redirect URI, endpoints).
	pub config: MarketplaceConfig,
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	token: TokenFacade<C, M>,
}
impl<C, M> MarketplaceClient<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: MarketplaceConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		let http_client = http_client.into();
		let transport_mapper = mapper.into();
		let token =
			TokenFacade::from_config(&config, Arc::clone(&http_client), Arc::clone(&transport_mapper));

		Self { config, http_client, transport_mapper, token }
	}

	/// Resolves `segments` below the configured API base.
	///
	/// Segments are percent-encoded, so caller-supplied ids cannot escape their path position.
	pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
		let mut url = self.config.endpoints.api_base.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::CannotBeABase {
				url: self.config.endpoints.api_base.to_string(),
			})?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}

	/// Issues an authenticated `GET` and returns the raw response, whatever its status.
	pub(crate) async fn get(&self, url: &Url, access_token: &str) -> Result<HttpResponse> {
		let request = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(AUTHORIZATION, format!("Bearer {access_token}"))
			.header(ACCEPT, "application/json")
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());

		handle
			.call(request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(meta.take().as_ref(), err))
	}
}
#[cfg(feature = "reqwest")]
impl MarketplaceClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: MarketplaceConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default(), ReqwestTransportErrorMapper)
	}
}
impl<C, M> Debug for MarketplaceClient<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MarketplaceClient")
			.field("client_id", &self.config.client_id)
			.field("api_base", &self.config.endpoints.api_base.as_str())
			.finish()
	}
}

/// Returns the body of a 2xx response, or [`Error::Upstream`] echoing status and body.
pub(crate) fn expect_success(endpoint: &'static str, response: HttpResponse) -> Result<Vec<u8>> {
	let status = response.status();

	if status.is_success() {
		Ok(response.into_body())
	} else {
		Err(Error::Upstream {
			endpoint,
			status: status.as_u16(),
			body: String::from_utf8_lossy(response.body()).into_owned(),
		})
	}
}

/// Rejects blank (empty or whitespace-only) required inputs.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
	if value.trim().is_empty() { Err(Error::Validation { field }) } else { Ok(()) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[test]
	fn endpoint_appends_encoded_segments() {
		let client = build_reqwest_test_client("https://api.example.com/v1/", "client", "secret");
		let url = client.endpoint(&["items", "MLA 1/2"]).expect("Endpoint should resolve.");

		assert_eq!(url.as_str(), "https://api.example.com/v1/items/MLA%201%2F2");
	}

	#[test]
	fn endpoint_handles_base_without_trailing_slash() {
		let client = build_reqwest_test_client("http://127.0.0.1:8080", "client", "secret");
		let url = client.endpoint(&["users", "me"]).expect("Endpoint should resolve.");

		assert_eq!(url.as_str(), "http://127.0.0.1:8080/users/me");
	}

	#[test]
	fn non_success_responses_become_upstream_errors() {
		let mut response = HttpResponse::new(b"{\"message\":\"not found\"}".to_vec());

		*response.status_mut() = oauth2::http::StatusCode::NOT_FOUND;

		let err = expect_success(ITEM_ENDPOINT, response).expect_err("404 should fail.");

		assert!(matches!(err, Error::Upstream { status: 404, endpoint: ITEM_ENDPOINT, .. }));
	}

	#[test]
	fn blank_inputs_fail_validation() {
		assert!(require("accessToken", "  \t").is_err());
		assert!(require("accessToken", "APP_USR-1").is_ok());
	}
}
