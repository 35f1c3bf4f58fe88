//! Marketplace application settings consumed by every flow.
//!
//! [`MarketplaceConfig`] carries the OAuth client credentials, the redirect URI registered with
//! the marketplace, and the endpoint set (authorization, token, REST API base). Values are
//! supplied by the caller; the builder validates them so flows can assume HTTPS endpoints and a
//! non-empty client identifier.

/// Builder API and validation rules for [`MarketplaceConfig`].
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::TokenSecret};

/// REST API base used when the caller does not override it.
pub const DEFAULT_API_BASE: &str = "https://api.mercadolibre.com/";
/// Scope requested on the authorize URL when the caller does not override it.
pub const DEFAULT_SCOPE: &str = "read";

/// Endpoint set used by the broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceEndpoints {
	/// Authorization endpoint end-users are redirected to.
	pub authorization: Url,
	/// OAuth token endpoint accepting form-urlencoded code exchanges.
	pub token: Url,
	/// Base URL of the marketplace REST API (`users/me`, `items/{id}`, ...).
	pub api_base: Url,
}

/// Immutable marketplace configuration consumed by [`MarketplaceClient`](crate::flows::MarketplaceClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceConfig {
	/// OAuth 2.0 client identifier (the marketplace "App ID").
	pub client_id: String,
	/// OAuth 2.0 client secret sent in the token request body.
	pub client_secret: TokenSecret,
	/// Redirect URI registered for the application.
	pub redirect_uri: Url,
	/// Endpoint definitions.
	pub endpoints: MarketplaceEndpoints,
	/// Scope value placed on the authorize URL.
	#[serde(default = "default_scope")]
	pub scope: String,
}
impl MarketplaceConfig {
	/// Creates a new builder for the provided client credentials.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> MarketplaceConfigBuilder {
		MarketplaceConfigBuilder::new(client_id, client_secret)
	}
}

fn default_scope() -> String {
	DEFAULT_SCOPE.into()
}
