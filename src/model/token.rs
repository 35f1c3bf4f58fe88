//! Token issued by a successful authorization-code exchange.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token and its metadata. Immutable once issued; persisting it is a caller concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Bearer token presented on marketplace calls.
	pub access_token: TokenSecret,
	/// Token type, normally `bearer`.
	pub token_type: String,
	/// Lifetime in seconds; `0` when the marketplace omits it.
	pub expires_in: u64,
	/// Space-delimited granted scopes.
	pub scope: String,
	/// Marketplace user the token belongs to.
	pub user_id: u64,
	/// Refresh token, when the `offline_access` scope was granted.
	pub refresh_token: Option<TokenSecret>,
}
