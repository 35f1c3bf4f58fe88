//! Authorization Code + PKCE: building the authorize URL and exchanging the returned code.

mod session;

pub use session::*;

// self
use crate::{
	_prelude::*,
	auth::PkceVerifier,
	flows::{MarketplaceClient, require},
	http::MarketplaceHttpClient,
	model::TokenResponse,
	oauth::TransportErrorMapper,
	obs::{self, CallKind},
};

impl<C, M> MarketplaceClient<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Generates a fresh PKCE pair and `state`, and builds the authorize URL.
	///
	/// Nothing is retained by the client: the caller persists
	/// [`AuthorizationStart::verifier`] (keyed by [`AuthorizationStart::state`]) and hands it
	/// back to [`MarketplaceClient::exchange_code_for_token`] when the callback arrives.
	pub fn start_authorization(&self) -> AuthorizationStart {
		session::build_start(&self.config)
	}

	/// Exchanges an authorization code for a token, presenting `verifier` exactly as given.
	///
	/// A marketplace OAuth error body becomes [`Error::TokenExchange`]; a non-success response
	/// whose body is not an OAuth error becomes [`Error::Upstream`].
	pub async fn exchange_code_for_token(
		&self,
		code: &str,
		verifier: &PkceVerifier,
	) -> Result<TokenResponse> {
		require("code", code)?;
		require("code_verifier", verifier.secret())?;

		obs::observe(
			CallKind::TokenExchange,
			"exchange_code_for_token",
			self.token.exchange_authorization_code(code, verifier),
		)
		.await
	}
}
