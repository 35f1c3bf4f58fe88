// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::{PkceChallenge, PkceCodeChallengeMethod, PkcePair, PkceVerifier},
	config::MarketplaceConfig,
};

const STATE_LEN: usize = 32;

/// Authorize URL plus the PKCE material the caller must keep until the callback.
#[derive(Clone)]
pub struct AuthorizationStart {
	/// Fully-formed authorize URL that callers should send end-users to.
	pub authorize_url: Url,
	/// Opaque value carried through the redirect; use it to look the verifier up again.
	pub state: String,
	pkce: PkcePair,
}
impl AuthorizationStart {
	/// Secret verifier to present during the code exchange.
	pub fn verifier(&self) -> &PkceVerifier {
		&self.pkce.verifier
	}

	/// PKCE code challenge sent on the authorize URL.
	pub fn code_challenge(&self) -> &PkceChallenge {
		&self.pkce.challenge
	}

	/// PKCE challenge method (currently always `S256`).
	pub fn code_challenge_method(&self) -> PkceCodeChallengeMethod {
		self.pkce.method
	}

	/// Splits the start into `(authorize_url, state, verifier)`.
	pub fn into_parts(self) -> (Url, String, PkceVerifier) {
		let AuthorizationStart { authorize_url, state, pkce } = self;

		(authorize_url, state, pkce.verifier)
	}
}
impl Debug for AuthorizationStart {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationStart")
			.field("authorize_url", &self.authorize_url.as_str())
			.field("state", &self.state)
			.field("code_challenge", &self.pkce.challenge)
			.field("code_challenge_method", &self.pkce.method)
			.finish()
	}
}

pub(super) fn build_start(config: &MarketplaceConfig) -> AuthorizationStart {
	let state = random_state();
	let pkce = PkcePair::generate();
	let authorize_url = build_authorize_url(config, &state, &pkce);

	AuthorizationStart { authorize_url, state, pkce }
}

fn build_authorize_url(config: &MarketplaceConfig, state: &str, pkce: &PkcePair) -> Url {
	let mut url = config.endpoints.authorization.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", &config.client_id);
	pairs.append_pair("redirect_uri", config.redirect_uri.as_str());

	if !config.scope.trim().is_empty() {
		pairs.append_pair("scope", &config.scope);
	}

	pairs.append_pair("state", state);
	pairs.append_pair("code_challenge", pkce.challenge.as_str());
	pairs.append_pair("code_challenge_method", pkce.method.as_str());

	drop(pairs);

	url
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::test_config, auth::generate_challenge};

	fn query(url: &Url) -> HashMap<String, String> {
		url.query_pairs().into_owned().collect()
	}

	#[test]
	fn authorize_url_carries_pkce_and_client_parameters() {
		let config = test_config("https://auth.example.com", "app-123", "secret");
		let start = build_start(&config);
		let params = query(&start.authorize_url);

		assert_eq!(start.authorize_url.path(), "/authorization");
		assert_eq!(params["response_type"], "code");
		assert_eq!(params["client_id"], "app-123");
		assert_eq!(params["redirect_uri"], "https://app.example.com/mercadolibre/callback");
		assert_eq!(params["scope"], "read");
		assert_eq!(params["state"], start.state);
		assert_eq!(params["code_challenge"], generate_challenge(start.verifier()).as_str());
		assert_eq!(params["code_challenge_method"], "S256");
	}

	#[test]
	fn state_is_alphanumeric_and_unique() {
		let config = test_config("https://auth.example.com", "app-123", "secret");
		let a = build_start(&config);
		let b = build_start(&config);

		assert_eq!(a.state.len(), STATE_LEN);
		assert!(a.state.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(a.state, b.state);
		assert_ne!(a.verifier(), b.verifier());
	}

	#[test]
	fn blank_scope_is_omitted() {
		let mut config = test_config("https://auth.example.com", "app-123", "secret");

		config.scope = String::new();

		let start = build_start(&config);

		assert!(!query(&start.authorize_url).contains_key("scope"));
	}

	#[test]
	fn debug_output_hides_verifier() {
		let config = test_config("https://auth.example.com", "app-123", "secret");
		let start = build_start(&config);
		let rendered = format!("{start:?}");

		assert!(!rendered.contains(start.verifier().secret()));
	}
}
