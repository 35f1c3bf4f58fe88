//! Walks through starting an authorization-code + PKCE flow and keeping the verifier until the
//! marketplace redirects back with a code.

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use meli_broker::{
	config::MarketplaceConfig,
	flows::ReqwestMarketplaceClient,
	store::{MemoryVerifierStore, VerifierStore},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = MarketplaceConfig::builder("1234567890123456", "demo-secret")
		.authorization_endpoint(Url::parse("https://auth.mercadolibre.com.ar/authorization")?)
		.token_endpoint(Url::parse("https://api.mercadolibre.com/oauth/token")?)
		.redirect_uri(Url::parse("https://app.example.com/mercadolibre/callback")?)
		.build()?;
	let client = ReqwestMarketplaceClient::new(config);
	let verifiers: Arc<dyn VerifierStore> = Arc::new(MemoryVerifierStore::default());
	let start = client.start_authorization();

	println!("Send your user to {}.", &start.authorize_url);
	println!("PKCE challenge ({}): {}.", start.code_challenge_method(), start.code_challenge());

	let (_, state, verifier) = start.into_parts();

	verifiers.put(state.clone(), verifier).await?;

	// Simulate the redirect handler looking up the stored verifier by `state`.
	let verifier = verifiers
		.take(&state)
		.await?
		.ok_or_else(|| eyre!("State `{state}` was not recognized."))?;

	println!("Recovered the verifier for state {state}; {verifier:?} is ready for the code exchange.");
	println!("Call MarketplaceClient::exchange_code_for_token with the `code` query parameter.");

	Ok(())
}
