//! Runs the HTTP surface against the live marketplace.
//!
//! Required environment: `MELI_CLIENT_ID`, `MELI_CLIENT_SECRET`, `MELI_REDIRECT_URI`.
//! Optional: `MELI_AUTH_URL`, `MELI_TOKEN_URL`, `MELI_API_BASE`, `MELI_BIND` (default
//! `127.0.0.1:5000`), and `RUST_LOG`.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
// self
use meli_broker::{
	config::MarketplaceConfig,
	flows::ReqwestMarketplaceClient,
	server::{self, AppState},
	store::MemoryVerifierStore,
	url::Url,
};

const DEFAULT_AUTH_URL: &str = "https://auth.mercadolibre.com.ar/authorization";
const DEFAULT_TOKEN_URL: &str = "https://api.mercadolibre.com/oauth/token";
const DEFAULT_BIND: &str = "127.0.0.1:5000";

fn var_or(name: &str, default: &str) -> String {
	env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn load_config() -> Result<MarketplaceConfig> {
	let mut builder = MarketplaceConfig::builder(
		env::var("MELI_CLIENT_ID")?,
		env::var("MELI_CLIENT_SECRET")?,
	)
	.redirect_uri(Url::parse(&env::var("MELI_REDIRECT_URI")?)?)
	.authorization_endpoint(Url::parse(&var_or("MELI_AUTH_URL", DEFAULT_AUTH_URL))?)
	.token_endpoint(Url::parse(&var_or("MELI_TOKEN_URL", DEFAULT_TOKEN_URL))?);

	if let Ok(api_base) = env::var("MELI_API_BASE") {
		builder = builder.api_base(Url::parse(&api_base)?);
	}

	Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
		)
		.init();

	let client = ReqwestMarketplaceClient::new(load_config()?);
	let state = AppState::new(client, Arc::new(MemoryVerifierStore::default()));
	let listener = TcpListener::bind(var_or("MELI_BIND", DEFAULT_BIND)).await?;

	tracing::info!(addr = %listener.local_addr()?, "listening");

	axum::serve(listener, server::router(state)).await?;

	Ok(())
}
