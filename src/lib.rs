//! OAuth 2.0 PKCE broker and data proxy for the MercadoLibre marketplace API.
//!
//! Start the authorization-code flow, exchange codes for tokens, and project user and item
//! payloads into stable response shapes.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod flows;
pub mod handlers;
pub mod http;
pub mod model;
pub mod oauth;
pub mod obs;
#[cfg(feature = "server")] pub mod server;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::MarketplaceConfig, flows::MarketplaceClient, http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = MarketplaceClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a marketplace configuration whose API base, authorization, and token endpoints
	/// all point at `base` (typically an `httpmock` server URL).
	pub fn test_config(base: &str, client_id: &str, client_secret: &str) -> MarketplaceConfig {
		let base = Url::parse(base).expect("Mock server base URL should parse.");

		MarketplaceConfig::builder(client_id, client_secret)
			.api_base(base.clone())
			.authorization_endpoint(
				base.join("/authorization").expect("Mock authorization URL should join."),
			)
			.token_endpoint(base.join("/oauth/token").expect("Mock token URL should join."))
			.redirect_uri(
				Url::parse("https://app.example.com/mercadolibre/callback")
					.expect("Redirect URI fixture should parse."),
			)
			.build()
			.expect("Mock marketplace configuration should build.")
	}

	/// Constructs a [`MarketplaceClient`] backed by the reqwest transport used across
	/// integration tests, pointed at the mock server reachable under `base`.
	pub fn build_reqwest_test_client(
		base: &str,
		client_id: &str,
		client_secret: &str,
	) -> ReqwestTestClient {
		let config = test_config(base, client_id, client_secret);

		MarketplaceClient::with_http_client(
			config,
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)]
use {color_eyre as _, httpmock as _, tokio as _, tower as _, tracing_subscriber as _};
