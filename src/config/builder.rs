// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::{DEFAULT_API_BASE, DEFAULT_SCOPE, MarketplaceConfig, MarketplaceEndpoints},
};

/// Errors raised while constructing or validating a [`MarketplaceConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ConfigBuilderError {
	/// Authorization endpoint is required to start the flow.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is required to exchange codes.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Redirect URI is required by both the authorize URL and the token request.
	#[error("Missing redirect URI.")]
	MissingRedirectUri,
	/// Client identifier must not be blank.
	#[error("Client identifier must not be blank.")]
	EmptyClientId,
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// A URL could not be parsed.
	#[error("The {field} URL is invalid: {reason}.")]
	InvalidUrl {
		/// Which field failed to parse.
		field: &'static str,
		/// Parser message.
		reason: String,
	},
}

/// Builder for [`MarketplaceConfig`] values.
#[derive(Debug)]
pub struct MarketplaceConfigBuilder {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
	/// Redirect URI registered with the marketplace.
	pub redirect_uri: Option<Url>,
	/// Authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint.
	pub token_endpoint: Option<Url>,
	/// REST API base; defaults to [`DEFAULT_API_BASE`].
	pub api_base: Option<Url>,
	/// Scope requested on the authorize URL.
	pub scope: String,
}
impl MarketplaceConfigBuilder {
	/// Creates a new builder seeded with the client credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			redirect_uri: None,
			authorization_endpoint: None,
			token_endpoint: None,
			api_base: None,
			scope: DEFAULT_SCOPE.into(),
		}
	}

	/// Sets the redirect URI.
	pub fn redirect_uri(mut self, url: Url) -> Self {
		self.redirect_uri = Some(url);

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Overrides the REST API base URL.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Overrides the scope requested on the authorize URL.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<MarketplaceConfig, ConfigBuilderError> {
		let authorization = self
			.authorization_endpoint
			.ok_or(ConfigBuilderError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(ConfigBuilderError::MissingTokenEndpoint)?;
		let redirect_uri = self.redirect_uri.ok_or(ConfigBuilderError::MissingRedirectUri)?;
		let api_base = match self.api_base {
			Some(url) => url,
			None => Url::parse(DEFAULT_API_BASE).map_err(|e| ConfigBuilderError::InvalidUrl {
				field: "api_base",
				reason: e.to_string(),
			})?,
		};
		let config = MarketplaceConfig {
			client_id: self.client_id,
			client_secret: self.client_secret,
			redirect_uri,
			endpoints: MarketplaceEndpoints { authorization, token, api_base },
			scope: self.scope,
		};

		config.validate()?;

		Ok(config)
	}
}

impl MarketplaceConfig {
	/// Validates invariants for the configuration.
	///
	/// [`MarketplaceConfigBuilder::build`] calls this automatically; call it yourself after
	/// deserializing a configuration from a file or environment.
	pub fn validate(&self) -> Result<(), ConfigBuilderError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigBuilderError::EmptyClientId);
		}

		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("token", &self.endpoints.token)?;
		validate_endpoint("api_base", &self.endpoints.api_base)?;
		validate_endpoint("redirect", &self.redirect_uri)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigBuilderError> {
	if url.scheme() == "https" || (url.scheme() == "http" && is_loopback(url)) {
		Ok(())
	} else {
		Err(ConfigBuilderError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(addr)) => addr.is_loopback(),
		Some(Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse config fixture URL.")
	}

	fn complete() -> MarketplaceConfigBuilder {
		MarketplaceConfig::builder("1234567890", "secret")
			.authorization_endpoint(url("https://auth.mercadolibre.com.ar/authorization"))
			.token_endpoint(url("https://api.mercadolibre.com/oauth/token"))
			.redirect_uri(url("https://kiosko.example.com/mercadolibre/callback"))
	}

	#[test]
	fn build_applies_defaults() {
		let config = complete().build().expect("Complete config should build.");

		assert_eq!(config.endpoints.api_base.as_str(), DEFAULT_API_BASE);
		assert_eq!(config.scope, DEFAULT_SCOPE);
		assert_eq!(config.client_secret.expose(), "secret");
	}

	#[test]
	fn build_rejects_missing_endpoints() {
		let err = MarketplaceConfig::builder("id", "secret")
			.token_endpoint(url("https://api.mercadolibre.com/oauth/token"))
			.redirect_uri(url("https://kiosko.example.com/cb"))
			.build()
			.expect_err("Missing authorization endpoint should fail.");

		assert_eq!(err, ConfigBuilderError::MissingAuthorizationEndpoint);

		let err = MarketplaceConfig::builder("id", "secret")
			.authorization_endpoint(url("https://auth.mercadolibre.com.ar/authorization"))
			.redirect_uri(url("https://kiosko.example.com/cb"))
			.build()
			.expect_err("Missing token endpoint should fail.");

		assert_eq!(err, ConfigBuilderError::MissingTokenEndpoint);
	}

	#[test]
	fn build_rejects_blank_client_id() {
		let err = MarketplaceConfig::builder("  ", "secret")
			.authorization_endpoint(url("https://auth.mercadolibre.com.ar/authorization"))
			.token_endpoint(url("https://api.mercadolibre.com/oauth/token"))
			.redirect_uri(url("https://kiosko.example.com/cb"))
			.build()
			.expect_err("Blank client id should fail.");

		assert_eq!(err, ConfigBuilderError::EmptyClientId);
	}

	#[test]
	fn build_rejects_plain_http_for_remote_hosts() {
		let err = complete()
			.token_endpoint(url("http://api.mercadolibre.com/oauth/token"))
			.build()
			.expect_err("Plain HTTP token endpoint should fail.");

		assert!(matches!(err, ConfigBuilderError::InsecureEndpoint { endpoint: "token", .. }));
	}

	#[test]
	fn build_allows_plain_http_on_loopback() {
		let config = complete()
			.api_base(url("http://127.0.0.1:8080/"))
			.token_endpoint(url("http://localhost:8080/oauth/token"))
			.build()
			.expect("Loopback endpoints should be accepted.");

		assert_eq!(config.endpoints.api_base.as_str(), "http://127.0.0.1:8080/");
	}

	#[test]
	fn deserialized_config_defaults_scope() {
		let config: MarketplaceConfig = serde_json::from_value(serde_json::json!({
			"client_id": "1234",
			"client_secret": "s3cr3t",
			"redirect_uri": "https://kiosko.example.com/cb",
			"endpoints": {
				"authorization": "https://auth.mercadolibre.com.ar/authorization",
				"token": "https://api.mercadolibre.com/oauth/token",
				"api_base": "https://api.mercadolibre.com/"
			}
		}))
		.expect("Config JSON should deserialize.");

		assert_eq!(config.scope, DEFAULT_SCOPE);
		assert!(config.validate().is_ok());
	}
}
