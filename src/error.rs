//! Broker-level error types shared across flows, handlers, and the transport layer.

// self
use crate::{_prelude::*, store::StoreError};

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Pending-authorization store failure.
	#[error("{0}")]
	Storage(#[from] StoreError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A required input was missing or blank.
	#[error("The `{field}` parameter is required.")]
	Validation {
		/// Name of the offending input.
		field: &'static str,
	},
	/// Marketplace answered with a non-success HTTP status.
	#[error("Marketplace endpoint `{endpoint}` returned HTTP {status}: {body}")]
	Upstream {
		/// Endpoint label (path template) that failed.
		endpoint: &'static str,
		/// HTTP status code returned by the marketplace.
		status: u16,
		/// Raw response body, echoed for diagnosis.
		body: String,
	},
	/// Marketplace answered with a success status but a body that is not the expected JSON.
	#[error("Marketplace endpoint `{endpoint}` returned a malformed body: {source}")]
	Deserialization {
		/// Endpoint label (path template) whose body failed to decode.
		endpoint: &'static str,
		/// Parsing failure; a `serde_path_to_error::Error<serde_json::Error>` when the body was
		/// JSON, a plain message when it never reached the parser (empty body, wrong content type).
		#[source]
		source: BoxError,
	},
	/// Token endpoint rejected the authorization code exchange.
	#[error("Token exchange failed: {error} - {error_description}")]
	TokenExchange {
		/// OAuth `error` code returned by the marketplace.
		error: String,
		/// OAuth `error_description` returned by the marketplace.
		error_description: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl Error {
	/// Returns the upstream HTTP status carried by the error, if any.
	pub fn upstream_status(&self) -> Option<u16> {
		match self {
			Error::Upstream { status, .. } => Some(*status),
			Error::TokenExchange { status, .. } => *status,
			_ => None,
		}
	}

	/// Whether the error was caused by caller input rather than the marketplace or the broker.
	pub fn is_client_error(&self) -> bool {
		matches!(self, Error::Validation { .. })
	}
}

/// Configuration and request-construction failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// API base URL cannot carry path segments (e.g. `data:` URLs).
	#[error("API base URL `{url}` cannot be used as a base for marketplace paths.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the marketplace: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the marketplace.")]
	Io(#[from] std::io::Error),
	/// Transport failed without a typed error (e.g. `oauth2`'s `Other` variant).
	#[error("HTTP client error occurred while calling the marketplace: {message}")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn upstream_errors_expose_status_and_body() {
		let err = Error::Upstream {
			endpoint: "users/me",
			status: 401,
			body: "{\"message\":\"invalid access token\"}".into(),
		};

		assert_eq!(err.upstream_status(), Some(401));
		assert!(err.to_string().contains("HTTP 401"));
		assert!(err.to_string().contains("invalid access token"));
		assert!(!err.is_client_error());
	}

	#[test]
	fn token_exchange_errors_render_both_fields() {
		let err = Error::TokenExchange {
			error: "invalid_grant".into(),
			error_description: "code already used".into(),
			status: Some(400),
		};

		assert_eq!(err.to_string(), "Token exchange failed: invalid_grant - code already used");
		assert_eq!(err.upstream_status(), Some(400));
	}

	#[test]
	fn wrapped_errors_render_their_cause() {
		let err = Error::Deserialization {
			endpoint: "items/{id}",
			source: "expected f64 at line 1 column 12".into(),
		};

		assert!(err.to_string().contains("items/{id}"));
		assert!(err.to_string().contains("expected f64 at line 1 column 12"));

		let err: Error = TransportError::network(std::io::Error::other("connection reset")).into();

		assert!(err.to_string().contains("connection reset"));
	}

	#[test]
	fn validation_errors_are_client_errors() {
		let err = Error::Validation { field: "accessToken" };

		assert!(err.is_client_error());
		assert_eq!(err.upstream_status(), None);
	}
}
