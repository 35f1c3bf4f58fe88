//! Framework-agnostic request handlers.
//!
//! Each handler validates its inputs, delegates to [`MarketplaceClient`](crate::flows::MarketplaceClient),
//! and maps the outcome to either a response payload or a [`Rejection`] carrying an HTTP status
//! and a JSON body. Blank required inputs are rejected with `400`; every other failure becomes a
//! `500` whose body carries a generic error plus the underlying detail text.

pub mod auth;
pub mod diagnostics;
pub mod health;
pub mod products;
pub mod users;

pub use auth::*;
pub use diagnostics::*;
pub use health::*;
pub use products::*;
pub use users::*;

// self
use crate::{_prelude::*, obs};

/// Generic message attached to every internal-error response.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Result type returned by handlers.
pub type HandlerResult<T> = Result<T, Rejection>;

/// Error response produced by a handler.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
	/// HTTP status code to answer with.
	pub status: u16,
	/// JSON body to answer with.
	pub body: RejectionBody,
}
impl Rejection {
	/// `400` with a plain error message.
	pub fn bad_request(message: impl Into<String>) -> Self {
		Self {
			status: 400,
			body: RejectionBody::Error(ErrorBody {
				error: message.into(),
				message: None,
				status: None,
			}),
		}
	}

	/// `500` carrying [`INTERNAL_ERROR`], the error's detail text, and the upstream status when
	/// the error has one.
	pub fn internal(err: &Error) -> Self {
		Self {
			status: 500,
			body: RejectionBody::Error(ErrorBody {
				error: INTERNAL_ERROR.into(),
				message: Some(err.to_string()),
				status: err.upstream_status(),
			}),
		}
	}

	/// Maps a client error: caller mistakes become `400`, everything else `500`.
	pub fn from_error(route: &'static str, err: &Error) -> Self {
		let rejection =
			if err.is_client_error() { Self::bad_request(err.to_string()) } else { Self::internal(err) };

		obs::record_request_failure(route, rejection.status, err);

		rejection
	}
}
impl Display for Rejection {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match &self.body {
			RejectionBody::Error(body) => write!(f, "HTTP {}: {}", self.status, body.error),
			RejectionBody::Callback(body) => write!(
				f,
				"HTTP {}: {}",
				self.status,
				body.error.as_deref().unwrap_or(INTERNAL_ERROR)
			),
			RejectionBody::Probe(body) => write!(f, "HTTP {}: {}", self.status, body.error),
		}
	}
}

/// Body variants a [`Rejection`] can carry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RejectionBody {
	/// `{ error, message?, status? }`.
	Error(ErrorBody),
	/// Callback-shaped failure (`success: false`).
	Callback(AuthCallbackResponse),
	/// Diagnostic failure echoing the marketplace response.
	Probe(ProbeFailure),
}

/// Generic error body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
	/// Short error summary.
	pub error: String,
	/// Underlying detail text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Upstream HTTP status, when the failure came from the marketplace.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<u16>,
}

/// Body returned when a diagnostic call gets a non-success status from the marketplace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbeFailure {
	/// Which diagnostic failed.
	pub error: String,
	/// Status the marketplace answered with.
	pub status: u16,
	/// Raw marketplace body.
	pub response: String,
}

/// Fails with [`Rejection::bad_request`] when `value` is absent or blank.
pub(crate) fn required<'a>(value: Option<&'a str>, message: &str) -> HandlerResult<&'a str> {
	match value.map(str::trim) {
		Some(value) if !value.is_empty() => Ok(value),
		_ => Err(Rejection::bad_request(message)),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn internal_rejection_echoes_upstream_status() {
		let err = Error::Upstream { endpoint: "users/me", status: 401, body: "invalid_token".into() };
		let rejection = Rejection::internal(&err);
		let value = serde_json::to_value(&rejection.body).expect("Rejection should serialize.");

		assert_eq!(rejection.status, 500);
		assert_eq!(value["error"], INTERNAL_ERROR);
		assert_eq!(value["status"], 401);
		assert!(value["message"].as_str().is_some_and(|m| m.contains("invalid_token")));
	}

	#[test]
	fn validation_errors_map_to_bad_request() {
		let rejection =
			Rejection::from_error("/mercadolibre/items", &Error::Validation { field: "itemId" });

		assert_eq!(rejection.status, 400);
	}

	#[test]
	fn bad_request_omits_optional_fields() {
		let value = serde_json::to_value(Rejection::bad_request("Access token is required").body)
			.expect("Rejection should serialize.");

		assert_eq!(value, serde_json::json!({ "error": "Access token is required" }));
	}

	#[test]
	fn required_trims_and_rejects_blanks() {
		assert_eq!(required(Some("  abc "), "missing"), Ok("abc"));
		assert!(required(Some(" \n"), "missing").is_err());
		assert!(required(None, "missing").is_err());
	}
}
