//! Liveness handler.

// self
use crate::_prelude::*;

/// Liveness payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
	/// Always `OK` while the process is serving.
	pub status: String,
	/// Human-readable status line.
	pub message: String,
	/// Time the response was produced.
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}

/// Reports that the service is up.
pub fn health() -> HealthResponse {
	HealthResponse {
		status: "OK".into(),
		message: "Service is running".into(),
		timestamp: OffsetDateTime::now_utc(),
	}
}
