//! Caller-side storage for PKCE verifiers awaiting their authorization callback.
//!
//! The broker itself never holds a verifier between requests: [`crate::flows::MarketplaceClient::start_authorization`]
//! hands it back to the caller. HTTP front-ends that cannot carry the verifier in their own
//! session plug a [`VerifierStore`] in and key it by the authorization `state`.

pub mod memory;

pub use memory::MemoryVerifierStore;

// self
use crate::{_prelude::*, auth::PkceVerifier};

/// Boxed future returned by [`VerifierStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for pending authorizations.
pub trait VerifierStore
where
	Self: Send + Sync,
{
	/// Saves the verifier issued for `state`, replacing any previous entry.
	fn put(&self, state: String, verifier: PkceVerifier) -> StoreFuture<'_, ()>;

	/// Removes and returns the verifier saved for `state`.
	///
	/// Each verifier is handed out at most once.
	fn take<'a>(&'a self, state: &'a str) -> StoreFuture<'a, Option<PkceVerifier>>;
}

/// Error type produced by [`VerifierStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
