//! Thread-safe in-memory [`VerifierStore`] implementation for single-process deployments.

// self
use crate::{
	_prelude::*,
	auth::PkceVerifier,
	store::{StoreError, StoreFuture, VerifierStore},
};

/// Default lifetime of a pending authorization.
pub const DEFAULT_PENDING_TTL: time::Duration = time::Duration::minutes(10);

type PendingMap = Arc<RwLock<HashMap<String, Pending>>>;

#[derive(Clone, Debug)]
struct Pending {
	verifier: PkceVerifier,
	issued_at: OffsetDateTime,
}

/// Keeps verifiers in-process; entries older than the TTL are treated as absent.
#[derive(Clone, Debug)]
pub struct MemoryVerifierStore {
	pending: PendingMap,
	ttl: time::Duration,
}
impl MemoryVerifierStore {
	/// Creates a store whose entries expire after `ttl`.
	pub fn with_ttl(ttl: time::Duration) -> Self {
		Self { pending: Default::default(), ttl }
	}

	/// Number of entries currently held, expired ones included.
	pub fn len(&self) -> usize {
		self.pending.read().len()
	}

	/// Whether the store holds no entries.
	pub fn is_empty(&self) -> bool {
		self.pending.read().is_empty()
	}

	fn put_now(&self, state: String, verifier: PkceVerifier, now: OffsetDateTime) {
		let mut guard = self.pending.write();

		guard.retain(|_, pending| now - pending.issued_at < self.ttl);
		guard.insert(state, Pending { verifier, issued_at: now });
	}

	fn take_now(&self, state: &str, now: OffsetDateTime) -> Option<PkceVerifier> {
		let pending = self.pending.write().remove(state)?;

		(now - pending.issued_at < self.ttl).then_some(pending.verifier)
	}
}
impl Default for MemoryVerifierStore {
	fn default() -> Self {
		Self::with_ttl(DEFAULT_PENDING_TTL)
	}
}
impl VerifierStore for MemoryVerifierStore {
	fn put(&self, state: String, verifier: PkceVerifier) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			self.put_now(state, verifier, OffsetDateTime::now_utc());

			Ok::<_, StoreError>(())
		})
	}

	fn take<'a>(&'a self, state: &'a str) -> StoreFuture<'a, Option<PkceVerifier>> {
		Box::pin(async move { Ok::<_, StoreError>(self.take_now(state, OffsetDateTime::now_utc())) })
	}
}
