//! PKCE (RFC 7636) verifier and challenge generation.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Number of random bytes drawn for each verifier.
pub const PKCE_VERIFIER_BYTES: usize = 32;

/// Supported PKCE challenge methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
		}
	}
}
impl Display for PkceCodeChallengeMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Secret PKCE verifier; base64url (no padding) over 32 CSPRNG bytes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PkceVerifier(String);
impl PkceVerifier {
	/// Wraps a verifier previously produced by [`generate_verifier`] (e.g. loaded back from a
	/// caller-side store).
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the verifier string. Callers must avoid logging it.
	pub fn secret(&self) -> &str {
		&self.0
	}
}
impl Debug for PkceVerifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PkceVerifier").field(&"<redacted>").finish()
	}
}

/// Public PKCE challenge derived from a [`PkceVerifier`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PkceChallenge(String);
impl PkceChallenge {
	/// Returns the encoded challenge.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for PkceChallenge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Verifier, challenge, and method produced together for one authorization attempt.
#[derive(Clone, Debug)]
pub struct PkcePair {
	/// Secret verifier presented during the code exchange.
	pub verifier: PkceVerifier,
	/// Challenge sent on the authorize URL.
	pub challenge: PkceChallenge,
	/// Challenge method (currently always `S256`).
	pub method: PkceCodeChallengeMethod,
}
impl PkcePair {
	/// Draws a fresh verifier and derives its challenge.
	pub fn generate() -> Self {
		let verifier = generate_verifier();
		let challenge = generate_challenge(&verifier);

		Self { verifier, challenge, method: PkceCodeChallengeMethod::S256 }
	}
}

/// Draws [`PKCE_VERIFIER_BYTES`] bytes from the thread-local CSPRNG and encodes them as
/// base64url without padding.
pub fn generate_verifier() -> PkceVerifier {
	let mut bytes = [0_u8; PKCE_VERIFIER_BYTES];

	rand::rng().fill_bytes(&mut bytes);

	PkceVerifier(URL_SAFE_NO_PAD.encode(bytes))
}

/// Computes `BASE64URL-NOPAD(SHA256(verifier))`.
pub fn generate_challenge(verifier: &PkceVerifier) -> PkceChallenge {
	let mut hasher = Sha256::new();

	hasher.update(verifier.secret().as_bytes());

	PkceChallenge(URL_SAFE_NO_PAD.encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn verifier_decodes_to_32_bytes_without_padding_or_std_alphabet() {
		for _ in 0..64 {
			let verifier = generate_verifier();
			let raw = verifier.secret();

			assert!(!raw.contains('+'));
			assert!(!raw.contains('/'));
			assert!(!raw.contains('='));

			let decoded =
				URL_SAFE_NO_PAD.decode(raw).expect("Verifier should be valid base64url.");

			assert_eq!(decoded.len(), PKCE_VERIFIER_BYTES);
		}
	}

	#[test]
	fn verifiers_are_not_repeated() {
		let a = generate_verifier();
		let b = generate_verifier();

		assert_ne!(a, b);
	}

	#[test]
	fn challenge_is_deterministic() {
		let verifier = generate_verifier();

		assert_eq!(generate_challenge(&verifier), generate_challenge(&verifier));
	}

	#[test]
	fn challenge_matches_rfc7636_appendix_b() {
		let verifier = PkceVerifier::new("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");

		assert_eq!(
			generate_challenge(&verifier).as_str(),
			"E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
		);
	}

	#[test]
	fn pair_challenge_is_derived_from_its_verifier() {
		let pair = PkcePair::generate();

		assert_eq!(pair.challenge, generate_challenge(&pair.verifier));
		assert_eq!(pair.method.as_str(), "S256");
	}

	#[test]
	fn verifier_debug_is_redacted() {
		let verifier = PkceVerifier::new("super-secret");

		assert_eq!(format!("{verifier:?}"), "PkceVerifier(\"<redacted>\")");
	}
}
