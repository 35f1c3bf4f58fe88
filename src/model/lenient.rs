//! Decode helpers separating hard-fail payloads from soft-fail fields.

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::_prelude::*;

/// Deserializes `T`, mapping an explicit JSON `null` to `T::default()`.
///
/// Combine with `#[serde(default)]` so absent keys take the same path.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes an id the marketplace sends either as a string or as a number.
///
/// `null` and absent values become an empty string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Loose {
		Text(String),
		Unsigned(u64),
		Signed(i64),
	}

	Ok(match Option::<Loose>::deserialize(deserializer)? {
		Some(Loose::Text(value)) => value,
		Some(Loose::Unsigned(value)) => value.to_string(),
		Some(Loose::Signed(value)) => value.to_string(),
		None => String::new(),
	})
}

/// Decodes a marketplace response body, reporting the JSON path of the first mismatch.
pub fn decode_strict<T>(endpoint: &'static str, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Deserialization { endpoint, source: Box::new(source) })
}
