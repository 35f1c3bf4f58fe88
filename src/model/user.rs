//! Marketplace user profile projection.

// self
use crate::{_prelude::*, model::lenient::null_as_default};

/// Read-only projection of the marketplace's `users/me` profile.
///
/// Missing or `null` fields decode to empty strings (or `0` for the id); anything else that does
/// not match the shape is a hard decode failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceUser {
	/// Marketplace user id.
	#[serde(default, deserialize_with = "null_as_default")]
	pub id: u64,
	/// Public nickname.
	#[serde(default, deserialize_with = "null_as_default")]
	pub nickname: String,
	/// Given name.
	#[serde(default, deserialize_with = "null_as_default")]
	pub first_name: String,
	/// Family name.
	#[serde(default, deserialize_with = "null_as_default")]
	pub last_name: String,
	/// Contact email; often withheld by the marketplace.
	#[serde(default, deserialize_with = "null_as_default")]
	pub email: String,
	/// ISO country code, e.g. `AR`.
	#[serde(default, deserialize_with = "null_as_default")]
	pub country_id: String,
	/// Marketplace site id, e.g. `MLA`.
	#[serde(default, deserialize_with = "null_as_default")]
	pub site_id: String,
}
