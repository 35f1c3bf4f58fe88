//! Item-search envelope returned by `users/{id}/items/search`.

// self
use crate::{
	_prelude::*,
	model::lenient::{null_as_default, string_or_number},
};

/// Item ids listed for a seller. The marketplace returns bare id strings, not objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSearchResult {
	/// Seller id echoed by the marketplace.
	#[serde(deserialize_with = "string_or_number")]
	pub seller_id: String,
	/// Pagination block; only the total is kept.
	#[serde(deserialize_with = "null_as_default")]
	pub paging: SearchPaging,
	/// Item ids in listing order. Entries may be `null`.
	#[serde(deserialize_with = "null_as_default")]
	pub results: Vec<Option<String>>,
}
impl ItemSearchResult {
	/// Iterates over the usable (non-empty) item ids in listing order.
	pub fn item_ids(&self) -> impl Iterator<Item = &str> {
		self.results.iter().filter_map(|id| id.as_deref()).filter(|id| !id.trim().is_empty())
	}
}

/// Pagination block of [`ItemSearchResult`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPaging {
	/// Total number of items the seller has listed.
	#[serde(deserialize_with = "null_as_default")]
	pub total: u64,
}
