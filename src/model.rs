//! Local response shapes and the decoders that build them from marketplace JSON.
//!
//! Two decode modes exist side by side:
//!
//! - [`decode_strict`] for primary payloads ([`MarketplaceUser`], the search envelope, item
//!   details). Malformed JSON is a hard [`Error::Deserialization`].
//! - Field-level leniency through `#[serde(default)]` and [`lenient::null_as_default`], so a
//!   missing or `null` key never fails a decode that is otherwise well formed.

pub mod item;
pub mod lenient;
pub mod search;
pub mod token;
pub mod user;

pub use item::*;
pub use lenient::decode_strict;
pub use search::*;
pub use token::*;
pub use user::*;
