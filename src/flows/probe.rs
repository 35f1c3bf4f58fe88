//! Diagnostic passthroughs that report what the marketplace returns for a token.

// self
use crate::{
	_prelude::*,
	flows::{MarketplaceClient, USERS_ME_ENDPOINT, expect_success, require},
	http::MarketplaceHttpClient,
	model::{ItemSearchResult, MarketplaceUser, decode_strict},
	oauth::TransportErrorMapper,
	obs::{self, CallKind},
};

/// Result of checking a token against the profile endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenProbe {
	/// HTTP status the marketplace answered with.
	pub status: u16,
	/// Cleaned profile projection.
	pub user: MarketplaceUser,
}

/// Result of listing the token owner's items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductsProbe {
	/// Marketplace user id of the token owner.
	pub user_id: u64,
	/// HTTP status the item search answered with.
	pub status: u16,
	/// Seller id, total, and bare item ids.
	pub products: ItemSearchResult,
}

impl<C, M> MarketplaceClient<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Calls the profile endpoint with `access_token` and reports the outcome.
	///
	/// A non-success status surfaces as [`Error::Upstream`] so callers can echo it.
	pub async fn probe_token(&self, access_token: &str) -> Result<TokenProbe> {
		require("accessToken", access_token)?;

		obs::observe(CallKind::Probe, "probe_token", async {
			let url = self.endpoint(&["users", "me"])?;
			let response = self.get(&url, access_token).await?;
			let status = response.status().as_u16();
			let body = expect_success(USERS_ME_ENDPOINT, response)?;

			Ok(TokenProbe { status, user: decode_strict(USERS_ME_ENDPOINT, &body)? })
		})
		.await
	}

	/// Looks up the token owner and lists their item ids without fetching item details.
	pub async fn probe_products(&self, access_token: &str) -> Result<ProductsProbe> {
		require("accessToken", access_token)?;

		obs::observe(CallKind::Probe, "probe_products", async {
			let user = self.fetch_user(access_token).await?;
			let (status, products) = self.search_items(user.id, access_token).await?;

			Ok(ProductsProbe { user_id: user.id, status, products })
		})
		.await
	}
}
