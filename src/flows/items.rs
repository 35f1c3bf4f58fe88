// self
use crate::{
	_prelude::*,
	flows::{
		ITEM_ENDPOINT, ITEM_SEARCH_ENDPOINT, MAX_AGGREGATED_ITEMS, MarketplaceClient,
		expect_success, require,
	},
	http::MarketplaceHttpClient,
	model::{ItemSearchResult, Product, ProductDetail, UserProductsResponse, decode_strict},
	oauth::TransportErrorMapper,
	obs::{self, CallKind, ItemSkip},
};

impl<C, M> MarketplaceClient<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Aggregates the products of the user `access_token` belongs to.
	///
	/// Looks the user up, lists their item ids, and fetches at most [`MAX_AGGREGATED_ITEMS`] of
	/// them one after another. Items that are unavailable or fail to load are logged and left
	/// out; `total_products` counts only the items that made it in. Failures of the profile or
	/// search calls abort the aggregate.
	pub async fn fetch_user_products(&self, access_token: &str) -> Result<UserProductsResponse> {
		require("accessToken", access_token)?;

		obs::observe(CallKind::FetchUserProducts, "fetch_user_products", async {
			let user = self.fetch_user(access_token).await?;
			let (_, search) = self.search_items(user.id, access_token).await?;
			let mut products = Vec::new();

			for item_id in search.item_ids().take(MAX_AGGREGATED_ITEMS) {
				match self.fetch_product_details(item_id, access_token).await {
					Ok(Some(product)) => products.push(product),
					Ok(None) => obs::record_item_skipped(
						item_id,
						ItemSkip::Unavailable,
						&"item endpoint returned a non-success status",
					),
					Err(e) => obs::record_item_skipped(item_id, ItemSkip::Failed, &e),
				}
			}

			Ok(UserProductsResponse::new(user.id.to_string(), products))
		})
		.await
	}

	/// Fetches the short-form projection of one item.
	///
	/// Returns `Ok(None)` when the item endpoint answers with a non-success status so callers
	/// can skip the item; transport and decode failures are still errors.
	pub async fn fetch_product_details(
		&self,
		item_id: &str,
		access_token: &str,
	) -> Result<Option<Product>> {
		require("itemId", item_id)?;

		obs::observe(CallKind::FetchItem, "fetch_product_details", async {
			let url = self.endpoint(&["items", item_id])?;
			let response = self.get(&url, access_token).await?;

			if !response.status().is_success() {
				return Ok(None);
			}

			let detail: ProductDetail = decode_strict(ITEM_ENDPOINT, response.body())?;

			Ok(Some(Product::from(detail)))
		})
		.await
	}

	/// Fetches the long-form projection of one item.
	///
	/// Unlike [`MarketplaceClient::fetch_product_details`], a non-success status is an
	/// [`Error::Upstream`].
	pub async fn fetch_product_detail(
		&self,
		item_id: &str,
		access_token: &str,
	) -> Result<ProductDetail> {
		require("itemId", item_id)?;
		require("accessToken", access_token)?;

		obs::observe(CallKind::FetchItem, "fetch_product_detail", async {
			let url = self.endpoint(&["items", item_id])?;
			let body = expect_success(ITEM_ENDPOINT, self.get(&url, access_token).await?)?;

			decode_strict(ITEM_ENDPOINT, &body)
		})
		.await
	}

	/// Lists the item ids of `user_id`, returning the HTTP status alongside the decoded body.
	pub(crate) async fn search_items(
		&self,
		user_id: u64,
		access_token: &str,
	) -> Result<(u16, ItemSearchResult)> {
		let user_id = user_id.to_string();
		let url = self.endpoint(&["users", user_id.as_str(), "items", "search"])?;
		let response = self.get(&url, access_token).await?;
		let status = response.status().as_u16();
		let body = expect_success(ITEM_SEARCH_ENDPOINT, response)?;

		Ok((status, decode_strict(ITEM_SEARCH_ENDPOINT, &body)?))
	}
}
