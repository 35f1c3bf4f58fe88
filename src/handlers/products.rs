//! Product aggregate, item detail, and fixture product handlers.

// self
use crate::{
	fixtures,
	flows::MarketplaceClient,
	handlers::{HandlerResult, MISSING_ACCESS_TOKEN, MISSING_USER_ID, Rejection, required},
	http::MarketplaceHttpClient,
	model::{ProductDetail, UserProductsResponse},
	oauth::TransportErrorMapper,
};

/// Message returned when the item id is missing.
pub const MISSING_ITEM_ID: &str = "Item id is required";

/// Aggregates the products of the token's owner.
pub async fn products_with_token<C, M>(
	client: &MarketplaceClient<C, M>,
	access_token: Option<&str>,
) -> HandlerResult<UserProductsResponse>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let access_token = required(access_token, MISSING_ACCESS_TOKEN)?;

	client
		.fetch_user_products(access_token)
		.await
		.map_err(|e| Rejection::from_error("/mercadolibre/products/with-token", &e))
}

/// Returns the long-form projection of one item.
pub async fn item_with_token<C, M>(
	client: &MarketplaceClient<C, M>,
	item_id: Option<&str>,
	access_token: Option<&str>,
) -> HandlerResult<ProductDetail>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let item_id = required(item_id, MISSING_ITEM_ID)?;
	let access_token = required(access_token, MISSING_ACCESS_TOKEN)?;

	client
		.fetch_product_detail(item_id, access_token)
		.await
		.map_err(|e| Rejection::from_error("/mercadolibre/items/{itemId}", &e))
}

/// Returns sample products for `user_id` (development fixture, no marketplace call).
pub fn products_by_user_id(user_id: Option<&str>) -> HandlerResult<UserProductsResponse> {
	let user_id = required(user_id, MISSING_USER_ID)?;

	Ok(fixtures::sample_user_products(user_id))
}
