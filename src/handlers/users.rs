//! Profile handlers.

// self
use crate::{
	fixtures,
	flows::MarketplaceClient,
	handlers::{HandlerResult, Rejection, required},
	http::MarketplaceHttpClient,
	model::MarketplaceUser,
	oauth::TransportErrorMapper,
};

/// Message returned when the access token is missing.
pub const MISSING_ACCESS_TOKEN: &str = "Access token is required";
/// Message returned when the user id is missing.
pub const MISSING_USER_ID: &str = "User id is required";

/// Returns the profile of the token's owner.
pub async fn user_with_token<C, M>(
	client: &MarketplaceClient<C, M>,
	access_token: Option<&str>,
) -> HandlerResult<MarketplaceUser>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let access_token = required(access_token, MISSING_ACCESS_TOKEN)?;

	client
		.fetch_user(access_token)
		.await
		.map_err(|e| Rejection::from_error("/mercadolibre/user/with-token", &e))
}

/// Returns the sample profile for `user_id` (development fixture, no marketplace call).
pub fn user_by_id(user_id: Option<&str>) -> HandlerResult<MarketplaceUser> {
	let user_id = required(user_id, MISSING_USER_ID)?;

	Ok(fixtures::sample_user(user_id))
}
