// self
use crate::{
	_prelude::*,
	flows::{MarketplaceClient, USERS_ME_ENDPOINT, expect_success, require},
	http::MarketplaceHttpClient,
	model::{MarketplaceUser, decode_strict},
	oauth::TransportErrorMapper,
	obs::{self, CallKind},
};

impl<C, M> MarketplaceClient<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the profile of the user `access_token` belongs to.
	///
	/// A non-success status is an [`Error::Upstream`]; a body that is not a profile object is an
	/// [`Error::Deserialization`]. Missing profile fields decode to their defaults.
	pub async fn fetch_user(&self, access_token: &str) -> Result<MarketplaceUser> {
		require("accessToken", access_token)?;

		obs::observe(CallKind::FetchUser, "fetch_user", async {
			let url = self.endpoint(&["users", "me"])?;
			let body = expect_success(USERS_ME_ENDPOINT, self.get(&url, access_token).await?)?;

			decode_strict(USERS_ME_ENDPOINT, &body)
		})
		.await
	}
}
