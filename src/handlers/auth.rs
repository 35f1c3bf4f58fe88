//! Authorization start and callback handlers.

// self
use crate::{
	_prelude::*,
	auth::PkceVerifier,
	flows::{AuthorizationStart, MarketplaceClient},
	handlers::{HandlerResult, INTERNAL_ERROR, Rejection, RejectionBody},
	http::MarketplaceHttpClient,
	oauth::TransportErrorMapper,
	obs,
};

/// Message returned when the callback arrives without a code.
pub const MISSING_CODE: &str = "Authorization code is required";
/// Message returned when no verifier is pending for the callback.
pub const MISSING_VERIFIER: &str = "Code verifier not found for this authorization";

/// Payload returned by the authorization-start endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
	/// URL the end-user should be sent to.
	pub auth_url: String,
}

/// Payload returned by the authorization callback, on success and on failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCallbackResponse {
	/// Whether a token was obtained.
	pub success: bool,
	/// Issued access token.
	pub access_token: Option<String>,
	/// Failure summary.
	pub error: Option<String>,
	/// Success message or failure detail.
	pub message: Option<String>,
	/// Marketplace user the token belongs to.
	pub user_id: Option<u64>,
}
impl AuthCallbackResponse {
	fn failure(error: impl Into<String>, message: Option<String>) -> Self {
		Self { success: false, error: Some(error.into()), message, ..Default::default() }
	}
}

/// Starts an authorization.
///
/// The returned [`AuthorizationStart`] holds the verifier; the caller must persist it (for
/// example keyed by its `state`) before answering with the URL.
pub fn start_auth<C, M>(client: &MarketplaceClient<C, M>) -> (AuthUrlResponse, AuthorizationStart)
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let start = client.start_authorization();

	(AuthUrlResponse { auth_url: start.authorize_url.to_string() }, start)
}

/// Completes an authorization by exchanging `code` with the verifier the caller kept.
pub async fn auth_callback<C, M>(
	client: &MarketplaceClient<C, M>,
	code: Option<&str>,
	verifier: Option<&PkceVerifier>,
) -> HandlerResult<AuthCallbackResponse>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let Some(code) = code.map(str::trim).filter(|code| !code.is_empty()) else {
		return Err(callback_rejection(400, AuthCallbackResponse::failure(MISSING_CODE, None)));
	};
	let Some(verifier) = verifier.filter(|verifier| !verifier.secret().is_empty()) else {
		return Err(callback_rejection(400, AuthCallbackResponse::failure(MISSING_VERIFIER, None)));
	};

	match client.exchange_code_for_token(code, verifier).await {
		Ok(token) => Ok(AuthCallbackResponse {
			success: true,
			access_token: Some(token.access_token.into_inner()),
			error: None,
			message: Some("Authentication successful".into()),
			user_id: Some(token.user_id),
		}),
		Err(e) => {
			obs::record_request_failure("/mercadolibre/callback", 500, &e);

			Err(callback_rejection(
				500,
				AuthCallbackResponse::failure(INTERNAL_ERROR, Some(e.to_string())),
			))
		},
	}
}

fn callback_rejection(status: u16, body: AuthCallbackResponse) -> Rejection {
	Rejection { status, body: RejectionBody::Callback(body) }
}
