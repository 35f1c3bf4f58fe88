//! OAuth token-exchange facade built on the `oauth2` crate.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthorizationCode, Client, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	ExtraTokenFields, HttpClientError, PkceCodeVerifier, RedirectUrl, RequestTokenError,
	StandardRevocableToken, StandardTokenResponse, TokenResponse as _, TokenUrl,
	basic::{
		BasicErrorResponse, BasicRequestTokenError, BasicRevocationErrorResponse,
		BasicTokenIntrospectionResponse, BasicTokenType,
	},
};
// self
use crate::{
	_prelude::*,
	auth::{PkceVerifier, TokenSecret},
	config::MarketplaceConfig,
	error::{ConfigError, TransportError},
	http::{MarketplaceHttpClient, ResponseMetadata, ResponseMetadataSlot},
	model::TokenResponse,
};

/// Endpoint label used in errors raised by the token exchange.
pub const TOKEN_ENDPOINT: &str = "oauth/token";

type MarketplaceTokenResponse = StandardTokenResponse<MarketplaceTokenFields, BasicTokenType>;
type UnconfiguredClient = Client<
	BasicErrorResponse,
	MarketplaceTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
>;
type ConfiguredClient = Client<
	BasicErrorResponse,
	MarketplaceTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;

/// Non-standard fields the marketplace adds to its token response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MarketplaceTokenFields {
	/// Marketplace user the token was issued for.
	#[serde(default)]
	pub user_id: Option<u64>,
}
impl ExtraTokenFields for MarketplaceTokenFields {}

/// Maps HTTP transport failures into broker [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a broker error.
	fn map_transport_error(
		&self,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		_meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::Other { message }.into(),
			_ => TransportError::Other { message: "unrecognized transport failure".into() }.into(),
		}
	}
}

/// Performs the authorization-code exchange against the configured token endpoint.
///
/// Client credentials travel in the form body (`client_secret_post`), next to `grant_type`,
/// `code`, `redirect_uri`, and `code_verifier`.
pub(crate) struct TokenFacade<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> TokenFacade<C, M>
where
	C: ?Sized + MarketplaceHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn from_config(
		config: &MarketplaceConfig,
		http_client: Arc<C>,
		error_mapper: Arc<M>,
	) -> Self {
		let oauth_client: ConfiguredClient =
			UnconfiguredClient::new(ClientId::new(config.client_id.clone()))
				.set_client_secret(ClientSecret::new(config.client_secret.expose().to_owned()))
				.set_token_uri(TokenUrl::from_url(config.endpoints.token.clone()))
				.set_redirect_uri(RedirectUrl::from_url(config.redirect_uri.clone()))
				.set_auth_type(AuthType::RequestBody);

		Self { oauth_client, http_client, error_mapper }
	}

	pub(crate) async fn exchange_authorization_code(
		&self,
		code: &str,
		verifier: &PkceVerifier,
	) -> Result<TokenResponse> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let response = self
			.oauth_client
			.exchange_code(AuthorizationCode::new(code.to_owned()))
			.set_pkce_verifier(PkceCodeVerifier::new(verifier.secret().to_owned()))
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(meta.take(), err, self.error_mapper.as_ref()))?;

		Ok(map_token_response(response))
	}
}

fn map_token_response(response: MarketplaceTokenResponse) -> TokenResponse {
	let scope = response
		.scopes()
		.map(|scopes| scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" "))
		.unwrap_or_default();

	TokenResponse {
		access_token: TokenSecret::new(response.access_token().secret().to_owned()),
		token_type: response.token_type().as_ref().to_owned(),
		expires_in: response.expires_in().map(|ttl| ttl.as_secs()).unwrap_or_default(),
		scope,
		user_id: response.extra_fields().user_id.unwrap_or_default(),
		refresh_token: response
			.refresh_token()
			.map(|refresh| TokenSecret::new(refresh.secret().to_owned())),
	}
}

fn map_request_error<E, M>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let status = meta.as_ref().and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => Error::TokenExchange {
			error: response.error().as_ref().to_owned(),
			error_description: response.error_description().cloned().unwrap_or_default(),
			status,
		},
		RequestTokenError::Request(error) => mapper.map_transport_error(meta.as_ref(), error),
		RequestTokenError::Parse(source, body) => match status {
			Some(status) if !meta.as_ref().is_some_and(ResponseMetadata::is_success) =>
				Error::Upstream {
					endpoint: TOKEN_ENDPOINT,
					status,
					body: String::from_utf8_lossy(&body).into_owned(),
				},
			_ => Error::Deserialization { endpoint: TOKEN_ENDPOINT, source: Box::new(source) },
		},
		RequestTokenError::Other(message) => match status {
			Some(_) if meta.as_ref().is_some_and(ResponseMetadata::is_success) =>
				Error::Deserialization { endpoint: TOKEN_ENDPOINT, source: message.into() },
			Some(status) => Error::Upstream { endpoint: TOKEN_ENDPOINT, status, body: message },
			None => TransportError::Other { message }.into(),
		},
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}
