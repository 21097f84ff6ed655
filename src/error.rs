//! Client-level error types shared across the transport, the login chain, and endpoints.

// self
use crate::{_prelude::*, http::HttpResponse};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// The HTTP-derived variants mirror the status the server answered with; each carries an
/// [`ApiError`] describing the response. The login-specific variants are raised by the
/// credential chain.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem, detected before any network call.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A value the login handshake depends on could not be extracted from a response.
	#[error(transparent)]
	Handshake(#[from] HandshakeError),
	/// A response body could not be decoded into the expected shape.
	#[error("Response body from {url} could not be decoded.")]
	Decode {
		/// Requested URL.
		url: Url,
		/// Path-aware decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A base64 payload embedded in a response body could not be decoded.
	#[error("Embedded payload from {url} is not valid base64.")]
	Base64 {
		/// Requested URL.
		url: Url,
		/// Underlying decoding failure.
		#[source]
		source: base64::DecodeError,
	},
	/// A request body could not be encoded as JSON.
	#[error("Request body could not be encoded.")]
	Encode(#[source] serde_json::Error),

	/// HTTP 400.
	#[error("Bad request: {0}")]
	BadRequest(ApiError),
	/// HTTP 401, usually an invalid or expired bearer token.
	#[error("Unauthorized: {0}")]
	Unauthorized(ApiError),
	/// HTTP 403.
	#[error("Forbidden: {0}")]
	Forbidden(ApiError),
	/// HTTP 404.
	#[error("Not found: {0}")]
	NotFound(ApiError),
	/// HTTP 429 that was not (or no longer) retried.
	#[error("Too many requests: {0}")]
	TooManyRequests(ApiError),
	/// HTTP 5xx.
	#[error("Server error: {0}")]
	ServerError(ApiError),
	/// Any other non-success status; carries the raw response.
	#[error("Unexpected response: {0}")]
	Http(ApiError),

	/// The login chain rejected the account.
	#[error("Login failed: {0}")]
	LoginFailure(#[from] LoginFailure),
	/// The identity is valid but does not own the product.
	#[error("The account does not own a Minecraft license: {0}")]
	MissingLicense(ApiError),
	/// The account owns the product but has not created a profile yet.
	#[error("The account has not created a Minecraft profile yet: {0}")]
	MissingProfile(ApiError),
	/// A credential was attached before its entitlements were validated.
	#[error("Credential has not passed entitlement validation.")]
	UnverifiedCredential,
	/// No player matches the given name or UUID.
	#[error("Player `{0}` does not exist.")]
	UnknownPlayer(String),
	/// The profile lists no skin whose variant could be changed.
	#[error("The profile has no skin to update.")]
	NoSkin,
}
impl Error {
	/// Returns the HTTP status behind the error, if it was derived from a response.
	pub fn status(&self) -> Option<u16> {
		self.api_error().map(|err| err.status)
	}

	/// Returns the response description behind the error, if any.
	pub fn api_error(&self) -> Option<&ApiError> {
		match self {
			Self::BadRequest(err)
			| Self::Unauthorized(err)
			| Self::Forbidden(err)
			| Self::NotFound(err)
			| Self::TooManyRequests(err)
			| Self::ServerError(err)
			| Self::Http(err)
			| Self::MissingLicense(err)
			| Self::MissingProfile(err) => Some(err),
			_ => None,
		}
	}

	/// Classifies a non-success response by status code.
	pub(crate) fn from_status(err: ApiError) -> Self {
		match err.status {
			400 => Self::BadRequest(err),
			401 => Self::Unauthorized(err),
			403 => Self::Forbidden(err),
			404 => Self::NotFound(err),
			429 => Self::TooManyRequests(err),
			status if status >= 500 => Self::ServerError(err),
			_ => Self::Http(err),
		}
	}
}

/// Description of a non-success HTTP response.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// URL the request was issued against.
	pub url: Url,
	/// Server-supplied `errorMessage`, or `[HTTP {status}] - {url}` when absent.
	pub message: String,
	/// Raw response body.
	pub body: String,
}
impl ApiError {
	/// Builds the error description for `response`, which answered a request to `url`.
	pub fn from_response(url: &Url, response: &HttpResponse) -> Self {
		let body = response.text();
		let message = server_message(&body)
			.map(|message| format!("[HTTP {}] - {message}", response.status))
			.unwrap_or_else(|| format!("[HTTP {}] - {url}", response.status));

		Self { status: response.status, url: url.clone(), message, body }
	}
}

fn server_message(body: &str) -> Option<String> {
	let value = serde_json::from_str::<serde_json::Value>(body).ok()?;

	value.get("errorMessage")?.as_str().map(str::to_owned)
}

/// Reasons the login chain rejects an account.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum LoginFailure {
	/// Microsoft did not redirect with an access token.
	#[error("The email or password is incorrect.")]
	InvalidCredentials,
	/// The entitlement endpoint answered with an empty body.
	#[error("The bearer token is invalid.")]
	InvalidBearerToken,
	/// XSTS refused to authorize the Xbox Live identity.
	#[error(transparent)]
	Xsts(#[from] XstsDenial),
}

/// Known XSTS `XErr` codes returned with HTTP 401.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum XstsDenial {
	/// 2148916233.
	#[error("The account doesn't have an Xbox account.")]
	NoXboxAccount,
	/// 2148916235.
	#[error("The account is from a country where Xbox Live is not available/banned.")]
	CountryUnavailable,
	/// 2148916236 or 2148916237.
	#[error("The account needs adult verification on Xbox page. (South Korea)")]
	AdultVerificationRequired {
		/// Raw `XErr` value.
		code: u64,
	},
	/// 2148916238.
	#[error(
		"The account is a child (under 18) and cannot proceed unless the account is added to a Family by an adult."
	)]
	ChildAccount,
}
impl XstsDenial {
	/// Maps an `XErr` value to a known denial; unknown codes yield `None`.
	pub fn from_xerr(code: u64) -> Option<Self> {
		match code {
			2148916233 => Some(Self::NoXboxAccount),
			2148916235 => Some(Self::CountryUnavailable),
			2148916236 | 2148916237 => Some(Self::AdultVerificationRequired { code }),
			2148916238 => Some(Self::ChildAccount),
			_ => None,
		}
	}

	/// Returns the raw `XErr` value.
	pub fn code(self) -> u64 {
		match self {
			Self::NoXboxAccount => 2148916233,
			Self::CountryUnavailable => 2148916235,
			Self::AdultVerificationRequired { code } => code,
			Self::ChildAccount => 2148916238,
		}
	}
}

/// Failures extracting handshake values from provider responses.
#[derive(Debug, ThisError)]
pub enum HandshakeError {
	/// The OAuth page did not contain the hidden `PPFT` form value.
	#[error("Login page does not contain the hidden form token.")]
	MissingFormToken,
	/// The OAuth page did not contain the `urlPost` target.
	#[error("Login page does not contain the form post URL.")]
	MissingPostUrl,
	/// The extracted `urlPost` target is not a valid URL.
	#[error("Login page form post URL `{raw}` is invalid.")]
	InvalidPostUrl {
		/// Extracted value.
		raw: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A JSON field the next hop depends on is absent.
	#[error("The {hop} response is missing `{field}`.")]
	MissingField {
		/// Hop label.
		hop: &'static str,
		/// Dotted field path.
		field: &'static str,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Neither account credentials nor a bearer token were supplied.
	#[error("Either an email/password or a bearer token must be supplied.")]
	MissingCredentials,
	/// Only half of the email/password pair was supplied.
	#[error("Both an email and a password must be supplied.")]
	IncompleteCredentials,
	/// Endpoint set failed validation.
	#[error(transparent)]
	Endpoints(#[from] crate::endpoints::EndpointsError),
	/// A username or UUID failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// A skin variant string is neither `classic` nor `slim`.
	#[error("Skin variant `{0}` must be either `classic` or `slim`.")]
	InvalidSkinVariant(String),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Requested URL.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(url: &Url, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { url: url.to_string(), source: Box::new(src) }
	}
}
