//! Microsoft → Xbox Live → XSTS → Minecraft credential chain.
//!
//! The chain is an explicit state machine: [`LoginState`] tags where a login stands and
//! [`LoginChain::advance`] performs exactly one transition. [`LoginChain::run`] drives it from
//! [`LoginState::Start`] to [`LoginState::Ready`]. Every hop is also exposed as its own method
//! so it can be exercised in isolation.
//!
//! A pre-obtained bearer token skips every provider hop and goes straight to entitlement
//! validation, which always runs before a [`Credential`] is handed out.

mod entitlement;
mod form;
mod payload;
mod state;

pub use form::*;
pub use state::*;

// self
use crate::{
	_prelude::*,
	auth::{Credential, TokenSecret},
	endpoints::Endpoints,
	error::{ApiError, ConfigError, HandshakeError, LoginFailure, XstsDenial},
	http::{HttpResponse, HttpTransport},
	login::payload::{
		MinecraftLoginRequest, MinecraftLoginResponse, XblAuthRequest, XboxTokenResponse,
		XstsAuthRequest,
	},
	obs::{self, HopOutcome, HopSpan, LoginHop},
	transport::{ApiRequest, Transport},
};

const XSTS_DENIED: u16 = 401;
const REDIRECTS: [u16; 5] = [301, 302, 303, 307, 308];

/// Secret material the chain starts from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginCredentials {
	/// Microsoft account email and password; runs every hop.
	Account {
		/// Account email.
		email: String,
		/// Account password.
		password: TokenSecret,
	},
	/// Pre-obtained Minecraft bearer token; only entitlement validation runs.
	Bearer(TokenSecret),
}
impl LoginCredentials {
	/// Account credentials.
	pub fn account(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self::Account { email: email.into(), password: TokenSecret::new(password) }
	}

	/// Pre-obtained bearer token, with or without a `Bearer ` prefix.
	pub fn bearer(token: impl Into<String>) -> Self {
		Self::Bearer(TokenSecret::new(token))
	}

	/// Picks the entry point from optional inputs; blank strings count as absent.
	///
	/// A bearer token wins over account credentials. Without one, both the email and the
	/// password are required.
	pub fn from_parts(
		email: Option<&str>,
		password: Option<&str>,
		bearer_token: Option<&str>,
	) -> Result<Self, ConfigError> {
		fn present(value: Option<&str>) -> Option<&str> {
			value.filter(|v| !v.trim().is_empty())
		}

		match (present(email), present(password), present(bearer_token)) {
			(_, _, Some(token)) => Ok(Self::bearer(token)),
			(Some(email), Some(password), None) => Ok(Self::account(email, password)),
			(None, None, None) => Err(ConfigError::MissingCredentials),
			_ => Err(ConfigError::IncompleteCredentials),
		}
	}

	fn account_parts(&self) -> Option<(&str, &TokenSecret)> {
		match self {
			Self::Account { email, password } => Some((email.as_str(), password)),
			Self::Bearer(_) => None,
		}
	}
}

/// Drives the credential chain over a shared [`Transport`].
pub struct LoginChain<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Transport<T>,
	endpoints: Arc<Endpoints>,
	credentials: LoginCredentials,
	parser: Arc<dyn LoginPageParser>,
}
impl<T> LoginChain<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a chain using the regex login page parser.
	pub fn new(
		transport: Transport<T>,
		endpoints: Arc<Endpoints>,
		credentials: LoginCredentials,
	) -> Self {
		Self { transport, endpoints, credentials, parser: Arc::new(RegexLoginPageParser) }
	}

	/// Replaces the login page parser.
	pub fn with_parser(mut self, parser: impl LoginPageParser) -> Self {
		self.parser = Arc::new(parser);

		self
	}

	/// Transport the hops are sent through.
	pub fn transport(&self) -> &Transport<T> {
		&self.transport
	}

	/// Endpoint set the hops target.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Runs the chain to completion and returns the verified credential.
	pub async fn run(&self) -> Result<Credential> {
		let mut state = LoginState::Start;

		loop {
			state = match self.advance(state).await? {
				LoginState::Ready(credential) => return Ok(credential),
				next => next,
			};
		}
	}

	/// Performs one transition. `Ready` is a fixed point.
	pub async fn advance(&self, state: LoginState) -> Result<LoginState> {
		let next = match state {
			LoginState::Start => match &self.credentials {
				LoginCredentials::Bearer(token) => LoginState::AttachToken { bearer: token.clone() },
				LoginCredentials::Account { .. } => LoginState::OAuthRequest,
			},
			LoginState::OAuthRequest =>
				LoginState::MicrosoftAuth { form: self.fetch_login_form().await? },
			LoginState::MicrosoftAuth { form } => {
				let (email, password) =
					self.credentials.account_parts().ok_or(ConfigError::MissingCredentials)?;

				LoginState::XboxLiveAuth {
					tokens: self.authenticate_microsoft(&form, email, password).await?,
				}
			},
			LoginState::XboxLiveAuth { tokens } => LoginState::XstsAuthorize {
				xbl: self.authenticate_xbox_live(&tokens.access_token).await?,
			},
			LoginState::XstsAuthorize { xbl } => {
				let xsts_token = self.authorize_xsts(&xbl.token).await?;

				LoginState::MinecraftLogin { user_hash: xbl.user_hash, xsts_token }
			},
			LoginState::MinecraftLogin { user_hash, xsts_token } => LoginState::AttachToken {
				bearer: self.login_minecraft(&user_hash, &xsts_token).await?,
			},
			LoginState::AttachToken { bearer } => LoginState::ValidateEntitlement {
				credential: Credential::unverified(bearer.expose()),
			},
			LoginState::ValidateEntitlement { credential } =>
				LoginState::Ready(self.validate_entitlement(credential).await?),
			ready @ LoginState::Ready(_) => ready,
		};

		Ok(next)
	}

	/// Fetches the Live OAuth page and scrapes the hidden login form.
	pub async fn fetch_login_form(&self) -> Result<LoginForm> {
		observe(LoginHop::OAuthPage, "fetch_login_form", async {
			let request = ApiRequest::get(self.endpoints.live_authorize_url());
			let response = self.transport.execute(request).await?;

			Ok(self.parser.parse(&response.text())?)
		})
		.await
	}

	/// Posts the account credentials and reads the tokens from the redirect fragment.
	///
	/// The redirect is read from the `Location` header when the transport stopped at it, and
	/// from the final URL otherwise. No `access_token` fragment means Microsoft rejected the
	/// account.
	pub async fn authenticate_microsoft(
		&self,
		form: &LoginForm,
		email: &str,
		password: &TokenSecret,
	) -> Result<MicrosoftTokens> {
		observe(LoginHop::Microsoft, "authenticate_microsoft", async {
			let request = ApiRequest::post(form.post_url.clone()).form([
				("login", email),
				("loginfmt", email),
				("passwd", password.expose()),
				("PPFT", form.form_token.expose()),
			])
			.pass_through(REDIRECTS);
			let response = self.transport.execute(request).await?;

			Ok(redirect_tokens(&response).ok_or(LoginFailure::InvalidCredentials)?)
		})
		.await
	}

	/// Exchanges the Microsoft access token for an Xbox Live session.
	pub async fn authenticate_xbox_live(&self, access_token: &TokenSecret) -> Result<XboxLiveToken> {
		const HOP: &str = "Xbox Live";

		observe(LoginHop::XboxLive, "authenticate_xbox_live", async {
			let request = ApiRequest::post(self.endpoints.xbl_authenticate.clone())
				.header("accept", "application/json")
				.json(&XblAuthRequest::rps(access_token.expose()))?;
			let body = self.transport.execute_json::<XboxTokenResponse>(request).await?;
			let user_hash = body
				.user_hash()
				.ok_or(HandshakeError::MissingField { hop: HOP, field: "DisplayClaims.xui[0].uhs" })?
				.to_owned();
			let token =
				body.token.ok_or(HandshakeError::MissingField { hop: HOP, field: "Token" })?;

			Ok(XboxLiveToken { token: TokenSecret::new(token), user_hash })
		})
		.await
	}

	/// Exchanges the Xbox Live session for an XSTS token scoped to Minecraft Services.
	///
	/// A `401` carrying a known `XErr` code becomes [`LoginFailure::Xsts`]; any other `401`
	/// is reported as [`Error::Http`].
	pub async fn authorize_xsts(&self, xbl_token: &TokenSecret) -> Result<TokenSecret> {
		observe(LoginHop::Xsts, "authorize_xsts", async {
			let url = self.endpoints.xsts_authorize.clone();
			let request = ApiRequest::post(url.clone())
				.header("accept", "application/json")
				.json(&XstsAuthRequest::retail(
					xbl_token.expose(),
					&self.endpoints.xsts_relying_party,
				))?
				.pass_through([XSTS_DENIED]);
			let response = self.transport.execute(request).await?;

			if response.status == XSTS_DENIED {
				return Err(match payload::xerr(&response.body).and_then(XstsDenial::from_xerr) {
					Some(denial) => LoginFailure::Xsts(denial).into(),
					None => Error::Http(ApiError::from_response(&url, &response)),
				});
			}

			let body = response.json::<XboxTokenResponse>(&url)?;
			let token =
				body.token.ok_or(HandshakeError::MissingField { hop: "XSTS", field: "Token" })?;

			Ok(TokenSecret::new(token))
		})
		.await
	}

	/// Exchanges the XSTS token for a Minecraft bearer token.
	pub async fn login_minecraft(
		&self,
		user_hash: &str,
		xsts_token: &TokenSecret,
	) -> Result<TokenSecret> {
		observe(LoginHop::Minecraft, "login_minecraft", async {
			let request =
				ApiRequest::post(self.endpoints.services_url(&["authentication", "login_with_xbox"]))
					.header("accept", "application/json")
					.json(&MinecraftLoginRequest::new(user_hash, xsts_token.expose()))?;
			let body = self.transport.execute_json::<MinecraftLoginResponse>(request).await?;
			let token = body
				.access_token
				.ok_or(HandshakeError::MissingField { hop: "Minecraft", field: "access_token" })?;

			Ok(TokenSecret::new(token))
		})
		.await
	}
}
impl<T> Debug for LoginChain<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginChain")
			.field("transport", &self.transport)
			.field("endpoints", &self.endpoints)
			.field("credentials", &self.credentials)
			.finish_non_exhaustive()
	}
}

async fn observe<F, R>(hop: LoginHop, stage: &'static str, fut: F) -> Result<R>
where
	F: Future<Output = Result<R>>,
{
	let span = HopSpan::new(hop, stage);

	obs::record_hop_outcome(hop, HopOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => obs::record_hop_outcome(hop, HopOutcome::Success),
		Err(_) => obs::record_hop_outcome(hop, HopOutcome::Failure),
	}

	result
}

fn redirect_tokens(response: &HttpResponse) -> Option<MicrosoftTokens> {
	match response.header("location") {
		Some(location) => fragment_tokens(&response.url.join(location).ok()?),
		None => fragment_tokens(&response.url),
	}
}

fn fragment_tokens(url: &Url) -> Option<MicrosoftTokens> {
	let fragment = url.fragment()?;
	let mut access_token = None;
	let mut refresh_token = None;

	for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
		match key.as_ref() {
			"access_token" => access_token = Some(value.into_owned()),
			"refresh_token" => refresh_token = Some(value.into_owned()),
			_ => {},
		}
	}

	Some(MicrosoftTokens {
		access_token: TokenSecret::new(access_token.filter(|token| !token.is_empty())?),
		refresh_token: refresh_token.map(TokenSecret::new),
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn entry_point_selection() {
		assert!(matches!(
			LoginCredentials::from_parts(None, None, None),
			Err(ConfigError::MissingCredentials)
		));
		assert!(matches!(
			LoginCredentials::from_parts(Some("a@b.c"), Some("  "), None),
			Err(ConfigError::IncompleteCredentials)
		));
		assert!(matches!(
			LoginCredentials::from_parts(None, Some("pw"), None),
			Err(ConfigError::IncompleteCredentials)
		));
		assert!(matches!(
			LoginCredentials::from_parts(Some("a@b.c"), None, Some("tok")),
			Ok(LoginCredentials::Bearer(_))
		));
		assert!(matches!(
			LoginCredentials::from_parts(Some("a@b.c"), Some("pw"), None),
			Ok(LoginCredentials::Account { .. })
		));
	}

	#[test]
	fn fragment_tokens_are_percent_decoded() {
		let url = Url::parse(
			"https://login.live.com/oauth20_desktop.srf#access_token=EwA%2Bb%3D&token_type=bearer&refresh_token=M.R3_BAY",
		)
		.expect("Test URL should parse.");
		let tokens = fragment_tokens(&url).expect("Fragment should carry tokens.");

		assert_eq!(tokens.access_token.expose(), "EwA+b=");
		assert_eq!(tokens.refresh_token.as_ref().map(TokenSecret::expose), Some("M.R3_BAY"));
	}

	#[test]
	fn stopped_redirects_are_read_from_the_location_header() {
		let response = HttpResponse {
			status: 302,
			url: Url::parse("https://login.live.com/ppsecure/post.srf?contextid=1")
				.expect("Test URL should parse."),
			headers: BTreeMap::from([(
				"location".into(),
				"/oauth20_desktop.srf#access_token=ms-access&refresh_token=ms-refresh".into(),
			)]),
			body: Vec::new(),
		};
		let tokens = redirect_tokens(&response).expect("Location fragment should carry tokens.");

		assert_eq!(tokens.access_token.expose(), "ms-access");
		assert_eq!(tokens.refresh_token.as_ref().map(TokenSecret::expose), Some("ms-refresh"));

		let followed = HttpResponse {
			status: 200,
			url: Url::parse("https://login.live.com/oauth20_desktop.srf#access_token=followed")
				.expect("Test URL should parse."),
			headers: BTreeMap::new(),
			body: Vec::new(),
		};

		assert_eq!(
			redirect_tokens(&followed).map(|tokens| tokens.access_token.expose().to_owned()),
			Some("followed".into())
		);
	}

	#[test]
	fn missing_fragment_yields_nothing() {
		let bare = Url::parse("https://login.live.com/ppsecure/post.srf")
			.expect("Test URL should parse.");
		let empty = Url::parse("https://login.live.com/oauth20_desktop.srf#access_token=&x=1")
			.expect("Test URL should parse.");

		assert!(fragment_tokens(&bare).is_none());
		assert!(fragment_tokens(&empty).is_none());
	}
}
