// self
use crate::{
	_prelude::*,
	client::Client,
	endpoints::Endpoints,
	error::ConfigError,
	http::HttpTransport,
	login::LoginCredentials,
	transport::{RateLimitPolicy, Transport},
};

/// Collects the login entry point and transport settings for a [`Client`].
///
/// Supply either an email and password or a pre-obtained bearer token. The choice is
/// validated before any request is sent.
#[derive(Clone, Default)]
pub struct ClientBuilder {
	email: Option<String>,
	password: Option<String>,
	bearer_token: Option<String>,
	endpoints: Option<Endpoints>,
	rate_limit: RateLimitPolicy,
	user_agent: Option<String>,
}
impl ClientBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the Microsoft account email.
	pub fn email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());

		self
	}

	/// Sets the Microsoft account password.
	pub fn password(mut self, password: impl Into<String>) -> Self {
		self.password = Some(password.into());

		self
	}

	/// Sets a pre-obtained bearer token; the provider hops are skipped.
	pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
		self.bearer_token = Some(token.into());

		self
	}

	/// Overrides the endpoint set.
	pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Overrides the rate-limit policy.
	pub fn rate_limit(mut self, policy: RateLimitPolicy) -> Self {
		self.rate_limit = policy;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Logs in over `http` and returns the verified client.
	pub async fn build_with<T>(self, http: Arc<T>) -> Result<Client<T>>
	where
		T: ?Sized + HttpTransport,
	{
		let credentials = LoginCredentials::from_parts(
			self.email.as_deref(),
			self.password.as_deref(),
			self.bearer_token.as_deref(),
		)?;
		let endpoints = self.endpoints.unwrap_or_default();

		endpoints.validate().map_err(ConfigError::from)?;

		let mut transport = Transport::new(http).with_rate_limit(self.rate_limit);

		if let Some(user_agent) = self.user_agent {
			transport = transport.with_user_agent(user_agent);
		}

		Client::login(transport, Arc::new(endpoints), credentials).await
	}

	/// Logs in over a freshly built reqwest client.
	#[cfg(feature = "reqwest")]
	pub async fn build(self) -> Result<Client<crate::http::ReqwestTransport>> {
		LoginCredentials::from_parts(
			self.email.as_deref(),
			self.password.as_deref(),
			self.bearer_token.as_deref(),
		)?;

		let client =
			crate::http::ReqwestTransport::client_builder().build().map_err(ConfigError::from)?;

		self.build_with(Arc::new(crate::http::ReqwestTransport::with_client(client))).await
	}
}
impl Debug for ClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientBuilder")
			.field("email", &self.email)
			.field("password", &self.password.as_ref().map(|_| "<redacted>"))
			.field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
			.field("endpoints", &self.endpoints)
			.field("rate_limit", &self.rate_limit)
			.field("user_agent", &self.user_agent)
			.finish()
	}
}
