// self
use crate::{
	_prelude::*,
	endpoints::{Endpoints, LiveOAuthParams},
};

/// Errors raised while validating endpoint sets.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointsError {
	/// Endpoints must use HTTPS (plain HTTP is accepted for loopback hosts only).
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Base URLs must be hierarchical so path segments can be appended.
	#[error("The {endpoint} endpoint cannot be used as a base URL: {url}.")]
	NotABase {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`Endpoints`] values, seeded with the production set.
#[derive(Debug)]
pub struct EndpointsBuilder {
	endpoints: Endpoints,
}
impl EndpointsBuilder {
	/// Creates a builder holding the production endpoints.
	pub fn new() -> Self {
		Self { endpoints: Endpoints::default() }
	}

	/// Points every Mojang/Minecraft/Microsoft base at `base`, keeping their paths.
	///
	/// Intended for tests that serve all hops from a single mock server.
	pub fn rebase_all(mut self, base: &Url) -> Self {
		let rebase = |path: &str| {
			let mut url = base.clone();

			url.set_path(path);

			url
		};
		let e = &mut self.endpoints;

		e.services = rebase("/");
		e.mojang_api = rebase("/");
		e.session_server = rebase("/");
		e.live_authorize = rebase(e.live_authorize.path());
		e.xbl_authenticate = rebase(e.xbl_authenticate.path());
		e.xsts_authorize = rebase(e.xsts_authorize.path());

		self
	}

	/// Sets the Minecraft Services base.
	pub fn services(mut self, url: Url) -> Self {
		self.endpoints.services = url;

		self
	}

	/// Sets the Mojang API base.
	pub fn mojang_api(mut self, url: Url) -> Self {
		self.endpoints.mojang_api = url;

		self
	}

	/// Sets the session server base.
	pub fn session_server(mut self, url: Url) -> Self {
		self.endpoints.session_server = url;

		self
	}

	/// Sets the Live OAuth authorization page.
	pub fn live_authorize(mut self, url: Url) -> Self {
		self.endpoints.live_authorize = url;

		self
	}

	/// Sets the Xbox Live authentication endpoint.
	pub fn xbl_authenticate(mut self, url: Url) -> Self {
		self.endpoints.xbl_authenticate = url;

		self
	}

	/// Sets the XSTS authorization endpoint.
	pub fn xsts_authorize(mut self, url: Url) -> Self {
		self.endpoints.xsts_authorize = url;

		self
	}

	/// Overrides the XSTS relying party.
	pub fn xsts_relying_party(mut self, relying_party: impl Into<String>) -> Self {
		self.endpoints.xsts_relying_party = relying_party.into();

		self
	}

	/// Overrides the Live OAuth page parameters.
	pub fn live(mut self, params: LiveOAuthParams) -> Self {
		self.endpoints.live = params;

		self
	}

	/// Consumes the builder and validates the resulting endpoint set.
	pub fn build(self) -> Result<Endpoints, EndpointsError> {
		self.endpoints.validate()?;

		Ok(self.endpoints)
	}
}
impl Default for EndpointsBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl Endpoints {
	/// Validates invariants for the endpoint set.
	pub fn validate(&self) -> Result<(), EndpointsError> {
		validate_endpoint("services", &self.services)?;
		validate_endpoint("mojang_api", &self.mojang_api)?;
		validate_endpoint("session_server", &self.session_server)?;
		validate_endpoint("live_authorize", &self.live_authorize)?;
		validate_endpoint("xbl_authenticate", &self.xbl_authenticate)?;
		validate_endpoint("xsts_authorize", &self.xsts_authorize)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), EndpointsError> {
	if url.cannot_be_a_base() {
		return Err(EndpointsError::NotABase { endpoint: name, url: url.to_string() });
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(EndpointsError::InsecureEndpoint { endpoint: name, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
