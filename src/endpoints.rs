//! Remote endpoint set consumed by the transport, the login chain, and endpoint wrappers.
//!
//! [`Endpoints::default`] targets the production services. Every URL can be overridden via
//! [`EndpointsBuilder`], which is how tests point the client at a mock server.

/// Builder API for assembling endpoint sets.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Fixed query parameters sent to the Live OAuth authorization page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveOAuthParams {
	/// OAuth client identifier.
	pub client_id: String,
	/// Redirect URI the provider sends the token fragment to.
	pub redirect_uri: String,
	/// Requested scope.
	pub scope: String,
	/// Page display mode.
	pub display: String,
	/// OAuth response type (`token` selects the implicit flow).
	pub response_type: String,
	/// Page locale.
	pub locale: String,
}
impl LiveOAuthParams {
	/// Returns the parameters as query pairs in a stable order.
	pub fn query_pairs(&self) -> [(&'static str, &str); 6] {
		[
			("client_id", self.client_id.as_str()),
			("redirect_uri", self.redirect_uri.as_str()),
			("scope", self.scope.as_str()),
			("display", self.display.as_str()),
			("response_type", self.response_type.as_str()),
			("locale", self.locale.as_str()),
		]
	}
}
impl Default for LiveOAuthParams {
	fn default() -> Self {
		Self {
			client_id: "000000004C12AE6F".into(),
			redirect_uri: "https://login.live.com/oauth20_desktop.srf".into(),
			scope: "service::user.auth.xboxlive.com::MBI_SSL".into(),
			display: "touch".into(),
			response_type: "token".into(),
			locale: "en".into(),
		}
	}
}

/// Immutable endpoint set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
	/// Minecraft Services API base (`/entitlements`, `/minecraft/profile`, login).
	pub services: Url,
	/// Legacy Mojang API base (name → UUID lookups).
	pub mojang_api: Url,
	/// Session server base (profile textures).
	pub session_server: Url,
	/// Live OAuth authorization page.
	pub live_authorize: Url,
	/// Xbox Live user authentication endpoint.
	pub xbl_authenticate: Url,
	/// XSTS authorization endpoint.
	pub xsts_authorize: Url,
	/// Relying party the XSTS token is scoped to.
	pub xsts_relying_party: String,
	/// Live OAuth page parameters.
	pub live: LiveOAuthParams,
}
impl Endpoints {
	/// Creates a builder seeded with the production endpoints.
	pub fn builder() -> EndpointsBuilder {
		EndpointsBuilder::new()
	}

	/// Minecraft Services URL with `segments` appended (each segment percent-encoded).
	pub fn services_url(&self, segments: &[&str]) -> Url {
		append_segments(&self.services, segments)
	}

	/// Mojang API URL with `segments` appended.
	pub fn mojang_api_url(&self, segments: &[&str]) -> Url {
		append_segments(&self.mojang_api, segments)
	}

	/// Session server URL with `segments` appended.
	pub fn session_server_url(&self, segments: &[&str]) -> Url {
		append_segments(&self.session_server, segments)
	}

	/// Live authorization page URL with the OAuth parameters in the query.
	pub fn live_authorize_url(&self) -> Url {
		let mut url = self.live_authorize.clone();

		url.query_pairs_mut().extend_pairs(self.live.query_pairs());

		url
	}
}
impl Default for Endpoints {
	fn default() -> Self {
		Self {
			services: production("https://api.minecraftservices.com"),
			mojang_api: production("https://api.mojang.com"),
			session_server: production("https://sessionserver.mojang.com"),
			live_authorize: production("https://login.live.com/oauth20_authorize.srf"),
			xbl_authenticate: production("https://user.auth.xboxlive.com/user/authenticate"),
			xsts_authorize: production("https://xsts.auth.xboxlive.com/xsts/authorize"),
			xsts_relying_party: "rp://api.minecraftservices.com/".into(),
			live: LiveOAuthParams::default(),
		}
	}
}

#[allow(clippy::expect_used)]
fn production(raw: &'static str) -> Url {
	Url::parse(raw).expect("Production endpoint literals are valid URLs.")
}

fn append_segments(base: &Url, segments: &[&str]) -> Url {
	let mut url = base.clone();

	// Bases are validated as hierarchical by the builder.
	if let Ok(mut path) = url.path_segments_mut() {
		path.pop_if_empty().extend(segments);
	}

	url
}
