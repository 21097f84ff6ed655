//! Tagged states of the credential chain and the values they carry between hops.

// self
use crate::{
	_prelude::*,
	auth::{Credential, TokenSecret},
};

/// Hidden login form values scraped from the Live OAuth page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginForm {
	/// Hidden `PPFT` form token.
	pub form_token: TokenSecret,
	/// Target the credentials are posted to.
	pub post_url: Url,
}

/// Tokens read from the Microsoft redirect fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MicrosoftTokens {
	/// Access token consumed by the Xbox Live hop.
	pub access_token: TokenSecret,
	/// Refresh token; not used by the chain itself.
	pub refresh_token: Option<TokenSecret>,
}

/// Xbox Live session returned by the user authentication endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XboxLiveToken {
	/// Session token consumed by the XSTS hop.
	pub token: TokenSecret,
	/// Per-user hash used in the Minecraft identity token.
	pub user_hash: String,
}

/// One state of the credential chain.
///
/// Every variant owns exactly the values the next hop consumes. A failing transition is
/// reported as `Err` by [`crate::login::LoginChain::advance`] and is terminal; dropping the
/// state discards every intermediate token it held.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginState {
	/// Nothing has happened yet.
	Start,
	/// Account credentials were supplied; the OAuth page is fetched next.
	OAuthRequest,
	/// Login form scraped; credentials are posted next.
	MicrosoftAuth {
		/// Scraped form values.
		form: LoginForm,
	},
	/// Microsoft tokens obtained; Xbox Live authentication is next.
	XboxLiveAuth {
		/// Redirect fragment tokens.
		tokens: MicrosoftTokens,
	},
	/// Xbox Live session obtained; XSTS authorization is next.
	XstsAuthorize {
		/// Xbox Live session.
		xbl: XboxLiveToken,
	},
	/// XSTS token obtained; Minecraft login is next.
	MinecraftLogin {
		/// Per-user hash from the Xbox Live hop.
		user_hash: String,
		/// XSTS token.
		xsts_token: TokenSecret,
	},
	/// A bearer token is available (derived or supplied) and is wrapped next.
	AttachToken {
		/// Raw bearer token.
		bearer: TokenSecret,
	},
	/// An unverified credential awaits entitlement validation.
	ValidateEntitlement {
		/// Credential under validation.
		credential: Credential,
	},
	/// Entitlements validated; the credential is usable.
	Ready(Credential),
}
impl LoginState {
	/// Returns a stable label for logs.
	pub const fn as_str(&self) -> &'static str {
		match self {
			LoginState::Start => "start",
			LoginState::OAuthRequest => "oauth_request",
			LoginState::MicrosoftAuth { .. } => "microsoft_auth",
			LoginState::XboxLiveAuth { .. } => "xbox_live_auth",
			LoginState::XstsAuthorize { .. } => "xsts_authorize",
			LoginState::MinecraftLogin { .. } => "minecraft_login",
			LoginState::AttachToken { .. } => "attach_token",
			LoginState::ValidateEntitlement { .. } => "validate_entitlement",
			LoginState::Ready(_) => "ready",
		}
	}

	/// Whether the chain has finished.
	pub fn is_ready(&self) -> bool {
		matches!(self, LoginState::Ready(_))
	}
}
impl Display for LoginState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
