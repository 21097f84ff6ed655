//! Wire shapes of the Xbox Live, XSTS, and Minecraft login hops.

// self
use crate::_prelude::*;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct XblAuthRequest<'a> {
	pub(crate) properties: XblAuthProperties<'a>,
	pub(crate) relying_party: &'a str,
	pub(crate) token_type: &'a str,
}
impl<'a> XblAuthRequest<'a> {
	pub(crate) fn rps(access_token: &'a str) -> Self {
		Self {
			properties: XblAuthProperties {
				auth_method: "RPS",
				site_name: "user.auth.xboxlive.com",
				rps_ticket: access_token,
			},
			relying_party: "http://auth.xboxlive.com",
			token_type: "JWT",
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct XblAuthProperties<'a> {
	pub(crate) auth_method: &'a str,
	pub(crate) site_name: &'a str,
	pub(crate) rps_ticket: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct XstsAuthRequest<'a> {
	pub(crate) properties: XstsAuthProperties<'a>,
	pub(crate) relying_party: &'a str,
	pub(crate) token_type: &'a str,
}
impl<'a> XstsAuthRequest<'a> {
	pub(crate) fn retail(xbl_token: &'a str, relying_party: &'a str) -> Self {
		Self {
			properties: XstsAuthProperties { sandbox_id: "RETAIL", user_tokens: [xbl_token] },
			relying_party,
			token_type: "JWT",
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct XstsAuthProperties<'a> {
	pub(crate) sandbox_id: &'a str,
	pub(crate) user_tokens: [&'a str; 1],
}

/// Shared by the Xbox Live and XSTS success bodies.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct XboxTokenResponse {
	#[serde(default)]
	pub(crate) token: Option<String>,
	#[serde(default)]
	pub(crate) display_claims: XboxDisplayClaims,
}
impl XboxTokenResponse {
	pub(crate) fn user_hash(&self) -> Option<&str> {
		self.display_claims.xui.first().and_then(|claim| claim.uhs.as_deref())
	}
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct XboxDisplayClaims {
	#[serde(default)]
	pub(crate) xui: Vec<XboxUserClaim>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct XboxUserClaim {
	#[serde(default)]
	pub(crate) uhs: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MinecraftLoginRequest {
	pub(crate) identity_token: String,
	pub(crate) ensure_legacy_enabled: bool,
}
impl MinecraftLoginRequest {
	pub(crate) fn new(user_hash: &str, xsts_token: &str) -> Self {
		Self {
			identity_token: format!("XBL3.0 x={user_hash};{xsts_token}"),
			ensure_legacy_enabled: true,
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct MinecraftLoginResponse {
	#[serde(default)]
	pub(crate) access_token: Option<String>,
}

/// Reads the numeric `XErr` code from an XSTS denial body, if any.
pub(crate) fn xerr(body: &[u8]) -> Option<u64> {
	let value = serde_json::from_slice::<serde_json::Value>(body).ok()?;

	value.get("XErr")?.as_u64()
}
