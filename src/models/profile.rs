//! Records served by the account-scoped Minecraft Services endpoints.

// self
use crate::{
	_prelude::*,
	models::{SkinVariant, TextureState},
};

/// Minecraft profile owned by the signed-in account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	/// Profile UUID without dashes.
	pub id: String,
	/// Current player name.
	pub name: String,
	/// Uploaded skins.
	#[serde(default)]
	pub skins: Vec<Skin>,
	/// Owned capes.
	#[serde(default)]
	pub capes: Vec<Cape>,
}
impl Profile {
	/// Skin currently worn, if any.
	pub fn active_skin(&self) -> Option<&Skin> {
		self.skins.iter().find(|skin| skin.is_enabled())
	}

	/// Cape currently worn, if any.
	pub fn active_cape(&self) -> Option<&Cape> {
		self.capes.iter().find(|cape| cape.is_enabled())
	}
}

/// One skin attached to a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
	/// Skin identifier.
	pub id: String,
	/// Whether the skin is worn.
	pub state: TextureState,
	/// Texture URL.
	pub url: String,
	/// Player model.
	pub variant: SkinVariant,
	/// Display alias for built-in skins.
	#[serde(default)]
	pub alias: Option<String>,
}
impl Skin {
	/// Whether the skin is the one currently worn.
	pub fn is_enabled(&self) -> bool {
		self.state == TextureState::Active
	}
}

/// One cape owned by a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cape {
	/// Cape identifier.
	pub id: String,
	/// Whether the cape is worn.
	pub state: TextureState,
	/// Texture URL.
	pub url: String,
	/// Display name.
	#[serde(default)]
	pub alias: Option<String>,
}
impl Cape {
	/// Whether the cape is the one currently worn.
	pub fn is_enabled(&self) -> bool {
		self.state == TextureState::Active
	}
}

/// Name change eligibility of the signed-in account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameChangeInfo {
	/// Last time the name changed.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub changed_at: Option<OffsetDateTime>,
	/// Profile creation time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Whether a name change is currently allowed.
	#[serde(default)]
	pub name_change_allowed: bool,
}

/// Availability of a player name as reported by Minecraft Services.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NameAvailability {
	/// Free to claim.
	Available,
	/// Taken by another profile.
	Duplicate,
	/// Rejected by the name filter or held after a release.
	NotAllowed,
	/// Any status this client does not know about.
	#[serde(other)]
	Unknown,
}

/// Body of the availability endpoint.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct NameAvailabilityBody {
	pub(crate) status: NameAvailability,
}

/// Product entitlements of the signed-in account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlements {
	/// Owned items. Empty when the account has no license.
	#[serde(default)]
	pub items: Vec<Entitlement>,
	/// Signed JWT listing the same items.
	#[serde(default)]
	pub signature: Option<String>,
	/// Key identifier for the signature.
	#[serde(default, rename = "keyId")]
	pub key_id: Option<String>,
}

/// One owned item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
	/// Item name, e.g. `product_minecraft` or `game_minecraft`.
	pub name: String,
	/// Per-item signature.
	#[serde(default)]
	pub signature: Option<String>,
}
