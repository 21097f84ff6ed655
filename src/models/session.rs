//! Records served by the public name lookup and session server endpoints.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::ProfileId, models::SkinVariant};

const TEXTURES_PROPERTY: &str = "textures";

/// Name/UUID pair returned by the lookup endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
	/// Profile UUID.
	pub id: ProfileId,
	/// Case-corrected player name.
	pub name: String,
}

/// Profile document served by the session server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
	/// Profile UUID.
	pub id: ProfileId,
	/// Current player name.
	pub name: String,
	/// Signed properties, usually a single `textures` entry.
	#[serde(default)]
	pub properties: Vec<ProfileProperty>,
	/// Whether the profile was never migrated.
	#[serde(default)]
	pub legacy: bool,
}
impl SessionProfile {
	/// Decodes the base64 `textures` property, if present.
	///
	/// `url` names the request that produced the profile and is only used for error reports.
	pub fn textures(&self, url: &Url) -> Result<Option<TexturesPayload>> {
		let Some(property) = self.properties.iter().find(|p| p.name == TEXTURES_PROPERTY) else {
			return Ok(None);
		};
		let bytes = STANDARD
			.decode(property.value.as_bytes())
			.map_err(|source| Error::Base64 { url: url.clone(), source })?;
		let mut de = serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(&mut de)
			.map(Some)
			.map_err(|source| Error::Decode { url: url.clone(), source })
	}
}

/// One signed profile property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileProperty {
	/// Property name.
	pub name: String,
	/// Base64 payload.
	pub value: String,
	/// Yggdrasil signature, only present on signed requests.
	#[serde(default)]
	pub signature: Option<String>,
}

/// Decoded `textures` property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TexturesPayload {
	/// Milliseconds since the epoch at which the payload was generated.
	pub timestamp: i64,
	/// Profile UUID.
	pub profile_id: String,
	/// Player name.
	pub profile_name: String,
	/// Textures keyed by kind.
	#[serde(default)]
	pub textures: Textures,
}

/// Texture set of a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Textures {
	/// Custom skin, absent for default skins.
	#[serde(default)]
	pub skin: Option<SkinTexture>,
	/// Worn cape.
	#[serde(default)]
	pub cape: Option<Texture>,
}

/// Skin texture reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinTexture {
	/// Texture URL.
	pub url: String,
	/// Present (with `model: slim`) for slim skins only.
	#[serde(default)]
	pub metadata: Option<SkinMetadata>,
}
impl SkinTexture {
	/// Player model implied by the metadata.
	pub fn variant(&self) -> SkinVariant {
		if self.metadata.is_some() { SkinVariant::Slim } else { SkinVariant::Classic }
	}
}

/// Extra skin attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinMetadata {
	/// Model name.
	#[serde(default)]
	pub model: Option<String>,
}

/// Plain texture reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
	/// Texture URL.
	pub url: String,
}

/// Flattened public profile of any player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Profile UUID.
	pub id: ProfileId,
	/// Player name.
	pub name: String,
	/// Milliseconds since the epoch at which the textures were generated.
	pub timestamp: i64,
	/// Whether the profile was never migrated.
	pub is_legacy_profile: bool,
	/// Player model.
	pub skin_variant: SkinVariant,
	/// Custom skin URL.
	pub skin_url: Option<String>,
	/// Worn cape URL.
	pub cape_url: Option<String>,
}
impl UserProfile {
	/// Combines a session profile with its decoded textures.
	pub fn from_parts(profile: SessionProfile, textures: TexturesPayload) -> Self {
		let skin = textures.textures.skin;

		Self {
			id: profile.id,
			name: profile.name,
			timestamp: textures.timestamp,
			is_legacy_profile: profile.legacy,
			skin_variant: skin.as_ref().map(SkinTexture::variant).unwrap_or_default(),
			skin_url: skin.map(|skin| skin.url),
			cape_url: textures.textures.cape.map(|cape| cape.url),
		}
	}
}
