//! Typed records decoded from Mojang and Minecraft Services responses.

pub mod profile;
pub mod session;

pub use profile::*;
pub use session::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Player model a skin is drawn for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkinVariant {
	/// Four-pixel arms (the default "Steve" model).
	#[default]
	Classic,
	/// Three-pixel arms (the "Alex" model).
	Slim,
}
impl SkinVariant {
	/// Returns the lowercase label the skin endpoints expect.
	pub const fn as_str(self) -> &'static str {
		match self {
			SkinVariant::Classic => "classic",
			SkinVariant::Slim => "slim",
		}
	}
}
impl Display for SkinVariant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SkinVariant {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();

		if trimmed.eq_ignore_ascii_case("classic") {
			Ok(Self::Classic)
		} else if trimmed.eq_ignore_ascii_case("slim") {
			Ok(Self::Slim)
		} else {
			Err(ConfigError::InvalidSkinVariant(s.to_owned()))
		}
	}
}
impl TryFrom<String> for SkinVariant {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<SkinVariant> for String {
	fn from(value: SkinVariant) -> Self {
		value.as_str().to_owned()
	}
}

/// Whether a skin or cape is the one currently worn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextureState {
	/// Currently worn.
	Active,
	/// Owned but not worn.
	Inactive,
	/// Any state this client does not know about.
	#[serde(other)]
	Unknown,
}
