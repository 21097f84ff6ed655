//! Validated player identifiers accepted by endpoint wrappers.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $normalize:path) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				$normalize(value.as_ref()).map(Self)
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 16;
const PROFILE_ID_LEN: usize = 32;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The username length is outside the accepted range.
	#[error("Username must be between {min} and {max} characters.")]
	UsernameLength {
		/// Minimum permitted character count.
		min: usize,
		/// Maximum permitted character count.
		max: usize,
	},
	/// The username contains non-ASCII characters.
	#[error("Username contains invalid characters.")]
	UsernameCharacters,
	/// The UUID is not 32 hexadecimal digits (dashes excluded).
	#[error("`{0}` is not a valid profile UUID.")]
	ProfileId(String),
}

def_id! { Username, "Minecraft player name (3-16 ASCII characters).", "Username", validate_username }
def_id! {
	ProfileId,
	"Minecraft profile UUID stored as 32 lowercase hexadecimal digits without dashes.",
	"ProfileId",
	normalize_profile_id
}

fn validate_username(view: &str) -> Result<String, IdentifierError> {
	if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&view.chars().count()) {
		return Err(IdentifierError::UsernameLength {
			min: USERNAME_MIN_LEN,
			max: USERNAME_MAX_LEN,
		});
	}
	if !view.is_ascii() || view.chars().any(|ch| ch.is_ascii_whitespace() || ch.is_ascii_control())
	{
		return Err(IdentifierError::UsernameCharacters);
	}

	Ok(view.to_owned())
}

fn normalize_profile_id(view: &str) -> Result<String, IdentifierError> {
	let compact = view.chars().filter(|ch| *ch != '-').collect::<String>();

	if compact.len() != PROFILE_ID_LEN || !compact.chars().all(|ch| ch.is_ascii_hexdigit()) {
		return Err(IdentifierError::ProfileId(view.to_owned()));
	}

	Ok(compact.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn usernames_enforce_length_and_ascii() {
		assert!(Username::new("ab").is_err());
		assert!(Username::new("a".repeat(17)).is_err());
		assert!(Username::new("Notch\u{e9}").is_err());
		assert!(Username::new("has space").is_err());

		let name = Username::new("Notch").expect("Notch should be a valid username.");

		assert_eq!(name.as_ref(), "Notch");
		assert_eq!(format!("{name:?}"), "Username(Notch)");
	}

	#[test]
	fn profile_ids_strip_dashes_and_lowercase() {
		let id = ProfileId::new("069A79F4-44E9-4726-A5BE-FCA90E38AAF5")
			.expect("Dashed UUID should normalize.");

		assert_eq!(id.as_ref(), "069a79f444e94726a5befca90e38aaf5");
		assert!(ProfileId::new("069a79f444e94726").is_err());
		assert!(ProfileId::new("z69a79f444e94726a5befca90e38aaf5").is_err());
	}

	#[test]
	fn serde_enforces_validation() {
		let name: Username =
			serde_json::from_str("\"jeb_\"").expect("Username should deserialize successfully.");

		assert_eq!(name.as_ref(), "jeb_");
		assert!(serde_json::from_str::<Username>("\"x\"").is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<Username, u8> = HashMap::from_iter([(
			Username::new("Notch").expect("Username used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("Notch"), Some(&7));
	}
}
