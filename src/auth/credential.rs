//! Bearer credentials and the redacted secret wrapper they are built from.

// self
use crate::_prelude::*;

const BEARER_PREFIX: &str = "Bearer ";

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the secret is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Bearer credential accepted by account-scoped endpoints.
///
/// A credential is either derived by [`crate::login::LoginChain`] or supplied directly by the
/// caller. Either way it only becomes attachable to outgoing requests once the chain's
/// entitlement validation marks it verified; [`crate::transport::ApiRequest::authorized`]
/// refuses unverified values.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
	bearer_token: TokenSecret,
	entitlement_verified: bool,
	obtained_at: OffsetDateTime,
}
impl Credential {
	/// Wraps a pre-obtained bearer token. A leading `Bearer ` prefix is stripped.
	pub fn unverified(bearer_token: impl Into<String>) -> Self {
		let raw = bearer_token.into();
		let token = match raw.strip_prefix(BEARER_PREFIX) {
			Some(stripped) => stripped.trim().to_owned(),
			None => raw.trim().to_owned(),
		};

		Self {
			bearer_token: TokenSecret::new(token),
			entitlement_verified: false,
			obtained_at: OffsetDateTime::now_utc(),
		}
	}

	/// Returns the bearer token. Callers must avoid logging it.
	pub fn bearer_token(&self) -> &TokenSecret {
		&self.bearer_token
	}

	/// Whether entitlement validation succeeded for this token.
	pub fn is_verified(&self) -> bool {
		self.entitlement_verified
	}

	/// Instant the credential was created.
	pub fn obtained_at(&self) -> OffsetDateTime {
		self.obtained_at
	}

	/// `Authorization` header value.
	pub(crate) fn authorization(&self) -> String {
		format!("{BEARER_PREFIX}{}", self.bearer_token.expose())
	}

	pub(crate) fn into_verified(mut self) -> Self {
		self.entitlement_verified = true;

		self
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("bearer_token", &self.bearer_token)
			.field("entitlement_verified", &self.entitlement_verified)
			.field("obtained_at", &self.obtained_at)
			.finish()
	}
}
