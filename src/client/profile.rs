// self
use crate::{
	_prelude::*,
	auth::Username,
	client::Client,
	error::{ApiError, ConfigError},
	http::HttpTransport,
	models::{NameAvailability, NameAvailabilityBody, NameChangeInfo, Profile},
	transport::ApiRequest,
};

const REJECTED_PREFIX: &str = "changeProfileName.profileName:";
const COOLDOWN_REASON: &str = "Either the current account does not have an available name change, or the name you supplied has already been taken or is still on cooldown.";

/// Result of a name change attempt the server answered without an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameChangeOutcome {
	/// The name was claimed.
	Changed,
	/// The server refused the name.
	Rejected {
		/// Server-supplied reason, or a fixed explanation for `403`.
		reason: String,
	},
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the signed-in profile with its skins and capes.
	pub async fn profile(&self) -> Result<Profile> {
		let request = self.authorized(ApiRequest::get(self.services(&["minecraft", "profile"])))?;

		self.transport().execute_json(request).await
	}

	/// Fetches name change eligibility.
	pub async fn name_change_info(&self) -> Result<NameChangeInfo> {
		let request = self.authorized(ApiRequest::get(
			self.services(&["minecraft", "profile", "namechange"]),
		))?;

		self.transport().execute_json(request).await
	}

	/// Checks whether `name` could be claimed.
	pub async fn username_availability(&self, name: &str) -> Result<NameAvailability> {
		let name = Username::new(name).map_err(ConfigError::from)?;
		let request = self.authorized(ApiRequest::get(
			self.services(&["minecraft", "profile", "name", &*name, "available"]),
		))?;
		let body = self.transport().execute_json::<NameAvailabilityBody>(request).await?;

		Ok(body.status)
	}

	/// Whether `name` is free to claim.
	pub async fn is_username_available(&self, name: &str) -> Result<bool> {
		Ok(self.username_availability(name).await? == NameAvailability::Available)
	}

	/// Whether `name` is blocked by the name filter or held after a release.
	pub async fn is_username_blocked(&self, name: &str) -> Result<bool> {
		Ok(self.username_availability(name).await? == NameAvailability::NotAllowed)
	}

	/// Attempts to claim `name` for the signed-in profile.
	///
	/// `400` and `403` answers become [`NameChangeOutcome::Rejected`]; a `400` without a
	/// server message is still raised as [`Error::BadRequest`].
	pub async fn change_username(&self, name: &str) -> Result<NameChangeOutcome> {
		let name = Username::new(name).map_err(ConfigError::from)?;
		let url = self.services(&["minecraft", "profile", "name", &*name]);
		let request = self.authorized(ApiRequest::put(url.clone()).pass_through([400, 403]))?;
		let response = self.transport().execute(request).await?;

		match response.status {
			400 => match rejection_reason(&response.body) {
				Some(reason) => Ok(NameChangeOutcome::Rejected { reason }),
				None => Err(Error::BadRequest(ApiError::from_response(&url, &response))),
			},
			403 => Ok(NameChangeOutcome::Rejected { reason: COOLDOWN_REASON.into() }),
			_ => Ok(NameChangeOutcome::Changed),
		}
	}
}

fn rejection_reason(body: &[u8]) -> Option<String> {
	let value = serde_json::from_slice::<serde_json::Value>(body).ok()?;
	let message = value.get("errorMessage")?.as_str()?;

	Some(message.replace(REJECTED_PREFIX, "").trim().to_owned())
}
