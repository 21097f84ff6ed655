//! Unauthenticated lookups against the Mojang API and the session server.

// self
use crate::{
	_prelude::*,
	auth::{ProfileId, Username},
	endpoints::Endpoints,
	error::ConfigError,
	http::HttpTransport,
	models::{PlayerIdentity, SessionProfile, UserProfile},
	transport::{ApiRequest, Transport},
};

/// Largest batch accepted by the bulk name lookup.
pub const MAX_BULK_NAMES: usize = 10;

/// Public lookups that need no credential.
pub struct Api<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Transport<T>,
	endpoints: Arc<Endpoints>,
}
impl<T> Api<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a lookup client over `transport`.
	pub fn new(transport: Transport<T>, endpoints: Arc<Endpoints>) -> Self {
		Self { transport, endpoints }
	}

	/// Shared transport.
	pub fn transport(&self) -> &Transport<T> {
		&self.transport
	}

	/// Endpoint set in use.
	pub fn endpoints(&self) -> &Arc<Endpoints> {
		&self.endpoints
	}

	/// Resolves a player name to its UUID; `None` when no such player exists.
	pub async fn uuid(&self, name: &str) -> Result<Option<ProfileId>> {
		let name = Username::new(name).map_err(ConfigError::from)?;
		let url = self.endpoints.mojang_api_url(&["users", "profiles", "minecraft", &*name]);
		let response =
			self.transport.execute(ApiRequest::get(url.clone()).pass_through([404])).await?;

		if !response.is_success() || response.is_body_empty() {
			return Ok(None);
		}

		Ok(Some(response.json::<PlayerIdentity>(&url)?.id))
	}

	/// Resolves up to [`MAX_BULK_NAMES`] names in one request; extra names are ignored.
	///
	/// The map is keyed by the case-corrected name. Unknown names are absent.
	pub async fn uuids<I, S>(&self, names: I) -> Result<BTreeMap<String, ProfileId>>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let names = names
			.into_iter()
			.take(MAX_BULK_NAMES)
			.map(|name| Username::new(name).map_err(ConfigError::from))
			.collect::<Result<Vec<_>, _>>()?;

		if names.is_empty() {
			return Ok(BTreeMap::new());
		}

		let request = ApiRequest::post(self.endpoints.mojang_api_url(&["profiles", "minecraft"]))
			.json(&names)?;
		let identities = self.transport.execute_json::<Vec<PlayerIdentity>>(request).await?;

		Ok(identities.into_iter().map(|identity| (identity.name, identity.id)).collect())
	}

	/// Resolves a UUID to the current player name; `None` when no such profile exists.
	pub async fn username(&self, uuid: &str) -> Result<Option<String>> {
		let id = ProfileId::new(uuid).map_err(ConfigError::from)?;

		Ok(self.session_profile(&id).await?.map(|(_, profile)| profile.name))
	}

	/// Fetches the public profile of a player, textures decoded.
	///
	/// `None` when no such profile exists or it carries no textures property.
	pub async fn user_profile(&self, uuid: &str) -> Result<Option<UserProfile>> {
		let id = ProfileId::new(uuid).map_err(ConfigError::from)?;
		let Some((url, profile)) = self.session_profile(&id).await? else {
			return Ok(None);
		};

		Ok(profile.textures(&url)?.map(|textures| UserProfile::from_parts(profile, textures)))
	}

	/// Lists the SHA-1 hashes of server addresses blocked for breaking the EULA.
	pub async fn blocked_servers(&self) -> Result<Vec<String>> {
		let request = ApiRequest::get(self.endpoints.session_server_url(&["blockedservers"]));
		let response = self.transport.execute(request).await?;

		Ok(response
			.text()
			.lines()
			.map(str::trim)
			.filter(|hash| !hash.is_empty())
			.map(str::to_owned)
			.collect())
	}

	/// Fetches the raw session profile and the URL it was served from.
	pub(crate) async fn session_profile(
		&self,
		id: &ProfileId,
	) -> Result<Option<(Url, SessionProfile)>> {
		let url =
			self.endpoints.session_server_url(&["session", "minecraft", "profile", id.as_ref()]);
		let response =
			self.transport.execute(ApiRequest::get(url.clone()).pass_through([400, 404])).await?;

		if !response.is_success() || response.is_body_empty() {
			return Ok(None);
		}

		let profile = response.json::<SessionProfile>(&url)?;

		Ok(Some((url, profile)))
	}
}
impl<T> Clone for Api<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { transport: self.transport.clone(), endpoints: self.endpoints.clone() }
	}
}
impl<T> Debug for Api<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Api")
			.field("transport", &self.transport)
			.field("endpoints", &self.endpoints)
			.finish()
	}
}
