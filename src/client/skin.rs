// std
use std::path::Path;
// self
use crate::{
	_prelude::*,
	auth::{ProfileId, Username},
	client::Client,
	error::ConfigError,
	http::{HttpTransport, MultipartField},
	models::SkinVariant,
	transport::ApiRequest,
};

/// Where a new skin comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SkinSource {
	/// Publicly reachable PNG URL.
	Url(String),
	/// PNG upload.
	File {
		/// File name reported to the server.
		file_name: String,
		/// Image bytes.
		bytes: Vec<u8>,
	},
}
impl SkinSource {
	/// Reads a PNG from disk.
	pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
		let path = path.as_ref();
		let bytes = std::fs::read(path)?;
		let file_name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| "skin.png".into());

		Ok(Self::File { file_name, bytes })
	}
}
impl Debug for SkinSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Url(url) => f.debug_tuple("Url").field(url).finish(),
			Self::File { file_name, bytes } => f
				.debug_struct("File")
				.field("file_name", file_name)
				.field("len", &bytes.len())
				.finish(),
		}
	}
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Uploads a new skin for the signed-in profile.
	pub async fn change_skin(&self, variant: SkinVariant, source: SkinSource) -> Result<()> {
		#[derive(Serialize)]
		struct UrlSkin<'a> {
			url: &'a str,
			variant: SkinVariant,
		}

		let request = ApiRequest::post(self.services(&["minecraft", "profile", "skins"]));
		let request = match &source {
			SkinSource::Url(url) => request.json(&UrlSkin { url, variant })?,
			SkinSource::File { file_name, bytes } => request.multipart(vec![
				MultipartField::Text { name: "variant".into(), value: variant.as_str().into() },
				MultipartField::File {
					name: "file".into(),
					file_name: file_name.clone(),
					content_type: "image/png".into(),
					bytes: bytes.clone(),
				},
			]),
		};

		self.transport().execute(self.authorized(request)?).await?;

		Ok(())
	}

	/// Re-uploads the current skin with another player model.
	pub async fn change_skin_variant(&self, variant: SkinVariant) -> Result<()> {
		let profile = self.profile().await?;
		let skin = profile.active_skin().or(profile.skins.first()).ok_or(Error::NoSkin)?;

		self.change_skin(variant, SkinSource::Url(skin.url.clone())).await
	}

	/// Copies another player's skin and model; resets to the default when they have none.
	///
	/// `player` is either a name or a UUID (dashes optional).
	pub async fn copy_skin(&self, player: &str) -> Result<()> {
		let id = match ProfileId::new(player) {
			Ok(id) => id,
			Err(_) => {
				let name = Username::new(player).map_err(ConfigError::from)?;

				self.api()
					.uuid(&name)
					.await?
					.ok_or_else(|| Error::UnknownPlayer(player.to_owned()))?
			},
		};
		let (url, profile) = self
			.api()
			.session_profile(&id)
			.await?
			.ok_or_else(|| Error::UnknownPlayer(player.to_owned()))?;
		let skin = profile.textures(&url)?.and_then(|textures| textures.textures.skin);

		match skin {
			Some(skin) => self.change_skin(skin.variant(), SkinSource::Url(skin.url)).await,
			None => self.reset_skin().await,
		}
	}

	/// Restores the default skin.
	pub async fn reset_skin(&self) -> Result<()> {
		let request = ApiRequest::delete(self.services(&["minecraft", "profile", "skins", "active"]));

		self.transport().execute(self.authorized(request)?).await?;

		Ok(())
	}

	/// Hides the worn cape.
	pub async fn disable_cape(&self) -> Result<()> {
		let request = ApiRequest::delete(self.services(&["minecraft", "profile", "capes", "active"]));

		self.transport().execute(self.authorized(request)?).await?;

		Ok(())
	}
}
