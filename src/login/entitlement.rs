// self
use crate::{
	_prelude::*,
	auth::Credential,
	error::{ApiError, LoginFailure},
	http::HttpTransport,
	login::LoginChain,
	models::Entitlements,
	obs::LoginHop,
	transport::ApiRequest,
};

const NO_LICENSE: u16 = 401;

impl<T> LoginChain<T>
where
	T: ?Sized + HttpTransport,
{
	/// Confirms `credential` owns Minecraft and has a profile, then marks it verified.
	///
	/// An empty entitlement body means the token itself was rejected. A `401` or an empty
	/// item list means no license. A client error from the profile endpoint means the
	/// account never created a profile.
	pub async fn validate_entitlement(&self, credential: Credential) -> Result<Credential> {
		super::observe(LoginHop::Entitlement, "validate_entitlement", async {
			let url = self.endpoints.services_url(&["entitlements", "mcstore"]);
			let request = ApiRequest::get(url.clone()).bearer(&credential).pass_through([NO_LICENSE]);
			let response = self.transport.execute(request).await?;

			if response.is_body_empty() {
				return Err(LoginFailure::InvalidBearerToken.into());
			}
			if response.status == NO_LICENSE {
				return Err(Error::MissingLicense(ApiError::from_response(&url, &response)));
			}
			if response.json::<Entitlements>(&url)?.items.is_empty() {
				return Err(Error::MissingLicense(ApiError::from_response(&url, &response)));
			}

			let url = self.endpoints.services_url(&["minecraft", "profile"]);
			let request =
				ApiRequest::get(url.clone()).bearer(&credential).pass_through_client_errors();
			let response = self.transport.execute(request).await?;

			if !response.is_success() {
				return Err(Error::MissingProfile(ApiError::from_response(&url, &response)));
			}

			Ok(credential.into_verified())
		})
		.await
	}
}
