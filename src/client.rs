//! Account-scoped client built on a verified [`Credential`].
//!
//! [`ClientBuilder`] validates the entry point, runs the [`LoginChain`], and hands back a
//! [`Client`] whose every request carries the verified bearer token.

mod builder;
mod profile;
mod skin;

pub use builder::*;
pub use profile::*;
pub use skin::*;

// self
use crate::{
	_prelude::*,
	api::Api,
	auth::Credential,
	endpoints::Endpoints,
	http::HttpTransport,
	login::{LoginChain, LoginCredentials},
	transport::{ApiRequest, Transport},
};

/// [`Client`] over the bundled reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestApiClient = Client<crate::http::ReqwestTransport>;

/// Account-scoped operations against Minecraft Services.
pub struct Client<T>
where
	T: ?Sized + HttpTransport,
{
	api: Api<T>,
	credential: Credential,
}
impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Runs the credential chain and wraps the resulting credential.
	pub async fn login(
		transport: Transport<T>,
		endpoints: Arc<Endpoints>,
		credentials: LoginCredentials,
	) -> Result<Self> {
		let chain = LoginChain::new(transport.clone(), endpoints.clone(), credentials);
		let credential = chain.run().await?;

		Ok(Self { api: Api::new(transport, endpoints), credential })
	}

	/// Wraps a credential that already passed entitlement validation.
	pub fn with_credential(api: Api<T>, credential: Credential) -> Result<Self> {
		if !credential.is_verified() {
			return Err(Error::UnverifiedCredential);
		}

		Ok(Self { api, credential })
	}

	/// Verified credential attached to every request.
	pub fn credential(&self) -> &Credential {
		&self.credential
	}

	/// Unauthenticated lookups sharing this client's transport.
	pub fn api(&self) -> &Api<T> {
		&self.api
	}

	/// Shared transport.
	pub fn transport(&self) -> &Transport<T> {
		self.api.transport()
	}

	fn endpoints(&self) -> &Endpoints {
		self.api.endpoints()
	}

	fn services(&self, segments: &[&str]) -> Url {
		self.endpoints().services_url(segments)
	}

	fn authorized(&self, request: ApiRequest) -> Result<ApiRequest> {
		request.authorized(&self.credential)
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { api: self.api.clone(), credential: self.credential.clone() }
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("api", &self.api)
			.field("credential", &self.credential)
			.finish()
	}
}
