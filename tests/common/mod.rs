//! Shared fixtures for the integration tests.

#![allow(dead_code)]

// std
use std::{collections::BTreeMap, sync::Arc};
// crates.io
use httpmock::prelude::*;
use parking_lot::Mutex;
// self
use mojang_client::{
	endpoints::Endpoints,
	error::TransportError,
	http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportFuture},
	login::{LoginChain, LoginCredentials},
	transport::Transport,
	url::Url,
};

pub const BEARER: &str = "mc-bearer";
pub const PROFILE_JSON: &str = r#"{"id":"069a79f444e94726a5befca90e38aaf5","name":"Notch","skins":[{"id":"s1","state":"ACTIVE","url":"http://textures.minecraft.net/texture/abc","variant":"CLASSIC"}],"capes":[{"id":"c1","state":"ACTIVE","url":"http://textures.minecraft.net/texture/cape","alias":"Migrator"}]}"#;

pub fn url(value: &str) -> Url {
	Url::parse(value).expect("Test URL should parse.")
}

/// Every endpoint served by `server`.
pub fn endpoints(server: &MockServer) -> Arc<Endpoints> {
	Arc::new(
		Endpoints::builder()
			.rebase_all(&url(&server.base_url()))
			.build()
			.expect("Mock server endpoints should validate."),
	)
}

/// Reqwest transport accepting the self-signed certificates `httpmock` serves.
pub fn reqwest_transport() -> Arc<ReqwestTransport> {
	let client = ReqwestTransport::client_builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	Arc::new(ReqwestTransport::with_client(client))
}

pub fn transport() -> Transport<ReqwestTransport> {
	Transport::new(reqwest_transport())
}

pub fn chain(server: &MockServer, credentials: LoginCredentials) -> LoginChain<ReqwestTransport> {
	LoginChain::new(transport(), endpoints(server), credentials)
}

/// Mocks an entitled account with a profile for `token`.
pub async fn mock_entitled_account<'a>(
	server: &'a MockServer,
	token: &str,
) -> (httpmock::Mock<'a>, httpmock::Mock<'a>) {
	let authorization = format!("Bearer {token}");
	let entitlements = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/entitlements/mcstore")
				.header("authorization", authorization.as_str());
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"items":[{"name":"product_minecraft"},{"name":"game_minecraft"}]}"#);
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile").header("authorization", authorization.as_str());
			then.status(200).header("content-type", "application/json").body(PROFILE_JSON);
		})
		.await;

	(entitlements, profile)
}

/// Transport answering from a script of `(status, body)` pairs, then `200 {}` forever.
#[derive(Default)]
pub struct ScriptedTransport {
	script: Mutex<Vec<(u16, String)>>,
	requests: Mutex<Vec<HttpRequest>>,
}
impl ScriptedTransport {
	pub fn new<I>(script: I) -> Arc<Self>
	where
		I: IntoIterator<Item = (u16, &'static str)>,
	{
		let mut script =
			script.into_iter().map(|(status, body)| (status, body.to_owned())).collect::<Vec<_>>();

		script.reverse();

		Arc::new(Self { script: Mutex::new(script), requests: Mutex::default() })
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().clone()
	}
}
impl HttpTransport for ScriptedTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		let (status, body) = self.script.lock().pop().unwrap_or((200, "{}".to_owned()));
		let url = request.url.clone();

		self.requests.lock().push(request);

		Box::pin(async move {
			Ok::<_, TransportError>(HttpResponse {
				status,
				url,
				headers: BTreeMap::new(),
				body: body.into_bytes(),
			})
		})
	}
}
