//! Demonstrates the bearer-token entry point against a local mock of Minecraft Services:
//! entitlement validation runs first, then the verified client reads the profile.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use mojang_client::{
	client::ClientBuilder,
	endpoints::Endpoints,
	http::ReqwestTransport,
	transport::RateLimitPolicy,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let entitlements = server
		.mock_async(|when, then| {
			when.method(GET).path("/entitlements/mcstore").header("authorization", "Bearer demo");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"items":[{"name":"product_minecraft"},{"name":"game_minecraft"}]}"#);
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile").header("authorization", "Bearer demo");
			then.status(200).header("content-type", "application/json").body(
				r#"{"id":"069a79f444e94726a5befca90e38aaf5","name":"Notch","skins":[{"id":"s1","state":"ACTIVE","url":"http://textures.minecraft.net/texture/abc","variant":"CLASSIC"}],"capes":[]}"#,
			);
		})
		.await;
	let endpoints = Endpoints::builder().rebase_all(&Url::parse(&server.base_url())?).build()?;
	let client = ClientBuilder::new()
		.bearer_token("Bearer demo")
		.endpoints(endpoints)
		.rate_limit(RateLimitPolicy::default().with_retry(true))
		.build_with(Arc::new(ReqwestTransport::with_client(
			ReqwestTransport::client_builder()
				.danger_accept_invalid_certs(true)
				.danger_accept_invalid_hostnames(true)
				.build()?,
		)))
		.await?;
	let me = client.profile().await?;

	println!("Signed in as {} ({}).", me.name, me.id);

	if let Some(skin) = me.active_skin() {
		println!("Wearing a {} skin from {}.", skin.variant, skin.url);
	}

	entitlements.assert_async().await;
	profile.assert_calls_async(2).await;

	Ok(())
}
