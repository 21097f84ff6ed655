mod common;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use httpmock::prelude::*;
// self
use mojang_client::{
	api::Api,
	auth::Credential,
	client::{Client, ClientBuilder, NameChangeOutcome, SkinSource},
	error::Error,
	http::ReqwestTransport,
	models::{NameAvailability, SkinVariant, TextureState},
};

const AUTHORIZATION: &str = "Bearer mc-bearer";
const JEB: &str = "853c80ef3c3749fdaa49938b674adae6";

async fn sign_in(server: &MockServer) -> Client<ReqwestTransport> {
	let (entitlements, profile) = common::mock_entitled_account(server, common::BEARER).await;
	let client = ClientBuilder::new()
		.bearer_token(common::BEARER)
		.endpoints((*common::endpoints(server)).clone())
		.build_with(common::reqwest_transport())
		.await
		.expect("Entitled bearer token should sign in.");

	entitlements.assert_async().await;
	profile.assert_async().await;
	entitlements.delete_async().await;
	profile.delete_async().await;

	client
}

#[tokio::test]
async fn unverified_credentials_are_refused() {
	let server = MockServer::start_async().await;
	let api = Api::new(common::transport(), common::endpoints(&server));
	let err = Client::with_credential(api, Credential::unverified(common::BEARER))
		.expect_err("Unverified credential should be refused.");

	assert!(matches!(err, Error::UnverifiedCredential));
}

#[tokio::test]
async fn profile_carries_skins_and_capes() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile").header("authorization", AUTHORIZATION);
			then.status(200).header("content-type", "application/json").body(common::PROFILE_JSON);
		})
		.await;
	let profile = client.profile().await.expect("Profile should load.");

	assert_eq!(profile.name, "Notch");
	assert_eq!(profile.active_skin().map(|skin| skin.variant), Some(SkinVariant::Classic));
	assert_eq!(profile.active_cape().map(|cape| cape.state), Some(TextureState::Active));

	mock.assert_async().await;
}

#[tokio::test]
async fn name_change_info_parses_timestamps() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile/namechange");
			then.status(200).body(
				r#"{"changedAt":"2021-04-02T10:11:12Z","createdAt":"2012-03-04T05:06:07Z","nameChangeAllowed":true}"#,
			);
		})
		.await;
	let info = client.name_change_info().await.expect("Name change info should load.");

	assert!(info.name_change_allowed);
	assert_eq!(info.changed_at.map(|at| at.year()), Some(2021));

	mock.assert_async().await;
}

#[tokio::test]
async fn availability_statuses_are_distinguished() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let free = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile/name/FreeName/available");
			then.status(200).body(r#"{"status":"AVAILABLE"}"#);
		})
		.await;
	let blocked = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile/name/BadWord/available");
			then.status(200).body(r#"{"status":"NOT_ALLOWED"}"#);
		})
		.await;
	let taken = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile/name/Notch/available");
			then.status(200).body(r#"{"status":"DUPLICATE"}"#);
		})
		.await;

	assert!(client.is_username_available("FreeName").await.expect("Lookup should succeed."));
	assert!(client.is_username_blocked("BadWord").await.expect("Lookup should succeed."));
	assert_eq!(
		client.username_availability("Notch").await.expect("Lookup should succeed."),
		NameAvailability::Duplicate
	);

	free.assert_async().await;
	blocked.assert_async().await;
	taken.assert_async().await;
}

#[tokio::test]
async fn change_username_reports_each_outcome() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let changed = server
		.mock_async(|when, then| {
			when.method(PUT).path("/minecraft/profile/name/NewName").header("authorization", AUTHORIZATION);
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;
	let invalid = server
		.mock_async(|when, then| {
			when.method(PUT).path("/minecraft/profile/name/Bad_Name");
			then.status(400).body(
				r#"{"path":"/minecraft/profile/name/Bad_Name","errorMessage":"changeProfileName.profileName: Invalid profile name"}"#,
			);
		})
		.await;
	let cooldown = server
		.mock_async(|when, then| {
			when.method(PUT).path("/minecraft/profile/name/Taken");
			then.status(403).body(r#"{"path":"/minecraft/profile/name/Taken"}"#);
		})
		.await;
	let malformed = server
		.mock_async(|when, then| {
			when.method(PUT).path("/minecraft/profile/name/Weird");
			then.status(400).body("{}");
		})
		.await;

	assert_eq!(
		client.change_username("NewName").await.expect("Change should succeed."),
		NameChangeOutcome::Changed
	);
	assert_eq!(
		client.change_username("Bad_Name").await.expect("Rejection is an outcome."),
		NameChangeOutcome::Rejected { reason: "Invalid profile name".into() }
	);
	assert!(matches!(
		client.change_username("Taken").await.expect("Cooldown is an outcome."),
		NameChangeOutcome::Rejected { reason } if reason.contains("cooldown")
	));
	assert!(matches!(client.change_username("Weird").await, Err(Error::BadRequest(_))));

	changed.assert_async().await;
	invalid.assert_async().await;
	cooldown.assert_async().await;
	malformed.assert_async().await;
}

#[tokio::test]
async fn skins_upload_by_url_and_file() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let by_url = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/minecraft/profile/skins")
				.header("authorization", AUTHORIZATION)
				.header("content-type", "application/json")
				.body(r#"{"url":"https://example.com/skin.png","variant":"slim"}"#);
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;
	let by_file = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/minecraft/profile/skins")
				.header("authorization", AUTHORIZATION)
				.body_includes(r#"name="variant""#)
				.body_includes(r#"filename="skin.png""#)
				.body_includes("PNGDATA");
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;

	client
		.change_skin(SkinVariant::Slim, SkinSource::Url("https://example.com/skin.png".into()))
		.await
		.expect("URL upload should succeed.");
	client
		.change_skin(SkinVariant::Classic, SkinSource::File {
			file_name: "skin.png".into(),
			bytes: b"PNGDATA".to_vec(),
		})
		.await
		.expect("File upload should succeed.");

	by_url.assert_async().await;
	by_file.assert_async().await;
}

#[tokio::test]
async fn skin_variant_change_reuses_the_active_skin() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile");
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/minecraft/profile/skins")
				.body(r#"{"url":"http://textures.minecraft.net/texture/abc","variant":"slim"}"#);
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;

	client.change_skin_variant(SkinVariant::Slim).await.expect("Variant change should succeed.");

	profile.assert_async().await;
	upload.assert_async().await;
}

#[tokio::test]
async fn reset_skin_and_disable_cape_issue_deletes() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let skin = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/minecraft/profile/skins/active").header("authorization", AUTHORIZATION);
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;
	let cape = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/minecraft/profile/capes/active").header("authorization", AUTHORIZATION);
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;

	client.reset_skin().await.expect("Skin reset should succeed.");
	client.disable_cape().await.expect("Cape removal should succeed.");

	skin.assert_async().await;
	cape.assert_async().await;
}

#[tokio::test]
async fn copy_skin_resolves_names_and_copies_the_model() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let textures = STANDARD.encode(
		r#"{"timestamp":1,"profileId":"853c80ef3c3749fdaa49938b674adae6","profileName":"jeb_","textures":{"SKIN":{"url":"http://textures.minecraft.net/texture/jeb","metadata":{"model":"slim"}}}}"#,
	);
	let lookup = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/profiles/minecraft/jeb_");
			then.status(200).body(format!(r#"{{"id":"{JEB}","name":"jeb_"}}"#));
		})
		.await;
	let session = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/session/minecraft/profile/{JEB}"));
			then.status(200).body(format!(
				r#"{{"id":"{JEB}","name":"jeb_","properties":[{{"name":"textures","value":"{textures}"}}]}}"#
			));
		})
		.await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/minecraft/profile/skins")
				.body(r#"{"url":"http://textures.minecraft.net/texture/jeb","variant":"slim"}"#);
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;

	client.copy_skin("jeb_").await.expect("Copy should succeed.");

	lookup.assert_async().await;
	session.assert_async().await;
	upload.assert_async().await;
}

#[tokio::test]
async fn copy_skin_of_default_skinned_player_resets() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let textures =
		STANDARD.encode(r#"{"timestamp":1,"profileId":"x","profileName":"jeb_","textures":{}}"#);
	let session = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/session/minecraft/profile/{JEB}"));
			then.status(200).body(format!(
				r#"{{"id":"{JEB}","name":"jeb_","properties":[{{"name":"textures","value":"{textures}"}}]}}"#
			));
		})
		.await;
	let reset = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/minecraft/profile/skins/active");
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;

	client.copy_skin(JEB).await.expect("Copy should fall back to a reset.");

	session.assert_async().await;
	reset.assert_async().await;
}

#[tokio::test]
async fn copy_skin_of_unknown_player_fails() {
	let server = MockServer::start_async().await;
	let client = sign_in(&server).await;
	let lookup = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/profiles/minecraft/nobody_here");
			then.status(404);
		})
		.await;
	let err = client.copy_skin("nobody_here").await.expect_err("Unknown player should fail.");

	assert!(matches!(&err, Error::UnknownPlayer(player) if player == "nobody_here"));

	lookup.assert_async().await;
}
