mod common;

// crates.io
use httpmock::prelude::*;
// self
use mojang_client::{
	auth::Credential,
	error::{Error, LoginFailure},
	login::LoginCredentials,
};

fn credential() -> Credential {
	Credential::unverified(common::BEARER)
}

#[tokio::test]
async fn empty_entitlement_body_means_invalid_token() {
	let server = MockServer::start_async().await;
	let entitlements = server
		.mock_async(|when, then| {
			when.method(GET).path("/entitlements/mcstore");
			then.status(200).body("");
		})
		.await;
	let err = common::chain(&server, LoginCredentials::bearer(common::BEARER))
		.validate_entitlement(credential())
		.await
		.expect_err("Empty entitlement body should fail.");

	assert!(matches!(err, Error::LoginFailure(LoginFailure::InvalidBearerToken)));

	entitlements.assert_async().await;
}

#[tokio::test]
async fn unauthorized_entitlements_mean_missing_license() {
	let server = MockServer::start_async().await;
	let entitlements = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/entitlements/mcstore")
				.header("authorization", "Bearer mc-bearer");
			then.status(401).body(r#"{"path":"/entitlements/mcstore","errorType":"UnauthorizedOperationException"}"#);
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile");
			then.status(200).body(common::PROFILE_JSON);
		})
		.await;
	let err = common::chain(&server, LoginCredentials::bearer(common::BEARER))
		.validate_entitlement(credential())
		.await
		.expect_err("401 entitlement answer should fail.");

	assert!(matches!(&err, Error::MissingLicense(api) if api.status == 401));

	entitlements.assert_async().await;
	profile.assert_calls_async(0).await;
}

#[tokio::test]
async fn empty_item_list_means_missing_license() {
	let server = MockServer::start_async().await;
	let entitlements = server
		.mock_async(|when, then| {
			when.method(GET).path("/entitlements/mcstore");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"items":[],"signature":"sig","keyId":"1"}"#);
		})
		.await;
	let err = common::chain(&server, LoginCredentials::bearer(common::BEARER))
		.validate_entitlement(credential())
		.await
		.expect_err("Account without items should fail.");

	assert!(matches!(&err, Error::MissingLicense(api) if api.status == 200));

	entitlements.assert_async().await;
}

#[tokio::test]
async fn missing_profile_is_reported_after_license_check() {
	let server = MockServer::start_async().await;
	let entitlements = server
		.mock_async(|when, then| {
			when.method(GET).path("/entitlements/mcstore");
			then.status(200).body(r#"{"items":[{"name":"game_minecraft","signature":"x"}]}"#);
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/minecraft/profile");
			then.status(404).body(
				r#"{"path":"/minecraft/profile","errorType":"NOT_FOUND","error":"NOT_FOUND","errorMessage":"The server has not found anything matching the request URI"}"#,
			);
		})
		.await;
	let err = common::chain(&server, LoginCredentials::bearer(common::BEARER))
		.validate_entitlement(credential())
		.await
		.expect_err("Missing profile should fail.");

	assert!(matches!(&err, Error::MissingProfile(api) if api.status == 404));

	entitlements.assert_async().await;
	profile.assert_async().await;
}

#[tokio::test]
async fn server_errors_during_validation_stay_transport_errors() {
	let server = MockServer::start_async().await;
	let entitlements = server
		.mock_async(|when, then| {
			when.method(GET).path("/entitlements/mcstore");
			then.status(503).body("{}");
		})
		.await;
	let err = common::chain(&server, LoginCredentials::bearer(common::BEARER))
		.validate_entitlement(credential())
		.await
		.expect_err("503 should fail.");

	assert!(matches!(err, Error::ServerError(_)));

	entitlements.assert_async().await;
}

#[tokio::test]
async fn validated_credentials_are_marked_verified() {
	let server = MockServer::start_async().await;
	let (entitlements, profile) = common::mock_entitled_account(&server, common::BEARER).await;
	let verified = common::chain(&server, LoginCredentials::bearer(common::BEARER))
		.validate_entitlement(credential())
		.await
		.expect("Entitled account should validate.");

	assert!(verified.is_verified());

	entitlements.assert_async().await;
	profile.assert_async().await;
}
