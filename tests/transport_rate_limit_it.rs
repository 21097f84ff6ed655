mod common;

// std
use std::time::Duration;
// self
use common::ScriptedTransport;
use mojang_client::{
	error::Error,
	transport::{ApiRequest, RateLimitPolicy, Transport},
};

fn request() -> ApiRequest {
	ApiRequest::post(common::url("https://api.mojang.com/profiles/minecraft"))
		.json(&["Notch", "jeb_"])
		.expect("Name list should encode.")
}

#[tokio::test]
async fn disabled_retry_raises_immediately_without_sleeping() {
	let http = ScriptedTransport::new([(429, "{}")]);
	let transport = Transport::new(http.clone());
	let err = transport.execute(request()).await.expect_err("429 should be raised.");

	assert!(matches!(err, Error::TooManyRequests(_)));
	assert_eq!(transport.metrics().rate_limit_sleeps(), 0);
	assert_eq!(http.requests().len(), 1);
}

#[tokio::test]
async fn sleeps_match_consecutive_rate_limits() {
	for limited in 0..4 {
		let http = ScriptedTransport::new(vec![(429, "{}"); limited]);
		let transport = Transport::new(http.clone())
			.with_rate_limit(RateLimitPolicy::retrying(Duration::ZERO, 10));
		let response = transport.execute(request()).await.expect("Final attempt should succeed.");

		assert_eq!(response.status, 200);
		assert_eq!(transport.metrics().rate_limit_sleeps(), limited as u64);

		let requests = http.requests();

		assert_eq!(requests.len(), limited + 1);
		assert!(requests.iter().all(|sent| *sent == requests[0]), "Resends must be identical.");
	}
}

#[tokio::test]
async fn attempt_cap_surfaces_too_many_requests() {
	let http = ScriptedTransport::new(vec![(429, r#"{"errorMessage":"Slow down"}"#); 5]);
	let transport =
		Transport::new(http.clone()).with_rate_limit(RateLimitPolicy::retrying(Duration::ZERO, 3));
	let err = transport.execute(request()).await.expect_err("Cap should end the loop.");

	assert!(matches!(&err, Error::TooManyRequests(api) if api.message == "[HTTP 429] - Slow down"));
	assert_eq!(transport.metrics().requests(), 3);
	assert_eq!(transport.metrics().rate_limit_sleeps(), 2);
}

#[tokio::test]
async fn pass_through_rate_limit_is_returned_without_sleeping() {
	let http = ScriptedTransport::new([(429, "{}")]);
	let transport =
		Transport::new(http).with_rate_limit(RateLimitPolicy::retrying(Duration::ZERO, 3));
	let response = transport
		.execute(request().pass_through([429]))
		.await
		.expect("Pass-through wins over the rate-limit rule.");

	assert_eq!(response.status, 429);
	assert_eq!(transport.metrics().rate_limit_sleeps(), 0);
}

#[tokio::test(start_paused = true)]
async fn configured_sleep_is_awaited_between_attempts() {
	let http = ScriptedTransport::new([(429, "{}"), (429, "{}")]);
	let transport = Transport::new(http)
		.with_rate_limit(RateLimitPolicy::default().with_retry(true).with_sleep(Duration::from_secs(60)));
	let started = tokio::time::Instant::now();

	transport.execute(request()).await.expect("Third attempt should succeed.");

	assert_eq!(started.elapsed(), Duration::from_secs(120));
}
