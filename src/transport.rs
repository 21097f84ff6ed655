//! Status-normalizing request executor shared by every endpoint operation.
//!
//! [`Transport::execute`] sends one [`ApiRequest`], returns successful and pass-through
//! responses untouched, converts every other status into the [`Error`] taxonomy, and (when
//! the [`RateLimitPolicy`] allows it) waits out `429` answers before resending the identical
//! request.

// std
use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::Duration,
};
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::Credential,
	error::ApiError,
	http::{HttpRequest, HttpResponse, HttpTransport, Method, MultipartField, RequestBody},
	obs,
};

/// Browser-like `User-Agent` sent unless the caller overrides it.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
	(KHTML, like Gecko) Chrome/105.0.0.0 Safari/537.36";

const TOO_MANY_REQUESTS: u16 = 429;

/// Behavior applied when a server answers `429 Too Many Requests`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitPolicy {
	/// Whether a `429` is waited out and resent instead of raised.
	pub retry: bool,
	/// Pause before each resend.
	pub sleep: Duration,
	/// Upper bound on requests per call, the first one included.
	pub max_attempts: u32,
}
impl RateLimitPolicy {
	/// Policy that waits `sleep` between resends, up to `max_attempts` requests in total.
	pub fn retrying(sleep: Duration, max_attempts: u32) -> Self {
		Self { retry: true, sleep, max_attempts }
	}

	/// Enables or disables resending.
	pub fn with_retry(mut self, retry: bool) -> Self {
		self.retry = retry;

		self
	}

	/// Overrides the pause before each resend.
	pub fn with_sleep(mut self, sleep: Duration) -> Self {
		self.sleep = sleep;

		self
	}

	/// Overrides the attempt cap. Values below one are treated as one.
	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = max_attempts.max(1);

		self
	}

	/// Whether the request that just finished as attempt number `attempt` may be resent.
	pub fn should_retry(&self, attempt: u32) -> bool {
		self.retry && attempt < self.max_attempts
	}
}
impl Default for RateLimitPolicy {
	fn default() -> Self {
		Self { retry: false, sleep: Duration::from_secs(60), max_attempts: 5 }
	}
}

/// In-process counters describing transport activity.
#[derive(Debug, Default)]
pub struct TransportMetrics {
	requests: AtomicU64,
	rate_limited: AtomicU64,
	rate_limit_sleeps: AtomicU64,
}
impl TransportMetrics {
	/// Requests handed to the HTTP stack, resends included.
	pub fn requests(&self) -> u64 {
		self.requests.load(Ordering::Relaxed)
	}

	/// `429` answers observed.
	pub fn rate_limited(&self) -> u64 {
		self.rate_limited.load(Ordering::Relaxed)
	}

	/// Sleeps performed before resending a rate-limited request.
	pub fn rate_limit_sleeps(&self) -> u64 {
		self.rate_limit_sleeps.load(Ordering::Relaxed)
	}

	fn record_request(&self) {
		self.requests.fetch_add(1, Ordering::Relaxed);
	}

	fn record_rate_limited(&self, slept: bool) {
		self.rate_limited.fetch_add(1, Ordering::Relaxed);

		if slept {
			self.rate_limit_sleeps.fetch_add(1, Ordering::Relaxed);
		}
	}
}

/// One endpoint call: the outbound request plus the statuses its caller treats as results.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	method: Method,
	url: Url,
	headers: BTreeMap<String, String>,
	body: RequestBody,
	pass_through: Vec<u16>,
	pass_client_errors: bool,
}
impl ApiRequest {
	/// Creates a body-less request.
	pub fn new(method: Method, url: Url) -> Self {
		Self {
			method,
			url,
			headers: BTreeMap::new(),
			body: RequestBody::Empty,
			pass_through: Vec::new(),
			pass_client_errors: false,
		}
	}

	/// Shorthand for a `GET`.
	pub fn get(url: Url) -> Self {
		Self::new(Method::Get, url)
	}

	/// Shorthand for a `POST`.
	pub fn post(url: Url) -> Self {
		Self::new(Method::Post, url)
	}

	/// Shorthand for a `PUT`.
	pub fn put(url: Url) -> Self {
		Self::new(Method::Put, url)
	}

	/// Shorthand for a `DELETE`.
	pub fn delete(url: Url) -> Self {
		Self::new(Method::Delete, url)
	}

	/// Appends query pairs to the URL.
	pub fn query<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		self.url.query_pairs_mut().extend_pairs(pairs);

		self
	}

	/// Sets a header; names are stored lowercase.
	pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());

		self
	}

	/// Sets a JSON body encoded from `body`.
	pub fn json<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		self.body = RequestBody::Json(serde_json::to_value(body).map_err(Error::Encode)?);

		Ok(self)
	}

	/// Sets a form-encoded body.
	pub fn form<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.body =
			RequestBody::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect());

		self
	}

	/// Sets a multipart body.
	pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
		self.body = RequestBody::Multipart(fields);

		self
	}

	/// Returns responses with any of `codes` to the caller instead of raising them.
	pub fn pass_through<I>(mut self, codes: I) -> Self
	where
		I: IntoIterator<Item = u16>,
	{
		self.pass_through.extend(codes);

		self
	}

	/// Returns every `4xx` response except `429` to the caller instead of raising it.
	pub fn pass_through_client_errors(mut self) -> Self {
		self.pass_client_errors = true;

		self
	}

	/// Attaches `credential` as a bearer token.
	///
	/// Fails with [`Error::UnverifiedCredential`] unless the credential passed entitlement
	/// validation.
	pub fn authorized(self, credential: &Credential) -> Result<Self> {
		if !credential.is_verified() {
			return Err(Error::UnverifiedCredential);
		}

		Ok(self.bearer(credential))
	}

	/// Attaches a credential without the verification check; reserved for the validation hop.
	pub(crate) fn bearer(self, credential: &Credential) -> Self {
		self.header("authorization", credential.authorization())
	}

	/// Target URL, query included.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// HTTP verb.
	pub fn method(&self) -> Method {
		self.method
	}

	/// Whether `status` is handed back to the caller as a result.
	pub fn passes_through(&self, status: u16) -> bool {
		self.pass_through.contains(&status)
			|| (self.pass_client_errors
				&& (400..500).contains(&status)
				&& status != TOO_MANY_REQUESTS)
	}

	fn to_http(&self, defaults: &BTreeMap<String, String>) -> HttpRequest {
		let mut headers = defaults.clone();

		headers.extend(self.headers.iter().map(|(k, v)| (k.clone(), v.clone())));

		HttpRequest { method: self.method, url: self.url.clone(), headers, body: self.body.clone() }
	}
}

/// Request executor shared by [`crate::login::LoginChain`], [`crate::client::Client`], and
/// [`crate::api::Api`].
///
/// Configuration is fixed after construction; cloning is cheap and shares the HTTP stack and
/// the metrics.
pub struct Transport<T>
where
	T: ?Sized + HttpTransport,
{
	http: Arc<T>,
	rate_limit: RateLimitPolicy,
	default_headers: BTreeMap<String, String>,
	metrics: Arc<TransportMetrics>,
}
impl<T> Transport<T>
where
	T: ?Sized + HttpTransport,
{
	/// Wraps `http` with the default policy and headers.
	pub fn new(http: Arc<T>) -> Self {
		Self {
			http,
			rate_limit: RateLimitPolicy::default(),
			default_headers: BTreeMap::from([(
				"user-agent".to_owned(),
				DEFAULT_USER_AGENT.to_owned(),
			)]),
			metrics: Arc::default(),
		}
	}

	/// Overrides the rate-limit policy.
	pub fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
		self.rate_limit = policy;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
		self.with_default_header("user-agent", user_agent)
	}

	/// Adds or replaces a header sent with every request. Per-request headers win.
	pub fn with_default_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.default_headers.insert(name.as_ref().to_ascii_lowercase(), value.into());

		self
	}

	/// Underlying HTTP stack.
	pub fn http(&self) -> &Arc<T> {
		&self.http
	}

	/// Active rate-limit policy.
	pub fn rate_limit(&self) -> RateLimitPolicy {
		self.rate_limit
	}

	/// Activity counters.
	pub fn metrics(&self) -> &TransportMetrics {
		&self.metrics
	}

	/// Executes `request` and normalizes the outcome.
	///
	/// A `2xx` status or one of the request's pass-through codes returns the response as-is.
	/// A `429` is waited out and resent while [`RateLimitPolicy::should_retry`] allows it.
	/// Everything else becomes the matching [`Error`] variant.
	pub async fn execute(&self, request: ApiRequest) -> Result<HttpResponse> {
		let http_request = request.to_http(&self.default_headers);
		let mut attempt = 1;

		loop {
			self.metrics.record_request();

			let response = self.http.send(http_request.clone()).await?;

			obs::log_response(request.method, &request.url, response.status, attempt);

			if response.is_success() || request.passes_through(response.status) {
				return Ok(response);
			}
			if response.status == TOO_MANY_REQUESTS {
				let retry = self.rate_limit.should_retry(attempt);

				self.metrics.record_rate_limited(retry);
				obs::record_rate_limited(retry);

				if retry {
					obs::log_rate_limited(&request.url, self.rate_limit.sleep, attempt);
					tokio::time::sleep(self.rate_limit.sleep).await;

					attempt += 1;

					continue;
				}
			}

			return Err(Error::from_status(ApiError::from_response(&request.url, &response)));
		}
	}

	/// Executes `request` and decodes the JSON body of the (successful) response.
	pub async fn execute_json<R>(&self, request: ApiRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let url = request.url.clone();

		self.execute(request).await?.json(&url)
	}
}
impl<T> Clone for Transport<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			http: self.http.clone(),
			rate_limit: self.rate_limit,
			default_headers: self.default_headers.clone(),
			metrics: self.metrics.clone(),
		}
	}
}
impl<T> Debug for Transport<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Transport")
			.field("rate_limit", &self.rate_limit)
			.field("default_headers", &self.default_headers.keys().collect::<Vec<_>>())
			.field("metrics", &self.metrics)
			.finish()
	}
}
#[cfg(feature = "reqwest")]
impl Default for Transport<crate::http::ReqwestTransport> {
	fn default() -> Self {
		Self::new(Arc::new(crate::http::ReqwestTransport::default()))
	}
}
