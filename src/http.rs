//! Transport primitives shared by every endpoint call.
//!
//! The module exposes [`HttpTransport`] alongside owned [`HttpRequest`] and
//! [`HttpResponse`] values so downstream crates can integrate custom HTTP clients (or
//! scripted fakes in tests) without touching the status normalization that lives in
//! [`crate::transport`]. Requests are plain data: a retried request is rebuilt from the
//! same value and therefore byte-identical to the first attempt.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing one request.
///
/// This is the client's only dependency on an HTTP library. The Microsoft hop of the login
/// chain reads its tokens from the fragment of the redirect target, so implementations must
/// either stop at a redirect whose `Location` fragment carries `access_token` and return that
/// redirect response (the bundled [`ReqwestTransport`] does this), or follow it and report the
/// target URL with its fragment in [`HttpResponse::url`]. Implementations must be
/// `Send + Sync + 'static` so one transport can be shared across client instances.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` and returns the response regardless of its status.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// HTTP verbs used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the canonical verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Request payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
	/// No body.
	#[default]
	Empty,
	/// `application/json` body.
	Json(serde_json::Value),
	/// `application/x-www-form-urlencoded` body.
	Form(Vec<(String, String)>),
	/// `multipart/form-data` body.
	Multipart(Vec<MultipartField>),
}

/// One field of a multipart body.
#[derive(Clone, PartialEq, Eq)]
pub enum MultipartField {
	/// Plain text field.
	Text {
		/// Field name.
		name: String,
		/// Field value.
		value: String,
	},
	/// File upload field.
	File {
		/// Field name.
		name: String,
		/// File name reported to the server.
		file_name: String,
		/// MIME type of the payload.
		content_type: String,
		/// File contents.
		bytes: Vec<u8>,
	},
}
impl Debug for MultipartField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Text { name, value } =>
				f.debug_struct("Text").field("name", name).field("value", value).finish(),
			Self::File { name, file_name, content_type, bytes } => f
				.debug_struct("File")
				.field("name", name)
				.field("file_name", file_name)
				.field("content_type", content_type)
				.field("len", &bytes.len())
				.finish(),
		}
	}
}

/// Fully described outbound request.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute URL, query included.
	pub url: Url,
	/// Header map keyed by lowercase header name.
	pub headers: BTreeMap<String, String>,
	/// Request payload.
	pub body: RequestBody,
}
impl HttpRequest {
	/// Creates a body-less request.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: BTreeMap::new(), body: RequestBody::Empty }
	}

	/// Returns a header value by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}
}
impl Debug for HttpRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		// Header values may carry bearer tokens.
		f.debug_struct("HttpRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &self.headers.keys().collect::<Vec<_>>())
			.field("body", &self.body)
			.finish()
	}
}

/// Response captured by an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Final URL after redirects, fragment preserved.
	pub url: Url,
	/// Header map keyed by lowercase header name.
	pub headers: BTreeMap<String, String>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns a header value by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Returns the body as lossily decoded UTF-8.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Whether the body is empty or whitespace only.
	pub fn is_body_empty(&self) -> bool {
		self.body.iter().all(u8::is_ascii_whitespace)
	}

	/// Decodes the JSON body; `url` names the request in the error.
	pub fn json<T>(&self, url: &Url) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::Decode { url: url.clone(), source })
	}
}

/// Redirect hops followed before the request fails.
#[cfg(feature = "reqwest")]
pub const MAX_REDIRECTS: usize = 10;

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapped client is the connection reuse object; pass a preconfigured one through
/// [`ReqwestTransport::with_client`] to share pools, proxies, or timeouts. Build it from
/// [`ReqwestTransport::client_builder`] so it carries [`ReqwestTransport::redirect_policy`];
/// reqwest drops URL fragments while following redirects, which would hide the Microsoft
/// hop's tokens.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Client builder preloaded with [`ReqwestTransport::redirect_policy`].
	pub fn client_builder() -> reqwest::ClientBuilder {
		ReqwestClient::builder().redirect(Self::redirect_policy())
	}

	/// Follows up to [`MAX_REDIRECTS`] redirects but stops at one whose target fragment
	/// carries an `access_token`, returning that redirect response as-is.
	pub fn redirect_policy() -> reqwest::redirect::Policy {
		reqwest::redirect::Policy::custom(|attempt| {
			let carries_token = attempt.url().fragment().is_some_and(|fragment| {
				fragment.split('&').any(|pair| pair.starts_with("access_token="))
			});

			if carries_token {
				attempt.stop()
			} else if attempt.previous().len() > MAX_REDIRECTS {
				attempt.error("too many redirects")
			} else {
				attempt.follow()
			}
		})
	}

	async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
		let url = request.url.clone();
		let method = match request.method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Delete => reqwest::Method::DELETE,
		};
		let mut builder = self.0.request(method, request.url);

		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}

		builder = match request.body {
			RequestBody::Empty => builder,
			RequestBody::Json(value) => {
				let bytes = serde_json::to_vec(&value)
					.map_err(|e| TransportError::Io(std::io::Error::other(e)))?;

				builder.header(reqwest::header::CONTENT_TYPE, "application/json").body(bytes)
			},
			RequestBody::Form(pairs) => builder.form(&pairs),
			RequestBody::Multipart(fields) => builder.multipart(multipart_form(&url, fields)?),
		};

		let response = builder.send().await.map_err(|e| TransportError::network(&url, e))?;
		let status = response.status().as_u16();
		let final_url = response.url().clone();
		let headers = response
			.headers()
			.iter()
			.filter_map(|(name, value)| {
				value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
			})
			.collect();
		let body =
			response.bytes().await.map_err(|e| TransportError::network(&url, e))?.to_vec();

		Ok(HttpResponse { status, url: final_url, headers, body })
	}
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestTransport {
	fn default() -> Self {
		// Only a broken TLS backend fails the build.
		Self(Self::client_builder().build().unwrap_or_default())
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(self.dispatch(request))
	}
}

#[cfg(feature = "reqwest")]
fn multipart_form(
	url: &Url,
	fields: Vec<MultipartField>,
) -> Result<reqwest::multipart::Form, TransportError> {
	let mut form = reqwest::multipart::Form::new();

	for field in fields {
		form = match field {
			MultipartField::Text { name, value } => form.text(name, value),
			MultipartField::File { name, file_name, content_type, bytes } => {
				let part = reqwest::multipart::Part::bytes(bytes)
					.file_name(file_name)
					.mime_str(&content_type)
					.map_err(|e| TransportError::network(url, e))?;

				form.part(name, part)
			},
		};
	}

	Ok(form)
}
