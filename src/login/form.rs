//! Extraction of the hidden login form from the Live OAuth page.
//!
//! The page is HTML meant for browsers, so the values are located by pattern. The patterns
//! sit behind [`LoginPageParser`] so a markup change only requires a new parser.

// std
use std::sync::LazyLock;
// crates.io
use regex::Regex;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::HandshakeError,
	login::LoginForm,
};

static FORM_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"value="(.+?)""#).expect("Form token pattern should compile."));
static POST_URL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"urlPost:'(.+?)'").expect("Post URL pattern should compile."));

/// Extracts the hidden form values from the OAuth page body.
pub trait LoginPageParser
where
	Self: 'static + Send + Sync,
{
	/// Parses `html`; missing or malformed values are [`HandshakeError`]s.
	fn parse(&self, html: &str) -> Result<LoginForm, HandshakeError>;
}

/// Default parser matching `value="…"` (the first hidden input, `PPFT`) and `urlPost:'…'`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexLoginPageParser;
impl LoginPageParser for RegexLoginPageParser {
	fn parse(&self, html: &str) -> Result<LoginForm, HandshakeError> {
		let form_token = FORM_TOKEN
			.captures(html)
			.and_then(|caps| caps.get(1))
			.ok_or(HandshakeError::MissingFormToken)?
			.as_str();
		let raw_url =
			POST_URL.captures(html).and_then(|caps| caps.get(1)).ok_or(HandshakeError::MissingPostUrl)?;
		let post_url = Url::parse(raw_url.as_str()).map_err(|source| {
			HandshakeError::InvalidPostUrl { raw: raw_url.as_str().to_owned(), source }
		})?;

		Ok(LoginForm { form_token: TokenSecret::new(form_token), post_url })
	}
}
