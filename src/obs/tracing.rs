// std
use std::time::Duration;
// self
use crate::{_prelude::*, http::Method, obs::LoginHop};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedHop<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedHop<F> = F;

/// A span builder used by the login chain.
#[derive(Clone, Debug)]
pub struct HopSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl HopSpan {
	/// Creates a new span tagged with the provided hop + stage.
	pub fn new(hop: LoginHop, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("mojang_client.login", hop = hop.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (hop, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedHop<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for a completed request. Query strings are omitted from the URL.
pub fn log_response(method: Method, url: &Url, status: u16, attempt: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			target: "mojang_client.request",
			method = method.as_str(),
			host = url.host_str().unwrap_or_default(),
			path = url.path(),
			status,
			attempt,
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, url, status, attempt);
	}
}

/// Emits a warning before the transport sleeps out a rate limit.
pub fn log_rate_limited(url: &Url, wait: Duration, attempt: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			target: "mojang_client.request",
			path = url.path(),
			wait_secs = wait.as_secs_f64(),
			attempt,
			"Rate limited; waiting before resending."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (url, wait, attempt);
	}
}
