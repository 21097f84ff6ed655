//! Optional observability helpers for the transport and the login chain.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `mojang_client.login` with the `hop` and
//!   `stage` fields, plus `mojang_client.request` events for every dispatched request and a
//!   warning whenever a rate limit is waited out.
//! - Enable `metrics` to increment the `mojang_client_login_hop_total` counter for every
//!   attempt/success/failure, labeled by `hop` + `outcome`, and the
//!   `mojang_client_rate_limited_total` counter for every 429 answer.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Hops of the credential chain observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoginHop {
	/// Live OAuth page fetch and hidden-form extraction.
	OAuthPage,
	/// Microsoft account form post.
	Microsoft,
	/// Xbox Live user authentication.
	XboxLive,
	/// XSTS authorization.
	Xsts,
	/// Minecraft Services login.
	Minecraft,
	/// Entitlement and profile validation.
	Entitlement,
}
impl LoginHop {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			LoginHop::OAuthPage => "oauth_page",
			LoginHop::Microsoft => "microsoft",
			LoginHop::XboxLive => "xbox_live",
			LoginHop::Xsts => "xsts",
			LoginHop::Minecraft => "minecraft",
			LoginHop::Entitlement => "entitlement",
		}
	}
}
impl Display for LoginHop {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each hop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HopOutcome {
	/// Entry to a hop.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl HopOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HopOutcome::Attempt => "attempt",
			HopOutcome::Success => "success",
			HopOutcome::Failure => "failure",
		}
	}
}
impl Display for HopOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
