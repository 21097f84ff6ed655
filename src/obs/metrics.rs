// self
use crate::obs::{HopOutcome, LoginHop};

/// Records a login hop outcome via the global metrics recorder (when enabled).
pub fn record_hop_outcome(hop: LoginHop, outcome: HopOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"mojang_client_login_hop_total",
			"hop" => hop.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (hop, outcome);
	}
}

/// Records a 429 answer; `retried` tells whether the transport waited and resent.
pub fn record_rate_limited(retried: bool) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"mojang_client_rate_limited_total",
			"retried" => if retried { "true" } else { "false" }
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = retried;
	}
}
