//! Typed async client for the Mojang and Minecraft Services APIs.
//!
//! Two pieces carry the weight:
//!
//! - [`transport::Transport`] executes every request, normalizes non-success statuses into the
//!   [`error::Error`] taxonomy, and optionally waits out rate limits.
//! - [`login::LoginChain`] walks the Microsoft → Xbox Live → XSTS → Minecraft handshake as an
//!   explicit state machine and validates the resulting bearer token against the account's
//!   entitlements before handing out a [`auth::Credential`].
//!
//! [`client::Client`] and [`api::Api`] layer thin endpoint wrappers on top of both.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod login;
pub mod models;
pub mod obs;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};
