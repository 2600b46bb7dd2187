//! # grantdesk-client
//!
//! [`HttpBackend`] implements the collaborator traits of `grantdesk-perms`
//! and `grantdesk-credentials` over the REST backend.
//!
//! Every mutating endpoint replies with an
//! [`Envelope`](grantdesk_core::Envelope); a reply with `succeeded: false`
//! surfaces as the calling domain's rejection error.

pub mod config;
pub mod error;
pub mod http;

pub use config::{ClientConfig, Endpoints};
pub use error::{ClientError, Result};
pub use http::HttpBackend;
