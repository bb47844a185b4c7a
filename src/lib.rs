//! n8n-webhook: trigger n8n workflows through their webhook endpoints.
//!
//! A request description ([`request::RequestSpec`]) and an authentication
//! strategy ([`auth::AuthSpec`]) are assembled into one HTTP request, sent
//! according to a [`webhook::CompletionPolicy`] (fire-and-forget or poll until
//! `200 OK`), and the final response is decoded into a [`webhook::Output`].
//!
//! [`TriggerWorkflow`] wires the three stages together.

pub mod auth;
pub mod config;
pub mod request;
pub mod storage;
pub mod time;
pub mod webhook;

mod error;
mod trigger;

pub use error::{ConfigurationError, Error};
pub use trigger::TriggerWorkflow;
