//! Webhook dispatch, completion and response decoding.
//!
//! This module provides types and traits for:
//! - Describing HTTP requests ([`HttpRequest`]) and responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Waiting for a terminal response ([`CompletionPolicy`], [`WebhookInvoker`])
//! - Decoding the final response ([`decode`], [`Output`])

mod client;
mod completion;
mod decoder;
mod error;
mod http;
mod invoker;

#[cfg(test)]
mod client_tests;

pub use client::ReqwestClient;
pub use completion::CompletionPolicy;
pub use decoder::{Output, ResponseBody, decode};
pub use error::{DecodeError, HttpError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use invoker::{InvocationResult, WebhookInvoker, is_terminal};
