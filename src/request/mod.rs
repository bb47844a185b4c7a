//! Request description and assembly.
//!
//! This module provides:
//! - The caller-facing request description ([`RequestSpec`], [`BodySource`])
//! - Supported methods and body content types ([`HttpMethodKind`], [`ContentType`])
//! - Encoding of file-backed bodies ([`encode`], [`EncodedBody`])
//! - Assembly into a dispatchable [`HttpRequest`](crate::webhook::HttpRequest)
//!   ([`RequestAssembler`])

mod assembler;
mod encoder;
mod spec;


pub use assembler::RequestAssembler;
pub use encoder::{BodyPayload, EncodedBody, encode};
pub use spec::{BodySource, ContentType, HttpMethodKind, RequestSpec, RequestSpecBuilder};

pub(crate) use spec::scalar_text;
