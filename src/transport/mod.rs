//! Delivery of ratings to the rating endpoint.
//!
//! The wire shape is chosen at construction through [`TransportConfig`]: an
//! HTTP method, a body encoding (which fixes the content type) and a response
//! contract describing what counts as success.

mod encoding;
mod error;
mod http;
mod response;

use serde::{Deserialize, Serialize};

use crate::rating::Rating;

pub use encoding::{BodyEncoding, EncodedBody, RATING_FIELD};
pub use error::SubmitError;
pub use http::HttpTransport;
pub use response::ResponseContract;

/// Sends one rating and reports whether the endpoint accepted it.
///
/// Implementations block until the request resolves; the submitter runs them
/// on a worker thread.
pub trait RatingTransport: Send + Sync + 'static {
    /// Deliver `rating`, classifying any failure.
    fn send(&self, rating: Rating) -> Result<(), SubmitError>;
}

/// HTTP method used for the outbound request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `POST`, the endpoint's native method.
    #[default]
    Post,
    /// `PUT`, for gateways that front the endpoint.
    Put,
}

impl HttpMethod {
    /// Method token as sent on the request line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Request/response shape for one rating endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Request method.
    pub method: HttpMethod,
    /// Body serialization.
    pub encoding: BodyEncoding,
    /// How the response is interpreted.
    pub response: ResponseContract,
}

impl TransportConfig {
    /// `Content-Type` header implied by the encoding.
    pub fn content_type(&self) -> &'static str {
        self.encoding.content_type()
    }

    /// Serialize `rating` into a request body.
    pub fn serialize_body(&self, rating: Rating) -> Result<EncodedBody, SubmitError> {
        self.encoding.encode(rating)
    }

    /// Interpret a response status and body.
    pub fn parse_response(&self, status: u16, body: &str) -> Result<(), SubmitError> {
        self.response.interpret(status, body)
    }
}
