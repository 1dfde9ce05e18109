use serde::{Deserialize, Serialize};

use super::SubmitError;
use crate::rating::Rating;

/// Name of the body field carrying the rating.
pub const RATING_FIELD: &str = "grau";

/// Body serialization for the rating request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    /// `grau=<rating>` as `application/x-www-form-urlencoded`.
    #[default]
    Form,
    /// `{"grau": "<rating>"}` as `application/json`.
    Json,
}

/// A serialized request body plus its content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedBody {
    /// Value for the `Content-Type` header.
    pub content_type: &'static str,
    /// Request body.
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct JsonPayload {
    grau: Rating,
}

impl BodyEncoding {
    /// MIME type of bodies produced by this encoding.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Form => "application/x-www-form-urlencoded",
            Self::Json => "application/json",
        }
    }

    /// Serialize `rating` into a request body.
    pub fn encode(self, rating: Rating) -> Result<EncodedBody, SubmitError> {
        let bytes = match self {
            Self::Form => url::form_urlencoded::Serializer::new(String::new())
                .append_pair(RATING_FIELD, rating.as_wire())
                .finish()
                .into_bytes(),
            Self::Json => serde_json::to_vec(&JsonPayload { grau: rating })
                .map_err(|err| SubmitError::Protocol(format!("Failed to encode body: {err}")))?,
        };
        Ok(EncodedBody {
            content_type: self.content_type(),
            bytes,
        })
    }
}
