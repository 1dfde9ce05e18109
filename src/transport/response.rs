use serde::{Deserialize, Serialize};

use super::SubmitError;

const MAX_DETAIL_CHARS: usize = 200;

/// What the rating endpoint must answer for a submission to count as accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseContract {
    /// Any 2xx status; the body is ignored.
    Status,
    /// A 2xx status with a JSON body `{"ok": true}`.
    #[default]
    JsonOkFlag,
}

#[derive(Debug, Deserialize)]
struct OkFlagWire {
    ok: Option<bool>,
    message: Option<String>,
    error: Option<String>,
}

impl OkFlagWire {
    fn detail(self) -> Option<String> {
        self.message.or(self.error).filter(|text| !text.trim().is_empty())
    }
}

impl ResponseContract {
    /// `Accept` header matching the contract.
    pub fn accept(self) -> &'static str {
        match self {
            Self::Status => "*/*",
            Self::JsonOkFlag => "application/json",
        }
    }

    /// Classify a response; `Ok(())` means the rating was recorded.
    pub fn interpret(self, status: u16, body: &str) -> Result<(), SubmitError> {
        if !(200..300).contains(&status) {
            return Err(status_failure(status, body));
        }
        match self {
            Self::Status => Ok(()),
            Self::JsonOkFlag => interpret_ok_flag(body),
        }
    }
}

fn interpret_ok_flag(body: &str) -> Result<(), SubmitError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(SubmitError::Protocol("Empty response body".to_string()));
    }
    let parsed: OkFlagWire = serde_json::from_str(trimmed)
        .map_err(|err| SubmitError::Protocol(format!("{err}: {}", truncate(trimmed))))?;
    match parsed.ok {
        Some(true) => Ok(()),
        Some(false) => Err(SubmitError::Application(
            parsed
                .detail()
                .unwrap_or_else(|| "Endpoint reported failure".to_string()),
        )),
        None => Err(SubmitError::Protocol(format!(
            "Missing ok flag in response: {}",
            truncate(trimmed)
        ))),
    }
}

fn status_failure(status: u16, body: &str) -> SubmitError {
    let trimmed = body.trim();
    let detail = serde_json::from_str::<OkFlagWire>(trimmed)
        .ok()
        .and_then(OkFlagWire::detail)
        .unwrap_or_else(|| truncate(trimmed));
    if detail.is_empty() {
        SubmitError::Application(format!("HTTP {status}"))
    } else {
        SubmitError::Application(format!("HTTP {status}: {detail}"))
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_DETAIL_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_DETAIL_CHARS).collect();
    out.push('…');
    out
}
