use std::io;
use std::time::Duration;

use super::{RatingTransport, ResponseContract, SubmitError, TransportConfig};
use crate::http_client;
use crate::rating::Rating;

const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Sends ratings to an HTTP endpoint through the shared agent.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    endpoint: String,
    config: TransportConfig,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport for `endpoint` with an overall per-request timeout.
    pub fn new(endpoint: impl Into<String>, config: TransportConfig, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            config,
            timeout,
        }
    }

    /// URL the ratings are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Method, encoding and response contract used for each request.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl RatingTransport for HttpTransport {
    fn send(&self, rating: Rating) -> Result<(), SubmitError> {
        let body = self.config.serialize_body(rating)?;
        let request = http_client::agent()
            .request(self.config.method.as_str(), &self.endpoint)
            .timeout(self.timeout)
            .set("Content-Type", body.content_type)
            .set("Accept", self.config.response.accept());

        let (status, response) = match request.send_bytes(&body.bytes) {
            Ok(response) => (response.status(), response),
            Err(ureq::Error::Status(code, response)) => (code, response),
            Err(ureq::Error::Transport(err)) => {
                return Err(SubmitError::Transport(err.to_string()));
            }
        };
        tracing::debug!(status, endpoint = %self.endpoint, "Rating endpoint responded");
        if self.config.response == ResponseContract::Status && (200..300).contains(&status) {
            return Ok(());
        }
        let text = read_body(response)?;
        self.config.parse_response(status, &text)
    }
}

fn read_body(response: ureq::Response) -> Result<String, SubmitError> {
    let bytes =
        http_client::read_response_bytes(response, MAX_RESPONSE_BYTES).map_err(|err| {
            match err.kind() {
                io::ErrorKind::InvalidData => SubmitError::Protocol(err.to_string()),
                _ => SubmitError::Transport(format!("Failed to read response: {err}")),
            }
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::BodyEncoding;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned response and hand back the raw request text.
    fn serve_once(response: impl Into<String>) -> (String, mpsc::Receiver<String>) {
        let response = response.into();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                stream
                    .set_read_timeout(Some(Duration::from_millis(500)))
                    .unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while let Ok(read) = stream.read(&mut buf) {
                    if read == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..read]);
                    if request_complete(&request) {
                        break;
                    }
                }
                let _ = stream.write_all(response.as_bytes());
                let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
            }
        });
        (format!("http://{addr}/submit_feedback"), rx)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        body.len() >= length
    }

    fn transport(url: &str, encoding: BodyEncoding, response: ResponseContract) -> HttpTransport {
        HttpTransport::new(
            url,
            TransportConfig {
                encoding,
                response,
                ..TransportConfig::default()
            },
            Duration::from_secs(5),
        )
    }

    #[test]
    fn posts_form_body_and_accepts_ok_flag() {
        let (url, requests) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 11\r\n\r\n{\"ok\":true}",
        );
        let transport = transport(&url, BodyEncoding::Form, ResponseContract::JsonOkFlag);
        assert_eq!(transport.send(Rating::Satisfied), Ok(()));

        let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(request.starts_with("POST /submit_feedback HTTP/1.1"));
        assert!(
            request
                .to_ascii_lowercase()
                .contains("content-type: application/x-www-form-urlencoded")
        );
        assert!(request.ends_with("grau=satisfeito"));
    }

    #[test]
    fn error_status_maps_to_application_failure() {
        let (url, _requests) = serve_once(
            "HTTP/1.1 400 Bad Request\r\nContent-Length: 29\r\n\r\n{\"ok\":false,\"message\":\"nope\"}",
        );
        let transport = transport(&url, BodyEncoding::Json, ResponseContract::JsonOkFlag);
        let err = transport.send(Rating::Unsatisfied).unwrap_err();
        assert_eq!(err, SubmitError::Application("HTTP 400: nope".to_string()));
    }

    #[test]
    fn status_contract_accepts_oversized_success_body() {
        let body = "x".repeat(MAX_RESPONSE_BYTES + 6 * 1024);
        let (url, _requests) = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ));
        let transport = transport(&url, BodyEncoding::Form, ResponseContract::Status);
        assert_eq!(transport.send(Rating::Satisfied), Ok(()));
    }

    #[test]
    fn ok_flag_contract_still_bounds_the_body() {
        let body = "x".repeat(MAX_RESPONSE_BYTES + 1);
        let (url, _requests) = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ));
        let transport = transport(&url, BodyEncoding::Form, ResponseContract::JsonOkFlag);
        let err = transport.send(Rating::Satisfied).unwrap_err();
        assert!(matches!(err, SubmitError::Protocol(_)), "{err:?}");
    }

    #[test]
    fn unreachable_endpoint_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let transport = transport(
            &format!("http://{addr}/submit_feedback"),
            BodyEncoding::Form,
            ResponseContract::Status,
        );
        let err = transport.send(Rating::VerySatisfied).unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)), "{err:?}");
    }
}
