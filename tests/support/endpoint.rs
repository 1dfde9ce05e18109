use std::{
    io::{Read, Write},
    net::TcpListener,
    sync::mpsc::{self, Receiver},
    thread,
    time::Duration,
};

/// A rating endpoint stand-in that answers one canned response per connection.
pub struct StubEndpoint {
    pub url: String,
    requests: Receiver<String>,
}

impl StubEndpoint {
    pub fn serve(responses: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub endpoint");
        let addr = listener.local_addr().expect("stub address");
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
                let request = read_request(&mut stream);
                let _ = stream.write_all(response.as_bytes());
                let _ = tx.send(request);
            }
        });
        Self {
            url: format!("http://{addr}/submit_feedback"),
            requests: rx,
        }
    }

    pub fn next_request(&self) -> Option<String> {
        self.requests.recv_timeout(Duration::from_secs(5)).ok()
    }
}

pub fn response(status: u16, reason: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Split a raw request into its lowercased head and its body.
pub fn split_request(request: &str) -> (String, String) {
    let (head, body) = request.split_once("\r\n\r\n").unwrap_or((request, ""));
    (head.to_ascii_lowercase(), body.to_string())
}

fn read_request(stream: &mut impl Read) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while let Ok(read) = stream.read(&mut buf) {
        if read == 0 {
            break;
        }
        request.extend_from_slice(&buf[..read]);
        if is_complete(&request) {
            break;
        }
    }
    String::from_utf8_lossy(&request).into_owned()
}

fn is_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}
