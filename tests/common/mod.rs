//! Minimal in-process HTTP stub: serves one canned body per connection and records
//! what each request looked like.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// What the stub saw for one request.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// One canned answer: raw status line, body, and an optional `Content-Length` that
/// differs from the bytes actually sent.
#[derive(Debug, Clone, Copy)]
pub struct Reply {
    pub status_line: &'static str,
    pub body: &'static str,
    pub declared_len: Option<usize>,
}

impl Reply {
    pub fn ok(body: &'static str) -> Self {
        Self {
            status_line: "HTTP/1.1 200 OK",
            body,
            declared_len: None,
        }
    }

    pub fn status(status_line: &'static str, body: &'static str) -> Self {
        Self {
            status_line,
            ..Self::ok(body)
        }
    }

    /// Announce `len` bytes but send only the body, then close the connection.
    pub fn short_body(len: usize, body: &'static str) -> Self {
        Self {
            declared_len: Some(len),
            ..Self::ok(body)
        }
    }
}

pub struct Stub {
    pub base_url: String,
    requests: Receiver<Recorded>,
}

impl Stub {
    /// Answer the next `bodies.len()` connections with 200 and the given bodies, in order.
    pub fn serve(bodies: Vec<&'static str>) -> Self {
        Self::serve_replies(bodies.into_iter().map(Reply::ok).collect())
    }

    /// Answer the next `replies.len()` connections with the given replies, in order.
    pub fn serve_replies(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for reply in replies {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let mut reader = BufReader::new(stream);

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut parts = request_line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let target = parts.next().unwrap_or_default().to_string();

                let mut content_length = 0usize;
                let mut content_type = None;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        let value = value.trim().to_string();
                        match name.to_ascii_lowercase().as_str() {
                            "content-length" => content_length = value.parse().unwrap(),
                            "content-type" => content_type = Some(value),
                            _ => {}
                        }
                    }
                }
                let mut req_body = vec![0u8; content_length];
                reader.read_exact(&mut req_body).unwrap();

                // Recorded before answering so the client never observes a reply first.
                let _ = tx.send(Recorded {
                    method,
                    target,
                    content_type,
                    body: req_body,
                });

                let mut stream = reader.into_inner();
                // The client may hang up early on a short body; ignore write errors.
                let _ = write!(
                    stream,
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.status_line,
                    reply.declared_len.unwrap_or(reply.body.len()),
                    reply.body
                );
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{}/publicAPI/v2/timeseries/data/", addr),
            requests: rx,
        }
    }

    /// Requests served so far, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.try_iter().collect()
    }
}

pub const SAMPLE_OK: &str = r#"{"status":"REQUEST_SUCCEEDED","Results":{"series":[{"seriesID":"CUUR0000SA0","data":[{"year":"2023","period":"M01","value":"299.17"}]}]}}"#;

pub const SAMPLE_TRUNCATED: &str = r#"{"status":"#;
