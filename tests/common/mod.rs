#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use zosmf_files::api::{ApiRequest, ApiResponse, Transport};
use zosmf_files::profile::{account_name, MemorySecureStore, SecretCodec, CREDENTIAL_SERVICE};
use zosmf_files::{ZosmfConnection, ZosmfError};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn write_profile(dir: &Path, name: &str, yaml: &str) {
    fs::create_dir_all(dir).expect("create profiles dir");
    fs::write(dir.join(format!("{}.yaml", name)), yaml).expect("write profile");
}

/// Store holding `user`/`password` for `profile`, encoded with `codec`.
pub fn seeded_store(
    codec: &dyn SecretCodec,
    profile: &str,
    user: &str,
    password: &str,
) -> MemorySecureStore {
    let mut store = MemorySecureStore::new();
    for (field, value) in [("user", user), ("password", password)] {
        let account = account_name(profile, field);
        store.insert(
            format!("{}/{}", CREDENTIAL_SERVICE, account),
            account,
            codec.encode(value),
        );
    }
    store
}

pub fn test_connection() -> ZosmfConnection {
    ZosmfConnection::new("mf.example.com:10443", "IBMUSER", "sys1pw", true)
}

/// Transport that records every request and answers from a queue.
///
/// When the queue is empty it answers `200` with an empty body.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    responses: Arc<Mutex<VecDeque<ApiResponse>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &[u8]) {
        self.responses.lock().unwrap().push_back(ApiResponse {
            status,
            content_type: None,
            body: body.to_vec(),
        });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests()
            .pop()
            .expect("at least one request was sent")
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ZosmfError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ApiResponse {
                status: 200,
                content_type: None,
                body: Vec::new(),
            }))
    }
}

/// Request as received by [`serve_once`].
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Accepts one connection, records the request and answers with `status`
/// and `response_body`.
pub fn serve_once(status: u16, response_body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header");
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
        }

        let length = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.parse::<usize>().ok())
            .unwrap_or(0);
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).expect("read body");

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {} Status\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            response_body.len(),
            response_body
        )
        .expect("write response");
        stream.flush().expect("flush response");

        CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body,
        }
    });

    (format!("http://{}", addr), handle)
}
