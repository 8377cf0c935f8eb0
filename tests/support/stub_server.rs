//! Minimal in-process HTTP server imitating the transcription server's
//! speaker name store. Each test starts its own instance on an ephemeral
//! port and scripts failures or delays through the shared state.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct SpeakerStoreStub {
    base_url: String,
    state: Arc<StubState>,
}

#[derive(Default)]
struct StubState {
    names: Mutex<BTreeMap<u32, String>>,
    fail_next: Mutex<Option<u16>>,
    post_delay: Mutex<Option<Duration>>,
    requests: AtomicUsize,
    posts: AtomicUsize,
}

impl SpeakerStoreStub {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let state = Arc::new(StubState::default());
        let accept_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let state = Arc::clone(&accept_state);
                thread::spawn(move || handle_connection(&stream, &state));
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Server-side copy of the mapping.
    pub fn names(&self) -> BTreeMap<u32, String> {
        self.state.names.lock().expect("stub state").clone()
    }

    /// Seeds an entry before the controller loads.
    pub fn insert_name(&self, id: u32, name: &str) {
        self.state
            .names
            .lock()
            .expect("stub state")
            .insert(id, name.to_string());
    }

    /// Answers the next request with `status` and a JSON error body.
    pub fn fail_next_request(&self, status: u16) {
        *self.state.fail_next.lock().expect("stub state") = Some(status);
    }

    /// Holds every POST for `delay` before applying and answering it.
    pub fn delay_posts(&self, delay: Duration) {
        *self.state.post_delay.lock().expect("stub state") = Some(delay);
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn post_count(&self) -> usize {
        self.state.posts.load(Ordering::SeqCst)
    }
}

fn handle_connection(stream: &TcpStream, state: &StubState) {
    let Some((method, path, body)) = read_request(stream) else {
        return;
    };
    state.requests.fetch_add(1, Ordering::SeqCst);

    let injected = state.fail_next.lock().expect("stub state").take();
    if let Some(status) = injected {
        respond(stream, status, r#"{"detail":"injected failure"}"#);
        return;
    }

    match (method.as_str(), path.as_str()) {
        ("GET", "/api/speakers") => {
            let names = state.names.lock().expect("stub state").clone();
            let speakers: serde_json::Map<String, serde_json::Value> = names
                .into_iter()
                .map(|(id, name)| (id.to_string(), serde_json::Value::String(name)))
                .collect();
            let body = serde_json::json!({ "speakers": speakers }).to_string();
            respond(stream, 200, &body);
        }
        ("POST", "/api/speakers") => {
            state.posts.fetch_add(1, Ordering::SeqCst);
            let delay = *state.post_delay.lock().expect("stub state");
            if let Some(delay) = delay {
                thread::sleep(delay);
            }
            let Ok(payload) = serde_json::from_str::<serde_json::Value>(&body) else {
                respond(stream, 400, r#"{"detail":"invalid JSON"}"#);
                return;
            };
            let id = payload.get("speaker_id").and_then(|value| value.as_u64());
            let name = payload.get("name").and_then(|value| value.as_str());
            let (Some(id), Some(name)) = (id, name) else {
                respond(stream, 422, r#"{"detail":"missing fields"}"#);
                return;
            };
            state
                .names
                .lock()
                .expect("stub state")
                .insert(id as u32, name.to_string());
            let body =
                serde_json::json!({ "success": true, "speaker_id": id, "name": name }).to_string();
            respond(stream, 200, &body);
        }
        ("DELETE", "/api/speakers") => {
            state.names.lock().expect("stub state").clear();
            respond(stream, 200, r#"{"success":true}"#);
        }
        ("DELETE", entry) if entry.starts_with("/api/speakers/") => {
            let raw = &entry["/api/speakers/".len()..];
            match raw.parse::<u32>() {
                Ok(id) => {
                    state.names.lock().expect("stub state").remove(&id);
                    let body = serde_json::json!({ "success": true, "speaker_id": id }).to_string();
                    respond(stream, 200, &body);
                }
                Err(_) => respond(stream, 422, r#"{"detail":"invalid speaker id"}"#),
            }
        }
        _ => respond(stream, 404, r#"{"detail":"not found"}"#),
    }
}

fn read_request(stream: &TcpStream) -> Option<(String, String, String)> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).ok()?;
    }
    Some((method, path, String::from_utf8_lossy(&body).into_owned()))
}

fn respond(mut stream: &TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        _ => "Internal Server Error",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
