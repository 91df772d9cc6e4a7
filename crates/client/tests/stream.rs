//! Drives the real reqwest path against a local one-shot HTTP server.

use client::{GenerateError, GenerationClient};
use shared::api::{GenerationRequest, StreamChunk};
use std::io::Read;
use std::time::Duration;
use tiny_http::{Header, Response, Server};
use tokio::sync::mpsc::unbounded_channel;

/// Serve exactly one request, then exit. Returns the base URL.
fn spawn_one_shot_server(body: &'static str, status: u16) -> String {
    let server = Server::http("127.0.0.1:0").expect("bind test server");
    let port = server
        .server_addr()
        .to_ip()
        .expect("tcp listener")
        .port();
    std::thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut req_body = String::new();
            let _ = request.as_reader().read_to_string(&mut req_body);
            let parsed: GenerationRequest =
                serde_json::from_str(&req_body).expect("request body is the prompt JSON");
            assert!(!parsed.prompt.is_empty());

            let header = Header::from_bytes(&b"Content-Type"[..], &b"text/event-stream"[..])
                .expect("valid header");
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn streams_fragments_from_a_live_server() {
    let body = "data: {\"text\":\"Here are 4 summaries:\\n\"}\n\n\
                data: {\"text\":\"1. Alpha.\\n\"}\n\n\
                data: {\"text\":\"2. Beta.\"}\n\n";
    let base_url = spawn_one_shot_server(body, 200);

    let (tx, mut rx) = unbounded_channel();
    GenerationClient::new(base_url)
        .stream_summaries("Software Developer", tx)
        .await
        .expect("stream completes");

    let mut buffer = String::new();
    let mut done = false;
    while let Ok(chunk) = rx.try_recv() {
        match chunk {
            StreamChunk::Text(text) => buffer.push_str(&text),
            StreamChunk::Done => done = true,
            StreamChunk::Error(e) => panic!("unexpected error chunk: {e}"),
        }
    }
    assert!(done, "Done chunk expected after the stream ends");
    assert_eq!(buffer, "Here are 4 summaries:\n1. Alpha.\n2. Beta.");
}

/// Reader that yields the body in pieces with a pause before each one,
/// so the response arrives as a long-lived trickle rather than one write.
struct DribbleReader {
    parts: Vec<&'static [u8]>,
    next: usize,
    pause: Duration,
}

impl Read for DribbleReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let Some(part) = self.parts.get(self.next).copied() else {
            return Ok(0);
        };
        std::thread::sleep(self.pause);
        let n = part.len().min(buf.len());
        buf[..n].copy_from_slice(&part[..n]);
        if n < part.len() {
            self.parts[self.next] = &part[n..];
        } else {
            self.next += 1;
        }
        Ok(n)
    }
}

#[tokio::test]
async fn stream_survives_idle_gaps_between_chunks() {
    let server = Server::http("127.0.0.1:0").expect("bind test server");
    let port = server.server_addr().to_ip().expect("tcp listener").port();
    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let reader = DribbleReader {
                parts: vec![
                    b"data: {\"text\":\"slow\"}\n\n",
                    b"data: {\"text\":\" and\"}\n\n",
                    b"data: {\"text\":\" steady\"}\n\n",
                ],
                next: 0,
                pause: Duration::from_millis(150),
            };
            let header = Header::from_bytes(&b"Content-Type"[..], &b"text/event-stream"[..])
                .expect("valid header");
            // No content length: chunked transfer, one write per part.
            let response =
                Response::new(tiny_http::StatusCode(200), vec![header], reader, None, None);
            let _ = request.respond(response);
        }
    });

    let (tx, mut rx) = unbounded_channel();
    GenerationClient::new(format!("http://127.0.0.1:{port}"))
        .stream_summaries("Software Developer", tx)
        .await
        .expect("idle gaps must not fail the stream");

    let mut buffer = String::new();
    while let Ok(chunk) = rx.try_recv() {
        if let StreamChunk::Text(text) = chunk {
            buffer.push_str(&text);
        }
    }
    assert_eq!(buffer, "slow and steady");
}

#[tokio::test]
async fn non_success_status_fails_before_streaming() {
    let base_url = spawn_one_shot_server("model overloaded", 503);

    let (tx, mut rx) = unbounded_channel();
    let err = GenerationClient::new(base_url)
        .stream_summaries("Software Developer", tx)
        .await
        .expect_err("5xx must fail the request");

    match err {
        GenerateError::Status { status, detail } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(detail, "model overloaded");
        }
        other => panic!("expected Status error, got: {other}"),
    }
    // No partial output reaches the channel on a pre-stream failure.
    assert!(rx.try_recv().is_err());
}
