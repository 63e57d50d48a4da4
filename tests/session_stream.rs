//! End-to-end: a local socket service streams tokens into a paced session.

use pacer::{SessionConfig, SessionEvent, StreamSession, TransportConfig};
use std::io::Write;
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

fn frame(token: &str) -> String {
    format!("{{\"event\":\"chatToken\",\"data\":{}}}\n", serde_json::json!(token))
}

fn config(addr: String, tick_ms: u64) -> SessionConfig {
    SessionConfig {
        tick_interval: Duration::from_millis(tick_ms),
        start_running: false,
        transport: TransportConfig {
            addr,
            poll_timeout: Duration::from_millis(10),
            reconnect: false,
            ..TransportConfig::default()
        },
    }
}

/// Poll until `done` holds, collecting events; panics after two seconds.
fn poll_until(
    session: &mut StreamSession,
    done: impl Fn(&StreamSession) -> bool,
) -> Vec<SessionEvent> {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut events = Vec::new();
    while !done(session) {
        assert!(Instant::now() < deadline, "timed out, display = {:?}", session.display());
        if let Some(event) = session.poll(Duration::from_millis(20)) {
            events.push(event);
        }
    }
    events
}

#[test]
fn burst_is_revealed_one_token_per_tick() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let server = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        // Whole burst in a single write
        let burst: String = ["Hello", ",", " ", "world", "!"].iter().map(|t| frame(t)).collect();
        socket.write_all(burst.as_bytes()).unwrap();
    });

    let mut session = StreamSession::connect(&config(addr, 5)).unwrap();
    session.set_run_gate(true);

    let events = poll_until(&mut session, |s| s.display() == "Hello, world!");

    let released: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::Released(token) => Some(token.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(released, vec!["Hello", ",", " ", "world", "!"]);
    assert_eq!(events.first(), Some(&SessionEvent::Connected));

    server.join().unwrap();
    session.dispose();
}

#[test]
fn held_tokens_drain_after_disconnect() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let server = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        for token in ["Hello", " ", "world"] {
            socket.write_all(frame(token).as_bytes()).unwrap();
        }
    });

    let mut session = StreamSession::connect(&config(addr, 5)).unwrap();

    // Gate closed: everything queues, nothing shows, even after the peer leaves
    poll_until(&mut session, |s| !s.is_transport_open());
    assert_eq!(session.display(), "");
    assert_eq!(session.pending_len(), 3);

    session.set_run_gate(true);
    poll_until(&mut session, StreamSession::is_drained);
    assert_eq!(session.display(), "Hello world");

    server.join().unwrap();
}
