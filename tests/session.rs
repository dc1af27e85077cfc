//! Integration tests for the device client session lifecycle.

use std::time::{Duration, Instant};

use devicelog::{ClientConfig, ClientError, DeviceClient};
use futures::{SinkExt, StreamExt};
use tokio::{net::TcpListener, time::timeout};
use tokio_util::codec::{Framed, LinesCodec};

const STARTUP_DELAY: Duration = Duration::from_millis(50);

async fn bind_listener() -> (TcpListener, ClientConfig) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let port = listener
        .local_addr()
        .expect("read local address for test listener")
        .port();
    let config = ClientConfig::default()
        .host("127.0.0.1")
        .port(port)
        .startup_delay(STARTUP_DELAY);
    (listener, config)
}

#[tokio::test]
async fn session_sends_login_then_exactly_one_device_log() {
    let (listener, config) = bind_listener().await;

    let client = DeviceClient::connect(config)
        .await
        .expect("connect client");
    let session = tokio::spawn(client.run());

    let (stream, _) = listener.accept().await.expect("accept client");
    let mut framed = Framed::new(stream, LinesCodec::new());

    let login = framed
        .next()
        .await
        .expect("login frame present")
        .expect("read login frame");
    assert_eq!(login, r#"{"event":"login","data":{"passwd":"test","dvid":1}}"#);

    let received_login = Instant::now();
    let log_line = framed
        .next()
        .await
        .expect("device log frame present")
        .expect("read device log frame");
    assert!(
        received_login.elapsed() >= STARTUP_DELAY - Duration::from_millis(5),
        "device log should follow the startup delay"
    );

    let log: serde_json::Value = serde_json::from_str(&log_line).expect("parse device log");
    assert_eq!(log["event"], "deviceLog");
    let log_data = log["data"]["logData"].as_str().expect("logData string");
    assert_eq!(log_data.len(), 10);
    assert!(log_data.bytes().all(|b| b.is_ascii_alphabetic()));

    // The client now blocks dispatching; nothing further is emitted.
    let extra = timeout(Duration::from_millis(100), framed.next()).await;
    assert!(extra.is_err(), "no frames expected after the device log");

    // Closing the server ends the blocking dispatch with a disconnect.
    drop(framed);
    let result = session.await.expect("join session task");
    assert!(matches!(result, Err(ClientError::Disconnected)));
}

#[tokio::test]
async fn valid_event_resolves_the_acknowledgment_signal() {
    let (listener, config) = bind_listener().await;

    let client = DeviceClient::connect(config)
        .await
        .expect("connect client");
    let mut acknowledged = client.acknowledged();
    assert_eq!(*acknowledged.borrow(), None);
    let session = tokio::spawn(client.run());

    let (stream, _) = listener.accept().await.expect("accept client");
    let mut framed = Framed::new(stream, LinesCodec::new());

    framed.next().await.expect("login frame present").expect("read login frame");
    framed
        .send(r#"{"event":"valid","data":true}"#.to_string())
        .await
        .expect("send valid event");

    timeout(Duration::from_secs(1), acknowledged.changed())
        .await
        .expect("acknowledgment within deadline")
        .expect("acknowledgment sender alive");
    assert_eq!(*acknowledged.borrow(), Some(true));

    // Drain the device log so closing produces a clean end of stream.
    framed
        .next()
        .await
        .expect("device log frame present")
        .expect("read device log frame");
    drop(framed);
    let result = session.await.expect("join session task");
    assert!(matches!(result, Err(ClientError::Disconnected)));
}

#[tokio::test]
async fn unhandled_event_names_are_ignored() {
    let (listener, config) = bind_listener().await;

    let client = DeviceClient::connect(config)
        .await
        .expect("connect client");
    let mut acknowledged = client.acknowledged();
    let session = tokio::spawn(client.run());

    let (stream, _) = listener.accept().await.expect("accept client");
    let mut framed = Framed::new(stream, LinesCodec::new());

    framed.next().await.expect("login frame present").expect("read login frame");
    // No handler is registered for this event name; dispatch drops it and
    // keeps the session alive for the acknowledgment that follows.
    framed
        .send(r#"{"event":"setOnline","data":{"dvid":1}}"#.to_string())
        .await
        .expect("send unhandled event");
    framed
        .send(r#"{"event":"valid","data":true}"#.to_string())
        .await
        .expect("send valid event");

    timeout(Duration::from_secs(1), acknowledged.changed())
        .await
        .expect("acknowledgment within deadline")
        .expect("acknowledgment sender alive");
    assert_eq!(*acknowledged.borrow(), Some(true));

    framed
        .next()
        .await
        .expect("device log frame present")
        .expect("read device log frame");
    drop(framed);
    let result = session.await.expect("join session task");
    assert!(matches!(result, Err(ClientError::Disconnected)));
}

#[tokio::test]
async fn bad_payload_for_handled_event_fails_the_session() {
    let (listener, config) = bind_listener().await;

    let client = DeviceClient::connect(config)
        .await
        .expect("connect client");
    let session = tokio::spawn(client.run());

    let (stream, _) = listener.accept().await.expect("accept client");
    let mut framed = Framed::new(stream, LinesCodec::new());

    framed.next().await.expect("login frame present").expect("read login frame");
    framed
        .send(r#"{"event":"valid","data":"nope"}"#.to_string())
        .await
        .expect("send bad valid payload");

    let result = session.await.expect("join session task");
    assert!(matches!(result, Err(ClientError::Deserialize(_))));
}

#[tokio::test]
async fn malformed_server_payload_fails_the_session() {
    let (listener, config) = bind_listener().await;

    let client = DeviceClient::connect(config)
        .await
        .expect("connect client");
    let session = tokio::spawn(client.run());

    let (stream, _) = listener.accept().await.expect("accept client");
    let mut framed = Framed::new(stream, LinesCodec::new());

    framed.next().await.expect("login frame present").expect("read login frame");
    framed
        .send("not json".to_string())
        .await
        .expect("send malformed payload");

    let result = session.await.expect("join session task");
    assert!(matches!(result, Err(ClientError::Deserialize(_))));
}

#[tokio::test]
async fn unreachable_endpoint_fails_without_retry() {
    // Bind and immediately drop to obtain a port with no listener behind it.
    let (listener, config) = bind_listener().await;
    drop(listener);

    let started = Instant::now();
    let result = DeviceClient::connect(config).await;
    assert!(matches!(result, Err(ClientError::Io(_))));
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "connect must fail fast, not retry"
    );
}
