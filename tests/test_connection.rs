mod common;

use std::sync::Arc;

use kestrel::http::connection::{Connection, READ_BUFFER_SIZE};
use kestrel::router::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

/// Runs one connection against `request` and returns everything it wrote.
async fn exchange(router: Router, request: &[u8]) -> Vec<u8> {
    let (mut client, server) = duplex(8 * 1024);
    let router = Arc::new(router);

    let task = tokio::spawn(async move {
        let mut conn = Connection::new(server, router);
        conn.run().await
    });

    client.write_all(request).await.unwrap();

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    task.await.unwrap().unwrap();
    out
}

#[tokio::test]
async fn test_connection_root() {
    let out = exchange(Router::new(None), b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n").await;

    assert_eq!(out, b"HTTP/1.1 200 OK\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_connection_not_found() {
    let out = exchange(Router::new(None), b"GET /nope HTTP/1.1\r\n\r\n").await;

    assert_eq!(out, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_connection_echo() {
    let out = exchange(Router::new(None), b"GET /echo/pineapple HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 9\r\n\r\npineapple"
    );
}

#[tokio::test]
async fn test_connection_echo_gzip() {
    let out = exchange(
        Router::new(None),
        b"GET /echo/abc HTTP/1.1\r\nAccept-Encoding: gzip\r\n\r\n",
    )
    .await;

    let (head, body) = common::split_response(&out);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\nContent-Encoding: gzip\r\nContent-Type: text/plain\r\n"));
    assert!(head.ends_with(&format!("Content-Length: {}", body.len())));
    assert_eq!(common::gunzip(&body), b"abc".to_vec());
}

#[tokio::test]
async fn test_connection_user_agent() {
    let out = exchange(
        Router::new(None),
        b"GET /user-agent HTTP/1.1\r\nHost: localhost\r\nUser-Agent: mango/grape\r\n\r\n",
    )
    .await;

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 11\r\n\r\nmango/grape"
    );
}

#[tokio::test]
async fn test_connection_post_file() {
    let dir = common::temp_dir("conn-post");
    let out = exchange(
        Router::new(Some(dir.clone())),
        b"POST /files/upload HTTP/1.1\r\nContent-Type: application/octet-stream\r\nContent-Length: 5\r\n\r\n12345",
    )
    .await;

    assert_eq!(out, b"HTTP/1.1 201 Created\r\n\r\n".to_vec());
    assert_eq!(std::fs::read(dir.join("upload")).unwrap(), b"12345".to_vec());
}

#[tokio::test]
async fn test_connection_malformed_request_gets_no_response() {
    let out = exchange(Router::new(None), b"GARBAGE\r\n\r\n").await;
    assert!(out.is_empty());

    let out = exchange(Router::new(None), b"GET / HTTP/1.1\r\nNoSeparator\r\n\r\n").await;
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_connection_client_closes_without_sending() {
    let (client, server) = duplex(1024);
    drop(client);

    let mut conn = Connection::new(server, Arc::new(Router::new(None)));
    conn.run().await.unwrap();
}

#[tokio::test]
async fn test_connection_reads_at_most_one_buffer() {
    let mut request = b"GET /echo/".to_vec();
    request.extend(std::iter::repeat_n(b'a', READ_BUFFER_SIZE * 2));
    request.extend_from_slice(b" HTTP/1.1\r\n\r\n");

    let out = exchange(Router::new(None), &request).await;

    let (_, body) = common::split_response(&out);
    assert!(body.len() <= READ_BUFFER_SIZE);
}
