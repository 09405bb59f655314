//! Download fan-out against a local HTTP responder.

use std::net::SocketAddr;
use std::time::Duration;

use refvocab_core::{Error, Resource};
use refvocab_fetch::{DownloadOutcome, DownloadTask, Downloader};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Minimal HTTP/1.1 responder:
/// - `/slow/<body>` waits 200ms then returns `<body>`
/// - `/agent` echoes the User-Agent header
/// - `/missing` returns 404
/// - anything else returns its path without the leading slash
async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        return;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
                let request = String::from_utf8_lossy(&buf).to_string();
                let path = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();

                let (status, body) = if let Some(body) = path.strip_prefix("/slow/") {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    ("200 OK", body.to_string())
                } else if path == "/agent" {
                    let agent = request
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("user-agent: ")
                                .map(|_| l["user-agent: ".len()..].to_string())
                        })
                        .unwrap_or_default();
                    ("200 OK", agent)
                } else if path == "/missing" {
                    ("404 Not Found", "no such vocabulary".to_string())
                } else {
                    ("200 OK", path.trim_start_matches('/').to_string())
                };

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            });
        }
    });

    addr
}

/// Local responder only; keep any ambient proxy settings out of the way.
fn downloader(max_concurrent: usize, force: bool) -> Downloader {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Downloader::with_client(client, max_concurrent, force)
}

#[tokio::test]
async fn test_reports_follow_submission_order() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();

    let tasks = vec![
        DownloadTask::new("P01", format!("http://{}/slow/first", addr), dir.path().join("p01.json")),
        DownloadTask::new("P02", format!("http://{}/second", addr), dir.path().join("p02.json")),
        DownloadTask::new("P06", format!("http://{}/third", addr), dir.path().join("p06.json")),
    ];

    let reports = downloader(3, false).fetch_all(tasks).await.unwrap();

    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["P01", "P02", "P06"]);
    assert_eq!(
        reports[0].outcome,
        DownloadOutcome::Downloaded { bytes: 5 }
    );
    assert_eq!(std::fs::read_to_string(dir.path().join("p01.json")).unwrap(), "first");
    assert_eq!(std::fs::read_to_string(dir.path().join("p06.json")).unwrap(), "third");
    assert!(!dir.path().join("p01.json.part").exists());
}

#[tokio::test]
async fn test_force_overwrites_existing_files() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("l22.json");
    std::fs::write(&dest, "stale").unwrap();

    let task = DownloadTask::new("L22", format!("http://{}/fresh", addr), &dest);

    let cached = downloader(1, false);
    let reports = cached.fetch_all(vec![task.clone()]).await.unwrap();
    assert_eq!(reports[0].outcome, DownloadOutcome::Skipped);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "stale");

    let forced = downloader(1, true);
    let reports = forced.fetch_all(vec![task]).await.unwrap();
    assert_eq!(reports[0].outcome, DownloadOutcome::Downloaded { bytes: 5 });
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "fresh");
}

#[tokio::test]
async fn test_custom_user_agent_is_sent() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut edmo = Resource::edmo();
    edmo.url = format!("http://{}/agent", addr);
    let task = DownloadTask::for_resource(&edmo, dir.path());
    let dest = task.dest.clone();
    downloader(1, false)
        .fetch_all(vec![task])
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "Custom agent");
}

#[tokio::test]
async fn test_http_error_aborts_batch() {
    let addr = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();

    let tasks = vec![
        DownloadTask::new("P01", format!("http://{}/ok", addr), dir.path().join("p01.json")),
        DownloadTask::new("P02", format!("http://{}/missing", addr), dir.path().join("p02.json")),
    ];

    let err = downloader(2, false)
        .fetch_all(tasks)
        .await
        .unwrap_err();

    match err {
        Error::Http(msg) => assert!(msg.contains("404"), "unexpected message: {msg}"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("p02.json").exists());
}
