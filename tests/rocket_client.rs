use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use rocket_mission::error::MissionError;
use rocket_mission::model::ExpandRequest;
use rocket_mission::rocket::upload::UploadFile;
use rocket_mission::rocket::{BacktestApi, RocketClient};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    head: String,
    body: String,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

fn find(buf: &[u8], needle: &[u8]) -> Option<usize> {
    buf.windows(needle.len()).position(|w| w == needle)
}

fn response_for(path: &str) -> (String, Option<&'static str>) {
    let body = match path {
        "/user/login" => json!({"code": 0}),
        "/rocket/api/backtest/list" => json!({
            "code": 0,
            "data": [{
                "MissionID": "m-1",
                "MissionName": "sw_production",
                "TimeFrame": {"DateStart": "2022-01-04", "DateEnd": "2022-01-03"}
            }]
        }),
        "/rocket/api/backtest/expand" => json!({"code": 1, "data": [{"detail": "bad range"}]}),
        "/rocket/api/upload/file" => json!({"code": 0, "data": {"id": "upload-1"}}),
        _ => json!({"code": 0, "data": []}),
    };
    let cookie = if path == "/user/login" {
        Some("session=abc123; Path=/")
    } else {
        None
    };
    (body.to_string(), cookie)
}

async fn handle(mut stream: TcpStream, log: Log) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 4096];
    let (head_end, content_length) = loop {
        let n = stream.read(&mut tmp).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_string();
            let len = head
                .lines()
                .find_map(|l| {
                    let (k, v) = l.split_once(':')?;
                    k.eq_ignore_ascii_case("content-length")
                        .then(|| v.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= pos + 4 + len {
                break (pos, len);
            }
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let body_start = head_end + 4;
    let body = String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string();
    let mut parts = head.lines().next().unwrap_or_default().split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let (payload, cookie) = response_for(&path);
    log.lock().unwrap().push(Recorded {
        method,
        path,
        head,
        body,
    });

    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        payload.len()
    );
    if let Some(cookie) = cookie {
        response.push_str(&format!("Set-Cookie: {}\r\n", cookie));
    }
    response.push_str("\r\n");
    response.push_str(&payload);
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

async fn start_server() -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::default();
    let server_log = Arc::clone(&log);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let log = Arc::clone(&server_log);
            tokio::spawn(async move {
                let _ = handle(stream, log).await;
            });
        }
    });
    (format!("http://{}/", addr), log)
}

#[tokio::test]
async fn test_login_session_and_backtest_calls() {
    let (url, log) = start_server().await;
    let client = RocketClient::new(&url).unwrap();
    assert!(!client.base_url().ends_with('/'));

    client.login("qdu", "secret").await.unwrap();
    let list = client.get_mission_list().await.unwrap();
    assert_eq!(list.code, 0);
    assert_eq!(list.data[0]["MissionName"], json!("sw_production"));

    let req = ExpandRequest {
        mission_id: "m-1".to_string(),
        date_end: NaiveDate::from_ymd_opt(2022, 1, 5).unwrap(),
    };
    let err = client
        .expand_backtest(&req)
        .await
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(
        err,
        MissionError::Service {
            code: 1,
            detail: "bad range".to_string()
        }
    );

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 3);

    assert_eq!(log[0].method, "POST");
    assert_eq!(log[0].path, "/user/login");
    assert!(log[0].body.contains("username=qdu"));
    assert!(log[0].body.contains("password=secret"));

    assert_eq!(log[1].method, "GET");
    assert_eq!(log[1].path, "/rocket/api/backtest/list");
    assert!(log[1].head.to_lowercase().contains("cookie: session=abc123"));

    assert_eq!(log[2].path, "/rocket/api/backtest/expand");
    let body: serde_json::Value = serde_json::from_str(&log[2].body).unwrap();
    assert_eq!(body, json!({"mission_id": "m-1", "date_end": "2022-01-05"}));
}

#[tokio::test]
async fn test_analysis_endpoints_use_form_or_json() {
    let (url, log) = start_server().await;
    let client = RocketClient::new(&url).unwrap();

    client.get_daily_pnl(&[("mission_id", "m-1")]).await.unwrap();
    client.get_barra_analysis(&json!({"mission_id": "m-1"})).await.unwrap();
    client.get_bench_info().await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log[0].path, "/rocket/api/analysis/dailypnl");
    assert_eq!(log[0].body, "mission_id=m-1");
    assert_eq!(log[1].path, "/rocket/api/analysis/barra");
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&log[1].body).unwrap(),
        json!({"mission_id": "m-1"})
    );
    assert_eq!(log[2].method, "GET");
    assert_eq!(log[2].path, "/rocket/api/benchinfo");
}

#[tokio::test]
async fn test_upload_custom_file() {
    let (url, log) = start_server().await;
    let client = RocketClient::new(&url).unwrap();

    let path: PathBuf =
        std::env::temp_dir().join(format!("rocket_upload_{}.csv", std::process::id()));
    std::fs::write(&path, "Date,Code,Pred\n2022-01-04,600000.SH,0.1\n").unwrap();

    let rsp = client
        .upload_custom_file(
            &[("type".to_string(), "pred".to_string())],
            &[UploadFile {
                field: "file".to_string(),
                path: path.clone(),
            }],
        )
        .await
        .unwrap();
    assert_eq!(rsp.data["id"], json!("upload-1"));

    let log = log.lock().unwrap();
    assert_eq!(log[0].path, "/rocket/api/upload/file");
    assert!(log[0].head.to_lowercase().contains("multipart/form-data"));
    assert!(log[0].body.contains("600000.SH"));
    assert!(log[0].body.contains("name=\"type\""));
}
