//! Failure injection tests for the upstream connection.

use std::time::{Duration, Instant};

use serde_json::Value;

mod common;

use common::{
    gateway_config, http_client, start_gateway, start_mock_upstream, start_raw_upstream, unused_addr, MockResponse,
};

#[tokio::test]
async fn connection_refused_is_bad_gateway() {
    let dead = unused_addr().await;
    let (addr, shutdown) = start_gateway(gateway_config(&format!("http://{}", dead))).await;

    let res = http_client()
        .get(format!("http://{}/tiles/5/10/10.pbf", addr))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 502);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Bad Gateway");
    assert_eq!(body["message"], "Failed to fetch tile from upstream server");

    shutdown.trigger();
}

#[tokio::test]
async fn slow_upstream_times_out_as_bad_gateway() {
    let upstream = start_mock_upstream(MockResponse {
        delay: Duration::from_secs(3),
        ..MockResponse::ok("late")
    })
    .await;
    let mut config = gateway_config(&upstream.url());
    config.upstream.timeout_secs = 1;
    let (addr, shutdown) = start_gateway(config).await;

    let start = Instant::now();
    let res = http_client()
        .get(format!("http://{}/tiles/0/0/0.png", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    assert!(start.elapsed() < Duration::from_secs(3), "should not wait for the upstream");

    shutdown.trigger();
}

#[tokio::test]
async fn truncated_body_is_bad_gateway() {
    let upstream = start_raw_upstream("HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort", Duration::ZERO).await;
    let (addr, shutdown) = start_gateway(gateway_config(&format!("http://{}", upstream))).await;

    let res = http_client()
        .get(format!("http://{}/tiles/5/10/10.pbf", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Bad Gateway");

    shutdown.trigger();
}

#[tokio::test]
async fn stalled_body_times_out_as_bad_gateway() {
    let upstream = start_raw_upstream(
        "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 100\r\n\r\nshort",
        Duration::from_secs(5),
    )
    .await;
    let mut config = gateway_config(&format!("http://{}", upstream));
    config.upstream.timeout_secs = 1;
    let (addr, shutdown) = start_gateway(config).await;

    let start = Instant::now();
    let res = http_client()
        .get(format!("http://{}/tiles/0/0/0.png", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    assert!(start.elapsed() < Duration::from_secs(4), "body deadline was not enforced");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Failed to fetch tile from upstream server");

    shutdown.trigger();
}

#[tokio::test]
async fn slow_upstream_does_not_block_other_requests() {
    let upstream = start_mock_upstream(MockResponse {
        delay: Duration::from_secs(2),
        ..MockResponse::ok("late")
    })
    .await;
    let (addr, shutdown) = start_gateway(gateway_config(&upstream.url())).await;
    let client = http_client();

    let slow = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .get(format!("http://{}/tiles/1/0/0.pbf", addr))
                .send()
                .await
                .map(|r| r.status().as_u16())
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;

    let start = Instant::now();
    let res = client.get(format!("http://{}/healthz", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let rejected = client
        .get(format!("http://{}/tiles/99/0/0.pbf", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), 400);
    assert!(start.elapsed() < Duration::from_secs(1));

    assert_eq!(slow.await.unwrap().unwrap(), 200);
    shutdown.trigger();
}

#[tokio::test]
async fn concurrent_requests_are_routed_independently() {
    let upstream = start_mock_upstream(MockResponse::ok("tile")).await;
    let (addr, shutdown) = start_gateway(gateway_config(&upstream.url())).await;
    let client = http_client();

    let mut tasks = Vec::new();
    for i in 0..32u32 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let res = client
                .get(format!("http://{}/tiles/6/{}/{}.pbf", addr, i, 63 - i))
                .send()
                .await
                .unwrap();
            res.status().as_u16()
        }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }

    let mut paths: Vec<String> = upstream.requests().into_iter().map(|r| r.path).collect();
    paths.sort();
    let mut expected: Vec<String> = (0..32u32).map(|i| format!("/data/v3/6/{}/{}.pbf", i, 63 - i)).collect();
    expected.sort();
    assert_eq!(paths, expected);

    shutdown.trigger();
}
