//! End-to-end forwarding tests against a mock upstream renderer.

use std::time::Duration;

use serde_json::Value;

mod common;

use common::{gateway_config, http_client, start_gateway, start_mock_upstream, MockResponse};

#[tokio::test]
async fn vector_tile_is_forwarded_to_data_endpoint() {
    let upstream = start_mock_upstream(MockResponse {
        headers: vec![("Content-Type", "application/x-protobuf")],
        ..MockResponse::ok("vector-bytes")
    })
    .await;
    let (addr, shutdown) = start_gateway(gateway_config(&upstream.url())).await;

    let res = http_client()
        .get(format!("http://{}/tiles/5/10/10.pbf", addr))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["cache-control"], "public, max-age=86400");
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["content-type"], "application/x-protobuf");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "vector-bytes");

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/data/v3/5/10/10.pbf");

    shutdown.trigger();
}

#[tokio::test]
async fn raster_tile_uses_configured_style() {
    let upstream = start_mock_upstream(MockResponse::ok("png-bytes")).await;
    let mut config = gateway_config(&upstream.url());
    config.tiles.raster_style = "osm-bright".into();
    let (addr, shutdown) = start_gateway(config).await;

    let client = http_client();
    for (ext, expected) in [
        ("png", "/styles/osm-bright/0/0/0.png"),
        ("jpg", "/styles/osm-bright/0/0/0.jpg"),
        ("jpeg", "/styles/osm-bright/0/0/0.jpeg"),
    ] {
        let res = client
            .get(format!("http://{}/tiles/0/0/0.{}", addr, ext))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(upstream.requests().last().unwrap().path, expected);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn head_request_is_forwarded_as_head() {
    let upstream = start_mock_upstream(MockResponse {
        headers: vec![("Content-Type", "image/png")],
        ..MockResponse::ok("")
    })
    .await;
    let (addr, shutdown) = start_gateway(gateway_config(&upstream.url())).await;

    let res = http_client()
        .head(format!("http://{}/tiles/3/4/2.png", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["cache-control"], "public, max-age=86400");
    assert_eq!(res.headers()["content-type"], "image/png");
    assert!(res.bytes().await.unwrap().is_empty());

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "HEAD");
    assert_eq!(requests[0].path, "/styles/basic/3/4/2.png");

    shutdown.trigger();
}

#[tokio::test]
async fn route_headers_override_upstream_and_status_is_relayed() {
    let upstream = start_mock_upstream(MockResponse {
        status: 404,
        headers: vec![("Cache-Control", "no-cache"), ("X-Renderer", "tileserver-gl")],
        body: "missing",
        delay: Duration::ZERO,
    })
    .await;
    let mut config = gateway_config(&upstream.url());
    config.cache.ttl_secs = 600;
    let (addr, shutdown) = start_gateway(config).await;

    let res = http_client()
        .get(format!("http://{}/tiles/14/8192/5461.pbf", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.headers()["cache-control"], "public, max-age=600");
    assert_eq!(res.headers()["x-renderer"], "tileserver-gl");
    assert_eq!(res.text().await.unwrap(), "missing");

    shutdown.trigger();
}

#[tokio::test]
async fn host_is_rewritten_and_query_dropped() {
    let upstream = start_mock_upstream(MockResponse::ok("ok")).await;
    let (addr, shutdown) = start_gateway(gateway_config(&upstream.url())).await;

    http_client()
        .get(format!("http://{}/tiles/1/1/1.png?access_token=secret", addr))
        .header("x-request-id", "trace-me")
        .header("accept", "image/png")
        .send()
        .await
        .unwrap();

    let request = &upstream.requests()[0];
    assert_eq!(request.path, "/styles/basic/1/1/1.png");
    assert_eq!(request.header("host"), Some(upstream.addr.to_string().as_str()));
    assert_eq!(request.header("x-request-id"), Some("trace-me"));
    assert_eq!(request.header("accept"), Some("image/png"));

    shutdown.trigger();
}

#[tokio::test]
async fn upstream_base_path_is_preserved() {
    let upstream = start_mock_upstream(MockResponse::ok("ok")).await;
    let (addr, shutdown) = start_gateway(gateway_config(&format!("{}/tileserver/", upstream.url()))).await;

    let res = http_client()
        .get(format!("http://{}/tiles/2/3/1.pbf", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(upstream.requests()[0].path, "/tileserver/data/v3/2/3/1.pbf");

    shutdown.trigger();
}

#[tokio::test]
async fn invalid_requests_never_reach_upstream() {
    let upstream = start_mock_upstream(MockResponse::ok("ok")).await;
    let (addr, shutdown) = start_gateway(gateway_config(&upstream.url())).await;
    let client = http_client();

    let cases = [
        ("/tiles/23/0/0.pbf", 400, "Zoom level must be between 0 and 22"),
        ("/tiles/3/8/0.pbf", 400, "Tile coordinates out of range for zoom level"),
        ("/tiles/5/foo/10.pbf", 400, "Invalid tile coordinates"),
        ("/tiles/5/10/10.webp", 404, "Unsupported tile format"),
        ("/tiles/5/10/10", 404, "Not found"),
    ];

    for (path, status, error) in cases {
        let res = client.get(format!("http://{}{}", addr, path)).send().await.unwrap();
        assert_eq!(res.status(), status, "{path}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], error, "{path}");
    }

    assert!(upstream.requests().is_empty());
    shutdown.trigger();
}

#[tokio::test]
async fn max_zoom_is_configurable() {
    let upstream = start_mock_upstream(MockResponse::ok("ok")).await;
    let mut config = gateway_config(&upstream.url());
    config.tiles.max_zoom = 24;
    let (addr, shutdown) = start_gateway(config).await;

    let res = http_client()
        .get(format!("http://{}/tiles/24/16777215/0.pbf", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(upstream.requests()[0].path, "/data/v3/24/16777215/0.pbf");

    shutdown.trigger();
}
