//! End-to-end forwarding tests: real proxy instance over loopback.

use std::net::SocketAddr;
use std::sync::Arc;

use hostswap_proxy::config::ProxyConfig;
use hostswap_proxy::http::HttpServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

mod common;

fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

async fn spawn_proxy(config: ProxyConfig) {
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });
    common::settle().await;
}

#[tokio::test]
async fn matched_host_is_rewritten_to_remote() {
    let upstream_addr: SocketAddr = "127.0.0.1:28301".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28302".parse().unwrap();

    common::start_mock_upstream(upstream_addr, "hello from private server").await;

    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.rewrite.remote_host = "127.0.0.1".to_string();
    spawn_proxy(config).await;

    // The Host header names a matched domain; only the port survives.
    let response = http_client()
        .get(format!("http://{proxy_addr}/query_cur_region"))
        .header(
            reqwest::header::HOST,
            format!("api-os-takumi.mihoyo.com:{}", upstream_addr.port()),
        )
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap(), "hello from private server");
}

#[tokio::test]
async fn unmatched_host_passes_through_untouched() {
    let upstream_addr: SocketAddr = "127.0.0.1:28401".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28402".parse().unwrap();

    common::start_mock_upstream(upstream_addr, "origin response").await;

    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.rewrite.remote_host = "10.255.255.1".to_string();
    spawn_proxy(config).await;

    // "127.0.0.1" is not in the match set, so the request goes where it
    // was already headed.
    let response = http_client()
        .get(format!("http://{proxy_addr}/anything"))
        .header(reqwest::header::HOST, upstream_addr.to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "origin response");
}

#[tokio::test]
async fn configured_domains_replace_builtin_list() {
    let upstream_addr: SocketAddr = "127.0.0.1:28501".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28502".parse().unwrap();

    common::start_mock_upstream(upstream_addr, "custom upstream").await;

    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.rewrite.remote_host = "127.0.0.1".to_string();
    config.rewrite.domains = vec!["custom.example".to_string()];
    spawn_proxy(config).await;

    let response = http_client()
        .get(format!("http://{proxy_addr}/"))
        .header(
            reqwest::header::HOST,
            format!("custom.example:{}", upstream_addr.port()),
        )
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "custom upstream");
}

#[tokio::test]
async fn absolute_form_request_target_is_rewritten() {
    let upstream_addr: SocketAddr = "127.0.0.1:28601".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28602".parse().unwrap();

    common::start_mock_upstream(upstream_addr, "dispatch ok").await;

    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.rewrite.remote_host = "127.0.0.1".to_string();
    spawn_proxy(config).await;

    // Proxy-style request line carrying the destination in the URI.
    let mut stream = TcpStream::connect(proxy_addr).await.unwrap();
    let request = format!(
        "GET http://dispatchosglobal.yuanshen.com:{port}/query_region_list HTTP/1.1\r\n\
         Host: dispatchosglobal.yuanshen.com:{port}\r\n\
         Connection: close\r\n\r\n",
        port = upstream_addr.port()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.ends_with("dispatch ok"), "got: {response}");
}

#[tokio::test]
async fn request_without_host_is_rejected() {
    let proxy_addr: SocketAddr = "127.0.0.1:28702".parse().unwrap();

    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.rewrite.remote_host = "127.0.0.1".to_string();
    spawn_proxy(config).await;

    // HTTP/1.0 permits a request without a Host header.
    let mut stream = TcpStream::connect(proxy_addr).await.unwrap();
    stream
        .write_all(b"GET /path HTTP/1.0\r\n\r\n")
        .await
        .unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.contains("400"), "got: {response}");
}

#[tokio::test]
async fn externally_registered_interceptor_runs() {
    use hostswap_proxy::{HostField, RequestInterceptor};

    /// Pins every request to a fixed host, whatever it was.
    struct PinHost(String);

    impl RequestInterceptor for PinHost {
        fn on_request(&self, request: &mut dyn HostField) {
            request.set_host(&self.0);
        }
    }

    let upstream_addr: SocketAddr = "127.0.0.1:28801".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28802".parse().unwrap();

    common::start_mock_upstream(upstream_addr, "pinned").await;

    let mut config = ProxyConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let server =
        HttpServer::with_interceptors(config, vec![Arc::new(PinHost("127.0.0.1".to_string()))]);
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });
    common::settle().await;

    let response = http_client()
        .get(format!("http://{proxy_addr}/"))
        .header(
            reqwest::header::HOST,
            format!("anything.example:{}", upstream_addr.port()),
        )
        .send()
        .await
        .unwrap();

    assert_eq!(response.text().await.unwrap(), "pinned");
}
