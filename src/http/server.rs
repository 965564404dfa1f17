//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Register request interceptors and run them per request
//! - Forward requests to the (possibly rewritten) upstream host
//! - Relay the upstream response to the client unchanged
//!
//! # Design Decisions
//! - Interceptors see the request through the `HostField` capability;
//!   the concrete `RequestTarget` wrapper stays private to this module
//! - The host is matched without its port; the original port is kept
//!   when the host is rewritten
//! - One-shot forwarding: no retries, no load balancing, no pooling
//!   guarantees beyond what the hyper client does by default

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{
        header,
        uri::{Authority, PathAndQuery, Scheme},
        HeaderValue, Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::intercept::{HostField, HostRewriteInterceptor, RequestInterceptor};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub interceptors: Arc<Vec<Arc<dyn RequestInterceptor>>>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server with the host rewrite interceptor built from the
    /// config's rewrite section.
    pub fn new(config: ProxyConfig) -> Self {
        let rewrite: Arc<dyn RequestInterceptor> =
            Arc::new(HostRewriteInterceptor::from_config(&config.rewrite));
        Self::with_interceptors(config, vec![rewrite])
    }

    /// Create a server with an explicit set of interceptors, invoked in
    /// registration order on every request before it is forwarded.
    pub fn with_interceptors(
        config: ProxyConfig,
        interceptors: Vec<Arc<dyn RequestInterceptor>>,
    ) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState {
            interceptors: Arc::new(interceptors),
            client,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Destination of an in-flight request, split into host and port.
///
/// This is the concrete request handle interceptors mutate through the
/// `HostField` capability. Only the host is exposed; the port survives a
/// rewrite untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestTarget {
    host: String,
    port: Option<u16>,
}

impl RequestTarget {
    /// Extract the destination from the request URI (absolute-form) or
    /// the Host header (origin-form). None if neither carries a host.
    fn from_request(request: &Request<Body>) -> Option<Self> {
        if let Some(host) = request.uri().host() {
            return Some(Self {
                host: host.to_string(),
                port: request.uri().port_u16(),
            });
        }

        let raw = request.headers().get(header::HOST)?.to_str().ok()?;
        Some(Self::parse(raw))
    }

    /// Split a Host header value into host and numeric port.
    fn parse(raw: &str) -> Self {
        if let Some((host, port)) = raw.rsplit_once(':') {
            if !host.is_empty() {
                if let Ok(port) = port.parse::<u16>() {
                    return Self {
                        host: host.to_string(),
                        port: Some(port),
                    };
                }
            }
        }
        Self {
            host: raw.to_string(),
            port: None,
        }
    }

    /// Host with the original port reattached, if any.
    fn authority_string(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

impl HostField for RequestTarget {
    fn host(&self) -> &str {
        &self.host
    }

    fn set_host(&mut self, host: &str) {
        self.host = host.to_string();
    }
}

/// Main proxy handler.
/// Runs interceptors against the destination host, then forwards.
async fn proxy_handler(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> impl IntoResponse {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        client_addr = %client_addr,
        method = %method,
        path = %path,
        "Proxying request"
    );

    // 1. Extract the destination host
    let Some(mut target) = RequestTarget::from_request(&request) else {
        tracing::warn!(request_id = %request_id, "Request has no destination host");
        metrics::record_request(&method, 400, start_time);
        return (StatusCode::BAD_REQUEST, "Request has no destination host").into_response();
    };

    // 2. Run registered interceptors
    let original_host = target.host().to_string();
    for interceptor in state.interceptors.iter() {
        interceptor.on_request(&mut target);
    }
    if target.host() != original_host {
        tracing::info!(
            request_id = %request_id,
            original_host = %original_host,
            host = %target.host(),
            "Destination host rewritten"
        );
        metrics::record_rewrite(&original_host);
    }

    // 3. Rebuild the URI around the final destination
    let authority = match Authority::from_str(&target.authority_string()) {
        Ok(a) => a,
        Err(_) => {
            tracing::warn!(request_id = %request_id, host = %target.host(), "Destination host is not a valid authority");
            metrics::record_request(&method, 400, start_time);
            return (StatusCode::BAD_REQUEST, "Invalid destination host").into_response();
        }
    };

    let (parts, body) = request.into_parts();
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(authority.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    let uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to rebuild upstream URI");
            metrics::record_request(&method, 500, start_time);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build upstream URI")
                .into_response();
        }
    };

    // 4. Construct the upstream request, carrying headers through
    let mut builder = Request::builder()
        .method(parts.method.clone())
        .version(parts.version)
        .uri(uri);

    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        // The Host header follows the rewritten destination.
        if let Ok(host_value) = HeaderValue::from_str(authority.as_str()) {
            headers.insert(header::HOST, host_value);
        }
    }

    let upstream_request = match builder.body(body) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream request");
            metrics::record_request(&method, 500, start_time);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to build upstream request",
            )
                .into_response();
        }
    };

    // 5. Forward and relay
    match state.client.request(upstream_request).await {
        Ok(response) => {
            let status = response.status();
            metrics::record_request(&method, status.as_u16(), start_time);

            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                host = %target.host(),
                error = %e,
                "Upstream error"
            );
            metrics::record_request(&method, 502, start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
