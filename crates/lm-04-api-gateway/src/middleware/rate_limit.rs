//! Rate limiting middleware using a token bucket per client IP.
//!
//! Reads and writes draw from separate buckets; writes get the smaller budget.

use crate::domain::{ApiError, RateLimitConfig};
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use library_telemetry::HTTP_REJECTIONS;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::{Layer, Service};
use tracing::{debug, warn};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

/// Token bucket entry for an IP address
struct TokenBucket {
    read_limiter: DirectLimiter,
    write_limiter: DirectLimiter,
    /// Last access time (for cleanup)
    last_access: Instant,
}

impl TokenBucket {
    fn new(config: &RateLimitConfig) -> Self {
        let read_quota = Quota::per_second(non_zero(config.requests_per_second))
            .allow_burst(non_zero(config.burst_size));
        let write_quota = Quota::per_second(non_zero(config.writes_per_second))
            .allow_burst(non_zero(config.burst_size / 10));

        Self {
            read_limiter: RateLimiter::direct(read_quota),
            write_limiter: RateLimiter::direct(write_quota),
            last_access: Instant::now(),
        }
    }

    fn check(&mut self, is_write: bool) -> Result<(), Duration> {
        self.last_access = Instant::now();
        let limiter = if is_write {
            &self.write_limiter
        } else {
            &self.read_limiter
        };
        limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }
}

/// Rate limiter state shared across requests
pub struct RateLimitState {
    /// Per-IP token buckets
    buckets: DashMap<IpAddr, TokenBucket>,
    config: RateLimitConfig,
}

impl RateLimitState {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: DashMap::new(),
            config,
        }
    }

    /// `Err` carries how long the client should wait.
    pub fn check(&self, ip: IpAddr, is_write: bool) -> Result<(), Duration> {
        if !self.config.enabled || self.config.whitelist.contains(&ip) {
            return Ok(());
        }

        let mut bucket = self.buckets.entry(ip).or_insert_with(|| {
            debug!(ip = %ip, "creating rate limit bucket");
            TokenBucket::new(&self.config)
        });
        bucket.check(is_write)
    }

    /// Drop buckets idle for longer than `max_age`
    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.buckets.retain(|ip, bucket| {
            let age = now.duration_since(bucket.last_access);
            if age > max_age {
                debug!(ip = %ip, age_secs = age.as_secs(), "removing stale rate limit bucket");
                false
            } else {
                true
            }
        });
    }

    /// Number of tracked IPs
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

/// Rate limit layer
#[derive(Clone)]
pub struct RateLimitLayer {
    state: Arc<RateLimitState>,
}

impl RateLimitLayer {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            state: Arc::new(RateLimitState::new(config)),
        }
    }

    pub fn state(&self) -> Arc<RateLimitState> {
        Arc::clone(&self.state)
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            state: Arc::clone(&self.state),
        }
    }
}

/// Rate limit service
#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    state: Arc<RateLimitState>,
}

impl<S> Service<Request<Body>> for RateLimitService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let state = Arc::clone(&self.state);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let ip = extract_client_ip(&req, state.config().trust_proxy_headers);
            let is_write = is_write_method(req.method());

            match state.check(ip, is_write) {
                Ok(()) => inner.call(req).await,
                Err(retry_after) => {
                    HTTP_REJECTIONS.with_label_values(&["rate_limited"]).inc();
                    warn!(
                        ip = %ip,
                        retry_after_ms = retry_after.as_millis() as u64,
                        is_write,
                        "rate limit exceeded"
                    );
                    Ok(ApiError::rate_limited(retry_after).into_response())
                }
            }
        })
    }
}

fn is_write_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Client IP: proxy headers when trusted, then the socket peer.
fn extract_client_ip<B>(req: &Request<B>, trust_proxy_headers: bool) -> IpAddr {
    if trust_proxy_headers {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());
        if let Some(ip) = forwarded {
            return ip;
        }

        let real_ip = req
            .headers()
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());
        if let Some(ip) = real_ip {
            return ip;
        }
    }

    if let Some(connect_info) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip();
    }

    // In-process callers (tests, oneshot) have no peer address.
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

/// Background task to clean up stale rate limit buckets
pub async fn cleanup_task(state: Arc<RateLimitState>, interval: Duration, max_age: Duration) {
    let mut cleanup_interval = tokio::time::interval(interval);
    cleanup_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        cleanup_interval.tick().await;
        state.cleanup(max_age);
    }
}
