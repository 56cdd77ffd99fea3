use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::presentation::http::error::ApiError;

/// A named request budget: at most `limit` requests per `ttl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleInterval {
    pub name: &'static str,
    pub limit: usize,
    pub ttl: Duration,
}

pub const THROTTLE_INTERVALS: [ThrottleInterval; 3] = [
    ThrottleInterval {
        name: "short",
        limit: 3,
        ttl: Duration::from_secs(1),
    },
    ThrottleInterval {
        name: "medium",
        limit: 20,
        ttl: Duration::from_secs(10),
    },
    ThrottleInterval {
        name: "long",
        limit: 100,
        ttl: Duration::from_secs(60),
    },
];

/// Sliding-window limiter keyed by client IP, checked against every interval.
#[derive(Clone)]
pub struct ThrottleLimiter {
    hits: Arc<RwLock<HashMap<IpAddr, Vec<Instant>>>>,
    intervals: Arc<[ThrottleInterval]>,
    horizon: Duration,
}

impl Default for ThrottleLimiter {
    fn default() -> Self {
        Self::new(&THROTTLE_INTERVALS)
    }
}

impl ThrottleLimiter {
    pub fn new(intervals: &[ThrottleInterval]) -> Self {
        let horizon = intervals
            .iter()
            .map(|i| i.ttl)
            .max()
            .unwrap_or(Duration::ZERO);
        Self {
            hits: Arc::new(RwLock::new(HashMap::new())),
            intervals: Arc::from(intervals),
            horizon,
        }
    }

    /// Records the hit when every interval has room, otherwise returns the
    /// wait until the tightest exceeded window frees a slot.
    pub async fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        let now = Instant::now();
        let mut hits = self.hits.write().await;
        let stamps = hits.entry(ip).or_default();
        stamps.retain(|&t| now.saturating_duration_since(t) < self.horizon);

        let mut wait: Option<Duration> = None;
        for interval in self.intervals.iter() {
            let in_window: Vec<Instant> = stamps
                .iter()
                .copied()
                .filter(|&t| now.saturating_duration_since(t) < interval.ttl)
                .collect();
            if in_window.len() >= interval.limit {
                let oldest = in_window.first().copied().unwrap_or(now);
                let retry = interval
                    .ttl
                    .saturating_sub(now.saturating_duration_since(oldest));
                tracing::debug!(%ip, interval = interval.name, "throttle_exceeded");
                wait = Some(wait.map_or(retry, |w| w.max(retry)));
            }
        }
        if let Some(wait) = wait {
            return Err(wait);
        }
        stamps.push(now);
        Ok(())
    }

    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut hits = self.hits.write().await;
        hits.retain(|_, stamps| {
            stamps.retain(|&t| now.saturating_duration_since(t) < self.horizon);
            !stamps.is_empty()
        });
    }

    pub fn spawn_cleanup(&self, every: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                limiter.cleanup().await;
            }
        })
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.hits.read().await.len()
    }
}

/// First `x-forwarded-for` entry, then `x-real-ip`, then the socket address.
pub fn client_ip(headers: &HeaderMap, remote: Option<IpAddr>) -> IpAddr {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());
    let real = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.trim().parse::<IpAddr>().ok())
    };
    forwarded
        .or_else(real)
        .or(remote)
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

/// Whole seconds to wait, rounded up and never below one.
pub fn retry_after_secs(wait: Duration) -> u64 {
    (wait.as_secs() + u64::from(wait.subsec_nanos() > 0)).max(1)
}

pub async fn throttle(
    State(limiter): State<ThrottleLimiter>,
    req: Request,
    next: Next,
) -> Response {
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let ip = client_ip(req.headers(), remote);
    match limiter.check(ip).await {
        Ok(()) => next.run(req).await,
        Err(wait) => ApiError::RateLimited {
            retry_after_secs: retry_after_secs(wait),
        }
        .into_response(),
    }
}
