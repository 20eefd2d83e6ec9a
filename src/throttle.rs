//! Serialized request queue for the provider's rate limit.
//!
//! BGG answers over-eager clients with HTTP 202 ("export queued, come back
//! later") or 429, so every request funnels through one FIFO queue drained
//! by a single background task. The task enforces a global minimum gap
//! between request starts and requeues deferred items at the back of the
//! queue, letting the rest of the line advance while they cook.
//!
//! Once enqueued, a request cannot be aborted: dropping the future returned
//! by [`RequestThrottler::enqueue`] abandons the result, but the queued
//! request still runs to completion.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::error::{CatalogError, Result};

/// Provider signals "accepted but not ready yet"
const STATUS_DEFERRED: u16 = 202;
/// Provider signals rate-limit rejection
const STATUS_RATE_LIMITED: u16 = 429;

/// Throttle/retry tuning
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Minimum gap between the starts of any two requests
    pub min_request_interval: Duration,
    /// Pause after a deferred/rate-limited response before draining continues
    pub retry_delay: Duration,
    /// Requeue budget per request
    pub max_retries: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_request_interval: Duration::from_millis(2000),
            retry_delay: Duration::from_millis(3000),
            max_retries: 3,
        }
    }
}

/// Raw HTTP response as the throttler sees it
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Injected HTTP-fetch capability.
///
/// The throttler never talks to the network directly; tests swap in
/// scripted fetchers.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawResponse>;
}

/// Production fetcher backed by reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(auth_token: Option<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("bgg-catalog-engine/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = auth_token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

struct QueuedRequest {
    url: String,
    completion: oneshot::Sender<Result<RawResponse>>,
    retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrainState {
    Idle,
    Draining,
}

struct ThrottlerInner {
    queue: VecDeque<QueuedRequest>,
    state: DrainState,
    last_request_at: Option<Instant>,
}

struct Shared {
    fetcher: Arc<dyn Fetch>,
    config: ThrottleConfig,
    inner: Mutex<ThrottlerInner>,
}

/// FIFO request queue with a single drain task.
///
/// The mutex is only ever held between suspension points; the drain task is
/// the sole consumer, guarded by [`DrainState`] so a second loop can never
/// start while one is running.
pub struct RequestThrottler {
    shared: Arc<Shared>,
}

impl RequestThrottler {
    pub fn new(fetcher: Arc<dyn Fetch>, config: ThrottleConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                fetcher,
                config,
                inner: Mutex::new(ThrottlerInner {
                    queue: VecDeque::new(),
                    state: DrainState::Idle,
                    last_request_at: None,
                }),
            }),
        }
    }

    /// Queue a GET and wait for its response.
    ///
    /// Requests that never get throttled complete in enqueue order; a
    /// requeued request may finish after requests enqueued behind it.
    pub async fn enqueue(&self, url: &str) -> Result<RawResponse> {
        let (tx, rx) = oneshot::channel();

        {
            let mut inner = self.shared.inner.lock().unwrap();
            inner.queue.push_back(QueuedRequest {
                url: url.to_string(),
                completion: tx,
                retries: 0,
            });

            if inner.state == DrainState::Idle {
                inner.state = DrainState::Draining;
                tokio::spawn(drain(Arc::clone(&self.shared)));
            }
        }

        rx.await
            .map_err(|_| CatalogError::from("request queue dropped the completion channel"))?
    }
}

/// Single-consumer drain loop. Completes or rejects every queued item and
/// flips the state back to Idle only when the queue is empty.
async fn drain(shared: Arc<Shared>) {
    loop {
        let mut item = {
            let mut inner = shared.inner.lock().unwrap();
            match inner.queue.pop_front() {
                Some(item) => item,
                None => {
                    inner.state = DrainState::Idle;
                    return;
                }
            }
        };

        // Global minimum gap since the previous request start, whatever
        // item that request belonged to.
        let wait = {
            let inner = shared.inner.lock().unwrap();
            inner
                .last_request_at
                .map(|at| shared.config.min_request_interval.saturating_sub(at.elapsed()))
                .unwrap_or(Duration::ZERO)
        };
        if !wait.is_zero() {
            sleep(wait).await;
        }
        shared.inner.lock().unwrap().last_request_at = Some(Instant::now());

        match shared.fetcher.fetch(&item.url).await {
            Ok(response) if response.status == 200 => {
                let _ = item.completion.send(Ok(response));
            }
            Ok(response)
                if response.status == STATUS_DEFERRED
                    || response.status == STATUS_RATE_LIMITED =>
            {
                if item.retries < shared.config.max_retries {
                    item.retries += 1;
                    tracing::debug!(
                        url = %item.url,
                        retries = item.retries,
                        status = response.status,
                        "request throttled by provider, requeueing"
                    );
                    shared.inner.lock().unwrap().queue.push_back(item);
                    sleep(shared.config.retry_delay).await;
                } else {
                    tracing::warn!(url = %item.url, "retry budget exhausted");
                    let _ = item.completion.send(Err(CatalogError::RetriesExhausted {
                        url: item.url,
                        retries: shared.config.max_retries,
                    }));
                }
            }
            Ok(response) => {
                let _ = item.completion.send(Err(CatalogError::Status {
                    status: response.status,
                    url: item.url,
                }));
            }
            Err(e) => {
                let _ = item.completion.send(Err(e));
            }
        }
    }
}
