//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! `TapEngine` walks the stream hierarchy depth-first: for each parent
//! record, every child stream runs to completion (including its own children)
//! before the parent moves to its next record. Traversal is sequential, so
//! emission order is deterministic: root records interleaved with their full
//! descendant subtrees, in the order the API returned them.

mod types;

pub use types::{Message, SyncConfig, SyncStats};

use crate::auth::BearerAuthenticator;
use crate::config::TapConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, RequestConfig};
use crate::streams::{self, CampaignsStream, Stream};
use crate::types::{ExtractionContext, PageToken};
use futures::future::BoxFuture;
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Orchestrates extraction across the stream hierarchy
pub struct TapEngine {
    /// HTTP client
    client: HttpClient,
    /// Tap configuration
    config: TapConfig,
    /// Sync configuration
    sync_config: SyncConfig,
    /// Statistics
    stats: SyncStats,
    /// Lazily-built authenticator, single-assignment
    authenticator: OnceCell<BearerAuthenticator>,
}

impl TapEngine {
    /// Create an engine wired to the configured environment
    pub fn new(config: TapConfig) -> Self {
        let mut client_config = HttpClientConfig::builder()
            .base_url(config.base_url())
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .max_retries(config.http.max_retries)
            .backoff(
                config.http.retry_backoff.backoff_type,
                Duration::from_millis(config.http.retry_backoff.initial_ms),
                Duration::from_millis(config.http.retry_backoff.max_ms),
            )
            .rate_limit(RateLimiterConfig::new(
                config.http.requests_per_second,
                config.http.requests_per_second,
            ));

        if let Some(ref agent) = config.user_agent {
            client_config = client_config.user_agent(agent.clone());
        }

        Self {
            client: HttpClient::with_config(client_config.build()),
            config,
            sync_config: SyncConfig::default(),
            stats: SyncStats::default(),
            authenticator: OnceCell::new(),
        }
    }

    /// Create an engine around an existing HTTP client
    pub fn with_client(config: TapConfig, client: HttpClient) -> Self {
        Self {
            client,
            config,
            sync_config: SyncConfig::default(),
            stats: SyncStats::default(),
            authenticator: OnceCell::new(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_sync_config(mut self, sync_config: SyncConfig) -> Self {
        self.sync_config = sync_config;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// The bearer authenticator, built from config on first use
    fn authenticator(&self) -> &BearerAuthenticator {
        self.authenticator
            .get_or_init(|| BearerAuthenticator::new(self.config.access_token.clone()))
    }

    /// Verify connectivity and credentials with one minimal request
    pub async fn check(&mut self) -> Result<()> {
        let stream = CampaignsStream;
        let payload = stream.request_payload(&self.config, &ExtractionContext::empty(), None);

        let mut request = RequestConfig::new().json(payload);
        for (key, value) in stream.http_headers(&self.config) {
            request = request.header(key, value);
        }
        request = request.header("Authorization", self.authenticator().header_value());

        let response = self.client.post_with_config(stream.path(), request).await?;
        self.stats.add_request();
        stream.validate_response(&response)?;

        info!("Connection check passed");
        Ok(())
    }

    /// Sync every root stream and its descendants
    pub async fn sync_all(&mut self) -> Result<Vec<Message>> {
        self.sync_roots(streams::root_streams()).await
    }

    /// Sync only the named root streams (and their descendants)
    pub async fn sync_selected(&mut self, names: &[String]) -> Result<Vec<Message>> {
        let mut roots = Vec::new();
        for name in names {
            // Resolve first so unknown names and child names fail differently
            let stream = streams::stream_by_name(name)?;
            if !streams::root_streams().iter().any(|s| s.name() == name.as_str()) {
                return Err(Error::context_error(
                    stream.name(),
                    "child streams are synced under their parent, select the root instead",
                ));
            }
            roots.push(stream);
        }
        self.sync_roots(roots).await
    }

    async fn sync_roots(&mut self, roots: Vec<Box<dyn Stream>>) -> Result<Vec<Message>> {
        let start = Instant::now();
        let mut messages = Vec::new();
        let mut schemas_emitted = HashSet::new();
        let empty = ExtractionContext::empty();

        for stream in &roots {
            info!(stream = stream.name(), "starting stream sync");
            let result = self
                .sync_stream(stream.as_ref(), &empty, &mut schemas_emitted, &mut messages)
                .await;

            match result {
                Ok(()) => self.stats.add_stream(),
                Err(e) => {
                    self.stats.add_error();
                    error!(stream = stream.name(), error = %e, "stream sync failed");
                    if self.sync_config.fail_fast {
                        return Err(e);
                    }
                }
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            records = self.stats.records_emitted,
            requests = self.stats.requests_made,
            duration_ms = self.stats.duration_ms,
            "sync finished"
        );

        Ok(messages)
    }

    /// Sync one stream for one context, recursing into children per record
    ///
    /// Boxed because the hierarchy walk is recursive: campaigns calls this
    /// for ad_groups, which calls it for ads.
    fn sync_stream<'a>(
        &'a mut self,
        stream: &'a dyn Stream,
        context: &'a ExtractionContext,
        schemas_emitted: &'a mut HashSet<String>,
        messages: &'a mut Vec<Message>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if self.limit_reached() {
                return Ok(());
            }

            // Schema precedes the stream's first record
            if schemas_emitted.insert(stream.name().to_string()) {
                messages.push(Message::schema(
                    stream.name(),
                    stream.schema().to_json(),
                    stream.primary_keys().iter().map(ToString::to_string).collect(),
                    stream.replication_key().map(String::from),
                ));
                self.stats.add_schema();
            }

            let paginator = stream.paginator();
            let mut page_token: Option<PageToken> = None;

            loop {
                let payload = stream.request_payload(&self.config, context, page_token.as_ref());

                let mut request = RequestConfig::new().json(payload);
                for (key, value) in stream.http_headers(&self.config) {
                    request = request.header(key, value);
                }
                request = request.header("Authorization", self.authenticator().header_value());

                let response = self.client.post_with_config(stream.path(), request).await?;
                self.stats.add_request();

                stream.validate_response(&response)?;
                let records = stream.parse_response(&response.body)?;

                debug!(
                    stream = stream.name(),
                    records = records.len(),
                    status = response.status,
                    "page fetched"
                );

                for record in records {
                    if self.limit_reached() {
                        return Ok(());
                    }

                    let Some(record) = stream.post_process(record, context) else {
                        continue;
                    };

                    for key in stream.primary_keys() {
                        let non_null = record.get(*key).is_some_and(|v| !v.is_null());
                        if !non_null {
                            return Err(Error::missing_primary_key(stream.name(), *key));
                        }
                    }

                    // Derived exactly once per parent record
                    let child_context = stream.child_context(&record);

                    messages.push(Message::record(stream.name(), record));
                    self.stats.add_record();

                    if self.limit_reached() {
                        return Ok(());
                    }

                    if let Some(child_context) = child_context {
                        for child in stream.child_streams() {
                            self.sync_stream(
                                child.as_ref(),
                                &child_context,
                                schemas_emitted,
                                messages,
                            )
                            .await?;
                        }
                    }
                }

                page_token = paginator.next_page_token(&response, page_token.as_ref());
                if page_token.is_none() {
                    break;
                }
            }

            Ok(())
        })
    }

    fn limit_reached(&self) -> bool {
        self.sync_config.max_records > 0
            && self.stats.records_emitted >= self.sync_config.max_records
    }
}
