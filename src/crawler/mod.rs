//! Crawler engine
//!
//! This module drives a work queue of URLs through a fetch-and-process
//! cycle: a single dispatch loop drains the queue and spawns one task per
//! URL, each fetching through the [`Client`] and handing the body to a
//! pluggable [`Processor`] that returns newly discovered URLs. A visited
//! set deduplicates targets, and an outstanding-work counter defines crawl
//! completion.
//!
//! Each URL moves through `queued -> fetching -> processed`, then either is
//! discarded (fetch failure, nothing discovered) or fans out into its
//! discovered children. A URL enters the queue at most once per run.

mod profile;

pub use profile::ProfileProcessor;

use crate::client::Client;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Notify;

/// Where a fetched page came from, and the means to follow up on it.
///
/// Handed to [`Processor::process`] so implementations can resolve relative
/// links found on the page and perform their own fetches.
pub struct CrawlContext {
    /// Client the page was fetched with
    pub client: Client,

    /// URL currently being processed
    pub url: String,
}

/// Strategy the crawler applies to each fetched page.
///
/// Given a page body and the context describing where it came from, return
/// the URLs worth visiting next. The crawler deduplicates; implementations
/// should not.
#[async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, body: &[u8], ctx: &CrawlContext) -> Vec<String>;
}

/// Count of URLs submitted but not yet fully fetched-and-processed. The
/// crawl is finished when this returns to zero.
struct WorkCounter {
    count: Mutex<usize>,
    zero: Notify,
}

impl WorkCounter {
    fn new() -> Self {
        Self {
            count: Mutex::new(0),
            zero: Notify::new(),
        }
    }

    fn add(&self) {
        let mut count = self.count.lock().unwrap();
        *count += 1;
    }

    fn done(&self) {
        let mut count = self.count.lock().unwrap();
        *count -= 1;
        if *count == 0 {
            self.zero.notify_waiters();
        }
    }

    async fn wait(&self) {
        loop {
            let notified = self.zero.notified();
            tokio::pin!(notified);
            // Register before checking the count, so a notification fired
            // between the check and the await is not lost.
            notified.as_mut().enable();
            if *self.count.lock().unwrap() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// State shared between the dispatch loop and the per-URL worker tasks.
struct CrawlState {
    visited: Mutex<HashSet<String>>,
    outstanding: WorkCounter,
    queue: UnboundedSender<String>,
}

impl CrawlState {
    /// Submits a URL for crawling unless it was already visited.
    ///
    /// The visited check, the visited insert, and the counter increment all
    /// happen before the queue send, so the counter can never transiently
    /// read zero while work is still about to be dispatched.
    fn submit(&self, url: String) {
        {
            let mut visited = self.visited.lock().unwrap();
            if !visited.insert(url.clone()) {
                return;
            }
        }

        self.outstanding.add();
        if self.queue.send(url).is_err() {
            self.outstanding.done();
        }
    }
}

/// A queue-driven concurrent crawler.
///
/// Construction starts one dispatch loop; every dequeued URL gets its own
/// spawned task, with no cap on how many run at once. That mirrors the
/// design this engine is modeled on, but it is a scaling hazard on large
/// link graphs: anyone reusing this outside of small identity-web crawls
/// should put a bounded worker pool behind the same queue.
///
/// [`Crawler::run`] supports exactly one crawl per instance; the visited
/// set is never reset.
pub struct Crawler {
    state: Arc<CrawlState>,
}

impl Crawler {
    /// Creates a crawler with an internally built [`Client`] using default
    /// configuration.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(processor: Arc<dyn Processor>) -> crate::Result<Self> {
        Ok(Self::with_client(Client::new()?, processor))
    }

    /// Creates a crawler fetching through the given client.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_client(client: Client, processor: Arc<dyn Processor>) -> Self {
        let (queue, mut receiver) = mpsc::unbounded_channel::<String>();
        let state = Arc::new(CrawlState {
            visited: Mutex::new(HashSet::new()),
            outstanding: WorkCounter::new(),
            queue,
        });

        // The dispatch loop holds only a weak reference: once the crawler
        // and every in-flight worker are gone, the sender side closes and
        // the loop drains out.
        let worker_state: Weak<CrawlState> = Arc::downgrade(&state);
        tokio::spawn(async move {
            while let Some(url) = receiver.recv().await {
                let Some(state) = worker_state.upgrade() else {
                    break;
                };
                tokio::spawn(process_url(
                    client.clone(),
                    processor.clone(),
                    state,
                    url,
                ));
            }
        });

        Self { state }
    }

    /// Crawls outward from a seed URL, blocking until no submitted URL
    /// remains unprocessed.
    ///
    /// Per-URL failures are absorbed: a single unreachable page never
    /// terminates the crawl.
    pub async fn run(&self, seed: impl Into<String>) {
        self.state.submit(seed.into());
        self.state.outstanding.wait().await;
    }
}

/// One unit of work: fetch a URL, hand the body to the processor, submit
/// whatever it discovered.
async fn process_url(
    client: Client,
    processor: Arc<dyn Processor>,
    state: Arc<CrawlState>,
    url: String,
) {
    match client.get(&url).await {
        Ok(fetch) => {
            let ctx = CrawlContext {
                client: client.clone(),
                url: url.clone(),
            };
            let discovered = processor.process(&fetch.body, &ctx).await;

            for candidate in discovered {
                state.submit(candidate);
            }
        }
        Err(e) => {
            tracing::debug!("skipping {}: {}", url, e);
        }
    }

    // Children are counted before this unit retires, so the counter never
    // dips to zero with work still pending.
    state.outstanding.done();
}
