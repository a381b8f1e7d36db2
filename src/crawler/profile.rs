use crate::crawler::{CrawlContext, Processor};
use crate::metadata::extract_rel_me;
use async_trait::async_trait;
use std::sync::Mutex;

/// Profile-discovery processor.
///
/// Records every processed page as a certified profile sighting, then
/// chases the page's rel=me links: each href is resolved against the page
/// URL and pre-resolved through the client's lenient redirect follower, so
/// the crawler's dedup operates on canonical destinations rather than on
/// shortener URLs that would otherwise multiply the graph.
#[derive(Default)]
pub struct ProfileProcessor {
    profiles: Mutex<Vec<String>>,
}

impl ProfileProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs of all pages processed so far, in processing order.
    pub fn profiles(&self) -> Vec<String> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl Processor for ProfileProcessor {
    async fn process(&self, body: &[u8], ctx: &CrawlContext) -> Vec<String> {
        self.profiles.lock().unwrap().push(ctx.url.clone());

        let links = match extract_rel_me(body) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!("failed to extract rel=me links from {}: {}", ctx.url, e);
                return Vec::new();
            }
        };

        let mut candidates = Vec::with_capacity(links.len());
        for link in links {
            let absolute = match ctx.client.resolve_reference(&ctx.url, &link) {
                Some(absolute) => absolute,
                None => {
                    tracing::debug!("ignoring unresolvable href {} on {}", link, ctx.url);
                    continue;
                }
            };

            let target = ctx.client.follow_redirect(&absolute).await;
            if !target.is_empty() {
                candidates.push(target);
            }
        }

        candidates
    }
}
