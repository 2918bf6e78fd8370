//! Batch verification under bounded concurrency and a shared deadline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::ports::fetch::PageFetcher;
use crate::spec::AssertionSet;

use super::page::verify_page;
use super::verdict::Verdict;

/// Verifies a batch of targets and returns one verdict per target, in input
/// order, always; no target is silently dropped.
///
/// A fixed pool of workers pulls target indexes from a shared cursor, which
/// bounds the outbound request rate. A single deadline derived from
/// `timeout_seconds` governs the whole batch: once it elapses, workers stop
/// issuing fetches, in-flight fetches are abandoned, and every unfinished
/// target receives a terminal cancellation verdict. Output content is
/// deterministic for fixed inputs (modulo timing fields) because verdicts
/// are assembled by input index, not completion order.
pub async fn run_batch(
    fetcher: Arc<dyn PageFetcher>,
    urls: &[String],
    assertions: &AssertionSet,
    timeout_seconds: u64,
    config: &EngineConfig,
) -> Vec<Verdict> {
    if urls.is_empty() {
        return Vec::new();
    }

    let deadline = Instant::now() + Duration::from_secs(timeout_seconds);
    let targets: Arc<Vec<String>> = Arc::new(urls.to_vec());
    let cursor = Arc::new(AtomicUsize::new(0));
    let workers = config.concurrency.clamp(1, targets.len());
    let content_cap = config.content_cap_bytes;

    debug!(targets = targets.len(), workers, timeout_seconds, "starting verification batch");

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let fetcher = Arc::clone(&fetcher);
        let targets = Arc::clone(&targets);
        let cursor = Arc::clone(&cursor);
        let assertions = assertions.clone();

        handles.push(tokio::spawn(async move {
            let mut produced: Vec<(usize, Verdict)> = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::SeqCst);
                if index >= targets.len() {
                    break;
                }
                let url = &targets[index];

                let verdict = if Instant::now() >= deadline {
                    // Deadline tripped: no new fetches.
                    Verdict::cancelled(url, 0)
                } else {
                    let started = std::time::Instant::now();
                    match timeout_at(
                        deadline,
                        verify_page(fetcher.as_ref(), url, &assertions, content_cap),
                    )
                    .await
                    {
                        Ok(verdict) => verdict,
                        Err(_) => {
                            warn!(url = %url, "target cancelled at batch deadline");
                            let millis =
                                u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                            Verdict::cancelled(url, millis)
                        }
                    }
                };
                produced.push((index, verdict));
            }
            produced
        }));
    }

    // Pre-sized result buffer indexed by input position: completion order
    // never affects output order, and no two writers share a slot.
    let mut slots: Vec<Option<Verdict>> = (0..targets.len()).map(|_| None).collect();
    for handle in handles {
        match handle.await {
            Ok(pairs) => {
                for (index, verdict) in pairs {
                    slots[index] = Some(verdict);
                }
            }
            Err(err) => warn!(error = %err, "verification worker panicked"),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.unwrap_or_else(|| Verdict::cancelled(&targets[index], 0)))
        .collect()
}
