//! Single-target page verification.

use std::time::Instant;

use crate::extract;
use crate::ports::fetch::PageFetcher;
use crate::spec::AssertionSet;

use super::verdict::{codes, Verdict};

/// Fetches one target and evaluates the requested assertions.
///
/// One fetch, no retry: transient failures surface as a classified failure
/// code, never a crash. The body is truncated to `content_cap` bytes before
/// extraction to bound memory and CPU. Assertions are evaluated in fixed
/// order (text, price, purchasability) so failure codes and evidence are
/// deterministic; evidence comes from the first positive match and is never
/// overwritten.
pub async fn verify_page(
    fetcher: &dyn PageFetcher,
    url: &str,
    assertions: &AssertionSet,
    content_cap: usize,
) -> Verdict {
    let start = Instant::now();

    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(err) => {
            let millis = elapsed_millis(start);
            return Verdict::from_failures(
                url,
                vec![codes::fetch_error(err.kind())],
                millis,
                None,
            );
        }
    };

    if !(200..300).contains(&page.status) {
        let millis = elapsed_millis(start);
        return Verdict::from_failures(url, vec![codes::http_status(page.status)], millis, None);
    }

    let content = truncate_on_char_boundary(&page.body, content_cap);

    let mut failures: Vec<String> = Vec::new();
    let mut evidence: Option<String> = None;

    if let Some(needle) = &assertions.text_includes {
        let detection = extract::detect_text(content, needle);
        if detection.found {
            evidence = evidence.or(detection.evidence);
        } else {
            failures.push(codes::missing_text(needle));
        }
    }

    if assertions.price {
        let detection = extract::detect_price(content);
        if detection.found {
            evidence = evidence.or(detection.evidence);
        } else {
            failures.push(codes::MISSING_PRICE.to_string());
        }
    }

    if assertions.atc {
        let detection = extract::detect_add_to_cart(content);
        if detection.found {
            evidence = evidence.or(detection.evidence);
        } else {
            failures.push(codes::MISSING_ATC.to_string());
        }
    }

    Verdict::from_failures(url, failures, elapsed_millis(start), evidence)
}

fn elapsed_millis(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Truncates to at most `cap` bytes without splitting a code point.
fn truncate_on_char_boundary(body: &str, cap: usize) -> &str {
    if body.len() <= cap {
        return body;
    }
    let mut end = cap;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
