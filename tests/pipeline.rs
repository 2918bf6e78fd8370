//! End-to-end pipeline tests with deterministic port doubles.
//!
//! Exercises the public API the way the `run` command does: build a spec,
//! validate it, verify a batch against fixture content, select the branch,
//! and render the alert, with no live network involved.

use std::collections::HashMap;
use std::sync::Arc;

use pdpguard::branch;
use pdpguard::compile;
use pdpguard::config::EngineConfig;
use pdpguard::dispatch;
use pdpguard::ports::fetch::{FetchError, FetchFuture, FetchedPage, PageFetcher};
use pdpguard::spec::{Action, Condition, Trigger};
use pdpguard::validate;
use pdpguard::verify;

/// Fetcher serving canned bodies keyed by URL.
struct FixtureFetcher {
    pages: HashMap<String, String>,
}

impl FixtureFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages.iter().map(|(url, body)| (url.to_string(), body.to_string())).collect(),
        }
    }
}

impl PageFetcher for FixtureFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let body = self.pages.get(url).cloned();
        Box::pin(async move {
            match body {
                Some(body) => Ok(FetchedPage { status: 200, body }),
                None => Err(FetchError::Connect("no fixture for url".into())),
            }
        })
    }
}

const HEALTHY_PDP: &str = r#"<html><head>
    <script type="application/ld+json">
    {"@type":"Product","offers":{"price":"19.99","priceCurrency":"USD"}}
    </script></head>
    <body><form action="/cart/add"><button type="submit">Add to Cart</button></form></body>
    </html>"#;

const BROKEN_PDP: &str = "<html><body><p>Coming soon.</p></body></html>";

#[tokio::test]
async fn failing_target_drives_the_on_fail_branch() {
    let prompt = "Check https://shop.example.com/products/a and \
                  https://shop.example.com/products/b for price and Add-to-Cart; \
                  post failures to Slack #ops-alerts.";
    let config = EngineConfig::default();

    let mut spec = compile::fallback_spec(prompt, &config);
    spec.checks[0].conditions.push(Condition {
        trigger: Trigger::OnFail,
        actions: vec![Action::Chat {
            channel: "#ops-alerts".into(),
            template: "PDP failures".into(),
        }],
    });
    validate::validate(&spec, &config).expect("fallback spec validates");

    let fetcher = FixtureFetcher::new(&[
        ("https://shop.example.com/products/a", HEALTHY_PDP),
        ("https://shop.example.com/products/b", BROKEN_PDP),
    ]);

    let (verdicts, summary) =
        verify::run_verification(Arc::new(fetcher), &spec, &config).await;

    assert_eq!(verdicts.len(), 2);
    assert!(verdicts[0].passed);
    assert_eq!(verdicts[1].failures, vec!["MISSING:Price", "MISSING:AddToCart"]);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.failed, 1);

    let selection = branch::select(&spec, &summary);
    assert_eq!(selection.trigger, Trigger::OnFail);
    assert_eq!(selection.actions.len(), 1);

    let text = dispatch::render_alert_text("PDP failures", &verdicts);
    assert!(text.contains("• https://shop.example.com/products/b — MISSING:Price, MISSING:AddToCart"));
    assert!(!text.contains(dispatch::ALL_PASSED_LINE));
}

#[tokio::test]
async fn all_passing_targets_fall_back_to_default_actions() {
    let config = EngineConfig::default();
    let spec = compile::fallback_spec("Watch https://shop.example.com/products/a", &config);
    validate::validate(&spec, &config).expect("fallback spec validates");

    let fetcher = FixtureFetcher::new(&[("https://shop.example.com/products/a", HEALTHY_PDP)]);

    let (verdicts, summary) =
        verify::run_verification(Arc::new(fetcher), &spec, &config).await;

    assert!(verdicts[0].passed);
    assert!(!summary.any_failed());

    // No conditions on a fallback spec: defaults apply, trigger reports
    // the passing outcome.
    let selection = branch::select(&spec, &summary);
    assert_eq!(selection.trigger, Trigger::OnPass);
    assert_eq!(selection.actions, spec.actions);

    let text = dispatch::render_alert_text(&spec.name, &verdicts);
    assert!(text.ends_with(dispatch::ALL_PASSED_LINE));
}

#[tokio::test]
async fn unreachable_target_is_reported_not_fatal() {
    let config = EngineConfig::default();
    let spec = compile::fallback_spec(
        "Watch https://shop.example.com/products/a and https://shop.example.com/products/gone",
        &config,
    );

    let fetcher = FixtureFetcher::new(&[("https://shop.example.com/products/a", HEALTHY_PDP)]);

    let (verdicts, summary) =
        verify::run_verification(Arc::new(fetcher), &spec, &config).await;

    assert_eq!(verdicts.len(), 2);
    assert!(verdicts[0].passed);
    assert_eq!(verdicts[1].failures, vec!["FETCH_ERROR:Connect"]);
    assert_eq!(summary.failed, 1);
}
