//! Price detection cascade.
//!
//! Four strategies tried in fixed priority order, first success wins. The
//! order matters for evidence quality, not correctness: structured markup
//! pins the excerpt to the actual offer, while the loose currency pattern
//! can match anywhere on the page.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::Detection;

static JSON_LD_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]+type=["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("hardwired pattern")
});

static PRICE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d[\d.,]*$").expect("hardwired pattern"));

static META_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+(?:property|name)=["'](?:product:price:amount|og:price:amount)["'][^>]*content=["']\d[\d.,]*["'][^>]*>"#,
    )
    .expect("hardwired pattern")
});

static TWITTER_DATA_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+name=["']twitter:data1["'][^>]*content=["'][^"']*[₹$€£]\s*\d[\d.,]*["'][^>]*>"#,
    )
    .expect("hardwired pattern")
});

static ITEMPROP_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)itemprop=["']price["'][^>]*content=["']?\p{Sc}?\d[\d.,]*"#)
        .expect("hardwired pattern")
});

static DATA_ATTR_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\bdata-(?:price|product-price|price-amount|selling-plan-price)=["']\d[\d.,]*["']"#,
    )
    .expect("hardwired pattern")
});

static LOOSE_CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[₹$€£]\s*\d[\d.,]+").expect("hardwired pattern"));

/// The cascade, in priority order.
const STRATEGIES: &[fn(&str) -> Detection] =
    &[json_ld_offer_price, meta_tag_price, attribute_price, loose_currency_price];

/// Detects a price signal anywhere in the content.
#[must_use]
pub fn detect_price(content: &str) -> Detection {
    for strategy in STRATEGIES {
        let detection = strategy(content);
        if detection.found {
            return detection;
        }
    }
    Detection::miss()
}

/// Strategy 1: JSON-LD product markup declaring an offer price.
fn json_ld_offer_price(content: &str) -> Detection {
    for captures in JSON_LD_SCRIPT.captures_iter(content) {
        let Some(block) = captures.get(0) else { continue };
        let Some(raw) = captures.get(1) else { continue };
        // Bad JSON inside a script block is common; skip it, never fail.
        let Ok(value) = serde_json::from_str::<Value>(raw.as_str().trim()) else {
            continue;
        };
        let nodes = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        for node in &nodes {
            if node_has_offer_price(node) {
                return Detection::hit(content, block.start());
            }
        }
    }
    Detection::miss()
}

fn node_has_offer_price(node: &Value) -> bool {
    let offers = node
        .get("offers")
        .or_else(|| node.get("Offers"))
        .or_else(|| node.get("offer"));
    let Some(offers) = offers else { return false };

    let single = std::slice::from_ref(offers);
    let candidates: &[Value] = match offers.as_array() {
        Some(items) => items,
        None => single,
    };

    candidates.iter().any(|offer| {
        ["price", "lowPrice", "highPrice"]
            .iter()
            .filter_map(|key| offer.get(key))
            .any(is_price_like)
    })
}

fn is_price_like(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => PRICE_DIGITS.is_match(s),
        _ => false,
    }
}

/// Strategy 2: page metadata tags carrying a price amount.
fn meta_tag_price(content: &str) -> Detection {
    if let Some(m) = META_PRICE.find(content) {
        return Detection::hit(content, m.start());
    }
    // Some themes tuck the price into a twitter label/data pair.
    if let Some(m) = TWITTER_DATA_PRICE.find(content) {
        return Detection::hit(content, m.start());
    }
    Detection::miss()
}

/// Strategy 3: microdata and data-attribute price conventions.
fn attribute_price(content: &str) -> Detection {
    if let Some(m) = ITEMPROP_PRICE.find(content) {
        return Detection::hit(content, m.start());
    }
    if let Some(m) = DATA_ATTR_PRICE.find(content) {
        return Detection::hit(content, m.start());
    }
    Detection::miss()
}

/// Strategy 4: currency symbol followed by digits, anywhere.
fn loose_currency_price(content: &str) -> Detection {
    match LOOSE_CURRENCY.find(content) {
        Some(m) => Detection::hit(content, m.start()),
        None => Detection::miss(),
    }
}
