//! `pdpguard discover` command.

use crate::context::ServiceContext;
use crate::discover;

/// Execute the `discover` command.
///
/// # Errors
///
/// Returns an error string when the seed URL is malformed or the fetch
/// fails.
pub async fn run(ctx: &ServiceContext, seed: &str, max: usize) -> Result<(), String> {
    let urls = discover::discover_product_urls(ctx.fetcher.as_ref(), seed, max)
        .await
        .map_err(|e| format!("Discovery failed: {e}"))?;

    if urls.is_empty() {
        println!("No product page URLs found under {seed}");
        return Ok(());
    }
    for url in &urls {
        println!("{url}");
    }
    Ok(())
}
