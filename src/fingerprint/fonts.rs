//! Local font enumeration probe.
//!
//! `queryLocalFonts()` only exists in Chromium behind a permission, so an
//! empty list is the normal outcome rather than a failure.

use super::environment::Environment;
use crate::error::Result;

pub async fn probe<E: Environment + ?Sized>(env: &E) -> Result<Vec<String>> {
    let families = env.query_local_fonts().await?;
    Ok(dedup_in_order(families))
}

/// The API returns one entry per face, so families repeat.
fn dedup_in_order(families: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    families
        .into_iter()
        .filter(|family| seen.insert(family.clone()))
        .collect()
}
