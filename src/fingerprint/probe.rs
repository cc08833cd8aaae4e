//! Fallback policy shared by every probe.
//!
//! A probe returns `Result<T>`; the collector funnels the outcome through
//! [`settle`] (or [`settle_optional`] for fields that are omitted rather than
//! defaulted). That is the only place a probe error is observed.

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};

use super::environment::Environment;
use crate::error::{ProbeError, Result};

/// Log a failed probe at a level matching how surprising the failure is.
fn report(probe: &str, err: &ProbeError) {
    if err.is_expected() {
        log::debug!("{} probe fell back to default: {}", probe, err);
    } else {
        log::warn!(
            "{} probe failed ({:?}), using default: {}",
            probe,
            err.code(),
            err
        );
    }
}

/// Resolve a probe outcome to its value or the category default.
pub fn settle<T: Default>(probe: &str, outcome: Result<T>) -> T {
    outcome.unwrap_or_else(|err| {
        report(probe, &err);
        T::default()
    })
}

/// Resolve a probe outcome whose failure means "field absent".
pub fn settle_optional<T>(probe: &str, outcome: Result<T>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            report(probe, &err);
            None
        }
    }
}

/// Race `probe` against the environment's timer when a bound is configured.
pub async fn bounded<E, F, T>(env: &E, timeout: Option<Duration>, probe: F) -> Result<T>
where
    E: Environment + ?Sized,
    F: Future<Output = Result<T>>,
{
    let Some(limit) = timeout else {
        return probe.await;
    };

    let probe = Box::pin(probe);
    let timer = env.delay(limit);
    match future::select(probe, timer).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => Err(ProbeError::Timeout(
            u32::try_from(limit.as_millis()).unwrap_or(u32::MAX),
        )),
    }
}
