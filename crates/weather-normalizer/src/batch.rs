//! Batch Normalization
//!
//! Applies the normalizer to independently keyed readings. Each item gets its
//! own outcome: a failing item never affects another, output order equals
//! input order, and duplicate keys are kept as-is.

use crate::model::{RawReading, Source};
use crate::normalizer::{NormalizationOutcome, Normalizer};
use rayon::prelude::*;
use std::borrow::Borrow;
use tracing::debug;

impl Normalizer {
    /// Normalize every item sequentially, preserving order and keys
    pub fn normalize_batch<K, R, I>(&self, items: I, source: &Source) -> Vec<(K, NormalizationOutcome)>
    where
        I: IntoIterator<Item = (K, R)>,
        R: Borrow<RawReading>,
    {
        let results: Vec<_> = items
            .into_iter()
            .map(|(key, raw)| {
                let outcome = self.normalize(raw.borrow(), source.clone());
                (key, outcome)
            })
            .collect();

        log_batch(&results, false);
        results
    }

    /// Same result as [`Normalizer::normalize_batch`], computed on the rayon
    /// thread pool
    pub fn normalize_batch_parallel<K, R>(
        &self,
        items: Vec<(K, R)>,
        source: &Source,
    ) -> Vec<(K, NormalizationOutcome)>
    where
        K: Send,
        R: Borrow<RawReading> + Send,
    {
        let results: Vec<_> = items
            .into_par_iter()
            .map(|(key, raw)| {
                let outcome = self.normalize(raw.borrow(), source.clone());
                (key, outcome)
            })
            .collect();

        log_batch(&results, true);
        results
    }
}

/// Normalize a batch of caller-submitted readings with the default ranges
pub fn normalize_batch<K, R, I>(items: I) -> Vec<(K, NormalizationOutcome)>
where
    I: IntoIterator<Item = (K, R)>,
    R: Borrow<RawReading>,
{
    Normalizer::default().normalize_batch(items, &Source::CLIENT)
}

fn log_batch<K>(results: &[(K, NormalizationOutcome)], parallel: bool) {
    let failed = results.iter().filter(|(_, outcome)| outcome.is_err()).count();
    debug!(
        parallel,
        "Normalized batch of {} readings ({} failed)",
        results.len(),
        failed
    );
}
