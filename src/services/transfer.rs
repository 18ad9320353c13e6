//! Transfer service
//!
//! Flags rows that move money between the user's own accounts and pairs them
//! up. Pairing is keyed on amount only: the first row with a given absolute
//! amount is held, the next one with the same amount completes the pair and
//! releases the key. Direction and account are not compared, so unrelated
//! transfers of the same amount can be paired with each other.

use std::collections::HashMap;

use crate::config::Settings;
use crate::models::{Money, Transaction};

/// Outcome of transfer detection over a set of rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Number of rows flagged as transfers
    pub flagged: usize,
    /// Row indices of each matched pair, in pair-number order
    pub pairs: Vec<(usize, usize)>,
    /// Flagged row indices left without a partner
    pub unmatched: Vec<usize>,
}

impl TransferReport {
    pub fn matched_rows(&self) -> usize {
        self.pairs.len() * 2
    }
}

/// Service for detecting and matching transfers
pub struct TransferService<'a> {
    keywords: &'a [String],
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service using the configured keywords
    pub fn new(settings: &'a Settings) -> Self {
        Self::with_keywords(&settings.transfer_keywords)
    }

    pub fn with_keywords(keywords: &'a [String]) -> Self {
        Self { keywords }
    }

    /// Check if a description contains a transfer keyword (case-insensitive)
    pub fn is_transfer(&self, description: &str) -> bool {
        let description = description.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| description.contains(&k.to_lowercase()))
    }

    /// Flag transfer rows, returning how many were flagged
    pub fn flag_transfers(&self, rows: &mut [Transaction]) -> usize {
        let mut flagged = 0;
        for txn in rows.iter_mut() {
            txn.is_transfer = self.is_transfer(&txn.description);
            if txn.is_transfer {
                flagged += 1;
            }
        }
        flagged
    }

    /// Pair flagged rows by amount and number the pairs from 1
    pub fn match_transfers(&self, rows: &mut [Transaction]) -> TransferReport {
        let mut held: HashMap<Money, usize> = HashMap::new();
        let mut report = TransferReport::default();

        for idx in 0..rows.len() {
            if !rows[idx].is_transfer {
                continue;
            }
            report.flagged += 1;
            rows[idx].transfer_pair = None;

            let key = rows[idx].amount.abs();
            match held.remove(&key) {
                Some(first) => {
                    report.pairs.push((first, idx));
                    let pair = report.pairs.len();
                    rows[first].transfer_pair = Some(pair);
                    rows[idx].transfer_pair = Some(pair);
                }
                None => {
                    held.insert(key, idx);
                }
            }
        }

        report.unmatched = held.into_values().collect();
        report.unmatched.sort_unstable();

        tracing::info!(
            flagged = report.flagged,
            pairs = report.pairs.len(),
            unmatched = report.unmatched.len(),
            "matched transfers"
        );

        report
    }

    /// Flag and then match transfers
    pub fn reconcile(&self, rows: &mut [Transaction]) -> TransferReport {
        self.flag_transfers(rows);
        self.match_transfers(rows)
    }
}
