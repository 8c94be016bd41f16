// ⚖️ Reconciliation - match bibliographic rows against taxonomy identifiers
//
// The taxonomy store answers with (identifier_1, identifier_2) pairs, either
// slot possibly NULL. The bibliographic store holds one delimited identifier
// literal per journal ("1234-5678,9999-0000"). A row is kept when any
// identifier of any pair matches its literal.
//
// Containment matching tests substrings of the literal, so an identifier
// that is a prefix of another ("1234-567" vs "1234-5678") also matches, and
// bare punctuation such as "-" matches every literal.
// Exact matching compares against the parsed identifier tokens instead.

use crate::bibliographic::JournalRow;
use crate::taxonomy::IdentifierPair;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// MATCH STRATEGY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Identifier is a substring of the row's identifier literal
    #[default]
    Containment,

    /// Identifier equals one of the comma-separated tokens of the literal
    Exact,
}

impl MatchStrategy {
    pub fn matches(&self, identifier_field: &str, id: &str) -> bool {
        match self {
            MatchStrategy::Containment => identifier_field.contains(id),
            MatchStrategy::Exact => identifier_field.split(',').any(|token| token.trim() == id),
        }
    }
}

// ============================================================================
// RECONCILIATION REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationReport {
    pub strategy: MatchStrategy,
    pub pairs: usize,
    pub candidates: usize,
    pub matched: usize,
}

impl ReconciliationReport {
    pub fn summary(&self) -> String {
        format!(
            "{:?} matching: {} of {} bibliographic rows matched {} taxonomy pairs",
            self.strategy, self.matched, self.candidates, self.pairs
        )
    }
}

// ============================================================================
// IDENTIFIER MATCHER
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentifierMatcher {
    pub strategy: MatchStrategy,
}

impl IdentifierMatcher {
    pub fn new(strategy: MatchStrategy) -> Self {
        IdentifierMatcher { strategy }
    }

    /// Whether one pair identifies the row; stops at the first matching slot
    pub fn pair_matches(&self, row: &JournalRow, pair: &IdentifierPair) -> bool {
        pair.iter()
            .any(|id| !id.is_empty() && self.strategy.matches(&row.identifier, id))
    }

    pub fn row_matches(&self, row: &JournalRow, pairs: &[IdentifierPair]) -> bool {
        pairs.iter().any(|pair| self.pair_matches(row, pair))
    }

    /// Keep the rows matched by at least one pair, in input order
    pub fn reconcile(
        &self,
        rows: Vec<JournalRow>,
        pairs: &[IdentifierPair],
    ) -> (Vec<JournalRow>, ReconciliationReport) {
        let candidates = rows.len();
        let kept: Vec<JournalRow> = rows
            .into_iter()
            .filter(|row| self.row_matches(row, pairs))
            .collect();

        let report = ReconciliationReport {
            strategy: self.strategy,
            pairs: pairs.len(),
            candidates,
            matched: kept.len(),
        };
        debug!("{}", report.summary());

        (kept, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(identifier: &str) -> JournalRow {
        JournalRow {
            title: format!("Journal {}", identifier),
            identifier: identifier.to_string(),
            languages: "English".to_string(),
            publisher: None,
            seal: "No".to_string(),
            licence: "CC BY".to_string(),
            apc: "No".to_string(),
        }
    }

    #[test]
    fn test_single_identifier_pair_matches_joined_field() {
        let journal = row("1234-5678,9999-0000");
        let pair = IdentifierPair::new(Some("1234-5678"), None);

        for strategy in [MatchStrategy::Containment, MatchStrategy::Exact] {
            assert!(IdentifierMatcher::new(strategy).pair_matches(&journal, &pair));
        }
    }

    #[test]
    fn test_second_slot_alone_matches() {
        let journal = row("1234-5678,9999-0000");
        let pair = IdentifierPair::new(None, Some("9999-0000"));

        assert!(IdentifierMatcher::default().pair_matches(&journal, &pair));
    }

    #[test]
    fn test_one_character_off_does_not_match() {
        let journal = row("1234-5678,9999-0000");
        let pair = IdentifierPair::new(Some("1234-5679"), Some("9999-0001"));

        for strategy in [MatchStrategy::Containment, MatchStrategy::Exact] {
            assert!(!IdentifierMatcher::new(strategy).pair_matches(&journal, &pair));
        }
    }

    #[test]
    fn test_truncated_identifier_only_rejected_by_exact() {
        let journal = row("1234-5678,9999-0000");
        let pair = IdentifierPair::new(Some("1234-567"), Some("0000-0000"));

        // Known false positive of substring matching
        assert!(IdentifierMatcher::new(MatchStrategy::Containment).pair_matches(&journal, &pair));
        assert!(!IdentifierMatcher::new(MatchStrategy::Exact).pair_matches(&journal, &pair));
    }

    #[test]
    fn test_reconcile_keeps_row_order() {
        let rows = vec![row("1111-1111"), row("2222-2222"), row("3333-3333,4444-4444")];
        let pairs = vec![
            IdentifierPair::new(Some("4444-4444"), None),
            IdentifierPair::new(Some("1111-1111"), None),
        ];

        let (kept, report) = IdentifierMatcher::default().reconcile(rows, &pairs);

        let ids: Vec<&str> = kept.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["1111-1111", "3333-3333,4444-4444"]);
        assert_eq!(report.candidates, 3);
        assert_eq!(report.matched, 2);
    }

    #[test]
    fn test_no_pairs_keeps_nothing() {
        let (kept, report) = IdentifierMatcher::default().reconcile(vec![row("1111-1111")], &[]);
        assert!(kept.is_empty());
        assert_eq!(report.matched, 0);
    }

    #[test]
    fn test_strategy_reads_from_config_labels() {
        let exact: MatchStrategy = serde_json::from_str("\"exact\"").unwrap();
        assert_eq!(exact, MatchStrategy::Exact);
        assert_eq!(MatchStrategy::default(), MatchStrategy::Containment);
    }
}
