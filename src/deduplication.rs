// 🔍 Deduplication - merge the result sets of a handler fan-out
//
// Result sets are concatenated in handler registration order and every row
// after its first occurrence is dropped. Equality is full-row equality, so
// registering the same handler twice never duplicates output.

use crate::error::Result;
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Concatenate result sets, keeping the first occurrence of each row
pub fn merge_unique<T, I>(result_sets: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = Vec<T>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for rows in result_sets {
        for row in rows {
            if seen.insert(row.clone()) {
                merged.push(row);
            }
        }
    }

    merged
}

/// Run `query` on every handler in order and merge the answers
///
/// No handlers means no rows. The first handler error aborts the call.
pub fn fan_out<H, T, F>(handlers: &[Arc<H>], mut query: F) -> Result<Vec<T>>
where
    H: ?Sized,
    T: Eq + Hash + Clone,
    F: FnMut(&H) -> Result<Vec<T>>,
{
    let mut result_sets = Vec::with_capacity(handlers.len());
    for handler in handlers {
        result_sets.push(query(handler.as_ref())?);
    }

    let fetched: usize = result_sets.iter().map(Vec::len).sum();
    let merged = merge_unique(result_sets);
    debug!(
        handlers = handlers.len(),
        fetched,
        kept = merged.len(),
        "merged handler results"
    );
    Ok(merged)
}

/// First hit across handlers, probing in registration order
pub fn first_hit<H, T, F>(handlers: &[Arc<H>], mut probe: F) -> Result<Option<T>>
where
    H: ?Sized,
    F: FnMut(&H) -> Result<Option<T>>,
{
    for handler in handlers {
        if let Some(hit) = probe(handler.as_ref())? {
            return Ok(Some(hit));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    trait Source {
        fn rows(&self) -> Result<Vec<&'static str>>;
    }

    struct Fixed(Vec<&'static str>);

    impl Source for Fixed {
        fn rows(&self) -> Result<Vec<&'static str>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl Source for Broken {
        fn rows(&self) -> Result<Vec<&'static str>> {
            Err(Error::invalid_argument("database path or URL is not set"))
        }
    }

    #[test]
    fn test_merge_keeps_first_occurrence_order() {
        let merged = merge_unique(vec![vec!["b", "a", "b"], vec!["c", "a", "d"]]);
        assert_eq!(merged, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_merge_of_nothing_is_empty() {
        let merged: Vec<u32> = merge_unique(Vec::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_same_handler_twice_adds_nothing() {
        let handler: Arc<dyn Source> = Arc::new(Fixed(vec!["x", "y"]));
        let handlers = vec![handler.clone(), handler];

        let rows = fan_out(&handlers, |h| h.rows()).unwrap();
        assert_eq!(rows, vec!["x", "y"]);
    }

    #[test]
    fn test_handler_error_aborts_fan_out() {
        let handlers: Vec<Arc<dyn Source>> = vec![Arc::new(Fixed(vec!["x"])), Arc::new(Broken)];
        assert!(fan_out(&handlers, |h| h.rows()).is_err());
    }

    #[test]
    fn test_first_hit_in_registration_order() {
        let handlers: Vec<Arc<dyn Source>> =
            vec![Arc::new(Fixed(vec![])), Arc::new(Fixed(vec!["second"])), Arc::new(Broken)];

        let hit = first_hit(&handlers, |h| Ok(h.rows()?.into_iter().next())).unwrap();
        assert_eq!(hit, Some("second"));

        let none: Vec<Arc<dyn Source>> = Vec::new();
        assert_eq!(first_hit(&none, |h| Ok(h.rows()?.into_iter().next())).unwrap(), None);
    }
}
