use arc_swap::ArcSwap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Cumulative set of columns that have differed between consecutive lines.
///
/// Clones share one set, so the reset listener and the highlighter observe
/// the same value. The set is only grown or replaced wholesale.
#[derive(Clone, Default)]
pub struct ChangedColumns {
    inner: Arc<ArcSwap<BTreeSet<usize>>>,
}

impl ChangedColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<BTreeSet<usize>> {
        self.inner.load_full()
    }

    pub fn contains(&self, column: usize) -> bool {
        self.inner.load().contains(&column)
    }

    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }

    pub fn extend(&self, columns: &[usize]) {
        if columns.is_empty() {
            return;
        }
        self.inner.rcu(|current| {
            let mut next = (**current).clone();
            next.extend(columns.iter().copied());
            next
        });
    }

    /// Replace the set with an empty one and return exactly what was stored,
    /// regardless of additions published afterwards.
    pub fn reset(&self) -> Arc<BTreeSet<usize>> {
        let cleared = Arc::new(BTreeSet::new());
        self.inner.store(Arc::clone(&cleared));
        cleared
    }

    pub fn to_json(&self) -> String {
        format_set(&self.snapshot())
    }
}

pub fn format_set(set: &BTreeSet<usize>) -> String {
    serde_json::to_string(set).unwrap_or_else(|_| "[]".to_string())
}

impl std::fmt::Debug for ChangedColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.snapshot().iter()).finish()
    }
}
