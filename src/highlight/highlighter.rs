use super::columns::ChangedColumns;
use super::marker::Marker;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct LineDiff {
    pub rendered: String,
    /// Columns whose character differs from the previous line.
    pub differing: Vec<usize>,
    pub marked: usize,
}

/// Mark every column of `current` that differs from `previous` or is already
/// in `known`. Lines of different length are passed through unmarked.
pub fn compare_line(
    previous: &[char],
    current: &[char],
    known: &BTreeSet<usize>,
    marker: &Marker,
) -> LineDiff {
    let comparable = previous.len() == current.len();
    let mut differing = Vec::new();
    let mut marked = 0usize;
    let mut rendered = String::with_capacity(current.len());

    for (i, &ch) in current.iter().enumerate() {
        let differs = comparable && ch != previous[i];
        if differs {
            differing.push(i);
        }
        if differs || (comparable && known.contains(&i)) {
            marked += 1;
            rendered.push_str(&marker.start);
            rendered.push(ch);
            rendered.push_str(&marker.end);
        } else {
            rendered.push(ch);
        }
    }

    LineDiff {
        rendered,
        differing,
        marked,
    }
}

pub struct Highlighter {
    previous: Option<Vec<char>>,
    changed: ChangedColumns,
    marker: Marker,
}

impl Highlighter {
    pub fn new(marker: Marker) -> Self {
        Self::with_columns(ChangedColumns::new(), marker)
    }

    pub fn with_columns(changed: ChangedColumns, marker: Marker) -> Self {
        Self {
            previous: None,
            changed,
            marker,
        }
    }

    pub fn columns(&self) -> ChangedColumns {
        self.changed.clone()
    }

    pub fn previous_line(&self) -> Option<String> {
        self.previous.as_ref().map(|chars| chars.iter().collect())
    }

    pub fn reset(&self) {
        self.changed.reset();
    }

    /// Render `line` and make it the new previous line. The terminator, if
    /// any, is compared like any other character.
    pub fn render(&mut self, line: &str) -> String {
        let current: Vec<char> = line.chars().collect();
        let previous = self.previous.take().unwrap_or_else(|| current.clone());

        let diff = compare_line(&previous, &current, &self.changed.snapshot(), &self.marker);
        // Publish every differing column, not only the ones missing from the
        // snapshot: a reset may have landed since it was taken.
        self.changed.extend(&diff.differing);

        if previous.len() != current.len() {
            debug!(
                previous = previous.len(),
                current = current.len(),
                "length changed, comparison skipped"
            );
        } else {
            debug!(marked = diff.marked, differing = diff.differing.len(), "line rendered");
        }

        self.previous = Some(current);
        diff.rendered
    }
}
