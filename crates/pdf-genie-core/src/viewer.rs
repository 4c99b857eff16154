//! Paginated cursor over the current result set.
//!
//! Navigation is clamped, never wraps, and never fails: with zero items the
//! cursor stays at 0 and [`current`](ResultViewer::current) returns `None`.

use crate::{ResultItem, ResultSet};

#[derive(Debug, Default)]
pub struct ResultViewer {
    set: ResultSet,
    cursor: usize,
}

impl ResultViewer {
    /// Replace the whole result set atomically; the cursor resets to 0.
    pub fn install(&mut self, set: ResultSet) {
        self.set = set;
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.install(ResultSet::default());
    }

    pub fn current(&self) -> Option<&ResultItem> {
        self.set.items.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.set.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.items.is_empty()
    }

    pub fn summary(&self) -> Option<&str> {
        self.set.summary.as_deref()
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.set.items
    }

    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn next(&mut self) {
        if !self.set.items.is_empty() {
            self.cursor = (self.cursor + 1).min(self.set.items.len() - 1);
        }
    }

    /// `"{cursor+1} of {len}"`, or the empty-state label with no items.
    pub fn position_label(&self) -> String {
        if self.set.items.is_empty() {
            "no results".to_string()
        } else {
            format!("{} of {}", self.cursor + 1, self.set.items.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemPayload;

    fn set_with(n: usize) -> ResultSet {
        ResultSet {
            summary: None,
            items: (0..n)
                .map(|i| ResultItem {
                    source: format!("/docs/{i}.pdf"),
                    page: i as u32,
                    payload: ItemPayload::Fields(vec![]),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_viewer_has_no_current_item() {
        let viewer = ResultViewer::default();
        assert!(viewer.current().is_none());
        assert_eq!(viewer.position_label(), "no results");
    }

    #[test]
    fn next_on_empty_set_keeps_cursor_at_zero() {
        let mut viewer = ResultViewer::default();
        viewer.next();
        viewer.next();
        assert_eq!(viewer.cursor(), 0);
        assert!(viewer.current().is_none());
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut viewer = ResultViewer::default();
        viewer.install(set_with(3));

        viewer.prev();
        assert_eq!(viewer.cursor(), 0);

        viewer.next();
        viewer.next();
        viewer.next();
        viewer.next();
        assert_eq!(viewer.cursor(), 2);

        viewer.prev();
        assert_eq!(viewer.cursor(), 1);
    }

    #[test]
    fn cursor_stays_in_bounds_for_arbitrary_sequences() {
        let mut viewer = ResultViewer::default();
        viewer.install(set_with(4));

        // Deterministic walk mixing both directions far past the edges.
        for step in 0..100 {
            if step % 3 == 0 {
                viewer.prev();
            } else {
                viewer.next();
            }
            assert!(viewer.cursor() < 4);
            assert!(viewer.current().is_some());
        }
    }

    #[test]
    fn install_resets_cursor() {
        let mut viewer = ResultViewer::default();
        viewer.install(set_with(5));
        viewer.next();
        viewer.next();
        assert_eq!(viewer.cursor(), 2);

        viewer.install(set_with(2));
        assert_eq!(viewer.cursor(), 0);
        assert_eq!(viewer.position_label(), "1 of 2");
    }

    #[test]
    fn position_label_is_one_based() {
        let mut viewer = ResultViewer::default();
        viewer.install(set_with(3));
        assert_eq!(viewer.position_label(), "1 of 3");
        viewer.next();
        assert_eq!(viewer.position_label(), "2 of 3");
    }
}
