//! Selection notification
//!
//! Tracks the selected row and reports changes once the wheel has settled.

use std::fmt;
use std::sync::Arc;

use crate::row::Row;

/// Callback invoked with the newly selected row and its index
pub type SelectCallback = Arc<dyn Fn(&Row, usize) + Send + Sync>;

/// Selected-row bookkeeping
#[derive(Clone, Default)]
pub struct SelectionNotifier {
    selected: usize,
    callback: Option<SelectCallback>,
}

impl SelectionNotifier {
    pub fn new(selected: usize) -> Self {
        Self {
            selected,
            callback: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_callback(&mut self, callback: SelectCallback) {
        self.callback = Some(callback);
    }

    /// Move the selection without notifying (data replacement)
    pub fn reset(&mut self, index: usize) {
        self.selected = index;
    }

    /// Record the row the wheel settled on
    ///
    /// Returns true (and invokes the callback) only when the row changed.
    pub fn settle(&mut self, index: usize, rows: &[Row]) -> bool {
        if index == self.selected {
            return false;
        }
        let Some(row) = rows.get(index) else {
            return false;
        };

        tracing::debug!(
            "selection changed: {} -> {} ({})",
            self.selected,
            index,
            row.text
        );
        self.selected = index;

        if let Some(callback) = &self.callback {
            callback(row, index);
        }
        true
    }
}

impl fmt::Debug for SelectionNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionNotifier")
            .field("selected", &self.selected)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_settle_notifies_on_change_only() {
        let rows = vec![Row::plain("a"), Row::plain("b"), Row::plain("c")];
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut notifier = SelectionNotifier::new(0);
        notifier.set_callback({
            let seen = Arc::clone(&seen);
            Arc::new(move |row: &Row, index: usize| seen.lock().unwrap().push((row.text.clone(), index)))
        });

        assert!(!notifier.settle(0, &rows));
        assert!(notifier.settle(2, &rows));
        assert!(!notifier.settle(2, &rows));
        assert_eq!(notifier.selected(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![("c".to_string(), 2)]);
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let rows = vec![Row::plain("a")];
        let mut notifier = SelectionNotifier::new(0);
        assert!(!notifier.settle(5, &rows));
        assert_eq!(notifier.selected(), 0);
    }

    #[test]
    fn test_reset_is_silent() {
        let rows = vec![Row::plain("a"), Row::plain("b")];
        let mut notifier = SelectionNotifier::new(1);
        notifier.reset(0);
        assert_eq!(notifier.selected(), 0);
        assert!(notifier.settle(1, &rows));
    }
}
