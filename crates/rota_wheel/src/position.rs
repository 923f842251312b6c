//! Position engine
//!
//! Owns the wheel's continuous scroll offset and the mapping between row
//! indices and offsets. Offset 0 shows row 0 in the selection band; each
//! following row sits `row_height` further up, so offsets are `<= 0` when
//! settled and `max_offset` shows the last row.
//!
//! The engine also keeps the identity map from rendered row elements to row
//! indices used for hit-testing taps and wheel steps.

use rota_platform::ElementKey;
use slotmap::SlotMap;

/// Offset bookkeeping for one wheel
#[derive(Debug, Clone)]
pub struct PositionEngine {
    row_height: f32,
    /// Current (logical) offset; during a transition this is the destination
    offset: f32,
    /// Offset that shows the last row
    max_offset: f32,
    /// Rendered element -> row index
    items: SlotMap<ElementKey, usize>,
    /// Row index -> rendered element
    keys: Vec<ElementKey>,
}

impl PositionEngine {
    pub fn new(row_height: f32) -> Self {
        Self {
            row_height,
            offset: 0.0,
            max_offset: 0.0,
            items: SlotMap::with_key(),
            keys: Vec::new(),
        }
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Upper bound (row 0)
    pub fn min_offset(&self) -> f32 {
        0.0
    }

    /// Lower bound (last row)
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    pub fn row_count(&self) -> usize {
        self.keys.len()
    }

    /// Offset that centers row `index`
    pub fn row_index_to_offset(&self, index: usize) -> f32 {
        // `0.0 - x` keeps row 0 at +0.0 rather than -0.0
        0.0 - index as f32 * self.row_height
    }

    /// Nearest row index for an offset (may exceed the row count when overscrolled)
    pub fn offset_to_row_index(&self, offset: f32) -> usize {
        (offset.abs() / self.row_height).round() as usize
    }

    /// Offset rounded to the nearest row multiple, keeping its sign
    pub fn quantize(&self, offset: f32) -> f32 {
        (offset / self.row_height).round() * self.row_height
    }

    /// Clamp into `[max_offset, 0]`
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.max(self.max_offset).min(self.min_offset())
    }

    pub fn is_out_of_bounds(&self, offset: f32) -> bool {
        offset > self.min_offset() || offset < self.max_offset
    }

    /// Write the offset; the rendered transform follows from it
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Rebuild bounds and element keys for a new row count
    ///
    /// Keys handed out for the previous rows stop resolving.
    pub fn reset_rows(&mut self, count: usize) {
        self.items.clear();
        self.keys = (0..count).map(|index| self.items.insert(index)).collect();
        self.max_offset = if count == 0 {
            0.0
        } else {
            self.row_index_to_offset(count - 1)
        };
    }

    /// Row index of a rendered element
    pub fn item_index(&self, key: ElementKey) -> Option<usize> {
        self.items.get(key).copied()
    }

    /// Rendered element of a row
    pub fn item_key(&self, index: usize) -> Option<ElementKey> {
        self.keys.get(index).copied()
    }

    pub fn keys(&self) -> &[ElementKey] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_follow_row_count() {
        let mut position = PositionEngine::new(34.0);
        for n in 1..20usize {
            position.reset_rows(n);
            assert_eq!(position.max_offset(), -34.0 * (n as f32 - 1.0));
            assert_eq!(position.min_offset(), 0.0);
        }
    }

    #[test]
    fn test_empty_rows_have_zero_bounds() {
        let mut position = PositionEngine::new(34.0);
        position.reset_rows(0);
        assert_eq!(position.max_offset(), 0.0);
        assert!(position.keys().is_empty());
    }

    #[test]
    fn test_index_offset_round_trip() {
        let position = PositionEngine::new(34.0);
        for i in 0..100 {
            assert_eq!(position.offset_to_row_index(position.row_index_to_offset(i)), i);
        }
        assert_eq!(position.row_index_to_offset(3), -102.0);
        assert!(position.row_index_to_offset(0).is_sign_positive());
    }

    #[test]
    fn test_offset_to_row_index_rounds() {
        let position = PositionEngine::new(34.0);
        assert_eq!(position.offset_to_row_index(-16.0), 0);
        assert_eq!(position.offset_to_row_index(-18.0), 1);
        assert_eq!(position.offset_to_row_index(-100.0), 3);
    }

    #[test]
    fn test_clamp_and_bounds() {
        let mut position = PositionEngine::new(34.0);
        position.reset_rows(5);
        assert_eq!(position.clamp(20.0), 0.0);
        assert_eq!(position.clamp(-200.0), -136.0);
        assert_eq!(position.clamp(-50.0), -50.0);
        assert!(position.is_out_of_bounds(1.0));
        assert!(position.is_out_of_bounds(-137.0));
        assert!(!position.is_out_of_bounds(-136.0));
    }

    #[test]
    fn test_quantize() {
        let position = PositionEngine::new(34.0);
        assert_eq!(position.quantize(-60.0), -68.0);
        assert_eq!(position.quantize(-40.0), -34.0);
        assert_eq!(position.quantize(10.0), 0.0);
    }

    #[test]
    fn test_item_keys_resolve_to_indices() {
        let mut position = PositionEngine::new(34.0);
        position.reset_rows(3);
        for i in 0..3 {
            let key = position.item_key(i).unwrap();
            assert_eq!(position.item_index(key), Some(i));
        }
        assert_eq!(position.item_key(3), None);

        let stale = position.item_key(1).unwrap();
        position.reset_rows(3);
        assert_eq!(position.item_index(stale), None);
    }
}
