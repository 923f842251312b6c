//! Snap resolution
//!
//! Maps a requested destination onto an offset the wheel may rest at: the
//! destination itself when its nearest row is enabled (or lies outside the
//! row set, which the bounce-back handles), otherwise the closest enabled row
//! found by searching outward, below before above.

use crate::position::PositionEngine;
use crate::row::Row;

/// Closest offset whose row is selectable
///
/// When every row is disabled the destination is returned unchanged.
pub fn closest_selectable_offset(position: &PositionEngine, rows: &[Row], offset: f32) -> f32 {
    if position.is_out_of_bounds(offset) {
        return offset;
    }
    let index = position.offset_to_row_index(offset);

    match rows.get(index) {
        Some(row) if row.disabled => {}
        _ => return offset,
    }

    match nearest_enabled(rows, index) {
        Some(found) => {
            tracing::trace!("snap: row {} disabled, resolved to row {}", index, found);
            position.row_index_to_offset(found)
        }
        None => {
            tracing::debug!("snap: no enabled rows, keeping offset {:.1}", offset);
            offset
        }
    }
}

/// Nearest enabled row to `index`, checking `index + d` before `index - d`
///
/// The search is bounded by the row count, so it terminates even when no
/// row is enabled.
pub fn nearest_enabled(rows: &[Row], index: usize) -> Option<usize> {
    if rows.get(index).is_some_and(Row::is_selectable) {
        return Some(index);
    }

    let max_distance = index.max(rows.len().saturating_sub(index));
    (1..=max_distance).find_map(|d| {
        let below = index + d;
        if rows.get(below).is_some_and(Row::is_selectable) {
            return Some(below);
        }
        let above = index.checked_sub(d)?;
        rows.get(above)
            .filter(|row| row.is_selectable())
            .map(|_| above)
    })
}
