//! Coordinate-space transforms across canvas resizes.
//!
//! When the hosting view resizes, every item's geometry must move from
//! the old logical size to the new one. Point coordinates scale by
//! independent X/Y factors; stroke widths, dash patterns, and font sizes
//! scale by the geometric mean of the two factors so that line thickness
//! is not visibly distorted by a non-uniform resize.

use crate::draw::shape::Item;
use crate::util::Size;

/// Scales every item from `old` canvas coordinates to `new`.
///
/// Applied to the whole slice before returning, so no partially-scaled
/// document is ever observable. Degenerate sizes (a zero or negative
/// dimension) make this a silent no-op returning `false`: transient
/// zero-size layout passes must not corrupt geometry with infinities.
pub fn scale_items(items: &mut [Item], old: Size, new: Size) -> bool {
    if old.is_degenerate() || new.is_degenerate() {
        log::debug!(
            "Ignoring degenerate canvas transform {}x{} -> {}x{}",
            old.width,
            old.height,
            new.width,
            new.height
        );
        return false;
    }
    if old == new {
        return true;
    }

    let sx = new.width / old.width;
    let sy = new.height / old.height;
    for item in items.iter_mut() {
        item.scale(sx, sy);
    }
    true
}
