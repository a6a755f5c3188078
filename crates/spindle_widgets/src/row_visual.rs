//! Per-row visual transform
//!
//! Maps a row's pixel distance from the column's visual center to the
//! opacity/scale/rotation that give the flat list its drum curvature. Pure
//! and stateless: recomputed from the live offset on every frame, never
//! cached, so the visuals can't go stale.

/// Derived visual attributes for one wheel row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowVisual {
    /// Row opacity, floored at 0.2
    pub opacity: f32,
    /// Row scale factor, floored at 0.8 (1.05 at dead center)
    pub scale: f32,
    /// Rotation around the horizontal axis, in degrees
    pub rotation_deg: f32,
}

/// Compute the visual for a row `distance` pixels from the column center.
///
/// Negative distance means the row sits above center; rotation flips sign
/// with it so the drum appears to curve away in both directions.
pub fn row_visual(distance: f32, item_height: f32) -> RowVisual {
    debug_assert!(item_height > 0.0, "item height must be positive");
    let max_distance = item_height * 2.5;
    let abs_distance = distance.abs();

    RowVisual {
        opacity: (1.0 - abs_distance / max_distance).max(0.2),
        scale: (1.05 - abs_distance / (max_distance * 3.0)).max(0.8),
        rotation_deg: (distance / item_height) * -18.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM_HEIGHT: f32 = 40.0;

    #[test]
    fn test_center_row_is_fully_visible() {
        let visual = row_visual(0.0, ITEM_HEIGHT);
        assert_eq!(visual.opacity, 1.0);
        assert_eq!(visual.scale, 1.05);
        assert_eq!(visual.rotation_deg, 0.0);
    }

    #[test]
    fn test_opacity_and_scale_shrink_with_distance_until_floors() {
        let mut prev = row_visual(0.0, ITEM_HEIGHT);
        for step in 1..=20 {
            let visual = row_visual(step as f32 * 10.0, ITEM_HEIGHT);
            assert!(visual.opacity <= prev.opacity);
            assert!(visual.scale <= prev.scale);
            assert!(visual.opacity >= 0.2);
            assert!(visual.scale >= 0.8);
            prev = visual;
        }
        // Far enough out both have saturated
        assert_eq!(prev.opacity, 0.2);
        assert_eq!(prev.scale, 0.8);
    }

    #[test]
    fn test_rotation_is_signed_and_linear() {
        let above = row_visual(-ITEM_HEIGHT, ITEM_HEIGHT);
        let below = row_visual(ITEM_HEIGHT, ITEM_HEIGHT);
        assert_eq!(above.rotation_deg, 18.0);
        assert_eq!(below.rotation_deg, -18.0);
        assert_eq!(row_visual(ITEM_HEIGHT * 2.0, ITEM_HEIGHT).rotation_deg, -36.0);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let a = row_visual(37.5, ITEM_HEIGHT);
        let b = row_visual(37.5, ITEM_HEIGHT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_symmetric_distances_match_except_rotation() {
        let above = row_visual(-55.0, ITEM_HEIGHT);
        let below = row_visual(55.0, ITEM_HEIGHT);
        assert_eq!(above.opacity, below.opacity);
        assert_eq!(above.scale, below.scale);
        assert_eq!(above.rotation_deg, -below.rotation_deg);
    }
}
