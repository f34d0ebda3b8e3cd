//! Canonical figure shapes stamped by pointer interactions.

/// A named multi-cell shape as (Δrow, Δcol) offsets relative to an anchor
/// cell. Offsets may be negative; the stamper wrap-corrects them.
#[derive(Clone, Copy, Debug)]
pub struct Figure {
    pub name: &'static str,
    pub offsets: &'static [(i32, i32)],
}

/// The 5-point glider.
pub const GLIDER: Figure = Figure {
    name: "glider",
    offsets: &[(-1, 0), (0, 1), (1, -1), (1, 0), (1, 1)],
};

/// The 48-point pulsar.
pub const PULSAR: Figure = Figure {
    name: "pulsar",
    offsets: &[
        (-6, 4),
        (-6, 3),
        (-6, 2),
        (-6, -2),
        (-6, -3),
        (-6, -4),
        (-4, 6),
        (-3, 6),
        (-2, 6),
        (-4, 1),
        (-3, 1),
        (-2, 1),
        (-4, -1),
        (-3, -1),
        (-2, -1),
        (-4, -6),
        (-3, -6),
        (-2, -6),
        (-1, 4),
        (-1, 3),
        (-1, 2),
        (-1, -4),
        (-1, -3),
        (-1, -2),
        (1, 4),
        (1, 3),
        (1, 2),
        (1, -4),
        (1, -3),
        (1, -2),
        (4, 6),
        (3, 6),
        (2, 6),
        (4, 1),
        (3, 1),
        (2, 1),
        (4, -1),
        (3, -1),
        (2, -1),
        (4, -6),
        (3, -6),
        (2, -6),
        (6, 4),
        (6, 3),
        (6, 2),
        (6, -4),
        (6, -3),
        (6, -2),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_counts() {
        assert_eq!(GLIDER.offsets.len(), 5);
        assert_eq!(PULSAR.offsets.len(), 48);
    }

    #[test]
    fn test_pulsar_is_mirror_symmetric() {
        for &(dr, dc) in PULSAR.offsets {
            assert!(
                PULSAR.offsets.contains(&(-dr, dc)),
                "missing vertical mirror of ({}, {})",
                dr,
                dc
            );
            assert!(
                PULSAR.offsets.contains(&(dr, -dc)),
                "missing horizontal mirror of ({}, {})",
                dr,
                dc
            );
        }
    }

    #[test]
    fn test_offsets_are_distinct() {
        for (i, a) in PULSAR.offsets.iter().enumerate() {
            assert!(!PULSAR.offsets[i + 1..].contains(a), "duplicate {:?}", a);
        }
    }
}
