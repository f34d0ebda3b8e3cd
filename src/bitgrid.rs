//! Read-only view over an engine's packed cell buffer.

/// Borrowed packed-bit view: cell `i` is bit `i % 8` of byte `i / 8`.
///
/// The borrow ties the view to the engine buffer it came from, so it can
/// never outlive a mutation of the engine.
pub struct BitGrid<'a> {
    bits: &'a [u8],
}

impl<'a> BitGrid<'a> {
    pub fn new(bits: &'a [u8]) -> Self {
        Self { bits }
    }

    /// Whether bit `index` is set.
    pub fn get(&self, index: usize) -> bool {
        let mask = 1u8 << (index % 8);
        self.bits[index / 8] & mask == mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_within_byte() {
        // 0b0000_0101: bits 0 and 2 set.
        let grid = BitGrid::new(&[0b0000_0101]);
        assert!(grid.get(0));
        assert!(!grid.get(1));
        assert!(grid.get(2));
        assert!(!grid.get(7));
    }

    #[test]
    fn test_decode_across_bytes() {
        let grid = BitGrid::new(&[0x00, 0b1000_0000]);
        assert!(!grid.get(7));
        assert!(!grid.get(8));
        assert!(grid.get(15), "bit 7 of byte 1 is linear index 15");
    }

    #[test]
    fn test_repeated_reads_are_stable() {
        let bytes = [0xA5, 0x3C];
        let grid = BitGrid::new(&bytes);
        for index in 0..16 {
            assert_eq!(grid.get(index), grid.get(index));
        }
    }
}
