/// LSB-first bit helpers shared by the null bitmaps in row records, column
/// blocks and selection vectors.
pub struct NullBitmap;

impl NullBitmap {
    #[inline]
    pub fn set_bit(bitmap: &mut [u8], index: usize) {
        bitmap[index / 8] |= 1 << (index % 8);
    }

    #[inline]
    pub fn clear_bit(bitmap: &mut [u8], index: usize) {
        bitmap[index / 8] &= !(1 << (index % 8));
    }

    #[inline]
    pub fn is_set(bitmap: &[u8], index: usize) -> bool {
        (bitmap[index / 8] & (1 << (index % 8))) != 0
    }

    pub fn size_for(bits: usize) -> usize {
        bits.div_ceil(8)
    }

    pub fn count_set(bitmap: &[u8], bits: usize) -> usize {
        let full = bits / 8;
        let mut count: usize = bitmap[..full]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();
        for idx in full * 8..bits {
            if Self::is_set(bitmap, idx) {
                count += 1;
            }
        }
        count
    }
}
