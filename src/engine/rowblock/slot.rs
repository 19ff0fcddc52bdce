use crate::engine::schema::{VARLEN_OFFSET_SIZE, VARLEN_SLOT_SIZE};

use super::value_codec::read_array;

/// Contents of a variable-length slot as stored in a wire row record: an
/// untrusted offset into the indirect buffer and a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarlenSlot {
    pub offset: u64,
    pub length: u64,
}

impl VarlenSlot {
    pub fn read_from(slot: &[u8]) -> Self {
        let slot = &slot[..VARLEN_SLOT_SIZE];
        Self {
            offset: u64::from_le_bytes(read_array(&slot[..VARLEN_OFFSET_SIZE])),
            length: u64::from_le_bytes(read_array(&slot[VARLEN_OFFSET_SIZE..])),
        }
    }

    pub fn write_to(&self, slot: &mut [u8]) {
        slot[..VARLEN_OFFSET_SIZE].copy_from_slice(&self.offset.to_le_bytes());
        slot[VARLEN_OFFSET_SIZE..VARLEN_SLOT_SIZE].copy_from_slice(&self.length.to_le_bytes());
    }

    /// End offset of the referenced bytes, `None` if it overflows.
    pub fn end(&self) -> Option<u64> {
        self.offset.checked_add(self.length)
    }
}
