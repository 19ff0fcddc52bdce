use std::io::{Read, Write};

use crc32fast::Hasher as Crc32Hasher;

use crate::engine::errors::RowBlockError;

pub const MESSAGE_MAGIC: [u8; 8] = *b"RWBLK001";
pub const MESSAGE_VERSION: u16 = 1;

/// Fixed-size prefix of a framed row block message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub magic: [u8; 8],
    pub version: u16,
    pub row_count: u32,
    pub row_bytes_len: u64,
    pub indirect_bytes_len: u64,
    /// CRC32 over the row bytes followed by the indirect bytes.
    pub checksum: u32,
}

impl MessageHeader {
    pub const TOTAL_LEN: usize = 8 + 2 + 4 + 8 + 8 + 4;

    pub fn new(row_count: u32, row_bytes: &[u8], indirect_bytes: &[u8]) -> Self {
        Self {
            magic: MESSAGE_MAGIC,
            version: MESSAGE_VERSION,
            row_count,
            row_bytes_len: row_bytes.len() as u64,
            indirect_bytes_len: indirect_bytes.len() as u64,
            checksum: Self::compute_checksum(row_bytes, indirect_bytes),
        }
    }

    pub fn compute_checksum(row_bytes: &[u8], indirect_bytes: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(row_bytes);
        hasher.update(indirect_bytes);
        hasher.finalize()
    }

    /// Total payload bytes announced by the header, `None` on overflow.
    pub fn payload_len(&self) -> Option<u64> {
        self.row_bytes_len.checked_add(self.indirect_bytes_len)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), RowBlockError> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.row_count.to_le_bytes())?;
        writer.write_all(&self.row_bytes_len.to_le_bytes())?;
        writer.write_all(&self.indirect_bytes_len.to_le_bytes())?;
        writer.write_all(&self.checksum.to_le_bytes())?;
        Ok(())
    }

    /// Reads and validates magic and version. Lengths and checksum are checked
    /// by the caller, which knows the size limit and owns the payload.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self, RowBlockError> {
        let mut magic = [0u8; 8];
        let mut buf2 = [0u8; 2];
        let mut buf4 = [0u8; 4];
        let mut buf8 = [0u8; 8];

        reader.read_exact(&mut magic)?;
        if magic != MESSAGE_MAGIC {
            return Err(RowBlockError::Corrupt(format!(
                "bad message magic {:?}",
                String::from_utf8_lossy(&magic)
            )));
        }

        reader.read_exact(&mut buf2)?;
        let version = u16::from_le_bytes(buf2);
        if version != MESSAGE_VERSION {
            return Err(RowBlockError::Corrupt(format!(
                "unsupported message version {}",
                version
            )));
        }

        reader.read_exact(&mut buf4)?;
        let row_count = u32::from_le_bytes(buf4);

        reader.read_exact(&mut buf8)?;
        let row_bytes_len = u64::from_le_bytes(buf8);
        reader.read_exact(&mut buf8)?;
        let indirect_bytes_len = u64::from_le_bytes(buf8);

        reader.read_exact(&mut buf4)?;
        let checksum = u32::from_le_bytes(buf4);

        Ok(Self {
            magic,
            version,
            row_count,
            row_bytes_len,
            indirect_bytes_len,
            checksum,
        })
    }
}
