use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::engine::errors::RowBlockError;
use crate::engine::rowblock::{ProjectionMapping, RowBlock, RowEncoder, UnresolvedRowBlock};
use crate::engine::schema::RowLayout;
use crate::shared::config::CONFIG;

use super::header::MessageHeader;

/// The three pieces a sender hands to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowBlockMessage {
    pub row_count: u32,
    pub row_bytes: Vec<u8>,
    pub indirect_bytes: Vec<u8>,
}

impl RowBlockMessage {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Splits the message into a block awaiting resolution and the indirect
    /// buffer it must be resolved against.
    pub fn decode(self, layout: RowLayout) -> (UnresolvedRowBlock, Vec<u8>) {
        let block = UnresolvedRowBlock::new(layout, self.row_count as usize, self.row_bytes);
        (block, self.indirect_bytes)
    }

    pub fn header(&self) -> MessageHeader {
        MessageHeader::new(self.row_count, &self.row_bytes, &self.indirect_bytes)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), RowBlockError> {
        self.header().write_to(&mut writer)?;
        writer.write_all(&self.row_bytes)?;
        writer.write_all(&self.indirect_bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads one framed message, refusing payloads above `max_bytes` before
    /// allocating for them.
    pub fn read_from<R: Read>(reader: R, max_bytes: u64) -> Result<Self, RowBlockError> {
        Self::read_framed(reader, max_bytes, true)
    }

    /// `read_from` with the size limit and checksum policy from `CONFIG.wire`.
    pub fn read_from_default<R: Read>(reader: R) -> Result<Self, RowBlockError> {
        Self::read_framed(
            reader,
            CONFIG.wire.max_message_bytes,
            CONFIG.wire.verify_checksum,
        )
    }

    fn read_framed<R: Read>(
        mut reader: R,
        max_bytes: u64,
        verify_checksum: bool,
    ) -> Result<Self, RowBlockError> {
        let header = MessageHeader::read_from(&mut reader)?;

        match header.payload_len() {
            Some(len) if len <= max_bytes => {}
            _ => {
                let err = RowBlockError::Corrupt(format!(
                    "message declares {} row bytes and {} indirect bytes, limit is {}",
                    header.row_bytes_len, header.indirect_bytes_len, max_bytes
                ));
                warn!(target: "rowblock::wire", "Rejecting message: {}", err);
                return Err(err);
            }
        }

        let row_bytes = read_exact_vec(&mut reader, header.row_bytes_len)?;
        let indirect_bytes = read_exact_vec(&mut reader, header.indirect_bytes_len)?;

        if verify_checksum {
            let actual = MessageHeader::compute_checksum(&row_bytes, &indirect_bytes);
            if actual != header.checksum {
                let err = RowBlockError::Corrupt(format!(
                    "checksum mismatch: header {:#010x}, payload {:#010x}",
                    header.checksum, actual
                ));
                warn!(target: "rowblock::wire", "Rejecting message: {}", err);
                return Err(err);
            }
        }

        debug!(
            target: "rowblock::wire",
            rows = header.row_count,
            row_bytes = row_bytes.len(),
            indirect_bytes = indirect_bytes.len(),
            "Read row block message"
        );

        Ok(Self {
            row_count: header.row_count,
            row_bytes,
            indirect_bytes,
        })
    }
}

fn read_exact_vec<R: Read>(reader: &mut R, len: u64) -> Result<Vec<u8>, RowBlockError> {
    let len = usize::try_from(len)
        .map_err(|_| RowBlockError::Corrupt(format!("payload length {} too large", len)))?;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Folds the selected rows of many blocks into a single message. All blocks
/// share one indirect buffer, so slot offsets stay valid across batches.
#[derive(Debug)]
pub struct RowBlockWriter {
    mapping: ProjectionMapping,
    message: RowBlockMessage,
}

impl RowBlockWriter {
    pub fn new(mapping: ProjectionMapping) -> Self {
        Self {
            mapping,
            message: RowBlockMessage::default(),
        }
    }

    pub fn mapping(&self) -> &ProjectionMapping {
        &self.mapping
    }

    pub fn row_count(&self) -> u32 {
        self.message.row_count
    }

    /// Encodes the selected rows of `block` and returns how many were added.
    /// Nothing is appended if the message would exceed `u32::MAX` rows.
    pub fn append(&mut self, block: &RowBlock) -> Result<usize, RowBlockError> {
        let selected = block.selection().count_selected();
        let total = (self.message.row_count as usize)
            .checked_add(selected)
            .filter(|total| *total <= u32::MAX as usize)
            .ok_or_else(|| {
                RowBlockError::InvalidArgument(format!(
                    "appending {} rows to a message of {} rows exceeds {}",
                    selected,
                    self.message.row_count,
                    u32::MAX
                ))
            })?;

        let appended = RowEncoder::encode(
            block,
            &self.mapping,
            &mut self.message.row_bytes,
            &mut self.message.indirect_bytes,
        )?;
        debug_assert_eq!(appended, selected);
        self.message.row_count = total as u32;
        Ok(appended)
    }

    pub fn finish(self) -> RowBlockMessage {
        self.message
    }
}
