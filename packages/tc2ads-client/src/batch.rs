//! Batched value reads: many symbols in one round-trip.

use crate::client::AdsClient;
use crate::errors::{ClientError, Result};
use crate::symbol::{GroupSymbolList, align_up};
use tc2ads_core::ads::{ReturnCode, index_group};
use tracing::debug;

impl AdsClient {
    /// Reads every symbol of `group` in one sum-read round-trip, storing
    /// decoded values into `Symbol::value`.
    ///
    /// The request carries one `{index_group, index_offset, size}` triple
    /// per symbol; the response leads with one status word per symbol,
    /// followed by the packed values in request order. Returns the status
    /// words so callers can tell exactly which symbols failed - a failed
    /// symbol keeps `value = None` while the rest are decoded normally.
    ///
    /// Symbols without a fixed wire width (STRING, unresolved composites)
    /// occupy a request slot but no data bytes and are left untouched.
    pub fn sum_read(&self, group: &mut GroupSymbolList) -> Result<Vec<ReturnCode>> {
        let count = group.len();
        if count == 0 {
            return Err(ClientError::EmptyGroup);
        }

        let mut request = Vec::with_capacity(count * 12);
        let mut data_len = 0usize;
        for symbol in group.iter() {
            let size = symbol.size();
            request.extend_from_slice(&symbol.index_group.to_le_bytes());
            request.extend_from_slice(&symbol.index_offset.to_le_bytes());
            request.extend_from_slice(&(size as u32).to_le_bytes());
            data_len += size;
        }

        let expected = data_len + count * 4;
        let data = self.read_write(
            index_group::SYM_SUMREAD,
            count as u32,
            expected as u32,
            request,
        )?;
        if data.len() < expected {
            return Err(ClientError::ShortResponse {
                what: "sum-read reply",
                expected,
                got: data.len(),
            });
        }

        let statuses: Vec<ReturnCode> = (0..count)
            .map(|i| {
                ReturnCode::from_u32(u32::from_le_bytes(
                    data[i * 4..i * 4 + 4].try_into().unwrap(),
                ))
            })
            .collect();

        let mut cursor = count * 4;
        for (symbol, status) in group.iter_mut().zip(&statuses) {
            let size = symbol.size();
            if size == 0 {
                continue;
            }
            let bytes = &data[cursor..cursor + size];
            cursor += size;

            if !status.is_ok() {
                debug!(path = %symbol.path, %status, "sum-read entry failed");
                symbol.value = None;
                continue;
            }
            if let Some(codec) = symbol.codec() {
                symbol.value = Some(codec.unpack(bytes)?);
            }
        }

        Ok(statuses)
    }

    /// Reads the memory block covering `group` in one Read and decodes the
    /// symbols out of it. Cheaper on the PLC than [`sum_read`](AdsClient::sum_read),
    /// but every symbol must share one index group and the group must be
    /// ordered by ascending offset, spanning one contiguous range.
    ///
    /// Decoding walks the block with the same alignment rule the expansion
    /// used, so it matches the layout the runtime actually has. Returns the
    /// size of the block read.
    pub fn block_read(&self, group: &mut GroupSymbolList) -> Result<u32> {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return Err(ClientError::EmptyGroup);
        };

        let block_group = first.index_group;
        let block_offset = first.index_offset;
        let Some(span) = last
            .index_offset
            .checked_sub(block_offset)
            .map(|d| d + last.size() as u32)
        else {
            return Err(ClientError::UnorderedGroup);
        };

        for symbol in group.iter() {
            if symbol.index_group != block_group {
                return Err(ClientError::MixedIndexGroup {
                    first: block_group,
                    other: symbol.index_group,
                });
            }
        }

        let data = self.read(block_group, block_offset, span)?;
        if data.len() < span as usize {
            return Err(ClientError::ShortResponse {
                what: "block-read reply",
                expected: span as usize,
                got: data.len(),
            });
        }

        let mut cursor = 0u32;
        for symbol in group.iter_mut() {
            let size = symbol.size();
            if size == 0 {
                continue;
            }
            cursor = align_up(cursor, size);
            let start = cursor as usize;
            let bytes = &data[start..start + size];
            cursor += size as u32;

            if let Some(codec) = symbol.codec() {
                symbol.value = Some(codec.unpack(bytes)?);
            }
        }

        Ok(span)
    }
}
