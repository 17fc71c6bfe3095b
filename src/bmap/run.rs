use std::io::Read;

use crate::codec::BinaryReader;
use crate::error::{Error, Result};

/// Row number in a run header that terminates the run table.
pub const RUN_TABLE_END: u8 = 255;

/// Size of a run header; the header's length byte counts it.
const RUN_HEADER_LEN: usize = 4;

/// Control nibbles below this start a literal run.
const LITERAL_LIMIT: u8 = 8;

/// Subtracted from a repeat control nibble to get its tile count.
const REPEAT_BIAS: u8 = 6;

/// One encoded horizontal segment of a map row, covering `[start_x, end_x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub y: u8,
    pub start_x: u8,
    pub end_x: u8,
    /// Run data split into 4-bit values, high nibble of each byte first.
    pub nibbles: Vec<u8>,
}

impl Run {
    /// Read one run table entry, or `None` at the table terminator.
    pub fn read<R: Read>(reader: &mut BinaryReader<R>) -> Result<Option<Self>> {
        let [run_length, y, start_x, end_x] = reader.read_array::<4>()?;
        if y == RUN_TABLE_END {
            return Ok(None);
        }
        let data_len = (run_length as usize)
            .checked_sub(RUN_HEADER_LEN)
            .ok_or(Error::InvalidLength {
                what: "run",
                len: run_length as i64,
            })?;
        let data = reader.read_bytes(data_len)?;
        Ok(Some(Self {
            y,
            start_x,
            end_x,
            nibbles: split_nibbles(&data),
        }))
    }

    /// Decode the run into `(x, tile)` pairs in emission order.
    ///
    /// A literal run is always emitted in full, even if it carries the
    /// cursor past `end_x`.
    pub fn expand(&self) -> Result<Vec<(u8, u8)>> {
        let y = self.y;
        let mut nibbles = self.nibbles.iter().copied();
        let mut next = |x: usize| nibbles.next().ok_or(Error::RunExhausted { y, x });
        let column = |x: usize| u8::try_from(x).map_err(|_| Error::TileOutOfRange { x, y });

        let end = self.end_x as usize;
        let mut x = self.start_x as usize;
        let mut tiles = Vec::with_capacity(end.saturating_sub(x));

        while x < end {
            let len = next(x)?;
            if len < LITERAL_LIMIT {
                for _ in 0..=len {
                    let tile = next(x)?;
                    tiles.push((column(x)?, tile));
                    x += 1;
                }
            } else {
                let tile = next(x)?;
                for _ in 0..len - REPEAT_BIAS {
                    tiles.push((column(x)?, tile));
                    x += 1;
                }
            }
        }
        Ok(tiles)
    }
}

fn split_nibbles(data: &[u8]) -> Vec<u8> {
    data.iter().flat_map(|b| [b >> 4, b & 0x0f]).collect()
}
