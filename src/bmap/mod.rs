//! Bolo map file (`BMAPBOLO`) decoder
//!
//! Layout, all single bytes after the 8-byte format tag:
//!
//! ```text
//! header      format_tag[8] version pillboxes bases start_squares
//! pillbox     x y owner armour speed            (x pillboxes)
//! base        x y owner armour shells mines     (x bases)
//! start       x y direction                     (x start_squares)
//! run         length y start_x end_x data[length - 4]
//!             ... until a run with y == 255
//! ```
//!
//! Run data is a stream of nibbles. A control nibble `n < 8` is followed by
//! `n + 1` literal tile ids; `n >= 8` is followed by one tile id repeated
//! `n - 6` times.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::codec::BinaryReader;
use crate::error::Result;

mod grid;
mod run;

pub use grid::{TileGrid, TEXT_PALETTE};
pub use run::{Run, RUN_TABLE_END};

/// Width and height of every map, in tiles.
pub const MAP_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapHeader {
    #[serde(serialize_with = "serialize_format_tag")]
    pub format_tag: [u8; 8],
    pub version: u8,
    pub pillboxes: u8,
    pub bases: u8,
    pub start_squares: u8,
}

impl MapHeader {
    pub fn read<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            format_tag: reader.read_array()?,
            version: reader.read_u8()?,
            pillboxes: reader.read_u8()?,
            bases: reader.read_u8()?,
            start_squares: reader.read_u8()?,
        })
    }

    pub fn format_tag_lossy(&self) -> String {
        String::from_utf8_lossy(&self.format_tag).into_owned()
    }
}

fn serialize_format_tag<S: Serializer>(tag: &[u8; 8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(tag))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pillbox {
    pub x: u8,
    pub y: u8,
    pub owner: u8,
    pub armour: u8,
    pub speed: u8,
}

impl Pillbox {
    pub fn read<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            x: reader.read_u8()?,
            y: reader.read_u8()?,
            owner: reader.read_u8()?,
            armour: reader.read_u8()?,
            speed: reader.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Base {
    pub x: u8,
    pub y: u8,
    pub owner: u8,
    pub armour: u8,
    pub shells: u8,
    pub mines: u8,
}

impl Base {
    pub fn read<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            x: reader.read_u8()?,
            y: reader.read_u8()?,
            owner: reader.read_u8()?,
            armour: reader.read_u8()?,
            shells: reader.read_u8()?,
            mines: reader.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartSquare {
    pub x: u8,
    pub y: u8,
    pub direction: u8,
}

impl StartSquare {
    pub fn read<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self> {
        Ok(Self {
            x: reader.read_u8()?,
            y: reader.read_u8()?,
            direction: reader.read_u8()?,
        })
    }
}

/// A fully decoded map. Read-only once decoding returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapRecord {
    pub header: MapHeader,
    pub pillboxes: Vec<Pillbox>,
    pub bases: Vec<Base>,
    pub start_squares: Vec<StartSquare>,
    pub grid: TileGrid,
}

impl MapRecord {
    /// Decode a map from a stream. Stops after the run table terminator;
    /// any bytes after it are left unread.
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut reader = BinaryReader::new(reader);

        let header = MapHeader::read(&mut reader)?;
        debug!(
            format_tag = %header.format_tag_lossy(),
            version = header.version,
            pillboxes = header.pillboxes,
            bases = header.bases,
            start_squares = header.start_squares,
            "read map header"
        );

        let pillboxes = (0..header.pillboxes)
            .map(|_| Pillbox::read(&mut reader))
            .collect::<Result<Vec<_>>>()?;
        let bases = (0..header.bases)
            .map(|_| Base::read(&mut reader))
            .collect::<Result<Vec<_>>>()?;
        let start_squares = (0..header.start_squares)
            .map(|_| StartSquare::read(&mut reader))
            .collect::<Result<Vec<_>>>()?;

        let mut runs = Vec::new();
        while let Some(run) = Run::read(&mut reader)? {
            trace!(y = run.y, start_x = run.start_x, end_x = run.end_x, "read run");
            runs.push(run);
        }

        let mut grid = TileGrid::new();
        for run in &runs {
            for (x, tile) in run.expand()? {
                grid.set(x, run.y, tile);
            }
        }
        debug!(runs = runs.len(), tiles = grid.len(), bytes = reader.position(), "decoded map");

        Ok(Self {
            header,
            pillboxes,
            bases,
            start_squares,
            grid,
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "reading map file");
        Self::read(BufReader::new(file))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read(data)
    }
}
