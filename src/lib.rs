//! Bolo map decoding and NBT serialization
//!
//! Reads Bolo `BMAPBOLO` map files into a sparse tile grid, and reads and
//! writes Minecraft's Named Binary Tag format, so maps can be exported as
//! `.schematic` files.

pub mod bmap;
pub mod codec;
pub mod error;
pub mod nbt;
pub mod schematic;

pub use error::{Error, Result};
pub use bmap::{MapRecord, TileGrid, Pillbox, Base, StartSquare};
pub use nbt::{NbtFile, Compound, TagList, Tag, TagKind, Framing};
