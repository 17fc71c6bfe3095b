//! Minecraft `.schematic` export of a decoded map.
//!
//! The map becomes a single-layer `MAP_SIZE x MAP_SIZE` schematic whose
//! block ids are the Bolo tile ids, with unset tiles left as air (0).

use tracing::debug;

use crate::bmap::{MapRecord, MAP_SIZE};
use crate::nbt::{NbtFile, Tag, TagKind, TagList};

pub const ROOT_NAME: &str = "Schematic";
pub const MATERIALS: &str = "Alpha";

pub fn to_schematic(map: &MapRecord) -> NbtFile {
    let blocks = map.grid.to_dense(0);
    let data = vec![0u8; blocks.len()];

    let mut file = NbtFile::new(ROOT_NAME);
    let root = &mut file.root;
    root.insert("Width", Tag::Short(MAP_SIZE as i16));
    root.insert("Length", Tag::Short(MAP_SIZE as i16));
    root.insert("Height", Tag::Short(1));
    root.insert("Materials", MATERIALS);
    root.insert("Blocks", blocks);
    root.insert("Data", data);
    root.insert("Entities", TagList::new(TagKind::Long));
    root.insert("TileEntities", TagList::new(TagKind::Long));

    debug!(tiles = map.grid.len(), "built schematic");
    file
}
