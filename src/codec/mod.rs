pub mod reader;
pub mod writer;

pub use reader::BinaryReader;
pub use writer::BinaryWriter;
