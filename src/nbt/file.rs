use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use crate::codec::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};

use super::pretty::write_root;
use super::{Compound, TagKind};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Outer framing applied when writing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// gzip-compressed, as Minecraft stores `.schematic` and `level.dat`.
    #[default]
    Gzip,
    /// Bare tag stream.
    Raw,
}

/// An NBT file: one named root compound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtFile {
    pub name: String,
    pub root: Compound,
}

impl NbtFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: Compound::new(),
        }
    }

    /// Parse a file from a stream, decompressing it if it starts with the
    /// gzip magic.
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut buffered = BufReader::new(reader);
        let gzipped = buffered.fill_buf()?.starts_with(&GZIP_MAGIC);
        let result = if gzipped {
            Self::read_gzip(buffered)
        } else {
            let mut reader = BinaryReader::new(buffered);
            Self::parse(&mut reader).and_then(|file| reader.expect_end().map(|()| file))
        };
        result.map_err(malformed)
    }

    /// The decoder checks the gzip trailer only once it has been read to the
    /// end, so the whole member is consumed. Exactly one member is allowed.
    fn read_gzip<R: BufRead>(compressed: R) -> Result<Self> {
        let mut reader = BinaryReader::new(GzDecoder::new(compressed));
        let file = Self::parse(&mut reader)?;
        reader.expect_end()?;

        let mut rest = reader.into_inner().into_inner();
        if !rest.fill_buf()?.is_empty() {
            return Err(Error::MalformedFile(
                "unexpected data after gzip member".to_string(),
            ));
        }
        Ok(file)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "reading nbt file");
        Self::read(file)
    }

    fn parse<R: Read>(reader: &mut BinaryReader<R>) -> Result<Self> {
        let id = reader.read_u8()?;
        if id != TagKind::Compound.id() {
            return Err(Error::MalformedFile(format!(
                "not a compound root (found tag kind {id})"
            )));
        }
        let name = reader.read_string()?;
        let root = Compound::read_payload(reader, 0)?;
        debug!(name = %name, entries = root.len(), bytes = reader.position(), "parsed nbt root");
        Ok(Self { name, root })
    }

    /// Serialize to `writer`. The stream is flushed, and for
    /// [`Framing::Gzip`] the gzip trailer written, before this returns.
    pub fn write<W: Write>(&self, writer: W, framing: Framing) -> Result<()> {
        match framing {
            Framing::Gzip => {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                self.write_body(&mut encoder)?;
                encoder.finish()?.flush()?;
            }
            Framing::Raw => {
                let mut writer = writer;
                self.write_body(&mut writer)?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    fn write_body<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BinaryWriter::new(writer);
        writer.write_u8(TagKind::Compound.id())?;
        writer.write_string(&self.name)?;
        self.root.write_payload(&mut writer)?;
        debug!(name = %self.name, bytes = writer.position(), "wrote nbt root");
        Ok(())
    }

    pub fn to_bytes(&self, framing: Framing) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out, framing)?;
        Ok(out)
    }

    /// Write to `path`, creating or truncating it. The file handle is closed
    /// on every return path.
    pub fn save(&self, path: impl AsRef<Path>, framing: Framing) -> Result<()> {
        let file = File::create(path.as_ref())?;
        debug!(path = %path.as_ref().display(), ?framing, "writing nbt file");
        self.write(BufWriter::new(file), framing)
    }

    pub fn pretty(&self) -> String {
        let mut out = String::new();
        let _ = write_root(&mut out, &self.name, &self.root);
        out
    }
}

/// Fold decode failures into [`Error::MalformedFile`]. I/O faults other than
/// corrupt compressed data keep their own variant.
fn malformed(err: Error) -> Error {
    match err {
        Error::UnexpectedEof { offset } => Error::MalformedFile(format!(
            "partial file parse at offset {offset}: file possibly truncated"
        )),
        Error::TrailingData { offset } => Error::MalformedFile(format!(
            "unexpected data after root compound at offset {offset}"
        )),
        Error::Io(ref io_err)
            if matches!(
                io_err.kind(),
                io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput
            ) =>
        {
            Error::MalformedFile(format!("corrupt compressed data: {io_err}"))
        }
        Error::MalformedFile(_) | Error::Io(_) => err,
        other => Error::MalformedFile(format!("partial file parse: {other}")),
    }
}
