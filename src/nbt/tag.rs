use std::io::{Read, Write};

use crate::codec::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};

use super::{Compound, TagKind, TagList, MAX_DEPTH};

/// A single NBT value. Names are held by the enclosing [`Compound`].
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(TagList),
    Compound(Compound),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::String(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
        }
    }

    /// Decode the payload of a tag of the given kind.
    ///
    /// Returns the value and the number of bytes it occupied.
    pub fn decode<R: Read>(kind: TagKind, reader: &mut BinaryReader<R>) -> Result<(Self, usize)> {
        let start = reader.position();
        let tag = Self::read_payload(kind, reader, 0)?;
        Ok((tag, reader.position() - start))
    }

    /// Encode this tag's payload (no type byte, no name).
    ///
    /// Returns the number of bytes written.
    pub fn encode<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<usize> {
        let start = writer.position();
        self.write_payload(writer)?;
        Ok(writer.position() - start)
    }

    pub(crate) fn read_payload<R: Read>(
        kind: TagKind,
        reader: &mut BinaryReader<R>,
        depth: usize,
    ) -> Result<Self> {
        if depth > MAX_DEPTH {
            return Err(Error::NestingTooDeep { max: MAX_DEPTH });
        }
        Ok(match kind {
            TagKind::End => return Err(Error::UnknownTagKind(TagKind::End.id())),
            TagKind::Byte => Self::Byte(reader.read_i8()?),
            TagKind::Short => Self::Short(reader.read_i16()?),
            TagKind::Int => Self::Int(reader.read_i32()?),
            TagKind::Long => Self::Long(reader.read_i64()?),
            TagKind::Float => Self::Float(reader.read_f32()?),
            TagKind::Double => Self::Double(reader.read_f64()?),
            TagKind::ByteArray => {
                let len = reader.read_i32()?;
                if len < 0 {
                    return Err(Error::InvalidLength {
                        what: "byte array",
                        len: len as i64,
                    });
                }
                Self::ByteArray(reader.read_bytes(len as usize)?)
            }
            TagKind::String => Self::String(reader.read_string()?),
            TagKind::List => Self::List(TagList::read_payload(reader, depth)?),
            TagKind::Compound => Self::Compound(Compound::read_payload(reader, depth)?),
        })
    }

    pub(crate) fn write_payload<W: Write>(&self, writer: &mut BinaryWriter<W>) -> Result<()> {
        match self {
            Self::Byte(v) => writer.write_i8(*v),
            Self::Short(v) => writer.write_i16(*v),
            Self::Int(v) => writer.write_i32(*v),
            Self::Long(v) => writer.write_i64(*v),
            Self::Float(v) => writer.write_f32(*v),
            Self::Double(v) => writer.write_f64(*v),
            Self::ByteArray(bytes) => {
                if bytes.len() > i32::MAX as usize {
                    return Err(Error::TooLong {
                        what: "byte array",
                        len: bytes.len(),
                        max: i32::MAX as usize,
                    });
                }
                writer.write_i32(bytes.len() as i32)?;
                writer.write_bytes(bytes)
            }
            Self::String(s) => writer.write_string(s),
            Self::List(list) => list.write_payload(writer),
            Self::Compound(compound) => compound.write_payload(writer),
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TagList> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut TagList> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Self::Compound(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Tag {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from!(i8, Byte);
impl_from!(i16, Short);
impl_from!(i32, Int);
impl_from!(i64, Long);
impl_from!(f32, Float);
impl_from!(f64, Double);
impl_from!(Vec<u8>, ByteArray);
impl_from!(String, String);
impl_from!(TagList, List);
impl_from!(Compound, Compound);

impl From<&str> for Tag {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}
