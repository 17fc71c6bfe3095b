use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};

macro_rules! write_be {
    ($self:ident, $write_func:ident, $value:expr, $width:expr) => {{
        $self.inner.$write_func::<BigEndian>($value)?;
        $self.pos += $width;
        Ok(())
    }};
}

/// Big-endian binary writer over a byte sink.
///
/// Write failures surface as [`Error::Io`] with the underlying cause intact.
pub struct BinaryWriter<W> {
    inner: W,
    pos: usize,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.pos += bytes.len();
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.inner.write_u8(v)?;
        self.pos += 1;
        Ok(())
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.write_u8(v as u8)
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        write_be!(self, write_i16, v, 2)
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        write_be!(self, write_i32, v, 4)
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        write_be!(self, write_i64, v, 8)
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        write_be!(self, write_f32, v, 4)
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        write_be!(self, write_f64, v, 8)
    }

    /// Write a string prefixed with a signed 16-bit byte length.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let len = s.len();
        if len > i16::MAX as usize {
            return Err(Error::TooLong {
                what: "string",
                len,
                max: i16::MAX as usize,
            });
        }
        self.write_i16(len as i16)?;
        self.write_bytes(s.as_bytes())
    }
}

impl Default for BinaryWriter<Vec<u8>> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<BinaryWriter<Vec<u8>>> for Vec<u8> {
    fn from(writer: BinaryWriter<Vec<u8>>) -> Self {
        writer.into_inner()
    }
}
