use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Error, Result};

macro_rules! read_be {
    ($self:ident, $read_func:ident, $width:expr) => {{
        let value = $self
            .inner
            .$read_func::<BigEndian>()
            .map_err(|err| $self.io_error(err))?;
        $self.pos += $width;
        Ok(value)
    }};
}

/// Big-endian binary reader over a forward-only byte stream.
///
/// The reader counts every byte it consumes, so callers can report how much
/// of the stream a value occupied. A short read is reported as
/// [`Error::UnexpectedEof`] carrying the offset of the field that could not
/// be completed.
pub struct BinaryReader<R> {
    inner: R,
    pos: usize,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn io_error(&self, err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof { offset: self.pos }
        } else {
            Error::Io(err)
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.inner.read_u8().map_err(|err| self.io_error(err))?;
        self.pos += 1;
        Ok(value)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        read_be!(self, read_i16, 2)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        read_be!(self, read_i32, 4)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        read_be!(self, read_i64, 8)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        read_be!(self, read_f32, 4)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        read_be!(self, read_f64, 8)
    }

    /// Read exactly `n` bytes.
    ///
    /// The buffer grows with the data actually delivered, so a corrupt length
    /// prefix cannot force a huge allocation up front.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let result = self.inner.by_ref().take(n as u64).read_to_end(&mut bytes);
        let got = result.map_err(|err| self.io_error(err))?;
        if got != n {
            return Err(Error::UnexpectedEof { offset: self.pos });
        }
        self.pos += n;
        Ok(bytes)
    }

    /// Read a fixed-size field such as a magic tag.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.inner
            .read_exact(&mut bytes)
            .map_err(|err| self.io_error(err))?;
        self.pos += N;
        Ok(bytes)
    }

    /// Check that the stream is exhausted. Decoders that verify a trailer
    /// only do so once they are read to the end, so this is where their
    /// errors surface.
    pub fn expect_end(&mut self) -> Result<()> {
        let next = self.inner.by_ref().bytes().next();
        match next {
            None => Ok(()),
            Some(Ok(_)) => Err(Error::TrailingData { offset: self.pos }),
            Some(Err(err)) => Err(self.io_error(err)),
        }
    }

    /// Read a string prefixed with a signed 16-bit byte length.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_i16()?;
        if len < 0 {
            return Err(Error::InvalidLength {
                what: "string",
                len: len as i64,
            });
        }
        let bytes = self.read_bytes(len as usize)?;
        Ok(String::from_utf8(bytes)?)
    }
}
