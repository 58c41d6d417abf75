use crate::error::{Error, ErrorKind, OsshResult};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io;
use std::iter::FusedIterator;

const LENGTH_PREFIX_SIZE: usize = 4;

/// Iterator over the SSH "string" fields of a wire encoded buffer
///
/// Each field is a 32 bits unsigned integer in big endian indicating the length of the data,
/// followed by the data itself (**NOT** null-terminating). Fields are concatenated without padding.
///
/// The iterator borrows the fields from the source buffer.
/// It is cheap to clone, so the same buffer can be walked as many times as needed.
/// After yielding an error, the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct WireFields<'a> {
    data: &'a [u8],
    failed: bool,
}

impl<'a> WireFields<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        WireFields {
            data,
            failed: false,
        }
    }

    /// The bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        self.data
    }

    /// Read the next field, failing if the buffer is already exhausted
    pub fn next_field(&mut self) -> OsshResult<&'a [u8]> {
        match self.next() {
            Some(field) => field,
            None => Err(Error::with_message(
                ErrorKind::MalformedWireData,
                "missing field",
            )),
        }
    }

    fn malformed(&mut self, message: String) -> Option<OsshResult<&'a [u8]>> {
        self.failed = true;
        Some(Err(Error::with_message(
            ErrorKind::MalformedWireData,
            message,
        )))
    }
}

impl<'a> Iterator for WireFields<'a> {
    type Item = OsshResult<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.data.is_empty() {
            return None;
        }
        if self.data.len() < LENGTH_PREFIX_SIZE {
            let left = self.data.len();
            return self.malformed(format!("truncated length prefix ({} byte(s) left)", left));
        }
        let (prefix, body) = self.data.split_at(LENGTH_PREFIX_SIZE);
        let length = BigEndian::read_u32(prefix) as usize;
        if length > body.len() {
            return self.malformed(format!(
                "field length {} exceeds the {} remaining byte(s)",
                length,
                body.len()
            ));
        }
        let (field, rest) = body.split_at(length);
        self.data = rest;
        Some(Ok(field))
    }
}

impl<'a> FusedIterator for WireFields<'a> {}

/// Iterate the wire encoded fields of `data`
pub fn wire_fields(data: &[u8]) -> WireFields<'_> {
    WireFields::new(data)
}

/// [io::Write](https://doc.rust-lang.org/std/io/trait.Write.html) extension to write ssh data
pub trait SshWriteExt {
    /// Write 32 bits unsigned integer in big endian
    fn write_uint32(&mut self, value: u32) -> io::Result<()>;

    /// Write binary string data
    ///
    /// Before the binary string, there is a 32 bits unsigned integer to indicate the length of the data,
    /// and the binary string is **NOT** null-terminating.
    fn write_string(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Write UTF-8 string
    ///
    /// Convert the string into bytes array and write it using [write_string()](trait.SshWriteExt.html#tymethod.write_string).
    fn write_utf8(&mut self, value: &str) -> io::Result<()>;
}

impl<W: io::Write + ?Sized> SshWriteExt for W {
    fn write_uint32(&mut self, value: u32) -> io::Result<()> {
        self.write_u32::<BigEndian>(value)?;
        Ok(())
    }
    fn write_string(&mut self, buf: &[u8]) -> io::Result<()> {
        if buf.len() > u32::MAX as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "String too long",
            ));
        }
        self.write_uint32(buf.len() as u32)?;
        self.write_all(buf)?;
        Ok(())
    }
    fn write_utf8(&mut self, value: &str) -> io::Result<()> {
        self.write_string(value.as_bytes())?;
        Ok(())
    }
}
