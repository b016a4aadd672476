//! Utility types for binary serialization.
//!
//! Provides `KasWriter` and `KasReader` for the fixed-width little- and
//! big-endian fields, length-prefixed byte strings, and byte-reversed
//! fields that make up Kaspa hashing pre-images and signer arguments.
//! Lengths are always 8-byte little-endian integers; there is no VarInt.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// KasWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for protocol binary data.
#[derive(Clone, Debug, Default)]
pub struct KasWriter {
    buf: Vec<u8>,
}

impl KasWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        KasWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        KasWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append bytes in reverse order.
    ///
    /// Used for identifiers stored in internal order and hashed in network order.
    pub fn write_reversed(&mut self, bytes: &[u8]) {
        self.buf.extend(bytes.iter().rev());
    }

    /// Append a length-prefixed byte string (u64 LE length, then the bytes).
    ///
    /// # Arguments
    /// * `bytes` - The bytes to append.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_u64_le(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16 (2 bytes).
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes).
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a big-endian u32 (4 bytes).
    pub fn write_u32_be(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a little-endian u64 (8 bytes).
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a big-endian u64 (8 bytes).
    pub fn write_u64_be(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append `n` zero bytes.
    ///
    /// # Arguments
    /// * `n` - Number of zero bytes.
    pub fn write_zeros(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

// ---------------------------------------------------------------------------
// KasReader
// ---------------------------------------------------------------------------

/// A cursor-based reader over protocol binary data.
///
/// Mirrors `KasWriter`: fixed-width integers and u64-length-prefixed byte
/// strings.
pub struct KasReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> KasReader<'a> {
    /// Create a new reader over the given byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from.
    ///
    /// # Returns
    /// A `KasReader` positioned at the start of the data.
    pub fn new(data: &'a [u8]) -> Self {
        KasReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a u64-LE length prefix followed by that many bytes.
    ///
    /// # Returns
    /// The byte string, or an error if the prefix exceeds the remaining data.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let len = self.read_u64_le()?;
        let len = usize::try_from(len).map_err(|_| PrimitivesError::UnexpectedEof)?;
        self.read_bytes(len)
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_field_layout() {
        let mut writer = KasWriter::new();
        writer.write_u16_le(0x0102);
        writer.write_u32_be(0x0a0b0c0d);
        writer.write_u64_le(1);
        writer.write_reversed(&[1, 2, 3]);
        writer.write_var_bytes(&[0xaa, 0xbb]);
        writer.write_zeros(3);

        assert_eq!(
            hex::encode(writer.as_bytes()),
            "02010a0b0c0d01000000000000000302010200000000000000aabb000000"
        );
        assert_eq!(writer.len(), 30);
    }

    #[test]
    fn test_reader_writer_roundtrip() {
        let mut writer = KasWriter::new();
        writer.write_u8(0x42);
        writer.write_u16_le(0x1234);
        writer.write_u32_le(0xDEADBEEF);
        writer.write_u32_be(0x80000000);
        writer.write_u64_le(0x0102030405060708);
        writer.write_var_bytes(b"hello");

        let data = writer.into_bytes();
        let mut reader = KasReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x42);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_u32_be().unwrap(), 0x80000000);
        assert_eq!(reader.read_u64_le().unwrap(), 0x0102030405060708);
        assert_eq!(reader.read_var_bytes().unwrap(), b"hello");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_reader_eof() {
        let mut reader = KasReader::new(&[0x01]);
        assert!(reader.read_u8().is_ok());
        assert!(reader.read_u8().is_err());

        // Length prefix larger than the remaining data.
        let mut writer = KasWriter::new();
        writer.write_u64_le(10);
        writer.write_bytes(&[0u8; 4]);
        let data = writer.into_bytes();
        let mut reader = KasReader::new(&data);
        assert!(reader.read_var_bytes().is_err());
    }
}
