use super::error::OscError;
use super::layout;

/// Append-only encoder for one datagram. All multi-byte fields are written
/// big-endian; strings and blobs are zero-padded to the 4-byte alignment.
#[derive(Default)]
pub struct OscWriter {
    buf: Vec<u8>,
}

impl OscWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Append the string bytes, the NUL terminator, and zero padding up to
    /// the alignment. An empty string still occupies four bytes.
    pub fn put_str(&mut self, value: &str) {
        self.buf.extend_from_slice(value.as_bytes());
        let padded = layout::padded(value.len() + 1);
        self.buf.resize(self.buf.len() + (padded - value.len()), 0);
    }

    /// Append the 4-byte length, the raw bytes, and zero padding so the
    /// whole field stays aligned.
    pub fn put_blob(&mut self, bytes: &[u8]) -> Result<(), OscError> {
        let declared =
            u32::try_from(bytes.len()).map_err(|_| OscError::BlobTooLarge { len: bytes.len() })?;
        self.put_u32(declared);
        self.buf.extend_from_slice(bytes);
        let pad = layout::padded(bytes.len()) - bytes.len();
        self.buf.resize(self.buf.len() + pad, 0);
        Ok(())
    }

    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
