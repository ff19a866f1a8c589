use super::error::OscError;
use super::layout;

/// Cursor over a borrowed datagram. All reads are bounds-checked and
/// advance the cursor; OSC fields are variable-length, so offsets are not
/// known up front.
pub struct OscReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> OscReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], OscError> {
        let needed = self.offset.saturating_add(count);
        let bytes = self
            .data
            .get(self.offset..needed)
            .ok_or(OscError::TooShort {
                needed,
                actual: self.data.len(),
            })?;
        self.offset = needed;
        Ok(bytes)
    }

    pub fn read_i32(&mut self) -> Result<i32, OscError> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, OscError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_f32(&mut self) -> Result<f32, OscError> {
        let bytes = self.read_bytes(4)?;
        Ok(f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, OscError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    pub fn read_f64(&mut self) -> Result<f64, OscError> {
        let bytes = self.read_bytes(8)?;
        Ok(f64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a NUL-terminated string and advance past its 4-byte-aligned
    /// region. A missing terminator is an error; missing trailing padding is
    /// tolerated (the cursor stops at the end of the buffer).
    pub fn read_str(&mut self) -> Result<String, OscError> {
        let start = self.offset;
        let tail = self.data.get(start..).unwrap_or_default();
        let terminator = tail
            .iter()
            .position(|&byte| byte == 0)
            .ok_or(OscError::UnterminatedString { offset: start })?;
        let value = String::from_utf8_lossy(&tail[..terminator]).into_owned();
        self.offset = start
            .saturating_add(layout::padded(terminator + 1))
            .min(self.data.len());
        Ok(value)
    }

    /// Read a length-prefixed blob and advance past its padding. The
    /// returned slice is exactly the declared length; padding bytes are
    /// discarded without validation.
    pub fn read_blob(&mut self) -> Result<&'a [u8], OscError> {
        let declared = self.read_u32()? as usize;
        let bytes = self.read_bytes(layout::padded(declared))?;
        Ok(&bytes[..declared])
    }
}
