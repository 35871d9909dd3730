// Mon Oct 19 2026 - Alex

use crate::error::{CtfError, Result};
use crate::format::{codec, Schema, CTF_F_COMPRESS, CTF_MAGIC};

pub const HEADER_SIZE: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtfHeader {
    pub magic: u16,
    pub version: u8,
    pub flags: u8,
    pub parent_label: u32,
    pub parent_name: u32,
    pub label_offset: u32,
    pub object_offset: u32,
    pub function_offset: u32,
    pub type_offset: u32,
    pub string_offset: u32,
    pub string_length: u32,
}

impl CtfHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(CtfError::Truncated(format!(
                "{} bytes is smaller than the {} byte header",
                data.len(),
                HEADER_SIZE
            )));
        }

        let magic = codec::read_u16(data, 0)?;
        if magic != CTF_MAGIC {
            return Err(CtfError::BadMagic(magic));
        }

        let header = Self {
            magic,
            version: data[2],
            flags: data[3],
            parent_label: codec::read_u32(data, 4)?,
            parent_name: codec::read_u32(data, 8)?,
            label_offset: codec::read_u32(data, 12)?,
            object_offset: codec::read_u32(data, 16)?,
            function_offset: codec::read_u32(data, 20)?,
            type_offset: codec::read_u32(data, 24)?,
            string_offset: codec::read_u32(data, 28)?,
            string_length: codec::read_u32(data, 32)?,
        };

        if Schema::for_version(header.version).is_none() {
            return Err(CtfError::UnsupportedVersion(header.version));
        }

        Ok(header)
    }

    /// Checks the section offsets against the size of the data that follows
    /// the header.
    pub fn validate(&self, body_len: usize) -> Result<()> {
        if self.is_compressed() {
            return Err(CtfError::Unsupported(
                "compressed CTF data".to_string(),
            ));
        }

        if self.label_offset > self.object_offset
            || self.object_offset > self.function_offset
            || self.function_offset > self.type_offset
            || self.type_offset > self.string_offset
        {
            return Err(CtfError::corrupt("section offsets are out of order"));
        }

        let string_end = self.string_offset as u64 + self.string_length as u64;
        if string_end > body_len as u64 {
            return Err(CtfError::Truncated(format!(
                "string table ends at {} but only {} bytes are present",
                string_end, body_len
            )));
        }

        Ok(())
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & CTF_F_COMPRESS != 0
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.magic.to_le_bytes());
        out.push(self.version);
        out.push(self.flags);
        for word in [
            self.parent_label,
            self.parent_name,
            self.label_offset,
            self.object_offset,
            self.function_offset,
            self.type_offset,
            self.string_offset,
            self.string_length,
        ] {
            out.extend_from_slice(&word.to_le_bytes());
        }
    }
}
