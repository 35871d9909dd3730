// Mon Oct 19 2026 - Alex

use std::collections::HashMap;

/// NUL-separated string table. Offset 0 always holds the empty string.
#[derive(Debug, Clone)]
pub struct StringTable {
    bytes: Vec<u8>,
    offsets: HashMap<String, u32>,
}

impl StringTable {
    pub fn new() -> Self {
        Self {
            bytes: vec![0],
            offsets: HashMap::new(),
        }
    }

    /// Offset of `s`, appending it on first use.
    pub fn add(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }
        if let Some(&off) = self.offsets.get(s) {
            return off;
        }
        let off = self.bytes.len() as u32;
        self.bytes.extend_from_slice(s.as_bytes());
        self.bytes.push(0);
        self.offsets.insert(s.to_string(), off);
        off
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.len() <= 1
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}
