// Mon Oct 19 2026 - Alex

use crate::builder::StringTable;
use crate::error::Result;
use crate::symbol::{SymbolFormat, SymbolTable};
use goblin::elf::sym::{STB_GLOBAL, STT_FUNC, STT_NOTYPE, STT_OBJECT};
use goblin::mach::symbols::{N_EXT, N_SECT, N_UNDF};

/// Writes raw symbol table entries in any of the supported layouts. Index 0
/// is the null symbol, as in real ELF tables.
pub struct SymtabBuilder {
    format: SymbolFormat,
    data: Vec<u8>,
    strings: StringTable,
}

impl SymtabBuilder {
    pub fn new(format: SymbolFormat) -> Self {
        let mut builder = Self {
            format,
            data: Vec::new(),
            strings: StringTable::new(),
        };
        builder.push(0, STT_NOTYPE, false, 0);
        builder
    }

    pub fn object(&mut self, name: &str) -> usize {
        let name = self.strings.add(name);
        self.push(name, STT_OBJECT, true, 0x1000)
    }

    pub fn function(&mut self, name: &str) -> usize {
        let name = self.strings.add(name);
        self.push(name, STT_FUNC, true, 0x2000)
    }

    pub fn undefined(&mut self, name: &str) -> usize {
        let name = self.strings.add(name);
        self.push(name, STT_NOTYPE, false, 0)
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.format.entry_size()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn push(&mut self, name: u32, stt: u8, defined: bool, value: u64) -> usize {
        let index = self.len();
        let out = &mut self.data;
        out.extend_from_slice(&name.to_le_bytes());

        let info = if name == 0 { 0 } else { (STB_GLOBAL << 4) | stt };
        let shndx: u16 = if defined { 1 } else { 0 };
        let n_type = if defined { N_SECT | N_EXT } else { N_UNDF | N_EXT };
        let n_type = if name == 0 { 0 } else { n_type };
        let n_sect: u8 = if defined { 1 } else { 0 };

        match self.format {
            SymbolFormat::Elf32 => {
                out.extend_from_slice(&(value as u32).to_le_bytes());
                out.extend_from_slice(&0u32.to_le_bytes());
                out.push(info);
                out.push(0);
                out.extend_from_slice(&shndx.to_le_bytes());
            }
            SymbolFormat::Elf64 => {
                out.push(info);
                out.push(0);
                out.extend_from_slice(&shndx.to_le_bytes());
                out.extend_from_slice(&value.to_le_bytes());
                out.extend_from_slice(&0u64.to_le_bytes());
            }
            SymbolFormat::MachO32 => {
                out.push(n_type);
                out.push(n_sect);
                out.extend_from_slice(&(stt as u16).to_le_bytes());
                out.extend_from_slice(&(value as u32).to_le_bytes());
            }
            SymbolFormat::MachO64 => {
                out.push(n_type);
                out.push(n_sect);
                out.extend_from_slice(&(stt as u16).to_le_bytes());
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        index
    }

    pub fn build(self) -> Result<SymbolTable> {
        SymbolTable::new(self.format, self.data, self.strings.as_bytes().to_vec())
    }
}
