// Mon Oct 19 2026 - Alex

use crate::container::DataModel;
use crate::error::{CtfError, Result};
use crate::format::codec::{read_u16, read_u32};
use goblin::elf::section_header::SHN_UNDEF;
use goblin::elf::sym::{st_type, STT_FUNC, STT_OBJECT};
use goblin::mach::symbols::{N_ABS, N_EXT, N_SECT, N_STAB, N_TYPE, N_UNDF};
use serde::{Deserialize, Serialize};

const NO_SECT: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolFormat {
    Elf32,
    Elf64,
    MachO32,
    MachO64,
}

impl SymbolFormat {
    pub fn entry_size(self) -> usize {
        match self {
            SymbolFormat::Elf32 => 16,
            SymbolFormat::Elf64 => 24,
            SymbolFormat::MachO32 => 12,
            SymbolFormat::MachO64 => 16,
        }
    }

    /// Picks the format from the per-entry size. Elf32 and 64-bit Mach-O
    /// entries are both 16 bytes, so the object family has to be known.
    pub fn from_entsize(entsize: usize, macho: bool) -> Option<Self> {
        match (entsize, macho) {
            (16, false) => Some(SymbolFormat::Elf32),
            (24, false) => Some(SymbolFormat::Elf64),
            (12, true) => Some(SymbolFormat::MachO32),
            (16, true) => Some(SymbolFormat::MachO64),
            _ => None,
        }
    }

    pub fn is_macho(self) -> bool {
        matches!(self, SymbolFormat::MachO32 | SymbolFormat::MachO64)
    }

    pub fn data_model(self) -> DataModel {
        match self {
            SymbolFormat::Elf32 | SymbolFormat::MachO32 => DataModel::Ilp32,
            SymbolFormat::Elf64 | SymbolFormat::MachO64 => DataModel::Lp64,
        }
    }

    /// ELF symbols carry an object/function classification; Mach-O nlist
    /// entries do not.
    pub fn classifies_functions(self) -> bool {
        !self.is_macho()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolEntry {
    Elf {
        name: u32,
        info: u8,
        shndx: u16,
        value: u64,
        size: u64,
    },
    MachO {
        name: u32,
        n_type: u8,
        n_sect: u8,
        n_desc: u16,
        value: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Object,
    Function,
    Other,
}

impl SymbolEntry {
    pub fn name_offset(&self) -> u32 {
        match *self {
            SymbolEntry::Elf { name, .. } | SymbolEntry::MachO { name, .. } => name,
        }
    }

    pub fn value(&self) -> u64 {
        match *self {
            SymbolEntry::Elf { value, .. } | SymbolEntry::MachO { value, .. } => value,
        }
    }

    /// ELF `STT_*` type; Mach-O producers store the same value in `n_desc`.
    pub fn symbol_type(&self) -> u8 {
        match *self {
            SymbolEntry::Elf { info, .. } => st_type(info),
            SymbolEntry::MachO { n_desc, .. } => n_desc as u8,
        }
    }

    /// Whether the symbol passes the data-object check of a symbol lookup.
    pub fn is_data_object(&self) -> bool {
        match *self {
            SymbolEntry::Elf { info, .. } => st_type(info) == STT_OBJECT,
            SymbolEntry::MachO {
                n_type,
                n_sect,
                n_desc,
                ..
            } => {
                let scope = n_type & (N_TYPE | N_EXT);
                let checked = scope == (N_ABS | N_EXT)
                    || scope == (N_SECT | N_EXT)
                    || (scope == (N_UNDF | N_EXT) && n_sect == NO_SECT);
                !checked || n_desc == STT_OBJECT as u16
            }
        }
    }

    pub fn is_function(&self) -> bool {
        self.symbol_type() == STT_FUNC
    }

    fn is_defined(&self) -> bool {
        match *self {
            SymbolEntry::Elf { shndx, .. } => u32::from(shndx) != SHN_UNDEF,
            SymbolEntry::MachO { n_type, .. } => {
                let kind = n_type & N_TYPE;
                n_type & N_STAB == 0 && n_type & N_EXT != 0 && (kind == N_SECT || kind == N_ABS)
            }
        }
    }
}

/// A host symbol table: raw entries plus the string table their names point
/// into.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    format: SymbolFormat,
    data: Vec<u8>,
    strtab: Vec<u8>,
    check_functions: bool,
}

impl SymbolTable {
    pub fn new(format: SymbolFormat, data: Vec<u8>, strtab: Vec<u8>) -> Result<Self> {
        if data.len() % format.entry_size() != 0 {
            return Err(CtfError::InvalidArgument(format!(
                "symbol data of {} bytes is not a multiple of the {} byte entry size",
                data.len(),
                format.entry_size()
            )));
        }
        Ok(Self {
            format,
            data,
            strtab,
            check_functions: format.classifies_functions(),
        })
    }

    pub fn with_function_checks(mut self, check: bool) -> Self {
        self.check_functions = check;
        self
    }

    pub fn format(&self) -> SymbolFormat {
        self.format
    }

    pub fn checks_functions(&self) -> bool {
        self.check_functions
    }

    /// Raw entries in the table's native layout.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn strtab(&self) -> &[u8] {
        &self.strtab
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.format.entry_size()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn entry(&self, index: usize) -> Result<SymbolEntry> {
        if index >= self.len() {
            return Err(CtfError::InvalidArgument(format!(
                "symbol index {} out of range ({} symbols)",
                index,
                self.len()
            )));
        }
        let off = index * self.format.entry_size();
        let data = &self.data;

        let entry = match self.format {
            SymbolFormat::Elf32 => SymbolEntry::Elf {
                name: read_u32(data, off)?,
                value: read_u32(data, off + 4)? as u64,
                size: read_u32(data, off + 8)? as u64,
                info: data[off + 12],
                shndx: read_u16(data, off + 14)?,
            },
            SymbolFormat::Elf64 => SymbolEntry::Elf {
                name: read_u32(data, off)?,
                info: data[off + 4],
                shndx: read_u16(data, off + 6)?,
                value: read_u64(data, off + 8)?,
                size: read_u64(data, off + 16)?,
            },
            SymbolFormat::MachO32 => SymbolEntry::MachO {
                name: read_u32(data, off)?,
                n_type: data[off + 4],
                n_sect: data[off + 5],
                n_desc: read_u16(data, off + 6)?,
                value: read_u32(data, off + 8)? as u64,
            },
            SymbolFormat::MachO64 => SymbolEntry::MachO {
                name: read_u32(data, off)?,
                n_type: data[off + 4],
                n_sect: data[off + 5],
                n_desc: read_u16(data, off + 6)?,
                value: read_u64(data, off + 8)?,
            },
        };

        Ok(entry)
    }

    pub fn name(&self, entry: &SymbolEntry) -> &str {
        let off = entry.name_offset() as usize;
        let Some(tail) = self.strtab.get(off..) else {
            return "";
        };
        let len = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        std::str::from_utf8(&tail[..len]).unwrap_or("")
    }

    /// Index of the first symbol with the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        (0..self.len()).find(|&i| {
            self.entry(i)
                .map(|entry| self.name(&entry) == name)
                .unwrap_or(false)
        })
    }

    /// How the container's object and function sections account for this
    /// symbol.
    pub fn classify(&self, entry: &SymbolEntry) -> SymbolClass {
        if entry.name_offset() == 0 || !entry.is_defined() {
            return SymbolClass::Other;
        }
        let name = self.name(entry);
        if name == "_START_" || name == "_END_" {
            return SymbolClass::Other;
        }
        match entry.symbol_type() {
            STT_OBJECT => SymbolClass::Object,
            STT_FUNC => SymbolClass::Function,
            _ => SymbolClass::Other,
        }
    }
}

fn read_u64(buf: &[u8], off: usize) -> Result<u64> {
    let lo = read_u32(buf, off)? as u64;
    let hi = read_u32(buf, off + 4)? as u64;
    Ok((hi << 32) | lo)
}
