// Mon Oct 19 2026 - Alex

//! A loaded CTF container and the tables derived from it at open time.

pub mod lookup;
pub mod model;
pub mod tables;

pub use model::DataModel;
pub use tables::{LookupTable, NameSpace};

use crate::config::Config;
use crate::error::{CtfError, Result};
use crate::format::{
    codec, name_offset, name_stid, CtfHeader, Kind, Schema, TypeId, CTF_STRTAB_0, CTF_STRTAB_1,
    HEADER_SIZE,
};
use crate::symbol::SymbolTable;
use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

const BAD_STRING: &str = "(?)";

pub struct Container {
    data: Vec<u8>,
    header: CtfHeader,
    schema: Schema,
    model: DataModel,
    child: bool,
    /// Body offset of each type's header, indexed by type index. Slot 0 is
    /// unused.
    type_offsets: Vec<usize>,
    /// Index of a pointer to each type, or 0.
    ptrtab: Vec<u32>,
    lookups: Vec<LookupTable>,
    symtab: Option<SymbolTable>,
    sxlate: Vec<u32>,
    parent: Option<Arc<Container>>,
}

impl Container {
    /// Opens CTF data, building every lookup structure the queries need.
    pub fn open(data: Vec<u8>, symtab: Option<SymbolTable>, config: &Config) -> Result<Self> {
        let header = CtfHeader::parse(&data)?;
        header.validate(data.len() - HEADER_SIZE)?;
        let schema = Schema::for_version(header.version)
            .ok_or(CtfError::UnsupportedVersion(header.version))?;

        let symtab = symtab.map(|table| match config.check_function_symbols {
            Some(check) => table.with_function_checks(check),
            None => table,
        });

        let model = config.data_model.unwrap_or_else(|| {
            symtab
                .as_ref()
                .map(|table| table.format().data_model())
                .unwrap_or_default()
        });

        let mut container = Self {
            data,
            header,
            schema,
            model,
            child: header.parent_name != 0,
            type_offsets: vec![0],
            ptrtab: Vec::new(),
            lookups: LookupTable::standard_set(),
            symtab,
            sxlate: Vec::new(),
            parent: None,
        };

        container.type_offsets = container.scan_types()?;
        let (ptrtab, lookups) = container.build_tables()?;
        container.ptrtab = ptrtab;
        container.lookups = lookups;
        container.sxlate = container.build_symbol_xlate()?;

        debug!(
            "opened CTF v{} container: {} types, {} symbols, model {}{}",
            header.version,
            container.type_count(),
            container.sxlate.len(),
            container.model,
            if container.child { ", child" } else { "" }
        );

        Ok(container)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::open(data, None, &Config::default())
    }

    /// Attaches the parent whose types this child references.
    pub fn import(mut self, parent: Arc<Container>) -> Result<Self> {
        if !self.child {
            return Err(CtfError::NotChild);
        }
        if parent.model != self.model {
            return Err(CtfError::DataModelMismatch {
                parent: parent.model.to_string(),
                child: self.model.to_string(),
            });
        }
        debug!(
            "imported parent container {} into {}",
            self.parent_name().unwrap_or(BAD_STRING),
            self.type_count()
        );
        self.parent = Some(parent);
        Ok(self)
    }

    fn scan_types(&self) -> Result<Vec<usize>> {
        let body = self.body();
        let start = self.header.type_offset as usize;
        let end = self.header.string_offset as usize;
        let section = &body[..end];
        let mut offsets = vec![0];
        let mut off = start;

        while off < end {
            let rec = self.schema.decode_type(self.header.version, section, off)?;
            let next = rec.trailer() + self.schema.trailer_len(self.header.version, &rec);
            if next > end {
                return Err(CtfError::corrupt(format!(
                    "type {} at offset {} overruns the type section",
                    offsets.len(),
                    off
                )));
            }
            if offsets.len() > self.schema.max_type() as usize {
                return Err(CtfError::TooManyTypes);
            }
            offsets.push(off);
            off = next;
        }

        Ok(offsets)
    }

    fn build_tables(&self) -> Result<(Vec<u32>, Vec<LookupTable>)> {
        let mut ptrtab = vec![0u32; self.type_offsets.len()];
        let mut lookups = LookupTable::standard_set();
        let mut widths: Vec<u32> = vec![0; self.type_offsets.len()];

        for index in 1..self.type_offsets.len() {
            let rec = self.record_at(index)?;
            let id = self.schema.index_to_type(index as u32, self.child);

            if rec.kind == Kind::Pointer {
                let target = rec.referenced();
                let target_index = self.schema.type_to_index(target) as usize;
                if self.schema.is_child_type(target) == self.child && target_index < ptrtab.len() {
                    ptrtab[target_index] = index as u32;
                }
            }

            if !rec.root {
                continue;
            }
            let name = self.strptr(rec.name);
            if name.is_empty() || name == BAD_STRING {
                continue;
            }

            match rec.kind {
                Kind::Struct => lookups[0].define(name, id),
                Kind::Union => lookups[1].define(name, id),
                Kind::Enum => lookups[2].define(name, id),
                Kind::Forward => {
                    lookups[0].insert(name, id);
                }
                Kind::Integer | Kind::Float => {
                    let bits = codec::read_u32(self.body(), rec.trailer())? & 0xffff;
                    widths[index] = bits;
                    let plain = &mut lookups[3];
                    match plain.get(name) {
                        Some(prev) => {
                            let prev_index = self.schema.type_to_index(prev) as usize;
                            if widths.get(prev_index).copied().unwrap_or(0) < bits {
                                plain.define(name, id);
                            }
                        }
                        None => plain.define(name, id),
                    }
                }
                Kind::Typedef => {
                    if !lookups[3].insert(name, id) {
                        warn!("duplicate typedef {} ignored (type {})", name, id);
                    }
                }
                Kind::Unknown => {}
                _ => {
                    lookups[3].insert(name, id);
                }
            }
        }

        Ok((ptrtab, lookups))
    }

    /// Bytes following the header; all section offsets are relative to it.
    pub fn body(&self) -> &[u8] {
        &self.data[HEADER_SIZE..]
    }

    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    pub fn header(&self) -> &CtfHeader {
        &self.header
    }

    pub fn version(&self) -> u8 {
        self.header.version
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn data_model(&self) -> DataModel {
        self.model
    }

    pub fn is_child(&self) -> bool {
        self.child
    }

    pub fn parent(&self) -> Option<&Container> {
        self.parent.as_deref()
    }

    pub fn parent_arc(&self) -> Option<&Arc<Container>> {
        self.parent.as_ref()
    }

    pub fn parent_name(&self) -> Option<&str> {
        if self.header.parent_name == 0 {
            return None;
        }
        Some(self.strptr(self.header.parent_name))
    }

    pub fn parent_label(&self) -> Option<&str> {
        if self.header.parent_label == 0 {
            return None;
        }
        Some(self.strptr(self.header.parent_label))
    }

    /// Number of types defined directly in this container.
    pub fn type_count(&self) -> usize {
        self.type_offsets.len() - 1
    }

    pub fn lookups(&self) -> &[LookupTable] {
        &self.lookups
    }

    pub fn symtab(&self) -> Option<&SymbolTable> {
        self.symtab.as_ref()
    }

    pub(crate) fn sxlate(&self) -> &[u32] {
        &self.sxlate
    }

    /// Index of a pointer to the type at `index` in this container, if the
    /// container records one.
    pub(crate) fn pointer_index(&self, index: u32) -> Option<u32> {
        match self.ptrtab.get(index as usize) {
            Some(&p) if p != 0 => Some(p),
            _ => None,
        }
    }

    /// Whether `id` names a type stored in this container rather than its
    /// parent.
    pub fn owns_type(&self, id: TypeId) -> bool {
        !self.child || self.schema.is_child_type(id)
    }

    pub(crate) fn record_at(&self, index: usize) -> Result<codec::TypeRecord> {
        let off = *self.type_offsets.get(index).ok_or(CtfError::BadId)?;
        self.schema.decode_type(self.header.version, self.body(), off)
    }

    /// Resolves a name reference to a string. Unknown or malformed
    /// references read as `"(?)"`.
    pub fn strptr(&self, name: u32) -> &str {
        let offset = name_offset(name) as usize;
        let table: &[u8] = match name_stid(name) {
            CTF_STRTAB_0 => {
                let start = self.header.string_offset as usize;
                let end = start + self.header.string_length as usize;
                &self.body()[start..end]
            }
            CTF_STRTAB_1 => match &self.symtab {
                Some(symtab) => symtab.strtab(),
                None => return BAD_STRING,
            },
            _ => return BAD_STRING,
        };

        let Some(tail) = table.get(offset..) else {
            return BAD_STRING;
        };
        let len = match tail.iter().position(|&b| b == 0) {
            Some(len) => len,
            None => return BAD_STRING,
        };
        std::str::from_utf8(&tail[..len]).unwrap_or(BAD_STRING)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("version", &self.header.version)
            .field("model", &self.model)
            .field("types", &self.type_count())
            .field("child", &self.child)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
