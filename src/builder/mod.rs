// Mon Oct 19 2026 - Alex

//! Writers for CTF containers and host symbol tables.
//!
//! [`ContainerBuilder`] emits either record schema depending on the format
//! version it is created with, picking the long size and long member
//! encodings whenever a value does not fit the short ones.

pub mod strings;
pub mod symtab;

pub use strings::StringTable;
pub use symtab::SymtabBuilder;

use crate::config::Config;
use crate::container::Container;
use crate::error::Result;
use crate::format::codec::uses_long_members;
use crate::format::{
    CtfHeader, Kind, Schema, TypeId, CTF_MAGIC, CTF_VERSION_1, CTF_VERSION_4, HEADER_SIZE,
};
use crate::structure::{Encoding, PtrauthInfo};
use crate::symbol::SymbolTable;

enum SizeOrType {
    Size(u64),
    Type(TypeId),
}

pub struct ContainerBuilder {
    version: u8,
    schema: Schema,
    child: bool,
    parent_name: u32,
    parent_label: u32,
    strings: StringTable,
    count: u32,
    types: Vec<u8>,
    objects: Vec<u8>,
    functions: Vec<u8>,
}

impl ContainerBuilder {
    /// A builder for a standalone container. Versions outside 1-4 fall back
    /// to version 4.
    pub fn new(version: u8) -> Self {
        let (version, schema) = match Schema::for_version(version) {
            Some(schema) => (version, schema),
            None => (CTF_VERSION_4, Schema::Wide),
        };
        Self {
            version,
            schema,
            child: false,
            parent_name: 0,
            parent_label: 0,
            strings: StringTable::new(),
            count: 0,
            types: Vec::new(),
            objects: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// A builder for a child container whose types are numbered in the child
    /// range and which names `parent_name` as its parent.
    pub fn child(version: u8, parent_name: &str) -> Self {
        let mut builder = Self::new(version);
        builder.child = true;
        builder.parent_name = builder.strings.add(parent_name);
        builder
    }

    pub fn with_parent_label(mut self, label: &str) -> Self {
        self.parent_label = self.strings.add(label);
        self
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// The ID the next `add_*` call will return. Needed to build
    /// self-referencing types.
    pub fn next_id(&self) -> TypeId {
        self.schema.index_to_type(self.count + 1, self.child)
    }

    fn put_u16(&mut self, value: u16) {
        self.types.extend_from_slice(&value.to_le_bytes());
    }

    fn put_u32(&mut self, value: u32) {
        self.types.extend_from_slice(&value.to_le_bytes());
    }

    fn put_id(&mut self, id: TypeId) {
        match self.schema {
            Schema::Narrow => self.put_u16(id.raw() as u16),
            Schema::Wide => self.put_u32(id.raw()),
        }
    }

    fn put_header(
        &mut self,
        name: &str,
        kind: Kind,
        root: bool,
        vlen: u32,
        word: SizeOrType,
    ) -> TypeId {
        let name = self.strings.add(name);
        let info = self.schema.make_info(kind, root, vlen);
        self.put_u32(name);

        let (raw, long) = match word {
            SizeOrType::Type(id) => (id.raw(), None),
            SizeOrType::Size(size)
                if self.version > CTF_VERSION_1 && size > self.schema.max_size() as u64 =>
            {
                (self.schema.lsize_sentinel(), Some(size))
            }
            SizeOrType::Size(size) => (size as u32, None),
        };

        match self.schema {
            Schema::Narrow => {
                self.put_u16(info as u16);
                self.put_u16(raw as u16);
            }
            Schema::Wide => {
                self.put_u32(info);
                self.put_u32(raw);
            }
        }
        if let Some(size) = long {
            self.put_u32((size >> 32) as u32);
            self.put_u32(size as u32);
        }

        self.count += 1;
        self.schema.index_to_type(self.count, self.child)
    }

    pub fn add_integer(&mut self, name: &str, encoding: Encoding, root: bool) -> TypeId {
        let size = (encoding.bits as u64).div_ceil(8);
        let id = self.put_header(name, Kind::Integer, root, 0, SizeOrType::Size(size));
        self.put_u32(encoding.to_word());
        id
    }

    pub fn add_float(&mut self, name: &str, encoding: Encoding, root: bool) -> TypeId {
        let size = (encoding.bits as u64).div_ceil(8);
        let id = self.put_header(name, Kind::Float, root, 0, SizeOrType::Size(size));
        self.put_u32(encoding.to_word());
        id
    }

    pub fn add_pointer(&mut self, target: TypeId, root: bool) -> TypeId {
        self.put_header("", Kind::Pointer, root, 0, SizeOrType::Type(target))
    }

    pub fn add_ptrauth(&mut self, target: TypeId, info: PtrauthInfo, root: bool) -> TypeId {
        let id = self.put_header("", Kind::Ptrauth, root, 0, SizeOrType::Type(target));
        self.put_u32(info.to_word());
        id
    }

    /// An array whose stored size is left 0, so its size is computed from
    /// the element type.
    pub fn add_array(
        &mut self,
        contents: TypeId,
        index: TypeId,
        nelems: u32,
        root: bool,
    ) -> TypeId {
        self.add_sized_array(contents, index, nelems, 0, root)
    }

    pub fn add_sized_array(
        &mut self,
        contents: TypeId,
        index: TypeId,
        nelems: u32,
        size: u64,
        root: bool,
    ) -> TypeId {
        let id = self.put_header("", Kind::Array, root, 0, SizeOrType::Size(size));
        self.put_id(contents);
        self.put_id(index);
        self.put_u32(nelems);
        id
    }

    /// A function type. With `varargs` a trailing 0 argument is recorded.
    pub fn add_function(
        &mut self,
        ret: TypeId,
        args: &[TypeId],
        varargs: bool,
        root: bool,
    ) -> TypeId {
        let mut list = args.to_vec();
        if varargs {
            list.push(TypeId::NONE);
        }
        let vlen = list.len() as u32;
        let id = self.put_header("", Kind::Function, root, vlen, SizeOrType::Type(ret));
        for arg in &list {
            self.put_id(*arg);
        }
        if self.schema == Schema::Narrow && list.len() % 2 == 1 {
            self.put_u16(0);
        }
        id
    }

    fn add_aggregate(
        &mut self,
        kind: Kind,
        name: &str,
        size: u64,
        members: &[(&str, TypeId, u64)],
        root: bool,
    ) -> TypeId {
        let id = self.put_header(name, kind, root, members.len() as u32, SizeOrType::Size(size));
        let long = uses_long_members(self.version, size);

        for &(member, type_id, offset) in members {
            let name = self.strings.add(member);
            self.put_u32(name);
            self.put_id(type_id);
            match (self.schema, long) {
                (Schema::Narrow, false) => self.put_u16(offset as u16),
                (Schema::Wide, false) => self.put_u32(offset as u32),
                (schema, true) => {
                    if schema == Schema::Narrow {
                        self.put_u16(0);
                    }
                    self.put_u32((offset >> 32) as u32);
                    self.put_u32(offset as u32);
                }
            }
        }
        id
    }

    /// A struct. Member offsets are in bits.
    pub fn add_struct(
        &mut self,
        name: &str,
        size: u64,
        members: &[(&str, TypeId, u64)],
        root: bool,
    ) -> TypeId {
        self.add_aggregate(Kind::Struct, name, size, members, root)
    }

    pub fn add_union(
        &mut self,
        name: &str,
        size: u64,
        members: &[(&str, TypeId, u64)],
        root: bool,
    ) -> TypeId {
        self.add_aggregate(Kind::Union, name, size, members, root)
    }

    pub fn add_enum(
        &mut self,
        name: &str,
        size: u64,
        values: &[(&str, i32)],
        root: bool,
    ) -> TypeId {
        let vlen = values.len() as u32;
        let id = self.put_header(name, Kind::Enum, root, vlen, SizeOrType::Size(size));
        for &(entry, value) in values {
            let name = self.strings.add(entry);
            self.put_u32(name);
            self.put_u32(value as u32);
        }
        id
    }

    pub fn add_forward(&mut self, name: &str, root: bool) -> TypeId {
        self.put_header(name, Kind::Forward, root, 0, SizeOrType::Size(0))
    }

    pub fn add_typedef(&mut self, name: &str, target: TypeId, root: bool) -> TypeId {
        self.put_header(name, Kind::Typedef, root, 0, SizeOrType::Type(target))
    }

    pub fn add_volatile(&mut self, target: TypeId, root: bool) -> TypeId {
        self.put_header("", Kind::Volatile, root, 0, SizeOrType::Type(target))
    }

    pub fn add_const(&mut self, target: TypeId, root: bool) -> TypeId {
        self.put_header("", Kind::Const, root, 0, SizeOrType::Type(target))
    }

    pub fn add_restrict(&mut self, target: TypeId, root: bool) -> TypeId {
        self.put_header("", Kind::Restrict, root, 0, SizeOrType::Type(target))
    }

    fn put_symbol_id(section: &mut Vec<u8>, schema: Schema, id: u32) {
        match schema {
            Schema::Narrow => section.extend_from_slice(&(id as u16).to_le_bytes()),
            Schema::Wide => section.extend_from_slice(&id.to_le_bytes()),
        }
    }

    /// Records the type of the next data object symbol. Object and function
    /// records must be added in symbol table order.
    pub fn add_object_symbol(&mut self, id: TypeId) {
        Self::put_symbol_id(&mut self.objects, self.schema, id.raw());
    }

    pub fn add_function_symbol(&mut self, ret: TypeId, args: &[TypeId], varargs: bool) {
        let vlen = args.len() as u32 + varargs as u32;
        let info = self.schema.make_info(Kind::Function, false, vlen);
        Self::put_symbol_id(&mut self.functions, self.schema, info);
        Self::put_symbol_id(&mut self.functions, self.schema, ret.raw());
        for arg in args {
            Self::put_symbol_id(&mut self.functions, self.schema, arg.raw());
        }
        if varargs {
            Self::put_symbol_id(&mut self.functions, self.schema, 0);
        }
    }

    /// A function symbol for which nothing is known.
    pub fn add_unknown_symbol(&mut self) {
        Self::put_symbol_id(&mut self.functions, self.schema, 0);
    }

    pub fn type_count(&self) -> u32 {
        self.count
    }

    pub fn build(&self) -> Vec<u8> {
        let function_offset = self.objects.len() as u32;
        let type_offset = function_offset + self.functions.len() as u32;
        let string_offset = type_offset + self.types.len() as u32;
        let strings = self.strings.as_bytes();

        let header = CtfHeader {
            magic: CTF_MAGIC,
            version: self.version,
            flags: 0,
            parent_label: self.parent_label,
            parent_name: self.parent_name,
            label_offset: 0,
            object_offset: 0,
            function_offset,
            type_offset,
            string_offset,
            string_length: strings.len() as u32,
        };

        let mut out = Vec::with_capacity(HEADER_SIZE + string_offset as usize + strings.len());
        header.write(&mut out);
        out.extend_from_slice(&self.objects);
        out.extend_from_slice(&self.functions);
        out.extend_from_slice(&self.types);
        out.extend_from_slice(strings);
        out
    }

    pub fn open(&self, symtab: Option<SymbolTable>, config: &Config) -> Result<Container> {
        Container::open(self.build(), symtab, config)
    }
}
