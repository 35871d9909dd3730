// Mon Oct 19 2026 - Alex

//! On-disk layout of CTF data.
//!
//! Two record schemas exist: the narrow schema used by versions 1 through 3
//! (16-bit type references) and the wide schema introduced with version 4
//! (32-bit references throughout). Everything that depends on that choice
//! goes through [`Schema`].

pub mod codec;
pub mod header;

pub use codec::{ArrayRecord, MemberLayout, RawMember, TypeRecord};
pub use header::{CtfHeader, HEADER_SIZE};

use serde::{Deserialize, Serialize};
use std::fmt;

pub const CTF_MAGIC: u16 = 0xcff1;

pub const CTF_VERSION_1: u8 = 1;
pub const CTF_VERSION_2: u8 = 2;
pub const CTF_VERSION_3: u8 = 3;
pub const CTF_VERSION_4: u8 = 4;

pub const CTF_F_COMPRESS: u8 = 0x1;

/// Struct and union records at or above this size use long member records.
pub const CTF_LSTRUCT_THRESH: u64 = 8192;

/// Translation slot value for symbols that carry no type data.
pub const SXLATE_NONE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Unknown,
    Integer,
    Float,
    Pointer,
    Array,
    Function,
    Struct,
    Union,
    Enum,
    Forward,
    Typedef,
    Volatile,
    Const,
    Restrict,
    Ptrauth,
}

impl Kind {
    pub fn from_raw(raw: u32) -> Option<Self> {
        let kind = match raw {
            0 => Kind::Unknown,
            1 => Kind::Integer,
            2 => Kind::Float,
            3 => Kind::Pointer,
            4 => Kind::Array,
            5 => Kind::Function,
            6 => Kind::Struct,
            7 => Kind::Union,
            8 => Kind::Enum,
            9 => Kind::Forward,
            10 => Kind::Typedef,
            11 => Kind::Volatile,
            12 => Kind::Const,
            13 => Kind::Restrict,
            14 => Kind::Ptrauth,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_raw(self) -> u32 {
        match self {
            Kind::Unknown => 0,
            Kind::Integer => 1,
            Kind::Float => 2,
            Kind::Pointer => 3,
            Kind::Array => 4,
            Kind::Function => 5,
            Kind::Struct => 6,
            Kind::Union => 7,
            Kind::Enum => 8,
            Kind::Forward => 9,
            Kind::Typedef => 10,
            Kind::Volatile => 11,
            Kind::Const => 12,
            Kind::Restrict => 13,
            Kind::Ptrauth => 14,
        }
    }

    /// Kinds the graph resolver walks through.
    pub fn is_alias(self) -> bool {
        matches!(
            self,
            Kind::Typedef | Kind::Volatile | Kind::Const | Kind::Restrict
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Unknown => "unknown",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Pointer => "pointer",
            Kind::Array => "array",
            Kind::Function => "function",
            Kind::Struct => "struct",
            Kind::Union => "union",
            Kind::Enum => "enum",
            Kind::Forward => "forward",
            Kind::Typedef => "typedef",
            Kind::Volatile => "volatile",
            Kind::Const => "const",
            Kind::Restrict => "restrict",
            Kind::Ptrauth => "ptrauth",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque handle for a type inside a container.
///
/// The high bit (whose position depends on the schema) marks a type that
/// lives in a child container; the remaining bits are the type index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const NONE: TypeId = TypeId(0);

    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TypeId {
    fn from(raw: u32) -> Self {
        TypeId(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Schema {
    /// Versions 1-3: 16-bit type references and member offsets.
    Narrow,
    /// Version 4: 32-bit fields.
    Wide,
}

impl Schema {
    pub fn for_version(version: u8) -> Option<Self> {
        match version {
            CTF_VERSION_1 | CTF_VERSION_2 | CTF_VERSION_3 => Some(Schema::Narrow),
            CTF_VERSION_4 => Some(Schema::Wide),
            _ => None,
        }
    }

    pub fn child_flag(self) -> u32 {
        match self {
            Schema::Narrow => 0x8000,
            Schema::Wide => 0x8000_0000,
        }
    }

    pub fn max_type(self) -> u32 {
        self.child_flag() - 1
    }

    pub fn type_to_index(self, id: TypeId) -> u32 {
        id.0 & self.max_type()
    }

    pub fn index_to_type(self, index: u32, child: bool) -> TypeId {
        if child {
            TypeId(index | self.child_flag())
        } else {
            TypeId(index)
        }
    }

    pub fn is_parent_type(self, id: TypeId) -> bool {
        id.0 & self.child_flag() == 0
    }

    pub fn is_child_type(self, id: TypeId) -> bool {
        !self.is_parent_type(id)
    }

    /// Width in bytes of a type reference in symbol data, function
    /// arguments and narrow arrays.
    pub fn id_size(self) -> usize {
        match self {
            Schema::Narrow => 2,
            Schema::Wide => 4,
        }
    }

    pub fn lsize_sentinel(self) -> u32 {
        match self {
            Schema::Narrow => 0xffff,
            Schema::Wide => 0xffff_ffff,
        }
    }

    pub fn max_size(self) -> u32 {
        self.lsize_sentinel() - 1
    }

    pub fn max_vlen(self) -> u32 {
        match self {
            Schema::Narrow => 0x3ff,
            Schema::Wide => 0x00ff_ffff,
        }
    }

    /// Size of the fixed header for the short and long size encodings.
    pub fn header_sizes(self) -> (usize, usize) {
        match self {
            Schema::Narrow => (8, 16),
            Schema::Wide => (12, 20),
        }
    }

    pub fn info_kind(self, info: u32) -> u32 {
        match self {
            Schema::Narrow => (info & 0xf800) >> 11,
            Schema::Wide => (info & 0xfc00_0000) >> 26,
        }
    }

    pub fn info_is_root(self, info: u32) -> bool {
        match self {
            Schema::Narrow => (info & 0x0400) != 0,
            Schema::Wide => (info & 0x0200_0000) != 0,
        }
    }

    pub fn info_vlen(self, info: u32) -> u32 {
        info & self.max_vlen()
    }

    pub fn make_info(self, kind: Kind, root: bool, vlen: u32) -> u32 {
        let root = root as u32;
        match self {
            Schema::Narrow => (kind.as_raw() << 11) | (root << 10) | (vlen & 0x3ff),
            Schema::Wide => (kind.as_raw() << 26) | (root << 25) | (vlen & 0x00ff_ffff),
        }
    }
}

/// Which string table a name reference points into.
pub const CTF_STRTAB_0: u32 = 0;
pub const CTF_STRTAB_1: u32 = 1;

pub fn name_stid(name: u32) -> u32 {
    name >> 31
}

pub fn name_offset(name: u32) -> u32 {
    name & 0x7fff_ffff
}
