// Mon Oct 19 2026 - Alex

//! Record decoding.
//!
//! Every type record starts with a fixed header followed by a kind-specific
//! trailer. The header is decoded into an owned [`TypeRecord`]; trailers are
//! decoded on demand. Struct and union members come in four shapes selected
//! by (schema, size class) through a single table.

use crate::error::{CtfError, Result};
use crate::format::{Kind, Schema, TypeId, CTF_LSTRUCT_THRESH, CTF_VERSION_1};

pub fn read_u16(buf: &[u8], off: usize) -> Result<u16> {
    buf.get(off..off + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| CtfError::corrupt(format!("read of 2 bytes at {} out of bounds", off)))
}

pub fn read_u32(buf: &[u8], off: usize) -> Result<u32> {
    buf.get(off..off + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| CtfError::corrupt(format!("read of 4 bytes at {} out of bounds", off)))
}

pub fn read_i32(buf: &[u8], off: usize) -> Result<i32> {
    Ok(read_u32(buf, off)? as i32)
}

/// Decoded fixed header of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRecord {
    /// Byte offset of the header inside the container body.
    pub offset: usize,
    pub name: u32,
    pub info: u32,
    pub kind: Kind,
    pub root: bool,
    pub vlen: u32,
    /// The raw size-or-type word: a size for sized kinds, a type reference
    /// for pointers, qualifiers, typedefs and functions.
    pub size_or_type: u32,
    /// Effective size, taken from the long size words when the sentinel is
    /// present.
    pub size: u64,
    pub increment: usize,
}

impl TypeRecord {
    pub fn trailer(&self) -> usize {
        self.offset + self.increment
    }

    pub fn referenced(&self) -> TypeId {
        TypeId(self.size_or_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMember {
    pub name: u32,
    pub type_id: TypeId,
    pub offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEnumerator {
    pub name: u32,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayRecord {
    pub contents: TypeId,
    pub index: TypeId,
    pub nelems: u32,
}

pub struct MemberLayout {
    pub stride: usize,
    decode: fn(&[u8], usize) -> Result<RawMember>,
}

impl MemberLayout {
    pub fn decode(&self, buf: &[u8], off: usize) -> Result<RawMember> {
        (self.decode)(buf, off)
    }
}

fn narrow_member(buf: &[u8], off: usize) -> Result<RawMember> {
    Ok(RawMember {
        name: read_u32(buf, off)?,
        type_id: TypeId(read_u16(buf, off + 4)? as u32),
        offset: read_u16(buf, off + 6)? as u64,
    })
}

fn narrow_lmember(buf: &[u8], off: usize) -> Result<RawMember> {
    let hi = read_u32(buf, off + 8)? as u64;
    let lo = read_u32(buf, off + 12)? as u64;
    Ok(RawMember {
        name: read_u32(buf, off)?,
        type_id: TypeId(read_u16(buf, off + 4)? as u32),
        offset: (hi << 32) | lo,
    })
}

fn wide_member(buf: &[u8], off: usize) -> Result<RawMember> {
    Ok(RawMember {
        name: read_u32(buf, off)?,
        type_id: TypeId(read_u32(buf, off + 4)?),
        offset: read_u32(buf, off + 8)? as u64,
    })
}

fn wide_lmember(buf: &[u8], off: usize) -> Result<RawMember> {
    let hi = read_u32(buf, off + 8)? as u64;
    let lo = read_u32(buf, off + 12)? as u64;
    Ok(RawMember {
        name: read_u32(buf, off)?,
        type_id: TypeId(read_u32(buf, off + 4)?),
        offset: (hi << 32) | lo,
    })
}

// Indexed by [schema][long].
static MEMBER_LAYOUTS: [[MemberLayout; 2]; 2] = [
    [
        MemberLayout { stride: 8, decode: narrow_member },
        MemberLayout { stride: 16, decode: narrow_lmember },
    ],
    [
        MemberLayout { stride: 12, decode: wide_member },
        MemberLayout { stride: 16, decode: wide_lmember },
    ],
];

pub const ENUM_STRIDE: usize = 8;

/// Whether a struct or union of the given declared size stores long member
/// records.
pub fn uses_long_members(version: u8, size: u64) -> bool {
    version != CTF_VERSION_1 && size >= CTF_LSTRUCT_THRESH
}

impl Schema {
    fn table_row(self) -> usize {
        match self {
            Schema::Narrow => 0,
            Schema::Wide => 1,
        }
    }

    pub fn member_layout(self, version: u8, size: u64) -> &'static MemberLayout {
        &MEMBER_LAYOUTS[self.table_row()][uses_long_members(version, size) as usize]
    }

    pub fn decode_type(self, version: u8, buf: &[u8], off: usize) -> Result<TypeRecord> {
        let (short, long) = self.header_sizes();
        let name = read_u32(buf, off)?;
        let (info, size_or_type) = match self {
            Schema::Narrow => (read_u16(buf, off + 4)? as u32, read_u16(buf, off + 6)? as u32),
            Schema::Wide => (read_u32(buf, off + 4)?, read_u32(buf, off + 8)?),
        };

        let (size, increment) =
            if version > CTF_VERSION_1 && size_or_type == self.lsize_sentinel() {
                let hi = read_u32(buf, off + short)? as u64;
                let lo = read_u32(buf, off + short + 4)? as u64;
                ((hi << 32) | lo, long)
            } else {
                (size_or_type as u64, short)
            };

        let raw_kind = self.info_kind(info);
        let kind = Kind::from_raw(raw_kind).ok_or_else(|| {
            CtfError::corrupt(format!("unknown kind {} at offset {}", raw_kind, off))
        })?;

        Ok(TypeRecord {
            offset: off,
            name,
            info,
            kind,
            root: self.info_is_root(info),
            vlen: self.info_vlen(info),
            size_or_type,
            size,
            increment,
        })
    }

    /// Number of trailer bytes following the fixed header.
    pub fn trailer_len(self, version: u8, rec: &TypeRecord) -> usize {
        let vlen = rec.vlen as usize;
        match rec.kind {
            Kind::Integer | Kind::Float | Kind::Ptrauth => 4,
            Kind::Array => match self {
                Schema::Narrow => 8,
                Schema::Wide => 12,
            },
            Kind::Function => match self {
                Schema::Narrow => 2 * (vlen + (vlen & 1)),
                Schema::Wide => 4 * vlen,
            },
            Kind::Struct | Kind::Union => vlen * self.member_layout(version, rec.size).stride,
            Kind::Enum => vlen * ENUM_STRIDE,
            Kind::Unknown
            | Kind::Forward
            | Kind::Pointer
            | Kind::Typedef
            | Kind::Volatile
            | Kind::Const
            | Kind::Restrict => 0,
        }
    }

    pub fn read_id(self, buf: &[u8], off: usize) -> Result<TypeId> {
        match self {
            Schema::Narrow => Ok(TypeId(read_u16(buf, off)? as u32)),
            Schema::Wide => Ok(TypeId(read_u32(buf, off)?)),
        }
    }

    pub fn decode_array(self, buf: &[u8], off: usize) -> Result<ArrayRecord> {
        match self {
            Schema::Narrow => Ok(ArrayRecord {
                contents: TypeId(read_u16(buf, off)? as u32),
                index: TypeId(read_u16(buf, off + 2)? as u32),
                nelems: read_u32(buf, off + 4)?,
            }),
            Schema::Wide => Ok(ArrayRecord {
                contents: TypeId(read_u32(buf, off)?),
                index: TypeId(read_u32(buf, off + 4)?),
                nelems: read_u32(buf, off + 8)?,
            }),
        }
    }

    pub fn members<'a>(self, version: u8, buf: &'a [u8], rec: &TypeRecord) -> Members<'a> {
        Members {
            buf,
            layout: self.member_layout(version, rec.size),
            next: rec.trailer(),
            remaining: rec.vlen,
        }
    }

    /// Reads `count` consecutive type IDs, such as the arguments of a
    /// function record.
    pub fn read_id_list(self, buf: &[u8], off: usize, count: usize) -> Result<Vec<TypeId>> {
        let step = self.id_size();
        (0..count).map(|i| self.read_id(buf, off + i * step)).collect()
    }
}

pub fn enumerators<'a>(buf: &'a [u8], rec: &TypeRecord) -> Enumerators<'a> {
    Enumerators {
        buf,
        next: rec.trailer(),
        remaining: rec.vlen,
    }
}

pub struct Members<'a> {
    buf: &'a [u8],
    layout: &'static MemberLayout,
    next: usize,
    remaining: u32,
}

impl<'a> Iterator for Members<'a> {
    type Item = Result<RawMember>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let member = self.layout.decode(self.buf, self.next);
        self.next += self.layout.stride;
        if member.is_err() {
            self.remaining = 0;
        }
        Some(member)
    }
}

pub struct Enumerators<'a> {
    buf: &'a [u8],
    next: usize,
    remaining: u32,
}

impl<'a> Iterator for Enumerators<'a> {
    type Item = Result<RawEnumerator>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let off = self.next;
        self.next += ENUM_STRIDE;
        let entry = read_u32(self.buf, off).and_then(|name| {
            Ok(RawEnumerator {
                name,
                value: read_i32(self.buf, off + 4)?,
            })
        });
        if entry.is_err() {
            self.remaining = 0;
        }
        Some(entry)
    }
}
