// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::codec::read_u32;
use crate::format::{Kind, TypeId};
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Format flags of an integer encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct IntFormat: u32 {
        const SIGNED = 0x01;
        const CHAR = 0x02;
        const BOOL = 0x04;
        const VARARGS = 0x08;
    }
}

pub const CTF_FP_SINGLE: u32 = 1;
pub const CTF_FP_DOUBLE: u32 = 2;
pub const CTF_FP_CPLX: u32 = 3;
pub const CTF_FP_DCPLX: u32 = 4;
pub const CTF_FP_LDCPLX: u32 = 5;
pub const CTF_FP_LDOUBLE: u32 = 6;
pub const CTF_FP_INTRVL: u32 = 7;
pub const CTF_FP_DINTRVL: u32 = 8;
pub const CTF_FP_LDINTRVL: u32 = 9;
pub const CTF_FP_IMAGRY: u32 = 10;
pub const CTF_FP_DIMAGRY: u32 = 11;
pub const CTF_FP_LDIMAGRY: u32 = 12;

/// Encoding of an integer or floating-point type. `offset` and `bits`
/// describe a bit-field inside the storage unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Encoding {
    pub format: u32,
    pub offset: u32,
    pub bits: u32,
}

impl Encoding {
    pub fn new(format: u32, offset: u32, bits: u32) -> Self {
        Self { format, offset, bits }
    }

    pub fn int(format: IntFormat, bits: u32) -> Self {
        Self::new(format.bits(), 0, bits)
    }

    pub fn signed(bits: u32) -> Self {
        Self::int(IntFormat::SIGNED, bits)
    }

    pub fn unsigned(bits: u32) -> Self {
        Self::int(IntFormat::empty(), bits)
    }

    pub fn float(format: u32, bits: u32) -> Self {
        Self::new(format, 0, bits)
    }

    pub fn int_format(&self) -> IntFormat {
        IntFormat::from_bits_truncate(self.format)
    }

    pub fn from_word(word: u32) -> Self {
        Self {
            format: (word >> 24) & 0xff,
            offset: (word >> 16) & 0xff,
            bits: word & 0xffff,
        }
    }

    pub fn to_word(&self) -> u32 {
        ((self.format & 0xff) << 24) | ((self.offset & 0xff) << 16) | (self.bits & 0xffff)
    }
}

/// Pointer authentication schema carried by a ptrauth qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PtrauthInfo {
    pub key: u8,
    pub discriminated: bool,
    pub discriminator: u16,
}

impl PtrauthInfo {
    pub fn from_word(word: u32) -> Self {
        Self {
            key: (word & 0xf) as u8,
            discriminated: (word >> 4) & 1 != 0,
            discriminator: ((word >> 16) & 0xffff) as u16,
        }
    }

    pub fn to_word(&self) -> u32 {
        (self.key as u32 & 0xf)
            | ((self.discriminated as u32) << 4)
            | ((self.discriminator as u32) << 16)
    }
}

impl Container {
    /// Encoding of an integer or float. Aliases are not followed.
    pub fn encoding(&self, id: TypeId) -> Result<Encoding> {
        let (owner, rec) = self.lookup_by_id(id)?;
        match rec.kind {
            Kind::Integer | Kind::Float => {
                Ok(Encoding::from_word(read_u32(owner.body(), rec.trailer())?))
            }
            _ => Err(CtfError::NotIntOrFloat),
        }
    }

    pub fn ptrauth(&self, id: TypeId) -> Result<PtrauthInfo> {
        let (owner, rec) = self.lookup_by_id(id)?;
        match rec.kind {
            Kind::Ptrauth => Ok(PtrauthInfo::from_word(read_u32(owner.body(), rec.trailer())?)),
            _ => Err(CtfError::NotPtrauth),
        }
    }
}
