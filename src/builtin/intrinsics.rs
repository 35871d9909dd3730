// Mon Oct 19 2026 - Alex

//! Intrinsic C types and the `<sys/types.h>` style typedefs layered on
//! them, per data model.

use crate::container::DataModel;
use crate::format::Kind;
use crate::structure::encoding::{
    CTF_FP_CPLX, CTF_FP_DCPLX, CTF_FP_DIMAGRY, CTF_FP_DOUBLE, CTF_FP_IMAGRY, CTF_FP_LDCPLX,
    CTF_FP_LDIMAGRY, CTF_FP_LDOUBLE, CTF_FP_SINGLE,
};
use crate::structure::{Encoding, IntFormat};

const SIGNED: u32 = IntFormat::SIGNED.bits();
const CHAR: u32 = IntFormat::CHAR.bits();
const BOOL: u32 = IntFormat::BOOL.bits();

#[derive(Debug, Clone, Copy)]
pub struct Intrinsic {
    pub name: &'static str,
    pub kind: Kind,
    pub format: u32,
    pub bits: u32,
}

impl Intrinsic {
    const fn int(name: &'static str, format: u32, bits: u32) -> Self {
        Self {
            name,
            kind: Kind::Integer,
            format,
            bits,
        }
    }

    const fn float(name: &'static str, format: u32, bits: u32) -> Self {
        Self {
            name,
            kind: Kind::Float,
            format,
            bits,
        }
    }

    pub fn encoding(&self) -> Encoding {
        Encoding::new(self.format, 0, self.bits)
    }
}

/// `typedef source name;`
#[derive(Debug, Clone, Copy)]
pub struct TypedefDesc {
    pub source: &'static str,
    pub name: &'static str,
}

const fn td(source: &'static str, name: &'static str) -> TypedefDesc {
    TypedefDesc { source, name }
}

static FLOATS: [Intrinsic; 9] = [
    Intrinsic::float("float", CTF_FP_SINGLE, 32),
    Intrinsic::float("double", CTF_FP_DOUBLE, 64),
    Intrinsic::float("long double", CTF_FP_LDOUBLE, 128),
    Intrinsic::float("float imaginary", CTF_FP_IMAGRY, 32),
    Intrinsic::float("double imaginary", CTF_FP_DIMAGRY, 64),
    Intrinsic::float("long double imaginary", CTF_FP_LDIMAGRY, 128),
    Intrinsic::float("float complex", CTF_FP_CPLX, 64),
    Intrinsic::float("double complex", CTF_FP_DCPLX, 128),
    Intrinsic::float("long double complex", CTF_FP_LDCPLX, 256),
];

const fn integers(long_bits: u32) -> [Intrinsic; 19] {
    [
        Intrinsic::int("void", SIGNED, 0),
        Intrinsic::int("signed", SIGNED, 32),
        Intrinsic::int("unsigned", 0, 32),
        Intrinsic::int("char", SIGNED | CHAR, 8),
        Intrinsic::int("short", SIGNED, 16),
        Intrinsic::int("int", SIGNED, 32),
        Intrinsic::int("long", SIGNED, long_bits),
        Intrinsic::int("long long", SIGNED, 64),
        Intrinsic::int("signed char", SIGNED | CHAR, 8),
        Intrinsic::int("signed short", SIGNED, 16),
        Intrinsic::int("signed int", SIGNED, 32),
        Intrinsic::int("signed long", SIGNED, long_bits),
        Intrinsic::int("signed long long", SIGNED, 64),
        Intrinsic::int("unsigned char", CHAR, 8),
        Intrinsic::int("unsigned short", 0, 16),
        Intrinsic::int("unsigned int", 0, 32),
        Intrinsic::int("unsigned long", 0, long_bits),
        Intrinsic::int("unsigned long long", 0, 64),
        Intrinsic::int("_Bool", BOOL, 8),
    ]
}

static INTEGERS_32: [Intrinsic; 19] = integers(32);
static INTEGERS_64: [Intrinsic; 19] = integers(64);

static TYPEDEFS_32: [TypedefDesc; 20] = [
    td("char", "int8_t"),
    td("short", "int16_t"),
    td("int", "int32_t"),
    td("long long", "int64_t"),
    td("int", "intptr_t"),
    td("int", "ssize_t"),
    td("unsigned char", "uint8_t"),
    td("unsigned short", "uint16_t"),
    td("unsigned", "uint32_t"),
    td("unsigned long long", "uint64_t"),
    td("unsigned char", "uchar_t"),
    td("unsigned short", "ushort_t"),
    td("unsigned", "uint_t"),
    td("unsigned long", "ulong_t"),
    td("unsigned long long", "u_longlong_t"),
    td("int", "ptrdiff_t"),
    td("unsigned", "uintptr_t"),
    td("unsigned", "size_t"),
    td("unsigned long long", "id_t"),
    td("long", "pid_t"),
];

static TYPEDEFS_64: [TypedefDesc; 20] = [
    td("char", "int8_t"),
    td("short", "int16_t"),
    td("int", "int32_t"),
    td("long", "int64_t"),
    td("long", "intptr_t"),
    td("long", "ssize_t"),
    td("unsigned char", "uint8_t"),
    td("unsigned short", "uint16_t"),
    td("unsigned", "uint32_t"),
    td("unsigned long", "uint64_t"),
    td("unsigned char", "uchar_t"),
    td("unsigned short", "ushort_t"),
    td("unsigned", "uint_t"),
    td("unsigned long", "ulong_t"),
    td("unsigned long long", "u_longlong_t"),
    td("long", "ptrdiff_t"),
    td("unsigned long", "uintptr_t"),
    td("unsigned long", "size_t"),
    td("unsigned long long", "id_t"),
    td("int", "pid_t"),
];

/// Integer then floating-point intrinsics for the model.
pub fn intrinsics(model: DataModel) -> impl Iterator<Item = &'static Intrinsic> {
    let ints: &'static [Intrinsic] = match model {
        DataModel::Ilp32 => &INTEGERS_32,
        DataModel::Lp64 => &INTEGERS_64,
    };
    ints.iter().chain(FLOATS.iter())
}

pub fn typedefs(model: DataModel) -> &'static [TypedefDesc] {
    match model {
        DataModel::Ilp32 => &TYPEDEFS_32,
        DataModel::Lp64 => &TYPEDEFS_64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_follows_model() {
        let long32 = intrinsics(DataModel::Ilp32).find(|i| i.name == "long").unwrap();
        let long64 = intrinsics(DataModel::Lp64).find(|i| i.name == "long").unwrap();
        assert_eq!(long32.bits, 32);
        assert_eq!(long64.bits, 64);
    }

    #[test]
    fn test_typedef_sources_exist() {
        for model in [DataModel::Ilp32, DataModel::Lp64] {
            for def in typedefs(model) {
                assert!(
                    intrinsics(model).any(|i| i.name == def.source),
                    "{} has no source {}",
                    def.name,
                    def.source
                );
            }
        }
    }
}
