// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CtfError {
    #[error("Type not found")]
    NotFound,
    #[error("Syntax error in type name")]
    Syntax,
    #[error("Invalid type identifier")]
    BadId,
    #[error("Type belongs to a parent container that is not attached")]
    NoParent,
    #[error("Corrupt CTF data: {0}")]
    Corrupt(String),
    #[error("Type is not a struct or union")]
    NotStructOrUnion,
    #[error("Type is not an array")]
    NotArray,
    #[error("Type is not an enum")]
    NotEnum,
    #[error("Type is not an integer or floating-point type")]
    NotIntOrFloat,
    #[error("Type is not a pointer authentication qualifier")]
    NotPtrauth,
    #[error("Type does not reference another type")]
    NotReferenceable,
    #[error("Container has no symbol table")]
    NoSymtab,
    #[error("Symbol is not a data object")]
    NotData,
    #[error("Symbol is not a function")]
    NotFunction,
    #[error("No type information recorded for symbol")]
    NoTypeForSymbol,
    #[error("Name buffer too small: {required} bytes required")]
    NameTooLong { required: usize },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Bad CTF magic: {0:#06x}")]
    BadMagic(u16),
    #[error("Unsupported CTF version: {0}")]
    UnsupportedVersion(u8),
    #[error("Not supported: {0}")]
    Unsupported(String),
    #[error("Truncated CTF data: {0}")]
    Truncated(String),
    #[error("Too many types for this format version")]
    TooManyTypes,
    #[error("Container does not name a parent")]
    NotChild,
    #[error("Parent data model {parent} does not match child data model {child}")]
    DataModelMismatch { parent: String, child: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Object file error: {0}")]
    Object(String),
}

impl CtfError {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        CtfError::Corrupt(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CtfError>;
