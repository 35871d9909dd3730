// Mon Oct 19 2026 - Alex

//! Decoder and query engine for Compact C Type Format (CTF) type data.
//!
//! A [`Container`] is opened from the raw bytes of a CTF section, optionally
//! together with the host object's symbol table, and answers questions about
//! the C types it describes: name lookup, alias resolution, sizes and
//! alignment, struct layout, enum values, declarations, type compatibility
//! and the types of data and function symbols.

pub mod builder;
pub mod builtin;
pub mod cli;
pub mod config;
pub mod container;
pub mod decl;
pub mod error;
pub mod format;
pub mod names;
pub mod object;
pub mod resolve;
pub mod structure;
pub mod symbol;

#[cfg(test)]
mod testutil;

pub use builder::{ContainerBuilder, SymtabBuilder};
pub use config::Config;
pub use container::{Container, DataModel};
pub use error::{CtfError, Result};
pub use format::{Kind, TypeId};
pub use object::load_file;
pub use structure::{
    type_cmp, type_compat, type_printf_compat, ArrayInfo, Encoding, Enumerator, IntFormat,
    Member, MemberInfo, PtrauthInfo,
};
pub use symbol::{FuncFlags, FuncInfo, SymbolFormat, SymbolTable};
