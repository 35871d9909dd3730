// Mon Oct 19 2026 - Alex

//! Host symbol tables and the bridge from symbol indices to CTF data.

pub mod bridge;
pub mod table;
pub mod xlate;

pub use bridge::{FuncFlags, FuncInfo};
pub use table::{SymbolClass, SymbolEntry, SymbolFormat, SymbolTable};
