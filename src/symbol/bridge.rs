// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::{Kind, TypeId, SXLATE_NONE};
use crate::symbol::{SymbolEntry, SymbolTable};
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct FuncFlags: u32 {
        const VARARG = 0x1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FuncInfo {
    pub return_type: TypeId,
    pub argc: u32,
    pub flags: FuncFlags,
}

impl Container {
    fn symbol_slot(&self, index: usize) -> Result<(&SymbolTable, SymbolEntry, u32)> {
        let symtab = self.symtab().ok_or(CtfError::NoSymtab)?;
        if index >= symtab.len() {
            return Err(CtfError::InvalidArgument(format!(
                "symbol index {} out of range ({} symbols)",
                index,
                symtab.len()
            )));
        }
        let entry = symtab.entry(index)?;
        let slot = self.sxlate().get(index).copied().unwrap_or(SXLATE_NONE);
        Ok((symtab, entry, slot))
    }

    fn in_section(&self, slot: u32, start: u32, end: u32) -> bool {
        (start..end).contains(&slot)
    }

    /// Type of the data object described by a symbol table entry.
    pub fn lookup_by_symbol(&self, index: usize) -> Result<TypeId> {
        let (_, entry, slot) = self.symbol_slot(index)?;

        if !entry.is_data_object() {
            return Err(CtfError::NotData);
        }
        if slot == SXLATE_NONE {
            return Err(CtfError::NoTypeForSymbol);
        }
        if !self.in_section(slot, self.header().object_offset, self.header().function_offset) {
            return Err(CtfError::NotData);
        }

        let id = self.schema().read_id(self.body(), slot as usize)?;
        if id.is_none() {
            return Err(CtfError::NoTypeForSymbol);
        }
        Ok(id)
    }

    /// Return type, argument count and flags of the function described by a
    /// symbol table entry.
    pub fn func_info(&self, index: usize) -> Result<FuncInfo> {
        let (symtab, entry, slot) = self.symbol_slot(index)?;

        if symtab.checks_functions() && !entry.is_function() {
            return Err(CtfError::NotFunction);
        }
        if slot == SXLATE_NONE {
            return Err(CtfError::NoTypeForSymbol);
        }
        // Tables without function checks still only map functions into the
        // function section.
        if !self.in_section(slot, self.header().function_offset, self.header().type_offset) {
            return Err(CtfError::NotFunction);
        }

        let schema = self.schema();
        let body = self.body();
        let idsz = schema.id_size();
        let off = slot as usize;

        let info = schema.read_id(body, off)?.raw();
        let return_type = schema.read_id(body, off + idsz)?;
        let kind = schema.info_kind(info);
        let n = schema.info_vlen(info);

        if kind == Kind::Unknown.as_raw() && n == 0 {
            return Err(CtfError::NoTypeForSymbol);
        }
        if kind != Kind::Function.as_raw() {
            return Err(CtfError::corrupt(format!(
                "function record for symbol {} has kind {}",
                index, kind
            )));
        }

        let mut info = FuncInfo {
            return_type,
            argc: n,
            flags: FuncFlags::empty(),
        };

        if n != 0 {
            let last = schema.read_id(body, off + idsz * (n as usize + 1))?;
            if last.is_none() {
                info.flags |= FuncFlags::VARARG;
                info.argc -= 1;
            }
        }

        Ok(info)
    }

    /// Up to `max` argument types of the function described by a symbol.
    pub fn func_args(&self, index: usize, max: usize) -> Result<Vec<TypeId>> {
        let info = self.func_info(index)?;
        let (_, _, slot) = self.symbol_slot(index)?;
        let idsz = self.schema().id_size();
        let count = max.min(info.argc as usize);
        self.schema()
            .read_id_list(self.body(), slot as usize + 2 * idsz, count)
    }
}
