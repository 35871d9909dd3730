// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::Result;
use crate::format::{Kind, SXLATE_NONE};
use crate::symbol::SymbolClass;

impl Container {
    /// Maps each symbol to the body offset of its record in the object or
    /// function section. Both sections are laid out in symbol table order,
    /// so they are consumed sequentially.
    pub(crate) fn build_symbol_xlate(&self) -> Result<Vec<u32>> {
        let Some(symtab) = self.symtab() else {
            return Ok(Vec::new());
        };

        let schema = self.schema();
        let header = *self.header();
        let body = self.body();
        let idsz = schema.id_size();

        let object_end = header.function_offset as usize;
        let function_end = header.type_offset as usize;
        let mut objtoff = header.object_offset as usize;
        let mut funcoff = header.function_offset as usize;
        let mut xlate = Vec::with_capacity(symtab.len());

        for index in 0..symtab.len() {
            let entry = symtab.entry(index)?;
            let slot = match symtab.classify(&entry) {
                SymbolClass::Object if objtoff < object_end => {
                    let slot = objtoff as u32;
                    objtoff += idsz;
                    slot
                }
                SymbolClass::Function if funcoff < function_end => {
                    let slot = funcoff as u32;
                    let info = schema.read_id(body, funcoff)?.raw();
                    let vlen = schema.info_vlen(info) as usize;
                    if schema.info_kind(info) == Kind::Unknown.as_raw() && vlen == 0 {
                        funcoff += idsz;
                    } else {
                        funcoff += idsz * (vlen + 2);
                    }
                    slot
                }
                _ => SXLATE_NONE,
            };
            xlate.push(slot);
        }

        Ok(xlate)
    }
}
