// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::{Kind, TypeId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrayInfo {
    pub contents: TypeId,
    pub index: TypeId,
    pub nelems: u32,
}

impl Container {
    /// Element type, index type and element count of an array. Aliases are
    /// not followed.
    pub fn array_info(&self, id: TypeId) -> Result<ArrayInfo> {
        let (owner, rec) = self.lookup_by_id(id)?;
        if rec.kind != Kind::Array {
            return Err(CtfError::NotArray);
        }
        let raw = owner.schema().decode_array(owner.body(), rec.trailer())?;
        Ok(ArrayInfo {
            contents: raw.contents,
            index: raw.index,
            nelems: raw.nelems,
        })
    }
}
