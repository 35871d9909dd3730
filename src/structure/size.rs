// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::Result;
use crate::format::{Kind, TypeId};
use crate::resolve::check_depth;

impl Container {
    /// Size in bytes of the type `id` denotes once aliases are resolved.
    pub fn type_size(&self, id: TypeId) -> Result<u64> {
        self.type_size_at(id, 0)
    }

    fn type_size_at(&self, id: TypeId, depth: usize) -> Result<u64> {
        check_depth(depth, id)?;
        let id = self.resolve(id)?;
        let (owner, rec) = self.lookup_by_id(id)?;

        match rec.kind {
            Kind::Pointer | Kind::Ptrauth => Ok(owner.data_model().pointer_size()),
            Kind::Function => Ok(0),
            Kind::Array if rec.size > 0 => Ok(rec.size),
            Kind::Array => {
                let info = self.array_info(id)?;
                let elem = self.type_size_at(info.contents, depth + 1)?;
                Ok(elem.saturating_mul(info.nelems as u64))
            }
            _ => Ok(rec.size),
        }
    }
}
