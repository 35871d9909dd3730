// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::Result;
use crate::format::{Kind, TypeId};
use crate::resolve::check_depth;

impl Container {
    /// Alignment in bytes. Structs take the alignment of their first member,
    /// unions the largest alignment of any member.
    pub fn type_align(&self, id: TypeId) -> Result<u64> {
        self.type_align_at(id, 0)
    }

    fn type_align_at(&self, id: TypeId, depth: usize) -> Result<u64> {
        check_depth(depth, id)?;
        let id = self.resolve(id)?;
        let (owner, rec) = self.lookup_by_id(id)?;

        match rec.kind {
            Kind::Pointer | Kind::Ptrauth | Kind::Function => Ok(owner.data_model().pointer_size()),
            Kind::Array => {
                let info = self.array_info(id)?;
                self.type_align_at(info.contents, depth + 1)
            }
            Kind::Struct | Kind::Union => {
                let take = if rec.kind == Kind::Struct { 1 } else { usize::MAX };
                let mut align = 0;
                for member in owner
                    .schema()
                    .members(owner.version(), owner.body(), &rec)
                    .take(take)
                {
                    align = align.max(self.type_align_at(member?.type_id, depth + 1)?);
                }
                Ok(align)
            }
            _ => Ok(rec.size),
        }
    }
}
