// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::{TypeId, TypeRecord};

impl Container {
    /// Dereferences a type ID.
    ///
    /// Returns the decoded record together with the container that owns it,
    /// which is the parent when a child is asked about a parent-scoped ID.
    /// Every query goes through here; nothing else turns IDs into offsets.
    pub fn lookup_by_id(&self, id: TypeId) -> Result<(&Container, TypeRecord)> {
        let mut owner = self;
        if self.is_child() && self.schema().is_parent_type(id) {
            owner = self.parent().ok_or(CtfError::NoParent)?;
        }

        let index = owner.schema().type_to_index(id) as usize;
        if index == 0 || index > owner.type_count() {
            return Err(CtfError::BadId);
        }

        Ok((owner, owner.record_at(index)?))
    }

    /// Name string of a type, as stored (no prefix, no declarator).
    pub fn raw_name(&self, id: TypeId) -> Result<&str> {
        let (owner, rec) = self.lookup_by_id(id)?;
        Ok(owner.strptr(rec.name))
    }
}
