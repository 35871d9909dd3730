// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::{Kind, TypeId};
use log::debug;

/// Deepest nesting any recursive walk over the type graph will follow.
pub(crate) const MAX_TYPE_DEPTH: usize = 512;

/// Fails once a recursive walk starting somewhere above `id` has gone
/// `depth` levels deep.
pub(crate) fn check_depth(depth: usize, id: TypeId) -> Result<()> {
    if depth >= MAX_TYPE_DEPTH {
        debug!("type {} nests more than {} levels deep", id, MAX_TYPE_DEPTH);
        return Err(CtfError::corrupt(format!("type {} nests too deeply", id)));
    }
    Ok(())
}

impl Container {
    /// Follows typedefs and qualifiers down to the underlying type.
    ///
    /// Cycles through the original, current or previous type are reported
    /// as corrupt data. Longer cycles are cut off once the walk has visited
    /// more types than the containers hold.
    pub fn resolve(&self, id: TypeId) -> Result<TypeId> {
        let original = id;
        let mut prev = id;
        let mut cur = id;
        let mut budget = self.reachable_types();

        loop {
            let (_, rec) = self.lookup_by_id(cur)?;
            if !rec.kind.is_alias() {
                return Ok(cur);
            }

            let next = rec.referenced();
            if next == cur || next == original || next == prev {
                debug!("type {} cycle detected", original);
                return Err(CtfError::corrupt(format!("type {} cycle detected", original)));
            }
            if budget == 0 {
                debug!("type {} alias chain does not terminate", original);
                return Err(CtfError::corrupt(format!(
                    "type {} alias chain does not terminate",
                    original
                )));
            }
            budget -= 1;
            prev = cur;
            cur = next;
        }
    }

    pub(crate) fn reachable_types(&self) -> usize {
        self.type_count() + self.parent().map_or(0, Container::type_count)
    }

    pub fn kind(&self, id: TypeId) -> Result<Kind> {
        Ok(self.lookup_by_id(id)?.1.kind)
    }

    /// The type referenced by a pointer, ptrauth wrapper, typedef or
    /// qualifier.
    pub fn reference(&self, id: TypeId) -> Result<TypeId> {
        let (_, rec) = self.lookup_by_id(id)?;
        match rec.kind {
            Kind::Pointer
            | Kind::Ptrauth
            | Kind::Typedef
            | Kind::Volatile
            | Kind::Const
            | Kind::Restrict => Ok(rec.referenced()),
            _ => Err(CtfError::NotReferenceable),
        }
    }

    /// A pointer to `id` recorded by the container that owns `id`, or failing
    /// that, a pointer to its resolved base type.
    pub fn pointer_to(&self, id: TypeId) -> Result<TypeId> {
        let (owner, _) = self.lookup_by_id(id)?;
        let schema = owner.schema();

        if let Some(index) = owner.pointer_index(schema.type_to_index(id)) {
            return Ok(schema.index_to_type(index, owner.is_child()));
        }

        let base = owner.resolve(id).map_err(|_| CtfError::NotFound)?;
        owner
            .pointer_index(schema.type_to_index(base))
            .map(|index| schema.index_to_type(index, owner.is_child()))
            .ok_or(CtfError::NotFound)
    }
}
