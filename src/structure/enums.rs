// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::codec::enumerators;
use crate::format::{Kind, TypeId, TypeRecord};
use serde::Serialize;
use std::ops::ControlFlow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumerator {
    pub name: String,
    pub value: i32,
}

impl Container {
    fn enumeration(&self, id: TypeId) -> Result<(&Container, TypeRecord)> {
        let id = self.resolve(id)?;
        let (owner, rec) = self.lookup_by_id(id)?;
        if rec.kind != Kind::Enum {
            return Err(CtfError::NotEnum);
        }
        Ok((owner, rec))
    }

    pub fn enum_iter<B, F>(&self, id: TypeId, mut f: F) -> Result<ControlFlow<B>>
    where
        F: FnMut(&str, i32) -> ControlFlow<B>,
    {
        let (owner, rec) = self.enumeration(id)?;
        for entry in enumerators(owner.body(), &rec) {
            let entry = entry?;
            if let ControlFlow::Break(b) = f(owner.strptr(entry.name), entry.value) {
                return Ok(ControlFlow::Break(b));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    pub fn enumerators(&self, id: TypeId) -> Result<Vec<Enumerator>> {
        let mut out = Vec::new();
        let flow = self.enum_iter::<(), _>(id, |name, value| {
            out.push(Enumerator {
                name: name.to_string(),
                value,
            });
            ControlFlow::Continue(())
        })?;
        debug_assert!(flow.is_continue());
        Ok(out)
    }

    /// Name of the first enumerator with the given value.
    pub fn enum_name(&self, id: TypeId, value: i32) -> Result<&str> {
        let (owner, rec) = self.enumeration(id)?;
        for entry in enumerators(owner.body(), &rec) {
            let entry = entry?;
            if entry.value == value {
                return Ok(owner.strptr(entry.name));
            }
        }
        Err(CtfError::NotFound)
    }

    pub fn enum_value(&self, id: TypeId, name: &str) -> Result<i32> {
        let (owner, rec) = self.enumeration(id)?;
        for entry in enumerators(owner.body(), &rec) {
            let entry = entry?;
            if owner.strptr(entry.name) == name {
                return Ok(entry.value);
            }
        }
        Err(CtfError::NotFound)
    }
}
