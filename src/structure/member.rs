// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::{Kind, TypeId, TypeRecord};
use crate::resolve::check_depth;
use serde::Serialize;
use std::ops::ControlFlow;

/// One struct or union member. Offsets are in bits from the start of the
/// enclosing aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub type_id: TypeId,
    pub offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberInfo {
    pub type_id: TypeId,
    pub offset: u64,
}

impl Container {
    /// Resolves `id` and returns the owning container and record of the
    /// struct or union it denotes.
    pub(crate) fn aggregate(&self, id: TypeId) -> Result<(&Container, TypeRecord)> {
        let id = self.resolve(id)?;
        let (owner, rec) = self.lookup_by_id(id)?;
        match rec.kind {
            Kind::Struct | Kind::Union => Ok((owner, rec)),
            _ => Err(CtfError::NotStructOrUnion),
        }
    }

    /// Calls `f` with the name, type and bit offset of each member in order.
    pub fn member_iter<B, F>(&self, id: TypeId, mut f: F) -> Result<ControlFlow<B>>
    where
        F: FnMut(&str, TypeId, u64) -> ControlFlow<B>,
    {
        let (owner, rec) = self.aggregate(id)?;
        for member in owner.schema().members(owner.version(), owner.body(), &rec) {
            let member = member?;
            let name = owner.strptr(member.name);
            if let ControlFlow::Break(b) = f(name, member.type_id, member.offset) {
                return Ok(ControlFlow::Break(b));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    pub fn members(&self, id: TypeId) -> Result<Vec<Member>> {
        let mut out = Vec::new();
        let flow = self.member_iter::<(), _>(id, |name, type_id, offset| {
            out.push(Member {
                name: name.to_string(),
                type_id,
                offset,
            });
            ControlFlow::Continue(())
        })?;
        debug_assert!(flow.is_continue());
        Ok(out)
    }

    /// Finds a member by name. Members of anonymous struct and union members
    /// are searched too, with their offsets made relative to `id`.
    pub fn member_info(&self, id: TypeId, name: &str) -> Result<MemberInfo> {
        self.member_info_at(id, name, 0, 0)
    }

    fn member_info_at(
        &self,
        id: TypeId,
        name: &str,
        base: u64,
        depth: usize,
    ) -> Result<MemberInfo> {
        check_depth(depth, id)?;
        let (owner, rec) = self.aggregate(id)?;
        for member in owner.schema().members(owner.version(), owner.body(), &rec) {
            let member = member?;
            if member.name == 0 {
                match self.member_info_at(member.type_id, name, base + member.offset, depth + 1) {
                    Ok(info) => return Ok(info),
                    Err(err @ CtfError::Corrupt(_)) => return Err(err),
                    Err(_) => {}
                }
            }
            if owner.strptr(member.name) == name {
                return Ok(MemberInfo {
                    type_id: member.type_id,
                    offset: base + member.offset,
                });
            }
        }
        Err(CtfError::NotFound)
    }
}
