// Mon Oct 19 2026 - Alex

//! Ordering and compatibility of types that may live in different
//! containers.

use crate::container::Container;
use crate::error::Result;
use crate::format::{Kind, TypeId};
use crate::resolve::check_depth;
use std::cmp::Ordering;

/// Total order over (container, type) pairs. Types that a child borrows from
/// its parent compare as members of the parent.
pub fn type_cmp(lfp: &Container, ltype: TypeId, rfp: &Container, rtype: TypeId) -> Ordering {
    let by_id = ltype.cmp(&rtype);
    if std::ptr::eq(lfp, rfp) {
        return by_id;
    }

    let lhome = home(lfp, ltype);
    let rhome = home(rfp, rtype);
    let (lp, rp) = (lhome as *const Container, rhome as *const Container);
    lp.cmp(&rp).then(by_id)
}

fn home(fp: &Container, id: TypeId) -> &Container {
    match fp.parent() {
        Some(parent) if fp.schema().is_parent_type(id) => parent,
        _ => fp,
    }
}

/// Whether two types are interchangeable in C terms: same kind and name,
/// with matching encodings, element types or sizes as the kind demands.
pub fn type_compat(lfp: &Container, ltype: TypeId, rfp: &Container, rtype: TypeId) -> bool {
    compat(lfp, ltype, rfp, rtype, true, 0).unwrap_or(false)
}

/// Looser check used for format arguments: names and kinds need not match,
/// only the representation.
pub fn type_printf_compat(
    lfp: &Container,
    ltype: TypeId,
    rfp: &Container,
    rtype: TypeId,
) -> bool {
    compat(lfp, ltype, rfp, rtype, false, 0).unwrap_or(false)
}

fn compat(
    lfp: &Container,
    ltype: TypeId,
    rfp: &Container,
    rtype: TypeId,
    strict: bool,
    depth: usize,
) -> Result<bool> {
    check_depth(depth, ltype)?;
    if type_cmp(lfp, ltype, rfp, rtype) == Ordering::Equal {
        return Ok(true);
    }

    let ltype = lfp.resolve(ltype)?;
    let rtype = rfp.resolve(rtype)?;
    let (lowner, lrec) = lfp.lookup_by_id(ltype)?;
    let (rowner, rrec) = rfp.lookup_by_id(rtype)?;

    if strict && (lrec.kind != rrec.kind || lowner.strptr(lrec.name) != rowner.strptr(rrec.name)) {
        return Ok(false);
    }

    let ok = match lrec.kind {
        Kind::Integer | Kind::Float => lfp.encoding(ltype)? == rfp.encoding(rtype)?,
        Kind::Pointer | Kind::Ptrauth => {
            let mut lptr = ltype;
            if lrec.kind == Kind::Ptrauth {
                lptr = lfp.reference(lptr)?;
            }
            let mut rptr = rtype;
            if rrec.kind == Kind::Ptrauth {
                rptr = rfp.reference(rptr)?;
            }
            compat(lfp, lfp.reference(lptr)?, rfp, rfp.reference(rptr)?, true, depth + 1)?
        }
        Kind::Array => {
            let la = lfp.array_info(ltype)?;
            let ra = rfp.array_info(rtype)?;
            la.nelems == ra.nelems
                && compat(lfp, la.contents, rfp, ra.contents, true, depth + 1)?
                && compat(lfp, la.index, rfp, ra.index, true, depth + 1)?
        }
        Kind::Struct | Kind::Union => lfp.type_size(ltype)? == rfp.type_size(rtype)?,
        Kind::Enum | Kind::Forward => true,
        _ => false,
    };
    Ok(ok)
}
