// Mon Oct 19 2026 - Alex

//! Serializable query results shared by the text and JSON printers.

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::{Kind, TypeId, SXLATE_NONE};
use crate::structure::Enumerator;
use crate::symbol::FuncFlags;
use log::warn;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    pub version: u8,
    pub data_model: String,
    pub child: bool,
    pub parent_name: Option<String>,
    pub parent_label: Option<String>,
    pub parent_attached: bool,
    pub types: usize,
    pub symbols: Option<usize>,
    pub typed_symbols: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeReport {
    pub id: TypeId,
    pub kind: Kind,
    pub name: String,
    pub size: Option<u64>,
    pub align: Option<u64>,
    pub resolved: Option<TypeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberRow {
    pub name: String,
    pub type_id: TypeId,
    pub type_name: String,
    pub offset: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembersReport {
    #[serde(rename = "type")]
    pub ty: TypeReport,
    pub members: Vec<MemberRow>,
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "class", rename_all = "lowercase")]
pub enum SymbolReport {
    Object {
        index: usize,
        name: String,
        #[serde(rename = "type")]
        ty: TypeReport,
    },
    Function {
        index: usize,
        name: String,
        return_type: TypeReport,
        args: Vec<TypeReport>,
        varargs: bool,
        signature: String,
    },
}

pub fn info(ctf: &Container) -> InfoReport {
    InfoReport {
        version: ctf.version(),
        data_model: ctf.data_model().to_string(),
        child: ctf.is_child(),
        parent_name: ctf.parent_name().map(str::to_string),
        parent_label: ctf.parent_label().map(str::to_string),
        parent_attached: ctf.parent().is_some(),
        types: ctf.type_count(),
        symbols: ctf.symtab().map(|s| s.len()),
        typed_symbols: ctf.sxlate().iter().filter(|&&slot| slot != SXLATE_NONE).count(),
    }
}

pub fn describe(ctf: &Container, id: TypeId) -> Result<TypeReport> {
    Ok(TypeReport {
        id,
        kind: ctf.kind(id)?,
        name: ctf.type_name(id)?,
        size: ctf.type_size(id).ok(),
        align: ctf.type_align(id).ok(),
        resolved: ctf.resolve(id).ok().filter(|&r| r != id),
    })
}

pub fn lookup(ctf: &Container, name: &str) -> Result<TypeReport> {
    describe(ctf, ctf.lookup_by_name(name)?)
}

/// Members of a struct or union, or the enumerators of an enum.
pub fn members(ctf: &Container, name: &str) -> Result<MembersReport> {
    let id = ctf.lookup_by_name(name)?;
    let ty = describe(ctf, id)?;
    let base = ctf.resolve(id)?;

    let mut report = MembersReport {
        ty,
        members: Vec::new(),
        enumerators: Vec::new(),
    };
    match ctf.kind(base)? {
        Kind::Enum => report.enumerators = ctf.enumerators(base)?,
        _ => {
            for member in ctf.members(base)? {
                report.members.push(MemberRow {
                    type_name: ctf.type_name(member.type_id)?,
                    name: member.name,
                    type_id: member.type_id,
                    offset: member.offset,
                });
            }
        }
    }
    Ok(report)
}

/// Every type the container itself defines. Types that cannot be described
/// are logged and skipped.
pub fn dump(ctf: &Container) -> Vec<TypeReport> {
    let schema = ctf.schema();
    (1..=ctf.type_count() as u32)
        .map(|index| schema.index_to_type(index, ctf.is_child()))
        .filter_map(|id| match describe(ctf, id) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!("skipping type {}: {}", id, err);
                None
            }
        })
        .collect()
}

pub fn symbol(ctf: &Container, index: usize) -> Result<SymbolReport> {
    let symtab = ctf.symtab().ok_or(CtfError::NoSymtab)?;
    let name = symtab.name(&symtab.entry(index)?).to_string();

    match ctf.lookup_by_symbol(index) {
        Ok(id) => {
            return Ok(SymbolReport::Object {
                index,
                name,
                ty: describe(ctf, id)?,
            })
        }
        Err(CtfError::NotData) => {}
        Err(err) => return Err(err),
    }

    let info = ctf.func_info(index)?;
    let varargs = info.flags.contains(FuncFlags::VARARG);
    let return_type = describe(ctf, info.return_type)?;
    let args = ctf
        .func_args(index, info.argc as usize)?
        .into_iter()
        .map(|id| describe(ctf, id))
        .collect::<Result<Vec<_>>>()?;

    let mut params: Vec<&str> = args.iter().map(|a| a.name.as_str()).collect();
    if varargs {
        params.push("...");
    }
    let signature = format!("{} {}({})", return_type.name, name, params.join(", "));

    Ok(SymbolReport::Function {
        index,
        name,
        return_type,
        args,
        varargs,
        signature,
    })
}
