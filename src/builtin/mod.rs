// Mon Oct 19 2026 - Alex

//! The built-in "C" and "D" containers that every consumer starts from.
//!
//! "C" holds the intrinsic integer and floating-point types of the data
//! model. "D" is a child of "C" adding the fixed-width typedefs and the
//! handful of types the tracing language itself needs.

pub mod intrinsics;

use crate::builder::ContainerBuilder;
use crate::config::Config;
use crate::container::{Container, DataModel};
use crate::error::Result;
use crate::format::{Kind, TypeId, CTF_VERSION_4};
use log::debug;
use std::sync::Arc;

pub use intrinsics::{Intrinsic, TypedefDesc};

pub const C_CONTAINER: &str = "C";
pub const D_CONTAINER: &str = "D";

/// Types of the "D" container that callers address directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DTypes {
    pub func: TypeId,
    pub func_ptr: TypeId,
    pub string: TypeId,
    pub dynamic: TypeId,
    pub stack: TypeId,
    pub symaddr: TypeId,
    pub usymaddr: TypeId,
}

pub struct Builtins {
    pub c: Arc<Container>,
    pub d: Container,
    pub types: DTypes,
}

/// Intrinsic types followed by `void *`, `char *` and `int *`.
pub fn c_container(model: DataModel) -> Result<Container> {
    let mut b = ContainerBuilder::new(CTF_VERSION_4);
    let mut void = TypeId::NONE;
    let mut char = TypeId::NONE;
    let mut int = TypeId::NONE;

    for intrinsic in intrinsics::intrinsics(model) {
        let id = match intrinsic.kind {
            Kind::Float => b.add_float(intrinsic.name, intrinsic.encoding(), true),
            _ => b.add_integer(intrinsic.name, intrinsic.encoding(), true),
        };
        match intrinsic.name {
            "void" => void = id,
            "char" => char = id,
            "int" => int = id,
            _ => {}
        }
    }
    for target in [void, char, int] {
        b.add_pointer(target, true);
    }

    let ctf = b.open(None, &Config::default().with_data_model(model))?;
    debug!("built {} container with {} types", C_CONTAINER, ctf.type_count());
    Ok(ctf)
}

/// Builds the "D" container on top of `parent`, which must be the "C"
/// container for the same data model.
pub fn d_container(parent: Arc<Container>, config: &Config) -> Result<(Container, DTypes)> {
    let model = parent.data_model();
    let mut b = ContainerBuilder::child(CTF_VERSION_4, C_CONTAINER);

    for def in intrinsics::typedefs(model) {
        let source = parent.lookup_by_name(def.source)?;
        b.add_typedef(def.name, source, true);
    }

    let int = parent.lookup_by_name("int")?;
    let long = parent.lookup_by_name("long")?;
    let char = parent.lookup_by_name("char")?;
    let void = parent.lookup_by_name("void")?;

    let func = b.add_function(int, &[], false, true);
    let func_ptr = b.add_pointer(func, true);
    let chars = b.add_array(char, long, config.string_size, true);
    let types = DTypes {
        func,
        func_ptr,
        string: b.add_typedef("string", chars, true),
        dynamic: b.add_typedef("<DYN>", void, true),
        stack: b.add_typedef("stack", void, true),
        symaddr: b.add_typedef("_symaddr", void, true),
        usymaddr: b.add_typedef("_usymaddr", void, true),
    };

    let ctf = b
        .open(None, &Config::default().with_data_model(model))?
        .import(parent)?;
    debug!(
        "built {} container with {} types, string size {}",
        D_CONTAINER,
        ctf.type_count(),
        config.string_size
    );
    Ok((ctf, types))
}

/// Both built-in containers for the configured data model.
pub fn builtins(config: &Config) -> Result<Builtins> {
    let model = config.data_model.unwrap_or_default();
    let c = Arc::new(c_container(model)?);
    let (d, types) = d_container(Arc::clone(&c), config)?;
    Ok(Builtins { c, d, types })
}
