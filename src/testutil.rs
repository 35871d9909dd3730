// Mon Oct 19 2026 - Alex

//! Shared fixture graphs for unit tests.

use crate::builder::ContainerBuilder;
use crate::config::Config;
use crate::container::{Container, DataModel};
use crate::format::TypeId;
use crate::structure::encoding::CTF_FP_DOUBLE;
use crate::structure::{Encoding, IntFormat, PtrauthInfo};
use std::sync::Arc;

pub struct SampleIds {
    pub void: TypeId,
    pub char: TypeId,
    pub int: TypeId,
    pub long: TypeId,
    pub ulong: TypeId,
    pub double: TypeId,
    pub int_ptr: TypeId,
    pub char_ptr: TypeId,
    pub const_char: TypeId,
    pub const_char_ptr: TypeId,
    pub ulong_ptr: TypeId,
    pub size_t: TypeId,
    pub volatile_size: TypeId,
    pub int_arr4: TypeId,
    pub quad_t: TypeId,
    pub ptr_to_arr: TypeId,
    pub int_ptr_arr0: TypeId,
    pub padded_arr: TypeId,
    pub func: TypeId,
    pub fptr: TypeId,
    pub anon: TypeId,
    pub node: TypeId,
    pub node_ptr: TypeId,
    pub node_t: TypeId,
    pub color: TypeId,
    pub opaque: TypeId,
    pub loop_a: TypeId,
    pub loop_b: TypeId,
    pub auth_ptr: TypeId,
    pub hidden_int: TypeId,
}

pub struct ChildIds {
    pub handle: TypeId,
    pub handle_ptr: TypeId,
    pub node_array: TypeId,
}

fn lp64() -> Config {
    Config::default().with_data_model(DataModel::Lp64)
}

pub fn sample_builder(version: u8) -> (ContainerBuilder, SampleIds) {
    let mut b = ContainerBuilder::new(version);

    let void = b.add_integer("void", Encoding::signed(0), true);
    let char = b.add_integer("char", Encoding::int(IntFormat::SIGNED | IntFormat::CHAR, 8), true);
    let int = b.add_integer("int", Encoding::signed(32), true);
    let long = b.add_integer("long", Encoding::signed(64), true);
    let ulong = b.add_integer("unsigned long", Encoding::unsigned(64), true);
    let double = b.add_float("double", Encoding::float(CTF_FP_DOUBLE, 64), true);

    let int_ptr = b.add_pointer(int, true);
    let char_ptr = b.add_pointer(char, true);
    let const_char = b.add_const(char, true);
    let const_char_ptr = b.add_pointer(const_char, true);
    let ulong_ptr = b.add_pointer(ulong, true);
    let size_t = b.add_typedef("size_t", ulong, true);
    let volatile_size = b.add_volatile(size_t, true);

    let int_arr4 = b.add_array(int, long, 4, true);
    let quad_t = b.add_typedef("quad_t", int_arr4, true);
    let ptr_to_arr = b.add_pointer(int_arr4, true);
    let int_ptr_arr0 = b.add_array(int_ptr, long, 0, true);
    let padded_arr = b.add_sized_array(int, long, 2, 12, true);

    let func = b.add_function(int, &[int, char_ptr], false, true);
    let fptr = b.add_pointer(func, true);

    let anon = b.add_union("", 8, &[("b", int, 0), ("c", long, 0)], false);
    let node = b.next_id();
    let node_ptr = TypeId::new(node.raw() + 1);
    b.add_struct(
        "node",
        24,
        &[("a", int, 0), ("next", node_ptr, 64), ("", anon, 128)],
        true,
    );
    let added = b.add_pointer(node, true);
    assert_eq!(added, node_ptr);
    let node_t = b.add_typedef("node_t", node, true);

    let color = b.add_enum("color", 4, &[("RED", 0), ("GREEN", 1), ("BLUE", -2)], true);
    let opaque = b.add_forward("opaque", true);

    let loop_a = b.next_id();
    let loop_b = TypeId::new(loop_a.raw() + 1);
    b.add_typedef("loop_a", loop_b, true);
    b.add_typedef("loop_b", loop_a, true);

    let auth_ptr = b.add_ptrauth(
        int_ptr,
        PtrauthInfo {
            key: 2,
            discriminated: true,
            discriminator: 0x1234,
        },
        true,
    );
    let hidden_int = b.add_typedef("", int, false);

    let ids = SampleIds {
        void,
        char,
        int,
        long,
        ulong,
        double,
        int_ptr,
        char_ptr,
        const_char,
        const_char_ptr,
        ulong_ptr,
        size_t,
        volatile_size,
        int_arr4,
        quad_t,
        ptr_to_arr,
        int_ptr_arr0,
        padded_arr,
        func,
        fptr,
        anon,
        node,
        node_ptr,
        node_t,
        color,
        opaque,
        loop_a,
        loop_b,
        auth_ptr,
        hidden_int,
    };
    (b, ids)
}

/// An LP64 container exercising every kind.
pub fn sample(version: u8) -> (Container, SampleIds) {
    let (b, ids) = sample_builder(version);
    let ctf = b.open(None, &lp64()).expect("sample container opens");
    (ctf, ids)
}

/// A child of [`sample`] with a few types of its own.
pub fn child_sample(version: u8) -> (Container, SampleIds, ChildIds) {
    let (parent, parent_ids) = sample(version);

    let mut b = ContainerBuilder::child(version, "sample");
    let handle = b.add_typedef("handle_t", parent_ids.int_ptr, true);
    let handle_ptr = b.add_pointer(handle, true);
    let node_array = b.add_array(parent_ids.node, parent_ids.long, 2, true);

    let child = b
        .open(None, &lp64())
        .and_then(|child| child.import(Arc::new(parent)))
        .expect("child container opens");

    (
        child,
        parent_ids,
        ChildIds {
            handle,
            handle_ptr,
            node_array,
        },
    )
}
