// Mon Oct 19 2026 - Alex

use ctf_query::builtin::builtins;
use ctf_query::format::{CTF_VERSION_2, CTF_VERSION_4};
use ctf_query::{
    type_compat, type_printf_compat, Config, Container, ContainerBuilder, CtfError, DataModel,
    Encoding, IntFormat, Kind, TypeId,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

struct Graph {
    int: TypeId,
    long: TypeId,
    char_ptr: TypeId,
    list: TypeId,
    list_ptr: TypeId,
    grid: TypeId,
    mode: TypeId,
    handler: TypeId,
    word: TypeId,
}

fn build(version: u8) -> (Container, Graph) {
    let mut b = ContainerBuilder::new(version);
    let int = b.add_integer("int", Encoding::signed(32), true);
    let long = b.add_integer("long", Encoding::signed(64), true);
    let char = b.add_integer("char", Encoding::int(IntFormat::SIGNED | IntFormat::CHAR, 8), true);
    let char_ptr = b.add_pointer(char, true);

    let list_ptr = TypeId::new(b.next_id().raw() + 1);
    let list = b.add_struct(
        "list",
        16,
        &[("value", int, 0), ("next", list_ptr, 64)],
        true,
    );
    assert_eq!(b.add_pointer(list, true), list_ptr);

    let row = b.add_array(int, long, 3, false);
    let grid = b.add_array(row, long, 2, true);
    let mode = b.add_enum("mode", 4, &[("OFF", 0), ("ON", 1), ("AUTO", 7)], true);
    let func = b.add_function(int, &[char_ptr], true, false);
    let handler = b.add_pointer(func, true);
    let word = b.add_typedef("word_t", long, true);

    let ctf = b
        .open(None, &Config::default().with_data_model(DataModel::Lp64))
        .unwrap();
    (
        ctf,
        Graph {
            int,
            long,
            char_ptr,
            list,
            list_ptr,
            grid,
            mode,
            handler,
            word,
        },
    )
}

#[test]
fn test_narrow_and_wide_agree() {
    let (narrow, n) = build(CTF_VERSION_2);
    let (wide, w) = build(CTF_VERSION_4);

    for (ctf, g) in [(&narrow, &n), (&wide, &w)] {
        assert_eq!(ctf.lookup_by_name("struct list").unwrap(), g.list);
        assert_eq!(ctf.lookup_by_name("struct list *").unwrap(), g.list_ptr);
        assert_eq!(ctf.type_size(g.list).unwrap(), 16);
        assert_eq!(ctf.type_align(g.list).unwrap(), 4);
        assert_eq!(ctf.type_name(g.grid).unwrap(), "int [2][3]");
        assert_eq!(ctf.type_size(g.grid).unwrap(), 24);
        assert_eq!(ctf.type_name(g.handler).unwrap(), "int (*)()");
        assert_eq!(ctf.type_name(g.char_ptr).unwrap(), "char *");
        assert_eq!(ctf.enum_value(g.mode, "AUTO").unwrap(), 7);
        assert_eq!(ctf.enum_name(g.mode, 1).unwrap(), "ON");
        assert_eq!(ctf.resolve(g.word).unwrap(), g.long);
        assert_eq!(ctf.member_info(g.list, "next").unwrap().offset, 64);
        assert_eq!(ctf.pointer_to(g.list).unwrap(), g.list_ptr);
    }

    let narrow_members = narrow.members(n.list).unwrap();
    let wide_members = wide.members(w.list).unwrap();
    assert_eq!(narrow_members, wide_members);
    assert_eq!(narrow.enumerators(n.mode).unwrap(), wide.enumerators(w.mode).unwrap());
}

#[test]
fn test_compatibility_across_containers() {
    let (narrow, n) = build(CTF_VERSION_2);
    let (wide, w) = build(CTF_VERSION_4);

    assert!(type_compat(&narrow, n.int, &wide, w.int));
    assert!(type_compat(&narrow, n.list_ptr, &wide, w.list_ptr));
    assert!(type_compat(&narrow, n.grid, &wide, w.grid));
    assert!(!type_compat(&narrow, n.int, &wide, w.long));
    // word_t resolves to long on both sides.
    assert!(type_compat(&narrow, n.word, &wide, w.long));
    assert!(type_printf_compat(&narrow, n.mode, &wide, w.mode));
}

#[test]
fn test_error_kinds() {
    let (ctf, g) = build(CTF_VERSION_4);
    assert!(matches!(ctf.lookup_by_name("const *"), Err(CtfError::Syntax)));
    assert!(matches!(ctf.lookup_by_name("union list"), Err(CtfError::NotFound)));
    assert!(matches!(ctf.members(g.int), Err(CtfError::NotStructOrUnion)));
    assert!(matches!(ctf.array_info(g.int), Err(CtfError::NotArray)));
    assert!(matches!(ctf.enum_value(g.list, "ON"), Err(CtfError::NotEnum)));
    assert!(matches!(ctf.encoding(g.list), Err(CtfError::NotIntOrFloat)));
    assert!(matches!(ctf.lookup_by_symbol(1), Err(CtfError::NoSymtab)));
    assert!(matches!(ctf.kind(TypeId::new(0x7fff_0000)), Err(CtfError::BadId)));
}

#[test]
fn test_builtin_d_container() {
    let b = builtins(&Config::default().with_data_model(DataModel::Lp64)).unwrap();

    let uint64 = b.d.lookup_by_name("uint64_t").unwrap();
    assert_eq!(b.d.kind(uint64).unwrap(), Kind::Typedef);
    assert_eq!(b.d.type_size(uint64).unwrap(), 8);
    assert_eq!(
        b.d.encoding(b.d.resolve(uint64).unwrap()).unwrap(),
        Encoding::unsigned(64)
    );

    let void_ptr = b.d.lookup_by_name("void *").unwrap();
    assert_eq!(b.d.kind(void_ptr).unwrap(), Kind::Pointer);
    assert_eq!(b.d.type_name(b.types.string).unwrap(), "string");
    assert!(type_compat(&b.d, uint64, &b.c, b.c.lookup_by_name("unsigned long").unwrap()));
}

#[test]
fn test_child_requires_matching_parent_model() {
    let parent = Arc::new(
        ContainerBuilder::new(CTF_VERSION_4)
            .open(None, &Config::default().with_data_model(DataModel::Ilp32))
            .unwrap(),
    );
    let child = ContainerBuilder::child(CTF_VERSION_4, "parent")
        .open(None, &Config::default().with_data_model(DataModel::Lp64))
        .unwrap();
    assert!(matches!(
        child.import(parent),
        Err(CtfError::DataModelMismatch { .. })
    ));
}
