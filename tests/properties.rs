// Mon Oct 19 2026 - Alex

use ctf_query::format::{CTF_VERSION_2, CTF_VERSION_4};
use ctf_query::{type_cmp, type_compat, Config, Container, ContainerBuilder, Encoding, TypeId};
use proptest::prelude::*;
use std::cmp::Ordering;

fn version() -> impl Strategy<Value = u8> {
    prop_oneof![Just(CTF_VERSION_2), Just(CTF_VERSION_4)]
}

/// `int` wrapped in `depth` typedefs named t0, t1, ...
fn typedef_chain(version: u8, depth: usize) -> (Container, TypeId, TypeId) {
    let mut b = ContainerBuilder::new(version);
    let int = b.add_integer("int", Encoding::signed(32), true);
    let mut top = int;
    for i in 0..depth {
        top = b.add_typedef(&format!("t{}", i), top, true);
    }
    (b.open(None, &Config::default()).unwrap(), int, top)
}

proptest! {
    #[test]
    fn prop_resolve_is_idempotent(version in version(), depth in 0usize..40) {
        let (ctf, int, top) = typedef_chain(version, depth);
        let once = ctf.resolve(top).unwrap();
        prop_assert_eq!(once, int);
        prop_assert_eq!(ctf.resolve(once).unwrap(), once);
        prop_assert_eq!(ctf.type_size(top).unwrap(), 4);
    }

    #[test]
    fn prop_type_names_round_trip(version in version(), depth in 0usize..20) {
        let (ctf, _, top) = typedef_chain(version, depth);
        let name = ctf.type_name(top).unwrap();
        prop_assert_eq!(ctf.lookup_by_name(&name).unwrap(), top);
    }

    #[test]
    fn prop_types_are_compatible_with_themselves(version in version(), depth in 0usize..10) {
        let (ctf, int, top) = typedef_chain(version, depth);
        prop_assert!(type_compat(&ctf, top, &ctf, top));
        prop_assert!(type_compat(&ctf, top, &ctf, int));
        prop_assert_eq!(type_cmp(&ctf, top, &ctf, top), Ordering::Equal);
    }

    #[test]
    fn prop_array_size_and_name(version in version(), nelems in 0u32..5000) {
        let mut b = ContainerBuilder::new(version);
        let int = b.add_integer("int", Encoding::signed(32), true);
        let long = b.add_integer("long", Encoding::signed(64), true);
        let array = b.add_array(int, long, nelems, true);
        let ctf = b.open(None, &Config::default()).unwrap();

        prop_assert_eq!(ctf.type_size(array).unwrap(), 4 * nelems as u64);
        let expected = if nelems == 0 {
            "int []".to_string()
        } else {
            format!("int [{}]", nelems)
        };
        prop_assert_eq!(ctf.type_name(array).unwrap(), expected);
    }

    #[test]
    fn prop_member_offsets_survive(
        version in version(),
        gaps in prop::collection::vec(1u64..64, 1..12)
    ) {
        let mut b = ContainerBuilder::new(version);
        let int = b.add_integer("int", Encoding::signed(32), true);
        let names: Vec<String> = (0..gaps.len()).map(|i| format!("m{}", i)).collect();
        let mut offset = 0;
        let mut members = Vec::new();
        for (name, gap) in names.iter().zip(&gaps) {
            members.push((name.as_str(), int, offset));
            offset += gap * 8;
        }
        let size = offset / 8 + 4;
        let st = b.add_struct("s", size, &members, true);
        let ctf = b.open(None, &Config::default()).unwrap();

        let decoded = ctf.members(st).unwrap();
        prop_assert_eq!(decoded.len(), members.len());
        for (got, (name, _, offset)) in decoded.iter().zip(&members) {
            prop_assert_eq!(got.name.as_str(), *name);
            prop_assert_eq!(got.offset, *offset);
            prop_assert_eq!(ctf.member_info(st, name).unwrap().offset, *offset);
        }
    }

    #[test]
    fn prop_name_lookup_never_panics(name in "[ a-z_*]{0,24}") {
        let (ctf, _, _) = typedef_chain(CTF_VERSION_4, 3);
        let _ = ctf.lookup_by_name(&name);
    }

    #[test]
    fn prop_open_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Container::from_bytes(bytes);
    }
}
