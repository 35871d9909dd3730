// Mon Oct 19 2026 - Alex

//! C declarations for type IDs.
//!
//! The type graph is walked from the outermost type inwards and each node
//! lands in one of four precedence buckets (base, pointer, array, function).
//! Buckets are then printed lowest precedence first, with parentheses
//! wherever the graph nests a pointer or array more tightly than C's
//! declarator precedence would read it (`int (*)[4]`, `int (*)()`).

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::{Kind, TypeId};
use crate::resolve::MAX_TYPE_DEPTH;
use std::collections::VecDeque;

const PREC_BASE: usize = 0;
const PREC_POINTER: usize = 1;
const PREC_ARRAY: usize = 2;
const PREC_FUNCTION: usize = 3;
const PREC_MAX: usize = 4;

struct DeclNode<'a> {
    kind: Kind,
    name: &'a str,
    n: u32,
}

struct Decl<'a> {
    nodes: [VecDeque<DeclNode<'a>>; PREC_MAX],
    order: [i32; PREC_MAX],
    ordp: i32,
    qualp: usize,
    depth_left: usize,
}

impl<'a> Decl<'a> {
    fn new(depth: usize) -> Self {
        Self {
            nodes: Default::default(),
            order: [-1; PREC_MAX],
            ordp: 0,
            qualp: PREC_BASE,
            depth_left: depth,
        }
    }

    fn push(&mut self, ctf: &'a Container, id: TypeId) -> Result<()> {
        if self.depth_left == 0 {
            return Err(CtfError::corrupt(format!("type {} nests too deeply", id)));
        }
        self.depth_left -= 1;

        let (owner, rec) = ctf.lookup_by_id(id)?;
        let name = owner.strptr(rec.name);
        let mut n = 1;
        let mut qualifier = false;

        let prec = match rec.kind {
            Kind::Array => {
                let info = ctf.array_info(id)?;
                self.push(ctf, info.contents)?;
                n = info.nelems;
                PREC_ARRAY
            }
            Kind::Typedef if name.is_empty() => {
                return self.push(ctf, rec.referenced());
            }
            Kind::Function => {
                self.push(ctf, rec.referenced())?;
                PREC_FUNCTION
            }
            Kind::Pointer => {
                self.push(ctf, rec.referenced())?;
                PREC_POINTER
            }
            Kind::Volatile | Kind::Const | Kind::Restrict | Kind::Ptrauth => {
                self.push(ctf, rec.referenced())?;
                qualifier = true;
                self.qualp
            }
            _ => PREC_BASE,
        };

        if self.nodes[prec].is_empty() {
            self.order[prec] = self.ordp;
            self.ordp += 1;
        }
        // Only base types and pointers can carry qualifiers.
        if prec > self.qualp && prec < PREC_ARRAY {
            self.qualp = prec;
        }

        let node = DeclNode {
            kind: rec.kind,
            name,
            n,
        };
        // Array declarators read inside out; base qualifiers go first by
        // convention (`const int`).
        if rec.kind == Kind::Array || (qualifier && prec == PREC_BASE) {
            self.nodes[prec].push_front(node);
        } else {
            self.nodes[prec].push_back(node);
        }
        Ok(())
    }

    fn render(&self) -> String {
        let ptr = self.order[PREC_POINTER] > PREC_POINTER as i32;
        let arr = self.order[PREC_ARRAY] > PREC_ARRAY as i32;

        let rp = if arr {
            Some(PREC_ARRAY)
        } else if ptr {
            Some(PREC_POINTER)
        } else {
            None
        };
        let mut lp = if ptr {
            Some(PREC_POINTER)
        } else if arr {
            Some(PREC_ARRAY)
        } else {
            None
        };

        let mut out = String::new();
        let mut k = Kind::Pointer;

        for prec in PREC_BASE..PREC_MAX {
            for node in &self.nodes[prec] {
                if k != Kind::Pointer && k != Kind::Array {
                    out.push(' ');
                }
                if lp == Some(prec) {
                    out.push('(');
                    lp = None;
                }

                match node.kind {
                    Kind::Integer | Kind::Float | Kind::Typedef => out.push_str(node.name),
                    Kind::Pointer => out.push('*'),
                    Kind::Array if node.n == 0 => out.push_str("[]"),
                    Kind::Array => {
                        out.push('[');
                        out.push_str(&node.n.to_string());
                        out.push(']');
                    }
                    Kind::Function => out.push_str("()"),
                    Kind::Struct | Kind::Forward => {
                        out.push_str("struct ");
                        out.push_str(node.name);
                    }
                    Kind::Union => {
                        out.push_str("union ");
                        out.push_str(node.name);
                    }
                    Kind::Enum => {
                        out.push_str("enum ");
                        out.push_str(node.name);
                    }
                    Kind::Volatile => out.push_str("volatile"),
                    Kind::Const => out.push_str("const"),
                    Kind::Restrict => out.push_str("restrict"),
                    Kind::Ptrauth => out.push_str("ptrauth"),
                    Kind::Unknown => {}
                }
                k = node.kind;
            }

            if rp == Some(prec) {
                out.push(')');
            }
        }

        out
    }
}

impl Container {
    /// C declaration of the type, e.g. `const char *` or `int (*)[4]`.
    pub fn type_name(&self, id: TypeId) -> Result<String> {
        let mut decl = Decl::new(MAX_TYPE_DEPTH);
        decl.push(self, id)?;
        Ok(decl.render())
    }

    /// Writes the declaration into `buf` the way `snprintf` would: at most
    /// `buf.len() - 1` bytes followed by a NUL. Returns the length of the
    /// whole declaration, which exceeds what was written when `buf` is too
    /// small.
    pub fn type_lname(&self, id: TypeId, buf: &mut [u8]) -> Result<usize> {
        let name = self.type_name(id)?;
        if let Some(room) = buf.len().checked_sub(1) {
            let n = room.min(name.len());
            buf[..n].copy_from_slice(&name.as_bytes()[..n]);
            buf[n] = 0;
        }
        Ok(name.len())
    }

    /// Like [`type_lname`](Self::type_lname) but fails with
    /// [`CtfError::NameTooLong`] unless the whole declaration and its NUL fit.
    pub fn type_name_into<'b>(&self, id: TypeId, buf: &'b mut [u8]) -> Result<&'b str> {
        let len = self.type_lname(id, buf)?;
        if len >= buf.len() {
            return Err(CtfError::NameTooLong { required: len + 1 });
        }
        std::str::from_utf8(&buf[..len]).map_err(|_| CtfError::corrupt("type name is not UTF-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ContainerBuilder;
    use crate::config::Config;
    use crate::format::{CTF_VERSION_2, CTF_VERSION_4};
    use crate::structure::Encoding;
    use crate::testutil::{child_sample, sample};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_names() {
        for version in [CTF_VERSION_2, CTF_VERSION_4] {
            let (ctf, ids) = sample(version);
            assert_eq!(ctf.type_name(ids.int).unwrap(), "int");
            assert_eq!(ctf.type_name(ids.ulong).unwrap(), "unsigned long");
            assert_eq!(ctf.type_name(ids.node).unwrap(), "struct node");
            assert_eq!(ctf.type_name(ids.color).unwrap(), "enum color");
            assert_eq!(ctf.type_name(ids.opaque).unwrap(), "struct opaque");
            assert_eq!(ctf.type_name(ids.size_t).unwrap(), "size_t");
            assert_eq!(ctf.type_name(ids.anon).unwrap(), "union ");
        }
    }

    #[test]
    fn test_declarators() {
        for version in [CTF_VERSION_2, CTF_VERSION_4] {
            let (ctf, ids) = sample(version);
            assert_eq!(ctf.type_name(ids.int_ptr).unwrap(), "int *");
            assert_eq!(ctf.type_name(ids.const_char_ptr).unwrap(), "const char *");
            assert_eq!(ctf.type_name(ids.volatile_size).unwrap(), "volatile size_t");
            assert_eq!(ctf.type_name(ids.int_arr4).unwrap(), "int [4]");
            assert_eq!(ctf.type_name(ids.ptr_to_arr).unwrap(), "int (*)[4]");
            assert_eq!(ctf.type_name(ids.int_ptr_arr0).unwrap(), "int *[]");
            assert_eq!(ctf.type_name(ids.func).unwrap(), "int ()");
            assert_eq!(ctf.type_name(ids.fptr).unwrap(), "int (*)()");
            assert_eq!(ctf.type_name(ids.node_ptr).unwrap(), "struct node *");
            assert_eq!(ctf.type_name(ids.auth_ptr).unwrap(), "int *ptrauth");
        }
    }

    #[test]
    fn test_names_round_trip_through_lookup() {
        let (ctf, ids) = sample(CTF_VERSION_4);
        for id in [ids.int, ids.node, ids.color, ids.size_t, ids.int_ptr, ids.node_ptr] {
            let name = ctf.type_name(id).unwrap();
            assert_eq!(ctf.lookup_by_name(&name).unwrap(), id, "{}", name);
        }
    }

    #[test]
    fn test_lname_truncates() {
        let (ctf, ids) = sample(CTF_VERSION_4);
        let mut buf = [0xffu8; 6];
        assert_eq!(ctf.type_lname(ids.const_char_ptr, &mut buf).unwrap(), 12);
        assert_eq!(&buf, b"const\0");
        assert_eq!(ctf.type_lname(ids.int, &mut []).unwrap(), 3);

        let mut small = [0u8; 12];
        assert!(matches!(
            ctf.type_name_into(ids.const_char_ptr, &mut small),
            Err(CtfError::NameTooLong { required: 13 })
        ));
        let mut big = [0u8; 13];
        assert_eq!(ctf.type_name_into(ids.const_char_ptr, &mut big).unwrap(), "const char *");
    }

    #[test]
    fn test_unnamed_typedef_is_transparent() {
        let (ctf, ids) = sample(CTF_VERSION_2);
        assert_eq!(ctf.type_name(ids.hidden_int).unwrap(), "int");
    }

    #[test]
    fn test_child_names_use_parent_types() {
        let (child, _, child_ids) = child_sample(CTF_VERSION_4);
        assert_eq!(child.type_name(child_ids.handle).unwrap(), "handle_t");
        assert_eq!(child.type_name(child_ids.handle_ptr).unwrap(), "handle_t *");
        assert_eq!(child.type_name(child_ids.node_array).unwrap(), "struct node [2]");
    }

    #[test]
    fn test_cycles_fail() {
        let (ctf, ids) = sample(CTF_VERSION_4);
        assert!(matches!(ctf.type_name(ids.loop_a), Err(CtfError::Corrupt(_))));
    }

    #[test]
    fn test_self_pointer_among_many_types() {
        let mut b = ContainerBuilder::new(CTF_VERSION_4);
        for _ in 0..5000 {
            b.add_integer("filler", Encoding::signed(32), false);
        }
        let ptr = b.next_id();
        b.add_pointer(ptr, true);
        let arr = b.add_array(ptr, ptr, 4, true);
        let ctf = b.open(None, &Config::default()).unwrap();
        assert!(matches!(ctf.type_name(ptr), Err(CtfError::Corrupt(_))));
        assert!(matches!(ctf.type_name(arr), Err(CtfError::Corrupt(_))));
    }
}
