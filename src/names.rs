// Mon Oct 19 2026 - Alex

//! Name resolution: C type names such as `const struct foo *` to type IDs.

use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::TypeId;
use log::debug;

const QUALIFIERS: &[&str] = &[
    "static", "volatile", "auto", "extern", "const", "register", "restrict", "_Restrict",
];

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_delimiter(b: u8) -> bool {
    is_space(b) || b == b'*'
}

fn is_qualifier(token: &[u8]) -> bool {
    QUALIFIERS.iter().any(|q| q.as_bytes() == token)
}

impl Container {
    /// Finds the type a C type name denotes.
    ///
    /// Qualifiers are ignored, a leading `struct`, `union` or `enum` selects
    /// the matching namespace and each trailing `*` steps to the pointer of
    /// the type so far. A child that cannot satisfy the name retries it in its
    /// parent.
    pub fn lookup_by_name(&self, name: &str) -> Result<TypeId> {
        match self.lookup_local(name) {
            Err(CtfError::NotFound) => match self.parent() {
                Some(parent) => parent.lookup_by_name(name).map_err(|err| {
                    debug!("lookup of {:?} failed in parent: {}", name, err);
                    CtfError::NotFound
                }),
                None => Err(CtfError::NotFound),
            },
            other => other,
        }
    }

    fn lookup_local(&self, name: &str) -> Result<TypeId> {
        let bytes = name.as_bytes();
        let end = bytes.len();
        let mut id = TypeId::NONE;
        let mut p = 0;

        while p < end {
            while p < end && is_space(bytes[p]) {
                p += 1;
            }
            if p == end {
                break;
            }
            let mut q = bytes[p + 1..]
                .iter()
                .position(|&b| is_delimiter(b))
                .map_or(end, |i| p + 1 + i);

            if bytes[p] == b'*' {
                id = self.pointer_step(id)?;
                p += 1;
                continue;
            }

            let token = &bytes[p..q];
            if is_qualifier(token) {
                p = q;
                continue;
            }

            let table = self
                .lookups()
                .iter()
                .find(|t| t.prefix().is_empty() || t.prefix().as_bytes() == token)
                .ok_or(CtfError::NotFound)?;

            p += table.prefix().len();
            while p < end && is_space(bytes[p]) {
                p += 1;
            }
            q = bytes[p..]
                .iter()
                .position(|&b| b == b'*')
                .map_or(end, |i| p + i);
            let next = q;
            while q > p && is_space(bytes[q - 1]) {
                q -= 1;
            }

            let ident = std::str::from_utf8(&bytes[p..q]).map_err(|_| CtfError::NotFound)?;
            id = table.get(ident).ok_or(CtfError::NotFound)?;
            p = next;
        }

        if id.is_none() {
            return Err(CtfError::Syntax);
        }
        Ok(id)
    }

    /// The pointer to `id` recorded in this container, trying the resolved
    /// base type when `id` itself has none.
    fn pointer_step(&self, id: TypeId) -> Result<TypeId> {
        if id.is_none() {
            return Err(CtfError::Syntax);
        }
        let schema = self.schema();
        let direct = self
            .owns_type(id)
            .then(|| self.pointer_index(schema.type_to_index(id)))
            .flatten();

        let index = match direct {
            Some(index) => index,
            None => {
                let base = self.resolve(id).map_err(|_| CtfError::NotFound)?;
                if !self.owns_type(base) {
                    return Err(CtfError::NotFound);
                }
                self.pointer_index(schema.type_to_index(base))
                    .ok_or(CtfError::NotFound)?
            }
        };

        Ok(schema.index_to_type(index, self.is_child()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{CTF_VERSION_2, CTF_VERSION_4};
    use crate::testutil::{child_sample, sample};

    #[test]
    fn test_plain_and_prefixed_names() {
        for version in [CTF_VERSION_2, CTF_VERSION_4] {
            let (ctf, ids) = sample(version);
            assert_eq!(ctf.lookup_by_name("int").unwrap(), ids.int);
            assert_eq!(ctf.lookup_by_name("  int\t").unwrap(), ids.int);
            assert_eq!(ctf.lookup_by_name("struct node").unwrap(), ids.node);
            assert_eq!(ctf.lookup_by_name("struct   node  ").unwrap(), ids.node);
            assert_eq!(ctf.lookup_by_name("enum color").unwrap(), ids.color);
            assert_eq!(ctf.lookup_by_name("unsigned long").unwrap(), ids.ulong);
            assert_eq!(ctf.lookup_by_name("size_t").unwrap(), ids.size_t);
        }
    }

    #[test]
    fn test_qualifiers_are_skipped() {
        let (ctf, ids) = sample(CTF_VERSION_4);
        assert_eq!(ctf.lookup_by_name("const int").unwrap(), ids.int);
        assert_eq!(ctf.lookup_by_name("static volatile int").unwrap(), ids.int);
        assert_eq!(ctf.lookup_by_name("const struct node").unwrap(), ids.node);
    }

    #[test]
    fn test_pointer_suffixes() {
        for version in [CTF_VERSION_2, CTF_VERSION_4] {
            let (ctf, ids) = sample(version);
            assert_eq!(ctf.lookup_by_name("int *").unwrap(), ids.int_ptr);
            assert_eq!(ctf.lookup_by_name("int*").unwrap(), ids.int_ptr);
            assert_eq!(ctf.lookup_by_name("struct node *").unwrap(), ids.node_ptr);
            // No pointer to size_t is recorded, so the base type's is used.
            assert_eq!(ctf.lookup_by_name("size_t *").unwrap(), ids.ulong_ptr);
        }
    }

    #[test]
    fn test_lookup_failures() {
        let (ctf, _) = sample(CTF_VERSION_4);
        assert!(matches!(ctf.lookup_by_name("struct nothing"), Err(CtfError::NotFound)));
        assert!(matches!(ctf.lookup_by_name("long *"), Err(CtfError::NotFound)));
        assert!(matches!(ctf.lookup_by_name("int **"), Err(CtfError::NotFound)));
        assert!(matches!(ctf.lookup_by_name(""), Err(CtfError::Syntax)));
        assert!(matches!(ctf.lookup_by_name("const"), Err(CtfError::Syntax)));
        assert!(matches!(ctf.lookup_by_name("*"), Err(CtfError::Syntax)));
    }

    #[test]
    fn test_child_falls_back_to_parent() {
        for version in [CTF_VERSION_2, CTF_VERSION_4] {
            let (child, parent_ids, child_ids) = child_sample(version);
            assert_eq!(child.lookup_by_name("handle_t").unwrap(), child_ids.handle);
            assert_eq!(child.lookup_by_name("int").unwrap(), parent_ids.int);
            assert_eq!(child.lookup_by_name("int *").unwrap(), parent_ids.int_ptr);
            assert_eq!(child.lookup_by_name("handle_t *").unwrap(), child_ids.handle_ptr);
            assert!(matches!(child.lookup_by_name("missing_t"), Err(CtfError::NotFound)));
        }
    }
}
