// Mon Oct 19 2026 - Alex

use crate::container::Container;
use crate::error::Result;
use crate::format::{Kind, TypeId};
use crate::resolve::check_depth;
use std::ops::ControlFlow;

impl Container {
    /// Pre-order walk of `id` and, for structs and unions, every member
    /// below it. The visitor gets the member name, the type as recorded
    /// (before resolving), the bit offset from the start of `id` and the
    /// nesting depth.
    pub fn visit<B, F>(&self, id: TypeId, mut f: F) -> Result<ControlFlow<B>>
    where
        F: FnMut(&str, TypeId, u64, usize) -> ControlFlow<B>,
    {
        self.visit_at(id, "", 0, 0, &mut f)
    }

    fn visit_at<B, F>(
        &self,
        id: TypeId,
        name: &str,
        offset: u64,
        depth: usize,
        f: &mut F,
    ) -> Result<ControlFlow<B>>
    where
        F: FnMut(&str, TypeId, u64, usize) -> ControlFlow<B>,
    {
        check_depth(depth, id)?;
        let resolved = self.resolve(id)?;
        let (owner, rec) = self.lookup_by_id(resolved)?;

        if let ControlFlow::Break(b) = f(name, id, offset, depth) {
            return Ok(ControlFlow::Break(b));
        }
        if !matches!(rec.kind, Kind::Struct | Kind::Union) {
            return Ok(ControlFlow::Continue(()));
        }

        for member in owner.schema().members(owner.version(), owner.body(), &rec) {
            let member = member?;
            let flow = self.visit_at(
                member.type_id,
                owner.strptr(member.name),
                offset + member.offset,
                depth + 1,
                f,
            )?;
            if flow.is_break() {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Calls `f` with every root type defined in this container, in index
    /// order.
    pub fn type_iter<B, F>(&self, mut f: F) -> Result<ControlFlow<B>>
    where
        F: FnMut(TypeId) -> ControlFlow<B>,
    {
        let schema = self.schema();
        for index in 1..=self.type_count() {
            let rec = self.record_at(index)?;
            if !rec.root {
                continue;
            }
            if let ControlFlow::Break(b) = f(schema.index_to_type(index as u32, self.is_child())) {
                return Ok(ControlFlow::Break(b));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CtfError;
    use crate::builder::ContainerBuilder;
    use crate::config::Config;
    use crate::format::{CTF_VERSION_2, CTF_VERSION_4};
    use crate::testutil::sample;

    #[test]
    fn test_visit_pre_order() {
        for version in [CTF_VERSION_2, CTF_VERSION_4] {
            let (ctf, ids) = sample(version);
            let mut seen = Vec::new();
            let flow = ctf
                .visit::<(), _>(ids.node_t, |name, id, offset, depth| {
                    seen.push((name.to_string(), id, offset, depth));
                    ControlFlow::Continue(())
                })
                .unwrap();
            assert!(flow.is_continue());
            assert_eq!(
                seen,
                vec![
                    (String::new(), ids.node_t, 0, 0),
                    ("a".to_string(), ids.int, 0, 1),
                    ("next".to_string(), ids.node_ptr, 64, 1),
                    (String::new(), ids.anon, 128, 1),
                    ("b".to_string(), ids.int, 128, 2),
                    ("c".to_string(), ids.long, 128, 2),
                ]
            );
        }
    }

    #[test]
    fn test_visit_break_propagates() {
        let (ctf, ids) = sample(CTF_VERSION_4);
        let flow = ctf
            .visit(ids.node, |name, _, offset, _| {
                if name == "b" {
                    ControlFlow::Break(offset)
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(flow, ControlFlow::Break(128));
    }

    #[test]
    fn test_visit_reports_cycles() {
        let (ctf, ids) = sample(CTF_VERSION_4);
        let result = ctf.visit::<(), _>(ids.loop_a, |_, _, _, _| ControlFlow::Continue(()));
        assert!(matches!(result, Err(CtfError::Corrupt(_))));
    }

    #[test]
    fn test_type_iter_skips_non_root() {
        let (ctf, ids) = sample(CTF_VERSION_4);
        let mut roots = Vec::new();
        ctf.type_iter::<(), _>(|id| {
            roots.push(id);
            ControlFlow::Continue(())
        })
        .unwrap();
        assert!(roots.contains(&ids.node));
        assert!(!roots.contains(&ids.anon));
        assert!(roots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_visit_self_containing_struct() {
        let mut b = ContainerBuilder::new(CTF_VERSION_2);
        let s = b.next_id();
        b.add_struct("s", 8, &[("me", s, 0)], true);
        let ctf = b.open(None, &Config::default()).unwrap();
        let mut calls = 0;
        let result = ctf.visit::<(), _>(s, |_, _, _, _| {
            calls += 1;
            ControlFlow::Continue(())
        });
        assert!(matches!(result, Err(CtfError::Corrupt(_))));
        assert!(calls > 1);
    }
}
