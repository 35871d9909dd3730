// Mon Oct 19 2026 - Alex

use crate::format::TypeId;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameSpace {
    Struct,
    Union,
    Enum,
    Plain,
}

impl NameSpace {
    pub fn prefix(self) -> &'static str {
        match self {
            NameSpace::Struct => "struct",
            NameSpace::Union => "union",
            NameSpace::Enum => "enum",
            NameSpace::Plain => "",
        }
    }
}

/// One prefix category of the name lookup: `struct`, `union`, `enum`, or
/// plain names.
#[derive(Debug, Clone)]
pub struct LookupTable {
    space: NameSpace,
    names: HashMap<String, TypeId>,
}

impl LookupTable {
    pub fn new(space: NameSpace) -> Self {
        Self {
            space,
            names: HashMap::new(),
        }
    }

    /// The tables in the order the name resolver consults them. The plain
    /// table matches any token and must stay last.
    pub fn standard_set() -> Vec<LookupTable> {
        vec![
            LookupTable::new(NameSpace::Struct),
            LookupTable::new(NameSpace::Union),
            LookupTable::new(NameSpace::Enum),
            LookupTable::new(NameSpace::Plain),
        ]
    }

    pub fn space(&self) -> NameSpace {
        self.space
    }

    pub fn prefix(&self) -> &'static str {
        self.space.prefix()
    }

    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Inserts or replaces.
    pub fn define(&mut self, name: &str, id: TypeId) {
        self.names.insert(name.to_string(), id);
    }

    /// Inserts only when the name is not present yet.
    pub fn insert(&mut self, name: &str, id: TypeId) -> bool {
        if self.names.contains_key(name) {
            return false;
        }
        self.names.insert(name.to_string(), id);
        true
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
