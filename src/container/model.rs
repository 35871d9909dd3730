// Mon Oct 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data model of the program the types describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataModel {
    Ilp32,
    Lp64,
}

impl DataModel {
    pub fn native() -> Self {
        if cfg!(target_pointer_width = "64") {
            DataModel::Lp64
        } else {
            DataModel::Ilp32
        }
    }

    pub fn pointer_size(self) -> u64 {
        match self {
            DataModel::Ilp32 => 4,
            DataModel::Lp64 => 8,
        }
    }

    pub fn char_size(self) -> u64 {
        1
    }

    pub fn short_size(self) -> u64 {
        2
    }

    pub fn int_size(self) -> u64 {
        4
    }

    pub fn long_size(self) -> u64 {
        self.pointer_size()
    }

    pub fn name(self) -> &'static str {
        match self {
            DataModel::Ilp32 => "ILP32",
            DataModel::Lp64 => "LP64",
        }
    }
}

impl Default for DataModel {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for DataModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
