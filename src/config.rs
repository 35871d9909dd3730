// Mon Oct 19 2026 - Alex

use crate::container::DataModel;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forces the data model instead of deriving it from the symbol table.
    pub data_model: Option<DataModel>,
    /// Overrides whether the symbol table is trusted to classify function
    /// symbols.
    pub check_function_symbols: Option<bool>,
    /// Element count of the D `string` type.
    pub string_size: u32,
    /// Section names searched for CTF data in ELF objects.
    pub elf_sections: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_model: None,
            check_function_symbols: None,
            string_size: 256,
            elf_sections: vec![".SUNW_ctf".to_string(), ".ctf".to_string()],
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_model(mut self, model: DataModel) -> Self {
        self.data_model = Some(model);
        self
    }

    pub fn with_function_checks(mut self, check: bool) -> Self {
        self.check_function_symbols = Some(check);
        self
    }

    pub fn with_string_size(mut self, size: u32) -> Self {
        self.string_size = size;
        self
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.string_size == 0 {
            return Err("string_size must be greater than 0".to_string());
        }
        if self.elf_sections.is_empty() {
            return Err("elf_sections must name at least one section".to_string());
        }
        Ok(())
    }
}
