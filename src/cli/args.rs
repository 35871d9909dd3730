// Mon Oct 19 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ctf-query")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Query Compact C Type Format data in raw, ELF and Mach-O files")]
#[command(long_about = None)]
pub struct Args {
    /// File holding the CTF data
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,

    /// File holding the parent container of a child container
    #[arg(short, long, global = true)]
    pub parent: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Header and table summary
    Info,
    /// Look a type up by its C name
    Lookup { name: String },
    /// Members of a struct or union, or the values of an enum
    Members { name: String },
    /// Every type in the container
    Dump,
    /// Type information for a symbol table entry
    Symbol { index: usize },
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if !self.file.exists() {
            return Err(format!("Input file does not exist: {:?}", self.file));
        }
        if let Some(parent) = &self.parent {
            if !parent.exists() {
                return Err(format!("Parent file does not exist: {:?}", parent));
            }
        }
        Ok(())
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Warn,
        }
    }
}
