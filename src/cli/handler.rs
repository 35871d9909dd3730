// Mon Oct 19 2026 - Alex

use super::args::{Args, Command};
use super::report::{self, InfoReport, MembersReport, SymbolReport, TypeReport};
use crate::config::Config;
use crate::container::Container;
use crate::object;
use colored::Colorize;
use log::{info, warn};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

pub struct CommandHandler {
    json: bool,
}

impl CommandHandler {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args);
        if args.no_color {
            colored::control::set_override(false);
        }
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = match &args.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        let ctf = self.open(&args.file, args.parent.as_deref(), &config)?;

        match args.command {
            Command::Info => self.emit(&report::info(&ctf), Self::print_info),
            Command::Lookup { name } => self.emit(&report::lookup(&ctf, &name)?, Self::print_type),
            Command::Members { name } => {
                self.emit(&report::members(&ctf, &name)?, Self::print_members)
            }
            Command::Dump => self.emit(&report::dump(&ctf), Self::print_dump),
            Command::Symbol { index } => {
                self.emit(&report::symbol(&ctf, index)?, Self::print_symbol)
            }
        }
    }

    fn setup_logging(&self, args: &Args) {
        env_logger::Builder::new()
            .filter_level(args.level_filter())
            .format_timestamp(None)
            .init();
    }

    fn open(
        &self,
        file: &Path,
        parent: Option<&Path>,
        config: &Config,
    ) -> anyhow::Result<Container> {
        let ctf = object::load_file(file, config)?;
        match parent {
            Some(path) => {
                let parent = Arc::new(object::load_file(path, config)?);
                info!("attaching parent {}", path.display());
                Ok(ctf.import(parent)?)
            }
            None => {
                if let Some(name) = ctf.parent_name() {
                    warn!(
                        "{} is a child of {}; pass --parent to resolve its parent types",
                        file.display(),
                        name
                    );
                }
                Ok(ctf)
            }
        }
    }

    fn emit<T: Serialize>(&self, value: &T, print: fn(&T)) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print(value);
        }
        Ok(())
    }

    fn print_info(info: &InfoReport) {
        println!("{}", "CTF container".cyan().bold());
        println!("  Version:     {}", info.version);
        println!("  Data model:  {}", info.data_model);
        println!("  Types:       {}", info.types);
        if info.child {
            let parent = info.parent_name.as_deref().unwrap_or("(?)");
            let state = if info.parent_attached {
                "attached".green()
            } else {
                "not attached".yellow()
            };
            println!("  Parent:      {} ({})", parent, state);
            if let Some(label) = &info.parent_label {
                println!("  Label:       {}", label);
            }
        }
        match info.symbols {
            Some(count) => {
                println!("  Symbols:     {} ({} with type data)", count, info.typed_symbols)
            }
            None => println!("  Symbols:     {}", "none".dimmed()),
        }
    }

    fn type_line(ty: &TypeReport) -> String {
        let mut line = format!(
            "{:>10}  {:<9} {}",
            format!("<{}>", ty.id).yellow(),
            ty.kind.name().blue(),
            ty.name.bold()
        );
        if let Some(size) = ty.size {
            line.push_str(&format!("  size {}", size));
        }
        if let Some(resolved) = ty.resolved {
            line.push_str(&format!("  -> <{}>", resolved));
        }
        line
    }

    fn print_type(ty: &TypeReport) {
        println!("{}", Self::type_line(ty));
        if let Some(align) = ty.align {
            println!("{:>12}align {}", "", align);
        }
    }

    fn print_members(report: &MembersReport) {
        println!("{}", Self::type_line(&report.ty));
        for m in &report.members {
            let name = if m.name.is_empty() { "(anon)" } else { m.name.as_str() };
            println!(
                "  {:>8}  {:<24} {} {}",
                format!("+{}", m.offset).cyan(),
                name,
                m.type_name,
                format!("<{}>", m.type_id).dimmed()
            );
        }
        for e in &report.enumerators {
            println!("  {:<24} = {}", e.name, e.value);
        }
    }

    fn print_dump(types: &Vec<TypeReport>) {
        for ty in types {
            println!("{}", Self::type_line(ty));
        }
        println!("{}", format!("{} types", types.len()).green());
    }

    fn print_symbol(report: &SymbolReport) {
        match report {
            SymbolReport::Object { index, name, ty } => {
                println!("[{}] {} {}", index, "object".blue(), name.bold());
                println!("  {}", Self::type_line(ty));
            }
            SymbolReport::Function {
                index,
                signature,
                ..
            } => {
                println!("[{}] {} {}", index, "function".blue(), signature.bold());
            }
        }
    }
}
