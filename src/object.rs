// Mon Oct 19 2026 - Alex

//! Loading CTF from files: bare CTF data, or the CTF section and symbol
//! table of an ELF or Mach-O object.

use crate::config::Config;
use crate::container::Container;
use crate::error::{CtfError, Result};
use crate::format::CTF_MAGIC;
use crate::symbol::{SymbolFormat, SymbolTable};
use goblin::elf::section_header::SHT_SYMTAB;
use goblin::elf::Elf;
use goblin::mach::load_command::CommandVariant;
use goblin::mach::{Mach, MachO};
use goblin::Object;
use log::{debug, info};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

const MACHO_CTF_SEGMENT: &str = "__CTF";
const MACHO_CTF_SECTION: &str = "__ctf";

/// CTF bytes pulled out of a file, with the symbol table that goes with them.
pub struct CtfSource {
    pub data: Vec<u8>,
    pub symtab: Option<SymbolTable>,
}

pub fn load_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<Container> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file) }?;

    let source = extract(&mmap, config)?;
    info!(
        "loaded {} bytes of CTF from {}{}",
        source.data.len(),
        path.display(),
        if source.symtab.is_some() { " with symbols" } else { "" }
    );
    Container::open(source.data, source.symtab, config)
}

/// Finds the CTF data in an in-memory file image.
pub fn extract(data: &[u8], config: &Config) -> Result<CtfSource> {
    if data.len() >= 2 && u16::from_le_bytes([data[0], data[1]]) == CTF_MAGIC {
        debug!("raw CTF data");
        return Ok(CtfSource {
            data: data.to_vec(),
            symtab: None,
        });
    }

    match Object::parse(data).map_err(object_error)? {
        Object::Elf(elf) => from_elf(&elf, data, config),
        Object::Mach(Mach::Binary(macho)) => from_macho(&macho, data),
        Object::Mach(Mach::Fat(_)) => Err(CtfError::Unsupported(
            "fat Mach-O files; extract a single architecture first".to_string(),
        )),
        _ => Err(CtfError::Object("not a CTF, ELF or Mach-O file".to_string())),
    }
}

fn object_error(err: goblin::error::Error) -> CtfError {
    CtfError::Object(err.to_string())
}

fn slice(data: &[u8], offset: u64, size: u64, what: &str) -> Result<Vec<u8>> {
    let start = usize::try_from(offset)
        .map_err(|_| CtfError::Object(format!("{} offset out of range", what)))?;
    let len = usize::try_from(size)
        .map_err(|_| CtfError::Object(format!("{} size out of range", what)))?;
    start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .map(<[u8]>::to_vec)
        .ok_or_else(|| CtfError::Object(format!("{} extends past end of file", what)))
}

fn from_elf(elf: &Elf, data: &[u8], config: &Config) -> Result<CtfSource> {
    if !elf.little_endian {
        return Err(CtfError::Unsupported("big-endian objects".to_string()));
    }

    let section_named = |wanted: &str| {
        elf.section_headers
            .iter()
            .find(|sh| elf.shdr_strtab.get_at(sh.sh_name) == Some(wanted))
    };

    let (name, ctf) = config
        .elf_sections
        .iter()
        .find_map(|name| section_named(name).map(|sh| (name, sh)))
        .ok_or_else(|| {
            CtfError::Object(format!("no CTF section (tried {})", config.elf_sections.join(", ")))
        })?;
    debug!("ELF section {}: {} bytes at {:#x}", name, ctf.sh_size, ctf.sh_offset);
    let ctf = slice(data, ctf.sh_offset, ctf.sh_size, name)?;

    let format = if elf.is_64 {
        SymbolFormat::Elf64
    } else {
        SymbolFormat::Elf32
    };
    let symtab = match elf.section_headers.iter().find(|sh| sh.sh_type == SHT_SYMTAB) {
        Some(sh) => {
            let strtab = elf
                .section_headers
                .get(sh.sh_link as usize)
                .ok_or_else(|| {
                    CtfError::Object("symbol table links to a missing string table".to_string())
                })?;
            let entries = slice(data, sh.sh_offset, sh.sh_size, ".symtab")?;
            let strings = slice(data, strtab.sh_offset, strtab.sh_size, "symbol string table")?;
            Some(SymbolTable::new(format, entries, strings)?)
        }
        None => {
            debug!("ELF object has no .symtab");
            None
        }
    };

    Ok(CtfSource { data: ctf, symtab })
}

fn from_macho(macho: &MachO, data: &[u8]) -> Result<CtfSource> {
    if !macho.little_endian {
        return Err(CtfError::Unsupported("big-endian objects".to_string()));
    }

    let mut ctf = None;
    for segment in &macho.segments {
        for (section, bytes) in segment.sections().map_err(object_error)? {
            let segname = section.segname().map_err(object_error)?;
            let sectname = section.name().map_err(object_error)?;
            if segname == MACHO_CTF_SEGMENT && sectname == MACHO_CTF_SECTION {
                ctf = Some(bytes.to_vec());
            }
        }
    }
    let ctf = ctf.ok_or_else(|| {
        CtfError::Object(format!("no {},{} section", MACHO_CTF_SEGMENT, MACHO_CTF_SECTION))
    })?;

    let format = if macho.is_64 {
        SymbolFormat::MachO64
    } else {
        SymbolFormat::MachO32
    };
    let mut symtab = None;
    for lc in &macho.load_commands {
        if let CommandVariant::Symtab(cmd) = &lc.command {
            let size = cmd.nsyms as u64 * format.entry_size() as u64;
            let entries = slice(data, cmd.symoff as u64, size, "LC_SYMTAB entries")?;
            let strings = slice(data, cmd.stroff as u64, cmd.strsize as u64, "LC_SYMTAB strings")?;
            symtab = Some(SymbolTable::new(format, entries, strings)?);
            break;
        }
    }
    if symtab.is_none() {
        debug!("Mach-O object has no LC_SYMTAB");
    }

    Ok(CtfSource { data: ctf, symtab })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SymtabBuilder;
    use crate::container::DataModel;
    use crate::format::CTF_VERSION_4;
    use crate::testutil::sample_builder;
    use std::io::Write;

    const SHT_PROGBITS: u32 = 1;
    const SHT_STRTAB: u32 = 3;

    fn align8(out: &mut Vec<u8>) {
        while out.len() % 8 != 0 {
            out.push(0);
        }
    }

    fn section_header(
        out: &mut Vec<u8>,
        name: u32,
        kind: u32,
        offset: usize,
        size: usize,
        link: u32,
        entsize: u64,
    ) {
        out.extend_from_slice(&name.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes());
        out.extend_from_slice(&(offset as u64).to_le_bytes());
        out.extend_from_slice(&(size as u64).to_le_bytes());
        out.extend_from_slice(&link.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&1u64.to_le_bytes());
        out.extend_from_slice(&entsize.to_le_bytes());
    }

    /// A relocatable ELF64 file holding `.SUNW_ctf`, `.symtab`, `.strtab`
    /// and `.shstrtab`.
    fn elf64_image(ctf: &[u8], symtab: &SymbolTable) -> Vec<u8> {
        let shstrtab = b"\0.SUNW_ctf\0.symtab\0.strtab\0.shstrtab\0";
        let mut out = vec![0u8; 64];

        let ctf_off = out.len();
        out.extend_from_slice(ctf);
        align8(&mut out);
        let sym_off = out.len();
        out.extend_from_slice(symtab.data());
        let str_off = out.len();
        out.extend_from_slice(symtab.strtab());
        let shstr_off = out.len();
        out.extend_from_slice(shstrtab);
        align8(&mut out);
        let shoff = out.len();

        out.extend_from_slice(&[0u8; 64]);
        section_header(&mut out, 1, SHT_PROGBITS, ctf_off, ctf.len(), 0, 0);
        section_header(&mut out, 11, SHT_SYMTAB, sym_off, symtab.data().len(), 3, 24);
        section_header(&mut out, 19, SHT_STRTAB, str_off, symtab.strtab().len(), 0, 0);
        section_header(&mut out, 27, SHT_STRTAB, shstr_off, shstrtab.len(), 0, 0);

        let mut header = Vec::with_capacity(64);
        header.extend_from_slice(&[0x7f, b'E', b'L', b'F', 2, 1, 1, 0]);
        header.extend_from_slice(&[0u8; 8]);
        header.extend_from_slice(&1u16.to_le_bytes());
        header.extend_from_slice(&62u16.to_le_bytes());
        header.extend_from_slice(&1u32.to_le_bytes());
        header.extend_from_slice(&0u64.to_le_bytes());
        header.extend_from_slice(&0u64.to_le_bytes());
        header.extend_from_slice(&(shoff as u64).to_le_bytes());
        header.extend_from_slice(&0u32.to_le_bytes());
        header.extend_from_slice(&64u16.to_le_bytes());
        header.extend_from_slice(&56u16.to_le_bytes());
        header.extend_from_slice(&0u16.to_le_bytes());
        header.extend_from_slice(&64u16.to_le_bytes());
        header.extend_from_slice(&5u16.to_le_bytes());
        header.extend_from_slice(&4u16.to_le_bytes());
        out[..64].copy_from_slice(&header);
        out
    }

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_raw_ctf() {
        let (b, ids) = sample_builder(CTF_VERSION_4);
        let file = write_temp(&b.build());
        let ctf = load_file(file.path(), &Config::default()).unwrap();
        assert_eq!(ctf.lookup_by_name("struct node").unwrap(), ids.node);
        assert!(ctf.symtab().is_none());
    }

    #[test]
    fn test_load_elf_object() {
        let (mut b, ids) = sample_builder(CTF_VERSION_4);
        b.add_object_symbol(ids.long);
        b.add_function_symbol(ids.int, &[ids.int, ids.char_ptr], false);

        let mut symtab = SymtabBuilder::new(SymbolFormat::Elf64);
        symtab.object("counter");
        symtab.function("puts");
        let symtab = symtab.build().unwrap();

        let file = write_temp(&elf64_image(&b.build(), &symtab));
        let ctf = load_file(file.path(), &Config::default()).unwrap();
        assert_eq!(ctf.data_model(), DataModel::Lp64);
        assert_eq!(ctf.lookup_by_symbol(1).unwrap(), ids.long);
        let info = ctf.func_info(2).unwrap();
        assert_eq!(info.return_type, ids.int);
        assert_eq!(info.argc, 2);
    }

    #[test]
    fn test_missing_ctf_section() {
        let (b, _) = sample_builder(CTF_VERSION_4);
        let symtab = SymtabBuilder::new(SymbolFormat::Elf64).build().unwrap();
        let image = elf64_image(&b.build(), &symtab);
        let config = Config {
            elf_sections: vec![".ctf".to_string()],
            ..Config::default()
        };
        assert!(matches!(extract(&image, &config), Err(CtfError::Object(_))));
    }

    #[test]
    fn test_rejects_unknown_files() {
        assert!(matches!(
            extract(b"definitely not an object file", &Config::default()),
            Err(CtfError::Object(_))
        ));
        assert!(matches!(
            load_file("/nonexistent/ctf-query/input", &Config::default()),
            Err(CtfError::Io(_))
        ));
    }
}
