//! Built-in schemas for common executable headers.

/// ELF64 file header (64 bytes).
pub const ELF64: &str = r#"{
    "magic": "raw:\u007fELF",
    "ei_class": "u8",
    "ei_data": "u8",
    "ei_version": "u8",
    "ei_osabi": "u8",
    "ei_abiversion": "u8",
    "ei_pad": 7,
    "e_type": "u16",
    "e_machine": "u16",
    "e_version": "u32",
    "e_entry": "u64",
    "e_phoff": "u64",
    "e_shoff": "u64",
    "e_flags": "u32",
    "e_ehsize": "u16",
    "e_phentsize": "u16",
    "e_phnum": "u16",
    "e_shentsize": "u16",
    "e_shnum": "u16",
    "e_shstrndx": "u16"
}"#;

/// ELF64 program header (56 bytes).
pub const ELF64_PHDR: &str = r#"{
    "p_type": "u32",
    "p_flags": "u32",
    "p_offset": "u64",
    "p_vaddr": "u64",
    "p_paddr": "u64",
    "p_filesz": "u64",
    "p_memsz": "u64",
    "p_align": "u64"
}"#;

/// ELF64 section header (64 bytes).
pub const ELF64_SHDR: &str = r#"{
    "sh_name": "u32",
    "sh_type": "u32",
    "sh_flags": "u64",
    "sh_addr": "u64",
    "sh_offset": "u64",
    "sh_size": "u64",
    "sh_link": "u32",
    "sh_info": "u32",
    "sh_addralign": "u64",
    "sh_entsize": "u64"
}"#;

/// Every built-in schema, by registry name.
pub const ALL: &[(&str, &str)] = &[
    ("ELF64", ELF64),
    ("ELF64_PHDR", ELF64_PHDR),
    ("ELF64_SHDR", ELF64_SHDR),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Descriptor;

    #[test]
    fn builtin_sizes_match_elf_abi() {
        assert_eq!(Descriptor::from_notation(ELF64).unwrap().size(), 64);
        assert_eq!(Descriptor::from_notation(ELF64_PHDR).unwrap().size(), 56);
        assert_eq!(Descriptor::from_notation(ELF64_SHDR).unwrap().size(), 64);
    }

    #[test]
    fn elf64_field_offsets() {
        let entries = Descriptor::from_notation(ELF64).unwrap().layout_entries();
        let offset_of = |path: &str| entries.iter().find(|e| e.path == path).map(|e| e.offset);
        assert_eq!(offset_of("e_type"), Some(16));
        assert_eq!(offset_of("e_entry"), Some(24));
        assert_eq!(offset_of("e_phoff"), Some(32));
        assert_eq!(offset_of("e_shstrndx"), Some(62));
    }
}
