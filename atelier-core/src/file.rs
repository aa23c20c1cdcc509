use std::fs::File;
use std::path::Path;
use anyhow::Context;
use memmap2::Mmap;

/// Load a file using memory mapping.
pub fn load_with_memory_mapping(path: impl AsRef<Path>) -> anyhow::Result<Mmap> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    unsafe { Mmap::map(&file) }.with_context(|| format!("Failed to map {:?}", path))
}

pub fn load_to_string(path: impl AsRef<Path>) -> anyhow::Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}
