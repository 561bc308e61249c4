//! Backend subdirectories of the cache root.

use std::path::{Path, PathBuf};

use kcache_common::Arch;

/// Returns the cache subdirectory used by `arch`, if it has one.
///
/// LLVM-based backends share `llvm`, Vulkan and OpenGL share `gfx`, and
/// Metal uses `metal`. Other backends store entries directly in the root.
pub fn arch_subdir(arch: Arch) -> Option<&'static str> {
    if arch.uses_llvm() {
        Some("llvm")
    } else if matches!(arch, Arch::Vulkan | Arch::Opengl) {
        Some("gfx")
    } else if arch == Arch::Metal {
        Some("metal")
    } else {
        None
    }
}

/// Computes the directory holding cache entries for `arch` under `base_path`.
///
/// Only computes the path; nothing is created on disk.
pub fn cache_path_by_arch(base_path: &Path, arch: Arch) -> PathBuf {
    match arch_subdir(arch) {
        Some(subdir) => base_path.join(subdir),
        None => base_path.to_path_buf(),
    }
}
