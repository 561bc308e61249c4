//! Compilation backend tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A compilation backend or target architecture.
///
/// The tag decides which cache subdirectory holds compiled kernels for the
/// backend. CPU and compute-GPU targets share an LLVM-based code generator
/// and therefore share a cache layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86-64 CPUs.
    X64,
    /// 64-bit ARM CPUs.
    Arm64,
    /// NVIDIA GPUs via CUDA.
    Cuda,
    /// AMD GPUs via ROCm.
    Amdgpu,
    /// Direct3D 12.
    Dx12,
    /// WebAssembly.
    Wasm,
    /// Vulkan graphics/compute.
    Vulkan,
    /// OpenGL compute shaders.
    Opengl,
    /// OpenGL ES compute shaders.
    Gles,
    /// Apple Metal.
    Metal,
}

impl Arch {
    /// Every supported architecture, in declaration order.
    pub const ALL: [Arch; 10] = [
        Arch::X64,
        Arch::Arm64,
        Arch::Cuda,
        Arch::Amdgpu,
        Arch::Dx12,
        Arch::Wasm,
        Arch::Vulkan,
        Arch::Opengl,
        Arch::Gles,
        Arch::Metal,
    ];

    /// Returns `true` if kernels for this architecture are generated through LLVM.
    pub fn uses_llvm(self) -> bool {
        matches!(
            self,
            Arch::X64 | Arch::Arm64 | Arch::Cuda | Arch::Amdgpu | Arch::Dx12 | Arch::Wasm
        )
    }

    /// Returns the canonical lowercase name (e.g., `"cuda"`, `"vulkan"`).
    pub fn name(self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
            Arch::Cuda => "cuda",
            Arch::Amdgpu => "amdgpu",
            Arch::Dx12 => "dx12",
            Arch::Wasm => "wasm",
            Arch::Vulkan => "vulkan",
            Arch::Opengl => "opengl",
            Arch::Gles => "gles",
            Arch::Metal => "metal",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a known architecture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown architecture: '{input}'")]
pub struct ParseArchError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Arch {
    type Err = ParseArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Arch::ALL
            .into_iter()
            .find(|arch| arch.name() == lower)
            .ok_or_else(|| ParseArchError {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llvm_backed_archs() {
        for arch in [Arch::X64, Arch::Arm64, Arch::Cuda, Arch::Amdgpu, Arch::Dx12, Arch::Wasm] {
            assert!(arch.uses_llvm(), "{arch} should use LLVM");
        }
    }

    #[test]
    fn graphics_archs_do_not_use_llvm() {
        for arch in [Arch::Vulkan, Arch::Opengl, Arch::Gles, Arch::Metal] {
            assert!(!arch.uses_llvm(), "{arch} should not use LLVM");
        }
    }

    #[test]
    fn parse_and_display_agree() {
        for arch in Arch::ALL {
            let parsed: Arch = arch.to_string().parse().unwrap();
            assert_eq!(parsed, arch);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("CUDA".parse::<Arch>().unwrap(), Arch::Cuda);
        assert_eq!(" Metal ".parse::<Arch>().unwrap(), Arch::Metal);
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "riscv".parse::<Arch>().unwrap_err();
        assert_eq!(err.to_string(), "unknown architecture: 'riscv'");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Arch::Opengl).unwrap();
        assert_eq!(json, "\"opengl\"");
        let back: Arch = serde_json::from_str("\"amdgpu\"").unwrap();
        assert_eq!(back, Arch::Amdgpu);
    }
}
