//! The `(goos, goarch)` platform catalog.
//!
//! A platform is only buildable if it appears in the catalog, and only
//! linkable with cgo if its entry is marked cgo-capable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arch::Goarch;
use crate::os::Goos;

/// A `(goos, goarch)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub goos: Goos,
    pub goarch: Goarch,
}

impl Platform {
    pub const fn new(goos: Goos, goarch: Goarch) -> Self {
        Self { goos, goarch }
    }

    /// Name of the toolchain platform for this pair (e.g. `linux_amd64_cgo`).
    pub fn toolchain_name(&self, cgo: bool) -> String {
        format!(
            "{}_{}{}",
            self.goos,
            self.goarch,
            if cgo { "_cgo" } else { "" }
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.goos, self.goarch)
    }
}

/// One catalog row: a platform and whether cgo can be linked on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub goos: Goos,
    pub goarch: Goarch,
    #[serde(default)]
    pub cgo: bool,
}

impl PlatformEntry {
    pub const fn platform(&self) -> Platform {
        Platform::new(self.goos, self.goarch)
    }
}

const fn entry(goos: Goos, goarch: Goarch, cgo: bool) -> PlatformEntry {
    PlatformEntry { goos, goarch, cgo }
}

/// Go's supported ports as reported by `go tool dist list`.
const BUILTIN: &[PlatformEntry] = &[
    entry(Goos::Aix, Goarch::Ppc64, true),
    entry(Goos::Android, Goarch::I386, true),
    entry(Goos::Android, Goarch::Amd64, true),
    entry(Goos::Android, Goarch::Arm, true),
    entry(Goos::Android, Goarch::Arm64, true),
    entry(Goos::Darwin, Goarch::Amd64, true),
    entry(Goos::Darwin, Goarch::Arm64, true),
    entry(Goos::Dragonfly, Goarch::Amd64, true),
    entry(Goos::Freebsd, Goarch::I386, true),
    entry(Goos::Freebsd, Goarch::Amd64, true),
    entry(Goos::Freebsd, Goarch::Arm, true),
    entry(Goos::Freebsd, Goarch::Arm64, true),
    entry(Goos::Illumos, Goarch::Amd64, true),
    entry(Goos::Ios, Goarch::Amd64, true),
    entry(Goos::Ios, Goarch::Arm64, true),
    entry(Goos::Js, Goarch::Wasm, false),
    entry(Goos::Linux, Goarch::I386, true),
    entry(Goos::Linux, Goarch::Amd64, true),
    entry(Goos::Linux, Goarch::Arm, true),
    entry(Goos::Linux, Goarch::Arm64, true),
    entry(Goos::Linux, Goarch::Mips, true),
    entry(Goos::Linux, Goarch::Mips64, true),
    entry(Goos::Linux, Goarch::Mips64le, true),
    entry(Goos::Linux, Goarch::Mipsle, true),
    entry(Goos::Linux, Goarch::Ppc64, false),
    entry(Goos::Linux, Goarch::Ppc64le, true),
    entry(Goos::Linux, Goarch::Riscv64, true),
    entry(Goos::Linux, Goarch::S390x, true),
    entry(Goos::Netbsd, Goarch::I386, true),
    entry(Goos::Netbsd, Goarch::Amd64, true),
    entry(Goos::Netbsd, Goarch::Arm, true),
    entry(Goos::Netbsd, Goarch::Arm64, true),
    entry(Goos::Openbsd, Goarch::I386, true),
    entry(Goos::Openbsd, Goarch::Amd64, true),
    entry(Goos::Openbsd, Goarch::Arm, true),
    entry(Goos::Openbsd, Goarch::Arm64, true),
    entry(Goos::Plan9, Goarch::I386, false),
    entry(Goos::Plan9, Goarch::Amd64, false),
    entry(Goos::Plan9, Goarch::Arm, false),
    entry(Goos::Solaris, Goarch::Amd64, true),
    entry(Goos::Windows, Goarch::I386, true),
    entry(Goos::Windows, Goarch::Amd64, true),
    entry(Goos::Windows, Goarch::Arm, false),
    entry(Goos::Windows, Goarch::Arm64, false),
];

/// The set of valid platforms and its cgo-capable subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCatalog {
    platforms: Vec<PlatformEntry>,
}

impl PlatformCatalog {
    /// Build a catalog from explicit entries, keeping the given order.
    pub fn new(platforms: Vec<PlatformEntry>) -> Self {
        Self { platforms }
    }

    /// The catalog of ports the Go toolchain supports out of the box.
    pub fn builtin() -> Self {
        Self::new(BUILTIN.to_vec())
    }

    pub fn entries(&self) -> &[PlatformEntry] {
        &self.platforms
    }

    pub fn get(&self, platform: Platform) -> Option<&PlatformEntry> {
        self.platforms.iter().find(|e| e.platform() == platform)
    }

    /// Whether `platform` is a valid build target at all.
    pub fn contains(&self, platform: Platform) -> bool {
        self.get(platform).is_some()
    }

    /// Whether cgo linking is supported on `platform`.
    ///
    /// Platforms missing from the catalog are never cgo-capable.
    pub fn supports_cgo(&self, platform: Platform) -> bool {
        self.get(platform).is_some_and(|e| e.cgo)
    }

    /// Iterate over the cgo-capable subset.
    pub fn cgo_platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.platforms.iter().filter(|e| e.cgo).map(PlatformEntry::platform)
    }
}

impl Default for PlatformCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolchain_names() {
        let p = Platform::new(Goos::Linux, Goarch::Amd64);
        assert_eq!(p.toolchain_name(false), "linux_amd64");
        assert_eq!(p.toolchain_name(true), "linux_amd64_cgo");
        assert_eq!(Platform::new(Goos::Windows, Goarch::I386).to_string(), "windows_386");
    }

    #[test]
    fn builtin_membership() {
        let catalog = PlatformCatalog::builtin();
        assert!(catalog.contains(Platform::new(Goos::Linux, Goarch::Amd64)));
        assert!(catalog.contains(Platform::new(Goos::Js, Goarch::Wasm)));
        assert!(!catalog.contains(Platform::new(Goos::Js, Goarch::Amd64)));
        assert!(!catalog.contains(Platform::new(Goos::Darwin, Goarch::Mips)));
    }

    #[test]
    fn builtin_cgo_subset() {
        let catalog = PlatformCatalog::builtin();
        assert!(catalog.supports_cgo(Platform::new(Goos::Linux, Goarch::Amd64)));
        assert!(!catalog.supports_cgo(Platform::new(Goos::Linux, Goarch::Ppc64)));
        assert!(!catalog.supports_cgo(Platform::new(Goos::Js, Goarch::Wasm)));
        assert!(!catalog.supports_cgo(Platform::new(Goos::Js, Goarch::Amd64)));
        assert!(catalog
            .cgo_platforms()
            .all(|p| catalog.contains(p)));
    }

    #[test]
    fn builtin_has_no_duplicates() {
        let catalog = PlatformCatalog::builtin();
        let mut seen: Vec<Platform> = catalog.entries().iter().map(PlatformEntry::platform).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), catalog.entries().len());
    }
}
