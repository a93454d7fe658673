//! Target architectures (`GOARCH`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A Go target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Goarch {
    #[serde(rename = "386")]
    I386,
    #[serde(rename = "amd64")]
    Amd64,
    #[serde(rename = "arm")]
    Arm,
    #[serde(rename = "arm64")]
    Arm64,
    #[serde(rename = "mips")]
    Mips,
    #[serde(rename = "mips64")]
    Mips64,
    #[serde(rename = "mips64le")]
    Mips64le,
    #[serde(rename = "mipsle")]
    Mipsle,
    #[serde(rename = "ppc64")]
    Ppc64,
    #[serde(rename = "ppc64le")]
    Ppc64le,
    #[serde(rename = "riscv64")]
    Riscv64,
    #[serde(rename = "s390x")]
    S390x,
    #[serde(rename = "wasm")]
    Wasm,
}

impl Goarch {
    /// Every known architecture.
    pub const ALL: [Goarch; 13] = [
        Goarch::I386,
        Goarch::Amd64,
        Goarch::Arm,
        Goarch::Arm64,
        Goarch::Mips,
        Goarch::Mips64,
        Goarch::Mips64le,
        Goarch::Mipsle,
        Goarch::Ppc64,
        Goarch::Ppc64le,
        Goarch::Riscv64,
        Goarch::S390x,
        Goarch::Wasm,
    ];

    /// Returns the name as spelled in `GOARCH`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Goarch::I386 => "386",
            Goarch::Amd64 => "amd64",
            Goarch::Arm => "arm",
            Goarch::Arm64 => "arm64",
            Goarch::Mips => "mips",
            Goarch::Mips64 => "mips64",
            Goarch::Mips64le => "mips64le",
            Goarch::Mipsle => "mipsle",
            Goarch::Ppc64 => "ppc64",
            Goarch::Ppc64le => "ppc64le",
            Goarch::Riscv64 => "riscv64",
            Goarch::S390x => "s390x",
            Goarch::Wasm => "wasm",
        }
    }
}

impl fmt::Display for Goarch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goarch {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goarch::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownName {
                kind: "goarch",
                value: s.to_string(),
            })
    }
}
