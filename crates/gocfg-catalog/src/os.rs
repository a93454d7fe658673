//! Target operating systems (`GOOS`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A Go target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goos {
    Aix,
    Android,
    Darwin,
    Dragonfly,
    Freebsd,
    Illumos,
    Ios,
    Js,
    Linux,
    Netbsd,
    Openbsd,
    Plan9,
    Solaris,
    Windows,
}

impl Goos {
    /// Every known operating system, in lexical order.
    pub const ALL: [Goos; 14] = [
        Goos::Aix,
        Goos::Android,
        Goos::Darwin,
        Goos::Dragonfly,
        Goos::Freebsd,
        Goos::Illumos,
        Goos::Ios,
        Goos::Js,
        Goos::Linux,
        Goos::Netbsd,
        Goos::Openbsd,
        Goos::Plan9,
        Goos::Solaris,
        Goos::Windows,
    ];

    /// Returns the name as spelled in `GOOS`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Goos::Aix => "aix",
            Goos::Android => "android",
            Goos::Darwin => "darwin",
            Goos::Dragonfly => "dragonfly",
            Goos::Freebsd => "freebsd",
            Goos::Illumos => "illumos",
            Goos::Ios => "ios",
            Goos::Js => "js",
            Goos::Linux => "linux",
            Goos::Netbsd => "netbsd",
            Goos::Openbsd => "openbsd",
            Goos::Plan9 => "plan9",
            Goos::Solaris => "solaris",
            Goos::Windows => "windows",
        }
    }
}

impl fmt::Display for Goos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goos {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goos::ALL
            .into_iter()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownName {
                kind: "goos",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_name() {
        for os in Goos::ALL {
            assert_eq!(os.as_str().parse::<Goos>().unwrap(), os);
        }
    }

    #[test]
    fn reject_unknown() {
        let err = "beos".parse::<Goos>().unwrap_err();
        assert_eq!(err.to_string(), "unknown goos 'beos'");
    }

    #[test]
    fn reject_auto() {
        assert!("auto".parse::<Goos>().is_err());
    }
}
