//! Go platform and link-mode catalogs.
//!
//! The catalogs are read-only lookup tables consulted by the transition
//! engine:
//! - **Platform catalog:** every supported `(goos, goarch)` pair, and the
//!   subset of those pairs on which cgo linking works.
//! - **Link-mode catalog:** the `-buildmode` values a target may request.
//!
//! Both ship with a built-in default and can be replaced by a
//! `.catalog.toml` file (see [`parse`]).

pub mod error;
pub mod linkmode;
pub mod os;
pub mod arch;
pub mod parse;
pub mod platform;

pub use arch::Goarch;
pub use error::{CatalogError, Result};
pub use linkmode::{LinkMode, LinkModeCatalog};
pub use os::Goos;
pub use platform::{Platform, PlatformCatalog, PlatformEntry};
