//! Build-configuration transition engine for Go targets.
//!
//! Given a target's declared build attributes and the active build settings,
//! computes the settings that apply to the target and its dependencies.
//!
//! - [`label`]: rewrites setting identifiers for the root/non-root workspace case.
//! - [`transition`]: the pure `(settings, attributes) -> settings` overlay.
//! - [`gate`]: decides whether a target needs the transition at all.

pub mod attrs;
pub mod error;
pub mod gate;
pub mod label;
pub mod settings;
pub mod transition;

pub use attrs::{Attributes, Choice, RawAttributes, RawValue, Ternary};
pub use error::{Result, TransitionError};
pub use label::LabelResolver;
pub use settings::{SettingValue, Settings};
pub use transition::Transition;
