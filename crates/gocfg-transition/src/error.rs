//! Transition error types.
//!
//! Every variant is terminal for the target instantiation it occurs in.

/// Errors raised while validating attributes or applying a transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Only one of `goos`/`goarch` was set.
    #[error("{missing} must be set if {present} is set")]
    IncompleteOverride {
        missing: &'static str,
        present: &'static str,
    },

    /// The `(goos, goarch)` pair is not in the platform catalog.
    #[error("invalid goos, goarch pair: {goos}, {goarch}")]
    UnsupportedPlatform { goos: String, goarch: String },

    /// `pure = "off"` on a platform that cannot link cgo.
    #[error("pure is \"off\" but cgo is not supported on {goos} {goarch}")]
    CgoUnsupported { goos: String, goarch: String },

    /// A ternary attribute holds something other than auto/on/off.
    #[error("{name}: must be \"on\", \"off\", or \"auto\"")]
    InvalidTernary { name: &'static str, value: String },

    /// `linkmode` is not in the link-mode catalog.
    #[error("linkmode: invalid mode {mode}; want one of {valid}")]
    InvalidLinkMode { mode: String, valid: String },

    /// An attribute was given a list where a string is expected, or the reverse.
    #[error("{name}: expected {expected}")]
    AttributeType {
        name: &'static str,
        expected: &'static str,
    },
}

/// Result type for transition operations.
pub type Result<T> = std::result::Result<T, TransitionError>;
