//! Setting-identifier resolution.
//!
//! The host build system treats `@io_bazel_rules_go//go/config:pure` and
//! `//go/config:pure` as different settings when `io_bazel_rules_go` is the
//! main workspace. Every engine-owned setting must therefore be read and
//! written through [`LabelResolver::resolve`], or lookups silently miss.

/// Canonical name of the external repository that owns the engine's settings.
pub const DEFAULT_REPO: &str = "io_bazel_rules_go";

/// Prefix of host-defined command-line settings; never rewritten.
pub const COMMAND_LINE_PREFIX: &str = "//command_line_option:";

/// Rewrites setting identifiers depending on whether the engine's own
/// repository is the build root.
///
/// Built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelResolver {
    repo: String,
    is_main: bool,
}

impl LabelResolver {
    pub fn new(repo: impl Into<String>, is_main: bool) -> Self {
        Self {
            repo: repo.into(),
            is_main,
        }
    }

    /// Name of the owning repository, without the leading `@`.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Whether the owning repository is the main workspace.
    pub fn is_main(&self) -> bool {
        self.is_main
    }

    /// Normalize `label` for the current workspace layout.
    ///
    /// Strips `@<repo>` from `@<repo>//...` when the repo is the build root;
    /// returns everything else unchanged.
    pub fn resolve(&self, label: &str) -> String {
        if self.is_main {
            if let Some(rest) = label
                .strip_prefix('@')
                .and_then(|l| l.strip_prefix(self.repo.as_str()))
            {
                if rest.starts_with("//") {
                    return rest.to_string();
                }
            }
        }
        label.to_string()
    }

    /// Fully qualified, unresolved label of a package target in the owning repo.
    pub fn external_label(&self, package: &str, name: &str) -> String {
        format!("@{}//{}:{}", self.repo, package, name)
    }

    /// Resolved label of one of the engine's `go/config` settings.
    pub fn config_label(&self, name: &str) -> String {
        self.resolve(&self.external_label("go/config", name))
    }
}

impl Default for LabelResolver {
    fn default() -> Self {
        Self::new(DEFAULT_REPO, false)
    }
}
