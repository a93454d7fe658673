//! Invocation gate: whether a target needs the transition at all.
//!
//! Targets that request no override share one canonical configuration with
//! their siblings. Routing them through even a no-op transition would give
//! them a distinct configuration and force redundant rebuilds. The decision
//! is purely syntactic: it looks at which keys are present, never at their
//! values, since values are only resolved at analysis time.

use std::fmt;

use tracing::debug;

use crate::attrs::{keys, RawAttributes};

/// Attribute keys whose presence requires the transitioning rule variant.
pub const TRANSITION_KEYS: [&str; 8] = [
    keys::GOOS,
    keys::GOARCH,
    keys::PURE,
    keys::STATIC,
    keys::MSAN,
    keys::RACE,
    keys::GOTAGS,
    keys::LINKMODE,
];

/// Which rule variant a target is instantiated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Built in the ambient configuration.
    Plain,
    /// Built through the transition.
    Transitioning,
}

impl Route {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Route::Plain => "plain",
            Route::Transitioning => "transitioning",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True if any of `keys` is a transition attribute.
pub fn needs_transition<'a>(keys: impl IntoIterator<Item = &'a str>) -> bool {
    keys.into_iter().any(|k| TRANSITION_KEYS.contains(&k))
}

/// Pick the rule variant for a target declared with `attrs`.
pub fn route(attrs: &RawAttributes) -> Route {
    if needs_transition(attrs.keys()) {
        Route::Transitioning
    } else {
        Route::Plain
    }
}

/// A rule and its transitioning twin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleKind {
    pub plain: &'static str,
    pub transitioning: &'static str,
}

impl RuleKind {
    pub const GO_BINARY: RuleKind = RuleKind {
        plain: "go_binary",
        transitioning: "go_transition_binary",
    };

    pub const GO_TEST: RuleKind = RuleKind {
        plain: "go_test",
        transitioning: "go_transition_test",
    };

    pub const fn rule_for(&self, route: Route) -> &'static str {
        match route {
            Route::Plain => self.plain,
            Route::Transitioning => self.transitioning,
        }
    }
}

/// A target declaration after gating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDecl {
    /// Name of the rule variant to instantiate.
    pub rule: &'static str,
    pub name: String,
    /// The arguments as given; the gate never rewrites them.
    pub attrs: RawAttributes,
    pub route: Route,
}

/// Declare target `name` of `kind`, choosing the rule variant from `attrs`.
pub fn declare(kind: &RuleKind, name: impl Into<String>, attrs: RawAttributes) -> TargetDecl {
    let name = name.into();
    let route = route(&attrs);
    let rule = kind.rule_for(route);
    debug!(name = %name, rule, %route, "declared target");
    TargetDecl {
        rule,
        name,
        attrs,
        route,
    }
}
