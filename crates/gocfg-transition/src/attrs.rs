//! Per-target transition attributes.
//!
//! [`RawAttributes`] is the untyped keyword form a target declaration
//! supplies; [`Attributes`] is the validated, typed record the transition
//! consumes. Converting one into the other performs every value-shape check,
//! so nothing unchecked reaches the overlay.

use std::collections::BTreeMap;
use std::fmt;

use gocfg_catalog::{Goarch, Goos, LinkMode, LinkModeCatalog, Platform};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransitionError};

/// Value meaning "inherit the ambient setting".
pub const AUTO: &str = "auto";

/// Attribute names understood by the transition.
pub mod keys {
    pub const GOOS: &str = "goos";
    pub const GOARCH: &str = "goarch";
    pub const PURE: &str = "pure";
    pub const STATIC: &str = "static";
    pub const RACE: &str = "race";
    pub const MSAN: &str = "msan";
    pub const GOTAGS: &str = "gotags";
    pub const LINKMODE: &str = "linkmode";
}

/// A tri-state flag: inherit, force on, or force off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Ternary {
    #[default]
    Auto,
    On,
    Off,
}

impl Ternary {
    pub const ALL: [Ternary; 3] = [Ternary::Auto, Ternary::On, Ternary::Off];

    /// Parse the value of the attribute `name`.
    pub fn parse(name: &'static str, value: &str) -> Result<Self> {
        match value {
            "auto" => Ok(Ternary::Auto),
            "on" => Ok(Ternary::On),
            "off" => Ok(Ternary::Off),
            _ => Err(TransitionError::InvalidTernary {
                name,
                value: value.to_string(),
            }),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Ternary::Auto => "auto",
            Ternary::On => "on",
            Ternary::Off => "off",
        }
    }

    /// `None` for `Auto`, otherwise whether the flag is on.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Ternary::Auto => None,
            Ternary::On => Some(true),
            Ternary::Off => Some(false),
        }
    }
}

impl fmt::Display for Ternary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either `auto` or a concrete catalog value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    Auto,
    Set(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::Auto
    }
}

impl<T> Choice<T> {
    pub fn is_auto(&self) -> bool {
        matches!(self, Choice::Auto)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Choice::Auto => None,
            Choice::Set(v) => Some(v),
        }
    }
}

/// Validated transition attributes for one target instantiation.
///
/// The default value requests no override at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub goos: Choice<Goos>,
    pub goarch: Choice<Goarch>,
    pub pure: Ternary,
    pub static_link: Ternary,
    pub race: Ternary,
    pub msan: Ternary,
    pub gotags: Vec<String>,
    pub linkmode: Choice<LinkMode>,
}

impl Attributes {
    /// Attributes that only override the platform.
    pub fn for_platform(goos: Goos, goarch: Goarch) -> Self {
        Self {
            goos: Choice::Set(goos),
            goarch: Choice::Set(goarch),
            ..Self::default()
        }
    }

    /// The requested platform, if any.
    ///
    /// Fails when only one of `goos`/`goarch` is set.
    pub fn platform(&self) -> Result<Option<Platform>> {
        match (self.goos, self.goarch) {
            (Choice::Auto, Choice::Auto) => Ok(None),
            (Choice::Set(goos), Choice::Set(goarch)) => Ok(Some(Platform::new(goos, goarch))),
            (Choice::Auto, Choice::Set(_)) => Err(incomplete(keys::GOOS, keys::GOARCH)),
            (Choice::Set(_), Choice::Auto) => Err(incomplete(keys::GOARCH, keys::GOOS)),
        }
    }

    /// Whether cgo linking is requested, which is exactly `pure = "off"`.
    pub fn cgo(&self) -> bool {
        self.pure == Ternary::Off
    }

    /// Validate raw keyword attributes against `linkmodes`.
    ///
    /// Keys that are not transition attributes are ignored.
    pub fn from_raw(raw: &RawAttributes, linkmodes: &LinkModeCatalog) -> Result<Self> {
        let (goos, goarch) = parse_platform(
            raw.string(keys::GOOS)?.unwrap_or(AUTO),
            raw.string(keys::GOARCH)?.unwrap_or(AUTO),
        )?;

        let linkmode = match raw.string(keys::LINKMODE)? {
            None | Some(AUTO) => Choice::Auto,
            Some(mode) => {
                let parsed = mode.parse::<LinkMode>().map_err(|_| invalid_linkmode(mode, linkmodes))?;
                Choice::Set(check_linkmode(parsed, linkmodes)?)
            }
        };

        Ok(Self {
            goos,
            goarch,
            pure: raw.ternary(keys::PURE)?,
            static_link: raw.ternary(keys::STATIC)?,
            race: raw.ternary(keys::RACE)?,
            msan: raw.ternary(keys::MSAN)?,
            gotags: raw.list(keys::GOTAGS)?.map(<[String]>::to_vec).unwrap_or_default(),
            linkmode,
        })
    }
}

fn incomplete(missing: &'static str, present: &'static str) -> TransitionError {
    TransitionError::IncompleteOverride { missing, present }
}

fn parse_platform(goos: &str, goarch: &str) -> Result<(Choice<Goos>, Choice<Goarch>)> {
    match (goos == AUTO, goarch == AUTO) {
        (true, true) => return Ok((Choice::Auto, Choice::Auto)),
        (true, false) => return Err(incomplete(keys::GOOS, keys::GOARCH)),
        (false, true) => return Err(incomplete(keys::GOARCH, keys::GOOS)),
        (false, false) => {}
    }
    let unsupported = || TransitionError::UnsupportedPlatform {
        goos: goos.to_string(),
        goarch: goarch.to_string(),
    };
    let os = goos.parse::<Goos>().map_err(|_| unsupported())?;
    let arch = goarch.parse::<Goarch>().map_err(|_| unsupported())?;
    Ok((Choice::Set(os), Choice::Set(arch)))
}

fn invalid_linkmode(mode: &str, linkmodes: &LinkModeCatalog) -> TransitionError {
    TransitionError::InvalidLinkMode {
        mode: mode.to_string(),
        valid: linkmodes.describe(),
    }
}

/// Reject a link mode the catalog does not accept.
pub(crate) fn check_linkmode(mode: LinkMode, linkmodes: &LinkModeCatalog) -> Result<LinkMode> {
    if linkmodes.contains(mode) {
        Ok(mode)
    } else {
        Err(invalid_linkmode(mode.as_str(), linkmodes))
    }
}

/// A raw attribute value as written in a target declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Str(String),
    List(Vec<String>),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Str(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Str(s)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(l: Vec<String>) -> Self {
        RawValue::List(l)
    }
}

/// The full keyword set supplied for a target instantiation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAttributes(BTreeMap<String, RawValue>);

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn string(&self, name: &'static str) -> Result<Option<&str>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(RawValue::Str(s)) => Ok(Some(s)),
            Some(RawValue::List(_)) => Err(TransitionError::AttributeType {
                name,
                expected: "a string",
            }),
        }
    }

    fn list(&self, name: &'static str) -> Result<Option<&[String]>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(RawValue::List(l)) => Ok(Some(l)),
            Some(RawValue::Str(_)) => Err(TransitionError::AttributeType {
                name,
                expected: "a list of strings",
            }),
        }
    }

    fn ternary(&self, name: &'static str) -> Result<Ternary> {
        self.string(name)?
            .map_or(Ok(Ternary::Auto), |v| Ternary::parse(name, v))
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
