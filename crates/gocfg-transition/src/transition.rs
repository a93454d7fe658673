//! The configuration transition.
//!
//! A pure function from `(settings, attributes)` to a new set of settings.
//! The result is a sparse overlay: only settings an attribute explicitly
//! overrides change, every other key keeps its incoming value. No step reads
//! a setting written by another step, so the steps are order-independent.

use gocfg_catalog::{LinkModeCatalog, Platform, PlatformCatalog};
use tracing::debug;

use crate::attrs::{check_linkmode, Attributes, Choice, RawAttributes};
use crate::error::{Result, TransitionError};
use crate::label::LabelResolver;
use crate::settings::{config, SettingValue, Settings, PLATFORMS};

/// A configured transition: catalogs plus the label resolver.
///
/// Immutable after construction and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Transition {
    platforms: PlatformCatalog,
    linkmodes: LinkModeCatalog,
    resolver: LabelResolver,
}

impl Transition {
    pub fn new(platforms: PlatformCatalog, linkmodes: LinkModeCatalog, resolver: LabelResolver) -> Self {
        Self {
            platforms,
            linkmodes,
            resolver,
        }
    }

    pub fn platforms(&self) -> &PlatformCatalog {
        &self.platforms
    }

    pub fn linkmodes(&self) -> &LinkModeCatalog {
        &self.linkmodes
    }

    pub fn resolver(&self) -> &LabelResolver {
        &self.resolver
    }

    /// Validate raw keyword attributes against this transition's catalogs.
    pub fn parse_attributes(&self, raw: &RawAttributes) -> Result<Attributes> {
        Attributes::from_raw(raw, &self.linkmodes)
    }

    /// Settings the transition may read, as the host must declare them.
    pub fn inputs(&self) -> Vec<String> {
        self.outputs()
    }

    /// Settings the transition may write, as the host must declare them.
    pub fn outputs(&self) -> Vec<String> {
        std::iter::once(PLATFORMS.to_string())
            .chain(config::ALL.iter().map(|name| self.resolver.config_label(name)))
            .collect()
    }

    /// Parse `raw` and apply the result to `settings`.
    pub fn apply_raw(&self, settings: &Settings, raw: &RawAttributes) -> Result<Settings> {
        let attrs = self.parse_attributes(raw)?;
        self.apply(settings, &attrs)
    }

    /// Compute the outgoing settings for a target with `attrs`.
    ///
    /// `settings` is never modified. On error no overlay is produced.
    pub fn apply(&self, settings: &Settings, attrs: &Attributes) -> Result<Settings> {
        let mut out = settings.clone();

        if let Some(platform) = attrs.platform()? {
            let label = self.platform_label(platform, attrs.cgo())?;
            debug!(platform = %label, "overriding target platform");
            out.insert(PLATFORMS, label);
        }

        if let Some(pure) = attrs.pure.as_bool() {
            self.set(&mut out, config::PURE, pure);
        }

        for (name, value) in [
            (config::STATIC, attrs.static_link),
            (config::RACE, attrs.race),
            (config::MSAN, attrs.msan),
        ] {
            if let Some(on) = value.as_bool() {
                self.set(&mut out, name, on);
            }
        }

        if !attrs.gotags.is_empty() {
            self.set(&mut out, config::TAGS, attrs.gotags.clone());
        }

        if let Choice::Set(mode) = attrs.linkmode {
            let mode = check_linkmode(mode, &self.linkmodes)?;
            self.set(&mut out, config::LINKMODE, mode.as_str());
        }

        Ok(out)
    }

    /// Validate `platform` against the catalog and build its toolchain label.
    fn platform_label(&self, platform: Platform, cgo: bool) -> Result<String> {
        if !self.platforms.contains(platform) {
            return Err(TransitionError::UnsupportedPlatform {
                goos: platform.goos.to_string(),
                goarch: platform.goarch.to_string(),
            });
        }
        if cgo && !self.platforms.supports_cgo(platform) {
            return Err(TransitionError::CgoUnsupported {
                goos: platform.goos.to_string(),
                goarch: platform.goarch.to_string(),
            });
        }
        // Value of a host primitive; never resolved.
        Ok(self
            .resolver
            .external_label("go/toolchain", &platform.toolchain_name(cgo)))
    }

    fn set(&self, settings: &mut Settings, name: &str, value: impl Into<SettingValue>) {
        let label = self.resolver.config_label(name);
        let value = value.into();
        debug!(setting = %label, value = ?value, "overriding build setting");
        settings.insert(label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::Ternary;
    use crate::label::DEFAULT_REPO;
    use gocfg_catalog::{Goarch, Goos, LinkMode, PlatformEntry};

    fn ambient() -> Settings {
        Settings::new()
            .with(PLATFORMS, "@io_bazel_rules_go//go/toolchain:darwin_arm64")
            .with("@io_bazel_rules_go//go/config:pure", false)
            .with("@io_bazel_rules_go//go/config:race", false)
            .with("@io_bazel_rules_go//go/config:tags", vec!["base".to_string()])
            .with("@io_bazel_rules_go//go/config:linkmode", "normal")
            .with("//some/other:setting", "untouched")
    }

    fn raw(pairs: &[(&str, &str)]) -> RawAttributes {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn no_op_overlay_is_identity() {
        let t = Transition::default();
        for settings in [Settings::new(), ambient()] {
            assert_eq!(t.apply(&settings, &Attributes::default()).unwrap(), settings);
            assert_eq!(t.apply_raw(&settings, &RawAttributes::new()).unwrap(), settings);
        }
    }

    #[test]
    fn sparse_overlay_keeps_untouched_keys() {
        let t = Transition::default();
        let settings = ambient();
        let attrs = Attributes {
            race: Ternary::On,
            ..Attributes::default()
        };
        let out = t.apply(&settings, &attrs).unwrap();
        assert_eq!(
            out.get("@io_bazel_rules_go//go/config:race"),
            Some(&SettingValue::Bool(true))
        );
        for (key, value) in settings.iter() {
            if key != "@io_bazel_rules_go//go/config:race" {
                assert_eq!(out.get(key), Some(value), "{key} changed");
            }
        }
        assert_eq!(out.len(), settings.len());
    }

    #[test]
    fn input_settings_are_not_mutated() {
        let t = Transition::default();
        let settings = ambient();
        let before = settings.clone();
        let _ = t
            .apply_raw(&settings, &raw(&[("pure", "on"), ("static", "on")]))
            .unwrap();
        assert_eq!(settings, before);
    }

    #[test]
    fn ternaries_are_independent() {
        let t = Transition::default();
        let settings = Settings::new();
        for s in Ternary::ALL {
            for r in Ternary::ALL {
                for m in Ternary::ALL {
                    let attrs = Attributes {
                        static_link: s,
                        race: r,
                        msan: m,
                        ..Attributes::default()
                    };
                    let out = t.apply(&settings, &attrs).unwrap();
                    for (name, value) in [("static", s), ("race", r), ("msan", m)] {
                        let key = format!("@io_bazel_rules_go//go/config:{name}");
                        assert_eq!(
                            out.get(&key).and_then(SettingValue::as_bool),
                            value.as_bool(),
                            "{name} with static={s} race={r} msan={m}"
                        );
                    }
                    let written = [s, r, m].iter().filter(|v| **v != Ternary::Auto).count();
                    assert_eq!(out.len(), written);
                }
            }
        }
    }

    #[test]
    fn pure_writes_bool() {
        let t = Transition::default();
        let out = t.apply_raw(&Settings::new(), &raw(&[("pure", "on")])).unwrap();
        assert_eq!(
            out.get("@io_bazel_rules_go//go/config:pure"),
            Some(&SettingValue::Bool(true))
        );
        let out = t.apply_raw(&Settings::new(), &raw(&[("pure", "off")])).unwrap();
        assert_eq!(
            out.get("@io_bazel_rules_go//go/config:pure"),
            Some(&SettingValue::Bool(false))
        );
        assert!(!out.contains_key(PLATFORMS));
    }

    #[test]
    fn goos_alone_fails() {
        let t = Transition::default();
        let err = t.apply_raw(&ambient(), &raw(&[("goos", "linux")])).unwrap_err();
        assert_eq!(
            err,
            TransitionError::IncompleteOverride {
                missing: "goarch",
                present: "goos"
            }
        );
    }

    #[test]
    fn platform_override_with_cgo() {
        let t = Transition::default();
        let out = t
            .apply_raw(
                &ambient(),
                &raw(&[("goos", "linux"), ("goarch", "amd64"), ("pure", "off")]),
            )
            .unwrap();
        assert_eq!(
            out.get(PLATFORMS).and_then(SettingValue::as_str),
            Some("@io_bazel_rules_go//go/toolchain:linux_amd64_cgo")
        );
        assert_eq!(
            out.get("@io_bazel_rules_go//go/config:pure"),
            Some(&SettingValue::Bool(false))
        );
    }

    #[test]
    fn platform_override_without_cgo() {
        let t = Transition::default();
        for pure in ["auto", "on"] {
            let out = t
                .apply_raw(
                    &Settings::new(),
                    &raw(&[("goos", "windows"), ("goarch", "386"), ("pure", pure)]),
                )
                .unwrap();
            assert_eq!(
                out.get(PLATFORMS).and_then(SettingValue::as_str),
                Some("@io_bazel_rules_go//go/toolchain:windows_386")
            );
        }
    }

    #[test]
    fn cgo_on_unsupported_platform_fails() {
        let t = Transition::default();
        let err = t
            .apply_raw(
                &ambient(),
                &raw(&[("goos", "js"), ("goarch", "wasm"), ("pure", "off")]),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "pure is \"off\" but cgo is not supported on js wasm"
        );
        // Same pair is fine without cgo.
        assert!(t
            .apply_raw(&ambient(), &raw(&[("goos", "js"), ("goarch", "wasm")]))
            .is_ok());
    }

    #[test]
    fn pair_missing_from_catalog_fails() {
        let t = Transition::default();
        let err = t
            .apply(&Settings::new(), &Attributes::for_platform(Goos::Plan9, Goarch::Arm64))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid goos, goarch pair: plan9, arm64");
    }

    #[test]
    fn custom_catalog_is_respected() {
        let catalog = PlatformCatalog::new(vec![PlatformEntry {
            goos: Goos::Linux,
            goarch: Goarch::Riscv64,
            cgo: false,
        }]);
        let t = Transition::new(catalog, LinkModeCatalog::builtin(), LabelResolver::default());
        assert!(t
            .apply(&Settings::new(), &Attributes::for_platform(Goos::Linux, Goarch::Amd64))
            .is_err());
        let attrs = Attributes {
            pure: Ternary::Off,
            ..Attributes::for_platform(Goos::Linux, Goarch::Riscv64)
        };
        assert!(matches!(
            t.apply(&Settings::new(), &attrs),
            Err(TransitionError::CgoUnsupported { .. })
        ));
    }

    #[test]
    fn invalid_values_rejected() {
        let t = Transition::default();
        let err = t.apply_raw(&ambient(), &raw(&[("static", "maybe")])).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTernary { name: "static", .. }));

        let err = t.apply_raw(&ambient(), &raw(&[("linkmode", "bogus")])).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidLinkMode { .. }));
        let message = err.to_string();
        for mode in LinkMode::ALL {
            assert!(message.contains(mode.as_str()), "{message}");
        }
    }

    #[test]
    fn typed_linkmode_checked_against_catalog() {
        let t = Transition::new(
            PlatformCatalog::builtin(),
            LinkModeCatalog::new(vec![LinkMode::Normal, LinkMode::Pie]),
            LabelResolver::default(),
        );
        let attrs = Attributes {
            linkmode: Choice::Set(LinkMode::Plugin),
            ..Attributes::default()
        };
        assert_eq!(
            t.apply(&Settings::new(), &attrs).unwrap_err().to_string(),
            "linkmode: invalid mode plugin; want one of normal, pie"
        );
    }

    #[test]
    fn tags_and_linkmode() {
        let t = Transition::default();
        let raw = RawAttributes::new()
            .with("gotags", vec!["netgo".to_string(), "osusergo".to_string()])
            .with("linkmode", "c-shared");
        let out = t.apply_raw(&ambient(), &raw).unwrap();
        assert_eq!(
            out.get("@io_bazel_rules_go//go/config:tags")
                .and_then(SettingValue::as_list),
            Some(&["netgo".to_string(), "osusergo".to_string()][..])
        );
        assert_eq!(
            out.get("@io_bazel_rules_go//go/config:linkmode")
                .and_then(SettingValue::as_str),
            Some("c-shared")
        );
    }

    #[test]
    fn empty_tags_keep_ambient_tags() {
        let t = Transition::default();
        let raw = RawAttributes::new().with("gotags", Vec::<String>::new());
        let out = t.apply_raw(&ambient(), &raw).unwrap();
        assert_eq!(out, ambient());
    }

    #[test]
    fn main_repo_writes_root_relative_keys() {
        let t = Transition::new(
            PlatformCatalog::builtin(),
            LinkModeCatalog::builtin(),
            LabelResolver::new(DEFAULT_REPO, true),
        );
        let out = t
            .apply_raw(
                &Settings::new(),
                &raw(&[("goos", "linux"), ("goarch", "arm"), ("race", "on")]),
            )
            .unwrap();
        assert_eq!(out.get("//go/config:race"), Some(&SettingValue::Bool(true)));
        assert!(!out.contains_key("@io_bazel_rules_go//go/config:race"));
        // The platform value is a host primitive and keeps its repo prefix.
        assert_eq!(
            out.get(PLATFORMS).and_then(SettingValue::as_str),
            Some("@io_bazel_rules_go//go/toolchain:linux_arm")
        );
    }

    #[test]
    fn race_is_not_checked_against_platform() {
        let t = Transition::default();
        let out = t
            .apply_raw(
                &Settings::new(),
                &raw(&[("goos", "plan9"), ("goarch", "arm"), ("race", "on"), ("msan", "on")]),
            )
            .unwrap();
        assert_eq!(
            out.get("@io_bazel_rules_go//go/config:msan"),
            Some(&SettingValue::Bool(true))
        );
    }

    #[test]
    fn declared_outputs() {
        let external = Transition::default().outputs();
        assert_eq!(
            external,
            vec![
                "//command_line_option:platforms",
                "@io_bazel_rules_go//go/config:pure",
                "@io_bazel_rules_go//go/config:static",
                "@io_bazel_rules_go//go/config:race",
                "@io_bazel_rules_go//go/config:msan",
                "@io_bazel_rules_go//go/config:tags",
                "@io_bazel_rules_go//go/config:linkmode",
            ]
        );

        let main = Transition::new(
            PlatformCatalog::builtin(),
            LinkModeCatalog::builtin(),
            LabelResolver::new(DEFAULT_REPO, true),
        );
        assert!(main.inputs().contains(&"//go/config:tags".to_string()));
        assert_eq!(main.inputs(), main.outputs());
    }

    #[test]
    fn every_write_is_a_declared_output() {
        let t = Transition::default();
        let raw = RawAttributes::new()
            .with("goos", "linux")
            .with("goarch", "amd64")
            .with("pure", "off")
            .with("static", "on")
            .with("race", "on")
            .with("msan", "off")
            .with("gotags", vec!["x".to_string()])
            .with("linkmode", "pie");
        let out = t.apply_raw(&Settings::new(), &raw).unwrap();
        let outputs = t.outputs();
        assert_eq!(out.len(), outputs.len());
        for (key, _) in out.iter() {
            assert!(outputs.iter().any(|o| o == key), "{key} not declared");
        }
    }

    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transition>();

        let t = Transition::default();
        let settings = ambient();
        std::thread::scope(|scope| {
            let handles: Vec<_> = ["on", "off", "auto", "maybe"]
                .into_iter()
                .map(|race| {
                    let t = &t;
                    let settings = &settings;
                    scope.spawn(move || t.apply_raw(settings, &raw(&[("race", race)])))
                })
                .collect();
            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert!(results[0].is_ok());
            assert!(results[1].is_ok());
            assert_eq!(results[2].as_ref().unwrap(), &settings);
            assert!(results[3].is_err());
        });
    }
}
