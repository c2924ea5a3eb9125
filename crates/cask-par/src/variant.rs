use crate::artifact::Artifact;
use crate::interpolate::interpolate;
use crate::macos::MacOS;
use crate::stanza::{Appcast, Homepage, Name, Sha256, Url, Version};

/// One variant of a cask — the stanzas that apply under a particular
/// macOS release range.
///
/// A cask with no `if`/`elsif`/`else` blocks has exactly one variant
/// spanning every supported release. Every field here is the *raw*
/// parsed value; `#{version...}` interpolation happens lazily in the
/// `resolved_*` accessors below, not while parsing.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct Variant {
    pub version: Option<Version>,
    pub sha256: Option<Sha256>,
    pub url: Option<Url>,
    pub appcast: Option<Appcast>,
    pub names: Vec<Name>,
    pub homepage: Option<Homepage>,
    pub artifacts: Vec<Artifact>,
    pub minimum_supported_macos: MacOS,
    pub maximum_supported_macos: MacOS,
}

impl Variant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh variant carrying forward only the globally-declared
    /// stanzas of `self`. Used when a variant flush opens a new variant
    /// mid-parse: a stanza declared before an `if` block should still
    /// reach every branch it's not itself restated in, so each flushed-to
    /// variant is seeded from the globals of the one it followed rather
    /// than starting truly blank. Per-branch fields (anything not global)
    /// and the macOS bounds are never carried forward this way.
    pub(crate) fn seeded_from_globals(&self) -> Self {
        Self {
            version: self.version.clone().filter(|v| v.is_global),
            sha256: self.sha256.clone().filter(|s| s.is_global),
            url: self.url.clone().filter(|u| u.is_global),
            appcast: self.appcast.clone().filter(|a| a.is_global),
            names: self.names.iter().filter(|n| n.is_global).cloned().collect(),
            homepage: self.homepage.clone().filter(|h| h.is_global),
            artifacts: self.artifacts.clone(),
            minimum_supported_macos: MacOS::default(),
            maximum_supported_macos: MacOS::default(),
        }
    }

    fn version_value(&self) -> Option<&str> {
        self.version.as_ref().map(|v| v.value.as_str())
    }

    /// The version value itself never has `#{version...}` substituted
    /// into it — there's nothing upstream of it to interpolate from.
    pub fn resolved_version(&self) -> Option<&str> {
        self.version_value()
    }

    pub fn resolved_sha256(&self) -> Option<String> {
        self.sha256.as_ref().map(|s| interpolate(&s.value, self.version_value()))
    }

    pub fn resolved_url(&self) -> Option<String> {
        self.url.as_ref().map(|u| interpolate(&u.value, self.version_value()))
    }

    /// Interpolates the appcast URL; the checkpoint hash is opaque data
    /// and is never a target for substitution.
    pub fn resolved_appcast(&self) -> Option<(String, Option<String>)> {
        self.appcast.as_ref().map(|a| (interpolate(&a.url, self.version_value()), a.checkpoint.clone()))
    }

    pub fn resolved_names(&self) -> Vec<String> {
        self.names.iter().map(|n| interpolate(&n.value, self.version_value())).collect()
    }

    pub fn resolved_homepage(&self) -> Option<String> {
        self.homepage.as_ref().map(|h| interpolate(&h.value, self.version_value()))
    }

    pub fn resolved_artifacts(&self) -> Vec<Artifact> {
        self.artifacts
            .iter()
            .map(|a| {
                let mut resolved = a.clone();
                resolved.value = interpolate(&a.value, self.version_value());
                resolved
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactType;

    #[test]
    fn new_variant_defaults_to_high_sierra_bounds() {
        let v = Variant::new();
        assert_eq!(v.minimum_supported_macos, MacOS::HighSierra);
        assert_eq!(v.maximum_supported_macos, MacOS::HighSierra);
        assert!(v.version.is_none());
        assert!(v.names.is_empty());
    }

    #[test]
    fn url_interpolates_once_version_is_set() {
        let mut v = Variant::new();
        v.url = Some(Url { value: "http://example.com/#{version}.dmg".into(), is_global: true });
        assert_eq!(v.resolved_url().unwrap(), "http://example.com/#{version}.dmg");

        v.version = Some(Version { value: "2.0.0".into(), is_global: true });
        assert_eq!(v.resolved_url().unwrap(), "http://example.com/2.0.0.dmg");
    }

    #[test]
    fn names_interpolate_independently() {
        let mut v = Variant::new();
        v.names.push(Name { value: "Name".into(), is_global: true });
        v.names.push(Name { value: "Name #{version}".into(), is_global: true });
        v.version = Some(Version { value: "2.0.0".into(), is_global: true });

        let resolved = v.resolved_names();
        assert_eq!(resolved, vec!["Name".to_string(), "Name 2.0.0".to_string()]);
    }

    #[test]
    fn seeding_carries_only_global_fields_forward() {
        let mut v = Variant::new();
        v.appcast = Some(Appcast { url: "https://example.com/appcast.xml".into(), checkpoint: None, is_global: true });
        v.names.push(Name { value: "Example".into(), is_global: true });
        v.version = Some(Version { value: "1.0.0".into(), is_global: false });
        v.minimum_supported_macos = MacOS::Tiger;

        let seeded = v.seeded_from_globals();
        assert!(seeded.appcast.is_some());
        assert_eq!(seeded.names.len(), 1);
        assert!(seeded.version.is_none());
        assert_eq!(seeded.minimum_supported_macos, MacOS::HighSierra);
    }

    #[test]
    fn artifacts_interpolate_their_value_only() {
        let mut v = Variant::new();
        v.artifacts.push(Artifact::new(ArtifactType::App, "Test #{version}.app"));
        v.version = Some(Version { value: "2.0.0".into(), is_global: true });

        let resolved = v.resolved_artifacts();
        assert_eq!(resolved[0].value, "Test 2.0.0.app");
    }
}
