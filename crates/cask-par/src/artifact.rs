use std::fmt;

/// The three artifact stanza shapes a cask can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ArtifactType {
    App,
    Pkg,
    Binary,
}

const NAMES: [&str; 3] = ["app", "pkg", "binary"];

impl ArtifactType {
    fn ordinal(self) -> usize {
        match self {
            ArtifactType::App => 0,
            ArtifactType::Pkg => 1,
            ArtifactType::Binary => 2,
        }
    }

    pub fn name(self) -> &'static str {
        NAMES[self.ordinal()]
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single `app`/`pkg`/`binary` stanza.
///
/// `target` (app/binary only) and `allow_untrusted` (pkg only) are the
/// stanza's optional trailing clauses; they're plain fields here rather
/// than split into per-kind structs because every artifact shares the
/// same `kind`/`value` shape and only one optional extra.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Artifact {
    pub kind: ArtifactType,
    pub value: String,
    pub target: Option<String>,
    pub allow_untrusted: bool,
}

impl Artifact {
    pub fn new(kind: ArtifactType, value: impl Into<String>) -> Self {
        Self { kind, value: value.into(), target: None, allow_untrusted: false }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ArtifactType::App | ArtifactType::Binary => {
                write!(f, "{}, {}", self.kind, self.value)?;
                if let Some(target) = &self.target {
                    write!(f, " => {target}")?;
                }
                Ok(())
            }
            ArtifactType::Pkg => {
                write!(f, "{}, {}", self.kind, self.value)?;
                if self.allow_untrusted {
                    write!(f, ", allow_untrusted: true")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_without_target() {
        let a = Artifact::new(ArtifactType::App, "Foo.app");
        assert_eq!(a.to_string(), "app, Foo.app");
    }

    #[test]
    fn app_with_target() {
        let mut a = Artifact::new(ArtifactType::App, "Foo.app");
        a.target = Some("/Applications/Foo.app".into());
        assert_eq!(a.to_string(), "app, Foo.app => /Applications/Foo.app");
    }

    #[test]
    fn pkg_with_allow_untrusted() {
        let mut a = Artifact::new(ArtifactType::Pkg, "Foo.pkg");
        a.allow_untrusted = true;
        assert_eq!(a.to_string(), "pkg, Foo.pkg, allow_untrusted: true");
    }

    #[test]
    fn binary_without_target() {
        let a = Artifact::new(ArtifactType::Binary, "foo");
        assert_eq!(a.to_string(), "binary, foo");
    }
}
