/// A parsed `version "..."` stanza.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Version {
    pub value: String,
    pub is_global: bool,
}

/// A parsed `sha256 "..."` stanza.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Sha256 {
    pub value: String,
    pub is_global: bool,
}

/// A parsed `url "..."` stanza.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Url {
    pub value: String,
    pub is_global: bool,
}

/// A parsed `appcast "...", checkpoint: "..."` stanza. `checkpoint` is
/// optional — the trailing clause is never required.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Appcast {
    pub url: String,
    pub checkpoint: Option<String>,
    pub is_global: bool,
}

/// A single entry from a `name "..."` stanza. Casks may declare more than
/// one; each carries its own global flag because `name` stanzas can be
/// mixed across `if`/`else` branches.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Name {
    pub value: String,
    pub is_global: bool,
}

/// A parsed `homepage "..."` stanza.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Homepage {
    pub value: String,
    pub is_global: bool,
}
