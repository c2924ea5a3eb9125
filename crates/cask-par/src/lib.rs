//! Parses the cask DSL into a resolved [`Cask`] model: stanzas, variants
//! produced by `if`/`elsif`/`else` branching, global-stanza inheritance,
//! and `#{version...}` interpolation.

mod artifact;
mod cask;
mod error;
mod interpolate;
mod macos;
mod parser;
mod stanza;
mod variant;

pub use artifact::{Artifact, ArtifactType};
pub use cask::Cask;
pub use error::{ExpectedKinds, ParseError};
pub use interpolate::{has_interpolation, interpolate};
pub use macos::{range_for, MacOS, MacOSRange};
pub use parser::parse;
pub use stanza::{Appcast, Homepage, Name, Sha256, Url, Version};
pub use variant::Variant;
