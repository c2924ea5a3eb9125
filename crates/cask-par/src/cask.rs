use crate::variant::Variant;

/// A fully parsed cask: its declared token, the verbatim source it was
/// parsed from, and every distinct variant produced by its
/// `if`/`elsif`/`else` branches (or a single variant, if it has none),
/// in source order.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct Cask {
    pub token: String,
    pub content: String,
    pub variants: Vec<Variant>,
}

impl Cask {
    pub fn new(content: impl Into<String>) -> Self {
        Self { token: String::new(), content: content.into(), variants: Vec::new() }
    }

    pub fn add_variant(&mut self, variant: Variant) {
        self.variants.push(variant);
    }
}
