use std::fmt;

/// An ordered group of errors sharing one piece of context.
///
/// Renders as `"<context>:\n<err1>\n<err2>\n...\n"` — every line
/// including the last is newline-terminated. This is the aggregation
/// shape every stage-level error (`cask_lex::LexError`,
/// `cask_par::ParseError`) is collected into once a pass has finished
/// and wants to report everything it found rather than bailing on the
/// first problem.
#[derive(Debug)]
pub struct ErrorGroup {
    context: String,
    errors: Vec<String>,
}

impl ErrorGroup {
    /// Builds a group from a context label and the display text of each
    /// underlying error, preserving the order they occurred in.
    pub fn new<E: fmt::Display>(context: impl Into<String>, errors: impl IntoIterator<Item = E>) -> Self {
        Self {
            context: context.into(),
            errors: errors.into_iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for ErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.context)?;
        for err in &self.errors {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorGroup {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_context_and_errors_in_order() {
        let group = ErrorGroup::new("Parsing errors", vec!["first", "second"]);
        assert_eq!(group.to_string(), "Parsing errors:\nfirst\nsecond\n");
    }

    #[test]
    fn empty_group_renders_just_context() {
        let group = ErrorGroup::new::<&str>("Parsing errors", vec![]);
        assert!(group.is_empty());
        assert_eq!(group.to_string(), "Parsing errors:\n");
    }
}
