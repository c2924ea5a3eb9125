use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#\{version((?:\.[A-Za-z_][A-Za-z0-9_]*)*)\}").unwrap())
}

/// Reports whether `text` contains any `#{version...}` placeholder.
/// Variant accessors use this to decide whether interpolation work is
/// worth doing at all.
pub fn has_interpolation(text: &str) -> bool {
    pattern().is_match(text)
}

/// Replaces every `#{version}` / `#{version.method.method...}` occurrence
/// in `text` with `version` run through the named method chain.
///
/// Without a version (`version` is `None`), every occurrence is left
/// untouched — there's nothing to substitute. With a version: each
/// method in the chain is applied to the running value in order. A
/// *known* method that can't match the current value (e.g. `.patch` on
/// a two-part version) leaves the running value unchanged and the chain
/// continues; an *unknown* method name aborts the whole chain and the
/// original `#{...}` text is left in place verbatim. These two failure
/// modes are deliberately different — the asymmetry mirrors the
/// reference interpolator exactly.
pub fn interpolate(text: &str, version: Option<&str>) -> String {
    let Some(version) = version else {
        return text.to_string();
    };

    pattern()
        .replace_all(text, |caps: &regex::Captures| {
            let chain = &caps[1];
            let methods: Vec<&str> = if chain.is_empty() {
                Vec::new()
            } else {
                chain.trim_start_matches('.').split('.').collect()
            };

            let mut value = version.to_string();
            for method in methods {
                match apply_method(method, &value) {
                    Some(Ok(next)) => value = next,
                    Some(Err(())) => {}
                    None => return caps[0].to_string(),
                }
            }
            value
        })
        .into_owned()
}

/// Applies a single chained method to `value`.
///
/// - `None` — the method name is unrecognized; caller aborts the chain.
/// - `Some(Err(()))` — a known method whose pattern didn't match; caller
///   leaves the value unchanged and keeps going.
/// - `Some(Ok(result))` — the method matched and produced `result`.
fn apply_method(method: &str, value: &str) -> Option<Result<String, ()>> {
    let result = match method {
        "major" => major(value),
        "minor" => minor(value),
        "patch" => patch(value),
        "major_minor" => major_minor(value),
        "major_minor_patch" => major_minor_patch(value),
        "before_comma" => before_comma(value),
        "after_comma" => after_comma(value),
        "before_colon" => before_colon(value),
        "after_colon" => after_colon(value),
        "no_dots" => no_dots(value),
        "dots_to_underscores" => dots_to_underscores(value),
        "dots_to_hyphens" => dots_to_hyphens(value),
        _ => return None,
    };
    Some(result.ok_or(()))
}

fn digit_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static interpolation regex is valid")
}

fn major(value: &str) -> Option<String> {
    digit_regex(r"^\d").find(value).map(|m| m.as_str().to_string())
}

fn minor(value: &str) -> Option<String> {
    digit_regex(r"^\d\.(\d)").captures(value).map(|c| c[1].to_string())
}

fn patch(value: &str) -> Option<String> {
    digit_regex(r"^\d\.\d\.(\d)").captures(value).map(|c| c[1].to_string())
}

fn major_minor(value: &str) -> Option<String> {
    digit_regex(r"^\d\.\d").find(value).map(|m| m.as_str().to_string())
}

fn major_minor_patch(value: &str) -> Option<String> {
    digit_regex(r"^\d\.\d\.\d").find(value).map(|m| m.as_str().to_string())
}

fn before_comma(value: &str) -> Option<String> {
    digit_regex(r"^(.*),").captures(value).map(|c| c[1].to_string())
}

fn after_comma(value: &str) -> Option<String> {
    digit_regex(r",(.*)$").captures(value).map(|c| c[1].to_string())
}

fn before_colon(value: &str) -> Option<String> {
    digit_regex(r"^(.*):").captures(value).map(|c| c[1].to_string())
}

fn after_colon(value: &str) -> Option<String> {
    digit_regex(r":(.*)$").captures(value).map(|c| c[1].to_string())
}

fn no_dots(value: &str) -> Option<String> {
    if !value.contains('.') {
        return None;
    }
    Some(value.replace('.', ""))
}

fn dots_to_underscores(value: &str) -> Option<String> {
    if !value.contains('.') {
        return None;
    }
    Some(value.replace('.', "_"))
}

fn dots_to_hyphens(value: &str) -> Option<String> {
    if !value.contains('.') {
        return None;
    }
    Some(value.replace('.', "-"))
}
