use std::fmt;

use cask_lex::TokenKind;

/// A macOS release, ordered newest (`HighSierra`) to oldest (`Tiger`).
///
/// The ordinal order *is* the comparison order `parse_condition` relies
/// on: `MacOS.release > :sierra` means "newer than Sierra", which is
/// "smaller ordinal than Sierra".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum MacOS {
    #[default]
    HighSierra,
    Sierra,
    ElCapitan,
    Yosemite,
    Mavericks,
    MountainLion,
    Lion,
    SnowLeopard,
    Leopard,
    Tiger,
}

const NAMES: [&str; 10] = [
    "High Sierra",
    "Sierra",
    "El Capitan",
    "Yosemite",
    "Mavericks",
    "Mountain Lion",
    "Lion",
    "Snow Leopard",
    "Leopard",
    "Tiger",
];

const VERSIONS: [&str; 10] = [
    "10.13", "10.12", "10.11", "10.10", "10.9", "10.8", "10.7", "10.6", "10.5", "10.4",
];

const SYMBOLS: &[(&str, MacOS)] = &[
    ("high_sierra", MacOS::HighSierra),
    ("sierra", MacOS::Sierra),
    ("el_capitan", MacOS::ElCapitan),
    ("yosemite", MacOS::Yosemite),
    ("mavericks", MacOS::Mavericks),
    ("mountain_lion", MacOS::MountainLion),
    ("lion", MacOS::Lion),
    ("snow_leopard", MacOS::SnowLeopard),
    ("leopard", MacOS::Leopard),
    ("tiger", MacOS::Tiger),
];

impl MacOS {
    fn ordinal(self) -> usize {
        match self {
            MacOS::HighSierra => 0,
            MacOS::Sierra => 1,
            MacOS::ElCapitan => 2,
            MacOS::Yosemite => 3,
            MacOS::Mavericks => 4,
            MacOS::MountainLion => 5,
            MacOS::Lion => 6,
            MacOS::SnowLeopard => 7,
            MacOS::Leopard => 8,
            MacOS::Tiger => 9,
        }
    }

    pub fn name(self) -> &'static str {
        NAMES[self.ordinal()]
    }

    pub fn version(self) -> &'static str {
        VERSIONS[self.ordinal()]
    }

    /// Looks up the release named by a `:symbol` condition token, e.g.
    /// `"sierra"` -> `MacOS::Sierra`.
    pub fn from_symbol(symbol: &str) -> Option<MacOS> {
        SYMBOLS.iter().find(|(s, _)| *s == symbol).map(|(_, m)| *m)
    }
}

/// The marketing brand a release shipped under — it changed twice across
/// the catalog (`Mac OS X` through Leopard, `OS X` through El Capitan,
/// `macOS` from Sierra on), so it can't be derived from `name()` alone.
const BRANDS: [&str; 10] = [
    "macOS", "macOS", "OS X", "OS X", "OS X", "OS X", "OS X", "Mac OS X", "Mac OS X", "Mac OS X",
];

impl fmt::Display for MacOS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", BRANDS[self.ordinal()], self.name(), self.version())
    }
}

/// The admitted range of a parsed `MacOS.release <op> :symbol` condition.
///
/// `newest`/`oldest` are ordinal bounds (`newest` has the smaller
/// ordinal). These map onto `Variant`'s fields inverted from what the
/// names suggest: the *newest* release a condition admits becomes the
/// variant's `MaximumSupportedMacOS`, and the *oldest* becomes its
/// `MinimumSupportedMacOS` — "maximum supported" means "furthest into
/// the future", which is the smallest ordinal here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MacOSRange {
    pub newest: MacOS,
    pub oldest: MacOS,
}

/// Applies a comparison operator (`==`, `>`, `>=`, `<`, `<=`) to a named
/// release, producing the admitted range.
///
/// `>`/`<` exclude the named release unless `has_equal` is set (the
/// `>=`/`<=` forms), in which case the boundary folds in. The range
/// clamps at the catalog's ends — you can't ask for anything newer than
/// `HighSierra` or older than `Tiger`.
pub fn range_for(op: TokenKind, has_equal: bool, release: MacOS) -> Option<MacOSRange> {
    let ord = release.ordinal() as i32;
    match op {
        TokenKind::Eq => Some(MacOSRange { newest: release, oldest: release }),
        TokenKind::Gt => {
            let mut oldest_ord = ord - 1;
            if has_equal || oldest_ord < 0 {
                oldest_ord = ord;
            }
            Some(MacOSRange { newest: MacOS::HighSierra, oldest: ALL[oldest_ord as usize] })
        }
        TokenKind::Lt => {
            let mut newest_ord = ord + 1;
            if has_equal || newest_ord > MacOS::Tiger.ordinal() as i32 {
                newest_ord = ord;
            }
            Some(MacOSRange { newest: ALL[newest_ord as usize], oldest: MacOS::Tiger })
        }
        _ => None,
    }
}

const ALL: [MacOS; 10] = [
    MacOS::HighSierra,
    MacOS::Sierra,
    MacOS::ElCapitan,
    MacOS::Yosemite,
    MacOS::Mavericks,
    MacOS::MountainLion,
    MacOS::Lion,
    MacOS::SnowLeopard,
    MacOS::Leopard,
    MacOS::Tiger,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_reference_format() {
        assert_eq!(MacOS::HighSierra.to_string(), "macOS High Sierra (10.13)");
        assert_eq!(MacOS::Sierra.to_string(), "macOS Sierra (10.12)");
        assert_eq!(MacOS::ElCapitan.to_string(), "OS X El Capitan (10.11)");
        assert_eq!(MacOS::Lion.to_string(), "OS X Lion (10.7)");
        assert_eq!(MacOS::SnowLeopard.to_string(), "Mac OS X Snow Leopard (10.6)");
        assert_eq!(MacOS::Tiger.to_string(), "Mac OS X Tiger (10.4)");
    }

    #[test]
    fn from_symbol_round_trips() {
        assert_eq!(MacOS::from_symbol("el_capitan"), Some(MacOS::ElCapitan));
        assert_eq!(MacOS::from_symbol("nope"), None);
    }

    #[test]
    fn gt_excludes_named_release_unless_equal() {
        let r = range_for(TokenKind::Gt, false, MacOS::ElCapitan).unwrap();
        assert_eq!(r, MacOSRange { newest: MacOS::HighSierra, oldest: MacOS::Sierra });

        let r = range_for(TokenKind::Gt, true, MacOS::ElCapitan).unwrap();
        assert_eq!(r, MacOSRange { newest: MacOS::HighSierra, oldest: MacOS::ElCapitan });

        // already newest: clamps rather than underflowing
        let r = range_for(TokenKind::Gt, false, MacOS::HighSierra).unwrap();
        assert_eq!(r, MacOSRange { newest: MacOS::HighSierra, oldest: MacOS::HighSierra });
    }

    #[test]
    fn lt_excludes_named_release_unless_equal() {
        let r = range_for(TokenKind::Lt, false, MacOS::Sierra).unwrap();
        assert_eq!(r, MacOSRange { newest: MacOS::ElCapitan, oldest: MacOS::Tiger });

        let r = range_for(TokenKind::Lt, true, MacOS::Sierra).unwrap();
        assert_eq!(r, MacOSRange { newest: MacOS::Sierra, oldest: MacOS::Tiger });

        // already oldest: clamps rather than overflowing
        let r = range_for(TokenKind::Lt, false, MacOS::Tiger).unwrap();
        assert_eq!(r, MacOSRange { newest: MacOS::Tiger, oldest: MacOS::Tiger });
    }

    #[test]
    fn eq_is_a_single_release_range() {
        let r = range_for(TokenKind::Eq, false, MacOS::Tiger).unwrap();
        assert_eq!(r, MacOSRange { newest: MacOS::Tiger, oldest: MacOS::Tiger });
    }
}
