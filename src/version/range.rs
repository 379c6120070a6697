//! npm version range parsing
//!
//! npm ranges are translated into one `semver::VersionReq` per `||`
//! alternative. Handles:
//! - Exact: `1.2.3`, `=1.2.3`, `v1.2.3`
//! - Caret/Tilde: `^1.2.3`, `~1.2`, `~>1.2.3`
//! - Comparison: `>=1.2.3`, `> 1.2`, `<2`, `<=2.0.0-rc.1`
//! - Wildcard/partial: `*`, `x`, `1.x`, `1.2.*`, `1`, empty string
//! - Hyphen: `1.0.0 - 2.0.0`
//! - Comparator sets: `>=1.0.0 <2.0.0`
//! - Alternatives: `^1.0.0 || ^2.0.0`
//!
//! A bare version is exact, as in npm, not Cargo's implicit caret.

use regex::Regex;
use semver::{Version, VersionReq};
use std::sync::LazyLock;

static COMPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(~>|>=|<=|[~^<>=])?=?v?(\d+|[xX*])(?:\.(\d+|[xX*]))?(?:\.(\d+|[xX*]))?(?:-([0-9A-Za-z.-]+))?(?:\+[0-9A-Za-z.-]+)?$",
    )
    .unwrap()
});
static HYPHEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+-\s+(\S+)$").unwrap());
static OPERATOR_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(~>|>=|<=|[~^<>=])\s+").unwrap());

/// A parsed npm range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmRange {
    /// Satisfiable alternatives; empty means nothing matches
    alternatives: Vec<VersionReq>,
}

impl NpmRange {
    /// Parse an npm range, returning `None` for anything that is not one
    /// (dist-tags, git URLs, `file:` paths, aliases).
    pub fn parse(raw: &str) -> Option<Self> {
        let mut alternatives = Vec::new();

        for alternative in raw.split("||") {
            if let Some(req) = parse_alternative(alternative.trim())? {
                alternatives.push(req);
            }
        }

        Some(Self { alternatives })
    }

    /// Returns true if the version satisfies any alternative
    pub fn satisfies(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

/// Partial version: numeric parts up to the first wildcard, plus prerelease
struct Partial {
    parts: Vec<u64>,
    pre: Option<String>,
}

impl Partial {
    fn render(&self) -> String {
        let mut out = self
            .parts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".");
        if let Some(pre) = &self.pre {
            out.push('-');
            out.push_str(pre);
        }
        out
    }

    fn is_any(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Outcome of translating one comparator token
enum Translated {
    /// Matches every version
    Any,
    /// Matches no version
    Nothing,
    /// A `semver` comparator
    Comparator(String),
}

/// Returns `None` on syntax error, `Some(None)` for an unsatisfiable
/// alternative.
fn parse_alternative(alternative: &str) -> Option<Option<VersionReq>> {
    if alternative.is_empty() {
        return Some(Some(VersionReq::STAR));
    }

    let translated = if let Some(caps) = HYPHEN_RE.captures(alternative) {
        let lower = parse_token(caps.get(1)?.as_str())?;
        let upper = parse_token(caps.get(2)?.as_str())?;
        if lower.0.is_some() || upper.0.is_some() {
            return None;
        }
        vec![translate(">=", &lower.1), translate("<=", &upper.1)]
    } else {
        let normalized = OPERATOR_SPACE_RE.replace_all(alternative, "$1");
        normalized
            .split_whitespace()
            .map(|token| {
                let (op, partial) = parse_token(token)?;
                Some(translate(op.unwrap_or("="), &partial))
            })
            .collect::<Option<Vec<_>>>()?
    };

    let mut comparators = Vec::new();
    for t in translated {
        match t {
            Translated::Any => {}
            Translated::Nothing => return Some(None),
            Translated::Comparator(c) => comparators.push(c),
        }
    }

    if comparators.is_empty() {
        return Some(Some(VersionReq::STAR));
    }

    VersionReq::parse(&comparators.join(", ")).ok().map(Some)
}

fn parse_token(token: &str) -> Option<(Option<&str>, Partial)> {
    let caps = COMPARATOR_RE.captures(token)?;
    let op = caps.get(1).map(|m| m.as_str());

    let mut parts = Vec::new();
    let mut wildcard = false;
    for idx in 2..=4 {
        let Some(m) = caps.get(idx) else { break };
        match m.as_str() {
            "x" | "X" | "*" => wildcard = true,
            // `1.x.3` is not a meaningful range
            _ if wildcard => return None,
            digits => parts.push(digits.parse().ok()?),
        }
    }

    let pre = caps.get(5).map(|m| m.as_str().to_string());
    if pre.is_some() && parts.len() < 3 {
        return None;
    }

    Some((op, Partial { parts, pre }))
}

fn translate(op: &str, partial: &Partial) -> Translated {
    if partial.is_any() {
        return match op {
            ">" | "<" => Translated::Nothing,
            _ => Translated::Any,
        };
    }
    let op = if op == "~>" { "~" } else { op };
    Translated::Comparator(format!("{}{}", op, partial.render()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satisfies(version: &str, range: &str) -> bool {
        let version = Version::parse(version).unwrap();
        NpmRange::parse(range)
            .unwrap_or_else(|| panic!("range should parse: {}", range))
            .satisfies(&version)
    }

    #[test]
    fn test_caret() {
        assert!(satisfies("4.17.0", "^4.0.0"));
        assert!(!satisfies("3.0.0", "^4.0.0"));
        assert!(!satisfies("5.0.0", "^4.0.0"));
        assert!(satisfies("0.2.5", "^0.2.3"));
        assert!(!satisfies("0.3.0", "^0.2.3"));
        assert!(satisfies("0.0.3", "^0.0.3"));
        assert!(!satisfies("0.0.4", "^0.0.3"));
    }

    #[test]
    fn test_tilde() {
        assert!(satisfies("1.2.9", "~1.2.3"));
        assert!(!satisfies("1.3.0", "~1.2.3"));
        assert!(satisfies("1.9.0", "~1"));
        assert!(satisfies("1.2.5", "~>1.2.3"));
    }

    #[test]
    fn test_bare_version_is_exact() {
        assert!(satisfies("1.2.3", "1.2.3"));
        assert!(!satisfies("1.2.4", "1.2.3"));
        assert!(satisfies("1.2.3", "=1.2.3"));
        assert!(satisfies("1.2.3", "v1.2.3"));
    }

    #[test]
    fn test_comparisons() {
        assert!(satisfies("2.0.0", ">=1.2.3"));
        assert!(!satisfies("1.2.2", ">=1.2.3"));
        assert!(satisfies("1.9.9", "<2"));
        assert!(!satisfies("2.0.0", "<2"));
        assert!(satisfies("1.3.0", ">1.2"));
        assert!(!satisfies("1.2.9", ">1.2"));
        assert!(satisfies("2.0.0", ">= 1.0.0"));
    }

    #[test]
    fn test_comparator_set() {
        assert!(satisfies("1.5.0", ">=1.0.0 <2.0.0"));
        assert!(!satisfies("2.0.0", ">=1.0.0 <2.0.0"));
    }

    #[test]
    fn test_hyphen() {
        assert!(satisfies("1.0.0", "1.0.0 - 2.0.0"));
        assert!(satisfies("2.0.0", "1.0.0 - 2.0.0"));
        assert!(!satisfies("2.0.1", "1.0.0 - 2.0.0"));
        assert!(satisfies("2.3.9", "1.2.3 - 2.3"));
        assert!(!satisfies("2.4.0", "1.2.3 - 2.3"));
    }

    #[test]
    fn test_wildcards() {
        assert!(satisfies("9.9.9", "*"));
        assert!(satisfies("9.9.9", "x"));
        assert!(satisfies("9.9.9", ""));
        assert!(satisfies("1.4.0", "1.x"));
        assert!(!satisfies("2.0.0", "1.x"));
        assert!(satisfies("1.2.7", "1.2.*"));
        assert!(!satisfies("1.3.0", "1.2.*"));
        assert!(satisfies("1.8.0", "1"));
    }

    #[test]
    fn test_alternatives() {
        assert!(satisfies("1.5.0", "^1.0.0 || ^2.0.0"));
        assert!(satisfies("2.5.0", "^1.0.0 || ^2.0.0"));
        assert!(!satisfies("3.0.0", "^1.0.0 || ^2.0.0"));
    }

    #[test]
    fn test_prerelease() {
        assert!(satisfies("2.0.0-rc.2", ">=2.0.0-rc.1"));
        assert!(!satisfies("2.1.0-rc.1", "^2.0.0"));
    }

    #[test]
    fn test_strict_less_than_any_matches_nothing() {
        assert!(!satisfies("1.0.0", "<*"));
        assert!(satisfies("1.0.0", "<* || 1.0.0"));
    }

    #[test]
    fn test_not_a_range() {
        assert!(NpmRange::parse("latest").is_none());
        assert!(NpmRange::parse("git+https://github.com/acme/widgets.git").is_none());
        assert!(NpmRange::parse("file:../local").is_none());
        assert!(NpmRange::parse("npm:lodash@^4").is_none());
        assert!(NpmRange::parse("^1.2-beta").is_none());
        assert!(NpmRange::parse("1.x.3").is_none());
    }
}
