use regex::Regex;
use tracing::debug;

/// Identifier handed to the backend when no declaration can be resolved.
pub const DEFAULT_ENTRY_POINT: &str = "Main";

/// Best-effort entry-point resolution over raw source text.
///
/// This is deliberately not a parser. Source may be malformed, partial, or
/// contain multiple declarations; resolution degrades through an ordered
/// chain of regex probes and never fails:
///
/// 1. a public top-level declaration whose body contains the
///    `public static void main(String[] ..)` signature;
/// 2. any top-level declaration containing that signature;
/// 3. any public top-level declaration;
/// 4. the fixed [`DEFAULT_ENTRY_POINT`].
///
/// Only the first match in source order is taken at each step.
pub struct EntryPointResolver {
    probes: Vec<Regex>,
}

impl EntryPointResolver {
    pub fn new() -> Self {
        let probes = [
            r"public\s+class\s+(\w+)\s*\{[\s\S]*?public\s+static\s+void\s+main\s*\(\s*String\s*\[\s*\]\s*\w+\s*\)",
            r"class\s+(\w+)\s*\{[\s\S]*?public\s+static\s+void\s+main\s*\(\s*String\s*\[\s*\]\s*\w+\s*\)",
            r"public\s+class\s+(\w+)",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect();

        Self { probes }
    }

    /// Resolve the identifier the backend should invoke as the program's
    /// starting procedure. Total: always returns a non-empty identifier.
    pub fn resolve(&self, source: &str) -> String {
        for probe in &self.probes {
            if let Some(captures) = probe.captures(source) {
                if let Some(identifier) = captures.get(1) {
                    return identifier.as_str().to_string();
                }
            }
        }

        debug!("no entry-point declaration found, falling back to {DEFAULT_ENTRY_POINT}");
        DEFAULT_ENTRY_POINT.to_string()
    }
}

impl Default for EntryPointResolver {
    fn default() -> Self {
        Self::new()
    }
}
