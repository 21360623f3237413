//! Tunables of the document assembler.
//!
//! The defaults reproduce the fixed strings of the reference output, so a
//! compiler built with `CompileOptions::default()` needs no configuration.

use serde::Deserialize;

pub const DEFAULT_TITLE: &str = "Uniscript App";

pub const MOBILE_STYLE: &str = "body { width: 360px; height: 640px; margin: auto; \
border: 1px solid #30363d; overflow: auto; position: relative; }";

pub const BRYTHON_SCRIPTS: [&str; 2] = [
    "https://cdn.jsdelivr.net/npm/brython@3/brython.min.js",
    "https://cdn.jsdelivr.net/npm/brython@3/brython_stdlib.js",
];

pub const BRYTHON_BOOTSTRAP: &str = "brython()";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Title used when `main` declares none.
    pub default_title: String,
    /// Style rule emitted for `config target = "mobile"`.
    pub mobile_style: String,
    /// Script URLs of the in-browser Python runtime.
    pub python_runtime: Vec<String>,
    /// `onload` handler that starts the Python runtime.
    pub python_bootstrap: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            default_title: DEFAULT_TITLE.to_string(),
            mobile_style: MOBILE_STYLE.to_string(),
            python_runtime: BRYTHON_SCRIPTS.iter().map(|s| s.to_string()).collect(),
            python_bootstrap: BRYTHON_BOOTSTRAP.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_other_defaults() {
        let options: CompileOptions = toml::from_str(r#"default_title = "Playground""#)
            .expect("parse options");
        assert_eq!(options.default_title, "Playground");
        assert_eq!(options.python_runtime.len(), 2);
        assert_eq!(options.python_bootstrap, "brython()");
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<CompileOptions, _> = toml::from_str(r#"titel = "typo""#);
        assert!(result.is_err());
    }
}
