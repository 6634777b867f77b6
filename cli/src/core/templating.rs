//! # rootgen Parameter Substitution
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! This module implements the flat parameter substitution used for template
//! file names, directory names and file contents. There are no loops or
//! conditionals; a template is plain text with `_token_` placeholders.
//!
//! ## Token Syntax
//!
//! A token is an underscore, one or more ASCII letters, optionally one
//! `.letters` segment, and a closing underscore: `_name_`, `_Name_`,
//! `_user.email_`.
//!
//! ## Resolution
//!
//! For each token the inner key is looked up in the `GenerationContext` as a
//! dotted path, trying three spellings in order:
//! 1. the key exactly as written,
//! 2. the key lowercased,
//! 3. the key uppercased.
//!
//! The first lookup yielding a value that counts as found wins (see
//! `context::render_value`: empty strings, `0` and `false` do not count). When
//! none does, the token is left in the output untouched, underscores included.
//!
//! Substitution is a single pass. Values inserted into the output are not
//! scanned again, so a value containing `_other_` stays literal.
//!
//! ## Examples
//!
//! ```rust
//! let mut ctx = GenerationContext::new();
//! ctx.insert_dotted("name", "World");
//! assert_eq!(substitute("Hello _name_", &ctx), "Hello World");
//! assert_eq!(substitute("_missing_", &ctx), "_missing_");
//! ```
//!
use crate::core::context::{render_value, GenerationContext};
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"_([A-Za-z]+(?:\.[A-Za-z]+)?)_").expect("token pattern is a valid regex")
    })
}

/// Replaces every resolvable `_token_` in `text` with its context value.
pub fn substitute(text: &str, context: &GenerationContext) -> String {
    token_pattern()
        .replace_all(text, |caps: &Captures| {
            resolve_key(&caps[1], context).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Looks up a dotted key with the exact, lowercase, uppercase fallback chain.
pub fn resolve_key(key: &str, context: &GenerationContext) -> Option<String> {
    [key.to_string(), key.to_lowercase(), key.to_uppercase()]
        .iter()
        .find_map(|candidate| {
            let path: Vec<&str> = candidate.split('.').collect();
            context.lookup(&path).and_then(render_value)
        })
}

/// Substitutes parameters into each normal segment of a relative path.
///
/// `.`/`..` and root components are carried over unchanged, as are segments
/// that are not valid UTF-8. A value that
/// itself contains separators expands into several segments.
pub fn substitute_path(path: &Path, context: &GenerationContext) -> PathBuf {
    let mut substituted = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(segment) => match segment.to_str() {
                Some(text) => substituted.push(substitute(text, context)),
                None => substituted.push(segment),
            },
            other => substituted.push(other.as_os_str()),
        }
    }
    substituted
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use toml::Table;

    fn context(toml_text: &str) -> GenerationContext {
        GenerationContext::from_table(toml::from_str::<Table>(toml_text).unwrap())
    }

    #[test]
    fn test_simple_substitution() {
        let ctx = context(r#"name = "World""#);
        assert_eq!(substitute("Hello _name_", &ctx), "Hello World");
        assert_eq!(substitute("_name_ and _name_", &ctx), "World and World");
    }

    #[test]
    fn test_unresolved_token_is_left_intact() {
        let ctx = GenerationContext::new();
        assert_eq!(substitute("_missing_", &ctx), "_missing_");
        assert_eq!(substitute("keep _user.email_ here", &ctx), "keep _user.email_ here");
    }

    #[test]
    fn test_case_fallback_to_lowercase() {
        let ctx = context(
            r#"
            [user]
            email = "a@b.com"
            "#,
        );
        assert_eq!(substitute("_User.Email_", &ctx), "a@b.com");
    }

    #[test]
    fn test_case_fallback_to_uppercase() {
        let ctx = context(r#"NAME = "Loud""#);
        assert_eq!(substitute("_name_", &ctx), "Loud");
    }

    #[test]
    fn test_exact_case_wins_over_fallbacks() {
        let ctx = context(
            r#"
            Name = "exact"
            name = "lower"
            NAME = "upper"
            "#,
        );
        assert_eq!(substitute("_Name_", &ctx), "exact");
    }

    #[test]
    fn test_falsy_values_fall_through() {
        let ctx = context(
            r#"
            Count = 0
            count = 7
            Flag = false
            Title = ""
            TITLE = "Shout"
            "#,
        );
        assert_eq!(substitute("_Count_", &ctx), "7");
        assert_eq!(substitute("_Flag_", &ctx), "_Flag_");
        assert_eq!(substitute("_Title_", &ctx), "Shout");
    }

    #[test]
    fn test_single_pass_does_not_rescan_values() {
        let ctx = context(
            r#"
            outer = "_inner_"
            inner = "nope"
            "#,
        );
        assert_eq!(substitute("_outer_", &ctx), "_inner_");
    }

    #[test]
    fn test_non_token_underscores_are_untouched() {
        let ctx = context(r#"name = "x""#);
        assert_eq!(substitute("snake_case_2_", &ctx), "snake_case_2_");
        assert_eq!(substitute("__", &ctx), "__");
        assert_eq!(substitute("_a.b.c_", &ctx), "_a.b.c_");
    }

    #[test]
    fn test_table_values_are_not_rendered() {
        let ctx = context(
            r#"
            [user]
            email = "a@b.com"
            "#,
        );
        assert_eq!(substitute("_user_", &ctx), "_user_");
    }

    #[test]
    fn test_substitute_path_segments() {
        let ctx = context(r#"name = "button""#);
        let path = substitute_path(Path::new("_name_/src/_name_.rs"), &ctx);
        assert_eq!(path, PathBuf::from("button").join("src").join("button.rs"));
    }

    #[test]
    fn test_tokens_are_ascii_letters_only() {
        let mut ctx = GenerationContext::new();
        ctx.insert_dotted("s", "ascii");
        ctx.insert_dotted("k", "kelvin");
        assert_eq!(substitute("_s_ _\u{17F}_", &ctx), "ascii _\u{17F}_");
        assert_eq!(substitute("_k_ _\u{212A}_", &ctx), "kelvin _\u{212A}_");
    }

    #[cfg(unix)]
    #[test]
    fn test_substitute_path_keeps_non_utf8_segments() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let ctx = GenerationContext::new();
        let raw = OsStr::from_bytes(b"_name_\xff");
        let path = Path::new("dir").join(raw);
        assert_eq!(substitute_path(&path, &ctx), path);
    }
}
