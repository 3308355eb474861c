//! Syntax highlighting for code blocks
//!
//! Grammars live in a process-wide registry, initialized once from the
//! extended syntax set (the defaults plus GraphQL, JSX/TSX, TypeScript and
//! friends). Lookup misses are reported to the caller, which falls back to
//! unhighlighted rendering.

use lazy_static::lazy_static;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

lazy_static! {
    static ref SYNTAXES: SyntaxSet = two_face::syntax::extra_newlines();
}

/// The shared grammar registry
pub fn syntax_set() -> &'static SyntaxSet {
    &SYNTAXES
}

/// Resolve a `language-*` token to a registered grammar
pub fn find_grammar(token: &str) -> Option<&'static SyntaxReference> {
    let token = normalize_token(token);
    let set = syntax_set();
    set.find_syntax_by_token(&token)
        .or_else(|| set.find_syntax_by_name(&token))
        .or_else(|| set.find_syntax_by_extension(&token))
}

/// Map common CMS language tokens onto the names the registry knows
fn normalize_token(token: &str) -> String {
    let token = token.to_ascii_lowercase();
    match token.as_str() {
        "shell" | "sh" | "zsh" => "bash".to_string(),
        "ts" => "typescript".to_string(),
        "js" => "javascript".to_string(),
        _ => token,
    }
}

/// Highlight source text into class-annotated HTML spans
///
/// Returns `None` if the grammar rejects the input; the caller degrades to
/// default rendering instead of failing the page.
pub fn highlight(code: &str, syntax: &SyntaxReference) -> Option<String> {
    let mut source = code.to_string();
    if !source.ends_with('\n') {
        source.push('\n');
    }

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set(), ClassStyle::Spaced);

    for line in LinesWithEndings::from(&source) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .ok()?;
    }

    Some(generator.finalize())
}
