//! Flat CSS extraction for component files.
//!
//! The grammar is shallow: a style block is treated as a
//! sequence of `selector { prop: value; ... }` blocks. Nested at-rules are
//! not understood and produce partial rule sets without any error.

use crate::domain::model::Rule;
use regex::Regex;
use std::sync::LazyLock;

/// First `<style ...>` ... `</style>` section, across newlines.
static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style[^>]*>(.*?)</style>").expect("valid style regex"));

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid comment regex"));

static RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^{}]+)\s*\{\s*([^{}]*)\s*\}").expect("valid rule regex")
});

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^:;]+)\s*:\s*([^:;]+)(?:;|$)").expect("valid declaration regex")
});

/// 取出第一個 `<style>` 區塊的內容 (已去除前後空白)
pub fn extract_style_block(source: &str) -> Option<&str> {
    STYLE_BLOCK_RE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Removes `/* ... */` spans without leaving a separator behind.
pub fn strip_comments(css: &str) -> String {
    COMMENT_RE.replace_all(css, "").into_owned()
}

/// Splits comment-free CSS into `(selector, property block)` pairs.
pub fn tokenize_rules(css: &str) -> Vec<(&str, &str)> {
    RULE_RE
        .captures_iter(css)
        .filter_map(|caps| {
            let selector = caps.get(1)?.as_str().trim();
            let block = caps.get(2)?.as_str().trim();
            Some((selector, block))
        })
        .collect()
}

/// Splits one property block into trimmed `(property, value)` pairs.
/// Pairs with an empty side are dropped.
pub fn parse_declarations(block: &str) -> Vec<(&str, &str)> {
    DECLARATION_RE
        .captures_iter(block)
        .filter_map(|caps| {
            let property = caps.get(1)?.as_str().trim();
            let value = caps.get(2)?.as_str().trim();
            if property.is_empty() || value.is_empty() {
                None
            } else {
                Some((property, value))
            }
        })
        .collect()
}

/// Full parse of a style block: comments, rules, then declarations.
/// Rules without any declaration are not returned.
pub fn parse_rules(style: &str) -> Vec<Rule> {
    let cleaned = strip_comments(style);

    tokenize_rules(&cleaned)
        .into_iter()
        .filter_map(|(selector, block)| {
            let mut rule = Rule::new(selector);
            for (property, value) in parse_declarations(block) {
                rule.set(property, value);
            }
            (!rule.is_empty()).then_some(rule)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_style_block_absent() {
        let source = "<script>let x = 1;</script>\n<div>{x}</div>";
        assert_eq!(extract_style_block(source), None);
    }

    #[test]
    fn test_extract_style_block_with_attributes() {
        let source = r#"<div class="a"></div>
<style lang="scss">
  .a { color: red; }
</style>"#;
        assert_eq!(extract_style_block(source), Some(".a { color: red; }"));
    }

    #[test]
    fn test_only_first_style_block_is_used() {
        let source = "<style>.a { color: red; }</style>\n<style>.b { color: blue; }</style>";
        assert_eq!(extract_style_block(source), Some(".a { color: red; }"));
    }

    #[test]
    fn test_empty_style_block_is_present() {
        assert_eq!(extract_style_block("<style>\n\n</style>"), Some(""));
    }

    #[test]
    fn test_strip_comments_multiline() {
        let css = "/* header\n comment */.a { color: red; /* inline */ }";
        assert_eq!(strip_comments(css), ".a { color: red;  }");
    }

    #[test]
    fn test_comment_removal_merges_tokens() {
        let rules = parse_rules(".a { colo/* x */r: red; }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].get("color"), Some("red"));
        assert_eq!(rules[0].declarations.len(), 1);
    }

    #[test]
    fn test_single_rule() {
        let rules = parse_rules(".a { color: red; }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, ".a");
        assert_eq!(rules[0].get("color"), Some("red"));
    }

    #[test]
    fn test_duplicate_property_last_wins() {
        let rules = parse_rules(".a { color: red; color: blue; }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].declarations.len(), 1);
        assert_eq!(rules[0].get("color"), Some("blue"));
    }

    #[test]
    fn test_repeated_selector_is_not_merged() {
        let rules = parse_rules(".a { color: red; }\n.a { margin: 0; }");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selector, ".a");
        assert_eq!(rules[1].selector, ".a");
        assert_eq!(rules[0].get("margin"), None);
        assert_eq!(rules[1].get("margin"), Some("0"));
    }

    #[test]
    fn test_rule_without_declarations_is_dropped() {
        assert!(parse_rules(".a { ; }").is_empty());
        assert!(parse_rules(".a {   }").is_empty());
        let rules = parse_rules(".a { } .b { padding: 4px }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, ".b");
    }

    #[test]
    fn test_last_declaration_without_semicolon() {
        let declarations = parse_declarations("display: flex; gap: 1rem");
        assert_eq!(declarations, vec![("display", "flex"), ("gap", "1rem")]);
    }

    #[test]
    fn test_selector_with_combinators_kept_verbatim() {
        let rules = parse_rules(".list > li, .list:hover { margin: 0 auto; }");
        assert_eq!(rules[0].selector, ".list > li, .list:hover");
        assert_eq!(rules[0].get("margin"), Some("0 auto"));
    }

    #[test]
    fn test_custom_property_values() {
        let rules = parse_rules(":root { --bg-main: #fff; } .a { color: var(--fg-text, black); }");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].get("--bg-main"), Some("#fff"));
        assert_eq!(rules[1].get("color"), Some("var(--fg-text, black)"));
    }

    #[test]
    fn test_value_with_colon_is_mis_split() {
        let declarations = parse_declarations("background: url(http://x.png)");
        assert_eq!(declarations, vec![("url(http", "//x.png)")]);
    }

    #[test]
    fn test_nested_media_query_is_flattened() {
        let css = "@media (max-width: 600px) { .a { color: red; } }";
        let rules = parse_rules(css);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, ".a");
    }
}
