//! Turns raw CSS text into an owned [`RuleList`].
//!
//! LightningCSS does the actual parsing; every rule it returns is converted into the
//! crate's own `RuleNode` model straight away so the borrowed parser tree never leaves
//! this module. A text that fails to parse becomes an empty list plus a
//! [`ParseFailure`] diagnostic, it never aborts the caller.

use crate::style::owned_css::{
    Frame, ImportRule, KeyframesRule, MediaRule, OtherRule, OwnedDeclaration, RuleList,
    RuleNode, StyleRule,
};
use lightningcss::declaration::DeclarationBlock;
use lightningcss::error::{Error as LcssError, ParserError};
use lightningcss::printer::PrinterOptions;
use lightningcss::rules::keyframes::KeyframesRule as LcssKeyframesRule;
use lightningcss::rules::media::MediaRule as LcssMediaRule;
use lightningcss::rules::{style::StyleRule as LcssStyleRule, CssRule};
use lightningcss::stylesheet::{ParserOptions, StyleSheet as LightningStyleSheet};
use lightningcss::traits::ToCss;
use lightningcss::vendor_prefix::VendorPrefix;
use log::{debug, warn};
use thiserror::Error;

/// Knobs for a single parse pass. Passed explicitly, there is no global parser state.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Label used in diagnostics, e.g. "external" or a file path.
    pub source_name: String,
    /// Emit parse failures through `warn!` in addition to returning them.
    pub verbose: bool,
    /// Skip invalid rules instead of rejecting the whole text.
    pub error_recovery: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            source_name: "stylesheet".to_string(),
            verbose: true,
            error_recovery: false,
        }
    }
}

impl ParseOptions {
    pub fn named(source_name: impl Into<String>) -> Self {
        ParseOptions {
            source_name: source_name.into(),
            ..ParseOptions::default()
        }
    }
}

/// The text could not be parsed as CSS. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse {source_name} CSS: {message}{}", location_suffix(.line, .column))]
pub struct ParseFailure {
    pub source_name: String,
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

fn location_suffix(line: &Option<u32>, column: &Option<u32>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" (line {}, column {})", line + 1, column),
        _ => String::new(),
    }
}

/// Result of one parse pass: the rules, plus the diagnostic if parsing failed.
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub rules: RuleList,
    pub failure: Option<ParseFailure>,
}

/// Parse `css_text` into a [`ParsedSheet`]. Never fails; see [`ParseFailure`].
pub fn parse(css_text: &str, options: &ParseOptions) -> ParsedSheet {
    if css_text.trim().is_empty() {
        return ParsedSheet::default();
    }

    match parse_and_own_css(css_text, options) {
        Ok(rules) => {
            debug!(
                "parsed {} top-level rules from {}",
                rules.len(),
                options.source_name
            );
            ParsedSheet {
                rules,
                failure: None,
            }
        }
        Err(failure) => {
            if options.verbose {
                warn!("{}", failure);
            }
            ParsedSheet {
                rules: RuleList::default(),
                failure: Some(failure),
            }
        }
    }
}

/// Parse a raw CSS string (LightningCSS) and convert it to a fully-owned rule list.
fn parse_and_own_css(css_text: &str, options: &ParseOptions) -> Result<RuleList, ParseFailure> {
    let parser_opts = ParserOptions {
        error_recovery: options.error_recovery,
        ..ParserOptions::default()
    };

    let sheet = LightningStyleSheet::parse(css_text, parser_opts)
        .map_err(|e: LcssError<ParserError<'_>>| ParseFailure {
            source_name: options.source_name.clone(),
            message: e.kind.to_string(),
            line: e.loc.as_ref().map(|loc| loc.line),
            column: e.loc.as_ref().map(|loc| loc.column),
        })?;

    let mut owned_rules = Vec::new();

    for rule in &sheet.rules.0 {
        let owned = match rule {
            CssRule::Style(style_rule) => Some(RuleNode::Style(convert_style_rule(style_rule))),
            CssRule::Import(import_rule) => Some(RuleNode::Import(ImportRule {
                href: import_rule.url.to_string(),
            })),
            // Prefixed keyframes pass through verbatim so they never collide with the
            // unprefixed block of the same name.
            CssRule::Keyframes(keyframes_rule)
                if keyframes_rule.vendor_prefix.intersects(prefixed_vendors()) =>
            {
                convert_other_rule(rule)
            }
            CssRule::Keyframes(keyframes_rule) => {
                Some(RuleNode::Keyframes(convert_keyframes_rule(keyframes_rule)))
            }
            CssRule::Media(media_rule) => Some(RuleNode::Media(convert_media_rule(media_rule))),
            // @charset ends up here.
            CssRule::Ignored => None,
            other => convert_other_rule(other),
        };

        if let Some(node) = owned {
            owned_rules.push(node);
        }
    }

    Ok(RuleList::new(owned_rules))
}

/// Copy a single StyleRule's selectors + declarations into the owned model.
fn convert_style_rule(style_rule: &LcssStyleRule<'_>) -> StyleRule {
    let mut selectors_vec = Vec::new();
    for selector in &style_rule.selectors.0 {
        if let Ok(sel_str) = selector.to_css_string(PrinterOptions::default()) {
            selectors_vec.push(sel_str);
        }
    }

    StyleRule {
        selector: selectors_vec.join(", "),
        declarations: convert_declarations(&style_rule.declarations),
    }
}

/// Normal declarations first, then the `!important` ones, each in source order.
fn convert_declarations(block: &DeclarationBlock<'_>) -> Vec<OwnedDeclaration> {
    let mut decls_vec = Vec::new();

    for property in &block.declarations {
        if let Ok(value) = property.value_to_css_string(PrinterOptions::default()) {
            decls_vec.push(OwnedDeclaration {
                property: property.property_id().name().to_string(),
                value,
            });
        }
    }

    for property in &block.important_declarations {
        if let Ok(value) = property.value_to_css_string(PrinterOptions::default()) {
            decls_vec.push(OwnedDeclaration {
                property: property.property_id().name().to_string(),
                value: format!("{} !important", value),
            });
        }
    }

    decls_vec
}

fn prefixed_vendors() -> VendorPrefix {
    VendorPrefix::WebKit | VendorPrefix::Moz | VendorPrefix::Ms | VendorPrefix::O
}

fn convert_keyframes_rule(keyframes_rule: &LcssKeyframesRule<'_>) -> KeyframesRule {
    let name = keyframes_rule
        .name
        .to_css_string(PrinterOptions::default())
        .unwrap_or_default();

    let frames = keyframes_rule
        .keyframes
        .iter()
        .map(|keyframe| {
            let key_text = keyframe
                .selectors
                .iter()
                .filter_map(|sel| sel.to_css_string(PrinterOptions::default()).ok())
                .collect::<Vec<_>>()
                .join(", ");
            Frame {
                key_text,
                declarations: convert_declarations(&keyframe.declarations),
            }
        })
        .collect();

    KeyframesRule { name, frames }
}

fn convert_media_rule(media_rule: &LcssMediaRule<'_>) -> MediaRule {
    let media_query = media_rule
        .query
        .to_css_string(PrinterOptions::default())
        .unwrap_or_default();

    // Only style rules are kept; nested at-rules are skipped.
    let mut inner_rules = Vec::new();
    for inner_rule in &media_rule.rules.0 {
        if let CssRule::Style(sr) = inner_rule {
            inner_rules.push(convert_style_rule(sr));
        }
    }

    MediaRule {
        media_query,
        inner_rules,
    }
}

/// Fallback for at-rules without a dedicated variant: keep the serialized text.
fn convert_other_rule(rule: &CssRule<'_>) -> Option<RuleNode> {
    match rule.to_css_string(PrinterOptions::default()) {
        Ok(raw_text) if raw_text.trim().is_empty() || raw_text.contains("@charset") => None,
        Ok(raw_text) => Some(RuleNode::Other(OtherRule { raw_text })),
        Err(e) => {
            debug!("dropping rule that could not be serialized: {:?}", e);
            None
        }
    }
}
