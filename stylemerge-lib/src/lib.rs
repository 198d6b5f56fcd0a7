//! Reconciles an external stylesheet with the inline `<style>` block of an HTML
//! document into one deduplicated, order-preserving stylesheet.
//!
//! External rules take precedence: an inline rule whose identity key already exists
//! externally is dropped, inline-only rules are appended after the external ones.

pub mod merge_generate;

pub mod parser {
    pub mod style_block;
}

pub mod style {
    pub mod css_format;
    pub mod css_merge;
    pub mod css_parser;
    pub mod owned_css;
    pub mod rule_key;
}

pub use merge_generate::merge_stylesheets;
pub use parser::style_block::extract_style_block;
pub use style::css_format::{format_rule, format_rules};
pub use style::css_merge::{merge, MergeSummary, MergedRules};
pub use style::css_parser::{parse, ParseFailure, ParseOptions, ParsedSheet};
pub use style::owned_css::{RuleList, RuleNode};
pub use style::rule_key::{identity_key, IdentityKey};
