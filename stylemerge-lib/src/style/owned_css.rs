// Fully-owned CSS rule model. Nothing in here borrows from the parser's input.
use std::fmt;

use crate::style::css_format;

/// One parsed source, rules in their original textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleList {
    pub rules: Vec<RuleNode>,
}

impl RuleList {
    pub fn new(rules: Vec<RuleNode>) -> Self {
        RuleList { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleNode> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a RuleNode;
    type IntoIter = std::slice::Iter<'a, RuleNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// The closed set of rule kinds the merger understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleNode {
    Style(StyleRule),
    Import(ImportRule),
    Keyframes(KeyframesRule),
    Media(MediaRule),
    /// Any other at-rule, kept as its serialized text.
    Other(OtherRule),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// e.g. "div", ".red", "h1, h2"
    pub selector: String,
    pub declarations: Vec<OwnedDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRule {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframesRule {
    pub name: String,
    pub frames: Vec<Frame>,
}

/// A single keyframe block, e.g. `0%, 100% { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub key_text: String,
    pub declarations: Vec<OwnedDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRule {
    pub media_query: String,
    /// Only style rules survive inside a media block.
    pub inner_rules: Vec<StyleRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherRule {
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDeclaration {
    pub property: String,
    pub value: String,
}

impl OwnedDeclaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        OwnedDeclaration {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl StyleRule {
    pub fn new(selector: impl Into<String>, declarations: Vec<OwnedDeclaration>) -> Self {
        StyleRule {
            selector: selector.into(),
            declarations,
        }
    }
}

impl RuleNode {
    /// Short name of the variant, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            RuleNode::Style(_) => "style",
            RuleNode::Import(_) => "import",
            RuleNode::Keyframes(_) => "keyframes",
            RuleNode::Media(_) => "media",
            RuleNode::Other(_) => "other",
        }
    }
}

impl fmt::Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&css_format::format_rule(self))
    }
}
