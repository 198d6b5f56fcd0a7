//! Renders owned rules back to CSS text with a fixed layout: four spaces per nesting
//! level, one declaration per line, closing brace on its own line.

use crate::style::owned_css::{
    Frame, KeyframesRule, MediaRule, OwnedDeclaration, RuleNode, StyleRule,
};

pub const INDENT: &str = "    ";

/// Render a single rule. `@charset` leftovers render as an empty string.
pub fn format_rule(rule: &RuleNode) -> String {
    match rule {
        RuleNode::Style(style) => format_style_rule(style, 0),
        RuleNode::Import(import) => format!("@import url('{}');", import.href),
        RuleNode::Keyframes(keyframes) => format_keyframes_rule(keyframes),
        RuleNode::Media(media) => format_media_rule(media),
        RuleNode::Other(other) => {
            if other.raw_text.contains("@charset") {
                String::new()
            } else {
                other.raw_text.clone()
            }
        }
    }
}

/// Render a sequence of rules as one stylesheet, skipping rules that render empty.
pub fn format_rules<'a, I>(rules: I) -> String
where
    I: IntoIterator<Item = &'a RuleNode>,
{
    let lines: Vec<String> = rules
        .into_iter()
        .map(format_rule)
        .filter(|text| !text.is_empty())
        .collect();
    lines.join("\n").trim().to_string()
}

fn format_style_rule(rule: &StyleRule, depth: usize) -> String {
    format_block(rule.selector.trim(), &rule.declarations, depth)
}

fn format_keyframes_rule(rule: &KeyframesRule) -> String {
    let frames: Vec<String> = rule.frames.iter().map(format_frame).collect();
    wrap_at_rule(&format!("@keyframes {}", rule.name), &frames)
}

fn format_frame(frame: &Frame) -> String {
    format_block(&frame.key_text, &frame.declarations, 1)
}

fn format_media_rule(rule: &MediaRule) -> String {
    let inner: Vec<String> = rule
        .inner_rules
        .iter()
        .map(|style| format_style_rule(style, 1))
        .collect();
    wrap_at_rule(&format!("@media {}", rule.media_query), &inner)
}

fn wrap_at_rule(prelude: &str, children: &[String]) -> String {
    if children.is_empty() {
        return format!("{} {{\n}}", prelude);
    }
    format!("{} {{\n{}\n}}", prelude, children.join("\n"))
}

/// `<head> { ... }` at `depth`, declarations one level deeper.
fn format_block(head: &str, declarations: &[OwnedDeclaration], depth: usize) -> String {
    let outer = INDENT.repeat(depth);
    if declarations.is_empty() {
        return format!("{}{} {{}}", outer, head);
    }

    let inner = INDENT.repeat(depth + 1);
    let props: Vec<String> = declarations
        .iter()
        .map(|decl| format!("{}{}: {};", inner, decl.property, decl.value))
        .collect();
    format!("{}{} {{\n{}\n{}}}", outer, head, props.join("\n"), outer)
}
