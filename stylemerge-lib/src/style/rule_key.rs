use crate::style::owned_css::{OwnedDeclaration, RuleNode, StyleRule};
use std::fmt;

/// Canonical string naming a rule's semantic content. Equal keys mean duplicate rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the identity key of a rule.
///
/// Style rules are keyed by selector alone (trimmed, lowercased), so two rules for the
/// same selector collide whatever their declarations. Keyframes and media blocks are
/// keyed by their full content with declarations and frames sorted, which makes the key
/// insensitive to the order they were written in.
pub fn identity_key(rule: &RuleNode) -> IdentityKey {
    let key = match rule {
        RuleNode::Style(style) => format!("style:{}", style.selector.trim().to_lowercase()),
        RuleNode::Import(import) => format!("import:{}", import.href),
        RuleNode::Keyframes(keyframes) => {
            let frames = keyframes
                .frames
                .iter()
                .map(|frame| {
                    format!(
                        "{}:{}",
                        frame.key_text,
                        declaration_signature(&frame.declarations)
                    )
                })
                .collect();
            format!("keyframes:{}:{}", keyframes.name, join_sorted(frames, ":"))
        }
        RuleNode::Media(media) => {
            let inner = media.inner_rules.iter().map(inner_signature).collect();
            format!("media:{}:{}", media.media_query, join_sorted(inner, ":"))
        }
        RuleNode::Other(other) => format!("other:{}", other.raw_text),
    };
    IdentityKey(key)
}

fn inner_signature(rule: &StyleRule) -> String {
    format!("{}:{}", rule.selector, declaration_signature(&rule.declarations))
}

/// Sorted `prop:value` pairs joined by `;`.
fn declaration_signature(declarations: &[OwnedDeclaration]) -> String {
    let pairs = declarations
        .iter()
        .map(|decl| format!("{}:{}", decl.property, decl.value))
        .collect();
    join_sorted(pairs, ";")
}

fn join_sorted(mut parts: Vec<String>, separator: &str) -> String {
    parts.sort();
    parts.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::owned_css::{Frame, ImportRule, KeyframesRule, MediaRule, OtherRule};

    fn decl(property: &str, value: &str) -> OwnedDeclaration {
        OwnedDeclaration::new(property, value)
    }

    #[test]
    fn test_style_key_ignores_case_whitespace_and_declarations() {
        let a = RuleNode::Style(StyleRule::new("  .Card ", vec![decl("color", "red")]));
        let b = RuleNode::Style(StyleRule::new(".card", vec![decl("color", "blue")]));
        assert_eq!(identity_key(&a), identity_key(&b));
        assert_eq!(identity_key(&a).as_str(), "style:.card");
    }

    #[test]
    fn test_import_key_is_exact() {
        let a = RuleNode::Import(ImportRule {
            href: "x.css".to_string(),
        });
        let b = RuleNode::Import(ImportRule {
            href: "X.css".to_string(),
        });
        assert_eq!(identity_key(&a).as_str(), "import:x.css");
        assert_ne!(identity_key(&a), identity_key(&b));
    }

    #[test]
    fn test_keyframes_key_is_order_insensitive() {
        let first = RuleNode::Keyframes(KeyframesRule {
            name: "spin".to_string(),
            frames: vec![
                Frame {
                    key_text: "0%".to_string(),
                    declarations: vec![decl("transform", "rotate(0deg)"), decl("opacity", "1")],
                },
                Frame {
                    key_text: "100%".to_string(),
                    declarations: vec![decl("transform", "rotate(360deg)")],
                },
            ],
        });
        let second = RuleNode::Keyframes(KeyframesRule {
            name: "spin".to_string(),
            frames: vec![
                Frame {
                    key_text: "100%".to_string(),
                    declarations: vec![decl("transform", "rotate(360deg)")],
                },
                Frame {
                    key_text: "0%".to_string(),
                    declarations: vec![decl("opacity", "1"), decl("transform", "rotate(0deg)")],
                },
            ],
        });
        assert_eq!(identity_key(&first), identity_key(&second));
        assert_eq!(
            identity_key(&first).as_str(),
            "keyframes:spin:0%:opacity:1;transform:rotate(0deg):100%:transform:rotate(360deg)"
        );
    }

    #[test]
    fn test_keyframes_key_changes_with_content() {
        let make = |value: &str| {
            RuleNode::Keyframes(KeyframesRule {
                name: "fade".to_string(),
                frames: vec![Frame {
                    key_text: "to".to_string(),
                    declarations: vec![decl("opacity", value)],
                }],
            })
        };
        assert_ne!(identity_key(&make("0")), identity_key(&make("1")));
    }

    #[test]
    fn test_media_key_is_order_insensitive() {
        let a = RuleNode::Media(MediaRule {
            media_query: "print".to_string(),
            inner_rules: vec![
                StyleRule::new(".a", vec![decl("width", "1px"), decl("height", "2px")]),
                StyleRule::new(".b", vec![decl("display", "none")]),
            ],
        });
        let b = RuleNode::Media(MediaRule {
            media_query: "print".to_string(),
            inner_rules: vec![
                StyleRule::new(".b", vec![decl("display", "none")]),
                StyleRule::new(".a", vec![decl("height", "2px"), decl("width", "1px")]),
            ],
        });
        assert_eq!(identity_key(&a), identity_key(&b));
        assert_eq!(
            identity_key(&a).as_str(),
            "media:print:.a:height:2px;width:1px:.b:display:none"
        );
    }

    #[test]
    fn test_other_key_uses_raw_text() {
        let rule = RuleNode::Other(OtherRule {
            raw_text: "@page { margin: 1cm; }".to_string(),
        });
        assert_eq!(identity_key(&rule).as_str(), "other:@page { margin: 1cm; }");
    }
}
