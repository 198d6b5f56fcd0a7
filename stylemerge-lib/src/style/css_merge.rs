use crate::style::owned_css::{RuleList, RuleNode};
use crate::style::rule_key::{identity_key, IdentityKey};
use log::debug;
use std::collections::HashSet;

/// Counts reported after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Distinct keys in the external list.
    pub external_rules: usize,
    /// Distinct keys in the inline list.
    pub inline_rules: usize,
    pub merged_rules: usize,
    /// Inline rules whose key was not already present.
    pub added_from_inline: usize,
}

/// Ordered, deduplicated output of [`merge`]. Borrows the rules from the inputs.
#[derive(Debug, Clone, Default)]
pub struct MergedRules<'a> {
    pub entries: Vec<(IdentityKey, &'a RuleNode)>,
    pub summary: MergeSummary,
}

impl<'a> MergedRules<'a> {
    pub fn rules(&self) -> impl Iterator<Item = &'a RuleNode> + '_ {
        self.entries.iter().map(|(_, rule)| *rule)
    }

    pub fn keys(&self) -> impl Iterator<Item = &IdentityKey> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merge two rule lists, external first.
///
/// Every external rule is emitted in its original order unless its key was already
/// seen; then every inline rule whose key is still unseen is appended, again in order.
/// The first occurrence of a key always wins, so external rules take precedence.
pub fn merge<'a>(external: &'a RuleList, inline: &'a RuleList) -> MergedRules<'a> {
    let external_keyed = keyed(external);
    let inline_keyed = keyed(inline);

    let mut summary = MergeSummary {
        external_rules: distinct_keys(&external_keyed),
        inline_rules: distinct_keys(&inline_keyed),
        ..MergeSummary::default()
    };

    let mut seen: HashSet<IdentityKey> = HashSet::new();
    let mut entries = Vec::with_capacity(external_keyed.len() + inline_keyed.len());

    for (key, rule) in external_keyed {
        if seen.insert(key.clone()) {
            entries.push((key, rule));
        } else {
            debug!("dropping duplicate external rule {}", key);
        }
    }

    for (key, rule) in inline_keyed {
        if seen.insert(key.clone()) {
            debug!("adding inline {} rule {}", rule.kind(), key);
            entries.push((key, rule));
            summary.added_from_inline += 1;
        } else {
            debug!("inline rule {} already present, skipping", key);
        }
    }

    summary.merged_rules = entries.len();
    MergedRules { entries, summary }
}

fn keyed(list: &RuleList) -> Vec<(IdentityKey, &RuleNode)> {
    list.iter().map(|rule| (identity_key(rule), rule)).collect()
}

fn distinct_keys(keyed: &[(IdentityKey, &RuleNode)]) -> usize {
    keyed.iter().map(|(key, _)| key).collect::<HashSet<_>>().len()
}
