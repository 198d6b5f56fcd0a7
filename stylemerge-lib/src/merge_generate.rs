use crate::style::css_merge::{self, MergeSummary};
use crate::style::css_parser::{self, ParseFailure, ParseOptions};
use crate::style::css_format;

pub mod merge_stylesheets {
    use super::*;
    use log::info;

    /// Settings shared by both parse passes.
    #[derive(Debug, Clone)]
    pub struct MergeOptions {
        pub verbose: bool,
        pub error_recovery: bool,
        pub external_name: String,
        pub inline_name: String,
    }

    impl Default for MergeOptions {
        fn default() -> Self {
            MergeOptions {
                verbose: true,
                error_recovery: false,
                external_name: "external".to_string(),
                inline_name: "inline".to_string(),
            }
        }
    }

    impl MergeOptions {
        fn parse_options(&self, source_name: &str) -> ParseOptions {
            ParseOptions {
                source_name: source_name.to_string(),
                verbose: self.verbose,
                error_recovery: self.error_recovery,
            }
        }
    }

    /// Everything the caller needs to report on a merge run.
    #[derive(Debug, Clone)]
    pub struct MergeReport {
        pub css: String,
        pub summary: MergeSummary,
        pub external_failure: Option<ParseFailure>,
        pub inline_failure: Option<ParseFailure>,
    }

    impl MergeReport {
        /// The merged CSS wrapped in a `<style>` element.
        pub fn to_style_tag(&self) -> String {
            format!("<style>\n{}\n</style>", self.css)
        }

        pub fn failures(&self) -> impl Iterator<Item = &ParseFailure> {
            self.external_failure.iter().chain(self.inline_failure.iter())
        }
    }

    /// Parse both sources, merge with external precedence and render the result.
    pub fn generate(external_css: &str, inline_css: &str, options: &MergeOptions) -> MergeReport {
        let external_opts = options.parse_options(&options.external_name);
        let inline_opts = options.parse_options(&options.inline_name);

        // The two sources are independent, so they can be parsed side by side.
        let (external, inline) = rayon::join(
            || css_parser::parse(external_css, &external_opts),
            || css_parser::parse(inline_css, &inline_opts),
        );

        let merged = css_merge::merge(&external.rules, &inline.rules);
        info!(
            "{}: {} rules, {}: {} rules, merged: {} (+{} new)",
            options.external_name,
            merged.summary.external_rules,
            options.inline_name,
            merged.summary.inline_rules,
            merged.summary.merged_rules,
            merged.summary.added_from_inline
        );

        MergeReport {
            css: css_format::format_rules(merged.rules()),
            summary: merged.summary,
            external_failure: external.failure,
            inline_failure: inline.failure,
        }
    }
}
