// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based query complexity classification.
//!
//! Classifies user queries into fast/normal/strong tiers using fixed
//! pattern and keyword vocabularies plus structural heuristics. No network
//! call, no latency.
//!
//! Checks run in a fixed priority order that is part of the contract:
//! simple patterns, then strong keywords, then normal keywords, then
//! structural heuristics. The keyword vocabularies and the numeric
//! thresholds are hand-tuned; keep them stable.

use std::sync::LazyLock;

use regex::Regex;

use troika_core::Tier;

/// Short-form query patterns routed to the fast tier.
/// Matched against the trimmed, lower-cased query.
static SIMPLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Bare greetings and acknowledgements.
        r"^(hi|hello|hey|thanks|thank you|ok|okay|yes|no|bye|goodbye)\.?$",
        // Short "what is X" questions.
        r"^what (is|are) .{1,30}\??$",
        // Simple list requests.
        r"^(list|name|give me) \d+ .+$",
        // Translation requests.
        r"^translate .+$",
        // Definition requests.
        r"^define .+$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("simple pattern must compile"))
    .collect()
});

/// Phrases that trigger the strong tier.
const STRONG_KEYWORDS: &[&str] = &[
    "explain in detail",
    "step by step",
    "comprehensive",
    "thorough",
    "deep dive",
    "advanced",
    "debug",
    "fix this code",
    "review my code",
    "optimize",
    "architecture",
    "design pattern",
    "algorithm",
    "prove",
    "derive",
    "mathematical",
];

/// Phrases that trigger the normal tier. Checked after the strong
/// vocabulary, so a query matching both classifies strong.
const NORMAL_KEYWORDS: &[&str] = &[
    "explain",
    "why",
    "how does",
    "compare",
    "analyze",
    "elaborate",
    "teach me",
    "help me understand",
    "what is the difference",
    "pros and cons",
    "advantages",
    "disadvantages",
    "example",
    "code",
    "write",
    "create",
    "implement",
];

/// Deterministic rule-based query classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryClassifier;

impl QueryClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify a query into a tier.
    ///
    /// Pure function of the query text; see the module docs for the
    /// decision order.
    pub fn classify(&self, query: &str) -> Tier {
        let trimmed = query.trim();
        let lower = trimmed.to_lowercase();

        if SIMPLE_PATTERNS.iter().any(|p| p.is_match(&lower)) {
            return Tier::Fast;
        }

        // Strong indicators are more specific, so they win over normal ones.
        if STRONG_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return Tier::Strong;
        }

        if NORMAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return Tier::Normal;
        }

        // Structural heuristics on length and shape.
        let word_count = trimmed.split_whitespace().count();
        let has_code = trimmed.contains("```")
            || trimmed.contains("def ")
            || trimmed.contains("function ")
            || trimmed.contains("class ");
        let multiple_questions = trimmed.matches('?').count() > 1;
        let complex_code = trimmed.matches('\n').count() > 5 && has_code;

        if complex_code || multiple_questions {
            return Tier::Strong;
        }

        if has_code {
            return Tier::Normal;
        }

        if word_count > 100 {
            return Tier::Strong;
        }

        if word_count > 30 {
            return Tier::Normal;
        }

        if word_count < 10 {
            return Tier::Fast;
        }

        Tier::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(query: &str) -> Tier {
        QueryClassifier::new().classify(query)
    }

    #[test]
    fn greetings_are_fast() {
        assert_eq!(classify("hi"), Tier::Fast);
        assert_eq!(classify("Hello."), Tier::Fast);
        assert_eq!(classify("thank you"), Tier::Fast);
        assert_eq!(classify("  ok  "), Tier::Fast);
    }

    #[test]
    fn short_punctuated_acknowledgement_is_fast_via_word_count() {
        // "thanks!" misses the greeting pattern (bang, not period) but
        // falls through the heuristics to the fast tier.
        assert_eq!(classify("thanks!"), Tier::Fast);
    }

    #[test]
    fn short_what_is_questions_are_fast() {
        assert_eq!(classify("what is gravity?"), Tier::Fast);
        assert_eq!(classify("What are prions?"), Tier::Fast);
    }

    #[test]
    fn long_what_is_questions_are_not_simple() {
        // Over the 30-character tail limit of the "what is" pattern.
        let query =
            "what is the long-run economic impact of universal basic income on labor markets?";
        assert_ne!(classify(query), Tier::Fast);
    }

    #[test]
    fn list_translate_define_requests_are_fast() {
        assert_eq!(classify("list 5 capitals of europe"), Tier::Fast);
        assert_eq!(classify("translate good morning to french"), Tier::Fast);
        assert_eq!(classify("define entropy"), Tier::Fast);
    }

    #[test]
    fn explain_family_is_normal() {
        assert_eq!(classify("Explain how photosynthesis works"), Tier::Normal);
        assert_eq!(classify("how does a transistor switch"), Tier::Normal);
    }

    #[test]
    fn strong_keywords_win() {
        assert_eq!(
            classify("Explain in detail and step by step the architecture of a CPU"),
            Tier::Strong
        );
        assert_eq!(classify("please debug my script"), Tier::Strong);
    }

    #[test]
    fn strong_keywords_checked_before_normal_keywords() {
        // "optimize"/"algorithm" are strong-tier; "explain" alone would be
        // normal-tier, but strong is checked first.
        assert_eq!(
            classify("explain how to optimize this algorithm"),
            Tier::Strong
        );
    }

    #[test]
    fn multiple_question_marks_are_strong() {
        assert_eq!(
            classify("Is it raining? Should I bring an umbrella?"),
            Tier::Strong
        );
    }

    #[test]
    fn code_block_with_many_lines_is_strong() {
        let query = "can you look at this\n```\ndef f():\n    pass\n\n\n\n```\nplease";
        assert_eq!(classify(query), Tier::Strong);
    }

    #[test]
    fn short_code_snippet_is_normal() {
        assert_eq!(classify("def add(a, b): return a + b"), Tier::Normal);
    }

    #[test]
    fn very_long_query_is_strong() {
        let query = "word ".repeat(150);
        assert_eq!(classify(&query), Tier::Strong);
    }

    #[test]
    fn medium_query_is_normal() {
        let query = "word ".repeat(40);
        assert_eq!(classify(&query), Tier::Normal);
    }

    #[test]
    fn short_plain_query_is_fast() {
        assert_eq!(classify("favorite color of the sky"), Tier::Fast);
    }

    #[test]
    fn mid_length_query_defaults_to_normal() {
        // 12 plain words: no pattern, no keyword, no structure signal.
        assert_eq!(
            classify("the quick brown fox jumps over the lazy dog near the river"),
            Tier::Normal
        );
    }

    #[test]
    fn empty_query_is_fast() {
        assert_eq!(classify(""), Tier::Fast);
        assert_eq!(classify("   "), Tier::Fast);
    }
}
