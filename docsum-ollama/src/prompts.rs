//! Prompt templates for each summary mode.
//!
//! Every template makes the model open by saying what kind of document it is
//! reading before it summarizes anything.

pub const COMPREHENSIVE: &str = "comprehensive";
pub const EXECUTIVE: &str = "executive";
pub const BULLET_POINTS: &str = "bullet_points";

/// Summary modes accepted by [`build_prompt`], in display order.
pub const MODES: [&str; 3] = [COMPREHENSIVE, EXECUTIVE, BULLET_POINTS];

const DOCUMENT_SLOT: &str = "{text}";

const COMPREHENSIVE_TEMPLATE: &str = "You are a professional document analyst.\n\n\
RULES:\n\
1. Start with: 'This document is [type] about [main topic/purpose].'\n\
2. Summarize all key information clearly and concisely (300-400 words).\n\
3. Do not over-emphasize brand names or trademarks.\n\
4. Focus on substance: purpose, findings, arguments, or recommendations.\n\n\
Document:\n{text}\n\nSummary:";

const EXECUTIVE_TEMPLATE: &str = "You are a senior business analyst writing for executives.\n\n\
RULES:\n\
1. First sentence: state what this document is and its core business purpose.\n\
2. Highlight the most critical decisions, findings, or recommendations.\n\
3. Be concise and action-oriented (150-200 words).\n\n\
Document:\n{text}\n\nExecutive Summary:";

const BULLET_POINTS_TEMPLATE: &str = "You are a professional document analyst.\n\n\
RULES:\n\
1. First line: 'This document is [type] about [topic].'\n\
2. List 5-7 key points as bullet points.\n\
3. Each bullet must be a complete, informative sentence.\n\
4. Focus on purpose, key facts, and conclusions, not entity names.\n\n\
Document:\n{text}\n\nKey Points:";

/// Template for a mode. Unknown modes use the comprehensive template.
pub fn template(mode: &str) -> &'static str {
    match mode {
        EXECUTIVE => EXECUTIVE_TEMPLATE,
        BULLET_POINTS => BULLET_POINTS_TEMPLATE,
        _ => COMPREHENSIVE_TEMPLATE,
    }
}

/// Whether `mode` names one of the built-in templates.
#[inline]
pub fn is_known_mode(mode: &str) -> bool {
    MODES.contains(&mode)
}

/// Render the prompt sent to the model for `text` in the given mode.
pub fn build_prompt(text: &str, mode: &str) -> String {
    // Single substitution so braces inside the document are left alone.
    template(mode).replacen(DOCUMENT_SLOT, text, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_embeds_the_document() {
        for mode in MODES {
            let prompt = build_prompt("Quarterly revenue grew 12%.", mode);
            assert!(prompt.contains("Document:\nQuarterly revenue grew 12%.\n\n"));
            assert!(prompt.contains("This document is") || prompt.contains("what this document is"));
        }
    }

    #[test]
    fn modes_have_distinct_endings() {
        assert!(build_prompt("x", COMPREHENSIVE).ends_with("Summary:"));
        assert!(build_prompt("x", EXECUTIVE).ends_with("Executive Summary:"));
        assert!(build_prompt("x", BULLET_POINTS).ends_with("Key Points:"));
    }

    #[test]
    fn unknown_mode_falls_back_to_comprehensive() {
        assert_eq!(build_prompt("doc", "haiku"), build_prompt("doc", COMPREHENSIVE));
        assert!(!is_known_mode("haiku"));
        assert!(is_known_mode(EXECUTIVE));
    }

    #[test]
    fn document_braces_survive() {
        let prompt = build_prompt("fn main() { {text} }", EXECUTIVE);
        assert!(prompt.contains("fn main() { {text} }"));
        assert_eq!(prompt.matches("Executive Summary:").count(), 1);
    }
}
