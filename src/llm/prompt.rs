//! Prompt builder for the four correction operations.
//!
//! [`PromptBuilder::build_chat`] returns a `(system_msg, user_msg)` pair for
//! any OpenAI-compatible `/v1/chat/completions` endpoint.  The system message
//! carries the operation-specific rules; the user message carries a couple of
//! few-shot examples and the text to correct.

use crate::llm::corrector::CorrectionOp;

// ---------------------------------------------------------------------------
// System instructions
// ---------------------------------------------------------------------------

const COMMON_RULES: &str = "\
- Reply with ONLY the resulting text: no explanation, no quotes, no labels.
- Preserve the meaning, names, numbers, code and URLs exactly.
- Keep line breaks where they are.
- If nothing needs to change, return the text unchanged.";

const FIX_TYPOS_INSTRUCTION: &str = "\
You fix spelling mistakes in a live-edited document.
Task: correct misspelled words ONLY.
- Do not add or remove punctuation.
- Do not change capitalisation unless a word is misspelled.
- Do not reorder, add or remove words.";

const FINALIZE_INSTRUCTION: &str = "\
You polish already spell-checked sentences in a live-edited document.
Task: add correct punctuation and capitalisation, remove filler words
(um, uh, like, you know) and stutters.
- Do not rephrase or change word choice.";

const FIX_AND_FINALIZE_INSTRUCTION: &str = "\
You clean up pasted or dictated text in a live-edited document.
Task: fix spelling mistakes, then add correct punctuation and capitalisation,
and remove filler words (um, uh, like, you know) and stutters.
- Do not rephrase beyond what these fixes require.";

const ENHANCE_INSTRUCTION: &str = "\
You are an editor improving a whole document on the author's request.
Task: rewrite for clarity and flow while keeping the author's voice,
meaning and language. Fix all spelling, grammar and punctuation.";

// ---------------------------------------------------------------------------
// Few-shot examples
// ---------------------------------------------------------------------------

const FIX_TYPOS_EXAMPLES: &str = "
Examples:
Input: \"helo wrld, this is a tst\"
Output: \"hello world, this is a test\"
";

const FINALIZE_EXAMPLES: &str = "
Examples:
Input: \"um so i think we should uh leave now\"
Output: \"So I think we should leave now.\"
";

const FIX_AND_FINALIZE_EXAMPLES: &str = "
Examples:
Input: \"i went ther yesterday it was realy fun\"
Output: \"I went there yesterday. It was really fun.\"
";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds correction prompts in chat-message format.
///
/// # Example
/// ```rust
/// use live_proofer::llm::{CorrectionOp, PromptBuilder};
///
/// let builder = PromptBuilder::new("en");
/// let (system, user) = builder.build_chat(CorrectionOp::FixTypos, "helo");
/// assert!(system.contains("spelling"));
/// assert!(user.contains("helo"));
/// ```
pub struct PromptBuilder {
    language: String,
}

impl PromptBuilder {
    /// Create a new builder for the given ISO-639-1 language code.
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Build a **(system_msg, user_msg)** pair for `op`.
    pub fn build_chat(&self, op: CorrectionOp, text: &str) -> (String, String) {
        let mut system_msg = String::with_capacity(1024);
        system_msg.push_str(Self::instruction(op));
        system_msg.push('\n');
        system_msg.push_str(COMMON_RULES);
        system_msg.push_str(&format!(
            "\n- The text is written in {}; answer in the same language.",
            self.language_name()
        ));

        let mut user_msg = String::with_capacity(text.len() + 256);
        user_msg.push_str(Self::examples(op));
        user_msg.push_str(&format!("\nText:\n{}\n\nResult:\n", text));

        (system_msg, user_msg)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn instruction(op: CorrectionOp) -> &'static str {
        match op {
            CorrectionOp::FixTypos => FIX_TYPOS_INSTRUCTION,
            CorrectionOp::Finalize => FINALIZE_INSTRUCTION,
            CorrectionOp::FixAndFinalize => FIX_AND_FINALIZE_INSTRUCTION,
            CorrectionOp::Enhance => ENHANCE_INSTRUCTION,
        }
    }

    fn examples(op: CorrectionOp) -> &'static str {
        match op {
            CorrectionOp::FixTypos => FIX_TYPOS_EXAMPLES,
            CorrectionOp::Finalize => FINALIZE_EXAMPLES,
            CorrectionOp::FixAndFinalize => FIX_AND_FINALIZE_EXAMPLES,
            CorrectionOp::Enhance => "",
        }
    }

    fn language_name(&self) -> &str {
        match self.language.as_str() {
            "en" => "English",
            "de" => "German",
            "fr" => "French",
            "es" => "Spanish",
            "ru" => "Russian",
            "tr" => "Turkish",
            "uz" => "Uzbek",
            "kk" => "Kazakh",
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
