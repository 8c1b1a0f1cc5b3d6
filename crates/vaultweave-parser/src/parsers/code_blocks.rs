//! Fenced code block detection via pulldown-cmark.
//!
//! Both backtick and tilde fences count. Indented code blocks do not.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

/// Fenced code blocks found in one note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeFenceSummary {
    pub count: usize,
    /// Fences opened without a language info string
    pub unlabeled: usize,
}

impl CodeFenceSummary {
    pub fn has_code(&self) -> bool {
        self.count > 0
    }
}

/// Count fenced code blocks in content
pub fn summarize_code_fences(content: &str) -> CodeFenceSummary {
    if !content.contains("```") && !content.contains("~~~") {
        return CodeFenceSummary::default();
    }

    let mut summary = CodeFenceSummary::default();
    for event in Parser::new_ext(content, Options::empty()) {
        if let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = event {
            summary.count += 1;
            if info.trim().is_empty() {
                summary.unlabeled += 1;
            }
        }
    }
    summary
}
