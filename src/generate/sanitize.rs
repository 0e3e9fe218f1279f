//! Generation output sanitization
//!
//! The generation service tends to wrap file contents in Markdown code
//! fences. The contract here: if the response opens with a fence line
//! (optionally carrying a language tag) and closes with one, both fence
//! lines are removed; anything else passes through unchanged.

/// Strip a surrounding Markdown code fence, if present.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();

    if !trimmed.starts_with("```") {
        return raw.to_string();
    }

    let Some(first_break) = trimmed.find('\n') else {
        return raw.to_string();
    };

    let Some(body) = trimmed[first_break + 1..].strip_suffix("```") else {
        return raw.to_string();
    };

    body.strip_suffix('\n').unwrap_or(body).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_plain_fence() {
        assert_eq!(strip_code_fences("```\nprint('hi')\n```"), "print('hi')");
    }

    #[test]
    fn strips_fence_with_language_tag() {
        assert_eq!(
            strip_code_fences("```python\nimport os\nprint(os.name)\n```"),
            "import os\nprint(os.name)"
        );
    }

    #[test]
    fn strips_fence_with_surrounding_whitespace() {
        assert_eq!(strip_code_fences("\n```json\n[\"a.py\"]\n```\n"), "[\"a.py\"]");
    }

    #[test]
    fn unfenced_passes_through() {
        assert_eq!(strip_code_fences("plain contents\n"), "plain contents\n");
    }

    #[test]
    fn unbalanced_fence_passes_through() {
        assert_eq!(strip_code_fences("```python\nno closing"), "```python\nno closing");
    }

    #[test]
    fn fence_only_passes_through() {
        assert_eq!(strip_code_fences("```"), "```");
    }

    #[test]
    fn preserves_interior_backticks() {
        let fenced = "```markdown\nUse `inline code` here.\n```";
        assert_eq!(strip_code_fences(fenced), "Use `inline code` here.");
    }
}
