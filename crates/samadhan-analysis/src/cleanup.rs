use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{1,6}\s*").unwrap());
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());

/// Strips markdown from model output and collapses it to a single line.
///
/// Emphasis, inline code and link text are kept; heading markers and fenced
/// code blocks are dropped.
pub fn clean_model_output(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = CODE_BLOCK.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_and_whitespace() {
        let raw = "**Road** repair is *scheduled*.\n\n## Next\n```rust\nfn x() {}\n```Call `1076` or see [portal](http://up.gov.in)  ";
        assert_eq!(
            clean_model_output(raw),
            "Road repair is scheduled. Next Call 1076 or see portal"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(
            clean_model_output("Your complaint has been registered."),
            "Your complaint has been registered."
        );
        assert_eq!(clean_model_output(""), "");
    }
}
