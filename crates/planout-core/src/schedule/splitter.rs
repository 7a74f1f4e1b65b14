//! Heuristic splitting of a free-text description into chunk drafts.

use crate::models::ChunkDraft;

const STEP_MARKER: &str = "Step ";
const FALLBACK_PREFIX: &str = "Execute plan: ";
const FALLBACK_TITLE_CHARS: usize = 50;

/// Splits `description` into ordered chunk drafts.
///
/// Each non-blank line becomes one draft. A line naming two or more
/// `"Step "` markers is split at every marker instead, each piece titled
/// `"Step <piece>"`; text before the first marker becomes its own draft.
/// A non-empty description that yields nothing falls back to a single
/// `"Execute plan: ..."` draft. Drafts carry no schedule or deadline.
///
/// # Examples
///
/// ```rust
/// use planout_core::schedule::suggest_chunks;
///
/// let drafts = suggest_chunks("Step 1: Buy strings. Step 2: Restring.");
/// let titles: Vec<_> = drafts.iter().map(|d| d.title.as_str()).collect();
/// assert_eq!(titles, ["Step 1: Buy strings.", "Step 2: Restring."]);
/// ```
pub fn suggest_chunks(description: &str) -> Vec<ChunkDraft> {
    let mut drafts = Vec::new();

    for line in description.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.matches(STEP_MARKER).count() >= 2 {
            let mut pieces = line.split(STEP_MARKER);
            if let Some(lead) = pieces.next().map(str::trim)
                && !lead.is_empty()
            {
                drafts.push(ChunkDraft::new(lead));
            }
            drafts.extend(
                pieces
                    .map(str::trim)
                    .filter(|piece| !piece.is_empty())
                    .map(|piece| ChunkDraft::new(format!("{STEP_MARKER}{piece}"))),
            );
        } else {
            drafts.push(ChunkDraft::new(line));
        }
    }

    if drafts.is_empty() && !description.is_empty() {
        let head: String = description.chars().take(FALLBACK_TITLE_CHARS).collect();
        drafts.push(ChunkDraft::new(format!("{FALLBACK_PREFIX}{head}")));
    }

    drafts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(description: &str) -> Vec<String> {
        suggest_chunks(description)
            .into_iter()
            .map(|draft| draft.title)
            .collect()
    }

    #[test]
    fn test_inline_steps_are_split() {
        let titles = titles("Step 1: Buy strings. Step 2: Restring.");
        assert!(titles.len() >= 2);
        assert!(titles.iter().all(|t| !t.is_empty()));
        assert_eq!(titles[0], "Step 1: Buy strings.");
        assert_eq!(titles[1], "Step 2: Restring.");
    }

    #[test]
    fn test_text_before_first_marker_is_kept() {
        assert_eq!(
            titles("Guitar care Step 1: Buy strings. Step 2: Restring."),
            vec!["Guitar care", "Step 1: Buy strings.", "Step 2: Restring."]
        );
    }

    #[test]
    fn test_single_marker_line_is_verbatim() {
        assert_eq!(titles("Step 1: only one"), vec!["Step 1: only one"]);
    }

    #[test]
    fn test_lines_become_chunks_in_order() {
        assert_eq!(
            titles("  Read chapter 1\n\n  Write summary  \nReview\n"),
            vec!["Read chapter 1", "Write summary", "Review"]
        );
    }

    #[test]
    fn test_empty_description_yields_nothing() {
        assert!(suggest_chunks("").is_empty());
    }

    #[test]
    fn test_plain_word_yields_itself() {
        assert_eq!(titles("hello"), vec!["hello"]);
    }

    #[test]
    fn test_whitespace_only_falls_back() {
        let description = format!("   \n{}\n", " ".repeat(60));
        let titles = titles(&description);
        assert_eq!(titles.len(), 1);
        assert!(titles[0].starts_with("Execute plan: "));
        assert_eq!(titles[0].chars().count(), "Execute plan: ".len() + 50);
    }

    #[test]
    fn test_drafts_have_no_schedule() {
        for draft in suggest_chunks("a\nb") {
            assert!(draft.scheduled_date.is_none());
            assert!(draft.deadline.is_none());
        }
    }
}
