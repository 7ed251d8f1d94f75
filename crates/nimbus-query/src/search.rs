//! Query parsing and evaluation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::highlight::{self, Segment};

/// Extracts the `#tag` token.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("tag pattern compiles"));

/// Extracts the `type:ext` token.
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"type:(\w+)").expect("type pattern compiles"));

/// Strips both token forms to leave the free-text remainder.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+|type:\w+").expect("token pattern compiles"));

/// A parsed search query.
///
/// The grammar is order-independent and every part is optional:
/// `#tag` constrains tags, `type:ext` constrains file extensions, and
/// whatever text remains after stripping those tokens is a
/// case-insensitive substring match against candidate names. All present
/// predicates are ANDed.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Lowercased tag predicate, if present.
    tag: Option<String>,
    /// Lowercased extension predicate, if present.
    type_ext: Option<String>,
    /// Trimmed free-text remainder (original case, for highlighting).
    text: String,
    /// Case-insensitive pattern for the remainder, escaped so the user's
    /// text is always matched literally. `None` when the remainder is
    /// empty.
    pattern: Option<Regex>,
}

/// The result of evaluating a query against one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Whether the candidate passes all present predicates.
    pub included: bool,
    /// The candidate's name split into (text, is_match) runs. Matching
    /// runs exist only for a non-empty free-text remainder; the runs
    /// always concatenate back to the original name.
    pub highlighted_name: Vec<Segment>,
}

impl SearchQuery {
    /// Parse a raw query string.
    pub fn parse(raw: &str) -> Self {
        let tag = TAG_RE
            .captures(raw)
            .map(|caps| caps[1].to_lowercase());
        let type_ext = TYPE_RE
            .captures(raw)
            .map(|caps| caps[1].to_lowercase());
        let text = TOKEN_RE.replace_all(raw, "").trim().to_string();

        // The remainder is escaped before compilation: a literal `.` or
        // `(` in the query must split on itself, not act as syntax.
        let pattern = if text.is_empty() {
            None
        } else {
            Regex::new(&format!("(?i){}", regex::escape(&text))).ok()
        };

        Self {
            tag,
            type_ext,
            text,
            pattern,
        }
    }

    /// Whether the query has no predicates at all.
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.type_ext.is_none() && self.text.is_empty()
    }

    /// The free-text remainder (trimmed, original case).
    pub fn remainder(&self) -> &str {
        &self.text
    }

    /// Evaluate this query against a candidate.
    pub fn evaluate<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Evaluation {
        let candidate = candidate.into();
        let included = self.matches_tags(candidate.tags())
            && self.matches_type(candidate)
            && self.matches_name(candidate.name());

        Evaluation {
            included,
            highlighted_name: self.highlight(candidate.name()),
        }
    }

    /// Compute the highlighted segmentation of a name.
    ///
    /// With an empty remainder the name comes back as one unmarked run.
    pub fn highlight(&self, name: &str) -> Vec<Segment> {
        match &self.pattern {
            None => highlight::unsegmented(name),
            Some(pattern) => highlight::split_marked(name, pattern),
        }
    }

    /// `#tag` — the candidate's tags (case-folded) must contain the tag
    /// as a substring. Absent tags behave as the empty string and never
    /// match.
    fn matches_tags(&self, tags: Option<&str>) -> bool {
        let Some(tag) = &self.tag else {
            return true;
        };
        tags.unwrap_or("").trim().to_lowercase().contains(tag)
    }

    /// `type:ext` — files must end with `.ext` (case-folded); folders
    /// always pass.
    fn matches_type(&self, candidate: Candidate<'_>) -> bool {
        let Some(ext) = &self.type_ext else {
            return true;
        };
        if !candidate.is_file() {
            return true;
        }
        candidate
            .name()
            .to_lowercase()
            .ends_with(&format!(".{ext}"))
    }

    /// Free-text remainder — case-insensitive substring of the name;
    /// empty remainder always passes.
    fn matches_name(&self, name: &str) -> bool {
        if self.text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.text.to_lowercase())
    }
}

/// Parse and evaluate in one step.
pub fn evaluate<'a>(query: &str, candidate: impl Into<Candidate<'a>>) -> Evaluation {
    SearchQuery::parse(query).evaluate(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use nimbus_core::types::{FileId, UserId};
    use nimbus_entity::{File, Folder};

    fn file(name: &str, tags: &str) -> File {
        File {
            id: FileId::new(),
            name: name.to_string(),
            content: String::new(),
            path: name.to_string(),
            folder_id: None,
            owner_id: UserId::new(),
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.to_string())
            },
            created_at: Some(Utc::now()),
        }
    }

    fn folder(name: &str, tags: Option<&str>) -> Folder {
        Folder {
            tags: tags.map(str::to_string),
            name: name.to_string(),
            ..Folder::root()
        }
    }

    fn concat(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_tag_type_and_text_combined() {
        let f = file("report.pdf", "proj,urgent");
        let eval = evaluate("#proj type:pdf report", &f);
        assert!(eval.included);
        assert_eq!(concat(&eval.highlighted_name), "report.pdf");
        let marked: Vec<_> = eval
            .highlighted_name
            .iter()
            .filter(|s| s.is_match)
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].text, "report");
    }

    #[test]
    fn test_type_mismatch_excludes() {
        let f = file("report.pdf", "");
        assert!(!evaluate("type:docx", &f).included);
    }

    #[test]
    fn test_type_predicate_ignores_folders() {
        let d = folder("reports", None);
        assert!(evaluate("type:docx", &d).included);
    }

    #[test]
    fn test_absent_tags_never_match() {
        let d = folder("reports", None);
        assert!(!evaluate("#proj", &d).included);
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let d = folder("reports", Some("Proj,Urgent"));
        assert!(evaluate("#proj", &d).included);
        assert!(evaluate("#URGENT", &d).included);
    }

    #[test]
    fn test_empty_query_includes_everything() {
        let f = file("anything_txt", "");
        let eval = evaluate("   ", &f);
        assert!(eval.included);
        assert_eq!(eval.highlighted_name.len(), 1);
        assert!(!eval.highlighted_name[0].is_match);
        assert_eq!(eval.highlighted_name[0].text, "anything_txt");
    }

    #[test]
    fn test_highlight_round_trip() {
        for name in ["report.pdf", "RePoRtreport", "no match here", ""] {
            let eval = evaluate("report", &file(name, ""));
            assert_eq!(concat(&eval.highlighted_name), name);
        }
    }

    #[test]
    fn test_highlight_marks_every_occurrence() {
        let eval = evaluate("ab", &file("abXabYab", ""));
        let marks = eval
            .highlighted_name
            .iter()
            .filter(|s| s.is_match)
            .count();
        assert_eq!(marks, 3);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        // `.` must not act as a wildcard in the split.
        let miss = evaluate("a.b", &file("aXb", ""));
        assert!(!miss.included);
        assert!(miss.highlighted_name.iter().all(|s| !s.is_match));

        let hit = evaluate("a.b", &file("za.bz", ""));
        assert!(hit.included);
        assert!(hit.highlighted_name.iter().any(|s| s.is_match));

        // Unbalanced syntax must not corrupt parsing either.
        let eval = evaluate("(partial[", &file("x(partial[y", ""));
        assert!(eval.included);
    }

    #[test]
    fn test_tokens_are_stripped_from_remainder() {
        let query = SearchQuery::parse("  #proj type:pdf  quarterly  ");
        assert_eq!(query.remainder(), "quarterly");
    }
}
