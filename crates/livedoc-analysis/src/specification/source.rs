//! Line-level facts about a feature file that the grammar tree drops.

/// Header directive selecting the keyword language.
const LANGUAGE_DIRECTIVE: &str = "language:";

/// Language directive and free-text comments of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInfo {
    /// Value of a `# language: xx` directive before the first keyword line.
    pub language: Option<String>,
    /// `#` comment lines in order, without the marker, directive excluded.
    pub comments: Vec<String>,
}

impl SourceInfo {
    pub fn scan(source: &str) -> Self {
        let mut info = SourceInfo::default();
        let mut in_header = true;
        let mut fence: Option<&str> = None;

        for raw in source.lines() {
            let line = raw.trim();

            if let Some(marker) = fence {
                if line.starts_with(marker) {
                    fence = None;
                }
                continue;
            }
            if line.starts_with("\"\"\"") || line.starts_with("```") {
                fence = Some(&line[..3]);
                continue;
            }

            let Some(comment) = line.strip_prefix('#') else {
                if !line.is_empty() {
                    in_header = false;
                }
                continue;
            };
            let comment = comment.trim();

            if in_header && info.language.is_none() {
                if let Some(lang) = comment.strip_prefix(LANGUAGE_DIRECTIVE) {
                    let lang = lang.trim();
                    if !lang.is_empty() {
                        info.language = Some(lang.to_string());
                        continue;
                    }
                }
            }
            info.comments.push(comment.to_string());
        }
        info
    }
}

/// 1-based source lines of the table rows that follow `from_line`
/// (header row first). Blank and comment lines between rows are skipped;
/// the first other non-table line ends the table.
pub fn table_row_lines(source: &str, from_line: usize) -> Vec<u32> {
    let mut lines = Vec::new();
    let start = from_line.saturating_sub(1);

    for (idx, raw) in source.lines().enumerate().skip(start) {
        let line = raw.trim();
        if line.starts_with('|') {
            lines.push(idx as u32 + 1);
        } else if !lines.is_empty() && !line.is_empty() && !line.starts_with('#') {
            break;
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
# language: fr
# owner: payments
Fonctionnalité: Paiement
  # a note
  Scénario: payer
    Soit un panier
      \"\"\"
      # not a comment
      \"\"\"
";

    #[test]
    fn test_language_and_comments() {
        let info = SourceInfo::scan(SOURCE);
        assert_eq!(info.language.as_deref(), Some("fr"));
        assert_eq!(info.comments, vec!["owner: payments", "a note"]);
    }

    #[test]
    fn test_directive_after_keyword_is_a_comment() {
        let info = SourceInfo::scan("Feature: F\n# language: de\n");
        assert_eq!(info.language, None);
        assert_eq!(info.comments, vec!["language: de"]);
    }

    #[test]
    fn test_table_row_lines_skip_comments() {
        let source = "\
Scenario Outline: o
  Given <a>
  Examples:
    | a |
    # first row
    | 1 |

    | 2 |
  Scenario: next
    | 9 |
";
        assert_eq!(table_row_lines(source, 3), vec![4, 6, 8]);
    }
}
