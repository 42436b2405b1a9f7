//! Walkthrough step diffing
//!
//! Steps are full code snapshots. To show what each step changed, every
//! snapshot after the first is line-diffed against its predecessor and new
//! lines get the `added` flag. A step with no explicit `focus=` annotation
//! is focused on its added lines, which is what walkthrough prose almost
//! always talks about.

use codewalk_core::document::Step;

/// Flags added lines and applies default focus across a walkthrough.
pub fn annotate_steps(steps: &mut [Step]) {
    for i in 1..steps.len() {
        let prev_texts = steps[i - 1].snippet.line_texts();
        let step = &mut steps[i];
        let cur_texts = step.snippet.line_texts();
        let matched = lcs_matched(&prev_texts, &cur_texts);

        for (line, is_matched) in step.snippet.lines.iter_mut().zip(&matched) {
            line.added = !is_matched;
        }

        let has_explicit_focus = step.snippet.lines.iter().any(|l| l.focused);
        if !has_explicit_focus {
            for line in &mut step.snippet.lines {
                line.focused = line.added;
            }
        }
    }
}

/// For each line of `cur`, whether it is part of a longest common
/// subsequence with `prev` (by exact line text).
fn lcs_matched(prev: &[String], cur: &[String]) -> Vec<bool> {
    let m = prev.len();
    let n = cur.len();
    let mut table = vec![vec![0_usize; n + 1]; m + 1];
    for i in (0..m).rev() {
        for j in (0..n).rev() {
            table[i][j] = if prev[i] == cur[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut matched = vec![false; n];
    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        if prev[i] == cur[j] {
            matched[j] = true;
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use codewalk_core::document::{Line, Snippet, TokenKind, TokenSpan};

    fn snippet(lines: &[&str]) -> Snippet {
        Snippet {
            lang: "js".to_string(),
            title: None,
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, text)| Line {
                    number: i + 1,
                    spans: vec![TokenSpan {
                        kind: TokenKind::Plain,
                        text: (*text).to_string(),
                    }],
                    focused: false,
                    marked: false,
                    added: false,
                })
                .collect(),
        }
    }

    fn step(lines: &[&str]) -> Step {
        Step {
            prose_html: String::new(),
            snippet: snippet(lines),
        }
    }

    fn added_lines(step: &Step) -> Vec<usize> {
        step.snippet
            .lines
            .iter()
            .filter(|l| l.added)
            .map(|l| l.number)
            .collect()
    }

    #[test]
    fn test_appended_line_is_added_and_focused() {
        let mut steps = vec![
            step(&["let a = 1"]),
            step(&["let a = 1", "let b = 2"]),
        ];
        annotate_steps(&mut steps);
        assert_eq!(added_lines(&steps[1]), vec![2]);
        assert_eq!(steps[1].snippet.focused_lines(), vec![2]);
    }

    #[test]
    fn test_first_step_is_untouched() {
        let mut steps = vec![step(&["a", "b"])];
        annotate_steps(&mut steps);
        assert!(added_lines(&steps[0]).is_empty());
        assert!(steps[0].snippet.focused_lines().is_empty());
    }

    #[test]
    fn test_insertion_in_the_middle() {
        let mut steps = vec![
            step(&["function f() {", "}"]),
            step(&["function f() {", "  return 1", "}"]),
        ];
        annotate_steps(&mut steps);
        assert_eq!(added_lines(&steps[1]), vec![2]);
    }

    #[test]
    fn test_identical_snapshots_have_no_focus() {
        let mut steps = vec![step(&["a", "b"]), step(&["a", "b"])];
        annotate_steps(&mut steps);
        assert!(added_lines(&steps[1]).is_empty());
        assert!(steps[1].snippet.focused_lines().is_empty());
    }

    #[test]
    fn test_explicit_focus_wins_over_added() {
        let mut steps = vec![step(&["a"]), step(&["a", "b", "c"])];
        steps[1].snippet.lines[0].focused = true;
        annotate_steps(&mut steps);
        assert_eq!(added_lines(&steps[1]), vec![2, 3]);
        assert_eq!(steps[1].snippet.focused_lines(), vec![1]);
    }

    #[test]
    fn test_changed_line_counts_as_added() {
        let mut steps = vec![
            step(&["let a = 1", "let b = 2"]),
            step(&["let a = 1", "let b = 3"]),
        ];
        annotate_steps(&mut steps);
        assert_eq!(added_lines(&steps[1]), vec![2]);
    }

    #[test]
    fn test_full_rewrite_marks_everything() {
        let mut steps = vec![step(&["x"]), step(&["y", "z"])];
        annotate_steps(&mut steps);
        assert_eq!(added_lines(&steps[1]), vec![1, 2]);
        assert_eq!(steps[1].snippet.focused_lines(), vec![1, 2]);
    }

    #[test]
    fn test_duplicate_lines_match_once_each() {
        let mut steps = vec![step(&["", "a"]), step(&["", "a", "", "a"])];
        annotate_steps(&mut steps);
        assert_eq!(added_lines(&steps[1]), vec![3, 4]);
    }
}
