pub const WRAP_WIDTH: usize = 100;

enum Chunk<'a> {
    Space(&'a str),
    Word(&'a str),
}

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn chunks(line: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (idx, c) in line.char_indices() {
        let space = is_space(c);
        match in_space {
            Some(prev) if prev != space => {
                out.push(make_chunk(&line[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if let Some(space) = in_space {
        out.push(make_chunk(&line[start..], space));
    }
    out
}

fn make_chunk(s: &str, space: bool) -> Chunk<'_> {
    if space {
        Chunk::Space(s)
    } else {
        Chunk::Word(s)
    }
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    if line.chars().count() <= width {
        out.push(line.to_string());
        return;
    }

    let mut current = String::new();
    let mut current_len = 0usize;
    let mut has_word = false;
    for chunk in chunks(line) {
        match chunk {
            Chunk::Space(s) => {
                // Whitespace never starts a continuation line.
                if current_len == 0 && !out.is_empty() {
                    continue;
                }
                let len = s.chars().count();
                if current_len + len <= width {
                    current.push_str(s);
                    current_len += len;
                }
            }
            Chunk::Word(w) => {
                let len = w.chars().count();
                if has_word && current_len + len > width {
                    out.push(current.trim_end_matches(is_space).to_string());
                    current.clear();
                    current_len = 0;
                }
                current.push_str(w);
                current_len += len;
                has_word = true;
            }
        }
    }
    // A whitespace-only line still occupies a line of its own.
    if has_word || out.is_empty() {
        out.push(current.trim_end_matches(is_space).to_string());
    }
}

/// Word-wraps `text` so no line exceeds `width` characters.
///
/// Existing line breaks are kept and each line is wrapped on its own. Breaks
/// happen only at spaces or tabs; a word longer than `width` stays whole on
/// its own line.
pub fn wrap_text(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines = Vec::new();
    for line in text.split('\n') {
        let mut wrapped = Vec::new();
        wrap_line(line.trim_end_matches('\r'), width, &mut wrapped);
        lines.extend(wrapped);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn longest_line(s: &str) -> usize {
        s.lines().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(wrap_text("Cells are ...", WRAP_WIDTH), "Cells are ...");
    }

    #[test]
    fn long_paragraph_is_wrapped_at_width() {
        let text = "word ".repeat(60);
        let wrapped = wrap_text(text.trim(), WRAP_WIDTH);
        assert!(wrapped.lines().count() > 1);
        assert!(longest_line(&wrapped) <= WRAP_WIDTH);
        assert_eq!(
            wrapped.split_whitespace().count(),
            text.split_whitespace().count()
        );
    }

    #[test]
    fn never_breaks_inside_a_word() {
        let long = "x".repeat(120);
        let text = format!("short {} tail", long);
        let wrapped = wrap_text(&text, WRAP_WIDTH);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines, vec!["short", long.as_str(), "tail"]);
    }

    #[test]
    fn keeps_existing_line_breaks_and_blank_lines() {
        let text = "# Title\n\n1. First point\n2. Second point";
        assert_eq!(wrap_text(text, WRAP_WIDTH), text);
    }

    #[test]
    fn keeps_indentation_of_first_segment() {
        let text = format!("    {}", "indented ".repeat(20).trim_end());
        let wrapped = wrap_text(&text, 40);
        assert!(wrapped.starts_with("    indented"));
        assert!(wrapped.lines().skip(1).all(|l| !l.starts_with(' ')));
        assert!(longest_line(&wrapped) <= 40);
    }

    #[test]
    fn indented_long_word_gets_no_blank_line() {
        let text = format!("    {}", "y".repeat(120));
        assert_eq!(wrap_text(&text, WRAP_WIDTH), text);

        let text = format!("  {} tail", "y".repeat(120));
        let wrapped = wrap_text(&text, WRAP_WIDTH);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("  {}", "y".repeat(120)));
        assert_eq!(lines[1], "tail");
    }

    #[test]
    fn overlong_blank_line_stays_a_blank_line() {
        let text = format!("a\n{}\nb", " ".repeat(120));
        assert_eq!(wrap_text(&text, WRAP_WIDTH), "a\n\nb");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(10) + " " + &"é".repeat(10);
        assert_eq!(wrap_text(&text, 21), text);
    }
}
