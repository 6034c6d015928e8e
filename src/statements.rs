/// Marker that turns a whole trimmed segment into a comment.
pub const COMMENT_PREFIX: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    Empty,
    Comment,
    Statement(&'a str),
}

/// One `;`-delimited piece of a schema script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub index: usize,
    pub kind: SegmentKind<'a>,
}

impl<'a> Segment<'a> {
    pub fn statement(&self) -> Option<&'a str> {
        match self.kind {
            SegmentKind::Statement(sql) => Some(sql),
            _ => None,
        }
    }
}

/// Split a script on every literal `;` and classify each piece.
///
/// There is no SQL awareness: a `;` inside a string literal or routine body
/// still splits, and a segment whose trimmed text begins with `--` is skipped
/// in full, including any SQL on the lines after the comment.
pub fn split_statements(script: &str) -> Vec<Segment<'_>> {
    script
        .split(';')
        .enumerate()
        .map(|(index, raw)| {
            let trimmed = raw.trim();
            let kind = if trimmed.is_empty() {
                SegmentKind::Empty
            } else if trimmed.starts_with(COMMENT_PREFIX) {
                SegmentKind::Comment
            } else {
                SegmentKind::Statement(trimmed)
            };
            Segment { index, kind }
        })
        .collect()
}

/// First `max_chars` characters of a statement, for progress lines.
pub fn preview(statement: &str, max_chars: usize) -> &str {
    match statement.char_indices().nth(max_chars) {
        Some((end, _)) => &statement[..end],
        None => statement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executable(script: &str) -> Vec<&str> {
        split_statements(script)
            .iter()
            .filter_map(Segment::statement)
            .collect()
    }

    #[test]
    fn leading_comment_swallows_rest_of_segment() {
        let script = "CREATE TABLE t (id INT);  -- comment\nINSERT INTO t VALUES (1);";
        let segments = split_statements(script);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].kind, SegmentKind::Statement("CREATE TABLE t (id INT)"));
        assert_eq!(segments[1].kind, SegmentKind::Comment);
        assert_eq!(segments[2].kind, SegmentKind::Empty);
        assert_eq!(executable(script), vec!["CREATE TABLE t (id INT)"]);
    }

    #[test]
    fn statements_keep_file_order_and_are_trimmed() {
        let script = "\n  CREATE TABLE a (x INT) ;\n\nCREATE TABLE b (y INT);\n\t;INSERT INTO a VALUES (1)";
        assert_eq!(
            executable(script),
            vec![
                "CREATE TABLE a (x INT)",
                "CREATE TABLE b (y INT)",
                "INSERT INTO a VALUES (1)"
            ]
        );
    }

    #[test]
    fn segment_count_is_semicolons_plus_one() {
        let script = "A;B;;C;";
        let segments = split_statements(script);
        assert_eq!(segments.len(), 5);
        let indices: Vec<usize> = segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_script_is_a_single_empty_segment() {
        let segments = split_statements("");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Empty);
    }

    #[test]
    fn inline_comment_after_sql_is_not_detected() {
        let script = "SELECT 1 -- trailing note\n;";
        assert_eq!(executable(script), vec!["SELECT 1 -- trailing note"]);
    }

    #[test]
    fn semicolon_inside_literal_still_splits() {
        let script = "INSERT INTO notes VALUES ('a;b');";
        assert_eq!(
            executable(script),
            vec!["INSERT INTO notes VALUES ('a", "b')"]
        );
    }

    #[test]
    fn preview_counts_characters() {
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("abcdef", 3), "abc");
        assert_eq!(preview("ééééé", 2), "éé");
        let long = "x".repeat(80);
        assert_eq!(preview(&long, 50).len(), 50);
    }
}
