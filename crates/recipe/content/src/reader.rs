//! Recipe file line stream.
//!
//! Strips `//` line comments and `/* ... */` block comments (which may span
//! lines), trims what is left and drops blank lines. Line numbers are 1-based
//! and refer to the original text.

/// One meaningful line of a recipe file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn is_flag(&self) -> bool {
        self.text.starts_with('@')
    }

    /// First whitespace-delimited token, lowercased, and the rest of the line.
    pub fn split_directive(&self) -> (String, Option<&str>) {
        match self.text.split_once(char::is_whitespace) {
            Some((token, rest)) => {
                let rest = rest.trim();
                (token.to_ascii_lowercase(), (!rest.is_empty()).then_some(rest))
            }
            None => (self.text.to_ascii_lowercase(), None),
        }
    }
}

pub fn clean_lines(source: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut in_block = false;

    for (index, raw) in source.lines().enumerate() {
        let mut text = String::new();
        let mut rest = raw;

        loop {
            if in_block {
                match rest.find("*/") {
                    Some(end) => {
                        rest = &rest[end + 2..];
                        in_block = false;
                    }
                    None => break,
                }
            } else {
                let line_comment = rest.find("//");
                let block_comment = rest.find("/*");
                match (line_comment, block_comment) {
                    (Some(line), Some(block)) if block < line => {
                        text.push_str(&rest[..block]);
                        rest = &rest[block + 2..];
                        in_block = true;
                    }
                    (None, Some(block)) => {
                        text.push_str(&rest[..block]);
                        rest = &rest[block + 2..];
                        in_block = true;
                    }
                    (Some(line), _) => {
                        text.push_str(&rest[..line]);
                        break;
                    }
                    (None, None) => {
                        text.push_str(rest);
                        break;
                    }
                }
            }
        }

        let text = text.trim();
        if !text.is_empty() {
            lines.push(SourceLine {
                number: index + 1,
                text: text.to_string(),
            });
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<(usize, String)> {
        clean_lines(source)
            .into_iter()
            .map(|line| (line.number, line.text))
            .collect()
    }

    #[test]
    fn strips_line_and_block_comments() {
        let source = "\
// header comment
@secret // hidden
craft Torch /* inline */ x
/* spanning
   lines */ stick
";
        assert_eq!(
            texts(source),
            vec![
                (2, "@secret".to_string()),
                (3, "craft Torch  x".to_string()),
                (5, "stick".to_string()),
            ]
        );
    }

    #[test]
    fn blank_and_comment_only_sources_are_empty() {
        assert!(clean_lines("").is_empty());
        assert!(clean_lines("\n   \n// nothing\n/* still\nnothing */").is_empty());
    }

    #[test]
    fn directive_token_is_lowercased_name_keeps_case() {
        let line = SourceLine {
            number: 1,
            text: "CRAFT My Torch".to_string(),
        };
        assert_eq!(line.split_directive(), ("craft".to_string(), Some("My Torch")));
        assert!(!line.is_flag());
    }
}
