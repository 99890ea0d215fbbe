//! Quote- and bracket-aware scanning shared by the tokenizer and evaluator.

/// Find the first occurrence of `needle` outside quoted strings and brackets.
pub(crate) fn find_top_level(haystack: &str, needle: &str) -> Option<usize> {
    TopLevel::new(haystack)
        .find(|&index| haystack[index..].starts_with(needle))
}

/// Split on every top-level occurrence of `separator`.
pub(crate) fn split_top_level<'a>(haystack: &'a str, separator: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut positions = TopLevel::new(haystack);
    while let Some(index) = positions.next() {
        if index >= start && haystack[index..].starts_with(separator) {
            parts.push(&haystack[start..index]);
            start = index + separator.len();
            positions.skip_to(start);
        }
    }
    parts.push(&haystack[start..]);
    parts
}

/// Iterator over the byte offsets of characters that sit outside any
/// quoted string and at bracket depth zero.
struct TopLevel<'a> {
    source: &'a str,
    position: usize,
    depth: usize,
    quote: Option<char>,
}

impl<'a> TopLevel<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            depth: 0,
            quote: None,
        }
    }

    fn skip_to(&mut self, position: usize) {
        // Only called with positions at depth zero outside quotes.
        self.position = position;
    }
}

impl Iterator for TopLevel<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(c) = self.source[self.position..].chars().next() {
            let index = self.position;
            self.position += c.len_utf8();
            if let Some(quote) = self.quote {
                if c == quote {
                    self.quote = None;
                }
                continue;
            }
            match c {
                '"' | '\'' => self.quote = Some(c),
                '(' | '[' | '{' => self.depth += 1,
                ')' | ']' | '}' if self.depth > 0 => self.depth -= 1,
                _ if self.depth == 0 => return Some(index),
                _ => {}
            }
        }
        None
    }
}
