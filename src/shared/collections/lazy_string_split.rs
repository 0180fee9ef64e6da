/// Splits a delimited string without allocating.
///
/// Yields each non-empty segment with surrounding whitespace trimmed, which
/// is how MSBuild list-valued properties (`net8.0;net6.0`) are read.
#[derive(Debug, Clone)]
pub struct LazyStringSplit<'a> {
    remaining: Option<&'a str>,
    delimiter: char,
}

impl<'a> LazyStringSplit<'a> {
    pub fn new(input: &'a str, delimiter: char) -> Self {
        Self {
            remaining: Some(input),
            delimiter,
        }
    }

    /// Returns the first non-empty segment, if any.
    pub fn first(input: &'a str, delimiter: char) -> Option<&'a str> {
        Self::new(input, delimiter).next()
    }
}

impl<'a> Iterator for LazyStringSplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let remaining = self.remaining?;
            let (segment, rest) = match remaining.find(self.delimiter) {
                Some(index) => (
                    &remaining[..index],
                    Some(&remaining[index + self.delimiter.len_utf8()..]),
                ),
                None => (remaining, None),
            };
            self.remaining = rest;

            let trimmed = segment.trim();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
    }
}

impl std::iter::FusedIterator for LazyStringSplit<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_semicolon_list() {
        let parts: Vec<_> = LazyStringSplit::new("net8.0;net6.0;netstandard2.0", ';').collect();
        assert_eq!(parts, vec!["net8.0", "net6.0", "netstandard2.0"]);
    }

    #[test]
    fn test_skips_empty_and_trims() {
        let parts: Vec<_> = LazyStringSplit::new(" ;a; ;; b ;", ';').collect();
        assert_eq!(parts, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(LazyStringSplit::new("", ';').next(), None);
        assert_eq!(LazyStringSplit::new(";;;", ';').next(), None);
    }

    #[test]
    fn test_single_segment() {
        let parts: Vec<_> = LazyStringSplit::new("net8.0", ';').collect();
        assert_eq!(parts, vec!["net8.0"]);
    }

    #[test]
    fn test_first() {
        assert_eq!(LazyStringSplit::first(";x;y", ';'), Some("x"));
        assert_eq!(LazyStringSplit::first("", ';'), None);
    }

    #[test]
    fn test_multibyte_delimiter() {
        let parts: Vec<_> = LazyStringSplit::new("a→b→c", '→').collect();
        assert_eq!(parts, vec!["a", "b", "c"]);
    }
}
