use crate::table::CODON_LEN;

/// 在 `sequence` 中大小写不敏感地查找 `codon` 的首次出现，返回其后一个字节的位置。
pub fn find_after(sequence: &str, codon: &str) -> Option<usize> {
    let hay = sequence.as_bytes();
    let needle = codon.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    hay.windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|i| i + needle.len())
}

/// Splits text into consecutive, non-overlapping codons of three characters.
/// A trailing chunk shorter than that is still yielded.
pub struct Codons<'a> {
    rest: &'a str,
}

pub fn codons(text: &str) -> Codons<'_> {
    Codons { rest: text }
}

impl<'a> Iterator for Codons<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .char_indices()
            .nth(CODON_LEN)
            .map_or(self.rest.len(), |(i, _)| i);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
