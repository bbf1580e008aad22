use anyhow::Result;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: String,
}

/// Streaming FASTA reader. Sequence lines are concatenated with all
/// whitespace dropped; letter case is kept as written.
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // Find header line
        let header = match self.peek_header.take() {
            Some(h) => h,
            None => loop {
                self.buf.clear();
                if self.reader.read_line(&mut self.buf)? == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(rest) = self.buf.strip_prefix('>') {
                    break rest.trim().to_string();
                }
            },
        };

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let mut seq = String::new();
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                self.done = true;
                break;
            }
            if let Some(rest) = self.buf.strip_prefix('>') {
                self.peek_header = Some(rest.trim().to_string());
                break;
            }
            seq.extend(self.buf.chars().filter(|c| !c.is_whitespace()));
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
