//! 输入序列读取：FASTA，或每行一条序列的纯文本。

pub mod fasta;

use anyhow::{anyhow, Result};
use std::io::Read;
use tracing::{debug, warn};

use fasta::{FastaReader, FastaRecord};

/// 自动识别格式：首个非空行以 `>` 开头则按 FASTA 解析，否则每个非空行是一条序列，
/// 以 `line<N>` 命名（N 为物理行号）。
pub fn read_sequences<R: Read>(mut reader: R) -> Result<Vec<FastaRecord>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let is_fasta = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .map_or(false, |l| l.trim_start().starts_with('>'));

    let records: Vec<FastaRecord> = if is_fasta {
        FastaReader::new(text.as_bytes()).collect::<Result<_>>()?
    } else {
        text.lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| FastaRecord {
                id: format!("line{}", i + 1),
                desc: None,
                seq: l.trim().to_string(),
            })
            .collect()
    };

    for rec in records.iter().filter(|r| r.seq.is_empty()) {
        warn!(id = %rec.id, "record has an empty sequence");
    }
    debug!(records = records.len(), fasta = is_fasta, "sequences read");
    Ok(records)
}

pub fn read_sequences_from_path(path: &str) -> Result<Vec<FastaRecord>> {
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open sequence file '{}': {}", path, e))?;
    read_sequences(std::io::BufReader::new(fh))
        .map_err(|e| anyhow!("cannot read sequence file '{}': {}", path, e))
}
