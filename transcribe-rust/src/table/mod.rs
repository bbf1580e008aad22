//! 密码子表加载：把文本资源解析为 [`AminoAcidRecord`]，再构建只读的 [`CodonIndex`]。
//!
//! 资源格式为每行一条记录：`<蛋白名> <三字母名> <单字母名> <密码子>+`，
//! 字段之间以任意空白分隔，空行跳过。

pub mod index;
pub mod record;

use anyhow::{anyhow, Result};
use std::io::BufRead;
use thiserror::Error;
use tracing::debug;

pub use index::{CodonIndex, IndexMeta};
pub use record::{parse_table, AminoAcidRecord, CODON_LEN, START, STOP};

/// 内置标准遗传密码表（ATG 记为 Start）。
pub const STANDARD_TABLE: &str = include_str!("../../data/codon_table.txt");

/// Errors that make a codon table unusable. Any of these aborts loading.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected at least 4 fields, found {found}")]
    TooFewFields { line: usize, found: usize },

    #[error("line {line}: codon '{codon}' is not 3 characters long")]
    BadCodonLength { line: usize, codon: String },

    #[error("codon table is empty")]
    Empty,

    #[error("no codon is named 'Start'")]
    NoStartCodon,

    #[error("more than one codon is named 'Start': {}", .0.join(", "))]
    MultipleStartCodons(Vec<String>),

    #[error("no codon is named 'Stop'")]
    NoStopCodons,

    #[error("codon '{codon}' listed as both '{first}' and '{second}'")]
    DuplicateCodon { codon: String, first: String, second: String },
}

/// 解析并校验整张表。
pub fn load<R: BufRead>(reader: R) -> std::result::Result<CodonIndex, TableError> {
    let records = parse_table(reader)?;
    let index = CodonIndex::build(&records)?;
    debug!(
        records = records.len(),
        codons = index.len(),
        start = index.start_codon(),
        stops = index.stop_codons().len(),
        "codon table loaded"
    );
    Ok(index)
}

pub fn load_str(text: &str) -> std::result::Result<CodonIndex, TableError> {
    load(text.as_bytes())
}

/// 加载内置标准表。
pub fn standard() -> std::result::Result<CodonIndex, TableError> {
    load_str(STANDARD_TABLE)
}

pub fn load_from_path(path: &str) -> Result<CodonIndex> {
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open codon table '{}': {}", path, e))?;
    load(std::io::BufReader::new(fh)).map_err(|e| anyhow!("malformed codon table '{}': {}", path, e))
}
