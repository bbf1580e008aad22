use serde::{Deserialize, Serialize};
use std::io::BufRead;

use super::TableError;

/// 起始密码子的三字母哨兵名
pub const START: &str = "Start";
/// 终止密码子的三字母哨兵名
pub const STOP: &str = "Stop";
pub const CODON_LEN: usize = 3;

/// 密码子表中的一行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AminoAcidRecord {
    pub protein_name: String,
    /// 输出中使用的三字母名（可能是 `Start` / `Stop`）
    pub tri_name: String,
    pub one_letter_name: String,
    /// 已转为大写
    pub codons: Vec<String>,
}

impl AminoAcidRecord {
    /// 解析一行；`line_no` 从 1 开始，仅用于报错。
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, TableError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(TableError::TooFewFields { line: line_no, found: fields.len() });
        }

        let mut codons = Vec::with_capacity(fields.len() - 3);
        for &tok in &fields[3..] {
            if tok.chars().count() != CODON_LEN {
                return Err(TableError::BadCodonLength { line: line_no, codon: tok.to_string() });
            }
            codons.push(tok.to_ascii_uppercase());
        }

        Ok(Self {
            protein_name: fields[0].to_string(),
            tri_name: fields[1].to_string(),
            one_letter_name: fields[2].to_string(),
            codons,
        })
    }

    pub fn is_start(&self) -> bool {
        self.tri_name == START
    }

    pub fn is_stop(&self) -> bool {
        self.tri_name == STOP
    }
}

/// 逐行读取整张表，跳过空行。
pub fn parse_table<R: BufRead>(reader: R) -> Result<Vec<AminoAcidRecord>, TableError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(AminoAcidRecord::parse_line(&line, i + 1)?);
    }
    Ok(records)
}
