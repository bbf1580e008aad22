//! 翻译：从起始密码子之后按 3 个字符一组读取，直到第一个终止密码子。
//!
//! 每条序列的结果都是一个 [`Outcome`] 值，异常输入（无起始、无终止、非法密码子）
//! 也作为正常分类结果返回，而不是错误。

pub mod frame;

use anyhow::{anyhow, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::info;

use crate::io::fasta::FastaRecord;
use crate::table::CodonIndex;

/// 单条序列的翻译结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// 找不到起始密码子，或起始密码子后紧跟终止密码子
    NeverStarts(String),
    /// 起始之后没有任何终止密码子
    NeverStops(String),
    /// 起始与终止之间存在表中没有的片段
    BadCodon(String),
    /// 起始与终止之间各密码子的三字母名，按顺序
    Translated(Vec<String>),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::NeverStarts(_) => "never_starts",
            Outcome::NeverStops(_) => "never_stops",
            Outcome::BadCodon(_) => "bad_codon",
            Outcome::Translated(_) => "translated",
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, Outcome::Translated(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NeverStarts(seq) => write!(f, "Never Starts: {}", seq),
            Outcome::NeverStops(seq) => write!(f, "Never Stops: {}", seq),
            Outcome::BadCodon(seq) => write!(f, "Bad codon in string: {}", seq),
            Outcome::Translated(names) => write!(f, "{}", names.join(":")),
        }
    }
}

/// 翻译一条序列。纯函数，不持有任何跨调用状态。
pub fn transcribe(sequence: &str, index: &CodonIndex) -> Outcome {
    let Some(start_end) = frame::find_after(sequence, index.start_codon()) else {
        return Outcome::NeverStarts(sequence.to_string());
    };

    let tail = sequence[start_end..].trim();
    let chunks: Vec<&str> = frame::codons(tail).collect();

    match chunks.iter().position(|c| index.is_stop(c)) {
        // 起始后立即终止：视为从未真正开始
        Some(0) => Outcome::NeverStarts(sequence.to_string()),
        None => Outcome::NeverStops(sequence.to_string()),
        Some(stop) => {
            let names: Option<Vec<String>> = chunks[..stop]
                .iter()
                .map(|c| index.tri_name(c).map(str::to_string))
                .collect();
            match names {
                Some(names) => Outcome::Translated(names),
                None => Outcome::BadCodon(sequence.to_string()),
            }
        }
    }
}

/// 批量翻译参数
#[derive(Debug, Clone, Copy)]
pub struct TranscribeOpt {
    pub threads: usize,
}

impl Default for TranscribeOpt {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// 多线程批量翻译，输出顺序与输入一致。
pub fn transcribe_batch<S>(sequences: &[S], index: &CodonIndex, opt: TranscribeOpt) -> Result<Vec<Outcome>>
where
    S: AsRef<str> + Sync,
{
    let threads = opt.threads.max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| anyhow!("cannot build thread pool with {} threads: {}", threads, e))?;

    let outcomes: Vec<Outcome> =
        pool.install(|| sequences.par_iter().map(|s| transcribe(s.as_ref(), index)).collect());

    let translated = outcomes.iter().filter(|o| o.is_translated()).count();
    info!(
        sequences = sequences.len(),
        translated,
        failed = outcomes.len() - translated,
        threads,
        "batch transcribed"
    );
    Ok(outcomes)
}

/// 按 `Processing Sequence: <seq>` + 缩进结果行的格式输出报告。
pub fn write_report<W: Write>(out: &mut W, records: &[FastaRecord], outcomes: &[Outcome]) -> Result<()> {
    for (rec, outcome) in records.iter().zip(outcomes) {
        writeln!(out, "Processing Sequence: {}", rec.seq)?;
        writeln!(out, "\t{}", outcome)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table;

    fn arg_table() -> CodonIndex {
        table::load_str(
            "Start Start M ATG\n\
             Arginine Arg R AGG AGA CGG CGA\n\
             Alanine Ala A GCT GCC GCA GCG\n\
             Stop Stop * TAA TAG TGA\n",
        )
        .unwrap()
    }

    fn names(v: &[&str]) -> Outcome {
        Outcome::Translated(v.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn translates_between_start_and_stop() {
        let idx = arg_table();
        let seq = "ATGAGGAGACGGCGATAA";
        assert_eq!(transcribe(seq, &idx), names(&["Arg", "Arg", "Arg", "Arg"]));
        assert_eq!(transcribe(seq, &idx).to_string(), "Arg:Arg:Arg:Arg");
    }

    #[test]
    fn start_found_mid_sequence() {
        let idx = arg_table();
        let out = transcribe("AAAAAAATGGCTGCCGCAGCGTAGAAAAAAA", &idx);
        assert_eq!(out.to_string(), "Ala:Ala:Ala:Ala");
    }

    #[test]
    fn no_start_codon() {
        let idx = arg_table();
        assert_eq!(transcribe("AAAAAAAA", &idx), Outcome::NeverStarts("AAAAAAAA".to_string()));
        assert_eq!(transcribe("", &idx), Outcome::NeverStarts(String::new()));
        assert_eq!(transcribe("AAAAAAAA", &idx).to_string(), "Never Starts: AAAAAAAA");
    }

    #[test]
    fn immediate_stop_never_starts() {
        let idx = arg_table();
        for seq in ["ATGTAA", "ATGTAGAGG", "CCATGTGACGGTAA"] {
            assert_eq!(transcribe(seq, &idx), Outcome::NeverStarts(seq.to_string()), "seq={}", seq);
        }
    }

    #[test]
    fn no_stop_codon() {
        let idx = arg_table();
        let seq = "ATGAGGAGACGGCGA";
        assert_eq!(transcribe(seq, &idx), Outcome::NeverStops(seq.to_string()));
        assert_eq!(transcribe(seq, &idx).to_string(), "Never Stops: ATGAGGAGACGGCGA");
    }

    #[test]
    fn stop_out_of_frame_is_not_a_stop() {
        let idx = arg_table();
        // TAA 跨越两个片段：AGT AAA
        let seq = "ATGAGTAAA";
        assert_eq!(transcribe(seq, &idx), Outcome::NeverStops(seq.to_string()));
    }

    #[test]
    fn short_tail_after_start_never_stops() {
        let idx = arg_table();
        assert_eq!(transcribe("ATG", &idx), Outcome::NeverStops("ATG".to_string()));
        assert_eq!(transcribe("ATGTA", &idx), Outcome::NeverStops("ATGTA".to_string()));
    }

    #[test]
    fn invalid_codon_before_stop() {
        let idx = arg_table();
        let seq = "ATGAGGAGACGGCGXTAA";
        assert_eq!(transcribe(seq, &idx), Outcome::BadCodon(seq.to_string()));
        assert_eq!(transcribe(seq, &idx).to_string(), "Bad codon in string: ATGAGGAGACGGCGXTAA");
    }

    #[test]
    fn unknown_but_well_formed_codon_is_bad() {
        let idx = arg_table();
        // TTT 不在这张小表中
        let seq = "ATGTTTTAA";
        assert_eq!(transcribe(seq, &idx), Outcome::BadCodon(seq.to_string()));
    }

    #[test]
    fn invalid_chunk_after_stop_is_ignored() {
        let idx = arg_table();
        assert_eq!(transcribe("ATGAGGTAAXXXYY", &idx), names(&["Arg"]));
    }

    #[test]
    fn lower_case_input() {
        let idx = arg_table();
        assert_eq!(transcribe("atgaggcgataa", &idx), names(&["Arg", "Arg"]));
    }

    #[test]
    fn surrounding_whitespace_of_tail_is_trimmed() {
        let idx = arg_table();
        assert_eq!(transcribe("ATG  AGGTAA \n", &idx), names(&["Arg"]));
    }

    #[test]
    fn downstream_start_codon_is_translated_by_its_table_name() {
        let idx = arg_table();
        assert_eq!(transcribe("ATGATGAGGTAA", &idx), names(&["Start", "Arg"]));
    }

    #[test]
    fn translated_count_matches_chunks_before_stop() {
        let idx = arg_table();
        for n in 1..=10 {
            let seq = format!("ATG{}TGA", "GCC".repeat(n));
            match transcribe(&seq, &idx) {
                Outcome::Translated(v) => {
                    assert_eq!(v.len(), n);
                    assert!(v.iter().all(|s| s == "Ala"));
                }
                other => panic!("unexpected {:?} for {}", other, seq),
            }
        }
    }

    #[test]
    fn transcribe_is_idempotent() {
        let idx = arg_table();
        for seq in ["ATGAGGAGACGGCGATAA", "AAAAAAAA", "ATGAGGAGACGGCGA", "ATGAGGAGACGGCGXTAA"] {
            assert_eq!(transcribe(seq, &idx), transcribe(seq, &idx));
        }
    }

    #[test]
    fn batch_preserves_order() {
        let idx = arg_table();
        let seqs: Vec<String> = (0..200)
            .map(|i| if i % 2 == 0 { "ATGAGGTAA".to_string() } else { format!("C{}", i) })
            .collect();
        let out = transcribe_batch(&seqs, &idx, TranscribeOpt { threads: 4 }).unwrap();
        assert_eq!(out.len(), seqs.len());
        for (i, o) in out.iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(*o, names(&["Arg"]));
            } else {
                assert_eq!(*o, Outcome::NeverStarts(seqs[i].clone()));
            }
        }
    }

    #[test]
    fn batch_with_zero_threads_uses_one() {
        let idx = arg_table();
        let out = transcribe_batch(&["ATGAGGTAA"], &idx, TranscribeOpt { threads: 0 }).unwrap();
        assert_eq!(out, vec![names(&["Arg"])]);
    }

    #[test]
    fn report_format() {
        let idx = arg_table();
        let records = vec![
            FastaRecord { id: "a".to_string(), desc: None, seq: "ATGAGGTAA".to_string() },
            FastaRecord { id: "b".to_string(), desc: None, seq: "AAAA".to_string() },
        ];
        let seqs: Vec<&str> = records.iter().map(|r| r.seq.as_str()).collect();
        let outcomes = transcribe_batch(&seqs, &idx, TranscribeOpt::default()).unwrap();

        let mut buf: Vec<u8> = Vec::new();
        write_report(&mut buf, &records, &outcomes).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Processing Sequence: ATGAGGTAA\n\tArg\nProcessing Sequence: AAAA\n\tNever Starts: AAAA\n"
        );
    }
}
