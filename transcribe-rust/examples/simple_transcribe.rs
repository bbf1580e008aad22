//! 演示如何在 library 模式下使用 transcribe-rust。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_transcribe
//! ```

use transcribe_rust::table;
use transcribe_rust::transcribe::{self, Outcome, TranscribeOpt};

fn main() -> anyhow::Result<()> {
    // 1. 加载内置标准密码子表
    let index = table::standard()?;
    println!("密码子数: {}, 起始密码子: {}", index.len(), index.start_codon());

    // 2. 单条翻译
    let seq = "AAAAAAATGGCTGCCGCAGCGTAGAAAAAAA";
    match transcribe::transcribe(seq, &index) {
        Outcome::Translated(names) => println!("{} -> {} 个氨基酸: {}", seq, names.len(), names.join(":")),
        other => println!("{} -> {}", seq, other),
    }

    // 3. 自定义小表
    let custom = table::load_str("Start Start M GTG\nLysine Lys K AAA\nStop Stop * TAG\n")?;
    println!("自定义表: {}", transcribe::transcribe("CCGTGAAAAAATAG", &custom));

    // 4. 批量翻译
    let seqs = ["ATGAGGAGACGGCGATAA", "AAAAAAAA", "ATGAGGAGACGGCGA", "ATGAGGAGACGGCGXTAA"];
    let outcomes = transcribe::transcribe_batch(&seqs, &index, TranscribeOpt { threads: 2 })?;
    for (s, o) in seqs.iter().zip(&outcomes) {
        println!("  {:<20} [{}] {}", s, o.label(), o);
    }
    Ok(())
}
