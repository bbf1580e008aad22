//! # transcribe-rust
//!
//! 基于密码子表的 DNA → 氨基酸翻译。
//!
//! 本 crate 提供：
//!
//! - **密码子表**：解析文本资源，构建只读的密码子索引（映射、唯一起始密码子、终止密码子集合）
//! - **翻译**：从起始密码子后逐个读取密码子直到终止密码子，异常情况作为分类结果返回
//! - **批量翻译**：基于 rayon 的多线程批处理
//! - **索引文件**：校验后的密码子索引可以保存为二进制文件并重新加载
//!
//! ## 快速示例
//!
//! ```rust
//! use transcribe_rust::table;
//! use transcribe_rust::transcribe::{transcribe, Outcome};
//!
//! let index = table::standard().unwrap();
//! let out = transcribe("ATGAGGAGACGGCGATAA", &index);
//! assert!(matches!(out, Outcome::Translated(_)));
//! assert_eq!(out.to_string(), "Arg:Arg:Arg:Arg");
//! ```
//!
//! ## 模块说明
//!
//! - [`table`] — 密码子表解析与索引
//! - [`transcribe`] — 翻译算法与批处理
//! - [`io`] — FASTA / 纯文本序列读取
//! - [`logging`] — tracing 初始化

pub mod io;
pub mod logging;
pub mod table;
pub mod transcribe;
