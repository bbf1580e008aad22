use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::record::{AminoAcidRecord, START, STOP};
use super::TableError;

/// 索引文件格式版本
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub table_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 由密码子表派生的只读查找结构：
/// - `codon_map`：密码子 -> 三字母名
/// - `start_codon`：唯一的起始密码子
/// - `stop_codons`：终止密码子集合
///
/// 构建后不再修改，可在多线程间共享引用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonIndex {
    codon_map: HashMap<String, String>,
    start_codon: String,
    stop_codons: HashSet<String>,
    meta: IndexMeta,
}

/// 磁盘上的索引：只保存映射本身，其余结构在加载时重新派生并校验。
#[derive(Serialize, Deserialize)]
struct IndexFile {
    version: u32,
    meta: IndexMeta,
    codon_map: HashMap<String, String>,
}

impl CodonIndex {
    pub fn build(records: &[AminoAcidRecord]) -> Result<Self, TableError> {
        if records.is_empty() {
            return Err(TableError::Empty);
        }
        let mut codon_map: HashMap<String, String> = HashMap::new();
        for rec in records {
            for codon in &rec.codons {
                match codon_map.get(codon) {
                    Some(prev) if *prev != rec.tri_name => {
                        return Err(TableError::DuplicateCodon {
                            codon: codon.clone(),
                            first: prev.clone(),
                            second: rec.tri_name.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        codon_map.insert(codon.clone(), rec.tri_name.clone());
                    }
                }
            }
        }
        Self::from_map(codon_map, IndexMeta::default())
    }

    fn from_map(codon_map: HashMap<String, String>, meta: IndexMeta) -> Result<Self, TableError> {
        if codon_map.is_empty() {
            return Err(TableError::Empty);
        }

        let mut starts: Vec<String> = codon_map
            .iter()
            .filter(|(_, tri)| tri.as_str() == START)
            .map(|(codon, _)| codon.clone())
            .collect();
        let start_codon = match starts.len() {
            0 => return Err(TableError::NoStartCodon),
            1 => starts.remove(0),
            _ => {
                starts.sort_unstable();
                return Err(TableError::MultipleStartCodons(starts));
            }
        };

        let stop_codons: HashSet<String> = codon_map
            .iter()
            .filter(|(_, tri)| tri.as_str() == STOP)
            .map(|(codon, _)| codon.clone())
            .collect();
        if stop_codons.is_empty() {
            return Err(TableError::NoStopCodons);
        }

        Ok(Self { codon_map, start_codon, stop_codons, meta })
    }

    pub fn start_codon(&self) -> &str {
        &self.start_codon
    }

    pub fn stop_codons(&self) -> &HashSet<String> {
        &self.stop_codons
    }

    /// 大小写不敏感
    pub fn is_stop(&self, codon: &str) -> bool {
        self.stop_codons.contains(&codon.to_ascii_uppercase())
    }

    /// 大小写不敏感；未知密码子（含长度不足 3 的片段）返回 None。
    pub fn tri_name(&self, codon: &str) -> Option<&str> {
        self.codon_map.get(&codon.to_ascii_uppercase()).map(String::as_str)
    }

    /// 表中不同密码子的数量
    pub fn len(&self) -> usize {
        self.codon_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codon_map.is_empty()
    }

    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = meta;
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let file = IndexFile {
            version: FORMAT_VERSION,
            meta: self.meta.clone(),
            codon_map: self.codon_map.clone(),
        };
        let mut f = std::fs::File::create(path)?;
        bincode::serialize_into(&mut f, &file)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)
            .map_err(|e| anyhow!("cannot open codon index '{}': {}", path, e))?;
        let file: IndexFile = bincode::deserialize_from(std::io::BufReader::new(f))
            .map_err(|e| anyhow!("cannot decode codon index '{}': {}", path, e))?;
        if file.version != FORMAT_VERSION {
            bail!(
                "codon index '{}' has format version {}, expected {}",
                path,
                file.version,
                FORMAT_VERSION
            );
        }
        let idx = Self::from_map(file.codon_map, file.meta)
            .map_err(|e| anyhow!("invalid codon index '{}': {}", path, e))?;
        Ok(idx)
    }
}
