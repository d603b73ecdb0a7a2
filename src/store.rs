use crate::models::Record;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence collaborator for the whole record collection.
pub trait RecordStorage {
    fn load(&self) -> Result<Vec<Record>>;
    fn save(&self, records: &[Record]) -> Result<()>;
}

/// Tab-delimited text file, one record per line:
/// `name \t id \t grade \t department \t score`.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStorage for FileStorage {
    fn load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(decode_records(&content))
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encode_records(records))
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

pub fn encode_records(records: &[Record]) -> String {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            r.name, r.id, r.grade, r.department, r.score
        ));
    }
    out
}

/// Decodes the line format. Malformed lines are skipped.
pub fn decode_records(content: &str) -> Vec<Record> {
    content.lines().filter_map(decode_line).collect()
}

fn decode_line(line: &str) -> Option<Record> {
    if line.is_empty() {
        return None;
    }
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 5 {
        return None;
    }
    let id = fields[1].trim().parse::<i64>().ok()?;
    let score = fields[4].trim().parse::<f32>().ok().filter(|s| s.is_finite())?;
    Some(Record {
        name: fields[0].to_string(),
        id,
        grade: fields[2].to_string(),
        department: fields[3].to_string(),
        score,
    })
}
