use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use tracing::info;

use crate::error::WordSourceError;

/// A vocabulary item. Each entry becomes two tiles on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    pub id: String,
    pub word: String,
    pub meaning: String,
}

/// Supplies vocabulary for new rounds.
pub trait WordSource {
    /// Up to `count` entries, in source order.
    fn fetch(&self, count: usize) -> Result<Vec<WordEntry>, WordSourceError>;
}

/// Entries held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    entries: Vec<WordEntry>,
}

impl From<Vec<WordEntry>> for StaticWordSource {
    fn from(entries: Vec<WordEntry>) -> Self {
        Self { entries }
    }
}

impl WordSource for StaticWordSource {
    fn fetch(&self, count: usize) -> Result<Vec<WordEntry>, WordSourceError> {
        Ok(self.entries.iter().take(count).cloned().collect())
    }
}

/// Tab-separated word list: `id<TAB>word<TAB>meaning`, or `word<TAB>meaning` with the
/// line number used as id. Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct FileWordSource {
    entries: Vec<WordEntry>,
}

impl FileWordSource {
    pub fn from_file(path: PathBuf) -> Result<Self, WordSourceError> {
        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let entry = parse_line(idx + 1, trimmed)?;
            if !seen.insert(entry.id.clone()) {
                return Err(WordSourceError::DuplicateId(entry.id));
            }
            entries.push(entry);
        }

        info!("Loaded {} word entries from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WordSource for FileWordSource {
    fn fetch(&self, count: usize) -> Result<Vec<WordEntry>, WordSourceError> {
        Ok(self.entries.iter().take(count).cloned().collect())
    }
}

fn parse_line(line_number: usize, line: &str) -> Result<WordEntry, WordSourceError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    let (id, word, meaning) = match fields.as_slice() {
        [id, word, meaning] => (id.to_string(), *word, *meaning),
        [word, meaning] => (line_number.to_string(), *word, *meaning),
        _ => {
            return Err(WordSourceError::Malformed {
                line: line_number,
                content: line.to_string(),
            })
        }
    };
    if id.is_empty() || word.is_empty() || meaning.is_empty() {
        return Err(WordSourceError::Malformed {
            line: line_number,
            content: line.to_string(),
        });
    }
    Ok(WordEntry {
        id,
        word: word.to_string(),
        meaning: meaning.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_wordlist(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_from_file_reads_both_formats() {
        let file = create_test_wordlist(&[
            "# vocabulary",
            "a1\tapple\tmanzana",
            "",
            "dog\tperro",
        ]);
        let source = FileWordSource::from_file(file.path().to_path_buf()).unwrap();

        let entries = source.fetch(10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "a1");
        assert_eq!(entries[0].meaning, "manzana");
        assert_eq!(entries[1].id, "4");
        assert_eq!(entries[1].word, "dog");
    }

    #[test]
    fn test_fetch_limits_count() {
        let file = create_test_wordlist(&["a\tone\tuno", "b\ttwo\tdos", "c\tthree\ttres"]);
        let source = FileWordSource::from_file(file.path().to_path_buf()).unwrap();

        assert_eq!(source.len(), 3);
        assert_eq!(source.fetch(2).unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_line() {
        let file = create_test_wordlist(&["a\tone\tuno", "just-one-field"]);
        let result = FileWordSource::from_file(file.path().to_path_buf());

        assert!(matches!(result, Err(WordSourceError::Malformed { line: 2, .. })));
    }

    #[test]
    fn test_duplicate_id() {
        let file = create_test_wordlist(&["a\tone\tuno", "a\ttwo\tdos"]);
        let result = FileWordSource::from_file(file.path().to_path_buf());

        assert!(matches!(result, Err(WordSourceError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_missing_file() {
        let result = FileWordSource::from_file(PathBuf::from("/definitely/not/here.tsv"));
        assert!(matches!(result, Err(WordSourceError::Io(_))));
    }
}
