//! Per-section, per-program sticker buckets.

use crate::classify::{Program, Section};

/// Stickers extracted from one PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileStickers {
    /// File name of the PDF (no folder).
    pub file_name: String,
    /// Stickers in first-seen order.
    pub stickers: Vec<String>,
}

impl FileStickers {
    /// Create a new entry.
    pub fn new(file_name: impl Into<String>, stickers: Vec<String>) -> Self {
        Self {
            file_name: file_name.into(),
            stickers,
        }
    }
}

/// Extraction results for a whole run.
///
/// Always holds all four (section, program) buckets; entries keep the order
/// in which PDFs were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResults {
    buckets: [[Vec<FileStickers>; 2]; 2],
}

fn slot(section: Section, program: Program) -> (usize, usize) {
    let s = match section {
        Section::Cal => 0,
        Section::WoCal => 1,
    };
    let p = match program {
        Program::Bx726 => 0,
        Program::V769 => 1,
    };
    (s, p)
}

impl ExtractionResults {
    /// Create empty results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a bucket.
    pub fn push(&mut self, section: Section, program: Program, entry: FileStickers) {
        let (s, p) = slot(section, program);
        self.buckets[s][p].push(entry);
    }

    /// Entries of one bucket.
    pub fn bucket(&self, section: Section, program: Program) -> &[FileStickers] {
        let (s, p) = slot(section, program);
        &self.buckets[s][p]
    }

    /// Number of PDFs in one bucket.
    pub fn count(&self, section: Section, program: Program) -> usize {
        self.bucket(section, program).len()
    }

    /// Whether no program of `section` has any entry.
    pub fn is_section_empty(&self, section: Section) -> bool {
        Program::ALL
            .iter()
            .all(|&program| self.bucket(section, program).is_empty())
    }

    /// Total number of PDFs across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().flatten().map(Vec::len).sum()
    }

    /// Iterate over every (section, program, entries) triple in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, Program, &[FileStickers])> + '_ {
        Section::ALL.into_iter().flat_map(move |section| {
            Program::ALL
                .into_iter()
                .map(move |program| (section, program, self.bucket(section, program)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> FileStickers {
        FileStickers::new(name, vec!["Tyre pressure".to_string()])
    }

    #[test]
    fn new_results_are_empty() {
        let results = ExtractionResults::new();
        assert_eq!(results.total(), 0);
        assert!(results.is_section_empty(Section::Cal));
        assert!(results.is_section_empty(Section::WoCal));
        assert_eq!(results.iter().count(), 4);
    }

    #[test]
    fn push_goes_to_the_right_bucket() {
        let mut results = ExtractionResults::new();
        results.push(Section::WoCal, Program::V769, entry("a.pdf"));
        results.push(Section::WoCal, Program::V769, entry("b.pdf"));
        results.push(Section::Cal, Program::Bx726, entry("c.pdf"));

        assert_eq!(results.count(Section::WoCal, Program::V769), 2);
        assert_eq!(results.count(Section::WoCal, Program::Bx726), 0);
        assert_eq!(results.count(Section::Cal, Program::Bx726), 1);
        assert_eq!(results.total(), 3);
        assert!(!results.is_section_empty(Section::Cal));

        let names: Vec<_> = results
            .bucket(Section::WoCal, Program::V769)
            .iter()
            .map(|e| e.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn iter_order_is_section_then_program() {
        let results = ExtractionResults::new();
        let keys: Vec<_> = results.iter().map(|(s, p, _)| (s, p)).collect();
        assert_eq!(
            keys,
            vec![
                (Section::Cal, Program::Bx726),
                (Section::Cal, Program::V769),
                (Section::WoCal, Program::Bx726),
                (Section::WoCal, Program::V769),
            ]
        );
    }
}
