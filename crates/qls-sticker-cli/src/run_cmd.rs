use std::path::{Path, PathBuf};

use qls_sticker_core::{
    ClassifyMode, ExtractionResults, FileStickers, Program, Section, StickerFilter, classify,
};
use qls_sticker_io::{
    MasterOutcome, PdfSource, TableSettings, convert_pdf, discover_pdfs, write_summary,
};

use crate::apply_cmd::{apply_masters, configured_masters, describe_outcome, outcome_json};
use crate::cli::{MasterPaths, ReportFormat, TableStrategy};
use crate::settings::SettingsStore;
use crate::shared::{ProgressReporter, build_table_settings, ensure_dir, require_path};

/// Options of the `run` command.
pub struct RunOptions<'a> {
    pub base: Option<&'a Path>,
    pub paths: &'a MasterPaths,
    pub strict_paths: bool,
    pub strategy: TableStrategy,
    pub save: bool,
    pub format: ReportFormat,
}

pub fn run(opts: &RunOptions<'_>, store: &SettingsStore) -> Result<(), i32> {
    let settings = store.load().merged(opts.base, opts.paths);
    if opts.save {
        store.save(&settings);
    }

    let base = require_path(settings.base.clone(), "--base")?;
    let out = require_path(settings.out.clone(), "--out")?;
    let masters = configured_masters(&settings);
    if !masters.is_empty() && settings.mapping.is_none() {
        eprintln!("Error: --mapping was not given and no saved setting exists");
        return Err(1);
    }

    let temp = out.join("temp");
    ensure_dir(&out)?;
    ensure_dir(&temp)?;

    let sources = discover_pdfs(&base).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let mode = if opts.strict_paths {
        ClassifyMode::Strict
    } else {
        ClassifyMode::Lenient
    };
    let table_settings = build_table_settings(opts.strategy);
    let results = extract_all(&sources, &temp, &table_settings, mode);

    let mut summaries = Vec::new();
    for section in Section::ALL {
        match write_summary(section, &results, &out) {
            Ok(Some(path)) => summaries.push(path),
            Ok(None) => tracing::info!("no stickers for {section}, summary not written"),
            Err(e) => eprintln!("Error: {section} summary not saved: {e}"),
        }
    }

    let (outcomes, failed) = if masters.is_empty() {
        tracing::info!("no master workbooks configured, skipping write-back");
        (Vec::new(), false)
    } else {
        apply_masters(&settings, &masters, &out)?
    };

    let report = RunReport {
        pdfs_found: sources.len(),
        results: &results,
        summaries: &summaries,
        outcomes: &outcomes,
    };
    match opts.format {
        ReportFormat::Text => report.print_text(),
        ReportFormat::Json => println!("{}", report.to_json()),
    }

    if failed { Err(1) } else { Ok(()) }
}

/// Convert, extract and bucket every PDF. Per-file failures are logged and
/// the file is skipped.
fn extract_all(
    sources: &[PdfSource],
    temp: &Path,
    settings: &TableSettings,
    mode: ClassifyMode,
) -> ExtractionResults {
    let filter = StickerFilter::default();
    let progress = ProgressReporter::new(sources.len());
    let mut results = ExtractionResults::new();

    for (idx, source) in sources.iter().enumerate() {
        progress.report(idx + 1);

        if let Some((section, program, stickers)) = process_one(source, temp, settings, &filter, mode)
        {
            results.push(section, program, FileStickers::new(&source.file_name, stickers));
        }
    }

    progress.finish();
    results
}

fn process_one(
    source: &PdfSource,
    temp: &Path,
    settings: &TableSettings,
    filter: &StickerFilter,
    mode: ClassifyMode,
) -> Option<(Section, Program, Vec<String>)> {
    let converted = temp.join(source.converted_name());

    let grid = match convert_pdf(&source.path, &converted, settings) {
        Ok(Some(grid)) => grid,
        Ok(None) => {
            tracing::debug!("{}: no tables", source.path.display());
            return None;
        }
        Err(e) => {
            tracing::warn!("convert error {}: {e}", source.path.display());
            return None;
        }
    };

    let stickers = filter.extract_from_grid(&grid);
    if stickers.is_empty() {
        tracing::debug!("{}: no stickers", source.path.display());
        if let Err(e) = std::fs::remove_file(&converted) {
            tracing::debug!("could not remove {}: {e}", converted.display());
        }
        return None;
    }

    let Some((section, program)) = classify(&source.folder, mode) else {
        tracing::warn!(
            "{}: folder {:?} names no section/program, skipped",
            source.path.display(),
            source.folder
        );
        return None;
    };

    tracing::debug!(
        "{}: {} sticker(s) -> {section} / {program}",
        source.file_name,
        stickers.len()
    );
    Some((section, program, stickers))
}

struct RunReport<'a> {
    pdfs_found: usize,
    results: &'a ExtractionResults,
    summaries: &'a [PathBuf],
    outcomes: &'a [MasterOutcome],
}

impl RunReport<'_> {
    fn print_text(&self) {
        println!("Total PDFs found: {}", self.pdfs_found);
        for path in self.summaries {
            println!("Saved: {}", path.display());
        }
        for outcome in self.outcomes {
            println!("{}", describe_outcome(outcome));
        }
        println!("Summary:");
        for (section, program, entries) in self.results.iter() {
            println!("  {section} - {program}: {} PDF(s) processed", entries.len());
        }
        println!("Done.");
    }

    fn to_json(&self) -> serde_json::Value {
        let buckets: Vec<serde_json::Value> = self
            .results
            .iter()
            .map(|(section, program, entries)| {
                serde_json::json!({
                    "section": section,
                    "program": program,
                    "files": entries,
                })
            })
            .collect();

        serde_json::json!({
            "pdfs_found": self.pdfs_found,
            "summaries": self
                .summaries
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
            "buckets": buckets,
            "masters": self.outcomes.iter().map(outcome_json).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_report_lists_all_buckets() {
        let mut results = ExtractionResults::new();
        results.push(
            Section::Cal,
            Program::V769,
            FileStickers::new("a.pdf", vec!["Airbag".to_string()]),
        );
        let summaries = vec![PathBuf::from("out/Extracted_Stickers_CAL.xlsx")];
        let report = RunReport {
            pdfs_found: 2,
            results: &results,
            summaries: &summaries,
            outcomes: &[],
        };

        let value = report.to_json();
        assert_eq!(value["pdfs_found"], 2);
        assert_eq!(value["buckets"].as_array().unwrap().len(), 4);
        assert_eq!(value["buckets"][1]["program"], "V769");
        assert_eq!(value["buckets"][1]["files"][0]["file_name"], "a.pdf");
        assert_eq!(value["buckets"][1]["files"][0]["stickers"][0], "Airbag");
        assert!(value["masters"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_base_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let paths = MasterPaths {
            out: Some(dir.path().join("out")),
            ..MasterPaths::default()
        };
        let opts = RunOptions {
            base: None,
            paths: &paths,
            strict_paths: false,
            strategy: TableStrategy::Lattice,
            save: false,
            format: ReportFormat::Text,
        };
        assert_eq!(run(&opts, &store), Err(1));
    }
}
