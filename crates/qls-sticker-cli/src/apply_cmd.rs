use std::path::{Path, PathBuf};

use qls_sticker_core::{Program, SheetTargets, WriteBackLayout};
use qls_sticker_io::{MasterOutcome, SectionStatus, apply_to_master, load_mapping};

use crate::cli::{MasterPaths, ReportFormat};
use crate::settings::{SavedSettings, SettingsStore};
use crate::shared::{ensure_dir, require_path};

pub fn run(
    paths: &MasterPaths,
    save: bool,
    format: ReportFormat,
    store: &SettingsStore,
) -> Result<(), i32> {
    let settings = store.load().merged(None, paths);
    if save {
        // The base folder is not part of this command; keep the saved one.
        store.save(&settings);
    }

    let out = require_path(settings.out.clone(), "--out")?;
    ensure_dir(&out)?;

    let masters = configured_masters(&settings);
    if masters.is_empty() {
        eprintln!("Error: no master workbook given (--master-bx726 / --master-v769)");
        return Err(1);
    }

    let (outcomes, failed) = apply_masters(&settings, &masters, &out)?;

    match format {
        ReportFormat::Text => {
            for outcome in &outcomes {
                println!("{}", describe_outcome(outcome));
            }
            println!("Done.");
        }
        ReportFormat::Json => {
            let value = serde_json::json!({
                "masters": outcomes.iter().map(outcome_json).collect::<Vec<_>>(),
            });
            println!("{value}");
        }
    }

    if failed { Err(1) } else { Ok(()) }
}

/// Masters that have a path configured, in program order.
pub fn configured_masters(settings: &SavedSettings) -> Vec<(Program, PathBuf)> {
    [
        (Program::Bx726, settings.master_bx726.clone()),
        (Program::V769, settings.master_v769.clone()),
    ]
    .into_iter()
    .filter_map(|(program, path)| path.map(|p| (program, p)))
    .collect()
}

/// Load the mapping workbook and apply it to every configured master.
///
/// An unreadable mapping workbook is fatal. A master that fails is reported
/// and skipped; the returned flag tells whether any master failed.
pub fn apply_masters(
    settings: &SavedSettings,
    masters: &[(Program, PathBuf)],
    out: &Path,
) -> Result<(Vec<MasterOutcome>, bool), i32> {
    let mapping_path = require_path(settings.mapping.clone(), "--mapping")?;
    let mapping = load_mapping(&mapping_path).map_err(|e| {
        eprintln!("Error: mapping load error: {e}");
        1
    })?;

    let targets: SheetTargets = settings.targets();
    let layout = WriteBackLayout::default();
    let mut outcomes = Vec::with_capacity(masters.len());
    let mut failed = false;

    for (program, master) in masters {
        match apply_to_master(master, *program, &mapping, &targets, &layout, out) {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                eprintln!("Error: {program} master not updated: {e}");
                failed = true;
            }
        }
    }

    Ok((outcomes, failed))
}

/// One-line description of a master update.
pub fn describe_outcome(outcome: &MasterOutcome) -> String {
    let sections: Vec<String> = outcome
        .sections
        .iter()
        .map(|s| match &s.status {
            SectionStatus::Applied(report) => format!(
                "{} {}: {} matched, {} unmatched",
                outcome.program,
                s.section,
                report.matched,
                report.unmatched.len()
            ),
            SectionStatus::MissingSheet(name) => format!("sheet {name:?} not found"),
            SectionStatus::MissingMapping(name) => format!("mapping sheet {name:?} not found"),
        })
        .collect();

    format!(
        "Updated: {} ({})",
        outcome.output.display(),
        sections.join("; ")
    )
}

/// JSON form of a master update.
pub fn outcome_json(outcome: &MasterOutcome) -> serde_json::Value {
    let sections: Vec<serde_json::Value> = outcome
        .sections
        .iter()
        .map(|s| match &s.status {
            SectionStatus::Applied(report) => serde_json::json!({
                "section": s.section,
                "status": "applied",
                "report": report,
            }),
            SectionStatus::MissingSheet(name) => serde_json::json!({
                "section": s.section,
                "status": "missing_sheet",
                "sheet": name,
            }),
            SectionStatus::MissingMapping(name) => serde_json::json!({
                "section": s.section,
                "status": "missing_mapping",
                "sheet": name,
            }),
        })
        .collect();

    serde_json::json!({
        "program": outcome.program,
        "output": outcome.output.display().to_string(),
        "sections": sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qls_sticker_core::{ApplyReport, Section};
    use qls_sticker_io::SectionOutcome;

    fn outcome() -> MasterOutcome {
        MasterOutcome {
            program: Program::V769,
            output: PathBuf::from("out/[UPDATED] V769.xlsx"),
            sections: vec![
                SectionOutcome {
                    section: Section::Cal,
                    status: SectionStatus::Applied(ApplyReport {
                        matched: 3,
                        unmatched: vec!["JACK".to_string()],
                        skipped_blank: 0,
                        cells_written: 7,
                    }),
                },
                SectionOutcome {
                    section: Section::WoCal,
                    status: SectionStatus::MissingSheet("V769 Plant Cont. Items_WO CAL".into()),
                },
            ],
        }
    }

    #[test]
    fn configured_masters_skips_unset() {
        let settings = SavedSettings {
            master_v769: Some(PathBuf::from("v.xlsx")),
            ..SavedSettings::default()
        };
        assert_eq!(
            configured_masters(&settings),
            vec![(Program::V769, PathBuf::from("v.xlsx"))]
        );
    }

    #[test]
    fn describe_lists_every_section() {
        let text = describe_outcome(&outcome());
        assert!(text.starts_with("Updated: out/[UPDATED] V769.xlsx"));
        assert!(text.contains("V769 CAL: 3 matched, 1 unmatched"));
        assert!(text.contains("sheet \"V769 Plant Cont. Items_WO CAL\" not found"));
    }

    #[test]
    fn json_carries_report() {
        let value = outcome_json(&outcome());
        assert_eq!(value["program"], "V769");
        assert_eq!(value["sections"][0]["section"], "CAL");
        assert_eq!(value["sections"][0]["report"]["matched"], 3);
        assert_eq!(value["sections"][1]["status"], "missing_sheet");
    }

    #[test]
    fn missing_mapping_path_is_an_error() {
        let result = apply_masters(
            &SavedSettings::default(),
            &[(Program::Bx726, PathBuf::from("bx.xlsx"))],
            Path::new("out"),
        );
        assert_eq!(result.unwrap_err(), 1);
    }
}
