//! Section and program bucketing from folder names.
//!
//! The PDFs are filed by hand into folders whose names carry the section
//! (`CAL` / `WO CAL`) and the program (`BX726` / `V769`). Classification is a
//! case-insensitive substring match on the folder path.

use std::fmt;

/// Documentation category of a PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    /// `CAL`
    #[cfg_attr(feature = "serde", serde(rename = "CAL"))]
    Cal,
    /// `WO CAL`
    #[cfg_attr(feature = "serde", serde(rename = "WO CAL"))]
    WoCal,
}

impl Section {
    /// All sections in output order.
    pub const ALL: [Section; 2] = [Section::Cal, Section::WoCal];

    /// Display name used in sheet names and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Cal => "CAL",
            Section::WoCal => "WO CAL",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product line a PDF belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Program {
    /// `BX726`
    #[cfg_attr(feature = "serde", serde(rename = "BX726"))]
    Bx726,
    /// `V769`
    #[cfg_attr(feature = "serde", serde(rename = "V769"))]
    V769,
}

impl Program {
    /// All programs in output order.
    pub const ALL: [Program; 2] = [Program::Bx726, Program::V769];

    /// Display name used in sheet names and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Bx726 => "BX726",
            Program::V769 => "V769",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How folder names without an explicit marker are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifyMode {
    /// Missing markers fall back to `CAL` and `BX726`.
    #[default]
    Lenient,
    /// Both a section marker and a program marker are required.
    Strict,
}

/// Classify a PDF by the folder path it was found in.
///
/// `WO CAL` is tested before `CAL` since every `wo cal` folder also contains
/// `cal`. Returns `None` only in [`ClassifyMode::Strict`].
pub fn classify(folder: &str, mode: ClassifyMode) -> Option<(Section, Program)> {
    let folder = folder.to_lowercase();

    let section = if folder.contains("wo cal") {
        Some(Section::WoCal)
    } else if mode == ClassifyMode::Lenient || folder.contains("cal") {
        Some(Section::Cal)
    } else {
        None
    };

    let program = if folder.contains("v769") {
        Some(Program::V769)
    } else if mode == ClassifyMode::Lenient || folder.contains("bx726") {
        Some(Program::Bx726)
    } else {
        None
    };

    Some((section?, program?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wo_cal_wins_over_cal() {
        assert_eq!(
            classify("V769/WO CAL/Batch 3", ClassifyMode::Lenient),
            Some((Section::WoCal, Program::V769))
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify("bx726 - Wo Cal", ClassifyMode::Strict),
            Some((Section::WoCal, Program::Bx726))
        );
        assert_eq!(
            classify("Cal/v769", ClassifyMode::Strict),
            Some((Section::Cal, Program::V769))
        );
    }

    #[test]
    fn lenient_falls_back_to_cal_and_bx726() {
        assert_eq!(
            classify("misc/scans", ClassifyMode::Lenient),
            Some((Section::Cal, Program::Bx726))
        );
        assert_eq!(
            classify("", ClassifyMode::Lenient),
            Some((Section::Cal, Program::Bx726))
        );
    }

    #[test]
    fn strict_requires_both_markers() {
        assert_eq!(classify("misc/scans", ClassifyMode::Strict), None);
        assert_eq!(classify("CAL/unsorted", ClassifyMode::Strict), None);
        assert_eq!(classify("V769/unsorted", ClassifyMode::Strict), None);
        assert_eq!(
            classify("CAL/BX726", ClassifyMode::Strict),
            Some((Section::Cal, Program::Bx726))
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Section::WoCal.to_string(), "WO CAL");
        assert_eq!(Section::Cal.to_string(), "CAL");
        assert_eq!(Program::Bx726.to_string(), "BX726");
        assert_eq!(Program::V769.to_string(), "V769");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_display_names() {
        assert_eq!(serde_json::to_string(&Section::WoCal).unwrap(), "\"WO CAL\"");
        assert_eq!(serde_json::to_string(&Program::V769).unwrap(), "\"V769\"");
    }
}
