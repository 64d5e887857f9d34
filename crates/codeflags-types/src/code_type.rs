//! Code type normalization.
//!
//! Code lists label their rows with free text such as `ICD-9`, `ICD10-CM`
//! or `icd 9 cm`. Tagging only needs the version, so the label is reduced to
//! `9` or `10` when it names one.

use std::fmt;

use crate::well_known::{ICD10_MARKER, ICD9_MARKER, ICD_MARKER};

/// Normalized code type of a code-list row.
///
/// # Examples
///
/// ```
/// use codeflags_types::CodeType;
///
/// assert_eq!(CodeType::normalize("ICD-9-CM"), CodeType::Icd9);
/// assert_eq!(CodeType::normalize("ICD10"), CodeType::Icd10);
/// assert_eq!(CodeType::normalize("ICD").as_str(), "ICD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", from = "String"))]
pub enum CodeType {
    /// ICD-9, written as `9`.
    Icd9,
    /// ICD-10, written as `10`.
    Icd10,
    /// Any other label, kept verbatim.
    Other(String),
}

impl CodeType {
    /// Normalizes a free-text code-type label.
    ///
    /// The `9` marker is tested before `10`, so the first match wins. A label
    /// containing neither is passed through unchanged.
    pub fn normalize(label: &str) -> Self {
        if label.contains(ICD9_MARKER) {
            Self::Icd9
        } else if label.contains(ICD10_MARKER) {
            Self::Icd10
        } else {
            Self::Other(label.to_string())
        }
    }

    /// Returns the text written to tag columns and used in code-type filters.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Icd9 => ICD9_MARKER,
            Self::Icd10 => ICD10_MARKER,
            Self::Other(label) => label,
        }
    }
}

/// Returns true if a code-type label names an ICD code system.
///
/// The check is case-insensitive, so `icd-9` and `ICD10` both pass while
/// `CPT` does not.
pub fn is_icd(label: &str) -> bool {
    label.to_ascii_uppercase().contains(ICD_MARKER)
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CodeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            ICD9_MARKER => Self::Icd9,
            ICD10_MARKER => Self::Icd10,
            _ => Self::Other(value),
        }
    }
}

impl From<CodeType> for String {
    fn from(value: CodeType) -> Self {
        match value {
            CodeType::Other(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_versions() {
        assert_eq!(CodeType::normalize("ICD-9"), CodeType::Icd9);
        assert_eq!(CodeType::normalize("ICD9CM"), CodeType::Icd9);
        assert_eq!(CodeType::normalize("ICD10"), CodeType::Icd10);
        assert_eq!(CodeType::normalize("icd-10-cm"), CodeType::Icd10);
    }

    #[test]
    fn test_nine_wins_over_ten() {
        // Contains both markers; the 9 check runs first.
        assert_eq!(CodeType::normalize("ICD-10 (2019)"), CodeType::Icd9);
    }

    #[test]
    fn test_unversioned_label_passes_through() {
        let code_type = CodeType::normalize("ICD Other");
        assert_eq!(code_type, CodeType::Other("ICD Other".to_string()));
        assert_eq!(code_type.as_str(), "ICD Other");
        assert_eq!(code_type.to_string(), "ICD Other");
    }

    #[test]
    fn test_is_icd() {
        assert!(is_icd("ICD-9"));
        assert!(is_icd("icd10"));
        assert!(is_icd("Icd 10 CM"));
        assert!(!is_icd("CPT"));
        assert!(!is_icd(""));
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(String::from(CodeType::Icd10), "10");
        assert_eq!(CodeType::from("9".to_string()), CodeType::Icd9);
        assert_eq!(
            CodeType::from("HCPCS".to_string()),
            CodeType::Other("HCPCS".to_string())
        );
    }
}
