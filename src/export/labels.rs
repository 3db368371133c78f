//! Human-readable labels and export titles for dimension values.
//!
//! Lookups are keyed by (accessor, raw value) and never fail: an unmapped
//! value falls back to the raw string, an unmapped accessor to a
//! title-cased version of its name.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static DEFAULT_LABELS: Lazy<HashMap<(&'static str, &'static str), &'static str>> =
    Lazy::new(|| {
        HashMap::from([
            (("gender", "MALE"), "Male"),
            (("gender", "FEMALE"), "Female"),
            (("ageGroup", "<25"), "Under 25"),
            (("ageGroup", "25-29"), "25 to 29"),
            (("ageGroup", "30-39"), "30 to 39"),
            (("ageGroup", "40-49"), "40 to 49"),
            (("ageGroup", "50-59"), "50 to 59"),
            (("ageGroup", "60+"), "60 and over"),
            (("legalStatus", "SENTENCED"), "Sentenced"),
            (("legalStatus", "PRETRIAL"), "Pretrial"),
            (("supervisionLevel", "MINIMUM"), "Minimum"),
            (("supervisionLevel", "MEDIUM"), "Medium"),
            (("supervisionLevel", "MAXIMUM"), "Maximum"),
            (("admissionReason", "NEW_ADMISSION"), "New admission"),
            (("admissionReason", "PAROLE_REVOCATION"), "Parole revocation"),
            (("admissionReason", "PROBATION_REVOCATION"), "Probation revocation"),
        ])
    });

static DEFAULT_TITLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("gender", "Gender"),
        ("ageGroup", "Age Group"),
        ("supervisionLevel", "Supervision Level"),
        ("admissionReason", "Admission Reason"),
        ("legalStatus", "Legal Status"),
    ])
});

/// Resolves display labels and export titles, with tenant overrides layered
/// over the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct LabelResolver {
    label_overrides: HashMap<(String, String), String>,
    title_overrides: HashMap<String, String>,
}

impl LabelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn override_label(
        &mut self,
        accessor: impl Into<String>,
        raw: impl Into<String>,
        label: impl Into<String>,
    ) {
        self.label_overrides
            .insert((accessor.into(), raw.into()), label.into());
    }

    pub fn override_title(&mut self, accessor: impl Into<String>, title: impl Into<String>) {
        self.title_overrides.insert(accessor.into(), title.into());
    }

    /// Label for one raw dimension value. Falls back to the raw value
    /// itself; never fatal.
    pub fn label(&self, accessor: &str, raw: &str) -> String {
        if let Some(label) = self
            .label_overrides
            .get(&(accessor.to_string(), raw.to_string()))
        {
            return label.clone();
        }
        DEFAULT_LABELS
            .get(&(accessor, raw))
            .map(|label| (*label).to_string())
            .unwrap_or_else(|| raw.to_string())
    }

    /// Export column title for an accessor. Falls back to a title-cased
    /// version of the accessor name.
    pub fn title(&self, accessor: &str) -> String {
        if let Some(title) = self.title_overrides.get(accessor) {
            return title.clone();
        }
        DEFAULT_TITLES
            .get(accessor)
            .map(|title| (*title).to_string())
            .unwrap_or_else(|| title_case(accessor))
    }
}

/// "supervisionLevel" -> "Supervision Level", "district" -> "District".
pub fn title_case(accessor: &str) -> String {
    let mut out = String::with_capacity(accessor.len() + 4);
    for (i, c) in accessor.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}
