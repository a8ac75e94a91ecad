use std::fmt;
use std::ops::Deref;

use serde::Deserialize;
use serde::Serialize;

/// Separator between the category and the detail part of a `Popis` label.
pub const POPIS_SEPARATOR: &str = " - ";

/// One benefit line of the comparison dataset.
///
/// Missing fields deserialize as empty strings; unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BenefitRecord {
    #[serde(rename = "Popis", default)]
    pub popis: String,
    #[serde(rename = "Poistovna", default)]
    pub poistovna: String,
    #[serde(rename = "Benefit", default)]
    pub benefit: String,
}

impl BenefitRecord {
    pub fn new(popis: &str, poistovna: &str, benefit: &str) -> Self {
        Self {
            popis: popis.to_string(),
            poistovna: poistovna.to_string(),
            benefit: benefit.to_string(),
        }
    }

    pub fn category(&self) -> &str {
        category_of(&self.popis)
    }
}

/// Returns the category part of a `Popis` label: everything before the first
/// `" - "`, or the whole label when the separator is absent.
pub fn category_of(popis: &str) -> &str {
    match popis.find(POPIS_SEPARATOR) {
        Some(idx) => &popis[..idx],
        None => popis,
    }
}

/// Insurers shown as table columns, in column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Insurer {
    Dovera,
    Vszp,
    Union,
}

impl Insurer {
    pub const ALL: [Insurer; 3] = [Insurer::Dovera, Insurer::Vszp, Insurer::Union];

    pub fn label(self) -> &'static str {
        match self {
            Insurer::Dovera => "Dôvera",
            Insurer::Vszp => "VšZP",
            Insurer::Union => "UNION",
        }
    }

    /// Exact, case-sensitive match against the `Poistovna` field.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.label() == value)
    }
}

impl fmt::Display for Insurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The loaded dataset. Immutable once built; share it behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<BenefitRecord>,
}

impl Dataset {
    pub fn new(records: Vec<BenefitRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BenefitRecord] {
        &self.records
    }
}

impl Deref for Dataset {
    type Target = [BenefitRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<BenefitRecord>> for Dataset {
    fn from(records: Vec<BenefitRecord>) -> Self {
        Self::new(records)
    }
}
