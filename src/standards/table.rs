use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::config::{EventConfig, StandardsConfig, UniversityConfig};
use super::validation::validate_standards;
use crate::error::{EvalError, EvalResult};

/// Points deducted per grade step when a standard does not say otherwise.
pub const DEFAULT_SCORE_PER_GRADE: f64 = 8.75;

const BUILTIN_STANDARDS: &str = include_str!("builtin.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "남" | "남자" => Ok(Gender::Male),
            "female" | "f" | "여" | "여자" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}', expected male or female", other)),
        }
    }
}

/// Grading rule for one event, with every default already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStandard {
    pub id: String,
    pub name: String,
    pub standard: f64,
    pub max_score: f64,
    pub unit: String,
    pub decreasing: bool,
    pub per_grade: f64,
    pub score_per_grade: f64,
}

impl EventStandard {
    fn from_config(config: &EventConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone().unwrap_or_else(|| config.id.clone()),
            standard: config.standard,
            max_score: config.max_score,
            unit: config.unit.clone(),
            decreasing: config.decreasing,
            per_grade: config.per_grade,
            score_per_grade: config.score_per_grade.unwrap_or(DEFAULT_SCORE_PER_GRADE),
        }
    }

    /// Convert a raw performance into points.
    ///
    /// Flat at `max_score` once the standard is met, then linear in the
    /// (fractional) number of grade steps missed, floored at zero. No rounding.
    pub fn score(&self, performance: f64) -> f64 {
        let difference = if self.decreasing {
            self.standard - performance
        } else {
            performance - self.standard
        };

        if difference >= 0.0 {
            return self.max_score;
        }

        let grades_down = difference.abs() / self.per_grade;
        (self.max_score - grades_down * self.score_per_grade).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversityStandard {
    pub id: String,
    pub name: String,
    pub naesin_max: u32,
    pub pass_excellent_cutoff: f64,
    pub pass_good_cutoff: f64,
    male: Vec<EventStandard>,
    female: Vec<EventStandard>,
}

impl UniversityStandard {
    fn from_config(config: &UniversityConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone().unwrap_or_else(|| config.id.clone()),
            naesin_max: config.naesin_max,
            pass_excellent_cutoff: config.pass_excellent_cutoff,
            pass_good_cutoff: config.pass_good_cutoff,
            male: config.events.male.iter().map(EventStandard::from_config).collect(),
            female: config.events.female.iter().map(EventStandard::from_config).collect(),
        }
    }

    /// Events for a gender, in file order. Empty when the university
    /// publishes no standards for that gender.
    pub fn events(&self, gender: Gender) -> &[EventStandard] {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    /// Sum of every event's `max_score` for a gender.
    pub fn practical_max(&self, gender: Gender) -> f64 {
        self.events(gender).iter().map(|e| e.max_score).sum()
    }

    pub fn genders(&self) -> Vec<Gender> {
        [Gender::Male, Gender::Female]
            .into_iter()
            .filter(|g| !self.events(*g).is_empty())
            .collect()
    }

    fn matches(&self, key: &str) -> bool {
        self.id.eq_ignore_ascii_case(key) || self.name == key
    }
}

/// Immutable lookup table from (university, gender, event) to grading rules.
///
/// Only constructed through [`StandardsTable::from_config`], so every table in
/// circulation has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardsTable {
    universities: Vec<UniversityStandard>,
}

impl StandardsTable {
    pub fn from_config(config: &StandardsConfig) -> Result<Self, Vec<String>> {
        validate_standards(config)?;
        Ok(Self {
            universities: config
                .universities
                .iter()
                .map(UniversityStandard::from_config)
                .collect(),
        })
    }

    /// The table shipped with the binary.
    pub fn builtin() -> Result<Self> {
        let config = builtin_config()?;
        Self::from_config(&config).map_err(|errors| {
            anyhow::anyhow!("built-in standards are invalid: {}", errors.join("; "))
        })
    }

    pub fn universities(&self) -> &[UniversityStandard] {
        &self.universities
    }

    /// Look up a university by id (case-insensitive) or display name.
    pub fn university(&self, key: &str) -> EvalResult<&UniversityStandard> {
        self.universities
            .iter()
            .find(|u| u.matches(key))
            .ok_or_else(|| EvalError::Configuration(format!("unknown university '{}'", key)))
    }

    pub fn events(&self, university: &str, gender: Gender) -> EvalResult<&[EventStandard]> {
        let uni = self.university(university)?;
        let events = uni.events(gender);
        if events.is_empty() {
            return Err(EvalError::Configuration(format!(
                "no {} standards for university '{}'",
                gender, uni.id
            )));
        }
        Ok(events)
    }

    pub fn event(&self, university: &str, gender: Gender, event: &str) -> EvalResult<&EventStandard> {
        self.events(university, gender)?
            .iter()
            .find(|e| e.id == event)
            .ok_or_else(|| {
                EvalError::Configuration(format!(
                    "unknown event '{}' for university '{}' ({})",
                    event, university, gender
                ))
            })
    }

    pub fn practical_max(&self, university: &str, gender: Gender) -> EvalResult<f64> {
        Ok(self.events(university, gender)?.iter().map(|e| e.max_score).sum())
    }
}

/// Parse the embedded standards file.
pub fn builtin_config() -> Result<StandardsConfig> {
    serde_saphyr::from_str(BUILTIN_STANDARDS).context("Failed to parse built-in standards")
}

/// Raw text of the embedded standards file, for `fitpass init`.
pub fn builtin_yaml() -> &'static str {
    BUILTIN_STANDARDS
}
