use std::collections::HashMap;

use serde::Serialize;

use super::classify::{classify, Classification};
use crate::error::{ensure_finite, EvalError, EvalResult};
use crate::standards::{EventStandard, Gender, StandardsTable};

/// Everything the caller collected from the candidate.
///
/// Performances are keyed by event id; an event missing from the map has not
/// been entered yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateInput {
    pub university: String,
    pub gender: Gender,
    pub academic_score: u32,
    pub performances: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventScore {
    pub id: String,
    pub name: String,
    pub unit: String,
    /// Raw value that was scored (0 when nothing was supplied)
    pub performance: f64,
    pub supplied: bool,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub university: String,
    pub gender: Gender,
    pub events: Vec<EventScore>,
    pub practical_total: f64,
    pub practical_max: f64,
    pub academic_score: u32,
    pub naesin_max: u32,
    pub total: f64,
    pub max_total: f64,
    /// True when at least one event had no performance and was scored as 0
    pub incomplete: bool,
    pub classification: Classification,
}

/// Score one raw performance against the table.
pub fn score_event(
    table: &StandardsTable,
    university: &str,
    gender: Gender,
    event: &str,
    performance: f64,
) -> EvalResult<f64> {
    let standard = table.event(university, gender, event)?;
    let performance = ensure_finite("performance", performance)?;
    Ok(standard.score(performance))
}

/// Sum of every event's score for (university, gender).
///
/// Events without a supplied performance are scored as a raw value of 0.
pub fn total_practical_score(
    table: &StandardsTable,
    university: &str,
    gender: Gender,
    performances: &HashMap<String, f64>,
) -> EvalResult<f64> {
    let events = table.events(university, gender)?;
    check_known_events(events, performances, university, gender)?;

    events.iter().try_fold(0.0, |total, event| -> EvalResult<f64> {
        let (performance, _) = performance_for(event, performances)?;
        Ok(total + event.score(performance))
    })
}

/// Full results-page computation: per-event breakdown, totals and tier.
pub fn evaluate(table: &StandardsTable, input: &CandidateInput) -> EvalResult<Evaluation> {
    let uni = table.university(&input.university)?;
    let events = table.events(&input.university, input.gender)?;
    check_known_events(events, &input.performances, &input.university, input.gender)?;

    if input.academic_score > uni.naesin_max {
        return Err(EvalError::InvalidInput(format!(
            "academic score {} exceeds the maximum of {} for '{}'",
            input.academic_score, uni.naesin_max, uni.id
        )));
    }

    let mut scores = Vec::with_capacity(events.len());
    for event in events {
        let (performance, supplied) = performance_for(event, &input.performances)?;
        scores.push(EventScore {
            id: event.id.clone(),
            name: event.name.clone(),
            unit: event.unit.clone(),
            performance,
            supplied,
            score: event.score(performance),
            max_score: event.max_score,
        });
    }

    let practical_total: f64 = scores.iter().map(|s| s.score).sum();
    let practical_max = uni.practical_max(input.gender);
    let incomplete = scores.iter().any(|s| !s.supplied);
    let total = f64::from(input.academic_score) + practical_total;
    let classification = classify(table, &uni.id, total)?;

    tracing::debug!(
        university = %uni.id,
        gender = %input.gender,
        practical_total,
        total,
        incomplete,
        "evaluated candidate"
    );

    Ok(Evaluation {
        university: uni.name.clone(),
        gender: input.gender,
        events: scores,
        practical_total,
        practical_max,
        academic_score: input.academic_score,
        naesin_max: uni.naesin_max,
        total,
        max_total: f64::from(uni.naesin_max) + practical_max,
        incomplete,
        classification,
    })
}

/// Performance to score for an event and whether the candidate supplied it.
fn performance_for(event: &EventStandard, performances: &HashMap<String, f64>) -> EvalResult<(f64, bool)> {
    match performances.get(&event.id) {
        Some(&value) => {
            let value = ensure_finite(&format!("performance for '{}'", event.id), value)?;
            Ok((value, true))
        }
        None => Ok((0.0, false)),
    }
}

/// Supplied ids outside the table mean the caller and the table disagree.
fn check_known_events(
    events: &[EventStandard],
    performances: &HashMap<String, f64>,
    university: &str,
    gender: Gender,
) -> EvalResult<()> {
    let mut unknown: Vec<&str> = performances
        .keys()
        .filter(|id| !events.iter().any(|e| &e.id == *id))
        .map(String::as_str)
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort_unstable();
    Err(EvalError::Configuration(format!(
        "unknown event(s) {} for university '{}' ({})",
        unknown.join(", "),
        university,
        gender
    )))
}
