use std::collections::HashSet;

use super::config::{EventConfig, StandardsConfig};

/// Validate a standards file before it is resolved into a table.
/// Returns all validation errors at once (not just the first).
pub fn validate_standards(config: &StandardsConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    if config.universities.is_empty() {
        errors.push("universities: at least one university is required".to_string());
    }

    for (i, uni) in config.universities.iter().enumerate() {
        let path = format!("universities[{}]", i);

        if uni.id.trim().is_empty() {
            errors.push(format!("{}.id: must not be empty", path));
        } else if !seen_ids.insert(uni.id.as_str()) {
            errors.push(format!("{}.id: duplicate university '{}'", path, uni.id));
        }

        if !uni.pass_excellent_cutoff.is_finite() {
            errors.push(format!("{}.pass_excellent_cutoff: must be a finite number", path));
        }
        if !uni.pass_good_cutoff.is_finite() {
            errors.push(format!("{}.pass_good_cutoff: must be a finite number", path));
        }
        if uni.pass_good_cutoff > uni.pass_excellent_cutoff {
            errors.push(format!(
                "{}: pass_good_cutoff ({}) must not exceed pass_excellent_cutoff ({})",
                path, uni.pass_good_cutoff, uni.pass_excellent_cutoff
            ));
        }

        if uni.events.male.is_empty() && uni.events.female.is_empty() {
            errors.push(format!("{}.events: no event standards for any gender", path));
        }

        validate_events(&format!("{}.events.male", path), &uni.events.male, &mut errors);
        validate_events(&format!("{}.events.female", path), &uni.events.female, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_events(path: &str, events: &[EventConfig], errors: &mut Vec<String>) {
    let mut seen = HashSet::new();

    for (i, event) in events.iter().enumerate() {
        let path = format!("{}[{}]", path, i);

        if event.id.trim().is_empty() {
            errors.push(format!("{}.id: must not be empty", path));
        } else if !seen.insert(event.id.as_str()) {
            errors.push(format!("{}.id: duplicate event '{}'", path, event.id));
        }

        if !event.standard.is_finite() {
            errors.push(format!("{}.standard: must be a finite number", path));
        }
        if !event.max_score.is_finite() || event.max_score < 0.0 {
            errors.push(format!("{}.max_score: must be non-negative", path));
        }
        // NaN fails both comparisons, so check finiteness explicitly
        if !event.per_grade.is_finite() || event.per_grade <= 0.0 {
            errors.push(format!(
                "{}.per_grade: must be greater than zero, got {}",
                path, event.per_grade
            ));
        }
        if let Some(step) = event.score_per_grade {
            if !step.is_finite() || step <= 0.0 {
                errors.push(format!(
                    "{}.score_per_grade: must be greater than zero, got {}",
                    path, step
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::{GenderEvents, UniversityConfig};

    fn event(id: &str) -> EventConfig {
        EventConfig {
            id: id.to_string(),
            name: None,
            standard: 100.0,
            max_score: 175.0,
            unit: "cm".to_string(),
            decreasing: false,
            per_grade: 5.0,
            score_per_grade: None,
        }
    }

    fn university(id: &str, male: Vec<EventConfig>) -> UniversityConfig {
        UniversityConfig {
            id: id.to_string(),
            name: None,
            naesin_max: 300,
            pass_excellent_cutoff: 900.0,
            pass_good_cutoff: 895.0,
            events: GenderEvents {
                male,
                female: vec![],
            },
        }
    }

    #[test]
    fn test_valid_config() {
        let config = StandardsConfig {
            universities: vec![university("gachon", vec![event("jump")])],
        };
        assert!(validate_standards(&config).is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = StandardsConfig {
            universities: vec![],
        };
        let errors = validate_standards(&config).unwrap_err();
        assert!(errors[0].contains("at least one university"));
    }

    #[test]
    fn test_zero_per_grade() {
        let mut bad = event("jump");
        bad.per_grade = 0.0;
        let config = StandardsConfig {
            universities: vec![university("gachon", vec![bad])],
        };
        let errors = validate_standards(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("universities[0].events.male[0].per_grade"));
    }

    #[test]
    fn test_nan_per_grade() {
        let mut bad = event("jump");
        bad.per_grade = f64::NAN;
        let config = StandardsConfig {
            universities: vec![university("gachon", vec![bad])],
        };
        assert!(validate_standards(&config).is_err());
    }

    #[test]
    fn test_negative_score_per_grade() {
        let mut bad = event("jump");
        bad.score_per_grade = Some(-8.75);
        let config = StandardsConfig {
            universities: vec![university("gachon", vec![bad])],
        };
        let errors = validate_standards(&config).unwrap_err();
        assert!(errors[0].contains("score_per_grade"));
    }

    #[test]
    fn test_duplicate_event_ids() {
        let config = StandardsConfig {
            universities: vec![university("gachon", vec![event("jump"), event("jump")])],
        };
        let errors = validate_standards(&config).unwrap_err();
        assert!(errors[0].contains("duplicate event 'jump'"));
    }

    #[test]
    fn test_duplicate_university_ids() {
        let config = StandardsConfig {
            universities: vec![
                university("gachon", vec![event("jump")]),
                university("gachon", vec![event("jump")]),
            ],
        };
        let errors = validate_standards(&config).unwrap_err();
        assert!(errors[0].contains("universities[1].id"));
    }

    #[test]
    fn test_cutoffs_out_of_order() {
        let mut uni = university("gachon", vec![event("jump")]);
        uni.pass_good_cutoff = 950.0;
        let config = StandardsConfig {
            universities: vec![uni],
        };
        let errors = validate_standards(&config).unwrap_err();
        assert!(errors[0].contains("must not exceed"));
    }

    #[test]
    fn test_university_without_events() {
        let config = StandardsConfig {
            universities: vec![university("gachon", vec![])],
        };
        let errors = validate_standards(&config).unwrap_err();
        assert!(errors[0].contains("no event standards"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut bad = event("jump");
        bad.per_grade = -1.0; // Error 1
        bad.max_score = -5.0; // Error 2
        let mut uni = university("", vec![bad]); // Error 3
        uni.pass_excellent_cutoff = f64::INFINITY; // Error 4
        let config = StandardsConfig {
            universities: vec![uni],
        };
        let errors = validate_standards(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
