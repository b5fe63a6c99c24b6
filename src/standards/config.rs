use serde::{Deserialize, Serialize};

/// Standards file as written on disk.
///
/// Optional fields are resolved when the file is turned into a
/// [`StandardsTable`](super::StandardsTable); nothing downstream sees an
/// unresolved default.
///
/// Example YAML:
/// ```yaml
/// universities:
///   - id: gachon
///     name: 가천대학교
///     naesin_max: 300
///     pass_excellent_cutoff: 900
///     pass_good_cutoff: 895
///     events:
///       male:
///         - { id: grip_strength, standard: 221, max_score: 175, unit: kg, per_grade: 5 }
///         - { id: shuttle_run, standard: 8.0, max_score: 175, unit: s, decreasing: true, per_grade: 0.1 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StandardsConfig {
    pub universities: Vec<UniversityConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UniversityConfig {
    /// Lookup key used on the command line (e.g. "gachon")
    pub id: String,

    /// Display name, defaults to the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Maximum converted academic score (내신 만점)
    pub naesin_max: u32,

    pub pass_excellent_cutoff: f64,
    pub pass_good_cutoff: f64,

    pub events: GenderEvents,
}

/// Event lists per gender. A university may publish standards for only one.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GenderEvents {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub male: Vec<EventConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub female: Vec<EventConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EventConfig {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Raw performance earning full credit
    pub standard: f64,

    pub max_score: f64,

    #[serde(default)]
    pub unit: String,

    /// Lower is better (timed events)
    #[serde(default)]
    pub decreasing: bool,

    /// Raw units per grade step
    pub per_grade: f64,

    /// Points deducted per grade step (default: 8.75)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_per_grade: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_event_parse() {
        let yaml = r#"
id: standing_long_jump
standard: 300
max_score: 175
per_grade: 5
"#;
        let event: EventConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(event.id, "standing_long_jump");
        assert!(event.name.is_none());
        assert!(!event.decreasing);
        assert!(event.unit.is_empty());
        assert!(event.score_per_grade.is_none());
    }

    #[test]
    fn test_full_standards_parse() {
        let yaml = r#"
universities:
  - id: gachon
    name: 가천대학교
    naesin_max: 300
    pass_excellent_cutoff: 900
    pass_good_cutoff: 895
    events:
      male:
        - id: shuttle_run
          name: 10m왕복달리기
          standard: 8.0
          max_score: 175
          unit: s
          decreasing: true
          per_grade: 0.1
          score_per_grade: 17.5
"#;
        let config: StandardsConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.universities.len(), 1);

        let uni = &config.universities[0];
        assert_eq!(uni.name.as_deref(), Some("가천대학교"));
        assert_eq!(uni.naesin_max, 300);
        assert_eq!(uni.events.male.len(), 1);
        assert!(uni.events.female.is_empty());

        let shuttle = &uni.events.male[0];
        assert!(shuttle.decreasing);
        assert_eq!(shuttle.score_per_grade, Some(17.5));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
id: grip_strength
standard: 221
max_score: 175
per_grade: 5
bonus: 10
"#;
        let result: Result<EventConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_standards_serde_roundtrip() {
        let config = StandardsConfig {
            universities: vec![UniversityConfig {
                id: "test".to_string(),
                name: None,
                naesin_max: 100,
                pass_excellent_cutoff: 150.0,
                pass_good_cutoff: 120.0,
                events: GenderEvents {
                    male: vec![EventConfig {
                        id: "grip_strength".to_string(),
                        name: None,
                        standard: 50.0,
                        max_score: 100.0,
                        unit: "kg".to_string(),
                        decreasing: false,
                        per_grade: 2.0,
                        score_per_grade: Some(10.0),
                    }],
                    female: vec![],
                },
            }],
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: StandardsConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
