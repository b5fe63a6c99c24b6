pub mod config;
pub mod table;
pub mod validation;

pub use config::*;
pub use table::{
    builtin_config, builtin_yaml, EventStandard, Gender, StandardsTable, UniversityStandard,
    DEFAULT_SCORE_PER_GRADE,
};
pub use validation::validate_standards;
