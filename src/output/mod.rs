pub mod formatter;

pub use formatter::{
    format_classification, format_evaluation, format_event_score, format_points, format_standards,
    should_use_colors,
};
