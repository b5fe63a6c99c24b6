pub mod classify;
pub mod engine;

pub use classify::{classify, Classification, Deficit, Tier, ESTIMATED_POINTS_PER_GRADE};
pub use engine::{evaluate, score_event, total_practical_score, CandidateInput, EventScore, Evaluation};
