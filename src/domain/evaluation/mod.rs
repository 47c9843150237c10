//! Evaluation results: judge verdicts and prompt refinements

mod parse;
mod refinement;
mod schema;
mod verdict;

pub use parse::parse_structured;
pub use refinement::{
    RefinementResult, RefinementSuggestion, SuggestionImpact, SuggestionKind,
    FALLBACK_REFINEMENT_SCORE,
};
pub use schema::{detailed_verdict_schema, judge_verdict_schema, refinement_schema};
pub use verdict::{
    DetailedVerdict, JudgeVerdict, VerdictAnalysis, FALLBACK_JUDGE_SCORE, UNPARSABLE_JUDGE_MESSAGE,
};
