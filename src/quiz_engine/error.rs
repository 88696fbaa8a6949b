use thiserror::Error;

/// Fatal generation errors. None of these are recovered inside the engine:
/// regeneration is deterministic, so retrying the same call is meaningless —
/// a caller wanting a different quiz passes a different seed.
///
/// Grading and explanation never return these; a wrong or missing answer is
/// an expected runtime condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The requested unit does not exist in the content bank.
    #[error("unknown unit id: {unit_id}")]
    UnknownUnit { unit_id: String },

    /// The requested composition exceeds what the unit's content can supply.
    /// Signals a content-authoring bug, not a transient condition.
    #[error("not enough {category} items: have {have}, need {need}")]
    InsufficientContent {
        category: &'static str,
        have: usize,
        need: usize,
    },

    /// A sentence-pattern slot has no word-bank entries to draw from.
    #[error("sentence pattern {pattern_id} has an empty word bank for slot {slot}")]
    EmptySlotPool { pattern_id: String, slot: String },

    /// The t1/t2/t3 mix does not sum to the requested question count.
    #[error("mix total {mix_total} must equal questionCount {question_count}")]
    InvalidMix {
        mix_total: usize,
        question_count: usize,
    },

    /// A content item is structurally unusable (e.g. a polyphone with fewer
    /// than two pronunciations, or a syn/ant entry with neither field set).
    #[error("malformed content item {item_id}: {reason}")]
    MalformedItem {
        item_id: String,
        reason: &'static str,
    },
}
