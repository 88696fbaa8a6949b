//! Core quiz engine — deterministic generation, grading, and review for
//! grade-2 Chinese practice runs and boss battles.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | All shared types: questions, runs, answers, grading, options |
//! | `content`    | Curriculum schema and per-unit section accessors |
//! | `rng`        | Seeded xorshift32 PRNG, non-mutating shuffle, string hashing |
//! | `helpers`    | Shared sampling/text utilities used across archetypes |
//! | `archetypes` | One builder module per question archetype |
//! | `generator`  | `generate_regular_run()` — the T1/T2/T3 composition |
//! | `boss`       | `generate_boss_run()` — three-phase battles with fallback |
//! | `grade`      | Pure grading: exact choice match, structured fill payloads |
//! | `stars`      | Score-to-stars thresholds and the pass line |
//! | `explain`    | Post-answer explanation text rebuilt from content |
//! | `rewards`    | XP, levels, titles, mastery deltas, badge thresholds |
//! | `client`     | Player-facing JSON projection with answer keys stripped |
//! | `error`      | `QuizError` — everything generation can refuse to do |

pub mod archetypes;
pub mod boss;
pub mod client;
pub mod content;
pub mod error;
pub mod explain;
pub mod generator;
pub mod grade;
pub mod helpers;
pub mod models;
pub mod rewards;
pub mod rng;
pub mod stars;

// Re-export the public API surface so callers can use
// `quiz_engine::generate_regular_run` without reaching into sub-modules.
pub use boss::generate_boss_run;
pub use client::run_to_client_json;
pub use content::ContentSchema;
pub use error::QuizError;
pub use explain::explain_question;
pub use generator::generate_regular_run;
pub use grade::grade_run;
pub use models::{
    Answer, BossPhase, BossRunOptions, ChoiceArchetype, ChoiceQuestion, FillQuestion,
    GradeDetail, GradeResult, Mix, Question, QuestionMeta, Run, RunOptions,
};
pub use rng::QuizRng;
pub use stars::{passed, score_to_stars};
