//! # hanzi_drill_gen
//!
//! A fully offline, deterministic quiz engine for grade-2 Chinese practice,
//! built for a detective-themed learning game.
//!
//! The engine turns a curriculum content pack (characters, vocabulary,
//! sentence patterns, poems, reading passages) into graded quiz runs and
//! three-phase boss battles. Runs are never stored: a run is a pure function
//! of `(content, unit_id, seed, run_id, options)`, so the server regenerates
//! it byte-identically whenever an answer comes back to be checked.
//!
//! ## How it works
//!
//! 1. Deserialize a [`ContentSchema`] content pack and build [`RunOptions`]
//!    (or [`BossRunOptions`]) with a unit id, a seed, and a run id.
//! 2. Call [`generate_regular_run`] or [`generate_boss_run`] — the engine
//!    seeds its own PRNG, samples from the unit's sections, and assembles a
//!    fixed composition of question archetypes with shuffled choice sets.
//! 3. Send [`run_to_client_json`] to the player (answer keys stripped), then
//!    [`grade_run`] the submitted answers and render review text with
//!    [`explain_question`].
//!
//! ## Key features
//!
//! - **Deterministic**: the same inputs always produce the same run, down to
//!   option order — grading needs no stored answer key.
//! - **Two run shapes**: regular runs mix character recall, vocabulary
//!   disambiguation, and sentence-pattern fill; boss runs walk three phases
//!   (two minions and a boss) with a poem/reading fallback for units without
//!   enough structured material.
//! - **Pure core**: grading, stars, rewards, and explanations are pure
//!   functions — persistence, sessions, and transport stay in the host.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use hanzi_drill_gen::{
//!     generate_regular_run, grade_run, score_to_stars, ContentSchema, RunOptions,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = std::fs::read_to_string("content.json")?;
//! let content: ContentSchema = serde_json::from_str(&raw)?;
//!
//! let run = generate_regular_run(&content, &RunOptions::new("u1", 42, "r1"))?;
//! for q in &run.questions {
//!     println!("{} {}", q.question_id(), q.prompt());
//! }
//!
//! let graded = grade_run(&run.questions, &[]);
//! println!("score {} -> {} stars", graded.score, score_to_stars(graded.score));
//! # Ok(())
//! # }
//! ```

pub mod quiz_engine;

// Convenience re-exports so callers can use `hanzi_drill_gen::generate_regular_run`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    explain_question, generate_boss_run, generate_regular_run, grade_run, passed,
    run_to_client_json, score_to_stars, Answer, BossPhase, BossRunOptions, ChoiceArchetype,
    ChoiceQuestion, ContentSchema, FillQuestion, GradeDetail, GradeResult, Mix, Question,
    QuestionMeta, QuizError, QuizRng, Run, RunOptions,
};

#[cfg(test)]
mod tests;
