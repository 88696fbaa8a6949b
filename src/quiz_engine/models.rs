use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Question archetypes
// ---------------------------------------------------------------------------

/// Discrete-choice archetypes. Wire names match the JSON `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceArchetype {
    McqPinyin,
    McqHanziByPinyin,
    McqPolyphone,
    McqSynAnt,
    McqConfusing,
    McqWordSpelling,
    McqWordPatternMatch,
    PoemBlank,
    ReadingMcq,
    #[serde(rename = "reading_tf")]
    ReadingTrueFalse,
}

impl ChoiceArchetype {
    pub fn wire_name(self) -> &'static str {
        match self {
            ChoiceArchetype::McqPinyin => "mcq_pinyin",
            ChoiceArchetype::McqHanziByPinyin => "mcq_hanzi_by_pinyin",
            ChoiceArchetype::McqPolyphone => "mcq_polyphone",
            ChoiceArchetype::McqSynAnt => "mcq_syn_ant",
            ChoiceArchetype::McqConfusing => "mcq_confusing",
            ChoiceArchetype::McqWordSpelling => "mcq_word_spelling",
            ChoiceArchetype::McqWordPatternMatch => "mcq_word_pattern_match",
            ChoiceArchetype::PoemBlank => "poem_blank",
            ChoiceArchetype::ReadingMcq => "reading_mcq",
            ChoiceArchetype::ReadingTrueFalse => "reading_tf",
        }
    }
}

impl fmt::Display for ChoiceArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Boss-battle difficulty phase. Regular-run questions carry no phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BossPhase {
    Minion1,
    Minion2,
    Boss,
}

impl fmt::Display for BossPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BossPhase::Minion1 => "minion1",
            BossPhase::Minion2 => "minion2",
            BossPhase::Boss => "boss",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// Lookup keys and display extras a question carries so the explainer can
/// find its source material again without re-running generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hanzi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poem_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl QuestionMeta {
    pub fn is_empty(&self) -> bool {
        *self == QuestionMeta::default()
    }
}

/// A discrete-choice question: the submitted choice string is compared
/// against `correct_choice` exactly. `correct_choice` is always a member of
/// `choices` (choice sets are deduplicated before shuffling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceQuestion {
    pub question_id: String,
    #[serde(rename = "type")]
    pub archetype: ChoiceArchetype,
    pub prompt: String,
    /// 1-2 opaque knowledge-point tags for external mastery aggregation.
    pub knowledge_refs: Vec<String>,
    pub choices: Vec<String>,
    pub correct_choice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<BossPhase>,
    #[serde(default, skip_serializing_if = "QuestionMeta::is_empty")]
    pub meta: QuestionMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillSlot {
    pub key: String,
    pub label: String,
}

/// A structured-fill question over a sentence template with `{slotKey}`
/// placeholders. Each slot is filled from its displayed word bank;
/// `word_bank[slot]` always contains `correct[slot]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillQuestion {
    pub question_id: String,
    pub prompt: String,
    pub knowledge_refs: Vec<String>,
    pub template: String,
    pub slots: Vec<FillSlot>,
    pub word_bank: std::collections::BTreeMap<String, Vec<String>>,
    pub correct: std::collections::BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<BossPhase>,
}

/// The closed question union. Every consumer (generator, grader, explainer,
/// client projection) matches this exhaustively; a new archetype means a new
/// variant and the compiler walks you to every switch that must learn it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Question {
    Choice(ChoiceQuestion),
    Fill(FillQuestion),
}

impl Question {
    pub fn question_id(&self) -> &str {
        match self {
            Question::Choice(q) => &q.question_id,
            Question::Fill(q) => &q.question_id,
        }
    }

    pub(crate) fn set_question_id(&mut self, id: String) {
        match self {
            Question::Choice(q) => q.question_id = id,
            Question::Fill(q) => q.question_id = id,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Question::Choice(q) => &q.prompt,
            Question::Fill(q) => &q.prompt,
        }
    }

    pub fn knowledge_refs(&self) -> &[String] {
        match self {
            Question::Choice(q) => &q.knowledge_refs,
            Question::Fill(q) => &q.knowledge_refs,
        }
    }

    pub fn phase_id(&self) -> Option<BossPhase> {
        match self {
            Question::Choice(q) => q.phase_id,
            Question::Fill(q) => q.phase_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Runs, answers, grading
// ---------------------------------------------------------------------------

/// One generated quiz run. Never stored in full: a run is a pure function of
/// `(content, unit_id, seed, run_id, options)` and is regenerated
/// byte-identically whenever an answer must be checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub run_id: String,
    pub unit_id: String,
    pub seed: u32,
    pub questions: Vec<Question>,
}

/// A submitted answer. For discrete-choice questions `choice` is the selected
/// option string. For structured-fill questions `payload` is the
/// authoritative `{slotKey: value}` object and `choice` is only a redundant
/// serialized summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub choice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDetail {
    pub question_id: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub total: usize,
    pub correct: usize,
    /// 0..=100, rounded.
    pub score: u32,
    pub details: Vec<GradeDetail>,
}

// ---------------------------------------------------------------------------
// Generation options
// ---------------------------------------------------------------------------

/// T1/T2/T3 composition for a regular run: character recognition,
/// vocabulary disambiguation, sentence-pattern fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mix {
    pub t1: usize,
    pub t2: usize,
    pub t3: usize,
}

impl Mix {
    pub fn total(self) -> usize {
        self.t1 + self.t2 + self.t3
    }
}

impl Default for Mix {
    fn default() -> Self {
        Mix { t1: 5, t2: 2, t3: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    pub unit_id: String,
    pub seed: u32,
    pub run_id: String,
    pub question_count: usize,
    pub choice_count: usize,
    /// `None` means the default composition (`Mix::default()`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix: Option<Mix>,
    /// Stage-based callers (narrative scenes that rely on question N being a
    /// specific archetype) pass `false` to keep bucket order stable.
    pub shuffle_questions: bool,
}

impl RunOptions {
    /// Options with the standard composition: 10 questions, 4 choices,
    /// default mix, shuffled.
    pub fn new(unit_id: impl Into<String>, seed: u32, run_id: impl Into<String>) -> Self {
        RunOptions {
            unit_id: unit_id.into(),
            seed,
            run_id: run_id.into(),
            question_count: Mix::default().total(),
            choice_count: 4,
            mix: None,
            shuffle_questions: true,
        }
    }
}

/// Options for a boss run. The composition is fixed by phase structure, so
/// only the question count is configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossRunOptions {
    pub unit_id: String,
    pub seed: u32,
    pub run_id: String,
    pub question_count: usize,
}

impl BossRunOptions {
    pub fn new(unit_id: impl Into<String>, seed: u32, run_id: impl Into<String>) -> Self {
        BossRunOptions {
            unit_id: unit_id.into(),
            seed,
            run_id: run_id.into(),
            question_count: 6,
        }
    }
}
