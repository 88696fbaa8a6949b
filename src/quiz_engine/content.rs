//! Content bank: the versioned, read-only tree the generators draw from.
//!
//! Loaded once per process (typically via `serde_json::from_str`) and treated
//! as immutable afterwards, so concurrent reads need no locking. The engine
//! never mutates it — every accessor below is a pure filter/flat-map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quiz_engine::error::QuizError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSchema {
    pub schema_version: u32,
    pub subject: String,
    pub grade: u32,
    pub term: String,
    pub units: Vec<Unit>,
}

impl ContentSchema {
    /// Look up a unit by id. Absence is a hard error, never a default:
    /// a dangling `unit_id` means the caller and the content bank disagree.
    pub fn unit(&self, unit_id: &str) -> Result<&Unit, QuizError> {
        self.units
            .iter()
            .find(|u| u.unit_id == unit_id)
            .ok_or_else(|| QuizError::UnknownUnit {
                unit_id: unit_id.to_string(),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub unit_id: String,
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Section {
    CharTable(CharTableSection),
    WordDisambiguation(WordDisambiguationSection),
    SentencePattern(SentencePatternSection),
    Poem(PoemSection),
    ReadingComprehension(ReadingSection),
    WordList(WordListSection),
    WordPatterns(WordPatternsSection),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharTableSection {
    pub section_id: String,
    pub title: String,
    pub items: Vec<CharItem>,
}

/// One character entry: the hanzi, its reading, and associated words used
/// both as distractor material and in explanations (组词).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharItem {
    pub item_id: String,
    pub hanzi: String,
    pub pinyin: String,
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDisambiguationSection {
    pub section_id: String,
    pub title: String,
    pub items: Vec<DisambiguationItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisambiguationItem {
    Polyphone(PolyphoneItem),
    SynAnt(SynAntItem),
    Confusing(ConfusingItem),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolyphoneItem {
    pub item_id: String,
    pub hanzi: String,
    pub options: Vec<PolyphoneOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolyphoneOption {
    pub pinyin: String,
    pub example: String,
    /// Optional full sentence giving the reading its context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynAntItem {
    pub item_id: String,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antonym: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusingItem {
    pub item_id: String,
    pub prompt: String,
    pub correct: String,
    #[serde(default)]
    pub distractors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentencePatternSection {
    pub section_id: String,
    pub title: String,
    pub patterns: Vec<SentencePattern>,
}

/// A sentence template with named slots, e.g. `"{a}一边{v1}，一边{v2}。"`,
/// plus a per-slot word bank to fill them from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentencePattern {
    pub pattern_id: String,
    pub name: String,
    pub template: String,
    pub slots: Vec<PatternSlot>,
    pub word_bank: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSlot {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemSection {
    pub section_id: String,
    pub title: String,
    pub poems: Vec<Poem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poem {
    pub poem_id: String,
    pub title: String,
    pub author: String,
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub glossary: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSection {
    pub section_id: String,
    pub title: String,
    pub passages: Vec<Passage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    pub passage_id: String,
    pub title: String,
    pub text: String,
    pub questions: Vec<PassageQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassageQuestion {
    Mcq(PassageMcq),
    TrueFalse(PassageTrueFalse),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassageMcq {
    pub question_id: String,
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_choice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassageTrueFalse {
    pub question_id: String,
    pub prompt: String,
    pub answer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordListSection {
    pub section_id: String,
    pub title: String,
    pub items: Vec<WordEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub item_id: String,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPatternsSection {
    pub section_id: String,
    pub title: String,
    pub patterns: Vec<WordPattern>,
}

/// A word-structure pattern (e.g. AABB) with example words that fit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPattern {
    pub pattern_id: String,
    pub pattern_type: String,
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Typed extraction helpers
// ---------------------------------------------------------------------------
//
// Each returns the matching items flattened in section order, then item
// order. A unit with zero sections of a kind yields an empty Vec — only a
// missing unit is an error (see `ContentSchema::unit`).

impl Unit {
    pub fn char_items(&self) -> Vec<&CharItem> {
        self.sections
            .iter()
            .flat_map(|s| match s {
                Section::CharTable(sec) => sec.items.as_slice(),
                _ => &[],
            })
            .collect()
    }

    pub fn polyphones(&self) -> Vec<&PolyphoneItem> {
        self.disambiguation_items()
            .filter_map(|it| match it {
                DisambiguationItem::Polyphone(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn syn_ant_items(&self) -> Vec<&SynAntItem> {
        self.disambiguation_items()
            .filter_map(|it| match it {
                DisambiguationItem::SynAnt(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn confusing_items(&self) -> Vec<&ConfusingItem> {
        self.disambiguation_items()
            .filter_map(|it| match it {
                DisambiguationItem::Confusing(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn sentence_patterns(&self) -> Vec<&SentencePattern> {
        self.sections
            .iter()
            .flat_map(|s| match s {
                Section::SentencePattern(sec) => sec.patterns.as_slice(),
                _ => &[],
            })
            .collect()
    }

    pub fn poems(&self) -> Vec<&Poem> {
        self.sections
            .iter()
            .flat_map(|s| match s {
                Section::Poem(sec) => sec.poems.as_slice(),
                _ => &[],
            })
            .collect()
    }

    pub fn passages(&self) -> Vec<&Passage> {
        self.sections
            .iter()
            .flat_map(|s| match s {
                Section::ReadingComprehension(sec) => sec.passages.as_slice(),
                _ => &[],
            })
            .collect()
    }

    pub fn word_entries(&self) -> Vec<&WordEntry> {
        self.sections
            .iter()
            .flat_map(|s| match s {
                Section::WordList(sec) => sec.items.as_slice(),
                _ => &[],
            })
            .collect()
    }

    pub fn word_patterns(&self) -> Vec<&WordPattern> {
        self.sections
            .iter()
            .flat_map(|s| match s {
                Section::WordPatterns(sec) => sec.patterns.as_slice(),
                _ => &[],
            })
            .collect()
    }

    fn disambiguation_items(&self) -> impl Iterator<Item = &DisambiguationItem> {
        self.sections.iter().flat_map(|s| match s {
            Section::WordDisambiguation(sec) => sec.items.as_slice(),
            _ => &[],
        })
    }
}
