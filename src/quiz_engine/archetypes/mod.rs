//! One builder module per question family, in the spirit of a drill
//! generator's per-topic modules: each takes the shared RNG plus the content
//! items it needs and returns a fully-formed [`Question`] with a placeholder
//! id (final ids are assigned by the run generators after ordering).
//!
//! | Module | Archetypes |
//! |--------|------------|
//! | `char_recall` | pinyin-from-character, character-from-pinyin |
//! | `polyphone` | polyphone reading in context |
//! | `syn_ant` | synonym / antonym choice |
//! | `confusing` | confusing-words disambiguation |
//! | `word_spelling` | pinyin-to-word spelling |
//! | `word_pattern` | word-structure matching |
//! | `sentence_fill` | sentence-pattern slot fill |
//! | `poem_blank` | poem line blank (boss) |
//! | `reading` | passage MCQ / true-false (boss) |

pub mod char_recall;
pub mod confusing;
pub mod poem_blank;
pub mod polyphone;
pub mod reading;
pub mod sentence_fill;
pub mod syn_ant;
pub mod word_pattern;
pub mod word_spelling;
