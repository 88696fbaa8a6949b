//! Regular-run generation: single entry point `generate_regular_run`.
//!
//! The requested count is partitioned into three buckets — T1 character
//! recall, T2 vocabulary disambiguation, T3 sentence-pattern fill — built in
//! that order, optionally reshuffled as a whole, and then re-numbered. The
//! whole pipeline is a pure function of `(content, options)`: the same seed
//! always yields the same run, which is what lets callers regenerate a run
//! to check answers instead of persisting it.

use tracing::debug;

use crate::quiz_engine::archetypes::{
    char_recall, confusing, polyphone, sentence_fill, syn_ant, word_pattern, word_spelling,
};
use crate::quiz_engine::content::{
    ConfusingItem, ContentSchema, PolyphoneItem, SynAntItem, WordEntry, WordPattern,
};
use crate::quiz_engine::error::QuizError;
use crate::quiz_engine::helpers::word_candidates;
use crate::quiz_engine::models::{Question, Run, RunOptions};
use crate::quiz_engine::rng::QuizRng;

/// One entry of the mixed T2 candidate pool. The pool is shuffled once and
/// then walked round-robin, so a unit with few vocabulary items still fills
/// its T2 bucket (with repeats) rather than under-delivering.
#[derive(Clone, Copy)]
enum VocabItem<'a> {
    Polyphone(&'a PolyphoneItem),
    SynAnt(&'a SynAntItem),
    Confusing(&'a ConfusingItem),
    Word(&'a WordEntry),
    Pattern(&'a WordPattern),
}

pub fn generate_regular_run(
    content: &ContentSchema,
    options: &RunOptions,
) -> Result<Run, QuizError> {
    let unit = content.unit(&options.unit_id)?;
    let mut rng = QuizRng::new(options.seed);

    let char_items = unit.char_items();
    let polyphones = unit.polyphones();
    let syn_ant_items = unit.syn_ant_items();
    let confusing_items = unit.confusing_items();
    let word_entries = unit.word_entries();
    let word_patterns = unit.word_patterns();
    let patterns = unit.sentence_patterns();

    let mix = options.mix.unwrap_or_default();
    if mix.total() != options.question_count {
        return Err(QuizError::InvalidMix {
            mix_total: mix.total(),
            question_count: options.question_count,
        });
    }
    if char_items.len() < mix.t1 {
        return Err(QuizError::InsufficientContent {
            category: "character",
            have: char_items.len(),
            need: mix.t1,
        });
    }
    if patterns.is_empty() && mix.t3 > 0 {
        return Err(QuizError::InsufficientContent {
            category: "sentence pattern",
            have: 0,
            need: mix.t3,
        });
    }

    debug!(
        unit_id = %options.unit_id,
        seed = options.seed,
        run_id = %options.run_id,
        question_count = options.question_count,
        "generating regular run"
    );

    let mut questions: Vec<Question> = Vec::with_capacity(options.question_count);

    // T1: alternate pinyin-from-character and character-from-pinyin.
    let t1_items = rng.shuffle(&char_items);
    for (i, item) in t1_items.iter().copied().take(mix.t1).enumerate() {
        let q = if i % 2 == 0 {
            char_recall::build_pinyin(&mut rng, item, &char_items, options.choice_count)
        } else {
            char_recall::build_hanzi_by_pinyin(&mut rng, item, &char_items, options.choice_count)
        };
        questions.push(q);
    }

    // T2: one mixed pool over every disambiguation/spelling/pattern item.
    let mut vocab_pool: Vec<VocabItem> = Vec::new();
    vocab_pool.extend(polyphones.iter().copied().map(VocabItem::Polyphone));
    vocab_pool.extend(syn_ant_items.iter().copied().map(VocabItem::SynAnt));
    vocab_pool.extend(confusing_items.iter().copied().map(VocabItem::Confusing));
    vocab_pool.extend(word_entries.iter().copied().map(VocabItem::Word));
    vocab_pool.extend(word_patterns.iter().copied().map(VocabItem::Pattern));
    let vocab_pool = rng.shuffle(&vocab_pool);

    if mix.t2 > 0 && vocab_pool.is_empty() {
        return Err(QuizError::InsufficientContent {
            category: "vocabulary",
            have: 0,
            need: mix.t2,
        });
    }

    let syn_ant_candidates = word_candidates(&char_items, &syn_ant_items);

    for i in 0..mix.t2 {
        match vocab_pool[i % vocab_pool.len()] {
            VocabItem::Polyphone(item) => {
                questions.push(polyphone::build_polyphone(&mut rng, item)?);
            }
            VocabItem::SynAnt(item) => {
                questions.push(syn_ant::build_syn_ant(&mut rng, item, &syn_ant_candidates)?);
            }
            VocabItem::Confusing(item) => {
                let pool: Vec<String> = word_entries
                    .iter()
                    .map(|w| w.word.clone())
                    .filter(|w| *w != item.correct)
                    .collect();
                questions.push(confusing::build_confusing(
                    &mut rng,
                    item,
                    &pool,
                    options.choice_count,
                ));
            }
            VocabItem::Word(item) => {
                questions.push(word_spelling::build_word_spelling(
                    &mut rng,
                    item,
                    &word_entries,
                    options.choice_count,
                ));
            }
            VocabItem::Pattern(item) => {
                questions.push(word_pattern::build_word_pattern_match(
                    &mut rng,
                    item,
                    &word_patterns,
                    options.choice_count,
                )?);
            }
        }
    }

    // T3: each question draws its own pattern uniformly.
    for _ in 0..mix.t3 {
        let pattern = patterns[rng.next_index(patterns.len())];
        questions.push(sentence_fill::build_sentence_fill(&mut rng, pattern)?);
    }

    let mut ordered = if options.shuffle_questions {
        rng.shuffle(&questions)
    } else {
        questions
    };

    // Ids follow the final position, not generation order, so they stay
    // ordinal whatever the internal composition was.
    for (index, q) in ordered.iter_mut().enumerate() {
        q.set_question_id(format!("{}:{}", options.run_id, index + 1));
    }

    Ok(Run {
        run_id: options.run_id.clone(),
        unit_id: options.unit_id.clone(),
        seed: options.seed,
        questions: ordered,
    })
}
