//! Boss-run generation: a fixed three-phase battle.
//!
//! Phase structure (two questions each): `minion1` fast recall (pinyin +
//! word spelling), `minion2` harder disambiguation (polyphone + confusing),
//! `boss` synthesis (one reading question + one sentence-pattern fill). When
//! a unit lacks the specialized item types that structure expects, the run
//! falls back to a poem-blank + reading mix instead.

use tracing::debug;

use crate::quiz_engine::archetypes::{
    char_recall, confusing, poem_blank, polyphone, reading, sentence_fill, word_spelling,
};
use crate::quiz_engine::content::{ContentSchema, Passage, PassageQuestion};
use crate::quiz_engine::error::QuizError;
use crate::quiz_engine::models::{BossPhase, BossRunOptions, Question, Run};
use crate::quiz_engine::rng::QuizRng;

/// Generates a boss run. On the structured path a unit without reading
/// passages skips the reading question, so the run can come back one
/// question short of `options.question_count`.
pub fn generate_boss_run(
    content: &ContentSchema,
    options: &BossRunOptions,
) -> Result<Run, QuizError> {
    let unit = content.unit(&options.unit_id)?;
    let mut rng = QuizRng::new(options.seed);

    let chars = unit.char_items();
    let word_entries = unit.word_entries();
    let polyphones = unit.polyphones();
    let confusing_items = unit.confusing_items();
    let patterns = unit.sentence_patterns();
    let poems = unit.poems();
    let passages = unit.passages();

    let has_phase_material = !chars.is_empty()
        && !word_entries.is_empty()
        && !polyphones.is_empty()
        && !confusing_items.is_empty()
        && !patterns.is_empty();

    debug!(
        unit_id = %options.unit_id,
        seed = options.seed,
        run_id = %options.run_id,
        phased = has_phase_material,
        "generating boss run"
    );

    let mut questions: Vec<Question> = if has_phase_material {
        let mut qs = Vec::with_capacity(6);

        let char_item = chars[rng.next_index(chars.len())];
        qs.push(char_recall::build_boss_pinyin(&mut rng, char_item, &chars));

        let word = word_entries[rng.next_index(word_entries.len())];
        qs.push(word_spelling::build_boss_word_spelling(
            &mut rng,
            word,
            &word_entries,
        ));

        let poly = polyphones[rng.next_index(polyphones.len())];
        qs.push(polyphone::build_boss_polyphone(&mut rng, poly)?);

        let conf = confusing_items[rng.next_index(confusing_items.len())];
        qs.push(confusing::build_boss_confusing(&mut rng, conf));

        if let Some(q) = pick_boss_reading(&mut rng, &passages) {
            qs.push(q);
        }

        let pattern = patterns[rng.next_index(patterns.len())];
        qs.push(sentence_fill::build_boss_sentence_fill(&mut rng, pattern)?);

        qs
    } else {
        // Fallback: up to 2 poem blanks + up to 4 reading questions.
        let mut qs = Vec::new();

        for i in 0..poems.len().min(2) {
            let poem = poems[rng.next_index(poems.len())];
            let phase = if i < 1 {
                BossPhase::Minion1
            } else {
                BossPhase::Minion2
            };
            qs.push(poem_blank::build_poem_blank(&mut rng, poem, phase)?);
        }

        let reading_pool = passage_questions(&passages);
        for i in 0..reading_pool.len().min(4) {
            let (passage, question) = rng.shuffle(&reading_pool)[i];
            qs.push(reading::build_reading(
                &mut rng,
                passage,
                question,
                BossPhase::Boss,
            ));
        }

        if qs.is_empty() {
            return Err(QuizError::InsufficientContent {
                category: "boss fallback (poem/reading)",
                have: 0,
                need: options.question_count,
            });
        }

        rng.shuffle(&qs)
    };

    questions.truncate(options.question_count);
    for (index, q) in questions.iter_mut().enumerate() {
        q.set_question_id(format!("{}:{}", options.run_id, index + 1));
    }

    Ok(Run {
        run_id: options.run_id.clone(),
        unit_id: options.unit_id.clone(),
        seed: options.seed,
        questions,
    })
}

fn passage_questions<'a>(
    passages: &[&'a Passage],
) -> Vec<(&'a Passage, &'a PassageQuestion)> {
    passages
        .iter()
        .flat_map(|p| p.questions.iter().map(move |q| (*p, q)))
        .collect()
}

/// One reading question drawn uniformly (via shuffle) over every passage
/// sub-question in the unit; `None` when the unit has no passages.
fn pick_boss_reading(rng: &mut QuizRng, passages: &[&Passage]) -> Option<Question> {
    let pool = passage_questions(passages);
    if pool.is_empty() {
        return None;
    }
    let (passage, question) = rng.shuffle(&pool)[0];
    Some(reading::build_reading(rng, passage, question, BossPhase::Boss))
}
