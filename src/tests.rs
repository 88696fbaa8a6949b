//! Unit tests for the `hanzi_drill_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same inputs → identical run; different seeds → varied output |
//! | Structural | Correct choice always offered; choices deduplicated; ordinal ids |
//! | Fixed scenario | The stable 5-question check-flow run (`u1`, seed 42, `r1`) |
//! | Grading | All-correct → 100, none → 0; fill payloads, full vs partial |
//! | Boss runs | Structured phase order; poem/reading fallback; empty-unit error |
//! | Errors | Unknown unit, bad mix, over-sized count, empty slot bank, malformed items |
//! | Review | Explanations non-empty and idempotent; client payload hides keys |

use serde_json::json;

use crate::quiz_engine::models::FillQuestion;
use crate::quiz_engine::{
    explain_question, generate_boss_run, generate_regular_run, grade_run, passed,
    run_to_client_json, score_to_stars, Answer, BossPhase, BossRunOptions, ChoiceArchetype,
    ContentSchema, Mix, Question, QuizError, Run, RunOptions,
};

// ── fixture ──────────────────────────────────────────────────────────────────

/// A small but complete content pack: `u1` has every section kind, `u2` only
/// poems and reading (forces the boss fallback), `u3` only characters.
fn content() -> ContentSchema {
    serde_json::from_value(json!({
        "schemaVersion": 1,
        "subject": "chinese",
        "grade": 2,
        "term": "上",
        "units": [
            {
                "unitId": "u1",
                "title": "小狐狸的线索",
                "sections": [
                    {
                        "type": "char_table",
                        "sectionId": "u1_chars",
                        "title": "识字表",
                        "items": [
                            { "itemId": "c1", "hanzi": "狐", "pinyin": "hú", "words": ["狐狸"] },
                            { "itemId": "c2", "hanzi": "狸", "pinyin": "lí", "words": ["狐狸"] },
                            { "itemId": "c3", "hanzi": "鸦", "pinyin": "yā", "words": ["乌鸦"] },
                            { "itemId": "c4", "hanzi": "乌", "pinyin": "wū", "words": ["乌鸦"] },
                            { "itemId": "c5", "hanzi": "就", "pinyin": "jiù", "words": ["就是"] },
                            { "itemId": "c6", "hanzi": "林", "pinyin": "lín", "words": ["森林", "树林"] }
                        ]
                    },
                    {
                        "type": "word_disambiguation",
                        "sectionId": "u1_dis",
                        "title": "词语辨析",
                        "items": [
                            {
                                "kind": "polyphone",
                                "itemId": "d1",
                                "hanzi": "长",
                                "options": [
                                    { "pinyin": "zhǎng", "example": "长高", "sentence": "小树长高了。" },
                                    { "pinyin": "cháng", "example": "长江" }
                                ]
                            },
                            { "kind": "syn_ant", "itemId": "d2", "word": "高兴", "synonym": "开心" },
                            { "kind": "syn_ant", "itemId": "d3", "word": "明白", "antonym": "糊涂" },
                            {
                                "kind": "confusing",
                                "itemId": "d4",
                                "prompt": "我（　）家里看书。",
                                "correct": "在",
                                "distractors": ["再"],
                                "rule": "“在”表示位置，“再”表示又一次。",
                                "examples": ["我在家。", "明天再来。"]
                            }
                        ]
                    },
                    {
                        "type": "sentence_pattern",
                        "sectionId": "u1_sent",
                        "title": "句型练习",
                        "patterns": [
                            {
                                "patternId": "p1",
                                "name": "谁在做什么",
                                "template": "{a}在{v1}。",
                                "slots": [
                                    { "key": "a", "label": "谁" },
                                    { "key": "v1", "label": "做什么" }
                                ],
                                "wordBank": {
                                    "a": ["狐狸", "小马", "小鸟", "乌鸦"],
                                    "v1": ["跑", "跳", "飞", "唱歌"]
                                }
                            }
                        ]
                    },
                    {
                        "type": "word_list",
                        "sectionId": "u1_words",
                        "title": "词语表",
                        "items": [
                            { "itemId": "w1", "word": "森林", "pinyin": "sēn lín" },
                            { "itemId": "w2", "word": "朋友", "pinyin": "péng you" },
                            { "itemId": "w3", "word": "故事", "pinyin": "gù shi" },
                            { "itemId": "w4", "word": "太阳", "pinyin": "tài yáng" },
                            { "itemId": "w5", "word": "月亮", "pinyin": "yuè liang" }
                        ]
                    },
                    {
                        "type": "word_patterns",
                        "sectionId": "u1_wp",
                        "title": "词语结构",
                        "patterns": [
                            { "patternId": "wp1", "patternType": "AABB", "examples": ["高高兴兴", "开开心心", "明明白白"] },
                            { "patternId": "wp2", "patternType": "ABAB", "examples": ["研究研究", "打扫打扫"] }
                        ]
                    },
                    {
                        "type": "reading_comprehension",
                        "sectionId": "u1_read",
                        "title": "阅读",
                        "passages": [
                            {
                                "passageId": "r1",
                                "title": "小狐狸过河",
                                "text": "小狐狸想过河，河水很急。它找来一块木板，搭在两岸之间，小心地走了过去。",
                                "questions": [
                                    {
                                        "kind": "mcq",
                                        "questionId": "q1",
                                        "prompt": "小狐狸用什么过河？",
                                        "choices": ["木板", "小船", "石头", "绳子"],
                                        "correctChoice": "木板"
                                    },
                                    {
                                        "kind": "true_false",
                                        "questionId": "q2",
                                        "prompt": "河水很平静。",
                                        "answer": false
                                    }
                                ]
                            }
                        ]
                    }
                ]
            },
            {
                "unitId": "u2",
                "title": "古诗与阅读",
                "sections": [
                    {
                        "type": "poem",
                        "sectionId": "u2_poem",
                        "title": "古诗",
                        "poems": [
                            {
                                "poemId": "poem1",
                                "title": "登鹳雀楼",
                                "author": "王之涣",
                                "lines": ["白日依山尽", "黄河入海流", "欲穷千里目", "更上一层楼"],
                                "glossary": { "欲": "想要", "穷": "尽" },
                                "meaning": "只有站得高，才能看得远。"
                            }
                        ]
                    },
                    {
                        "type": "reading_comprehension",
                        "sectionId": "u2_read",
                        "title": "阅读",
                        "passages": [
                            {
                                "passageId": "r2",
                                "title": "乌鸦喝水",
                                "text": "乌鸦口渴了，找到一个瓶子。瓶里的水不多，它把小石子一颗一颗放进去，水慢慢升高了。",
                                "questions": [
                                    {
                                        "kind": "mcq",
                                        "questionId": "q1",
                                        "prompt": "乌鸦把什么放进瓶子？",
                                        "choices": ["小石子", "树枝", "泥土", "豆子"],
                                        "correctChoice": "小石子"
                                    },
                                    {
                                        "kind": "true_false",
                                        "questionId": "q2",
                                        "prompt": "乌鸦喝到了水。",
                                        "answer": true
                                    }
                                ]
                            }
                        ]
                    }
                ]
            },
            {
                "unitId": "u3",
                "title": "只有识字表",
                "sections": [
                    {
                        "type": "char_table",
                        "sectionId": "u3_chars",
                        "title": "识字表",
                        "items": [
                            { "itemId": "c1", "hanzi": "山", "pinyin": "shān", "words": ["高山"] },
                            { "itemId": "c2", "hanzi": "水", "pinyin": "shuǐ", "words": ["河水"] },
                            { "itemId": "c3", "hanzi": "火", "pinyin": "huǒ", "words": ["火苗"] },
                            { "itemId": "c4", "hanzi": "土", "pinyin": "tǔ", "words": ["泥土"] }
                        ]
                    }
                ]
            }
        ]
    }))
    .expect("fixture content must deserialize")
}

// ── helpers ──────────────────────────────────────────────────────────────────

/// Answers every question correctly: choice questions echo the key, fill
/// questions submit the full correct payload.
fn correct_answers(run: &Run) -> Vec<Answer> {
    run.questions
        .iter()
        .map(|q| match q {
            Question::Choice(c) => Answer {
                question_id: c.question_id.clone(),
                choice: c.correct_choice.clone(),
                payload: None,
            },
            Question::Fill(f) => Answer {
                question_id: f.question_id.clone(),
                choice: String::new(),
                payload: Some(json!(f.correct)),
            },
        })
        .collect()
}

fn wrong_answers(run: &Run) -> Vec<Answer> {
    run.questions
        .iter()
        .map(|q| Answer {
            question_id: q.question_id().to_string(),
            choice: "绝不正确".to_string(),
            payload: None,
        })
        .collect()
}

fn assert_question_integrity(q: &Question) {
    match q {
        Question::Choice(c) => {
            assert!(
                c.choices.contains(&c.correct_choice),
                "correct choice {:?} missing from {:?} ({})",
                c.correct_choice,
                c.choices,
                c.archetype
            );
            let mut sorted = c.choices.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), c.choices.len(), "duplicate choices in {:?}", c.choices);
            assert!(c.choices.len() >= 2, "need at least two choices, got {:?}", c.choices);
            assert!(!c.prompt.is_empty());
            assert!(!c.knowledge_refs.is_empty());
        }
        Question::Fill(f) => {
            for slot in &f.slots {
                assert!(
                    f.template.contains(&format!("{{{}}}", slot.key)),
                    "slot {} not in template {}",
                    slot.key,
                    f.template
                );
                let bank = f.word_bank.get(&slot.key).expect("bank for every slot");
                let correct = f.correct.get(&slot.key).expect("answer for every slot");
                assert!(bank.contains(correct), "bank {:?} missing {:?}", bank, correct);
            }
        }
    }
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_inputs_regenerate_the_identical_run() {
    let content = content();
    let options = RunOptions::new("u1", 42, "r1");
    let a = generate_regular_run(&content, &options).unwrap();
    let b = generate_regular_run(&content, &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_produce_different_runs() {
    let content = content();
    let a = generate_regular_run(&content, &RunOptions::new("u1", 1, "r1")).unwrap();
    let b = generate_regular_run(&content, &RunOptions::new("u1", 2, "r1")).unwrap();
    assert_ne!(a.questions, b.questions);
}

#[test]
fn boss_runs_are_deterministic_too() {
    let content = content();
    let options = BossRunOptions::new("u1", 7, "b1");
    let a = generate_boss_run(&content, &options).unwrap();
    let b = generate_boss_run(&content, &options).unwrap();
    assert_eq!(a, b);
}

// ── structural ───────────────────────────────────────────────────────────────

#[test]
fn every_question_offers_its_answer() {
    let content = content();
    for seed in [1u32, 42, 999, 0xDEAD_BEEF, 7] {
        let run = generate_regular_run(&content, &RunOptions::new("u1", seed, "r1")).unwrap();
        assert_eq!(run.questions.len(), 10);
        for q in &run.questions {
            assert_question_integrity(q);
        }
    }
}

#[test]
fn question_ids_are_ordinal_after_shuffling() {
    let content = content();
    let run = generate_regular_run(&content, &RunOptions::new("u1", 5, "r9")).unwrap();
    for (i, q) in run.questions.iter().enumerate() {
        assert_eq!(q.question_id(), format!("r9:{}", i + 1));
    }
}

// ── fixed scenario ───────────────────────────────────────────────────────────

/// The shape the answer-check flow regenerates: 5 questions, mix 2/2/1,
/// bucket order preserved. Ids and bucket layout must stay stable because
/// stored answers reference them.
#[test]
fn check_flow_run_has_stable_shape() {
    let content = content();
    let options = RunOptions {
        unit_id: "u1".to_string(),
        seed: 42,
        run_id: "r1".to_string(),
        question_count: 5,
        choice_count: 4,
        mix: Some(Mix { t1: 2, t2: 2, t3: 1 }),
        shuffle_questions: false,
    };
    let run = generate_regular_run(&content, &options).unwrap();

    assert_eq!(run.questions.len(), 5);
    let ids: Vec<&str> = run.questions.iter().map(|q| q.question_id()).collect();
    assert_eq!(ids, ["r1:1", "r1:2", "r1:3", "r1:4", "r1:5"]);

    // T1 alternates the two recall directions.
    match (&run.questions[0], &run.questions[1]) {
        (Question::Choice(a), Question::Choice(b)) => {
            assert_eq!(a.archetype, ChoiceArchetype::McqPinyin);
            assert_eq!(b.archetype, ChoiceArchetype::McqHanziByPinyin);
        }
        _ => panic!("T1 bucket must be choice questions"),
    }

    // With shuffling off, the single T3 fill question lands last.
    assert!(matches!(run.questions[4], Question::Fill(_)));

    // Regenerating yields the same run, so answers by id stay valid.
    let again = generate_regular_run(&content, &options).unwrap();
    assert_eq!(run, again);
}

// ── grading ──────────────────────────────────────────────────────────────────

#[test]
fn all_correct_scores_one_hundred() {
    let content = content();
    let run = generate_regular_run(&content, &RunOptions::new("u1", 42, "r1")).unwrap();
    let graded = grade_run(&run.questions, &correct_answers(&run));
    assert_eq!(graded.score, 100);
    assert_eq!(graded.correct, graded.total);
    assert_eq!(score_to_stars(graded.score), 3);
    assert!(passed(graded.score));
}

#[test]
fn all_wrong_scores_zero() {
    let content = content();
    let run = generate_regular_run(&content, &RunOptions::new("u1", 42, "r1")).unwrap();
    let graded = grade_run(&run.questions, &wrong_answers(&run));
    assert_eq!(graded.score, 0);
    assert_eq!(graded.correct, 0);
    assert!(!passed(graded.score));
}

fn find_fill(run: &Run) -> &FillQuestion {
    run.questions
        .iter()
        .find_map(|q| match q {
            Question::Fill(f) => Some(f),
            _ => None,
        })
        .expect("run contains a fill question")
}

#[test]
fn fill_grading_requires_every_slot() {
    let content = content();
    let run = generate_regular_run(&content, &RunOptions::new("u1", 42, "r1")).unwrap();
    let fill = find_fill(&run);

    let full = Answer {
        question_id: fill.question_id.clone(),
        choice: String::new(),
        payload: Some(json!(fill.correct)),
    };
    let graded = grade_run(std::slice::from_ref(&Question::Fill(fill.clone())), &[full]);
    assert!(graded.details[0].is_correct);

    let mut partial = fill.correct.clone();
    let dropped = partial.keys().next().unwrap().clone();
    partial.remove(&dropped);
    let missing = Answer {
        question_id: fill.question_id.clone(),
        choice: String::new(),
        payload: Some(json!(partial)),
    };
    let graded = grade_run(std::slice::from_ref(&Question::Fill(fill.clone())), &[missing]);
    assert!(!graded.details[0].is_correct);
}

// ── boss runs ────────────────────────────────────────────────────────────────

#[test]
fn structured_boss_run_walks_three_phases() {
    let content = content();
    let run = generate_boss_run(&content, &BossRunOptions::new("u1", 11, "b1")).unwrap();
    assert_eq!(run.questions.len(), 6);

    let phases: Vec<BossPhase> = run
        .questions
        .iter()
        .map(|q| q.phase_id().expect("boss questions carry a phase"))
        .collect();
    assert_eq!(
        phases,
        [
            BossPhase::Minion1,
            BossPhase::Minion1,
            BossPhase::Minion2,
            BossPhase::Minion2,
            BossPhase::Boss,
            BossPhase::Boss,
        ]
    );

    // The finale is always the sentence fill.
    assert!(matches!(run.questions[5], Question::Fill(_)));
    for q in &run.questions {
        assert_question_integrity(q);
    }
}

#[test]
fn boss_fallback_uses_poems_and_reading() {
    let content = content();
    let run = generate_boss_run(&content, &BossRunOptions::new("u2", 3, "b2")).unwrap();
    assert!(!run.questions.is_empty());
    assert!(run.questions.len() <= 6);

    for q in &run.questions {
        let Question::Choice(c) = q else {
            panic!("fallback runs contain no fill questions");
        };
        assert!(
            matches!(
                c.archetype,
                ChoiceArchetype::PoemBlank
                    | ChoiceArchetype::ReadingMcq
                    | ChoiceArchetype::ReadingTrueFalse
            ),
            "unexpected fallback archetype {}",
            c.archetype
        );
        assert!(c.phase_id.is_some());
        assert_question_integrity(q);
    }
}

#[test]
fn boss_run_fails_without_any_material() {
    let content = content();
    let err = generate_boss_run(&content, &BossRunOptions::new("u3", 1, "b3")).unwrap_err();
    assert!(matches!(err, QuizError::InsufficientContent { .. }));
}

// ── errors ───────────────────────────────────────────────────────────────────

#[test]
fn unknown_unit_is_an_error() {
    let content = content();
    let err = generate_regular_run(&content, &RunOptions::new("u99", 1, "r1")).unwrap_err();
    match err {
        QuizError::UnknownUnit { unit_id } => assert_eq!(unit_id, "u99"),
        other => panic!("expected UnknownUnit, got {other}"),
    }
}

#[test]
fn mix_must_sum_to_question_count() {
    let content = content();
    let mut options = RunOptions::new("u1", 1, "r1");
    options.question_count = 7;
    let err = generate_regular_run(&content, &options).unwrap_err();
    assert!(matches!(err, QuizError::InvalidMix { mix_total: 10, question_count: 7 }));
}

#[test]
fn oversized_request_reports_insufficient_content() {
    let content = content();
    let mut options = RunOptions::new("u1", 1, "r1");
    options.question_count = 50;
    options.mix = Some(Mix { t1: 40, t2: 5, t3: 5 });
    let err = generate_regular_run(&content, &options).unwrap_err();
    match err {
        QuizError::InsufficientContent { category, have, need } => {
            assert_eq!(category, "character");
            assert_eq!(have, 6);
            assert_eq!(need, 40);
        }
        other => panic!("expected InsufficientContent, got {other}"),
    }
}

/// Units with content-authoring defects: an empty per-slot word bank, a
/// polyphone with a single reading, a syn/ant entry with neither relation.
fn broken_content() -> ContentSchema {
    serde_json::from_value(json!({
        "schemaVersion": 1,
        "subject": "chinese",
        "grade": 2,
        "term": "上",
        "units": [
            {
                "unitId": "bad_slot",
                "title": "空词库",
                "sections": [{
                    "type": "sentence_pattern",
                    "sectionId": "s1",
                    "title": "句型练习",
                    "patterns": [{
                        "patternId": "p_bad",
                        "name": "谁在做什么",
                        "template": "{a}在{v1}。",
                        "slots": [
                            { "key": "a", "label": "谁" },
                            { "key": "v1", "label": "做什么" }
                        ],
                        "wordBank": { "a": ["狐狸"], "v1": [] }
                    }]
                }]
            },
            {
                "unitId": "bad_poly",
                "title": "单音多音字",
                "sections": [{
                    "type": "word_disambiguation",
                    "sectionId": "s1",
                    "title": "词语辨析",
                    "items": [{
                        "kind": "polyphone",
                        "itemId": "d_bad",
                        "hanzi": "长",
                        "options": [
                            { "pinyin": "zhǎng", "example": "长高" }
                        ]
                    }]
                }]
            },
            {
                "unitId": "bad_syn",
                "title": "无配对词",
                "sections": [{
                    "type": "word_disambiguation",
                    "sectionId": "s1",
                    "title": "词语辨析",
                    "items": [{
                        "kind": "syn_ant",
                        "itemId": "d_bad",
                        "word": "高兴"
                    }]
                }]
            }
        ]
    }))
    .expect("broken fixture must deserialize")
}

/// Options targeting a single bucket, so one defective item is the only
/// thing generation can draw.
fn single_bucket_options(unit_id: &str, mix: Mix) -> RunOptions {
    RunOptions {
        unit_id: unit_id.to_string(),
        seed: 1,
        run_id: "r1".to_string(),
        question_count: mix.total(),
        choice_count: 4,
        mix: Some(mix),
        shuffle_questions: false,
    }
}

#[test]
fn empty_slot_bank_fails_generation() {
    let content = broken_content();
    let options = single_bucket_options("bad_slot", Mix { t1: 0, t2: 0, t3: 1 });
    let err = generate_regular_run(&content, &options).unwrap_err();
    match err {
        QuizError::EmptySlotPool { pattern_id, slot } => {
            assert_eq!(pattern_id, "p_bad");
            assert_eq!(slot, "v1");
        }
        other => panic!("expected EmptySlotPool, got {other}"),
    }
}

#[test]
fn polyphone_with_one_reading_is_malformed() {
    let content = broken_content();
    let options = single_bucket_options("bad_poly", Mix { t1: 0, t2: 1, t3: 0 });
    let err = generate_regular_run(&content, &options).unwrap_err();
    match err {
        QuizError::MalformedItem { item_id, .. } => assert_eq!(item_id, "d_bad"),
        other => panic!("expected MalformedItem, got {other}"),
    }
}

#[test]
fn syn_ant_without_either_relation_is_malformed() {
    let content = broken_content();
    let options = single_bucket_options("bad_syn", Mix { t1: 0, t2: 1, t3: 0 });
    let err = generate_regular_run(&content, &options).unwrap_err();
    match err {
        QuizError::MalformedItem { item_id, .. } => assert_eq!(item_id, "d_bad"),
        other => panic!("expected MalformedItem, got {other}"),
    }
}

// ── review ───────────────────────────────────────────────────────────────────

#[test]
fn explanations_are_nonempty_and_idempotent() {
    let content = content();
    let run = generate_regular_run(&content, &RunOptions::new("u1", 42, "r1")).unwrap();
    let answers = correct_answers(&run);

    for (q, a) in run.questions.iter().zip(answers.iter()) {
        let first = explain_question(&content, "u1", q, Some(a));
        let second = explain_question(&content, "u1", q, Some(a));
        assert!(!first.is_empty(), "empty explanation for {}", q.question_id());
        assert_eq!(first, second);
    }

    let boss = generate_boss_run(&content, &BossRunOptions::new("u2", 3, "b2")).unwrap();
    for q in &boss.questions {
        assert!(!explain_question(&content, "u2", q, None).is_empty());
    }
}

#[test]
fn client_payload_never_leaks_answer_keys() {
    let content = content();
    for (unit, seed) in [("u1", 42u32), ("u2", 3)] {
        let run = generate_boss_run(&content, &BossRunOptions::new(unit, seed, "b1")).unwrap();
        let text = run_to_client_json(&run).to_string();
        assert!(!text.contains("correctChoice"), "leak in {unit}");
        assert!(!text.contains("\"correct\""), "leak in {unit}");
    }

    let run = generate_regular_run(&content, &RunOptions::new("u1", 42, "r1")).unwrap();
    let payload = run_to_client_json(&run);
    assert_eq!(payload["runId"], "r1");
    assert_eq!(payload["questions"].as_array().unwrap().len(), 10);
}
