//! End-to-end demo of the quiz engine.
//!
//! Run with: `cargo run --example demo`
//!
//! This example shows how `hanzi_drill_gen` works end to end:
//!
//! 1. **Regular run** — generate a 10-question run for a unit, print the
//!    client view (answer keys stripped), answer every question, grade the
//!    run, and render review explanations.
//!
//! 2. **Determinism** — regenerate the same run from the same inputs and
//!    confirm it is identical, which is what lets a server check answers
//!    without ever storing the run.
//!
//! 3. **Boss battle** — a three-phase run (two minions, then the boss), plus
//!    the reward math a host would apply afterwards.

use serde_json::json;

use hanzi_drill_gen::quiz_engine::rewards::{
    level_for_xp, title_for_level, xp_for_answer,
};
use hanzi_drill_gen::{
    explain_question, generate_boss_run, generate_regular_run, grade_run, passed,
    run_to_client_json, score_to_stars, Answer, BossRunOptions, ContentSchema, Question,
    Run, RunOptions,
};

/// A one-unit content pack, inlined so the demo has no file dependencies.
/// Real deployments deserialize the full per-term pack instead.
fn demo_content() -> ContentSchema {
    serde_json::from_value(json!({
        "schemaVersion": 1,
        "subject": "chinese",
        "grade": 2,
        "term": "上",
        "units": [{
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
                        { "itemId": "c5", "hanzi": "林", "pinyin": "lín", "words": ["森林", "树林"] },
                        { "itemId": "c6", "hanzi": "就", "pinyin": "jiù", "words": ["就是"] }
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
                        {
                            "kind": "confusing",
                            "itemId": "d3",
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
                    "patterns": [{
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
                    }]
                },
                {
                    "type": "word_list",
                    "sectionId": "u1_words",
                    "title": "词语表",
                    "items": [
                        { "itemId": "w1", "word": "森林", "pinyin": "sēn lín" },
                        { "itemId": "w2", "word": "朋友", "pinyin": "péng you" },
                        { "itemId": "w3", "word": "故事", "pinyin": "gù shi" },
                        { "itemId": "w4", "word": "太阳", "pinyin": "tài yáng" }
                    ]
                },
                {
                    "type": "reading_comprehension",
                    "sectionId": "u1_read",
                    "title": "阅读",
                    "passages": [{
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
                    }]
                }
            ]
        }]
    }))
    .expect("demo content is well-formed")
}

/// Answer every question with its own key, as a perfect player would.
fn perfect_answers(run: &Run) -> Vec<Answer> {
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

fn main() {
    let content = demo_content();

    // ── Regular run ──────────────────────────────────────────────────────────
    println!();
    println!("══ Regular run: u1, seed 42 ══");
    println!();

    let options = RunOptions::new("u1", 42, "r1");
    let run = generate_regular_run(&content, &options).expect("u1 has enough material");

    // What the player actually receives — no answer keys.
    let client = run_to_client_json(&run);
    for q in client["questions"].as_array().unwrap() {
        println!("  {}  [{}]", q["questionId"].as_str().unwrap(), q["type"].as_str().unwrap());
        println!("      {}", q["prompt"].as_str().unwrap().lines().next().unwrap_or(""));
    }

    // Grade a perfect submission.
    let answers = perfect_answers(&run);
    let graded = grade_run(&run.questions, &answers);
    println!();
    println!(
        "  Graded: {}/{}  score {}  stars {}  passed: {}",
        graded.correct,
        graded.total,
        graded.score,
        score_to_stars(graded.score),
        passed(graded.score)
    );

    // Review text for the first two questions.
    println!();
    for (q, a) in run.questions.iter().zip(answers.iter()).take(2) {
        println!("  {} review:", q.question_id());
        for line in explain_question(&content, "u1", q, Some(a)).lines() {
            println!("      {}", line);
        }
    }

    // ── Determinism ──────────────────────────────────────────────────────────
    println!();
    println!("══ Determinism ══");
    println!();
    let again = generate_regular_run(&content, &options).unwrap();
    println!("  Regenerated run identical: {}", run == again);

    // ── Boss battle ──────────────────────────────────────────────────────────
    println!();
    println!("══ Boss battle: u1, seed 7 ══");
    println!();

    let boss = generate_boss_run(&content, &BossRunOptions::new("u1", 7, "b1"))
        .expect("u1 supports a structured boss run");
    for q in &boss.questions {
        let phase = q.phase_id().map(|p| p.to_string()).unwrap_or_default();
        println!("  {}  [{}]", q.question_id(), phase);
        println!("      {}", q.prompt().lines().next().unwrap_or(""));
    }

    // Reward math the host applies after a finished run.
    println!();
    let mut xp = 0u32;
    for detail in &graded.details {
        xp += xp_for_answer(detail.is_correct);
    }
    let level = level_for_xp(xp);
    println!("  XP earned: {}  level {}  title: {}", xp, level, title_for_level(level));
}
