use std::collections::HashMap;

use crate::{
    models::{ClassicResult, Letter, Question, TraitResult},
    names,
};

/// Tally one answer per question into rounded percentages per letter.
pub fn classic_percentages(answers: &HashMap<i64, Letter>) -> ClassicResult {
    let total = answers.len();
    if total == 0 {
        return ClassicResult::default();
    }

    let mut counts = [0usize; 4];
    for letter in answers.values() {
        counts[letter.index()] += 1;
    }

    let pct = |letter: Letter| {
        ((counts[letter.index()] as f64 / total as f64) * 100.0).round() as i64
    };

    ClassicResult {
        a_pct: pct(Letter::A),
        b_pct: pct(Letter::B),
        c_pct: pct(Letter::C),
        d_pct: pct(Letter::D),
    }
}

/// Resolve the chosen option texts, in pool order, into strong and weak lists.
///
/// Questions before [`names::STRONG_TRAIT_COUNT`] feed `strong`, the rest feed
/// `weak`. Questions without a recorded answer contribute nothing.
pub fn trait_lists(questions: &[Question], answers: &HashMap<i64, Letter>) -> TraitResult {
    let mut result = TraitResult::default();

    for (idx, question) in questions.iter().enumerate() {
        let Some(letter) = answers.get(&question.id) else {
            continue;
        };
        let text = question.options.get(*letter).to_string();
        if idx < names::STRONG_TRAIT_COUNT {
            result.strong.push(text);
        } else {
            result.weak.push(text);
        }
    }

    result
}
