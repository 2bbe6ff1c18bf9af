//! Frequency corrections.
//!
//! Rules touch `word_frequency` and `filtered_word_frequency` only. Counts,
//! stem views and structure are left as built. Each rule that changes
//! anything is listed in the new record's `corrections_applied`.

use texstat_types::{CorrectionRule, Frequency, StatisticsRecord};
use tracing::debug;

/// Applies `rules` in order and returns the corrected record.
///
/// `tokens` are the filtered tokens the record was built from; phrase rules
/// count over them. Returns `record` unchanged when no rule has an effect.
pub fn apply_corrections(
    record: StatisticsRecord,
    rules: &[CorrectionRule],
    tokens: &[String],
) -> StatisticsRecord {
    if rules.is_empty() {
        return record;
    }

    let mut lexical = record.lexical().clone();
    let mut applied = Vec::new();

    for rule in rules {
        let changed = match rule {
            CorrectionRule::Rename { from, to } => {
                let a = rename(&mut lexical.word_frequency, from, to);
                let b = rename(&mut lexical.filtered_word_frequency, from, to);
                a || b
            }
            CorrectionRule::Phrase { phrase } => {
                let words: Vec<&str> = phrase.split_whitespace().collect();
                let n = count_phrase(tokens, &words);
                let key = words.join(" ");
                let a = split_phrase(&mut lexical.word_frequency, &words, &key, n);
                let b = split_phrase(&mut lexical.filtered_word_frequency, &words, &key, n);
                a || b
            }
        };

        if changed {
            debug!(snapshot = %record.meta().name, %rule, "correction applied");
            applied.push(rule.to_string());
        } else {
            debug!(snapshot = %record.meta().name, %rule, "correction had no effect");
        }
    }

    if applied.is_empty() {
        return record;
    }
    record.amended(lexical, applied)
}

/// Moves the count of `from` onto `to`.
fn rename(freq: &mut Frequency<String>, from: &str, to: &str) -> bool {
    match freq.remove(from) {
        Some(n) => {
            freq.add(to.to_owned(), n);
            true
        }
        None => false,
    }
}

/// Moves up to `n` occurrences from the phrase's first word to the phrase.
fn split_phrase(freq: &mut Frequency<String>, words: &[&str], key: &str, n: u64) -> bool {
    let Some(head) = words.first() else {
        return false;
    };
    let taken = freq.subtract(*head, n);
    freq.add(key.to_owned(), taken);
    taken > 0
}

/// Non-overlapping occurrences of `words` as consecutive tokens.
pub fn count_phrase(tokens: &[String], words: &[&str]) -> u64 {
    if words.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut i = 0;
    while i + words.len() <= tokens.len() {
        let window = &tokens[i..i + words.len()];
        if window.iter().zip(words).all(|(t, w)| t == w) {
            count += 1;
            i += words.len();
        } else {
            i += 1;
        }
    }
    count
}
