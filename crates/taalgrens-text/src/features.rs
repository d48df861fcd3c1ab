//! Lexical and phonetic feature extraction for English/Dutch sentences.
//!
//! Every sentence maps to the same fixed feature-name set, so instances
//! built here always satisfy the induction engine's consistency
//! requirement. Count and ratio features are bucketed into half-open
//! ranges; word and letter-pair checks become categorical flags.

use std::collections::HashMap;

use taalgrens_learn::FeatureValue;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Dutch and English function words checked for exact word membership.
const MARKER_WORDS: [&str; 8] = ["het", "een", "en", "de", "the", "and", "in", "of"];

/// Return the fixed feature-name pool in its canonical order.
///
/// The order doubles as the tie-break order for equal-gain splits, so it
/// must stay stable across training and prediction.
#[must_use]
pub fn feature_names() -> Vec<String> {
    let mut names = vec![
        "cv-ratio".to_string(),
        "av-len".to_string(),
        "v-pairs".to_string(),
        "c-pairs".to_string(),
        "l-pairs".to_string(),
        "ends-en".to_string(),
        "ends-e".to_string(),
        "has-aa".to_string(),
        "has-ee".to_string(),
    ];
    for word in MARKER_WORDS {
        names.push(format!("has-word-{word}"));
    }
    names
}

/// Extract the fixed feature set from one sentence.
#[must_use]
pub fn extract(line: &str) -> HashMap<String, FeatureValue> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (v_pairs, c_pairs) = vowel_consonant_pairs(line);

    let mut features = HashMap::new();
    features.insert("cv-ratio".to_string(), vowel_ratio_bucket(line));
    features.insert("av-len".to_string(), avg_word_len_bucket(line, &words));
    features.insert("v-pairs".to_string(), pair_bucket(v_pairs));
    features.insert("c-pairs".to_string(), pair_bucket(c_pairs));
    features.insert("l-pairs".to_string(), pair_bucket(letter_pairs(line)));
    features.insert(
        "ends-en".to_string(),
        FeatureValue::flag(any_word_ends_in(&words, "en")),
    );
    features.insert(
        "ends-e".to_string(),
        FeatureValue::flag(any_word_ends_in(&words, "e")),
    );
    features.insert("has-aa".to_string(), FeatureValue::flag(line.contains("aa")));
    features.insert("has-ee".to_string(), FeatureValue::flag(line.contains("ee")));
    for word in MARKER_WORDS {
        features.insert(
            format!("has-word-{word}"),
            FeatureValue::flag(words.contains(&word)),
        );
    }
    features
}

/// Bucket for a letter-pair count: `[0,4)`, `[4,8)`, `[8,11)`, `[11,inf)`.
fn pair_bucket(count: usize) -> FeatureValue {
    let count = count as f64;
    if count < 4.0 {
        FeatureValue::range(0.0, Some(4.0))
    } else if count < 8.0 {
        FeatureValue::range(4.0, Some(8.0))
    } else if count < 11.0 {
        FeatureValue::range(8.0, Some(11.0))
    } else {
        FeatureValue::range(11.0, None)
    }
}

/// Bucket for the vowel-to-consonant ratio: `[0,0.5)`, `[0.5,0.7)`, `[0.7,inf)`.
///
/// Every non-vowel character, whitespace and punctuation included,
/// counts as a consonant. A sentence with no consonants lands in the
/// top bucket.
fn vowel_ratio_bucket(line: &str) -> FeatureValue {
    let mut vowels = 0usize;
    let mut consonants = 0usize;
    for ch in line.chars() {
        if VOWELS.contains(&ch) {
            vowels += 1;
        } else {
            consonants += 1;
        }
    }
    if consonants == 0 {
        return FeatureValue::range(0.7, None);
    }
    let ratio = vowels as f64 / consonants as f64;
    if ratio < 0.5 {
        FeatureValue::range(0.0, Some(0.5))
    } else if ratio < 0.7 {
        FeatureValue::range(0.5, Some(0.7))
    } else {
        FeatureValue::range(0.7, None)
    }
}

/// Bucket for the average word length: `[0,5)`, `[5,9)`, `[9,inf)`.
///
/// The average is the sentence's character count over its word count,
/// truncated to an integer.
fn avg_word_len_bucket(line: &str, words: &[&str]) -> FeatureValue {
    if words.is_empty() {
        return FeatureValue::range(0.0, Some(5.0));
    }
    let avg = line.chars().count() / words.len();
    if avg < 5 {
        FeatureValue::range(0.0, Some(5.0))
    } else if avg < 9 {
        FeatureValue::range(5.0, Some(9.0))
    } else {
        FeatureValue::range(9.0, None)
    }
}

/// Count non-overlapping doubled-vowel and doubled-consonant pairs.
///
/// A pair is two consecutive appearances of the same character; after a
/// match the scan skips past both characters.
fn vowel_consonant_pairs(line: &str) -> (usize, usize) {
    let chars: Vec<char> = line.chars().collect();
    let mut v_count = 0usize;
    let mut c_count = 0usize;
    let mut i = 0usize;
    while i + 1 < chars.len() {
        if chars[i] == chars[i + 1] {
            if VOWELS.contains(&chars[i]) {
                v_count += 1;
            } else {
                c_count += 1;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    (v_count, c_count)
}

/// Count all positions where a character repeats immediately
/// (overlapping, so "aaa" counts twice).
fn letter_pairs(line: &str) -> usize {
    let chars: Vec<char> = line.chars().collect();
    chars.windows(2).filter(|w| w[0] == w[1]).count()
}

fn any_word_ends_in(words: &[&str], suffix: &str) -> bool {
    words.iter().any(|word| word.ends_with(suffix))
}
