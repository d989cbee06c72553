use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Dice's coefficient over the character bigrams of both strings.
///
/// Whitespace is ignored and the comparison is case-sensitive. Identical
/// strings score `1.0`; strings without a shared bigram score `0.0`.
pub fn compare_two_strings(first: &str, second: &str) -> f64 {
    let first: Vec<char> = WHITESPACE.replace_all(first, "").chars().collect();
    let second: Vec<char> = WHITESPACE.replace_all(second, "").chars().collect();

    if first == second {
        return 1.0;
    }
    if first.len() < 2 || second.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in first.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_default() += 1;
    }

    let mut intersection = 0usize;
    for pair in second.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1]))
            && *count > 0
        {
            *count -= 1;
            intersection += 1;
        }
    }

    (2 * intersection) as f64 / (first.len() + second.len() - 2) as f64
}
