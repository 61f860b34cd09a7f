use strsim::normalized_levenshtein;

/// Similarity between two already-normalized strings on a 0..=100 scale.
///
/// The score is the best of a plain edit-distance ratio and a token-order
/// insensitive ratio. When one string is much longer than the other a
/// discounted best-window partial ratio is also considered, so that
/// "levitating" still scores well against "levitating remix".
pub fn similarity_score(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }

    let plain = ratio(a, b);
    let token_sorted = ratio(&sorted_tokens(a), &sorted_tokens(b)) * 0.95;

    let (a_len, b_len) = (a.chars().count() as f64, b.chars().count() as f64);
    let length_ratio = a_len.max(b_len) / a_len.min(b_len);
    let partial = if length_ratio < 1.5 {
        0.0
    } else if length_ratio <= 8.0 {
        partial_ratio(a, b) * 0.9
    } else {
        partial_ratio(a, b) * 0.6
    };

    plain.max(token_sorted).max(partial).round().clamp(0.0, 100.0) as u8
}

/// Returns the candidate scoring highest against `query`, if it reaches
/// `cutoff`. Ties keep the earliest candidate.
pub fn best_match<'a, I>(query: &str, candidates: I, cutoff: u8) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, u8)> = None;
    for candidate in candidates {
        let score = similarity_score(query, candidate);
        if score < cutoff {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best
}

fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();
    if short_len == long_chars.len() {
        return ratio(short, long);
    }

    long_chars
        .windows(short_len)
        .map(|window| ratio(short, &window.iter().collect::<String>()))
        .fold(0.0, f64::max)
}
