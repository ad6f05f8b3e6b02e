//! Obfuscation variant generation
//!
//! Social-media users disguise hate terms with leet substitutions
//! ("p@kaya"), phonetic digits ("h8"), letter elongation ("huttttta"),
//! and transliteration variance ("hutha" / "huta"). This module generates
//! a bounded, deterministic set of de-obfuscated candidates for a token;
//! the matcher then looks each candidate up verbatim.
//!
//! Generation is decode-only. It never tries to re-obfuscate lexicon
//! terms, so the lexicon stays small and the work per token stays flat.

/// Leet and symbol substitutions, decoded one character at a time
const LEET_MAP: &[(char, char)] = &[
    ('@', 'a'),
    ('4', 'a'),
    ('*', 'a'),
    ('8', 'b'),
    ('3', 'e'),
    ('6', 'g'),
    ('9', 'g'),
    ('#', 'h'),
    ('1', 'i'),
    ('!', 'i'),
    ('0', 'o'),
    ('$', 's'),
    ('5', 's'),
    ('7', 't'),
    ('+', 't'),
    ('2', 'z'),
];

/// Digits that stand in for whole syllables ("h8" reads "hate")
const DIGIT_SOUNDS: &[(char, &str)] = &[('8', "ate"), ('2', "to"), ('4', "for")];

/// Aspirated-to-plain consonant collapses for romanized Sinhala,
/// where "tha"/"ta" spellings are interchangeable
const ASPIRATED: &[(&str, &str)] = &[
    ("th", "t"),
    ("dh", "d"),
    ("gh", "g"),
    ("kh", "k"),
    ("bh", "b"),
    ("ph", "p"),
];

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Hard cap on generated variants per token
const MAX_VARIANTS: usize = 24;

/// Generate de-obfuscation candidates for a normalized token, in a
/// deterministic order, never including the token itself.
pub fn token_variations(normalized: &str) -> Vec<String> {
    let mut variants = Vec::new();
    if normalized.chars().count() < 2 {
        return variants;
    }

    let trimmed = normalized.trim_matches(|c: char| !c.is_alphanumeric());
    let mut bases: Vec<String> = vec![normalized.to_string()];
    if !trimmed.is_empty() && trimmed != normalized {
        push(&mut variants, normalized, trimmed.to_string());
        bases.push(trimmed.to_string());
    }

    for base in &bases {
        let decoded = leet_decode(base);
        push(&mut variants, normalized, decoded.clone());
        push(&mut variants, normalized, collapse_runs(&decoded, 2, 1));
        push(&mut variants, normalized, collapse_runs(base, 2, 1));
        push(&mut variants, normalized, collapse_runs(base, 3, 1));
        push(&mut variants, normalized, collapse_runs(base, 3, 2));

        let flattened = collapse_aspirates(base);
        push(&mut variants, normalized, collapse_runs(&flattened, 2, 1));
        push(&mut variants, normalized, flattened);
        push(&mut variants, normalized, collapse_aspirates(&decoded));

        for (digit, sound) in DIGIT_SOUNDS {
            if base.contains(*digit) {
                push(&mut variants, normalized, base.replace(*digit, sound));
            }
        }
        for swap in vowel_ending_swaps(base) {
            push(&mut variants, normalized, swap);
        }
        for swap in vowel_ending_swaps(&decoded) {
            push(&mut variants, normalized, swap);
        }
        if variants.len() >= MAX_VARIANTS {
            break;
        }
    }

    variants.truncate(MAX_VARIANTS);
    variants
}

fn push(variants: &mut Vec<String>, original: &str, candidate: String) {
    if candidate.is_empty() || candidate == original {
        return;
    }
    if variants.iter().any(|v| *v == candidate) {
        return;
    }
    variants.push(candidate);
}

fn leet_decode(s: &str) -> String {
    s.chars()
        .map(|c| {
            LEET_MAP
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}

/// Truncate runs of at least `threshold` identical chars down to `keep`
fn collapse_runs(s: &str, threshold: usize, keep: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut run: Vec<char> = Vec::new();
    for c in s.chars() {
        if run.last() == Some(&c) {
            run.push(c);
        } else {
            flush_run(&mut out, &run, threshold, keep);
            run = vec![c];
        }
    }
    flush_run(&mut out, &run, threshold, keep);
    out
}

fn flush_run(out: &mut String, run: &[char], threshold: usize, keep: usize) {
    let Some(&c) = run.first() else { return };
    let emit = if run.len() >= threshold { keep } else { run.len() };
    for _ in 0..emit {
        out.push(c);
    }
}

fn collapse_aspirates(s: &str) -> String {
    let mut out = s.to_string();
    for (from, to) in ASPIRATED {
        out = out.replace(from, to);
    }
    out
}

/// Romanized Sinhala word endings drift between vowels ("pakaya",
/// "pakayo"). Swap the final vowel for each alternative.
fn vowel_ending_swaps(s: &str) -> Vec<String> {
    let Some(last) = s.chars().last() else {
        return Vec::new();
    };
    if !VOWELS.contains(&last) {
        return Vec::new();
    }
    let stem: String = {
        let mut chars: Vec<char> = s.chars().collect();
        chars.pop();
        chars.into_iter().collect()
    };
    VOWELS
        .iter()
        .filter(|v| **v != last)
        .map(|v| format!("{stem}{v}"))
        .collect()
}
