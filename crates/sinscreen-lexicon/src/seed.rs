//! Built-in seed lexicon
//!
//! Curated Sinhala, romanized Singlish, and English terms with severity
//! weights in `[0.0, 1.0]`. Romanized spellings vary wildly in the wild;
//! the tables carry the common spellings and the variant generator plus
//! fuzzy matching absorb the rest.
//!
//! Deliberately absent: words that are offensive only in combination
//! ("gedara" is just "home"). Those live in the bigram table so the
//! single-word path stays clean.

/// Direct hate terms: slurs and dehumanizing language
pub(crate) const HATE_TERMS: &[(&str, f64)] = &[
    // Sinhala script
    ("පකයා", 0.9),
    ("පක", 0.85),
    ("හුත්ත", 0.95),
    ("හුත්ති", 0.95),
    ("බල්ලා", 0.95),
    ("බැල්ලි", 0.95),
    ("වේසි", 0.95),
    ("වේසිගේ", 0.9),
    ("පොන්නයා", 0.9),
    ("මෝඩයා", 0.7),
    ("මෝඩ", 0.65),
    ("හරකයා", 0.8),
    ("හරක", 0.75),
    ("ගොන්", 0.6),
    ("ගොනා", 0.65),
    ("පිස්සු", 0.6),
    ("පිස්සා", 0.65),
    ("පුක", 0.9),
    ("පයිය", 0.9),
    ("කැරියා", 0.85),
    ("ජරා", 0.7),
    ("කාලකණ්ණි", 0.8),
    ("මූ", 0.8),
    // Romanized Singlish
    ("pakaya", 0.9),
    ("paka", 0.85),
    ("pako", 0.85),
    ("hutta", 0.95),
    ("huththa", 0.95),
    ("huththi", 0.95),
    ("hutto", 0.9),
    ("balla", 0.85),
    ("ballo", 0.8),
    ("belli", 0.9),
    ("wesi", 0.95),
    ("wesige", 0.9),
    ("vesi", 0.9),
    ("ponnaya", 0.9),
    ("ponnayo", 0.85),
    ("modaya", 0.7),
    ("moda", 0.65),
    ("harakaya", 0.8),
    ("haraka", 0.75),
    ("gon", 0.6),
    ("gona", 0.65),
    ("pissu", 0.6),
    ("pissa", 0.65),
    ("puka", 0.9),
    ("payya", 0.9),
    ("payiya", 0.9),
    ("kariya", 0.85),
    ("kari", 0.8),
    ("jara", 0.7),
    ("kalakanni", 0.8),
    // English
    ("stupid", 0.8),
    ("hate", 0.85),
    ("kill", 0.85),
    ("die", 0.75),
    ("fuck", 0.9),
    ("fucker", 0.9),
    ("shit", 0.75),
    ("bitch", 0.9),
    ("bastard", 0.85),
    ("asshole", 0.85),
    ("scum", 0.8),
    ("vermin", 0.85),
];

/// Harassment terms: insults and hostile imperatives, weaker than slurs
pub(crate) const HARASSMENT_TERMS: &[(&str, f64)] = &[
    // Sinhala script
    ("තොපි", 0.6),
    ("තෝ", 0.55),
    ("උඹ", 0.4),
    ("උඹලා", 0.45),
    ("පලයන්", 0.7),
    ("පලයං", 0.7),
    ("යකෝ", 0.5),
    ("වහපන්", 0.65),
    ("නාකි", 0.5),
    // Romanized Singlish
    ("thopi", 0.6),
    ("tho", 0.55),
    ("umba", 0.4),
    ("umbala", 0.45),
    ("palayan", 0.7),
    ("palayang", 0.7),
    ("yako", 0.5),
    ("wahapan", 0.65),
    ("naki", 0.5),
    // English
    ("idiot", 0.7),
    ("moron", 0.7),
    ("loser", 0.6),
    ("dumb", 0.6),
    ("trash", 0.55),
    ("worthless", 0.65),
    ("pathetic", 0.6),
    ("ugly", 0.5),
    ("disgusting", 0.6),
];

/// Positive terms that offset hate evidence
pub(crate) const POSITIVE_TERMS: &[(&str, f64)] = &[
    // Sinhala script
    ("හොඳ", 0.7),
    ("හොඳයි", 0.7),
    ("ස්තූතියි", 0.8),
    ("ආදරෙයි", 0.8),
    ("ලස්සන", 0.6),
    ("නියමයි", 0.7),
    ("සුබ", 0.6),
    ("පට්ට", 0.5),
    // Romanized Singlish
    ("hondai", 0.7),
    ("honda", 0.65),
    ("hodai", 0.7),
    ("sthuthi", 0.8),
    ("isthuthi", 0.8),
    ("adarei", 0.8),
    ("lassana", 0.6),
    ("niyamai", 0.7),
    ("suba", 0.6),
    ("patta", 0.5),
    // English
    ("good", 0.6),
    ("great", 0.6),
    ("love", 0.7),
    ("thanks", 0.6),
    ("nice", 0.5),
    ("beautiful", 0.6),
    ("wonderful", 0.7),
    ("awesome", 0.6),
];

/// Hateful bigrams: pairs that are offensive together even when the
/// individual words are mild or neutral. Keyed on normalized token text.
pub(crate) const BIGRAMS: &[(&str, &str, f64)] = &[
    ("මූ", "බල්ලා", 0.95),
    ("කට", "වහගෙන", 0.85),
    ("වහගෙන", "ඉන්න", 0.7),
    ("ගෙදර", "පලයන්", 0.8),
    ("kata", "wahagena", 0.85),
    ("wahagena", "inna", 0.7),
    ("gedara", "palayan", 0.8),
    ("gon", "haraka", 0.8),
    ("umba", "balla", 0.85),
    ("mu", "balla", 0.9),
    ("shut", "up", 0.5),
    ("get", "lost", 0.55),
];
