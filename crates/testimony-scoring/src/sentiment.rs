//! Lexicon-based polarity estimator for short comments.

/// Domain word weights for testimony comment threads.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are supportive,
/// in `[-1.0, 0.0)` are dismissive or mocking.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Supportive
    ("amazing", 0.6),
    ("awesome", 0.5),
    ("beautiful", 0.5),
    ("bless", 0.5),
    ("blessed", 0.5),
    ("blessing", 0.5),
    ("believe", 0.4),
    ("true", 0.3),
    ("real", 0.3),
    ("praise", 0.6),
    ("amen", 0.5),
    ("hallelujah", 0.6),
    ("glory", 0.4),
    ("love", 0.5),
    ("powerful", 0.5),
    ("inspiring", 0.5),
    ("inspired", 0.4),
    ("encouraging", 0.5),
    ("encouraged", 0.4),
    ("touched", 0.4),
    ("thank", 0.3),
    ("thanks", 0.3),
    ("grateful", 0.5),
    ("incredible", 0.5),
    ("wonderful", 0.5),
    ("great", 0.4),
    ("good", 0.3),
    ("hope", 0.3),
    ("peace", 0.3),
    ("joy", 0.4),
    ("healed", 0.4),
    ("miracle", 0.4),
    ("god", 0.2),
    ("jesus", 0.2),
    // Ridiculing
    ("fake", -0.6),
    ("lie", -0.6),
    ("lies", -0.6),
    ("liar", -0.7),
    ("lying", -0.6),
    ("scam", -0.7),
    ("fraud", -0.7),
    ("hoax", -0.6),
    ("staged", -0.5),
    ("clickbait", -0.5),
    ("nonsense", -0.5),
    ("ridiculous", -0.5),
    ("stupid", -0.6),
    ("delusional", -0.6),
    ("delusion", -0.5),
    ("crazy", -0.4),
    ("cringe", -0.5),
    ("joke", -0.4),
    ("doubt", -0.3),
    ("bad", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("hate", -0.6),
    ("bs", -0.5),
    ("lol", -0.2),
    ("lmao", -0.3),
];

/// Words that flip the polarity of the next lexicon hit.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "don't", "dont", "doesn't", "doesnt", "isn't", "isnt",
    "didn't", "didnt", "can't", "cant", "won't", "wont", "ain't", "hardly",
];

/// A negator reaches a lexicon hit at most this many tokens later.
const NEGATION_WINDOW: usize = 3;
/// Negated hits are flipped and dampened.
const NEGATION_FACTOR: f32 = -0.75;
/// Each `!` amplifies magnitude by this much, up to [`MAX_EMPHASIS_MARKS`].
const EMPHASIS_STEP: f32 = 0.1;
const MAX_EMPHASIS_MARKS: usize = 3;

fn lexicon_weight(word: &str) -> Option<f32> {
    LEXICON
        .iter()
        .find(|&&(lex_word, _)| lex_word == word)
        .map(|&(_, weight)| weight)
}

fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .replace('\u{2019}', "'")
        .to_lowercase()
}

/// Estimate the polarity of one comment.
///
/// Sums lexicon weights over lowercase words, flips hits that follow a
/// negator, amplifies by trailing emphasis (`!`), and clamps the result to
/// `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn estimate(comment: &str) -> f32 {
    let mut score = 0.0_f32;
    let mut since_negator: Option<usize> = None;

    for token in comment.split_whitespace() {
        let word = normalize_token(token);
        if word.is_empty() {
            continue;
        }
        if NEGATORS.contains(&word.as_str()) {
            since_negator = Some(0);
            continue;
        }
        let Some(weight) = lexicon_weight(&word) else {
            if let Some(distance) = since_negator.as_mut() {
                *distance += 1;
            }
            continue;
        };
        let negated = since_negator.is_some_and(|d| d < NEGATION_WINDOW);
        score += if negated {
            weight * NEGATION_FACTOR
        } else {
            weight
        };
        since_negator = None;
    }

    let marks = comment.matches('!').count().min(MAX_EMPHASIS_MARKS);
    #[allow(clippy::cast_precision_loss)]
    let emphasis = 1.0 + EMPHASIS_STEP * marks as f32;
    (score * emphasis).clamp(-1.0, 1.0)
}
