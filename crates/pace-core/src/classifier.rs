use crate::types::Level;
use crate::vocabulary::{self, Tone};
use serde::{Deserialize, Serialize};

const TOP_PICK_BONUS: f64 = 0.2;
const AMBIGUITY_GAP: f64 = 0.2;
const AMBIGUITY_PENALTY: f64 = 0.15;

// ---------------------------------------------------------------------------
// ScoreVector
// ---------------------------------------------------------------------------

/// Normalized keyword score per level, indexed in `Level::all()` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector([f64; 4]);

impl ScoreVector {
    /// Divide every raw count by the largest one. All zeros stay zero.
    pub fn from_raw(raw: &[usize; 4]) -> Self {
        let max = raw.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return Self::default();
        }
        let mut scores = [0.0; 4];
        for (score, &count) in scores.iter_mut().zip(raw) {
            *score = count as f64 / max as f64;
        }
        Self(scores)
    }

    pub fn get(&self, level: Level) -> f64 {
        self.0[level.index()]
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    /// Highest-scoring level; ties go to the lowest numeral.
    pub fn top_level(&self) -> Level {
        let mut best = Level::Standardized;
        for &level in Level::all() {
            if self.get(level) > self.get(best) {
                best = level;
            }
        }
        best
    }

    /// Difference between the largest and second-largest score.
    pub fn gap(&self) -> f64 {
        let mut sorted = self.0;
        sorted.sort_by(|a, b| b.total_cmp(a));
        sorted[0] - sorted[1]
    }
}

// ---------------------------------------------------------------------------
// Classification (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub level: Level,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

impl Classification {
    /// Confidence as a rounded percentage, e.g. `85`.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// Intermediate values behind a classification, for `--explain` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub raw: [usize; 4],
    pub scores: ScoreVector,
    pub tone: Tone,
    pub base_level: Level,
    pub classification: Classification,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Keyword classifier over the built-in vocabularies. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    pub fn classify(&self, description: &str) -> Classification {
        self.analyze(description).classification
    }

    pub fn analyze(&self, description: &str) -> Analysis {
        let text = description.to_lowercase();

        let raw = raw_scores(&text);
        let scores = ScoreVector::from_raw(&raw);
        let tone = detect_tone(&text);
        let base_level = scores.top_level();
        let level = adjust_for_tone(base_level, tone);

        let classification = Classification {
            level,
            confidence: confidence(&scores, level),
            reasoning: reasoning(&scores, tone, level),
        };

        tracing::debug!(
            ?raw,
            %tone,
            base = base_level.number(),
            level = level.number(),
            confidence = classification.confidence,
            "classified description"
        );

        Analysis {
            raw,
            scores,
            tone,
            base_level,
            classification,
        }
    }
}

/// Classify with the built-in vocabularies.
pub fn classify(description: &str) -> Classification {
    Classifier.classify(description)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

fn raw_scores(text: &str) -> [usize; 4] {
    let mut raw = [0; 4];
    for &level in Level::all() {
        raw[level.index()] = vocabulary::keywords(level)
            .iter()
            .map(|keyword| count_whole_word(text, &keyword.to_lowercase()))
            .sum();
    }
    raw
}

/// ASCII letters, digits and `_` form words. CJK and punctuation do not.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Count non-overlapping occurrences of `keyword` that are not glued to a
/// word character on either side. Scans left to right like a global regex.
fn count_whole_word(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut from = 0;
    while let Some(offset) = text[from..].find(keyword) {
        let start = from + offset;
        let end = start + keyword.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            count += 1;
            from = end;
        } else {
            from = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    count
}

/// Tone with the most markers present as substrings. No markers at all
/// means medium.
fn detect_tone(text: &str) -> Tone {
    let mut best = Tone::Medium;
    let mut best_count = 0;
    for &tone in Tone::all() {
        let count = tone
            .markers()
            .iter()
            .filter(|marker| text.contains(*marker))
            .count();
        if count > best_count {
            best = tone;
            best_count = count;
        }
    }
    best
}

fn adjust_for_tone(base: Level, tone: Tone) -> Level {
    let n = base.number();
    let adjusted = match tone {
        Tone::Simple => n.saturating_sub(1).max(1),
        Tone::Complex => (n + 1).min(4),
        Tone::Innovation => return Level::Innovation,
        Tone::Medium => n,
    };
    Level::try_from(adjusted).unwrap_or(base)
}

/// Bonus and penalty apply to the unclamped value; clamp once at the end.
fn confidence(scores: &ScoreVector, level: Level) -> f64 {
    let score = scores.get(level);
    let max = scores.max();
    let mut confidence = score;
    if score == max && max > 0.0 {
        confidence += TOP_PICK_BONUS;
    }
    if scores.gap() < AMBIGUITY_GAP {
        confidence -= AMBIGUITY_PENALTY;
    }
    confidence.clamp(0.0, 1.0)
}

fn reasoning(scores: &ScoreVector, tone: Tone, level: Level) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    if scores.max() > 0.0 {
        lines.push(format!(
            "description contains many keywords related to {}",
            scores.top_level().display_name()
        ));
    }
    lines.push(tone.explanation().to_string());
    lines.push(level.recommendation().to_string());
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
