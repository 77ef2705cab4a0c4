//! # Avaliação de Polaridade (estilo VADER)
//!
//! Calcula a polaridade de um texto curto a partir de um léxico de valências
//! (palavra -> valor em [-4, 4]) e de heurísticas de regra, no espírito do VADER
//! (Hutto & Gilbert, 2014):
//!
//! 1. **Valência léxica**: cada palavra conhecida contribui com seu valor.
//! 2. **Intensificadores**: "very", "extremely" (+0.293) e atenuadores "slightly" (-0.293)
//!    nas 3 palavras anteriores, com amortecimento 1.0 / 0.95 / 0.9 pela distância.
//! 3. **Negação**: "not", "n't", "never"... nas 3 palavras anteriores multiplicam por -0.74.
//! 4. **Caixa alta**: palavra em CAIXA ALTA num texto misto ganha +0.733.
//! 5. **Contraste "but"**: antes do "but" × 0.5, depois × 1.5.
//! 6. **Pontuação**: cada "!" (até 4) soma 0.292; "??" soma 0.18 por "?" (até 0.96).
//!
//! O escore composto é normalizado por `s / sqrt(s² + 15)`, ficando em [-1, 1].
//!
//! ```rust
//! use review_core::sentiment::{LexiconScorer, PolarityScorer, SentimentLabel};
//!
//! let scorer = LexiconScorer::default();
//! let score = scorer.score("The wifi was fast and").unwrap();
//! assert_eq!(SentimentLabel::from_compound(score.compound), SentimentLabel::Positive);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, ScoreError};

/// Constantes empíricas do VADER
const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;

/// Resultado da avaliação de polaridade.
///
/// `neg`, `neu` e `pos` são proporções em [0, 1]; `compound` é o escore
/// normalizado em [-1, 1] que decide o rótulo.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScore {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// Rótulo de sentimento em três classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// `> 0` positivo, `< 0` negativo, exatamente `0` neutro.
    pub fn from_compound(compound: f64) -> Self {
        if compound > 0.0 {
            SentimentLabel::Positive
        } else if compound < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Cor CSS para a UI
    pub fn color(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "#10b981",
            SentimentLabel::Negative => "#ef4444",
            SentimentLabel::Neutral => "#6b7280",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capacidade de pontuação de polaridade injetável.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<PolarityScore, ScoreError>;
}

/// Léxico de valências (palavra em minúsculas -> valor médio).
#[derive(Debug, Clone, Default)]
pub struct SentimentLexicon {
    valences: HashMap<String, f64>,
}

impl SentimentLexicon {
    /// Léxico embutido, focado em avaliações de hospedagem.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_VALENCES.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            valences: pairs
                .into_iter()
                .map(|(word, valence)| (word.to_lowercase(), valence))
                .collect(),
        }
    }

    /// Lê o formato do `vader_lexicon.txt`: `palavra<TAB>média<TAB>desvio<TAB>[notas]`.
    ///
    /// Só as duas primeiras colunas são usadas; linhas vazias e `#` são ignoradas.
    pub fn parse(content: &str) -> Result<Self, LexiconError> {
        let mut valences = HashMap::new();
        for (i, line) in content.lines().enumerate() {
            let line_no = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut fields = trimmed.split('\t');
            let (Some(word), Some(value)) = (fields.next(), fields.next()) else {
                return Err(LexiconError::Malformed {
                    line: line_no,
                    content: line.to_string(),
                });
            };
            let valence = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LexiconError::InvalidValence {
                    line: line_no,
                    value: value.to_string(),
                })?;
            valences.insert(word.trim().to_lowercase(), valence);
        }
        Ok(Self { valences })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.valences.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

/// Avaliador de polaridade baseado em léxico + regras.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: SentimentLexicon,
}

impl LexiconScorer {
    pub fn new(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &SentimentLexicon {
        &self.lexicon
    }

    /// Valência de cada palavra, já com intensificadores, negação e caixa alta.
    fn word_valences(&self, words: &[&str], lowers: &[String], cap_diff: bool) -> Vec<f64> {
        let mut sentiments = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let lower = &lowers[i];
            // Intensificadores não carregam valência própria
            if booster_scalar(lower).is_some() {
                sentiments.push(0.0);
                continue;
            }
            if lower == "kind" && lowers.get(i + 1).map_or(false, |next| next == "of") {
                sentiments.push(0.0);
                continue;
            }
            let Some(mut valence) = self.lexicon.get(lower) else {
                sentiments.push(0.0);
                continue;
            };

            if cap_diff && is_all_caps(word) {
                valence += C_INCR.copysign(valence);
            }

            for distance in 0..3 {
                if i <= distance {
                    break;
                }
                let prev_idx = i - (distance + 1);
                let prev_lower = &lowers[prev_idx];
                if !self.lexicon.contains(prev_lower) {
                    let mut scalar = scalar_inc_dec(words[prev_idx], prev_lower, valence, cap_diff);
                    if distance == 1 {
                        scalar *= 0.95;
                    } else if distance == 2 {
                        scalar *= 0.9;
                    }
                    valence += scalar;
                }
                if is_negation(prev_lower) {
                    valence *= N_SCALAR;
                }
            }

            sentiments.push(valence);
        }

        but_check(lowers, &mut sentiments);
        sentiments
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(SentimentLexicon::builtin())
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<PolarityScore, ScoreError> {
        if self.lexicon.is_empty() {
            return Err(ScoreError::LexiconUnavailable);
        }

        let words: Vec<&str> = text
            .split_whitespace()
            .map(strip_punctuation_if_word)
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Ok(PolarityScore::default());
        }

        let lowers: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let cap_diff = is_cap_differential(&words);
        let sentiments = self.word_valences(&words, &lowers, cap_diff);

        Ok(score_valence(&sentiments, text))
    }
}

/// Remove pontuação das bordas, a menos que sobre uma palavra de até 2 caracteres
/// (mantém emoticons como ":)" e clíticos como "n't").
fn strip_punctuation_if_word(token: &str) -> &str {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        token
    } else {
        stripped
    }
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// Verdadeiro se algumas (mas não todas) palavras estão em CAIXA ALTA.
fn is_cap_differential(words: &[&str]) -> bool {
    let caps = words.iter().filter(|w| is_all_caps(w)).count();
    caps > 0 && caps < words.len()
}

fn booster_scalar(lower: &str) -> Option<f64> {
    if BOOSTERS_INCR.contains(&lower) {
        Some(B_INCR)
    } else if BOOSTERS_DECR.contains(&lower) {
        Some(B_DECR)
    } else {
        None
    }
}

fn scalar_inc_dec(word: &str, lower: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster_scalar(lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_diff && is_all_caps(word) {
        scalar += C_INCR.copysign(valence);
    }
    scalar
}

fn is_negation(lower: &str) -> bool {
    NEGATIONS.contains(&lower) || lower.contains("n't")
}

fn but_check(lowers: &[String], sentiments: &mut [f64]) {
    let Some(but_idx) = lowers.iter().position(|w| w == "but") else {
        return;
    };
    for (i, s) in sentiments.iter_mut().enumerate() {
        if i < but_idx {
            *s *= 0.5;
        } else if i > but_idx {
            *s *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations * 0.292 + question_amp
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScore {
    // Sem nenhuma palavra com valência: tudo neutro
    if sentiments.iter().all(|s| *s == 0.0) {
        return PolarityScore {
            neu: if sentiments.is_empty() { 0.0 } else { 1.0 },
            ..PolarityScore::default()
        };
    }

    let sum: f64 = sentiments.iter().sum();
    let punct = punctuation_emphasis(text);
    // Valências que se anulam: compound zero, mas as proporções continuam valendo
    let compound = if sum == 0.0 {
        0.0
    } else {
        normalize(sum + punct.copysign(sum))
    };

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += punct;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= punct;
    }

    let grand_total = pos_sum + neg_sum.abs() + neu_count;
    PolarityScore {
        neg: round_to((neg_sum / grand_total).abs(), 3),
        neu: round_to((neu_count / grand_total).abs(), 3),
        pos: round_to((pos_sum / grand_total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never",
    "none", "nope", "nor", "not", "nothing", "nowhere", "shouldnt", "wasnt", "werent",
    "without", "wont", "wouldnt", "rarely", "seldom", "despite", "no",
];

const BOOSTERS_INCR: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
    "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
    "fabulously", "greatly", "highly", "hugely", "incredibly", "intensely",
    "majorly", "more", "most", "particularly", "purely", "quite", "really",
    "remarkably", "so", "substantially", "thoroughly", "totally", "tremendously",
    "truly", "unbelievably", "unusually", "utterly", "very", "super", "too",
];

const BOOSTERS_DECR: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta",
];

/// Valências embutidas (escala VADER, -4 a 4)
const BUILTIN_VALENCES: &[(&str, f64)] = &[
    // positivas
    ("amazing", 2.8), ("awesome", 3.1), ("beautiful", 2.9), ("best", 3.2),
    ("bright", 1.9), ("charming", 2.2), ("clean", 1.7), ("comfortable", 2.3),
    ("comfy", 1.8), ("convenient", 1.5), ("cozy", 1.9), ("delicious", 2.7),
    ("delightful", 2.8), ("enjoy", 2.2), ("enjoyed", 2.3), ("excellent", 2.7),
    ("exceptional", 2.8), ("fantastic", 2.6), ("fast", 1.4), ("fine", 0.8),
    ("fresh", 1.3), ("friendly", 2.2), ("good", 1.9), ("great", 3.1),
    ("happy", 2.7), ("helpful", 1.8), ("impressed", 2.1), ("impressive", 2.3),
    ("kind", 2.4), ("lovely", 2.8), ("love", 3.2), ("loved", 2.9),
    ("modern", 1.0), ("nice", 1.8), ("perfect", 2.7), ("pleasant", 2.3),
    ("polite", 1.9), ("quiet", 1.1), ("recommend", 1.5), ("relaxing", 2.2),
    ("reliable", 1.9), ("spacious", 1.6), ("spotless", 2.4), ("stunning", 2.9),
    ("superb", 3.1), ("tasty", 1.9), ("welcoming", 2.0), ("wonderful", 2.7),
    ("worth", 0.9), ("attentive", 1.6), ("satisfied", 1.8), ("pleased", 2.1),
    ("glad", 2.0), ("like", 1.5), ("liked", 1.8), ("free", 2.3),
    ("well", 1.1), ("professional", 1.5), ("smooth", 1.2), ("warm", 0.9),
    ("efficient", 1.6), ("gorgeous", 3.0), ("fun", 2.3), ("thanks", 1.9),
    ("thank", 1.5), ("yes", 1.7), ("wow", 2.8), ("ok", 1.2), ("okay", 0.9),
    ("safe", 1.9), ("easy", 1.9), ("peaceful", 2.2), ("luxurious", 2.3),
    // negativas
    ("awful", -2.0), ("bad", -2.5), ("broken", -2.1), ("cold", -0.9),
    ("cramped", -1.4), ("dirty", -1.9), ("disappointed", -1.9), ("disappointing", -2.2),
    ("disgusting", -2.4), ("dusty", -1.2), ("expensive", -1.0), ("filthy", -2.4),
    ("horrible", -2.5), ("hate", -2.7), ("hated", -3.2), ("loud", -0.8),
    ("mediocre", -1.0), ("mess", -1.5), ("moldy", -2.0), ("noisy", -1.3),
    ("overpriced", -1.8), ("poor", -2.1), ("rude", -2.0), ("slow", -1.1),
    ("small", -0.3), ("smelly", -1.9), ("stained", -1.4), ("terrible", -2.1),
    ("tiny", -0.6), ("unfriendly", -2.0), ("unhelpful", -1.9), ("uncomfortable", -1.6),
    ("worst", -3.1), ("worse", -2.1), ("problem", -1.7), ("problems", -1.7),
    ("complaint", -1.5), ("annoying", -1.7), ("angry", -2.3), ("sad", -2.1),
    ("unacceptable", -2.0), ("nightmare", -2.6), ("avoid", -1.2), ("cockroach", -1.8),
    ("stale", -1.6), ("waste", -1.8), ("wasted", -2.2), ("lack", -1.3),
    ("missing", -1.2), ("noise", -0.8), ("stuck", -1.2), ("hard", -0.4),
    ("ugly", -2.3), ("outdated", -1.2), ("smell", -0.9), ("unclean", -1.9),
    ("sucks", -1.5), ("fail", -2.5), ("failed", -2.3), ("wrong", -2.1),
];
