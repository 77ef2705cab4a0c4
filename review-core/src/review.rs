//! # Análise da Avaliação Completa
//!
//! Sem alvo: resume o tom geral de uma avaliação.
//!
//! ## Etapas
//!
//! 1. **Limpeza**: minúsculas, sem pontuação ASCII.
//! 2. **Tokenização** do texto limpo.
//! 3. **Stop words** removidas.
//! 4. **Lematização** das palavras restantes.
//! 5. **Polaridade** do texto limpo.
//! 6. **Sentimento geral**: compara as proporções `pos` e `neg`.
//! 7. **Humor** (mood): faixas de proporção acima de 0.5.
//! 8. **Emoções**: entradas do léxico de emoções presentes nas palavras filtradas.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emotion::{EmotionCount, EmotionLexicon};
use crate::error::{require_text, AnalysisError};
use crate::normalize::{clean_text, lemmatize, remove_stopwords};
use crate::sentiment::{LexiconScorer, PolarityScore, PolarityScorer, SentimentLabel};
use crate::tokenizer::{StandardTokenizer, WordTokenizer};

/// Limiar de proporção para as faixas de humor
const MOOD_THRESHOLD: f64 = 0.5;

/// Humor geral derivado das proporções de polaridade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// `pos > 0.5`
    OverallSatisfied,
    /// `neg > 0.5`
    OverallDissatisfied,
    /// `neu > 0.5`
    Calm,
    /// Nenhuma proporção domina.
    Mixed,
}

impl Mood {
    pub fn from_score(score: &PolarityScore) -> Self {
        if score.pos > MOOD_THRESHOLD {
            Mood::OverallSatisfied
        } else if score.neg > MOOD_THRESHOLD {
            Mood::OverallDissatisfied
        } else if score.neu > MOOD_THRESHOLD {
            Mood::Calm
        } else {
            Mood::Mixed
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mood::OverallSatisfied => "Overall Satisfied",
            Mood::OverallDissatisfied => "Overall Dissatisfied",
            Mood::Calm => "Calm Emotions",
            Mood::Mixed => "Mixed Emotions",
        }
    }
}

/// Sentimento geral: a maior proporção entre `pos` e `neg` vence; empate é neutro.
pub fn overall_sentiment(score: &PolarityScore) -> SentimentLabel {
    if score.neg > score.pos {
        SentimentLabel::Negative
    } else if score.pos > score.neg {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}

/// Relatório de uma avaliação completa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReport {
    pub clean_text: String,
    pub tokens: Vec<String>,
    /// Tokens sem stop words.
    pub filtered: Vec<String>,
    pub lemmas: Vec<String>,
    pub score: PolarityScore,
    pub sentiment: SentimentLabel,
    pub mood: Mood,
    pub emotions: Vec<EmotionCount>,
}

impl ReviewReport {
    /// Texto no formato exibido ao usuário.
    pub fn summary(&self) -> String {
        let sentiment = match self.sentiment {
            SentimentLabel::Positive => "Positive Sentiment",
            SentimentLabel::Negative => "Negative Sentiment",
            SentimentLabel::Neutral => "Neutral Sentiment",
        };
        format!("Sentiment: {}\n\nEmotion: {}", sentiment, self.mood.name())
    }
}

/// Analisador de avaliações completas.
#[derive(Clone)]
pub struct ReviewAnalyzer {
    tokenizer: Arc<dyn WordTokenizer>,
    scorer: Arc<dyn PolarityScorer>,
    emotions: Arc<EmotionLexicon>,
}

impl ReviewAnalyzer {
    pub fn new() -> Self {
        Self {
            tokenizer: Arc::new(StandardTokenizer),
            scorer: Arc::new(LexiconScorer::default()),
            emotions: Arc::new(EmotionLexicon::builtin()),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn WordTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn PolarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_emotions(mut self, emotions: EmotionLexicon) -> Self {
        self.emotions = Arc::new(emotions);
        self
    }

    pub fn emotions(&self) -> &EmotionLexicon {
        &self.emotions
    }

    pub fn analyze(&self, review: &str) -> Result<ReviewReport, AnalysisError> {
        let review = require_text("review", review)?;

        let clean = clean_text(review);
        let tokens: Vec<String> = self
            .tokenizer
            .tokenize(&clean)
            .into_iter()
            .map(|t| t.text)
            .collect();
        let filtered = remove_stopwords(&tokens);
        let lemmas: Vec<String> = filtered.iter().map(|w| lemmatize(w)).collect();

        let score = self.scorer.score(&clean)?;
        let emotions = self.emotions.count(&filtered);

        debug!(
            tokens = tokens.len(),
            filtered = filtered.len(),
            emotions = emotions.len(),
            compound = score.compound,
            "avaliação analisada"
        );

        Ok(ReviewReport {
            sentiment: overall_sentiment(&score),
            mood: Mood::from_score(&score),
            clean_text: clean,
            tokens,
            filtered,
            lemmas,
            score,
            emotions,
        })
    }
}

impl Default for ReviewAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
