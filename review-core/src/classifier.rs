//! # Classificador de Sentimento por Alvo
//!
//! Responde "qual o sentimento da avaliação **sobre** X?".
//!
//! ## Fluxo
//!
//! 1. Valida a entrada: alvo e avaliação não podem estar em branco ([`InputError`]).
//! 2. Extrai o contexto do alvo ([`ContextExtractor`]).
//! 3. Contexto vazio -> [`TargetSentiment::NotMentioned`], sem pontuar.
//! 4. Pontua o contexto com o [`PolarityScorer`] injetado e mapeia o `compound`
//!    para positivo / negativo / neutro.
//! 5. Falha do avaliador -> [`TargetSentiment::AnalysisError`] (não é fatal).
//!
//! ```rust
//! use review_core::classifier::{TargetClassifier, TargetSentiment};
//! use review_core::sentiment::SentimentLabel;
//!
//! let classifier = TargetClassifier::new();
//! let review = "The room was small. The wifi was fast and reliable. Breakfast was cold.";
//!
//! let result = classifier.classify("wifi", review).unwrap();
//! assert_eq!(result.label(), Some(SentimentLabel::Positive));
//!
//! let result = classifier.classify("parking", review).unwrap();
//! assert!(matches!(result, TargetSentiment::NotMentioned { .. }));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::ContextExtractor;
use crate::error::{require_text, InputError};
use crate::sentiment::{LexiconScorer, PolarityScore, PolarityScorer, SentimentLabel};

/// Resultado da classificação de um alvo.
///
/// Os chamadores decidem pela variante, nunca por uma exceção capturada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetSentiment {
    /// O alvo foi encontrado e o contexto pontuado.
    Rated {
        target: String,
        label: SentimentLabel,
        score: PolarityScore,
        context: String,
    },
    /// Nenhuma menção do alvo como token isolado.
    NotMentioned { target: String },
    /// O avaliador de polaridade falhou.
    AnalysisError { target: String, message: String },
}

impl TargetSentiment {
    pub fn target(&self) -> &str {
        match self {
            TargetSentiment::Rated { target, .. }
            | TargetSentiment::NotMentioned { target }
            | TargetSentiment::AnalysisError { target, .. } => target,
        }
    }

    pub fn label(&self) -> Option<SentimentLabel> {
        match self {
            TargetSentiment::Rated { label, .. } => Some(*label),
            _ => None,
        }
    }

    pub fn score(&self) -> Option<PolarityScore> {
        match self {
            TargetSentiment::Rated { score, .. } => Some(*score),
            _ => None,
        }
    }

    /// Frase legível para exibir ao usuário.
    pub fn message(&self) -> String {
        match self {
            TargetSentiment::Rated { target, label, .. } => {
                format!("The sentiment towards '{}' is {}.", target, label)
            }
            TargetSentiment::NotMentioned { target } => {
                format!("The target '{}' is not mentioned in the review.", target)
            }
            TargetSentiment::AnalysisError { message, .. } => {
                format!("Error during sentiment analysis: {}", message)
            }
        }
    }
}

/// Classificador: extrator de contexto + avaliador de polaridade.
#[derive(Clone)]
pub struct TargetClassifier {
    extractor: ContextExtractor,
    scorer: Arc<dyn PolarityScorer>,
}

impl TargetClassifier {
    /// Extrator padrão e [`LexiconScorer`] com o léxico embutido.
    pub fn new() -> Self {
        Self {
            extractor: ContextExtractor::new(),
            scorer: Arc::new(LexiconScorer::default()),
        }
    }

    pub fn with_extractor(mut self, extractor: ContextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_scorer(mut self, scorer: impl PolarityScorer + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    pub fn with_shared_scorer(mut self, scorer: Arc<dyn PolarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn extractor(&self) -> &ContextExtractor {
        &self.extractor
    }

    pub fn scorer(&self) -> Arc<dyn PolarityScorer> {
        Arc::clone(&self.scorer)
    }

    /// Classifica o sentimento da avaliação em relação ao alvo.
    pub fn classify(&self, target: &str, review: &str) -> Result<TargetSentiment, InputError> {
        let target = require_text("target", target)?;
        let review = require_text("review", review)?;

        let context = self.extractor.extract(target, review);
        Ok(self.rate(target, context))
    }

    /// Pontua um contexto já extraído.
    pub fn rate(&self, target: &str, context: String) -> TargetSentiment {
        if context.is_empty() {
            debug!(term = target, "alvo não mencionado");
            return TargetSentiment::NotMentioned {
                target: target.to_string(),
            };
        }

        match self.scorer.score(&context) {
            Ok(score) => {
                let label = SentimentLabel::from_compound(score.compound);
                debug!(term = target, %label, compound = score.compound, "contexto pontuado");
                TargetSentiment::Rated {
                    target: target.to_string(),
                    label,
                    score,
                    context,
                }
            }
            Err(err) => {
                warn!(term = target, error = %err, "falha na pontuação do contexto");
                TargetSentiment::AnalysisError {
                    target: target.to_string(),
                    message: err.to_string(),
                }
            }
        }
    }
}

impl Default for TargetClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifica com as capacidades padrão.
pub fn classify(target: &str, review: &str) -> Result<TargetSentiment, InputError> {
    TargetClassifier::new().classify(target, review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const REVIEW: &str = "The room was small. The wifi was fast and reliable. Breakfast was cold.";

    /// Avaliador sintético com compound fixo
    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn score(&self, _text: &str) -> Result<PolarityScore, ScoreError> {
            Ok(PolarityScore {
                compound: self.0,
                ..PolarityScore::default()
            })
        }
    }

    struct FailingScorer;

    impl PolarityScorer for FailingScorer {
        fn score(&self, _text: &str) -> Result<PolarityScore, ScoreError> {
            Err(ScoreError::Failed("model not loaded".into()))
        }
    }

    struct CountingScorer(Arc<AtomicUsize>);

    impl PolarityScorer for CountingScorer {
        fn score(&self, _text: &str) -> Result<PolarityScore, ScoreError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(PolarityScore::default())
        }
    }

    #[test]
    fn test_classify_wifi_positive() {
        let result = classify("wifi", REVIEW).unwrap();
        match &result {
            TargetSentiment::Rated { target, label, context, .. } => {
                assert_eq!(target, "wifi");
                assert_eq!(*label, SentimentLabel::Positive);
                assert_eq!(context, "The wifi was fast and");
            }
            other => panic!("esperado Rated, obtido {:?}", other),
        }
        assert_eq!(result.message(), "The sentiment towards 'wifi' is positive.");
    }

    #[test]
    fn test_classify_breakfast_negative() {
        let result = classify("breakfast", REVIEW).unwrap();
        assert_eq!(result.label(), Some(SentimentLabel::Negative));
    }

    #[test]
    fn test_classify_parking_not_mentioned() {
        let result = classify("parking", REVIEW).unwrap();
        assert_eq!(
            result,
            TargetSentiment::NotMentioned {
                target: "parking".into()
            }
        );
        assert_eq!(
            result.message(),
            "The target 'parking' is not mentioned in the review."
        );
    }

    #[test]
    fn test_not_mentioned_skips_scoring() {
        let calls = Arc::new(AtomicUsize::new(0));
        let classifier = TargetClassifier::new().with_scorer(CountingScorer(Arc::clone(&calls)));
        let result = classifier.classify("room", "The bedroom was huge.").unwrap();
        assert!(matches!(result, TargetSentiment::NotMentioned { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        classifier.classify("bedroom", "The bedroom was huge.").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_label_boundary_with_synthetic_scorer() {
        let cases = [
            (0.0, SentimentLabel::Neutral),
            (0.0001, SentimentLabel::Positive),
            (-0.0001, SentimentLabel::Negative),
        ];
        for (compound, expected) in cases {
            let classifier = TargetClassifier::new().with_scorer(FixedScorer(compound));
            let result = classifier.classify("wifi", REVIEW).unwrap();
            assert_eq!(result.label(), Some(expected), "compound = {}", compound);
        }
    }

    #[test]
    fn test_scorer_failure_is_not_fatal() {
        let classifier = TargetClassifier::new().with_scorer(FailingScorer);
        let result = classifier.classify("wifi", REVIEW).unwrap();
        assert_eq!(
            result,
            TargetSentiment::AnalysisError {
                target: "wifi".into(),
                message: "scorer failed: model not loaded".into()
            }
        );
        assert!(result.message().starts_with("Error during sentiment analysis"));

        // O classificador continua aceitando chamadas
        assert!(classifier.classify("parking", REVIEW).is_ok());
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(classify("", REVIEW), Err(InputError::EmptyInput("target")));
        assert_eq!(classify("   ", REVIEW), Err(InputError::EmptyInput("target")));
        assert_eq!(classify("wifi", " \n"), Err(InputError::EmptyInput("review")));
    }

    #[test]
    fn test_target_is_trimmed() {
        let result = classify("  wifi ", REVIEW).unwrap();
        assert_eq!(result.target(), "wifi");
        assert!(result.label().is_some());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let classifier = TargetClassifier::new();
        let first = classifier.classify("breakfast", REVIEW).unwrap();
        let second = classifier.classify("breakfast", REVIEW).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialization_is_tagged() {
        let json = serde_json::to_value(classify("parking", REVIEW).unwrap()).unwrap();
        assert_eq!(json["status"], "not_mentioned");
        assert_eq!(json["target"], "parking");

        let json = serde_json::to_value(classify("wifi", REVIEW).unwrap()).unwrap();
        assert_eq!(json["status"], "rated");
        assert_eq!(json["label"], "positive");
        assert!(json["score"]["compound"].as_f64().unwrap() > 0.0);
    }
}
