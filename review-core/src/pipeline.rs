//! # Pipeline de Avaliações: Orquestrador com Eventos Observáveis
//!
//! O pipeline conecta segmentação, extração de contexto e pontuação, e emite eventos
//! em cada passo via um canal Rust (`mpsc`). O servidor WebSocket repassa esses
//! eventos ao cliente, que mostra a janela de cada menção sendo recortada.
//!
//! A classificação em si é síncrona e sem estado: o canal só transporta o progresso.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::{TargetClassifier, TargetSentiment};
use crate::context::{join_mentions, ContextWindow, Mention};
use crate::emotion::EmotionLexicon;
use crate::error::{require_text, AnalysisError, InputError};
use crate::review::{ReviewAnalyzer, ReviewReport};
use crate::sentiment::{LexiconScorer, PolarityScore, PolarityScorer, SentimentLabel, SentimentLexicon};

/// Eventos emitidos durante a classificação de um alvo.
///
/// Cada variante carrega os dados necessários para renderizar uma etapa na UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: avaliação dividida em sentenças.
    SentencesSegmented { sentences: Vec<String>, total: usize },
    /// **Passo 2**: uma sentença contém o alvo como token; janela recortada.
    MentionFound { sentence: String, mention: Mention },
    /// **Passo 3**: janelas unidas no contexto que será pontuado.
    ContextBuilt { context: String },
    /// **Passo 4**: polaridade do contexto calculada.
    Scored { score: PolarityScore, label: SentimentLabel },
    /// **Conclusão**: resultado final (inclui "não mencionado" e falha do avaliador).
    TargetDone {
        result: TargetSentiment,
        processing_ms: u64,
    },
    /// **Falha**: entrada rejeitada antes do processamento.
    Error { message: String },
}

/// Um item do processamento em lote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    /// Posição da avaliação na lista de entrada.
    pub review_index: usize,
    pub result: TargetSentiment,
}

/// Resultado agregado de um lote de avaliações para o mesmo alvo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub target: String,
    pub items: Vec<BatchItem>,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub not_mentioned: usize,
    pub errors: usize,
    /// Avaliações em branco, ignoradas.
    pub skipped: usize,
}

/// O pipeline principal.
///
/// Construído uma vez (léxicos carregados, capacidades injetadas) e chamado a cada
/// ação do usuário. Só usa `&self`, então pode ser compartilhado via `Arc`.
#[derive(Clone)]
pub struct ReviewPipeline {
    pub classifier: TargetClassifier,
    pub analyzer: ReviewAnalyzer,
}

impl ReviewPipeline {
    /// Pipeline padrão: um único [`LexiconScorer`] compartilhado pelos dois analisadores.
    pub fn new() -> Self {
        let scorer: Arc<dyn PolarityScorer> = Arc::new(LexiconScorer::default());
        Self::with_shared_scorer(scorer)
    }

    pub fn with_shared_scorer(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self {
            classifier: TargetClassifier::new().with_shared_scorer(Arc::clone(&scorer)),
            analyzer: ReviewAnalyzer::new().with_scorer(scorer),
        }
    }

    pub fn with_sentiment_lexicon(self, lexicon: SentimentLexicon) -> Self {
        let scorer: Arc<dyn PolarityScorer> = Arc::new(LexiconScorer::new(lexicon));
        Self {
            classifier: self.classifier.with_shared_scorer(Arc::clone(&scorer)),
            analyzer: self.analyzer.with_scorer(scorer),
        }
    }

    pub fn with_emotion_lexicon(mut self, lexicon: EmotionLexicon) -> Self {
        self.analyzer = self.analyzer.with_emotions(lexicon);
        self
    }

    pub fn with_window(mut self, window: ContextWindow) -> Self {
        let extractor = self.classifier.extractor().clone().with_window(window);
        self.classifier = self.classifier.with_extractor(extractor);
        self
    }

    /// Classifica de forma síncrona.
    pub fn analyze_target(&self, target: &str, review: &str) -> Result<TargetSentiment, InputError> {
        self.classifier.classify(target, review)
    }

    /// Análise da avaliação completa (sem alvo).
    pub fn analyze_review(&self, review: &str) -> Result<ReviewReport, AnalysisError> {
        self.analyzer.analyze(review)
    }

    /// Classifica o alvo enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `SentencesSegmented`
    /// 2. `MentionFound` (uma por sentença com menção exata)
    /// 3. `ContextBuilt` (se houver contexto)
    /// 4. `Scored` (se a pontuação teve sucesso)
    /// 5. `TargetDone`
    ///
    /// Entrada em branco gera apenas `Error`.
    pub fn analyze_target_streaming(&self, target: &str, review: &str, tx: mpsc::Sender<PipelineEvent>) {
        let start = Instant::now();

        let validated = require_text("target", target)
            .and_then(|t| require_text("review", review).map(|r| (t, r)));
        let (target, review) = match validated {
            Ok(pair) => pair,
            Err(err) => {
                let _ = tx.send(PipelineEvent::Error {
                    message: err.to_string(),
                });
                return;
            }
        };

        // === Passo 1: Segmentação ===
        let extractor = self.classifier.extractor();
        let sentences = extractor.sentences(review);
        let _ = tx.send(PipelineEvent::SentencesSegmented {
            total: sentences.len(),
            sentences: sentences.clone(),
        });

        // === Passo 2: Menções e janelas ===
        let mentions = extractor.mentions_in(target, &sentences);
        for mention in &mentions {
            let _ = tx.send(PipelineEvent::MentionFound {
                sentence: sentences[mention.sentence_index].clone(),
                mention: mention.clone(),
            });
        }

        // === Passo 3: Contexto ===
        let context = join_mentions(&mentions);
        if !context.is_empty() {
            let _ = tx.send(PipelineEvent::ContextBuilt {
                context: context.clone(),
            });
        }

        // === Passo 4: Pontuação ===
        let result = self.classifier.rate(target, context);
        if let TargetSentiment::Rated { score, label, .. } = &result {
            let _ = tx.send(PipelineEvent::Scored {
                score: *score,
                label: *label,
            });
        }

        let _ = tx.send(PipelineEvent::TargetDone {
            result,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }

    /// Classifica o mesmo alvo em várias avaliações, em paralelo (ordem preservada).
    pub fn analyze_batch<S>(&self, target: &str, reviews: &[S]) -> Result<BatchSummary, InputError>
    where
        S: AsRef<str> + Sync,
    {
        let target = require_text("target", target)?;

        let outcomes: Vec<Option<TargetSentiment>> = reviews
            .par_iter()
            .map(|review| self.classifier.classify(target, review.as_ref()).ok())
            .collect();

        let mut summary = BatchSummary {
            target: target.to_string(),
            ..BatchSummary::default()
        };
        for (review_index, outcome) in outcomes.into_iter().enumerate() {
            let Some(result) = outcome else {
                summary.skipped += 1;
                continue;
            };
            match &result {
                TargetSentiment::Rated { label, .. } => match label {
                    SentimentLabel::Positive => summary.positive += 1,
                    SentimentLabel::Negative => summary.negative += 1,
                    SentimentLabel::Neutral => summary.neutral += 1,
                },
                TargetSentiment::NotMentioned { .. } => summary.not_mentioned += 1,
                TargetSentiment::AnalysisError { .. } => summary.errors += 1,
            }
            summary.items.push(BatchItem { review_index, result });
        }

        info!(
            term = %summary.target,
            reviews = reviews.len(),
            positive = summary.positive,
            negative = summary.negative,
            "lote processado"
        );
        Ok(summary)
    }
}

impl Default for ReviewPipeline {
    fn default() -> Self {
        Self::new()
    }
}
