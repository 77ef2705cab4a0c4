//! # review-core — Sentimento de Avaliações de Hotel por Alvo
//!
//! Este crate responde à pergunta "o que a avaliação diz **sobre** X?" (wifi, café da manhã,
//! piscina...). Em vez de pontuar o texto inteiro, ele isola as palavras ao redor de cada
//! menção do alvo e pontua somente esse trecho.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Entrada**: alvo e avaliação (String).
//! 2.  **Segmentação** ([`sentence`]): a avaliação é dividida em sentenças.
//! 3.  **Tokenização** ([`tokenizer`]): cada sentença vira uma lista de tokens com offsets.
//! 4.  **Contexto** ([`context`]): janela de até 3 tokens antes e 3 depois da menção.
//! 5.  **Polaridade** ([`sentiment`]): pontuação léxica com regras de negação, intensificadores,
//!     caixa alta, "but" e pontuação.
//! 6.  **Saída** ([`classifier`]): positivo, negativo, neutro, não mencionado ou erro.
//!
//! Em paralelo, [`review`] resume a avaliação completa (sentimento geral, humor e emoções
//! do léxico [`emotion`]).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use review_core::{ReviewPipeline, SentimentLabel, TargetSentiment};
//!
//! // 1. Instancia o pipeline (léxicos embutidos)
//! let pipeline = ReviewPipeline::new();
//!
//! // 2. Avaliação para análise
//! let review = "The room was small. The wifi was fast and reliable. Breakfast was cold.";
//!
//! // 3. Classifica o alvo
//! let result = pipeline.analyze_target("wifi", review).unwrap();
//! assert_eq!(result.label(), Some(SentimentLabel::Positive));
//! println!("{}", result.message());
//!
//! // 4. Alvo ausente não é erro
//! let result = pipeline.analyze_target("parking", review).unwrap();
//! assert!(matches!(result, TargetSentiment::NotMentioned { .. }));
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador com eventos observáveis e processamento em lote.
//! - [`context`]: Extração do contexto do alvo.
//! - [`classifier`]: Classificação de sentimento por alvo.
//! - [`corpus`]: Avaliações de demonstração.

pub mod classifier;
pub mod context;
pub mod corpus;
pub mod emotion;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod review;
pub mod sentence;
pub mod sentiment;
pub mod tokenizer;

pub use classifier::{classify, TargetClassifier, TargetSentiment};
pub use context::{extract_context, ContextExtractor, ContextWindow, Mention};
pub use emotion::{EmotionCount, EmotionLexicon};
pub use error::{AnalysisError, InputError, LexiconError, ScoreError};
pub use pipeline::{BatchItem, BatchSummary, PipelineEvent, ReviewPipeline};
pub use review::{Mood, ReviewAnalyzer, ReviewReport};
pub use sentence::{SentenceSegmenter, UnicodeSentenceSegmenter};
pub use sentiment::{LexiconScorer, PolarityScore, PolarityScorer, SentimentLabel, SentimentLexicon};
pub use tokenizer::{StandardTokenizer, Token, WordTokenizer};
