//! # Extração de Contexto do Alvo
//!
//! Dado um alvo (ex: "wifi") e uma avaliação, isola as palavras ao redor de cada menção
//! para que apenas esse trecho seja pontuado.
//!
//! ## Algoritmo
//!
//! 1. Segmenta a avaliação em sentenças.
//! 2. Descarta sentenças que não contêm o alvo como **substring** (sem caixa).
//! 3. Tokeniza a sentença e procura o **primeiro** token igual ao alvo (sem caixa).
//!    Se nenhum token for exatamente o alvo, a sentença não contribui.
//! 4. Recorta a janela `[max(0, i-3), min(n, i+4))`: até 3 tokens antes, o alvo e até
//!    3 depois. A janela nunca atravessa a fronteira da sentença.
//! 5. Junta as janelas com espaço simples, na ordem das sentenças.
//!
//! A dupla verificação (substring na sentença, igualdade exata no token) faz com que
//! "room" não gere contexto em "The bedroom was huge.": a sentença passa no primeiro
//! filtro mas não tem o token "room".
//!
//! ```rust
//! use review_core::context::extract_context;
//!
//! let review = "The room was small. The wifi was fast and reliable. Breakfast was cold.";
//! assert_eq!(extract_context("wifi", review), "The wifi was fast and");
//! assert_eq!(extract_context("parking", review), "");
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sentence::{SentenceSegmenter, UnicodeSentenceSegmenter};
use crate::tokenizer::{StandardTokenizer, WordTokenizer};

/// Tamanho da janela ao redor do alvo (em tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub before: usize,
    pub after: usize,
}

impl ContextWindow {
    /// Intervalo `[start, end)` da janela para o token `index` numa sentença de `len` tokens.
    pub fn bounds(&self, index: usize, len: usize) -> (usize, usize) {
        let start = index.saturating_sub(self.before);
        let end = index.saturating_add(self.after).saturating_add(1).min(len);
        (start, end)
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self { before: 3, after: 3 }
    }
}

/// Uma menção do alvo encontrada numa sentença.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    /// Posição da sentença na avaliação (0, 1, 2...).
    pub sentence_index: usize,
    /// Índice do token que casou exatamente com o alvo.
    pub token_index: usize,
    /// Primeiro token da janela (inclusivo).
    pub window_start: usize,
    /// Último token da janela (exclusivo).
    pub window_end: usize,
    /// Tokens da janela unidos por espaço.
    pub text: String,
}

/// Extrator de contexto com segmentador e tokenizador injetáveis.
#[derive(Clone)]
pub struct ContextExtractor {
    segmenter: Arc<dyn SentenceSegmenter>,
    tokenizer: Arc<dyn WordTokenizer>,
    window: ContextWindow,
}

impl ContextExtractor {
    pub fn new() -> Self {
        Self {
            segmenter: Arc::new(UnicodeSentenceSegmenter),
            tokenizer: Arc::new(StandardTokenizer),
            window: ContextWindow::default(),
        }
    }

    pub fn with_segmenter(mut self, segmenter: impl SentenceSegmenter + 'static) -> Self {
        self.segmenter = Arc::new(segmenter);
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: impl WordTokenizer + 'static) -> Self {
        self.tokenizer = Arc::new(tokenizer);
        self
    }

    pub fn with_window(mut self, window: ContextWindow) -> Self {
        self.window = window;
        self
    }

    pub fn window(&self) -> ContextWindow {
        self.window
    }

    pub fn tokenizer(&self) -> Arc<dyn WordTokenizer> {
        Arc::clone(&self.tokenizer)
    }

    pub fn sentences(&self, review: &str) -> Vec<String> {
        self.segmenter.segment(review)
    }

    /// Menções do alvo numa lista de sentenças já segmentadas.
    pub fn mentions_in(&self, target: &str, sentences: &[String]) -> Vec<Mention> {
        if target.is_empty() {
            return vec![];
        }
        let target_lower = target.to_lowercase();

        sentences
            .iter()
            .enumerate()
            .filter(|(_, sentence)| sentence.to_lowercase().contains(&target_lower))
            .filter_map(|(sentence_index, sentence)| {
                let tokens = self.tokenizer.tokenize(sentence);
                let token_index = tokens
                    .iter()
                    .position(|t| t.text.to_lowercase() == target_lower);
                let Some(token_index) = token_index else {
                    debug!(sentence_index, "alvo só aparece como substring, sentença ignorada");
                    return None;
                };
                let (window_start, window_end) = self.window.bounds(token_index, tokens.len());
                let text = tokens[window_start..window_end]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                Some(Mention {
                    sentence_index,
                    token_index,
                    window_start,
                    window_end,
                    text,
                })
            })
            .collect()
    }

    pub fn mentions(&self, target: &str, review: &str) -> Vec<Mention> {
        self.mentions_in(target, &self.sentences(review))
    }

    /// Contexto do alvo: janelas de todas as menções unidas por espaço.
    pub fn extract(&self, target: &str, review: &str) -> String {
        join_mentions(&self.mentions(target, review))
    }
}

impl Default for ContextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn join_mentions(mentions: &[Mention]) -> String {
    mentions
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extrai o contexto com o segmentador, tokenizador e janela padrão.
pub fn extract_context(target: &str, review: &str) -> String {
    ContextExtractor::new().extract(target, review)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVIEW: &str = "The room was small. The wifi was fast and reliable. Breakfast was cold.";

    #[test]
    fn test_extract_wifi_example() {
        assert_eq!(extract_context("wifi", REVIEW), "The wifi was fast and");
    }

    #[test]
    fn test_extract_not_mentioned() {
        assert_eq!(extract_context("parking", REVIEW), "");
    }

    #[test]
    fn test_extract_empty_review() {
        assert_eq!(extract_context("wifi", ""), "");
    }

    #[test]
    fn test_substring_only_sentence_contributes_nothing() {
        // "room" está em "bedroom", mas nunca como token isolado
        let review = "The bedroom was huge. The bathroom was tiny.";
        let extractor = ContextExtractor::new();
        let sentences = extractor.sentences(review);
        assert!(sentences.iter().all(|s| s.to_lowercase().contains("room")));
        assert_eq!(extractor.extract("room", review), "");
    }

    #[test]
    fn test_window_clamped_at_sentence_start() {
        // 5 tokens, alvo no índice 0 -> [0, 4)
        let mentions = ContextExtractor::new().mentions("wifi", "Wifi was very fast indeed");
        assert_eq!(mentions.len(), 1);
        assert_eq!((mentions[0].window_start, mentions[0].window_end), (0, 4));
        assert_eq!(mentions[0].text, "Wifi was very fast");
    }

    #[test]
    fn test_window_clamped_at_sentence_end() {
        // n = 5, alvo no último índice -> [n-4, n)
        let mentions = ContextExtractor::new().mentions("friendly", "The staff were very friendly");
        assert_eq!(mentions[0].token_index, 4);
        assert_eq!((mentions[0].window_start, mentions[0].window_end), (1, 5));
        assert_eq!(mentions[0].text, "staff were very friendly");
    }

    #[test]
    fn test_window_never_crosses_sentences() {
        let context = extract_context("pool", "Loved it. Pool was warm. Bar was closed.");
        assert_eq!(context, "Pool was warm .");
    }

    #[test]
    fn test_window_does_not_cross_after_time_abbreviation() {
        let context = extract_context("wifi", "We arrived at 9 a.m. The wifi was awful.");
        assert_eq!(context, "The wifi was awful .");
    }

    #[test]
    fn test_multiple_sentences_joined_in_order() {
        let review = "The pool was great. I loved the pool area. Nothing else.";
        assert_eq!(
            extract_context("pool", review),
            "The pool was great . I loved the pool area ."
        );
    }

    #[test]
    fn test_first_token_match_only() {
        let mentions = ContextExtractor::new().mentions("pool", "The pool and the pool bar were open");
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].token_index, 1);
    }

    #[test]
    fn test_case_insensitive_target() {
        assert_eq!(extract_context("WIFI", REVIEW), "The wifi was fast and");
    }

    #[test]
    fn test_custom_window() {
        let extractor = ContextExtractor::new().with_window(ContextWindow { before: 1, after: 1 });
        assert_eq!(extractor.extract("wifi", REVIEW), "The wifi was");
    }

    #[test]
    fn test_window_bounds() {
        let window = ContextWindow::default();
        assert_eq!(window.bounds(0, 5), (0, 4));
        assert_eq!(window.bounds(4, 5), (1, 5));
        assert_eq!(window.bounds(5, 12), (2, 9));
        assert_eq!(window.bounds(0, 1), (0, 1));
    }

    #[test]
    fn test_pluggable_tokenizer() {
        struct WhitespaceTokenizer;
        impl WordTokenizer for WhitespaceTokenizer {
            fn tokenize(&self, text: &str) -> Vec<crate::tokenizer::Token> {
                text.split_whitespace()
                    .enumerate()
                    .map(|(index, w)| crate::tokenizer::Token {
                        text: w.to_string(),
                        start: 0,
                        end: 0,
                        index,
                    })
                    .collect()
            }
        }
        // Sem separar a pontuação, "wifi," não é igual a "wifi"
        let extractor = ContextExtractor::new().with_tokenizer(WhitespaceTokenizer);
        assert_eq!(extractor.extract("wifi", "Free wifi, great view."), "");
        assert_eq!(extractor.extract("wifi", "The wifi works."), "The wifi works.");
    }
}
