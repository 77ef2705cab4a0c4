//! # Tipos de Erro
//!
//! Taxonomia de falhas da análise de avaliações:
//!
//! | Erro            | Quando ocorre                                          | Fatal? |
//! |-----------------|--------------------------------------------------------|--------|
//! | `InputError`    | Alvo ou avaliação vazios (validação antes da extração) | Não    |
//! | `ScoreError`    | O avaliador de polaridade falhou                       | Não    |
//! | `LexiconError`  | Arquivo de léxico ilegível ou malformado               | Startup|
//! | `AnalysisError` | União de entrada inválida e falha de pontuação         | Não    |
//!
//! "Alvo não mencionado" não é erro: é um resultado normal
//! ([`TargetSentiment::NotMentioned`](crate::classifier::TargetSentiment::NotMentioned)).

use std::path::PathBuf;

use thiserror::Error;

/// Entrada rejeitada antes de qualquer processamento.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// O campo indicado (`"target"` ou `"review"`) está vazio ou só tem espaços.
    #[error("empty input: {0} must not be blank")]
    EmptyInput(&'static str),
}

/// Falha da capacidade de pontuação de polaridade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("sentiment lexicon is empty or unavailable")]
    LexiconUnavailable,
    #[error("scorer failed: {0}")]
    Failed(String),
}

/// Falha ao carregar um léxico (sentimento ou emoção).
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed lexicon line {line}: {content:?}")]
    Malformed { line: usize, content: String },
    #[error("invalid valence on line {line}: {value:?}")]
    InvalidValence { line: usize, value: String },
}

/// Erro de uma análise completa de avaliação.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("error during sentiment analysis: {0}")]
    Scoring(#[from] ScoreError),
}

/// Garante que o campo não está em branco, devolvendo-o sem espaços nas bordas.
pub(crate) fn require_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(InputError::EmptyInput(field))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("target", "  wifi "), Ok("wifi"));
        assert_eq!(
            require_text("review", " \n\t"),
            Err(InputError::EmptyInput("review"))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InputError::EmptyInput("target").to_string(),
            "empty input: target must not be blank"
        );
        let err: AnalysisError = ScoreError::LexiconUnavailable.into();
        assert_eq!(
            err.to_string(),
            "error during sentiment analysis: sentiment lexicon is empty or unavailable"
        );
    }
}
