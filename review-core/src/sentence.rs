//! # Segmentação de Sentenças
//!
//! Divide uma avaliação em sentenças usando as regras de fronteira de sentença do
//! Unicode (UAX #29, via `unicode-segmentation`).
//!
//! O UAX #29 quebra depois de "Dr." quando o ponto é seguido de espaço e maiúscula.
//! Por isso, uma segunda passada re-une fragmentos que terminam em uma abreviação
//! conhecida (mesma lista usada pelo [`tokenizer`](crate::tokenizer)):
//!
//! - Títulos ("Mr.", "Dr.", "St."...) sempre continuam a sentença.
//! - As demais ("a.m.", "etc.") só continuam se o fragmento seguinte não começar com
//!   maiúscula: em "at 9 a.m. The wifi..." o ponto também encerra a sentença.
//!
//! ```rust
//! use review_core::sentence::split_sentences;
//!
//! let sentences = split_sentences("Dr. Lee was kind. The room was cold!");
//! assert_eq!(sentences, vec!["Dr. Lee was kind.", "The room was cold!"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::tokenizer::ABBREVIATIONS;

/// Capacidade de segmentação de sentenças injetável.
///
/// Deve ser determinística e preservar a ordem do texto.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Segmentador padrão baseado em UAX #29 + abreviações do inglês.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSegmenter;

impl SentenceSegmenter for UnicodeSentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        split_sentences(text)
    }
}

/// Divide o texto em sentenças (sem espaços nas bordas, sem sentenças vazias).
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut pending = String::new();

    let chunks: Vec<&str> = text.split_sentence_bounds().collect();
    for (i, chunk) in chunks.iter().enumerate() {
        pending.push_str(chunk);
        if continues_after_abbreviation(pending.trim_end(), chunks.get(i + 1).copied()) {
            continue;
        }
        flush_sentence(&mut sentences, &mut pending);
    }
    flush_sentence(&mut sentences, &mut pending);

    sentences
}

fn flush_sentence(sentences: &mut Vec<String>, pending: &mut String) {
    let trimmed = pending.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    pending.clear();
}

/// Abreviações que precedem um nome e nunca encerram a sentença
const TITLE_ABBREVIATIONS: &[&str] = &["mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st"];

/// Decide se o fragmento terminado em abreviação deve ser unido ao próximo.
fn continues_after_abbreviation(fragment: &str, next: Option<&str>) -> bool {
    let Some(abbreviation) = trailing_abbreviation(fragment) else {
        return false;
    };
    if TITLE_ABBREVIATIONS.contains(&abbreviation.as_str()) {
        return true;
    }
    next.and_then(|n| n.trim_start().chars().next())
        .is_some_and(|c| !c.is_uppercase())
}

/// Abreviação conhecida no fim do fragmento (ex: "... with Dr." -> "dr")
fn trailing_abbreviation(fragment: &str) -> Option<String> {
    let without_dot = fragment.strip_suffix('.')?;
    let last_word = without_dot
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    (!last_word.is_empty() && ABBREVIATIONS.contains(&last_word.as_str())).then_some(last_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic_review() {
        let sentences =
            split_sentences("The room was small. The wifi was fast and reliable. Breakfast was cold.");
        assert_eq!(
            sentences,
            vec![
                "The room was small.",
                "The wifi was fast and reliable.",
                "Breakfast was cold."
            ]
        );
    }

    #[test]
    fn test_split_keeps_abbreviations() {
        let sentences = split_sentences("We met Mr. Smith at 9 a.m. today. He was great.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("We met Mr. Smith"));
        assert_eq!(sentences[1], "He was great.");
    }

    #[test]
    fn test_time_abbreviation_can_end_sentence() {
        let sentences = split_sentences("We arrived at 9 a.m. The wifi was awful.");
        assert_eq!(sentences, vec!["We arrived at 9 a.m.", "The wifi was awful."]);

        let sentences = split_sentences("Towels, soap, etc. Everything was provided.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_title_abbreviation_always_joins() {
        let sentences = split_sentences("Ask for Dr. Lee at the desk. She was kind.");
        assert_eq!(sentences, vec!["Ask for Dr. Lee at the desk.", "She was kind."]);
    }

    #[test]
    fn test_split_question_and_exclamation() {
        let sentences = split_sentences("Would I return? Absolutely! Great stay");
        assert_eq!(sentences, vec!["Would I return?", "Absolutely!", "Great stay"]);
    }

    #[test]
    fn test_split_empty_and_whitespace() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_segmenter_trait_object() {
        let segmenter: Box<dyn SentenceSegmenter> = Box::new(UnicodeSentenceSegmenter);
        assert_eq!(segmenter.segment("One. Two.").len(), 2);
    }
}
