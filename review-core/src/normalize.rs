//! # Normalização de Texto
//!
//! Etapas de limpeza usadas pela análise da avaliação completa:
//!
//! - [`clean_text`]: minúsculas + remoção da pontuação ASCII.
//! - [`is_stopword`]: lista de stop words do inglês (a mesma do NLTK).
//! - [`lemmatize`]: lematizador de substantivos baseado em regras de sufixo,
//!   com tabela de plurais irregulares ("children" -> "child").

use std::collections::HashSet;
use std::sync::LazyLock;

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Converte para minúsculas e remove a pontuação ASCII (ver [`char::is_ascii_punctuation`]).
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Remove as stop words, preservando a ordem.
pub fn remove_stopwords<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.as_ref())
        .filter(|w| !is_stopword(w))
        .map(str::to_string)
        .collect()
}

/// Reduz um substantivo à forma singular.
///
/// Palavras curtas (≤ 3 letras) e terminações que não são plural ("-ss", "-us", "-is")
/// são devolvidas sem alteração.
pub fn lemmatize(word: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_NOUNS.iter().find(|(plural, _)| *plural == word) {
        return lemma.to_string();
    }
    if word.chars().count() <= 3 || !word.chars().all(char::is_alphabetic) {
        return word.to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    for (suffix, replacement) in SUFFIX_RULES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() >= 2 {
                return format!("{stem}{replacement}");
            }
        }
    }
    word.to_string()
}

/// Regras de sufixo do plural (ordem importa: a mais específica primeiro)
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("s", ""),
];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"), ("people", "person"), ("men", "man"), ("women", "woman"),
    ("feet", "foot"), ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"),
    ("knives", "knife"), ("wives", "wife"), ("lives", "life"), ("leaves", "leaf"),
    ("shelves", "shelf"), ("loaves", "loaf"), ("halves", "half"), ("news", "news"),
    ("series", "series"), ("species", "species"),
];

/// Stop words do inglês (NLTK)
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further",
    "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re",
    "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't",
    "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't",
    "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't",
    "won", "won't", "wouldn", "wouldn't",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("The Room's view, WOW!"), "the rooms view wow");
    }

    #[test]
    fn test_remove_stopwords() {
        let words = ["the", "pool", "was", "not", "heated"];
        assert_eq!(remove_stopwords(&words), vec!["pool", "heated"]);
    }

    #[test]
    fn test_lemmatize_regular_plurals() {
        assert_eq!(lemmatize("rooms"), "room");
        assert_eq!(lemmatize("beds"), "bed");
        assert_eq!(lemmatize("bodies"), "body");
        assert_eq!(lemmatize("dishes"), "dish");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("glasses"), "glass");
    }

    #[test]
    fn test_lemmatize_irregular_and_unchanged() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("people"), "person");
        assert_eq!(lemmatize("bus"), "bus");
        assert_eq!(lemmatize("glass"), "glass");
        assert_eq!(lemmatize("oasis"), "oasis");
        assert_eq!(lemmatize("wifi"), "wifi");
        assert_eq!(lemmatize("its"), "its");
    }
}
