//! # Tokenizador de Palavras para Inglês
//!
//! Responsável por dividir uma sentença em tokens individuais (palavras, pontuações).
//! Cada token preserva sua posição original no texto (offset), o que permite
//! destacar a janela de contexto do alvo na interface web.
//!
//! ## Esquema de Tokenização
//!
//! - Sequências alfanuméricas formam uma palavra (hífens internos são mantidos: "check-in").
//! - Números decimais permanecem juntos ("4.5").
//! - Abreviações conhecidas mantêm o ponto ("Dr.", "approx.").
//! - Clíticos do inglês são separados da palavra base, como faz o tokenizador
//!   Treebank: "don't" -> "do", "n't"; "hotel's" -> "hotel", "'s".
//! - Qualquer outro caractere não-espaço vira um token próprio.
//!
//! A caixa (maiúsculas/minúsculas) é preservada: comparar sem caixa é responsabilidade
//! de quem chama.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use review_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("The staff wasn't friendly.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["The", "staff", "was", "n't", "friendly", "."]);
//! ```

use serde::{Deserialize, Serialize};

/// Um token extraído do texto original.
///
/// O `Token` é a unidade atômica da extração de contexto. Ele mantém a referência
/// exata de sua posição no texto (`start` e `end`), útil para destacar a janela
/// ao redor do alvo sem alterar a formatação original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "wifi", ",", "n't").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Capacidade de tokenização injetável.
///
/// Divide um texto em palavras preservando a ordem e a caixa original.
/// Implementações precisam ser `Send + Sync` para que o pipeline possa ser
/// compartilhado pelo servidor web.
pub trait WordTokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Tokenizador padrão (ver documentação do módulo).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTokenizer;

impl WordTokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text)
    }
}

/// Abreviações comuns em inglês cujo ponto não encerra a palavra
pub(crate) const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "ave", "rd", "blvd",
    "vs", "etc", "approx", "appt", "apt", "dept", "hrs", "mins", "inc", "ltd",
    "corp", "jan", "feb", "apr", "jun", "jul", "aug", "sept", "oct", "nov",
    "e.g", "i.e", "a.m", "p.m",
];

/// Clíticos separados após o apóstrofo (sem o apóstrofo)
const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m"];

/// Tokeniza um texto com o tokenizador padrão.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = tokenize_standard(text);

    // Re-indexa os tokens
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

fn tokenize_standard(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start = 0;
    let mut current_text = String::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_pos, ch) = chars[i];
        let next = chars.get(i + 1).map(|(_, c)| *c);

        if ch.is_alphanumeric()
            || (ch == '-' && !current_text.is_empty() && next.map_or(false, char::is_alphanumeric))
        {
            if current_text.is_empty() {
                current_start = byte_pos;
            }
            current_text.push(ch);
        } else if ch == '.' && !current_text.is_empty() {
            let lower = current_text.to_lowercase();
            let is_abbrev = ABBREVIATIONS.contains(&lower.as_str());
            let current_is_num = current_text.chars().all(char::is_numeric);
            let next_is_num = next.map_or(false, char::is_numeric);
            // "e.g." / "a.m.": letra isolada seguida de ponto e outra letra
            let dotted_initial = current_text.chars().last().map_or(false, char::is_alphabetic)
                && next.map_or(false, char::is_alphabetic)
                && chars.get(i + 2).map_or(false, |(_, c)| *c == '.');

            if (current_is_num && next_is_num) || dotted_initial {
                current_text.push('.');
            } else if is_abbrev {
                current_text.push('.');
                flush_token(&mut tokens, &mut current_text, current_start, byte_pos + 1);
            } else {
                flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
                push_token(&mut tokens, ".".to_string(), byte_pos, byte_pos + 1);
            }
        } else if (ch == '\'' || ch == '\u{2019}') && !current_text.is_empty() {
            i = split_clitic(text, &chars, i, &mut tokens, &mut current_text, current_start);
            continue;
        } else if ch.is_whitespace() {
            flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
        } else {
            flush_token(&mut tokens, &mut current_text, current_start, byte_pos);
            push_token(&mut tokens, ch.to_string(), byte_pos, byte_pos + ch.len_utf8());
        }
        i += 1;
    }

    flush_token(&mut tokens, &mut current_text, current_start, text.len());

    tokens
}

/// Trata um apóstrofo no meio de uma palavra.
///
/// Retorna o índice do próximo caractere a processar.
fn split_clitic(
    text: &str,
    chars: &[(usize, char)],
    apostrophe: usize,
    tokens: &mut Vec<Token>,
    current_text: &mut String,
    current_start: usize,
) -> usize {
    let (quote_pos, quote) = chars[apostrophe];
    let mut j = apostrophe + 1;
    while j < chars.len() && chars[j].1.is_alphabetic() {
        j += 1;
    }
    let suffix_end = chars.get(j).map_or(text.len(), |(pos, _)| *pos);
    let suffix_start = quote_pos + quote.len_utf8();
    let suffix = text[suffix_start..suffix_end].to_lowercase();

    let ends_with_n = current_text
        .chars()
        .last()
        .map_or(false, |c| c.eq_ignore_ascii_case(&'n'));

    if suffix == "t" && ends_with_n && current_text.chars().count() > 1 {
        // "don't" -> "do" + "n't"
        current_text.pop();
        let n_pos = quote_pos - 1;
        flush_token(tokens, current_text, current_start, n_pos);
        push_token(tokens, text[n_pos..suffix_end].to_string(), n_pos, suffix_end);
        j
    } else if CLITICS.contains(&suffix.as_str()) {
        flush_token(tokens, current_text, current_start, quote_pos);
        push_token(tokens, text[quote_pos..suffix_end].to_string(), quote_pos, suffix_end);
        j
    } else if suffix.is_empty() {
        // Apóstrofo final (ex: "guests'") é pontuação
        flush_token(tokens, current_text, current_start, quote_pos);
        push_token(tokens, quote.to_string(), quote_pos, suffix_start);
        apostrophe + 1
    } else {
        // "o'clock": o apóstrofo faz parte da palavra
        current_text.push(quote);
        apostrophe + 1
    }
}

/// Fecha o token acumulado e adiciona à lista (se não vazio)
fn flush_token(tokens: &mut Vec<Token>, text: &mut String, start: usize, end: usize) {
    if !text.is_empty() {
        tokens.push(Token {
            text: text.clone(),
            start,
            end,
            index: 0, // será atribuído depois
        });
        text.clear();
    }
}

/// Adiciona um token de pontuação diretamente
fn push_token(tokens: &mut Vec<Token>, text: String, start: usize, end: usize) {
    tokens.push(Token {
        text,
        start,
        end,
        index: 0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenize_basic_sentence() {
        assert_eq!(
            texts("The wifi was fast and reliable."),
            vec!["The", "wifi", "was", "fast", "and", "reliable", "."]
        );
    }

    #[test]
    fn test_tokenize_offsets_match_source() {
        let text = "Nice pool, great view!";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_tokenize_indexes_are_sequential() {
        let tokens = tokenize("a b c");
        let idx: Vec<usize> = tokens.iter().map(|t| t.index).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_tokenize_clitics() {
        assert_eq!(texts("don't"), vec!["do", "n't"]);
        assert_eq!(texts("the hotel's pool"), vec!["the", "hotel", "'s", "pool"]);
        assert_eq!(texts("we'll return"), vec!["we", "'ll", "return"]);
        assert_eq!(texts("at 5 o'clock"), vec!["at", "5", "o'clock"]);
    }

    #[test]
    fn test_tokenize_hyphen_numbers_and_abbreviations() {
        assert_eq!(texts("easy check-in"), vec!["easy", "check-in"]);
        assert_eq!(texts("rated 4.5 stars"), vec!["rated", "4.5", "stars"]);
        assert_eq!(texts("Dr. Lee helped"), vec!["Dr.", "Lee", "helped"]);
        assert_eq!(texts("e.g. towels"), vec!["e.g.", "towels"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
