//! # Léxico de Emoções
//!
//! Mapeamento estático `palavra -> categoria de emoção` (ex: "betrayed" -> "cheated").
//! O léxico é imutável: carregado uma vez na inicialização e injetado em quem precisar.
//!
//! ## Formato do arquivo
//!
//! Uma entrada por linha, no estilo de um dicionário Python:
//!
//! ```text
//! 'victimized': 'cheated',
//! 'adorable': 'loved',
//! calm: safe
//! ```
//!
//! Aspas simples, vírgula final e linhas em branco são opcionais.
//!
//! ## Contagem
//!
//! Cada entrada do léxico cuja palavra aparece no texto contribui **uma** ocorrência
//! da sua emoção, na ordem do léxico (repetições da palavra no texto não contam duas vezes).

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*'?([^':,]+?)'?\s*:\s*'?([^':,]+?)'?\s*,?\s*$").expect("valid emotion entry regex")
});

/// Quantas vezes uma emoção foi encontrada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
}

/// Léxico de emoções, em ordem de arquivo.
#[derive(Debug, Clone, Default)]
pub struct EmotionLexicon {
    entries: Vec<(String, String)>,
}

impl EmotionLexicon {
    /// Léxico embutido com vocabulário comum em avaliações.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_EMOTIONS
                .iter()
                .map(|(word, emotion)| (word.to_string(), emotion.to_string()))
                .collect(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, LexiconError> {
        let mut entries = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let caps = ENTRY_RE.captures(line).ok_or_else(|| LexiconError::Malformed {
                line: i + 1,
                content: line.to_string(),
            })?;
            entries.push((caps[1].trim().to_lowercase(), caps[2].trim().to_lowercase()));
        }
        Ok(Self { entries })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emoções das entradas cuja palavra está em `words`, na ordem do léxico.
    pub fn tag<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let present: HashSet<&str> = words.iter().map(|w| w.as_ref()).collect();
        self.entries
            .iter()
            .filter(|(word, _)| present.contains(word.as_str()))
            .map(|(_, emotion)| emotion.clone())
            .collect()
    }

    /// Agrega as emoções encontradas em contagens (ordem da primeira ocorrência).
    pub fn count<S: AsRef<str>>(&self, words: &[S]) -> Vec<EmotionCount> {
        count_emotions(&self.tag(words))
    }
}

pub fn count_emotions(emotions: &[String]) -> Vec<EmotionCount> {
    let mut counts: Vec<EmotionCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for emotion in emotions {
        match positions.get(emotion.as_str()) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(emotion.as_str(), counts.len());
                counts.push(EmotionCount {
                    emotion: emotion.clone(),
                    count: 1,
                });
            }
        }
    }
    counts
}

const BUILTIN_EMOTIONS: &[(&str, &str)] = &[
    ("victimized", "cheated"), ("accused", "cheated"), ("betrayed", "cheated"),
    ("cheated", "cheated"), ("scammed", "cheated"), ("overcharged", "cheated"),
    ("adorable", "loved"), ("adored", "loved"), ("loved", "loved"), ("love", "loved"),
    ("welcomed", "loved"), ("cared", "loved"),
    ("afflicted", "sad"), ("agonized", "sad"), ("anguished", "sad"), ("bereaved", "sad"),
    ("blue", "sad"), ("sad", "sad"), ("unhappy", "sad"), ("miserable", "sad"),
    ("disappointed", "sad"), ("depressed", "sad"),
    ("aghast", "fearful"), ("alarmed", "fearful"), ("apprehensive", "fearful"),
    ("cautious", "fearful"), ("scared", "fearful"), ("afraid", "fearful"),
    ("unsafe", "fearful"), ("nervous", "fearful"), ("worried", "fearful"),
    ("amused", "happy"), ("animated", "happy"), ("beatific", "happy"),
    ("blissful", "happy"), ("cheerful", "happy"), ("delighted", "happy"),
    ("happy", "happy"), ("glad", "happy"), ("joyful", "happy"), ("pleased", "happy"),
    ("thrilled", "happy"), ("excited", "happy"), ("enjoyed", "happy"), ("fun", "happy"),
    ("angry", "angry"), ("annoyed", "angry"), ("appalled", "angry"), ("bitter", "angry"),
    ("boiling", "angry"), ("furious", "angry"), ("irritated", "angry"), ("outraged", "angry"),
    ("frustrated", "angry"), ("rude", "angry"),
    ("apathetic", "bored"), ("bored", "bored"), ("boring", "bored"), ("dull", "bored"),
    ("tedious", "bored"),
    ("appreciated", "esteemed"), ("respected", "esteemed"), ("valued", "esteemed"),
    ("attached", "attached"), ("belonging", "attached"), ("captivated", "attached"),
    ("attracted", "attracted"), ("agog", "attracted"), ("challenged", "attracted"),
    ("charmed", "attracted"), ("impressed", "attracted"),
    ("autonomous", "independent"), ("free", "independent"),
    ("awkward", "embarrassed"), ("embarrassed", "embarrassed"), ("ashamed", "embarrassed"),
    ("blocked", "powerless"), ("helpless", "powerless"), ("stuck", "powerless"),
    ("ignored", "powerless"),
    ("bewildered", "surprise"), ("surprised", "surprise"), ("shocked", "surprise"),
    ("amazed", "surprise"), ("astonished", "surprise"),
    ("bold", "fearless"), ("brave", "fearless"), ("certain", "fearless"),
    ("calm", "safe"), ("comfortable", "safe"), ("relaxed", "safe"), ("secure", "safe"),
    ("quiet", "safe"), ("peaceful", "safe"), ("cozy", "safe"),
    ("capable", "adequate"), ("clean", "adequate"), ("adequate", "adequate"),
    ("chagrined", "belittled"), ("belittled", "belittled"), ("insulted", "belittled"),
    ("chastised", "hated"), ("hated", "hated"), ("rejected", "hated"),
    ("categorized", "singled out"), ("acquitted", "singled out"), ("appeased", "singled out"),
    ("dirty", "disgusted"), ("filthy", "disgusted"), ("disgusting", "disgusted"),
    ("smelly", "disgusted"), ("gross", "disgusted"),
    ("ardent", "lustful"), ("aroused", "lustful"),
];
