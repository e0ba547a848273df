//! Text processing: markdown cleaning and bilingual tokenization
//!
//! Tokens are produced from already-cleaned text:
//! - ASCII letter runs are lower-cased and kept when longer than one character
//! - every CJK ideograph (U+4E00..=U+9FFF) is its own token
//! - digits, punctuation, whitespace and any other character end a run and are dropped
//! - stop words (English and Chinese) are removed

mod markdown;

pub use markdown::{clean_markdown, extract_text, limit_paragraphs, truncate_chars};

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;

static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

static STEMMER: OnceLock<Stemmer> = OnceLock::new();

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "before", "being", "but", "by", "can", "could", "did", "do", "does", "doing", "for",
    "from", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "if", "in", "into", "is", "it", "its", "just", "me", "my", "no", "nor", "not", "of", "off",
    "on", "only", "or", "our", "ours", "out", "over", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

const CHINESE_STOP_WORDS: &[&str] = &[
    "的", "了", "是", "在", "和", "有", "我", "你", "他", "她", "它", "们", "这", "那", "也",
    "就", "都", "而", "及", "与", "或", "一", "个", "不", "上", "下", "中", "为", "以", "被",
    "把", "对", "于", "从", "到", "之", "着", "过", "吗", "呢", "吧", "啊", "很", "还", "又",
];

fn get_stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        ENGLISH_STOP_WORDS
            .iter()
            .chain(CHINESE_STOP_WORDS.iter())
            .copied()
            .collect()
    })
}

fn get_stemmer() -> &'static Stemmer {
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::English))
}

/// Returns true for a member of the bilingual stop word set
pub fn is_stop_word(token: &str) -> bool {
    get_stop_words().contains(token)
}

/// Returns true for characters in the CJK Unified Ideographs block
pub fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Tokenize cleaned text into an ordered token stream
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            word.push(c.to_ascii_lowercase());
            continue;
        }

        flush_word(&mut word, &mut tokens);

        if is_cjk_ideograph(c) {
            push_token(c.to_string(), &mut tokens);
        }
    }
    flush_word(&mut word, &mut tokens);

    tokens
}

/// Tokenize text with optional Porter stemming of Latin tokens
///
/// CJK tokens are never stemmed.
pub fn tokenize_with_stemming(text: &str, stem: bool) -> Vec<String> {
    let tokens = tokenize(text);
    if !stem {
        return tokens;
    }

    let stemmer = get_stemmer();
    tokens
        .into_iter()
        .map(|t| {
            if t.chars().all(|c| c.is_ascii_alphabetic()) {
                stemmer.stem(&t).into_owned()
            } else {
                t
            }
        })
        .collect()
}

fn flush_word(word: &mut String, tokens: &mut Vec<String>) {
    if word.len() > 1 {
        push_token(std::mem::take(word), tokens);
    } else {
        word.clear();
    }
}

fn push_token(token: String, tokens: &mut Vec<String>) {
    if !token.is_empty() && !is_stop_word(&token) {
        tokens.push(token);
    }
}
