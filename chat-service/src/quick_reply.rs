//! Intent shortcuts over the raw question text, checked before any
//! retrieval: greetings and identity questions get canned replies,
//! capability questions change the retrieval parameters instead.

use common::language::Language;

use crate::messages;

const GREETINGS: &[&str] = &[
    "привет",
    "здравствуй",
    "здравствуйте",
    "добрый день",
    "добрый вечер",
    "доброе утро",
    "хай",
    "здарова",
    "приветствую",
    "салам",
    "сәлем",
    "сәлеметсіз бе",
    "салем",
];

const IDENTITY_PATTERNS: &[&str] = &[
    "кто ты",
    "ты кто",
    "кто вы",
    "вы кто",
    "что за бот",
    "кто такой",
    "представься",
    "сен кімсің",
    "кімсің",
    "сіз кімсіз",
    "бот кім",
    "таныстыр",
];

const CAPABILITY_PATTERNS: &[&str] = &[
    "что умеешь",
    "что ты умеешь",
    "на что можешь ответить",
    "чем можешь помочь",
    "твои возможности",
    "что можешь",
    "какие вопросы",
    "на что отвечаешь",
    "не істей аласың",
    "неге жауап бере аласың",
    "мүмкіндіктерің",
    "қандай сұрақтар",
];

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_greeting(text: &str) -> bool {
    GREETINGS.iter().any(|greeting| {
        text == *greeting
            || text.starts_with(&format!("{greeting} "))
            || text.starts_with(&format!("{greeting}!"))
            || text.starts_with(&format!("{greeting},"))
    })
}

fn is_who_are_you(text: &str) -> bool {
    IDENTITY_PATTERNS
        .iter()
        .any(|pattern| text.contains(pattern) || text == pattern.replacen(' ', "", 1))
}

/// Capability questions are not answered directly; the caller widens the
/// retrieval budget and rewrites the user message into a topic summary
/// instruction instead.
pub fn is_capability_question(text: &str) -> bool {
    let text = normalize(text);
    !text.is_empty()
        && CAPABILITY_PATTERNS
            .iter()
            .any(|pattern| text.contains(pattern))
}

/// Returns the canned reply for greetings and identity questions, bypassing
/// retrieval entirely. Any other input returns `None` and proceeds through
/// the full pipeline.
pub fn quick_reply(message: &str, language: Language) -> Option<&'static str> {
    let text = normalize(message);
    if text.is_empty() {
        return None;
    }

    if is_greeting(&text) {
        return Some(messages::greeting(language));
    }
    if is_who_are_you(&text) {
        return Some(messages::identity(language));
    }
    None
}
