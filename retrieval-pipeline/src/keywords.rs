/// Question words, pronouns and domain filler words that carry no lexical
/// signal for matching against document chunks.
const STOP_WORDS: &[&str] = &[
    "что",
    "как",
    "где",
    "когда",
    "какой",
    "какая",
    "какие",
    "это",
    "для",
    "при",
    "или",
    "если",
    "также",
    "может",
    "будет",
    "была",
    "было",
    "быть",
    "они",
    "его",
    "она",
    "оно",
    "мне",
    "вас",
    "вам",
    "нас",
    "нам",
    "них",
    "ним",
    "покажи",
    "покажите",
    "выглядит",
    "картинка",
    "изображение",
    "фото",
    "знак",
    "знаки",
    "разметка",
    "разметки",
];

/// Extracts the deduplicated keyword set from a question, in first
/// appearance order.
///
/// Lowercases, replaces every non-alphanumeric character with a space,
/// splits on whitespace, then drops tokens of length <= 2 and stop words.
/// An empty result means the question has no lexical signal and callers
/// switch to the unranked fallback.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for token in normalized.split_whitespace() {
        if token.chars().count() <= 2 {
            continue;
        }
        if STOP_WORDS.contains(&token) {
            continue;
        }
        if !keywords.iter().any(|existing| existing == token) {
            keywords.push(token.to_owned());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_stop_words() {
        let keywords = extract_keywords("Что такое остановка транспорта, и как её оформить?");
        assert!(keywords.contains(&"такое".to_string()));
        assert!(keywords.contains(&"остановка".to_string()));
        assert!(keywords.contains(&"транспорта".to_string()));
        assert!(keywords.contains(&"оформить".to_string()));
        assert!(!keywords.contains(&"что".to_string()), "stop word kept");
        assert!(!keywords.contains(&"как".to_string()), "stop word kept");
        assert!(!keywords.contains(&"и".to_string()), "short token kept");
    }

    #[test]
    fn deduplicates_preserving_first_appearance() {
        let keywords = extract_keywords("штраф штраф ШТРАФ протокол штраф");
        assert_eq!(keywords, vec!["штраф".to_string(), "протокол".to_string()]);
    }

    #[test]
    fn empty_and_fully_filtered_input_yield_empty_set() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("  ?!  ...  ").is_empty());
        assert!(extract_keywords("что как где").is_empty());
        assert!(extract_keywords("а и но").is_empty());
    }

    #[test]
    fn is_idempotent_over_its_own_output() {
        let first = extract_keywords("Какой штраф предусмотрен за превышение скорости?");
        let second = extract_keywords(&first.join(" "));
        assert_eq!(first, second);
    }
}
