/// Average characters per token used by the estimator. No real tokenizer is
/// involved; this ratio approximates the completion model's tokenizer well
/// enough for budgeting.
const CHARS_PER_TOKEN: f64 = 3.5;

/// Safety factor absorbing the estimation error when cutting to budget.
const TRUNCATION_MARGIN: f64 = 0.9;

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate_tokens(text: &str) -> usize {
    let chars = text.chars().count();
    (chars as f64 / CHARS_PER_TOKEN).ceil() as usize
}

/// Shortens `text` to roughly `max_tokens` estimated tokens.
///
/// Within budget the text is returned unchanged. Otherwise a prefix of
/// `floor(chars * ratio * 0.9)` characters is kept. The cut lands on a
/// character boundary but may fall mid-sentence; the function never fails,
/// it only shortens.
pub fn truncate_to_tokens(text: &str, max_tokens: usize) -> String {
    let estimated = estimate_tokens(text);
    if estimated <= max_tokens {
        return text.to_string();
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_chars = {
        let ratio = max_tokens as f64 / estimated as f64;
        (text.chars().count() as f64 * ratio * TRUNCATION_MARGIN).floor() as usize
    };
    text.chars().take(max_chars).collect()
}
