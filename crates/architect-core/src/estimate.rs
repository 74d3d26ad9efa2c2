//! Token and cost estimation for display.
//!
//! Estimates are approximate (1 token per 4 characters) and never influence
//! the request actually sent to the model.

/// Fixed token surcharge per multimodal attachment.
pub const TOKENS_PER_ATTACHMENT: u64 = 258;
/// USD per million input tokens.
pub const INPUT_RATE_PER_MILLION: f64 = 0.10;
/// USD per million output tokens.
pub const OUTPUT_RATE_PER_MILLION: f64 = 0.30;
/// Shown instead of a cost that rounds to nothing.
pub const NEGLIGIBLE_COST: &str = "< $0.0001";

const NEGLIGIBLE_THRESHOLD: f64 = 0.00001;

#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub characters: usize,
    pub tokens: u64,
    /// Formatted currency string
    pub cost: String,
}

/// Approximate token count of a text.
pub fn text_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4)
}

/// Estimate for the multimodal input of the generation stage.
pub fn estimate_input(idea: &str, attachment_count: usize) -> Estimate {
    let characters = idea.chars().count();
    let tokens = text_tokens(idea) + attachment_count as u64 * TOKENS_PER_ATTACHMENT;
    Estimate {
        characters,
        tokens,
        cost: format_cost(cost_for(tokens, INPUT_RATE_PER_MILLION)),
    }
}

/// Estimate for a produced output (super prompt or final result).
pub fn estimate_output(content: &str) -> Estimate {
    if content.is_empty() {
        return Estimate {
            characters: 0,
            tokens: 0,
            cost: "$0.00".to_string(),
        };
    }

    let tokens = text_tokens(content);
    Estimate {
        characters: content.chars().count(),
        tokens,
        cost: format_cost(cost_for(tokens, OUTPUT_RATE_PER_MILLION)),
    }
}

fn cost_for(tokens: u64, rate_per_million: f64) -> f64 {
    tokens as f64 / 1_000_000.0 * rate_per_million
}

pub fn format_cost(cost: f64) -> String {
    if cost < NEGLIGIBLE_THRESHOLD {
        NEGLIGIBLE_COST.to_string()
    } else {
        format!("${cost:.5}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_ceil_of_quarter_length() {
        assert_eq!(text_tokens(""), 0);
        assert_eq!(text_tokens("a"), 1);
        assert_eq!(text_tokens("abcd"), 1);
        assert_eq!(text_tokens("abcde"), 2);
        for len in 0..64 {
            let text = "x".repeat(len);
            assert_eq!(text_tokens(&text), len.div_ceil(4) as u64);
        }
    }

    #[test]
    fn attachments_add_fixed_surcharge() {
        let base = estimate_input("Write a cold-call script", 0);
        for n in 1..5 {
            let with = estimate_input("Write a cold-call script", n);
            assert_eq!(with.tokens - base.tokens, 258 * n as u64);
        }
    }

    #[test]
    fn tiny_costs_are_negligible() {
        let est = estimate_input("hello", 0);
        assert_eq!(est.cost, NEGLIGIBLE_COST);
    }

    #[test]
    fn larger_costs_use_five_decimals() {
        // 400 tokens * 0.10 / 1M = 0.00004
        let est = estimate_input(&"x".repeat(1600), 0);
        assert_eq!(est.tokens, 400);
        assert_eq!(est.cost, "$0.00004");

        // 1000 tokens * 0.30 / 1M = 0.0003
        let out = estimate_output(&"y".repeat(4000));
        assert_eq!(out.tokens, 1000);
        assert_eq!(out.cost, "$0.00030");
    }

    #[test]
    fn empty_output_reports_zero() {
        let est = estimate_output("");
        assert_eq!(est.tokens, 0);
        assert_eq!(est.cost, "$0.00");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let est = estimate_input("ação", 0);
        assert_eq!(est.characters, 4);
        assert_eq!(est.tokens, 1);
    }
}
