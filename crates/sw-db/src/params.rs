//! Bind placeholder rendering for ledger statements.

use sw_core::ParamStyle;

/// Hands out placeholders in order: `?, ?, ...` or `$1, $2, ...`.
#[derive(Debug)]
pub struct Placeholders {
    style: ParamStyle,
    next: usize,
}

impl Placeholders {
    pub fn new(style: ParamStyle) -> Self {
        Self { style, next: 0 }
    }

    /// Placeholder for the next parameter
    pub fn next_placeholder(&mut self) -> String {
        self.next += 1;
        match self.style {
            ParamStyle::QuestionMark => "?".to_string(),
            ParamStyle::DollarSign => format!("${}", self.next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_mark_repeats() {
        let mut p = Placeholders::new(ParamStyle::QuestionMark);
        for _ in 0..100 {
            assert_eq!(p.next_placeholder(), "?");
        }
    }

    #[test]
    fn test_dollar_sign_counts_from_one() {
        let mut p = Placeholders::new(ParamStyle::DollarSign);
        for i in 1..=100 {
            assert_eq!(p.next_placeholder(), format!("${i}"));
        }
    }
}
