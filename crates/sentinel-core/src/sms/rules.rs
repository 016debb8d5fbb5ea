//! Built-in SMS extraction rules

use regex::Regex;

use crate::categories::categorize_merchant;
use crate::models::TransactionType;

use super::{SmsDraft, SmsRule};

/// Grouped number with an optional two-digit fraction, e.g. `1,25,000.50`
const NUMBER: &str = r"([0-9]+(?:,[0-9]+)*(?:\.[0-9]{2})?)";

/// Checked before credit keywords, so a message matching both is a debit
pub const DEBIT_KEYWORDS: &[&str] = &["debited", "debit", "paid", "spent", "withdrawn"];

pub const CREDIT_KEYWORDS: &[&str] = &["credited", "credit", "received", "deposited"];

/// Strip thousands separators and convert
fn parse_grouped_number(s: &str) -> Option<f64> {
    s.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Currency marker ("Rs", "Rs.", "INR", "₹") followed by an amount
pub struct AmountRule {
    pattern: Regex,
}

impl AmountRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(&format!(r"(?i)(?:Rs\.?|INR|₹)\s*{}", NUMBER))
                .expect("valid regex"),
        }
    }
}

impl Default for AmountRule {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsRule for AmountRule {
    fn name(&self) -> &'static str {
        "amount"
    }

    fn apply(&self, text: &str, draft: &mut SmsDraft) {
        if let Some(caps) = self.pattern.captures(text) {
            draft.amount = parse_grouped_number(&caps[1]);
        }
    }
}

/// Debit/credit keyword classification
pub struct TypeRule {
    debit_keywords: Vec<&'static str>,
    credit_keywords: Vec<&'static str>,
}

impl TypeRule {
    pub fn new() -> Self {
        Self {
            debit_keywords: DEBIT_KEYWORDS.to_vec(),
            credit_keywords: CREDIT_KEYWORDS.to_vec(),
        }
    }

    /// Classify lower-cased text; `None` when no keyword matches
    pub fn classify(&self, text: &str) -> Option<TransactionType> {
        let lower = text.to_lowercase();

        if self.debit_keywords.iter().any(|k| lower.contains(k)) {
            Some(TransactionType::Debit)
        } else if self.credit_keywords.iter().any(|k| lower.contains(k)) {
            Some(TransactionType::Credit)
        } else {
            None
        }
    }
}

impl Default for TypeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsRule for TypeRule {
    fn name(&self) -> &'static str {
        "type"
    }

    fn apply(&self, text: &str, draft: &mut SmsDraft) {
        if let Some(txn_type) = self.classify(text) {
            draft.txn_type = Some(txn_type);
        }
    }
}

/// Balance indicator word, then (anywhere later) a currency amount
pub struct BalanceRule {
    pattern: Regex,
}

impl BalanceRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(&format!(
                r"(?i)(?:bal|balance|avbl|available).*?(?:rs\.?|inr|₹)\s*{}",
                NUMBER
            ))
            .expect("valid regex"),
        }
    }
}

impl Default for BalanceRule {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsRule for BalanceRule {
    fn name(&self) -> &'static str {
        "balance"
    }

    fn apply(&self, text: &str, draft: &mut SmsDraft) {
        if let Some(caps) = self.pattern.captures(text) {
            draft.balance = parse_grouped_number(&caps[1]);
        }
    }
}

/// "at/to/from" followed by a capitalized name, ending at "on", "dated",
/// a period or "UPI"
pub struct MerchantRule {
    pattern: Regex,
}

impl MerchantRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?:at|to|from)\s+([A-Z][A-Za-z\s]+?)(?:\s+on|\s+dated|\.|\s+UPI)")
                .expect("valid regex"),
        }
    }
}

impl Default for MerchantRule {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsRule for MerchantRule {
    fn name(&self) -> &'static str {
        "merchant"
    }

    fn apply(&self, text: &str, draft: &mut SmsDraft) {
        if let Some(caps) = self.pattern.captures(text) {
            let merchant = caps[1].trim();
            if !merchant.is_empty() {
                draft.merchant = Some(merchant.to_string());
            }
        }
    }
}

/// Category from the merchant keyword table
pub struct CategoryRule;

impl SmsRule for CategoryRule {
    fn name(&self) -> &'static str {
        "category"
    }

    fn apply(&self, _text: &str, draft: &mut SmsDraft) {
        draft.category = Some(categorize_merchant(draft.merchant.as_deref()).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule: &dyn SmsRule, text: &str) -> SmsDraft {
        let mut draft = SmsDraft::default();
        rule.apply(text, &mut draft);
        draft
    }

    #[test]
    fn test_amount_markers() {
        let rule = AmountRule::new();
        assert_eq!(run(&rule, "Rs.500 debited").amount, Some(500.0));
        assert_eq!(run(&rule, "Rs 500 debited").amount, Some(500.0));
        assert_eq!(run(&rule, "INR 1,00,000.75 sent").amount, Some(100000.75));
        assert_eq!(run(&rule, "₹42 paid").amount, Some(42.0));
        assert_eq!(run(&rule, "rs.7 paid").amount, Some(7.0));
        assert_eq!(run(&rule, "500 debited").amount, None);
    }

    #[test]
    fn test_amount_takes_first_match() {
        let rule = AmountRule::new();
        let draft = run(&rule, "Rs.150 paid. Avbl Bal Rs.9,850");
        assert_eq!(draft.amount, Some(150.0));
    }

    #[test]
    fn test_type_debit_precedence() {
        let rule = TypeRule::new();
        assert_eq!(
            rule.classify("Amount debited and credited back"),
            Some(TransactionType::Debit)
        );
        assert_eq!(
            rule.classify("You have RECEIVED money"),
            Some(TransactionType::Credit)
        );
        assert_eq!(rule.classify("Transfer initiated"), None);
    }

    #[test]
    fn test_type_leaves_draft_unset_without_keywords() {
        let draft = run(&TypeRule::new(), "Rs.10 transfer");
        assert_eq!(draft.txn_type, None);
    }

    #[test]
    fn test_balance_not_adjacent() {
        let rule = BalanceRule::new();
        assert_eq!(
            run(&rule, "Avbl Bal Rs.2,000").balance,
            Some(2000.0)
        );
        assert_eq!(
            run(&rule, "Available balance in your a/c is INR 12,345.67").balance,
            Some(12345.67)
        );
        assert_eq!(run(&rule, "Rs.500 debited").balance, None);
    }

    #[test]
    fn test_merchant_terminators() {
        let rule = MerchantRule::new();
        assert_eq!(
            run(&rule, "paid at Swiggy on 01-01-24").merchant.as_deref(),
            Some("Swiggy")
        );
        assert_eq!(
            run(&rule, "sent to Ramesh Kumar dated 02-02-24").merchant.as_deref(),
            Some("Ramesh Kumar")
        );
        assert_eq!(
            run(&rule, "received from Big Bazaar.").merchant.as_deref(),
            Some("Big Bazaar")
        );
        assert_eq!(
            run(&rule, "paid to Zomato UPI Ref 1234").merchant.as_deref(),
            Some("Zomato")
        );
    }

    #[test]
    fn test_merchant_requires_capital() {
        let rule = MerchantRule::new();
        assert_eq!(run(&rule, "paid to your account on 01-01").merchant, None);
        assert_eq!(run(&rule, "paid at Swiggy").merchant, None);
    }

    #[test]
    fn test_category_uses_merchant() {
        let mut draft = SmsDraft {
            merchant: Some("Uber Trip".into()),
            ..Default::default()
        };
        CategoryRule.apply("", &mut draft);
        assert_eq!(draft.category.as_deref(), Some("transport"));

        let draft = run(&CategoryRule, "anything");
        assert_eq!(draft.category.as_deref(), Some("uncategorized"));
    }
}
