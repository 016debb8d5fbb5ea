//! Merchant categorization
//!
//! Maps a merchant name onto one of a fixed set of spending categories by
//! keyword containment. Table order is significant: the first category with
//! a matching keyword wins.

/// Category used when no merchant could be extracted
pub const UNCATEGORIZED: &str = "uncategorized";

/// Category used when a merchant matched none of the keyword sets
pub const OTHERS: &str = "others";

/// Category → lower-case keyword set, in match priority order
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "food",
        &[
            "swiggy",
            "zomato",
            "restaurant",
            "cafe",
            "food",
            "dominos",
            "pizza",
        ],
    ),
    (
        "transport",
        &["uber", "ola", "rapido", "metro", "petrol", "fuel"],
    ),
    (
        "shopping",
        &["amazon", "flipkart", "myntra", "ajio", "store"],
    ),
    (
        "utilities",
        &["electricity", "water", "gas", "recharge", "mobile"],
    ),
    (
        "entertainment",
        &["netflix", "spotify", "prime", "movie", "bookmyshow"],
    ),
];

/// Categorize a merchant name
pub fn categorize_merchant(merchant: Option<&str>) -> &'static str {
    let Some(merchant) = merchant else {
        return UNCATEGORIZED;
    };

    let merchant_lower = merchant.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| merchant_lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(OTHERS)
}
