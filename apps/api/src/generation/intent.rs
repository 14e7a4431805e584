//! Intent detection — classifies a page's text into one of five categories.
//!
//! Pure keyword matching over the case-folded concatenation of title and
//! existing description. First match wins, in fixed priority order:
//! product, service, blog, category, then generic as the fallback.
//! Patterns respect word boundaries: "buying" does not trip "buy".

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The inferred purpose category of a page. Drives template selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Product,
    Service,
    Blog,
    Category,
    #[default]
    Generic,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Product => "product",
            Intent::Service => "service",
            Intent::Blog => "blog",
            Intent::Category => "category",
            Intent::Generic => "generic",
        }
    }
}

static PRODUCT_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(buy|shop|price|model|deal|feature|specs?)\b").expect("product keyword pattern")
});

static SERVICE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(service|consult|solution|support|agency|expert)\b")
        .expect("service keyword pattern")
});

static BLOG_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(how to|guide|tips|news|insight|learn|blog)\b").expect("blog keyword pattern")
});

static CATEGORY_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(collection|list|types?|best|compare|category)\b")
        .expect("category keyword pattern")
});

/// Classifies a (title, description) pair. Pure and deterministic; empty
/// inputs are valid and yield `Intent::Generic`.
pub fn classify(title: &str, description: &str) -> Intent {
    let text = format!("{title} {description}").to_lowercase();

    if PRODUCT_KEYWORDS.is_match(&text) {
        Intent::Product
    } else if SERVICE_KEYWORDS.is_match(&text) {
        Intent::Service
    } else if BLOG_KEYWORDS.is_match(&text) {
        Intent::Blog
    } else if CATEGORY_KEYWORDS.is_match(&text) {
        Intent::Category
    } else {
        Intent::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_pure_and_deterministic() {
        let first = classify("Acme Laptops", "Buy the best gaming laptop");
        let second = classify("Acme Laptops", "Buy the best gaming laptop");
        assert_eq!(first, second);
        assert_eq!(first, Intent::Product);
    }

    #[test]
    fn test_priority_order_product_beats_service() {
        // Contains both a product keyword and a service keyword.
        assert_eq!(classify("buy expert support", ""), Intent::Product);
    }

    #[test]
    fn test_priority_order_service_beats_blog() {
        assert_eq!(classify("expert consulting", "tips and guides"), Intent::Service);
    }

    #[test]
    fn test_each_category_detected() {
        assert_eq!(classify("Shop laptops", ""), Intent::Product);
        assert_eq!(classify("", "Our agency delivers"), Intent::Service);
        assert_eq!(classify("How to bake bread", ""), Intent::Blog);
        assert_eq!(classify("", "Compare the options"), Intent::Category);
        assert_eq!(classify("Welcome home", "plain text"), Intent::Generic);
    }

    #[test]
    fn test_empty_inputs_yield_generic() {
        assert_eq!(classify("", ""), Intent::Generic);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify("BUY NOW", ""), Intent::Product);
        assert_eq!(classify("How To Get Started", ""), Intent::Blog);
    }

    #[test]
    fn test_word_boundaries_are_respected() {
        // "buying" and "rebuy" must not match the bare keyword "buy".
        assert_eq!(classify("buying guide", ""), Intent::Blog);
        assert_eq!(classify("rebuy rewards", ""), Intent::Generic);
    }

    #[test]
    fn test_plural_variants_match() {
        assert_eq!(classify("full specs inside", ""), Intent::Product);
        assert_eq!(classify("all types covered", ""), Intent::Category);
    }

    #[test]
    fn test_intent_serializes_lowercase() {
        let json = serde_json::to_string(&Intent::Product).unwrap();
        assert_eq!(json, "\"product\"");
        assert_eq!(Intent::Category.as_str(), "category");
    }
}
