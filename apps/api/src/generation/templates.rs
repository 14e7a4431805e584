//! Data-driven template and tone tables.
//!
//! One table keyed by intent (literal templates, rendered by placeholder
//! substitution) plus one phrase table keyed by tone (lead-in and trailing
//! pools used by the accretion strategies). Filler pools are shared across
//! tones and ordered longest-first so accretion picks the largest piece that
//! still fits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::generation::intent::Intent;
use crate::models::record::PageRecord;

// ────────────────────────────────────────────────────────────────────────────
// Tone
// ────────────────────────────────────────────────────────────────────────────

/// Operator-selected stylistic register, applied uniformly to one whole run.
/// Threaded through the batch call as explicit configuration, never ambient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Persuasive,
    Educational,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Persuasive => "persuasive",
            Tone::Educational => "educational",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "friendly" => Ok(Tone::Friendly),
            "persuasive" => Ok(Tone::Persuasive),
            "educational" => Ok(Tone::Educational),
            other => Err(format!(
                "unknown tone '{other}' (expected one of: professional, friendly, persuasive, educational)"
            )),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-intent template table
// ────────────────────────────────────────────────────────────────────────────

/// Literal templates for one intent. Placeholders: `{title}`, `{primary}`,
/// `{secondary}`, `{tertiary}`. An empty field renders an empty segment.
pub struct TemplateSet {
    pub titles: &'static [&'static str],
    pub descriptions: &'static [&'static str],
}

const PRODUCT_TEMPLATES: TemplateSet = TemplateSet {
    titles: &[
        "Buy {title} – {primary} at Best Price",
        "{title} | {primary} Features & Specs",
        "{primary}: {title} for You",
    ],
    descriptions: &[
        "Buy {title} with {primary} features. Compare {secondary} and {tertiary} options to find the best deal today.",
        "Explore {title} – premium {primary} with latest specs. Check {secondary} & {tertiary} for more details.",
    ],
};

const SERVICE_TEMPLATES: TemplateSet = TemplateSet {
    titles: &[
        "{title} – Expert {primary} Services",
        "{primary} Solutions | {title}",
        "Professional {primary} by {title}",
    ],
    descriptions: &[
        "Get professional {primary} with {title}. We deliver {secondary} and {tertiary} solutions tailored to your needs.",
        "{title} offers reliable {primary} services. Our team ensures quality {secondary} & {tertiary} support.",
    ],
};

const BLOG_TEMPLATES: TemplateSet = TemplateSet {
    titles: &[
        "{title} – {primary} Guide & Tips",
        "{primary} Insights: {title}",
        "{title} | Learn About {primary}",
    ],
    descriptions: &[
        "Read {title} to learn about {primary}. Discover {secondary} and {tertiary} insights to boost your knowledge.",
        "{title} – a complete {primary} guide covering {secondary} and {tertiary} tips you can use today.",
    ],
};

const CATEGORY_TEMPLATES: TemplateSet = TemplateSet {
    titles: &[
        "Best {primary} {title} | Compare & Choose",
        "{title} – Top {primary} Options",
        "{primary} {title} Collection",
    ],
    descriptions: &[
        "Explore top {primary} {title}. Compare {secondary} and {tertiary} to choose the best fit for your needs.",
        "Discover the latest {primary} {title}. Browse {secondary} and {tertiary} to make the right choice.",
    ],
};

const GENERIC_TEMPLATES: TemplateSet = TemplateSet {
    titles: &[
        "{title} | {primary}",
        "Discover {title} – {primary}",
        "{primary} – {title}",
    ],
    descriptions: &[
        "{title} – your trusted source for {primary}. Explore {secondary} and {tertiary} today.",
        "Find {primary} information at {title}. Learn about {secondary} and {tertiary}.",
    ],
};

pub fn template_set(intent: Intent) -> &'static TemplateSet {
    match intent {
        Intent::Product => &PRODUCT_TEMPLATES,
        Intent::Service => &SERVICE_TEMPLATES,
        Intent::Blog => &BLOG_TEMPLATES,
        Intent::Category => &CATEGORY_TEMPLATES,
        Intent::Generic => &GENERIC_TEMPLATES,
    }
}

/// Renders a template by substituting record fields into its placeholders.
pub fn render(template: &str, record: &PageRecord) -> String {
    template
        .replace("{title}", &record.title)
        .replace("{primary}", &record.primary_kw)
        .replace("{secondary}", &record.secondary_kw)
        .replace("{tertiary}", &record.tertiary_kw)
}

// ────────────────────────────────────────────────────────────────────────────
// Per-tone phrase table
// ────────────────────────────────────────────────────────────────────────────

/// Lead-in and trailing phrase pools for one tone.
///
/// Lead-ins carry their own trailing space; tails carry their own leading
/// separator or punctuation. The accretion strategies sample one of each.
pub struct TonePhrases {
    pub title_lead_ins: &'static [&'static str],
    pub title_tails: &'static [&'static str],
    pub desc_lead_ins: &'static [&'static str],
    pub desc_tails: &'static [&'static str],
}

const PROFESSIONAL_PHRASES: TonePhrases = TonePhrases {
    title_lead_ins: &["", "Explore ", "Official: "],
    title_tails: &[" | Official Site", " | Trusted Experts"],
    desc_lead_ins: &["Discover ", "Explore ", "Learn more about "],
    desc_tails: &[
        ". Our team delivers dependable service and proven results you can trust.",
        ". Backed by experienced professionals you can rely on.",
    ],
};

const FRIENDLY_PHRASES: TonePhrases = TonePhrases {
    title_lead_ins: &["", "Meet ", "Say Hello to "],
    title_tails: &[" | Come Take a Look", " | You'll Love It"],
    desc_lead_ins: &["Come check out ", "Say hello to ", "Take a peek at "],
    desc_tails: &[
        ". We're here to help you find exactly what you're looking for.",
        ". Friendly help is always close at hand whenever you need it.",
    ],
};

const PERSUASIVE_PHRASES: TonePhrases = TonePhrases {
    title_lead_ins: &["", "Get ", "Don't Miss "],
    title_tails: &[" | Act Today", " | Limited Time"],
    desc_lead_ins: &["Don't miss ", "Unlock ", "Get the most from "],
    desc_tails: &[
        ". Act now and see why so many people have already made the switch.",
        ". Take the next step today and get results you can count on.",
    ],
};

const EDUCATIONAL_PHRASES: TonePhrases = TonePhrases {
    title_lead_ins: &["", "Understanding ", "A Guide to "],
    title_tails: &[" | Explained", " | Step by Step"],
    desc_lead_ins: &["Learn all about ", "Understand ", "A closer look at "],
    desc_tails: &[
        ". A clear and practical introduction written for readers at any level.",
        ". Key concepts explained simply so you can apply them right away.",
    ],
};

pub fn tone_phrases(tone: Tone) -> &'static TonePhrases {
    match tone {
        Tone::Professional => &PROFESSIONAL_PHRASES,
        Tone::Friendly => &FRIENDLY_PHRASES,
        Tone::Persuasive => &PERSUASIVE_PHRASES,
        Tone::Educational => &EDUCATIONAL_PHRASES,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared fragments
// ────────────────────────────────────────────────────────────────────────────

/// Separator used when joining fragments during accretion.
pub const FRAGMENT_SEPARATOR: &str = " – ";

/// Generic filler fragments for titles, longest first.
pub const TITLE_FILLERS: &[&str] = &[" – Insights, Guides & Resources", " – Find Out More", " – Info"];

/// Generic filler fragments for descriptions, longest first.
pub const DESC_FILLERS: &[&str] = &[
    " Browse detailed information and practical guidance gathered in one place.",
    " Find clear answers, practical options and helpful advice here.",
    " Start exploring today.",
];

/// Last-resort padding token, appended word-by-word.
pub const FILLER_TOKEN: &str = " more";

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PageRecord {
        PageRecord {
            title: "Acme Laptops".to_string(),
            existing_description: String::new(),
            primary_kw: "gaming laptop".to_string(),
            secondary_kw: "RTX graphics".to_string(),
            tertiary_kw: "fast SSD".to_string(),
        }
    }

    #[test]
    fn test_every_intent_has_templates() {
        for intent in [
            Intent::Product,
            Intent::Service,
            Intent::Blog,
            Intent::Category,
            Intent::Generic,
        ] {
            let set = template_set(intent);
            assert!(!set.titles.is_empty(), "no title templates for {intent:?}");
            assert!(
                !set.descriptions.is_empty(),
                "no description templates for {intent:?}"
            );
        }
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let record = sample_record();
        let rendered = render("Buy {title} – {primary} ({secondary}, {tertiary})", &record);
        assert_eq!(
            rendered,
            "Buy Acme Laptops – gaming laptop (RTX graphics, fast SSD)"
        );
    }

    #[test]
    fn test_render_with_empty_fields_leaves_empty_segments() {
        let record = PageRecord::default();
        let rendered = render("{title} | {primary}", &record);
        assert_eq!(rendered, " | ");
    }

    #[test]
    fn test_every_tone_has_phrase_pools() {
        for tone in [
            Tone::Professional,
            Tone::Friendly,
            Tone::Persuasive,
            Tone::Educational,
        ] {
            let phrases = tone_phrases(tone);
            assert!(!phrases.title_lead_ins.is_empty());
            assert!(!phrases.title_tails.is_empty());
            assert!(!phrases.desc_lead_ins.is_empty());
            assert!(!phrases.desc_tails.is_empty());
        }
    }

    #[test]
    fn test_filler_pools_are_ordered_longest_first() {
        for pool in [TITLE_FILLERS, DESC_FILLERS] {
            let lengths: Vec<usize> = pool.iter().map(|f| f.chars().count()).collect();
            let mut sorted = lengths.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(lengths, sorted, "filler pool must be longest-first");
        }
    }

    #[test]
    fn test_tone_parses_case_insensitively() {
        assert_eq!("Professional".parse::<Tone>().unwrap(), Tone::Professional);
        assert_eq!("FRIENDLY".parse::<Tone>().unwrap(), Tone::Friendly);
        assert!("casual".parse::<Tone>().is_err());
    }

    #[test]
    fn test_default_tone_is_professional() {
        assert_eq!(Tone::default(), Tone::Professional);
    }
}
