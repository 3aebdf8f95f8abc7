//! Keyword analysis of listing text.

use crate::models::Property;
use anyhow::{Context, Result};
use regex::Regex;

pub const FIXER_UPPER_TAG: &str = "Tag: Fixer-Upper";
pub const DEVELOPMENT_LAND_TAG: &str = "Tag: Development Land";
pub const QUICK_SALE_TAG: &str = "Tag: Potential Quick Sale";
pub const STANDARD_TAG: &str = "Tag: Standard Listing";

const FIXER_UPPER_KEYWORDS: &[&str] = &[
    "fixer-upper",
    "fixer upper",
    "needs renovation",
    "requires modernization",
    "tlc",
    "tender loving care",
    "handyman special",
    "renovation project",
    "refurbishment opportunity",
    "blank canvas",
    "in need of updating",
    "sold as seen",
    "shell and core",
];

const LAND_DEVELOPMENT_KEYWORDS: &[&str] = &[
    "site for sale",
    "land for sale",
    "development potential",
    "development opportunity",
    "planning permission",
    "fpp",
    "full planning permission",
    "outline planning permission",
    "opp",
    "zoned residential",
    "zoned commercial",
    "subject to planning permission",
    "site",
];

const QUICK_SALE_KEYWORDS: &[&str] = &[
    "motivated seller",
    "priced to sell",
    "quick sale required",
    "open to offers",
    "must be sold",
    "reduced for quick sale",
    "auction",
    "back on market",
    "chain free",
    "vacant possession",
    "price reduced",
    "significant reduction",
];

struct TagRule {
    tag: &'static str,
    patterns: Vec<Regex>,
}

impl TagRule {
    fn new(tag: &'static str, keywords: &[&str]) -> Result<Self> {
        let patterns = keywords
            .iter()
            .map(|keyword| {
                Regex::new(&format!(r"\b{}\b", regex::escape(keyword)))
                    .with_context(|| format!("Invalid keyword pattern: {}", keyword))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tag, patterns })
    }

    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }
}

/// Tags listings by whole-word keyword matches in their title and description
pub struct KeywordTagger {
    fixer_upper: TagRule,
    development_land: TagRule,
    quick_sale: TagRule,
}

impl KeywordTagger {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixer_upper: TagRule::new(FIXER_UPPER_TAG, FIXER_UPPER_KEYWORDS)?,
            development_land: TagRule::new(DEVELOPMENT_LAND_TAG, LAND_DEVELOPMENT_KEYWORDS)?,
            quick_sale: TagRule::new(QUICK_SALE_TAG, QUICK_SALE_KEYWORDS)?,
        })
    }

    /// Compute the tags for a listing. Never empty.
    ///
    /// `property_type` is the scraped listing type, if known; a type
    /// mentioning "site" counts as development land.
    pub fn tags_for(&self, title: &str, description: &str, property_type: Option<&str>) -> Vec<String> {
        let text = format!("{} {}", description, title).to_lowercase();
        let mut tags = Vec::new();

        if self.fixer_upper.matches(&text) {
            tags.push(self.fixer_upper.tag.to_string());
        }

        let site_type = property_type
            .map(|kind| kind.to_lowercase().contains("site"))
            .unwrap_or(false);
        if self.development_land.matches(&text) || site_type {
            tags.push(self.development_land.tag.to_string());
        }

        if self.quick_sale.matches(&text) {
            tags.push(self.quick_sale.tag.to_string());
        }

        if tags.is_empty() {
            tags.push(STANDARD_TAG.to_string());
        }
        tags
    }

    /// Replace the listing's tags with freshly computed ones.
    pub fn tag(&self, property: &mut Property) {
        property.analysis_tags = self.tags_for(
            &property.title,
            &property.description,
            property.property_type.as_deref(),
        );
    }
}
