use crate::analysis::KeywordTagger;
use crate::config::DaftConfig;
use crate::models::{Property, SearchParams};
use crate::scrapers::traits::ListingSource;
use crate::scrapers::types::ListingDetails;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Daft.ie search scraper
pub struct DaftScraper {
    client: Client,
    config: DaftConfig,
    tagger: KeywordTagger,
}

/// Links found on one search results page
#[derive(Debug, Default, PartialEq)]
pub struct ResultsPage {
    pub listing_urls: Vec<String>,
    pub next_page: Option<String>,
}

impl DaftScraper {
    pub fn new(config: DaftConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            tagger: KeywordTagger::new()?,
        })
    }

    pub fn search_url(&self, params: &SearchParams) -> Result<Url> {
        construct_search_url(&self.config.base_url, params)
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            warn!("Daft returned status: {}", response.status());
            anyhow::bail!("Failed to fetch {}: {}", url, response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of HTML", html.len());
        Ok(html)
    }

    /// Scrape one listing detail page.
    pub async fn scrape_listing(&self, url: &str) -> Result<ListingDetails> {
        info!("Scraping details from: {}", url);
        pause(self.config.detail_delay_ms).await;

        let html = self.fetch(url).await?;
        let details = parse_listing_page(&html, url)?;
        info!("Successfully scraped: {}", details.title.chars().take(50).collect::<String>());
        Ok(details)
    }
}

#[async_trait]
impl ListingSource for DaftScraper {
    async fn search(&self, params: &SearchParams) -> Result<Vec<Property>> {
        let mut current_url = self.search_url(params)?.to_string();
        info!("Constructed search URL: {}", current_url);

        let mut properties = Vec::new();
        let mut seen = HashSet::new();

        for page in 1..=self.config.max_pages {
            info!("Scraping search results page {} from {}", page, current_url);
            pause(self.config.page_delay_ms).await;

            let results = match self.fetch(&current_url).await {
                Ok(html) => parse_results_page(&html, &self.config.base_url)?,
                Err(e) if page == 1 => return Err(e),
                Err(e) => {
                    warn!("Error fetching search results page {}: {:#}", page, e);
                    break;
                }
            };

            if results.listing_urls.is_empty() {
                warn!("No listing cards found on page {}, page structure may have changed", page);
                break;
            }
            info!("Found {} listings on page {}", results.listing_urls.len(), page);

            // Only successful scrapes count as seen, so a later card can retry a failed page.
            for url in results.listing_urls {
                if seen.contains(&url) {
                    debug!("Skipping already processed URL: {}", url);
                    continue;
                }

                match self.scrape_listing(&url).await {
                    Ok(details) => {
                        let mut property = Property::from(details);
                        self.tagger.tag(&mut property);
                        properties.push(property);
                        seen.insert(url);
                    }
                    Err(e) => warn!("Error scraping {}: {:#}", url, e),
                }
            }

            match results.next_page {
                Some(next) => current_url = next,
                None => {
                    info!("No next page link found, end of results");
                    break;
                }
            }
        }

        info!("✅ Scraped {} properties from Daft", properties.len());
        Ok(properties)
    }

    fn source_name(&self) -> &'static str {
        "Daft"
    }
}

async fn pause(millis: u64) {
    if millis > 0 {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

/// Build the Daft.ie search URL for the given filters.
///
/// Bed counts and property type are not part of the URL.
pub fn construct_search_url(base_url: &str, params: &SearchParams) -> Result<Url> {
    let location = SearchParams::non_empty(&params.location).unwrap_or("ireland");
    let slug = location.to_lowercase().replace(", ", "/").replace(' ', "-");

    let mut url = Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("Base URL cannot have a path: {}", base_url))?
        .pop_if_empty()
        .push("property-for-sale")
        .extend(slug.split('/').filter(|segment| !segment.is_empty()));

    let filters = [
        ("keywords", SearchParams::non_empty(&params.keywords)),
        ("salePrice_from", SearchParams::non_empty(&params.min_price)),
        ("salePrice_to", SearchParams::non_empty(&params.max_price)),
    ];
    let filters: Vec<_> = filters
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect();

    // query_pairs_mut leaves a bare "?" behind even when nothing is appended
    if !filters.is_empty() {
        url.query_pairs_mut().extend_pairs(filters);
    }
    Ok(url)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {:?}: {:?}", css, e))
}

/// Resolve a link against the site: site-relative paths are prefixed with
/// the base URL, absolute http(s) links are kept, anything else is dropped.
fn resolve_link(base_url: &str, href: &str) -> Option<String> {
    if href.starts_with('/') {
        Some(format!("{}{}", base_url.trim_end_matches('/'), href))
    } else if href.starts_with("http") {
        Some(href.to_string())
    } else {
        None
    }
}

/// Stripped text fragments of an element joined with `separator`.
fn text_of(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn first_text(document: &Html, css: &str, separator: &str) -> Result<Option<String>> {
    let selector = selector(css)?;
    Ok(document
        .select(&selector)
        .next()
        .map(|element| text_of(element, separator)))
}

/// Extract listing links and the next-page link from a search results page.
pub fn parse_results_page(html: &str, base_url: &str) -> Result<ResultsPage> {
    let document = Html::parse_document(html);

    let card_selector = selector(r#"li[data-testid*="search-result-card_"]"#)?;
    let mut cards: Vec<_> = document.select(&card_selector).collect();
    if cards.is_empty() {
        let fallback = selector(r#"div[class*="Card__Content"]"#)?;
        cards = document.select(&fallback).collect();
    }

    let link_selector = selector("a[href]")?;
    let listing_urls = cards
        .iter()
        .filter_map(|card| card.select(&link_selector).next())
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| resolve_link(base_url, href))
        .collect();

    let next_selector = selector(r#"a[data-testid="next-button"][aria-label="Next page"]"#)?;
    let next_fallback = selector("li.next a[href]")?;
    let next_href = document
        .select(&next_selector)
        .next()
        .or_else(|| document.select(&next_fallback).next())
        .and_then(|link| link.value().attr("href"))
        .filter(|href| !href.is_empty());

    let next_page = next_href.and_then(|href| {
        let resolved = resolve_link(base_url, href);
        if resolved.is_none() {
            warn!("Next page link {:?} is not in a recognized format, stopping pagination", href);
        }
        resolved
    });

    Ok(ResultsPage {
        listing_urls,
        next_page,
    })
}

/// Extract the details of one listing page.
pub fn parse_listing_page(html: &str, url: &str) -> Result<ListingDetails> {
    let document = Html::parse_document(html);

    let title = match first_text(&document, r#"h1[data-testid="title-block"]"#, "")? {
        Some(title) => title,
        None => first_text(&document, "h1", "")?.unwrap_or_default(),
    };

    let price = match first_text(&document, r#"strong[data-testid="price"]"#, "")? {
        Some(price) => price,
        None => {
            let spans = selector("span[class]")?;
            document
                .select(&spans)
                .find(|span| {
                    span.value()
                        .attr("class")
                        .map(|class| class.to_lowercase().contains("price"))
                        .unwrap_or(false)
                })
                .map(|span| text_of(span, ""))
                .unwrap_or_default()
        }
    };

    let description =
        first_text(&document, r#"div[data-testid="description"]"#, "\n")?.unwrap_or_default();

    let ber = match first_text(&document, r#"span[data-testid="ber-rating"]"#, "")? {
        Some(ber) => Some(ber),
        None => ber_from_label(&document),
    };

    let property_type = first_text(&document, r#"p[data-testid="property-type"]"#, "")?;

    let feature_selector = selector(r#"div[data-testid="features"] li"#)?;
    let features = document
        .select(&feature_selector)
        .map(|item| text_of(item, ""))
        .filter(|feature| !feature.is_empty())
        .collect();

    Ok(ListingDetails {
        url: url.to_string(),
        title,
        price,
        description,
        ber,
        property_type,
        features,
        scraped_at: Utc::now(),
    })
}

/// Older layouts print a "BER Details" label followed by the rating element.
fn ber_from_label(document: &Html) -> Option<String> {
    document
        .tree
        .nodes()
        .filter(|node| {
            node.value()
                .as_text()
                .map(|text| text.to_lowercase().contains("ber details"))
                .unwrap_or(false)
        })
        .find_map(|node| node.next_siblings().find_map(ElementRef::wrap))
        .map(|element| text_of(element, "\n"))
        .and_then(|text| text.lines().next().map(str::to_string))
        .filter(|rating| !rating.is_empty())
}
