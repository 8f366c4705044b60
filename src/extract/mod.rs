//! Product record extraction from listing pages
//!
//! Works on an already parsed [`scraper::Html`] tree and never touches the
//! network. Each field is read independently and falls back to a sentinel
//! when missing, so one bad field never costs the whole record. A container
//! that lacks its title heading altogether is treated as malformed and
//! skipped.

pub mod config;
pub mod price;

pub use config::ExtractorConfig;
pub use price::normalize_price;

use crate::error::{Result, ScraperError};
use crate::types::{sentinel, ProductRecord};
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Parse raw HTML into a document tree
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Counters describing one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Containers matched in the document
    pub found: usize,
    /// Containers inspected before the limit was reached
    pub visited: usize,
    /// Containers skipped as malformed
    pub skipped: usize,
    /// Records produced
    pub produced: usize,
}

#[derive(Debug)]
enum SkipReason {
    MissingHeading,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingHeading => write!(f, "container has no title heading"),
        }
    }
}

/// Turns product containers into [`ProductRecord`]s
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    container: Selector,
    title_heading: Selector,
    title_link: Selector,
    price: Selector,
    rating: Selector,
    availability: Selector,
    name_attribute: String,
    rating_marker_class: String,
    source_currency: String,
}

impl RecordExtractor {
    /// Extractor for the default (books.toscrape.com) layout
    pub fn new() -> Result<Self> {
        Self::with_config(&ExtractorConfig::default())
    }

    /// Create an extractor from a selector configuration
    pub fn with_config(config: &ExtractorConfig) -> Result<Self> {
        Ok(Self {
            container: compile_selector(&config.container)?,
            title_heading: compile_selector(&config.title_heading)?,
            title_link: compile_selector(&config.title_link)?,
            price: compile_selector(&config.price)?,
            rating: compile_selector(&config.rating)?,
            availability: compile_selector(&config.availability)?,
            name_attribute: config.name_attribute.clone(),
            rating_marker_class: config.rating_marker_class.clone(),
            source_currency: config.source_currency.trim().to_uppercase(),
        })
    }

    pub fn source_currency(&self) -> &str {
        &self.source_currency
    }

    /// Extract up to `max` records from `doc`
    pub fn extract(&self, doc: &Html, max: usize) -> Vec<ProductRecord> {
        self.extract_with_stats(doc, max).0
    }

    /// Parse `html` and extract up to `max` records
    pub fn extract_from_str(&self, html: &str, max: usize) -> Vec<ProductRecord> {
        self.extract(&parse_document(html), max)
    }

    /// Extract up to `max` records and report what happened along the way
    ///
    /// Only produced records count toward `max`; a skipped container lets the
    /// next one be tried.
    pub fn extract_with_stats(&self, doc: &Html, max: usize) -> (Vec<ProductRecord>, ExtractionStats) {
        let containers: Vec<ElementRef> = doc.select(&self.container).collect();
        let mut stats = ExtractionStats {
            found: containers.len(),
            ..ExtractionStats::default()
        };
        log::info!("Found {} product containers", stats.found);

        let mut records = Vec::new();
        for (index, container) in containers.iter().enumerate() {
            if records.len() >= max {
                break;
            }
            stats.visited += 1;

            match self.extract_record(container) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    stats.skipped += 1;
                    log::warn!("Skipping product container {}: {}", index + 1, reason);
                }
            }
        }

        stats.produced = records.len();
        log::info!(
            "Extracted {} products ({} visited, {} skipped)",
            stats.produced,
            stats.visited,
            stats.skipped
        );
        (records, stats)
    }

    fn extract_record(&self, container: &ElementRef) -> std::result::Result<ProductRecord, SkipReason> {
        if container.select(&self.title_heading).next().is_none() {
            return Err(SkipReason::MissingHeading);
        }

        Ok(ProductRecord {
            name: self.extract_name(container),
            original_price: self.extract_price(container),
            original_currency: self.source_currency.clone(),
            rating: self.extract_rating(container),
            availability: self.extract_availability(container),
        })
    }

    fn extract_name(&self, container: &ElementRef) -> String {
        let Some(link) = container.select(&self.title_link).next() else {
            log::debug!("No title link, using placeholder name");
            return sentinel::NAME.to_string();
        };

        link.value()
            .attr(&self.name_attribute)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .or_else(|| Some(collapsed_text(&link)).filter(|text| !text.is_empty()))
            .unwrap_or_else(|| sentinel::NAME.to_string())
    }

    fn extract_price(&self, container: &ElementRef) -> f64 {
        match container.select(&self.price).next() {
            Some(element) => normalize_price(&collapsed_text(&element)),
            None => {
                log::debug!("No price element, defaulting to 0.0");
                0.0
            }
        }
    }

    fn extract_rating(&self, container: &ElementRef) -> String {
        container
            .select(&self.rating)
            .next()
            .and_then(|element| {
                element
                    .value()
                    .attr("class")
                    .unwrap_or_default()
                    .split_whitespace()
                    .find(|class| *class != self.rating_marker_class)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| sentinel::RATING.to_string())
    }

    fn extract_availability(&self, container: &ElementRef) -> String {
        container
            .select(&self.availability)
            .next()
            .map(|element| collapsed_text(&element))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| sentinel::AVAILABILITY.to_string())
    }
}

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector(format!("'{}': {}", selector, e)))
}

/// All text below `element`, with runs of whitespace collapsed to one space
fn collapsed_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pod(title: &str, price: &str, rating: &str) -> String {
        format!(
            r#"<article class="product_pod">
                 <p class="star-rating {rating}"><i class="icon-star"></i></p>
                 <h3><a href="catalogue/x/index.html" title="{title}">{title}</a></h3>
                 <div class="product_price">
                   <p class="price_color">{price}</p>
                   <p class="instock availability">
                     <i class="icon-ok"></i>
                       In stock
                   </p>
                 </div>
               </article>"#
        )
    }

    fn page(pods: &[String]) -> String {
        format!("<html><body><section>{}</section></body></html>", pods.join("\n"))
    }

    #[test]
    fn test_extracts_all_fields() {
        let extractor = RecordExtractor::new().unwrap();
        let html = page(&[pod("A Light in the Attic", "£51.77", "Three")]);

        let records = extractor.extract_from_str(&html, 10);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "A Light in the Attic");
        assert_eq!(record.original_price, 51.77);
        assert_eq!(record.original_currency, "GBP");
        assert_eq!(record.rating, "Three");
        assert_eq!(record.availability, "In stock");
    }

    #[test]
    fn test_respects_max() {
        let extractor = RecordExtractor::new().unwrap();
        let pods: Vec<String> = (0..5).map(|i| pod(&format!("Book {}", i), "£10.00", "One")).collect();

        let (records, stats) = extractor.extract_with_stats(&parse_document(&page(&pods)), 3);

        assert_eq!(records.len(), 3);
        assert_eq!(stats.found, 5);
        assert_eq!(stats.visited, 3);
        assert_eq!(records[2].name, "Book 2");
    }

    #[test]
    fn test_zero_max_returns_nothing() {
        let extractor = RecordExtractor::new().unwrap();
        let html = page(&[pod("Only", "£1.00", "One")]);
        assert!(extractor.extract_from_str(&html, 0).is_empty());
    }

    #[test]
    fn test_missing_fields_use_sentinels() {
        let extractor = RecordExtractor::new().unwrap();
        let html = page(&[r#"<article class="product_pod"><h3></h3></article>"#.to_string()]);

        let records = extractor.extract_from_str(&html, 10);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, sentinel::NAME);
        assert_eq!(records[0].original_price, 0.0);
        assert_eq!(records[0].original_currency, "GBP");
        assert_eq!(records[0].rating, sentinel::RATING);
        assert_eq!(records[0].availability, sentinel::AVAILABILITY);
    }

    #[test]
    fn test_name_falls_back_to_link_text() {
        let extractor = RecordExtractor::new().unwrap();
        let html = page(&[r#"<article class="product_pod"><h3><a href="x">Short Name</a></h3></article>"#
            .to_string()]);

        let records = extractor.extract_from_str(&html, 10);
        assert_eq!(records[0].name, "Short Name");
    }

    #[test]
    fn test_rating_without_label() {
        let extractor = RecordExtractor::new().unwrap();
        let html = page(&[
            r#"<article class="product_pod"><p class="star-rating"></p><h3><a title="X">X</a></h3></article>"#
                .to_string(),
        ]);

        let records = extractor.extract_from_str(&html, 10);
        assert_eq!(records[0].rating, sentinel::RATING);
    }

    #[test]
    fn test_malformed_container_does_not_count_toward_max() {
        let extractor = RecordExtractor::new().unwrap();
        let pods = vec![
            r#"<article class="product_pod"><p>broken</p></article>"#.to_string(),
            pod("Second", "£2.00", "Two"),
            pod("Third", "£3.00", "Three"),
        ];

        let (records, stats) = extractor.extract_with_stats(&parse_document(&page(&pods)), 2);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Second");
        assert_eq!(records[1].name, "Third");
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.visited, 3);
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let config = ExtractorConfig {
            container: "article[".to_string(),
            ..ExtractorConfig::default()
        };
        assert!(matches!(
            RecordExtractor::with_config(&config),
            Err(ScraperError::Selector(_))
        ));
    }

    #[test]
    fn test_custom_source_currency() {
        let config = ExtractorConfig {
            source_currency: "eur".to_string(),
            ..ExtractorConfig::default()
        };
        let extractor = RecordExtractor::with_config(&config).unwrap();
        let records = extractor.extract_from_str(&page(&[pod("Euro Book", "€12.50", "Five")]), 10);

        assert_eq!(records[0].original_currency, "EUR");
        assert_eq!(records[0].original_price, 12.5);
    }
}
