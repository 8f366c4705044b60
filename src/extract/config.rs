//! Selector configuration for product listing pages

use serde::{Deserialize, Serialize};

/// CSS selectors and source facts describing one kind of listing page
///
/// Defaults match the books.toscrape.com catalogue layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Repeated node holding one product
    pub container: String,

    /// Heading that every well-formed container has
    pub title_heading: String,

    /// Link inside the heading carrying the product name
    pub title_link: String,

    /// Attribute of the link holding the full, untruncated name
    pub name_attribute: String,

    pub price: String,

    /// Element whose class list encodes the rating (`star-rating Three`)
    pub rating: String,

    /// Class on the rating element that is a marker, not the rating itself
    pub rating_marker_class: String,

    pub availability: String,

    /// Currency every price on the page is quoted in
    pub source_currency: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            container: "article.product_pod".to_string(),
            title_heading: "h3".to_string(),
            title_link: "h3 a".to_string(),
            name_attribute: "title".to_string(),
            price: "p.price_color".to_string(),
            rating: "p.star-rating".to_string(),
            rating_marker_class: "star-rating".to_string(),
            availability: "p.availability".to_string(),
            source_currency: "GBP".to_string(),
        }
    }
}
