//! # price_scraper
//!
//! Scrapes a product listing page, extracts name, price, rating and
//! availability for each product, converts every price into a target
//! currency using a fixed rate table, and hands the result to export sinks
//! (terminal table, CSV, JSON, comparison chart).
//!
//! ## Example
//!
//! ```rust
//! use price_scraper::prelude::*;
//!
//! let html = r#"<article class="product_pod">
//!     <p class="star-rating Three"></p>
//!     <h3><a title="A Light in the Attic">A Light in the ...</a></h3>
//!     <p class="price_color">£51.77</p>
//!     <p class="availability">In stock</p>
//! </article>"#;
//!
//! let pipeline = Pipeline::new(
//!     Box::new(InMemorySource::new(html)),
//!     RecordExtractor::new()?,
//!     CurrencyConverter::new(RateTable::reference()),
//! );
//!
//! let report = pipeline.run(&RunRequest::new("USD", 10), &mut [])?;
//! assert_eq!(report.outcome, Outcome::Completed);
//! assert_eq!(report.records[0].converted_price, 70.92);
//! # Ok::<(), price_scraper::error::ScraperError>(())
//! ```

#[cfg(feature = "cli")]
pub mod config;
pub mod currency;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod fx;
pub mod pipeline;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::currency::Currency;
    pub use crate::error::{Result, ScraperError};
    pub use crate::export::{ChartSink, CsvSink, ExportSink, JsonSink, TableSink};
    pub use crate::extract::{ExtractorConfig, RecordExtractor};
    #[cfg(feature = "http")]
    pub use crate::fetch::HttpSource;
    pub use crate::fetch::{DocumentSource, FileSource, InMemorySource};
    pub use crate::fx::{CurrencyConverter, RateTable};
    pub use crate::pipeline::{Outcome, Pipeline, PipelineReport, PipelineState, RunRequest};
    pub use crate::types::{ConvertedRecord, ProductRecord};
}
