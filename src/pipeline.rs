//! Pipeline orchestration: fetch → extract → convert → export
//!
//! A run walks `Idle → Fetching → Extracting → Converting → Exporting → Done`.
//! Two empty conditions end the run early with a distinct [`Outcome`]
//! instead of an error: no products extracted, or none converted. In both
//! cases no export sink is touched. Transport failures are the only errors
//! that escape a run.

use crate::error::Result;
use crate::export::ExportSink;
use crate::extract::{parse_document, ExtractionStats, RecordExtractor};
use crate::fetch::DocumentSource;
use crate::fx::rate_table::normalize_code;
use crate::fx::{CurrencyConverter, RateTable};
use crate::types::ConvertedRecord;
use std::fmt;

/// Currency used when the requested one is not in the rate table
pub const DEFAULT_TARGET_CURRENCY: &str = "KES";

/// Number of products taken from the page by default
pub const DEFAULT_MAX_PRODUCTS: usize = 10;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Records were converted and handed to the sinks
    Completed,
    /// The page yielded no products
    NoProducts,
    /// Products were found but none could be converted
    NoConversions,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        !matches!(self, Outcome::Completed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed => write!(f, "completed"),
            Outcome::NoProducts => write!(f, "no products found"),
            Outcome::NoConversions => write!(f, "no prices could be converted"),
        }
    }
}

/// Stage of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Fetching,
    Extracting,
    Converting,
    Exporting,
    Done(Outcome),
}

impl PipelineState {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_advance_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Fetching)
                | (Fetching, Extracting)
                | (Extracting, Converting)
                | (Extracting, Done(Outcome::NoProducts))
                | (Converting, Exporting)
                | (Converting, Done(Outcome::NoConversions))
                | (Exporting, Done(Outcome::Completed))
        )
    }
}

/// Records every state a run passes through
#[derive(Debug)]
struct StateTracker {
    history: Vec<PipelineState>,
}

impl StateTracker {
    fn new() -> Self {
        Self {
            history: vec![PipelineState::Idle],
        }
    }

    fn current(&self) -> PipelineState {
        *self.history.last().unwrap_or(&PipelineState::Idle)
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.current().can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.current(),
            next
        );
        log::debug!("Pipeline {:?} -> {:?}", self.current(), next);
        self.history.push(next);
    }
}

/// Parameters of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub target_currency: String,
    pub max_products: usize,
}

impl RunRequest {
    pub fn new(target_currency: impl Into<String>, max_products: usize) -> Self {
        Self {
            target_currency: target_currency.into(),
            max_products,
        }
    }
}

impl Default for RunRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_CURRENCY, DEFAULT_MAX_PRODUCTS)
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub outcome: Outcome,
    /// Currency code the caller asked for, as given
    pub requested_currency: String,
    /// Currency code actually used
    pub target_currency: String,
    pub extraction: ExtractionStats,
    pub records: Vec<ConvertedRecord>,
    /// Every state visited, starting with `Idle`
    pub transitions: Vec<PipelineState>,
    /// Names of sinks whose export failed
    pub failed_sinks: Vec<String>,
}

impl PipelineReport {
    /// True when a non-empty requested currency was replaced by the default
    pub fn currency_substituted(&self) -> bool {
        let requested = normalize_code(&self.requested_currency);
        !requested.is_empty() && requested != self.target_currency
    }

    pub fn final_state(&self) -> PipelineState {
        *self.transitions.last().unwrap_or(&PipelineState::Idle)
    }
}

/// Validate `requested` against `table`
///
/// Input is trimmed and upper-cased. An empty input silently selects
/// `default`; an unknown code selects `default` with a warning. If `default`
/// is itself missing from the table, the table's base currency is used.
pub fn resolve_target_currency(requested: &str, table: &RateTable, default: &str) -> String {
    let fallback = if table.contains(default) {
        normalize_code(default)
    } else {
        table.base().to_string()
    };

    let code = normalize_code(requested);
    if code.is_empty() {
        return fallback;
    }
    if table.contains(&code) {
        return code;
    }

    log::warn!("Invalid currency '{}'. Using default: {}", requested.trim(), fallback);
    fallback
}

/// Sequences a document source, the extractor and the converter
pub struct Pipeline {
    source: Box<dyn DocumentSource>,
    extractor: RecordExtractor,
    converter: CurrencyConverter,
    default_currency: String,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn DocumentSource>,
        extractor: RecordExtractor,
        converter: CurrencyConverter,
    ) -> Self {
        Self {
            source,
            extractor,
            converter,
            default_currency: DEFAULT_TARGET_CURRENCY.to_string(),
        }
    }

    /// Use `code` instead of [`DEFAULT_TARGET_CURRENCY`] for invalid input
    pub fn with_default_currency(mut self, code: impl Into<String>) -> Self {
        self.default_currency = code.into();
        self
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    /// Execute one run, handing a non-empty result to every sink in order
    ///
    /// A failing sink is logged and listed in the report; the remaining
    /// sinks still run.
    pub fn run(
        &self,
        request: &RunRequest,
        sinks: &mut [&mut dyn ExportSink],
    ) -> Result<PipelineReport> {
        let mut state = StateTracker::new();
        let target = resolve_target_currency(
            &request.target_currency,
            self.converter.table(),
            &self.default_currency,
        );

        state.advance(PipelineState::Fetching);
        log::info!(
            "Scraping {} products from {}",
            request.max_products,
            self.source.describe()
        );
        let html = self.source.fetch()?;

        state.advance(PipelineState::Extracting);
        let document = parse_document(&html);
        let (products, extraction) = self
            .extractor
            .extract_with_stats(&document, request.max_products);

        let mut report = PipelineReport {
            outcome: Outcome::NoProducts,
            requested_currency: request.target_currency.clone(),
            target_currency: target.clone(),
            extraction,
            records: Vec::new(),
            transitions: Vec::new(),
            failed_sinks: Vec::new(),
        };

        if products.is_empty() {
            log::info!("No products found, nothing to convert");
            state.advance(PipelineState::Done(Outcome::NoProducts));
            report.transitions = state.history;
            return Ok(report);
        }

        state.advance(PipelineState::Converting);
        let records = self.converter.convert(&products, &target);
        if records.is_empty() {
            log::warn!("None of {} products could be converted", products.len());
            report.outcome = Outcome::NoConversions;
            state.advance(PipelineState::Done(Outcome::NoConversions));
            report.transitions = state.history;
            return Ok(report);
        }

        state.advance(PipelineState::Exporting);
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.export(&records) {
                log::error!("Export to {} failed: {}", sink.name(), e);
                report.failed_sinks.push(sink.name().to_string());
            }
        }

        state.advance(PipelineState::Done(Outcome::Completed));
        report.outcome = Outcome::Completed;
        report.records = records;
        report.transitions = state.history;
        Ok(report)
    }
}
