//! Redaction strategies and the service that runs them.
//!
//! A run has two phases. [`RedactionService::plan`] opens both documents and
//! resolves which pages get a mask. [`RedactionService::execute`] composes
//! the output, releases the documents and writes the result.

pub mod overlay;
pub mod strategy;

pub use overlay::MaskOverlayStrategy;
pub use strategy::{RedactionResult, RedactionStrategy};

use crate::config::RunConfig;
use crate::domain::{resolve_selection, MaskMode, PageIndexSet};
use crate::error::{DocumentRole, RedactorResult};
use crate::output::{self, OutputTarget};
use crate::pdf::PdfSource;

/// Opened documents and the resolved page selection for one run.
#[derive(Debug)]
pub struct RedactionPlan {
    input: PdfSource,
    mask: PdfSource,
    selection: PageIndexSet,
    mask_mode: MaskMode,
    output: OutputTarget,
}

impl RedactionPlan {
    pub fn input(&self) -> &PdfSource {
        &self.input
    }

    pub fn mask(&self) -> &PdfSource {
        &self.mask
    }

    pub fn selection(&self) -> &PageIndexSet {
        &self.selection
    }

    pub fn mask_mode(&self) -> MaskMode {
        self.mask_mode
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }
}

/// Redaction service coordinating strategy execution.
pub struct RedactionService {
    strategy: Box<dyn RedactionStrategy>,
}

impl RedactionService {
    /// Creates a new redaction service with the specified strategy.
    pub fn new(strategy: Box<dyn RedactionStrategy>) -> Self {
        Self { strategy }
    }

    /// Creates a service that overlays mask pages.
    pub fn with_overlay_strategy() -> Self {
        Self::new(Box::new(MaskOverlayStrategy::new()))
    }

    /// Name of the strategy in use.
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Opens the documents named in `config` and resolves the selection.
    ///
    /// # Errors
    /// [`crate::RedactorError::DocumentOpen`] if either document cannot be
    /// loaded.
    pub fn plan(&self, config: &RunConfig) -> RedactorResult<RedactionPlan> {
        let input = PdfSource::open(config.input(), DocumentRole::Input)?;
        let mask = PdfSource::open(config.mask(), DocumentRole::Mask)?;

        let mask_mode = MaskMode::from_mask_pages(mask.page_count());
        let selection = resolve_selection(
            config.selection(),
            input.page_count(),
            mask.page_count(),
        );
        log::debug!(
            "planned {} of {} pages with {:?} mask",
            selection.len(),
            input.page_count(),
            mask_mode
        );

        Ok(RedactionPlan {
            input,
            mask,
            selection,
            mask_mode,
            output: config.output().clone(),
        })
    }

    /// Composes and writes the output described by `plan`.
    ///
    /// An input without pages is left alone and nothing is written.
    pub fn execute(&self, plan: RedactionPlan) -> RedactorResult<RedactionResult> {
        let RedactionPlan {
            input,
            mask,
            selection,
            mask_mode,
            output: target,
        } = plan;

        let mut result = RedactionResult {
            pages_processed: input.page_count(),
            pages_redacted: selection,
            mask_mode,
            output: None,
            secure: self.strategy.is_secure(),
        };

        if input.page_count() == 0 {
            log::debug!("{} has no pages; skipping output", input.path().display());
            return Ok(result);
        }

        let builder =
            self.strategy
                .compose(&input, &mask, &result.pages_redacted, mask_mode)?;

        // Sources must be released before the output may replace the input
        drop(input);
        drop(mask);

        result.output = Some(output::finalize(builder, &target)?);
        Ok(result)
    }

    /// Plans and executes a run.
    pub fn redact(&self, config: &RunConfig) -> RedactorResult<RedactionResult> {
        let plan = self.plan(config)?;
        self.execute(plan)
    }
}

impl Default for RedactionService {
    fn default() -> Self {
        Self::with_overlay_strategy()
    }
}
