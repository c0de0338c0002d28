// THEORY:
// The `pipeline` module is the top-level API for the whole converter. It
// owns every input (pixel buffer, tolerance, names, display value) and every
// derived artifact (ranked groups, the two memoized documents), and it
// encapsulates the staged recomputation into a single, easy-to-use
// interface.
//
// Key architectural principles:
// 1.  **Wholesale Recomputation**: `process` rebuilds the ranked-group list
//     from scratch on every call (extraction, clustering, ranking). Nothing
//     survives from the previous run except the document memos, and those
//     are cleared at the same time. There is no incremental update path.
// 2.  **Lazy Document Memos**: The two output documents are built on first
//     read and cached until the next input change. The memo is an explicit
//     `Option` holder, not hidden global state, and every setter clears it.
// 3.  **Caller-Gated Preconditions**: Building documents without a loaded
//     image is a contract violation and fails with a typed error; malformed
//     numeric input, by contrast, is coerced (negative tolerance becomes 0)
//     because fail-soft behavior suits an interactive tool.

use crate::core_modules::clusterer::{self, Tolerance};
use crate::core_modules::color_extractor;
use crate::core_modules::display;
use crate::core_modules::group_ranker;
use crate::core_modules::model_builder;
use crate::core_modules::override_builder;
use crate::error::PipelineError;
use log::debug;
use serde_json::Value;

// Re-export key data structures for the public API.
pub use crate::core_modules::color_group::ColorGroup;
pub use crate::core_modules::model_builder::ModelDocument;
pub use crate::core_modules::override_builder::{
    DEFAULT_CASE_LABEL, DEFAULT_FALLBACK_MODEL, DEFAULT_MODEL_NAME, OverrideDocument,
};
pub use crate::core_modules::pixel_buffer::{MAX_DIMENSION, PixelBuffer};

/// Configuration for the conversion pipeline. Empty name fields are legal
/// and fall back to the stock defaults at build time.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub tolerance: Tolerance,
    pub model_name: String,
    pub case_label: String,
    pub fallback_model: String,
    /// Opaque display-transform configuration, embedded verbatim into the
    /// model document.
    pub display: Value,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: 0,
            model_name: String::new(),
            case_label: String::new(),
            fallback_model: String::new(),
            display: display::default_display_settings(),
        }
    }
}

/// A snapshot of both output documents plus the packed palette, as handed to
/// embedders by the driver.
#[derive(Debug, Clone)]
pub struct DocumentSet {
    pub model: ModelDocument,
    pub overrides: OverrideDocument,
    pub palette: Vec<u32>,
}

/// The main, top-level struct for the converter.
pub struct ModelPipeline {
    config: PipelineConfig,
    buffer: Option<PixelBuffer>,
    ranked_groups: Vec<ColorGroup>,
    cached_model: Option<ModelDocument>,
    cached_override: Option<OverrideDocument>,
}

impl ModelPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            buffer: None,
            ranked_groups: Vec::new(),
            cached_model: None,
            cached_override: None,
        }
    }

    /// Replaces the source image. The previous ranked groups stay in place
    /// until the next `process` call; the document memos are cleared now.
    pub fn set_image(&mut self, buffer: PixelBuffer) {
        self.buffer = Some(buffer);
        self.invalidate_documents();
    }

    /// Sets the grouping tolerance, coercing negative input to 0.
    pub fn set_tolerance(&mut self, raw: i64) {
        if raw < 0 {
            log::warn!("negative tolerance {raw} coerced to 0");
        }
        self.config.tolerance = clusterer::coerce_tolerance(raw);
        self.invalidate_documents();
    }

    pub fn set_model_name(&mut self, name: String) {
        self.config.model_name = name;
        self.invalidate_documents();
    }

    pub fn set_case_label(&mut self, label: String) {
        self.config.case_label = label;
        self.invalidate_documents();
    }

    pub fn set_fallback_model(&mut self, reference: String) {
        self.config.fallback_model = reference;
        self.invalidate_documents();
    }

    pub fn set_display(&mut self, display: Value) {
        self.config.display = display;
        self.invalidate_documents();
    }

    pub fn tolerance(&self) -> Tolerance {
        self.config.tolerance
    }

    /// The model name after the empty-string fallback.
    pub fn effective_model_name(&self) -> &str {
        non_empty_or(&self.config.model_name, DEFAULT_MODEL_NAME)
    }

    /// The case label after the empty-string fallback.
    pub fn effective_case_label(&self) -> &str {
        non_empty_or(&self.config.case_label, DEFAULT_CASE_LABEL)
    }

    /// The fallback model reference after the empty-string fallback.
    pub fn effective_fallback_model(&self) -> &str {
        non_empty_or(&self.config.fallback_model, DEFAULT_FALLBACK_MODEL)
    }

    /// Runs one full recomputation over the current inputs.
    pub fn process(&mut self) {
        // Stage 1: Exact-color extraction in scan order.
        let buckets = match &self.buffer {
            Some(buffer) => color_extractor::extract_colors(buffer),
            None => Vec::new(),
        };

        // Stage 2: Greedy tolerance clustering.
        let groups = clusterer::cluster_colors(buckets, self.config.tolerance);

        // Stage 3: Dominance ranking; rank order is the tint-index space.
        self.ranked_groups = group_ranker::rank_groups(groups);

        // The memoized documents described the previous cluster state.
        self.invalidate_documents();

        debug!(
            "pipeline processed: {} groups at tolerance {}",
            self.ranked_groups.len(),
            self.config.tolerance
        );
    }

    /// The current ranked groups, highest pixel count first.
    pub fn ranked_groups(&self) -> &[ColorGroup] {
        &self.ranked_groups
    }

    /// The model document for the current state, built on first read and
    /// memoized. Fails if no source image has been loaded.
    pub fn model_document(&mut self) -> Result<&ModelDocument, PipelineError> {
        if self.cached_model.is_none() {
            let height = self
                .buffer
                .as_ref()
                .ok_or(PipelineError::MissingImage)?
                .height();
            let document = model_builder::build_model(
                &self.ranked_groups,
                height,
                self.effective_model_name(),
                &self.config.display,
            );
            self.cached_model = Some(document);
        }
        self.cached_model.as_ref().ok_or(PipelineError::MissingImage)
    }

    /// The override document for the current state, built on first read and
    /// memoized. Fails if no source image has been loaded.
    pub fn override_document(&mut self) -> Result<&OverrideDocument, PipelineError> {
        if self.cached_override.is_none() {
            if self.buffer.is_none() {
                return Err(PipelineError::MissingImage);
            }
            let document = override_builder::build_override(
                &self.ranked_groups,
                self.effective_model_name(),
                self.effective_case_label(),
                self.effective_fallback_model(),
            );
            self.cached_override = Some(document);
        }
        self.cached_override
            .as_ref()
            .ok_or(PipelineError::MissingImage)
    }

    /// Clones of both documents plus the packed palette, in one call.
    pub fn documents(&mut self) -> Result<DocumentSet, PipelineError> {
        let model = self.model_document()?.clone();
        let overrides = self.override_document()?.clone();
        Ok(DocumentSet {
            model,
            overrides,
            palette: self.palette_integers(),
        })
    }

    /// The ranked base colors packed as 24-bit integers (r<<16 | g<<8 | b).
    pub fn palette_integers(&self) -> Vec<u32> {
        self.ranked_groups
            .iter()
            .map(|group| group.base_color.packed())
            .collect()
    }

    /// The packed palette formatted as a compact `[I;a,b,c]` listing.
    pub fn palette_listing(&self) -> String {
        let joined = self
            .palette_integers()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!("[I;{joined}]")
    }

    fn invalidate_documents(&mut self) {
        self.cached_model = None;
        self.cached_override = None;
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// A 2x2 image: red row over green row, fully opaque.
    fn two_by_two() -> PixelBuffer {
        let data = vec![
            255, 0, 0, 255, //
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 255, 0, 255,
        ];
        PixelBuffer::new(2, 2, data).unwrap()
    }

    fn pipeline_with(buffer: PixelBuffer) -> ModelPipeline {
        let mut pipeline = ModelPipeline::new(PipelineConfig::default());
        pipeline.set_image(buffer);
        pipeline.process();
        pipeline
    }

    #[test]
    fn visible_pixels_are_partitioned_across_groups_at_any_tolerance() {
        for tolerance in [0i64, 3, 50, 600] {
            let mut pipeline = ModelPipeline::new(PipelineConfig::default());
            pipeline.set_image(two_by_two());
            pipeline.set_tolerance(tolerance);
            pipeline.process();

            let mut seen = HashSet::new();
            let mut total = 0usize;
            for group in pipeline.ranked_groups() {
                for point in &group.pixels {
                    assert!(seen.insert(*point));
                    total += 1;
                }
            }
            assert_eq!(total, 4, "tolerance {tolerance} lost or duplicated pixels");
        }
    }

    #[test]
    fn geometry_example_matches_the_flipped_axis_contract() {
        let mut pipeline = pipeline_with(two_by_two());
        assert_eq!(pipeline.ranked_groups().len(), 2);

        let document = pipeline.model_document().unwrap();
        assert_eq!(document.elements.len(), 4);
        let red: Vec<_> = document
            .elements
            .iter()
            .filter(|e| e.faces.north.tintindex == 0)
            .collect();
        let green: Vec<_> = document
            .elements
            .iter()
            .filter(|e| e.faces.north.tintindex == 1)
            .collect();
        assert_eq!(red.len(), 2);
        assert_eq!(green.len(), 2);
        for element in red {
            assert_eq!((element.from[1], element.to[1]), (1.0, 2.0));
        }
        for element in green {
            assert_eq!((element.from[1], element.to[1]), (0.0, 1.0));
        }
    }

    #[test]
    fn rerunning_identical_inputs_is_byte_identical() {
        let mut first = pipeline_with(two_by_two());
        let mut second = pipeline_with(two_by_two());

        let model_a = serde_json::to_string(first.model_document().unwrap()).unwrap();
        let model_b = serde_json::to_string(second.model_document().unwrap()).unwrap();
        assert_eq!(model_a, model_b);

        let override_a = serde_json::to_string(first.override_document().unwrap()).unwrap();
        let override_b = serde_json::to_string(second.override_document().unwrap()).unwrap();
        assert_eq!(override_a, override_b);

        assert_eq!(first.palette_integers(), second.palette_integers());
    }

    #[test]
    fn tint_indices_correlate_across_both_documents() {
        let mut pipeline = pipeline_with(two_by_two());
        let set = pipeline.documents().unwrap();

        let tints = set.overrides.model.cases[0].model.tints.as_ref().unwrap();
        assert_eq!(tints.len(), pipeline.ranked_groups().len());

        for (index, group) in pipeline.ranked_groups().iter().enumerate() {
            let matching = set
                .model
                .elements
                .iter()
                .filter(|e| e.faces.north.tintindex == index)
                .count();
            assert_eq!(matching, group.pixel_count());
            assert_eq!(tints[index].index, index);
            assert_eq!(tints[index].default, group.base_color.normalized());
        }
    }

    #[test]
    fn palette_listing_packs_rank_ordered_base_colors() {
        let data = vec![
            16, 32, 48, 255, //
            16, 32, 48, 255, //
            1, 0, 0, 255, //
            0, 0, 0, 0,
        ];
        let mut pipeline = pipeline_with(PixelBuffer::new(2, 2, data).unwrap());
        pipeline.process();

        assert_eq!(pipeline.palette_integers(), vec![1_056_816, 65_536]);
        assert_eq!(pipeline.palette_listing(), "[I;1056816,65536]");
    }

    #[test]
    fn documents_refuse_to_build_without_an_image() {
        let mut pipeline = ModelPipeline::new(PipelineConfig::default());
        pipeline.process();
        assert!(matches!(
            pipeline.model_document(),
            Err(PipelineError::MissingImage)
        ));
        assert!(matches!(
            pipeline.override_document(),
            Err(PipelineError::MissingImage)
        ));
    }

    #[test]
    fn document_memos_are_reused_until_an_input_changes() {
        let mut pipeline = pipeline_with(two_by_two());

        let first = pipeline.model_document().unwrap() as *const ModelDocument;
        let second = pipeline.model_document().unwrap() as *const ModelDocument;
        assert_eq!(first, second, "repeated reads must hit the memo");

        pipeline.set_model_name("renamed".to_string());
        let rebuilt = pipeline.model_document().unwrap();
        assert_eq!(rebuilt.textures.layer0, "item/renamed");
    }

    #[test]
    fn empty_names_fall_back_to_the_stock_defaults() {
        let mut pipeline = pipeline_with(two_by_two());
        let set = pipeline.documents().unwrap();

        assert_eq!(set.model.textures.layer0, "item/custom_item");
        assert_eq!(set.overrides.model.cases[0].when, "custom");
        assert_eq!(set.overrides.model.cases[0].model.model, "item/custom_item");
        assert_eq!(set.overrides.model.fallback.model, "item/iron_sword");
    }

    #[test]
    fn negative_tolerance_is_coerced_to_zero() {
        let mut pipeline = ModelPipeline::new(PipelineConfig::default());
        pipeline.set_tolerance(-42);
        assert_eq!(pipeline.tolerance(), 0);
    }

    #[test]
    fn processing_without_an_image_yields_no_groups() {
        let mut pipeline = ModelPipeline::new(PipelineConfig::default());
        pipeline.process();
        assert!(pipeline.ranked_groups().is_empty());
        assert_eq!(pipeline.palette_listing(), "[I;]");
    }

    #[test]
    fn tolerance_changes_regroup_on_the_next_process() {
        // Two near-identical reds and one far blue.
        let data = vec![
            100, 0, 0, 255, //
            104, 0, 0, 255, //
            0, 0, 200, 255, //
            0, 0, 0, 0,
        ];
        let buffer = PixelBuffer::new(2, 2, data).unwrap();
        let mut pipeline = ModelPipeline::new(PipelineConfig::default());
        pipeline.set_image(buffer);
        pipeline.process();
        assert_eq!(pipeline.ranked_groups().len(), 3);

        pipeline.set_tolerance(4);
        pipeline.process();
        assert_eq!(pipeline.ranked_groups().len(), 2);
    }
}
