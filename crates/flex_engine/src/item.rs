//! Per-child wrapper: sizing intent plus the measurement and mutation
//! primitives consumed by the container's layout pass.

use crate::LayoutFault;
use crate::container::LayoutContainer;
use log::warn;
use sizing::Size;
use smallvec::SmallVec;
use style_host::{StyleOverrides, StyleSink, TextFlow};

/// Cross-axis alignment of one item inside the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Top,
    Middle,
    Bottom,
    Baseline,
}

impl Align {
    /// The vertical-align keyword the host applies to the item wrapper.
    pub fn css(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
            Self::Baseline => "baseline",
        }
    }
}

/// Flexible-growth declaration: a relative weight, or the bare "grow" form
/// which counts as weight 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlexGrow {
    Auto,
    Weight(f32),
}

impl FlexGrow {
    pub fn weight(self) -> f32 {
        match self {
            Self::Auto => 1.0,
            Self::Weight(weight) => weight,
        }
    }
}

/// Declared sizing intent for one child. Immutable for the duration of a
/// layout pass; an explicit width is authoritative and excludes the item
/// from growth distribution and natural-width measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemConfig {
    pub width: Option<Size>,
    pub flex_grow: Option<FlexGrow>,
    /// Absent means: inherit the container's `align_items`.
    pub align: Option<Align>,
}

/// One declared child handed to [`LayoutContainer::rebuild_children`]:
/// the element sink, the sizing intent, and optionally a nested container
/// whose matching phases the parent's pass will drive.
pub struct ItemSpec<S: StyleSink> {
    pub(crate) sink: S,
    pub(crate) config: ItemConfig,
    pub(crate) nested: Option<Box<LayoutContainer<S>>>,
}

impl<S: StyleSink> ItemSpec<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            config: ItemConfig::default(),
            nested: None,
        }
    }

    pub fn with_config(mut self, config: ItemConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_nested(mut self, nested: LayoutContainer<S>) -> Self {
        self.nested = Some(Box::new(nested));
        self
    }
}

/// Per-pass progress of one item through the phase protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PassPhase {
    Idle,
    Unset,
    MeasuredInherited,
    WidthKnown,
    HeightApplied,
}

/// The per-child wrapper owning one element sink plus its sizing intent.
pub struct LayoutItem<S: StyleSink> {
    sink: S,
    slot: usize,
    width: Option<Size>,
    flex_grow: Option<FlexGrow>,
    align: Align,
    gutter_left: Option<Size>,
    gutter_right: Option<Size>,
    nested: Option<Box<LayoutContainer<S>>>,
    phase: PassPhase,
}

impl<S: StyleSink> LayoutItem<S> {
    /// Build an item from its declared spec. Flex weights are validated
    /// here: negative or non-finite weights are rejected, a zero weight is
    /// the declared "not flexible" form.
    pub(crate) fn from_spec(
        spec: ItemSpec<S>,
        slot: usize,
        default_align: Align,
        gutter_left: Option<Size>,
        gutter_right: Option<Size>,
    ) -> Result<Self, LayoutFault> {
        let flex_grow = match spec.config.flex_grow {
            Some(FlexGrow::Weight(weight)) => {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(LayoutFault::InvalidFlexWeight { weight });
                }
                (weight > 0.0).then_some(FlexGrow::Weight(weight))
            }
            other => other,
        };
        Ok(Self {
            sink: spec.sink,
            slot,
            width: spec.config.width,
            flex_grow,
            align: spec.config.align.unwrap_or(default_align),
            gutter_left,
            gutter_right,
            nested: spec.nested,
            phase: PassPhase::Idle,
        })
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn width(&self) -> Option<Size> {
        self.width
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn is_flexible(&self) -> bool {
        self.flex_grow.is_some()
    }

    /// Effective growth weight: the bare form counts as 1.
    pub fn flex_weight(&self) -> Option<f32> {
        self.flex_grow.map(FlexGrow::weight)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn nested(&self) -> Option<&LayoutContainer<S>> {
        self.nested.as_deref()
    }

    pub fn nested_mut(&mut self) -> Option<&mut LayoutContainer<S>> {
        self.nested.as_deref_mut()
    }

    /// Inline styles the host applies when rendering the item wrapper:
    /// inline-block flow, cross-axis alignment, gutter margins, and the
    /// authoritative explicit width if one was declared.
    pub fn render_styles(&self) -> SmallVec<(&'static str, String), 4> {
        let mut styles = SmallVec::new();
        styles.push(("display", String::from("inline-block")));
        styles.push(("vertical-align", self.align.css().to_owned()));
        if let Some(gutter) = self.gutter_left
            && !gutter.is_zero()
        {
            styles.push(("margin-left", gutter.to_string()));
        }
        if let Some(gutter) = self.gutter_right
            && !gutter.is_zero()
        {
            styles.push(("margin-right", gutter.to_string()));
        }
        if let Some(width) = self.width {
            styles.push(("width", width.to_string()));
        }
        styles
    }

    fn ensure_mounted(&self) -> Result<(), LayoutFault> {
        if self.sink.is_mounted() {
            return Ok(());
        }
        debug_assert!(
            false,
            "layout phase reached an item with no mounted element (slot {})",
            self.slot
        );
        warn!("skipping item {}: no mounted element", self.slot);
        Err(LayoutFault::UnresolvedRef {
            slot: Some(self.slot),
        })
    }

    fn expect_phase(&self, expected: &[PassPhase], operation: &'static str) {
        let in_order = expected.contains(&self.phase);
        debug_assert!(
            in_order,
            "{operation} out of order for item {}: phase {:?}",
            self.slot, self.phase
        );
        if !in_order {
            warn!(
                "{operation} out of order for item {}: phase {:?}",
                self.slot, self.phase
            );
        }
    }

    /// Remove engine-applied overrides, restoring natural flow for the
    /// coming measurement. An explicit width is render-applied and
    /// authoritative, so it is preserved. Must stay idempotent and callable
    /// from any state: this is the recovery path after a partial pass.
    pub fn unset_layout_styles(&mut self) -> Result<(), LayoutFault> {
        self.ensure_mounted()?;
        let mut overrides = StyleOverrides::HEIGHT.or(StyleOverrides::TEXT_FLOW);
        if self.width.is_none() {
            overrides = overrides.or(StyleOverrides::WIDTH);
        }
        self.sink.clear_overrides(overrides);
        if let Some(nested) = self.nested.as_mut() {
            nested.unset_layout_styles()?;
        }
        self.phase = PassPhase::Unset;
        Ok(())
    }

    /// Propagate the container's measured ambient text-flow downward, then
    /// drive a nested container's matching phase, which therefore observes
    /// the restored ambient values rather than the parent's forced nowrap.
    pub fn apply_inherited_styles(&mut self, flow: &TextFlow) -> Result<(), LayoutFault> {
        self.expect_phase(&[PassPhase::Unset], "apply_inherited_styles");
        self.ensure_mounted()?;
        self.sink.set_text_flow(flow);
        if let Some(nested) = self.nested.as_mut() {
            nested.measure_inherited_styles()?;
        }
        self.phase = PassPhase::MeasuredInherited;
        Ok(())
    }

    /// The item's natural rendered width in pixels. Items with an explicit
    /// width or a flex weight contribute zero without being observed: their
    /// size is determined later, not measured.
    pub fn measure_natural_width(&mut self) -> Result<f32, LayoutFault> {
        self.expect_phase(&[PassPhase::MeasuredInherited], "measure_natural_width");
        self.ensure_mounted()?;
        if let Some(nested) = self.nested.as_mut() {
            nested.measure_widths()?;
        }
        if self.width.is_some() || self.flex_grow.is_some() {
            return Ok(0.0);
        }
        Ok(self.sink.measure_width())
    }

    /// Apply a computed width expression (fixed or calc) to the element.
    pub fn apply_width(&mut self, expression: &str) -> Result<(), LayoutFault> {
        self.expect_phase(&[PassPhase::MeasuredInherited], "apply_width");
        self.ensure_mounted()?;
        self.sink.set_width(expression);
        self.phase = PassPhase::WidthKnown;
        Ok(())
    }

    /// Pin the resolved container pixel height onto the item element so
    /// nested content can size against a known height instead of `auto`.
    pub fn set_container_height(&mut self, height_px: f32) -> Result<(), LayoutFault> {
        self.expect_phase(
            &[PassPhase::MeasuredInherited, PassPhase::WidthKnown],
            "set_container_height",
        );
        self.ensure_mounted()?;
        self.sink.set_height(&format!("{height_px}px"));
        self.phase = PassPhase::HeightApplied;
        Ok(())
    }

    pub(crate) fn finish_pass(&mut self) {
        self.phase = PassPhase::Idle;
        if let Some(nested) = self.nested.as_mut() {
            for item in nested.items_mut() {
                item.finish_pass();
            }
        }
    }
}
