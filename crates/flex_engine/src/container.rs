//! The layout container: owns the visible-item mapping and orchestrates the
//! five-phase measure/mutate protocol across it.

use crate::LayoutFault;
use crate::gutters::{GutterSpec, compute_gutters};
use crate::item::{Align, ItemSpec, LayoutItem};
use log::{trace, warn};
use sizing::{Size, SizeUnit, UsedSpace, flex_share_calc};
use smallvec::SmallVec;
use style_host::{StyleOverrides, StyleSink, TextFlow};

/// Main-axis packing of the row, applied as text-align while the container
/// is in measurement mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

impl Justify {
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Declared configuration for one container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerConfig {
    pub width: Option<Size>,
    /// When set, the container's height is authoritative: the height phase
    /// never pins a measured height over it.
    pub height: Option<Size>,
    /// Gutter inserted before, between, and after the visible children.
    pub gutter: Option<Size>,
    /// Default cross-axis alignment for items without a declared one.
    pub align_items: Align,
    pub justify_items: Justify,
}

/// A row of layout items plus the state one layout pass needs.
///
/// Rebuilt mappings (items, gutters) live from one render to the next;
/// measured widths are ephemeral within a single pass.
pub struct LayoutContainer<S: StyleSink> {
    sink: S,
    config: ContainerConfig,
    items: Vec<LayoutItem<S>>,
    gutters: GutterSpec,
    measured_widths: Vec<f32>,
    in_pass: bool,
}

impl<S: StyleSink> LayoutContainer<S> {
    pub fn new(sink: S, config: ContainerConfig) -> Self {
        Self {
            sink,
            config,
            items: Vec::new(),
            gutters: GutterSpec::new(),
            measured_widths: Vec::new(),
            in_pass: false,
        }
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The visible items, in declared order.
    pub fn items(&self) -> &[LayoutItem<S>] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [LayoutItem<S>] {
        &mut self.items
    }

    /// The gutter sequence for the current children (k+1 entries).
    pub fn gutters(&self) -> &[Size] {
        &self.gutters
    }

    /// Rebuild the owned visible-subsequence mapping from a declared child
    /// list that may contain holes. Called once per render; the previous
    /// mapping and any ephemeral measurements are discarded. Empty slots
    /// never receive a gutter, slot index, or measurement entry.
    pub fn rebuild_children(
        &mut self,
        children: Vec<Option<ItemSpec<S>>>,
    ) -> Result<(), LayoutFault> {
        let gutter = self.config.gutter.unwrap_or(Size::ZERO);
        self.gutters = compute_gutters(&children, gutter);
        let mut items = Vec::new();
        for (slot, spec) in children.into_iter().flatten().enumerate() {
            let gutter_left = (slot == 0).then(|| self.gutters[0]);
            let gutter_right = Some(self.gutters[slot + 1]);
            items.push(LayoutItem::from_spec(
                spec,
                slot,
                self.config.align_items,
                gutter_left,
                gutter_right,
            )?);
        }
        trace!("rebuilt container children: {} visible", items.len());
        self.items = items;
        self.measured_widths.clear();
        Ok(())
    }

    /// Inline styles the host applies when rendering the container element.
    pub fn render_styles(&self) -> SmallVec<(&'static str, String), 4> {
        let mut styles = SmallVec::new();
        styles.push(("display", String::from("block")));
        if let Some(width) = self.config.width {
            styles.push(("width", width.to_string()));
        }
        if let Some(height) = self.config.height {
            styles.push(("height", height.to_string()));
        }
        styles
    }

    fn ensure_mounted(&self) -> Result<(), LayoutFault> {
        if self.sink.is_mounted() {
            return Ok(());
        }
        debug_assert!(false, "layout phase reached a container with no mounted element");
        warn!("skipping container: no mounted element");
        Err(LayoutFault::UnresolvedRef { slot: None })
    }

    /// Phase 1: clear stale overrides from a prior pass so the coming
    /// measurement observes unconstrained natural flow. Must always run
    /// fully, even after a partial prior pass.
    pub fn unset_layout_styles(&mut self) -> Result<(), LayoutFault> {
        self.ensure_mounted()?;
        let mut overrides = StyleOverrides::TEXT_FLOW;
        if self.config.height.is_none() {
            overrides = overrides.or(StyleOverrides::HEIGHT);
        }
        self.sink.clear_overrides(overrides);
        for item in &mut self.items {
            item.unset_layout_styles()?;
        }
        Ok(())
    }

    /// Phase 2: read the container's ambient text-flow, then force
    /// measurement mode (nowrap plus the declared justification) and
    /// propagate the ambient values to every item. The read must precede
    /// the force: reading afterwards would observe our own override instead
    /// of the inherited value.
    pub fn measure_inherited_styles(&mut self) -> Result<(), LayoutFault> {
        if self.items.is_empty() {
            return Ok(());
        }
        self.ensure_mounted()?;
        let inherited = self.sink.computed_text_flow();
        self.sink.set_text_flow(&TextFlow {
            white_space: String::from("nowrap"),
            text_align: self.config.justify_items.css().to_owned(),
            line_height: String::new(),
        });
        for item in &mut self.items {
            item.apply_inherited_styles(&inherited)?;
        }
        Ok(())
    }

    /// Phase 3: record each item's natural width. Items whose size is
    /// authoritative (explicit width or flex weight) contribute zero. The
    /// result is only meaningful within this pass.
    pub fn measure_widths(&mut self) -> Result<(), LayoutFault> {
        if self.items.is_empty() {
            return Ok(());
        }
        self.measured_widths = self
            .items
            .iter_mut()
            .map(LayoutItem::measure_natural_width)
            .collect::<Result<Vec<f32>, LayoutFault>>()?;
        trace!("measured natural widths: {:?}", self.measured_widths);
        Ok(())
    }

    /// Phase 4: aggregate used space (explicit widths, measured naturals,
    /// gutters) and the total flex weight, then hand each flexible item its
    /// share of the remainder.
    pub fn apply_widths(&mut self) -> Result<(), LayoutFault> {
        if self.items.is_empty() {
            return Ok(());
        }
        let total_flex_weight: f32 = self.items.iter().filter_map(LayoutItem::flex_weight).sum();
        if self.items.iter().any(LayoutItem::is_flexible) && total_flex_weight <= 0.0 {
            return Err(LayoutFault::ZeroFlexWeight);
        }

        let mut used = UsedSpace::new();
        for item in &self.items {
            if let Some(width) = item.width() {
                used.add_size(width);
            }
        }
        used.add(SizeUnit::Pixels, self.measured_widths.iter().sum())?;
        for gutter in &self.gutters {
            used.add_size(*gutter);
        }
        trace!(
            "apply widths: used={}, total flex weight={total_flex_weight}",
            used.to_css()
        );

        for item in &mut self.items {
            if let Some(weight) = item.flex_weight() {
                let share = flex_share_calc(&used, weight, total_flex_weight);
                item.apply_width(&share)?;
            }
            if let Some(nested) = item.nested_mut() {
                nested.apply_widths()?;
            }
        }
        Ok(())
    }

    /// Phase 5: measure the container's rendered height (after width
    /// application, since width can affect wrapping), pin it as an explicit
    /// pixel height unless one was declared, and propagate it to every
    /// item.
    pub fn set_container_heights(&mut self) -> Result<(), LayoutFault> {
        if self.items.is_empty() {
            return Ok(());
        }
        self.ensure_mounted()?;
        let height_px = self.sink.measure_height();
        if self.config.height.is_none() {
            self.sink.set_height(&format!("{height_px}px"));
        }
        for item in &mut self.items {
            item.set_container_height(height_px)?;
            if let Some(nested) = item.nested_mut() {
                nested.set_container_heights()?;
            }
        }
        Ok(())
    }

    /// One complete layout pass: the five phases in strict order.
    /// Non-reentrant; a pass triggered while one is in progress is a
    /// forbidden precondition.
    pub fn run_layout_pass(&mut self) -> Result<(), LayoutFault> {
        if self.in_pass {
            debug_assert!(false, "re-entrant layout pass on one container");
            return Err(LayoutFault::PassInProgress);
        }
        self.in_pass = true;
        let outcome = self.run_phases();
        self.in_pass = false;
        outcome
    }

    fn run_phases(&mut self) -> Result<(), LayoutFault> {
        trace!("layout pass over {} items", self.items.len());
        self.unset_layout_styles()?;
        self.measure_inherited_styles()?;
        self.measure_widths()?;
        self.apply_widths()?;
        self.set_container_heights()?;
        for item in &mut self.items {
            item.finish_pass();
        }
        self.measured_widths.clear();
        Ok(())
    }
}
