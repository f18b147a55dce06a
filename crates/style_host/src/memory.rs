//! In-memory reference element for tests and headless hosts.

use crate::{StyleOverrides, StyleSink, TextFlow};
use std::cell::RefCell;

/// One recorded sink operation, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkOp {
    SetWidth(String),
    SetHeight(String),
    SetTextFlow,
    ClearOverrides,
    ReadComputed,
    MeasureWidth,
    MeasureHeight,
}

/// A deterministic stand-in for a live rendered element.
///
/// Natural dimensions are configured up front; inline overrides shadow them
/// the way inline styles shadow rendered size. Every call is journaled so
/// tests can assert phase ordering (reads before dependent writes).
///
/// `calc()` widths are stored but not resolved: measurement falls back to
/// the natural width.
#[derive(Debug, Default)]
pub struct MemoryElement {
    width: Option<String>,
    height: Option<String>,
    white_space: Option<String>,
    text_align: Option<String>,
    line_height: Option<String>,
    natural_width: f32,
    natural_height: f32,
    ambient: TextFlow,
    unmounted: bool,
    journal: RefCell<Vec<SinkOp>>,
}

impl MemoryElement {
    /// An element with the given natural rendered dimensions and ambient
    /// text flow of `normal` / `start` / `normal`.
    pub fn new(natural_width: f32, natural_height: f32) -> Self {
        Self {
            natural_width,
            natural_height,
            ambient: TextFlow {
                white_space: String::from("normal"),
                text_align: String::from("start"),
                line_height: String::from("normal"),
            },
            ..Self::default()
        }
    }

    /// Replace the ambient (inherited) text-flow values.
    pub fn with_ambient(mut self, ambient: TextFlow) -> Self {
        self.ambient = ambient;
        self
    }

    /// Mark the element as having no live backing node.
    pub fn unmounted(mut self) -> Self {
        self.unmounted = true;
        self
    }

    pub fn set_mounted(&mut self, mounted: bool) {
        self.unmounted = !mounted;
    }

    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    pub fn height(&self) -> Option<&str> {
        self.height.as_deref()
    }

    pub fn white_space(&self) -> Option<&str> {
        self.white_space.as_deref()
    }

    pub fn text_align(&self) -> Option<&str> {
        self.text_align.as_deref()
    }

    pub fn line_height(&self) -> Option<&str> {
        self.line_height.as_deref()
    }

    /// Snapshot of all applied inline overrides, for idempotence checks.
    pub fn style_snapshot(&self) -> Vec<(&'static str, String)> {
        let mut snapshot = Vec::new();
        let fields = [
            ("width", &self.width),
            ("height", &self.height),
            ("white-space", &self.white_space),
            ("text-align", &self.text_align),
            ("line-height", &self.line_height),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                snapshot.push((name, value.clone()));
            }
        }
        snapshot
    }

    /// The journal of sink calls since creation or the last drain.
    pub fn journal(&self) -> Vec<SinkOp> {
        self.journal.borrow().clone()
    }

    pub fn drain_journal(&self) -> Vec<SinkOp> {
        std::mem::take(&mut *self.journal.borrow_mut())
    }

    fn record(&self, op: SinkOp) {
        self.journal.borrow_mut().push(op);
    }
}

fn px_amount(value: &str) -> Option<f32> {
    value.strip_suffix("px")?.trim().parse().ok()
}

impl StyleSink for MemoryElement {
    fn set_width(&mut self, value: &str) {
        self.record(SinkOp::SetWidth(value.to_owned()));
        self.width = Some(value.to_owned());
    }

    fn set_height(&mut self, value: &str) {
        self.record(SinkOp::SetHeight(value.to_owned()));
        self.height = Some(value.to_owned());
    }

    fn set_text_flow(&mut self, flow: &TextFlow) {
        self.record(SinkOp::SetTextFlow);
        if !flow.white_space.is_empty() {
            self.white_space = Some(flow.white_space.clone());
        }
        if !flow.text_align.is_empty() {
            self.text_align = Some(flow.text_align.clone());
        }
        if !flow.line_height.is_empty() {
            self.line_height = Some(flow.line_height.clone());
        }
    }

    fn clear_overrides(&mut self, overrides: StyleOverrides) {
        self.record(SinkOp::ClearOverrides);
        if overrides.contains(StyleOverrides::WIDTH) {
            self.width = None;
        }
        if overrides.contains(StyleOverrides::HEIGHT) {
            self.height = None;
        }
        if overrides.contains(StyleOverrides::TEXT_FLOW) {
            self.white_space = None;
            self.text_align = None;
            self.line_height = None;
        }
    }

    fn computed_text_flow(&self) -> TextFlow {
        self.record(SinkOp::ReadComputed);
        TextFlow {
            white_space: self
                .white_space
                .clone()
                .unwrap_or_else(|| self.ambient.white_space.clone()),
            text_align: self
                .text_align
                .clone()
                .unwrap_or_else(|| self.ambient.text_align.clone()),
            line_height: self
                .line_height
                .clone()
                .unwrap_or_else(|| self.ambient.line_height.clone()),
        }
    }

    fn measure_width(&self) -> f32 {
        self.record(SinkOp::MeasureWidth);
        self.width
            .as_deref()
            .and_then(px_amount)
            .unwrap_or(self.natural_width)
    }

    fn measure_height(&self) -> f32 {
        self.record(SinkOp::MeasureHeight);
        self.height
            .as_deref()
            .and_then(px_amount)
            .unwrap_or(self.natural_height)
    }

    fn is_mounted(&self) -> bool {
        !self.unmounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_shadow_natural_dimensions() {
        let mut element = MemoryElement::new(120.0, 20.0);
        assert_eq!(element.measure_width(), 120.0);
        element.set_width("80px");
        assert_eq!(element.measure_width(), 80.0);
        element.clear_overrides(StyleOverrides::WIDTH);
        assert_eq!(element.measure_width(), 120.0);
    }

    #[test]
    fn calc_widths_fall_back_to_natural_measurement() {
        let mut element = MemoryElement::new(120.0, 20.0);
        element.set_width("calc((100% - 100px) * 1/3)");
        assert_eq!(element.measure_width(), 120.0);
        assert_eq!(element.width(), Some("calc((100% - 100px) * 1/3)"));
    }

    #[test]
    fn computed_flow_prefers_overrides_over_ambient() {
        let mut element = MemoryElement::new(0.0, 0.0);
        assert_eq!(element.computed_text_flow().white_space, "normal");
        element.set_text_flow(&TextFlow {
            white_space: String::from("nowrap"),
            text_align: String::from("left"),
            line_height: String::new(),
        });
        let flow = element.computed_text_flow();
        assert_eq!(flow.white_space, "nowrap");
        assert_eq!(flow.text_align, "left");
        // line-height was left untouched and still resolves to ambient.
        assert_eq!(flow.line_height, "normal");
    }

    #[test]
    fn clearing_nothing_is_safe() {
        let mut element = MemoryElement::new(10.0, 10.0);
        element.clear_overrides(StyleOverrides::ALL);
        assert!(element.style_snapshot().is_empty());
    }
}
