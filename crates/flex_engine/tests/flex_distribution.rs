use flex_engine::{
    ContainerConfig, FlexGrow, ItemConfig, ItemSpec, LayoutContainer, LayoutFault,
};
use sizing::Size;
use style_host::{MemoryElement, SinkOp};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn container(config: ContainerConfig) -> LayoutContainer<MemoryElement> {
    LayoutContainer::new(MemoryElement::new(800.0, 40.0), config)
}

fn fixed(width: f32) -> Option<ItemSpec<MemoryElement>> {
    Some(
        ItemSpec::new(MemoryElement::new(0.0, 20.0)).with_config(ItemConfig {
            width: Some(Size::px(width).unwrap()),
            ..ItemConfig::default()
        }),
    )
}

fn flexible(grow: FlexGrow) -> Option<ItemSpec<MemoryElement>> {
    Some(
        ItemSpec::new(MemoryElement::new(0.0, 20.0)).with_config(ItemConfig {
            flex_grow: Some(grow),
            ..ItemConfig::default()
        }),
    )
}

fn natural(width: f32) -> Option<ItemSpec<MemoryElement>> {
    Some(ItemSpec::new(MemoryElement::new(width, 20.0)))
}

#[test]
fn fixed_width_plus_two_grow_weights() {
    init_logs();

    let mut layout = container(ContainerConfig::default());
    layout
        .rebuild_children(vec![
            fixed(100.0),
            flexible(FlexGrow::Weight(1.0)),
            flexible(FlexGrow::Weight(2.0)),
        ])
        .unwrap();
    layout.run_layout_pass().unwrap();

    let items = layout.items();
    // The explicit width is render-applied, never written by the engine.
    assert_eq!(items[0].sink().width(), None);
    assert_eq!(items[1].sink().width(), Some("calc((100% - 100px) * 1/3)"));
    assert_eq!(items[2].sink().width(), Some("calc((100% - 100px) * 2/3)"));
}

#[test]
fn bare_grow_counts_as_weight_one() {
    init_logs();

    let mut layout = container(ContainerConfig::default());
    layout
        .rebuild_children(vec![
            flexible(FlexGrow::Auto),
            flexible(FlexGrow::Weight(1.0)),
        ])
        .unwrap();
    layout.run_layout_pass().unwrap();

    let items = layout.items();
    assert_eq!(items[0].sink().width(), Some("calc(100% * 1/2)"));
    assert_eq!(items[1].sink().width(), Some("calc(100% * 1/2)"));
}

#[test]
fn natural_widths_and_gutters_claim_used_space() {
    init_logs();

    let mut layout = container(ContainerConfig {
        gutter: Some(Size::px(10.0).unwrap()),
        ..ContainerConfig::default()
    });
    layout
        .rebuild_children(vec![
            natural(80.0),
            natural(40.0),
            flexible(FlexGrow::Weight(1.0)),
        ])
        .unwrap();
    layout.run_layout_pass().unwrap();

    // Used space: 80 + 40 measured plus four 10px gutters.
    let items = layout.items();
    assert_eq!(items[2].sink().width(), Some("calc((100% - 160px) * 1/1)"));
}

#[test]
fn rem_gutters_stay_in_their_own_unit() {
    init_logs();

    let mut layout = container(ContainerConfig {
        gutter: Some(Size::rem(1.0).unwrap()),
        ..ContainerConfig::default()
    });
    layout
        .rebuild_children(vec![fixed(100.0), flexible(FlexGrow::Weight(1.0))])
        .unwrap();
    layout.run_layout_pass().unwrap();

    let items = layout.items();
    assert_eq!(
        items[1].sink().width(),
        Some("calc((100% - 100px - 3rem) * 1/1)")
    );
}

#[test]
fn authoritative_sizing_is_never_observed() {
    init_logs();

    let mut layout = container(ContainerConfig::default());
    layout
        .rebuild_children(vec![
            fixed(100.0),
            flexible(FlexGrow::Auto),
            natural(60.0),
        ])
        .unwrap();
    layout.run_layout_pass().unwrap();

    let items = layout.items();
    assert!(!items[0].sink().journal().contains(&SinkOp::MeasureWidth));
    assert!(!items[1].sink().journal().contains(&SinkOp::MeasureWidth));
    assert!(items[2].sink().journal().contains(&SinkOp::MeasureWidth));
}

#[test]
fn zero_weight_is_the_declared_not_flexible_form() {
    init_logs();

    let mut layout = container(ContainerConfig::default());
    layout
        .rebuild_children(vec![natural(50.0), flexible(FlexGrow::Weight(0.0))])
        .unwrap();
    layout.run_layout_pass().unwrap();

    let items = layout.items();
    assert!(!items[1].is_flexible());
    assert_eq!(items[1].sink().width(), None);
}

#[test]
fn bad_weights_are_rejected_at_rebuild() {
    init_logs();

    let mut layout = container(ContainerConfig::default());
    let rejected = layout.rebuild_children(vec![flexible(FlexGrow::Weight(-1.0))]);
    assert!(matches!(
        rejected,
        Err(LayoutFault::InvalidFlexWeight { .. })
    ));

    let rejected = layout.rebuild_children(vec![flexible(FlexGrow::Weight(f32::NAN))]);
    assert!(matches!(
        rejected,
        Err(LayoutFault::InvalidFlexWeight { .. })
    ));
}
