use flex_engine::{Align, ContainerConfig, ItemConfig, ItemSpec, LayoutContainer};
use sizing::Size;
use style_host::MemoryElement;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn natural() -> Option<ItemSpec<MemoryElement>> {
    Some(ItemSpec::new(MemoryElement::new(50.0, 20.0)))
}

#[test]
fn container_styles_carry_declared_dimensions() {
    init_logs();

    let layout = LayoutContainer::new(
        MemoryElement::new(800.0, 40.0),
        ContainerConfig {
            width: Some(Size::percent(50.0).unwrap()),
            height: Some(Size::px(200.0).unwrap()),
            ..ContainerConfig::default()
        },
    );
    assert_eq!(
        layout.render_styles().as_slice(),
        &[
            ("display", String::from("block")),
            ("width", String::from("50%")),
            ("height", String::from("200px")),
        ]
    );
}

#[test]
fn gutter_margins_are_never_doubled() {
    init_logs();

    let mut layout = LayoutContainer::new(
        MemoryElement::new(800.0, 40.0),
        ContainerConfig {
            gutter: Some(Size::rem(1.0).unwrap()),
            ..ContainerConfig::default()
        },
    );
    // A hole between two visible children consumes no gutter slot.
    layout
        .rebuild_children(vec![natural(), None, natural()])
        .unwrap();

    let items = layout.items();
    // First child: leading gutter as margin-left, shared gap as margin-right.
    assert_eq!(
        items[0].render_styles().as_slice(),
        &[
            ("display", String::from("inline-block")),
            ("vertical-align", String::from("top")),
            ("margin-left", String::from("1rem")),
            ("margin-right", String::from("1rem")),
        ]
    );
    // Second child: the shared gap belongs to its predecessor's margin-right
    // alone; only the trailing gutter is its own.
    assert_eq!(
        items[1].render_styles().as_slice(),
        &[
            ("display", String::from("inline-block")),
            ("vertical-align", String::from("top")),
            ("margin-right", String::from("1rem")),
        ]
    );
}

#[test]
fn explicit_width_is_render_applied() {
    init_logs();

    let mut layout =
        LayoutContainer::new(MemoryElement::new(800.0, 40.0), ContainerConfig::default());
    layout
        .rebuild_children(vec![Some(
            ItemSpec::new(MemoryElement::new(0.0, 20.0)).with_config(ItemConfig {
                width: Some(Size::px(100.0).unwrap()),
                ..ItemConfig::default()
            }),
        )])
        .unwrap();

    let styles = layout.items()[0].render_styles();
    assert!(styles.contains(&("width", String::from("100px"))));
}

#[test]
fn alignment_defaults_to_the_container_and_can_be_declared() {
    init_logs();

    let mut layout = LayoutContainer::new(
        MemoryElement::new(800.0, 40.0),
        ContainerConfig {
            align_items: Align::Middle,
            ..ContainerConfig::default()
        },
    );
    layout
        .rebuild_children(vec![
            natural(),
            Some(
                ItemSpec::new(MemoryElement::new(50.0, 20.0)).with_config(ItemConfig {
                    align: Some(Align::Bottom),
                    ..ItemConfig::default()
                }),
            ),
        ])
        .unwrap();

    let items = layout.items();
    assert_eq!(items[0].align(), Align::Middle);
    assert_eq!(items[1].align(), Align::Bottom);
    assert!(
        items[1]
            .render_styles()
            .contains(&("vertical-align", String::from("bottom")))
    );
}

#[test]
fn zero_gutters_render_no_margins() {
    init_logs();

    let mut layout =
        LayoutContainer::new(MemoryElement::new(800.0, 40.0), ContainerConfig::default());
    layout.rebuild_children(vec![natural(), natural()]).unwrap();

    for item in layout.items() {
        let styles = item.render_styles();
        assert!(
            styles
                .iter()
                .all(|(property, _)| !property.starts_with("margin"))
        );
    }
}
