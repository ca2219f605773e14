use super::*;

#[test]
fn bit_values_are_stable() {
    assert_eq!(EnabledBorders::TOP.bits(), 1);
    assert_eq!(EnabledBorders::BOTTOM.bits(), 2);
    assert_eq!(EnabledBorders::LEFT.bits(), 4);
    assert_eq!(EnabledBorders::RIGHT.bits(), 8);
    assert_eq!(EnabledBorders::default().bits(), 15);
}

#[test]
fn parse_list_accepts_names_and_keywords() {
    assert_eq!(
        EnabledBorders::parse_list("top, Left").unwrap(),
        EnabledBorders::TOP | EnabledBorders::LEFT
    );
    assert_eq!(EnabledBorders::parse_list("ALL").unwrap(), EnabledBorders::all());
    assert_eq!(
        EnabledBorders::parse_list("none").unwrap(),
        EnabledBorders::empty()
    );
    assert!(EnabledBorders::parse_list("top,diagonal").is_err());
}

#[test]
fn location_prefixes() {
    assert_eq!(Location::TopEdge.prefix_name(), "north");
    assert_eq!(Location::BottomEdge.prefix_name(), "south");
    assert_eq!(Location::LeftEdge.prefix_name(), "west");
    assert_eq!(Location::RightEdge.prefix_name(), "east");
    assert_eq!(Location::Floating.prefix_name(), "");
}
