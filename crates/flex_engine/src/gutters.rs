//! Gutter sequence computation over the visible child subsequence.

use sizing::Size;
use smallvec::SmallVec;

/// Ordered gutter sizes: one entry before the first visible child, one
/// between each consecutive pair, one after the last. Each inter-item gap
/// is a single shared value, never a sum of two items' margins.
pub type GutterSpec = SmallVec<Size, 8>;

/// Compute the gutter sequence for a child list that may contain holes.
///
/// Empty slots are skipped entirely and never consume a gutter slot. With k
/// visible children the result has k+1 entries; with none it is empty.
/// Leading and trailing gutters are always present once anything is
/// visible; only internal ones depend on having at least two children.
pub fn compute_gutters<T>(children: &[Option<T>], gutter: Size) -> GutterSpec {
    let visible = children.iter().filter(|slot| slot.is_some()).count();
    let mut spec = GutterSpec::new();
    if visible == 0 {
        return spec;
    }
    for _ in 0..=visible {
        spec.push(gutter);
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizing::Size;

    fn rem(amount: f32) -> Size {
        Size::rem(amount).unwrap()
    }

    #[test]
    fn count_is_visible_plus_one() {
        let children: Vec<Option<()>> = vec![Some(()), Some(()), Some(())];
        assert_eq!(compute_gutters(&children, rem(1.0)).len(), 4);

        let one: Vec<Option<()>> = vec![Some(())];
        assert_eq!(compute_gutters(&one, rem(1.0)).len(), 2);
    }

    #[test]
    fn zero_visible_children_produce_no_gutters() {
        let children: Vec<Option<()>> = vec![None, None];
        assert!(compute_gutters(&children, rem(1.0)).is_empty());
        let empty: Vec<Option<()>> = Vec::new();
        assert!(compute_gutters(&empty, rem(1.0)).is_empty());
    }

    #[test]
    fn holes_are_skipped_entirely() {
        // [A, null, B] with a 1rem gutter: before A, between A and B, after B.
        let children: Vec<Option<&str>> = vec![Some("a"), None, Some("b")];
        let spec = compute_gutters(&children, rem(1.0));
        assert_eq!(spec.as_slice(), &[rem(1.0), rem(1.0), rem(1.0)]);
    }
}
