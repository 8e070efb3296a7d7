//! Balanced spread construction.
//!
//! Terminator only knows two-way splits. A spread lets a layout list any
//! number of same-orientation elements; it is compiled here into a balanced
//! tree of splits whose ratios keep every element the same size.
//!
//! Elements start as leaves of weight 1. Adjacent pairs are merged left to
//! right into a split whose ratio is the left weight over the combined
//! weight; an odd element at the end of a level is carried up unchanged.
//! This repeats until one node is left.
//!
//! ```text
//! [A, B, C, D, E]
//!   level 1: (A B)=2  (C D)=2  E=1
//!   level 2: ((A B) (C D))=4  E=1
//!   level 3: (((A B) (C D)) E)=5   ratio 4/5
//! ```

use crate::error::{LayoutError, Result};
use crate::ids::IdGenerator;
use crate::layout::{ContainedElement, Orientation, Ratio, Split};
use std::num::NonZeroU64;

/// An element together with the number of spread inputs it covers.
struct Weighted {
    element: ContainedElement,
    weight: NonZeroU64,
}

/// Build a balanced split tree over `elements`, preserving their order.
///
/// A single element is returned as is. Depth of the result is
/// `ceil(log2(n))`.
///
/// # Errors
///
/// Returns [`LayoutError::EmptySpread`] if `elements` is empty.
pub fn build_spread(
    orientation: Orientation,
    elements: Vec<ContainedElement>,
    ids: &mut dyn IdGenerator,
) -> Result<ContainedElement> {
    if elements.is_empty() {
        return Err(LayoutError::EmptySpread(orientation.name()));
    }

    let mut level: Vec<Weighted> = elements
        .into_iter()
        .map(|element| Weighted {
            element,
            weight: NonZeroU64::MIN,
        })
        .collect();

    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        let mut nodes = level.into_iter();

        while let Some(left) = nodes.next() {
            match nodes.next() {
                Some(right) => next.push(pair(orientation, left, right, ids)),
                None => next.push(left),
            }
        }

        log::debug!("{} spread level reduced to {} nodes", orientation.name(), next.len());
        level = next;
    }

    match level.pop() {
        Some(root) => Ok(root.element),
        None => Err(LayoutError::EmptySpread(orientation.name())),
    }
}

fn pair(
    orientation: Orientation,
    left: Weighted,
    right: Weighted,
    ids: &mut dyn IdGenerator,
) -> Weighted {
    let weight = left.weight.saturating_add(right.weight.get());
    let split = Split::new(
        ids,
        orientation,
        left.element,
        right.element,
        Some(Ratio::new(left.weight.get(), weight)),
    );
    Weighted {
        element: ContainedElement::Split(split),
        weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::layout::Terminal;

    fn ratio(left: u64, total: u64) -> Ratio {
        Ratio::new(left, NonZeroU64::new(total).unwrap())
    }

    fn terminals(ids: &mut SequentialIds, n: usize) -> Vec<ContainedElement> {
        (0..n)
            .map(|i| {
                ContainedElement::Terminal(Terminal::new(
                    ids,
                    format!("t{}", i),
                    "echo",
                    "",
                    "default",
                    Vec::new(),
                ))
            })
            .collect()
    }

    fn depth(e: &ContainedElement) -> usize {
        match e {
            ContainedElement::Terminal(_) => 0,
            ContainedElement::Split(s) => 1 + depth(&s.first).max(depth(&s.second)),
        }
    }

    fn leaf_titles(e: &ContainedElement, out: &mut Vec<String>) {
        match e {
            ContainedElement::Terminal(t) => out.push(t.title.clone()),
            ContainedElement::Split(s) => {
                leaf_titles(&s.first, out);
                leaf_titles(&s.second, out);
            }
        }
    }

    fn check_ratios(e: &ContainedElement) {
        if let ContainedElement::Split(s) = e {
            let expected = ratio(s.first.leaf_count() as u64, e.leaf_count() as u64);
            assert_eq!(s.ratio, Some(expected));
            check_ratios(&s.first);
            check_ratios(&s.second);
        }
    }

    #[test]
    fn test_empty_spread_fails() {
        let mut ids = SequentialIds::new();
        let err = build_spread(Orientation::Vertical, Vec::new(), &mut ids).unwrap_err();
        assert!(matches!(err, LayoutError::EmptySpread("vertical")));
    }

    #[test]
    fn test_single_element_passes_through() {
        let mut ids = SequentialIds::new();
        let elements = terminals(&mut ids, 1);
        let expected = elements[0].clone();
        let result = build_spread(Orientation::Horizontal, elements, &mut ids).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_three_elements() {
        let mut ids = SequentialIds::new();
        let elements = terminals(&mut ids, 3);
        let root = build_spread(Orientation::Horizontal, elements, &mut ids).unwrap();

        let ContainedElement::Split(outer) = &root else {
            panic!("expected split, got {:?}", root);
        };
        assert_eq!(outer.orientation, Orientation::Horizontal);
        assert_eq!(outer.ratio.unwrap().to_string(), "0.6666666666666667");
        assert!(matches!(&*outer.second, ContainedElement::Terminal(t) if t.title == "t2"));

        let ContainedElement::Split(inner) = &*outer.first else {
            panic!("expected inner split");
        };
        assert_eq!(inner.ratio.unwrap().to_string(), "0.5000000000000000");
        assert!(matches!(&*inner.first, ContainedElement::Terminal(t) if t.title == "t0"));
        assert!(matches!(&*inner.second, ContainedElement::Terminal(t) if t.title == "t1"));
    }

    #[test]
    fn test_shape_invariants() {
        for n in 1..=17 {
            let mut ids = SequentialIds::new();
            let elements = terminals(&mut ids, n);
            let root = build_spread(Orientation::Vertical, elements, &mut ids).unwrap();

            assert_eq!(root.leaf_count(), n);
            let expected_depth = (n as f64).log2().ceil() as usize;
            assert_eq!(depth(&root), expected_depth, "depth for n = {}", n);

            let mut titles = Vec::new();
            leaf_titles(&root, &mut titles);
            let expected: Vec<String> = (0..n).map(|i| format!("t{}", i)).collect();
            assert_eq!(titles, expected);

            check_ratios(&root);
        }
    }

    #[test]
    fn test_five_elements_carry_odd_weight() {
        let mut ids = SequentialIds::new();
        let elements = terminals(&mut ids, 5);
        let root = build_spread(Orientation::Vertical, elements, &mut ids).unwrap();
        let ContainedElement::Split(outer) = &root else {
            panic!("expected split");
        };
        assert_eq!(outer.ratio, Some(ratio(4, 5)));
        assert_eq!(outer.second.leaf_count(), 1);
    }

    #[test]
    fn test_nested_split_counts_as_one() {
        let mut ids = SequentialIds::new();
        let inner = terminals(&mut ids, 2);
        let nested = build_spread(Orientation::Horizontal, inner, &mut ids).unwrap();
        let mut elements = vec![nested];
        elements.extend(terminals(&mut ids, 1));

        let root = build_spread(Orientation::Vertical, elements, &mut ids).unwrap();
        let ContainedElement::Split(outer) = &root else {
            panic!("expected split");
        };
        assert_eq!(outer.ratio, Some(ratio(1, 2)));
    }
}
