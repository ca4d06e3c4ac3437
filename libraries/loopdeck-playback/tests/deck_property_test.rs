//! Property-based tests for the deck builder
//!
//! Uses proptest to verify the distribution invariants across many random
//! featured/non-featured layouts and repeat counts.

use loopdeck_core::types::{Slide, SlideType, MAX_FEATURED_REPEATS};
use loopdeck_playback::{build_deck, InstanceId};
use proptest::prelude::*;

// ===== Helpers =====

fn slides_from_flags(flags: &[bool]) -> Vec<Slide> {
    flags
        .iter()
        .enumerate()
        .map(|(i, featured)| {
            let slide = Slide::new(SlideType::Hero).with_field("n", i as u64);
            if *featured {
                slide.featured()
            } else {
                slide
            }
        })
        .collect()
}

fn arbitrary_layout() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(prop::bool::weighted(0.3), 0..40)
}

/// Featured instance order the pool is expected to follow
fn expected_pool(featured: usize, repeats: usize) -> Vec<InstanceId> {
    let mut pool: Vec<InstanceId> = (0..featured)
        .map(|f| InstanceId::FeaturedOriginal { featured: f })
        .collect();
    for copy in 0..repeats {
        pool.extend((0..featured).map(|f| InstanceId::FeaturedCopy { featured: f, copy }));
    }
    pool
}

// ===== Property Tests =====

proptest! {
    /// Property: deck length is n when nothing is featured, n + f*(1+r) otherwise
    #[test]
    fn deck_size_invariant(flags in arbitrary_layout(), repeats in 0u32..=5) {
        let slides = slides_from_flags(&flags);
        let f = flags.iter().filter(|featured| **featured).count();
        let n = flags.len() - f;

        let deck = build_deck(&slides, repeats);

        if f == 0 {
            prop_assert_eq!(deck.len(), n);
        } else {
            prop_assert_eq!(deck.len(), n + f * (1 + repeats as usize));
        }
    }

    /// Property: repeats above the maximum behave like the maximum
    #[test]
    fn repeats_are_clamped(flags in arbitrary_layout(), repeats in 6u32..1000) {
        let slides = slides_from_flags(&flags);
        prop_assert_eq!(
            build_deck(&slides, repeats),
            build_deck(&slides, u32::from(MAX_FEATURED_REPEATS))
        );
    }

    /// Property: non-featured slides keep their authored relative order and
    /// featured instances keep pool order
    #[test]
    fn order_preservation(flags in arbitrary_layout(), repeats in 0u32..=5) {
        let slides = slides_from_flags(&flags);
        let deck = build_deck(&slides, repeats);

        let non_featured: Vec<usize> = deck
            .iter()
            .filter_map(|instance| match instance.id {
                InstanceId::Slide { index } => Some(index),
                _ => None,
            })
            .collect();
        let expected: Vec<usize> = flags
            .iter()
            .enumerate()
            .filter(|(_, featured)| !**featured)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(non_featured, expected);

        let f = flags.iter().filter(|featured| **featured).count();
        let featured: Vec<InstanceId> = deck
            .iter()
            .map(|instance| instance.id)
            .filter(|id| id.featured_index().is_some())
            .collect();
        prop_assert_eq!(featured, expected_pool(f, repeats as usize));
    }

    /// Property: with two or more featured slides, no two adjacent entries
    /// come from the same featured slide
    #[test]
    fn no_adjacent_duplicate_featured(flags in arbitrary_layout(), repeats in 0u32..=5) {
        let f = flags.iter().filter(|featured| **featured).count();
        prop_assume!(f >= 2);

        let deck = build_deck(&slides_from_flags(&flags), repeats);
        for pair in deck.as_slice().windows(2) {
            let (a, b) = (pair[0].id.featured_index(), pair[1].id.featured_index());
            if a.is_some() {
                prop_assert_ne!(a, b, "adjacent duplicate featured slide in {:?}", deck.ids());
            }
        }
    }

    /// Property: building twice yields the identical deck
    #[test]
    fn build_is_deterministic(flags in arbitrary_layout(), repeats in 0u32..=5) {
        let slides = slides_from_flags(&flags);
        prop_assert_eq!(build_deck(&slides, repeats), build_deck(&slides, repeats));
    }

    /// Property: every instance carries the authored slide it came from
    #[test]
    fn instances_carry_authored_slides(flags in arbitrary_layout(), repeats in 0u32..=5) {
        let slides = slides_from_flags(&flags);
        let deck = build_deck(&slides, repeats);
        let featured_slides: Vec<&Slide> = slides.iter().filter(|s| s.featured).collect();

        for instance in &deck {
            let authored = match instance.id {
                InstanceId::Slide { index } => &slides[index],
                InstanceId::FeaturedOriginal { featured }
                | InstanceId::FeaturedCopy { featured, .. } => featured_slides[featured],
            };
            prop_assert_eq!(&instance.slide, authored);
        }
    }
}

// ===== Scenarios =====

#[test]
fn seven_slide_scenario() {
    // A, B, C(featured), D, E, F(featured), G with one extra repeat
    let flags = [false, false, true, false, false, true, false];
    let deck = build_deck(&slides_from_flags(&flags), 1);

    assert_eq!(deck.len(), 9);
    assert_eq!(
        deck.ids(),
        vec![
            InstanceId::Slide { index: 0 },
            InstanceId::FeaturedOriginal { featured: 0 },
            InstanceId::Slide { index: 1 },
            InstanceId::FeaturedOriginal { featured: 1 },
            InstanceId::Slide { index: 3 },
            InstanceId::FeaturedCopy { featured: 0, copy: 0 },
            InstanceId::Slide { index: 4 },
            InstanceId::FeaturedCopy { featured: 1, copy: 0 },
            InstanceId::Slide { index: 6 },
        ]
    );
}

#[test]
fn featured_slides_survive_zero_repeats() {
    let flags = [false, true, false, false];
    let deck = build_deck(&slides_from_flags(&flags), 0);
    assert_eq!(deck.len(), 4);
    assert_eq!(
        deck.iter().filter(|i| i.id.featured_index().is_some()).count(),
        1
    );
}

#[test]
fn empty_deck() {
    assert!(build_deck(&[], 2).is_empty());
}
