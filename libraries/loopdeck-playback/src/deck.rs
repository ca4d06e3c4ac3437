//! Deck building: featured-slide expansion and even distribution
//!
//! Turns the authored slide list into the sequence actually played. Featured
//! slides appear `1 + featured_repeats` times, spread through the
//! non-featured slides.
//!
//! Algorithm:
//! 1. Partition into featured and non-featured slides (relative order kept)
//! 2. Build the featured pool: every original first, then copies round-robin
//!    across distinct featured slides, so the same slide never repeats
//!    back-to-back while another featured slide is available
//! 3. Merge the pool into the non-featured slides (see [`distribute`])

use crate::types::{InstanceId, PlaybackDeck, SlideInstance};
use loopdeck_core::types::{Settings, Slide, MAX_FEATURED_REPEATS};
use tracing::debug;

/// Build the playback deck for `raw` slides
///
/// Pure and deterministic. `featured_repeats` above
/// [`MAX_FEATURED_REPEATS`] is clamped.
pub fn build_deck(raw: &[Slide], featured_repeats: u32) -> PlaybackDeck {
    let repeats = featured_repeats.min(u32::from(MAX_FEATURED_REPEATS)) as usize;

    let mut featured = Vec::new();
    let mut non_featured = Vec::new();
    for (index, slide) in raw.iter().enumerate() {
        if slide.featured {
            featured.push(slide);
        } else {
            non_featured.push(SlideInstance {
                id: InstanceId::Slide { index },
                slide: slide.clone(),
            });
        }
    }

    if featured.is_empty() {
        return PlaybackDeck::new(non_featured);
    }

    let mut pool = Vec::with_capacity(featured.len() * (1 + repeats));
    for (featured_index, slide) in featured.iter().enumerate() {
        pool.push(SlideInstance {
            id: InstanceId::FeaturedOriginal {
                featured: featured_index,
            },
            slide: (*slide).clone(),
        });
    }
    for copy in 0..repeats {
        for (featured_index, slide) in featured.iter().enumerate() {
            pool.push(SlideInstance {
                id: InstanceId::FeaturedCopy {
                    featured: featured_index,
                    copy,
                },
                slide: (*slide).clone(),
            });
        }
    }

    debug!(
        total = raw.len(),
        featured = featured.len(),
        featured_instances = pool.len(),
        non_featured = non_featured.len(),
        "Building deck"
    );

    PlaybackDeck::new(distribute(non_featured, pool))
}

/// Build the deck using the repeat count from `settings`
pub fn build_deck_with(raw: &[Slide], settings: &Settings) -> PlaybackDeck {
    build_deck(raw, u32::from(settings.featured_repeats))
}

/// Interleave featured instances among non-featured ones
///
/// - More featured than non-featured (`F >= N`): merge-zip, one non-featured
///   then one featured per step, the longer list's remainder appended.
/// - Otherwise: each featured instance follows a batch of
///   `spacing = N / (F + 1)` non-featured slides; the leftover non-featured
///   tail plays uninterrupted at the end.
fn distribute<T>(non_featured: Vec<T>, featured: Vec<T>) -> Vec<T> {
    let total_featured = featured.len();
    let total_non_featured = non_featured.len();
    let mut result = Vec::with_capacity(total_featured + total_non_featured);

    let mut non_featured = non_featured.into_iter();
    let mut featured = featured.into_iter();

    if total_featured >= total_non_featured {
        for _ in 0..total_featured.max(total_non_featured) {
            result.extend(non_featured.next());
            result.extend(featured.next());
        }
        return result;
    }

    let spacing = total_non_featured / (total_featured + 1);
    debug!(spacing, "Spacing featured slides");

    for instance in featured {
        result.extend(non_featured.by_ref().take(spacing));
        result.push(instance);
    }
    result.extend(non_featured);
    result
}
