use std::cmp::Ordering;

use shared::domain::SortMode;
use tracing::debug;

use crate::record::ItemRecord;

/// Returns `records` ordered under `mode`. The input is left untouched.
///
/// Every mode except [`SortMode::Canonical`] breaks ties by ascending name
/// and is stable, so records equal on both keys keep their input order.
pub fn sort_records<H: Clone>(
    records: &[ItemRecord<H>],
    mode: SortMode,
    canonical_order: &[String],
) -> Vec<ItemRecord<H>> {
    match mode {
        SortMode::Canonical => canonical(records, canonical_order),
        SortMode::Alphabetical => sorted_by(records, |a, b| a.name.cmp(&b.name)),
        SortMode::Price => sorted_by(records, |a, b| {
            b.price.cmp(&a.price).then_with(|| a.name.cmp(&b.name))
        }),
        SortMode::Count => sorted_by(records, |a, b| {
            b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name))
        }),
        SortMode::Color => sorted_by(records, |a, b| {
            a.color
                .rank
                .cmp(&b.color.rank)
                .then_with(|| a.name.cmp(&b.name))
        }),
    }
}

fn sorted_by<H, F>(records: &[ItemRecord<H>], compare: F) -> Vec<ItemRecord<H>>
where
    H: Clone,
    F: FnMut(&ItemRecord<H>, &ItemRecord<H>) -> Ordering,
{
    let mut sorted = records.to_vec();
    sorted.sort_by(compare);
    sorted
}

/// Each canonical id takes the first remaining record with that id; whatever
/// is left is appended in input order. Quadratic in the worst case.
fn canonical<H: Clone>(records: &[ItemRecord<H>], order: &[String]) -> Vec<ItemRecord<H>> {
    let mut pool: Vec<&ItemRecord<H>> = records.iter().collect();
    let mut sorted = Vec::with_capacity(records.len());

    for id in order {
        if let Some(position) = pool.iter().position(|record| &record.id == id) {
            sorted.push(pool.remove(position).clone());
        }
    }

    if !pool.is_empty() {
        debug!(leftover = pool.len(), "appended records missing from canonical order");
        sorted.extend(pool.into_iter().cloned());
    }

    sorted
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
