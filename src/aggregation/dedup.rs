//! Cross-list deduplication.
//!
//! The fund universe arrives from two overlapping lists (a curated
//! allow-list and a broad scan); the merged output must carry each id once,
//! in insertion order of first occurrence.

use std::collections::HashMap;

use crate::models::Instrument;

/// Merge lists by id; later lists win over earlier ones.
///
/// A later record replaces an earlier one at its original position. The
/// earlier record's resolved image carries over when the replacement has
/// none of its own. Running the merge on its own output is a no-op.
pub fn merge(lists: Vec<Vec<Instrument>>) -> Vec<Instrument> {
    let mut merged: Vec<Instrument> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for incoming in lists.into_iter().flatten() {
        match index.get(&incoming.id) {
            Some(&at) => {
                let kept_image = merged[at].image.take();
                let mut replacement = incoming;
                if replacement.image.is_none() {
                    replacement.image = kept_image;
                }
                merged[at] = replacement;
            }
            None => {
                index.insert(incoming.id.clone(), merged.len());
                merged.push(incoming);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstrumentKind, Region};

    fn fund(id: &str, price: f64, image: Option<&str>) -> Instrument {
        Instrument {
            id: id.to_string(),
            symbol: id.to_string(),
            name: format!("{id} Fonu"),
            kind: InstrumentKind::Fund,
            region: Region::Domestic,
            price,
            change24h: 0.4,
            high24: price,
            low24: price,
            mcap: 0.0,
            icon: InstrumentKind::Fund.icon().to_string(),
            color: InstrumentKind::Fund.color().to_string(),
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn ids_are_unique_after_merge() {
        let curated = vec![fund("ZPX30", 10.0, None), fund("GLDTR", 20.0, None)];
        let scan = vec![fund("ZPX30", 11.0, None), fund("ZGOLD", 30.0, None)];

        let merged = merge(vec![curated, scan]);
        let ids: Vec<&str> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["ZPX30", "GLDTR", "ZGOLD"]);
    }

    #[test]
    fn later_list_wins_on_conflict() {
        let curated = vec![fund("ZPX30", 10.0, None)];
        let scan = vec![fund("ZPX30", 11.0, None)];

        let merged = merge(vec![curated, scan]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].price, 11.0);
    }

    #[test]
    fn curated_image_carries_over_when_scan_has_none() {
        let curated = vec![fund("ZPX30", 10.0, Some("https://cdn/logo.png"))];
        let scan = vec![fund("ZPX30", 11.0, None)];

        let merged = merge(vec![curated, scan]);
        assert_eq!(merged[0].price, 11.0);
        assert_eq!(merged[0].image.as_deref(), Some("https://cdn/logo.png"));
    }

    #[test]
    fn scan_image_is_kept_when_both_resolve() {
        let curated = vec![fund("ZPX30", 10.0, Some("https://cdn/old.png"))];
        let scan = vec![fund("ZPX30", 11.0, Some("https://cdn/new.png"))];

        let merged = merge(vec![curated, scan]);
        assert_eq!(merged[0].image.as_deref(), Some("https://cdn/new.png"));
    }

    #[test]
    fn merge_is_idempotent() {
        let curated = vec![fund("ZPX30", 10.0, Some("https://cdn/logo.png"))];
        let scan = vec![fund("ZPX30", 11.0, None), fund("ZGOLD", 30.0, None)];

        let once = merge(vec![curated, scan]);
        let twice = merge(vec![once.clone()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn first_occurrence_order_is_stable() {
        let a = vec![fund("AAA", 1.0, None), fund("BBB", 2.0, None)];
        let b = vec![fund("CCC", 3.0, None), fund("AAA", 1.5, None)];

        let merged = merge(vec![a, b]);
        let ids: Vec<&str> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["AAA", "BBB", "CCC"]);
    }
}
