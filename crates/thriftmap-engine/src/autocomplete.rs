//! Derived autocomplete index.
//!
//! Built fresh from the full loaded collections (never the filtered subset):
//! one option per store, neighborhood, region, and category, plus one fixed
//! entry per classifier kind. No cross-kind de-duplication — a store and a
//! neighborhood sharing a name yield two options told apart by the kind tag.

use serde::{Deserialize, Serialize};
use thriftmap_core::{Category, Neighborhood, Region, Store, StoreKind};

/// Hard cap on returned suggestions.
pub const SUGGESTION_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    Store,
    Neighborhood,
    Region,
    Category,
    StoreType,
}

impl OptionKind {
    /// Short tag rendered next to the label in the dropdown.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            OptionKind::Store => "Store",
            OptionKind::Neighborhood => "Neighborhood",
            OptionKind::Region => "Region",
            OptionKind::Category => "Category",
            OptionKind::StoreType => "Store Type",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            OptionKind::Store => "store",
            OptionKind::Neighborhood => "neighborhood",
            OptionKind::Region => "region",
            OptionKind::Category => "category",
            OptionKind::StoreType => "store-type",
        }
    }
}

/// One searchable suggestion.
///
/// `value` is the string used for matching and for re-lookup on selection:
/// the slug for structured entities, the lower-cased label for store types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteOption {
    pub id: String,
    pub label: String,
    pub kind: OptionKind,
    pub value: String,
}

impl AutocompleteOption {
    fn new(kind: OptionKind, id: &str, label: &str, value: &str) -> Self {
        Self {
            id: format!("{}-{id}", kind.id_prefix()),
            label: label.to_string(),
            kind,
            value: value.to_string(),
        }
    }
}

/// Build the flat option list in fixed kind order: stores, neighborhoods,
/// regions, categories, then the classifier kinds.
#[must_use]
pub fn build_index(
    stores: &[Store],
    neighborhoods: &[Neighborhood],
    regions: &[Region],
    categories: &[Category],
) -> Vec<AutocompleteOption> {
    let mut options = Vec::with_capacity(
        stores.len() + neighborhoods.len() + regions.len() + categories.len() + StoreKind::ALL.len(),
    );
    for store in stores {
        options.push(AutocompleteOption::new(
            OptionKind::Store,
            &store.id,
            &store.name,
            &store.slug,
        ));
    }
    for n in neighborhoods {
        options.push(AutocompleteOption::new(
            OptionKind::Neighborhood,
            &n.id,
            &n.name,
            &n.slug,
        ));
    }
    for r in regions {
        options.push(AutocompleteOption::new(
            OptionKind::Region,
            &r.id,
            &r.name,
            &r.slug,
        ));
    }
    for c in categories {
        options.push(AutocompleteOption::new(
            OptionKind::Category,
            &c.id,
            &c.name,
            &c.slug,
        ));
    }
    for kind in StoreKind::ALL {
        let label = kind.label();
        options.push(AutocompleteOption::new(
            OptionKind::StoreType,
            &label.to_lowercase(),
            label,
            &label.to_lowercase(),
        ));
    }
    options
}

/// Match the query against label OR value, case-insensitive substring,
/// capped to the first [`SUGGESTION_LIMIT`] hits in index order.
///
/// A blank query returns nothing — the dropdown only opens once the user has
/// typed something.
#[must_use]
pub fn search_index<'a>(
    options: &'a [AutocompleteOption],
    query: &str,
) -> Vec<&'a AutocompleteOption> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    options
        .iter()
        .filter(|o| {
            o.label.to_lowercase().contains(&query) || o.value.to_lowercase().contains(&query)
        })
        .take(SUGGESTION_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use thriftmap_core::Coordinate;

    fn region(name: &str) -> Region {
        Region {
            id: format!("r-{name}"),
            name: name.to_string(),
            slug: name.to_lowercase(),
            city_slug: "new-york".to_string(),
        }
    }

    fn neighborhood(name: &str, region_name: &str) -> Neighborhood {
        Neighborhood {
            id: format!("n-{name}"),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            region: region(region_name),
        }
    }

    fn store(id: &str, name: &str) -> Store {
        Store {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            card_description: None,
            location: Some(Coordinate {
                lat: 40.72,
                lng: -74.0,
            }),
            formatted_address: None,
            primary_category: Category {
                id: "cat-thrift".to_string(),
                name: "Thrift".to_string(),
                slug: "thrift".to_string(),
            },
            secondary_categories: vec![],
            neighborhood: neighborhood("SoHo", "Manhattan"),
            metrics: None,
            website: None,
            maps_url: None,
        }
    }

    #[test]
    fn index_orders_kinds_stores_first() {
        let stores = vec![store("1", "Ann's Vintage")];
        let neighborhoods = vec![neighborhood("SoHo", "Manhattan")];
        let regions = vec![region("Manhattan")];
        let categories = vec![Category {
            id: "cat-1".to_string(),
            name: "Vintage".to_string(),
            slug: "vintage".to_string(),
        }];
        let index = build_index(&stores, &neighborhoods, &regions, &categories);
        let kinds: Vec<OptionKind> = index.iter().map(|o| o.kind).collect();
        assert_eq!(kinds[0], OptionKind::Store);
        assert_eq!(kinds[1], OptionKind::Neighborhood);
        assert_eq!(kinds[2], OptionKind::Region);
        assert_eq!(kinds[3], OptionKind::Category);
        assert!(kinds[4..].iter().all(|k| *k == OptionKind::StoreType));
        assert_eq!(index.len(), 4 + StoreKind::ALL.len());
    }

    #[test]
    fn name_collisions_are_not_deduplicated() {
        let stores = vec![store("1", "SoHo")];
        let neighborhoods = vec![neighborhood("SoHo", "Manhattan")];
        let index = build_index(&stores, &neighborhoods, &[], &[]);
        let hits = search_index(&index, "soho");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].kind, OptionKind::Store);
        assert_eq!(hits[1].kind, OptionKind::Neighborhood);
    }

    #[test]
    fn matches_are_capped_at_eight_in_index_order() {
        let stores: Vec<Store> = (0..20)
            .map(|i| store(&i.to_string(), &format!("Thrift Outpost {i}")))
            .collect();
        let index = build_index(&stores, &[], &[], &[]);
        let hits = search_index(&index, "thrift outpost");
        assert_eq!(hits.len(), SUGGESTION_LIMIT);
        for (i, hit) in hits.iter().enumerate() {
            assert_eq!(hit.label, format!("Thrift Outpost {i}"));
        }
    }

    #[test]
    fn store_type_entries_match_by_lowercased_value() {
        let index = build_index(&[], &[], &[], &[]);
        let hits = search_index(&index, "CONSIGN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, OptionKind::StoreType);
        assert_eq!(hits[0].value, "consignment");
    }

    #[test]
    fn blank_query_returns_nothing() {
        let index = build_index(&[store("1", "Ann's Vintage")], &[], &[], &[]);
        assert!(search_index(&index, "   ").is_empty());
    }

    #[test]
    fn value_slug_matches_when_label_does_not() {
        let mut s = store("1", "Beacon's Closet");
        s.slug = "beacons-closet-brooklyn".to_string();
        let index = build_index(&[s], &[], &[], &[]);
        let hits = search_index(&index, "brooklyn");
        assert_eq!(hits.len(), 1);
    }
}
