//! Search-as-you-type suggestions and restaurant list filtering.
//!
//! Everything here is a pure scan over the reference lists. The catalog is
//! small and bounded, so there is no index.

use crate::domain::{MenuItem, Restaurant};

/// Queries shorter than this (after trimming) produce no suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

/// Caps on each kind of suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLimits {
    pub restaurants: usize,
    pub dishes: usize,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self {
            restaurants: 3,
            dishes: 6,
        }
    }
}

/// A suggestion and where selecting it leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Restaurant {
        restaurant_id: String,
        name: String,
    },
    Dish {
        restaurant_id: String,
        item_id: String,
        name: String,
    },
}

impl Suggestion {
    pub fn name(&self) -> &str {
        match self {
            Suggestion::Restaurant { name, .. } | Suggestion::Dish { name, .. } => name,
        }
    }

    pub fn restaurant_id(&self) -> &str {
        match self {
            Suggestion::Restaurant { restaurant_id, .. } | Suggestion::Dish { restaurant_id, .. } => {
                restaurant_id
            }
        }
    }
}

/// Case-insensitive substring test against an already-lowercased needle.
fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn restaurant_matches(restaurant: &Restaurant, needle_lower: &str) -> bool {
    contains_folded(&restaurant.name, needle_lower)
        || restaurant
            .cuisine
            .iter()
            .any(|tag| contains_folded(tag, needle_lower))
}

/// Restaurant suggestions first, then dish suggestions, each capped.
pub fn suggest(
    query: &str,
    restaurants: &[Restaurant],
    menu_items: &[MenuItem],
    limits: SuggestionLimits,
) -> Vec<Suggestion> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let restaurant_hits = restaurants
        .iter()
        .filter(|r| restaurant_matches(r, &needle))
        .take(limits.restaurants)
        .map(|r| Suggestion::Restaurant {
            restaurant_id: r.id.clone(),
            name: r.name.clone(),
        });

    let dish_hits = menu_items
        .iter()
        .filter(|item| contains_folded(&item.name, &needle))
        .take(limits.dishes)
        .map(|item| Suggestion::Dish {
            restaurant_id: item.restaurant_id.clone(),
            item_id: item.id.clone(),
            name: item.name.clone(),
        });

    restaurant_hits.chain(dish_hits).collect()
}

/// Filters for the restaurant listing. Empty fields filter nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub veg_only: bool,
}

/// Lowercases and strips `-`, `_` and whitespace, so "Street-Food",
/// "street_food" and "Street Food" compare equal.
fn normalize_category(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl RestaurantFilter {
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        if self.veg_only && !restaurant.is_veg {
            return false;
        }

        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            let wanted = normalize_category(category);
            let hit = restaurant
                .cuisine
                .iter()
                .any(|tag| normalize_category(tag).contains(&wanted));
            if !hit {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !restaurant_matches(restaurant, &search.to_lowercase()) {
                return false;
            }
        }

        true
    }

    /// Restaurants passing every active filter, in catalog order.
    pub fn apply<'a>(&self, restaurants: &'a [Restaurant]) -> Vec<&'a Restaurant> {
        restaurants.iter().filter(|r| self.matches(r)).collect()
    }
}
