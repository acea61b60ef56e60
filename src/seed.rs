//! Built-in demo catalog written to storage on first use.

use crate::domain::{MenuItem, Restaurant};

/// Reference data to seed an empty store with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSeed {
    pub restaurants: Vec<Restaurant>,
    pub menu_items: Vec<MenuItem>,
}

fn restaurant(
    id: &str,
    name: &str,
    cuisine: &[&str],
    rating: f32,
    delivery_time: &str,
    price_range: &str,
    is_veg: bool,
) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        cuisine: cuisine.iter().map(|c| c.to_string()).collect(),
        rating,
        delivery_time: delivery_time.to_string(),
        price_range: price_range.to_string(),
        image: format!("/images/restaurants/{}.jpg", id),
        is_veg,
    }
}

fn dish(
    id: &str,
    restaurant_id: &str,
    name: &str,
    description: &str,
    price: u64,
    category: &str,
    is_veg: bool,
) -> MenuItem {
    MenuItem {
        description: description.to_string(),
        is_veg,
        ..MenuItem::new(id, restaurant_id, name, price).with_category(category)
    }
}

impl CatalogSeed {
    /// A handful of restaurants with a few dishes each.
    pub fn demo() -> Self {
        let restaurants = vec![
            restaurant("1", "Saravana Bhavan", &["South Indian", "Vegetarian"], 4.5, "25-30 min", "₹₹", true),
            restaurant("2", "Paradise Biryani", &["Hyderabadi", "Biryani"], 4.3, "35-40 min", "₹₹₹", false),
            restaurant("3", "Punjab Grill", &["North Indian", "Mughlai"], 4.2, "30-35 min", "₹₹₹", false),
            restaurant("4", "Chaat Corner", &["Street-Food", "Snacks"], 4.0, "20-25 min", "₹", true),
        ];

        let menu_items = vec![
            dish("101", "1", "Masala Dosa", "Crisp rice crepe with spiced potato filling", 120, "Dosa", true),
            dish("102", "1", "Plain Dosa", "Crisp rice crepe with chutney and sambar", 90, "Dosa", true),
            dish("103", "1", "Idli Sambar", "Steamed rice cakes with lentil stew", 70, "Tiffin", true),
            dish("104", "1", "Filter Coffee", "Strong South Indian coffee", 40, "Beverages", true),
            dish("201", "2", "Chicken Biryani", "Dum-cooked basmati rice with chicken", 320, "Biryani", false),
            dish("202", "2", "Veg Biryani", "Basmati rice layered with vegetables", 240, "Biryani", true),
            dish("203", "2", "Mirchi Ka Salan", "Chilli and peanut curry", 150, "Sides", true),
            dish("301", "3", "Butter Chicken", "Tandoori chicken in tomato butter gravy", 380, "Mains", false),
            dish("302", "3", "Dal Makhani", "Slow-cooked black lentils", 260, "Mains", true),
            dish("303", "3", "Garlic Naan", "Leavened bread with garlic", 60, "Breads", true),
            dish("401", "4", "Pani Puri", "Hollow puris with tangy water", 60, "Chaat", true),
            dish("402", "4", "Pav Bhaji", "Spiced vegetable mash with buttered buns", 110, "Mains", true),
        ];

        Self {
            restaurants,
            menu_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_menu_references_known_restaurants() {
        let seed = CatalogSeed::demo();
        let ids: HashSet<_> = seed.restaurants.iter().map(|r| r.id.as_str()).collect();

        assert!(!seed.menu_items.is_empty());
        assert!(seed
            .menu_items
            .iter()
            .all(|item| ids.contains(item.restaurant_id.as_str())));
    }

    #[test]
    fn test_demo_ids_are_unique() {
        let seed = CatalogSeed::demo();
        let items: HashSet<_> = seed.menu_items.iter().map(|i| &i.id).collect();
        let restaurants: HashSet<_> = seed.restaurants.iter().map(|r| &r.id).collect();
        assert_eq!(items.len(), seed.menu_items.len());
        assert_eq!(restaurants.len(), seed.restaurants.len());
    }
}
