use serde::{Deserialize, Serialize};

/// A restaurant in the reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// Cuisine tags, e.g. "South Indian", "Street-Food".
    pub cuisine: Vec<String>,
    pub rating: f32,
    /// Display label such as "25-30 min".
    pub delivery_time: String,
    /// Display label such as "₹₹".
    pub price_range: String,
    pub image: String,
    pub is_veg: bool,
}

/// A dish offered by a restaurant. Prices are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub is_veg: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuItem {
    /// Creates a menu item with an empty description, no image and the
    /// category "Mains".
    pub fn new(
        id: impl Into<String>,
        restaurant_id: impl Into<String>,
        name: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category: "Mains".to_string(),
            is_veg: true,
            image: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// One category section of a restaurant menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// Groups items by category, sections ordered by first appearance and items
/// keeping their catalog order.
pub fn group_by_category(items: impl IntoIterator<Item = MenuItem>) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    for item in items {
        match sections.iter_mut().find(|s| s.category == item.category) {
            Some(section) => section.items.push(item),
            None => sections.push(MenuSection {
                category: item.category.clone(),
                items: vec![item],
            }),
        }
    }
    sections
}
