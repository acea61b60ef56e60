use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::catalog_actor::CatalogError;
use crate::domain::{group_by_category, MenuItem, MenuSection, Restaurant};
use crate::search::{self, RestaurantFilter, Suggestion, SuggestionLimits};
use crate::seed::CatalogSeed;

/// Read access to restaurants and menus, plus search over them.
#[derive(Clone)]
pub struct CatalogClient {
    restaurants: ResourceClient<Restaurant>,
    menu_items: ResourceClient<MenuItem>,
    limits: SuggestionLimits,
}

impl CatalogClient {
    pub fn new(
        restaurants: ResourceClient<Restaurant>,
        menu_items: ResourceClient<MenuItem>,
        limits: SuggestionLimits,
    ) -> Self {
        Self {
            restaurants,
            menu_items,
            limits,
        }
    }

    /// Writes each reference record of the seed that is absent or empty.
    /// Returns whether anything was written.
    #[instrument(skip(self, seed), fields(restaurants = seed.restaurants.len(), menu_items = seed.menu_items.len()))]
    pub async fn ensure_seeded(&self, seed: CatalogSeed) -> Result<bool, CatalogError> {
        debug!("Sending request");
        let restaurants_written = self.restaurants.seed(seed.restaurants).await?;
        let menu_written = self.menu_items.seed(seed.menu_items).await?;

        if restaurants_written || menu_written {
            info!(restaurants_written, menu_written, "Catalog seeded");
        } else {
            debug!("Catalog already present");
        }
        Ok(restaurants_written || menu_written)
    }

    /// Menu of one restaurant in catalog order.
    #[instrument(skip(self))]
    pub async fn menu_for(&self, restaurant_id: String) -> Result<Vec<MenuItem>, CatalogError> {
        if self.get_restaurant(restaurant_id.clone()).await?.is_none() {
            return Err(CatalogError::RestaurantNotFound(restaurant_id));
        }
        let items = self.list_menu_items().await?;
        Ok(items
            .into_iter()
            .filter(|item| item.restaurant_id == restaurant_id)
            .collect())
    }

    /// Menu of one restaurant grouped by category.
    pub async fn menu_sections(&self, restaurant_id: String) -> Result<Vec<MenuSection>, CatalogError> {
        Ok(group_by_category(self.menu_for(restaurant_id).await?))
    }

    #[instrument(skip(self))]
    pub async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, CatalogError> {
        if query.trim().chars().count() < search::MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }
        let restaurants = self.list_restaurants().await?;
        let menu_items = self.list_menu_items().await?;
        let suggestions = search::suggest(query, &restaurants, &menu_items, self.limits);
        debug!(count = suggestions.len(), "Suggestions computed");
        Ok(suggestions)
    }

    #[instrument(skip(self))]
    pub async fn filter_restaurants(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>, CatalogError> {
        let restaurants = self.list_restaurants().await?;
        Ok(filter.apply(&restaurants).into_iter().cloned().collect())
    }
}

impl_client_methods!(CatalogClient, restaurants: Restaurant, CatalogError, restaurant, restaurants);
impl_client_methods!(CatalogClient, menu_items: MenuItem, CatalogError, menu_item, menu_items);
