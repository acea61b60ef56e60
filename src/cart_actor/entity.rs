use crate::actor_framework::{Entity, Retain};
use crate::domain::{CartItem, CartItemPatch, MenuItem};
use crate::storage::RecordKey;

impl Entity for CartItem {
    type Id = String;
    type CreateParams = MenuItem;
    type Patch = CartItemPatch;
    type Action = ();
    type ActionResult = ();

    const RECORD: RecordKey = RecordKey::Cart;

    fn id(&self) -> &String {
        &self.item.id
    }

    /// Cart entries are keyed by the menu item they hold.
    fn natural_id(params: &MenuItem) -> Option<String> {
        Some(params.id.clone())
    }

    /// A new entry starts at quantity 1.
    fn from_create_params(id: String, params: MenuItem) -> Result<Self, String> {
        if id != params.id {
            return Err(format!("Cart key {} does not match menu item {}", id, params.id));
        }
        Ok(CartItem::new(params))
    }

    /// Adding an item already in the cart bumps its quantity by one.
    fn on_merge(&mut self, _params: MenuItem) -> Result<(), String> {
        self.quantity = self.quantity.saturating_add(1);
        Ok(())
    }

    /// Sets the quantity; zero or below removes the entry.
    fn on_update(&mut self, patch: CartItemPatch) -> Result<Retain, String> {
        if patch.quantity <= 0 {
            return Ok(Retain::Remove);
        }
        self.quantity = u32::try_from(patch.quantity)
            .map_err(|_| format!("Quantity {} is too large", patch.quantity))?;
        Ok(Retain::Keep)
    }

    /// Stored entries must hold at least one unit.
    fn is_valid(&self) -> bool {
        self.quantity >= 1
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::{Collection, FrameworkError};
    use crate::domain::cart;
    use proptest::prelude::*;

    fn dish(id: &str, price: u64) -> MenuItem {
        MenuItem::new(id, "r1", id, price)
    }

    fn add(cart: &mut Collection<CartItem>, item: MenuItem) {
        cart.create(item, || unreachable!("cart ids come from the item")).unwrap();
    }

    fn set_quantity(cart: &mut Collection<CartItem>, id: &str, quantity: i64) {
        // Missing entries are a no-op for callers.
        let _ = cart.update(&id.to_string(), CartItemPatch { quantity });
    }

    #[test]
    fn test_add_twice_then_zero_empties_cart() {
        let mut cart = Collection::<CartItem>::default();
        add(&mut cart, dish("X", 10));
        add(&mut cart, dish("X", 10));
        assert_eq!(cart.items()[0].quantity, 2);

        set_quantity(&mut cart, "X", 0);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_set_quantity_after_removal_is_noop() {
        let mut cart = Collection::<CartItem>::default();
        add(&mut cart, dish("X", 10));
        set_quantity(&mut cart, "X", 0);
        set_quantity(&mut cart, "X", 5);
        assert!(cart.items().is_empty());

        // Re-adding starts fresh.
        add(&mut cart, dish("X", 10));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_negative_quantity_removes() {
        let mut cart = Collection::<CartItem>::default();
        add(&mut cart, dish("X", 10));
        add(&mut cart, dish("Y", 20));
        set_quantity(&mut cart, "X", -3);

        let ids: Vec<_> = cart.items().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["Y"]);
    }

    #[test]
    fn test_oversized_quantity_is_rejected() {
        let mut cart = Collection::<CartItem>::default();
        add(&mut cart, dish("X", 10));
        add(&mut cart, dish("X", 10));

        let result = cart.update(&"X".to_string(), CartItemPatch { quantity: i64::from(u32::MAX) + 1 });
        assert!(matches!(result, Err(FrameworkError::Rejected(_))));
        assert_eq!(cart.items()[0].quantity, 2);

        let largest = cart
            .update(&"X".to_string(), CartItemPatch { quantity: i64::from(u32::MAX) })
            .unwrap()
            .unwrap();
        assert_eq!(largest.quantity, u32::MAX);
    }

    #[test]
    fn test_zero_quantity_entries_are_dropped_on_load() {
        let stored = vec![
            CartItem { item: dish("A", 10), quantity: 0 },
            CartItem { item: dish("B", 20), quantity: 2 },
        ];
        let cart = Collection::<CartItem>::from_items(stored);

        let ids: Vec<_> = cart.items().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["B"]);
        assert_eq!(cart::item_count(cart.items()), 2);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = Collection::<CartItem>::default();
        add(&mut cart, dish("B", 10));
        add(&mut cart, dish("A", 10));
        add(&mut cart, dish("B", 10));
        let ids: Vec<_> = cart.items().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    proptest! {
        #[test]
        fn prop_repeated_adds_yield_one_entry(count in 1usize..50) {
            let mut cart = Collection::<CartItem>::default();
            for _ in 0..count {
                add(&mut cart, dish("A", 25));
            }
            prop_assert_eq!(cart.items().len(), 1);
            prop_assert_eq!(cart.items()[0].quantity as usize, count);
        }

        #[test]
        fn prop_subtotal_matches_lines(
            ops in proptest::collection::vec((0usize..5, -2i64..6, any::<bool>()), 0..40)
        ) {
            let mut cart = Collection::<CartItem>::default();
            for (slot, quantity, is_add) in ops {
                let id = format!("m{}", slot);
                if is_add {
                    add(&mut cart, dish(&id, (slot as u64 + 1) * 10));
                } else {
                    set_quantity(&mut cart, &id, quantity);
                }
            }

            let expected: u64 = cart.items().iter().map(|i| i.item.price * u64::from(i.quantity)).sum();
            prop_assert_eq!(cart::subtotal(cart.items()), expected);
            prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));

            let mut ids: Vec<_> = cart.items().iter().map(|i| i.id().to_string()).collect();
            let before = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
        }
    }
}
