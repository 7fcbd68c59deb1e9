//! Shared, observable cart state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cart::{reduce, Cart, CartAction};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// The single cart for a storefront session.
///
/// Clones share the same cart. Every transition is applied atomically: the
/// reducer runs against the current value and the result is published before
/// any other dispatch can read it. Observers get the new cart through
/// [`CartStore::subscribe`].
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<Cart>>,
}

impl CartStore {
    /// Create a store holding an empty USD cart.
    pub fn new() -> Self {
        Self::with_currency(Currency::USD)
    }

    /// Create a store holding an empty cart in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        let (state, _) = watch::channel(Cart::empty(currency));
        Self {
            state: Arc::new(state),
        }
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Watch for cart changes. The receiver starts at the current cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Apply an action.
    ///
    /// On error the cart is left as it was and observers are not notified.
    pub fn dispatch(&self, action: CartAction) -> Result<(), CommerceError> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|cart| match reduce(cart, &action) {
            Ok(next) => {
                let changed = next != *cart;
                debug!(
                    action = action.name(),
                    lines = next.line_count(),
                    total = %next.total(),
                    changed,
                    "Cart updated"
                );
                *cart = next;
                changed
            }
            Err(e) => {
                warn!(action = action.name(), error = %e, "Cart action rejected");
                outcome = Err(e);
                false
            }
        });
        outcome
    }

    pub fn add_to_cart(
        &self,
        product: &Product,
        quantity: i64,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<(), CommerceError> {
        self.dispatch(CartAction::add_variant(
            product.clone(),
            quantity,
            color,
            size,
        ))
    }

    pub fn remove_from_cart(&self, product_id: impl Into<ProductId>) -> Result<(), CommerceError> {
        self.dispatch(CartAction::remove(product_id))
    }

    pub fn update_quantity(
        &self,
        product_id: impl Into<ProductId>,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        self.dispatch(CartAction::update_quantity(product_id, quantity))
    }

    /// Set the quantity of one variant line; zero or less removes it.
    pub fn set_line_quantity(
        &self,
        product_id: impl Into<ProductId>,
        color: Option<&str>,
        size: Option<&str>,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        self.dispatch(CartAction::SetLineQuantity {
            product_id: product_id.into(),
            color: color.map(str::to_string),
            size: size.map(str::to_string),
            quantity,
        })
    }

    /// Remove what an order paid for.
    ///
    /// When the cart still equals `paid` this is a plain clear. Otherwise only
    /// the paid units are taken out, so lines added meanwhile survive. Returns
    /// whether the cart had changed since `paid` was taken.
    pub fn settle(&self, paid: &Cart) -> bool {
        let mut drifted = false;
        self.state.send_if_modified(|cart| {
            if *cart == *paid {
                *cart = Cart::empty(cart.currency());
                return !paid.is_empty();
            }
            drifted = true;
            match cart.without(paid) {
                Ok(rest) => {
                    debug!(lines = rest.line_count(), total = %rest.total(), "Settled changed cart");
                    let changed = rest != *cart;
                    *cart = rest;
                    changed
                }
                Err(e) => {
                    warn!(error = %e, "Failed to settle cart");
                    false
                }
            }
        });
        drifted
    }

    pub fn clear_cart(&self) {
        // Clearing cannot fail: it only builds an empty cart.
        let _ = self.dispatch(CartAction::Clear);
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, InMemoryCatalog};
    use crate::money::Money;

    fn headphones() -> Product {
        InMemoryCatalog::storefront().get_by_id("1").unwrap().clone()
    }

    #[test]
    fn test_operations_through_store() {
        let store = CartStore::new();
        let product = headphones();

        store.add_to_cart(&product, 2, None, None).unwrap();
        store.add_to_cart(&product, 1, Some("Black"), None).unwrap();
        assert_eq!(store.snapshot().total(), Money::new(89997, Currency::USD));

        store.set_line_quantity("1", Some("Black"), None, 0).unwrap();
        assert_eq!(store.snapshot().line_count(), 1);

        store.update_quantity("1", 4).unwrap();
        assert_eq!(store.snapshot().item_count(), 4);

        store.remove_from_cart("1").unwrap();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = CartStore::new();
        let other = store.clone();
        other.add_to_cart(&headphones(), 1, None, None).unwrap();
        assert_eq!(store.snapshot().line_count(), 1);
    }

    #[test]
    fn test_observers_see_changes() {
        let store = CartStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.add_to_cart(&headphones(), 1, None, None).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().line_count(), 1);

        store.clear_cart();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn test_rejected_action_not_published() {
        let store = CartStore::new();
        store.add_to_cart(&headphones(), 1, None, None).unwrap();
        let before = store.snapshot();

        let mut rx = store.subscribe();
        let result = store.add_to_cart(&headphones(), 0, None, None);

        assert_eq!(result, Err(CommerceError::InvalidQuantity(0)));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_settle_clears_or_subtracts() {
        let store = CartStore::new();
        store.add_to_cart(&headphones(), 2, None, None).unwrap();
        let paid = store.snapshot();

        assert!(!store.settle(&paid));
        assert!(store.snapshot().is_empty());

        store.add_to_cart(&headphones(), 2, None, None).unwrap();
        let paid = store.snapshot();
        store.add_to_cart(&headphones(), 1, None, None).unwrap();

        assert!(store.settle(&paid));
        assert_eq!(store.snapshot().item_count(), 1);
    }

    #[test]
    fn test_noop_not_published() {
        let store = CartStore::new();
        let mut rx = store.subscribe();
        store.remove_from_cart("missing").unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let store = CartStore::new();
        let product = headphones();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let product = product.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        store.add_to_cart(&product, 1, None, None).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let cart = store.snapshot();
        assert_eq!(cart.item_count(), 400);
        assert_eq!(cart.total().minor_units, 400 * 29999);
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_change() {
        let store = CartStore::new();
        let mut rx = store.subscribe();

        let writer = store.clone();
        tokio::spawn(async move {
            writer.add_to_cart(&headphones(), 3, None, None).unwrap();
        });

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().item_count(), 3);
    }
}
