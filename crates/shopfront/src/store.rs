//! The storefront session store.
//!
//! One [`Storefront`] holds everything a shopping session mutates: the cart,
//! navigation, session flags and the active checkout. It is passed to
//! whatever drives the session instead of living in globals.

use crate::cart::{Cart, CartTotals, LineKey};
use crate::catalog::ProductRef;
use crate::checkout::{
    CheckoutFlow, CheckoutForm, CheckoutStep, Order, OrderProcessor, SimulatedProcessor,
};
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::navigation::{Navigator, SessionFlags, View};
use std::sync::Arc;

/// Callback run after an order has been accepted.
pub type OrderCompleteHook = Box<dyn Fn(&Order) + Send + Sync>;

/// A single shopping session.
pub struct Storefront {
    cart: Cart,
    navigator: Navigator,
    session: SessionFlags,
    checkout: Option<CheckoutFlow>,
    config: StoreConfig,
    processor: Arc<dyn OrderProcessor>,
    on_complete: Vec<OrderCompleteHook>,
}

impl Storefront {
    /// Create a session that processes orders with [`SimulatedProcessor`].
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: StoreConfig) -> Result<Self, CommerceError> {
        let processor = SimulatedProcessor::new(config.checkout.delay());
        Self::with_processor(config, Arc::new(processor))
    }

    /// Create a session with a custom order processor.
    pub fn with_processor(
        config: StoreConfig,
        processor: Arc<dyn OrderProcessor>,
    ) -> Result<Self, CommerceError> {
        config.validate()?;
        Ok(Self::build(config, processor))
    }

    fn build(config: StoreConfig, processor: Arc<dyn OrderProcessor>) -> Self {
        Self {
            cart: Cart::new(config.currency),
            navigator: Navigator::new(),
            session: SessionFlags::default(),
            checkout: None,
            config,
            processor,
            on_complete: Vec::new(),
        }
    }

    /// Register a callback for accepted orders.
    pub fn on_order_complete(&mut self, hook: impl Fn(&Order) + Send + Sync + 'static) {
        self.on_complete.push(Box::new(hook));
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn session(&self) -> &SessionFlags {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionFlags {
        &mut self.session
    }

    pub fn checkout(&self) -> Option<&CheckoutFlow> {
        self.checkout.as_ref()
    }

    // Cart

    pub fn add_to_cart(
        &mut self,
        product: &ProductRef,
        quantity: i64,
        variant: Option<&str>,
    ) -> Result<LineKey, CommerceError> {
        self.cart.add_item(product, quantity, variant)
    }

    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        variant: Option<&str>,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        self.cart.update_quantity(product_id, variant, quantity)
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId, variant: Option<&str>) -> bool {
        self.cart.remove_item(product_id, variant)
    }

    /// Totals under the configured pricing policy.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        self.config.pricing.quote(&self.cart)
    }

    // Checkout

    /// Start a fresh checkout and show the checkout view.
    pub fn begin_checkout(&mut self) -> Result<&mut CheckoutFlow, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.navigator.go(View::Checkout);
        Ok(self.checkout.insert(CheckoutFlow::new()))
    }

    pub fn checkout_next(&mut self) -> Result<CheckoutStep, CommerceError> {
        Ok(self.active_checkout()?.next())
    }

    pub fn checkout_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        Ok(self.active_checkout()?.back())
    }

    pub fn checkout_form_mut(&mut self) -> Result<&mut CheckoutForm, CommerceError> {
        Ok(&mut self.active_checkout()?.form)
    }

    /// Place the order from the review step.
    ///
    /// The cart and checkout are only touched once the processor accepts the
    /// order. A decline, a timeout, or dropping this future leaves both as
    /// they were.
    pub async fn place_order(&mut self) -> Result<Order, CommerceError> {
        let flow = self
            .checkout
            .as_ref()
            .ok_or(CommerceError::CheckoutNotStarted)?;
        flow.ready_to_place()?;
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let totals = self.totals()?;
        let order = Order::from_checkout(&self.cart, &flow.form, totals);
        let processor = Arc::clone(&self.processor);
        let settings = self.config.checkout;

        tracing::info!(order_id = %order.id, lines = order.lines.len(), "placing order");
        match tokio::time::timeout(settings.timeout(), processor.process(&order)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(order_id = %order.id, error = %e, "order rejected");
                return Err(e);
            }
            Err(_) => {
                tracing::warn!(
                    order_id = %order.id,
                    timeout_ms = settings.timeout_ms,
                    "order processing timed out"
                );
                return Err(CommerceError::ProcessingTimeout(settings.timeout_ms));
            }
        }

        self.complete_order(&order);
        Ok(order)
    }

    fn complete_order(&mut self, order: &Order) {
        if let Some(flow) = self.checkout.as_mut() {
            flow.complete();
        }
        self.cart.clear();
        self.navigator.go(View::Account);
        tracing::info!(
            order_id = %order.id,
            total = %order.totals.total,
            items = order.item_count(),
            "order placed"
        );
        for hook in &self.on_complete {
            hook(order);
        }
    }

    fn active_checkout(&mut self) -> Result<&mut CheckoutFlow, CommerceError> {
        self.checkout
            .as_mut()
            .ok_or(CommerceError::CheckoutNotStarted)
    }
}

impl Default for Storefront {
    fn default() -> Self {
        let config = StoreConfig::default();
        let processor = SimulatedProcessor::new(config.checkout.delay());
        Self::build(config, Arc::new(processor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{
        ContactInfo, PaymentDetails, ProcessingSettings, ShippingAddress, SimulatedOutcome,
    };
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn mouse() -> ProductRef {
        ProductRef::new(1, "Mouse", Decimal::new(2999, 2), "mouse.jpg")
    }

    fn fast_store(processor: SimulatedProcessor, timeout_ms: u64) -> Storefront {
        let config = StoreConfig {
            checkout: ProcessingSettings {
                delay_ms: 0,
                timeout_ms,
            },
            ..StoreConfig::default()
        };
        Storefront::with_processor(config, Arc::new(processor)).unwrap()
    }

    fn fill(form: &mut CheckoutForm) {
        form.contact = ContactInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: Some("555-0100".into()),
        };
        form.shipping = ShippingAddress::new("1 Main St", "Springfield", "IL", "62701");
        form.payment = PaymentDetails {
            card_number: "4242424242424242".into(),
            expiry: "12/30".into(),
            cvv: "123".into(),
            name_on_card: "Ada Lovelace".into(),
            ..PaymentDetails::default()
        };
    }

    /// Cart with one mouse, checkout filled and at review.
    fn store_at_review(processor: SimulatedProcessor, timeout_ms: u64) -> Storefront {
        let mut store = fast_store(processor, timeout_ms);
        store.add_to_cart(&mouse(), 1, None).unwrap();
        store.begin_checkout().unwrap();
        fill(store.checkout_form_mut().unwrap());
        for _ in 0..3 {
            store.checkout_next().unwrap();
        }
        store
    }

    #[test]
    fn test_cart_operations_through_store() {
        let mut store = Storefront::default();
        store.add_to_cart(&mouse(), 1, Some("Black")).unwrap();
        store.add_to_cart(&mouse(), 1, Some("White")).unwrap();
        assert_eq!(store.cart().line_count(), 2);

        assert!(store.update_quantity(ProductId::new(1), Some("Black"), 0).unwrap());
        assert!(store.remove_from_cart(ProductId::new(1), Some("White")));
        assert!(store.cart().is_empty());
        assert!(store.totals().unwrap().subtotal.is_zero());
    }

    #[test]
    fn test_begin_checkout_requires_items() {
        let mut store = Storefront::default();
        assert!(matches!(store.begin_checkout(), Err(CommerceError::EmptyCart)));
        assert_eq!(store.checkout_next(), Err(CommerceError::CheckoutNotStarted));
    }

    #[test]
    fn test_begin_checkout_navigates() {
        let mut store = Storefront::default();
        store.add_to_cart(&mouse(), 1, None).unwrap();
        let flow = store.begin_checkout().unwrap();
        assert_eq!(flow.step, CheckoutStep::ContactInfo);
        assert_eq!(store.navigator().current(), View::Checkout);
    }

    #[tokio::test]
    async fn test_place_order_completes_and_clears_cart() {
        let mut store = store_at_review(SimulatedProcessor::instant(), 1000);
        assert_eq!(store.checkout_next().unwrap(), CheckoutStep::Review);

        let completed = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&completed);
        store.on_order_complete(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let order = store.place_order().await.unwrap();
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.payment.card_last4, "4242");
        assert_eq!(order.totals.subtotal.amount, Decimal::new(2999, 2));

        assert!(store.cart().is_empty());
        assert!(store.checkout().unwrap().is_complete());
        assert_eq!(store.navigator().current(), View::Account);
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_completed_checkout_drops_card_details() {
        let mut store = store_at_review(SimulatedProcessor::instant(), 1000);
        store.place_order().await.unwrap();

        let flow = store.checkout().unwrap();
        assert!(flow.is_complete());
        assert!(flow.form.payment.card_number.is_empty());
        assert!(flow.form.payment.cvv.is_empty());
        assert_eq!(flow.form, CheckoutForm::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = StoreConfig::default();
        config.pricing.tax_rate = Decimal::new(-50, 2);
        assert!(matches!(
            Storefront::new(config),
            Err(CommerceError::Validation(_))
        ));

        let config = StoreConfig {
            checkout: ProcessingSettings {
                delay_ms: 50,
                timeout_ms: 10,
            },
            ..StoreConfig::default()
        };
        let processor = Arc::new(SimulatedProcessor::instant());
        assert!(matches!(
            Storefront::with_processor(config, processor),
            Err(CommerceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_place_order_outside_review_fails() {
        let mut store = store_at_review(SimulatedProcessor::instant(), 1000);
        store.checkout_back().unwrap();

        let err = store.place_order().await.unwrap_err();
        assert!(matches!(err, CommerceError::InvalidCheckoutTransition { .. }));
        assert_eq!(store.cart().line_count(), 1);
    }

    #[tokio::test]
    async fn test_place_order_with_missing_fields_fails() {
        let mut store = store_at_review(SimulatedProcessor::instant(), 1000);
        store.checkout_form_mut().unwrap().contact.email.clear();

        let err = store.place_order().await.unwrap_err();
        assert_eq!(err, CommerceError::CheckoutIncomplete("email".to_string()));
    }

    #[tokio::test]
    async fn test_place_order_with_emptied_cart_fails() {
        let mut store = store_at_review(SimulatedProcessor::instant(), 1000);
        store.remove_from_cart(ProductId::new(1), None);

        assert_eq!(store.place_order().await, Err(CommerceError::EmptyCart));
        assert_eq!(store.checkout().unwrap().step, CheckoutStep::Review);
    }

    #[tokio::test]
    async fn test_declined_order_leaves_state() {
        let processor = SimulatedProcessor::instant().with_outcome(SimulatedOutcome::Decline);
        let mut store = store_at_review(processor, 1000);

        let err = store.place_order().await.unwrap_err();
        assert!(matches!(err, CommerceError::PaymentDeclined(_)));
        assert_eq!(store.cart().item_count(), 1);
        assert_eq!(store.checkout().unwrap().step, CheckoutStep::Review);
        assert_eq!(store.navigator().current(), View::Checkout);
    }

    #[tokio::test]
    async fn test_slow_processor_times_out() {
        let processor = SimulatedProcessor::new(Duration::from_millis(500));
        let mut store = store_at_review(processor, 10);

        assert_eq!(
            store.place_order().await,
            Err(CommerceError::ProcessingTimeout(10))
        );
        assert_eq!(store.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_placement_leaves_state() {
        let processor = SimulatedProcessor::new(Duration::from_secs(5));
        let mut store = store_at_review(processor, 10_000);

        let outcome = tokio::time::timeout(Duration::from_millis(10), store.place_order()).await;
        assert!(outcome.is_err());
        assert_eq!(store.cart().item_count(), 1);
        assert_eq!(store.checkout().unwrap().step, CheckoutStep::Review);
    }

    #[tokio::test]
    async fn test_place_order_without_checkout() {
        let mut store = Storefront::default();
        assert_eq!(
            store.place_order().await,
            Err(CommerceError::CheckoutNotStarted)
        );
    }
}
