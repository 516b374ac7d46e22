//! Scripted storefront session: browse, fill the cart, check out.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use rust_decimal::Decimal;
use shopfront::prelude::*;

use super::DemoArgs;
use crate::context::Context;

/// Products the demo session browses.
fn sample_catalog() -> Vec<ProductRef> {
    vec![
        ProductRef::new(
            1,
            "Wireless Noise-Canceling Headphones Pro",
            Decimal::new(29999, 2),
            "headphones.jpg",
        ),
        ProductRef::new(5, "Bluetooth Portable Speaker", Decimal::new(7999, 2), "speaker.jpg"),
        ProductRef::new(6, "Adjustable Laptop Stand", Decimal::new(4599, 2), "stand.jpg"),
    ]
}

fn sample_form() -> CheckoutForm {
    CheckoutForm {
        contact: ContactInfo {
            first_name: "Jordan".into(),
            last_name: "Rivera".into(),
            email: "jordan@example.com".into(),
            phone: None,
        },
        shipping: ShippingAddress::new("123 Market St", "San Francisco", "CA", "94103"),
        payment: PaymentDetails {
            card_number: "4242 4242 4242 4242".into(),
            expiry: "12/29".into(),
            cvv: "123".into(),
            name_on_card: "Jordan Rivera".into(),
            ..PaymentDetails::default()
        },
    }
}

/// Run the demo command.
pub async fn run(args: DemoArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.store;
    if let Some(delay_ms) = args.delay_ms {
        config.checkout.delay_ms = delay_ms;
    }
    let outcome = if args.decline {
        SimulatedOutcome::Decline
    } else {
        SimulatedOutcome::Approve
    };
    let processor = SimulatedProcessor::new(config.checkout.delay()).with_outcome(outcome);
    let mut store = Storefront::with_processor(config, Arc::new(processor))
        .context("Invalid store configuration")?;

    browse(&mut store, ctx)?;

    ctx.output.header("Checkout");
    let flow = store.begin_checkout().context("Failed to start checkout")?;
    flow.form = sample_form();
    ctx.output.step(flow.step);
    for _ in 0..3 {
        let step = store.checkout_next()?;
        ctx.output.step(step);
    }

    let spinner = ctx.output.spinner("Processing order...");
    let result = store.place_order().await;
    spinner.finish_and_clear();

    match result {
        Ok(order) => {
            if ctx.output.is_json() {
                ctx.output.json(&order);
                return Ok(());
            }
            ctx.output.success(&format!("Order {} placed", order.id));
            ctx.output.kv("Ship to", &order.shipping_address.one_line());
            ctx.output.kv("Card", &format!("•••• {}", order.payment.card_last4));
            ctx.output.kv("Charged", &order.totals.total.display());
            ctx.output.kv("Now viewing", store.navigator().current().as_str());
            ctx.output.kv("Cart items", &store.cart().item_count().to_string());
            Ok(())
        }
        Err(e) => {
            ctx.output.warn(&format!(
                "Cart kept with {} item(s); checkout still at {}",
                store.cart().item_count(),
                store
                    .checkout()
                    .map(|flow| flow.step.display_name())
                    .unwrap_or("-"),
            ));
            Err(e).context("Order was not placed")
        }
    }
}

fn browse(store: &mut Storefront, ctx: &Context) -> Result<()> {
    let catalog = sample_catalog();
    ctx.output.header("Browsing");

    store.navigator_mut().search("audio");
    ctx.output.debug(&format!("search: {}", store.navigator().search_query()));

    if let Some(headphones) = catalog.first() {
        store.navigator_mut().view_product(headphones.clone());
        store.add_to_cart(headphones, 1, Some("Black"))?;
        store.navigator_mut().back_to_products();
    }
    for product in catalog.iter().skip(1) {
        store.add_to_cart(product, 1, None)?;
    }
    // Adding the stand again bumps its quantity instead of adding a line.
    if let Some(stand) = catalog.last() {
        store.add_to_cart(stand, 1, None)?;
    }

    store.navigator_mut().go(View::Cart);
    ctx.output.lines(&store.cart().items());
    ctx.output.totals(&store.totals()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_form_is_complete() {
        assert!(sample_form().is_complete());
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        for product in sample_catalog() {
            assert!(product.validate().is_ok());
        }
    }
}
