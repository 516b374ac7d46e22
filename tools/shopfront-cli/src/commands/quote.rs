//! Price a cart built from a script of cart operations.

use std::fs;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use shopfront::cart::{CartTotals, LineItem};
use shopfront::catalog::ProductRef;
use shopfront::{CommerceError, ProductId, Storefront};

use super::QuoteArgs;
use crate::context::Context;

/// One step of a cart script.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum CartOp {
    Add {
        product: ProductRef,
        #[serde(default = "default_quantity")]
        quantity: i64,
        #[serde(default)]
        variant: Option<String>,
    },
    Update {
        product_id: ProductId,
        #[serde(default)]
        variant: Option<String>,
        quantity: i64,
    },
    Remove {
        product_id: ProductId,
        #[serde(default)]
        variant: Option<String>,
    },
}

fn default_quantity() -> i64 {
    1
}

impl CartOp {
    /// Apply the operation to a store.
    pub fn apply(&self, store: &mut Storefront) -> Result<(), CommerceError> {
        match self {
            CartOp::Add {
                product,
                quantity,
                variant,
            } => store
                .add_to_cart(product, *quantity, variant.as_deref())
                .map(|_| ()),
            CartOp::Update {
                product_id,
                variant,
                quantity,
            } => store
                .update_quantity(*product_id, variant.as_deref(), *quantity)
                .map(|_| ()),
            CartOp::Remove {
                product_id,
                variant,
            } => {
                store.remove_from_cart(*product_id, variant.as_deref());
                Ok(())
            }
        }
    }
}

/// JSON output of the quote command.
#[derive(Serialize)]
struct Quote<'a> {
    lines: &'a [LineItem],
    totals: CartTotals,
}

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.script);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read cart script: {}", path.display()))?;
    let ops: Vec<CartOp> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse cart script: {}", path.display()))?;

    let mut store =
        Storefront::new(ctx.config.store).context("Invalid store configuration")?;
    let failed = apply_all(&ops, &mut store, args.keep_going, ctx)?;

    let totals = store.totals().context("Failed to compute totals")?;
    if ctx.output.is_json() {
        ctx.output.json(&Quote {
            lines: &store.cart().items(),
            totals,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    if store.cart().is_empty() {
        ctx.output.info("Cart is empty.");
    } else {
        ctx.output.lines(&store.cart().items());
    }
    ctx.output.header("Totals");
    ctx.output.totals(&totals);

    if failed > 0 {
        ctx.output.warn(&format!("{} operation(s) skipped", failed));
    }
    Ok(())
}

/// Apply operations in order. Returns how many were skipped.
fn apply_all(
    ops: &[CartOp],
    store: &mut Storefront,
    keep_going: bool,
    ctx: &Context,
) -> Result<usize> {
    let mut failed = 0;
    for (index, op) in ops.iter().enumerate() {
        match op.apply(store) {
            Ok(()) => ctx.output.debug(&format!("#{}: {:?}", index + 1, op)),
            Err(e) if keep_going => {
                ctx.output.warn(&format!("Operation #{} skipped: {}", index + 1, e));
                failed += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Operation #{} failed", index + 1));
            }
        }
    }
    Ok(failed)
}
