//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shopfront::cart::{CartTotals, LineItem};
use shopfront::checkout::CheckoutStep;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a checkout step transition.
    pub fn step(&self, step: CheckoutStep) {
        if self.json {
            return;
        }
        println!(
            "{} {}",
            style(format!("[{}/4]", step.number().min(4))).dim(),
            step.display_name()
        );
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = *width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print cart lines as a table.
    pub fn lines(&self, lines: &[LineItem]) {
        const WIDTHS: [usize; 5] = [6, 24, 10, 5, 10];
        self.table_row(&["ID", "Item", "Price", "Qty", "Total"], &WIDTHS);
        for line in lines {
            let name = match line.variant() {
                Some(variant) => format!("{} ({})", line.name, variant),
                None => line.name.clone(),
            };
            let total = line
                .line_total()
                .map(|m| m.display())
                .unwrap_or_else(|_| "overflow".to_string());
            self.table_row(
                &[
                    &line.product_id().to_string(),
                    &name,
                    &line.unit_price.display(),
                    &line.quantity.to_string(),
                    &total,
                ],
                &WIDTHS,
            );
        }
    }

    /// Print a totals block.
    pub fn totals(&self, totals: &CartTotals) {
        self.kv("Items", &totals.item_count.to_string());
        self.kv("Subtotal", &totals.subtotal.display());
        let shipping = if totals.is_free_shipping() {
            style("Free").green().to_string()
        } else {
            totals.shipping_fee.display()
        };
        self.kv("Shipping", &shipping);
        self.kv("Tax", &totals.tax.display());
        self.kv("Total", &style(totals.total.display()).bold().to_string());
        if let Some(remaining) = &totals.remaining_for_free_shipping {
            self.info(&format!(
                "Add {} more for free shipping",
                remaining.display()
            ));
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}
