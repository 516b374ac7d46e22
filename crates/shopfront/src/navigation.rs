//! Storefront navigation and session flags.

use crate::catalog::ProductRef;
use serde::{Deserialize, Serialize};

/// Screens the storefront can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    Products,
    ProductDetail,
    Cart,
    Checkout,
    Account,
    Admin,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Products => "products",
            View::ProductDetail => "product-detail",
            View::Cart => "cart",
            View::Checkout => "checkout",
            View::Account => "account",
            View::Admin => "admin",
        }
    }
}

/// Current view plus the state the views share.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Navigator {
    current: View,
    selected_product: Option<ProductRef>,
    search_query: String,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn selected_product(&self) -> Option<&ProductRef> {
        self.selected_product.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Switch to a view.
    pub fn go(&mut self, view: View) {
        if view != self.current {
            tracing::debug!(from = self.current.as_str(), to = view.as_str(), "navigate");
        }
        self.current = view;
    }

    /// Run a search and show the product listing.
    pub fn search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.go(View::Products);
    }

    /// Show a product's detail page.
    pub fn view_product(&mut self, product: ProductRef) {
        self.selected_product = Some(product);
        self.go(View::ProductDetail);
    }

    /// Leave a detail page for the listing.
    pub fn back_to_products(&mut self) {
        self.go(View::Products);
    }
}

/// Login and admin flags.
///
/// Nothing verifies these; they only toggle what the UI offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    pub logged_in: bool,
    pub admin: bool,
}

impl SessionFlags {
    pub fn login(&mut self) {
        self.logged_in = true;
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        self.admin = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_starts_at_home() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), View::Home);
        assert!(nav.selected_product().is_none());
    }

    #[test]
    fn test_search_shows_products() {
        let mut nav = Navigator::new();
        nav.search("keyboard");
        assert_eq!(nav.current(), View::Products);
        assert_eq!(nav.search_query(), "keyboard");
    }

    #[test]
    fn test_view_product_and_back() {
        let mut nav = Navigator::new();
        nav.view_product(ProductRef::new(3, "Headphones", Decimal::new(19999, 2), ""));
        assert_eq!(nav.current(), View::ProductDetail);
        assert_eq!(nav.selected_product().unwrap().name, "Headphones");

        nav.back_to_products();
        assert_eq!(nav.current(), View::Products);
    }

    #[test]
    fn test_logout_clears_admin() {
        let mut flags = SessionFlags::default();
        flags.login();
        flags.admin = true;
        flags.logout();
        assert_eq!(flags, SessionFlags::default());
    }

    #[test]
    fn test_view_serialization() {
        let json = serde_json::to_string(&View::ProductDetail).unwrap();
        assert_eq!(json, "\"product-detail\"");
    }
}
