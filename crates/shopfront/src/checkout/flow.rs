//! Checkout flow state machine.
//!
//! Steps run strictly in order. `next` and `back` at either end are no-ops;
//! only placing an order reaches `Completed`, and that is driven by the
//! store because it also empties the cart.

use crate::checkout::CheckoutForm;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Name and email.
    #[default]
    ContactInfo,
    /// Shipping address.
    Shipping,
    /// Payment details.
    Payment,
    /// Order review before submission.
    Review,
    /// Order placed.
    Completed,
}

impl CheckoutStep {
    /// Steps that collect form input.
    pub const FORM_STEPS: [CheckoutStep; 3] = [
        CheckoutStep::ContactInfo,
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::ContactInfo => "contact_info",
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Completed => "completed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::ContactInfo => "Contact Info",
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
            CheckoutStep::Completed => "Completed",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::ContactInfo => 1,
            CheckoutStep::Shipping => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Review => 4,
            CheckoutStep::Completed => 5,
        }
    }

    fn next(self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::ContactInfo => Some(CheckoutStep::Shipping),
            CheckoutStep::Shipping => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Review),
            CheckoutStep::Review | CheckoutStep::Completed => None,
        }
    }

    fn previous(self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::ContactInfo | CheckoutStep::Completed => None,
            CheckoutStep::Shipping => Some(CheckoutStep::ContactInfo),
            CheckoutStep::Payment => Some(CheckoutStep::Shipping),
            CheckoutStep::Review => Some(CheckoutStep::Payment),
        }
    }
}

/// Checkout flow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CheckoutFlow {
    /// Current step.
    pub step: CheckoutStep,
    /// Form data entered so far.
    pub form: CheckoutForm,
}

impl CheckoutFlow {
    /// Start a checkout at the contact step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a checkout with pre-filled form data.
    pub fn with_form(form: CheckoutForm) -> Self {
        Self {
            step: CheckoutStep::ContactInfo,
            form,
        }
    }

    /// Advance one step. Returns the resulting step.
    pub fn next(&mut self) -> CheckoutStep {
        if let Some(next) = self.step.next() {
            tracing::debug!(from = self.step.as_str(), to = next.as_str(), "checkout advanced");
            self.step = next;
        }
        self.step
    }

    /// Go back one step. Returns the resulting step.
    pub fn back(&mut self) -> CheckoutStep {
        if let Some(prev) = self.step.previous() {
            tracing::debug!(from = self.step.as_str(), to = prev.as_str(), "checkout went back");
            self.step = prev;
        }
        self.step
    }

    /// Check that an order may be placed from the current state.
    pub fn ready_to_place(&self) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Review {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::Completed.as_str().to_string(),
            });
        }
        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        }
        Ok(())
    }

    /// Mark the checkout completed and drop the entered form data.
    pub(crate) fn complete(&mut self) {
        self.step = CheckoutStep::Completed;
        self.form = CheckoutForm::default();
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Completed
    }

    /// Get progress percentage across the four form steps.
    pub fn progress_percent(&self) -> u8 {
        (self.step.number().min(4) * 25).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{ContactInfo, PaymentDetails, ShippingAddress};

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            contact: ContactInfo {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                phone: None,
            },
            shipping: ShippingAddress::new("1 Analytical Way", "London", "NY", "10001"),
            payment: PaymentDetails {
                card_number: "4242424242424242".into(),
                expiry: "12/30".into(),
                cvv: "123".into(),
                name_on_card: "Ada Lovelace".into(),
                ..PaymentDetails::default()
            },
        }
    }

    #[test]
    fn test_checkout_creation() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.step, CheckoutStep::ContactInfo);
        assert_eq!(flow.progress_percent(), 25);
    }

    #[test]
    fn test_three_nexts_reach_review() {
        let mut flow = CheckoutFlow::new();
        flow.next();
        flow.next();
        assert_eq!(flow.next(), CheckoutStep::Review);
        assert_eq!(flow.next(), CheckoutStep::Review);
        assert_eq!(flow.progress_percent(), 100);
    }

    #[test]
    fn test_back_at_start_is_noop() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.back(), CheckoutStep::ContactInfo);

        flow.next();
        flow.next();
        assert_eq!(flow.back(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_next_does_not_validate() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.next(), CheckoutStep::Shipping);
        assert!(!flow.form.is_complete());
    }

    #[test]
    fn test_place_requires_review_step() {
        let flow = CheckoutFlow::with_form(filled_form());
        assert_eq!(
            flow.ready_to_place(),
            Err(CommerceError::InvalidCheckoutTransition {
                from: "contact_info".to_string(),
                to: "completed".to_string(),
            })
        );
    }

    #[test]
    fn test_place_requires_complete_form() {
        let mut form = filled_form();
        form.payment.cvv.clear();
        let mut flow = CheckoutFlow::with_form(form);
        for _ in 0..3 {
            flow.next();
        }

        assert_eq!(
            flow.ready_to_place(),
            Err(CommerceError::CheckoutIncomplete("cvv".to_string()))
        );
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut flow = CheckoutFlow::with_form(filled_form());
        for _ in 0..3 {
            flow.next();
        }
        assert!(flow.ready_to_place().is_ok());

        flow.complete();
        assert!(flow.is_complete());
        assert_eq!(flow.form, CheckoutForm::default());
        assert_eq!(flow.next(), CheckoutStep::Completed);
        assert_eq!(flow.back(), CheckoutStep::Completed);
    }
}
