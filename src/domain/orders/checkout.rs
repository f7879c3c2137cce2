//! Checkout form validation.

use thiserror::Error;

use crate::domain::orders::models::{CardDetails, CheckoutDetails, PaymentMethod};

/// Validation failures for the checkout form, surfaced inline to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutValidationError {
    #[error("full name is required")]
    MissingFullName,

    #[error("email is required")]
    MissingEmail,

    #[error("email address is malformed")]
    InvalidEmail,

    #[error("phone number is required")]
    MissingPhone,

    #[error("phone number must be an optional '+' followed by 9-15 digits")]
    InvalidPhone,

    #[error("shipping address is required")]
    MissingShippingAddress,

    #[error("card details are required for card payments")]
    MissingCardDetails,

    #[error("card number must be exactly 16 digits")]
    InvalidCardNumber,

    #[error("card expiry must be MM/YY")]
    InvalidCardExpiry,

    #[error("card CVV must be exactly 3 digits")]
    InvalidCardCvv,
}

impl CheckoutDetails {
    /// Validate the form before any storage is touched.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule; card rules only apply to card
    /// payments.
    pub fn validate(&self) -> Result<(), CheckoutValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(CheckoutValidationError::MissingFullName);
        }

        if self.email.trim().is_empty() {
            return Err(CheckoutValidationError::MissingEmail);
        }

        if !self.email.contains('@') {
            return Err(CheckoutValidationError::InvalidEmail);
        }

        if self.phone.trim().is_empty() {
            return Err(CheckoutValidationError::MissingPhone);
        }

        if !is_valid_phone(self.phone.trim()) {
            return Err(CheckoutValidationError::InvalidPhone);
        }

        if self.shipping_address.trim().is_empty() {
            return Err(CheckoutValidationError::MissingShippingAddress);
        }

        if self.payment_method == PaymentMethod::Card {
            let card = self
                .card
                .as_ref()
                .ok_or(CheckoutValidationError::MissingCardDetails)?;

            validate_card(card)?;
        }

        Ok(())
    }
}

fn validate_card(card: &CardDetails) -> Result<(), CheckoutValidationError> {
    if card.number.len() != 16 || !card.number.chars().all(|c| c.is_ascii_digit()) {
        return Err(CheckoutValidationError::InvalidCardNumber);
    }

    if !is_valid_expiry(&card.expiry) {
        return Err(CheckoutValidationError::InvalidCardExpiry);
    }

    if card.cvv.len() != 3 || !card.cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(CheckoutValidationError::InvalidCardCvv);
    }

    Ok(())
}

fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);

    (9..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// `MM/YY` with month 01-12; the slash may be omitted.
fn is_valid_expiry(expiry: &str) -> bool {
    let (month, year) = match expiry.split_once('/') {
        Some(parts) => parts,
        None if expiry.len() == 4 && expiry.is_ascii() => expiry.split_at(2),
        None => return false,
    };

    if month.len() != 2
        || year.len() != 2
        || !month.chars().all(|c| c.is_ascii_digit())
        || !year.chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }

    matches!(month.parse::<u8>(), Ok(1..=12))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            full_name: "Test Shopper".to_string(),
            email: "shopper@example.com".to_string(),
            phone: "+79991234567".to_string(),
            shipping_address: "1 Orchard Lane".to_string(),
            payment_method: PaymentMethod::Cash,
            card: None,
            comments: String::new(),
        }
    }

    fn card() -> CardDetails {
        CardDetails {
            number: "4000123412341234".to_string(),
            expiry: "12/27".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn valid_cash_details_pass() {
        assert_eq!(details().validate(), Ok(()));
    }

    #[test]
    fn blank_full_name_is_rejected() {
        let mut d = details();
        d.full_name = "   ".to_string();

        assert_eq!(d.validate(), Err(CheckoutValidationError::MissingFullName));
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let mut d = details();
        d.email = "shopper.example.com".to_string();

        assert_eq!(d.validate(), Err(CheckoutValidationError::InvalidEmail));
    }

    #[test]
    fn phone_accepts_plus_and_digit_run() {
        for phone in ["+79991234567", "899912345", "123456789012345"] {
            let mut d = details();
            d.phone = phone.to_string();

            assert_eq!(d.validate(), Ok(()), "phone {phone} should be accepted");
        }
    }

    #[test]
    fn phone_rejects_letters_and_short_numbers() {
        for phone in ["not-a-phone", "12345678", "+1234567890123456"] {
            let mut d = details();
            d.phone = phone.to_string();

            assert_eq!(
                d.validate(),
                Err(CheckoutValidationError::InvalidPhone),
                "phone {phone} should be rejected"
            );
        }
    }

    #[test]
    fn card_payment_requires_card_details() {
        let mut d = details();
        d.payment_method = PaymentMethod::Card;

        assert_eq!(
            d.validate(),
            Err(CheckoutValidationError::MissingCardDetails)
        );

        d.card = Some(card());

        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn card_number_must_be_sixteen_digits() {
        let mut d = details();
        d.payment_method = PaymentMethod::Card;

        let mut c = card();
        c.number = "40001234".to_string();
        d.card = Some(c);

        assert_eq!(d.validate(), Err(CheckoutValidationError::InvalidCardNumber));
    }

    #[test]
    fn card_expiry_allows_optional_slash() {
        for expiry in ["12/27", "1227", "01/30"] {
            let mut d = details();
            d.payment_method = PaymentMethod::Card;

            let mut c = card();
            c.expiry = expiry.to_string();
            d.card = Some(c);

            assert_eq!(d.validate(), Ok(()), "expiry {expiry} should be accepted");
        }
    }

    #[test]
    fn card_expiry_rejects_bad_months() {
        for expiry in ["13/27", "00/27", "122", "12-27"] {
            let mut d = details();
            d.payment_method = PaymentMethod::Card;

            let mut c = card();
            c.expiry = expiry.to_string();
            d.card = Some(c);

            assert_eq!(
                d.validate(),
                Err(CheckoutValidationError::InvalidCardExpiry),
                "expiry {expiry} should be rejected"
            );
        }
    }

    #[test]
    fn card_details_are_ignored_for_cash_payments() {
        let mut d = details();

        let mut c = card();
        c.number = "bad".to_string();
        d.card = Some(c);

        assert_eq!(d.validate(), Ok(()));
    }
}
