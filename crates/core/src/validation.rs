//! Input validation for shop and product forms.
//!
//! The store accepts whatever it is given; these checks run before a
//! mutation is dispatched. Every field is checked and all failures are
//! reported together in [`FormErrors`], so a front end can show each message
//! next to its field.
//!
//! ## Product rules
//!
//! | Field         | Rule                                          |
//! |---------------|-----------------------------------------------|
//! | `name`        | required, at least 2 characters               |
//! | `description` | required, at least 5 characters               |
//! | `image`       | required, absolute URL                        |
//! | `price`       | required, a number greater than 0             |
//! | `quantity`    | required, a non-negative integer              |
//!
//! Shops only require `name`, `description` and `image` to be non-blank.

use core::fmt;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use url::Url;

use crate::types::{Product, ProductId, ProductPatch, Shop, ShopId};

/// Minimum product name length, in characters.
pub const MIN_PRODUCT_NAME_CHARS: usize = 2;

/// Minimum product description length, in characters.
pub const MIN_PRODUCT_DESCRIPTION_CHARS: usize = 5;

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Description,
    Image,
    Price,
    Quantity,
}

impl FormField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Image => "image",
            Self::Price => "price",
            Self::Quantity => "quantity",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single field was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("is required")]
    Required,
    #[error("must be at least {min} characters")]
    TooShort { min: usize },
    #[error("must be a valid URL")]
    InvalidUrl,
    #[error("must be a positive number")]
    NotAPositiveNumber,
    #[error("must be greater than 0")]
    Zero,
    #[error("must be a non-negative integer")]
    NotANonNegativeInteger,
}

/// All field failures of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, FieldError>);

impl FormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The failure for `field`, if any.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Failures ordered by field.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> {
        self.0.iter().map(|(field, err)| (*field, err))
    }

    fn record<T>(&mut self, field: FormField, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.insert(field, err);
                None
            }
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, err)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field} {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Raw input for a new shop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopForm {
    pub name: String,
    pub description: String,
    pub image: String,
}

/// A shop that passed validation, waiting for an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopDraft {
    pub name: String,
    pub description: String,
    pub image: String,
}

impl ShopForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `FormErrors` listing every blank field.
    pub fn validate(&self) -> Result<ShopDraft, FormErrors> {
        let mut errors = FormErrors::default();
        let name = errors.record(FormField::Name, required(&self.name));
        let description = errors.record(FormField::Description, required(&self.description));
        let image = errors.record(FormField::Image, required(&self.image));

        match (name, description, image) {
            (Some(name), Some(description), Some(image)) if errors.is_empty() => Ok(ShopDraft {
                name: name.to_owned(),
                description: description.to_owned(),
                image: image.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

impl ShopDraft {
    /// Build the shop record with no products.
    #[must_use]
    pub fn into_shop(self, id: ShopId, created_at: DateTime<Utc>) -> Shop {
        Shop::new(id, self.name, self.description, self.image, created_at)
    }
}

/// Raw input for a new product. Numeric fields are kept as text, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
    pub quantity: String,
}

/// A product that passed validation, waiting for an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: Decimal,
    pub quantity: u64,
}

impl ProductForm {
    /// Copy of the form with price and quantity run through
    /// [`sanitize_price_input`] and [`sanitize_quantity_input`].
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            price: sanitize_price_input(&self.price),
            quantity: sanitize_quantity_input(&self.quantity),
            ..self.clone()
        }
    }

    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `FormErrors` with one entry per rejected field.
    pub fn validate(&self) -> Result<ProductDraft, FormErrors> {
        let mut errors = FormErrors::default();
        let name = errors.record(FormField::Name, product_name(&self.name));
        let description = errors.record(FormField::Description, product_description(&self.description));
        let image = errors.record(FormField::Image, image_url(&self.image));
        let price = errors.record(FormField::Price, price(&self.price));
        let quantity = errors.record(FormField::Quantity, quantity(&self.quantity));

        match (name, description, image, price, quantity) {
            (Some(name), Some(description), Some(image), Some(price), Some(quantity))
                if errors.is_empty() =>
            {
                Ok(ProductDraft {
                    name: name.to_owned(),
                    description: description.to_owned(),
                    image: image.to_owned(),
                    price,
                    quantity,
                })
            }
            _ => Err(errors),
        }
    }
}

impl ProductDraft {
    /// Build the product record.
    #[must_use]
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            image: self.image,
            price: self.price,
            quantity: self.quantity,
            created_at,
        }
    }
}

/// Raw input for editing a product. Only supplied fields are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdateForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
}

impl ProductUpdateForm {
    /// Copy of the form with any supplied price or quantity sanitized, as in
    /// [`ProductForm::sanitized`].
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            price: self.price.as_deref().map(sanitize_price_input),
            quantity: self.quantity.as_deref().map(sanitize_quantity_input),
            ..self.clone()
        }
    }

    /// Validate the supplied fields with the same rules as [`ProductForm`].
    ///
    /// # Errors
    ///
    /// Returns `FormErrors` with one entry per rejected field.
    pub fn validate(&self) -> Result<ProductPatch, FormErrors> {
        let mut errors = FormErrors::default();
        let mut patch = ProductPatch::default();

        if let Some(name) = &self.name {
            patch.name = errors.record(FormField::Name, product_name(name)).map(str::to_owned);
        }
        if let Some(description) = &self.description {
            patch.description = errors
                .record(FormField::Description, product_description(description))
                .map(str::to_owned);
        }
        if let Some(image) = &self.image {
            patch.image = errors.record(FormField::Image, image_url(image)).map(str::to_owned);
        }
        if let Some(raw) = &self.price {
            patch.price = errors.record(FormField::Price, price(raw));
        }
        if let Some(raw) = &self.quantity {
            patch.quantity = errors.record(FormField::Quantity, quantity(raw));
        }

        if errors.is_empty() { Ok(patch) } else { Err(errors) }
    }
}

/// Strip everything but digits and the first decimal point from price input.
///
/// `"$1,234.5.6"` becomes `"1234.56"`.
#[must_use]
pub fn sanitize_price_input(raw: &str) -> String {
    let mut seen_point = false;
    raw.chars()
        .filter(|c| match c {
            '0'..='9' => true,
            '.' if !seen_point => {
                seen_point = true;
                true
            }
            _ => false,
        })
        .collect()
}

/// Strip everything but digits from quantity input.
#[must_use]
pub fn sanitize_quantity_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn required(raw: &str) -> Result<&str, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(value)
    }
}

fn min_chars(value: &str, min: usize) -> Result<&str, FieldError> {
    if value.chars().count() < min {
        Err(FieldError::TooShort { min })
    } else {
        Ok(value)
    }
}

fn product_name(raw: &str) -> Result<&str, FieldError> {
    min_chars(required(raw)?, MIN_PRODUCT_NAME_CHARS)
}

fn product_description(raw: &str) -> Result<&str, FieldError> {
    min_chars(required(raw)?, MIN_PRODUCT_DESCRIPTION_CHARS)
}

fn image_url(raw: &str) -> Result<&str, FieldError> {
    let value = required(raw)?;
    Url::parse(value).map_err(|_| FieldError::InvalidUrl)?;
    Ok(value)
}

fn price(raw: &str) -> Result<Decimal, FieldError> {
    let value: Decimal = required(raw)?
        .parse()
        .map_err(|_| FieldError::NotAPositiveNumber)?;
    if value.is_zero() {
        Err(FieldError::Zero)
    } else if value.is_sign_negative() {
        Err(FieldError::NotAPositiveNumber)
    } else {
        Ok(value)
    }
}

fn quantity(raw: &str) -> Result<u64, FieldError> {
    let value: Decimal = required(raw)?
        .parse()
        .map_err(|_| FieldError::NotANonNegativeInteger)?;
    if !value.fract().is_zero() || (value.is_sign_negative() && !value.is_zero()) {
        return Err(FieldError::NotANonNegativeInteger);
    }
    value.to_u64().ok_or(FieldError::NotANonNegativeInteger)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_product_form() -> ProductForm {
        ProductForm {
            name: "Widget".to_string(),
            description: "A sturdy widget".to_string(),
            image: "https://example.com/widget.png".to_string(),
            price: "10.5".to_string(),
            quantity: "3".to_string(),
        }
    }

    #[test]
    fn test_shop_form_valid() {
        let form = ShopForm {
            name: "  Corner Shop ".to_string(),
            description: "Groceries".to_string(),
            image: "shop.png".to_string(),
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.name, "Corner Shop");
        let shop = draft.into_shop(ShopId::new(2), Utc::now());
        assert_eq!(shop.id, ShopId::new(2));
        assert!(shop.products.is_empty());
    }

    #[test]
    fn test_shop_form_all_blank() {
        let errors = ShopForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(FormField::Name), Some(&FieldError::Required));
        assert_eq!(errors.get(FormField::Image), Some(&FieldError::Required));
    }

    #[test]
    fn test_product_form_valid() {
        let draft = valid_product_form().validate().unwrap();
        assert_eq!(draft.price, Decimal::new(105, 1));
        assert_eq!(draft.quantity, 3);

        let product = draft.into_product(ProductId::new(4), Utc::now());
        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.name, "Widget");
    }

    #[test]
    fn test_product_form_collects_all_errors() {
        let form = ProductForm {
            name: "W".to_string(),
            description: "tiny".to_string(),
            image: "not a url".to_string(),
            price: "0".to_string(),
            quantity: "1.5".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(FormField::Name), Some(&FieldError::TooShort { min: 2 }));
        assert_eq!(
            errors.get(FormField::Description),
            Some(&FieldError::TooShort { min: 5 })
        );
        assert_eq!(errors.get(FormField::Image), Some(&FieldError::InvalidUrl));
        assert_eq!(errors.get(FormField::Price), Some(&FieldError::Zero));
        assert_eq!(
            errors.get(FormField::Quantity),
            Some(&FieldError::NotANonNegativeInteger)
        );
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(price(""), Err(FieldError::Required));
        assert_eq!(price("abc"), Err(FieldError::NotAPositiveNumber));
        assert_eq!(price("-3"), Err(FieldError::NotAPositiveNumber));
        assert_eq!(price("0.00"), Err(FieldError::Zero));
        assert_eq!(price("0.01"), Ok(Decimal::new(1, 2)));
    }

    #[test]
    fn test_quantity_rules() {
        assert_eq!(quantity("0"), Ok(0));
        assert_eq!(quantity("12"), Ok(12));
        assert_eq!(quantity("3.0"), Ok(3));
        assert_eq!(quantity("-1"), Err(FieldError::NotANonNegativeInteger));
        assert_eq!(quantity("2.5"), Err(FieldError::NotANonNegativeInteger));
        assert_eq!(quantity("x"), Err(FieldError::NotANonNegativeInteger));
        assert_eq!(quantity(" "), Err(FieldError::Required));
    }

    #[test]
    fn test_update_form_checks_only_supplied_fields() {
        let form = ProductUpdateForm {
            name: Some("Gadget".to_string()),
            quantity: Some("7".to_string()),
            ..ProductUpdateForm::default()
        };
        let patch = form.validate().unwrap();
        assert_eq!(patch.name.as_deref(), Some("Gadget"));
        assert_eq!(patch.quantity, Some(7));
        assert!(patch.price.is_none());
        assert!(patch.id.is_none());

        let bad = ProductUpdateForm {
            price: Some("-1".to_string()),
            ..ProductUpdateForm::default()
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Price), Some(&FieldError::NotAPositiveNumber));
    }

    #[test]
    fn test_errors_display() {
        let form = ProductForm {
            name: String::new(),
            ..valid_product_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.to_string(), "name is required");
    }

    #[test]
    fn test_sanitize_price_input() {
        assert_eq!(sanitize_price_input("$1,234.5.6"), "1234.56");
        assert_eq!(sanitize_price_input("abc"), "");
        assert_eq!(sanitize_price_input("10."), "10.");
    }

    #[test]
    fn test_sanitize_quantity_input() {
        assert_eq!(sanitize_quantity_input("1.5 units"), "15");
        assert_eq!(sanitize_quantity_input("-3"), "3");
    }

    #[test]
    fn test_sanitized_forms() {
        let form = ProductForm {
            name: "Widget".to_string(),
            description: "A sturdy widget".to_string(),
            image: "https://example.com/w.png".to_string(),
            price: "$1,234.50".to_string(),
            quantity: "1,000".to_string(),
        };
        let draft = form.sanitized().validate().unwrap();
        assert_eq!(draft.price, Decimal::new(123_450, 2));
        assert_eq!(draft.quantity, 1000);
        assert_eq!(form.sanitized().name, "Widget");

        let update = ProductUpdateForm {
            quantity: Some("12 units".to_string()),
            ..ProductUpdateForm::default()
        }
        .sanitized();
        assert_eq!(update.quantity.as_deref(), Some("12"));
        assert_eq!(update.price, None);
    }
}
