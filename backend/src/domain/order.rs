//! Customer orders submitted through the landing page.
//!
//! An [`Order`] only exists once every required field is present; inbound
//! adapters collect raw values into an [`OrderDraft`] and call
//! [`Order::try_from_draft`], which checks fields in the fixed order
//! name, phone, product, quantity and reports the first one missing.

use std::fmt;

use thiserror::Error;

/// Required order fields in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    /// Customer name.
    Name,
    /// Contact phone number.
    Phone,
    /// Product code.
    Product,
    /// Ordered quantity.
    Quantity,
}

impl OrderField {
    /// Field name as it appears in the request payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Product => "product",
            Self::Quantity => "quantity",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an [`OrderDraft`] cannot become an [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    /// A required field is absent or blank.
    #[error("missing required field: {field}")]
    MissingField {
        /// First missing field in validation order.
        field: OrderField,
    },
}

/// Catalogue products offered on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Product {
    /// `birch`
    Birch,
    /// `juniper`
    Juniper,
    /// `canadian_oak`
    CanadianOak,
    /// `oak`
    Oak,
    /// Any code outside the catalogue, kept verbatim.
    Other(String),
}

const UNKNOWN_PRODUCT: &str = "Неизвестный товар";

impl Product {
    /// Resolve a product code; unknown codes are preserved as [`Product::Other`].
    ///
    /// # Examples
    /// ```
    /// use order_relay::domain::Product;
    ///
    /// assert_eq!(Product::from_code("birch").display_name(), "Берёзовый веник");
    /// assert_eq!(Product::from_code("xyz").display_name(), "xyz");
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "birch" => Self::Birch,
            "juniper" => Self::Juniper,
            "canadian_oak" => Self::CanadianOak,
            "oak" => Self::Oak,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Code submitted by the form.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Birch => "birch",
            Self::Juniper => "juniper",
            Self::CanadianOak => "canadian_oak",
            Self::Oak => "oak",
            Self::Other(code) => code.as_str(),
        }
    }

    /// Human-readable name used in notifications.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Birch => "Берёзовый веник",
            Self::Juniper => "Можжевеловый веник",
            Self::CanadianOak => "Канадский дубовый веник",
            Self::Oak => "Дуб классический веник",
            Self::Other(code) if code.trim().is_empty() => UNKNOWN_PRODUCT,
            Self::Other(code) => code.as_str(),
        }
    }
}

/// Unvalidated order values as collected by an inbound adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    /// Customer name.
    pub name: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Product code.
    pub product: Option<String>,
    /// Quantity, already rendered as text.
    pub quantity: Option<String>,
    /// Free-form comment.
    pub comment: Option<String>,
}

/// A validated customer order.
///
/// ## Invariants
/// - `name`, `phone`, `quantity` and the product code are non-blank.
/// - `comment` is either absent or non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    name: String,
    phone: String,
    product: Product,
    quantity: String,
    comment: Option<String>,
}

impl Order {
    /// Validate a draft, reporting the first missing required field.
    ///
    /// # Examples
    /// ```
    /// use order_relay::domain::{Order, OrderDraft, OrderField, OrderValidationError};
    ///
    /// let draft = OrderDraft {
    ///     name: Some("Ann".to_owned()),
    ///     phone: None,
    ///     ..OrderDraft::default()
    /// };
    /// assert_eq!(
    ///     Order::try_from_draft(draft),
    ///     Err(OrderValidationError::MissingField { field: OrderField::Phone })
    /// );
    /// ```
    pub fn try_from_draft(draft: OrderDraft) -> Result<Self, OrderValidationError> {
        let OrderDraft {
            name,
            phone,
            product,
            quantity,
            comment,
        } = draft;

        let name = required(name, OrderField::Name)?;
        let phone = required(phone, OrderField::Phone)?;
        let product_code = required(product, OrderField::Product)?;
        let quantity = required(quantity, OrderField::Quantity)?;

        Ok(Self {
            name,
            phone,
            product: Product::from_code(&product_code),
            quantity,
            comment: non_blank(comment),
        })
    }

    /// Customer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Ordered product.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Ordered quantity as submitted.
    #[must_use]
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Optional customer comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn required(value: Option<String>, field: OrderField) -> Result<String, OrderValidationError> {
    non_blank(value).ok_or(OrderValidationError::MissingField { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn draft() -> OrderDraft {
        OrderDraft {
            name: Some("Ann".to_owned()),
            phone: Some("123".to_owned()),
            product: Some("oak".to_owned()),
            quantity: Some("2".to_owned()),
            comment: None,
        }
    }

    #[fixture]
    fn complete_draft() -> OrderDraft {
        draft()
    }

    #[rstest]
    fn complete_draft_becomes_order(complete_draft: OrderDraft) {
        let order = Order::try_from_draft(complete_draft).expect("valid order");
        assert_eq!(order.name(), "Ann");
        assert_eq!(order.phone(), "123");
        assert_eq!(order.product(), &Product::Oak);
        assert_eq!(order.quantity(), "2");
        assert!(order.comment().is_none());
    }

    #[rstest]
    #[case::everything_missing(OrderDraft::default(), OrderField::Name)]
    #[case::name_blank(
        OrderDraft { name: Some("   ".to_owned()), ..draft() },
        OrderField::Name
    )]
    #[case::phone_and_quantity_missing(
        OrderDraft { phone: None, quantity: None, ..draft() },
        OrderField::Phone
    )]
    #[case::product_empty(
        OrderDraft { product: Some(String::new()), ..draft() },
        OrderField::Product
    )]
    #[case::quantity_missing(
        OrderDraft { quantity: None, ..draft() },
        OrderField::Quantity
    )]
    fn first_missing_field_is_reported(#[case] draft: OrderDraft, #[case] expected: OrderField) {
        assert_eq!(
            Order::try_from_draft(draft),
            Err(OrderValidationError::MissingField { field: expected })
        );
    }

    #[rstest]
    fn blank_comment_is_dropped(complete_draft: OrderDraft) {
        let draft = OrderDraft {
            comment: Some("  ".to_owned()),
            ..complete_draft
        };
        let order = Order::try_from_draft(draft).expect("valid order");
        assert!(order.comment().is_none());
    }

    #[rstest]
    #[case("birch", "Берёзовый веник")]
    #[case("juniper", "Можжевеловый веник")]
    #[case("canadian_oak", "Канадский дубовый веник")]
    #[case("oak", "Дуб классический веник")]
    #[case("xyz", "xyz")]
    #[case("", "Неизвестный товар")]
    fn product_codes_resolve_to_display_names(#[case] code: &str, #[case] expected: &str) {
        let product = Product::from_code(code);
        assert_eq!(product.display_name(), expected);
        assert_eq!(product.code(), code);
    }
}
