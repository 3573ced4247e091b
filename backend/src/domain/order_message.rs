//! Rendering of order notifications.
//!
//! Messages are sent with HTML markup enabled; only the labels are bold and
//! every customer-supplied value is escaped so it cannot alter the markup.

use crate::domain::Order;

const HEADER: &str = "🆕 <b>Новая заявка с сайта</b>";

/// Render the notification text for one order.
///
/// # Examples
/// ```
/// use order_relay::domain::{format_order_message, Order, OrderDraft};
///
/// let order = Order::try_from_draft(OrderDraft {
///     name: Some("Ann".to_owned()),
///     phone: Some("123".to_owned()),
///     product: Some("birch".to_owned()),
///     quantity: Some("2".to_owned()),
///     comment: None,
/// })
/// .expect("valid order");
/// let text = format_order_message(&order);
/// assert!(text.contains("<b>Товар:</b> Берёзовый веник"));
/// ```
#[must_use]
pub fn format_order_message(order: &Order) -> String {
    let mut message = format!(
        "{HEADER}\n\n\
         👤 <b>Имя:</b> {name}\n\
         📞 <b>Телефон:</b> {phone}\n\
         📦 <b>Товар:</b> {product}\n\
         🔢 <b>Количество:</b> {quantity} шт.\n",
        name = escape_html(order.name()),
        phone = escape_html(order.phone()),
        product = escape_html(order.product().display_name()),
        quantity = escape_html(order.quantity()),
    );
    if let Some(comment) = order.comment() {
        message.push_str("💬 <b>Комментарий:</b> ");
        message.push_str(&escape_html(comment));
        message.push('\n');
    }
    message
}

/// Escape the characters Telegram's HTML parse mode treats as markup.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderDraft;
    use rstest::rstest;

    fn order(product: &str, comment: Option<&str>) -> Order {
        Order::try_from_draft(OrderDraft {
            name: Some("Ann".to_owned()),
            phone: Some("+7 900 000-00-00".to_owned()),
            product: Some(product.to_owned()),
            quantity: Some("2".to_owned()),
            comment: comment.map(str::to_owned),
        })
        .expect("valid order")
    }

    #[rstest]
    fn renders_every_field_in_order() {
        let text = format_order_message(&order("oak", None));
        assert_eq!(
            text,
            "🆕 <b>Новая заявка с сайта</b>\n\n\
             👤 <b>Имя:</b> Ann\n\
             📞 <b>Телефон:</b> +7 900 000-00-00\n\
             📦 <b>Товар:</b> Дуб классический веник\n\
             🔢 <b>Количество:</b> 2 шт.\n"
        );
    }

    #[rstest]
    #[case("birch", "📦 <b>Товар:</b> Берёзовый веник\n")]
    #[case("xyz", "📦 <b>Товар:</b> xyz\n")]
    fn product_line_uses_display_name(#[case] code: &str, #[case] expected_line: &str) {
        assert!(format_order_message(&order(code, None)).contains(expected_line));
    }

    #[rstest]
    fn comment_line_is_appended_when_present() {
        let text = format_order_message(&order("oak", Some("позвоните вечером")));
        assert!(text.ends_with("💬 <b>Комментарий:</b> позвоните вечером\n"));
    }

    #[rstest]
    fn comment_line_is_omitted_when_absent() {
        assert!(!format_order_message(&order("oak", None)).contains("Комментарий"));
    }

    #[rstest]
    fn customer_values_are_escaped() {
        let text = format_order_message(&order("<b>x</b>", Some("Tom & Jerry")));
        assert!(text.contains("<b>Товар:</b> &lt;b&gt;x&lt;/b&gt;"));
        assert!(text.contains("Tom &amp; Jerry"));
    }
}
