//! Order confirmation documents.
//!
//! Renders an order as a Typst document: a header block with the order's
//! contact and payment fields, a line-item table, and the snapshot total.
//! The markup bytes are stored against the order and compiled to a
//! printable page by the downstream document pipeline.

use std::fmt::Write;

use thiserror::Error;

use crate::domain::orders::models::{Order, OrderLine};

/// Errors that can occur while rendering a confirmation document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to write markup into the output buffer.
    #[error("failed to format document")]
    Format(#[from] std::fmt::Error),
}

/// Render the confirmation document for an order.
///
/// Line unit prices reflect the current catalog; the displayed total is
/// always the order's stored snapshot.
///
/// # Errors
///
/// Returns a [`DocumentError`] when formatting fails.
pub fn render_confirmation(order: &Order, lines: &[OrderLine]) -> Result<Vec<u8>, DocumentError> {
    let mut out = String::new();

    writeln!(out, "#set page(paper: \"a4\", margin: 2cm)")?;
    writeln!(out, "#set text(11pt)")?;
    writeln!(out)?;
    writeln!(out, "= Order {}", order.uuid)?;
    writeln!(out)?;
    writeln!(out, "*Status:* {} \\", order.status.as_str())?;
    writeln!(out, "*Placed:* {} \\", order.created_at)?;
    writeln!(out, "*Customer:* {} \\", escape(&order.full_name))?;
    writeln!(out, "*Email:* {} \\", escape(&order.email))?;
    writeln!(out, "*Phone:* {} \\", escape(&order.phone))?;
    writeln!(out, "*Shipping address:* {} \\", escape(&order.shipping_address))?;
    writeln!(out, "*Payment method:* {}", order.payment_method.as_str())?;
    writeln!(out)?;
    writeln!(out, "#table(")?;
    writeln!(out, "  columns: (1fr, auto, auto, auto),")?;
    writeln!(
        out,
        "  table.header([*Item*], [*Qty*], [*Unit price*], [*Line total*]),"
    )?;

    for line in lines {
        writeln!(
            out,
            "  [{}], [{}], [{}], [{}],",
            escape(&line.title),
            line.quantity,
            format_minor(line.unit_price),
            format_minor(line.line_total),
        )?;
    }

    writeln!(out, ")")?;
    writeln!(out)?;
    writeln!(out, "*Total: {}*", format_minor(order.total_price))?;

    Ok(out.into_bytes())
}

/// Format minor units as a decimal amount, e.g. `15000` -> `"150.00"`.
#[must_use]
pub fn format_minor(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}

/// Escape Typst markup characters in user-supplied content.
fn escape(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());

    for c in content.chars() {
        if matches!(c, '\\' | '#' | '*' | '_' | '[' | ']' | '$' | '`' | '@' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use uuid::Uuid;

    use crate::domain::orders::models::{OrderStatus, PaymentMethod};

    use super::*;

    fn order() -> Order {
        Order {
            uuid: Uuid::now_v7(),
            user_uuid: Uuid::now_v7(),
            status: OrderStatus::New,
            full_name: "Test Shopper".to_string(),
            email: "shopper@example.com".to_string(),
            phone: "+79991234567".to_string(),
            shipping_address: "1 Orchard Lane".to_string(),
            payment_method: PaymentMethod::Cash,
            comments: String::new(),
            total_price: 15_000,
            has_document: false,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn line(title: &str, quantity: u32, unit_price: u64) -> OrderLine {
        OrderLine {
            product_uuid: Uuid::now_v7(),
            title: title.to_string(),
            unit_price,
            quantity,
            line_total: u64::from(quantity) * unit_price,
        }
    }

    #[test]
    fn document_lists_lines_and_snapshot_total() {
        let document = render_confirmation(&order(), &[line("Handset", 3, 5_000)])
            .expect("rendering should succeed");
        let text = String::from_utf8(document).expect("document should be UTF-8");

        assert!(text.contains("= Order"));
        assert!(text.contains("[Handset], [3], [50.00], [150.00],"));
        assert!(text.contains("*Total: 150.00*"));
        assert!(text.contains("*Status:* new"));
    }

    #[test]
    fn user_content_is_escaped() {
        let mut order = order();
        order.full_name = "Name [with] *markup*".to_string();

        let document = render_confirmation(&order, &[]).expect("rendering should succeed");
        let text = String::from_utf8(document).expect("document should be UTF-8");

        assert!(text.contains("Name \\[with\\] \\*markup\\*"));
    }

    #[test]
    fn format_minor_pads_cents() {
        assert_eq!(format_minor(0), "0.00");
        assert_eq!(format_minor(5), "0.05");
        assert_eq!(format_minor(15_000), "150.00");
        assert_eq!(format_minor(79_990), "799.90");
    }
}
