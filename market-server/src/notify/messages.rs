//! Message templates (Telegram Markdown for chat, plain text for email)

use shared::models::{Address, Order, OrderItem, OrderStatus};
use shared::util::format_millis;

use crate::orders::money::{format_money, line_total, to_f64};

/// Escape user-supplied text for Telegram legacy Markdown
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Chat summary for a freshly placed order
pub fn order_placed(order: &Order, items: &[OrderItem], address: Option<&Address>) -> String {
    let products_text = if items.is_empty() {
        "No items found.".to_string()
    } else {
        items
            .iter()
            .map(|item| {
                format!(
                    "• {} (x{}) - ₹{}",
                    escape_markdown(&item.product_name),
                    item.quantity,
                    format_money(to_f64(line_total(item.price, item.quantity)))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let address_text = address
        .map(|a| escape_markdown(&a.one_line()))
        .unwrap_or_else(|| "Address not found".to_string());

    format!(
        "🛍️ *New Order Received!*\n\n\
         📦 *Order ID:* `{}`\n\
         👤 *Customer:* `{}`\n\
         🏬 *Retailer:* `{}`\n\
         💰 *Total:* ₹{}\n\
         🕒 *Time:* {}\n\n\
         🧾 *Items:*\n{}\n\n\
         📍 *Address:* {}\n\n\
         ✅ *Status:* Placed",
        order.order_number,
        order.customer_id,
        order.retailer_id,
        format_money(order.total_price),
        format_millis(order.order_date),
        products_text,
        address_text,
    )
}

/// Chat summary for a status change
pub fn status_changed(order: &Order) -> String {
    match order.status {
        OrderStatus::Delivered => format!(
            "📦 *Order Delivered!*\n🆔 Order ID: {}\n💰 Total: ₹{}\n✅ Status: Delivered",
            order.id,
            format_money(order.total_price)
        ),
        OrderStatus::Confirmed => format!(
            "✅ *Order Confirmed!*\n🆔 Order ID: {}\n💰 Total: ₹{}\n📦 Status: Confirmed",
            order.id,
            format_money(order.total_price)
        ),
        OrderStatus::Shipped => format!(
            "🚚 *Order Shipped!*\n🆔 Order ID: {}\n📍 Status: Shipped",
            order.id
        ),
        other => format!("ℹ️ Order #{} updated to status: {}", order.id, other),
    }
}

/// In-app notification text for the retailer
pub fn order_placed_notice(order: &Order, items: &[OrderItem]) -> String {
    let units: i64 = items.iter().map(|i| i.quantity).sum();
    format!(
        "New order {} from customer #{}: {} unit(s), total ₹{}",
        order.order_number,
        order.customer_id,
        units,
        format_money(order.total_price)
    )
}

pub fn status_notice(order: &Order) -> String {
    format!("Order {} is now {}", order.order_number, order.status)
}

pub fn order_email_customer(order: &Order, items: &[OrderItem]) -> (String, String) {
    let lines = item_lines(items);
    (
        format!("Order {} confirmation", order.order_number),
        format!(
            "Thank you for your order {}.\n{}\nTotal: ₹{}",
            order.order_number,
            lines,
            format_money(order.total_price)
        ),
    )
}

pub fn order_email_retailer(order: &Order, items: &[OrderItem]) -> (String, String) {
    let lines = item_lines(items);
    (
        format!("New order {}", order.order_number),
        format!(
            "Customer #{} placed order {}.\n{}\nTotal: ₹{}",
            order.customer_id,
            order.order_number,
            lines,
            format_money(order.total_price)
        ),
    )
}

fn item_lines(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|i| format!("{} x {} @ ₹{}", i.quantity, i.product_name, format_money(i.price)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn retailer_approved(username: &str) -> String {
    format!("✅ Retailer *{}* has been approved and activated.", escape_markdown(username))
}

pub fn retailer_rejected(username: &str) -> String {
    format!("🚫 Retailer *{}* registration has been rejected.", escape_markdown(username))
}

pub fn retailer_blocked(name: &str) -> String {
    format!("⚠️ Retailer *{}* has been blocked by Admin.", escape_markdown(name))
}

pub fn approval_email(username: &str) -> (String, String) {
    (
        "Your retailer account is approved".to_string(),
        format!(
            "Hi {username}, your account has been approved! You can now log in and manage your inventory."
        ),
    )
}

pub fn rejection_email(username: &str) -> (String, String) {
    (
        "Your retailer registration".to_string(),
        format!("Hi {username}, unfortunately your registration was not approved."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentStatus;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: 7,
            customer_id: 3,
            retailer_id: 1,
            address_id: 2,
            order_number: "ORD-1A2B3C4D".into(),
            total_price: 950.0,
            status,
            payment_status: PaymentStatus::Pending,
            order_date: 0,
            delivery_timestamp: None,
        }
    }

    fn apples() -> OrderItem {
        OrderItem {
            id: 1,
            order_id: 7,
            product_id: Some(1),
            product_name: "Apples".into(),
            quantity: 10,
            price: 95.0,
        }
    }

    #[test]
    fn test_order_placed_contains_summary() {
        let address = Address {
            id: 2,
            user_id: 3,
            address_line1: "12 Gandhi Road".into(),
            address_line2: None,
            city: "Vellore".into(),
            state: "Tamil Nadu".into(),
            pincode: "632001".into(),
            is_default: true,
        };
        let text = order_placed(&order(OrderStatus::Placed), &[apples()], Some(&address));
        assert!(text.contains("`ORD-1A2B3C4D`"));
        assert!(text.contains("• Apples (x10) - ₹950.00"));
        assert!(text.contains("₹950.00"));
        assert!(text.contains("12 Gandhi Road, Vellore, Tamil Nadu - 632001"));
        assert!(text.contains("1970-01-01 00:00:00"));
    }

    #[test]
    fn test_order_placed_without_address_or_items() {
        let text = order_placed(&order(OrderStatus::Placed), &[], None);
        assert!(text.contains("No items found."));
        assert!(text.contains("Address not found"));
    }

    #[test]
    fn test_status_messages() {
        assert!(status_changed(&order(OrderStatus::Delivered)).contains("Order Delivered!"));
        assert!(status_changed(&order(OrderStatus::Confirmed)).contains("Order Confirmed!"));
        assert!(status_changed(&order(OrderStatus::Shipped)).contains("Order Shipped!"));
        assert_eq!(
            status_changed(&order(OrderStatus::Cancelled)),
            "ℹ️ Order #7 updated to status: cancelled"
        );
    }

    #[test]
    fn test_notice_texts() {
        let o = order(OrderStatus::Placed);
        assert_eq!(
            order_placed_notice(&o, &[apples()]),
            "New order ORD-1A2B3C4D from customer #3: 10 unit(s), total ₹950.00"
        );
        assert_eq!(status_notice(&order(OrderStatus::Shipped)), "Order ORD-1A2B3C4D is now shipped");
    }

    #[test]
    fn test_markdown_escaping() {
        assert_eq!(escape_markdown("freshmart_vellore"), "freshmart\\_vellore");
        assert_eq!(escape_markdown("a*b`c[d"), "a\\*b\\`c\\[d");
        assert_eq!(escape_markdown("FreshMart"), "FreshMart");

        assert_eq!(
            retailer_approved("freshmart_vellore"),
            "✅ Retailer *freshmart\\_vellore* has been approved and activated."
        );
        assert!(retailer_rejected("quick_cart").contains("*quick\\_cart*"));
        assert!(retailer_blocked("Mega*Store").contains("*Mega\\*Store*"));

        let mut item = apples();
        item.product_name = "Green_Tea".into();
        let text = order_placed(&order(OrderStatus::Placed), &[item], None);
        assert!(text.contains("• Green\\_Tea (x10)"));
    }
}
