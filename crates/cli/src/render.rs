//! Plain-text rendering of storefront state.
//!
//! Every function here is pure and returns the text to show; only [`emit`]
//! writes to stdout.

use std::fmt::Write as _;

use technova_core::format_money;
use technova_storefront::cart::Cart;
use technova_storefront::catalog::{CatalogStatus, Product};
use technova_storefront::orders::Order;
use technova_storefront::session::UserProfile;
use technova_storefront::view::{ActiveFilter, FilterKind};

/// Longest item title shown in an order summary.
pub const ORDER_TITLE_WIDTH: usize = 30;

const LIST_TITLE_WIDTH: usize = 40;

/// Print rendered text to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    println!("{text}");
}

/// Shorten `title` to `max` characters, marking the cut with `...`.
pub fn truncate(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        let mut short: String = title.chars().take(max).collect();
        short.push_str("...");
        short
    } else {
        title.to_string()
    }
}

/// One row of the product grid.
pub fn product_row(product: &Product) -> String {
    format!(
        "{:>4}  {:<width$}  {:>10}  {} ({})  [{}]",
        product.id.as_i64(),
        truncate(&product.title, LIST_TITLE_WIDTH),
        format_money(product.price),
        product.rating.stars(),
        product.rating.count,
        product.category,
        width = LIST_TITLE_WIDTH + 3,
    )
}

/// The product grid, or the reason it is empty.
pub fn product_list(
    status: &CatalogStatus,
    products: &[Product],
    filters: &[ActiveFilter],
) -> String {
    if let CatalogStatus::Failed { message } = status {
        return message.clone();
    }

    let mut out = String::new();
    if !filters.is_empty() {
        let chips: Vec<String> = filters
            .iter()
            .map(|f| format!("{}: {}", filter_kind_label(f.kind), f.label))
            .collect();
        let _ = writeln!(out, "Active filters: {}", chips.join(", "));
    }

    if products.is_empty() {
        out.push_str("No products match your filters.");
        return out;
    }

    let _ = writeln!(out, "Showing {} products", products.len());
    for product in products {
        let _ = writeln!(out, "{}", product_row(product));
    }
    out.trim_end().to_string()
}

const fn filter_kind_label(kind: FilterKind) -> &'static str {
    match kind {
        FilterKind::Category => "Category",
        FilterKind::Price => "Price",
        FilterKind::Search => "Search",
    }
}

/// Full product detail view.
pub fn product_detail(product: &Product) -> String {
    format!(
        "{title}\n{category}\n{price}\n{stars} {rate} ({count} reviews)\n\n{description}\n\nImage: {image}",
        title = product.title,
        category = product.category,
        price = format_money(product.price),
        stars = product.rating.stars(),
        rate = product.rating.rate,
        count = product.rating.count,
        description = product.description,
        image = product.image,
    )
}

/// Cart lines and totals.
pub fn cart_summary(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{:>4}  {} x {}  {}",
            line.product.id.as_i64(),
            line.quantity,
            line.product.title,
            format_money(line.line_total()),
        );
    }
    let _ = writeln!(out, "Items:    {}", cart.count());
    let _ = writeln!(out, "Subtotal: {}", format_money(cart.subtotal()));
    let _ = writeln!(out, "Shipping: {}", format_money(cart.shipping()));
    let _ = write!(out, "Total:    {}", format_money(cart.total()));
    out
}

/// One order in the order history.
pub fn order_summary(order: &Order) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Order #{}  {}  {}",
        order.id,
        order.date.format("%Y-%m-%d"),
        order.status
    );
    for line in &order.items {
        let _ = writeln!(
            out,
            "  {}  Qty: {}  {}",
            truncate(&line.product.title, ORDER_TITLE_WIDTH),
            line.quantity,
            format_money(line.line_total()),
        );
    }
    if !order.shipping_address.is_empty() {
        let _ = writeln!(out, "  Ship to: {}", order.shipping_address);
    }
    let _ = write!(out, "  Total: {}", format_money(order.total));
    out
}

/// Order history, most recent first.
pub fn order_history(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.".to_string();
    }
    orders
        .iter()
        .map(order_summary)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Account details.
pub fn profile(profile: &UserProfile) -> String {
    let on_off = |enabled: bool| if enabled { "on" } else { "off" };
    format!(
        "{name}\nEmail:         {email}\nPhone:         {phone}\nAddress:       {address}\nMember since:  {since}\nEmail updates: {email_on}\nSMS updates:   {sms_on}",
        name = profile.full_name(),
        email = profile.email,
        phone = profile.phone,
        address = profile.address,
        since = profile.member_since.format("%Y-%m-%d"),
        email_on = on_off(profile.email_notifications),
        sms_on = on_off(profile.sms_notifications),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use technova_core::{OrderId, ProductId, UserId};
    use technova_storefront::cart::CartLine;
    use technova_storefront::catalog::Rating;

    use super::*;

    fn product(title: &str) -> Product {
        Product {
            id: ProductId::new(7),
            title: title.to_string(),
            price: Decimal::new(1_999, 2),
            description: "A thing".to_string(),
            category: "electronics".to_string(),
            image: "https://example.com/7.png".to_string(),
            rating: Rating {
                rate: Decimal::new(41, 1),
                count: 120,
            },
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        let long = "x".repeat(31);
        assert_eq!(truncate(&long, 30), format!("{}...", "x".repeat(30)));
        assert_eq!(truncate(&"x".repeat(30), 30), "x".repeat(30));
    }

    #[test]
    fn test_product_row() {
        let row = product_row(&product("Widget"));
        assert!(row.contains("Widget"));
        assert!(row.contains("$19.99"));
        assert!(row.contains("\u{2605}\u{2605}\u{2605}\u{2605}\u{2606} (120)"));
        assert!(row.ends_with("[electronics]"));
    }

    #[test]
    fn test_product_list_failed_shows_message() {
        let status = CatalogStatus::Failed {
            message: "Failed to load products. Please try again later.".to_string(),
        };
        assert_eq!(
            product_list(&status, &[], &[]),
            "Failed to load products. Please try again later."
        );
    }

    #[test]
    fn test_product_list_empty_with_filters() {
        let filters = vec![ActiveFilter {
            kind: FilterKind::Search,
            label: "zzz".to_string(),
        }];
        let text = product_list(&CatalogStatus::Ready { count: 3 }, &[], &filters);
        assert_eq!(
            text,
            "Active filters: Search: zzz\nNo products match your filters."
        );
    }

    #[test]
    fn test_order_summary_truncates_titles() {
        let title = "An extremely long product title that keeps going";
        let order = Order::record(
            OrderId::new(1_700_000_000_000),
            UserId::new(1),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            vec![CartLine {
                product: product(title),
                quantity: 2,
            }],
            "1 Main St, Springfield, IL 62701".to_string(),
        );

        let text = order_summary(&order);
        assert!(text.starts_with("Order #1700000000000  2024-03-01  Processing"));
        let cut: String = title.chars().take(ORDER_TITLE_WIDTH).collect();
        assert!(text.contains(&format!("{cut}...  Qty: 2  $39.98")));
        assert!(text.contains("Ship to: 1 Main St, Springfield, IL 62701"));
        assert!(text.ends_with("Total: $44.98"));
    }

    #[test]
    fn test_empty_order_history() {
        assert_eq!(order_history(&[]), "No orders yet.");
    }
}
