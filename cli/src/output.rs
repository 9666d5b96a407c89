//! Terminal rendering for catalog, cart, and support views.

use clearflow_application::{GatewayError, TicketProgress};
use clearflow_domain::{
    CartState, ChatMessage, MessageRole, Product, ProductPage, Ticket, TicketStatus,
};
use colored::Colorize;
use std::sync::Mutex;

pub fn print_product(product: &Product) {
    println!();
    println!("{}", product.name.bold());
    println!("  {}", product.category.dimmed());
    println!(
        "  {}  {}",
        product.currency.format_price(product.price).green(),
        format!("[{}]", product.slug).dimmed()
    );
    if let Some(image) = &product.image {
        println!("  image: {}", image.dimmed());
    }
}

pub fn print_product_page(page: &ProductPage) {
    for product in &page.products {
        println!(
            "  {:<28} {:>12}  {}",
            product.name,
            product.currency.format_price(product.price).green(),
            format!("[{}]", product.slug).dimmed()
        );
    }
    println!();
    println!(
        "{}",
        format!(
            "page {}/{} ({} products)",
            page.page, page.page_count, page.total
        )
        .dimmed()
    );
}

pub fn print_cart(cart: &CartState) {
    if cart.is_empty() {
        println!("{}", "Your cart is empty.".dimmed());
        return;
    }
    for line in cart.lines() {
        println!(
            "  {:<28} x{:<3} {:>12}  {}",
            line.display_name,
            line.quantity,
            line.currency.format_price(line.line_total()).green(),
            format!("[{}]", line.id).dimmed()
        );
    }
    println!();
    println!(
        "{} {} items, {}",
        "Total:".cyan().bold(),
        cart.total_items(),
        cart.lines()
            .first()
            .map(|l| l.currency.format_price(cart.total_price()))
            .unwrap_or_default()
            .green()
            .bold()
    );
}

pub fn print_message(message: &ChatMessage) {
    let stamp = message
        .observed_at
        .format("%H:%M")
        .to_string()
        .dimmed()
        .to_string();
    match message.role {
        MessageRole::User => println!("{} {} {}", stamp, "you:".cyan().bold(), message.text),
        MessageRole::Assistant => {
            println!("{} {} {}", stamp, "store:".yellow().bold(), message.text)
        }
    }
}

pub fn print_ticket(ticket: &Ticket) {
    println!();
    println!(
        "{} {}  {}",
        "Ticket".bold(),
        ticket.id,
        status_label(ticket.status)
    );
    println!("{} {}", "Subject:".cyan().bold(), ticket.subject);
    println!();
    for message in &ticket.messages {
        print_message(message);
    }
}

pub fn status_label(status: TicketStatus) -> String {
    let label = status.to_string();
    match status {
        TicketStatus::Closed => label.red().bold().to_string(),
        TicketStatus::Replied => label.green().bold().to_string(),
        _ => label.yellow().bold().to_string(),
    }
}

/// Renders watch updates; only prints when something actually changed.
pub struct WatchPresenter {
    last_status: Mutex<Option<TicketStatus>>,
}

impl WatchPresenter {
    pub fn new() -> Self {
        Self {
            last_status: Mutex::new(None),
        }
    }
}

impl TicketProgress for WatchPresenter {
    fn on_status(&self, status: TicketStatus) {
        let Ok(mut last) = self.last_status.lock() else {
            return;
        };
        if *last != Some(status) {
            println!("{} {}", "status:".cyan().bold(), status_label(status));
            *last = Some(status);
        }
    }

    fn on_thread_replaced(&self, messages: &[ChatMessage]) {
        println!();
        for message in messages {
            print_message(message);
        }
    }

    fn on_poll_error(&self, error: &GatewayError) {
        eprintln!("{} {}", "poll failed:".red(), error);
    }
}
