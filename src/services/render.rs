//! Message bodies for outbound bill notifications. SMS and WhatsApp share a
//! plain-text rendering; email gets an HTML table and, when a digital payment
//! is still owed, an embedded UPI link with a QR code.

use qrcode::QrCode;
use qrcode::render::svg;

use crate::domain::bill::{Bill, BillStatus, PaymentStatus, format_cents};
use crate::domain::notification::{BillEvent, Channel};
use crate::domain::settings::StoreSettings;
use crate::domain::store::Store;

/// Subject line for the email channel.
pub fn subject(event: BillEvent, bill: &Bill) -> String {
    match event {
        BillEvent::PaymentConfirmation => {
            format!("Payment received for {}", bill.bill_number)
        }
        BillEvent::CollectionReminder => match bill.status {
            BillStatus::Completed => format!("Thank you, order {} collected", bill.bill_number),
            _ => format!("Your order {} is ready", bill.bill_number),
        },
    }
}

/// Renders the body for a channel: HTML for email, plain text otherwise.
pub fn body(bill: &Bill, store: &Store, settings: &StoreSettings, event: BillEvent, channel: Channel) -> String {
    match channel {
        Channel::Email => html_body(bill, store, settings, event),
        Channel::Sms | Channel::Whatsapp => text_body(bill, store, settings, event),
    }
}

/// Plain-text rendering used for SMS and WhatsApp.
pub fn text_body(bill: &Bill, store: &Store, settings: &StoreSettings, event: BillEvent) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Hi {},", bill.customer.name));
    lines.push(headline(event, bill, settings));
    lines.push(String::new());

    for item in &bill.items {
        lines.push(format!(
            "{} x {} = {} {}",
            item.quantity,
            item.category_name,
            settings.currency,
            format_cents(item.subtotal_cents)
        ));
    }
    lines.push(format!(
        "Total: {} {}",
        settings.currency,
        format_cents(bill.total_cents)
    ));

    if let Some(uri) = payment_uri(bill, store, settings) {
        lines.push(String::new());
        lines.push(format!(
            "Pay {} {} via UPI: {uri}",
            settings.currency,
            format_cents(bill.total_cents)
        ));
    }

    lines.push(String::new());
    lines.push(store.name.clone());

    lines.join("\n")
}

/// HTML rendering used for the email channel.
pub fn html_body(bill: &Bill, store: &Store, settings: &StoreSettings, event: BillEvent) -> String {
    let mut rows = String::new();
    for item in &bill.items {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{} {}</td><td>{} {}</td></tr>",
            escape_html(&item.category_name),
            item.quantity,
            settings.currency,
            format_cents(item.price_cents),
            settings.currency,
            format_cents(item.subtotal_cents)
        ));
    }

    let mut payment_block = String::new();
    if let Some(uri) = payment_uri(bill, store, settings) {
        payment_block.push_str(&format!(
            "<p>Amount due: <strong>{} {}</strong></p>\
             <p><a href=\"{uri}\">Pay via UPI</a></p>",
            settings.currency,
            format_cents(bill.total_cents)
        ));
        if let Some(qr) = payment_qr_svg(&uri) {
            payment_block.push_str(&qr);
        }
    }

    format!(
        "<html><body>\
         <p>Hi {name},</p>\
         <p>{headline}</p>\
         <table border=\"1\" cellpadding=\"4\" cellspacing=\"0\">\
         <tr><th>Item</th><th>Qty</th><th>Price</th><th>Subtotal</th></tr>\
         {rows}\
         <tr><td colspan=\"3\"><strong>Total</strong></td>\
         <td><strong>{currency} {total}</strong></td></tr>\
         </table>\
         {payment_block}\
         <p>{store_name}</p>\
         </body></html>",
        name = escape_html(&bill.customer.name),
        headline = escape_html(&headline(event, bill, settings)),
        currency = settings.currency,
        total = format_cents(bill.total_cents),
        store_name = escape_html(&store.name),
    )
}

/// The `upi://pay` deep link for the bill's outstanding amount, or `None`
/// when the bill is not waiting on a digital payment or no UPI id is set.
pub fn payment_uri(bill: &Bill, store: &Store, settings: &StoreSettings) -> Option<String> {
    if bill.payment_status != PaymentStatus::Pending {
        return None;
    }
    if !bill.payment_method.is_some_and(|method| method.is_digital()) {
        return None;
    }

    let upi_id = settings.upi_id.as_deref()?;
    let payee = settings.payee_name.as_deref().unwrap_or(&store.name);

    Some(format!(
        "upi://pay?pa={}&pn={}&am={}&cu={}",
        percent_encode(upi_id),
        percent_encode(payee),
        format_cents(bill.total_cents),
        percent_encode(&settings.currency),
    ))
}

/// Renders a payment link as an inline SVG QR code.
pub fn payment_qr_svg(uri: &str) -> Option<String> {
    let code = QrCode::new(uri.as_bytes()).ok()?;
    Some(
        code.render::<svg::Color>()
            .min_dimensions(180, 180)
            .build(),
    )
}

fn headline(event: BillEvent, bill: &Bill, settings: &StoreSettings) -> String {
    match event {
        BillEvent::PaymentConfirmation => format!(
            "We have received your payment of {} {} for bill {}. Thank you!",
            settings.currency,
            format_cents(bill.total_cents),
            bill.bill_number
        ),
        BillEvent::CollectionReminder => match bill.status {
            BillStatus::Completed => format!(
                "Your order {} has been collected. Thank you for choosing us!",
                bill.bill_number
            ),
            _ => format!(
                "Your order {} is ready for collection.",
                bill.bill_number
            ),
        },
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'@' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
