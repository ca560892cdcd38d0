use crate::server::model::order::OrderSubmission;

/// HTML body of the order notification
pub(crate) fn order_summary(order: &OrderSubmission) -> String {
    let list = order
        .items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect::<String>();
    format!(
        "<h3>New Order Received:</h3>\
         <ul>{}</ul>\
         <p><strong>Room Number:</strong> {}</p>\
         <p><strong>Customer Email:</strong> {}</p>",
        list,
        escape(order.room_number_or_fallback()),
        escape(&order.user_email),
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
