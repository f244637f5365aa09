use crate::domain::entities::waitlist_entry::WaitlistEntry;

/// Owner notification for a new signup. `existing_count` is the size of the
/// waitlist before this entry was stored.
pub fn new_signup_email(
    product_name: &str,
    entry: &WaitlistEntry,
    existing_count: i64,
) -> (String, String) {
    let subject = format!("New {} waitlist signup: {}", product_name, entry.full_name());
    let headline = "Someone joined the waitlist";
    let lead = format!(
        "<strong>{}</strong> just signed up for early access to {}.",
        escape_html(&entry.full_name()),
        escape_html(product_name)
    );
    let body = format!(
        r#"<table style="margin:8px 0 0;font-size:14px;color:#374151;border-collapse:collapse;">
        <tr><td style="padding:4px 12px 4px 0;color:#6b7280;">First name</td><td>{first}</td></tr>
        <tr><td style="padding:4px 12px 4px 0;color:#6b7280;">Last name</td><td>{last}</td></tr>
        <tr><td style="padding:4px 12px 4px 0;color:#6b7280;">Email</td><td>{email}</td></tr>
        <tr><td style="padding:4px 12px 4px 0;color:#6b7280;">Signed up</td><td>{created} UTC</td></tr>
        <tr><td style="padding:4px 12px 4px 0;color:#6b7280;">Already waiting</td><td>{count}</td></tr>
      </table>"#,
        first = escape_html(&entry.first_name),
        last = escape_html(&entry.last_name),
        email = escape_html(&entry.email),
        created = entry.created_at.format("%Y-%m-%d %H:%M:%S"),
        count = existing_count,
    );

    let html = wrap_email(product_name, headline, &lead, &body);
    (subject, html)
}

pub fn wrap_email(product_name: &str, headline: &str, lead: &str, body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <body style="background:#f8fafc;margin:0;padding:24px;font-family:Arial,Helvetica,sans-serif;">
    <div style="max-width:560px;margin:0 auto;background:#ffffff;border:1px solid #e5e7eb;border-radius:12px;padding:24px;">
      <div style="font-size:12px;letter-spacing:0.08em;text-transform:uppercase;color:#6b7280;">{brand} waitlist</div>
      <h1 style="margin:12px 0 8px;font-size:22px;color:#111827;">{headline}</h1>
      <p style="margin:0 0 12px;font-size:15px;color:#111827;line-height:1.6;">{lead}</p>
      {body_html}
      <p style="margin:20px 0 0;padding-top:16px;border-top:1px solid #e5e7eb;font-size:12px;color:#9ca3af;">
        You receive this because you own the {brand} waitlist.
      </p>
    </div>
  </body>
</html>
"#,
        brand = escape_html(product_name),
        headline = headline,
        lead = lead,
        body_html = body_html,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
