//! HTML rendering for the audit page.
//!
//! The core hands over a plain `AuditResult`; all markup lives here.

use options_audit_core::{group_digits, human_bytes, AuditResult, OptionRow};

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2em;color:#1d2327}\
table{border-collapse:collapse;margin-bottom:2em;min-width:40em}\
th,td{border:1px solid #c3c4c7;padding:4px 8px;text-align:left}\
td.num{text-align:right;font-variant-numeric:tabular-nums}\
.notice{padding:1em;border-left:4px solid #d63638;background:#fcf0f1}";

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head>\
         <body><h1>{title}</h1>{body}</body></html>\n",
        title = escape_html(title),
    )
}

fn option_table(out: &mut String, heading: &str, rows: &[OptionRow], empty: &str) {
    out.push_str(&format!("<h2>{}</h2>", escape_html(heading)));
    if rows.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(empty)));
        return;
    }
    out.push_str("<table><thead><tr><th>Option</th><th>Autoload</th><th>Size</th></tr></thead><tbody>");
    for row in rows {
        out.push_str(&format!(
            "<tr><td><code>{}</code></td><td>{}</td><td class=\"num\">{}</td></tr>",
            escape_html(&row.name),
            if row.autoload { "yes" } else { "no" },
            human_bytes(row.size_bytes),
        ));
    }
    out.push_str("</tbody></table>");
}

/// Full report page for a completed audit.
pub fn audit_page(result: &AuditResult) -> String {
    let t = &result.thresholds;
    let mut body = format!(
        "<h2>Summary</h2><table><tbody>\
         <tr><th>Total options</th><td class=\"num\">{}</td></tr>\
         <tr><th>Autoloaded options</th><td class=\"num\">{} ({}%)</td></tr>\
         <tr><th>Autoloaded size</th><td class=\"num\">{}</td></tr>\
         </tbody></table>",
        group_digits(result.total),
        group_digits(result.autoload_count),
        result.autoload_share_percent(),
        result.autoload_bytes_human(),
    );

    if result.has_no_findings() {
        body.push_str("<p class=\"clear\">Nothing to report: no options to list at the current thresholds.</p>");
    }

    option_table(
        &mut body,
        &format!("Largest autoloaded options (top {})", t.top_autoload_limit),
        &result.top_autoload,
        "No autoloaded options.",
    );
    option_table(
        &mut body,
        &format!("Options of {} or more", human_bytes(t.large_option_threshold)),
        &result.large_options,
        "No options above the threshold.",
    );
    option_table(
        &mut body,
        &format!("Transients of {} or more", human_bytes(t.large_transient_threshold)),
        &result.large_transients,
        "No transients above the threshold.",
    );

    page("Options size audit", &body)
}

/// Page shown instead of a report when the audit could not run.
pub fn failure_page(headline: &str, detail: Option<&str>) -> String {
    let mut body = format!("<div class=\"notice\"><p><strong>{}</strong></p>", escape_html(headline));
    if let Some(detail) = detail {
        body.push_str(&format!("<p>{}</p>", escape_html(detail)));
    }
    body.push_str("</div>");
    page("Options size audit", &body)
}
