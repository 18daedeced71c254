//! Static HTML rendering of the validators table.

use crate::rows::{DisplayRow, RowHandle};
use crate::table::TableState;
use crate::view::common::{RowStyleClass, TableViewModel};
use crate::view::validators::build_validators_view;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn color(style: Option<RowStyleClass>) -> Option<&'static str> {
    match style? {
        RowStyleClass::Positive => Some("green"),
        RowStyleClass::Negative => Some("red"),
        RowStyleClass::Dimmed => Some("gray"),
        RowStyleClass::Normal => None,
    }
}

fn table_html(vm: &TableViewModel<RowHandle>) -> String {
    let mut out = String::from("<table id=\"validators\">\n<thead><tr>");
    for spec in vm.columns {
        out.push_str(&format!("<th>{}</th>", escape(spec.title)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in &vm.rows {
        out.push_str("<tr>");
        for (cell, spec) in row.cells.iter().zip(vm.columns) {
            let class = if spec.trigger.is_some() {
                " class=\"cursor-pointer\""
            } else {
                ""
            };
            let text = escape(&cell.text);
            match color(cell.style) {
                Some(c) => out.push_str(&format!(
                    "<td{class}><span style=\"color: {c};\">{text}</span></td>"
                )),
                None => out.push_str(&format!("<td{class}>{text}</td>")),
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

/// Renders every row, in document order, as a standalone page.
pub fn render_page(rows: &[DisplayRow], title: &str) -> String {
    let mut state = TableState::new();
    state.page_len = rows.len().max(1);
    let vm = build_validators_view(rows, &state);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: system-ui, -apple-system, sans-serif; margin: 20px; }}
        table {{ border-collapse: collapse; }}
        th, td {{ padding: 4px 8px; border-bottom: 1px solid #ddd; text-align: right; }}
        td:nth-child(2) {{ text-align: left; font-family: monospace; }}
        .cursor-pointer {{ text-decoration: underline dotted; }}
        .note {{ color: #666; }}
    </style>
</head>
<body>
<h1>{title}</h1>
<p>{count} validators</p>
<p class="note">Underlined cells (valoper, jails, recent jails, creation) open details in the interactive viewer; this page is a static snapshot.</p>
{table}
</body>
</html>
"#,
        title = escape(title),
        count = vm.total,
        table = table_html(&vm),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MetricsDocument;
    use crate::rows::project_rows;

    fn page(json: &str) -> String {
        let doc = MetricsDocument::from_slice(json.as_bytes()).unwrap();
        render_page(&project_rows(&doc), "Validators")
    }

    #[test]
    fn escapes_text() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        let html = page(r#"{"validators":[{"valoper":"<script>alert(1)</script>"}]}"#);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn jail_cells_are_colored() {
        let html = page(
            r#"{"validators":[{"valoper":"a"},{"valoper":"b","slashes":[{"height":1,"time":"t"}]}]}"#,
        );
        assert!(html.contains(r#"<span style="color: green;">0</span>"#));
        assert!(html.contains(r#"<span style="color: red;">1</span>"#));
    }

    #[test]
    fn trigger_cells_are_marked_but_inert() {
        let html = page(r#"{"validators":[{"valoper":"a"}]}"#);
        let pointer_cells = html.matches("<td class=\"cursor-pointer\"").count();
        assert_eq!(pointer_cells, 4);
        assert!(html.contains("<p>1 validators</p>"));
        // inert on a static page: marked, but no clickable cursor
        assert!(!html.contains("cursor: pointer"));
        assert!(html.contains("open details in the interactive viewer"));
    }

    #[test]
    fn rows_keep_document_order() {
        let html = page(r#"{"validators":[{"valoper":"zz"},{"valoper":"aa"}]}"#);
        let zz = html.find(">zz<").unwrap();
        let aa = html.find(">aa<").unwrap();
        assert!(zz < aa);
    }
}
