// Page template and a minimal row-grid to <table> formatter.

use super::utils::escape_html;

pub const HTML_HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Race Results</title>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/4.3.1/css/bootstrap.min.css">
</head>
<body>
<div class="container">"#;

pub const CSS_SCRIPT: &str = r#"
<style type="text/css">
  th { background-color: #074d32; color: white; font-size:12pt; }
</style>
"#;

pub const HTML_FOOTER: &str = r#"</div>
</body>
</html>
"#;

pub const SHEET_SEPARATOR: &str = "<br>";

const TABLE_OPEN: &str = r#"<table class="table table-striped table-hover table-sm">"#;

/// Renders `rows` as an HTML table. With `first_row_header` the first row is
/// emitted as `<th>` cells inside `<thead>`.
pub fn render_table(rows: &[Vec<String>], first_row_header: bool) -> String {
    let mut html = String::from(TABLE_OPEN);
    html.push('\n');

    let (head, body) = match rows.split_first() {
        Some((first, rest)) if first_row_header => (Some(first), rest),
        _ => (None, rows),
    };

    if let Some(head) = head {
        html.push_str("<thead>\n");
        push_row(&mut html, head, "th");
        html.push_str("</thead>\n");
    }

    html.push_str("<tbody>\n");
    for row in body {
        push_row(&mut html, row, "td");
    }
    html.push_str("</tbody>\n</table>");
    html
}

fn push_row(html: &mut String, cells: &[String], tag: &str) {
    html.push_str("<tr>");
    for cell in cells {
        html.push_str(&format!("<{tag}>{}</{tag}>", escape_html(cell)));
    }
    html.push_str("</tr>\n");
}

/// Wraps already rendered tables in the page template.
pub fn render_page<I>(tables: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut html = format!("{HTML_HEADER}{CSS_SCRIPT}");
    for table in tables {
        html.push_str(SHEET_SEPARATOR);
        html.push_str(&table);
    }
    html.push_str(HTML_FOOTER);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn first_row_becomes_header() {
        let html = render_table(&grid(&[&["Pos", "Name"], &["1", "Ann <A>"]]), true);
        assert!(html.starts_with(TABLE_OPEN));
        assert!(html.contains("<thead>\n<tr><th>Pos</th><th>Name</th></tr>\n</thead>"));
        assert!(html.contains("<tr><td>1</td><td>Ann &lt;A&gt;</td></tr>"));
        assert!(html.ends_with("</table>"));
    }

    #[test]
    fn empty_grid_renders_empty_body() {
        let html = render_table(&[], true);
        assert!(!html.contains("<thead>"));
        assert!(html.contains("<tbody>\n</tbody>"));
    }

    #[test]
    fn page_separates_sheets() {
        let page = render_page(vec!["<table>a</table>".to_string(), "<table>b</table>".to_string()]);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("th { background-color"));
        assert!(page.contains("<br><table>a</table><br><table>b</table>"));
        assert!(page.ends_with("</html>\n"));
    }
}
