use super::{
    report_section::{ReportSection, ReportTable},
    sections::report_sections,
};
use crate::model::AnalysisResults;

const STYLE: &str = "body{font-family:sans-serif;margin:2em auto;max-width:72em;color:#222}\
table{border-collapse:collapse;margin:0.5em 0 1.5em}\
th,td{border:1px solid #bbb;padding:0.25em 0.6em;text-align:right}\
th{background:#eef2f6}td:first-child,th:first-child{text-align:left}\
caption{font-weight:bold;text-align:left;padding:0.3em 0}";

/// a self-contained page with the same sections as the markdown report
pub fn render_html(results: &AnalysisResults, title: &str) -> String {
    let title = escape(title);
    let mut output = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );
    output.push_str(&format!(
        "<p><em>Generated {} by farewell {}</em></p>\n",
        results.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        escape(&results.metadata.crate_version)
    ));
    for section in report_sections(results).iter() {
        push_section(&mut output, section);
    }
    output.push_str("</body>\n</html>\n");
    output
}

fn push_section(output: &mut String, section: &ReportSection) {
    output.push_str(&format!("<section>\n<h2>{}</h2>\n", escape(&section.heading)));
    for p in section.paragraphs.iter() {
        output.push_str(&format!("<p>{}</p>\n", escape(p)));
    }
    for table in section.tables.iter() {
        push_table(output, table);
    }
    if !section.items.is_empty() {
        output.push_str("<ol>\n");
        for item in section.items.iter() {
            output.push_str(&format!("<li>{}</li>\n", escape(item)));
        }
        output.push_str("</ol>\n");
    }
    output.push_str("</section>\n");
}

fn push_table(output: &mut String, table: &ReportTable) {
    output.push_str("<table>\n");
    if let Some(caption) = &table.caption {
        output.push_str(&format!("<caption>{}</caption>\n", escape(caption)));
    }
    output.push_str("<tr>");
    for h in table.headers.iter() {
        output.push_str(&format!("<th>{}</th>", escape(h)));
    }
    output.push_str("</tr>\n");
    for row in table.rows.iter() {
        output.push_str("<tr>");
        for cell in row.iter() {
            output.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        output.push_str("</tr>\n");
    }
    output.push_str("</table>\n");
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & 'c'"), "a &lt; b &amp; &#39;c&#39;");
    }
}
