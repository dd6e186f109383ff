use super::{
    report_section::{ReportSection, ReportTable},
    sections::report_sections,
};
use crate::model::AnalysisResults;

pub fn render_markdown(results: &AnalysisResults, title: &str) -> String {
    let mut output = format!("# {title}\n\n");
    output.push_str(&format!(
        "_Generated {} by farewell {}_\n\n",
        results.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        results.metadata.crate_version
    ));
    for section in report_sections(results).iter() {
        push_section(&mut output, section);
    }
    output.trim_end().to_string() + "\n"
}

fn push_section(output: &mut String, section: &ReportSection) {
    output.push_str(&format!("## {}\n\n", section.heading));
    for p in section.paragraphs.iter() {
        output.push_str(p);
        output.push_str("\n\n");
    }
    for table in section.tables.iter() {
        push_table(output, table);
    }
    if !section.items.is_empty() {
        for (i, item) in section.items.iter().enumerate() {
            output.push_str(&format!("{}. {item}\n", i + 1));
        }
        output.push('\n');
    }
}

fn push_table(output: &mut String, table: &ReportTable) {
    if let Some(caption) = &table.caption {
        output.push_str(&format!("**{caption}**\n\n"));
    }
    output.push_str(&row(&table.headers));
    output.push_str(&row(&vec![String::from("---"); table.headers.len()]));
    for r in table.rows.iter() {
        output.push_str(&row(r));
    }
    output.push('\n');
}

fn row(cells: &[String]) -> String {
    let escaped = cells.iter().map(|c| c.replace('|', "\\|")).collect::<Vec<_>>();
    format!("| {} |\n", escaped.join(" | "))
}
