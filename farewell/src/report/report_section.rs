/// a table of preformatted cells, rendered the same way by every text format
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(headers: &[&str]) -> ReportTable {
        ReportTable {
            caption: None,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: vec![],
        }
    }

    pub fn with_caption(mut self, caption: &str) -> ReportTable {
        self.caption = Some(caption.to_string());
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// one headed section of a report. paragraphs come first, then tables, then
/// bullet items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportSection {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub tables: Vec<ReportTable>,
    pub items: Vec<String>,
}

impl ReportSection {
    pub fn new(heading: &str) -> ReportSection {
        ReportSection {
            heading: heading.to_string(),
            ..Default::default()
        }
    }

    pub fn paragraph(&mut self, text: String) {
        self.paragraphs.push(text);
    }

    /// empty tables are dropped
    pub fn table(&mut self, table: ReportTable) {
        if !table.is_empty() {
            self.tables.push(table);
        }
    }
}

pub fn f2(value: f64) -> String {
    format!("{value:.2}")
}

pub fn f4(value: f64) -> String {
    format!("{value:.4}")
}

/// a fraction in [0, 1] as a percentage
pub fn pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn opt_f2(value: Option<f64>) -> String {
    value.map(f2).unwrap_or_else(|| String::from("-"))
}
