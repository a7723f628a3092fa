use crate::api::reports::Report;
use crate::api::response::ResultTable;
use crate::error::AppError;
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Formatter and utilities for table display
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableDisplay {
    /// Create a new TableDisplay instance
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    /// Detect terminal width
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => {
                let width = cols as usize;
                // Set minimum and maximum width for improved stability
                if width < 40 {
                    Some(40) // Minimum width
                } else if width > 200 {
                    Some(200) // Maximum width
                } else {
                    Some(width)
                }
            }
            Err(_) => Some(80), // Default width
        }
    }

    /// Create a TableDisplay instance with maximum width setting
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set color usage
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Render a fetched report result in table format
    pub fn render_result(&self, result: &ResultTable) -> Result<String, AppError> {
        if result.rows.is_empty() {
            return Ok("Report returned no results.".to_string());
        }

        let mut table = Table::new();

        // UTF8 style and header configuration
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

        // Table width setting adjusted to terminal width
        self.configure_table_width(&mut table);

        let headers: Vec<Cell> = result
            .columns
            .iter()
            .map(|column| {
                if self.use_colors {
                    Cell::new(column)
                        .add_attribute(Attribute::Bold)
                        .fg(Color::Green)
                } else {
                    Cell::new(column).add_attribute(Attribute::Bold)
                }
            })
            .collect();
        table.set_header(headers);

        for row in &result.rows {
            let cells: Vec<Cell> = row
                .iter()
                .map(|value| {
                    let formatted_value = self.format_cell_value(value);
                    if self.use_colors && matches!(value, serde_json::Value::Null) {
                        Cell::new(formatted_value)
                            .fg(Color::DarkGrey)
                            .add_attribute(Attribute::Italic)
                    } else {
                        Cell::new(formatted_value)
                    }
                })
                .collect();
            table.add_row(cells);
        }

        Ok(table.to_string())
    }

    /// Render the report catalog in table format
    pub fn render_report_list(&self, reports: &[Report]) -> Result<String, AppError> {
        let mut table = Table::new();

        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);

        if self.use_colors {
            table.set_header(vec![
                Cell::new("Report")
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan),
                Cell::new("Result Key")
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan),
                Cell::new("Description")
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan),
            ]);
        } else {
            table.set_header(vec!["Report", "Result Key", "Description"]);
        }

        let (name_width, key_width, desc_width) = self.get_responsive_column_widths();

        for report in reports {
            let row = vec![
                if self.use_colors {
                    Cell::new(self.truncate_text(report.name(), name_width)).fg(Color::Cyan)
                } else {
                    Cell::new(self.truncate_text(report.name(), name_width))
                },
                Cell::new(self.truncate_text(report.result_key(), key_width)),
                if self.use_colors {
                    Cell::new(self.truncate_text(report.description(), desc_width))
                        .fg(Color::DarkGrey)
                } else {
                    Cell::new(self.truncate_text(report.description(), desc_width))
                },
            ];

            table.add_row(row);
        }

        Ok(table.to_string())
    }

    /// Render a fetched report result as CSV
    ///
    /// Fields containing commas, quotes, or newlines are quoted with inner
    /// quotes doubled. Null cells render as empty fields.
    pub fn to_csv(&self, result: &ResultTable) -> String {
        let mut output = String::new();

        let header: Vec<String> = result
            .columns
            .iter()
            .map(|column| Self::csv_field(column))
            .collect();
        output.push_str(&header.join(","));
        output.push('\n');

        for row in &result.rows {
            let fields: Vec<String> = row
                .iter()
                .map(|value| Self::csv_field(&Self::csv_cell(value)))
                .collect();
            output.push_str(&fields.join(","));
            output.push('\n');
        }

        output
    }

    /// Convert a single cell value to its CSV text form
    fn csv_cell(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Quote a CSV field when it contains a separator, quote, or newline
    fn csv_field(text: &str) -> String {
        if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
            format!("\"{}\"", text.replace('"', "\"\""))
        } else {
            text.to_string()
        }
    }

    /// Set table width to match the terminal size
    fn configure_table_width(&self, table: &mut Table) {
        if let Some(terminal_width) = self.max_width {
            // Adjust considering borders and padding from terminal width
            let available_width = if terminal_width > 20 {
                terminal_width - 6 // Consider left/right borders, padding, margins
            } else {
                terminal_width.max(40) // Ensure minimum width
            };

            table.set_width(available_width as u16);
        } else {
            // Default width when terminal size cannot be obtained
            table.set_width(80);
        }
    }

    /// Calculate responsive column widths (for the report catalog)
    fn get_responsive_column_widths(&self) -> (usize, usize, usize) {
        let terminal_width = self.max_width.unwrap_or(80);

        if terminal_width < 60 {
            // Very narrow terminal
            (18, 10, 20)
        } else if terminal_width < 80 {
            // Narrow terminal
            (24, 12, 30)
        } else if terminal_width < 120 {
            // Standard terminal
            (30, 14, 45)
        } else {
            // Wide terminal
            (32, 16, 70)
        }
    }

    /// Truncate text to specified width and add ellipsis
    fn truncate_text(&self, text: &str, max_width: usize) -> String {
        if text.width() <= max_width {
            return text.to_string();
        }

        let ellipsis = "...";
        let ellipsis_width = ellipsis.width();

        if max_width <= ellipsis_width {
            return ellipsis[..max_width].to_string();
        }

        let target_width = max_width - ellipsis_width;
        let mut result = String::new();
        let mut current_width = 0;

        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > target_width {
                break;
            }
            result.push(ch);
            current_width += ch_width;
        }

        result.push_str(ellipsis);
        result
    }

    /// Format cell value
    pub fn format_cell_value(&self, value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => {
                "-".to_string() // Shorter and more stable display
            }
            serde_json::Value::String(s) => {
                // Long strings are automatically truncated
                if s.len() > 100 {
                    self.truncate_text(s, 100)
                } else {
                    s.clone()
                }
            }
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Array(arr) => {
                if arr.is_empty() {
                    "[]".to_string()
                } else {
                    format!("[{} items]", arr.len())
                }
            }
            serde_json::Value::Object(obj) => {
                if obj.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{{} items}}", obj.len())
                }
            }
        }
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_result() -> ResultTable {
        ResultTable {
            columns: vec![
                "anchor".to_string(),
                "links".to_string(),
                "nofollow".to_string(),
            ],
            rows: vec![
                vec![json!("seo tools"), json!(12), json!(false)],
                vec![json!("read more"), json!(3), json!(null)],
            ],
        }
    }

    #[test]
    fn test_table_display_creation() {
        let display = TableDisplay::new();
        // In test environment, terminal size may be detected, so only check for value existence
        assert!(display.use_colors);

        let display = TableDisplay::new().with_max_width(80).with_colors(false);
        assert_eq!(display.max_width, Some(80));
        assert!(!display.use_colors);
    }

    #[test]
    fn test_truncate_text() {
        let display = TableDisplay::new();

        // Short text remains unchanged
        assert_eq!(display.truncate_text("Hello", 10), "Hello");

        // Long text is truncated
        assert_eq!(display.truncate_text("Hello World", 8), "Hello...");

        // Ellipsis counts toward the requested width
        assert_eq!(display.truncate_text("Hello World!", 8), "Hello...");
    }

    #[test]
    fn test_format_cell_value() {
        let display = TableDisplay::new();

        assert_eq!(display.format_cell_value(&json!(null)), "-");
        assert_eq!(display.format_cell_value(&json!("text")), "text");
        assert_eq!(display.format_cell_value(&json!(123)), "123");
        assert_eq!(display.format_cell_value(&json!(true)), "true");
        assert_eq!(display.format_cell_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(display.format_cell_value(&json!({"a": 1})), "{1 items}");
    }

    #[test]
    fn test_render_result() {
        let display = TableDisplay::new().with_max_width(120).with_colors(false);
        let result = create_test_result();

        let rendered = display.render_result(&result);
        assert!(rendered.is_ok());

        let table_str = rendered.unwrap();
        assert!(table_str.contains("anchor"));
        assert!(table_str.contains("links"));
        assert!(table_str.contains("seo tools"));
        assert!(table_str.contains("read more"));
        // Null cells render as the placeholder
        assert!(table_str.contains("-"));
    }

    #[test]
    fn test_render_result_empty() {
        let display = TableDisplay::new();
        let result = ResultTable {
            columns: vec![],
            rows: vec![],
        };

        let rendered = display.render_result(&result).unwrap();
        assert_eq!(rendered, "Report returned no results.");
    }

    #[test]
    fn test_render_report_list() {
        let display = TableDisplay::new().with_max_width(120).with_colors(false);

        let rendered = display.render_report_list(&[Report::Anchors, Report::DomainRating]);
        assert!(rendered.is_ok());

        let table_str = rendered.unwrap();
        assert!(table_str.contains("anchors"));
        assert!(table_str.contains("domain_rating"));
        // Result keys appear alongside the report names
        assert!(table_str.contains("domain"));
    }

    #[test]
    fn test_render_report_list_narrow_terminal_truncates_columns() {
        // Narrow terminal: name and key columns truncate like the description
        let narrow = TableDisplay::new().with_max_width(79).with_colors(false);
        let table_str = narrow
            .render_report_list(&[Report::RefdomainsNewLostCounters, Report::LinkedDomainsByType])
            .unwrap();

        assert!(table_str.contains("refdomains_new_lost_c..."));
        assert!(!table_str.contains("refdomains_new_lost_counters"));
        // A 22-character name still fits; only the over-long result key shrinks
        assert!(table_str.contains("linked_domains_by_type"));
        assert!(table_str.contains("linked_do..."));

        // Wide terminal: everything fits untouched
        let wide = TableDisplay::new().with_max_width(120).with_colors(false);
        let table_str = wide
            .render_report_list(&[Report::RefdomainsNewLostCounters, Report::LinkedDomainsByType])
            .unwrap();
        assert!(table_str.contains("refdomains_new_lost_counters"));
        assert!(table_str.contains("linked_domains"));
    }

    #[test]
    fn test_to_csv() {
        let display = TableDisplay::new();
        let result = ResultTable {
            columns: vec!["anchor".to_string(), "links".to_string()],
            rows: vec![
                vec![json!("plain"), json!(7)],
                vec![json!("with, comma"), json!(null)],
                vec![json!("say \"hi\""), json!(1)],
            ],
        };

        let csv = display.to_csv(&result);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "anchor,links");
        assert_eq!(lines[1], "plain,7");
        assert_eq!(lines[2], "\"with, comma\",");
        assert_eq!(lines[3], "\"say \"\"hi\"\"\",1");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(TableDisplay::csv_field("plain"), "plain");
        assert_eq!(TableDisplay::csv_field("a,b"), "\"a,b\"");
        assert_eq!(TableDisplay::csv_field("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(TableDisplay::csv_field("qu\"ote"), "\"qu\"\"ote\"");
    }
}
