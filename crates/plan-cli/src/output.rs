//! Output formatting for the vgpuplan CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Compact text format
    Text,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Table
    }
}

/// Trait for types that can be formatted for output
pub trait Formattable {
    fn table_headers() -> Vec<String>;
    fn table_row(&self) -> Vec<String>;

    /// Key-value pairs for detailed single-item views
    fn key_value_pairs(&self) -> Vec<(String, String)>;
}

/// Output formatter
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format and print a single item
    pub fn print_item<T>(&self, item: &T) -> Result<()>
    where
        T: Serialize + Formattable,
    {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(item)?);
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(item)?);
            }
            OutputFormat::Table => {
                for (key, value) in item.key_value_pairs() {
                    println!("{}: {}", key.bold().cyan(), value);
                }
            }
            OutputFormat::Text => {
                for (key, value) in item.key_value_pairs() {
                    println!("{}: {}", key, value);
                }
            }
        }
        Ok(())
    }

    /// Format and print a list of items
    pub fn print_list<T>(&self, items: &[T]) -> Result<()>
    where
        T: Serialize + Formattable,
    {
        if items.is_empty() {
            match self.format {
                OutputFormat::Json | OutputFormat::Yaml => println!("[]"),
                OutputFormat::Table | OutputFormat::Text => {
                    println!("{}", "No items found".dimmed());
                }
            }
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items)?);
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(items)?);
            }
            OutputFormat::Table => {
                self.print_table(items);
            }
            OutputFormat::Text => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    for (key, value) in item.key_value_pairs() {
                        println!("{}: {}", key, value);
                    }
                }
            }
        }
        Ok(())
    }

    fn print_table<T>(&self, items: &[T])
    where
        T: Formattable,
    {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let header_cells: Vec<Cell> = T::table_headers()
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
            .collect();
        table.set_header(header_cells);

        for item in items {
            table.add_row(item.table_row());
        }

        println!("{}", table);
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let result = serde_json::json!({
                    "status": "success",
                    "message": message
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Yaml => {
                println!("status: success");
                println!("message: {}", message);
            }
            OutputFormat::Table | OutputFormat::Text => {
                println!("{} {}", "✓".green().bold(), message.green());
            }
        }
        Ok(())
    }

    /// Print an error message
    pub fn print_error(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let result = serde_json::json!({
                    "status": "error",
                    "message": message
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Yaml => {
                println!("status: error");
                println!("message: {}", message);
            }
            OutputFormat::Table | OutputFormat::Text => {
                eprintln!("{} {}", "✗".red().bold(), message.red());
            }
        }
        Ok(())
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let result = serde_json::json!({
                    "status": "warning",
                    "message": message
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Yaml => {
                println!("status: warning");
                println!("message: {}", message);
            }
            OutputFormat::Table | OutputFormat::Text => {
                eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
            }
        }
        Ok(())
    }

    /// Print an info message
    pub fn print_info(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let result = serde_json::json!({
                    "status": "info",
                    "message": message
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Yaml => {
                println!("status: info");
                println!("message: {}", message);
            }
            OutputFormat::Table | OutputFormat::Text => {
                println!("{} {}", "ℹ".blue().bold(), message.blue());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestItem {
        name: String,
        value: u32,
    }

    impl Formattable for TestItem {
        fn table_headers() -> Vec<String> {
            vec!["Name".to_string(), "Value".to_string()]
        }

        fn table_row(&self) -> Vec<String> {
            vec![self.name.clone(), self.value.to_string()]
        }

        fn key_value_pairs(&self) -> Vec<(String, String)> {
            vec![
                ("Name".to_string(), self.name.clone()),
                ("Value".to_string(), self.value.to_string()),
            ]
        }
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_formattable_trait() {
        let item = TestItem {
            name: "A40".to_string(),
            value: 48,
        };

        assert_eq!(TestItem::table_headers(), vec!["Name", "Value"]);
        assert_eq!(item.table_row(), vec!["A40", "48"]);
        assert_eq!(item.key_value_pairs().len(), 2);
    }

    #[test]
    fn test_print_list_does_not_fail() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let items = vec![TestItem {
            name: "L4".to_string(),
            value: 24,
        }];
        assert!(formatter.print_list(&items).is_ok());
        assert!(formatter.print_list::<TestItem>(&[]).is_ok());
    }
}
