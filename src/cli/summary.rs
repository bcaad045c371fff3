use super::ui;
use crate::core::config::AppConfig;
use crate::expenses::ExpenseService;
use crate::store::DiskExpenseStore;
use crate::summary::{DateRange, SpendingSummary, summarize};
use anyhow::Result;
use comfy_table::Cell;
use std::sync::Arc;

impl SpendingSummary {
    pub fn display_as_table(&self, range: &DateRange) -> String {
        let period = match (range.start, range.end) {
            (None, None) => "all time".to_string(),
            (start, end) => format!(
                "{} to {}",
                start.map_or("beginning".to_string(), |d| d.to_string()),
                end.map_or("today".to_string(), |d| d.to_string())
            ),
        };

        let mut output = format!(
            "Spending: {} {}\n\n",
            ui::style_text(&period, ui::StyleType::Title),
            ui::style_text(&format!("({} expenses)", self.count), ui::StyleType::Subtle)
        );

        let mut categories = ui::new_styled_table();
        categories.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell("Total"),
            ui::header_cell("Share"),
        ]);
        for entry in &self.by_category {
            categories.add_row(vec![
                Cell::new(entry.category.as_str()),
                ui::amount_cell(entry.total),
                ui::share_cell(entry.total, self.total),
            ]);
        }
        output.push_str(&categories.to_string());

        let mut months = ui::new_styled_table();
        months.set_header(vec![ui::header_cell("Month"), ui::header_cell("Total")]);
        for entry in &self.monthly {
            months.add_row(vec![Cell::new(&entry.month), ui::amount_cell(entry.total)]);
        }
        output.push_str("\n\n");
        output.push_str(&months.to_string());

        output.push_str(&format!(
            "\n\n{}: {}",
            ui::style_text("Total", ui::StyleType::TotalLabel),
            ui::style_text(&self.total.to_string(), ui::StyleType::TotalValue)
        ));

        output
    }
}

pub async fn run(config: &AppConfig, range: DateRange) -> Result<()> {
    let store = DiskExpenseStore::open(&config.default_data_path()?)?;
    let service = ExpenseService::new(Arc::new(store));

    let expenses = service.list().await?;
    let summary = summarize(&expenses, range);
    println!("{}", summary.display_as_table(&range));

    Ok(())
}
