//! Output formatting helpers for CLI commands

use crate::combobox::{ComboboxView, ListState};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;

/// Outcome of a `select` key script
#[derive(Debug, Clone, Serialize)]
pub struct SelectReport {
    pub value: String,
    pub list: ListState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<String>,
    pub view: ComboboxView,
}

fn yes_no(flag: bool) -> String {
    if flag {
        "true".green().to_string()
    } else {
        "false".dimmed().to_string()
    }
}

fn list_state_label(state: ListState) -> String {
    match state {
        ListState::Closed => "closed".to_string(),
        ListState::OpenNoHighlight => "open".cyan().to_string(),
        ListState::OpenHighlighted(index) => format!("open, option {} highlighted", index)
            .cyan()
            .to_string(),
    }
}

/// Format a select report as two tables: input attributes, then the option list
pub fn format_select_table(report: &SelectReport) -> String {
    let input = &report.view.input;

    let mut attributes = Table::new();
    attributes.load_preset(UTF8_FULL);
    attributes.set_content_arrangement(ContentArrangement::Dynamic);
    attributes.set_header(vec!["Attribute", "Value"]);
    attributes.add_row(vec![Cell::new("value"), Cell::new(&report.value)]);
    attributes.add_row(vec![Cell::new("list"), Cell::new(list_state_label(report.list))]);
    attributes.add_row(vec![Cell::new("aria-expanded"), Cell::new(yes_no(input.expanded))]);
    attributes.add_row(vec![Cell::new("aria-controls"), Cell::new(&input.controls)]);
    attributes.add_row(vec![
        Cell::new("aria-activedescendant"),
        Cell::new(input.active_descendant.as_deref().unwrap_or("-")),
    ]);
    attributes.add_row(vec![Cell::new("aria-invalid"), Cell::new(yes_no(input.invalid))]);
    attributes.add_row(vec![Cell::new("visual focus"), Cell::new(yes_no(input.visual_focus))]);
    if let Some(ref error) = report.view.error {
        attributes.add_row(vec![Cell::new("error"), Cell::new(error.red().to_string())]);
    }

    let mut output = attributes.to_string();

    if report.view.listbox.visible {
        let mut options = Table::new();
        options.load_preset(UTF8_FULL);
        options.set_content_arrangement(ContentArrangement::Dynamic);
        options.set_header(vec!["", "Id", report.view.listbox.label.as_str()]);
        for option in &report.view.listbox.options {
            let (marker, text) = if option.selected {
                ("▶".yellow().to_string(), option.text.bold().to_string())
            } else {
                (String::new(), option.text.clone())
            };
            options.add_row(vec![Cell::new(marker), Cell::new(&option.id), Cell::new(text)]);
        }
        output.push('\n');
        output.push_str(&options.to_string());
    }

    output
}

/// Format a select report as JSON
pub fn format_select_json(report: &SelectReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
