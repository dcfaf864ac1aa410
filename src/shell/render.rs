use std::{fmt::Write, ops::Range};

use crate::{
    controllers::{FormController, FormMode, ListState},
    models::{Media, MediaField, MediaId},
};

const HEADERS: [&str; 8] = [
    "ID",
    "Title",
    "Type",
    "Director",
    "Budget",
    "Location",
    "Duration",
    "Year/Time",
];

fn row(media: &Media) -> [String; 8] {
    [
        media.id.map(|id| id.to_string()).unwrap_or_default(),
        media.title.clone(),
        media.media_type.to_string(),
        media.director.clone(),
        media.budget.clone(),
        media.location.clone(),
        media.duration.clone(),
        media.year.clone(),
    ]
}

/// Renders the rows in `window` as an aligned text table
pub fn table(records: &[Media], window: Range<usize>) -> String {
    let rows: Vec<[String; 8]> = records[window].iter().map(row).collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let line = |out: &mut String, cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "| {} |", padded.join(" | "));
    };

    line(&mut out, &HEADERS.map(String::from));
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let _ = writeln!(out, "|-{}-|", rule.join("-|-"));
    for cells in &rows {
        line(&mut out, cells);
    }

    out
}

/// Table window plus a status line
pub fn list(state: &ListState, window: Range<usize>) -> String {
    let records = state.records();
    let mut out = String::new();

    if records.is_empty() && !state.is_loading() {
        out.push_str("No entries yet. Use 'add' to create one.\n");
        return out;
    }

    let shown = window.clone();
    out.push_str(&table(records, window));

    if state.is_loading() {
        out.push_str("Loading...\n");
    } else {
        let _ = writeln!(
            out,
            "rows {}-{} of {} loaded, page {} of {}{}",
            shown.start + usize::from(!shown.is_empty()),
            shown.end,
            records.len(),
            state.current_page(),
            state.total_pages(),
            if state.has_more() { " (more below)" } else { "" }
        );
    }

    out
}

pub fn form(form: &FormController) -> String {
    let mut out = String::new();
    let heading = match form.mode() {
        FormMode::Create => "Add Media",
        FormMode::Edit => "Edit Media",
    };
    let _ = writeln!(out, "== {} ==", heading);

    let width = MediaField::ALL
        .iter()
        .map(|field| field.label().len())
        .max()
        .unwrap_or_default();
    for field in MediaField::ALL {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            field.label(),
            field.get(form.draft()),
            width = width
        );
    }
    out.push_str("'set <field> <value>', then 'save' or 'cancel'\n");
    out
}

pub fn confirm(id: MediaId) -> String {
    format!(
        "== Confirm Deletion ==\nAre you sure you want to delete entry {}? ('confirm' or 'cancel')\n",
        id
    )
}
