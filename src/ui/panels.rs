use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year range selection
// ---------------------------------------------------------------------------

/// Render the left panel with the year range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Genre Popularity by Year Range");
    ui.separator();

    let Some(bounds) = state.bounds() else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Select Year Range:");
    ui.add_space(4.0);

    let mut range = state.range;
    ui.add(
        Slider::new(&mut range.start, bounds.start..=bounds.end)
            .step_by(1.0)
            .text("From"),
    );
    ui.add(
        Slider::new(&mut range.end, bounds.start..=bounds.end)
            .step_by(1.0)
            .text("To"),
    );
    if range.start > range.end {
        ui.label(RichText::new("Start is after end: nothing to count.").weak());
    }

    ui.add_space(8.0);
    ui.strong("Jump to");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for span in state.jump_spans() {
            if ui
                .selectable_label(range == span, span.start.to_string())
                .clicked()
            {
                range = span;
            }
        }
    });

    ui.add_space(8.0);
    if ui.button("Reset to all years").clicked() {
        range = bounds;
    }

    state.set_range(range);

    if let Some(colors) = &state.colors {
        ui.separator();
        ui.label(format!("{} distinct genres", colors.len()));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.chart.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export counts…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(colors)) = (&state.table, &state.colors) {
            ui.label(format!(
                "{} rows, {} genres, years {}",
                table.len(),
                colors.len(),
                table.bounds()
            ));
        }

        if let Some(src) = &state.source {
            ui.separator();
            ui.label(RichText::new(src.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open title table")
        .add_filter("Supported files", &["tsv", "txt", "csv", "json", "parquet", "pq"])
        .add_filter("IMDb TSV", &["tsv", "txt"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path, state.config.normalize) {
            Ok(table) => state.set_dataset(table, path),
            Err(e) => {
                // keep the previous table on screen
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(chart) = &state.chart else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export genre counts")
        .set_file_name(format!("genre_counts_{}_{}.csv", state.range.start, state.range.end))
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match crate::data::export::export_counts(&path, chart) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
