use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::data::model::GenreChart;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Genre bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the genre bar chart in the central panel.
pub fn genre_bar_chart(ui: &mut Ui, state: &AppState) {
    let Some(chart) = &state.chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view genres  (File → Open…)");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
        if chart.counts.is_empty() {
            ui.label("No titles in this range.");
        } else {
            ui.label(format!("{} titles across {} genres", chart.total(), chart.counts.len()));
        }
    });

    let bars: Vec<Bar> = chart
        .counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let color = state
                .colors
                .as_ref()
                .map(|colors| colors.color_for(&c.genre))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, c.count as f64)
                .name(&c.genre)
                .fill(color)
                .width(0.8)
        })
        .collect();

    let labels = axis_labels(chart);

    Plot::new("genre_bar_chart")
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            label_at(&labels, mark.value)
        })
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Number of Movies"));
        });
}

fn axis_labels(chart: &GenreChart) -> Vec<String> {
    chart.counts.iter().map(|c| c.genre.clone()).collect()
}

/// Genre name for an integral grid position, blank elsewhere.
fn label_at(labels: &[String], value: f64) -> String {
    if value < 0.0 || value.fract() != 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_only_on_integral_marks() {
        let labels = vec!["Drama".to_string(), "Comedy".to_string()];
        assert_eq!(label_at(&labels, 0.0), "Drama");
        assert_eq!(label_at(&labels, 1.0), "Comedy");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, 2.0), "");
        assert_eq!(label_at(&labels, -1.0), "");
    }
}
