use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::GenreChart;

/// Write the chart's counts to `path`. CSV (`genre,count`) or JSON by extension.
pub fn export_counts(path: &Path, chart: &GenreChart) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let written = match ext.as_str() {
        "csv" => write_csv(path, chart),
        "json" => write_json(path, chart),
        other => bail!("Unsupported export extension: .{other}"),
    };
    written.with_context(|| format!("exporting counts to {}", path.display()))?;

    log::info!(
        "Exported {} genre counts to {}",
        chart.counts.len(),
        path.display()
    );
    Ok(())
}

fn write_csv(path: &Path, chart: &GenreChart) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if chart.counts.is_empty() {
        writer.write_record(["genre", "count"])?;
    }
    for count in &chart.counts {
        writer.serialize(count)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path, chart: &GenreChart) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, chart)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{GenreCount, YearRange};

    fn chart() -> GenreChart {
        GenreChart::new(
            YearRange::new(1990, 2000),
            vec![GenreCount::new("Drama", 5), GenreCount::new("Comedy", 2)],
        )
    }

    #[test]
    fn writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.csv");
        export_counts(&path, &chart()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "genre,count\nDrama,5\nComedy,2\n");
    }

    #[test]
    fn writes_header_for_empty_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.csv");
        export_counts(&path, &GenreChart::new(YearRange::new(2050, 2060), Vec::new())).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "genre,count\n");
    }

    #[test]
    fn writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.json");
        export_counts(&path, &chart()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["title"], "Genre Popularity from 1990 to 2000");
        assert_eq!(value["y_label"], "Number of Movies");
        assert_eq!(value["counts"][0]["genre"], "Drama");
        assert_eq!(value["counts"][1]["count"], 2);
    }

    #[test]
    fn rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_counts(&dir.path().join("counts.xlsx"), &chart()).is_err());
    }
}
