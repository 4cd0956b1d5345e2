use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const GENRES: [&str; 12] = [
    "Action", "Adventure", "Animation", "Comedy", "Crime", "Documentary",
    "Drama", "Family", "Horror", "Romance", "Sci-Fi", "Western",
];

const TITLE_TYPES: [&str; 4] = ["movie", "short", "tvMovie", "tvSeries"];

/// splitmix64; deterministic so the sample is reproducible.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

struct SampleTitle {
    tconst: String,
    title_type: &'static str,
    start_year: String,
    genres: String,
}

fn sample_title(i: usize, rng: &mut SampleRng) -> SampleTitle {
    // Later decades get more titles, like the real catalogue.
    let year = 1900 + ((rng.below(125) as f64).sqrt() * 11.0) as u64;

    let start_year = match rng.below(50) {
        0 => "\\N".to_string(),
        1 => "unknown".to_string(),
        _ => year.to_string(),
    };

    let genres = match rng.below(40) {
        0 => "\\N".to_string(),
        1 => String::new(),
        2 => "Comedy, Drama".to_string(),
        _ => {
            let n = 1 + rng.below(3) as usize;
            let mut picked: Vec<&str> = Vec::with_capacity(n);
            while picked.len() < n {
                let g = GENRES[rng.below(GENRES.len() as u64) as usize];
                if !picked.contains(&g) {
                    picked.push(g);
                }
            }
            picked.sort_unstable();
            picked.join(",")
        }
    };

    SampleTitle {
        tconst: format!("tt{:07}", i + 1),
        title_type: TITLE_TYPES[rng.below(TITLE_TYPES.len() as u64) as usize],
        start_year,
        genres,
    }
}

fn main() {
    let mut rng = SampleRng(42);
    let titles: Vec<SampleTitle> = (0..5000).map(|i| sample_title(i, &mut rng)).collect();

    // ---- TSV in the IMDb title.basics layout ----
    let tsv_path = "sample.title.basics.tsv";
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_path(tsv_path)
        .expect("Failed to create TSV file");
    writer
        .write_record([
            "tconst", "titleType", "primaryTitle", "originalTitle", "isAdult",
            "startYear", "endYear", "runtimeMinutes", "genres",
        ])
        .expect("Failed to write header");
    for t in &titles {
        let name = format!("Sample \"{}\"", t.tconst);
        writer
            .write_record([
                t.tconst.as_str(), t.title_type, name.as_str(), name.as_str(), "0",
                t.start_year.as_str(), "\\N", "\\N", t.genres.as_str(),
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush TSV");

    // ---- Same rows as Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("tconst", DataType::Utf8, false),
        Field::new("startYear", DataType::Utf8, true),
        Field::new("genres", DataType::Utf8, true),
    ]));

    let nullable = |s: &str| (!s.is_empty() && s != "\\N").then(|| s.to_string());
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                titles.iter().map(|t| t.tconst.clone()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                titles.iter().map(|t| nullable(&t.start_year)).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                titles.iter().map(|t| nullable(&t.genres)).collect::<Vec<_>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "sample.title.basics.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} titles to {tsv_path} and {parquet_path}",
        titles.len()
    );
}
