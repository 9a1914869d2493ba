use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, RatingRecord, UserId},
};

use super::Dataset;

/// Source of the merged ratings table
///
/// The server loads once at startup and again on an explicit reload; each
/// call produces a fresh [`Dataset`] rather than touching the current one.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Reads and parses the full row set
    async fn load(&self) -> AppResult<Dataset>;

    /// Human-readable description of where rows come from, for logging
    fn source(&self) -> String;
}

/// Loads a `.csv` or `.json` ratings file from disk
#[derive(Debug, Clone)]
pub struct FileDatasetLoader {
    path: PathBuf,
}

impl FileDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DatasetLoader for FileDatasetLoader {
    async fn load(&self) -> AppResult<Dataset> {
        let format = DatasetFormat::from_path(&self.path)?;
        let bytes = tokio::fs::read(&self.path).await?;

        let records = match format {
            DatasetFormat::Csv => parse_csv(&bytes)?,
            DatasetFormat::Json => parse_json(&bytes)?,
        };

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Dataset loaded"
        );

        Ok(Dataset::new(records))
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed set of rows, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasetLoader {
    records: Vec<RatingRecord>,
}

impl InMemoryDatasetLoader {
    pub fn new(records: Vec<RatingRecord>) -> Self {
        Self { records }
    }
}

#[async_trait::async_trait]
impl DatasetLoader for InMemoryDatasetLoader {
    async fn load(&self) -> AppResult<Dataset> {
        Ok(Dataset::new(self.records.clone()))
    }

    fn source(&self) -> String {
        format!("in-memory ({} rows)", self.records.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatasetFormat {
    Csv,
    Json,
}

impl DatasetFormat {
    fn from_path(path: &Path) -> AppResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(AppError::Dataset(format!(
                "unsupported dataset file {}: expected .csv or .json",
                path.display()
            ))),
        }
    }
}

/// A row as stored on disk, before the rating is checked
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    user_id: UserId,
    movie_id: MovieId,
    title: String,
    genres: String,
    #[serde(default)]
    rating: Option<f64>,
}

/// Drops unrated rows and rejects ratings that are not finite numbers
///
/// `line` numbers the data rows from 1 for error messages.
fn into_records<I>(rows: I) -> AppResult<Vec<RatingRecord>>
where
    I: IntoIterator<Item = AppResult<RawRecord>>,
{
    let mut records = Vec::new();
    let mut unrated = 0usize;

    for (line, row) in rows.into_iter().enumerate() {
        let raw = row?;
        let Some(rating) = raw.rating else {
            unrated += 1;
            continue;
        };
        if !rating.is_finite() {
            return Err(AppError::Dataset(format!(
                "row {}: rating {rating} for movie {} is not a finite number",
                line + 1,
                raw.movie_id
            )));
        }
        records.push(RatingRecord {
            user_id: raw.user_id,
            movie_id: raw.movie_id,
            title: raw.title,
            genres: raw.genres,
            rating,
        });
    }

    if unrated > 0 {
        tracing::debug!(unrated, "Skipped rows without a rating");
    }
    Ok(records)
}

/// Parses CSV rows with a `userId,movieId,title,genres,rating` header
///
/// Additional columns (e.g. `timestamp`) are ignored. Rows with an empty
/// rating are left out.
pub fn parse_csv(bytes: &[u8]) -> AppResult<Vec<RatingRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    into_records(
        reader
            .deserialize::<RawRecord>()
            .map(|row| row.map_err(AppError::from)),
    )
}

/// Parses a JSON array of rating records
///
/// A `null` or absent rating leaves the row out.
pub fn parse_json(bytes: &[u8]) -> AppResult<Vec<RatingRecord>> {
    let rows: Vec<RawRecord> = serde_json::from_slice(bytes)?;
    into_records(rows.into_iter().map(Ok))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
userId,movieId,rating,timestamp,title,genres
1,1,4.0,964982703,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
1,3,4.0,964981247,Grumpier Old Men (1995),Comedy|Romance
2,1,3.5,964982224,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
";

    #[test]
    fn test_parse_csv_ignores_extra_columns() {
        let records = parse_csv(CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[1],
            RatingRecord::new(1, 3, "Grumpier Old Men (1995)", "Comedy|Romance", 4.0)
        );
    }

    #[test]
    fn test_parse_csv_rejects_bad_rating() {
        let bad = "userId,movieId,title,genres,rating\n1,1,A,Comedy,five\n";
        assert!(matches!(parse_csv(bad.as_bytes()), Err(AppError::Csv(_))));
    }

    #[test]
    fn test_parse_csv_skips_empty_rating() {
        let csv = "userId,movieId,title,genres,rating\n1,1,A,Comedy,5.0\n2,2,B,Comedy,\n";
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records, vec![RatingRecord::new(1, 1, "A", "Comedy", 5.0)]);
    }

    #[test]
    fn test_parse_csv_rejects_nan_rating() {
        let csv = "userId,movieId,title,genres,rating\n1,1,A,Comedy,5.0\n2,2,B,Comedy,NaN\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_parse_csv_rejects_infinite_rating() {
        let csv = "userId,movieId,title,genres,rating\n1,1,A,Comedy,inf\n";
        assert!(matches!(parse_csv(csv.as_bytes()), Err(AppError::Dataset(_))));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[
            {"userId":7,"movieId":2,"title":"Jumanji (1995)","genres":"Adventure","rating":3.0},
            {"userId":8,"movieId":2,"title":"Jumanji (1995)","genres":"Adventure","rating":null},
            {"userId":9,"movieId":2,"title":"Jumanji (1995)","genres":"Adventure"}
        ]"#;
        let records = parse_json(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, 7);
        assert_eq!(records[0].title, "Jumanji (1995)");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("a/ratings.CSV")).unwrap(),
            DatasetFormat::Csv
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("merged.json")).unwrap(),
            DatasetFormat::Json
        );
        assert!(matches!(
            DatasetFormat::from_path(Path::new("merged_df.pkl")),
            Err(AppError::Dataset(_))
        ));
    }

    #[tokio::test]
    async fn test_file_loader_reads_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let loader = FileDatasetLoader::new(file.path());
        let dataset = loader.load().await.unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.unique_users(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_file_loader_missing_file() {
        let loader = FileDatasetLoader::new("/nonexistent/ratings.csv");
        assert!(matches!(loader.load().await, Err(AppError::Io(_))));
    }
}
