use crate::core::registry::ModelRegistry;
use crate::domain::model::{Disease, RawInputSet};
use crate::utils::error::{PredictError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// 輸出 CSV 的一列
#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub row: usize,
    pub status: &'static str,
    pub prediction: Option<i64>,
    pub label: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub failed: usize,
}

/// 每一列 CSV（第一列為標題）當作一次表單提交，結果寫到 writer。
///
/// A missing model fails the whole batch up front; bad rows are reported in
/// the output and do not stop the run.
pub fn run_batch<R: Read, W: Write>(
    registry: &ModelRegistry,
    disease: Disease,
    reader: R,
    writer: W,
) -> Result<BatchSummary> {
    if let Some(reason) = unavailable_reason(registry, disease) {
        return Err(PredictError::ModelUnavailable { disease, reason });
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut summary = BatchSummary::default();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let raw: RawInputSet = record.iter().collect();
        let row = index + 1;

        let output = match registry.diagnose(disease, &raw) {
            Ok(diagnosis) => {
                if diagnosis.positive {
                    summary.positive += 1;
                } else {
                    summary.negative += 1;
                }
                BatchRow {
                    row,
                    status: "ok",
                    prediction: Some(diagnosis.prediction),
                    label: Some(diagnosis.label),
                    error: None,
                }
            }
            Err(e) => {
                tracing::debug!("Row {} rejected: {}", row, e);
                summary.failed += 1;
                BatchRow {
                    row,
                    status: e.kind(),
                    prediction: None,
                    label: None,
                    error: Some(e.user_friendly_message()),
                }
            }
        };

        csv_writer.serialize(output)?;
        summary.total += 1;
    }

    csv_writer.flush()?;

    tracing::info!(
        "📊 {} batch: {} rows, {} positive, {} negative, {} failed",
        disease,
        summary.total,
        summary.positive,
        summary.negative,
        summary.failed
    );

    Ok(summary)
}

/// 從檔案讀取，輸出到檔案或 stdout
pub fn run_batch_file(
    registry: &ModelRegistry,
    disease: Disease,
    input: &Path,
    output: Option<&Path>,
) -> Result<BatchSummary> {
    let reader = File::open(input)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let writer = File::create(path)?;
            run_batch(registry, disease, reader, writer)
        }
        None => run_batch(registry, disease, reader, std::io::stdout().lock()),
    }
}

fn unavailable_reason(registry: &ModelRegistry, disease: Disease) -> Option<String> {
    registry
        .status()
        .into_iter()
        .find(|status| status.disease == disease)
        .and_then(|status| status.reason)
}
