use anyhow::Result;
use disease_predict::app::batch::{run_batch, run_batch_file, BatchSummary};
use disease_predict::{Disease, FeatureVector, ModelRegistry, PredictError, PredictiveModel};
use tempfile::TempDir;

/// 血糖 >= 140 判定為糖尿病
struct GlucoseRule;

impl PredictiveModel for GlucoseRule {
    fn expected_features(&self) -> usize {
        8
    }

    fn predict(&self, features: &FeatureVector) -> disease_predict::Result<i64> {
        Ok(if features.as_slice()[1] >= 140.0 { 1 } else { 0 })
    }
}

const INPUT: &str = "\
Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age
6,148,72,35,0,33.6,0.627,50
1,85,66,29,0,26.6,0.351,31
8,,64,0,0,23.3,0.672,32
1,89,66
";

#[test]
fn test_batch_reports_each_row() -> Result<()> {
    let registry = ModelRegistry::empty().with_model(Disease::Diabetes, Box::new(GlucoseRule));
    let mut output = Vec::new();

    let summary = run_batch(&registry, Disease::Diabetes, INPUT.as_bytes(), &mut output)?;

    assert_eq!(
        summary,
        BatchSummary {
            total: 4,
            positive: 1,
            negative: 1,
            failed: 2,
        }
    );

    let text = String::from_utf8(output)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "row,status,prediction,label,error");
    assert_eq!(lines[1], "1,ok,1,The person is diabetic,");
    assert_eq!(lines[2], "2,ok,0,The person is not diabetic,");
    assert!(lines[3].starts_with("3,input_validation,,,"));
    assert!(lines[3].contains("Glucose"));
    assert!(lines[4].starts_with("4,field_count,,,"));

    Ok(())
}

#[test]
fn test_batch_fails_fast_without_model() {
    let registry = ModelRegistry::empty();
    let mut output = Vec::new();

    let err = run_batch(&registry, Disease::Diabetes, INPUT.as_bytes(), &mut output).unwrap_err();

    assert!(matches!(err, PredictError::ModelUnavailable { .. }));
    assert!(output.is_empty());
}

#[test]
fn test_batch_file_writes_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_path = temp_dir.path().join("patients.csv");
    let output_path = temp_dir.path().join("results").join("diagnoses.csv");
    std::fs::write(&input_path, INPUT)?;

    let registry = ModelRegistry::empty().with_model(Disease::Diabetes, Box::new(GlucoseRule));
    let summary = run_batch_file(&registry, Disease::Diabetes, &input_path, Some(&output_path))?;

    assert_eq!(summary.total, 4);
    let written = std::fs::read_to_string(&output_path)?;
    assert!(written.contains("The person is diabetic"));

    Ok(())
}
