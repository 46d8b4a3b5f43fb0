use anyhow::Result;
use disease_predict::{
    ConfigProvider, Disease, ModelRegistry, PredictError, PredictiveModel, RawInputSet, Settings,
    TomlConfig,
};
use tempfile::TempDir;

const HEART_MODEL: &str = r#"{
    "model_type": "logistic_regression",
    "coefficients": [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    "intercept": -1.5
}"#;

fn heart_input(cp: &str) -> RawInputSet {
    vec!["63", "1", cp, "145", "233", "1", "0", "150", "0", "2.3", "0", "0", "1"]
        .into_iter()
        .collect()
}

/// 一個模型損毀、一個不存在，不影響另一個模型
#[test]
fn test_load_is_fail_soft_per_artifact() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("heart_disease_model.json"), HEART_MODEL)?;
    std::fs::write(temp_dir.path().join("diabetes_model.json"), "{ not json")?;

    let settings = Settings::default().with_model_dir(temp_dir.path().to_str());
    let registry = ModelRegistry::load(&settings);

    assert_eq!(registry.loaded_count(), 1);
    assert!(registry.slot(Disease::HeartDisease).is_loaded());
    assert!(!registry.slot(Disease::Diabetes).is_loaded());
    assert!(!registry.slot(Disease::Parkinsons).is_loaded());

    // cp = 3 -> decision 1.5 > 0
    let diagnosis = registry.diagnose(Disease::HeartDisease, &heart_input("3"))?;
    assert_eq!(diagnosis.label, "The person has heart disease");

    let diagnosis = registry.diagnose(Disease::HeartDisease, &heart_input("0"))?;
    assert_eq!(diagnosis.label, "The person does not have heart disease");

    let diabetes: RawInputSet = vec!["2", "120", "70", "20", "79", "25.5", "0.5", "33"]
        .into_iter()
        .collect();
    match registry.diagnose(Disease::Diabetes, &diabetes) {
        Err(PredictError::ModelUnavailable { reason, .. }) => {
            assert!(reason.contains("diabetes_model.json"));
        }
        other => panic!("expected unavailable model, got {:?}", other),
    }

    let parkinsons: RawInputSet = (0..22).map(|i| i.to_string()).collect();
    assert!(matches!(
        registry.diagnose(Disease::Parkinsons, &parkinsons),
        Err(PredictError::ModelUnavailable { .. })
    ));

    Ok(())
}

#[test]
fn test_arity_mismatch_surfaces_as_invocation_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // 只有 3 個係數，但糖尿病表單有 8 個欄位
    std::fs::write(
        temp_dir.path().join("diabetes_model.json"),
        r#"{"model_type":"linear_svm","coefficients":[1.0,1.0,1.0],"intercept":0.0}"#,
    )?;

    let settings = Settings::default().with_model_dir(temp_dir.path().to_str());
    let registry = ModelRegistry::load(&settings);
    assert!(registry.slot(Disease::Diabetes).is_loaded());

    let raw: RawInputSet = vec!["2", "120", "70", "20", "79", "25.5", "0.5", "33"]
        .into_iter()
        .collect();
    let err = registry.diagnose(Disease::Diabetes, &raw).unwrap_err();

    assert!(matches!(err, PredictError::ModelInvocation { .. }));
    assert!(err.to_string().contains("expected 3 features, got 8"));

    Ok(())
}

#[test]
fn test_load_with_toml_file_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("cleveland_lr.json"), HEART_MODEL)?;

    let toml = format!(
        r#"
[models]
base_path = "{}"
heart_disease = "cleveland_lr.json"
"#,
        temp_dir.path().display().to_string().replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&toml)?;
    assert!(config.model_path(Disease::HeartDisease).ends_with("cleveland_lr.json"));

    let registry = ModelRegistry::load(&config);
    assert!(registry.slot(Disease::HeartDisease).is_loaded());
    assert_eq!(registry.loaded_count(), 1);

    Ok(())
}

#[test]
fn test_bundled_models_load() {
    let settings =
        Settings::default().with_model_dir(Some(concat!(env!("CARGO_MANIFEST_DIR"), "/models")));
    let registry = ModelRegistry::load(&settings);

    assert_eq!(registry.loaded_count(), 3);
    for disease in Disease::ALL {
        let model = registry.model(disease).unwrap();
        assert_eq!(model.expected_features(), disease.feature_count());
    }
}
