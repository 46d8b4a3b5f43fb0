use crate::domain::model::{Disease, FeatureVector};
use crate::utils::error::Result;
use std::path::PathBuf;

/// 預先訓練好的二元分類器。載入後不可變，可在多個請求間共用。
pub trait PredictiveModel: Send + Sync {
    fn expected_features(&self) -> usize;

    /// Returns the predicted class. Errors with `ModelInvocation` when the
    /// vector does not fit the model.
    fn predict(&self, features: &FeatureVector) -> Result<i64>;
}

pub trait ConfigProvider: Send + Sync {
    fn model_dir(&self) -> &str;
    fn model_file(&self, disease: Disease) -> &str;
    fn bind_address(&self) -> &str;

    fn model_path(&self, disease: Disease) -> PathBuf {
        PathBuf::from(self.model_dir()).join(self.model_file(disease))
    }
}
