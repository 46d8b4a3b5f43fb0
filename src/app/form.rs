use crate::core::registry::ModelRegistry;
use crate::domain::model::{DiagnosisResult, Disease, RawInputSet};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// 一次提交的結果訊息（成功顯示標籤，失敗顯示錯誤）
pub fn render_result(result: &DiagnosisResult) -> String {
    match result {
        Ok(diagnosis) => format!("✅ {}", diagnosis.label),
        Err(e) => format!("❌ {}", e.user_friendly_message()),
    }
}

/// 互動式表單：逐欄提示輸入，填完一次就送出一次，直到 EOF 或在第一欄輸入 q
pub struct FormSession<'a, R: BufRead, W: Write> {
    registry: &'a ModelRegistry,
    disease: Disease,
    input: R,
    output: W,
}

enum Prompt {
    Value(String),
    Quit,
}

impl<'a, R: BufRead, W: Write> FormSession<'a, R, W> {
    pub fn new(registry: &'a ModelRegistry, disease: Disease, input: R, output: W) -> Self {
        Self {
            registry,
            disease,
            input,
            output,
        }
    }

    /// 回傳送出的次數
    pub fn run(&mut self) -> Result<usize> {
        writeln!(self.output, "{}", self.disease.title())?;
        writeln!(self.output, "Enter q at the first prompt to quit.")?;

        let mut submissions = 0;
        loop {
            let Some(raw) = self.read_form()? else {
                break;
            };

            let result = self.registry.diagnose(self.disease, &raw);
            if let Err(e) = &result {
                tracing::debug!("Form submission rejected: {}", e);
            }
            writeln!(self.output, "{}", render_result(&result))?;
            writeln!(self.output)?;
            submissions += 1;
        }

        self.output.flush()?;
        Ok(submissions)
    }

    fn read_form(&mut self) -> Result<Option<RawInputSet>> {
        let mut values = Vec::with_capacity(self.disease.fields().len());

        // 只有第一欄接受 q，其餘欄位的 q 照常送出驗證
        for (index, field) in self.disease.fields().iter().enumerate() {
            match self.prompt(field.label, index == 0)? {
                Some(Prompt::Value(value)) => values.push(value),
                Some(Prompt::Quit) | None => return Ok(None),
            }
        }

        Ok(Some(RawInputSet::new(values)))
    }

    fn prompt(&mut self, label: &str, allow_quit: bool) -> Result<Option<Prompt>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let value = line.trim_end_matches(['\r', '\n']);
        if allow_quit && matches!(value.trim(), "q" | "quit") {
            return Ok(Some(Prompt::Quit));
        }
        Ok(Some(Prompt::Value(value.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FeatureVector;
    use crate::domain::ports::PredictiveModel;

    struct Threshold;

    impl PredictiveModel for Threshold {
        fn expected_features(&self) -> usize {
            8
        }

        // 血糖 >= 140 判定為陽性
        fn predict(&self, features: &FeatureVector) -> Result<i64> {
            Ok(if features.as_slice()[1] >= 140.0 { 1 } else { 0 })
        }
    }

    fn registry() -> ModelRegistry {
        ModelRegistry::empty().with_model(Disease::Diabetes, Box::new(Threshold))
    }

    #[test]
    fn test_form_session_submits_until_eof() {
        let registry = registry();
        let input = "2\n150\n70\n20\n79\n25.5\n0.5\n33\n1\n100\n70\n\n79\n25.5\n0.5\n33\n";
        let mut output = Vec::new();

        let submissions = FormSession::new(&registry, Disease::Diabetes, input.as_bytes(), &mut output)
            .run()
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(submissions, 2);
        assert!(text.contains("Diabetes Prediction"));
        assert!(text.contains("Glucose Level: "));
        assert!(text.contains("✅ The person is diabetic"));
        assert!(text.contains("❌ Please enter valid numerical values for all fields."));
        assert!(text.contains("SkinThickness"));
    }

    #[test]
    fn test_form_session_quit() {
        let registry = registry();
        let mut output = Vec::new();

        let submissions = FormSession::new(&registry, Disease::Diabetes, "q\n".as_bytes(), &mut output)
            .run()
            .unwrap();

        assert_eq!(submissions, 0);
    }

    #[test]
    fn test_form_session_q_after_first_field_is_a_value() {
        let registry = registry();
        let input = "1\nq\n70\n20\n79\n25.5\n0.5\n33\nquit\n";
        let mut output = Vec::new();

        let submissions = FormSession::new(&registry, Disease::Diabetes, input.as_bytes(), &mut output)
            .run()
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(submissions, 1);
        assert!(text.contains("Enter q at the first prompt to quit."));
        assert!(text.contains("❌ Please enter valid numerical values for all fields. (invalid: Glucose)"));
    }

    #[test]
    fn test_form_session_reports_missing_model() {
        let registry = ModelRegistry::empty();
        let input = (0..13).map(|i| format!("{}\n", i)).collect::<String>();
        let mut output = Vec::new();

        FormSession::new(&registry, Disease::HeartDisease, input.as_bytes(), &mut output)
            .run()
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("❌ The heart disease model is not available"));
    }
}
