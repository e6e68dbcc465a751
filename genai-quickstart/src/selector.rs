//! Picks the model used for generation.

use genai_quickstart_types::models::Model;

use crate::error::{Error, Result};
use crate::models::qualified_model_name;

/// 默认偏好顺序。
pub const DEFAULT_PREFERRED_MODELS: [&str; 3] = [
    "models/gemini-2.5-flash",
    "models/gemini-2.0-flash",
    "models/gemini-flash-latest",
];

/// 覆盖偏好列表的环境变量（逗号分隔）。
pub const PREFERRED_MODELS_ENV: &str = "GENAI_PREFERRED_MODELS";

/// 按偏好列表挑选支持 `generateContent` 的模型；都不在时回退到第一个可用模型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelector {
    preferences: Vec<String>,
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::new(DEFAULT_PREFERRED_MODELS)
    }
}

impl ModelSelector {
    /// 使用自定义偏好列表；不带前缀的名字会补全为 `models/...`。
    pub fn new<I, S>(preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let preferences = preferences
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| qualified_model_name(&name))
            .collect();
        Self { preferences }
    }

    /// 读取 `GENAI_PREFERRED_MODELS`，为空或缺失时使用默认列表。
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(PREFERRED_MODELS_ENV) {
            Ok(value) => Self::from_list(&value),
            Err(_) => Self::default(),
        }
    }

    fn from_list(value: &str) -> Self {
        let selector = Self::new(value.split(','));
        if selector.preferences.is_empty() {
            Self::default()
        } else {
            selector
        }
    }

    #[must_use]
    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    /// 选出模型名。
    ///
    /// # Errors
    /// 没有任何模型支持 `generateContent` 时返回 [`Error::NoCapableModel`]。
    pub fn select(&self, models: &[Model]) -> Result<String> {
        let capable = capable_models(models);
        let Some(first) = capable.first() else {
            return Err(Error::NoCapableModel {
                listed: models.len(),
            });
        };

        let preferred = self.preferences.iter().find(|preferred| {
            capable
                .iter()
                .any(|model| model.name == preferred.as_str())
        });
        let chosen = preferred.map_or_else(|| first.name.clone(), Clone::clone);
        tracing::debug!(
            model = %chosen,
            capable = capable.len(),
            preferred = preferred.is_some(),
            "selected model"
        );
        Ok(chosen)
    }
}

/// 过滤出支持 `generateContent` 的模型，保持输入顺序。
#[must_use]
pub fn capable_models(models: &[Model]) -> Vec<&Model> {
    models
        .iter()
        .filter(|model| model.supports_generate_content())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generative(name: &str) -> Model {
        Model::new(name, ["generateContent", "countTokens"])
    }

    fn embedding(name: &str) -> Model {
        Model::new(name, ["embedContent"])
    }

    #[test]
    fn preferred_model_wins_over_earlier_non_preferred() {
        let models = vec![generative("models/a"), generative("models/gemini-2.0-flash")];
        let chosen = ModelSelector::default().select(&models).unwrap();
        assert_eq!(chosen, "models/gemini-2.0-flash");
    }

    #[test]
    fn highest_priority_preference_wins_regardless_of_position() {
        let models = vec![
            generative("models/gemini-flash-latest"),
            generative("models/gemini-2.0-flash"),
            generative("models/other"),
            generative("models/gemini-2.5-flash"),
        ];
        let selector = ModelSelector::default();
        assert_eq!(selector.select(&models).unwrap(), "models/gemini-2.5-flash");

        let without_top = &models[..3];
        assert_eq!(
            selector.select(without_top).unwrap(),
            "models/gemini-2.0-flash"
        );
    }

    #[test]
    fn preferred_name_without_capability_is_skipped() {
        let models = vec![
            embedding("models/gemini-2.5-flash"),
            generative("models/gemini-flash-latest"),
        ];
        let chosen = ModelSelector::default().select(&models).unwrap();
        assert_eq!(chosen, "models/gemini-flash-latest");
    }

    #[test]
    fn falls_back_to_first_capable_in_input_order() {
        let models = vec![
            embedding("models/embedding-001"),
            generative("models/zeta"),
            generative("models/alpha"),
        ];
        let chosen = ModelSelector::default().select(&models).unwrap();
        assert_eq!(chosen, "models/zeta");
    }

    #[test]
    fn empty_input_has_no_capable_model() {
        let err = ModelSelector::default().select(&[]).unwrap_err();
        assert!(matches!(err, Error::NoCapableModel { listed: 0 }));
    }

    #[test]
    fn all_incapable_input_has_no_capable_model() {
        let models = vec![embedding("models/embedding-001"), embedding("models/aqa")];
        let err = ModelSelector::default().select(&models).unwrap_err();
        assert!(matches!(err, Error::NoCapableModel { listed: 2 }));
    }

    #[test]
    fn custom_preferences_are_qualified_and_ordered() {
        let selector = ModelSelector::new(["gemini-pro", " models/gemini-2.0-flash ", ""]);
        assert_eq!(
            selector.preferences(),
            ["models/gemini-pro", "models/gemini-2.0-flash"]
        );
        let models = vec![
            generative("models/gemini-2.0-flash"),
            generative("models/gemini-pro"),
        ];
        assert_eq!(selector.select(&models).unwrap(), "models/gemini-pro");
    }

    #[test]
    fn blank_env_list_falls_back_to_defaults() {
        assert_eq!(ModelSelector::from_list(" , ,"), ModelSelector::default());
        assert_eq!(
            ModelSelector::from_list("gemini-3-flash").preferences(),
            ["models/gemini-3-flash"]
        );
    }

    #[test]
    fn capable_models_keeps_provider_order() {
        let models = vec![
            generative("models/b"),
            embedding("models/e"),
            generative("models/a"),
        ];
        let names: Vec<&str> = capable_models(&models)
            .into_iter()
            .map(|model| model.name.as_str())
            .collect();
        assert_eq!(names, ["models/b", "models/a"]);
    }
}
