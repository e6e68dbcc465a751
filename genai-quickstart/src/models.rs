//! Models API surface.

use std::sync::Arc;

use genai_quickstart_types::content::Content;
use genai_quickstart_types::models::{
    GenerateContentRequest, ListModelsConfig, ListModelsResponse, Model,
};
use genai_quickstart_types::response::GenerateContentResponse;

use crate::client::ClientInner;
use crate::error::{Error, Result};
use crate::http_response::{read_json, ApiCall};

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 生成内容。模型名可带或不带 `models/` 前缀。
    ///
    /// # Errors
    /// 服务端拒绝请求时返回 [`Error::Generation`]，凭据无效时返回 [`Error::Auth`]。
    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        let url = build_model_method_url(&self.inner, &model, "generateContent")?;
        let body = GenerateContentRequest { contents };

        let request = self.inner.http.post(url).json(&body);
        let response = self.inner.send(request).await?;
        let result: GenerateContentResponse =
            read_json(response, ApiCall::GenerateContent).await?;
        tracing::debug!(
            model = %model,
            candidates = result.candidates.len(),
            "generateContent completed"
        );
        Ok(result)
    }

    /// 发送单条用户文本。
    ///
    /// # Errors
    /// 同 [`Models::generate_content`]。
    pub async fn generate_text(
        &self,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<GenerateContentResponse> {
        self.generate_content(model, vec![Content::text(prompt)]).await
    }

    /// 列出模型（单页）。
    pub async fn list(&self) -> Result<ListModelsResponse> {
        self.list_with_config(ListModelsConfig::default()).await
    }

    /// 列出模型（带分页配置）。
    pub async fn list_with_config(&self, config: ListModelsConfig) -> Result<ListModelsResponse> {
        let url = build_models_list_url(&self.inner, &config)?;
        let request = self.inner.http.get(url);
        let response = self.inner.send(request).await?;
        read_json(response, ApiCall::ListModels).await
    }

    /// 列出所有模型（自动翻页），保持服务端返回顺序。
    pub async fn all(&self) -> Result<Vec<Model>> {
        self.all_with_config(ListModelsConfig::default()).await
    }

    /// 列出所有模型（带配置，自动翻页）。
    pub async fn all_with_config(&self, mut config: ListModelsConfig) -> Result<Vec<Model>> {
        let mut models = Vec::new();
        loop {
            let response = self.list_with_config(config.clone()).await?;
            models.extend(response.models);
            match response.next_page_token {
                Some(token) if !token.is_empty() => {
                    config.page_token = Some(token);
                }
                _ => break,
            }
        }
        tracing::debug!(count = models.len(), "listed models");
        Ok(models)
    }

    /// 获取单个模型信息。
    pub async fn get(&self, model: impl Into<String>) -> Result<Model> {
        let url = build_model_get_url(&self.inner, &model.into())?;
        let request = self.inner.http.get(url);
        let response = self.inner.send(request).await?;
        read_json(response, ApiCall::GetModel).await
    }
}

/// 补全 `models/` 前缀。
#[must_use]
pub fn qualified_model_name(model: &str) -> String {
    let model = model.trim();
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

fn parse_url(url: &str) -> Result<reqwest::Url> {
    reqwest::Url::parse(url).map_err(|err| Error::InvalidConfig {
        message: format!("Invalid request URL {url}: {err}"),
    })
}

fn build_model_method_url(inner: &ClientInner, model: &str, method: &str) -> Result<String> {
    let model = qualified_model_name(model);
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    Ok(parse_url(&format!("{base}{version}/{model}:{method}"))?.to_string())
}

fn build_model_get_url(inner: &ClientInner, model: &str) -> Result<String> {
    let model = qualified_model_name(model);
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    Ok(parse_url(&format!("{base}{version}/{model}"))?.to_string())
}

fn build_models_list_url(inner: &ClientInner, config: &ListModelsConfig) -> Result<String> {
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    let mut url = parse_url(&format!("{base}{version}/models"))?;
    if config.page_size.is_some() || config.page_token.is_some() {
        let mut pairs = url.query_pairs_mut();
        if let Some(page_size) = config.page_size {
            pairs.append_pair("pageSize", &page_size.to_string());
        }
        if let Some(page_token) = &config.page_token {
            pairs.append_pair("pageToken", page_token);
        }
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_client_inner_with_base;

    #[test]
    fn test_qualified_model_name() {
        assert_eq!(
            qualified_model_name("gemini-2.5-flash"),
            "models/gemini-2.5-flash"
        );
        assert_eq!(
            qualified_model_name("models/gemini-2.5-flash"),
            "models/gemini-2.5-flash"
        );
        assert_eq!(
            qualified_model_name(" tunedModels/my-tune "),
            "tunedModels/my-tune"
        );
    }

    #[test]
    fn test_build_model_urls() {
        let inner =
            test_client_inner_with_base("https://generativelanguage.googleapis.com/", "v1beta");
        assert_eq!(
            build_model_method_url(&inner, "gemini-1.5-pro", "generateContent").unwrap(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
        assert_eq!(
            build_model_get_url(&inner, "models/gemini-1.5-pro").unwrap(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro"
        );
    }

    #[test]
    fn test_build_models_list_url_with_paging() {
        let inner = test_client_inner_with_base("https://example.com/", "v1");
        let plain = build_models_list_url(&inner, &ListModelsConfig::default()).unwrap();
        assert_eq!(plain, "https://example.com/v1/models");

        let config = ListModelsConfig {
            page_size: Some(10),
            page_token: Some("next page".to_string()),
        };
        let paged = build_models_list_url(&inner, &config).unwrap();
        assert_eq!(
            paged,
            "https://example.com/v1/models?pageSize=10&pageToken=next+page"
        );
    }

    #[test]
    fn test_invalid_base_url_is_invalid_config_on_every_path() {
        let inner = test_client_inner_with_base("not a url", "v1beta");
        assert!(matches!(
            build_model_method_url(&inner, "gemini-2.5-flash", "generateContent"),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            build_model_get_url(&inner, "gemini-2.5-flash"),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            build_models_list_url(&inner, &ListModelsConfig::default()),
            Err(Error::InvalidConfig { .. })
        ));
    }
}
