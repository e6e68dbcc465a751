//! The demo sequence: list models, pick one, ask one question, print the answer.

use std::io::Write;

use genai_quickstart_types::models::Model;
use genai_quickstart_types::response::GenerateContentResponse;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::report;
use crate::selector::ModelSelector;

/// 默认提问。
pub const DEFAULT_PROMPT: &str = "Explain what an AI agent is in 2-3 sentences.";

/// 一次完整运行的结果。
#[derive(Debug, Clone)]
pub struct QuickstartOutcome {
    pub model: String,
    pub response: GenerateContentResponse,
}

pub struct Quickstart {
    client: Client,
    selector: ModelSelector,
    prompt: String,
}

impl Quickstart {
    #[must_use]
    pub fn new(client: Client, selector: ModelSelector) -> Self {
        Self {
            client,
            selector,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// 从环境变量构建：API Key、可选基础 URL，以及偏好模型列表。
    ///
    /// # Errors
    /// API Key 缺失时返回 [`Error::MissingApiKey`]，此时不会发起任何网络请求。
    pub fn from_env() -> Result<Self> {
        let client = Client::from_env()?;
        Ok(Self::new(client, ModelSelector::from_env()))
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// 依次执行：列出模型 → 选择模型 → 生成 → 打印。任一步失败即返回错误，不重试。
    ///
    /// # Errors
    /// 认证、网络、无可用模型或生成失败时返回相应错误。
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<QuickstartOutcome> {
        report::write_banner(out, "Basic Gemini API Connection")?;

        writeln!(out, "Checking available models...\n")?;
        let models = self.client.models().all().await?;
        report::write_model_listing(out, &models)?;

        let model = self.selector.select(&models)?;
        report::write_selection(out, &model)?;

        report::write_prompt(out, &self.prompt)?;
        let response = self
            .client
            .models()
            .generate_text(model.as_str(), self.prompt.as_str())
            .await?;
        ensure_answered(&response)?;

        report::write_response(out, &response)?;
        writeln!(out, "\nDone.")?;
        Ok(QuickstartOutcome { model, response })
    }
}

/// 没有候选、或首个候选因内容策略被截断且无文本时，视为生成失败。
fn ensure_answered(response: &GenerateContentResponse) -> Result<()> {
    let Some(candidate) = response.candidates.first() else {
        let feedback = response.prompt_feedback.as_ref();
        let message = match (
            response.block_reason(),
            feedback.and_then(|f| f.block_reason_message.as_deref()),
        ) {
            (Some(reason), Some(detail)) => format!("prompt blocked ({reason}): {detail}"),
            (Some(reason), None) => format!("prompt blocked ({reason})"),
            (None, _) => "response contained no candidates".to_string(),
        };
        return Err(Error::Generation {
            status: None,
            message,
        });
    };

    match candidate.finish_reason {
        Some(reason) if reason.is_blocked() && response.text().is_none() => {
            let message = match candidate.finish_message.as_deref() {
                Some(detail) => format!("response blocked ({reason}): {detail}"),
                None => format!("response blocked ({reason})"),
            };
            Err(Error::Generation {
                status: None,
                message,
            })
        }
        _ => Ok(()),
    }
}

/// 列出全部模型并打印清单与汇总。
///
/// # Errors
/// 认证或网络失败时返回错误。
pub async fn check_models<W: Write>(client: &Client, out: &mut W) -> Result<Vec<Model>> {
    writeln!(out, "Fetching available models for your API key...\n")?;
    let models = client.models().all().await?;
    report::write_model_listing(out, &models)?;
    report::write_inventory(out, &models)?;
    Ok(models)
}
