//! Console rendering for the quickstart binaries.

use std::io::Write;

use genai_quickstart_types::models::{Model, GENERATE_CONTENT_METHOD};
use genai_quickstart_types::response::GenerateContentResponse;

use crate::error::{Error, Result};
use crate::selector::capable_models;

const WIDE: usize = 70;
const NARROW: usize = 50;

fn rule(width: usize, ch: char) -> String {
    std::iter::repeat(ch).take(width).collect()
}

pub fn write_banner<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "\n{}", rule(WIDE, '='))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}\n", rule(WIDE, '='))?;
    Ok(())
}

/// 逐个打印模型及其 `generateContent` 支持情况。
pub fn write_model_listing<W: Write>(out: &mut W, models: &[Model]) -> Result<()> {
    writeln!(out, "Available models:")?;
    writeln!(out, "{}", rule(NARROW, '-'))?;
    for model in models {
        let status = if model.supports_generate_content() {
            format!("supports {GENERATE_CONTENT_METHOD}")
        } else {
            format!("no {GENERATE_CONTENT_METHOD}")
        };
        writeln!(out, "Model: {}", model.name)?;
        writeln!(out, "  Display Name: {}", model.display_name)?;
        writeln!(out, "  Status: {status}")?;
        writeln!(
            out,
            "  Methods: {}",
            model.supported_generation_methods.join(", ")
        )?;
        writeln!(out, "{}", rule(NARROW, '-'))?;
    }
    Ok(())
}

pub fn write_selection<W: Write>(out: &mut W, model: &str) -> Result<()> {
    writeln!(out, "\nUsing model: {model}\n")?;
    Ok(())
}

pub fn write_prompt<W: Write>(out: &mut W, prompt: &str) -> Result<()> {
    writeln!(out, "Sending question: {prompt}\n")?;
    Ok(())
}

/// 打印回答正文及元数据（候选数、结束原因、安全检查数）。
pub fn write_response<W: Write>(out: &mut W, response: &GenerateContentResponse) -> Result<()> {
    writeln!(out, "{}", rule(WIDE, '='))?;
    writeln!(out, "GEMINI RESPONSE:")?;
    writeln!(out, "{}", rule(WIDE, '='))?;
    writeln!(out, "{}", response.text().unwrap_or_default())?;
    writeln!(out, "{}", rule(WIDE, '='))?;

    writeln!(out, "\nResponse metadata:")?;
    writeln!(out, "   - Number of candidates: {}", response.candidates.len())?;
    let finish_reason = response
        .finish_reason()
        .map_or_else(|| "unknown".to_string(), |reason| reason.to_string());
    writeln!(out, "   - Finish reason: {finish_reason}")?;
    let checks = response
        .candidates
        .first()
        .map_or(0, |candidate| candidate.safety_ratings.len());
    writeln!(out, "   - Safety ratings: {checks} checks")?;
    if let Some(total) = response
        .usage_metadata
        .as_ref()
        .and_then(|usage| usage.total_token_count)
    {
        writeln!(out, "   - Total tokens: {total}")?;
    }
    Ok(())
}

/// check-models 的汇总：可用模型列表与计数。
pub fn write_inventory<W: Write>(out: &mut W, models: &[Model]) -> Result<()> {
    let capable = capable_models(models);
    writeln!(out, "\nModels you can use ({GENERATE_CONTENT_METHOD}):")?;
    if capable.is_empty() {
        writeln!(out, "  none")?;
    } else {
        for model in &capable {
            writeln!(out, "  {}", model.name)?;
        }
    }
    writeln!(out, "\nTotal models available: {}", models.len())?;
    writeln!(
        out,
        "Models supporting {GENERATE_CONTENT_METHOD}: {}",
        capable.len()
    )?;
    Ok(())
}

/// 打印错误；凭据缺失时附带获取与设置 API Key 的指引。
pub fn write_error<W: Write>(out: &mut W, err: &Error) -> Result<()> {
    match err {
        Error::MissingApiKey => {
            writeln!(out, "GEMINI_API_KEY (or GOOGLE_API_KEY) not found in environment!")?;
            writeln!(out, "Get your key from: https://aistudio.google.com/app/apikey")?;
            writeln!(out, "Then run: export GEMINI_API_KEY='your-key-here'")?;
        }
        Error::NoCapableModel { listed } => {
            writeln!(
                out,
                "No models support {GENERATE_CONTENT_METHOD} ({listed} listed)!"
            )?;
        }
        other => writeln!(out, "Error: {other}")?,
    }
    Ok(())
}

pub fn write_troubleshooting<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\nPossible issues:")?;
    writeln!(out, "  - Invalid API key")?;
    writeln!(out, "  - Network connectivity")?;
    writeln!(out, "  - API quota exceeded")?;
    Ok(())
}
