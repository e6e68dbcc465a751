use http::StatusCode;
use serde::de::DeserializeOwned;

use genai_quickstart_types::http::{ApiErrorBody, ApiErrorStatus};

use crate::error::{Error, Result};

/// 出错时所处的调用，用于把状态码映射到错误类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiCall {
    ListModels,
    GetModel,
    GenerateContent,
}

/// 非 2xx 时读取响应体并转换为错误；成功时解析 JSON。
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    call: ApiCall,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let err = error_from_status(status, &body, call);
        tracing::warn!(?call, status = status.as_u16(), error = %err, "API request failed");
        return Err(err);
    }
    Ok(serde_json::from_str(&body)?)
}

pub(crate) fn error_from_status(status: StatusCode, body: &str, call: ApiCall) -> Error {
    let detail = serde_json::from_str::<ApiErrorBody>(body).ok().map(|b| b.error);
    let message = detail
        .as_ref()
        .map(|d| d.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    if is_auth_failure(status, detail.as_ref()) {
        return Error::Auth { message };
    }
    match call {
        ApiCall::GenerateContent => Error::Generation {
            status: Some(status.as_u16()),
            message,
        },
        ApiCall::ListModels | ApiCall::GetModel => Error::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

fn is_auth_failure(status: StatusCode, detail: Option<&ApiErrorStatus>) -> bool {
    match status {
        StatusCode::UNAUTHORIZED => true,
        StatusCode::FORBIDDEN => {
            // 403 也用于模型级别的权限问题，只有凭据本身无效时才归为认证错误。
            detail.map_or(true, |d| {
                d.status.as_deref() != Some("PERMISSION_DENIED")
                    || d.has_reason("API_KEY_INVALID")
                    || d.has_reason("API_KEY_SERVICE_BLOCKED")
            })
        }
        StatusCode::BAD_REQUEST => detail.is_some_and(|d| d.has_reason("API_KEY_INVALID")),
        _ => false,
    }
}
