use serde::{Deserialize, Serialize};

/// Google API 错误响应体：`{"error": {...}}`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorStatus,
}

/// 错误详情。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    /// 例如 `INVALID_ARGUMENT`、`PERMISSION_DENIED`。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<serde_json::Value>,
}

impl ApiErrorStatus {
    /// details 中是否带有指定的 `reason`（如 `API_KEY_INVALID`）。
    #[must_use]
    pub fn has_reason(&self, reason: &str) -> bool {
        self.details.iter().any(|detail| {
            detail
                .get("reason")
                .and_then(serde_json::Value::as_str)
                .is_some_and(|value| value == reason)
        })
    }
}
