//! Error Body - JSON shape of every non-2xx response
//!
//! `{"error": "...", "details": "..."}` with `details` omitted when absent.

use serde::{Deserialize, Serialize};

/// `details` に載せる文字数の上限
pub const MAX_DETAILS_CHARS: usize = 200;

/// エラーレスポンスのボディ
///
/// サーバーはこの形でシリアライズし、クライアントは同じ型でデシリアライズします。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 人が読めるメッセージ（日本語）
    pub error: String,
    /// 補足情報
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// ボディを作成（`details` は上限で切り詰める）
    pub fn new(error: impl Into<String>, details: Option<&str>) -> Self {
        Self {
            error: error.into(),
            details: details.map(truncate_details),
        }
    }
}

/// 文字単位で切り詰める
///
/// 内部メッセージが長くなりすぎてもレスポンスが肥大化しないようにします。
pub fn truncate_details(details: &str) -> String {
    match details.char_indices().nth(MAX_DETAILS_CHARS) {
        Some((idx, _)) => details[..idx].to_string(),
        None => details.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_omitted_when_none() {
        let body = ErrorBody::new("指定されたコースが見つかりません", None);
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"指定されたコースが見つかりません"}"#);
    }

    #[test]
    fn test_details_truncated_by_chars() {
        let long = "解".repeat(MAX_DETAILS_CHARS + 10);
        let body = ErrorBody::new("x", Some(&long));
        assert_eq!(body.details.unwrap().chars().count(), MAX_DETAILS_CHARS);
    }

    #[test]
    fn test_deserialize_without_details() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"ログインが必要です"}"#).unwrap();
        assert_eq!(body.error, "ログインが必要です");
        assert!(body.details.is_none());
    }
}
