// ==========================================
// BLS 培训管理系统 - 签到二维码载荷
// ==========================================
// 格式: {"courseId": "...", "participantId": "...", "timestamp": <epoch ms>}
// 规则: 仅当 courseId 与当前选中课程一致时接受
// ==========================================

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckInError {
    #[error("Invalid QR code payload: {0}")]
    InvalidPayload(String),

    #[error("QR code belongs to course {actual}, expected {expected}")]
    CourseMismatch { expected: String, actual: String },

    #[error("Invalid QR code timestamp: {0}")]
    InvalidTimestamp(i64),
}

impl From<serde_json::Error> for CheckInError {
    fn from(err: serde_json::Error) -> Self {
        CheckInError::InvalidPayload(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPayload {
    pub course_id: String,
    pub participant_id: String,
    pub timestamp: i64, // 毫秒
}

impl CheckInPayload {
    pub fn new(course_id: impl Into<String>, participant_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            course_id: course_id.into(),
            participant_id: participant_id.into(),
            timestamp: at.timestamp_millis(),
        }
    }

    /// 解析扫码得到的 JSON 文本
    pub fn parse(raw: &str) -> Result<Self, CheckInError> {
        let payload: CheckInPayload = serde_json::from_str(raw.trim())?;
        if payload.course_id.trim().is_empty() || payload.participant_id.trim().is_empty() {
            return Err(CheckInError::InvalidPayload(
                "courseId and participantId are required".to_string(),
            ));
        }
        Ok(payload)
    }

    pub fn to_json(&self) -> Result<String, CheckInError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn issued_at(&self) -> Result<DateTime<Utc>, CheckInError> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .ok_or(CheckInError::InvalidTimestamp(self.timestamp))
    }

    /// 校验载荷是否属于当前课程
    pub fn accept_for(&self, selected_course_id: &str) -> Result<&Self, CheckInError> {
        if self.course_id != selected_course_id {
            return Err(CheckInError::CourseMismatch {
                expected: selected_course_id.to_string(),
                actual: self.course_id.clone(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_payload() {
        let payload = CheckInPayload::parse(
            r#"{"courseId":"c-1","participantId":"p-9","timestamp":1700000000000}"#,
        )
        .unwrap();
        assert_eq!(payload.course_id, "c-1");
        assert_eq!(payload.participant_id, "p-9");
        assert_eq!(payload.issued_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_accept_only_matching_course() {
        let payload = CheckInPayload::new("c-1", "p-9", Utc::now());
        assert!(payload.accept_for("c-1").is_ok());

        let err = payload.accept_for("c-2").unwrap_err();
        assert!(matches!(err, CheckInError::CourseMismatch { .. }));
    }

    #[test]
    fn test_reject_malformed_payload() {
        assert!(CheckInPayload::parse("not json").is_err());
        assert!(CheckInPayload::parse(r#"{"courseId":"","participantId":"p","timestamp":1}"#).is_err());
    }

    #[test]
    fn test_generated_payload_parses_back() {
        let payload = CheckInPayload::new("course", "participant", Utc::now());
        let json = payload.to_json().unwrap();
        assert!(json.contains("\"courseId\""));
        assert_eq!(CheckInPayload::parse(&json).unwrap(), payload);
    }
}
