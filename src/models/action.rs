use serde::{Deserialize, Serialize};

use super::Writer;

/// `actions` 행 + 작성자 닉네임(JOIN)
///
/// - `content`: 렌더링 후 새니타이즈된 HTML
/// - `raw_content`: 사용자가 작성한 원본 마크다운 (수정 화면용)
/// - `image_urls`: 본문에 포함된 S3 이미지 URL, 쉼표로 이어 붙여 저장
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Action {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub raw_content: String,
    pub image_urls: Option<String>,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub question_id: i64,
    pub writer_id: i64,
    pub writer_nickname: String,
}

impl Action {
    pub fn image_url_list(&self) -> Vec<String> {
        self.image_urls
            .as_deref()
            .map(|urls| {
                urls.split(',')
                    .filter(|url| !url.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn writer(&self) -> Writer {
        Writer {
            id: self.writer_id,
            nickname: self.writer_nickname.clone(),
        }
    }
}

/// 상세 조회 응답 (본문 HTML 포함)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub question_id: i64,
    pub writer: Writer,
}

/// 목록 응답 (본문 대신 이미지 URL 목록)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSummary {
    pub id: i64,
    pub title: String,
    pub image_urls: Vec<String>,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub question_id: i64,
    pub writer: Writer,
}

impl From<Action> for ActionDetail {
    fn from(action: Action) -> Self {
        let writer = action.writer();
        Self {
            id: action.id,
            title: action.title,
            content: action.content,
            like_count: action.like_count,
            created_at: action.created_at,
            updated_at: action.updated_at,
            question_id: action.question_id,
            writer,
        }
    }
}

impl From<Action> for ActionSummary {
    fn from(action: Action) -> Self {
        let writer = action.writer();
        let image_urls = action.image_url_list();
        Self {
            id: action.id,
            title: action.title,
            image_urls,
            like_count: action.like_count,
            created_at: action.created_at,
            updated_at: action.updated_at,
            question_id: action.question_id,
            writer,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionRequest {
    pub question_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateActionRequest {
    pub title: String,
    pub content: String,
}

/// 좋아요 토글/조회 결과 (액션과 북 공용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub liked: bool,
    pub like_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(image_urls: Option<&str>) -> Action {
        Action {
            id: 1,
            title: "t".to_string(),
            content: "<p>c</p>".to_string(),
            raw_content: "c".to_string(),
            image_urls: image_urls.map(str::to_string),
            like_count: 0,
            created_at: String::new(),
            updated_at: String::new(),
            question_id: 1,
            writer_id: 1,
            writer_nickname: "kim".to_string(),
        }
    }

    #[test]
    fn splits_stored_image_urls() {
        let urls = action(Some("https://b.s3.amazonaws.com/1.png,https://b.s3.amazonaws.com/2.png"))
            .image_url_list();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[1], "https://b.s3.amazonaws.com/2.png");

        assert!(action(None).image_url_list().is_empty());
    }

    #[test]
    fn summary_drops_content() {
        let summary = serde_json::to_value(ActionSummary::from(action(None))).unwrap();
        assert!(summary.get("content").is_none());
        assert_eq!(summary["writer"]["nickname"], "kim");
        assert!(summary["imageUrls"].as_array().unwrap().is_empty());
    }
}
