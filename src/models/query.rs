//! # 목록 조회 쿼리 파라미터
//!
//! `?page=2&limit=20&sort=likeCount&order=ASC&search=rust` 형태의 쿼리 문자열을 받습니다.
//! 정렬 컬럼은 enum → 고정 문자열로만 바뀌므로 사용자 입력이 SQL에 그대로 들어가지 않습니다.
//! 알 수 없는 `sort`/`order` 값은 역직렬화 단계에서 400으로 거절됩니다.

use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 정렬 기준 enum이 가리키는 SQL 컬럼
pub trait SortField: Copy {
    fn column(self) -> &'static str;
}

/// 페이지네이션 + 정렬 + 검색어
#[derive(Debug, Clone, Deserialize)]
#[serde(default, bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct ListQuery<S> {
    pub page: i64,
    pub limit: i64,
    pub sort: S,
    pub order: SortOrder,
    pub search: String,
}

impl<S: Default> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort: S::default(),
            order: SortOrder::Desc,
            search: String::new(),
        }
    }
}

impl<S> ListQuery<S> {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < 1 {
            return Err(AppError::bad_request("page must not be less than 1"));
        }
        if self.limit < 1 {
            return Err(AppError::bad_request("limit must not be less than 1"));
        }
        if (self.page - 1).checked_mul(self.limit).is_none() {
            return Err(AppError::bad_request("page is out of range"));
        }
        Ok(())
    }

    /// `validate()`를 통과한 쿼리에서만 의미가 있습니다.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum QuestionSort {
    #[serde(rename = "createdAt")]
    #[default]
    CreatedAt,
    #[serde(rename = "saved")]
    Saved,
}

impl SortField for QuestionSort {
    fn column(self) -> &'static str {
        match self {
            QuestionSort::CreatedAt => "q.created_at",
            QuestionSort::Saved => "q.saved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ActionSort {
    #[serde(rename = "updatedAt")]
    #[default]
    UpdatedAt,
    #[serde(rename = "likeCount")]
    LikeCount,
}

impl SortField for ActionSort {
    fn column(self) -> &'static str {
        match self {
            ActionSort::UpdatedAt => "a.updated_at",
            ActionSort::LikeCount => "a.like_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CommentSort {
    #[serde(rename = "createdAt")]
    #[default]
    CreatedAt,
}

impl SortField for CommentSort {
    fn column(self) -> &'static str {
        match self {
            CommentSort::CreatedAt => "c.created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum BookSort {
    #[serde(rename = "createdAt")]
    #[default]
    CreatedAt,
    #[serde(rename = "likeCount")]
    LikeCount,
}

impl SortField for BookSort {
    fn column(self) -> &'static str {
        match self {
            BookSort::CreatedAt => "b.created_at",
            BookSort::LikeCount => "b.like_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SectionSort {
    #[serde(rename = "subject")]
    #[default]
    Subject,
    #[serde(rename = "id")]
    Id,
}

impl SortField for SectionSort {
    fn column(self) -> &'static str {
        match self {
            SectionSort::Subject => "s.subject",
            SectionSort::Id => "s.id",
        }
    }
}

/// 섹션 목록은 페이지네이션 없이 정렬만 받습니다 (기본: subject ASC).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct SectionListQuery {
    pub sort: SectionSort,
    pub order: Option<SortOrder>,
}

impl SectionListQuery {
    pub fn order(&self) -> SortOrder {
        self.order.unwrap_or(SortOrder::Asc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<S: for<'de> Deserialize<'de> + Default>(qs: &str) -> Result<ListQuery<S>, String> {
        serde_json::from_value::<ListQuery<S>>(querystring_to_json(qs)).map_err(|e| e.to_string())
    }

    // axum `Query`와 같은 모양의 값만 쓰므로 JSON으로 흉내 냅니다.
    fn querystring_to_json(qs: &str) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for pair in qs.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap();
            let value = match value.parse::<i64>() {
                Ok(n) => serde_json::Value::from(n),
                Err(_) => serde_json::Value::from(value),
            };
            map.insert(key.to_string(), value);
        }
        serde_json::Value::Object(map)
    }

    #[test]
    fn defaults_to_first_page_of_ten_descending() {
        let query: ListQuery<ActionSort> = parse("").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.sort, ActionSort::UpdatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn computes_offset_from_page_and_limit() {
        let query: ListQuery<BookSort> = parse("page=3&limit=20&sort=likeCount&order=ASC").unwrap();
        assert_eq!(query.offset(), 40);
        assert_eq!(query.sort.column(), "b.like_count");
        assert_eq!(query.order.as_sql(), "ASC");
    }

    #[test]
    fn rejects_unknown_sort_and_non_positive_paging() {
        assert!(parse::<QuestionSort>("sort=likeCount").is_err());
        assert!(parse::<QuestionSort>("order=up").is_err());

        let query: ListQuery<QuestionSort> = parse("page=0").unwrap();
        assert!(query.validate().is_err());
        let query: ListQuery<QuestionSort> = parse("limit=0").unwrap();
        assert!(query.validate().is_err());
    }

    #[test]
    fn rejects_pages_whose_offset_overflows() {
        let query: ListQuery<BookSort> = parse(&format!("page={}&limit=2", i64::MAX)).unwrap();
        assert!(query.validate().is_err());
        assert_eq!(query.offset(), i64::MAX);

        let query: ListQuery<BookSort> = parse(&format!("page=2&limit={}", i64::MAX)).unwrap();
        assert!(query.validate().is_ok());
        assert_eq!(query.offset(), i64::MAX);
    }

    #[test]
    fn section_list_defaults_to_ascending_subject() {
        let query = SectionListQuery::default();
        assert_eq!(query.sort.column(), "s.subject");
        assert_eq!(query.order(), SortOrder::Asc);
    }
}
