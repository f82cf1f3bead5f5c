//! # 마크다운 렌더링 서비스
//!
//! 액션 본문은 마크다운으로 작성되고, 저장 전에 HTML로 바뀝니다.
//!
//! 이 모듈의 함수들:
//! - `render_markdown()`: 마크다운 → HTML (GFM 테이블, 취소선, 체크리스트) → 새니타이즈
//! - `sanitize_html()`: 화이트리스트 기반으로 위험한 태그/속성 제거
//! - `extract_image_urls()`: 본문에 삽입된 S3 이미지 URL 추출
//! - `join_image_urls()`: 추출한 URL을 DB 컬럼 형식(쉼표 구분)으로 합치기

use std::sync::LazyLock;

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

static S3_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[.*?\]\((https://.*\.s3\.amazonaws\.com/.*?)\)").expect("S3 image pattern is valid")
});

/// 마크다운을 HTML로 렌더링한 뒤 새니타이즈합니다.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, parser);

    sanitize_html(&rendered)
}

/// 안전한 기본 태그 집합 + `<code class="language-xxx">` 만 남깁니다.
/// 링크에는 `rel="noopener noreferrer"`가 붙습니다.
///
/// 같은 입력에 여러 번 적용해도 결과가 같습니다 (멱등).
pub fn sanitize_html(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder.add_tag_attributes("code", &["class"]);
    builder.clean(html).to_string()
}

/// 본문에서 `![alt](https://<bucket>.s3.amazonaws.com/...)` 이미지 URL을 순서대로 뽑습니다.
pub fn extract_image_urls(markdown: &str) -> Vec<String> {
    S3_IMAGE
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|url| url.as_str().to_string())
        .collect()
}

/// 이미지가 없으면 `None` (DB에는 NULL로 저장)
pub fn join_image_urls(urls: &[String]) -> Option<String> {
    if urls.is_empty() {
        None
    } else {
        Some(urls.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_gfm_extensions() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn keeps_code_language_class() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn strips_scripts_and_event_handlers() {
        let html = render_markdown("hello <script>alert(1)</script> <img src=x onerror=alert(1)>");
        assert!(!html.contains("<script"));
        assert!(!html.contains("onerror"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn links_get_noopener() {
        let html = render_markdown("[home](https://example.com)");
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            r#"<p>hi<script>x</script><a href="https://x.com" onclick="y()">link</a></p>"#,
            r#"<pre><code class="language-js">let a = 1 &lt; 2;</code></pre>"#,
            "<div><iframe src=\"https://evil\"></iframe><b>bold</b></div>",
        ];
        for input in inputs {
            let once = sanitize_html(input);
            assert_eq!(sanitize_html(&once), once);
        }
    }

    #[test]
    fn extracts_only_s3_images_in_order() {
        let markdown = "\
![first](https://scs-images.s3.amazonaws.com/1.png)
![elsewhere](https://example.com/2.png)
text ![second](https://scs-images.s3.amazonaws.com/3.jpg)";

        assert_eq!(
            extract_image_urls(markdown),
            vec![
                "https://scs-images.s3.amazonaws.com/1.png".to_string(),
                "https://scs-images.s3.amazonaws.com/3.jpg".to_string(),
            ]
        );
        assert!(extract_image_urls("no images here").is_empty());
    }

    #[test]
    fn joins_urls_for_storage() {
        assert_eq!(join_image_urls(&[]), None);
        assert_eq!(
            join_image_urls(&["a".to_string(), "b".to_string()]),
            Some("a,b".to_string())
        );
    }
}
