//! System prompt builder for answer composition.
//!
//! Layout:
//! ```text
//! <instructions>grounding, recency, formatting and link rules</instructions>
//! <academic_term>current/next/previous semester, current break</academic_term>
//! <context>retrieved notices, or an explicit "nothing found" marker</context>
//! ```

use schoolcatch_types::notice::NoticeDocument;
use schoolcatch_types::term::AcademicTerm;

/// Marker placed in `<context>` when retrieval found nothing.
pub const NO_DOCUMENTS_MARKER: &str =
    "(관련 공지를 찾지 못했습니다. 추측하지 말고, 찾을 수 없다고 솔직하게 답변하세요.)";

pub struct SystemPromptBuilder;

impl SystemPromptBuilder {
    pub fn build(term: AcademicTerm, documents: &[NoticeDocument]) -> String {
        let sections = [
            Self::instructions(),
            format!("<academic_term>\n{}\n</academic_term>", Self::term_facts(term)),
            format!("<context>\n{}\n</context>", Self::format_context(documents)),
        ];
        sections.join("\n\n")
    }

    fn instructions() -> String {
        "<instructions>\n\
         당신은 한성대학교 학생들의 질문에 답하는 안내 챗봇입니다.\n\
         - 모든 답변은 반드시 아래 <context>에 있는 한성대 공지사항만을 근거로 작성하세요.\n\
         - 같은 주제의 공지가 여러 개라면 date 기준으로 가장 최신 공지를 우선하세요.\n\
         - 공지를 안내할 때 \"Title:\", \"date:\" 같은 표기는 빼고 내용과 날짜만 전달하세요.\n\
         - 답변에 사용한 공지의 원본 URL을 링크로 함께 제공하세요.\n\
         - 질문한 언어와 같은 언어로 답변하세요.\n\
         </instructions>"
            .to_string()
    }

    /// Relative-term facts, computed from the configured anchor term.
    pub fn term_facts(term: AcademicTerm) -> String {
        format!(
            "현재 학기는 {current}입니다. 이를 기준으로 이번 학기, 다음 학기, 이전 학기를 판단하세요.\n\
             다음 학기는 {next}, 이전 학기는 {previous}입니다.\n\
             이번 방학은 {semester}학기 종강 이후의 {vacation}입니다.",
            current = term.korean_label(),
            next = term.next().korean_label(),
            previous = term.previous().korean_label(),
            semester = term.semester.number(),
            vacation = term.current_break().korean_label(),
        )
    }

    pub fn format_context(documents: &[NoticeDocument]) -> String {
        if documents.is_empty() {
            return NO_DOCUMENTS_MARKER.to_string();
        }
        documents
            .iter()
            .map(Self::format_document)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_document(document: &NoticeDocument) -> String {
        let mut lines = vec!["<notice>".to_string()];
        if let Some(title) = &document.title {
            lines.push(format!("Title: {title}"));
        }
        if let Some(date) = &document.date {
            lines.push(format!("date: {date}"));
        }
        if let Some(source) = &document.source {
            lines.push(format!("source: {source}"));
        }
        lines.push(document.content.trim().to_string());
        lines.push("</notice>".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::tuition_notice;
    use schoolcatch_types::term::Semester;

    #[test]
    fn test_term_facts_for_second_semester() {
        let facts = SystemPromptBuilder::term_facts(AcademicTerm::new(2024, Semester::Second));
        assert!(facts.contains("현재 학기는 24학년도 2학기"));
        assert!(facts.contains("다음 학기는 25학년도 1학기"));
        assert!(facts.contains("이전 학기는 24학년도 1학기"));
        assert!(facts.contains("2학기 종강 이후의 겨울 방학"));
    }

    #[test]
    fn test_term_facts_for_first_semester() {
        let facts = SystemPromptBuilder::term_facts(AcademicTerm::new(2025, Semester::First));
        assert!(facts.contains("다음 학기는 25학년도 2학기"));
        assert!(facts.contains("이전 학기는 24학년도 2학기"));
        assert!(facts.contains("여름 방학"));
    }

    #[test]
    fn test_build_includes_documents_and_source() {
        let prompt = SystemPromptBuilder::build(AcademicTerm::default(), &[tuition_notice()]);
        assert!(prompt.starts_with("<instructions>"));
        assert!(prompt.contains("<academic_term>"));
        assert!(prompt.contains("8월 23일"));
        assert!(prompt.contains("source: https://www.hansung.ac.kr/"));
        assert!(!prompt.contains(NO_DOCUMENTS_MARKER));
    }

    #[test]
    fn test_build_marks_empty_context() {
        let prompt = SystemPromptBuilder::build(AcademicTerm::default(), &[]);
        assert!(prompt.contains(NO_DOCUMENTS_MARKER));
    }
}
