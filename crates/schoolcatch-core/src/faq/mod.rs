//! Static FAQ panels and localized UI strings.
//!
//! Panel bodies are markdown files compiled into the binary.

use serde::Serialize;

use schoolcatch_types::error::FaqError;
use schoolcatch_types::faq::{FaqTopic, Locale};

/// One FAQ panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub topic: FaqTopic,
    /// Button label, e.g. "🎓 장학금".
    pub label: &'static str,
    /// Markdown body.
    pub body: &'static str,
}

const KO_ENTRIES: [FaqEntry; 4] = [
    FaqEntry {
        topic: FaqTopic::Scholarship,
        label: "🎓 장학금",
        body: include_str!("../../content/faq/ko/scholarship.md"),
    },
    FaqEntry {
        topic: FaqTopic::CampusMap,
        label: "🗺️ 캠퍼스맵",
        body: include_str!("../../content/faq/ko/campus_map.md"),
    },
    FaqEntry {
        topic: FaqTopic::Tuition,
        label: "💰 등록금",
        body: include_str!("../../content/faq/ko/tuition.md"),
    },
    FaqEntry {
        topic: FaqTopic::ExamSchedule,
        label: "📝 시험일정",
        body: include_str!("../../content/faq/ko/exam_schedule.md"),
    },
];

const EN_ENTRIES: [FaqEntry; 4] = [
    FaqEntry {
        topic: FaqTopic::Scholarship,
        label: "🎓 Scholarships",
        body: include_str!("../../content/faq/en/scholarship.md"),
    },
    FaqEntry {
        topic: FaqTopic::CampusMap,
        label: "🗺️ Campus Map",
        body: include_str!("../../content/faq/en/campus_map.md"),
    },
    FaqEntry {
        topic: FaqTopic::Tuition,
        label: "💰 Tuition",
        body: include_str!("../../content/faq/en/tuition.md"),
    },
    FaqEntry {
        topic: FaqTopic::ExamSchedule,
        label: "📝 Exam Schedule",
        body: include_str!("../../content/faq/en/exam_schedule.md"),
    },
];

/// All panels for `locale`, in page order.
pub fn faq_entries(locale: Locale) -> &'static [FaqEntry] {
    match locale {
        Locale::Ko => &KO_ENTRIES,
        Locale::En => &EN_ENTRIES,
    }
}

/// Look up a panel by topic key (`scholarship`, `campus_map`, ...).
pub fn faq_entry(locale: Locale, key: &str) -> Result<&'static FaqEntry, FaqError> {
    let unknown = || FaqError::UnknownTopic {
        locale,
        key: key.to_string(),
    };
    let topic: FaqTopic = key.parse().map_err(|_| unknown())?;
    faq_entries(locale)
        .iter()
        .find(|entry| entry.topic == topic)
        .ok_or_else(unknown)
}

/// Localized strings of the chat surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UiText {
    pub locale: Locale,
    pub title: &'static str,
    pub caption: &'static str,
    pub placeholder: &'static str,
    pub spinner: &'static str,
    pub faq_heading: &'static str,
    pub guide_heading: &'static str,
    pub guide: [&'static str; 2],
    pub everytime_label: &'static str,
    pub everytime_url: &'static str,
    pub notices_heading: &'static str,
    pub no_notices: &'static str,
    pub login_required: &'static str,
    pub not_found: &'static str,
    pub new_conversation: &'static str,
}

const EVERYTIME_URL: &str = "https://hansung.everytime.kr/";

const KO_TEXT: UiText = UiText {
    locale: Locale::Ko,
    title: "한성대학교 챗봇",
    caption: "한성대에 관련된 모든 것을 답해드립니다!",
    placeholder: "한성대에 관련된 궁금한 내용들을 말씀해주세요!",
    spinner: "답변을 생성하는 중입니다...",
    faq_heading: "📌 자주 질문하는 정보",
    guide_heading: "사용자 안내서",
    guide: [
        "**질문을 간결하게 작성하세요**: 명확하고 짧은 질문이 더 정확한 답변을 제공합니다.",
        "**한성대 관련 정보만 제공**: 학업, 캠퍼스, 장학금 등 한성대 관련 정보에 집중되어 있습니다.",
    ],
    everytime_label: "한성대학교 에브리타임 바로가기",
    everytime_url: EVERYTIME_URL,
    notices_heading: "📌 추천 공지사항",
    no_notices: "추천 공지사항이 없습니다.",
    login_required: "로그인 후 공지사항을 확인할 수 있습니다.",
    not_found: "해당 항목에 대한 정보를 찾을 수 없습니다.",
    new_conversation: "새 대화",
};

const EN_TEXT: UiText = UiText {
    locale: Locale::En,
    title: "Hansung University Chatbot",
    caption: "Get answers to everything related to Hansung University!",
    placeholder: "Ask anything about Hansung University!",
    spinner: "Generating a response...",
    faq_heading: "📌 Frequently asked",
    guide_heading: "User guide",
    guide: [
        "**Keep questions short**: clear, concise questions get more accurate answers.",
        "**Hansung University only**: answers focus on academics, campus life and scholarships at Hansung.",
    ],
    everytime_label: "Go to Hansung University Everytime",
    everytime_url: EVERYTIME_URL,
    notices_heading: "📌 Recommended notices",
    no_notices: "No recommended notices.",
    login_required: "Log in to see notices for your department.",
    not_found: "No information found for this item.",
    new_conversation: "New conversation",
};

pub fn ui_text(locale: Locale) -> &'static UiText {
    match locale {
        Locale::Ko => &KO_TEXT,
        Locale::En => &EN_TEXT,
    }
}
