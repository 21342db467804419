//! Worked question/answer pairs included ahead of the conversation to steer
//! answer style: dated facts, no "Title:"/"date:" labels, original link last.

use std::sync::LazyLock;

use schoolcatch_types::notice::FewShotExample;

static ANSWER_EXAMPLES: LazyLock<Vec<FewShotExample>> = LazyLock::new(|| {
    [
        (
            "2학기 수강신청 기간이 언제야?",
            "2024학년도 2학기 수강신청은 2024년 8월 12일(월) 10:00부터 8월 16일(금) 17:00까지 \
             학년별로 진행됩니다. 수강신청 전 장바구니 기간(8월 5일 ~ 8월 7일)에 희망 과목을 \
             미리 담아두세요. (공지일: 2024-07-29)\n\n\
             자세한 내용은 [수강신청 안내](https://www.hansung.ac.kr/hansung/8385/subview.do)에서 \
             확인하세요.",
        ),
        (
            "다음 학기 휴학 신청은 어떻게 해?",
            "25학년도 1학기 휴학 신청은 종합정보시스템에서 온라인으로 할 수 있으며, 일반휴학은 \
             개강 후 수업일수 1/4선까지 신청 가능합니다. 군휴학은 입영 통지서를 첨부해야 합니다. \
             (공지일: 2024-12-20)\n\n\
             자세한 내용은 [휴·복학 안내](https://www.hansung.ac.kr/hansung/8385/subview.do)에서 \
             확인하세요.",
        ),
        (
            "이번 방학에 계절학기 들을 수 있어?",
            "네, 겨울 계절학기가 운영됩니다. 수강신청은 2024년 11월 25일 ~ 11월 27일, 수업은 \
             12월 23일부터 2025년 1월 13일까지 진행됩니다. 학점당 수강료는 별도 공지를 \
             참고하세요. (공지일: 2024-11-15)\n\n\
             자세한 내용은 [계절학기 안내](https://www.hansung.ac.kr/hansung/8385/subview.do)에서 \
             확인하세요.",
        ),
    ]
    .into_iter()
    .map(|(input, answer)| FewShotExample {
        input: input.to_string(),
        answer: answer.to_string(),
    })
    .collect()
});

/// The built-in few-shot examples, loaded once.
pub fn answer_examples() -> &'static [FewShotExample] {
    &ANSWER_EXAMPLES
}
