//! Dish / non-dish keyword tables.
//!
//! A name is dropped when it contains a deny keyword and no allow keyword.
//! Matching is plain case-sensitive substring containment over the text as
//! extracted from the PDF.

/// Column titles and labels that mark a line as structural.
pub const HEADER_KEYWORDS: &[&str] = &[
    "음식의 분류",
    "음식군",
    "음식명",
    "No 음식명",
    "No",
    "빵, 과자류",
];

/// Suffix used on category labels ("밥류", "면류", ...).
pub const CATEGORY_SUFFIX: &str = "류";

/// Column titles that can survive cleanup as a candidate on their own.
pub const LABEL_NAMES: &[&str] = &["음식명", "음식군", "No"];

/// Categories that are not a meal on their own.
pub const DENY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "pastry",
        &[
            "도우넛", "도넛", "롤빵", "식빵", "베이글", "머핀", "케이크", "파이", "크로쌍",
            "패스트리", "비스켓", "쿠키", "크래커", "웨하스", "샌드", "샌드위치", "토스트",
            "와플", "파운드",
        ],
    ),
    (
        "snack",
        &[
            "스낵", "과자", "칩", "초코", "쵸코", "프링글", "콘칩", "콘푸로스트", "시리얼",
        ],
    ),
    (
        "dairy_dessert",
        &[
            "우유", "요구르트", "치즈", "푸딩", "커스터드", "아이스크림", "쉐이크", "빙수",
        ],
    ),
    (
        "beverage",
        &[
            "주스", "쥬스", "음료", "콜라", "사이다", "환타", "에이드", "이온음료", "코코넛수",
            "맥주", "소주", "와인", "위스키", "브랜디", "칵테일", "진", "럼", "보드카", "막걸리",
            "청주", "차", "커피", "라떼", "코코아",
        ],
    ),
    (
        "condiment",
        &[
            "장아찌", "피클", "젓", "젓갈", "소스", "드레싱", "식초", "가루", "분말", "다시다",
            "시럽",
        ],
    ),
    ("infant", &["이유식", "유아용과자"]),
    (
        "ingredient",
        &[
            "생것", "말린것", "건조칩", "통조림", "가공품", "가공식품", "사과", "바나나", "딸기",
            "오렌지", "포도", "자몽", "키위", "수박", "멜론", "망고", "블루베리", "복숭아", "배",
            "체리", "상추", "양배추", "오이", "토마토", "파프리카", "당근", "감자", "고구마",
            "버섯", "견과", "호두", "아몬드", "땅콩", "김", "미역", "다시마",
        ],
    ),
];

/// Dish-shape words; any one of these rescues a denied name.
pub const ALLOW_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "rice",
        &[
            "밥", "덮밥", "국밥", "비빔밥", "볶음밥", "라이스", "리조또", "빠에야",
        ],
    ),
    (
        "noodle",
        &[
            "면", "국수", "라면", "우동", "냉면", "파스타", "스파게티", "짜장면", "짬뽕", "쫄면",
            "칼국수", "쌀국수",
        ],
    ),
    (
        "soup",
        &["국", "탕", "찌개", "전골", "수제비", "죽", "스프"],
    ),
    (
        "cooked",
        &[
            "구이", "볶음", "조림", "튀김", "전", "부침", "찜", "수육", "샤브",
        ],
    ),
    (
        "dish",
        &[
            "불고기", "두루치기", "잡채", "떡볶이", "김밥", "초밥", "카레", "돈까스", "스테이크",
            "피자", "핫도그", "버거", "타코", "분짜", "쌈", "비빔",
        ],
    ),
];

fn contains_any(name: &str, table: &[(&str, &[&str])]) -> bool {
    table
        .iter()
        .flat_map(|(_, words)| words.iter())
        .any(|kw| name.contains(kw))
}

/// The first deny category that matches, for diagnostics.
pub fn deny_category(name: &str) -> Option<&'static str> {
    DENY_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|kw| name.contains(kw)))
        .map(|(category, _)| *category)
}

pub fn is_non_dish(name: &str) -> bool {
    contains_any(name, DENY_KEYWORDS) && !contains_any(name, ALLOW_KEYWORDS)
}
