//! Static landing page content.
//!
//! Copy, navigation and section order for the COCOON page. None of this is
//! state; the renderer reads it every frame.

use crate::visibility::Threshold;

/// A run of text; `accent` runs are drawn in the brand gradient color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub text: &'static str,
    pub accent: bool,
}

const fn plain(text: &'static str) -> Segment {
    Segment { text, accent: false }
}

const fn accent(text: &'static str) -> Segment {
    Segment { text, accent: true }
}

/// One line of mixed plain/accent text
pub type RichLine = &'static [Segment];

/// Page sections, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Hero,
    Achievements,
    Global,
    Programs,
    Interview,
    Cta,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Hero,
        SectionKind::Achievements,
        SectionKind::Global,
        SectionKind::Programs,
        SectionKind::Interview,
        SectionKind::Cta,
        SectionKind::Footer,
    ];

    /// In-page anchor name, for sections the navigation links to
    pub fn anchor(self) -> Option<&'static str> {
        match self {
            SectionKind::Achievements => Some("about"),
            SectionKind::Programs => Some("program"),
            SectionKind::Interview => Some("interview"),
            _ => None,
        }
    }

    /// Visibility threshold for sections with an entrance animation
    pub fn threshold(self) -> Option<Threshold> {
        match self {
            SectionKind::Hero => Some(Threshold::HERO),
            SectionKind::Achievements
            | SectionKind::Global
            | SectionKind::Programs
            | SectionKind::Interview => Some(Threshold::SECTION),
            SectionKind::Cta | SectionKind::Footer => None,
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<SectionKind> {
        Self::ALL.into_iter().find(|kind| kind.anchor() == Some(anchor))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub label: &'static str,
    /// Target anchor, without the `#`
    pub anchor: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub label: &'static str,
    pub value: u64,
    pub suffix: &'static str,
}

/// Which side of a program row holds the picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Program {
    pub title: &'static str,
    pub desc: &'static str,
    pub quote: &'static str,
    pub image_side: ImageSide,
}

#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub text: &'static str,
}

/// Brand wordmark: red half, white half
pub const BRAND: (&str, &str) = ("CO", "COON");

pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem { label: "About", anchor: "about" },
    NavItem { label: "Interview", anchor: "interview" },
    NavItem { label: "Program", anchor: "program" },
];

pub const APPLY_LABEL: &str = "지원하기";

pub const HERO_TAGLINE: &str = "충남대학교 창업동아리";
pub const HERO_TITLE: [RichLine; 2] = [&[plain("껍질을 깨고,")], &[accent("세상의 중심으로")]];
pub const HERO_BODY: [&str; 2] = [
    "도전과 실행으로 성장하는 창업 커뮤니티,",
    "코쿤에서 당신의 한계를 깨보세요.",
];
pub const HERO_BUTTON: &str = "지원하기 →";
pub const SCROLL_HINT: &str = "SCROLL";

pub const ACHIEVEMENTS_TITLE: [RichLine; 1] = [&[plain("2년간 "), accent("성과"), plain("를 공유합니다.")]];
pub const ACHIEVEMENTS_BODY: [&str; 2] = [
    "코쿤은 도전과 실행이 만나는 곳입니다.",
    "우리의 발자취가 증명하는 진짜 성장의 이야기를 만나보세요.",
];
pub const ACHIEVEMENTS: [Achievement; 3] = [
    Achievement { label: "우승 상금", value: 5000, suffix: "만원 +" },
    Achievement { label: "지원 사업", value: 40000, suffix: "만원 +" },
    Achievement { label: "연 매출", value: 35000, suffix: "만원 +" },
];

pub const GLOBAL_TITLE: [RichLine; 2] = [&[plain("코쿤의 무대는")], &[accent("세계로 확장"), plain("됩니다.")]];
pub const GLOBAL_BODY: [&str; 2] = [
    "미국 실리콘밸리, 중국 상하이, 일본 도쿄, 싱가포르...",
    "글로벌 스타트업 생태계를 직접 경험합니다.",
];
pub const GLOBAL_CITIES: [&str; 3] = ["Silicon Valley", "Shanghai", "Tokyo"];

pub const PROGRAMS_TITLE: [RichLine; 1] = [&[plain("메인 "), accent("활동")]];
pub const PROGRAMS: [Program; 3] = [
    Program {
        title: "VT 프로젝트",
        desc: "실제 시장에서 검증하는 린스타트업 방법론 기반의 창업 프로젝트입니다. 아이디어 검증부터 MVP 제작까지 전 과정을 경험합니다.",
        quote: "\"창업이 막연했는데, VT 프로젝트를 통해 실제로 고객을 만나고 피드백을 받으며 성장할 수 있었어요.\"",
        image_side: ImageSide::Right,
    },
    Program {
        title: "코쿤 박람회",
        desc: "매 학기말 진행되는 코쿤 박람회에서 한 학기 동안의 성과를 공유하고, 네트워킹을 통해 새로운 기회를 발견합니다.",
        quote: "\"박람회에서 만난 선배와의 대화가 제 창업 여정의 전환점이 되었습니다.\"",
        image_side: ImageSide::Left,
    },
    Program {
        title: "스타트업 기업 탐방",
        desc: "국내 유수 스타트업을 직접 방문하여 현장의 이야기를 듣고, 창업 생태계를 체험합니다.",
        quote: "\"실제 스타트업의 일하는 방식을 보고 느끼니 창업에 대한 두려움이 사라졌어요.\"",
        image_side: ImageSide::Right,
    },
];

pub const INTERVIEW_TITLE: [RichLine; 2] = [&[plain("우리 모두")], &[accent("학생으로 시작"), plain("했습니다.")]];
pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "김창업",
        role: "2기 출신 | 現 스타트업 대표",
        text: "코쿤에서의 2년이 저를 완전히 바꿔놓았습니다. 막연한 아이디어가 실제 사업이 되는 과정을 함께한 동료들, 아낌없이 조언해주신 선배들 덕분에 지금의 저와 회사가 있습니다.",
    },
    Testimonial {
        name: "이도전",
        role: "3기 출신 | 現 개발자",
        text: "창업 동아리라서 무조건 창업만 해야 할 것 같았는데, 코쿤은 달랐어요. 도전하는 자세와 문제를 해결하는 방법을 배웠고, 그게 지금 개발자로서의 저에게 큰 자산이 됩니다.",
    },
    Testimonial {
        name: "박성장",
        role: "4기 출신 | 現 대기업 재직",
        text: "코쿤에서 배운 것은 단순히 창업 기술이 아니라 삶을 대하는 태도였습니다. 어떤 상황에서도 포기하지 않고 길을 찾는 마인드셋, 그것이 코쿤의 진짜 가치입니다.",
    },
];

pub const CTA_TITLE: [RichLine; 2] = [&[plain("당신의 "), accent("껍질"), plain("을")], &[plain("깰 준비가 되셨나요?")]];
pub const CTA_BODY: &str = "코쿤과 함께 새로운 도전을 시작하세요.";
pub const CTA_BUTTON: &str = "지금 바로 지원하기";

pub const CONTACT_EMAIL: &str = "contact@cocoon.kr";
pub const ADDRESS: [&str; 2] = ["대전광역시 유성구 대학로 99", "충남대학교 창업보육센터"];
pub const COPYRIGHT: &str = "© 2024 Cocoon. All rights reserved.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_anchors_resolve() {
        for item in NAV_ITEMS {
            assert!(SectionKind::from_anchor(item.anchor).is_some(), "{}", item.anchor);
        }
        assert_eq!(SectionKind::from_anchor("about"), Some(SectionKind::Achievements));
        assert_eq!(SectionKind::from_anchor("nowhere"), None);
    }

    #[test]
    fn test_section_thresholds() {
        assert_eq!(SectionKind::Hero.threshold(), Some(Threshold::HERO));
        assert_eq!(SectionKind::Interview.threshold(), Some(Threshold::SECTION));
        assert_eq!(SectionKind::Footer.threshold(), None);
    }
}
