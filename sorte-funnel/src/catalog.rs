//! Fixed funnel content: roulette outcomes, styles, previews, and badges.
//!
//! Image entries are identity strings only; the core never fetches them.
use serde::Serialize;

use crate::constants::{BADGE_BONUS, BADGE_INCOME, BADGE_STYLE, BADGE_TREASURE};
use crate::state::{IncomeAmount, SlipperStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncomeOption {
    pub amount: IncomeAmount,
    pub reason: &'static str,
}

pub const INCOME_OPTIONS: [IncomeOption; 3] = [
    IncomeOption {
        amount: IncomeAmount::Reais500,
        reason: "Pagar uma conta pendente ou mimar os filhos com carinho extra",
    },
    IncomeOption {
        amount: IncomeAmount::Reais1000,
        reason: "Reformar um cantinho da casa ou investir em você mesma",
    },
    IncomeOption {
        amount: IncomeAmount::Reais3000,
        reason: "Viver disso, ser dona do seu horário e da sua liberdade!",
    },
];

pub const BONUS_OPTIONS: [&str; 4] = [
    "+20 artes grátis",
    "Acesso ao grupo VIP",
    "Dica secreta faturar R$1000",
    "Multiplicador de vendas",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleCard {
    pub style: SlipperStyle,
    pub title: &'static str,
    pub description: &'static str,
    pub thumbnail: &'static str,
}

pub const STYLE_CARDS: [StyleCard; 4] = [
    StyleCard {
        style: SlipperStyle::Religioso,
        title: "Religiosos 🙏",
        description: "Frases de fé, cruz, anjo",
        thumbnail: "https://i.postimg.cc/C50c36sv/907e5a507038ccd323f22cae49da237e.jpg",
    },
    StyleCard {
        style: SlipperStyle::Flores,
        title: "Flores e Mandalas 🌸",
        description: "Delicadas, perfeitas pro dia a dia",
        thumbnail: "https://i.postimg.cc/8P1yw95r/7ac215aa1175edcd38b193385a9ba87f.jpg",
    },
    StyleCard {
        style: SlipperStyle::Frases,
        title: "Frases e Logos 💥",
        description: "Girl Power, motivacionais",
        thumbnail: "https://i.postimg.cc/mkVy0ZDL/3dac34d2767e49cf206af11b01a30e00.jpg",
    },
    StyleCard {
        style: SlipperStyle::Festas,
        title: "Temas Festivos 🎉",
        description: "Juninos, namorados, outros",
        thumbnail: "https://i.postimg.cc/J0TjpTTS/dce3a9efb8210a608b352efcd17ab9f8.jpg",
    },
];

#[must_use]
pub fn style_card(style: SlipperStyle) -> &'static StyleCard {
    match style {
        SlipperStyle::Religioso => &STYLE_CARDS[0],
        SlipperStyle::Flores => &STYLE_CARDS[1],
        SlipperStyle::Frases => &STYLE_CARDS[2],
        SlipperStyle::Festas => &STYLE_CARDS[3],
    }
}

/// Preview gallery for a style, four images each.
#[must_use]
pub const fn preview_images(style: SlipperStyle) -> &'static [&'static str; 4] {
    match style {
        SlipperStyle::Flores => &[
            "https://i.postimg.cc/4dbJRy9N/daf02641d049e66b8c5cb77bfafc108d.jpg",
            "https://i.postimg.cc/vTYGYyr0/6b879f5ae72d04e182164db58a0d45c1.jpg",
            "https://i.postimg.cc/J7x1Ty8d/5a4f75b2ddf25532c73f83c6b42cc3c9.jpg",
            "https://i.postimg.cc/nLqxqrT6/90d1748d1356da709139d16e5149d321.jpg",
        ],
        SlipperStyle::Religioso => &[
            "https://i.postimg.cc/C50c36sv/907e5a507038ccd323f22cae49da237e.jpg",
            "https://i.postimg.cc/T1NvTDYK/f810343b9007109661d3d42b194f09e9.jpg",
            "https://i.postimg.cc/mZmsY0Ns/ef5a5e5cdf85c7cef0b5d4ed09aa1442.jpg",
            "https://i.postimg.cc/jjY0qKKX/a7dbb9009c94214b84014e8694fabfe4.jpg",
        ],
        SlipperStyle::Frases => &[
            "https://i.postimg.cc/PJx0V5zh/3dac34d2767e49cf206af11b01a30e00.jpg",
            "https://i.postimg.cc/sf6kQ5s2/5a748ff4048e9247e8861790bf98ac26.jpg",
            "https://i.postimg.cc/YqTT8k4w/095989c30a3195fe9c34df5350b57f4b.jpg",
            "https://i.postimg.cc/KzcW48WN/184ea1ab452c57498c9dc842dd4bfa94.jpg",
        ],
        SlipperStyle::Festas => &[
            "https://i.postimg.cc/NGznfYkF/89c41857e3f8be78a4003e4793ebabbc.jpg",
            "https://i.postimg.cc/t40mW5cS/7f697c3cfc43ac0d3515c5e0bc54a1ca.jpg",
            "https://i.postimg.cc/wjh4VN8D/a6fcf053014d6e62b4378c0c08318d27.jpg",
            "https://i.postimg.cc/J0TjpTTS/dce3a9efb8210a608b352efcd17ab9f8.jpg",
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeSpec {
    pub label: &'static str,
    pub level: u8,
}

/// Badges shown on the collection screen. The scratch-card badge is earned
/// but never part of this catalog.
pub const BADGE_CATALOG: [BadgeSpec; 4] = [
    BadgeSpec {
        label: BADGE_INCOME,
        level: 1,
    },
    BadgeSpec {
        label: BADGE_STYLE,
        level: 2,
    },
    BadgeSpec {
        label: BADGE_TREASURE,
        level: 3,
    },
    BadgeSpec {
        label: BADGE_BONUS,
        level: 4,
    },
];
