use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_id(id: u8) -> HandCategory {
        match id {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
        };
        f.write_str(name)
    }
}

impl HandRank {
    /// Собрать HandRank из категории и 5 значимых рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Ранги 2..14 влезают в 4 бита; сравнение u32 = сравнение рук.
    pub fn encode(category: HandCategory, ranks: [u8; 5]) -> Self {
        let value = ranks
            .iter()
            .fold((category as u32) & 0x0F, |acc, &r| (acc << 4) | (r as u32 & 0x0F));
        HandRank(value)
    }

    pub fn category(&self) -> HandCategory {
        HandCategory::from_id(((self.0 >> 20) & 0x0F) as u8)
    }

    /// 5 значимых рангов (от старшего к младшему), как при кодировании.
    pub fn ranks(&self) -> [u8; 5] {
        let mut out = [0u8; 5];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = ((self.0 >> (16 - 4 * i as u32)) & 0x0F) as u8;
        }
        out
    }
}

pub fn hand_category(rank: HandRank) -> HandCategory {
    rank.category()
}

/// Человеческое описание руки: "Full house, K over 7", "Straight, 5 high".
pub fn describe_hand(rank: HandRank) -> String {
    let cat = rank.category();
    let r = rank.ranks();
    let name = |v: u8| Rank::from_value(v).map(|r| r.to_string()).unwrap_or_default();

    match cat {
        HandCategory::HighCard => format!("{cat}, {} high", name(r[0])),
        HandCategory::OnePair => format!("{cat} of {}s", name(r[0])),
        HandCategory::TwoPair => format!("{cat}, {}s and {}s", name(r[0]), name(r[1])),
        HandCategory::ThreeOfAKind => format!("{cat}, {}s", name(r[0])),
        HandCategory::Straight | HandCategory::StraightFlush => {
            format!("{cat}, {} high", name(r[0]))
        }
        HandCategory::Flush => format!("{cat}, {} high", name(r[0])),
        HandCategory::FullHouse => format!("{cat}, {} over {}", name(r[0]), name(r[1])),
        HandCategory::FourOfAKind => format!("{cat}, {}s", name(r[0])),
    }
}
