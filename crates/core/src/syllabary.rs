//! Reference charts for the two Japanese phonetic syllabaries.
//!
//! Each entry pairs a hiragana and katakana character with the romaji reading
//! shown under it in the character browser.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syllabary {
    Hiragana,
    Katakana,
}

/// One cell of the character chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kana {
    pub character: char,
    pub romaji: &'static str,
}

/// Characters per row for the basic and voiced sections of the chart.
pub const BASIC_ROW_WIDTH: usize = 5;
pub const VOICED_ROW_WIDTH: usize = 3;

// (hiragana, katakana, reading)
const BASIC: [(char, char, &str); 46] = [
    ('あ', 'ア', "a"),
    ('い', 'イ', "i"),
    ('う', 'ウ', "u"),
    ('え', 'エ', "e"),
    ('お', 'オ', "o"),
    ('か', 'カ', "Ka"),
    ('き', 'キ', "Ki"),
    ('く', 'ク', "Ku"),
    ('け', 'ケ', "Ke"),
    ('こ', 'コ', "Ko"),
    ('さ', 'サ', "Sa"),
    ('し', 'シ', "Shi"),
    ('す', 'ス', "Su"),
    ('せ', 'セ', "Se"),
    ('そ', 'ソ', "So"),
    ('た', 'タ', "Ta"),
    ('ち', 'チ', "Chi"),
    ('つ', 'ツ', "Tsu"),
    ('て', 'テ', "Te"),
    ('と', 'ト', "To"),
    ('な', 'ナ', "Na"),
    ('に', 'ニ', "Ni"),
    ('ぬ', 'ヌ', "Nu"),
    ('ね', 'ネ', "Ne"),
    ('の', 'ノ', "No"),
    ('は', 'ハ', "Ha"),
    ('ひ', 'ヒ', "Hi"),
    ('ふ', 'フ', "Fu"),
    ('へ', 'ヘ', "He"),
    ('ほ', 'ホ', "Ho"),
    ('ま', 'マ', "Ma"),
    ('み', 'ミ', "Mi"),
    ('む', 'ム', "Mu"),
    ('め', 'メ', "Me"),
    ('も', 'モ', "Mo"),
    ('や', 'ヤ', "Ya"),
    ('ゆ', 'ユ', "Yu"),
    ('よ', 'ヨ', "Yo"),
    ('ら', 'ラ', "Ra"),
    ('り', 'リ', "Ri"),
    ('る', 'ル', "Ru"),
    ('れ', 'レ', "Re"),
    ('ろ', 'ロ', "Ro"),
    ('わ', 'ワ', "Wa"),
    ('を', 'ヲ', "Wo"),
    ('ん', 'ン', "n"),
];

const VOICED: [(char, char, &str); 25] = [
    ('が', 'ガ', "Ga"),
    ('ぎ', 'ギ', "Gi"),
    ('ぐ', 'グ', "Gu"),
    ('げ', 'ゲ', "Ge"),
    ('ご', 'ゴ', "Go"),
    ('ざ', 'ザ', "Za"),
    ('じ', 'ジ', "Ji"),
    ('ず', 'ズ', "Zu"),
    ('ぜ', 'ゼ', "Ze"),
    ('ぞ', 'ゾ', "Zo"),
    ('だ', 'ダ', "Da"),
    ('ぢ', 'ヂ', "Dji"),
    ('づ', 'ヅ', "Dzu"),
    ('で', 'デ', "De"),
    ('ど', 'ド', "Do"),
    ('ば', 'バ', "Ba"),
    ('び', 'ビ', "Bi"),
    ('ぶ', 'ブ', "Bu"),
    ('べ', 'ベ', "Be"),
    ('ぼ', 'ボ', "Bo"),
    ('ぱ', 'パ', "Pa"),
    ('ぴ', 'ピ', "Pi"),
    ('ぷ', 'プ', "Pu"),
    ('ぺ', 'ペ', "Pe"),
    ('ぽ', 'ポ', "Po"),
];

impl Syllabary {
    #[must_use]
    pub fn all() -> [Syllabary; 2] {
        [Syllabary::Hiragana, Syllabary::Katakana]
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hiragana" => Some(Self::Hiragana),
            "katakana" => Some(Self::Katakana),
            _ => None,
        }
    }

    /// The 46 plain characters.
    #[must_use]
    pub fn basic(self) -> Vec<Kana> {
        self.project(&BASIC)
    }

    /// The 25 characters with dakuten or handakuten marks.
    #[must_use]
    pub fn voiced(self) -> Vec<Kana> {
        self.project(&VOICED)
    }

    /// Chart rows: basic characters five per row, then voiced characters three per row.
    #[must_use]
    pub fn rows(self) -> Vec<Vec<Kana>> {
        let basic = self.basic();
        let voiced = self.voiced();
        basic
            .chunks(BASIC_ROW_WIDTH)
            .chain(voiced.chunks(VOICED_ROW_WIDTH))
            .map(<[Kana]>::to_vec)
            .collect()
    }

    fn project(self, table: &[(char, char, &'static str)]) -> Vec<Kana> {
        table
            .iter()
            .map(|&(hira, kata, romaji)| Kana {
                character: match self {
                    Syllabary::Hiragana => hira,
                    Syllabary::Katakana => kata,
                },
                romaji,
            })
            .collect()
    }
}

impl fmt::Display for Syllabary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Syllabary::Hiragana => f.write_str("hiragana"),
            Syllabary::Katakana => f.write_str("katakana"),
        }
    }
}

/// Reading for a single kana from either syllabary.
#[must_use]
pub fn romaji(character: char) -> Option<&'static str> {
    BASIC
        .iter()
        .chain(VOICED.iter())
        .find(|(hira, kata, _)| *hira == character || *kata == character)
        .map(|(_, _, reading)| *reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_cover_both_syllabaries() {
        assert_eq!(romaji('し'), Some("Shi"));
        assert_eq!(romaji('シ'), Some("Shi"));
        assert_eq!(romaji('ぢ'), Some("Dji"));
        assert_eq!(romaji('ン'), Some("n"));
        assert_eq!(romaji('a'), None);
        assert_eq!(romaji('漢'), None);
    }

    #[test]
    fn katakana_chart_mirrors_hiragana_readings() {
        let hira = Syllabary::Hiragana.basic();
        let kata = Syllabary::Katakana.basic();
        assert_eq!(hira.len(), 46);
        assert_eq!(Syllabary::Katakana.voiced().len(), 25);
        for (h, k) in hira.iter().zip(&kata) {
            assert_eq!(h.romaji, k.romaji);
            assert_ne!(h.character, k.character);
        }
    }

    #[test]
    fn rows_use_section_widths() {
        let rows = Syllabary::Hiragana.rows();
        // 46 basic -> 10 rows (last has 1), 25 voiced -> 9 rows (last has 1)
        assert_eq!(rows.len(), 19);
        assert_eq!(rows[0].len(), 5);
        assert_eq!(rows[9].len(), 1);
        assert_eq!(rows[9][0].character, 'ん');
        assert_eq!(rows[10].len(), 3);
        assert_eq!(rows[10][0].character, 'が');
    }

    #[test]
    fn parses_names() {
        assert_eq!(Syllabary::from_name("Katakana"), Some(Syllabary::Katakana));
        assert_eq!(Syllabary::from_name("kanji"), None);
    }
}
