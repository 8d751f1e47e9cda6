use std::fmt;

/// Soundex 编码，固定 4 个 ASCII 字符，如 "R163"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundexCode([u8; 4]);

impl SoundexCode {
    pub fn as_str(&self) -> &str {
        // 只会写入 ASCII 字母和数字
        std::str::from_utf8(&self.0).unwrap_or("0000")
    }

    fn contains(&self, needle: &[u8]) -> bool {
        self.0.windows(needle.len()).any(|w| w == needle)
    }
}

impl fmt::Display for SoundexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 字母对应的 Soundex 数字，0 表示元音类（会隔断相同数字），None 表示 H/W（不隔断）
fn digit(c: u8) -> Option<u8> {
    match c {
        b'B' | b'F' | b'P' | b'V' => Some(b'1'),
        b'C' | b'G' | b'J' | b'K' | b'Q' | b'S' | b'X' | b'Z' => Some(b'2'),
        b'D' | b'T' => Some(b'3'),
        b'L' => Some(b'4'),
        b'M' | b'N' => Some(b'5'),
        b'R' => Some(b'6'),
        b'H' | b'W' => None,
        _ => Some(b'0'),
    }
}

/// 计算单词的 Soundex 编码，非字母字符忽略，没有字母时为 "0000"
pub fn encode(word: &str) -> SoundexCode {
    let mut letters = word
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase());

    let mut code = [b'0'; 4];
    let Some(first) = letters.next() else {
        return SoundexCode(code);
    };
    code[0] = first;

    let mut len = 1;
    let mut last = digit(first);
    for c in letters {
        if len == code.len() {
            break;
        }
        let d = digit(c);
        match d {
            None => continue,
            Some(b'0') => {}
            Some(value) if d != last => {
                code[len] = value;
                len += 1;
            }
            Some(_) => {}
        }
        last = d;
    }
    SoundexCode(code)
}

/// 单向相似度（百分比）：x 的各段在 y 中出现的程度
fn one_way_similarity(x: &SoundexCode, y: &SoundexCode) -> u32 {
    if x == y {
        return 100;
    }
    let xs = &x.0;
    let mut points = if y.contains(&xs[1..4]) {
        3
    } else if y.contains(&xs[2..4]) || y.contains(&xs[1..3]) {
        2
    } else {
        xs[1..4].iter().filter(|d| y.contains(&[**d])).count() as u32
    };
    if xs[0] == y.0[0] {
        points += 1;
    }
    points.min(4) * 100 / 4
}

/// 两个编码的差异度，0 表示读音相同，100 表示完全不同
pub fn code_difference(a: &SoundexCode, b: &SoundexCode) -> u32 {
    let similarity = (one_way_similarity(a, b) + one_way_similarity(b, a)) / 2;
    100 - similarity
}

/// 两个单词的差异度
pub fn difference(a: &str, b: &str) -> u32 {
    code_difference(&encode(a), &encode(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_classic_soundex_examples() {
        assert_eq!(encode("Robert").as_str(), "R163");
        assert_eq!(encode("Rupert").as_str(), "R163");
        assert_eq!(encode("Tymczak").as_str(), "T522");
        assert_eq!(encode("Pfister").as_str(), "P236");
        assert_eq!(encode("Ashcraft").as_str(), "A261");
        assert_eq!(encode("lights").as_str(), "L232");
    }

    #[test]
    fn encoding_is_case_insensitive_and_pads() {
        assert_eq!(encode("the"), encode("THE"));
        assert_eq!(encode("the").as_str(), "T000");
        assert_eq!(encode("off").as_str(), "O100");
    }

    #[test]
    fn word_without_letters_encodes_as_zeros() {
        assert_eq!(encode("42").as_str(), "0000");
        assert_eq!(encode("").as_str(), "0000");
    }

    #[test]
    fn difference_of_word_with_itself_is_zero() {
        for word in ["turn", "on", "lights", "x", "123", "Ashcraft"] {
            assert_eq!(difference(word, word), 0, "{word}");
        }
    }

    #[test]
    fn homophones_have_zero_difference() {
        assert_eq!(difference("Robert", "Rupert"), 0);
    }

    #[test]
    fn difference_is_symmetric() {
        let pairs = [("on", "off"), ("lights", "lamp"), ("dim", "turn"), ("kitchen", "the")];
        for (a, b) in pairs {
            assert_eq!(difference(a, b), difference(b, a), "{a}/{b}");
        }
    }

    #[test]
    fn difference_grades_partial_similarity() {
        assert_eq!(difference("on", "off"), 25);
        assert_eq!(difference("lamp", "lights"), 75);
        assert_eq!(difference("lights", "fan"), 100);
    }
}
