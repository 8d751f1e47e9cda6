use crate::phonetic;

/// 两条指令短语之间的距离
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandDistance {
    /// 逐词 Soundex 差异的平均值，越小越相似
    Scored(u32),
    /// 词数不同，或任一短语为空，无法逐词比较
    Incomparable,
}

impl CommandDistance {
    pub fn score(&self) -> Option<u32> {
        match self {
            CommandDistance::Scored(value) => Some(*value),
            CommandDistance::Incomparable => None,
        }
    }

    /// 旧接口的数值表示：无法比较时为 0
    pub fn legacy_value(&self) -> u32 {
        self.score().unwrap_or(0)
    }
}

/// 计算别名与指令的距离（按空白分词后逐位置比较）
pub fn command_distance(alias: &str, command: &str) -> CommandDistance {
    let alias_words: Vec<&str> = alias.split_whitespace().collect();
    let command_words: Vec<&str> = command.split_whitespace().collect();

    if alias_words.len() != command_words.len() || alias_words.is_empty() {
        return CommandDistance::Incomparable;
    }

    let sum: u32 = alias_words
        .iter()
        .zip(&command_words)
        .map(|(a, c)| phonetic::difference(a, c))
        .sum();
    let distance = sum / alias_words.len() as u32;
    log::debug!("'{alias}' 与 '{command}' 的距离: {distance}");
    CommandDistance::Scored(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unequal_word_counts_are_incomparable() {
        let cases = [
            ("turn on the lights", "turn on"),
            ("lights", "turn on the lights"),
            ("a b c", "a b c d"),
        ];
        for (alias, command) in cases {
            let d = command_distance(alias, command);
            assert_eq!(d, CommandDistance::Incomparable);
            assert_eq!(d.legacy_value(), 0);
        }
    }

    #[test]
    fn phrase_against_itself_scores_zero() {
        for phrase in ["turn on the lights", "play", "open the garage door"] {
            assert_eq!(command_distance(phrase, phrase), CommandDistance::Scored(0));
        }
    }

    #[test]
    fn empty_phrases_never_reach_division() {
        assert_eq!(command_distance("", ""), CommandDistance::Incomparable);
        assert_eq!(command_distance("   ", "\t"), CommandDistance::Incomparable);
        assert_eq!(command_distance("", "lights"), CommandDistance::Incomparable);
    }

    #[test]
    fn whitespace_runs_do_not_change_word_alignment() {
        assert_eq!(
            command_distance("turn  on\tthe lights", " turn on the lights "),
            CommandDistance::Scored(0)
        );
    }

    #[test]
    fn averages_word_differences_with_truncation() {
        // on/off 差 25，其余为 0：25 / 4 = 6
        assert_eq!(
            command_distance("turn on the lights", "turn off the lights"),
            CommandDistance::Scored(6)
        );
        // 50 + 50 + 100 + 75 = 275，275 / 4 = 68
        assert_eq!(
            command_distance("dim the kitchen lamp", "turn off the lights"),
            CommandDistance::Scored(68)
        );
    }

    #[test]
    fn sound_alike_words_score_zero() {
        assert_eq!(command_distance("call Robert", "call Rupert"), CommandDistance::Scored(0));
    }
}
