//! Chinese numeral conversion
//!
//! Lowercase digits 零一二三四五六七八九 with units 十百千, or the formal
//! style 零壹贰叁肆伍陆柒捌玖 with 拾佰仟. Sections of four digits are joined
//! with 万 and 亿.

/// Numeral style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralStyle {
    /// 一, 二, 三
    Lower,
    /// 壹, 贰, 叁
    Upper,
}

const LOWER_DIGITS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
const UPPER_DIGITS: [char; 10] = ['零', '壹', '贰', '叁', '肆', '伍', '陆', '柒', '捌', '玖'];
const LOWER_UNITS: [char; 3] = ['十', '百', '千'];
const UPPER_UNITS: [char; 3] = ['拾', '佰', '仟'];
const SECTION_UNITS: [&str; 5] = ["", "万", "亿", "万亿", "亿亿"];

impl NumeralStyle {
    fn digits(&self) -> &'static [char; 10] {
        match self {
            NumeralStyle::Lower => &LOWER_DIGITS,
            NumeralStyle::Upper => &UPPER_DIGITS,
        }
    }

    /// 十 / 百 / 千 for positions 1..=3
    fn unit(&self, position: usize) -> char {
        match self {
            NumeralStyle::Lower => LOWER_UNITS[position - 1],
            NumeralStyle::Upper => UPPER_UNITS[position - 1],
        }
    }

    /// Style a leading format character selects, if it is a numeral at all
    pub fn of_char(c: char) -> Option<Self> {
        if LOWER_DIGITS.contains(&c) || c == '十' {
            Some(NumeralStyle::Lower)
        } else if UPPER_DIGITS.contains(&c) || c == '拾' {
            Some(NumeralStyle::Upper)
        } else {
            None
        }
    }
}

/// Counting origin selected by a leading numeral: its digit value, or 10 for 十/拾
pub fn numeral_origin(c: char) -> Option<i64> {
    if c == '十' || c == '拾' {
        return Some(10);
    }
    let style = NumeralStyle::of_char(c)?;
    style
        .digits()
        .iter()
        .position(|&d| d == c)
        .map(|p| p as i64)
}

/// Render an integer as Chinese numerals
pub fn to_chinese(value: i64, style: NumeralStyle) -> String {
    let digits = style.digits();
    if value == 0 {
        return digits[0].to_string();
    }

    let mut out = String::new();
    if value < 0 {
        out.push('负');
    }

    let mut magnitude = value.unsigned_abs();
    let mut sections = Vec::new();
    while magnitude > 0 {
        sections.push((magnitude % 10_000) as u16);
        magnitude /= 10_000;
    }

    let mut body = String::new();
    let mut pending_zero = false;
    for (idx, &section) in sections.iter().enumerate().rev() {
        if section == 0 {
            if !body.is_empty() {
                pending_zero = true;
            }
            continue;
        }
        let leading = body.is_empty();
        if !leading && (pending_zero || section < 1000) {
            body.push(digits[0]);
        }
        body.push_str(&section_to_chinese(section, style, leading));
        body.push_str(SECTION_UNITS[idx]);
        pending_zero = false;
    }

    out.push_str(&body);
    out
}

/// Convert 1..=9999. `leading` drops the 一 of a leading 一十 (十五, not 一十五).
fn section_to_chinese(section: u16, style: NumeralStyle, leading: bool) -> String {
    let digits = style.digits();
    let mut out = String::new();
    let mut started = false;
    let mut zero = false;

    for position in (0..4).rev() {
        let digit = (section / 10u16.pow(position as u32) % 10) as usize;
        if digit == 0 {
            if started {
                zero = true;
            }
            continue;
        }
        if zero {
            out.push(digits[0]);
            zero = false;
        }
        let skip_one = leading && !started && position == 1 && digit == 1;
        if !skip_one {
            out.push(digits[digit]);
        }
        if position > 0 {
            out.push(style.unit(position));
        }
        started = true;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(n: i64) -> String {
        to_chinese(n, NumeralStyle::Lower)
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(lower(0), "零");
        assert_eq!(lower(5), "五");
        assert_eq!(lower(10), "十");
        assert_eq!(lower(11), "十一");
        assert_eq!(lower(20), "二十");
        assert_eq!(lower(21), "二十一");
        assert_eq!(lower(99), "九十九");
    }

    #[test]
    fn test_hundreds_and_thousands() {
        assert_eq!(lower(100), "一百");
        assert_eq!(lower(101), "一百零一");
        assert_eq!(lower(110), "一百一十");
        assert_eq!(lower(1001), "一千零一");
        assert_eq!(lower(1010), "一千零一十");
        assert_eq!(lower(9999), "九千九百九十九");
    }

    #[test]
    fn test_sections() {
        assert_eq!(lower(10_000), "一万");
        assert_eq!(lower(10_001), "一万零一");
        assert_eq!(lower(100_000), "十万");
        assert_eq!(lower(150_000), "十五万");
        assert_eq!(lower(1_000_000), "一百万");
        assert_eq!(lower(10_010_000), "一千零一万");
        assert_eq!(lower(100_000_000), "一亿");
        assert_eq!(lower(100_010_000), "一亿零一万");
        assert_eq!(lower(100_000_001), "一亿零一");
    }

    #[test]
    fn test_negative() {
        assert_eq!(lower(-3), "负三");
        assert_eq!(lower(-12), "负十二");
    }

    #[test]
    fn test_upper_style() {
        assert_eq!(to_chinese(1, NumeralStyle::Upper), "壹");
        assert_eq!(to_chinese(12, NumeralStyle::Upper), "拾贰");
        assert_eq!(to_chinese(25, NumeralStyle::Upper), "贰拾伍");
        assert_eq!(to_chinese(305, NumeralStyle::Upper), "叁佰零伍");
    }

    #[test]
    fn test_numeral_detection() {
        assert_eq!(NumeralStyle::of_char('一'), Some(NumeralStyle::Lower));
        assert_eq!(NumeralStyle::of_char('零'), Some(NumeralStyle::Lower));
        assert_eq!(NumeralStyle::of_char('壹'), Some(NumeralStyle::Upper));
        assert_eq!(NumeralStyle::of_char('拾'), Some(NumeralStyle::Upper));
        assert_eq!(NumeralStyle::of_char('0'), None);
        assert_eq!(numeral_origin('一'), Some(1));
        assert_eq!(numeral_origin('叁'), Some(3));
        assert_eq!(numeral_origin('十'), Some(10));
        assert_eq!(numeral_origin('a'), None);
    }
}
