//! Утилиты форматирования чисел для карточек и рекомендаций

/// Вставляет разделитель тысяч (запятую) в целую часть числа
fn group_thousands(integer_part: &str) -> String {
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Форматирует число с разделителем тысяч и указанным количеством знаков после точки
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", value, prec = decimals);
    match formatted.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_thousands(integer), fraction),
        None => group_thousands(&formatted),
    }
}

/// Денежное значение в целых долларах: `$137,900`
pub fn format_money(value: f64) -> String {
    let rounded = format_number(value.abs(), 0);
    if value < 0.0 && rounded != "0" {
        format!("-${}", rounded)
    } else {
        format!("${}", rounded)
    }
}

/// Компактная запись в тысячах: `$137.9K`
pub fn format_thousands(value: f64, decimals: usize) -> String {
    format!("${:.prec$}K", value / 1000.0, prec = decimals)
}

/// Процент с одним знаком: `12.5%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Процент со знаком для роста: `+12.5%` / `-3.0%`; ноль без знака
pub fn format_signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.567, 0), "1,235");
        assert_eq!(format_number(1234.567, 2), "1,234.57");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(-1234567.0, 0), "-1,234,567");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(137900.0), "$137,900");
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(-2500.4), "-$2,500");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(137900.0, 1), "$137.9K");
        assert_eq!(format_thousands(567480.0, 0), "$567K");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(23.456), "23.5%");
        assert_eq!(format_signed_percent(23.456), "+23.5%");
        assert_eq!(format_signed_percent(-3.0), "-3.0%");
        assert_eq!(format_signed_percent(0.0), "0.0%");
    }
}
