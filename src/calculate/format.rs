//! Display helpers for places, odds and dollar amounts.

/// English ordinal for a place: 1st, 2nd, 3rd, 4th, 11th, 21st, 111th.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Dollar amount with two decimals and thousands separators: `$1,234.50`, `-$5.00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Win odds shown only against the winner.
pub fn format_win_odds(position: u32, odds: Option<f64>) -> String {
    match odds {
        Some(odds) if position == 1 => format!("${:.2}", odds),
        _ => String::new(),
    }
}

/// Place odds for the first three places. A zero dividend means no third dividend
/// was paid and shows as `NTD`.
pub fn format_place_odds(position: u32, odds: Option<f64>) -> String {
    match odds {
        Some(odds) if (1..=3).contains(&position) => {
            if odds == 0.0 {
                "NTD".to_string()
            } else {
                format!("${:.2}", odds)
            }
        }
        _ => String::new(),
    }
}
