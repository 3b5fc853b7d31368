//! Display formatters
//!
//! Pure value-to-string helpers shared by the widget renderers. All money
//! formatting goes through [`usd`] so small PnL values keep their cents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Format a currency amount.
///
/// Magnitudes below 10 keep two decimal places so a $0.34 PnL does not
/// collapse to "$0"; larger magnitudes drop the fraction entirely.
pub fn usd(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let magnitude = amount.abs();
    if magnitude < Decimal::TEN {
        format!("{}${:.2}", sign, magnitude.round_dp(2))
    } else {
        format!("{}${:.0}", sign, magnitude.round_dp(0))
    }
}

/// Format a value already expressed in percent, one decimal place
pub fn percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

/// Format a probability (0 - 1) as a percentage, one decimal place
pub fn prob_pct(prob: Decimal) -> String {
    percent(prob * Decimal::ONE_HUNDRED)
}

/// Format a probability-space price in display cents (price x 100, "¢")
pub fn cents(price: Decimal) -> String {
    format!("{:.1}¢", (price * Decimal::ONE_HUNDRED).round_dp(1))
}

/// Format a countdown in seconds as m:ss; negative values clamp to 0:00
pub fn countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format a timestamp as a wall-clock label
pub fn clock(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_keeps_cents_below_ten() {
        assert_eq!(usd(dec!(0.0034)), "$0.00");
        assert_eq!(usd(dec!(0.34)), "$0.34");
        assert_eq!(usd(dec!(-3.212)), "-$3.21");
        assert_eq!(usd(dec!(9.99)), "$9.99");
    }

    #[test]
    fn test_usd_drops_fraction_at_ten_and_above() {
        assert_eq!(usd(dec!(10)), "$10");
        assert_eq!(usd(dec!(1234.56)), "$1235");
        assert_eq!(usd(dec!(-520.4)), "-$520");
    }

    #[test]
    fn test_countdown() {
        assert_eq!(countdown(125), "2:05");
        assert_eq!(countdown(0), "0:00");
        assert_eq!(countdown(-7), "0:00");
        assert_eq!(countdown(3601), "60:01");
    }

    #[test]
    fn test_cents() {
        assert_eq!(cents(dec!(0.55)), "55.0¢");
        assert_eq!(cents(dec!(0.4567)), "45.7¢");
    }

    #[test]
    fn test_prob_pct() {
        assert_eq!(prob_pct(dec!(0.61)), "61.0%");
        assert_eq!(prob_pct(dec!(0)), "0.0%");
    }

    #[test]
    fn test_clock() {
        let ts = Utc.with_ymd_and_hms(2024, 12, 1, 9, 5, 0).unwrap();
        assert_eq!(clock(ts), "09:05:00");
    }
}
