//! Display formatting helpers for auction data: currency, dates, profit and
//! bidder numbers.

/// "12.50 €" style currency formatting.
pub fn format_currency(value: f64) -> String {
    format!("{:.2} €", value)
}

/// Keep the date portion of an ISO-ish datetime string.
pub fn format_date(date: &str) -> String {
    date.split('T').next().unwrap_or("").to_string()
}

/// Signed profit between starting and final price ("+5.00 €" / "-5.00 €").
pub fn format_profit(starting_price: f64, final_price: f64) -> String {
    let profit = final_price - starting_price;
    if profit >= 0.0 {
        format!("+{}", format_currency(profit))
    } else {
        format_currency(profit)
    }
}

/// Auction-scoped bidder number, zero-padded to three digits.
pub fn format_bidder_number(number: i32) -> String {
    format!("{:03}", number)
}

/// Human-readable sale state of a lot.
pub fn lot_status(sold_to: Option<i32>) -> &'static str {
    if sold_to.is_some() { "Sold" } else { "Available" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_has_two_decimals_and_symbol() {
        assert_eq!(format_currency(0.0), "0.00 €");
        assert_eq!(format_currency(12.5), "12.50 €");
    }

    #[test]
    fn date_keeps_only_the_date_portion() {
        assert_eq!(format_date("2025-06-01T14:30:00Z"), "2025-06-01");
        assert_eq!(format_date("2025-06-01"), "2025-06-01");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn profit_is_signed() {
        assert_eq!(format_profit(10.0, 15.0), "+5.00 €");
        assert_eq!(format_profit(15.0, 10.0), "-5.00 €");
        assert_eq!(format_profit(10.0, 10.0), "+0.00 €");
    }

    #[test]
    fn bidder_numbers_are_zero_padded() {
        assert_eq!(format_bidder_number(1), "001");
        assert_eq!(format_bidder_number(42), "042");
        assert_eq!(format_bidder_number(1234), "1234");
    }

    #[test]
    fn lot_status_reflects_buyer() {
        assert_eq!(lot_status(None), "Available");
        assert_eq!(lot_status(Some(7)), "Sold");
    }
}
