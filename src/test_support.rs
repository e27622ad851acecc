use chrono::NaiveDate;

use crate::domain::sample::BidSample;

pub fn build_sample(
    bid_name: &str,
    rate: f64,
    participants: u32,
    year: i32,
    month: u32,
    day: u32,
) -> BidSample {
    BidSample {
        bid_name: bid_name.to_string(),
        institution: "Test Institution".to_string(),
        amount: (100_000_000_f64 * rate / 100.0).round() as i64,
        rate,
        participants,
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
    }
}
