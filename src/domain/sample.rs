use chrono::NaiveDate;

/// One historical award record. Rates are the winning bid price expressed
/// as a percentage of the estimated price, amounts are KRW.
#[derive(Debug, Clone, PartialEq)]
pub struct BidSample {
    pub bid_name: String,
    pub institution: String,
    pub amount: i64,
    pub rate: f64,
    pub participants: u32,
    pub date: NaiveDate,
}

/// Amount bracket around the estimated price for the first search pass.
pub const PREDICTION_AMOUNT_SPREAD: f64 = 0.3;
/// Wider bracket used when the first pass returns too few samples.
pub const RELAXED_AMOUNT_SPREAD: f64 = 0.5;
/// Participant-count window around the expected field size.
pub const PREDICTION_PARTICIPANT_WINDOW: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleFilter {
    pub estimated_price: Option<i64>,
    pub amount_spread: f64,
    pub institution: Option<String>,
    pub bid_type: Option<String>,
    pub participants: Option<u32>,
    pub participant_window: u32,
}

impl SampleFilter {
    pub fn new() -> Self {
        Self {
            estimated_price: None,
            amount_spread: PREDICTION_AMOUNT_SPREAD,
            institution: None,
            bid_type: None,
            participants: None,
            participant_window: PREDICTION_PARTICIPANT_WINDOW,
        }
    }

    pub fn for_prediction(
        estimated_price: Option<i64>,
        institution: Option<String>,
        bid_type: Option<String>,
        participants: Option<u32>,
    ) -> Self {
        Self {
            estimated_price,
            institution,
            bid_type,
            participants,
            ..Self::new()
        }
    }

    /// Second-pass filter: widen the amount bracket and drop the
    /// institution and participant constraints.
    pub fn relaxed(&self) -> Self {
        Self {
            estimated_price: self.estimated_price,
            amount_spread: RELAXED_AMOUNT_SPREAD,
            institution: None,
            bid_type: self.bid_type.clone(),
            participants: None,
            participant_window: self.participant_window,
        }
    }

    pub fn can_relax(&self) -> bool {
        self.amount_spread < RELAXED_AMOUNT_SPREAD
            || self.institution.is_some()
            || self.participants.is_some()
    }

    pub fn amount_bounds(&self) -> Option<(i64, i64)> {
        self.estimated_price.map(|price| {
            let min = (price as f64 * (1.0 - self.amount_spread)) as i64;
            let max = (price as f64 * (1.0 + self.amount_spread)) as i64;
            (min, max)
        })
    }

    pub fn participant_bounds(&self) -> Option<(u32, u32)> {
        self.participants.map(|count| {
            let min = count.saturating_sub(self.participant_window).max(1);
            let max = count + self.participant_window;
            (min, max)
        })
    }
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self::new()
    }
}
