// ── Pricing ──
//
// Nightly rates per room category, the night calculator, and the derived
// quote shown beside the booking form. All pure; nothing here touches
// the network.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::model::RoomCategory;

const SECONDS_PER_DAY: u64 = 86_400;

// ── Night calculator ─────────────────────────────────────────────────

/// Parse a stay boundary. Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and
/// bare `YYYY-MM-DDTHH:MM[:SS]` local times.
pub(crate) fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Calendar date of a stay boundary, for request payloads.
pub(crate) fn parse_stay_date(raw: &str) -> Option<NaiveDate> {
    parse_instant(raw).map(|ts| ts.date())
}

/// Number of nights between two stay boundaries.
///
/// Returns the ceiling of the positive duration in whole days. Unset,
/// malformed, equal, or inverted inputs all yield 0.
pub fn nights(check_in: &str, check_out: &str) -> u32 {
    let (Some(start), Some(end)) = (parse_instant(check_in), parse_instant(check_out)) else {
        return 0;
    };
    let seconds = u64::try_from((end - start).num_seconds()).unwrap_or(0);
    u32::try_from(seconds.div_ceil(SECONDS_PER_DAY)).unwrap_or(u32::MAX)
}

// ── Pricing table ────────────────────────────────────────────────────

/// Nightly rate per room category, in whole euros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTable {
    rates: BTreeMap<RoomCategory, u32>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::from_rates([
            (RoomCategory::TwoBed, 25),
            (RoomCategory::FourBed, 20),
            (RoomCategory::SixBed, 15),
        ])
    }
}

impl PricingTable {
    pub fn from_rates(rates: impl IntoIterator<Item = (RoomCategory, u32)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// Build from configuration keyed by wire code. Unknown codes are
    /// skipped with a warning; categories left out become unpriced.
    pub fn from_codes<'a>(rates: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let rates = rates.into_iter().filter_map(|(code, rate)| {
            let category = RoomCategory::from_code(code);
            if category.is_none() {
                warn!(code, "ignoring rate for unknown room category");
            }
            category.map(|c| (c, rate))
        });
        Self::from_rates(rates)
    }

    pub fn rate(&self, category: RoomCategory) -> Option<u32> {
        self.rates.get(&category).copied()
    }

    /// Rates in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomCategory, u32)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }

    /// Price a stay. Recomputed on every call, never cached.
    pub fn quote(
        &self,
        category: Option<RoomCategory>,
        check_in: &str,
        check_out: &str,
        guests: u32,
    ) -> PriceQuote {
        let nights = nights(check_in, check_out);
        let nightly_rate = category.and_then(|c| self.rate(c));
        let total = nightly_rate.map_or(0, |rate| {
            nights.saturating_mul(rate).saturating_mul(guests)
        });
        PriceQuote {
            nights,
            nightly_rate,
            guests,
            total,
        }
    }
}

// ── Quote ────────────────────────────────────────────────────────────

/// Derived price of the current draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceQuote {
    pub nights: u32,
    pub nightly_rate: Option<u32>,
    pub guests: u32,
    /// `nights × rate × guests`; 0 when either factor is missing.
    pub total: u32,
}

impl PriceQuote {
    /// Only strictly positive totals with a known rate are shown.
    pub fn is_displayable(&self) -> bool {
        self.total > 0 && self.nightly_rate.is_some()
    }

    /// One-line breakdown, e.g. `2 nights × 2 guests @ €25/night = €100.00`.
    pub fn summary(&self) -> Option<String> {
        if !self.is_displayable() {
            return None;
        }
        let rate = self.nightly_rate?;
        let nights = self.nights;
        let guests = self.guests;
        Some(format!(
            "{nights} night{} × {guests} guest{} @ €{rate}/night = €{}.00",
            plural(nights),
            plural(guests),
            self.total
        ))
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}
