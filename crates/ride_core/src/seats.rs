//! Seat inventory for a ride being offered.
//!
//! Counts per seat type never sum above `total`, and `total` stays within
//! `1..=capacity`. Operations that would break this are refused (increment,
//! decrement) or clamped (resizing), never applied partially.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Passenger seat categories, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeatType {
    Front,
    BackWindow,
    BackMiddle,
    BackArmrest,
    ThirdRow,
    Any,
}

impl SeatType {
    pub const COUNT: usize = 6;

    pub const ALL: [SeatType; Self::COUNT] = [
        SeatType::Front,
        SeatType::BackWindow,
        SeatType::BackMiddle,
        SeatType::BackArmrest,
        SeatType::ThirdRow,
        SeatType::Any,
    ];

    /// Order in which seats are given up when the total shrinks. Named seats
    /// near the front survive longest.
    pub const TRIM_ORDER: [SeatType; Self::COUNT] = [
        SeatType::Any,
        SeatType::ThirdRow,
        SeatType::BackArmrest,
        SeatType::BackMiddle,
        SeatType::BackWindow,
        SeatType::Front,
    ];

    /// Wire key, matching the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            SeatType::Front => "front",
            SeatType::BackWindow => "backWindow",
            SeatType::BackMiddle => "backMiddle",
            SeatType::BackArmrest => "backArmrest",
            SeatType::ThirdRow => "thirdRow",
            SeatType::Any => "any",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeatType::Front => "Front seat",
            SeatType::BackWindow => "Back window",
            SeatType::BackMiddle => "Back middle",
            SeatType::BackArmrest => "Back with armrest",
            SeatType::ThirdRow => "Third row",
            SeatType::Any => "Any seat",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SeatType::Front => "car-seat-front",
            SeatType::BackWindow => "car-seat-window",
            SeatType::BackMiddle => "car-seat-middle",
            SeatType::BackArmrest => "car-seat-armrest",
            SeatType::ThirdRow => "car-seat-third-row",
            SeatType::Any => "car-seat",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Refused seat adjustments. The allocator is unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeatError {
    #[error("all {total} seats are already allocated")]
    CapacityReached { total: u32 },
    #[error("no {0} seats to remove")]
    NothingToRemove(SeatType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatAllocator {
    counts: [u32; SeatType::COUNT],
    total: u32,
    capacity: u32,
}

impl SeatAllocator {
    /// Start with every offered seat unassigned (`any`).
    pub fn new(capacity: u32, total: u32) -> Self {
        let capacity = capacity.max(1);
        let total = total.clamp(1, capacity);
        let mut counts = [0; SeatType::COUNT];
        counts[SeatType::Any.index()] = total;
        Self {
            counts,
            total,
            capacity,
        }
    }

    pub fn count(&self, seat: SeatType) -> u32 {
        self.counts[seat.index()]
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn allocated_count(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_fully_allocated(&self) -> bool {
        self.allocated_count() == self.total
    }

    pub fn can_increment(&self) -> bool {
        self.allocated_count() < self.total
    }

    pub fn can_decrement(&self, seat: SeatType) -> bool {
        self.count(seat) > 0
    }

    /// Non-zero counts in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (SeatType, u32)> + '_ {
        SeatType::ALL
            .into_iter()
            .map(|seat| (seat, self.count(seat)))
            .filter(|(_, count)| *count > 0)
    }

    pub fn increment(&mut self, seat: SeatType) -> Result<(), SeatError> {
        if !self.can_increment() {
            return Err(SeatError::CapacityReached { total: self.total });
        }
        self.counts[seat.index()] += 1;
        Ok(())
    }

    pub fn decrement(&mut self, seat: SeatType) -> Result<(), SeatError> {
        if !self.can_decrement(seat) {
            return Err(SeatError::NothingToRemove(seat));
        }
        self.counts[seat.index()] -= 1;
        Ok(())
    }

    /// Resize the offered seat count, clamped to `1..=capacity`.
    ///
    /// Growth lands in `any`. Shrinking trims counts in [`SeatType::TRIM_ORDER`]
    /// until the allocation fits. Returns the total actually applied.
    pub fn set_total(&mut self, requested: u32) -> u32 {
        let new_total = requested.clamp(1, self.capacity);

        if new_total > self.total {
            self.counts[SeatType::Any.index()] += new_total - self.total;
        } else if new_total < self.total {
            let mut excess = self.allocated_count().saturating_sub(new_total);
            for seat in SeatType::TRIM_ORDER {
                if excess == 0 {
                    break;
                }
                let slot = &mut self.counts[seat.index()];
                let removed = (*slot).min(excess);
                if removed > 0 {
                    *slot -= removed;
                    excess -= removed;
                    trace!(seat = %seat, removed, "trimmed seats");
                }
            }
        }

        self.total = new_total;
        new_total
    }

    /// Replace the capacity, shrinking the total if it no longer fits.
    pub fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity.max(1);
        if self.total > self.capacity {
            self.set_total(self.capacity);
        }
    }

    /// Start over for a different vehicle; the previous distribution is discarded.
    pub fn switch_vehicle(&mut self, capacity: u32, total: u32) {
        *self = Self::new(capacity, total);
    }
}
