//! Lazy integer ranges and slice descriptors.

use crate::errors::{value_error, EvalResult};

/// `range(start, stop, step)`; never materialised.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RangeValue {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl RangeValue {
    pub fn new(start: i64, stop: i64, step: i64) -> EvalResult<Self> {
        if step == 0 {
            return Err(value_error("range() arg 3 must not be zero"));
        }
        Ok(RangeValue { start, stop, step })
    }

    pub fn len(&self) -> usize {
        let (start, stop, step) = (
            i128::from(self.start),
            i128::from(self.stop),
            i128::from(self.step),
        );
        let count = if step > 0 && start < stop {
            (stop - start - 1) / step + 1
        } else if step < 0 && start > stop {
            (start - stop - 1) / -step + 1
        } else {
            0
        };
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at a non-negative position, if in range.
    pub fn get(&self, index: usize) -> Option<i64> {
        if index >= self.len() {
            return None;
        }
        let value = i128::from(self.start) + index as i128 * i128::from(self.step);
        i64::try_from(value).ok()
    }

    pub fn contains(&self, value: i64) -> bool {
        let in_bounds = if self.step > 0 {
            self.start <= value && value < self.stop
        } else {
            self.stop < value && value <= self.start
        };
        in_bounds && (i128::from(value) - i128::from(self.start)) % i128::from(self.step) == 0
    }

    pub fn iter(&self) -> RangeIter {
        RangeIter {
            range: *self,
            index: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RangeIter {
    range: RangeValue,
    index: usize,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let value = self.range.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

/// `start:stop:step` with absent parts left open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SliceValue {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceValue {
    /// Positions selected from a sequence of length `len`, in order.
    ///
    /// Negative bounds count from the end; out-of-range bounds clamp.
    pub fn positions(&self, len: usize) -> EvalResult<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(value_error("slice step cannot be zero"));
        }
        let len = len as i64;
        let clamp = |bound: i64, low: i64, high: i64| {
            let bound = if bound < 0 { bound + len } else { bound };
            bound.clamp(low, high)
        };
        let mut positions = Vec::new();
        if step > 0 {
            let start = self.start.map_or(0, |s| clamp(s, 0, len));
            let stop = self.stop.map_or(len, |s| clamp(s, 0, len));
            let mut i = start;
            while i < stop {
                positions.push(i as usize);
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        } else {
            let start = self.start.map_or(len - 1, |s| clamp(s, -1, len - 1));
            let stop = self.stop.map_or(-1, |s| clamp(s, -1, len - 1));
            let mut i = start;
            while i > stop {
                positions.push(i as usize);
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        }
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn range_lengths() {
        assert_eq!(RangeValue { start: 0, stop: 5, step: 1 }.len(), 5);
        assert_eq!(RangeValue { start: 0, stop: 5, step: 2 }.len(), 3);
        assert_eq!(RangeValue { start: 5, stop: 0, step: -1 }.len(), 5);
        assert_eq!(RangeValue { start: 5, stop: 0, step: 1 }.len(), 0);
    }

    #[test]
    fn range_membership_respects_step() {
        let r = RangeValue { start: 1, stop: 10, step: 3 };
        assert!(r.contains(7));
        assert!(!r.contains(8));
        assert!(!r.contains(10));
    }

    #[test]
    fn slice_positions() {
        let all = SliceValue { start: None, stop: None, step: None };
        assert_eq!(all.positions(3).ok(), Some(vec![0, 1, 2]));

        let reversed = SliceValue { start: None, stop: None, step: Some(-1) };
        assert_eq!(reversed.positions(3).ok(), Some(vec![2, 1, 0]));

        let tail = SliceValue { start: Some(-2), stop: None, step: None };
        assert_eq!(tail.positions(5).ok(), Some(vec![3, 4]));

        let stepped = SliceValue { start: Some(1), stop: Some(100), step: Some(2) };
        assert_eq!(stepped.positions(6).ok(), Some(vec![1, 3, 5]));
    }

    #[test]
    fn zero_step_is_rejected() {
        let bad = SliceValue { start: None, stop: None, step: Some(0) };
        assert!(bad.positions(3).is_err());
        assert!(RangeValue::new(0, 1, 0).is_err());
    }
}
