//! Comparator-ordered ranking queue.

use std::cmp::Ordering;
use std::rc::Rc;

use tp_types::TpResult;

use crate::comparator::ThreeWayCompare;

/// A binary max-heap ordered by an external three-way comparator.
///
/// `std::collections::BinaryHeap` requires elements to be intrinsically `Ord`,
/// but ranking order here is a property of the comparator, not of the results,
/// and comparisons can fail. The sift operations therefore run the comparator
/// directly and propagate its errors.
///
/// Elements that compare `Equal` drain in an order that depends on insertion
/// history; tie order is unspecified.
#[derive(Debug, Clone)]
pub struct RankingQueue<T, C: ThreeWayCompare<T>> {
    items: Vec<T>,
    comparator: Rc<C>,
}

impl<T, C: ThreeWayCompare<T>> RankingQueue<T, C> {
    pub fn new(comparator: Rc<C>) -> Self {
        Self {
            items: Vec::new(),
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert an element, keeping the best at the root.
    pub fn push(&mut self, item: T) -> TpResult<()> {
        self.items.push(item);
        self.sift_up(self.items.len() - 1)
    }

    /// Remove and return the best element, or `None` when empty.
    pub fn pop_best(&mut self) -> TpResult<Option<T>> {
        if self.items.is_empty() {
            return Ok(None);
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let best = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0)?;
        }
        Ok(best)
    }

    fn better(&self, i: usize, j: usize) -> TpResult<bool> {
        Ok(self.comparator.compare(&self.items[i], &self.items[j])? == Ordering::Greater)
    }

    fn sift_up(&mut self, mut idx: usize) -> TpResult<()> {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.better(idx, parent)? {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
        Ok(())
    }

    fn sift_down(&mut self, mut idx: usize) -> TpResult<()> {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut best_child = left;
            if right < len && self.better(right, left)? {
                best_child = right;
            }
            if !self.better(best_child, idx)? {
                break;
            }
            self.items.swap(idx, best_child);
            idx = best_child;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_types::{ResultError, TpError};

    struct ByValue;

    impl ThreeWayCompare<f64> for ByValue {
        fn compare(&self, a: &f64, b: &f64) -> TpResult<Ordering> {
            a.partial_cmp(b).ok_or_else(|| {
                TpError::Result(ResultError::UninitializedResultState {
                    message: "not comparable".to_string(),
                })
            })
        }
    }

    #[test]
    fn drains_best_first() {
        let mut queue = RankingQueue::new(Rc::new(ByValue));
        for value in [10.0, 20.0, 15.0, 5.0, 25.0] {
            queue.push(value).unwrap();
        }

        let mut drained = Vec::new();
        while let Some(best) = queue.pop_best().unwrap() {
            drained.push(best);
        }
        assert_eq!(drained, vec![25.0, 20.0, 15.0, 10.0, 5.0]);
    }

    #[test]
    fn order_is_independent_of_insertion_order() {
        let mut queue = RankingQueue::new(Rc::new(ByValue));
        for value in [1.0, 2.0, 3.0] {
            queue.push(value).unwrap();
        }
        assert_eq!(queue.pop_best().unwrap(), Some(3.0));

        let mut queue = RankingQueue::new(Rc::new(ByValue));
        for value in [3.0, 2.0, 1.0] {
            queue.push(value).unwrap();
        }
        assert_eq!(queue.pop_best().unwrap(), Some(3.0));
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut queue: RankingQueue<f64, ByValue> = RankingQueue::new(Rc::new(ByValue));
        assert_eq!(queue.pop_best().unwrap(), None);
    }

    #[test]
    fn comparator_errors_propagate_from_push() {
        let mut queue = RankingQueue::new(Rc::new(ByValue));
        queue.push(1.0).unwrap();
        assert!(queue.push(f64::NAN).is_err());
    }
}
