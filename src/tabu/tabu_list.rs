//! Bounded FIFO memory of recently applied moves.

use std::collections::VecDeque;

use super::moves::Move;

/// Recently applied moves, oldest first. Holds at most `tenure` entries.
///
/// # Examples
///
/// ```
/// use u_hybrid_vrptw::tabu::{Move, TabuList};
///
/// let mut list = TabuList::new(2);
/// list.push(Move::Swap { a: 1, b: 2 });
/// list.push(Move::Swap { a: 3, b: 4 });
/// list.push(Move::Swap { a: 5, b: 6 });
/// assert_eq!(list.len(), 2);
/// assert!(!list.contains(&Move::Swap { a: 1, b: 2 }));
/// assert!(list.contains(&Move::Swap { a: 5, b: 6 }));
/// ```
#[derive(Debug, Clone)]
pub struct TabuList {
    moves: VecDeque<Move>,
    tenure: usize,
}

impl TabuList {
    /// Creates an empty list with the given tenure.
    pub fn new(tenure: usize) -> Self {
        Self {
            moves: VecDeque::with_capacity(tenure + 1),
            tenure,
        }
    }

    /// Records `mv`, evicting the oldest entry past the tenure.
    pub fn push(&mut self, mv: Move) {
        self.moves.push_back(mv);
        while self.moves.len() > self.tenure {
            self.moves.pop_front();
        }
    }

    /// Whether `mv` is currently tabu.
    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    /// Number of moves currently tabu.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if no move is tabu.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Maximum number of remembered moves.
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest() {
        let mut list = TabuList::new(3);
        for a in 0..5 {
            list.push(Move::Swap { a, b: a + 1 });
        }
        let firsts: Vec<usize> = list
            .iter()
            .map(|m| match m {
                Move::Swap { a, .. } => *a,
                Move::Relocate { customer, .. } => *customer,
            })
            .collect();
        assert_eq!(firsts, vec![2, 3, 4]);
        assert_eq!(list.tenure(), 3);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut list = TabuList::new(5);
        list.push(Move::Swap { a: 1, b: 2 });
        list.push(Move::Swap { a: 1, b: 2 });
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_empty() {
        let list = TabuList::new(4);
        assert!(list.is_empty());
        assert!(!list.contains(&Move::Swap { a: 0, b: 0 }));
    }
}
