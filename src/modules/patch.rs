//! Pure transforms over ordered default lists.

use std::fmt;

/// One declarative edit to an ordered list.
#[derive(Clone)]
pub enum ListPatch<T> {
    /// Append items not already present.
    Add(Vec<T>),
    /// Insert items right after `anchor`, or append if the anchor is absent.
    InsertAfter { anchor: T, items: Vec<T> },
    /// Drop every listed item.
    Remove(Vec<T>),
    /// Drop items matching the predicate.
    RemoveWhere(fn(&T) -> bool),
    /// Replace the whole list.
    Replace(fn(Vec<T>) -> Vec<T>),
}

impl<T: Clone + PartialEq> ListPatch<T> {
    /// Apply the edit, consuming the previous list.
    #[must_use]
    pub fn apply(&self, mut list: Vec<T>) -> Vec<T> {
        match self {
            ListPatch::Add(items) => {
                for item in items {
                    if !list.contains(item) {
                        list.push(item.clone());
                    }
                }
                list
            }
            ListPatch::InsertAfter { anchor, items } => {
                let fresh: Vec<T> = items.iter().filter(|i| !list.contains(i)).cloned().collect();
                match list.iter().position(|x| x == anchor) {
                    Some(at) => {
                        let tail = list.split_off(at + 1);
                        list.extend(fresh);
                        list.extend(tail);
                    }
                    None => list.extend(fresh),
                }
                list
            }
            ListPatch::Remove(items) => {
                list.retain(|x| !items.contains(x));
                list
            }
            ListPatch::RemoveWhere(pred) => {
                list.retain(|x| !pred(x));
                list
            }
            ListPatch::Replace(f) => f(list),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ListPatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListPatch::Add(items) => f.debug_tuple("Add").field(items).finish(),
            ListPatch::InsertAfter { anchor, items } => f
                .debug_struct("InsertAfter")
                .field("anchor", anchor)
                .field("items", items)
                .finish(),
            ListPatch::Remove(items) => f.debug_tuple("Remove").field(items).finish(),
            ListPatch::RemoveWhere(_) => f.write_str("RemoveWhere(..)"),
            ListPatch::Replace(_) => f.write_str("Replace(..)"),
        }
    }
}

/// Edit to the number of rounds in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnLengthPatch {
    /// Add (or with a negative value, subtract) rounds.
    Adjust(i32),
    /// Use a fixed number of rounds.
    Fixed(u32),
    /// Derive the length from the previous length and the player count.
    Replace(fn(u32, usize) -> u32),
}

impl TurnLengthPatch {
    /// Apply the edit. The result is never below one round.
    #[must_use]
    pub fn apply(&self, length: u32, player_count: usize) -> u32 {
        let next = match *self {
            TurnLengthPatch::Adjust(delta) => {
                u32::try_from(i64::from(length) + i64::from(delta)).unwrap_or(0)
            }
            TurnLengthPatch::Fixed(n) => n,
            TurnLengthPatch::Replace(f) => f(length, player_count),
        };
        next.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skips_duplicates() {
        let patch = ListPatch::Add(vec![2, 4]);
        assert_eq!(patch.apply(vec![1, 2, 3]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_insert_after_anchor() {
        let patch = ListPatch::InsertAfter {
            anchor: 2,
            items: vec![9],
        };
        assert_eq!(patch.apply(vec![1, 2, 3]), vec![1, 2, 9, 3]);
        assert_eq!(patch.apply(vec![1, 3]), vec![1, 3, 9]);
    }

    #[test]
    fn test_remove_where() {
        let patch: ListPatch<i32> = ListPatch::RemoveWhere(|x| x % 2 == 0);
        assert_eq!(patch.apply(vec![1, 2, 3, 4]), vec![1, 3]);
    }

    #[test]
    fn test_replace() {
        let patch: ListPatch<i32> = ListPatch::Replace(|mut l| {
            l.reverse();
            l
        });
        assert_eq!(patch.apply(vec![1, 2, 3]), vec![3, 2, 1]);
    }

    #[test]
    fn test_turn_length_floor() {
        assert_eq!(TurnLengthPatch::Adjust(-20).apply(8, 4), 1);
        assert_eq!(TurnLengthPatch::Adjust(2).apply(8, 4), 10);
        assert_eq!(TurnLengthPatch::Replace(|_, p| p as u32).apply(8, 5), 5);
    }
}
