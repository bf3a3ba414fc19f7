use std::iter::FusedIterator;
use std::marker::PhantomData;

use thiserror::Error;

use crate::codec::{BorshCodec, StateCodec, StateKeyCodec, StateValueCodec};
use crate::{Prefix, StateMap, StateValue, Storage, WorkingSet};

/// An ordered, index-addressed sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVec<V, Codec = BorshCodec> {
    _phantom: PhantomData<V>,
    prefix: Prefix,
    len_value: StateValue<usize, Codec>,
    elems: StateMap<usize, V, Codec>,
}

/// Error type for `StateVec` get method.
#[derive(Debug, Error)]
pub enum StateVecError {
    /// The index is past the end of the vector.
    #[error("Index out of bounds for index: {0}")]
    IndexOutOfBounds(usize),
    /// The index is in bounds but nothing is stored there.
    #[error("Value not found for prefix: {0} and index: {1}")]
    MissingValue(Prefix, usize),
}

impl<V> StateVec<V>
where
    BorshCodec: StateValueCodec<V>,
{
    /// Borsh encoded vector under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<V, Codec> StateVec<V, Codec>
where
    Codec: StateCodec + Clone,
    Codec::ValueCodec: StateValueCodec<V> + StateValueCodec<usize>,
    Codec::KeyCodec: StateKeyCodec<usize>,
{
    /// Vector under `prefix` encoded with `codec`.
    pub fn with_codec(prefix: Prefix, codec: Codec) -> Self {
        // Length and elements get disjoint sub-prefixes.
        let len_value = StateValue::with_codec(prefix.extended(b"l"), codec.clone());
        let elems = StateMap::with_codec(prefix.extended(b"e"), codec);
        Self {
            _phantom: PhantomData,
            prefix,
            len_value,
            elems,
        }
    }

    fn set_len<S: Storage>(&self, length: usize, working_set: &mut WorkingSet<S>) {
        self.len_value.set(&length, working_set);
    }

    /// Returns the value for the given index.
    pub fn get<S: Storage>(&self, index: usize, working_set: &mut WorkingSet<S>) -> Option<V> {
        self.elems.get(&index, working_set)
    }

    fn get_or_err<S: Storage>(
        &self,
        index: usize,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateVecError> {
        let len = self.len(working_set);

        if index < len {
            self.elems
                .get(&index, working_set)
                .ok_or_else(|| StateVecError::MissingValue(self.prefix.clone(), index))
        } else {
            Err(StateVecError::IndexOutOfBounds(index))
        }
    }

    /// Returns the length of the [`StateVec`].
    pub fn len<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> usize {
        self.len_value.get(working_set).unwrap_or_default()
    }

    /// Pushes a value to the end of the [`StateVec`].
    pub fn push<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        let len = self.len(working_set);

        self.elems.set(&len, value, working_set);
        self.set_len(len + 1, working_set);
    }

    /// Removes the value at `index`, shifting every later value one slot to
    /// the left so the relative order of the remaining values is kept.
    pub fn remove<S: Storage>(
        &self,
        index: usize,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateVecError> {
        let len = self.len(working_set);
        let removed = self.get_or_err(index, working_set)?;

        for i in index + 1..len {
            let moved = self.get_or_err(i, working_set)?;
            self.elems.set(&(i - 1), &moved, working_set);
        }

        self.elems.delete(&(len - 1), working_set);
        self.set_len(len - 1, working_set);

        Ok(removed)
    }

    /// Returns an iterator over all the values in the [`StateVec`].
    pub fn iter<'a, 'ws, S: Storage>(
        &'a self,
        working_set: &'ws mut WorkingSet<S>,
    ) -> StateVecIter<'a, 'ws, V, Codec, S> {
        let len = self.len(working_set);
        StateVecIter {
            state_vec: self,
            ws: working_set,
            len,
            next_i: 0,
        }
    }
}

/// An [`Iterator`] over a [`StateVec`]
///
/// See [`StateVec::iter`] for more details.
pub struct StateVecIter<'a, 'ws, V, Codec, S>
where
    Codec: StateCodec + Clone,
    Codec::ValueCodec: StateValueCodec<V> + StateValueCodec<usize>,
    Codec::KeyCodec: StateKeyCodec<usize>,
    S: Storage,
{
    state_vec: &'a StateVec<V, Codec>,
    ws: &'ws mut WorkingSet<S>,
    len: usize,
    next_i: usize,
}

impl<'a, 'ws, V, Codec, S> Iterator for StateVecIter<'a, 'ws, V, Codec, S>
where
    Codec: StateCodec + Clone,
    Codec::ValueCodec: StateValueCodec<V> + StateValueCodec<usize>,
    Codec::KeyCodec: StateKeyCodec<usize>,
    S: Storage,
{
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_i >= self.len {
            return None;
        }

        let elem = self.state_vec.get(self.next_i, self.ws);
        if elem.is_some() {
            self.next_i += 1;
        }

        elem
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next_i;
        (remaining, Some(remaining))
    }
}

impl<'a, 'ws, V, Codec, S> ExactSizeIterator for StateVecIter<'a, 'ws, V, Codec, S>
where
    Codec: StateCodec + Clone,
    Codec::ValueCodec: StateValueCodec<V> + StateValueCodec<usize>,
    Codec::KeyCodec: StateKeyCodec<usize>,
    S: Storage,
{
}

impl<'a, 'ws, V, Codec, S> FusedIterator for StateVecIter<'a, 'ws, V, Codec, S>
where
    Codec: StateCodec + Clone,
    Codec::ValueCodec: StateValueCodec<V> + StateValueCodec<usize>,
    Codec::KeyCodec: StateKeyCodec<usize>,
    S: Storage,
{
}

#[cfg(test)]
mod test {
    use std::fmt::Debug;

    use super::*;
    use crate::MemoryStorage;

    enum TestCaseAction<T> {
        Push(T),
        Remove(usize, T),
        CheckLen(usize),
        CheckContents(Vec<T>),
        CheckGet(usize, Option<T>),
        CheckRemoveOutOfBounds(usize),
    }

    fn test_cases() -> Vec<TestCaseAction<u32>> {
        vec![
            TestCaseAction::Push(1),
            TestCaseAction::Push(2),
            TestCaseAction::CheckContents(vec![1, 2]),
            TestCaseAction::CheckLen(2),
            TestCaseAction::Push(8),
            TestCaseAction::Push(9),
            TestCaseAction::Remove(1, 2),
            TestCaseAction::CheckContents(vec![1, 8, 9]),
            TestCaseAction::CheckGet(3, None),
            TestCaseAction::Remove(2, 9),
            TestCaseAction::CheckContents(vec![1, 8]),
            TestCaseAction::CheckRemoveOutOfBounds(2),
            TestCaseAction::Remove(0, 1),
            TestCaseAction::Remove(0, 8),
            TestCaseAction::CheckLen(0),
            TestCaseAction::CheckRemoveOutOfBounds(0),
            TestCaseAction::Push(1),
            TestCaseAction::Push(2),
            TestCaseAction::Push(3),
            TestCaseAction::CheckContents(vec![1, 2, 3]),
        ]
    }

    #[test]
    fn test_state_vec() {
        let mut working_set = WorkingSet::new(MemoryStorage::new());

        let prefix = Prefix::new("test".as_bytes().to_vec());
        let state_vec = StateVec::<u32>::new(prefix);

        for test_case_action in test_cases() {
            check_test_case_action(&state_vec, test_case_action, &mut working_set);
        }
    }

    fn check_test_case_action<T, S>(
        state_vec: &StateVec<T>,
        action: TestCaseAction<T>,
        ws: &mut WorkingSet<S>,
    ) where
        S: Storage,
        BorshCodec: StateValueCodec<T>,
        T: Eq + Debug,
    {
        match action {
            TestCaseAction::CheckContents(expected) => {
                let contents: Vec<T> = state_vec.iter(ws).collect();
                assert_eq!(expected, contents);
            }
            TestCaseAction::CheckLen(expected) => {
                let actual = state_vec.len(ws);
                assert_eq!(actual, expected);
            }
            TestCaseAction::Push(value) => {
                state_vec.push(&value, ws);
            }
            TestCaseAction::Remove(index, expected) => {
                let actual = state_vec.remove(index, ws).unwrap();
                assert_eq!(actual, expected);
            }
            TestCaseAction::CheckGet(index, expected) => {
                let actual = state_vec.get(index, ws);
                assert_eq!(actual, expected);
            }
            TestCaseAction::CheckRemoveOutOfBounds(index) => {
                let err = state_vec.remove(index, ws).unwrap_err();
                assert!(matches!(err, StateVecError::IndexOutOfBounds(i) if i == index));
            }
        }
    }
}
