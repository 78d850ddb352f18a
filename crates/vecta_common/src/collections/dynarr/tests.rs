use std::{
    cell::Cell,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    rc::Rc,
};

use proptest::prelude::*;

use super::*;
use crate::dynarr;

/// Counts how many times values sharing the same counter were dropped
#[derive(Clone, Debug)]
struct DropCounter(Rc<Cell<usize>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

fn drop_counters(n: usize) -> (Rc<Cell<usize>>, DynArr<DropCounter>) {
    let drops = Rc::new(Cell::new(0));
    let arr = (0..n).map(|_| DropCounter(drops.clone())).collect();
    (drops, arr)
}

#[test]
fn dynarr_new() {
    let arr = DynArr::<i32>::new();
    assert_eq!(arr.capacity(), 0);
    assert_eq!(arr.len(), 0);
    assert!(arr.is_empty());

    let arr = DynArr::<i32>::with_capacity(21);
    assert_eq!(arr.capacity(), 21);
    assert_eq!(arr.len(), 0);

    let arr = DynArr::<i32>::default();
    assert_eq!(arr.capacity(), 0);
}

#[test]
fn dynarr_growth_sequence() {
    let mut arr = DynArr::new();
    let mut caps = Vec::new();
    for i in 0..9 {
        arr.push(i);
        caps.push(arr.capacity());
    }
    assert_eq!(caps, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
    assert_eq!(arr, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn dynarr_reserve() {
    let mut arr = DynArr::<i32>::new();
    arr.reserve(21);
    assert_eq!(arr.capacity(), 21);

    arr.reserve(5);
    assert_eq!(arr.capacity(), 21);

    let mut arr = dynarr![1, 2, 3];
    assert_eq!(arr.try_reserve(10), Ok(()));
    assert_eq!(arr.capacity(), 10);
    assert_eq!(arr, [1, 2, 3]);

    assert_eq!(arr.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));
    assert_eq!(arr.capacity(), 10);
    assert_eq!(arr, [1, 2, 3]);
}

#[test]
fn dynarr_reserve_and_push() {
    let mut arr = DynArr::<i32>::new();
    arr.reserve(10);

    for i in 0..10 {
        arr.push(i);
        assert_eq!(arr.capacity(), 10);
    }

    // Growth after an exact reservation still doubles
    arr.push(10);
    assert_eq!(arr.capacity(), 20);
}

#[test]
fn dynarr_shrink() {
    let mut arr = dynarr![1, 2, 3, 4, 5];
    arr.reserve(20);
    arr.shrink_to_fit();
    assert_eq!(arr.capacity(), 5);
    assert_eq!(arr, [1, 2, 3, 4, 5]);

    arr.clear();
    arr.shrink_to_fit();
    assert_eq!(arr.capacity(), 0);
}

#[test]
fn dynarr_push_and_access() {
    let mut arr = DynArr::<i32>::new();

    arr.push(42);
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0], 42);
    assert_eq!(arr.at(0), Ok(&42));

    arr.push(84);
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[1], 84);
    assert_eq!(arr.front(), Ok(&42));
    assert_eq!(arr.back(), Ok(&84));

    *arr.at_mut(0).unwrap() = 1;
    *arr.back_mut().unwrap() += 1;
    *arr.front_mut().unwrap() += 1;
    assert_eq!(arr, [2, 85]);
}

#[test]
fn dynarr_checked_access_errors() {
    let mut arr = DynArr::<i32>::new();
    assert_eq!(arr.at(0), Err(DynArrError::OutOfRange { index: 0, len: 0 }));
    assert_eq!(arr.front(), Err(DynArrError::OutOfRange { index: 0, len: 0 }));
    assert_eq!(arr.back(), Err(DynArrError::OutOfRange { index: 0, len: 0 }));
    assert!(arr.front_mut().is_err());
    assert!(arr.back_mut().is_err());

    arr.extend([1, 2, 3]);
    assert_eq!(arr.at(3), Err(DynArrError::OutOfRange { index: 3, len: 3 }));
    assert_eq!(arr.at_mut(7), Err(DynArrError::OutOfRange { index: 7, len: 3 }));
    assert_eq!(arr.at(usize::MAX), Err(DynArrError::OutOfRange { index: usize::MAX, len: 3 }));
}

#[test]
fn dynarr_from_array() {
    let arr = dynarr!["hello", "world", "!"];
    assert_eq!(arr, ["hello", "world", "!"]);
    assert_eq!(arr.capacity(), 3);

    let arr = dynarr![7; 4];
    assert_eq!(arr, [7, 7, 7, 7]);
    assert_eq!(arr.capacity(), 4);

    let arr: DynArr<u8> = dynarr![];
    assert_eq!(arr.capacity(), 0);

    let arr = DynArr::from_slice(&[1, 2]);
    assert_eq!(arr.capacity(), 2);
    assert_eq!(DynArr::from(&[1, 2][..]), arr);
}

#[test]
fn dynarr_insert() {
    let mut arr = dynarr![1, 2, 3, 4, 5, 6];
    assert_eq!(arr.insert(2, 42), Ok(()));
    assert_eq!(arr, [1, 2, 42, 3, 4, 5, 6]);

    assert_eq!(arr.insert(0, 0), Ok(()));
    assert_eq!(arr, [0, 1, 2, 42, 3, 4, 5, 6]);

    // Positions past the last element are rejected, use `push` to append
    assert_eq!(arr.insert(8, 84), Err(DynArrError::OutOfRange { index: 8, len: 8 }));
    assert_eq!(arr.len(), 8);

    let mut arr = DynArr::new();
    assert_eq!(arr.insert(0, 1), Err(DynArrError::OutOfRange { index: 0, len: 0 }));
    assert_eq!(arr.capacity(), 0);
}

#[test]
fn dynarr_insert_grows() {
    let mut arr = dynarr![1, 2];
    assert_eq!(arr.capacity(), 2);
    arr.insert(1, 3).unwrap();
    assert_eq!(arr.capacity(), 4);
    assert_eq!(arr, [1, 3, 2]);
}

#[test]
fn dynarr_insert_error_drops_element() {
    let drops = Rc::new(Cell::new(0));
    let mut arr = DynArr::new();
    assert!(arr.insert(0, DropCounter(drops.clone())).is_err());
    assert_eq!(drops.get(), 1);
}

#[test]
fn dynarr_emplace() {
    let mut arr = dynarr![String::from("a"), String::from("c")];
    arr.emplace(1, || String::from("b")).unwrap().push('!');
    assert_eq!(arr, ["a", "b!", "c"]);

    let mut called = false;
    assert!(arr.emplace(3, || { called = true; String::new() }).is_err());
    assert!(!called);

    arr.emplace_back(|| String::from("d"));
    assert_eq!(arr, ["a", "b!", "c", "d"]);
}

#[test]
fn dynarr_remove() {
    let mut arr = dynarr![1, 2, 3, 4, 5, 6];
    assert_eq!(arr.remove(2), Ok(3));
    assert_eq!(arr, [1, 2, 4, 5, 6]);
    assert_eq!(arr.remove(4), Ok(6));
    assert_eq!(arr.remove(4), Err(DynArrError::OutOfRange { index: 4, len: 4 }));
    assert_eq!(arr, [1, 2, 4, 5]);
    assert_eq!(arr.capacity(), 6);
}

#[test]
fn dynarr_insert_remove_round_trip() {
    let mut arr = dynarr![1, 2, 3];
    arr.insert(1, 9).unwrap();
    assert_eq!(arr.remove(1), Ok(9));
    assert_eq!(arr, [1, 2, 3]);
}

#[test]
fn dynarr_remove_range() {
    let mut arr = dynarr![1, 2, 3, 4, 5, 6];
    assert_eq!(arr.remove_range(1..3), Ok(()));
    assert_eq!(arr, [1, 4, 5, 6]);

    assert_eq!(arr.remove_range(2..2), Ok(()));
    assert_eq!(arr, [1, 4, 5, 6]);

    assert_eq!(arr.remove_range(2..=3), Ok(()));
    assert_eq!(arr, [1, 4]);

    assert_eq!(arr.remove_range(..), Ok(()));
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), 6);

    let mut arr = dynarr![1, 2, 3];
    assert_eq!(arr.remove_range(2..1), Err(DynArrError::InvalidRange { start: 2, end: 1, len: 3 }));
    assert_eq!(arr.remove_range(1..4), Err(DynArrError::InvalidRange { start: 1, end: 4, len: 3 }));
    assert_eq!(arr, [1, 2, 3]);

    assert_eq!(arr.remove_range(3..3), Ok(()));
    assert_eq!(arr.remove_range(1..), Ok(()));
    assert_eq!(arr, [1]);
}

#[test]
fn dynarr_remove_range_drops() {
    let (drops, mut arr) = drop_counters(6);
    arr.remove_range(1..4).unwrap();
    assert_eq!(drops.get(), 3);
    assert_eq!(arr.len(), 3);

    assert!(arr.remove_range(0..5).is_err());
    assert_eq!(drops.get(), 3);

    drop(arr);
    assert_eq!(drops.get(), 6);
}

#[test]
fn dynarr_pop() {
    let mut arr = dynarr![1, 2, 3];
    assert_eq!(arr.pop(), Some(3));
    assert_eq!(arr.pop(), Some(2));
    assert_eq!(arr.pop(), Some(1));
    assert_eq!(arr.pop(), None);
    assert_eq!(arr.capacity(), 3);
}

#[test]
fn dynarr_clear() {
    let (drops, mut arr) = drop_counters(5);
    let cap = arr.capacity();
    arr.clear();
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), cap);
    assert_eq!(drops.get(), 5);

    arr.clear();
    assert_eq!(drops.get(), 5);
}

#[test]
fn dynarr_destroy_and_recover() {
    let (drops, mut arr) = drop_counters(3);
    arr.destroy_and_recover(10);
    assert_eq!(drops.get(), 3);
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), 10);

    arr.destroy_and_recover(0);
    assert_eq!(arr.capacity(), 0);

    let mut arr = dynarr![1, 2, 3];
    arr.destroy_and_recover(1);
    arr.push(4);
    assert_eq!(arr, [4]);
    assert_eq!(arr.capacity(), 1);
}

#[test]
fn dynarr_clone() {
    let mut arr = DynArr::with_capacity(8);
    arr.extend([1, 2, 3]);

    let mut copy = arr.clone();
    assert_eq!(copy, arr);
    assert_eq!(copy.capacity(), 8);
    assert_ne!(copy.as_ptr(), arr.as_ptr());

    copy.push(4);
    copy[0] = 0;
    assert_eq!(arr, [1, 2, 3]);
    assert_eq!(copy, [0, 2, 3, 4]);
}

#[test]
fn dynarr_clone_from() {
    let source = dynarr![1, 2, 3];

    let mut same_cap = dynarr![7, 8, 9];
    let ptr = same_cap.as_ptr();
    same_cap.clone_from(&source);
    assert_eq!(same_cap, [1, 2, 3]);
    assert_eq!(same_cap.as_ptr(), ptr);

    let mut other_cap = DynArr::with_capacity(32);
    other_cap.push(5);
    other_cap.clone_from(&source);
    assert_eq!(other_cap, [1, 2, 3]);
    assert_eq!(other_cap.capacity(), 3);

    let mut empty = DynArr::<i32>::new();
    empty.clone_from(&DynArr::new());
    assert!(empty.is_empty());
    assert_eq!(empty.capacity(), 0);
}

#[test]
fn dynarr_compare() {
    let a = dynarr![1, 2, 3];
    assert_eq!(a, dynarr![1, 2, 3]);
    assert_ne!(a, dynarr![1, 2]);
    assert!(a < dynarr![1, 2, 4]);
    assert!(a < dynarr![1, 3]);
    assert!(dynarr![1, 2] < a);
    assert!(DynArr::<i32>::new() < a);
    assert_eq!(DynArr::<i32>::new().cmp(&DynArr::new()), core::cmp::Ordering::Equal);
    assert!(a >= dynarr![1, 2, 3]);

    // Capacity doesn't take part in equality
    let mut b = DynArr::with_capacity(10);
    b.extend([1, 2, 3]);
    assert_eq!(a, b);

    let hash = |arr: &DynArr<i32>| {
        let mut hasher = DefaultHasher::new();
        arr.hash(&mut hasher);
        hasher.finish()
    };
    assert_eq!(hash(&a), hash(&b));
}

#[test]
fn dynarr_extend() {
    let mut arr = dynarr![1, 2, 3];
    arr.extend_from_slice(&[4, 5, 6]);
    assert_eq!(arr, [1, 2, 3, 4, 5, 6]);

    let mut arr = dynarr![1, 2, 3];
    arr.extend([4, 5, 6]);
    assert_eq!(arr, [1, 2, 3, 4, 5, 6]);

    let mut arr = dynarr![1, 2, 3];
    arr.extend(&[4, 5]);
    assert_eq!(arr, [1, 2, 3, 4, 5]);
}

#[test]
fn dynarr_iter() {
    let mut arr = dynarr![1, 2, 3];
    for x in &mut arr {
        *x *= 2;
    }
    assert_eq!((&arr).into_iter().sum::<i32>(), 12);

    let collected: DynArr<_> = arr.iter().rev().copied().collect();
    assert_eq!(collected, [6, 4, 2]);
}

#[test]
fn dynarr_into_iter() {
    let arr = dynarr![1, 2, 3, 4, 5];
    let mut iter = arr.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(5));
    assert_eq!(iter.as_slice(), &[2, 3, 4]);

    let clone = iter.clone();
    assert_eq!(iter.collect::<Vec<_>>(), [2, 3, 4]);
    assert_eq!(clone.count(), 3);
}

#[test]
fn dynarr_into_iter_drops_remaining() {
    let (drops, arr) = drop_counters(5);
    let mut iter = arr.into_iter();
    drop(iter.next());
    assert_eq!(drops.get(), 1);

    drop(iter);
    assert_eq!(drops.get(), 5);
}

#[test]
fn dynarr_drops_on_drop() {
    let (drops, arr) = drop_counters(4);
    let copy = arr.clone();
    drop(arr);
    assert_eq!(drops.get(), 4);
    drop(copy);
    assert_eq!(drops.get(), 8);
}

#[test]
fn dynarr_zero_sized() {
    let mut arr = DynArr::<()>::new();
    assert_eq!(arr.capacity(), usize::MAX);

    for _ in 0..100 {
        arr.push(());
    }
    assert_eq!(arr.len(), 100);
    assert_eq!(arr.capacity(), usize::MAX);

    arr.insert(50, ()).unwrap();
    assert_eq!(arr.remove(0), Ok(()));
    arr.remove_range(10..20).unwrap();
    assert_eq!(arr.len(), 90);

    arr.shrink_to_fit();
    assert_eq!(arr.capacity(), usize::MAX);
    assert_eq!(arr.into_iter().count(), 90);
}

#[test]
fn dynarr_debug() {
    assert_eq!(format!("{:?}", dynarr![1, 2]), "[1, 2]");
    assert_eq!(format!("{:?}", dynarr![1, 2].into_iter()), "IntoIter([1, 2])");
}

#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Pop,
    Insert(usize, i32),
    Remove(usize),
    RemoveRange(usize, usize),
    Reserve(usize),
    Shrink,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        2 => Just(Op::Pop),
        2 => (0..40usize, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => (0..40usize).prop_map(Op::Remove),
        1 => (0..40usize, 0..40usize).prop_map(|(s, e)| Op::RemoveRange(s, e)),
        1 => (0..64usize).prop_map(Op::Reserve),
        1 => Just(Op::Shrink),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn dynarr_matches_vec(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut arr = DynArr::new();
        let mut model = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    arr.push(v);
                    model.push(v);
                },
                Op::Pop => prop_assert_eq!(arr.pop(), model.pop()),
                Op::Insert(i, v) => {
                    let res = arr.insert(i, v);
                    if i < model.len() {
                        prop_assert_eq!(res, Ok(()));
                        model.insert(i, v);
                    } else {
                        prop_assert_eq!(res, Err(DynArrError::OutOfRange { index: i, len: model.len() }));
                    }
                },
                Op::Remove(i) => {
                    let expected = if i < model.len() { Ok(model.remove(i)) } else { Err(DynArrError::OutOfRange { index: i, len: model.len() }) };
                    prop_assert_eq!(arr.remove(i), expected);
                },
                Op::RemoveRange(s, e) => {
                    let res = arr.remove_range(s..e);
                    if s <= e && e <= model.len() {
                        prop_assert_eq!(res, Ok(()));
                        model.drain(s..e).for_each(drop);
                    } else {
                        prop_assert!(res.is_err());
                    }
                },
                Op::Reserve(n) => {
                    let before = arr.capacity();
                    arr.reserve(n);
                    prop_assert_eq!(arr.capacity(), before.max(n));
                },
                Op::Shrink => {
                    arr.shrink_to_fit();
                    prop_assert_eq!(arr.capacity(), arr.len());
                },
                Op::Clear => {
                    let before = arr.capacity();
                    arr.clear();
                    model.clear();
                    prop_assert_eq!(arr.capacity(), before);
                },
            }

            prop_assert!(arr.len() <= arr.capacity());
            prop_assert_eq!(arr.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn dynarr_push_capacity_is_power_of_two(n in 1..2000usize) {
        let mut arr = DynArr::new();
        for i in 0..n {
            arr.push(i);
        }
        prop_assert_eq!(arr.capacity(), n.next_power_of_two());
    }

    #[test]
    fn dynarr_clone_preserves_contents_and_capacity(values in prop::collection::vec(any::<i64>(), 0..100), extra in 0..50usize) {
        let mut arr = DynArr::from_slice(&values);
        arr.reserve(values.len() + extra);
        let copy = arr.clone();
        prop_assert_eq!(&copy, &arr);
        prop_assert_eq!(copy.capacity(), arr.capacity());
    }
}
