// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use mira_arena::Arena;

use super::*;

fn arena() -> Arena {
    Arena::new(mira_arena::ZONE_SIZE as usize * 4)
}

#[test]
fn push_and_get_round_trip() {
    let mut a = arena();
    let mut v: Vector<i32> = Vector::new();
    for i in 0..200 {
        assert!(v.push(&mut a, i));
    }
    assert_eq!(v.len(), 200);
    for i in 0..200 {
        assert_eq!(v.get(&a, i as usize), Some(i));
    }
}

#[test]
fn pop_returns_elements_in_reverse_order() {
    let mut a = arena();
    let mut v: Vector<i32> = Vector::new();
    for i in 0..10 {
        v.push(&mut a, i);
    }
    for i in (0..10).rev() {
        assert_eq!(v.pop(&mut a), Some(i));
    }
    assert_eq!(v.pop(&mut a), None);
}

#[test]
fn dequeue_removes_from_the_front() {
    let mut a = arena();
    let mut v: Vector<i32> = Vector::new();
    for i in 0..10 {
        v.push(&mut a, i);
    }
    for i in 0..10 {
        assert_eq!(v.dequeue(&mut a), Some(i));
    }
    assert_eq!(v.dequeue(&mut a), None);
}

#[test]
fn set_overwrites_in_place() {
    let mut a = arena();
    let mut v: Vector<i32> = Vector::new();
    v.push(&mut a, 1);
    v.push(&mut a, 2);
    assert!(v.set(&mut a, 1, 99));
    assert_eq!(v.get(&a, 1), Some(99));
    assert!(!v.set(&mut a, 5, 0));
}

#[test]
fn allocates_multiple_chunks_for_large_vectors() {
    let mut a = arena();
    let mut v: Vector<u8> = Vector::new();
    // Elems per chunk for u8 is ZONE_SIZE, so push past one chunk.
    for i in 0..(mira_arena::ZONE_SIZE as usize + 10) {
        assert!(v.push(&mut a, (i % 256) as u8));
    }
    assert_eq!(v.len(), mira_arena::ZONE_SIZE as usize + 10);
    assert_eq!(v.get(&a, mira_arena::ZONE_SIZE as usize), Some(0));
}

#[test]
fn clear_releases_every_chunk() {
    let mut a = arena();
    let mut v: Vector<i32> = Vector::new();
    for i in 0..50 {
        v.push(&mut a, i);
    }
    v.clear(&mut a);
    assert_eq!(v.len(), 0);
    assert_eq!(v.pop(&mut a), None);
}

#[test]
fn mixed_push_pop_dequeue_stays_consistent() {
    let mut a = arena();
    let mut v: Vector<i32> = Vector::new();
    for i in 0..5 {
        v.push(&mut a, i);
    }
    assert_eq!(v.dequeue(&mut a), Some(0));
    v.push(&mut a, 5);
    assert_eq!(v.pop(&mut a), Some(5));
    assert_eq!(v.len(), 3);
    assert_eq!(v.get(&a, 0), Some(1));
}
