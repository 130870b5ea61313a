use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn counting() -> (Rc<Cell<u32>>, Registration) {
    let count = Rc::new(Cell::new(0));
    let hits = count.clone();
    (count, Registration::new(move || hits.set(hits.get() + 1)))
}

#[test]
fn release_runs_once() {
    let (count, mut reg) = counting();
    assert!(reg.is_active());
    reg.release();
    reg.release();
    assert_eq!(count.get(), 1);
    assert!(!reg.is_active());
}

#[test]
fn drop_releases() {
    let (count, reg) = counting();
    drop(reg);
    assert_eq!(count.get(), 1);
}

#[test]
fn drop_after_release_does_not_release_again() {
    let (count, mut reg) = counting();
    reg.release();
    drop(reg);
    assert_eq!(count.get(), 1);
}

#[test]
fn noop_is_inactive() {
    let mut reg = Registration::noop();
    assert!(!reg.is_active());
    reg.release();
}
