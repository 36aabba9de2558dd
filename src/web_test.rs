#![allow(clippy::float_cmp)]

use std::cell::RefCell;

use super::*;

// =============================================================
// exclusive
// =============================================================

#[test]
fn exclusive_grants_access_when_idle() {
    let cell = RefCell::new(1);
    *exclusive(&cell).unwrap() += 1;
    assert_eq!(*cell.borrow(), 2);
}

#[test]
fn reentrant_access_is_busy_not_a_panic() {
    let cell = RefCell::new(1);
    let _held = cell.borrow_mut();
    let err = exclusive(&cell).unwrap_err();
    assert!(matches!(err, TooltipError::Busy));
    assert!(err.to_string().contains("must not call back"));
}

#[test]
fn access_returns_after_the_outer_borrow_ends() {
    let cell = RefCell::new(1);
    {
        let _held = cell.borrow_mut();
        assert!(exclusive(&cell).is_err());
    }
    assert!(exclusive(&cell).is_ok());
}

// =============================================================
// css_px
// =============================================================

#[test]
fn css_px_parses_pixel_values() {
    assert_eq!(css_px("12px"), 12.0);
    assert_eq!(css_px(" 0.5px "), 0.5);
    assert_eq!(css_px("auto"), 0.0);
}
