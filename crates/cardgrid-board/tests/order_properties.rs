//! Property-based invariant tests for the order manager.
//!
//! Random sequences of reconcile / toggle / move operations over a small id
//! universe, checking after every step:
//!
//! 1. Totality: the display order is a permutation of the collection.
//! 2. Pin precedence: displayed pinned ids precede displayed unpinned ids.
//! 3. Moves involving a pinned id never change the order.
//! 4. Reconcile is idempotent and keeps surviving unpinned ids in order.
//! 5. A snapshot restores to the same display order.

use std::collections::HashSet;

use cardgrid_board::{
    ArrivalPlacement, ItemId, MoveOutcome, OrderManager, OrderPolicy, UnpinPlacement,
};
use proptest::prelude::*;

const UNIVERSE: u8 = 12;

#[derive(Debug, Clone)]
enum Op {
    Reconcile(Vec<u8>),
    Toggle(u8),
    Move(u8, u8),
}

fn id(n: u8) -> ItemId {
    ItemId::new(format!("card-{n}"))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::collection::vec(0..UNIVERSE, 0..16).prop_map(Op::Reconcile),
        (0..UNIVERSE).prop_map(Op::Toggle),
        (0..UNIVERSE, 0..UNIVERSE).prop_map(|(a, b)| Op::Move(a, b)),
    ]
}

fn policy() -> impl Strategy<Value = OrderPolicy> {
    (any::<bool>(), any::<bool>()).prop_map(|(back, prepend)| {
        let mut p = OrderPolicy::default();
        if back {
            p.unpin_placement = UnpinPlacement::Back;
        }
        if prepend {
            p.arrival_placement = ArrivalPlacement::Prepend;
        }
        p
    })
}

fn check_invariants(m: &OrderManager) -> Result<(), TestCaseError> {
    let display = m.display_order();
    let shown: HashSet<&ItemId> = display.iter().collect();
    let collection: HashSet<&ItemId> = m.collection().iter().collect();
    prop_assert_eq!(display.len(), m.collection().len(), "display has duplicates or gaps");
    prop_assert_eq!(&shown, &collection);

    let first_unpinned = display.iter().position(|d| !m.is_pinned(d));
    if let Some(split) = first_unpinned {
        prop_assert!(
            display[split..].iter().all(|d| !m.is_pinned(d)),
            "pinned id after unpinned in {:?}",
            display
        );
    }
    prop_assert_eq!(m.pinned_display_len(), first_unpinned.unwrap_or(display.len()));

    let pinned: HashSet<&ItemId> = m.pinned().iter().collect();
    prop_assert!(m.unpinned().iter().all(|u| !pinned.contains(u)));
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_over_random_ops(policy in policy(), ops in prop::collection::vec(op(), 1..40)) {
        let mut m = OrderManager::new(policy);
        for op in ops {
            match op {
                Op::Reconcile(keys) => {
                    let survivors_before: Vec<ItemId> = m.unpinned().to_vec();
                    let collection: Vec<ItemId> = keys.iter().copied().map(id).collect();
                    m.reconcile(collection.clone());
                    let present: HashSet<ItemId> = collection.iter().cloned().collect();
                    let expected: Vec<&ItemId> =
                        survivors_before.iter().filter(|s| present.contains(*s)).collect();
                    let kept: Vec<&ItemId> =
                        m.unpinned().iter().filter(|u| survivors_before.contains(u)).collect();
                    prop_assert_eq!(kept, expected, "reconcile reordered survivors");

                    let display = m.display_order();
                    let again = m.reconcile(collection);
                    prop_assert!(!again.order_changed());
                    prop_assert!(!again.collection_changed);
                    prop_assert_eq!(m.display_order(), display);
                }
                Op::Toggle(k) => {
                    m.toggle_pin(&id(k));
                }
                Op::Move(a, b) => {
                    let (from, to) = (id(a), id(b));
                    let before = m.display_order();
                    let involves_pinned = m.is_pinned(&from) || m.is_pinned(&to);
                    let outcome = m.move_unpinned(&from, &to);
                    if involves_pinned {
                        prop_assert_eq!(outcome, MoveOutcome::Unchanged);
                        prop_assert_eq!(m.display_order(), before);
                    } else if let MoveOutcome::Moved { to: landed, .. } = outcome {
                        prop_assert_eq!(m.unpinned().get(landed), Some(&from));
                    }
                }
            }
            check_invariants(&m)?;
        }
    }

    #[test]
    fn snapshot_restores_display(policy in policy(), ops in prop::collection::vec(op(), 1..30)) {
        let mut m = OrderManager::new(policy);
        for op in ops {
            match op {
                Op::Reconcile(keys) => {
                    m.reconcile(keys.into_iter().map(id));
                }
                Op::Toggle(k) => {
                    m.toggle_pin(&id(k));
                }
                Op::Move(a, b) => {
                    m.move_unpinned(&id(a), &id(b));
                }
            }
        }
        let mut restored = OrderManager::from_persisted(m.snapshot(), policy);
        restored.reconcile(m.collection().to_vec());
        prop_assert_eq!(restored.display_order(), m.display_order());
    }
}
