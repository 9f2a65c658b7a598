//! Property-based tests for undo/redo round trips
//!
//! For any sequence of edits, undoing some of them and redoing them again
//! restores the draft and the save payload exactly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use draftkit_undo_redo::{BackendChange, ChangeRecord, ChangeStack};
use proptest::prelude::*;

/// Ordered list of card titles
type Deck = Vec<String>;

fn push_card(title: String) -> ChangeRecord<BackendChange, Deck> {
    ChangeRecord::new(
        BackendChange::new("add_card").with("title", title),
        |change: &BackendChange, deck: &mut Deck| {
            let title = change.get("title").and_then(|v| v.as_str()).unwrap_or_default();
            deck.push(title.to_string());
            Ok(())
        },
        |_: &BackendChange, deck: &mut Deck| {
            deck.pop().map(|_| ()).ok_or_else(|| "deck is empty".into())
        },
    )
}

fn title_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,20}"
}

proptest! {
    #[test]
    fn prop_partial_undo_redo_round_trip(
        titles in prop::collection::vec(title_strategy(), 1..20),
        undo_fraction in 0.0f64..=1.0,
    ) {
        let mut stack = ChangeStack::new();
        let mut deck = Deck::new();
        for title in &titles {
            stack.apply_change(push_card(title.clone()), &mut deck).unwrap();
        }
        let payload = stack.committable_change_list();
        let undos = ((titles.len() as f64) * undo_fraction).floor() as usize;

        for _ in 0..undos {
            prop_assert!(stack.undo_change(&mut deck).unwrap());
        }
        prop_assert_eq!(deck.len(), titles.len() - undos);
        prop_assert_eq!(stack.get_change_count(), titles.len() - undos);

        for _ in 0..undos {
            prop_assert!(stack.redo_change(&mut deck).unwrap());
        }
        prop_assert!(!stack.redo_change(&mut deck).unwrap());
        prop_assert_eq!(&deck, &titles);
        prop_assert_eq!(stack.committable_change_list(), payload);
    }

    #[test]
    fn prop_callback_counts(applies in 1usize..15, undos in 0usize..15, redos in 0usize..15) {
        let apply_calls = Arc::new(AtomicUsize::new(0));
        let reverse_calls = Arc::new(AtomicUsize::new(0));
        let mut stack: ChangeStack<BackendChange, ()> = ChangeStack::new();

        for i in 0..applies {
            let a = Arc::clone(&apply_calls);
            let r = Arc::clone(&reverse_calls);
            let change = ChangeRecord::new(
                BackendChange::new("noop").with("index", i),
                move |_: &BackendChange, _: &mut ()| {
                    a.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                move |_: &BackendChange, _: &mut ()| {
                    r.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
            );
            stack.apply_change(change, &mut ()).unwrap();
        }

        let mut undone = 0;
        for _ in 0..undos {
            if stack.undo_change(&mut ()).unwrap() {
                undone += 1;
            }
        }
        let mut redone = 0;
        for _ in 0..redos {
            if stack.redo_change(&mut ()).unwrap() {
                redone += 1;
            }
        }

        prop_assert_eq!(undone, undos.min(applies));
        prop_assert_eq!(redone, redos.min(undone));
        prop_assert_eq!(apply_calls.load(Ordering::SeqCst), applies + redone);
        prop_assert_eq!(reverse_calls.load(Ordering::SeqCst), undone);
        prop_assert_eq!(stack.get_change_count(), applies - undone + redone);
    }
}
