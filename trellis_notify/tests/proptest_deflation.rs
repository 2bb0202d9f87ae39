// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for dependent storage.
//!
//! 1. The dependent count always equals the number of live attachments.
//! 2. Storage is `Empty`/`One` exactly when the count is 0/1.
//! 3. Broadcast order always matches attachment order of the survivors.
//! 4. Freeze scopes never leak: any balanced sequence leaves depth zero.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use trellis_notify::{
    ChangeKind, ComponentKind, DependencyObserver, DependentStorage, NotificationHub,
    NotifyError,
};

const GEOMETRY: ChangeKind = ChangeKind::new(0);

struct Tagged {
    id: usize,
    log: Rc<RefCell<Vec<usize>>>,
}

impl DependencyObserver for Tagged {
    fn dependency_dirtied(
        &self,
        _: ComponentKind,
        _: &NotificationHub,
        _: ChangeKind,
    ) -> Result<(), NotifyError> {
        self.log.borrow_mut().push(self.id);
        Ok(())
    }
}

#[derive(Clone, Debug)]
enum Op {
    Attach(usize),
    Detach(usize),
    Dirty,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0_usize..5).prop_map(Op::Attach),
        3 => (0_usize..5).prop_map(Op::Detach),
        1 => Just(Op::Dirty),
    ]
}

fn expected_storage(count: usize) -> DependentStorage {
    match count {
        0 => DependentStorage::Empty,
        1 => DependentStorage::One,
        _ => DependentStorage::Many,
    }
}

proptest! {
    #[test]
    fn storage_tracks_a_plain_list(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let observers: Vec<_> = (0..5)
            .map(|id| Rc::new(Tagged { id, log: log.clone() }))
            .collect();
        let hub = NotificationHub::new(ComponentKind::new(1));
        let mut model: Vec<usize> = Vec::new();

        for op in ops {
            match op {
                Op::Attach(id) => {
                    hub.attach(&observers[id]);
                    model.push(id);
                }
                Op::Detach(id) => {
                    let removed = hub.detach(&observers[id]);
                    let pos = model.iter().position(|&m| m == id);
                    prop_assert_eq!(removed, pos.is_some());
                    if let Some(pos) = pos {
                        model.remove(pos);
                    }
                }
                Op::Dirty => {
                    log.borrow_mut().clear();
                    hub.dirty(GEOMETRY).unwrap();
                    let seen = log.borrow().clone();
                    prop_assert_eq!(seen, model.clone());
                }
            }
            prop_assert_eq!(hub.dependent_count(), model.len());
            prop_assert_eq!(hub.storage(), expected_storage(model.len()));
        }
    }

    #[test]
    fn balanced_freezes_leave_hub_thawed(depths in prop::collection::vec(0_u32..4, 0..16)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let observer = Rc::new(Tagged { id: 0, log: log.clone() });
        let hub = NotificationHub::new(ComponentKind::new(1));
        hub.attach(&observer);

        for depth in depths {
            for _ in 0..depth {
                hub.freeze();
            }
            hub.dirty(GEOMETRY).unwrap();
            for _ in 0..depth {
                hub.unfreeze();
            }
            prop_assert_eq!(hub.freeze_depth(), 0);
        }

        log.borrow_mut().clear();
        hub.dirty(GEOMETRY).unwrap();
        let calls = log.borrow().len();
        prop_assert_eq!(calls, 1);
    }
}
