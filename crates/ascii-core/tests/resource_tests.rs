// Host-side tests for resource replacement.

use ascii_core::{Dispose, ResourceSlot};
use std::cell::RefCell;
use std::rc::Rc;

struct Tracked {
    id: u32,
    log: Rc<RefCell<Vec<u32>>>,
}

impl Dispose for Tracked {
    fn dispose(self) {
        self.log.borrow_mut().push(self.id);
    }
}

fn tracked(id: u32, log: &Rc<RefCell<Vec<u32>>>) -> Tracked {
    Tracked {
        id,
        log: log.clone(),
    }
}

#[test]
fn install_disposes_exactly_the_replaced_resource() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot = ResourceSlot::new(tracked(1, &log));
    assert_eq!(slot.generation(), 0);
    assert!(log.borrow().is_empty());

    assert_eq!(slot.install(tracked(2, &log)), 1);
    assert_eq!(*log.borrow(), vec![1]);
    assert_eq!(slot.get().id, 2);

    slot.install(tracked(3, &log));
    assert_eq!(*log.borrow(), vec![1, 2]);
    assert_eq!(slot.get().id, 3);
    assert_eq!(slot.generation(), 2);
}

#[test]
fn get_mut_edits_in_place() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut slot = ResourceSlot::new(tracked(1, &log));
    slot.get_mut().id = 5;
    slot.install(tracked(6, &log));
    assert_eq!(*log.borrow(), vec![5]);
}
