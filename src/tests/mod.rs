use std::{cell::Cell, rc::Rc};

use crate::vector::Vector;

mod model;

/// Counts how many of its clones are still alive.
#[derive(Debug)]
pub struct Tracked {
    value: i32,
    alive: Rc<Cell<isize>>,
}
impl Tracked {
    pub fn new(value: i32, alive: &Rc<Cell<isize>>) -> Self {
        alive.set(alive.get() + 1);
        Self {
            value,
            alive: Rc::clone(alive),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}
impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.value, &self.alive)
    }
}
impl Drop for Tracked {
    fn drop(&mut self) {
        self.alive.set(self.alive.get() - 1);
    }
}

pub fn assert_size_invariant<T>(v: &Vector<T>) {
    assert!(v.len() <= v.capacity());
    assert_eq!(v.is_empty(), v.len() == 0);
}
