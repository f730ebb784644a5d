//! The parallel engine's global frontier, grounded on `Stack.hpp`'s
//! abstract interface with two concrete backings:
//! `SynchronizedStack.hpp` (mutex-guarded) and `LockFreeStack.hpp` (a
//! Treiber stack with an atomic head).

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;

/// A LIFO frontier usable from multiple threads without external locking.
pub trait GlobalStack<T>: Send + Sync {
    fn push(&self, item: T);
    fn pop(&self) -> Option<T>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutex-guarded `Vec`-backed stack, the default per
/// `ParallelMatchingEngine`'s constructor when `lockFree` is false.
pub struct SynchronizedStack<T> {
    inner: Mutex<Vec<T>>,
}

impl<T> Default for SynchronizedStack<T> {
    fn default() -> Self {
        SynchronizedStack { inner: Mutex::new(Vec::new()) }
    }
}

impl<T: Send> GlobalStack<T> for SynchronizedStack<T> {
    fn push(&self, item: T) {
        self.inner.lock().push(item);
    }

    fn pop(&self) -> Option<T> {
        self.inner.lock().pop()
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }
}

struct Node<T> {
    value: T,
    next: *mut Node<T>,
}

/// A Treiber stack: `push`/`pop` retry a compare-and-swap on the head
/// pointer instead of taking a lock. `head` is cache-line padded since it is
/// the single point of contention across all worker threads.
pub struct LockFreeStack<T> {
    head: CachePadded<AtomicPtr<Node<T>>>,
    len: CachePadded<std::sync::atomic::AtomicUsize>,
}

impl<T> Default for LockFreeStack<T> {
    fn default() -> Self {
        LockFreeStack {
            head: CachePadded::new(AtomicPtr::new(ptr::null_mut())),
            len: CachePadded::new(std::sync::atomic::AtomicUsize::new(0)),
        }
    }
}

// SAFETY: `Node<T>` is only ever reachable through the atomic head pointer,
// and every node handed across threads is either owned exclusively by the
// stack or has just been uniquely reclaimed by the popping thread.
unsafe impl<T: Send> Send for LockFreeStack<T> {}
unsafe impl<T: Send> Sync for LockFreeStack<T> {}

impl<T: Send> GlobalStack<T> for LockFreeStack<T> {
    fn push(&self, item: T) {
        let node = Box::into_raw(Box::new(Node { value: item, next: ptr::null_mut() }));
        loop {
            let head = self.head.load(Ordering::Acquire);
            unsafe {
                (*node).next = head;
            }
            if self
                .head
                .compare_exchange_weak(head, node, Ordering::Release, Ordering::Relaxed)
                .is_ok()
            {
                self.len.fetch_add(1, Ordering::Relaxed);
                return;
            }
        }
    }

    fn pop(&self) -> Option<T> {
        loop {
            let head = self.head.load(Ordering::Acquire);
            if head.is_null() {
                return None;
            }
            let next = unsafe { (*head).next };
            if self
                .head
                .compare_exchange_weak(head, next, Ordering::Release, Ordering::Relaxed)
                .is_ok()
            {
                self.len.fetch_sub(1, Ordering::Relaxed);
                let node = unsafe { Box::from_raw(head) };
                return Some(node.value);
            }
        }
    }

    fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }
}

impl<T> Drop for LockFreeStack<T> {
    fn drop(&mut self) {
        let mut cur = *self.head.get_mut();
        while !cur.is_null() {
            let node = unsafe { Box::from_raw(cur) };
            cur = node.next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synchronized_stack_is_lifo() {
        let s: SynchronizedStack<i32> = SynchronizedStack::default();
        s.push(1);
        s.push(2);
        assert_eq!(s.pop(), Some(2));
        assert_eq!(s.pop(), Some(1));
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn lock_free_stack_is_lifo() {
        let s: LockFreeStack<i32> = LockFreeStack::default();
        s.push(1);
        s.push(2);
        s.push(3);
        assert_eq!(s.len(), 3);
        assert_eq!(s.pop(), Some(3));
        assert_eq!(s.pop(), Some(2));
        assert_eq!(s.pop(), Some(1));
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn lock_free_stack_survives_concurrent_push_pop() {
        use std::thread;

        let s: LockFreeStack<i32> = LockFreeStack::default();
        thread::scope(|scope| {
            for t in 0..4 {
                let s = &s;
                scope.spawn(move || {
                    for i in 0..1000 {
                        s.push(t * 1000 + i);
                    }
                });
            }
        });
        assert_eq!(s.len(), 4000);
        let mut popped = 0;
        while s.pop().is_some() {
            popped += 1;
        }
        assert_eq!(popped, 4000);
    }
}
