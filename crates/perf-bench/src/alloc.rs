//! Process-wide allocation counting.
//!
//! Install [`CountingAllocator`] as the global allocator of a binary or test
//! crate to let the harness report allocations:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: perf_bench::alloc::CountingAllocator = perf_bench::alloc::CountingAllocator;
//! ```
//!
//! Without it, [`snapshot`] returns `None` and records carry no allocation data.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Forwards to the system allocator while counting allocations and requested bytes.
pub struct CountingAllocator;

#[inline]
fn record(bytes: usize) {
    INSTALLED.store(true, Ordering::Relaxed);
    ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    ALLOCATED_BYTES.fetch_add(bytes as u64, Ordering::Relaxed);
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    // A reallocation counts as one allocation of the new size.
    unsafe fn realloc(&self, ptr: *mut u8, old_layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, old_layout, new_size) };
        if !new_ptr.is_null() {
            record(new_size);
        }
        new_ptr
    }
}

/// Allocation totals, either cumulative (a snapshot) or between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocationCount {
    pub allocations: u64,
    pub bytes: u64,
}

impl AllocationCount {
    /// Allocations made after `earlier` was taken.
    pub fn since(self, earlier: AllocationCount) -> AllocationCount {
        AllocationCount {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }
}

/// True once at least one allocation has gone through [`CountingAllocator`].
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Relaxed)
}

/// Current cumulative counters, or `None` when the counting allocator is not in use.
pub fn snapshot() -> Option<AllocationCount> {
    if !is_installed() {
        return None;
    }
    Some(AllocationCount {
        allocations: ALLOCATIONS.load(Ordering::Relaxed),
        bytes: ALLOCATED_BYTES.load(Ordering::Relaxed),
    })
}
