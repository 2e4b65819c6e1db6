use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
    ptr::null_mut,
};

use fast_avl::{AllocError, AvlSet, AvlTree, InsertError, Insertion};

/// System allocator that refuses every request made by the current thread
/// while its failure switch is on, counting the refused requests.
struct Switchable;

thread_local! {
    static FAIL: Cell<bool> = const { Cell::new(false) };
    static REFUSED: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for Switchable {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if FAIL.try_with(Cell::get).unwrap_or(false) {
            let _ = REFUSED.try_with(|r| r.set(r.get() + 1));
            return null_mut();
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: Switchable = Switchable;

/// Runs `f` with every allocation on this thread failing and returns its
/// result together with the number of refused allocations.
fn failing<R>(f: impl FnOnce() -> R) -> (R, usize) {
    REFUSED.with(|r| r.set(0));
    FAIL.with(|s| s.set(true));
    let r = f();
    FAIL.with(|s| s.set(false));
    (r, REFUSED.with(Cell::get))
}

fn scenario_tree() -> AvlTree<i32> {
    let mut tree: AvlTree<i32> = AvlTree::new();
    for k in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
        tree.insert(k).unwrap();
    }
    tree
}

#[test]
fn failed_insert_leaves_tree_untouched() {
    let mut tree = scenario_tree();
    let before = format!("{:?}", tree);
    let stats_before = tree.get_stats().clone();

    let (r, refused) = failing(|| tree.insert(10));
    assert_eq!(refused, 1);
    match r {
        Err(InsertError {
            error: AllocError { size },
            rejected,
        }) => {
            assert!(size > 0);
            assert_eq!(rejected, 10);
        }
        other => panic!("expected an allocation failure, got {:?}", other),
    }

    assert_eq!(format!("{:?}", tree), before);
    assert_eq!(tree.get_stats(), &stats_before);
    tree.verify().unwrap();
    assert_eq!(tree.size(), 9);
    assert!(!tree.contains(&10));

    // duplicates never allocate, so they still succeed
    let (r, refused) = failing(|| tree.insert(5));
    assert_eq!(refused, 0);
    assert_eq!(
        r,
        Ok(Insertion::Present {
            existing: 5,
            rejected: 5
        })
    );

    // and the tree is usable again once memory is back
    assert_eq!(tree.insert(10), Ok(Insertion::Inserted));
    tree.verify().unwrap();
    assert_eq!(tree.rank(&10), 9);
}

#[test]
fn failed_insert_returns_key_and_reports_size() {
    let mut set: AvlSet<String> = AvlSet::new();
    set.insert("kept".to_string()).unwrap();

    let lost = "lost".to_string();
    let (r, _) = failing(|| set.insert(lost));
    let err = r.unwrap_err();
    assert_eq!(err.rejected, "lost");
    assert!(err.to_string().starts_with("failed to allocate"));
    assert!(std::error::Error::source(&err).is_some());

    assert_eq!(set.len(), 1);
    assert_eq!(set.insert(err.rejected), Ok(true));
    assert_eq!(set.len(), 2);
}
