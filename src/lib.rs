pub mod avl_base;
pub mod avl_set;
pub mod error;

pub use avl_base::{
    avl::{AvlTree, Insertion},
    avl_traits::{AvlTraits, Comparator, DefaultAvlTraits},
    iter::Iter,
    tree_stats::TreeStats,
    OrdComparator,
};
pub use avl_set::AvlSet;
pub use error::{AllocError, InsertError, VerifyError};
