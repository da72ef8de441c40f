pub mod assembly;
pub mod clipping;
pub mod inclusion;

#[doc(inline)]
pub use assembly::RingAssembler;

#[doc(inline)]
pub use clipping::{Clipped, RectClipper};

#[doc(inline)]
pub use inclusion::{classify, InclusionForest, InclusionNode};
