/// Key material, wrapped so that signatures keep it apart from the data it
/// acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key<T>(pub T);
