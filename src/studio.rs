pub(crate) mod gallery;
pub(crate) mod prompt;
pub(crate) mod variations;
