//! Cross-crate scenarios: several passes, several sources, real stores.

#[cfg(test)]
mod support;
#[cfg(test)]
mod sync;
