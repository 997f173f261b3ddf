//! Iterators for bucket sets

use crate::{set::BoundedIntSet, set::BucketSet, ChainedBucketSet, FlatBucketSet, Key};

/// An iterator over the keys of a set, in bucket order
pub struct Keys<'a> {
    inner: Box<dyn Iterator<Item = Key> + 'a>,
}

impl<'a> Keys<'a> {
    pub(crate) fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Key> + 'a,
    {
        Self {
            inner: Box::new(iter),
        }
    }
}

impl Iterator for Keys<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a> IntoIterator for &'a FlatBucketSet {
    type Item = Key;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

impl<'a> IntoIterator for &'a ChainedBucketSet {
    type Item = Key;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

impl<'a> IntoIterator for &'a BucketSet {
    type Item = Key;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}
