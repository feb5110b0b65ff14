//! Destination for builder output.
//!
//! Grounded on `original_source/src/util/vector_pairs_inserter.h`: a thin
//! `emplace_back`/`reserve` seam so builders don't need to know whether
//! their output is buffered, streamed to disk, or fed straight into an
//! index.

use crate::alphabet::Kmer;
use crate::position::LetterLoc;

/// Accepts `(k-mer, compressed position)` pairs as a builder produces them.
pub trait PairSink<const K: usize, const SIGMA: u64> {
    /// Record one pair.
    fn push(&mut self, kmer: Kmer<K, SIGMA>, loc: LetterLoc);

    /// Hint that roughly `additional` more pairs are coming.
    fn reserve(&mut self, additional: usize) {
        let _ = additional;
    }
}

/// The default sink: an in-memory buffer of pairs, in emission order.
#[derive(Debug, Clone)]
pub struct VecPairSink<const K: usize, const SIGMA: u64> {
    pairs: Vec<(Kmer<K, SIGMA>, LetterLoc)>,
}

impl<const K: usize, const SIGMA: u64> Default for VecPairSink<K, SIGMA> {
    fn default() -> Self {
        Self { pairs: Vec::new() }
    }
}

impl<const K: usize, const SIGMA: u64> VecPairSink<K, SIGMA> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_pairs(self) -> Vec<(Kmer<K, SIGMA>, LetterLoc)> {
        self.pairs
    }

    pub fn as_slice(&self) -> &[(Kmer<K, SIGMA>, LetterLoc)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<const K: usize, const SIGMA: u64> PairSink<K, SIGMA> for VecPairSink<K, SIGMA> {
    fn push(&mut self, kmer: Kmer<K, SIGMA>, loc: LetterLoc) {
        self.pairs.push((kmer, loc));
    }

    fn reserve(&mut self, additional: usize) {
        self.pairs.reserve(additional);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Letter;

    #[test]
    fn records_pairs_in_order() {
        let mut sink = VecPairSink::<2, 4>::new();
        let mut k1 = Kmer::<2, 4>::empty();
        k1.push_back(Letter(0));
        k1.push_back(Letter(1));
        sink.push(k1.clone(), LetterLoc(3));
        sink.push(k1, LetterLoc(7));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.as_slice()[0].1, LetterLoc(3));
        assert_eq!(sink.as_slice()[1].1, LetterLoc(7));
    }
}
