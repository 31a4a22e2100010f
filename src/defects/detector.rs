//! Kink and antikink detection on the periodic lattice.
//!
//! The field is cut at its zero crossings into blocks of constant sign. A
//! block holds a kink when it contains a run of at least `w_kink` sites all
//! above `h_kink`, and an antikink when the run lies below `-h_kink`.

use crate::lattice::{FieldState, LatticeConfig};

/// Indices `i` (with `i - 1` taken cyclically) where the field changes sign.
pub fn zero_crossings(f: &[f64]) -> Vec<usize> {
    let n = f.len();
    (0..n)
        .filter(|&i| {
            let prev = if i == 0 { n - 1 } else { i - 1 };
            f[i] * f[prev] < 0.0
        })
        .collect()
}

/// A contiguous cyclic run of sites between two consecutive zero crossings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefectBlock {
    pub start: usize,
    pub len: usize,
}

impl DefectBlock {
    /// Site indices of the block on a lattice of `n` sites, in order.
    pub fn indices(&self, n: usize) -> impl Iterator<Item = usize> {
        let start = self.start;
        (0..self.len).map(move |j| (start + j) % n)
    }
}

/// Split the lattice at the zero crossings.
///
/// The first block is the one wrapping from the last crossing through the
/// end of the lattice back to the first crossing; the rest follow in index
/// order. A field without sign changes has no blocks.
pub fn blocks(f: &[f64]) -> Vec<DefectBlock> {
    let zeros = zero_crossings(f);
    blocks_from_crossings(&zeros, f.len())
}

fn blocks_from_crossings(zeros: &[usize], n: usize) -> Vec<DefectBlock> {
    let (first, last) = match (zeros.first(), zeros.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };

    let mut out = Vec::with_capacity(zeros.len());
    out.push(DefectBlock {
        start: last,
        len: n - last + first,
    });
    for pair in zeros.windows(2) {
        out.push(DefectBlock {
            start: pair[0],
            len: pair[1] - pair[0],
        });
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    Either,
    Kink,
    AntiKink,
}

/// Kink detector with the width and height thresholds of a lattice.
#[derive(Debug, Clone, Copy)]
pub struct KinkDetector {
    w_kink: usize,
    h_kink: f64,
}

impl KinkDetector {
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            w_kink: config.w_kink(),
            h_kink: config.h_kink(),
        }
    }

    /// Longest-run test: some run of `w_kink` consecutive sites satisfies `pred`.
    fn has_run<P: Fn(f64) -> bool>(&self, block: &DefectBlock, f: &[f64], pred: P) -> bool {
        let mut count = 0;
        for i in block.indices(f.len()) {
            if pred(f[i]) {
                count += 1;
                if count >= self.w_kink {
                    return true;
                }
            } else {
                count = 0;
            }
        }
        false
    }

    pub fn kink_in_block(&self, block: &DefectBlock, f: &[f64]) -> bool {
        let h = self.h_kink;
        self.has_run(block, f, |x| x > h)
    }

    pub fn anti_kink_in_block(&self, block: &DefectBlock, f: &[f64]) -> bool {
        let h = self.h_kink;
        self.has_run(block, f, |x| x < -h)
    }

    /// Number of zero crossings and number of blocks at least `w_kink` wide.
    pub fn zeros_and_wide_gaps(&self, state: &FieldState) -> (usize, usize) {
        let f = state.current().as_slice();
        let zeros = zero_crossings(f);
        let gaps = blocks_from_crossings(&zeros, f.len())
            .iter()
            .filter(|block| block.len >= self.w_kink)
            .count();
        (zeros.len(), gaps)
    }

    /// Count kink and antikink detections walking the blocks in order.
    ///
    /// Until the first detection both kinds are searched for. After that the
    /// search alternates: a kink must be followed by an antikink and vice
    /// versa, as they must interleave on a ring.
    pub fn tally(&self, f: &[f64]) -> (usize, usize) {
        let mut kinks = 0;
        let mut anti_kinks = 0;
        let mut search = Search::Either;

        for block in blocks(f) {
            match search {
                Search::Either => {
                    let kink = self.kink_in_block(&block, f);
                    let anti_kink = self.anti_kink_in_block(&block, f);
                    if kink {
                        kinks += 1;
                    }
                    if anti_kink {
                        anti_kinks += 1;
                    }
                    search = match (kink, anti_kink) {
                        (true, false) => Search::AntiKink,
                        (false, true) => Search::Kink,
                        _ => Search::Either,
                    };
                }
                Search::Kink => {
                    if self.kink_in_block(&block, f) {
                        kinks += 1;
                        search = Search::AntiKink;
                    }
                }
                Search::AntiKink => {
                    if self.anti_kink_in_block(&block, f) {
                        anti_kinks += 1;
                        search = Search::Kink;
                    }
                }
            }
        }
        (kinks, anti_kinks)
    }

    /// Number of complete kink-antikink pairs in the current field.
    pub fn pairs(&self, state: &FieldState) -> usize {
        let (kinks, anti_kinks) = self.tally(state.current().as_slice());
        kinks.min(anti_kinks)
    }
}

/// Zero crossings of the current field slice.
pub fn state_zero_crossings(state: &FieldState) -> Vec<usize> {
    zero_crossings(state.current().as_slice())
}
