//! Adaptive order-0 probability model used by the `arithmetic` module.
//!
//! Counts start at 1 for every symbol so that no probability is ever zero,
//! and go up by 1 each time a symbol is coded.  Symbols are identified by their
//! position in the alphabet, the line is laid out in that same order.
//!
//! `FrequencyTable::partition` gives the line as exact rationals.  The coder itself only
//! needs the integer piece of one symbol per step, see `piece` and `find`.

use num::{BigInt,BigRational,Zero,One};

/// Half open interval `[low,high)`
#[derive(Clone,Debug,PartialEq)]
pub struct Interval {
    pub low: BigRational,
    pub high: BigRational
}

impl Interval {
    /// the full coding space [0,1)
    pub fn unit() -> Self {
        Self {
            low: BigRational::zero(),
            high: BigRational::one()
        }
    }
    pub fn width(&self) -> BigRational {
        &self.high - &self.low
    }
    pub fn contains(&self,x: &BigRational) -> bool {
        self.low <= *x && *x < self.high
    }
    pub fn midpoint(&self) -> BigRational {
        &self.low + self.width() / BigInt::from(2)
    }
}

/// The enclosing interval cut into one piece per symbol, in alphabet order.
pub struct Line {
    pieces: Vec<Interval>
}

impl Line {
    pub fn get(&self,idx: usize) -> Option<&Interval> {
        self.pieces.get(idx)
    }
    /// First symbol whose piece contains `x`, linear scan in alphabet order.
    pub fn locate(&self,x: &BigRational) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.contains(x))
    }
}

#[derive(Clone,Debug)]
pub struct FrequencyTable {
    counts: Vec<usize>,
    total: usize
}

impl FrequencyTable {
    pub fn new(num_symbols: usize) -> Self {
        Self {
            counts: vec![1;num_symbols],
            total: num_symbols
        }
    }
    pub fn count(&self,idx: usize) -> usize {
        self.counts[idx]
    }
    pub fn total(&self) -> usize {
        self.total
    }
    /// increment the count of one symbol and the total
    pub fn update(&mut self,idx: usize) {
        self.counts[idx] += 1;
        self.total += 1;
    }
    /// Cumulative count of the symbols before `idx`, and the count of `idx`.
    /// This is the piece of the line belonging to `idx`, in units of 1/total.
    pub fn piece(&self,idx: usize) -> Option<(usize,usize)> {
        let count = *self.counts.get(idx)?;
        Some((self.counts[..idx].iter().sum(),count))
    }
    /// Symbol whose piece contains `target`, which is in units of 1/total.
    /// Linear scan in alphabet order, `None` if `target >= total`.
    pub fn find(&self,target: usize) -> Option<usize> {
        let mut cum = 0;
        for (idx,count) in self.counts.iter().enumerate() {
            cum += count;
            if target < cum {
                return Some(idx);
            }
        }
        None
    }
    /// Cut `enclosing` into contiguous pieces with widths proportional to count/total.
    /// Exact arithmetic means the last piece ends precisely at `enclosing.high`.
    pub fn partition(&self,enclosing: &Interval) -> Line {
        let width = enclosing.width();
        let total = BigInt::from(self.total);
        let mut prev = enclosing.low.clone();
        let mut pieces = Vec::with_capacity(self.counts.len());
        for count in &self.counts {
            let p = BigRational::new(BigInt::from(*count),total.clone());
            let next = &prev + &width * p;
            pieces.push(Interval {
                low: prev,
                high: next.clone()
            });
            prev = next;
        }
        Line { pieces }
    }
}

// *************** TESTS *****************

#[cfg(test)]
fn ratio(n: i64,d: i64) -> BigRational {
    BigRational::new(BigInt::from(n),BigInt::from(d))
}

#[test]
fn initial_line() {
    let table = FrequencyTable::new(3);
    assert_eq!(table.total(),3);
    let line = table.partition(&Interval::unit());
    assert_eq!(line.get(0).unwrap().high,ratio(1,3));
    assert_eq!(line.get(1).unwrap().low,ratio(1,3));
    assert_eq!(line.get(2).unwrap().high,ratio(1,1));
    assert!(line.get(3).is_none());
}

#[test]
fn adapted_line() {
    let mut table = FrequencyTable::new(3);
    table.update(0);
    assert_eq!(table.count(0),2);
    assert_eq!(table.total(),4);
    let enclosing = Interval { low: ratio(0,1), high: ratio(1,3) };
    let line = table.partition(&enclosing);
    // B gets [1/6,1/4) as in the first step of coding ABBCA
    assert_eq!(line.get(1).unwrap(),&Interval { low: ratio(1,6), high: ratio(1,4) });
    assert_eq!(line.get(2).unwrap().high,ratio(1,3));
    assert_eq!(line.locate(&ratio(1,5)),Some(1));
    assert_eq!(line.locate(&ratio(1,4)),Some(2));
    assert_eq!(line.locate(&ratio(1,2)),None);
}

#[test]
fn pieces() {
    let mut table = FrequencyTable::new(3);
    table.update(1);
    table.update(1);
    // counts 1,3,1 out of 5
    assert_eq!(table.piece(0),Some((0,1)));
    assert_eq!(table.piece(1),Some((1,3)));
    assert_eq!(table.piece(2),Some((4,1)));
    assert_eq!(table.piece(3),None);
    assert_eq!(table.find(0),Some(0));
    assert_eq!(table.find(3),Some(1));
    assert_eq!(table.find(4),Some(2));
    assert_eq!(table.find(5),None);
    // the same answers as scanning the line
    let line = table.partition(&Interval::unit());
    for target in 0..5 {
        assert_eq!(table.find(target),line.locate(&ratio(target as i64,5)));
    }
}

#[test]
fn single_symbol_line() {
    let mut table = FrequencyTable::new(1);
    table.update(0);
    let enclosing = Interval { low: ratio(1,4), high: ratio(1,2) };
    let line = table.partition(&enclosing);
    assert_eq!(line.get(0).unwrap(),&enclosing);
    assert_eq!(enclosing.midpoint(),ratio(3,8));
    assert!(enclosing.contains(&ratio(1,4)));
    assert!(!enclosing.contains(&ratio(1,2)));
}
