//! Efficiency of the coders
//!
//! The main figure is the ratio of coded bits to the bits a fixed width code would need,
//! `len(sequence) * ceil(log2(|alphabet|))`.  Below 1 means the coder compressed.
//! Entropy statistics are also provided for comparing against the theoretical limit.

use crate::{arithmetic,lempel_ziv};
use crate::{Alphabet,Coder,Result};

/// Ratio of `coded_bits` to the fixed width baseline.
/// A one symbol alphabet needs no bits at all, in that case 0 is returned.
pub fn ratio(coded_bits: usize,num_symbols: usize,alphabet: &Alphabet) -> f64 {
    let baseline = num_symbols * alphabet.index_bits();
    match baseline {
        0 => 0.0,
        b => coded_bits as f64 / b as f64
    }
}

/// Encode `sequence` with `coder` and compare with the fixed width baseline.
/// The adaptive coder always uses the sequence's own alphabet, `alphabet` only sets the baseline.
pub fn efficiency(sequence: &str,alphabet: &Alphabet,coder: Coder) -> Result<f64> {
    let coded = match coder {
        Coder::Adaptive => arithmetic::encode(sequence,&arithmetic::STD_OPTIONS)?,
        Coder::Dictionary => lempel_ziv::encode(sequence,alphabet)?
    };
    let num_symbols = sequence.chars().count();
    let ans = ratio(coded.len(),num_symbols,alphabet);
    log::debug!("{:?} coder: {} bits for {} symbols, efficiency {}",coder,coded.len(),num_symbols,ans);
    Ok(ans)
}

/// Relative frequency of each symbol, in canonical order
pub fn distribution(sequence: &str) -> Vec<(char,f64)> {
    let alphabet = Alphabet::from_sequence(sequence);
    let mut counts = vec![0usize;alphabet.len()];
    for c in sequence.chars() {
        if let Some(i) = alphabet.index_of(c) {
            counts[i] += 1;
        }
    }
    let total = sequence.chars().count() as f64;
    alphabet.symbols().iter().zip(counts).map(|(c,n)| (*c,n as f64 / total)).collect()
}

/// Shannon entropy in bits per symbol, zero probabilities contribute nothing
pub fn entropy(probabilities: &[f64]) -> f64 {
    -probabilities.iter().filter(|p| **p > 0.0).map(|p| p * p.log2()).sum::<f64>()
}

/// entropy divided by the average code length, 0 if the average length is 0
pub fn entropy_efficiency(entropy: f64,bits_per_symbol: f64) -> f64 {
    match bits_per_symbol > 0.0 {
        true => entropy / bits_per_symbol,
        false => 0.0
    }
}

// *************** TESTS *****************

#[cfg(test)]
const S2: &str = "ABCABACBABCCACBAABBCCABAABB";

#[test]
fn efficiency_works() {
    let abc = Alphabet::new(['A','B','C']);
    let adaptive = efficiency(S2,&abc,Coder::Adaptive).unwrap();
    assert!((adaptive - 47.0/54.0).abs() < 1e-12);
    let dictionary = efficiency(S2,&abc,Coder::Dictionary).unwrap();
    assert!((dictionary - 69.0/54.0).abs() < 1e-12);
    // 13 bits against 5 symbols at 2 bits
    assert!((efficiency("ABBCA",&abc,Coder::Dictionary).unwrap() - 1.3).abs() < 1e-12);
}

#[test]
fn unity() {
    let ab = Alphabet::new(['A','B']);
    assert_eq!(ratio(8,4,&ab),2.0);
    assert_eq!(ratio(4,4,&ab),1.0);
}

#[test]
fn degenerate_alphabet() {
    let a = Alphabet::new(['A']);
    assert_eq!(ratio(3,7,&a),0.0);
    assert_eq!(efficiency("AAAAAAA",&a,Coder::Dictionary).unwrap(),0.0);
    assert_eq!(efficiency("AAAAAAA",&a,Coder::Adaptive).unwrap(),0.0);
    assert!(efficiency("",&a,Coder::Adaptive).is_err());
}

#[test]
fn statistics() {
    let dist = distribution("ABBCA");
    assert_eq!(dist,vec![('A',0.4),('B',0.4),('C',0.2)]);
    let probs: Vec<f64> = dist.iter().map(|(_,p)| *p).collect();
    let h = entropy(&probs);
    assert!((h - 1.5219280948873621).abs() < 1e-12);
    assert_eq!(entropy(&[1.0,0.0]),0.0);
    assert!((entropy_efficiency(h,2.0) - h/2.0).abs() < 1e-12);
    assert_eq!(entropy_efficiency(h,0.0),0.0);
}
