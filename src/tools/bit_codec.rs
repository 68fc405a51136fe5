//! Conversions between numbers and strings of binary digits.
//! Bitstrings are plain text, most significant bit first.

use bit_vec::BitVec;
use num::{BigInt,BigRational,Zero,One};
use num_traits::PrimInt;
use crate::{Error,Result};

/// number of bits needed to write `n`, which is 0 for 0
pub fn bit_length(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

/// `ceil(log2(n))`, taken as 0 when `n` is 0 or 1
pub fn ceil_log2(n: usize) -> usize {
    match n {
        0 | 1 => 0,
        _ => bit_length(n - 1)
    }
}

/// shift `bit` into the bottom of `acc`, error if the result would overflow
fn push_bit<T: PrimInt>(acc: T,bit: bool,field_len: usize) -> Result<T> {
    let two = T::one() + T::one();
    let b = match bit {
        true => T::one(),
        false => T::zero()
    };
    match acc.checked_mul(&two).and_then(|v| v.checked_add(&b)) {
        Some(v) => Ok(v),
        None => Err(Error::CorruptedData(format!("binary field of {} bits is too wide",field_len)))
    }
}

fn parse_bit(c: char) -> Result<bool> {
    match c {
        '0' => Ok(false),
        '1' => Ok(true),
        _ => Err(Error::InvalidBitstring(c))
    }
}

/// Big endian binary of `value`, left padded with zeros to `width`.
/// If `value` needs more than `width` bits, all of them are written.
pub fn uint_to_bits<T: PrimInt>(value: T,width: usize) -> String {
    let mut rev = Vec::new();
    let mut v = value;
    while v > T::zero() {
        rev.push(match v & T::one() == T::one() {
            true => '1',
            false => '0'
        });
        v = v >> 1;
    }
    while rev.len() < width {
        rev.push('0');
    }
    rev.iter().rev().collect()
}

/// Parse a big endian bitstring into an integer.
pub fn bits_to_uint<T: PrimInt>(bits: &str) -> Result<T> {
    let mut ans = T::zero();
    for c in bits.chars() {
        ans = push_bit(ans,parse_bit(c)?,bits.len())?;
    }
    Ok(ans)
}

/// Fixed width code for the symbol at position `index` of the alphabet
pub fn symbol_to_bits(index: usize,width: usize) -> String {
    uint_to_bits(index,width)
}

/// Expand a fraction in [0,1) into `length` binary digits.
/// Each digit comes from doubling what is left of the fraction and comparing with 1.
pub fn fraction_to_bits(value: &BigRational,length: usize) -> String {
    let den = value.denom();
    let mut num = value.numer().clone();
    let mut ans = String::with_capacity(length);
    for _i in 0..length {
        num = &num + &num;
        if num >= *den {
            ans.push('1');
            num = num - den;
        } else {
            ans.push('0');
        }
    }
    ans
}

/// Read a bitstring as the binary fraction `0.b1b2b3...`, the result is not reduced.
pub fn bits_to_fraction(bits: &str) -> Result<BigRational> {
    if let Some(c) = bits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(Error::InvalidBitstring(c));
    }
    let num = match bits.is_empty() {
        true => BigInt::zero(),
        false => BigInt::parse_bytes(bits.as_bytes(),2).unwrap_or_default()
    };
    Ok(BigRational::new_raw(num,BigInt::one() << bits.len()))
}

/// Reads consecutive fields of given widths from a bitstring.
pub struct BitReader {
    bits: BitVec,
    ptr: usize
}

impl BitReader {
    pub fn from_bitstring(s: &str) -> Result<Self> {
        let mut bits = BitVec::with_capacity(s.len());
        for c in s.chars() {
            bits.push(parse_bit(c)?);
        }
        Ok(Self {
            bits,
            ptr: 0
        })
    }
    /// offset of the next unread bit
    pub fn position(&self) -> usize {
        self.ptr
    }
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.ptr
    }
    /// Get the next `num_bits` as an integer, MSB first.
    /// If fewer bits remain, `None` is returned and nothing is consumed.
    pub fn get_code<T: PrimInt>(&mut self,num_bits: usize) -> Result<Option<T>> {
        if num_bits > self.remaining() {
            return Ok(None);
        }
        let mut ans = T::zero();
        for i in self.ptr..self.ptr+num_bits {
            ans = push_bit(ans,self.bits.get(i).unwrap_or(false),num_bits)?;
        }
        self.ptr += num_bits;
        Ok(Some(ans))
    }
}

// *************** TESTS *****************

#[test]
fn integer_bits() {
    assert_eq!(uint_to_bits(10usize,4),"1010");
    assert_eq!(uint_to_bits(1usize,3),"001");
    assert_eq!(uint_to_bits(0usize,0),"");
    assert_eq!(uint_to_bits(0usize,2),"00");
    assert_eq!(uint_to_bits(5u8,1),"101");
    assert_eq!(bits_to_uint::<usize>("0001010").unwrap(),10);
    assert_eq!(bits_to_uint::<usize>("").unwrap(),0);
    assert_eq!(bits_to_uint::<u8>("2"),Err(Error::InvalidBitstring('2')));
    assert!(bits_to_uint::<u8>("111111111").is_err());
}

#[test]
fn logarithms() {
    assert_eq!(ceil_log2(1),0);
    assert_eq!(ceil_log2(2),1);
    assert_eq!(ceil_log2(3),2);
    assert_eq!(ceil_log2(4),2);
    assert_eq!(ceil_log2(27),5);
    assert_eq!(bit_length(0),0);
    assert_eq!(bit_length(15),4);
    assert_eq!(bit_length(16),5);
}

#[test]
fn fractions() {
    let x = BigRational::new(BigInt::from(8),BigInt::from(35));
    assert_eq!(fraction_to_bits(&x,11),"00111010100");
    let half = BigRational::new(BigInt::from(1),BigInt::from(2));
    assert_eq!(fraction_to_bits(&half,3),"100");
    assert_eq!(bits_to_fraction("0110").unwrap(),BigRational::new(BigInt::from(3),BigInt::from(8)));
    assert_eq!(bits_to_fraction("").unwrap(),BigRational::zero());
    assert_eq!(bits_to_fraction("01x"),Err(Error::InvalidBitstring('x')));
}

#[test]
fn reader_fields() {
    let mut reader = BitReader::from_bitstring("0000110100000").unwrap();
    assert_eq!(reader.get_code::<usize>(2).unwrap(),Some(0));
    assert_eq!(reader.get_code::<usize>(3).unwrap(),Some(1));
    assert_eq!(reader.get_code::<usize>(4).unwrap(),Some(10));
    assert_eq!(reader.get_code::<usize>(0).unwrap(),Some(0));
    assert_eq!(reader.position(),9);
    assert_eq!(reader.get_code::<usize>(5).unwrap(),None);
    assert_eq!(reader.remaining(),4);
    assert_eq!(reader.get_code::<usize>(4).unwrap(),Some(0));
    assert_eq!(reader.remaining(),0);
}
