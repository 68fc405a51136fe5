//! Adaptive Arithmetic Coding
//!
//! Order-0 model, counts adapt after every symbol and are never transmitted.
//! The interval is narrowed exactly: it is kept as integers over a common denominator,
//! the product of the model totals seen so far, which is never reduced.  There is no
//! precision to configure.  Integers grow with the sequence and the time with roughly the
//! square of its length, `Options::max_symbols` puts a bound on this.
//!
//! The whole bitstring is read as a single binary fraction during decoding, it is
//! never consumed incrementally.  The decoder has to be told the alphabet and the
//! number of symbols, neither is stored in the bitstring.

use num::{BigInt,BigRational,Zero,One,ToPrimitive};
use crate::tools::adaptive_model::FrequencyTable;
use crate::tools::bit_codec;
use crate::{Alphabet,Error,Result};

/// Options controlling arithmetic coding
#[derive(Clone)]
pub struct Options {
    /// return error if the sequence has more symbols than this
    pub max_symbols: usize
}

pub const STD_OPTIONS: Options = Options {
    max_symbols: 1 << 14
};

/// Encoder state, the interval is `[low/denom, (low+width)/denom)`.
struct AdaptiveCoder {
    table: FrequencyTable,
    low: BigInt,
    width: BigInt,
    denom: BigInt
}

impl AdaptiveCoder {
    fn create(num_symbols: usize) -> Self {
        Self {
            table: FrequencyTable::new(num_symbols),
            low: BigInt::zero(),
            width: BigInt::one(),
            denom: BigInt::one()
        }
    }
    /// Narrow to the piece belonging to symbol `idx` using the current statistics,
    /// then count the symbol so the next piece comes from the updated model.
    fn narrow(&mut self,idx: usize) -> Result<()> {
        let (cum,count) = match self.table.piece(idx) {
            Some(piece) => piece,
            None => return Err(Error::CorruptedData(format!("symbol index {} is outside the line",idx)))
        };
        let total = BigInt::from(self.table.total());
        self.low = &self.low * &total + &self.width * BigInt::from(cum);
        self.width = &self.width * BigInt::from(count);
        self.denom = &self.denom * &total;
        self.table.update(idx);
        log::trace!("narrowed by {}/{} at {}",count,total,cum);
        Ok(())
    }
    fn width(&self) -> BigRational {
        BigRational::new_raw(self.width.clone(),self.denom.clone())
    }
    /// `low + width/2`
    fn midpoint(&self) -> BigRational {
        BigRational::new_raw(&self.low * BigInt::from(2) + &self.width,&self.denom * BigInt::from(2))
    }
}

/// Decoder state, the position of the code value inside the current interval,
/// `(label - low) / width = num/den`, which stays in [0,1).
struct AdaptiveDecoder {
    table: FrequencyTable,
    num: BigInt,
    den: BigInt
}

impl AdaptiveDecoder {
    fn create(num_symbols: usize,label: &BigRational) -> Self {
        Self {
            table: FrequencyTable::new(num_symbols),
            num: label.numer().clone(),
            den: label.denom().clone()
        }
    }
    /// Find the symbol whose piece holds the code value, then narrow to that piece and
    /// count the symbol.  The piece `[cum,cum+count)/total` holds the code value exactly
    /// when `cum <= floor(total * num/den) < cum+count`.
    fn next_symbol(&mut self) -> Option<usize> {
        let total = BigInt::from(self.table.total());
        let target = (&self.num * &total / &self.den).to_usize()?;
        let idx = self.table.find(target)?;
        let (cum,count) = self.table.piece(idx)?;
        self.num = &self.num * &total - &self.den * BigInt::from(cum);
        self.den = &self.den * BigInt::from(count);
        self.table.update(idx);
        Some(idx)
    }
}

/// Number of bits to write for an interval of `width`, `ceil(-log2(width)) + 1`.
/// The extra bit keeps the truncated midpoint inside the interval.
/// Computed exactly as the smallest `m` with `2^-m <= width`, plus one.
/// `width` need not be in lowest terms.
fn code_length(width: &BigRational) -> usize {
    let p = width.numer();
    let q = width.denom();
    let mut m = (q.bits() as usize).saturating_sub(p.bits() as usize);
    while (p << m) < *q {
        m += 1;
    }
    while m > 0 && (p << (m-1)) >= *q {
        m -= 1;
    }
    m + 1
}

fn check_length(len: usize,opt: &Options) -> Result<()> {
    if len > opt.max_symbols {
        return Err(Error::SequenceTooLong { len, max: opt.max_symbols });
    }
    Ok(())
}

/// Encode a sequence, the alphabet is the set of symbols in the sequence in sorted order.
pub fn encode(sequence: &str,opt: &Options) -> Result<String> {
    let alphabet = Alphabet::from_sequence(sequence);
    if alphabet.is_empty() {
        return Err(Error::InvalidInput("nothing to encode, sequence is empty".to_string()));
    }
    let len = sequence.chars().count();
    check_length(len,opt)?;
    log::debug!("arithmetic coding {} symbols over alphabet {}",len,alphabet);
    let mut coder = AdaptiveCoder::create(alphabet.len());
    for c in sequence.chars() {
        let idx = alphabet.index_of(c).ok_or_else(|| Error::InvalidInput(format!("symbol {:?} is not in the alphabet",c)))?;
        coder.narrow(idx)?;
    }
    let num_bits = code_length(&coder.width());
    log::debug!("final interval width 2^-{}, writing {} bits",num_bits - 1,num_bits);
    Ok(bit_codec::fraction_to_bits(&coder.midpoint(),num_bits))
}

/// Decode `length` symbols.  The alphabet must be the one the encoder derived from the
/// original sequence, a different alphabet is not detected and produces garbage.
pub fn decode(bits: &str,alphabet: &Alphabet,length: usize,opt: &Options) -> Result<String> {
    if alphabet.is_empty() {
        return Err(Error::MissingParameter("alphabet"));
    }
    if length == 0 {
        return Err(Error::MissingParameter("length"));
    }
    check_length(length,opt)?;
    if bits.is_empty() {
        return Err(Error::InvalidInput("nothing to decode, bitstring is empty".to_string()));
    }
    let label = bit_codec::bits_to_fraction(bits)?;
    log::debug!("decoding {} symbols from {} bits over alphabet {}",length,bits.len(),alphabet);
    let mut decoder = AdaptiveDecoder::create(alphabet.len(),&label);
    let mut ans = String::new();
    for step in 0..length {
        let symbol = match decoder.next_symbol().and_then(|idx| alphabet.get(idx)) {
            Some(c) => c,
            None => {
                log::error!("code value is outside every interval at step {}",step);
                return Err(Error::CorruptedData(format!("no symbol matches the code value at step {}",step)));
            }
        };
        ans.push(symbol);
    }
    Ok(ans)
}

// *************** TESTS *****************

#[test]
fn compression_works() {
    let encoded = encode("ABBCA",&STD_OPTIONS).expect("encoding failed");
    assert_eq!(encoded,"00111010100");
    let encoded = encode("ABCABACBABCCACBAABBCCABAABB",&STD_OPTIONS).expect("encoding failed");
    assert_eq!(encoded,"00111100011110100100011000010011101000000111010");
}

#[test]
fn invertibility() {
    let abc = Alphabet::new(['A','B','C']);
    let expanded = decode("00111010100",&abc,5,&STD_OPTIONS).expect("decoding failed");
    assert_eq!(expanded,"ABBCA");
    let test_data = "i am sam. sam i am. i do not like this sam i am.";
    let compressed = encode(test_data,&STD_OPTIONS).expect("encoding failed");
    let alphabet = Alphabet::from_sequence(test_data);
    let expanded = decode(&compressed,&alphabet,test_data.chars().count(),&STD_OPTIONS).expect("decoding failed");
    assert_eq!(expanded,test_data);
}

#[test]
fn deterministic() {
    let first = encode("ABBCA",&STD_OPTIONS).unwrap();
    let second = encode("ABBCA",&STD_OPTIONS).unwrap();
    assert_eq!(first,second);
}

#[test]
fn single_symbol() {
    // width never shrinks, so only the guard bit is written
    let encoded = encode("AAAA",&STD_OPTIONS).unwrap();
    assert_eq!(encoded,"1");
    let expanded = decode(&encoded,&Alphabet::new(['A']),4,&STD_OPTIONS).unwrap();
    assert_eq!(expanded,"AAAA");
}

#[test]
fn exact_lengths() {
    let w = |n: i64,d: i64| BigRational::new(BigInt::from(n),BigInt::from(d));
    assert_eq!(code_length(&w(1,1)),1);
    assert_eq!(code_length(&w(1,2)),2);
    assert_eq!(code_length(&w(1,630)),11);
    assert_eq!(code_length(&w(1,6)),4);
    assert_eq!(code_length(&w(3,4)),2);
}

#[test]
fn bad_calls() {
    let abc = Alphabet::new(['A','B','C']);
    assert!(matches!(encode("",&STD_OPTIONS),Err(Error::InvalidInput(_))));
    assert_eq!(decode("0101",&Alphabet::default(),3,&STD_OPTIONS),Err(Error::MissingParameter("alphabet")));
    assert_eq!(decode("0101",&abc,0,&STD_OPTIONS),Err(Error::MissingParameter("length")));
    assert_eq!(decode("01a1",&abc,2,&STD_OPTIONS),Err(Error::InvalidBitstring('a')));
    let opt = Options { max_symbols: 4 };
    assert_eq!(encode("ABBCA",&opt),Err(Error::SequenceTooLong { len: 5, max: 4 }));
}

#[test]
fn integer_interval() {
    // same interval as narrowing [0,1) with rationals: [41/180, 41/180 + 1/630)
    let abc = Alphabet::new(['A','B','C']);
    let mut coder = AdaptiveCoder::create(abc.len());
    for c in "ABBCA".chars() {
        coder.narrow(abc.index_of(c).unwrap()).unwrap();
    }
    let r = |n: i64,d: i64| BigRational::new(BigInt::from(n),BigInt::from(d));
    assert_eq!(coder.width(),r(1,630));
    assert_eq!(coder.midpoint(),r(8,35));
    assert!(matches!(coder.narrow(3),Err(Error::CorruptedData(_))));
}

#[test]
fn code_value_out_of_range() {
    // a code value of 1 is past every piece of the line
    let mut decoder = AdaptiveDecoder::create(3,&BigRational::one());
    assert_eq!(decoder.next_symbol(),None);
    let mut decoder = AdaptiveDecoder::create(3,&BigRational::new(BigInt::from(8),BigInt::from(35)));
    assert_eq!(decoder.next_symbol(),Some(0));
}

#[test]
fn long_invertibility() {
    // several thousand symbols over 27, far past what floats could hold
    let symbols: Vec<char> = "abcdefghijklmnopqrstuvwxyz ".chars().collect();
    let mut state: u32 = 12345;
    let test_data: String = (0..4000).map(|_| {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        symbols[(state >> 16) as usize % symbols.len()]
    }).collect();
    let compressed = encode(&test_data,&STD_OPTIONS).expect("encoding failed");
    let alphabet = Alphabet::from_sequence(&test_data);
    let expanded = decode(&compressed,&alphabet,4000,&STD_OPTIONS).expect("decoding failed");
    assert_eq!(expanded,test_data);
}
