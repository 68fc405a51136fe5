//! # Sequence Coder
//!
//! Two compressors for sequences of characters over a small alphabet:
//!
//! * `arithmetic` - adaptive order-0 arithmetic coding, intervals are exact rationals
//! * `lempel_ziv` - LZ78 dictionary coding with position dependent field widths
//! * `efficiency` - coded size compared with a fixed width encoding of the same sequence
//!
//! Output of either coder is a string of `0` and `1` characters.  There is no byte packing
//! and no container, so the decoder must be given the same alphabet the encoder used,
//! and the arithmetic decoder must also be told how many symbols to produce.
//!
//! ```
//! use seqcoder::{Alphabet,dictionary_encode,dictionary_decode};
//! let abc = Alphabet::from_sequence("ABBCA");
//! let bits = dictionary_encode("ABBCA",&abc).unwrap();
//! assert_eq!(bits,"0000110100000");
//! assert_eq!(dictionary_decode(&bits,&abc).unwrap(),"ABBCA");
//! ```

pub mod tools;
pub mod alphabet;
pub mod arithmetic;
pub mod lempel_ziv;
pub mod efficiency;

pub use alphabet::Alphabet;

/// Coding Errors
#[derive(thiserror::Error,Debug,PartialEq)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("corrupted data: {0}")]
    CorruptedData(String),
    #[error("bitstring contains {0:?}, only 0 and 1 are allowed")]
    InvalidBitstring(char),
    #[error("sequence has {len} symbols, limit is {max}")]
    SequenceTooLong { len: usize, max: usize }
}

pub type Result<T> = std::result::Result<T,Error>;

/// Selects one of the two coders
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Coder {
    Adaptive,
    Dictionary
}

impl std::str::FromStr for Coder {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "adaptive" | "arithmetic" => Ok(Self::Adaptive),
            "lz" | "dictionary" => Ok(Self::Dictionary),
            _ => Err(Error::InvalidInput(format!("unknown coder {}",s)))
        }
    }
}

/// Encode with the adaptive arithmetic coder, the alphabet is taken from the sequence itself.
pub fn adaptive_encode(sequence: &str) -> Result<String> {
    arithmetic::encode(sequence,&arithmetic::STD_OPTIONS)
}

/// Decode `length` symbols from an adaptive arithmetic bitstring.
pub fn adaptive_decode(bits: &str,alphabet: &Alphabet,length: usize) -> Result<String> {
    arithmetic::decode(bits,alphabet,length,&arithmetic::STD_OPTIONS)
}

/// Encode with the LZ78 dictionary coder.
pub fn dictionary_encode(sequence: &str,alphabet: &Alphabet) -> Result<String> {
    lempel_ziv::encode(sequence,alphabet)
}

/// Decode an LZ78 dictionary bitstring.
pub fn dictionary_decode(bits: &str,alphabet: &Alphabet) -> Result<String> {
    lempel_ziv::decode(bits,alphabet)
}

/// Ratio of coded bits to `len(sequence) * ceil(log2(|alphabet|))`, 0 for a one symbol alphabet.
pub fn efficiency(sequence: &str,alphabet: &Alphabet,coder: Coder) -> Result<f64> {
    efficiency::efficiency(sequence,alphabet,coder)
}

#[test]
fn coder_names() {
    assert_eq!("lz".parse::<Coder>(),Ok(Coder::Dictionary));
    assert_eq!("adaptive".parse::<Coder>(),Ok(Coder::Adaptive));
    assert!("huffman".parse::<Coder>().is_err());
}
