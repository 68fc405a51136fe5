//! LZ78 Dictionary Coding
//!
//! The sequence is cut into tokens, each token being a backreference into a growing
//! wordbook of phrases plus one literal symbol.  Tokens are packed into a bitstring
//! without delimiters: the width of the k-th field depends only on `k` and the size of
//! the alphabet, so the decoder can always tell where the next field starts.
//!
//! The field width assumes the backreference can be as large as the token's own position,
//! which is one more than it can actually be.  This is kept as is, since changing it
//! would make existing bitstrings unreadable.

use std::collections::HashMap;
use crate::tools::bit_codec::{self,BitReader};
use crate::{Alphabet,Error,Result};

/// Backreference into the wordbook plus one literal symbol
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct Token {
    pub index: usize,
    pub symbol: char
}

impl Token {
    pub fn new(index: usize,symbol: char) -> Self {
        Self {
            index,
            symbol
        }
    }
}

/// Phrases in insertion order, index 0 is the empty phrase.
/// Every phrase is an earlier phrase plus one symbol, so the wordbook is closed under
/// taking prefixes, and the longest match can be found by following links.
pub struct Wordbook {
    phrases: Vec<String>,
    /// the phrase each entry extends, entry 0 points to itself
    parents: Vec<usize>,
    /// (parent,symbol) maps to the earliest entry with that content
    links: HashMap<(usize,char),usize>
}

impl Wordbook {
    pub fn new() -> Self {
        Self {
            phrases: vec![String::new()],
            parents: vec![0],
            links: HashMap::new()
        }
    }
    pub fn len(&self) -> usize {
        self.phrases.len()
    }
    pub fn phrase(&self,idx: usize) -> Option<&str> {
        self.phrases.get(idx).map(|s| s.as_str())
    }
    pub fn parent(&self,idx: usize) -> Option<usize> {
        self.parents.get(idx).copied()
    }
    /// Longest phrase that is a prefix of `rest`, returned as (index,length).
    /// If phrases repeat, the earliest one is returned.  The empty phrase always matches.
    pub fn longest_match(&self,rest: &[char]) -> (usize,usize) {
        let mut code = 0;
        let mut len = 0;
        for c in rest {
            match self.links.get(&(code,*c)) {
                Some(next) => {
                    code = *next;
                    len += 1;
                },
                None => break
            }
        }
        (code,len)
    }
    /// Append the phrase for `tok`, returning the new phrase.
    pub fn push(&mut self,tok: &Token) -> Result<&str> {
        let base = match self.phrases.get(tok.index) {
            Some(s) => s,
            None => {
                log::error!("backreference {} but wordbook has {} entries",tok.index,self.phrases.len());
                return Err(Error::CorruptedData(format!("backreference {} is past the end of the wordbook",tok.index)));
            }
        };
        let mut phrase = String::with_capacity(base.len() + tok.symbol.len_utf8());
        phrase.push_str(base);
        phrase.push(tok.symbol);
        let code = self.phrases.len();
        self.links.entry((tok.index,tok.symbol)).or_insert(code);
        self.parents.push(tok.index);
        self.phrases.push(phrase);
        Ok(&self.phrases[code])
    }
}

impl Default for Wordbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut the sequence into tokens, also returning the wordbook that was built.
/// When the input ends in the middle of a match, the match is flushed as a token
/// pointing at its parent phrase, with the last symbol of the match as the literal.
pub fn build_tokens(sequence: &str) -> Result<(Vec<Token>,Wordbook)> {
    let syms: Vec<char> = sequence.chars().collect();
    let mut wordbook = Wordbook::new();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < syms.len() {
        let (matched,window) = wordbook.longest_match(&syms[i..]);
        let tok = match syms.get(i + window) {
            Some(c) => Token::new(matched,*c),
            None => {
                // window is at least 1 here, so the match is not the empty phrase
                let parent = wordbook.parent(matched).unwrap_or(0);
                log::trace!("flush match {} as ({},{:?})",matched,parent,syms[syms.len()-1]);
                Token::new(parent,syms[syms.len()-1])
            }
        };
        log::trace!("token ({},{:?})",tok.index,tok.symbol);
        wordbook.push(&tok)?;
        tokens.push(tok);
        i += window + 1;
    }
    log::debug!("built {} tokens from {} symbols",tokens.len(),syms.len());
    Ok((tokens,wordbook))
}

/// bits allotted to the field of the token at position `k`
pub fn field_width(k: usize,index_bits: usize) -> usize {
    let max_xy = (k << index_bits) | ((1 << index_bits) - 1);
    bit_codec::bit_length(max_xy)
}

/// Pack tokens into a bitstring, each field is `index * 2^index_bits + symbol_index`.
pub fn pack(tokens: &[Token],alphabet: &Alphabet) -> Result<String> {
    if alphabet.is_empty() {
        return Err(Error::MissingParameter("alphabet"));
    }
    let index_bits = alphabet.index_bits();
    log::debug!("packing {} tokens, {} bits per symbol",tokens.len(),index_bits);
    if log::log_enabled!(log::Level::Trace) {
        for c in alphabet.symbols() {
            log::trace!("alphabet map {:?} -> {}",c,alphabet.code(*c).unwrap_or_default());
        }
    }
    let mut ans = String::new();
    for (k,tok) in tokens.iter().enumerate() {
        let sym = alphabet.index_of(tok.symbol).ok_or_else(|| Error::InvalidInput(format!("symbol {:?} is not in the alphabet",tok.symbol)))?;
        if tok.index > k {
            return Err(Error::InvalidInput(format!("token {} refers to phrase {} which cannot exist yet",k,tok.index)));
        }
        let xy = (tok.index << index_bits) + sym;
        let width = field_width(k,index_bits);
        log::trace!("field {}: xy {} in {} bits",k,xy,width);
        ans += &bit_codec::uint_to_bits(xy,width);
    }
    Ok(ans)
}

/// Unpack a bitstring into tokens.  A trailing fragment shorter than the next field
/// is dropped with a warning.
pub fn unpack(bits: &str,alphabet: &Alphabet) -> Result<Vec<Token>> {
    if alphabet.is_empty() {
        return Err(Error::MissingParameter("alphabet"));
    }
    let index_bits = alphabet.index_bits();
    let mut reader = BitReader::from_bitstring(bits)?;
    let mut tokens = Vec::new();
    loop {
        let width = field_width(tokens.len(),index_bits);
        let xy: usize = match reader.get_code(width)? {
            Some(xy) => xy,
            None => {
                if reader.remaining() > 0 {
                    log::warn!("dropped {} trailing bits, field {} needs {}",reader.remaining(),tokens.len(),width);
                }
                break;
            }
        };
        let index = xy >> index_bits;
        let sym = xy & ((1 << index_bits) - 1);
        let symbol = match alphabet.get(sym) {
            Some(c) => c,
            None => {
                log::error!("symbol index {} outside alphabet at offset {}",sym,reader.position() - width);
                return Err(Error::CorruptedData(format!("symbol index {} out of range for alphabet of {}",sym,alphabet.len())));
            }
        };
        log::trace!("field {}: {} bits, xy {} -> ({},{:?})",tokens.len(),width,xy,index,symbol);
        tokens.push(Token::new(index,symbol));
    }
    log::debug!("unpacked {} tokens",tokens.len());
    Ok(tokens)
}

/// Rebuild the sequence from tokens, growing the wordbook exactly as `build_tokens` did.
pub fn reconstruct(tokens: &[Token]) -> Result<String> {
    let mut wordbook = Wordbook::new();
    let mut ans = String::new();
    for tok in tokens {
        ans.push_str(wordbook.push(tok)?);
    }
    Ok(ans)
}

/// Main compression function
pub fn encode(sequence: &str,alphabet: &Alphabet) -> Result<String> {
    if sequence.is_empty() {
        return Err(Error::InvalidInput("nothing to encode, sequence is empty".to_string()));
    }
    let (tokens,_) = build_tokens(sequence)?;
    pack(&tokens,alphabet)
}

/// Main decompression function
pub fn decode(bits: &str,alphabet: &Alphabet) -> Result<String> {
    let tokens = unpack(bits,alphabet)?;
    reconstruct(&tokens)
}

// *************** TESTS *****************

#[test]
fn tokens_work() {
    let (tokens,wordbook) = build_tokens("ABBCA").expect("tokenizing failed");
    assert_eq!(tokens,vec![Token::new(0,'A'),Token::new(0,'B'),Token::new(2,'C'),Token::new(0,'A')]);
    assert_eq!(wordbook.len(),tokens.len() + 1);
    assert_eq!(wordbook.phrase(3),Some("BC"));

    let (tokens,_) = build_tokens("ABCABACBABCCACBAABBCCABAABB").expect("tokenizing failed");
    let expected = [
        (0,'A'),(0,'B'),(0,'C'),(1,'B'),(1,'C'),(2,'A'),(2,'C'),
        (3,'A'),(3,'B'),(1,'A'),(2,'B'),(3,'C'),(4,'A'),(4,'B')
    ];
    let expected: Vec<Token> = expected.iter().map(|(i,c)| Token::new(*i,*c)).collect();
    assert_eq!(tokens,expected);
}

#[test]
fn long_flush() {
    // trailing "AB" matches phrase 3, which is flushed through its parent "A"
    let (tokens,wordbook) = build_tokens("ABABAB").unwrap();
    assert_eq!(tokens,vec![Token::new(0,'A'),Token::new(0,'B'),Token::new(1,'B'),Token::new(1,'B')]);
    assert_eq!(wordbook.len(),5);
    assert_eq!(wordbook.phrase(4),Some("AB"));
    // repeated content does not take over the link of the earlier phrase
    assert_eq!(wordbook.longest_match(&['A','B','A']),(3,2));
    let ab = Alphabet::new(['A','B']);
    let packed = pack(&tokens,&ab).unwrap();
    assert_eq!(packed,"001011011");
    assert_eq!(decode(&packed,&ab).unwrap(),"ABABAB");
}

#[test]
fn widths() {
    let w: Vec<usize> = (0..4).map(|k| field_width(k,2)).collect();
    assert_eq!(w,vec![2,3,4,4]);
    let w: Vec<usize> = (0..5).map(|k| field_width(k,0)).collect();
    assert_eq!(w,vec![0,1,2,2,3]);
}

#[test]
fn compression_works() {
    let abc = Alphabet::new(['A','B','C']);
    assert_eq!(encode("ABBCA",&abc).unwrap(),"0000110100000");
    let compressed = encode("ABCABACBABCCACBAABBCCABAABB",&abc).unwrap();
    assert_eq!(compressed,"000010010010100110010000101001100001101000100001001001110010000010001");
    assert_eq!(encode("AAAB",&Alphabet::new(['A','B'])).unwrap(),"010001");
}

#[test]
fn invertibility() {
    let test_data = "i am sam. sam i am. i do not like this sam i am.";
    let alphabet = Alphabet::from_sequence(test_data);
    let compressed = encode(test_data,&alphabet).expect("compression failed");
    let expanded = decode(&compressed,&alphabet).expect("expansion failed");
    assert_eq!(expanded,test_data);
}

#[test]
fn single_symbol_alphabet() {
    let a = Alphabet::new(['A']);
    // first field has zero width, so one symbol encodes to nothing at all
    assert_eq!(encode("A",&a).unwrap(),"");
    assert_eq!(decode("",&a).unwrap(),"A");
    let compressed = encode("AAAAAAA",&a).unwrap();
    // tokens (0,A) (1,A) (2,A) (0,A) carry no literal bits
    assert_eq!(compressed,"11000");
    assert_eq!(decode(&compressed,&a).unwrap(),"AAAAAAA");
}

#[test]
fn corrupted_symbol() {
    // 11 in the first field is symbol index 3 for a three symbol alphabet
    let abc = Alphabet::new(['A','B','C']);
    assert!(matches!(decode("11",&abc),Err(Error::CorruptedData(_))));
}

#[test]
fn truncated_tail() {
    let abc = Alphabet::new(['A','B','C']);
    // last field needs 4 bits but only 3 are present
    assert_eq!(decode("000011010000",&abc).unwrap(),"ABBC");
}

#[test]
fn bad_calls() {
    let abc = Alphabet::new(['A','B','C']);
    assert!(matches!(encode("",&abc),Err(Error::InvalidInput(_))));
    assert!(matches!(encode("ABD",&abc),Err(Error::InvalidInput(_))));
    assert_eq!(decode("0000",&Alphabet::default()),Err(Error::MissingParameter("alphabet")));
    assert!(matches!(reconstruct(&[Token::new(3,'A')]),Err(Error::CorruptedData(_))));
    assert!(matches!(pack(&[Token::new(1,'A')],&abc),Err(Error::InvalidInput(_))));
}
