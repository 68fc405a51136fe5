//! Canonical alphabet
//!
//! The order of the alphabet decides both the layout of the probability line and the
//! binary code of each symbol, so it is always kept sorted and free of duplicates.

use crate::tools::bit_codec;

#[derive(Clone,Debug,Default,PartialEq,Eq)]
pub struct Alphabet {
    symbols: Vec<char>
}

impl Alphabet {
    /// Build from any collection of symbols, which are sorted and deduplicated.
    pub fn new<I: IntoIterator<Item=char>>(symbols: I) -> Self {
        let mut symbols: Vec<char> = symbols.into_iter().collect();
        symbols.sort_unstable();
        symbols.dedup();
        Self { symbols }
    }
    /// The distinct symbols of `sequence`
    pub fn from_sequence(sequence: &str) -> Self {
        Self::new(sequence.chars())
    }
    /// Parse either a comma separated list (`A, B, C`) or bare characters (`ABC`).
    /// The text is a list only if there are at least two parts and every part is a single
    /// symbol once surrounding whitespace is trimmed.  Anything else is taken literally,
    /// including spaces and commas, so ` ,ab` is the alphabet of space, comma, a and b.
    pub fn parse(txt: &str) -> Self {
        match as_list(txt) {
            Some(list) => Self::new(list),
            None => Self::new(txt.chars())
        }
    }
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
    pub fn get(&self,idx: usize) -> Option<char> {
        self.symbols.get(idx).copied()
    }
    /// position of `symbol` in canonical order
    pub fn index_of(&self,symbol: char) -> Option<usize> {
        self.symbols.binary_search(&symbol).ok()
    }
    /// bits needed to index a symbol, `ceil(log2(len))`, which is 0 for a single symbol
    pub fn index_bits(&self) -> usize {
        bit_codec::ceil_log2(self.len())
    }
    /// fixed width binary code of `symbol`
    pub fn code(&self,symbol: char) -> Option<String> {
        self.index_of(symbol).map(|i| bit_codec::symbol_to_bits(i,self.index_bits()))
    }
}

/// symbols of a comma separated list, or `None` if `txt` is not one
fn as_list(txt: &str) -> Option<Vec<char>> {
    let parts: Vec<&str> = txt.split(',').map(|p| p.trim()).collect();
    if parts.len() < 2 {
        return None;
    }
    let mut ans = Vec::new();
    for part in parts {
        let mut chars = part.chars();
        match (chars.next(),chars.next()) {
            (Some(c),None) => ans.push(c),
            _ => return None
        }
    }
    Some(ans)
}

/// Bare form, which `Alphabet::parse` reads back to the same alphabet.
/// If the symbols happen to look like a list, such as `!,a`, a leading comma is
/// written to break the pattern, the duplicate comma is dropped on parsing.
impl std::fmt::Display for Alphabet {
    fn fmt(&self,f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bare: String = self.symbols.iter().collect();
        match as_list(&bare) {
            Some(_) => write!(f,",{}",bare),
            None => write!(f,"{}",bare)
        }
    }
}

// *************** TESTS *****************

#[test]
fn canonical_order() {
    let abc = Alphabet::from_sequence("CABBA");
    assert_eq!(abc.symbols(),&['A','B','C']);
    assert_eq!(abc.index_of('C'),Some(2));
    assert_eq!(abc.index_of('D'),None);
    assert_eq!(abc.index_bits(),2);
    assert_eq!(abc.code('B'),Some("01".to_string()));
}

#[test]
fn parse_forms() {
    assert_eq!(Alphabet::parse("C, A ,B"),Alphabet::new(['A','B','C']));
    assert_eq!(Alphabet::parse("cab"),Alphabet::new(['a','b','c']));
    assert_eq!(Alphabet::parse("A,BC"),Alphabet::new(['A','B','C',',']));
    assert_eq!(Alphabet::parse(","),Alphabet::new([',']));
    assert!(Alphabet::parse("").is_empty());
}

#[test]
fn spaces_and_commas() {
    // bare form is literal, a leading space is a symbol
    assert_eq!(Alphabet::parse(" ab"),Alphabet::new([' ','a','b']));
    assert_eq!(Alphabet::parse(" ,ab"),Alphabet::new([' ',',','a','b']));
    assert_eq!(Alphabet::parse(" ,a,b"),Alphabet::new([' ',',','a','b']));
}

#[test]
fn display_reads_back() {
    let tricky = [
        Alphabet::from_sequence("ab ba"),
        Alphabet::from_sequence("a, b ,ab"),
        Alphabet::from_sequence("!,a"),
        Alphabet::from_sequence(","),
        Alphabet::from_sequence("i'm the master's nightmarish, gorgonian hatemonger"),
        Alphabet::new(['A','B','C'])
    ];
    for abc in tricky {
        assert_eq!(Alphabet::parse(&abc.to_string()),abc);
    }
    assert_eq!(Alphabet::from_sequence("ab ba").to_string()," ab");
    assert_eq!(Alphabet::from_sequence("!,a").to_string(),",!,a");
}

#[test]
fn single_symbol() {
    let a = Alphabet::from_sequence("AAAA");
    assert_eq!(a.index_bits(),0);
    assert_eq!(a.code('A'),Some("".to_string()));
}
