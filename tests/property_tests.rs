use proptest::prelude::*;
use seqcoder::{adaptive_decode,adaptive_encode,dictionary_decode,dictionary_encode,efficiency};
use seqcoder::lempel_ziv::build_tokens;
use seqcoder::{Alphabet,Coder};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn adaptive_roundtrip(sequence in "[a-e]{1,60}") {
        let bits = adaptive_encode(&sequence).unwrap();
        let alphabet = Alphabet::from_sequence(&sequence);
        let decoded = adaptive_decode(&bits,&alphabet,sequence.chars().count()).unwrap();
        prop_assert_eq!(decoded,sequence);
    }

    #[test]
    fn dictionary_roundtrip(sequence in "[a-e ]{1,200}") {
        let alphabet = Alphabet::from_sequence(&sequence);
        let bits = dictionary_encode(&sequence,&alphabet).unwrap();
        let decoded = dictionary_decode(&bits,&alphabet).unwrap();
        prop_assert_eq!(decoded,sequence);
    }

    #[test]
    fn dictionary_wider_alphabet(sequence in "[ab]{1,80}") {
        // a caller supplied alphabet may hold symbols the sequence never uses
        let alphabet = Alphabet::new("abcdefg".chars());
        let bits = dictionary_encode(&sequence,&alphabet).unwrap();
        prop_assert_eq!(dictionary_decode(&bits,&alphabet).unwrap(),sequence);
    }

    #[test]
    fn deterministic(sequence in "[xyz]{1,40}") {
        let alphabet = Alphabet::from_sequence(&sequence);
        prop_assert_eq!(adaptive_encode(&sequence).unwrap(),adaptive_encode(&sequence).unwrap());
        prop_assert_eq!(dictionary_encode(&sequence,&alphabet).unwrap(),dictionary_encode(&sequence,&alphabet).unwrap());
    }

    #[test]
    fn wordbook_growth(sequence in "[pqr]{1,100}") {
        let (tokens,wordbook) = build_tokens(&sequence).unwrap();
        prop_assert_eq!(wordbook.len(),tokens.len() + 1);
    }

    #[test]
    fn efficiency_positive(sequence in "[01]{2,50}") {
        let alphabet = Alphabet::from_sequence(&sequence);
        prop_assume!(alphabet.len() > 1);
        prop_assert!(efficiency(&sequence,&alphabet,Coder::Adaptive).unwrap() > 0.0);
        prop_assert!(efficiency(&sequence,&alphabet,Coder::Dictionary).unwrap() > 0.0);
    }
}

#[test]
fn long_sequence_roundtrip() {
    // long enough that a 64 bit float would have lost the interval long ago
    let seq = "i'm the master's nightmarish, gorgonian hatemonger, his moth-eaten gonorrhoea, smothering mightiest heroism, thrashing ego-mania's (or, to me, ignorant mismanagement's) strong-arm mishmash or staggering high treason";
    let alphabet = Alphabet::from_sequence(seq);
    let bits = adaptive_encode(seq).unwrap();
    assert_eq!(adaptive_decode(&bits,&alphabet,seq.chars().count()).unwrap(),seq);
    let bits = dictionary_encode(seq,&alphabet).unwrap();
    assert_eq!(dictionary_decode(&bits,&alphabet).unwrap(),seq);
}
