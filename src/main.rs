use clap::{arg,crate_version,value_parser,ArgMatches,Command};
use seqcoder::{arithmetic,efficiency,lempel_ziv,Alphabet,Coder,Error};
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const RCH: &str = "unreachable was reached";

/// sequence argument, lowercased if requested
fn get_sequence(cmd: &ArgMatches) -> String {
    let seq = cmd.get_one::<String>("sequence").expect(RCH);
    match cmd.get_flag("ignore-case") {
        true => seq.to_lowercase(),
        false => seq.to_string()
    }
}

/// alphabet argument, or the empty alphabet if there is none
fn get_alphabet(cmd: &ArgMatches) -> Result<Alphabet,Error> {
    match cmd.get_one::<String>("alphabet") {
        Some(txt) => Ok(Alphabet::parse(txt)),
        None => Ok(Alphabet::default())
    }
}

fn get_coder(cmd: &ArgMatches) -> Result<Coder,Error> {
    cmd.get_one::<String>("method").expect(RCH).parse::<Coder>()
}

fn main() -> STDRESULT
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let long_help =
"Examples:
---------
Encode:        `seqcoder encode -m adaptive -s ABBCA`
Decode:        `seqcoder decode -m adaptive -b 00111010100 -a A,B,C -l 5`
To file:       `seqcoder encode -m lz -s ABBCA -o my_bits`
From file:     `seqcoder decode -m lz -i my_bits -a ABC`
Statistics:    `seqcoder stats -s \"the quick brown fox\"`";

    let methods = ["adaptive","lz"];

    let mut main_cmd = Command::new("seqcoder")
        .about("Adaptive arithmetic and LZ78 coding of symbol sequences")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("encode")
        .arg(arg!(-m --method <METHOD> "coding algorithm").value_parser(methods)
            .required(true))
        .arg(arg!(-s --sequence <SEQUENCE> "sequence to encode").required(true))
        .arg(arg!(-a --alphabet <ALPHABET> "alphabet as A,B,C or ABC, default is the symbols of the sequence")
            .required(false))
        .arg(arg!(-o --output <PATH> "write the bitstring to this file instead of stdout")
            .required(false))
        .arg(arg!(--"ignore-case" "lowercase the sequence before encoding"))
        .about("encode a sequence to a bitstring"));

    main_cmd = main_cmd.subcommand(Command::new("decode")
        .arg(arg!(-m --method <METHOD> "coding algorithm").value_parser(methods)
            .required(true))
        .arg(arg!(-b --bits <BITS> "bitstring to decode").required(false))
        .arg(arg!(-i --input <PATH> "read the bitstring from this file").required(false))
        .arg(arg!(-a --alphabet <ALPHABET> "alphabet as A,B,C or ABC, must match the encoder")
            .required(false))
        .arg(arg!(-l --length <LENGTH> "number of symbols, needed by the adaptive method")
            .value_parser(value_parser!(usize)).required(false))
        .about("decode a bitstring to a sequence"));

    main_cmd = main_cmd.subcommand(Command::new("stats")
        .arg(arg!(-s --sequence <SEQUENCE> "sequence to analyze").required(true))
        .arg(arg!(-a --alphabet <ALPHABET> "alphabet as A,B,C or ABC, default is the symbols of the sequence")
            .required(false))
        .arg(arg!(--"ignore-case" "lowercase the sequence first"))
        .about("show symbol statistics and the efficiency of both methods"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("encode") {
        let seq = get_sequence(cmd);
        let coder = get_coder(cmd)?;
        let mut alphabet = get_alphabet(cmd)?;
        if alphabet.is_empty() {
            alphabet = Alphabet::from_sequence(&seq);
        }
        let encoded = match coder {
            Coder::Adaptive => arithmetic::encode(&seq,&arithmetic::STD_OPTIONS)?,
            Coder::Dictionary => lempel_ziv::encode(&seq,&alphabet)?
        };
        let num_symbols = seq.chars().count();
        match cmd.get_one::<String>("output") {
            Some(path_out) => std::fs::write(path_out,&encoded)?,
            None => println!("{}",encoded)
        }
        eprintln!("encoded {} symbols into {} bits, efficiency {:.4}",num_symbols,encoded.len(),
            efficiency::ratio(encoded.len(),num_symbols,&alphabet));
        eprintln!("alphabet {}",alphabet);
    }

    if let Some(cmd) = matches.subcommand_matches("decode") {
        let bits = match (cmd.get_one::<String>("bits"),cmd.get_one::<String>("input")) {
            (Some(b),_) => b.trim().to_string(),
            (None,Some(path_in)) => std::fs::read_to_string(path_in)?.trim().to_string(),
            (None,None) => return Err(Box::new(Error::MissingParameter("bits")))
        };
        let coder = get_coder(cmd)?;
        let alphabet = get_alphabet(cmd)?;
        if alphabet.is_empty() {
            return Err(Box::new(Error::MissingParameter("alphabet")));
        }
        let decoded = match coder {
            Coder::Adaptive => {
                let length = match cmd.get_one::<usize>("length") {
                    Some(l) => *l,
                    None => return Err(Box::new(Error::MissingParameter("length")))
                };
                arithmetic::decode(&bits,&alphabet,length,&arithmetic::STD_OPTIONS)?
            },
            Coder::Dictionary => lempel_ziv::decode(&bits,&alphabet)?
        };
        println!("{}",decoded);
        eprintln!("decoded {} bits into {} symbols",bits.len(),decoded.chars().count());
    }

    if let Some(cmd) = matches.subcommand_matches("stats") {
        let seq = get_sequence(cmd);
        let mut alphabet = get_alphabet(cmd)?;
        if alphabet.is_empty() {
            alphabet = Alphabet::from_sequence(&seq);
        }
        if seq.is_empty() {
            return Err(Box::new(Error::InvalidInput("nothing to analyze, sequence is empty".to_string())));
        }
        let dist = efficiency::distribution(&seq);
        for (c,p) in &dist {
            println!("{:?}: {:.4}",c,p);
        }
        let probs: Vec<f64> = dist.iter().map(|(_,p)| *p).collect();
        let h = efficiency::entropy(&probs);
        let num_symbols = seq.chars().count();
        println!("entropy: {:.4} bits/symbol",h);
        for (name,coder) in [("adaptive",Coder::Adaptive),("lz",Coder::Dictionary)] {
            let coded_bits = match coder {
                Coder::Adaptive => arithmetic::encode(&seq,&arithmetic::STD_OPTIONS)?.len(),
                Coder::Dictionary => lempel_ziv::encode(&seq,&alphabet)?.len()
            };
            let bits_per_symbol = coded_bits as f64 / num_symbols as f64;
            println!("{}: {} bits, efficiency {:.4}, entropy efficiency {:.4}",name,coded_bits,
                efficiency::ratio(coded_bits,num_symbols,&alphabet),
                efficiency::entropy_efficiency(h,bits_per_symbol));
        }
    }

    Ok(())
}
