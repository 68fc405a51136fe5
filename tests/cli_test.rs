use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const S2: &str = "ABCABACBABCCACBAABBCCABAABB";

fn encode_test(method: &str,sequence: &str,expected: &str) -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("encode")
        .arg("-m").arg(method)
        .arg("-s").arg(sequence)
        .assert()
        .success()
        .stdout([expected,"\n"].concat());
    Ok(())
}

fn decode_test(method: &str,bits: &str,alphabet: &str,length: Option<usize>,expected: &str) -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("decode")
        .arg("-m").arg(method)
        .arg("-b").arg(bits)
        .arg("-a").arg(alphabet);
    if let Some(l) = length {
        cmd.arg("-l").arg(l.to_string());
    }
    cmd.assert()
        .success()
        .stdout([expected,"\n"].concat());
    Ok(())
}

#[test]
fn adaptive_encoding() -> STDRESULT {
    encode_test("adaptive","ABBCA","00111010100")?;
    encode_test("adaptive",S2,"00111100011110100100011000010011101000000111010")
}

#[test]
fn lz_encoding() -> STDRESULT {
    encode_test("lz","ABBCA","0000110100000")?;
    encode_test("lz",S2,"000010010010100110010000101001100001101000100001001001110010000010001")
}

#[test]
fn adaptive_decoding() -> STDRESULT {
    decode_test("adaptive","00111010100","A,B,C",Some(5),"ABBCA")?;
    decode_test("adaptive","00111100011110100100011000010011101000000111010","ABC",Some(27),S2)
}

#[test]
fn lz_decoding() -> STDRESULT {
    decode_test("lz","0000110100000","A, B, C",None,"ABBCA")?;
    decode_test("lz","000010010010100110010000101001100001101000100001001001110010000010001","CBA",None,S2)
}

#[test]
fn efficiency_report() -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("encode")
        .arg("-m").arg("lz")
        .arg("-s").arg("ABBCA")
        .assert()
        .success()
        .stderr(predicate::str::contains("into 13 bits, efficiency 1.3000"));
    Ok(())
}

#[test]
fn ignore_case() -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("encode")
        .arg("-m").arg("lz")
        .arg("-s").arg("AbBcA")
        .arg("--ignore-case")
        .assert()
        .success()
        .stdout("0000110100000\n");
    Ok(())
}

#[test]
fn missing_length() -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("decode")
        .arg("-m").arg("adaptive")
        .arg("-b").arg("00111010100")
        .arg("-a").arg("ABC")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MissingParameter(\"length\")"));
    Ok(())
}

#[test]
fn missing_alphabet() -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("decode")
        .arg("-m").arg("lz")
        .arg("-b").arg("0000110100000")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MissingParameter(\"alphabet\")"));
    Ok(())
}

#[test]
fn corrupted_stream() -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("decode")
        .arg("-m").arg("lz")
        .arg("-b").arg("11")
        .arg("-a").arg("ABC")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CorruptedData"));
    Ok(())
}

#[test]
fn file_round_trip() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let bits_path = temp_dir.path().join("s2.bits");
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("encode")
        .arg("-m").arg("adaptive")
        .arg("-s").arg(S2)
        .arg("-o").arg(&bits_path)
        .assert()
        .success();
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("decode")
        .arg("-m").arg("adaptive")
        .arg("-i").arg(&bits_path)
        .arg("-a").arg("ABC")
        .arg("-l").arg("27")
        .assert()
        .success()
        .stdout([S2,"\n"].concat());
    Ok(())
}

#[test]
fn statistics() -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    cmd.arg("stats")
        .arg("-s").arg("ABBCA")
        .assert()
        .success()
        .stdout(predicate::str::contains("'C': 0.2000"))
        .stdout(predicate::str::contains("entropy: 1.5219 bits/symbol"))
        .stdout(predicate::str::contains("lz: 13 bits, efficiency 1.3000"))
        .stdout(predicate::str::contains("adaptive: 11 bits, efficiency 1.1000"));
    Ok(())
}

/// encode, then feed the alphabet printed on stderr back to the decoder
fn printed_alphabet_test(method: &str,sequence: &str) -> STDRESULT {
    let mut cmd = Command::cargo_bin("seqcoder")?;
    let output = cmd.arg("encode")
        .arg("-m").arg(method)
        .arg("-s").arg(sequence)
        .output()?;
    assert!(output.status.success());
    let bits = String::from_utf8(output.stdout)?.trim().to_string();
    let stderr = String::from_utf8(output.stderr)?;
    let alphabet = stderr.lines()
        .find_map(|line| line.strip_prefix("alphabet "))
        .ok_or("no alphabet line")?
        .to_string();
    assert_eq!(alphabet," ,ab");
    let length = sequence.chars().count();
    decode_test(method,&bits,&alphabet,Some(length),sequence)
}

#[test]
fn spaces_and_commas() -> STDRESULT {
    printed_alphabet_test("adaptive","a, b ,ab")?;
    printed_alphabet_test("lz","a, b ,ab")
}
