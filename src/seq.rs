//! DNA/RNA transformations and protein motif search.
//!
//! All functions validate their input first and return
//! [`Error::InvalidAlphabet`] at the first character outside the alphabet.
//! Letter case is preserved.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Kind of nucleic acid a sequence is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NucleicAcid {
    Dna,
    Rna,
}

/// Classify `seq` as DNA (ACGTN) or RNA (ACGUN), case-insensitive.
///
/// A sequence with neither T nor U counts as DNA. Mixing T and U is an
/// error reported at the first conflicting base.
pub fn detect(seq: &[u8]) -> Result<NucleicAcid> {
    let mut kind: Option<NucleicAcid> = None;
    for (pos, &b) in seq.iter().enumerate() {
        let this = match b.to_ascii_uppercase() {
            b'A' | b'C' | b'G' | b'N' => continue,
            b'T' => NucleicAcid::Dna,
            b'U' => NucleicAcid::Rna,
            _ => return Err(invalid(b, pos)),
        };
        match kind {
            None => kind = Some(this),
            Some(k) if k != this => return Err(invalid(b, pos)),
            Some(_) => {}
        }
    }
    Ok(kind.unwrap_or(NucleicAcid::Dna))
}

fn invalid(b: u8, pos: usize) -> Error {
    Error::InvalidAlphabet {
        ch: b as char,
        pos,
    }
}

fn complement_base(b: u8, kind: NucleicAcid) -> u8 {
    let partner_of_a = match kind {
        NucleicAcid::Dna => b'T',
        NucleicAcid::Rna => b'U',
    };
    let upper = match b.to_ascii_uppercase() {
        b'A' => partner_of_a,
        b'T' | b'U' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        other => other,
    };
    if b.is_ascii_lowercase() {
        upper.to_ascii_lowercase()
    } else {
        upper
    }
}

pub fn reverse(seq: &[u8]) -> Result<Vec<u8>> {
    detect(seq)?;
    Ok(seq.iter().rev().copied().collect())
}

pub fn complement(seq: &[u8]) -> Result<Vec<u8>> {
    let kind = detect(seq)?;
    Ok(seq.iter().map(|&b| complement_base(b, kind)).collect())
}

pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>> {
    let kind = detect(seq)?;
    Ok(seq.iter().rev().map(|&b| complement_base(b, kind)).collect())
}

/// DNA to RNA: T becomes U.
pub fn transcribe(dna: &[u8]) -> Result<Vec<u8>> {
    if detect(dna)? == NucleicAcid::Rna {
        let pos = dna
            .iter()
            .position(|b| b.eq_ignore_ascii_case(&b'U'))
            .unwrap_or(0);
        return Err(invalid(dna[pos], pos));
    }
    Ok(dna
        .iter()
        .map(|&b| match b {
            b'T' => b'U',
            b't' => b'u',
            other => other,
        })
        .collect())
}

fn require_rna(seq: &[u8]) -> Result<()> {
    if detect(seq)? == NucleicAcid::Dna {
        if let Some(pos) = seq.iter().position(|b| b.eq_ignore_ascii_case(&b'T')) {
            return Err(invalid(seq[pos], pos));
        }
    }
    Ok(())
}

fn find_codon(seq: &[u8], codon: &[u8; 3]) -> Option<usize> {
    seq.windows(3).position(|w| w.eq_ignore_ascii_case(codon))
}

pub const START_CODON: &[u8; 3] = b"AUG";
pub const STOP_CODONS: [&[u8; 3]; 3] = [b"UGA", b"UAA", b"UAG"];

/// 1-based position of the first `AUG` in an RNA sequence.
pub fn find_start_codon(rna: &[u8]) -> Result<Option<usize>> {
    require_rna(rna)?;
    Ok(find_codon(rna, START_CODON).map(|p| p + 1))
}

/// 1-based position of the earliest stop codon in an RNA sequence.
pub fn find_first_stop_codon(rna: &[u8]) -> Result<Option<usize>> {
    require_rna(rna)?;
    Ok(STOP_CODONS
        .iter()
        .filter_map(|c| find_codon(rna, c))
        .min()
        .map(|p| p + 1))
}

/// Standard amino acids plus `X` for unknown.
const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWYX";

fn validate_protein(seq: &[u8]) -> Result<()> {
    match seq
        .iter()
        .position(|b| !AMINO_ACIDS.contains(&b.to_ascii_uppercase()))
    {
        Some(pos) => Err(invalid(seq[pos], pos)),
        None => Ok(()),
    }
}

/// 1-based start positions of every (possibly overlapping) occurrence of
/// `motif` in `protein`, case-insensitive.
pub fn find_motif(protein: &[u8], motif: &[u8]) -> Result<Vec<usize>> {
    validate_protein(protein)?;
    validate_protein(motif)?;
    if motif.is_empty() || motif.len() > protein.len() {
        return Ok(Vec::new());
    }
    Ok(protein
        .windows(motif.len())
        .enumerate()
        .filter(|(_, w)| w.eq_ignore_ascii_case(motif))
        .map(|(i, _)| i + 1)
        .collect())
}

/// Named operation for batch use from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Reverse,
    Complement,
    ReverseComplement,
    Transcribe,
    StartCodon,
    StopCodon,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Reverse,
        Operation::Complement,
        Operation::ReverseComplement,
        Operation::Transcribe,
        Operation::StartCodon,
        Operation::StopCodon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Reverse => "reverse",
            Operation::Complement => "complement",
            Operation::ReverseComplement => "reverse_complement",
            Operation::Transcribe => "transcribe",
            Operation::StartCodon => "search_start_codon_in_rna",
            Operation::StopCodon => "search_first_stop_codon_in_rna",
        }
    }

    /// Apply to one sequence, rendering the result as text.
    pub fn apply(self, seq: &str) -> Result<String> {
        let bytes = seq.as_bytes();
        let seq_out = |v: Vec<u8>| String::from_utf8_lossy(&v).into_owned();
        let pos_out = |p: Option<usize>| p.map_or_else(|| "none".to_string(), |p| p.to_string());
        Ok(match self {
            Operation::Reverse => seq_out(reverse(bytes)?),
            Operation::Complement => seq_out(complement(bytes)?),
            Operation::ReverseComplement => seq_out(reverse_complement(bytes)?),
            Operation::Transcribe => seq_out(transcribe(bytes)?),
            Operation::StartCodon => pos_out(find_start_codon(bytes)?),
            Operation::StopCodon => pos_out(find_first_stop_codon(bytes)?),
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// Apply `op` to every sequence; one result per input, in order.
pub fn run_operation<S: AsRef<str>>(op: Operation, seqs: &[S]) -> Vec<Result<String>> {
    seqs.iter().map(|s| op.apply(s.as_ref())).collect()
}
