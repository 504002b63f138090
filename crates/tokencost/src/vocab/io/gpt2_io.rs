//! # GPT-2 Vocabulary IO
//!
//! GPT-2 (and GPT-3) vocabularies ship as two files:
//! * `encoder.json` - ``{ "token": id, ... }``, tokens in byte-symbol form.
//! * `vocab.bpe` - a ``#version`` header, then one ``left right`` merge rule per line,
//!   in rank order.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    errors::{TCResult, TokenCostError},
    types::{TokenType, hash_map_with_capacity},
    vocab::{MergeRule, SymbolTokenMap, VocabularyTable},
};

/// Conventional file name of the token/id map.
pub const ENCODER_JSON_FILE: &str = "encoder.json";

/// Conventional file name of the merge rules.
pub const VOCAB_BPE_FILE: &str = "vocab.bpe";

/// Header written by [`write_vocab_bpe`].
pub const VOCAB_BPE_HEADER: &str = "#version: 0.2";

/// Parse an `encoder.json` stream.
pub fn read_encoder_json<T, R>(reader: R) -> TCResult<SymbolTokenMap<T>>
where
    T: TokenType,
    R: BufRead,
{
    let raw: HashMap<String, u64> = serde_json::from_reader(reader)?;

    let mut token_ids: SymbolTokenMap<T> = hash_map_with_capacity(raw.len());
    for (token, id) in raw {
        let Some(t) = T::from_u64(id) else {
            return Err(TokenCostError::VocabConflict(format!(
                "token {token:?} id {id} exceeds token type capacity"
            )));
        };
        token_ids.insert(token, t);
    }

    Ok(token_ids)
}

/// Parse a `vocab.bpe` stream into merge rules, in rank order.
///
/// A leading ``#version`` line and blank lines are skipped.
pub fn read_vocab_bpe<R>(reader: R) -> TCResult<Vec<MergeRule>>
where
    R: BufRead,
{
    let mut merges: Vec<MergeRule> = vec![];

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if (idx == 0 && line.starts_with("#version")) || line.trim().is_empty() {
            continue;
        }

        match line.split_once(' ') {
            Some((left, right))
                if !left.is_empty() && !right.is_empty() && !right.contains(' ') =>
            {
                merges.push((left.to_string(), right.to_string()));
            }
            _ => {
                return Err(TokenCostError::Parse {
                    line: idx + 1,
                    message: format!("expected \"left right\", found {line:?}"),
                });
            }
        }
    }

    Ok(merges)
}

/// Write a ``{ token -> id }`` map as `encoder.json`, in id order.
pub fn write_encoder_json<T, W>(
    token_ids: &SymbolTokenMap<T>,
    writer: &mut W,
) -> TCResult<()>
where
    T: TokenType,
    W: Write,
{
    let mut entries: Vec<(&String, T)> = token_ids.iter().map(|(s, &t)| (s, t)).collect();
    entries.sort_by_key(|&(_, t)| t);

    writer.write_all(b"{")?;
    for (idx, (token, id)) in entries.into_iter().enumerate() {
        if idx > 0 {
            writer.write_all(b", ")?;
        }
        serde_json::to_writer(&mut *writer, token)?;
        write!(writer, ": {id}")?;
    }
    writer.write_all(b"}")?;

    Ok(())
}

/// Write merge rules as `vocab.bpe`.
pub fn write_vocab_bpe<W>(
    merges: &[MergeRule],
    writer: &mut W,
) -> TCResult<()>
where
    W: Write,
{
    writeln!(writer, "{VOCAB_BPE_HEADER}")?;
    for (left, right) in merges {
        writeln!(writer, "{left} {right}")?;
    }
    Ok(())
}

/// Load a [`VocabularyTable`] from `encoder.json` and `vocab.bpe` paths.
pub fn load_gpt2_vocab_paths<T, P, Q>(
    encoder_json: P,
    vocab_bpe: Q,
) -> TCResult<VocabularyTable<T>>
where
    T: TokenType,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let token_ids = read_encoder_json(BufReader::new(File::open(encoder_json)?))?;
    let merges = read_vocab_bpe(BufReader::new(File::open(vocab_bpe)?))?;

    VocabularyTable::new(token_ids, &merges)
}

/// Load a [`VocabularyTable`] from a directory holding
/// [`ENCODER_JSON_FILE`] and [`VOCAB_BPE_FILE`].
pub fn load_gpt2_vocab_dir<T, P>(dir: P) -> TCResult<VocabularyTable<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    load_gpt2_vocab_paths(dir.join(ENCODER_JSON_FILE), dir.join(VOCAB_BPE_FILE))
}

/// Save a [`VocabularyTable`] to a directory as
/// [`ENCODER_JSON_FILE`] and [`VOCAB_BPE_FILE`].
pub fn save_gpt2_vocab_dir<T, P>(
    vocab: &VocabularyTable<T>,
    dir: P,
) -> TCResult<()>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let dir = dir.as_ref();

    let mut writer = BufWriter::new(File::create(dir.join(ENCODER_JSON_FILE))?);
    write_encoder_json(vocab.token_ids(), &mut writer)?;
    writer.flush()?;

    let mut writer = BufWriter::new(File::create(dir.join(VOCAB_BPE_FILE))?);
    write_vocab_bpe(&vocab.merge_rules(), &mut writer)?;
    writer.flush()?;

    Ok(())
}
