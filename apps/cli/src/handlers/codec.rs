use anyhow::Result;
use dbm::{Vocabulary, WireValue};
use serde_json::Value;
use std::io::Write;

/// Prints `<ordinal>\t<name>` for a raw command-line value.
///
/// The value is read as a JSON scalar when it parses as one (`2`, `null`, `"MYSQL"`),
/// otherwise as a bare name.
///
/// # Errors
/// Returns an error if the output cannot be written.
pub fn decode(out: &mut impl Write, vocabulary: Vocabulary, raw: &str) -> Result<()> {
    let (ordinal, name) = match serde_json::from_str::<Value>(raw) {
        Ok(value) => vocabulary.decode(&value),
        Err(_) => vocabulary.decode(WireValue::Str(raw)),
    };
    tracing::debug!(vocabulary = vocabulary.key(), raw, ordinal, "Decoded");

    writeln!(out, "{ordinal}\t{name}")?;
    Ok(())
}

/// Prints the canonical name for `ordinal`.
///
/// # Errors
/// Returns an error if the output cannot be written.
pub fn encode(out: &mut impl Write, vocabulary: Vocabulary, ordinal: i32) -> Result<()> {
    writeln!(out, "{}", vocabulary.encode(ordinal))?;
    Ok(())
}

/// Prints the vocabulary's table, sentinel first.
///
/// # Errors
/// Returns an error if the output cannot be written.
pub fn table(out: &mut impl Write, vocabulary: Vocabulary) -> Result<()> {
    for (ordinal, name) in vocabulary.table() {
        writeln!(out, "{ordinal:>3}  {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn decodes_names_ordinals_and_null() {
        assert_eq!(run(|o| decode(o, Vocabulary::Engine, "MYSQL")), "2\tMYSQL\n");
        assert_eq!(run(|o| decode(o, Vocabulary::Engine, "7")), "7\tMONGODB\n");
        assert_eq!(run(|o| decode(o, Vocabulary::Engine, "\"REDIS\"")), "8\tREDIS\n");
        assert_eq!(run(|o| decode(o, Vocabulary::Engine, "null")), "-1\tUNRECOGNIZED\n");
        assert_eq!(run(|o| decode(o, Vocabulary::Engine, "NOT_A_REAL_ENGINE")), "-1\tUNRECOGNIZED\n");
        assert_eq!(run(|o| decode(o, Vocabulary::Engine, "0")), "0\tENGINE_UNSPECIFIED\n");
    }

    #[test]
    fn encodes_known_and_unknown_ordinals() {
        assert_eq!(run(|o| encode(o, Vocabulary::Engine, 2)), "MYSQL\n");
        assert_eq!(run(|o| encode(o, Vocabulary::Engine, -1)), "UNRECOGNIZED\n");
        assert_eq!(run(|o| encode(o, Vocabulary::State, 42)), "UNRECOGNIZED\n");
    }

    #[test]
    fn prints_tables() {
        let out = run(|o| table(o, Vocabulary::State));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, [" -1  UNRECOGNIZED", "  0  STATE_UNSPECIFIED", "  1  ACTIVE", "  2  DELETED"]);
    }
}
