use anyhow::{Context, Result};
use std::io::Write;

/// Builds the registry and prints one line per binding: name, kind, owning slice.
///
/// # Errors
/// Returns an error if the registry cannot be composed or the output cannot be written.
pub fn exports(out: &mut impl Write) -> Result<()> {
    let registry = dbm::init().context("Failed to initialize store slices")?;

    for binding in registry.bindings() {
        writeln!(out, "{:<28} {:<9} {}", binding.name, binding.kind, binding.slice)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_binding_once() {
        let mut out = Vec::new();
        exports(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        let line = out.lines().find(|l| l.starts_with("upsert_instance ")).unwrap();
        assert!(line.contains("action"));
        assert!(line.ends_with("instance"));
        assert_eq!(out.lines().filter(|l| l.starts_with("Instance ")).count(), 1);
        assert!(out.lines().any(|l| l.starts_with("export_file_extension") && l.ends_with("export")));
    }
}
