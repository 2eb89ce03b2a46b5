//! Filename-derived names for macros and showcase rows.
//!
//! Every image contributes two names to the generated document:
//!
//! - a **macro identifier**, used after the category key in `@Category.name`.
//!   LiaScript macro names must stay within `[A-Za-z0-9_]`, so German umlauts
//!   are transliterated and anything else becomes `_`.
//! - a **display label** for the showcase table, where readability matters
//!   more than strictness.
//!
//! ## Examples
//!
//! - `Bär's-image_123.png` → identifier `Baer_s_image_123`, label `Bär's image 123`
//! - `straße.txt` → identifier `strasse`, label `straße`
//! - `Koje_Grundfläche-farbig.png` → identifier `Koje_Grundflaeche_farbig`
//!
//! Two different filenames can collapse to the same identifier (`a-b.png` and
//! `a_b.png`). Collisions are not detected.

use std::path::Path;

/// Transliterations applied before the character-class replacement.
/// Case-sensitive: upper- and lowercase letters map independently.
const UMLAUTS: &[(char, &str)] = &[
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('Ä', "Ae"),
    ('Ö', "Oe"),
    ('Ü', "Ue"),
    ('ß', "ss"),
];

/// Final path component without its extension.
///
/// Dotfiles keep their full name (`.hidden` has no extension), and only the
/// last extension is removed (`archive.tar.gz` → `archive.tar`).
fn stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Convert a filename into a macro-safe identifier.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in stem(name).chars() {
        if let Some((_, replacement)) = UMLAUTS.iter().find(|(from, _)| *from == c) {
            out.push_str(replacement);
        } else if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    out
}

/// Human-readable label: extension stripped, `_` and `-` become spaces.
pub fn display_label(name: &str) -> String {
    stem(name).replace(['_', '-'], " ")
}
