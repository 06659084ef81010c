//! Language key → Judge0 CE `language_id` table.
//!
//! Keys are the identifiers the web editor sends (`python`, `cpp`, ...).
//! Add an engine by appending a row to `LANGUAGE_TABLE`.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub key: &'static str,
    pub language_id: u32,
    pub label: &'static str,
}

const LANGUAGE_TABLE: &[(&str, u32, &str)] = &[
    ("python", 71, "Python (3.8.1)"),
    ("javascript", 93, "JavaScript (Node.js 18.15.0)"),
    ("java", 91, "Java (JDK 17.0.6)"),
    ("cpp", 54, "C++ (GCC 9.2.0)"),
    ("c", 50, "C (GCC 9.2.0)"),
    ("typescript", 94, "TypeScript (5.0.3)"),
    ("go", 106, "Go (1.22.0)"),
    ("rust", 108, "Rust (1.85.0)"),
    ("kotlin", 111, "Kotlin (2.1.10)"),
    ("swift", 83, "Swift (5.2.3)"),
    ("ruby", 72, "Ruby (2.7.0)"),
    ("php", 98, "PHP (8.3.11)"),
    ("csharp", 51, "C# (Mono 6.6.0.161)"),
    ("scala", 112, "Scala (3.4.2)"),
    ("r", 99, "R (4.4.1)"),
    ("perl", 85, "Perl (5.28.1)"),
    ("lua", 64, "Lua (5.3.5)"),
    ("bash", 46, "Bash (5.0.0)"),
    ("dart", 90, "Dart (2.19.2)"),
    ("elixir", 57, "Elixir (1.9.4)"),
    ("haskell", 61, "Haskell (GHC 8.8.1)"),
    ("clojure", 86, "Clojure (1.10.1)"),
    ("fsharp", 87, "F# (.NET Core SDK 3.1.202)"),
    ("ocaml", 65, "OCaml (4.09.0)"),
    ("erlang", 58, "Erlang (OTP 22.2)"),
    ("cobol", 77, "COBOL (GnuCOBOL 2.2)"),
    ("fortran", 59, "Fortran (GFortran 9.2.0)"),
    ("pascal", 67, "Pascal (FPC 3.0.4)"),
    ("groovy", 88, "Groovy (3.0.3)"),
];

static LANGUAGES: LazyLock<HashMap<&'static str, Language>> = LazyLock::new(|| {
    LANGUAGE_TABLE
        .iter()
        .map(|&(key, language_id, label)| {
            (
                key,
                Language {
                    key,
                    language_id,
                    label,
                },
            )
        })
        .collect()
});

/// Looks up a language by its exact key. Keys are case-sensitive.
pub fn lookup(key: &str) -> Option<&'static Language> {
    LANGUAGES.get(key)
}

/// All supported languages, sorted by key.
pub fn all() -> Vec<&'static Language> {
    let mut languages: Vec<_> = LANGUAGES.values().collect();
    languages.sort_by_key(|l| l.key);
    languages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_keys() {
        assert_eq!(lookup("python").map(|l| l.language_id), Some(71));
        assert_eq!(lookup("cpp").map(|l| l.language_id), Some(54));
        assert_eq!(lookup("rust").map(|l| l.language_id), Some(108));
    }

    #[test]
    fn test_lookup_unknown_key() {
        assert!(lookup("brainfuck").is_none());
        assert!(lookup("Python").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_table_has_no_duplicate_keys() {
        assert_eq!(LANGUAGES.len(), LANGUAGE_TABLE.len());
    }

    #[test]
    fn test_all_is_sorted() {
        let keys: Vec<_> = all().iter().map(|l| l.key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.first(), Some(&"bash"));
    }
}
