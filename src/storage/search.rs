//! Searching and listing the notes tree
//!
//! Every non-directory entry under the root is a note, hidden files included.
//! The tree is walked in file-name order so results are stable between runs.

use std::{
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::storage::Directory;

/// Size of each read when scanning note content.
const CHUNK_SIZE: usize = 64 * 1024;

/// A plain substring predicate.
///
/// There are no glob or regex semantics: a haystack matches if it contains
/// the term. Matching is case-sensitive unless built with
/// [`Matcher::ignore_case`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    term: String,
    ignore_case: bool,
}

impl Matcher {
    /// A case-sensitive matcher for `term`.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ignore_case: false,
        }
    }

    /// A case-insensitive matcher for `term`.
    ///
    /// Names and paths are compared with full Unicode lowercasing. File
    /// content is compared byte-wise with ASCII case folding only.
    #[must_use]
    pub fn ignore_case(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ignore_case: true,
        }
    }

    /// The search term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether `haystack` contains the term.
    #[must_use]
    pub fn matches(&self, haystack: &str) -> bool {
        if self.ignore_case {
            haystack
                .to_lowercase()
                .contains(&self.term.to_lowercase())
        } else {
            haystack.contains(&self.term)
        }
    }

    /// Whether the base name (`filename.extension`) of `path` contains the
    /// term.
    fn matches_name(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matches(&name.to_string_lossy()))
    }

    /// Whether the content read from `reader` contains the term.
    ///
    /// The content is streamed in chunks, keeping enough of the previous
    /// chunk to catch a match spanning the boundary.
    fn matches_content(&self, mut reader: impl Read) -> io::Result<bool> {
        let needle = self.fold(self.term.as_bytes().to_vec());
        if needle.is_empty() {
            return Ok(true);
        }

        let overlap = needle.len() - 1;
        let mut window: Vec<u8> = Vec::with_capacity(CHUNK_SIZE + overlap);
        let mut chunk = vec![0; CHUNK_SIZE];

        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => return Ok(false),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            window.extend_from_slice(&chunk[..read]);
            if self.ignore_case {
                window.make_ascii_lowercase();
            }
            if window.windows(needle.len()).any(|w| w == needle.as_slice()) {
                return Ok(true);
            }

            let keep = overlap.min(window.len());
            window.drain(..window.len() - keep);
        }
    }

    fn fold(&self, mut bytes: Vec<u8>) -> Vec<u8> {
        if self.ignore_case {
            bytes.make_ascii_lowercase();
        }
        bytes
    }
}

impl Directory {
    /// Find notes whose base name contains the term.
    #[must_use]
    pub fn shallow_search(&self, matcher: &Matcher) -> Vec<PathBuf> {
        self.notes()
            .filter(|path| matcher.matches_name(path))
            .collect()
    }

    /// Find notes whose base name or content contains the term.
    ///
    /// The content scan is skipped for notes whose name already matches.
    /// Notes whose content cannot be read (special files, permission errors)
    /// are matched on their name only.
    #[must_use]
    pub fn deep_search(&self, matcher: &Matcher) -> Vec<PathBuf> {
        self.notes()
            .filter(|path| matcher.matches_name(path) || content_matches(matcher, path))
            .collect()
    }

    /// List every note whose path relative to the root contains `filter`.
    ///
    /// With no filter, the whole tree is listed.
    #[must_use]
    pub fn list(&self, filter: Option<&Matcher>) -> Vec<PathBuf> {
        self.notes()
            .filter(|path| {
                filter.is_none_or(|matcher| matcher.matches(&self.relative_display(path)))
            })
            .collect()
    }

    /// The path of a note relative to the root, using `/` separators.
    #[must_use]
    pub fn relative_display(&self, path: &Path) -> String {
        let relative = path.strip_prefix(self.root()).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Every non-directory entry under the root, in file-name order.
    ///
    /// Symbolic links are followed, so linked directories are walked into
    /// rather than reported as notes. Dangling links and link loops are
    /// skipped.
    fn notes(&self) -> impl Iterator<Item = PathBuf> {
        WalkDir::new(self.root())
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| !entry.file_type().is_dir())
            .map(walkdir::DirEntry::into_path)
    }
}

fn content_matches(matcher: &Matcher, path: &Path) -> bool {
    let scan = || -> io::Result<bool> {
        // Only regular files are scanned; opening a FIFO would block.
        if !fs::metadata(path)?.is_file() {
            return Ok(false);
        }
        let file = File::open(path)?;
        matcher.matches_content(file)
    };

    scan().unwrap_or_else(|e| {
        tracing::debug!("Skipping unreadable note {}: {e}", path.display());
        false
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use test_case::test_case;

    use super::*;
    use crate::storage::directory::tests::{create, setup_temp_directory};

    fn write(dir: &Directory, relative: &str, content: &[u8]) -> PathBuf {
        let path = dir.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test_case("alpha.md", "alpha", true; "prefix")]
    #[test_case("alpha.md", ".md", true; "extension")]
    #[test_case("alpha.md", "pha.m", true; "spanning the dot")]
    #[test_case("alpha.md", "Alpha", false; "case sensitive")]
    #[test_case("alpha.md", "a*a", false; "no glob")]
    #[test_case("alpha.md", "", true; "empty term")]
    fn substring_predicate(haystack: &str, term: &str, expected: bool) {
        assert_eq!(Matcher::new(term).matches(haystack), expected);
    }

    #[test]
    fn ignore_case_predicate() {
        assert!(Matcher::ignore_case("ALPHA").matches("alpha.md"));
        assert!(Matcher::ignore_case("Ünïcode").matches("ünïcode.txt"));
    }

    #[test]
    fn content_match_across_chunk_boundary() {
        let mut content = vec![b'x'; CHUNK_SIZE - 3];
        content.extend_from_slice(b"needle");
        content.extend(vec![b'y'; CHUNK_SIZE]);

        assert!(Matcher::new("needle").matches_content(Cursor::new(&content)).unwrap());
        assert!(!Matcher::new("needles").matches_content(Cursor::new(&content)).unwrap());
    }

    #[test]
    fn content_match_in_binary_data() {
        let content = b"\xff\xfe\x00binary\x00term\xc3";

        assert!(Matcher::new("term").matches_content(&content[..]).unwrap());
        assert!(Matcher::ignore_case("BINARY").matches_content(&content[..]).unwrap());
        assert!(!Matcher::new("BINARY").matches_content(&content[..]).unwrap());
    }

    #[test]
    fn content_match_short_input() {
        assert!(!Matcher::new("longer than input").matches_content(&b"short"[..]).unwrap());
        assert!(!Matcher::new("x").matches_content(&b""[..]).unwrap());
    }

    #[test]
    fn create_then_find() {
        let (_tmp, dir) = setup_temp_directory();
        let path = create(&dir, "projects", "alpha", "md");

        assert!(dir.shallow_search(&Matcher::new("alpha")).contains(&path));
        assert!(dir.list(None).contains(&path));
    }

    #[test]
    fn shallow_search_ignores_directory_names() {
        let (_tmp, dir) = setup_temp_directory();
        write(&dir, "alpha/beta.txt", b"");

        assert!(dir.shallow_search(&Matcher::new("alpha")).is_empty());
        assert_eq!(dir.shallow_search(&Matcher::new("beta")).len(), 1);
    }

    #[test]
    fn shallow_search_includes_hidden_files() {
        let (_tmp, dir) = setup_temp_directory();
        let hidden = write(&dir, ".secret/.plan.txt", b"");

        assert_eq!(dir.shallow_search(&Matcher::new("plan")), vec![hidden]);
    }

    #[test]
    fn no_results_is_empty() {
        let (_tmp, dir) = setup_temp_directory();
        write(&dir, "a.txt", b"hello");

        assert!(dir.shallow_search(&Matcher::new("zzz")).is_empty());
        assert!(dir.deep_search(&Matcher::new("zzz")).is_empty());
    }

    #[test]
    fn deep_search_finds_content() {
        let (_tmp, dir) = setup_temp_directory();
        let hit = write(&dir, "work/meeting.md", b"discussed the budget");
        write(&dir, "work/other.md", b"nothing here");

        assert_eq!(dir.deep_search(&Matcher::new("budget")), vec![hit]);
        assert!(dir.shallow_search(&Matcher::new("budget")).is_empty());
    }

    #[test]
    fn deep_search_is_superset_of_shallow_search() {
        let (_tmp, dir) = setup_temp_directory();
        write(&dir, "a/notes-on-rust.md", b"ownership");
        write(&dir, "a/borrowing.md", b"rust borrow checker");
        write(&dir, "b/unrelated.txt", b"haskell");
        write(&dir, "b/rust.tex", b"");

        for term in ["rust", "o", "md", "haskell", "missing", ""] {
            let matcher = Matcher::new(term);
            let shallow = dir.shallow_search(&matcher);
            let deep = dir.deep_search(&matcher);
            assert!(
                shallow.iter().all(|path| deep.contains(path)),
                "deep search for '{term}' is missing shallow results"
            );
        }
    }

    #[test]
    fn deep_search_deduplicates() {
        let (_tmp, dir) = setup_temp_directory();
        let both = write(&dir, "rust.md", b"all about rust");

        assert_eq!(dir.deep_search(&Matcher::new("rust")), vec![both]);
    }

    #[cfg(unix)]
    #[test]
    fn deep_search_skips_unreadable_files() {
        let (_tmp, dir) = setup_temp_directory();
        let first = write(&dir, "a.txt", b"needle in a");
        std::os::unix::fs::symlink(dir.root().join("missing"), dir.root().join("b.txt"))
            .unwrap();
        let third = write(&dir, "c.txt", b"needle in c");

        assert_eq!(dir.deep_search(&Matcher::new("needle")), vec![first, third]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_is_skipped() {
        let (_tmp, dir) = setup_temp_directory();
        let note = write(&dir, "a.md", b"");
        std::os::unix::fs::symlink(dir.root().join("missing"), dir.root().join("dangling.md"))
            .unwrap();

        assert!(dir.deep_search(&Matcher::new("dangling")).is_empty());
        assert_eq!(dir.list(None), vec![note]);
    }

    #[cfg(unix)]
    #[test]
    fn linked_directory_is_walked_into() {
        let (tmp, dir) = setup_temp_directory();
        let shared = tmp.path().join("shared");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("inner.md"), b"needle").unwrap();
        let link = dir.root().join("linked");
        std::os::unix::fs::symlink(&shared, &link).unwrap();

        let inner = link.join("inner.md");
        assert_eq!(dir.list(None), vec![inner.clone()]);
        assert_eq!(dir.deep_search(&Matcher::new("needle")), vec![inner.clone()]);
        assert!(dir.shallow_search(&Matcher::new("linked")).is_empty());
        assert_eq!(dir.list(Some(&Matcher::new("linked/"))), vec![inner]);
    }

    #[cfg(unix)]
    #[test]
    fn link_loop_does_not_abort_the_walk() {
        let (_tmp, dir) = setup_temp_directory();
        let note = write(&dir, "sub/note.md", b"needle");
        std::os::unix::fs::symlink(dir.root(), dir.root().join("sub/loop")).unwrap();

        assert_eq!(dir.deep_search(&Matcher::new("needle")), vec![note]);
    }

    #[test]
    fn results_follow_file_name_order() {
        let (_tmp, dir) = setup_temp_directory();
        let c = write(&dir, "c.txt", b"");
        let a = write(&dir, "a/z.txt", b"");
        let b = write(&dir, "b.txt", b"");

        assert_eq!(dir.list(None), vec![a, b, c]);
    }

    #[test]
    fn list_filters_by_relative_path_substring() {
        let (_tmp, dir) = setup_temp_directory();
        let alpha = create(&dir, "projects/2024", "alpha", "md");
        let beta = create(&dir, "archive/projects", "beta", "txt");
        write(&dir, "misc/gamma.tex", b"");

        assert_eq!(
            dir.list(Some(&Matcher::new("projects"))),
            vec![beta, alpha.clone()]
        );
        assert_eq!(dir.list(Some(&Matcher::new("2024/al"))), vec![alpha]);
        assert!(dir.list(Some(&Matcher::new("nowhere"))).is_empty());
        assert_eq!(dir.list(None).len(), 3);
    }

    #[test]
    fn list_filter_does_not_match_root_path() {
        let (_tmp, dir) = setup_temp_directory();
        write(&dir, "a.txt", b"");

        // every path lives under the `notes` root
        assert!(dir.list(Some(&Matcher::new("notes"))).is_empty());
    }

    #[test]
    fn list_empty_tree() {
        let (_tmp, dir) = setup_temp_directory();
        dir.ensure_dir(Path::new("empty/subdir")).unwrap();

        assert!(dir.list(None).is_empty());
    }

    #[test]
    fn relative_display_uses_forward_slashes() {
        let (_tmp, dir) = setup_temp_directory();
        let path = dir.root().join("a").join("b").join("c.md");

        assert_eq!(dir.relative_display(&path), "a/b/c.md");
    }
}
