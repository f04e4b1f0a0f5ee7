//! Directory-backed durable mirror.
//!
//! Every key is stored as `<key>.json` inside a single capability-scoped
//! directory. Writes land in a temporary sibling first and are renamed over
//! the target so a crash never leaves a half-written collection behind.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;

use crate::task::ports::{DurableMirror, MirrorError, MirrorResult};

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Durable mirror rooted at a directory on disk.
#[derive(Debug)]
pub struct FileMirror {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FileMirror {
    /// Opens (creating if needed) the mirror directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> MirrorResult<Self> {
        let root_path = root.as_ref();
        Dir::create_ambient_dir_all(root_path, ambient_authority()).map_err(MirrorError::io)?;
        let dir = Dir::open_ambient_dir(root_path, ambient_authority()).map_err(MirrorError::io)?;
        Ok(Self {
            root: root_path.to_owned(),
            dir,
        })
    }

    /// Returns the directory the mirror writes to.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

fn file_name(key: &str, extension: &str) -> MirrorResult<String> {
    let is_valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'));
    if !is_valid {
        return Err(MirrorError::InvalidKey(key.to_owned()));
    }
    Ok(format!("{key}.{extension}"))
}

impl DurableMirror for FileMirror {
    fn get_item(&self, key: &str) -> MirrorResult<Option<String>> {
        let name = file_name(key, VALUE_EXTENSION)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(MirrorError::io(err)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> MirrorResult<()> {
        let name = file_name(key, VALUE_EXTENSION)?;
        let temp_name = file_name(key, TEMP_EXTENSION)?;
        self.dir
            .write(&temp_name, value.as_bytes())
            .map_err(MirrorError::io)?;
        self.dir
            .rename(&temp_name, &self.dir, &name)
            .map_err(MirrorError::io)
    }
}

#[cfg(test)]
mod tests {
    use super::FileMirror;
    use crate::task::ports::{DurableMirror, MirrorError};
    use camino::Utf8Path;
    use rstest::rstest;

    fn temp_mirror() -> (tempfile::TempDir, FileMirror) {
        let temp = tempfile::tempdir().expect("temporary directory should be created");
        let root = Utf8Path::from_path(temp.path())
            .expect("temporary path should be UTF-8")
            .join("store");
        let mirror = FileMirror::open(&root).expect("mirror should open");
        (temp, mirror)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (_temp, mirror) = temp_mirror();
        let value = mirror.get_item("taskai-tasks").expect("read should succeed");
        assert!(value.is_none());
    }

    #[test]
    fn written_value_survives_reopen() {
        let (_temp, mirror) = temp_mirror();
        mirror
            .set_item("taskai-tasks", "[]")
            .expect("write should succeed");
        mirror
            .set_item("taskai-tasks", r#"[{"id":"x"}]"#)
            .expect("overwrite should succeed");

        let reopened = FileMirror::open(mirror.root()).expect("mirror should reopen");
        let value = reopened.get_item("taskai-tasks").expect("read should succeed");
        assert_eq!(value.as_deref(), Some(r#"[{"id":"x"}]"#));
    }

    #[rstest]
    #[case("")]
    #[case("../escape")]
    #[case(".hidden")]
    #[case("with space")]
    #[case("nested/key")]
    fn rejects_keys_outside_the_safe_alphabet(#[case] key: &str) {
        let (_temp, mirror) = temp_mirror();
        let result = mirror.set_item(key, "[]");
        assert!(matches!(result, Err(MirrorError::InvalidKey(rejected)) if rejected == key));
    }
}
