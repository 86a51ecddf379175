use beanprice_core::store::error::StoreError;
use beanprice_core::store::port::KvStore;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 值文件的扩展名
const VALUE_EXT: &str = "json";
/// 写入过程中使用的临时文件扩展名
const TMP_EXT: &str = "json.tmp";

/// KvStore 的本地文件实现。
///
/// # Summary
/// 每个键对应根目录下的一个 `<key>.json` 文件，值按原样写入。
///
/// # Invariants
/// * 根目录在实例创建时即存在。
/// * 写入先落到同目录的临时文件，再通过 `rename` 替换，读者只会看到完整的新值或旧值。
/// * 键中不允许出现路径分隔符，也不允许以 `.` 开头。
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// 使用 `config::get_root_dir` 配置的目录创建存储。
    pub fn new() -> Result<Self, StoreError> {
        Self::open(crate::config::get_root_dir())
    }

    /// 创建以 `root` 为根目录的文件存储。
    ///
    /// # Logic
    /// 1. 递归创建根目录。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或目录创建失败。
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::Write(format!("create {}: {e}", root.display())))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str, ext: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && !key.contains(['/', '\\', '\0']);
        valid.then(|| self.root.join(format!("{key}.{ext}")))
    }
}

impl KvStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self
            .path_for(key, VALUE_EXT)
            .ok_or_else(|| StoreError::Read(format!("invalid key '{key}'")))?;

        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read(format!("{}: {e}", path.display()))),
        }
    }

    /// # Summary
    /// 原子地整体替换键值。
    ///
    /// # Logic
    /// 1. 写入 `<key>.json.tmp` 并 fsync。
    /// 2. `rename` 覆盖 `<key>.json`。
    /// 3. 任一步失败时尽量清理临时文件，并返回 `StoreError::Write`。
    fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        let invalid = || StoreError::Write(format!("invalid key '{key}'"));
        let path = self.path_for(key, VALUE_EXT).ok_or_else(invalid)?;
        let tmp = self.path_for(key, TMP_EXT).ok_or_else(invalid)?;

        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &path));

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp)
                && cleanup.kind() != ErrorKind::NotFound
            {
                debug!(path = %tmp.display(), error = %cleanup, "Failed to remove temp file");
            }
            return Err(StoreError::Write(format!("{}: {e}", path.display())));
        }

        debug!(path = %path.display(), bytes = value.len(), "Value written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self
            .path_for(key, VALUE_EXT)
            .ok_or_else(|| StoreError::Write(format!("invalid key '{key}'")))?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(format!("{}: {e}", path.display()))),
        }
    }
}
