//! 출력 파일 쓰기
//!
//! 모든 출력은 같은 디렉토리의 임시 파일에 쓴 뒤 rename으로 교체합니다.
//! 중간에 실패해도 이전 출력이 반쯤 덮어써진 채로 남지 않습니다.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::ReporterError;

/// 파일을 원자적으로 씁니다 (임시 파일 + rename).
///
/// 상위 디렉토리가 없으면 생성합니다.
///
/// # Errors
///
/// 디렉토리 생성, 쓰기, rename 중 하나라도 실패하면 `ReporterError::Io`
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ReporterError> {
    let io_error = |source: std::io::Error| ReporterError::Io {
        path: path.display().to_string(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(io_error)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_error)?;
    tmp.write_all(bytes).map_err(io_error)?;
    tmp.as_file().sync_all().map_err(io_error)?;
    tmp.persist(path).map_err(|e| io_error(e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "output written");
    Ok(())
}

/// 이전 실행이 남긴 출력을 지웁니다. 파일이 없으면 아무 일도 하지 않습니다.
///
/// 실제로 지웠으면 `true`를 반환합니다.
pub fn remove_stale(path: &Path) -> Result<bool, ReporterError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "stale output removed");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ReporterError::Io {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_atomic_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("badges").join("tests.svg");
        write_atomic(&path, b"<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        write_atomic(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");

        // 임시 파일이 남지 않아야 함
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn write_atomic_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let err = write_atomic(&blocker.join("out.html"), b"x").unwrap_err();
        assert!(matches!(err, ReporterError::Io { .. }));
    }

    #[test]
    fn remove_stale_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coverage.svg");
        std::fs::write(&path, "<svg/>").unwrap();
        assert!(remove_stale(&path).unwrap());
        assert!(!remove_stale(&path).unwrap());
        assert!(!path.exists());
    }
}
