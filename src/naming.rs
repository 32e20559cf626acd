//! 충돌 회피 파일 이름 생성 모듈
//!
//! 출력 폴더에 이미 같은 이름의 파일이 있으면 `_1`, `_2` ... 접미사를 붙여
//! 기존 파일을 덮어쓰지 않는 이름을 찾습니다.

use std::path::{Path, PathBuf};

use crate::error::{DngBatchError, Result};

/// 접미사 탐색 최대 횟수
pub const MAX_NAME_ATTEMPTS: u32 = 100_000;

/// 충돌 없는 출력 이름
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueName {
    /// 최종 파일 이름 (예: `IMG_0001_1.dng`)
    pub file_name: String,
    /// 출력 폴더 기준 전체 경로
    pub path: PathBuf,
    /// 충돌 횟수 (0이면 원래 이름 그대로)
    pub collisions: u32,
}

impl UniqueName {
    /// 이름이 바뀌었는지 여부
    pub fn was_renamed(&self) -> bool {
        self.collisions > 0
    }
}

/// 확장자 앞에 `.`이 없으면 붙여서 반환
fn normalize_extension(extension: &str) -> String {
    if extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{}", extension)
    }
}

/// 출력 폴더에서 사용할 수 있는 파일 이름 찾기
///
/// 파일을 만들지는 않으므로 결과를 실제로 생성하기 전까지는
/// 같은 인자로 여러 번 호출해도 같은 이름이 반환됩니다.
/// 동시에 쓰는 다른 프로세스에 대한 잠금은 없습니다.
///
/// # Arguments
/// * `dest_dir` - 출력 폴더
/// * `base` - 확장자를 뺀 파일 이름
/// * `extension` - 확장자 (`.dng` 또는 `dng`)
///
/// # Examples
/// ```
/// use dngbatch::naming::unique_name;
///
/// let dir = tempfile::tempdir().unwrap();
/// let name = unique_name(dir.path(), "IMG_0001", "dng").unwrap();
/// assert_eq!(name.file_name, "IMG_0001.dng");
/// assert_eq!(name.collisions, 0);
/// ```
pub fn unique_name(dest_dir: &Path, base: &str, extension: &str) -> Result<UniqueName> {
    unique_name_within(dest_dir, base, extension, MAX_NAME_ATTEMPTS)
}

/// 접미사 탐색 횟수를 `max_attempts`로 제한해 파일 이름 찾기
pub fn unique_name_within(
    dest_dir: &Path,
    base: &str,
    extension: &str,
    max_attempts: u32,
) -> Result<UniqueName> {
    let extension = normalize_extension(extension);

    let mut collisions = 0u32;
    let mut file_name = format!("{}{}", base, extension);
    let mut path = dest_dir.join(&file_name);

    while path.exists() {
        if collisions >= max_attempts {
            return Err(DngBatchError::NameSpaceExhausted {
                dir: dest_dir.to_path_buf(),
                base: base.to_string(),
                extension,
                attempts: collisions,
            });
        }
        collisions += 1;
        file_name = format!("{}_{}{}", base, collisions, extension);
        path = dest_dir.join(&file_name);
    }

    Ok(UniqueName {
        file_name,
        path,
        collisions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_collision() {
        let temp_dir = TempDir::new().unwrap();
        let name = unique_name(temp_dir.path(), "IMG_0001", ".dng").unwrap();

        assert_eq!(name.file_name, "IMG_0001.dng");
        assert_eq!(name.path, temp_dir.path().join("IMG_0001.dng"));
        assert!(!name.was_renamed());
    }

    #[test]
    fn test_extension_without_dot() {
        let temp_dir = TempDir::new().unwrap();
        let name = unique_name(temp_dir.path(), "IMG_0001", "CR2").unwrap();

        assert_eq!(name.file_name, "IMG_0001.CR2");
    }

    #[test]
    fn test_collision_suffixes() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("IMG_0001.dng"), b"x").unwrap();
        fs::write(temp_dir.path().join("IMG_0001_1.dng"), b"x").unwrap();

        let name = unique_name(temp_dir.path(), "IMG_0001", ".dng").unwrap();

        assert_eq!(name.file_name, "IMG_0001_2.dng");
        assert_eq!(name.collisions, 2);
        assert!(!name.path.exists());
    }

    #[test]
    fn test_other_extension_does_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("IMG_0001.cr2"), b"x").unwrap();

        let name = unique_name(temp_dir.path(), "IMG_0001", ".dng").unwrap();
        assert_eq!(name.collisions, 0);
    }

    #[test]
    fn test_idempotent_until_created() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.dng"), b"x").unwrap();

        let first = unique_name(temp_dir.path(), "a", ".dng").unwrap();
        let second = unique_name(temp_dir.path(), "a", ".dng").unwrap();
        assert_eq!(first, second);

        fs::write(&first.path, b"x").unwrap();
        let third = unique_name(temp_dir.path(), "a", ".dng").unwrap();
        assert_eq!(third.file_name, "a_2.dng");
    }

    #[test]
    fn test_search_limit_exhausted() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.dng", "a_1.dng", "a_2.dng"] {
            fs::write(temp_dir.path().join(name), b"x").unwrap();
        }

        let result = unique_name_within(temp_dir.path(), "a", "dng", 2);
        assert!(matches!(
            result,
            Err(DngBatchError::NameSpaceExhausted { attempts: 2, .. })
        ));

        let name = unique_name_within(temp_dir.path(), "a", "dng", 3).unwrap();
        assert_eq!(name.file_name, "a_3.dng");
    }
}
